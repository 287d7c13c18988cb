//! PEM fuel-cell stack diagnostics - entry point
//!
//! Solves the flux-continuity system at one or many operating points and
//! reports the voltage, hydration, and power breakdown.
//!
//! CLI Usage:
//!   cargo run                        # Solve the reference operating point
//!   cargo run -- --sweep             # Polarization sweep up the load curve
//!   cargo run -- --sweep -n 20      # Custom sweep point count
//!   cargo run -- -f stack.json      # Load stack parameters from JSON

use std::time::Instant;

use anyhow::Result;
use pemfc_stack::{
    CellStackParameters, NewtonSolver, StackDiagnostics, StackInputs, StackModel, StackProperties,
    UnknownActivities,
};

/// Solve and report the reference operating point.
fn run_reference(model: &StackModel) -> Result<()> {
    println!("=== PEM Fuel-Cell Stack - Reference Operating Point ===\n");

    let inputs = StackInputs::reference();
    println!("Cells in series: {}", model.parameters().geometry.cell_count);
    println!(
        "Active area: {:.1} cm² per cell",
        model.parameters().geometry.cell_area_m2 * 1e4
    );
    println!("Stack temperature: {:.2} K", inputs.stack_temperature_K);
    println!();

    let solver = NewtonSolver::default();
    let start = Instant::now();
    let (solution, stats) = solver.solve(
        |candidate| model.residual(&inputs, candidate),
        model.initial_activities(&inputs).as_array(),
    )?;
    let elapsed = start.elapsed();

    let evaluation = model.evaluate(&inputs, &UnknownActivities::from_array(solution));
    let diagnostics = StackDiagnostics::from_evaluation(&inputs, &evaluation, &stats);
    diagnostics.print_summary();
    println!("\nSolve time: {:.2?}", elapsed);

    // Diagnostic checks
    println!("\n=== Diagnostic Checks ===");
    let warnings = diagnostics.warnings();
    if warnings.is_empty() {
        println!("✓ Operating point looks physical");
    } else {
        for warning in &warnings {
            println!("⚠️  WARNING: {}", warning);
        }
    }

    Ok(())
}

/// Sweep the load from near open circuit toward the limiting current,
/// warm-starting each solve from the previous point.
fn run_sweep(model: &StackModel, points: usize) -> Result<()> {
    let limiting_current_A = model.parameters().kinetics.limiting_current_density_A_per_m2
        * model.parameters().geometry.cell_area_m2;
    let max_current_A = 0.9 * limiting_current_A;

    println!(
        "=== Polarization Sweep ({} points up to {:.1} A) ===\n",
        points, max_current_A
    );

    let solver = NewtonSolver::default();
    let mut inputs = StackInputs::reference();
    let mut warm_start = model.initial_activities(&inputs).as_array();
    let mut converged = 0usize;

    StackDiagnostics::print_row_header();
    let sweep_start = Instant::now();
    for point in 1..=points {
        // Channel compositions held at the reference values; a host network
        // would re-supply them at each operating point
        inputs.branch_current_A = -(max_current_A * point as f64 / points as f64);

        match solver.solve(|candidate| model.residual(&inputs, candidate), warm_start) {
            Ok((solution, stats)) => {
                warm_start = solution;
                converged += 1;
                let evaluation =
                    model.evaluate(&inputs, &UnknownActivities::from_array(solution));
                StackDiagnostics::from_evaluation(&inputs, &evaluation, &stats).print_row();
            }
            Err(e) => {
                log::warn!(
                    "sweep point at {:.1} A did not converge: {}",
                    -inputs.branch_current_A,
                    e
                );
            }
        }
    }
    let elapsed = sweep_start.elapsed();

    println!("\n{}/{} points converged in {:.2?}", converged, points, elapsed);
    Ok(())
}

struct CliOptions {
    params_path: String,
    sweep: bool,
    points: usize,
}

/// Parse CLI arguments
fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut options = CliOptions {
        params_path: "stack_parameters.json".to_string(),
        sweep: false,
        points: 12,
    };

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sweep" | "-s" => options.sweep = true,
            "-n" | "--points" => {
                i += 1;
                if i < args.len() {
                    options.points = args[i].parse().unwrap_or(12);
                }
            }
            "-f" | "--params" => {
                i += 1;
                if i < args.len() {
                    options.params_path = args[i].clone();
                }
            }
            "--help" | "-h" => {
                println!("PEM fuel-cell stack diagnostics");
                println!();
                println!("Usage: pemfc-stack [OPTIONS]");
                println!();
                println!("Options:");
                println!("  --sweep, -s        Polarization sweep instead of a single point");
                println!("  -n, --points N     Number of sweep points (default: 12)");
                println!("  -f, --params FILE  Stack parameter JSON (default: stack_parameters.json)");
                println!("  --help, -h         Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    options
}

fn main() -> Result<()> {
    env_logger::init();

    let options = parse_args();

    let parameters = CellStackParameters::load_or_default(&options.params_path);
    let model = StackModel::new(parameters, StackProperties::default())?;
    log::info!(
        "Stack model ready: {} cells, {:.1} cm² active area",
        model.parameters().geometry.cell_count,
        model.parameters().geometry.cell_area_m2 * 1e4
    );

    if options.sweep {
        run_sweep(&model, options.points)
    } else {
        run_reference(&model)
    }
}
