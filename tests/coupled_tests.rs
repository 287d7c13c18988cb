//! End-to-end tests: solve the coupled water balance and inspect the
//! operating point.
//!
//! Tests verify:
//! - The Newton solve converges at the reference point and along a current
//!   sweep, independent of the starting guess
//! - Solved points satisfy flux continuity and stay in physical bounds
//! - Port outputs (terminal voltage, heat flow, source commands) are
//!   consistent with the solved interior state
//! - Evaluation is bit-for-bit deterministic

use pemfc_stack::membrane::generated_water_flux;
use pemfc_stack::state::{GasState, ACTIVITY_FLOOR};
use pemfc_stack::{
    CellStackParameters, Evaluation, NewtonSolver, SolverStats, StackInputs, StackModel,
    StackProperties, UnknownActivities,
};

fn reference_model() -> StackModel {
    StackModel::new(CellStackParameters::default(), StackProperties::default()).unwrap()
}

fn solve(model: &StackModel, inputs: &StackInputs) -> (Evaluation, SolverStats) {
    let solver = NewtonSolver::default();
    let (solution, stats) = solver
        .solve(
            |candidate| model.residual(inputs, candidate),
            model.initial_activities(inputs).as_array(),
        )
        .unwrap();
    let evaluation = model.evaluate(inputs, &UnknownActivities::from_array(solution));
    (evaluation, stats)
}

// ============================================================================
// Convergence Tests
// ============================================================================

#[test]
fn test_reference_point_converges_quickly() {
    let model = reference_model();
    let (evaluation, stats) = solve(&model, &StackInputs::reference());

    assert!(
        stats.residual_norm < 1e-8,
        "residual norm {:.3e} after {} iterations",
        stats.residual_norm,
        stats.iterations
    );
    assert!(
        stats.iterations <= 15,
        "warm-started Newton took {} iterations",
        stats.iterations
    );
    assert!(evaluation.residuals[0].abs() < 1e-8);
    assert!(evaluation.residuals[1].abs() < 1e-8);
}

#[test]
fn test_solution_independent_of_starting_guess() {
    let model = reference_model();
    let inputs = StackInputs::reference();
    let solver = NewtonSolver::default();

    let (from_channels, _) = solver
        .solve(
            |candidate| model.residual(&inputs, candidate),
            model.initial_activities(&inputs).as_array(),
        )
        .unwrap();
    let (from_midpoint, _) = solver
        .solve(|candidate| model.residual(&inputs, candidate), [0.5, 0.5])
        .unwrap();

    for axis in 0..2 {
        assert!(
            (from_channels[axis] - from_midpoint[axis]).abs() < 1e-8,
            "axis {}: {} vs {}",
            axis,
            from_channels[axis],
            from_midpoint[axis]
        );
    }
}

#[test]
fn test_current_sweep_converges_with_warm_start() {
    let model = reference_model();
    let mut inputs = StackInputs::reference();
    let mut guess = model.initial_activities(&inputs).as_array();
    let solver = NewtonSolver::default();
    let mut previous_voltage = f64::INFINITY;

    for step in 1..=9 {
        inputs.branch_current_A = -30.0 * step as f64;
        let (solution, stats) = solver
            .solve(|candidate| model.residual(&inputs, candidate), guess)
            .unwrap();
        guess = solution;

        let evaluation = model.evaluate(&inputs, &UnknownActivities::from_array(solution));
        let voltage = evaluation.derived.voltage.cell_voltage_V();

        assert!(
            stats.residual_norm < 1e-8,
            "I = {} A: residual {:.3e}",
            inputs.branch_current_A,
            stats.residual_norm
        );
        for activity in solution {
            assert!(
                (0.1..1.2).contains(&activity),
                "I = {} A: catalyst-layer activity {} out of range",
                inputs.branch_current_A,
                activity
            );
        }
        assert!(
            voltage < previous_voltage,
            "cell voltage must fall with load: {} V at {} A",
            voltage,
            inputs.branch_current_A
        );
        assert!(voltage > 0.4, "cell voltage collapsed at {} A", inputs.branch_current_A);
        previous_voltage = voltage;
    }
}

// ============================================================================
// Solved-Point Physics Tests
// ============================================================================

#[test]
fn test_flux_continuity_at_solution() {
    let model = reference_model();
    let (evaluation, _) = solve(&model, &StackInputs::reference());
    let derived = &evaluation.derived;

    // Anode GDL delivers exactly the membrane uptake
    let membrane_total = derived.fluxes.total_mol_per_m2_s();
    assert!(
        (derived.gdl_flux_anode_mol_per_m2_s - membrane_total).abs() < 1e-9,
        "anode continuity violated: {} vs {}",
        derived.gdl_flux_anode_mol_per_m2_s,
        membrane_total
    );

    // Cathode GDL removes membrane water plus generation
    let cathode_supply =
        membrane_total + generated_water_flux(derived.current_density_A_per_m2);
    assert!(
        (derived.gdl_flux_cathode_mol_per_m2_s - cathode_supply).abs() < 1e-9,
        "cathode continuity violated: {} vs {}",
        derived.gdl_flux_cathode_mol_per_m2_s,
        cathode_supply
    );
}

#[test]
fn test_catalyst_layers_sit_between_channels() {
    let model = reference_model();
    let inputs = StackInputs::reference();
    let channel = model.initial_activities(&inputs);
    let solver = NewtonSolver::default();
    let (solved, _) = solver
        .solve(
            |candidate| model.residual(&inputs, candidate),
            channel.as_array(),
        )
        .unwrap();

    // Water drains from the anode channel into the membrane, so the anode
    // catalyst layer runs drier than its channel; the cathode runs wetter.
    assert!(
        solved[0] < channel.anode_catalyst_layer,
        "anode CL {} should be drier than channel {}",
        solved[0],
        channel.anode_catalyst_layer
    );
    assert!(
        solved[1] > channel.cathode_catalyst_layer,
        "cathode CL {} should be wetter than channel {}",
        solved[1],
        channel.cathode_catalyst_layer
    );
}

#[test]
fn test_membrane_water_moves_anode_to_cathode_under_load() {
    let model = reference_model();
    let (evaluation, _) = solve(&model, &StackInputs::reference());
    let fluxes = &evaluation.derived.fluxes;

    assert!(fluxes.electro_osmotic_mol_per_m2_s > 0.0, "drag follows protons");
    assert!(
        fluxes.diffusion_mol_per_m2_s < 0.0,
        "back-diffusion opposes the cathode hydration gradient"
    );
    assert!(
        fluxes.total_mol_per_m2_s() > 0.0,
        "drag dominates at the reference point"
    );
}

#[test]
fn test_hydration_stays_in_vapor_equilibrated_band() {
    let model = reference_model();
    let (evaluation, _) = solve(&model, &StackInputs::reference());
    let derived = &evaluation.derived;

    for content in [derived.water_content_anode, derived.water_content_cathode] {
        assert!(
            (2.0..10.0).contains(&content),
            "water content {} outside the humidified-channel band",
            content
        );
    }
    assert!(
        (1.0..20.0).contains(&derived.membrane_conductivity_S_per_m),
        "conductivity {} S/m implausible at 80 °C",
        derived.membrane_conductivity_S_per_m
    );
}

#[test]
fn test_energy_split_under_load() {
    let model = reference_model();
    let (evaluation, _) = solve(&model, &StackInputs::reference());
    let energy = &evaluation.derived.energy;

    assert!(energy.net_power_W > 0.0);
    assert!(energy.electrical_power_W > 0.0);
    assert!(energy.dissipated_power_W > 0.0, "a loaded stack must reject heat");
    assert!(energy.net_power_W > energy.electrical_power_W);
    assert_eq!(evaluation.outputs.heat_flow_W, -energy.dissipated_power_W);

    let efficiency = energy.efficiency();
    assert!(
        (0.5..0.75).contains(&efficiency),
        "efficiency {} outside the PEM operating band",
        efficiency
    );
}

// ============================================================================
// Port Output Tests
// ============================================================================

#[test]
fn test_source_commands_conserve_mass() {
    let model = reference_model();
    let (evaluation, _) = solve(&model, &StackInputs::reference());
    let commands = &evaluation.outputs.commands;

    // Reaction stoichiometry closes: H2 in + O2 in = H2O out. The moisture
    // commands are equal and opposite by construction.
    let total_kg_per_s = commands.anode_reaction.mass_flow_kg_per_s
        + commands.anode_moisture.mass_flow_kg_per_s
        + commands.cathode_reaction.mass_flow_kg_per_s
        + commands.cathode_moisture.mass_flow_kg_per_s;
    assert!(
        total_kg_per_s.abs() < 1e-6,
        "net mass creation {} kg/s",
        total_kg_per_s
    );
}

#[test]
fn test_source_command_signs_under_load() {
    let model = reference_model();
    let (evaluation, _) = solve(&model, &StackInputs::reference());
    let commands = &evaluation.outputs.commands;

    // Anode loses hydrogen and water; cathode gains water on both counts
    assert!(commands.anode_reaction.mass_flow_kg_per_s < 0.0);
    assert!(commands.anode_moisture.mass_flow_kg_per_s < 0.0);
    assert!(commands.cathode_reaction.mass_flow_kg_per_s > 0.0);
    assert!(commands.cathode_moisture.mass_flow_kg_per_s > 0.0);

    // Enthalpy rides with the mass
    for command in [
        &commands.anode_reaction,
        &commands.anode_moisture,
        &commands.cathode_reaction,
        &commands.cathode_moisture,
    ] {
        assert_eq!(
            command.enthalpy_flow_W.signum(),
            command.mass_flow_kg_per_s.signum(),
            "enthalpy flow must carry the sign of its mass flow"
        );
    }
}

// ============================================================================
// Determinism Tests
// ============================================================================

#[test]
fn test_two_models_agree_bitwise() {
    let inputs = StackInputs::reference();
    let first_model = reference_model();
    let second_model = reference_model();
    let (first, first_stats) = solve(&first_model, &inputs);
    let (second, second_stats) = solve(&second_model, &inputs);

    assert_eq!(first_stats.iterations, second_stats.iterations);
    assert_eq!(first.residuals, second.residuals);
    assert_eq!(
        first.outputs.terminal_voltage_V,
        second.outputs.terminal_voltage_V
    );
    assert_eq!(first.outputs.heat_flow_W, second.outputs.heat_flow_W);
    assert_eq!(
        first.outputs.commands.cathode_reaction.mass_flow_kg_per_s,
        second.outputs.commands.cathode_reaction.mass_flow_kg_per_s
    );
}

// ============================================================================
// Degenerate Input Tests
// ============================================================================

#[test]
fn test_dry_anode_channel_hits_activity_floor() {
    let model = reference_model();
    let mut inputs = StackInputs::reference();
    inputs.anode_inflow = GasState::new(1.52e5, 353.15, 0.0, 0.96);
    inputs.anode_outflow = GasState::new(1.48e5, 353.15, 0.0, 0.94);

    let initial = model.initial_activities(&inputs);
    assert_eq!(
        initial.anode_catalyst_layer, ACTIVITY_FLOOR,
        "bone-dry channel must clamp to the activity floor, not zero"
    );

    // The floored activity keeps every residual term finite
    let residuals = model.residual(&inputs, &initial.as_array());
    assert!(residuals[0].is_finite());
    assert!(residuals[1].is_finite());
}
