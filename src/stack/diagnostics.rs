//! Formatted snapshots of one solved operating point.

use crate::membrane::WATER_CONTENT_AT_SATURATION;
use crate::solver::SolverStats;
use crate::state::StackInputs;

use super::model::Evaluation;

/// Flattened view of a solved operating point for reporting.
#[derive(Debug, Clone)]
pub struct StackDiagnostics {
    pub branch_current_A: f64,
    pub current_density_A_per_cm2: f64,
    pub stack_temperature_K: f64,
    pub cell_voltage_V: f64,
    pub terminal_voltage_V: f64,
    pub nernst_V: f64,
    pub activation_V: f64,
    pub ohmic_V: f64,
    pub concentration_V: f64,
    pub water_content_anode: f64,
    pub water_content_cathode: f64,
    pub membrane_conductivity_S_per_m: f64,
    pub membrane_flux_mol_per_m2_s: f64,
    pub net_power_kW: f64,
    pub electrical_power_kW: f64,
    pub dissipated_power_kW: f64,
    pub efficiency: f64,
    pub solver_iterations: usize,
    pub residual_norm: f64,
}

impl StackDiagnostics {
    pub fn from_evaluation(
        inputs: &StackInputs,
        evaluation: &Evaluation,
        stats: &SolverStats,
    ) -> Self {
        let derived = &evaluation.derived;
        Self {
            branch_current_A: inputs.branch_current_A,
            current_density_A_per_cm2: derived.current_density_A_per_m2 / 1e4,
            stack_temperature_K: inputs.stack_temperature_K,
            cell_voltage_V: derived.voltage.cell_voltage_V(),
            terminal_voltage_V: evaluation.outputs.terminal_voltage_V,
            nernst_V: derived.voltage.nernst_V,
            activation_V: derived.voltage.activation_V,
            ohmic_V: derived.voltage.ohmic_V,
            concentration_V: derived.voltage.concentration_V,
            water_content_anode: derived.water_content_anode,
            water_content_cathode: derived.water_content_cathode,
            membrane_conductivity_S_per_m: derived.membrane_conductivity_S_per_m,
            membrane_flux_mol_per_m2_s: derived.fluxes.total_mol_per_m2_s(),
            net_power_kW: derived.energy.net_power_W / 1e3,
            electrical_power_kW: derived.energy.electrical_power_W / 1e3,
            dissipated_power_kW: derived.energy.dissipated_power_W / 1e3,
            efficiency: derived.energy.efficiency(),
            solver_iterations: stats.iterations,
            residual_norm: stats.residual_norm,
        }
    }

    fn hydration_status(&self) -> &'static str {
        let min_content = self.water_content_anode.min(self.water_content_cathode);
        let max_content = self.water_content_anode.max(self.water_content_cathode);
        if min_content < 2.0 {
            "dehydrated"
        } else if max_content > WATER_CONTENT_AT_SATURATION {
            "saturated"
        } else {
            "nominal"
        }
    }

    /// Sanity checks on the solved point; empty when everything looks
    /// physical.
    pub fn warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.residual_norm > 1e-8 {
            warnings.push(format!(
                "flux residuals not fully converged (norm {:.2e})",
                self.residual_norm
            ));
        }
        if self.current_density_A_per_cm2 > 0.0 {
            if self.cell_voltage_V < 0.4 {
                warnings.push(format!(
                    "cell voltage {:.3} V - operating near the limiting current",
                    self.cell_voltage_V
                ));
            }
            if !(0.0..1.0).contains(&self.efficiency) {
                warnings.push(format!(
                    "efficiency {:.3} outside (0, 1) - energy balance inconsistent",
                    self.efficiency
                ));
            }
            if self.dissipated_power_kW < 0.0 {
                warnings.push(format!(
                    "negative waste heat ({:.2} kW) under load",
                    self.dissipated_power_kW
                ));
            }
        }
        if self.cell_voltage_V > 1.25 {
            warnings.push(format!(
                "cell voltage {:.3} V above the thermodynamic range",
                self.cell_voltage_V
            ));
        }
        match self.hydration_status() {
            "dehydrated" => warnings.push(format!(
                "membrane dehydrated (λ = {:.2}/{:.2}) - conductivity collapsing",
                self.water_content_anode, self.water_content_cathode
            )),
            "saturated" => warnings.push(format!(
                "membrane supersaturated (λ = {:.2}/{:.2}) - flooding likely",
                self.water_content_anode, self.water_content_cathode
            )),
            _ => {}
        }

        warnings
    }

    /// Print a formatted summary.
    pub fn print_summary(&self) {
        println!(
            "=== Stack Operating Point (I = {:.1} A, T = {:.2} K) ===",
            -self.branch_current_A, self.stack_temperature_K
        );
        println!();
        println!("Voltage:");
        println!("  Current density:     {:.3} A/cm²", self.current_density_A_per_cm2);
        println!("  Nernst potential:    {:.4} V", self.nernst_V);
        println!("  Activation loss:     {:.4} V", self.activation_V);
        println!("  Ohmic loss:          {:.4} V", self.ohmic_V);
        println!("  Concentration loss:  {:.4} V", self.concentration_V);
        println!("  Cell voltage:        {:.4} V", self.cell_voltage_V);
        println!("  Terminal voltage:    {:.2} V", self.terminal_voltage_V);
        println!();
        println!("Membrane:");
        println!(
            "  Water content:       {:.2} (anode) / {:.2} (cathode) [{}]",
            self.water_content_anode,
            self.water_content_cathode,
            self.hydration_status()
        );
        println!("  Conductivity:        {:.3} S/m", self.membrane_conductivity_S_per_m);
        println!("  Net water flux:      {:.4e} mol/(m²·s)", self.membrane_flux_mol_per_m2_s);
        println!();
        println!("Power:");
        println!("  Net chemical:        {:.2} kW", self.net_power_kW);
        println!("  Electrical:          {:.2} kW", self.electrical_power_kW);
        println!("  Dissipated heat:     {:.2} kW", self.dissipated_power_kW);
        println!("  Efficiency:          {:.1}%", self.efficiency * 100.0);
        println!();
        println!(
            "Solver: {} iterations, residual norm {:.2e}",
            self.solver_iterations, self.residual_norm
        );
    }

    /// Print a one-line header for polarization sweeps.
    pub fn print_row_header() {
        println!(
            "{:>8} {:>9} {:>8} {:>9} {:>9} {:>7} {:>6} {:>6} {:>6}",
            "I(A)", "i(A/cm²)", "Vcell", "Vstack", "Pel(kW)", "Eff(%)", "λ_an", "λ_cat", "Iters"
        );
        println!("{}", "-".repeat(76));
    }

    /// Print a one-line row.
    pub fn print_row(&self) {
        println!(
            "{:8.1} {:9.3} {:8.4} {:9.2} {:9.2} {:7.1} {:6.2} {:6.2} {:6}",
            -self.branch_current_A,
            self.current_density_A_per_cm2,
            self.cell_voltage_V,
            self.terminal_voltage_V,
            self.electrical_power_kW,
            self.efficiency * 100.0,
            self.water_content_anode,
            self.water_content_cathode,
            self.solver_iterations
        );
    }
}
