//! Cell voltage: Nernst potential less the three loss terms.
//!
//! The breakdown follows the standard polarization-curve decomposition:
//! thermodynamic potential corrected for activities (Nernst), activation
//! loss at the cathode (Tafel), ohmic loss across the membrane, and
//! concentration loss near the limiting current.
//!
//! References:
//! - O'Hayre et al., Fuel Cell Fundamentals, 3rd ed., ch. 3-5
//! - Barbir, PEM Fuel Cells, 2nd ed., ch. 3

use crate::config::{
    CellStackParameters, DerivedConstants, ELECTRONS_PER_H2, FARADAY_C_PER_MOL,
    GAS_CONSTANT_J_PER_MOL_K,
};
use crate::state::ElectrodeState;

/// Fraction of the limiting current density at which the concentration loss
/// switches from logarithmic to linear extrapolation
pub const CONCENTRATION_ANCHOR_FRACTION: f64 = 0.999;

/// Cell current density during discharge (A/m²).
///
/// The branch current is negative when the stack discharges; charging
/// currents are not physical for a fuel cell and are treated as zero load.
pub fn discharge_current_density(branch_current_A: f64, cell_area_m2: f64) -> f64 {
    if branch_current_A <= 0.0 {
        -branch_current_A / cell_area_m2
    } else {
        0.0
    }
}

/// Nernst (open-circuit) potential corrected for reactant and product
/// activities (V).
///
/// Product water is taken at the cathode, where it forms.
pub fn nernst_voltage(
    standard_potential_V: f64,
    temperature_K: f64,
    hydrogen_activity: f64,
    oxygen_activity: f64,
    water_activity: f64,
) -> f64 {
    let thermal_V =
        GAS_CONSTANT_J_PER_MOL_K * temperature_K / (ELECTRONS_PER_H2 * FARADAY_C_PER_MOL);
    standard_potential_V
        + thermal_V * (hydrogen_activity * oxygen_activity.sqrt() / water_activity).ln()
}

/// Activation overpotential from the Tafel law (V).
///
/// Zero below the exchange current density; the Tafel branch starts exactly
/// at i = i0 where its logarithm vanishes, so the two branches join
/// continuously.
pub fn activation_overpotential(
    current_density_A_per_m2: f64,
    exchange_current_density_A_per_m2: f64,
    charge_transfer_coefficient: f64,
    temperature_K: f64,
) -> f64 {
    if current_density_A_per_m2 < exchange_current_density_A_per_m2 {
        0.0
    } else {
        let tafel_slope_V = GAS_CONSTANT_J_PER_MOL_K * temperature_K
            / (ELECTRONS_PER_H2 * charge_transfer_coefficient * FARADAY_C_PER_MOL);
        tafel_slope_V * (current_density_A_per_m2 / exchange_current_density_A_per_m2).ln()
    }
}

/// Ohmic overpotential across the membrane (V), i · t / σ.
pub fn ohmic_overpotential(
    current_density_A_per_m2: f64,
    membrane_conductivity_S_per_m: f64,
    membrane_thickness_m: f64,
) -> f64 {
    current_density_A_per_m2 * membrane_thickness_m / membrane_conductivity_S_per_m
}

/// Concentration (mass-transport) overpotential (V).
///
/// Logarithmic up to 99.9 % of the limiting current density; beyond the
/// anchor the curve continues linearly with the analytic slope at the
/// anchor, so value and first derivative are both continuous and the
/// function stays finite past i = iL.
pub fn concentration_overpotential(
    current_density_A_per_m2: f64,
    limiting_current_density_A_per_m2: f64,
    temperature_K: f64,
) -> f64 {
    let prefactor_V =
        GAS_CONSTANT_J_PER_MOL_K * temperature_K / (ELECTRONS_PER_H2 * FARADAY_C_PER_MOL);
    let anchor = CONCENTRATION_ANCHOR_FRACTION * limiting_current_density_A_per_m2;

    if current_density_A_per_m2 <= anchor {
        prefactor_V
            * (limiting_current_density_A_per_m2
                / (limiting_current_density_A_per_m2 - current_density_A_per_m2))
                .ln()
    } else {
        let margin = limiting_current_density_A_per_m2 - anchor;
        let value_at_anchor = prefactor_V * (limiting_current_density_A_per_m2 / margin).ln();
        let slope_at_anchor = prefactor_V / margin;
        value_at_anchor + slope_at_anchor * (current_density_A_per_m2 - anchor)
    }
}

/// The polarization-curve decomposition at one operating point.
#[derive(Debug, Clone, Copy)]
pub struct VoltageBreakdown {
    /// Activity-corrected open-circuit potential (V)
    pub nernst_V: f64,
    /// Activation (Tafel) loss (V)
    pub activation_V: f64,
    /// Ohmic membrane loss (V)
    pub ohmic_V: f64,
    /// Mass-transport loss (V)
    pub concentration_V: f64,
}

impl VoltageBreakdown {
    /// Evaluate all four terms from the averaged channel states and the
    /// membrane conductivity at this hydration.
    pub fn compute(
        current_density_A_per_m2: f64,
        membrane_conductivity_S_per_m: f64,
        anode: &ElectrodeState,
        cathode: &ElectrodeState,
        stack_temperature_K: f64,
        parameters: &CellStackParameters,
        constants: &DerivedConstants,
    ) -> Self {
        Self {
            nernst_V: nernst_voltage(
                constants.standard_potential_V,
                stack_temperature_K,
                anode.reactant_activity,
                cathode.reactant_activity,
                cathode.water_activity,
            ),
            activation_V: activation_overpotential(
                current_density_A_per_m2,
                parameters.kinetics.exchange_current_density_A_per_m2,
                parameters.kinetics.charge_transfer_coefficient,
                stack_temperature_K,
            ),
            ohmic_V: ohmic_overpotential(
                current_density_A_per_m2,
                membrane_conductivity_S_per_m,
                parameters.geometry.membrane_thickness_m,
            ),
            concentration_V: concentration_overpotential(
                current_density_A_per_m2,
                parameters.kinetics.limiting_current_density_A_per_m2,
                stack_temperature_K,
            ),
        }
    }

    /// Terminal voltage of a single cell (V)
    pub fn cell_voltage_V(&self) -> f64 {
        self.nernst_V - self.activation_V - self.ohmic_V - self.concentration_V
    }
}
