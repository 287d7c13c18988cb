//! Membrane hydration state: water content, conductivity, drag.
//!
//! Empirical correlations for perfluorosulfonic acid membranes, all taken at
//! a 30 °C reference and shifted to the stack temperature by Arrhenius
//! factors.
//!
//! References:
//! - Water content and conductivity: Springer et al., J Electrochem Soc 1991
//! - Electro-osmotic drag: Zawodzinski et al., J Electrochem Soc 1993
//! - Diffusivity temperature shift: Motupally et al., J Electrochem Soc 2000

use crate::config::GAS_CONSTANT_J_PER_MOL_K;

/// Reference temperature of the 30 °C correlations (K)
pub const HYDRATION_REFERENCE_TEMPERATURE_K: f64 = 303.15;

/// Arrhenius activation temperature for protonic conductivity (K)
pub const CONDUCTIVITY_ACTIVATION_K: f64 = 1268.0;

/// Arrhenius activation temperature for membrane water diffusion (K)
pub const DIFFUSIVITY_ACTIVATION_K: f64 = 2416.0;

/// Water content at unit activity, the anchor of the supersaturated branch
pub const WATER_CONTENT_AT_SATURATION: f64 = 0.043 + 17.81 - 39.85 + 36.0;

/// Slope of the supersaturated branch (water molecules per acid site per
/// unit activity above 1)
pub const SUPERSATURATED_SLOPE: f64 = 1.4;

/// Membrane water content λ (H2O per sulfonic acid site) as a function of
/// water activity.
///
/// Three guarded regimes: linear extension below zero activity, the cubic
/// sorption fit on [0, 1], and a linear branch above saturation anchored at
/// λ(1) = 14.003. Continuous at both joints.
///
/// # Example
/// ```
/// use pemfc_stack::membrane::water_content;
///
/// let dry = water_content(0.0);
/// assert!((dry - 0.043).abs() < 1e-12);
/// let saturated = water_content(1.0);
/// assert!((saturated - 14.003).abs() < 1e-9);
/// ```
pub fn water_content(activity: f64) -> f64 {
    if activity < 0.0 {
        0.043 + 17.81 * activity
    } else if activity <= 1.0 {
        0.043 + 17.81 * activity - 39.85 * activity * activity
            + 36.0 * activity * activity * activity
    } else {
        WATER_CONTENT_AT_SATURATION + SUPERSATURATED_SLOPE * (activity - 1.0)
    }
}

/// Protonic conductivity at the 30 °C reference (S/cm).
///
/// Two linear regimes joined continuously at λ = 1: the Springer fit above,
/// and a line through the origin below (a dry membrane conducts nothing).
pub fn reference_conductivity_S_per_cm(water_content: f64) -> f64 {
    if water_content >= 1.0 {
        0.005139 * water_content - 0.00326
    } else {
        0.001879 * water_content
    }
}

/// Protonic conductivity at the stack temperature (S/m).
pub fn membrane_conductivity_S_per_m(water_content: f64, temperature_K: f64) -> f64 {
    let sigma_ref_S_per_cm = reference_conductivity_S_per_cm(water_content);
    let shift = (CONDUCTIVITY_ACTIVATION_K
        * (1.0 / HYDRATION_REFERENCE_TEMPERATURE_K - 1.0 / temperature_K))
        .exp();
    // S/cm → S/m
    100.0 * sigma_ref_S_per_cm * shift
}

/// Membrane water diffusivity at the stack temperature (m²/s), from the
/// 30 °C reference value in the parameter set.
pub fn water_diffusivity_m2_per_s(reference_diffusivity_m2_per_s: f64, temperature_K: f64) -> f64 {
    let shift = (DIFFUSIVITY_ACTIVATION_K
        * (1.0 / HYDRATION_REFERENCE_TEMPERATURE_K - 1.0 / temperature_K))
        .exp();
    reference_diffusivity_m2_per_s * shift
}

/// Electro-osmotic drag coefficient (water molecules per proton) as a
/// function of the anode-side water content.
///
/// Quadratic-plus-linear for λ ≥ 0; the λ < 0 branch keeps only the linear
/// term. Negative water content never occurs physically, but the branch is
/// defined so the function is total over the solver's search space.
pub fn drag_coefficient(water_content: f64) -> f64 {
    if water_content >= 0.0 {
        0.0029 * water_content * water_content + 0.05 * water_content
    } else {
        0.05 * water_content
    }
}

/// Molar concentration of saturated water vapor, p_sat/(R·T) (mol/m³).
/// Scale factor between activity differences and GDL concentration
/// gradients.
pub fn saturation_concentration_mol_per_m3(
    saturation_pressure_Pa: f64,
    temperature_K: f64,
) -> f64 {
    saturation_pressure_Pa / (GAS_CONSTANT_J_PER_MOL_K * temperature_K)
}
