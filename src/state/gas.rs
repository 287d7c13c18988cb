//! Raw gas-port samples.

use serde::{Deserialize, Serialize};

/// Number of elements in a host flow-domain physical-state vector
pub const RAW_STATE_LEN: usize = 8;

/// Gas conditions sampled at one flow port (inflow or outflow of one
/// electrode channel). Supplied fresh by the host network every evaluation;
/// read-only to the model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasState {
    /// Channel pressure (Pa)
    pub pressure_Pa: f64,
    /// Port gas temperature (K). Carried for interface completeness; the
    /// model evaluates all properties at the stack temperature from the
    /// thermal port.
    pub temperature_K: f64,
    /// Water-vapor mole fraction
    pub water_mole_fraction: f64,
    /// Reactant mole fraction: hydrogen on the anode, oxygen on the cathode
    pub reactant_mole_fraction: f64,
}

impl GasState {
    /// Parse a host physical-state vector
    /// [p, T, humidity measure, five species fractions...].
    ///
    /// Only elements 1 (pressure) and 5/8 (water and reactant mole
    /// fractions, 1-based) are consumed by the model; the temperature in
    /// element 2 is carried through unused.
    pub fn from_raw(raw: &[f64; RAW_STATE_LEN]) -> Self {
        Self {
            pressure_Pa: raw[0],
            temperature_K: raw[1],
            water_mole_fraction: raw[4],
            reactant_mole_fraction: raw[7],
        }
    }

    pub fn new(
        pressure_Pa: f64,
        temperature_K: f64,
        water_mole_fraction: f64,
        reactant_mole_fraction: f64,
    ) -> Self {
        Self {
            pressure_Pa,
            temperature_K,
            water_mole_fraction,
            reactant_mole_fraction,
        }
    }
}
