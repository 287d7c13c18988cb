//! State extraction: raw port samples into averaged electrode conditions.
//!
//! Inputs arrive from the host network as four flow-state vectors (anode and
//! cathode, inflow and outflow), a branch current, and the stack temperature
//! from the thermal port. Everything here is read-only to the model and
//! recomputed each evaluation.

mod electrode;
mod gas;

pub use electrode::{clamp_activity, ElectrodeState, ACTIVITY_FLOOR, ACTIVITY_FLOOR_THRESHOLD};
pub use gas::{GasState, RAW_STATE_LEN};

use serde::{Deserialize, Serialize};

/// Complete input set for one residual evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StackInputs {
    /// Anode channel inflow sample
    pub anode_inflow: GasState,
    /// Anode channel outflow sample
    pub anode_outflow: GasState,
    /// Cathode channel inflow sample
    pub cathode_inflow: GasState,
    /// Cathode channel outflow sample
    pub cathode_outflow: GasState,
    /// Branch current at the electrical terminals (A); discharge is
    /// negative per the branch orientation
    pub branch_current_A: f64,
    /// Stack temperature from the thermal port (K)
    pub stack_temperature_K: f64,
}

impl StackInputs {
    /// Reference operating point: stack at 80 °C drawing 0.5 A/cm² at the
    /// default geometry, humidified hydrogen anode and humidified air
    /// cathode at ~1.5 bar.
    pub fn reference() -> Self {
        Self {
            anode_inflow: GasState::new(1.52e5, 353.15, 0.24, 0.72),
            anode_outflow: GasState::new(1.48e5, 353.15, 0.26, 0.70),
            cathode_inflow: GasState::new(1.47e5, 353.15, 0.19, 0.16),
            cathode_outflow: GasState::new(1.43e5, 353.15, 0.21, 0.14),
            branch_current_A: -118.5,
            stack_temperature_K: 353.15,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_point_is_discharging() {
        let inputs = StackInputs::reference();
        assert!(inputs.branch_current_A < 0.0);
        assert_eq!(inputs.stack_temperature_K, 353.15);
    }
}
