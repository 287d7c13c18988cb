//! Averaged electrode conditions and species activities.
//!
//! The model sees each electrode channel through the arithmetic mean of its
//! inflow and outflow samples. Activities follow the ideal-mixture
//! definitions: reactant activity is partial pressure over standard
//! pressure; water activity is mole fraction times the ratio of channel
//! pressure to saturation pressure (i.e. relative humidity).

use crate::config::STANDARD_PRESSURE_PA;
use crate::properties::WaterPropertyPack;

use super::gas::GasState;

/// Activities below this threshold are clamped...
pub const ACTIVITY_FLOOR_THRESHOLD: f64 = 1e-9;
/// ...to this floor, keeping the Nernst logarithms finite. A numerical
/// guard, not a physical constraint; threshold and floor are part of the
/// component's bit-compatible behavior.
pub const ACTIVITY_FLOOR: f64 = 1e-6;

/// Clamp an activity away from the log-domain singularity.
pub fn clamp_activity(activity: f64) -> f64 {
    if activity < ACTIVITY_FLOOR_THRESHOLD {
        ACTIVITY_FLOOR
    } else {
        activity
    }
}

/// Averaged channel conditions on one electrode, with derived activities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ElectrodeState {
    /// Mean channel pressure (Pa)
    pub pressure_Pa: f64,
    /// Mean water-vapor mole fraction
    pub water_mole_fraction: f64,
    /// Mean reactant mole fraction (H2 or O2)
    pub reactant_mole_fraction: f64,
    /// Water activity (relative humidity), clamped
    pub water_activity: f64,
    /// Reactant activity (partial pressure / standard pressure), clamped
    pub reactant_activity: f64,
}

impl ElectrodeState {
    /// Average an inflow/outflow pair and derive activities at the stack
    /// temperature.
    ///
    /// The pressure ratio is evaluated as exp(ln p − ln p_sat) with the
    /// log-saturation-pressure table, keeping the lookup in the same
    /// logarithmic form the table stores.
    pub fn average(
        inflow: &GasState,
        outflow: &GasState,
        stack_temperature_K: f64,
        water: &WaterPropertyPack,
    ) -> Self {
        let pressure_Pa = 0.5 * (inflow.pressure_Pa + outflow.pressure_Pa);
        let water_mole_fraction = 0.5 * (inflow.water_mole_fraction + outflow.water_mole_fraction);
        let reactant_mole_fraction =
            0.5 * (inflow.reactant_mole_fraction + outflow.reactant_mole_fraction);

        let ln_saturation = water.ln_saturation_pressure.evaluate(stack_temperature_K);
        let pressure_ratio = (pressure_Pa.ln() - ln_saturation).exp();

        Self {
            pressure_Pa,
            water_mole_fraction,
            reactant_mole_fraction,
            water_activity: clamp_activity(water_mole_fraction * pressure_ratio),
            reactant_activity: clamp_activity(
                reactant_mole_fraction * pressure_Pa / STANDARD_PRESSURE_PA,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::properties::WaterPropertyPack;
    use approx::assert_relative_eq;

    fn sample_pair() -> (GasState, GasState) {
        (
            GasState::new(1.52e5, 353.15, 0.24, 0.72),
            GasState::new(1.48e5, 353.15, 0.26, 0.70),
        )
    }

    #[test]
    fn test_arithmetic_mean_of_inflow_outflow() {
        let (inflow, outflow) = sample_pair();
        let water = WaterPropertyPack::standard();
        let state = ElectrodeState::average(&inflow, &outflow, 353.15, &water);

        assert_relative_eq!(state.pressure_Pa, 1.50e5, epsilon = 1e-6);
        assert_relative_eq!(state.water_mole_fraction, 0.25, epsilon = 1e-12);
        assert_relative_eq!(state.reactant_mole_fraction, 0.71, epsilon = 1e-12);
    }

    #[test]
    fn test_water_activity_equals_relative_humidity() {
        let (inflow, outflow) = sample_pair();
        let water = WaterPropertyPack::standard();
        let state = ElectrodeState::average(&inflow, &outflow, 353.15, &water);

        let p_sat = water.saturation_pressure_Pa(353.15);
        let expected = 0.25 * 1.50e5 / p_sat;
        assert_relative_eq!(state.water_activity, expected, max_relative = 1e-9);
    }

    #[test]
    fn test_reactant_activity_uses_standard_pressure() {
        let (inflow, outflow) = sample_pair();
        let water = WaterPropertyPack::standard();
        let state = ElectrodeState::average(&inflow, &outflow, 353.15, &water);

        assert_relative_eq!(
            state.reactant_activity,
            0.71 * 1.50e5 / 101_325.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_activity_clamp_threshold_and_floor() {
        // Below the 1e-9 threshold: clamped to exactly 1e-6
        assert_eq!(clamp_activity(1e-10), 1e-6);
        assert_eq!(clamp_activity(0.0), 1e-6);
        assert_eq!(clamp_activity(-0.3), 1e-6);
        // Between threshold and floor: left untouched
        assert_eq!(clamp_activity(1e-8), 1e-8);
        // Ordinary values pass through
        assert_eq!(clamp_activity(0.75), 0.75);
    }

    #[test]
    fn test_dry_channel_activity_is_floored() {
        let inflow = GasState::new(1.5e5, 353.15, 0.0, 0.9);
        let outflow = GasState::new(1.5e5, 353.15, 0.0, 0.9);
        let water = WaterPropertyPack::standard();
        let state = ElectrodeState::average(&inflow, &outflow, 353.15, &water);
        assert_eq!(state.water_activity, ACTIVITY_FLOOR);
    }
}
