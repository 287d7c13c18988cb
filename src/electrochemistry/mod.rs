//! Electrode kinetics and the cell voltage decomposition.

pub mod voltage;

pub use voltage::{
    activation_overpotential, concentration_overpotential, discharge_current_density,
    nernst_voltage, ohmic_overpotential, VoltageBreakdown, CONCENTRATION_ANCHOR_FRACTION,
};
