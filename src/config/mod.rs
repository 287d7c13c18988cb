//! Configuration module: stack parameters, validation, derived constants.
//!
//! All physical parameters include citations to their source publications.

mod constants;
mod parameters;

pub use constants::{
    DerivedConstants, ELECTRONS_PER_H2, FARADAY_C_PER_MOL, GAS_CONSTANT_J_PER_MOL_K,
    GIBBS_WATER_FORMATION_J_PER_MOL, HYDROGEN_HHV_J_PER_KG, MEMBRANE_DARCY_PERMEABILITY_M2,
    STANDARD_PRESSURE_PA, STANDARD_TEMPERATURE_K,
};
pub use parameters::{
    CellStackParameters, ConfigurationError, KineticParameters, MembraneMaterial, StackGeometry,
    TransportParameters,
};
