//! PEM fuel-cell stack - steady-state electrochemical stack model
//!
//! This library evaluates the coupled voltage, water-transport, and energy
//! balance of a proton-exchange-membrane fuel-cell stack as a pure algebraic
//! residual function, ready to plug into an external nonlinear or
//! differential-algebraic solver.

// Allow non-snake-case for unit suffixes in field names (Pa, K, V, S_per_m).
// This follows the project convention of including units in names.
#![allow(non_snake_case)]

pub mod config;
pub mod electrochemistry;
pub mod energy;
pub mod membrane;
pub mod properties;
pub mod solver;
pub mod stack;
pub mod state;

pub use config::{
    CellStackParameters, ConfigurationError, DerivedConstants, FARADAY_C_PER_MOL,
    GAS_CONSTANT_J_PER_MOL_K, STANDARD_PRESSURE_PA, STANDARD_TEMPERATURE_K,
};
pub use electrochemistry::VoltageBreakdown;
pub use energy::{ChannelCommands, EnergyBalance, MassSourceCommand, SpeciesRates};
pub use membrane::{membrane_conductivity_S_per_m, water_content, MembraneFluxes};
pub use properties::{GasPropertyPack, PropertyTable, StackProperties, WaterPropertyPack};
pub use solver::{NewtonSolver, SolverError, SolverStats};
pub use stack::{Evaluation, StackDiagnostics, StackModel, StackOutputs, UnknownActivities};
pub use state::{ElectrodeState, GasState, StackInputs};
