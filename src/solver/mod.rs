//! Reference nonlinear solver for closing the residual system.

pub mod newton;

pub use newton::{NewtonSolver, SolverError, SolverStats};
