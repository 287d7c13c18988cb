//! Stack-level assembly: the residual function and its reporting.

pub mod diagnostics;
pub mod model;

pub use diagnostics::StackDiagnostics;
pub use model::{DerivedQuantities, Evaluation, StackModel, StackOutputs, UnknownActivities};
