//! Piecewise-linear property tables.
//!
//! The flow domain publishes gas properties as temperature-indexed tables
//! (enthalpy, viscosity, saturation pressure). This component never hardcodes
//! those curves; it evaluates whatever tables it is handed, by linear
//! interpolation between breakpoints with a configurable out-of-range policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Out-of-range evaluation policy for a property table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extrapolation {
    /// Continue the first/last segment slope beyond the table ends
    Linear,
    /// Clamp to the first/last tabulated value
    Nearest,
}

/// Malformed table data.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("property table needs at least two breakpoints, got {0}")]
    TooShort(usize),
    #[error("breakpoint/value length mismatch ({breakpoints} breakpoints, {values} values)")]
    LengthMismatch { breakpoints: usize, values: usize },
    #[error("breakpoints must be strictly increasing (violated at index {0})")]
    NotIncreasing(usize),
}

/// Temperature-indexed property table, evaluated piecewise-linearly.
///
/// # Example
/// ```
/// use pemfc_stack::properties::{Extrapolation, PropertyTable};
///
/// let table = PropertyTable::new(
///     vec![300.0, 400.0],
///     vec![10.0, 30.0],
///     Extrapolation::Linear,
/// ).unwrap();
/// assert_eq!(table.evaluate(350.0), 20.0);
/// assert_eq!(table.evaluate(450.0), 40.0); // linear beyond the last breakpoint
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyTable {
    /// Abscissae (K), strictly increasing
    pub breakpoints_K: Vec<f64>,
    /// Ordinates, one per breakpoint
    pub values: Vec<f64>,
    /// Out-of-range policy
    pub extrapolation: Extrapolation,
}

impl PropertyTable {
    /// Build a table, checking shape invariants.
    pub fn new(
        breakpoints_K: Vec<f64>,
        values: Vec<f64>,
        extrapolation: Extrapolation,
    ) -> Result<Self, TableError> {
        let table = Self {
            breakpoints_K,
            values,
            extrapolation,
        };
        table.validate()?;
        Ok(table)
    }

    /// Check shape invariants (length, monotonic breakpoints).
    pub fn validate(&self) -> Result<(), TableError> {
        if self.breakpoints_K.len() < 2 {
            return Err(TableError::TooShort(self.breakpoints_K.len()));
        }
        if self.breakpoints_K.len() != self.values.len() {
            return Err(TableError::LengthMismatch {
                breakpoints: self.breakpoints_K.len(),
                values: self.values.len(),
            });
        }
        for i in 1..self.breakpoints_K.len() {
            if self.breakpoints_K[i] <= self.breakpoints_K[i - 1] {
                return Err(TableError::NotIncreasing(i));
            }
        }
        Ok(())
    }

    /// Evaluate the table at a temperature.
    ///
    /// Exact at breakpoints, linear between them, and governed by the
    /// extrapolation policy outside the tabulated range.
    pub fn evaluate(&self, temperature_K: f64) -> f64 {
        let n = self.breakpoints_K.len();

        if temperature_K <= self.breakpoints_K[0] {
            return match self.extrapolation {
                Extrapolation::Nearest => self.values[0],
                Extrapolation::Linear => self.segment_value(0, temperature_K),
            };
        }
        if temperature_K >= self.breakpoints_K[n - 1] {
            return match self.extrapolation {
                Extrapolation::Nearest => self.values[n - 1],
                Extrapolation::Linear => self.segment_value(n - 2, temperature_K),
            };
        }

        let mut segment = 0;
        for i in 0..n - 1 {
            if temperature_K < self.breakpoints_K[i + 1] {
                segment = i;
                break;
            }
        }
        self.segment_value(segment, temperature_K)
    }

    fn segment_value(&self, segment: usize, temperature_K: f64) -> f64 {
        let t0 = self.breakpoints_K[segment];
        let t1 = self.breakpoints_K[segment + 1];
        let v0 = self.values[segment];
        let v1 = self.values[segment + 1];
        v0 + (v1 - v0) * (temperature_K - t0) / (t1 - t0)
    }
}
