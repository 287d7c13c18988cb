//! Damped Newton-Raphson for the two-unknown flux-continuity system.
//!
//! The stack model is a residual function; this reference solver closes the
//! loop for tests and the diagnostic binary. A host integrating the model
//! into a larger differential-algebraic system would use its own corrector
//! instead and own convergence reporting, exactly as it owns the two
//! catalyst-layer activities between evaluations.

use thiserror::Error;

/// Failure modes of the reference solver.
#[derive(Debug, Error)]
pub enum SolverError {
    /// The finite-difference Jacobian lost rank
    #[error("singular Jacobian at iteration {iteration} (determinant {determinant:.3e})")]
    SingularJacobian { iteration: usize, determinant: f64 },
    /// The residual norm grew without bound
    #[error("diverged at iteration {iteration} (residual norm {residual_norm:.3e})")]
    Diverged { iteration: usize, residual_norm: f64 },
    /// Ran out of iterations before meeting the tolerance
    #[error("no convergence after {max_iterations} iterations (residual norm {residual_norm:.3e})")]
    NonConvergence {
        max_iterations: usize,
        residual_norm: f64,
    },
}

/// Counters from one solve.
#[derive(Debug, Clone, Copy)]
pub struct SolverStats {
    /// Newton iterations performed
    pub iterations: usize,
    /// Residual evaluations, including Jacobian perturbations
    pub function_evals: usize,
    /// Jacobian assemblies
    pub jacobian_evals: usize,
    /// Residual norm at the accepted solution
    pub residual_norm: f64,
}

/// Newton-Raphson with optional damping and a forward-difference Jacobian,
/// specialized to the 2x2 system so the linear solve is a direct Cramer
/// elimination.
pub struct NewtonSolver {
    /// Convergence criterion on the residual L2 norm
    pub tolerance: f64,
    /// Maximum Newton iterations
    pub max_iterations: usize,
    /// Step damping factor (1.0 = full Newton step)
    pub damping: f64,
    /// Relative finite-difference step for the Jacobian
    pub fd_step: f64,
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 50,
            damping: 1.0,
            fd_step: 1e-8,
        }
    }
}

impl NewtonSolver {
    pub fn new(tolerance: f64, max_iterations: usize) -> Self {
        Self {
            tolerance,
            max_iterations,
            ..Self::default()
        }
    }

    /// Damped variant for poorly conditioned starting points.
    pub fn with_damping(tolerance: f64, max_iterations: usize, damping: f64) -> Self {
        Self {
            tolerance,
            max_iterations,
            damping,
            ..Self::default()
        }
    }

    /// Solve `residual_fn(x) = 0` starting from `initial`.
    ///
    /// Returns the solution together with iteration statistics. The residual
    /// function must be deterministic; the forward-difference Jacobian
    /// reuses the unperturbed evaluation for both columns.
    pub fn solve<F>(
        &self,
        residual_fn: F,
        initial: [f64; 2],
    ) -> Result<([f64; 2], SolverStats), SolverError>
    where
        F: Fn(&[f64; 2]) -> [f64; 2],
    {
        let mut x = initial;
        let mut function_evals = 0;
        let mut jacobian_evals = 0;

        for iteration in 0..self.max_iterations {
            let residual = residual_fn(&x);
            function_evals += 1;

            let residual_norm = norm(&residual);
            if residual_norm < self.tolerance {
                return Ok((
                    x,
                    SolverStats {
                        iterations: iteration,
                        function_evals,
                        jacobian_evals,
                        residual_norm,
                    },
                ));
            }
            if iteration > 10 && residual_norm > 1e10 {
                return Err(SolverError::Diverged {
                    iteration,
                    residual_norm,
                });
            }

            // Forward differences, one column per unknown, step scaled to
            // the magnitude of the unknown
            let mut jacobian = [[0.0_f64; 2]; 2];
            for column in 0..2 {
                let step = self.fd_step * x[column].abs().max(1.0);
                let mut perturbed = x;
                perturbed[column] += step;
                let shifted = residual_fn(&perturbed);
                function_evals += 1;
                for row in 0..2 {
                    jacobian[row][column] = (shifted[row] - residual[row]) / step;
                }
            }
            jacobian_evals += 1;

            // Cramer elimination of J dx = -r
            let determinant =
                jacobian[0][0] * jacobian[1][1] - jacobian[0][1] * jacobian[1][0];
            let scale = jacobian[0][0]
                .abs()
                .max(jacobian[0][1].abs())
                .max(jacobian[1][0].abs())
                .max(jacobian[1][1].abs());
            if !determinant.is_finite() || determinant.abs() <= f64::EPSILON * scale * scale {
                return Err(SolverError::SingularJacobian {
                    iteration,
                    determinant,
                });
            }
            let dx0 = (residual[1] * jacobian[0][1] - residual[0] * jacobian[1][1]) / determinant;
            let dx1 = (residual[0] * jacobian[1][0] - residual[1] * jacobian[0][0]) / determinant;

            x[0] += self.damping * dx0;
            x[1] += self.damping * dx1;
        }

        let residual_norm = norm(&residual_fn(&x));
        Err(SolverError::NonConvergence {
            max_iterations: self.max_iterations,
            residual_norm,
        })
    }
}

fn norm(residual: &[f64; 2]) -> f64 {
    (residual[0] * residual[0] + residual[1] * residual[1]).sqrt()
}
