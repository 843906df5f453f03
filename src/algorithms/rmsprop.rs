//! RMSProp-style adaptive minimization of the Rayleigh quotient.
//!
//! The raw gradient `A·x − ρ·x` is rescaled per coordinate by the square root
//! of an exponential moving average of its squared entries,
//!
//! g2 ← β·g2 + (1−β)·grad²,  direction = grad / √g2,
//!
//! and the rescaled direction is handed to the same backtracking line search
//! used by the conjugate-gradient solver. Termination follows the same
//! contract: the line-search floor is the terminal state.

use faer::{Mat, MatRef};

use super::line_search::{LineSearchOutcome, backtracking_line_search};
use super::{RunResult, check_dimensions, dot, normalize_in_place};
use crate::error::SolverError;
use crate::operator::LinearOperator;

/// Default starting step for the backtracking line search.
pub const DEFAULT_ALPHA_START: f64 = 1.0;
/// Default tolerance floor for the line search.
pub const DEFAULT_TOL: f64 = 1e-7;
/// Default decay of the squared-gradient moving average.
pub const DEFAULT_BETA: f64 = 0.1;

/// Minimizes the Rayleigh quotient with per-coordinate gradient-magnitude
/// normalization, converging to the smallest eigenvalue of a symmetric
/// operator.
pub struct RmsProp<'a, O: LinearOperator + ?Sized> {
    operator: &'a O,
    /// Current unit-norm iterate.
    x: Mat<f64>,
    /// Cached Rayleigh quotient of `x`.
    rho: f64,
    /// Exponential moving average of the squared gradient entries.
    g2: Mat<f64>,
    alpha_start: f64,
    tol: f64,
    beta: f64,
    /// Scratch buffers sized once at construction.
    x_new: Mat<f64>,
    grad: Mat<f64>,
    direction: Mat<f64>,
}

impl<'a, O: LinearOperator + ?Sized> RmsProp<'a, O> {
    /// Creates a solver with the default parameters ([`DEFAULT_ALPHA_START`],
    /// [`DEFAULT_TOL`], [`DEFAULT_BETA`]).
    pub fn new(operator: &'a O, x0: MatRef<'_, f64>) -> Result<Self, SolverError> {
        Self::with_options(operator, x0, DEFAULT_ALPHA_START, DEFAULT_TOL, DEFAULT_BETA)
    }

    /// Creates a solver with explicit parameters.
    ///
    /// # Arguments
    /// * `operator`: The symmetric operator `A`.
    /// * `x0`: Starting vector; copied and normalized.
    /// * `alpha_start`: Initial trial step of every line search.
    /// * `tol`: Line-search floor.
    /// * `beta`: Decay of the squared-gradient moving average in `[0, 1)`.
    pub fn with_options(
        operator: &'a O,
        x0: MatRef<'_, f64>,
        alpha_start: f64,
        tol: f64,
        beta: f64,
    ) -> Result<Self, SolverError> {
        check_dimensions(operator, x0)?;

        let mut x = x0.to_owned();
        normalize_in_place(&mut x);

        let ax = operator.apply(x.as_ref());
        let rho = dot(x.as_ref(), ax.as_ref());

        let n = x.nrows();
        Ok(Self {
            operator,
            x_new: x.clone(),
            x,
            rho,
            g2: Mat::zeros(n, 1),
            alpha_start,
            tol,
            beta,
            grad: Mat::zeros(n, 1),
            direction: Mat::zeros(n, 1),
        })
    }

    /// The current Rayleigh quotient (smallest-eigenvalue estimate).
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// A view of the current unit-norm iterate.
    pub fn x(&self) -> MatRef<'_, f64> {
        self.x.as_ref()
    }

    /// Runs up to `num_iters` iterations.
    ///
    /// Stops at the line-search floor ([`RunResult::Converged`], no improving
    /// step above the tolerance exists) or when the budget runs out
    /// ([`RunResult::Exhausted`]).
    pub fn run(&mut self, num_iters: usize) -> RunResult {
        let n = self.x.nrows();

        for iter in 0..num_iters {
            let ax = self.operator.apply(self.x.as_ref());
            for i in 0..n {
                self.grad[(i, 0)] = ax[(i, 0)] - self.rho * self.x[(i, 0)];
            }

            for i in 0..n {
                let g = self.grad[(i, 0)];
                self.g2[(i, 0)] = self.beta * self.g2[(i, 0)] + (1.0 - self.beta) * g * g;
                self.direction[(i, 0)] = g / self.g2[(i, 0)].sqrt();
            }

            match backtracking_line_search(
                self.operator,
                &mut self.x,
                &mut self.x_new,
                self.rho,
                self.direction.as_ref(),
                self.alpha_start,
                self.tol,
            ) {
                LineSearchOutcome::Accepted { rho } => self.rho = rho,
                LineSearchOutcome::Floor => {
                    return RunResult::Converged {
                        rho: self.rho,
                        x: self.x.clone(),
                        iterations: iter + 1,
                    };
                }
            }
        }

        RunResult::Exhausted {
            rho: self.rho,
            x: self.x.clone(),
            iterations: num_iters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_two_by_two_min_eigenpair() {
        let a = mat![[2.0, 0.0], [0.0, 1.0]];
        let x0 = mat![[1.0], [1.0]];

        let mut solver = RmsProp::new(&a, x0.as_ref()).unwrap();
        let result = solver.run(500);

        assert!((result.rho() - 1.0).abs() < 1e-4);
        assert!((result.x().norm_l2() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_quotient_monotone_over_accepted_steps() {
        let a = mat![[3.0, 1.0], [1.0, 2.0]];
        let x0 = mat![[1.0], [-2.0]];

        let mut solver = RmsProp::new(&a, x0.as_ref()).unwrap();
        let mut last = solver.rho();
        for _ in 0..50 {
            let result = solver.run(1);
            assert!(result.rho() <= last + 1e-12);
            last = result.rho();
            if result.converged() {
                break;
            }
        }
    }

    #[test]
    fn test_rejects_mismatched_starting_vector() {
        let a = mat![[2.0, 0.0], [0.0, 1.0]];
        let x0 = mat![[1.0], [1.0], [1.0]];
        assert!(RmsProp::new(&a, x0.as_ref()).is_err());
    }
}
