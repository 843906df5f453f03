//! Nesterov-accelerated projected gradient for one extreme eigenvalue.
//!
//! The iterate follows the classical accelerated scheme with the momentum
//! weight driven by the λ-sequence
//!
//! λ₀ = 0,  λ_new = (1 + √(1 + 4·λ_old²)) / 2,  γ = (1 − λ_old) / λ_new,
//!
//! applied to the Rayleigh quotient on the unit sphere:
//!
//! y_prev ← y,  y ← x − 2·lr·Ax (min) or x + lr·Ax (max),
//! x ← (1−γ)·y + γ·y_prev,  x ← x / ‖x‖.
//!
//! On the first iteration γ = 1, so the scheme provably does not move the
//! iterate; the quotient-change convergence test is suppressed there to avoid
//! a spurious early exit.
//!
//! [`Nesterov::extreme_eigenvalues`] chains two solves to bracket the whole
//! spectrum: the maximum is extracted first, and its estimate sizes a
//! stability-safe learning rate `alpha / (2·ρ_max)` for the minimum solve.

use faer::{Mat, MatRef};
use serde::{Deserialize, Serialize};

use super::{Extremum, RunResult, check_dimensions, dot, next_lambda, normalize_in_place};
use crate::error::SolverError;
use crate::operator::LinearOperator;

/// Default tolerance on the quotient change between consecutive iterations.
pub const DEFAULT_TOL: f64 = 1e-8;

/// Result of the two-stage extremal solve: both eigenvalue estimates together
/// with per-stage convergence flags.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExtremeEigenvalues {
    /// Smallest-eigenvalue estimate.
    pub min: f64,
    /// Largest-eigenvalue estimate.
    pub max: f64,
    /// Whether the minimum stage converged within its budget.
    pub min_converged: bool,
    /// Whether the maximum stage converged within its budget.
    pub max_converged: bool,
}

/// Momentum-accelerated solver for a single extreme eigenvalue of a symmetric
/// operator.
pub struct Nesterov<'a, O: LinearOperator + ?Sized> {
    operator: &'a O,
    /// Current unit-norm iterate.
    x: Mat<f64>,
    /// Cached product `A·x`.
    ax: Mat<f64>,
    /// Cached Rayleigh quotient of `x`.
    rho: f64,
    /// Momentum vector.
    y: Mat<f64>,
    /// Previous momentum vector.
    y_prev: Mat<f64>,
    lr: f64,
    which: Extremum,
    tol: f64,
    save_history: bool,
    history: Option<Vec<f64>>,
    lambda_old: f64,
    lambda_new: f64,
}

impl<'a, O: LinearOperator + ?Sized> Nesterov<'a, O> {
    /// Creates a solver with the default tolerance ([`DEFAULT_TOL`]) and no
    /// history recording.
    ///
    /// The starting vector is copied and normalized; it does not need unit
    /// norm (but must be non-zero).
    pub fn new(
        operator: &'a O,
        x0: MatRef<'_, f64>,
        lr: f64,
        which: Extremum,
    ) -> Result<Self, SolverError> {
        Self::with_options(operator, x0, lr, which, DEFAULT_TOL, false)
    }

    /// Creates a solver with explicit tolerance and history settings.
    pub fn with_options(
        operator: &'a O,
        x0: MatRef<'_, f64>,
        lr: f64,
        which: Extremum,
        tol: f64,
        save_history: bool,
    ) -> Result<Self, SolverError> {
        check_dimensions(operator, x0)?;
        Ok(Self::from_validated(
            operator,
            x0,
            lr,
            which,
            tol,
            save_history,
        ))
    }

    /// Constructor used once dimensions are known to be compatible (in
    /// particular for sub-solvers seeded from an existing instance).
    fn from_validated(
        operator: &'a O,
        x0: MatRef<'_, f64>,
        lr: f64,
        which: Extremum,
        tol: f64,
        save_history: bool,
    ) -> Self {
        let mut x = x0.to_owned();
        normalize_in_place(&mut x);

        let ax = operator.apply(x.as_ref());
        let rho = dot(x.as_ref(), ax.as_ref());

        let n = x.nrows();
        let y = x.clone();
        Self {
            operator,
            x,
            ax,
            rho,
            y,
            y_prev: Mat::zeros(n, 1),
            lr,
            which,
            tol,
            save_history,
            history: None,
            lambda_old: 0.0,
            lambda_new: next_lambda(0.0),
        }
    }

    /// The current Rayleigh quotient.
    pub fn rho(&self) -> f64 {
        self.rho
    }

    /// A view of the current unit-norm iterate.
    pub fn x(&self) -> MatRef<'_, f64> {
        self.x.as_ref()
    }

    /// The configured learning rate.
    pub fn learning_rate(&self) -> f64 {
        self.lr
    }

    /// The configured optimization target.
    pub fn which(&self) -> Extremum {
        self.which
    }

    /// The quotient trajectory of the most recent `run` call, truncated to
    /// the iterations actually performed, if history recording is enabled.
    pub fn history(&self) -> Option<&[f64]> {
        self.history.as_deref()
    }

    /// Reinitializes the iterate, the momentum vectors, and the λ-sequence
    /// from a new starting vector, keeping the operator and configuration.
    ///
    /// This is the momentum restart used when the previous trajectory is no
    /// longer meaningful for the new starting point.
    pub fn reset(&mut self, x0: MatRef<'_, f64>) -> Result<(), SolverError> {
        check_dimensions(self.operator, x0)?;

        let mut x = x0.to_owned();
        normalize_in_place(&mut x);
        self.ax = self.operator.apply(x.as_ref());
        self.rho = dot(x.as_ref(), self.ax.as_ref());
        self.y = x.clone();
        self.x = x;
        for i in 0..self.y_prev.nrows() {
            self.y_prev[(i, 0)] = 0.0;
        }

        self.lambda_old = 0.0;
        self.lambda_new = next_lambda(0.0);
        self.history = None;
        Ok(())
    }

    /// Runs up to `num_iters` iterations.
    ///
    /// Stops when the quotient changes by less than the tolerance between
    /// consecutive iterations (suppressed on iteration 0, where the scheme
    /// does not move), returning [`RunResult::Converged`]; otherwise
    /// [`RunResult::Exhausted`] after the budget.
    pub fn run(&mut self, num_iters: usize) -> RunResult {
        if self.save_history {
            self.history = Some(Vec::with_capacity(num_iters));
        }

        let n = self.x.nrows();
        let step = match self.which {
            Extremum::Min => -2.0 * self.lr,
            Extremum::Max => self.lr,
        };

        for i in 0..num_iters {
            let gamma = (1.0 - self.lambda_old) / self.lambda_new;

            for j in 0..n {
                let y_old = self.y[(j, 0)];
                self.y_prev[(j, 0)] = y_old;

                let y_new = self.x[(j, 0)] + step * self.ax[(j, 0)];
                self.y[(j, 0)] = y_new;

                self.x[(j, 0)] = (1.0 - gamma) * y_new + gamma * y_old;
            }
            normalize_in_place(&mut self.x);

            self.ax = self.operator.apply(self.x.as_ref());
            let new_rho = dot(self.x.as_ref(), self.ax.as_ref());

            if (new_rho - self.rho).abs() < self.tol && i > 0 {
                log::debug!(
                    "{:?} quotient settled at iteration {}: {} (was {})",
                    self.which,
                    i,
                    new_rho,
                    self.rho
                );
                self.rho = new_rho;
                if let Some(history) = self.history.as_mut() {
                    history.push(self.rho);
                }
                return RunResult::Converged {
                    rho: self.rho,
                    x: self.x.clone(),
                    iterations: i + 1,
                };
            }

            self.rho = new_rho;
            self.lambda_old = self.lambda_new;
            self.lambda_new = next_lambda(self.lambda_old);

            if let Some(history) = self.history.as_mut() {
                history.push(self.rho);
            }
        }

        RunResult::Exhausted {
            rho: self.rho,
            x: self.x.clone(),
            iterations: num_iters,
        }
    }

    /// Extracts both extreme eigenvalues with two chained solves.
    ///
    /// The maximum is solved first with learning rate `max_lr`; its estimate
    /// then sizes the minimum stage's rate as `alpha / (2·ρ_max)`, a
    /// stability-safe step derived from the spectral radius just computed.
    ///
    /// Both stages run on private sub-solvers seeded from this instance's
    /// current iterate; the instance itself (its learning rate, target,
    /// iterate, quotient, and momentum state) is left untouched. A stage
    /// that fails to converge within `num_iters` emits a non-fatal
    /// `log::warn!` and is reported through the flags on the returned
    /// [`ExtremeEigenvalues`].
    pub fn extreme_eigenvalues(
        &self,
        num_iters: usize,
        max_lr: f64,
        alpha: f64,
    ) -> ExtremeEigenvalues {
        let max_result = self.sub_solve(num_iters, max_lr, Extremum::Max);
        if !max_result.converged() {
            log::warn!("max-eigenvalue stage has not converged within {num_iters} iterations");
        }
        let max = max_result.rho();

        let min_lr = alpha / (2.0 * max);
        let min_result = self.sub_solve(num_iters, min_lr, Extremum::Min);
        if !min_result.converged() {
            log::warn!("min-eigenvalue stage has not converged within {num_iters} iterations");
        }

        ExtremeEigenvalues {
            min: min_result.rho(),
            max,
            min_converged: min_result.converged(),
            max_converged: max_result.converged(),
        }
    }

    /// One stage of the extremal solve on a fresh solver seeded from the
    /// current iterate. Dimensions were validated when `self` was built, so
    /// the sub-solver skips the check.
    fn sub_solve(&self, num_iters: usize, lr: f64, which: Extremum) -> RunResult {
        let mut solver =
            Nesterov::from_validated(self.operator, self.x.as_ref(), lr, which, self.tol, false);
        solver.run(num_iters)
    }
}
