//! Fixed-step projected gradient tracking both extrema at once.
//!
//! Two unit-norm iterates advance in lockstep, one descending the Rayleigh
//! quotient and one ascending it. Both share a single step size
//!
//! lr = 1 / (2·ρ_max)
//!
//! re-derived every iteration from the current maximum estimate, which is a
//! safe online bound on the curvature of the quadratic (the theoretically
//! optimal step for projected gradient ascent scales with 1/λ_max).
//!
//! The solver performs no convergence test: it runs for the full requested
//! budget and always reports [`RunResult::Exhausted`], leaving interpretation
//! of the trajectory to the caller via the recorded history. This asymmetry
//! with the other class-form optimizers is intentional.

use faer::{Mat, MatRef};

use super::{Extremum, RunResult, check_dimensions, dot, normalize_in_place};
use crate::error::SolverError;
use crate::operator::LinearOperator;

/// Projected-gradient solver tracking the minimizing and maximizing iterates
/// simultaneously with a shared, dynamically estimated step size.
pub struct GradientDescent<'a, O: LinearOperator + ?Sized> {
    operator: &'a O,
    x_min: Mat<f64>,
    x_max: Mat<f64>,
    ax_min: Mat<f64>,
    ax_max: Mat<f64>,
    rho_min: f64,
    rho_max: f64,
    /// Gradient scratch buffer; written by exactly one iterate update at a
    /// time.
    grad: Mat<f64>,
    save_history: bool,
    history: Option<Vec<f64>>,
}

impl<'a, O: LinearOperator + ?Sized> GradientDescent<'a, O> {
    /// Creates a solver from a starting vector shared by both iterates.
    ///
    /// With `save_history`, every [`GradientDescent::run`] call records the
    /// minimizing quotient per iteration, retrievable through
    /// [`GradientDescent::history`].
    pub fn new(
        operator: &'a O,
        x0: MatRef<'_, f64>,
        save_history: bool,
    ) -> Result<Self, SolverError> {
        check_dimensions(operator, x0)?;

        let mut x = x0.to_owned();
        normalize_in_place(&mut x);

        let ax = operator.apply(x.as_ref());
        let rho = dot(x.as_ref(), ax.as_ref());

        let n = x.nrows();
        Ok(Self {
            operator,
            x_min: x.clone(),
            x_max: x,
            ax_min: ax.clone(),
            ax_max: ax,
            rho_min: rho,
            rho_max: rho,
            grad: Mat::zeros(n, 1),
            save_history,
            history: None,
        })
    }

    /// The current quotient of the requested iterate.
    pub fn rho(&self, which: Extremum) -> f64 {
        match which {
            Extremum::Min => self.rho_min,
            Extremum::Max => self.rho_max,
        }
    }

    /// A view of the requested unit-norm iterate.
    pub fn x(&self, which: Extremum) -> MatRef<'_, f64> {
        match which {
            Extremum::Min => self.x_min.as_ref(),
            Extremum::Max => self.x_max.as_ref(),
        }
    }

    /// The minimizing-quotient trajectory of the most recent `run` call, if
    /// history recording is enabled.
    pub fn history(&self) -> Option<&[f64]> {
        self.history.as_deref()
    }

    /// Runs exactly `num_iters` iterations and reports the minimizing
    /// iterate's terminal state.
    ///
    /// Always returns [`RunResult::Exhausted`]; see the module docs. The
    /// maximizing estimate remains available through
    /// [`GradientDescent::rho`] and [`GradientDescent::x`].
    pub fn run(&mut self, num_iters: usize) -> RunResult {
        if self.save_history {
            self.history = Some(Vec::with_capacity(num_iters));
        }

        for _ in 0..num_iters {
            // The current max estimate is a safe Lipschitz bound for both
            // directions; compute the shared step before either update.
            let lr = 1.0 / (2.0 * self.rho_max);

            advance(
                self.operator,
                &mut self.x_min,
                &mut self.ax_min,
                &mut self.rho_min,
                &mut self.grad,
                Extremum::Min,
                lr,
            );
            advance(
                self.operator,
                &mut self.x_max,
                &mut self.ax_max,
                &mut self.rho_max,
                &mut self.grad,
                Extremum::Max,
                lr,
            );

            if let Some(history) = self.history.as_mut() {
                history.push(self.rho_min);
            }
        }

        RunResult::Exhausted {
            rho: self.rho_min,
            x: self.x_min.clone(),
            iterations: num_iters,
        }
    }
}

/// One projected-gradient update of a single iterate: form the Riemannian
/// gradient, step along it, renormalize, and refresh the cached product and
/// quotient.
fn advance<O: LinearOperator + ?Sized>(
    operator: &O,
    x: &mut Mat<f64>,
    ax: &mut Mat<f64>,
    rho: &mut f64,
    grad: &mut Mat<f64>,
    which: Extremum,
    lr: f64,
) {
    let n = x.nrows();
    let sign = which.sign();

    for i in 0..n {
        grad[(i, 0)] = ax[(i, 0)] - *rho * x[(i, 0)];
    }
    for i in 0..n {
        x[(i, 0)] += sign * lr * grad[(i, 0)];
    }
    normalize_in_place(x);

    *ax = operator.apply(x.as_ref());
    *rho = dot(x.as_ref(), ax.as_ref());
}
