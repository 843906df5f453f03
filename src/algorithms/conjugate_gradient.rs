//! Conjugate-gradient minimization of the Rayleigh quotient.
//!
//! The solver combines conjugate search directions with the shared
//! backtracking line search. At each outer iteration the residual
//! `r = A·x − ρ·x` (the Rayleigh-quotient gradient on the sphere) is combined
//! with the previous direction as `p ← r + β·p`, where `β` is chosen in closed
//! form as the larger root of the quadratic
//!
//! a₁·β² + b₁·β + c₁ = 0,  a₁ = pᵀAp,  b₁ = 2·pᵀAr,  c₁ = rᵀAr,
//!
//! the root that maximizes descent along the new conjugate direction. When the
//! quadratic is indefinite or `a₁` is numerically degenerate, `β` falls back
//! to zero and the method degenerates safely to steepest descent instead of
//! propagating complex roots.
//!
//! The direction is rebuilt from the current residual at the start of every
//! [`ConjugateGradient::run`] call; it is not carried across calls.

use faer::{Mat, MatRef};

use super::line_search::{LineSearchOutcome, backtracking_line_search};
use super::{RunResult, check_dimensions, dot, normalize_in_place};
use crate::error::SolverError;
use crate::operator::LinearOperator;

/// Default starting step for the backtracking line search.
pub const DEFAULT_ALPHA_START: f64 = 1.0;
/// Default tolerance floor for the line search.
pub const DEFAULT_TOL: f64 = 1e-7;

/// Tolerance below which the β-quadratic is treated as degenerate.
const DEGENERACY_TOL: f64 = 1e-8;

/// Minimizes the Rayleigh quotient along conjugate directions, converging to
/// the smallest eigenvalue of a symmetric operator.
pub struct ConjugateGradient<'a, O: LinearOperator + ?Sized> {
    operator: &'a O,
    /// Current unit-norm iterate.
    x: Mat<f64>,
    /// Cached Rayleigh quotient of `x`.
    rho: f64,
    alpha_start: f64,
    tol: f64,
    /// Scratch buffer for line-search trial points, sized once here.
    x_new: Mat<f64>,
}

impl<'a, O: LinearOperator + ?Sized> ConjugateGradient<'a, O> {
    /// Creates a solver with the default line-search parameters
    /// ([`DEFAULT_ALPHA_START`], [`DEFAULT_TOL`]).
    ///
    /// The starting vector is copied and normalized; it does not need unit
    /// norm (but must be non-zero).
    pub fn new(operator: &'a O, x0: MatRef<'_, f64>) -> Result<Self, SolverError> {
        Self::with_options(operator, x0, DEFAULT_ALPHA_START, DEFAULT_TOL)
    }

    /// Creates a solver with explicit line-search parameters.
    ///
    /// # Arguments
    /// * `operator`: The symmetric operator `A`.
    /// * `x0`: Starting vector; copied and normalized.
    /// * `alpha_start`: Initial trial step of every line search.
    /// * `tol`: Line-search floor; once the step shrinks to this value
    ///   without improvement the solver reports convergence.
    pub fn with_options(
        operator: &'a O,
        x0: MatRef<'_, f64>,
        alpha_start: f64,
        tol: f64,
    ) -> Result<Self, SolverError> {
        check_dimensions(operator, x0)?;

        let mut x = x0.to_owned();
        normalize_in_place(&mut x);

        let ax = operator.apply(x.as_ref());
        let rho = dot(x.as_ref(), ax.as_ref());

        let x_new = x.clone();
        Ok(Self {
            operator,
            x,
            rho,
            alpha_start,
            tol,
            x_new,
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

    /// Runs up to `num_iters` outer iterations.
    ///
    /// Each iteration line-searches along the current conjugate direction and
    /// then rebuilds the direction from the fresh residual. The loop stops at
    /// the line-search floor (reported as [`RunResult::Converged`]: no
    /// improving step above the tolerance exists, so a local optimum has been
    /// reached to numerical precision) or when the budget runs out
    /// ([`RunResult::Exhausted`]).
    pub fn run(&mut self, num_iters: usize) -> RunResult {
        let n = self.x.nrows();

        // The conjugate direction starts from the plain residual of the
        // current iterate.
        let ax = self.operator.apply(self.x.as_ref());
        let mut r = Mat::<f64>::zeros(n, 1);
        for i in 0..n {
            r[(i, 0)] = ax[(i, 0)] - self.rho * self.x[(i, 0)];
        }
        let mut p = r.clone();

        for iter in 0..num_iters {
            match backtracking_line_search(
                self.operator,
                &mut self.x,
                &mut self.x_new,
                self.rho,
                p.as_ref(),
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

            let ax = self.operator.apply(self.x.as_ref());
            for i in 0..n {
                r[(i, 0)] = ax[(i, 0)] - self.rho * self.x[(i, 0)];
            }

            // Closed-form β from the quadratic along the new direction. Both
            // coefficients reuse A·p and A·r; symmetry of A gives pᵀAr = rᵀAp.
            let ap = self.operator.apply(p.as_ref());
            let ar = self.operator.apply(r.as_ref());
            let a1 = dot(p.as_ref(), ap.as_ref());
            let b1 = 2.0 * dot(p.as_ref(), ar.as_ref());
            let c1 = dot(r.as_ref(), ar.as_ref());

            let delta = b1 * b1 - 4.0 * a1 * c1;
            let beta = if delta < -DEGENERACY_TOL || a1.abs() < DEGENERACY_TOL {
                // Indefinite or degenerate quadratic: fall back to steepest
                // descent rather than taking a complex root.
                0.0
            } else {
                (-b1 + delta.max(0.0).sqrt()) / (2.0 * a1)
            };

            for i in 0..n {
                p[(i, 0)] = r[(i, 0)] + beta * p[(i, 0)];
            }
        }

        RunResult::Exhausted {
            rho: self.rho,
            x: self.x.clone(),
            iterations: num_iters,
        }
    }
}
