//! Iterative optimizers for the extreme eigenvalues of a symmetric operator.
//!
//! All algorithms in this module solve the same problem: extremize the
//! Rayleigh quotient
//!
//! ρ(x) = xᵀAx / xᵀx
//!
//! over the unit sphere, whose extrema are the extreme eigenvalues of `A` with
//! the extremizers as the corresponding eigenvectors. Each optimizer maintains
//! an iterate of unit Euclidean norm, derives a search direction from the
//! Rayleigh-quotient gradient (or curvature information along a conjugate
//! direction), takes a step, renormalizes, and tests for termination.
//!
//! The optimizers differ in their convergence/stability trade-offs:
//!
//! - [`GradientDescent`](gradient_descent::GradientDescent): fixed-step
//!   projected gradient, tracking both extrema simultaneously with a step
//!   size derived online from the running maximum estimate.
//! - [`Nesterov`](nesterov::Nesterov): momentum-accelerated projected
//!   gradient with a restartable λ-sequence.
//! - [`ConjugateGradient`](conjugate_gradient::ConjugateGradient): conjugate
//!   directions from a closed-form quadratic minimization, safeguarded by a
//!   backtracking line search.
//! - [`RmsProp`](rmsprop::RmsProp): per-coordinate adaptive scaling of the
//!   gradient, sharing the same line search as the conjugate-gradient solver.
//!
//! Stateless functional counterparts (with deflation support) live in
//! [`crate::solvers`].

use faer::{Mat, MatRef};
use serde::{Deserialize, Serialize};

use crate::error::{SolverError, SolverErrorKind};
use crate::operator::LinearOperator;

pub mod conjugate_gradient;
pub mod gradient_descent;
pub(crate) mod line_search;
pub mod nesterov;
pub mod rmsprop;

/// Selects which end of the spectrum an optimizer targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extremum {
    /// Seek the smallest eigenvalue (minimize the Rayleigh quotient).
    Min,
    /// Seek the largest eigenvalue (maximize the Rayleigh quotient).
    Max,
}

impl Extremum {
    /// The sign of a gradient-ascent step targeting this extremum.
    #[inline]
    pub(crate) fn sign(self) -> f64 {
        match self {
            Extremum::Min => -1.0,
            Extremum::Max => 1.0,
        }
    }
}

/// Terminal state of a class-form optimizer's `run` call.
///
/// Both variants carry the final Rayleigh quotient, a copy of the final unit
/// iterate, and the 1-based number of the iteration on which the loop stopped.
/// The distinction is which event stopped it:
///
/// - `Converged`: the algorithm's own stopping criterion fired before the
///   budget ran out. For [`nesterov::Nesterov`] this is the
///   quotient-change test; for [`conjugate_gradient::ConjugateGradient`] and
///   [`rmsprop::RmsProp`] it is the line-search floor, which indicates that no
///   improving step above the tolerance exists, a legitimate terminal state
///   at a local optimum, not an error.
/// - `Exhausted`: the iteration budget ran out first. The estimate is still
///   the best one reached; callers may retry with a larger budget or a
///   different learning rate.
///
/// [`gradient_descent::GradientDescent`] performs no convergence test at all
/// and always reports `Exhausted`; interpretation of its trajectory is left to
/// the caller via the recorded history.
#[derive(Debug, Clone)]
pub enum RunResult {
    /// The stopping criterion fired at the given iteration.
    Converged {
        /// Final Rayleigh quotient.
        rho: f64,
        /// Final unit-norm iterate.
        x: Mat<f64>,
        /// Number of iterations performed.
        iterations: usize,
    },
    /// The iteration budget was spent without the criterion firing.
    Exhausted {
        /// Rayleigh quotient reached when the budget ran out.
        rho: f64,
        /// Unit-norm iterate reached when the budget ran out.
        x: Mat<f64>,
        /// Number of iterations performed.
        iterations: usize,
    },
}

impl RunResult {
    /// Whether the stopping criterion fired before the budget ran out.
    pub fn converged(&self) -> bool {
        matches!(self, RunResult::Converged { .. })
    }

    /// The final Rayleigh quotient (eigenvalue estimate).
    pub fn rho(&self) -> f64 {
        match self {
            RunResult::Converged { rho, .. } | RunResult::Exhausted { rho, .. } => *rho,
        }
    }

    /// A view of the final unit-norm iterate (eigenvector estimate).
    pub fn x(&self) -> MatRef<'_, f64> {
        match self {
            RunResult::Converged { x, .. } | RunResult::Exhausted { x, .. } => x.as_ref(),
        }
    }

    /// Number of iterations performed before stopping.
    pub fn iterations(&self) -> usize {
        match self {
            RunResult::Converged { iterations, .. } | RunResult::Exhausted { iterations, .. } => {
                *iterations
            }
        }
    }
}

/// Computes the Rayleigh quotient ρ(x) = xᵀAx / xᵀx for an arbitrary non-zero
/// vector.
///
/// The optimizers themselves keep their iterates at unit norm and therefore
/// skip the denominator; this helper is the general form for callers that want
/// to evaluate an estimate for a vector of their own.
pub fn rayleigh_quotient<O: LinearOperator + ?Sized>(operator: &O, x: MatRef<'_, f64>) -> f64 {
    let ax = operator.apply(x);
    dot(x, ax.as_ref()) / dot(x, x)
}

/// Euclidean inner product of two single-column matrices.
#[inline]
pub(crate) fn dot(a: MatRef<'_, f64>, b: MatRef<'_, f64>) -> f64 {
    let mut acc = 0.0;
    for i in 0..a.nrows() {
        acc += a[(i, 0)] * b[(i, 0)];
    }
    acc
}

/// Rescales `x` to unit Euclidean norm in place.
///
/// Division by a zero norm is unguarded; the algorithms assume a well-posed
/// operator and a non-zero starting vector.
#[inline]
pub(crate) fn normalize_in_place(x: &mut Mat<f64>) {
    let norm = x.norm_l2();
    for i in 0..x.nrows() {
        x[(i, 0)] /= norm;
    }
}

/// Advances the Nesterov λ-sequence: λ_new = (1 + √(1 + 4λ_old²)) / 2.
#[inline]
pub(crate) fn next_lambda(lambda_old: f64) -> f64 {
    (1.0 + (1.0 + 4.0 * lambda_old * lambda_old).sqrt()) / 2.0
}

/// Validates that `operator` can be applied to the column vector `x`.
///
/// Called by every solver before its first iteration so that shape errors
/// surface as a rejected call rather than a panic mid-iteration.
pub(crate) fn check_dimensions<O: LinearOperator + ?Sized>(
    operator: &O,
    x: MatRef<'_, f64>,
) -> Result<(), SolverError> {
    if operator.ncols() != x.nrows() {
        return Err(SolverErrorKind::DimensionMismatch {
            operator_cols: operator.ncols(),
            vector_rows: x.nrows(),
        }
        .into());
    }
    Ok(())
}
