//! Stateless, function-style eigenvalue solvers with deflation support.
//!
//! These are the lightweight counterparts to the class-form optimizers in
//! [`crate::algorithms`]: each call owns no state beyond its arguments, the
//! iterate is advanced in place, and the final Rayleigh quotient is returned
//! directly.
//!
//! All three functions accept an optional **deflation subspace**: a matrix
//! whose orthonormal columns span directions to be projected out of the
//! iterate after every update and before renormalization. Supplying the
//! already-found top eigenvector, for example, makes the maximizing variants
//! converge to the *second* largest eigenvalue, so eigenpairs can be peeled
//! off one at a time.
//!
//! Unlike the class-form optimizers these functions do not report whether the
//! tolerance test fired or the budget ran out; they return the best estimate
//! reached either way. The asymmetry is deliberate: the functional variants
//! are meant for fire-and-forget use where the caller inspects the optional
//! history instead.

use faer::{Mat, MatRef};

use crate::algorithms::{Extremum, check_dimensions, dot, next_lambda, normalize_in_place};
use crate::error::{SolverError, SolverErrorKind};
use crate::operator::LinearOperator;

/// Validates an optional deflation basis against the iterate's dimension.
fn check_subspace(
    subspace: Option<MatRef<'_, f64>>,
    vector_rows: usize,
) -> Result<(), SolverError> {
    if let Some(basis) = subspace {
        if basis.nrows() != vector_rows {
            return Err(SolverErrorKind::SubspaceShapeMismatch {
                subspace_rows: basis.nrows(),
                vector_rows,
            }
            .into());
        }
    }
    Ok(())
}

/// Projects `x` onto the orthogonal complement of the subspace: x ← x − S·(Sᵀx).
fn project_out(x: &mut Mat<f64>, basis: MatRef<'_, f64>) {
    let coefficients = basis.transpose() * x.as_ref();
    let correction = basis * coefficients.as_ref();
    for i in 0..x.nrows() {
        x[(i, 0)] -= correction[(i, 0)];
    }
}

/// Records `rho` when a history buffer was supplied.
#[inline]
fn record(history: &mut Option<&mut Vec<f64>>, rho: f64) {
    if let Some(buffer) = history.as_deref_mut() {
        buffer.push(rho);
    }
}

/// Prepares a caller-supplied history buffer for at most `max_iter` entries.
#[inline]
fn prepare(history: &mut Option<&mut Vec<f64>>, max_iter: usize) {
    if let Some(buffer) = history.as_deref_mut() {
        buffer.clear();
        buffer.reserve(max_iter);
    }
}

/// Power iteration: repeatedly replaces `x` with the normalized product
/// `A·x`.
///
/// The baseline fixed-point scheme: no momentum, no step size, converging to
/// the eigenvalue of largest magnitude. Stops early when the Rayleigh
/// quotient changes by less than `tol` between consecutive iterations.
///
/// `x` is advanced in place; the final quotient is returned. When `history`
/// is supplied it receives the quotient of every non-terminal iteration.
pub fn power_iteration<O: LinearOperator + ?Sized>(
    operator: &O,
    x: &mut Mat<f64>,
    max_iter: usize,
    tol: f64,
    mut history: Option<&mut Vec<f64>>,
) -> Result<f64, SolverError> {
    check_dimensions(operator, x.as_ref())?;
    prepare(&mut history, max_iter);

    let mut ax = operator.apply(x.as_ref());
    let mut rho = dot(x.as_ref(), ax.as_ref());

    for _ in 0..max_iter {
        let old_rho = rho;

        x.as_mut().copy_from(ax.as_ref());
        normalize_in_place(x);

        ax = operator.apply(x.as_ref());
        rho = dot(x.as_ref(), ax.as_ref());

        if (rho - old_rho).abs() < tol {
            break;
        }

        record(&mut history, rho);
    }

    Ok(rho)
}

/// Single-direction projected gradient with a fixed learning rate.
///
/// Each step moves the iterate along the raw product, `x ← x ± lr·A·x`,
/// projects out the deflation subspace when one is given, and renormalizes.
/// Stops early when the Rayleigh quotient changes by less than `tol`.
///
/// `x` is advanced in place; the final quotient is returned.
#[allow(clippy::too_many_arguments)]
pub fn gradient_descent<O: LinearOperator + ?Sized>(
    operator: &O,
    x: &mut Mat<f64>,
    lr: f64,
    which: Extremum,
    max_iter: usize,
    tol: f64,
    subspace: Option<MatRef<'_, f64>>,
    mut history: Option<&mut Vec<f64>>,
) -> Result<f64, SolverError> {
    check_dimensions(operator, x.as_ref())?;
    check_subspace(subspace, x.nrows())?;
    prepare(&mut history, max_iter);

    let n = x.nrows();
    let sign = which.sign();

    let mut ax = operator.apply(x.as_ref());
    let mut rho = dot(x.as_ref(), ax.as_ref());

    for _ in 0..max_iter {
        let old_rho = rho;

        for i in 0..n {
            x[(i, 0)] += sign * lr * ax[(i, 0)];
        }
        if let Some(basis) = subspace {
            project_out(x, basis);
        }
        normalize_in_place(x);

        ax = operator.apply(x.as_ref());
        rho = dot(x.as_ref(), ax.as_ref());

        if (rho - old_rho).abs() < tol {
            break;
        }

        record(&mut history, rho);
    }

    Ok(rho)
}

/// Single-direction Nesterov-accelerated iteration with a fixed learning
/// rate.
///
/// The accelerated counterpart of [`gradient_descent`], using the momentum
/// recurrence
///
/// y_prev ← y,  y ← x ± lr·A·x,  x ← (1−γ)·y + γ·y_prev
///
/// with γ driven by the standard λ-sequence. Deflation and the stopping test
/// behave as in [`gradient_descent`].
///
/// `x` is advanced in place; the final quotient is returned.
#[allow(clippy::too_many_arguments)]
pub fn nesterov_descent<O: LinearOperator + ?Sized>(
    operator: &O,
    x: &mut Mat<f64>,
    lr: f64,
    which: Extremum,
    max_iter: usize,
    tol: f64,
    subspace: Option<MatRef<'_, f64>>,
    mut history: Option<&mut Vec<f64>>,
) -> Result<f64, SolverError> {
    check_dimensions(operator, x.as_ref())?;
    check_subspace(subspace, x.nrows())?;
    prepare(&mut history, max_iter);

    let n = x.nrows();
    let sign = which.sign();

    let mut lambda_old = 0.0;
    let mut lambda_new = next_lambda(lambda_old);

    let mut y = x.clone();
    let mut y_prev = Mat::<f64>::zeros(n, 1);

    let mut ax = operator.apply(x.as_ref());
    let mut rho = dot(x.as_ref(), ax.as_ref());

    for _ in 0..max_iter {
        let old_rho = rho;
        let gamma = (1.0 - lambda_old) / lambda_new;

        for i in 0..n {
            let y_old = y[(i, 0)];
            y_prev[(i, 0)] = y_old;

            let y_new = x[(i, 0)] + sign * lr * ax[(i, 0)];
            y[(i, 0)] = y_new;

            x[(i, 0)] = (1.0 - gamma) * y_new + gamma * y_old;
        }
        if let Some(basis) = subspace {
            project_out(x, basis);
        }
        normalize_in_place(x);

        ax = operator.apply(x.as_ref());
        rho = dot(x.as_ref(), ax.as_ref());

        lambda_old = lambda_new;
        lambda_new = next_lambda(lambda_old);

        if (rho - old_rho).abs() < tol {
            break;
        }

        record(&mut history, rho);
    }

    Ok(rho)
}
