//! Safeguarded backtracking line search on the unit sphere.
//!
//! This is the acceptance test shared by the conjugate-gradient and RMSProp
//! optimizers: given a search direction `p`, the step `α` is halved from its
//! starting value until the trial point
//!
//! x_new = (x − α·p) / ‖x − α·p‖
//!
//! no longer increases the Rayleigh quotient, or `α` falls to the tolerance
//! floor. The floor signals that no improving step above the tolerance exists
//! along `p`; the caller treats this as the terminal state of its outer loop,
//! with the iterate and quotient left exactly as they were before the step.

use faer::{Mat, MatRef};

use super::{dot, normalize_in_place};
use crate::operator::LinearOperator;

/// Outcome of one backtracking pass along a fixed direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum LineSearchOutcome {
    /// A non-increasing trial point was found; the iterate was advanced and
    /// the Rayleigh quotient of the accepted point is carried here.
    Accepted { rho: f64 },
    /// The step shrank to the tolerance floor without improvement. The
    /// iterate was not moved.
    Floor,
}

/// Backtracks along `direction` until the Rayleigh quotient stops increasing.
///
/// On acceptance, `x` is overwritten with the accepted unit-norm trial point
/// and the new quotient is returned; `x_new` is the caller-owned scratch
/// buffer for trial points, written once per trial. On [`LineSearchOutcome::Floor`]
/// the iterate is untouched ("reject back to the last good point").
///
/// Note the floor check runs *after* the shrink loop: a trial accepted on the
/// same pass that `α` crossed the floor is still rejected. Re-applying the
/// search from a rejected point with the same direction therefore fails again
/// immediately, which makes the floor a stable terminal state.
pub(crate) fn backtracking_line_search<O: LinearOperator + ?Sized>(
    operator: &O,
    x: &mut Mat<f64>,
    x_new: &mut Mat<f64>,
    rho: f64,
    direction: MatRef<'_, f64>,
    alpha_start: f64,
    tol: f64,
) -> LineSearchOutcome {
    let n = x.nrows();

    let mut alpha = alpha_start;
    let mut new_rho = f64::INFINITY;

    while new_rho > rho && alpha > tol {
        for i in 0..n {
            x_new[(i, 0)] = x[(i, 0)] - alpha * direction[(i, 0)];
        }
        normalize_in_place(x_new);

        let ax_new = operator.apply(x_new.as_ref());
        new_rho = dot(x_new.as_ref(), ax_new.as_ref());

        alpha *= 0.5;
    }

    if alpha <= tol {
        return LineSearchOutcome::Floor;
    }

    x.as_mut().copy_from(x_new.as_ref());
    LineSearchOutcome::Accepted { rho: new_rho }
}

#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;

    #[test]
    fn test_accepts_descent_direction() {
        let a = mat![[2.0, 0.0], [0.0, 1.0]];
        let inv_sqrt2 = 1.0 / 2.0_f64.sqrt();
        let mut x = mat![[inv_sqrt2], [inv_sqrt2]];
        let mut x_new = x.clone();
        let rho = 1.5;

        // The Rayleigh-quotient gradient at x; stepping against it must
        // decrease the quotient.
        let direction = mat![[(2.0 - rho) * inv_sqrt2], [(1.0 - rho) * inv_sqrt2]];

        let outcome =
            backtracking_line_search(&a, &mut x, &mut x_new, rho, direction.as_ref(), 1.0, 1e-8);

        match outcome {
            LineSearchOutcome::Accepted { rho: new_rho } => {
                assert!(new_rho < rho);
                assert!((x.norm_l2() - 1.0).abs() < 1e-12);
            }
            LineSearchOutcome::Floor => panic!("descent direction must be accepted"),
        }
    }

    #[test]
    fn test_floor_is_idempotent_at_an_optimum() {
        // x is the eigenvector of the smallest eigenvalue; every step along
        // e_1 strictly increases the quotient, so the search must shrink to
        // the floor, leave x untouched, and do so again on a second call.
        let a = mat![[2.0, 0.0], [0.0, 1.0]];
        let mut x = mat![[0.0], [1.0]];
        let mut x_new = x.clone();
        let rho = 1.0;
        let direction = mat![[1.0], [0.0]];

        for _ in 0..2 {
            let outcome = backtracking_line_search(
                &a,
                &mut x,
                &mut x_new,
                rho,
                direction.as_ref(),
                1.0,
                1e-8,
            );
            assert_eq!(outcome, LineSearchOutcome::Floor);
            assert_eq!(x[(0, 0)], 0.0);
            assert_eq!(x[(1, 0)], 1.0);
        }
    }

    #[test]
    fn test_degenerate_starting_step_hits_floor() {
        // With alpha_start at the tolerance the loop body never runs.
        let a = mat![[2.0, 0.0], [0.0, 1.0]];
        let mut x = mat![[1.0], [0.0]];
        let mut x_new = x.clone();
        let direction = mat![[0.0], [1.0]];

        let outcome =
            backtracking_line_search(&a, &mut x, &mut x_new, 2.0, direction.as_ref(), 1e-8, 1e-8);
        assert_eq!(outcome, LineSearchOutcome::Floor);
    }
}
