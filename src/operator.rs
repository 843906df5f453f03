//! This module defines the core abstraction for linear operators.
//!
//! Every optimizer in this crate interacts with the matrix `A` exclusively
//! through the matrix-vector product and inner products derived from it. This
//! observation allows for a powerful abstraction: the algorithms can be written
//! to operate on any object that can perform this action, known as a "linear
//! operator."
//!
//! This "matrix-free" approach offers significant advantages:
//! 1.  **Generality**: The same Rayleigh-quotient optimizer works with dense
//!     matrices, sparse matrices, or operators defined purely by their action,
//!     such as the result of composing other matrices.
//! 2.  **Testability**: The algorithms can be validated on small dense matrices
//!     with analytically known spectra, and then deployed on large sparse
//!     operators without changing the core logic.
//! 3.  **Encapsulation**: Storage details and the specifics of the product are
//!     hidden behind a clean interface.
//!
//! The operators are expected to be **symmetric**. None of the algorithms
//! verify this; the Rayleigh-quotient interpretation of the computed scalars
//! only holds when the caller supplies a symmetric `A`.

use faer::{
    Mat, MatMut, MatRef,
    prelude::Reborrow,
    sparse::{SparseColMat, SparseColMatRef},
};

/// Represents a linear operator that can be applied to a vector.
///
/// This trait provides an abstraction for the matrix-vector product, which is
/// the fundamental operation required by all of the iterative eigenvalue
/// optimizers in this crate. By depending on this trait rather than a concrete
/// matrix type, the algorithms are written in a generic, "matrix-free" manner.
///
/// Implementations are provided for [`faer`]'s dense matrix types and for
/// sparse column-major matrices.
pub trait LinearOperator {
    /// Returns the number of rows of the operator.
    fn nrows(&self) -> usize;

    /// Returns the number of columns of the operator.
    fn ncols(&self) -> usize;

    /// Applies the linear operator to a single-column matrix `rhs`.
    ///
    /// The implementation must return an owned matrix (`Mat<f64>`) containing
    /// the result of the operation `A * rhs`.
    ///
    /// # Panics
    ///
    /// This method is expected to panic if the inner dimension of the operator
    /// does not match the number of rows of `rhs`.
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64>;
}

/// Implementation of `LinearOperator` for `faer`'s immutable dense matrix view
/// (`MatRef`). This is the primary concrete implementation that the algorithms
/// are tested against.
impl<'a> LinearOperator for MatRef<'a, f64> {
    #[inline]
    fn nrows(&self) -> usize {
        // Method resolution picks the inherent `MatRef::nrows` here.
        self.nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.ncols()
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        // Ensure dimensional compatibility for the matrix product.
        assert_eq!(
            self.ncols(),
            rhs.nrows(),
            "Dimension mismatch: operator columns ({}) do not match vector rows ({}).",
            self.ncols(),
            rhs.nrows(),
        );

        // Defer to faer's optimized matrix multiplication routine.
        self * rhs
    }
}

/// Implementation of `LinearOperator` for `faer`'s mutable dense matrix view
/// (`MatMut`). This implementation delegates to the `MatRef` implementation
/// via a reborrow.
impl<'a> LinearOperator for MatMut<'a, f64> {
    #[inline]
    fn nrows(&self) -> usize {
        self.rb().nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.rb().ncols()
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        LinearOperator::apply(&self.rb(), rhs)
    }
}

/// Implementation of `LinearOperator` for `faer`'s owned dense matrix (`Mat`).
impl LinearOperator for Mat<f64> {
    #[inline]
    fn nrows(&self) -> usize {
        self.as_ref().nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.as_ref().ncols()
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        LinearOperator::apply(&self.as_ref(), rhs)
    }
}

/// Implementation of `LinearOperator` for sparse column-major matrix views.
///
/// Large symmetric operators (graph Laplacians, discretized differential
/// operators, KKT systems) are typically stored in this format; the iterate
/// stays dense while the product exploits sparsity.
impl<'a> LinearOperator for SparseColMatRef<'a, usize, f64> {
    #[inline]
    fn nrows(&self) -> usize {
        self.symbolic().nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.symbolic().ncols()
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        assert_eq!(
            self.ncols(),
            rhs.nrows(),
            "Dimension mismatch: operator columns ({}) do not match vector rows ({}).",
            self.ncols(),
            rhs.nrows(),
        );

        *self * rhs
    }
}

/// Implementation of `LinearOperator` for owned sparse column-major matrices.
impl LinearOperator for SparseColMat<usize, f64> {
    #[inline]
    fn nrows(&self) -> usize {
        self.as_ref().nrows()
    }

    #[inline]
    fn ncols(&self) -> usize {
        self.as_ref().ncols()
    }

    #[inline]
    fn apply(&self, rhs: MatRef<'_, f64>) -> Mat<f64> {
        LinearOperator::apply(&self.as_ref(), rhs)
    }
}

// Unit tests to verify the correctness of the LinearOperator trait and its
// implementations.
#[cfg(test)]
mod tests {
    use super::*;
    use faer::mat;
    use faer::sparse::Triplet;

    #[test]
    fn test_linear_operator_for_mat() {
        let matrix: Mat<f64> = mat![[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0],];
        let vector: Mat<f64> = mat![[1.0], [2.0], [3.0]];

        // Expected result from direct multiplication.
        let expected_result = &matrix * &vector;

        let operator: &dyn LinearOperator = &matrix;
        let result = operator.apply(vector.as_ref());

        assert_eq!(result, expected_result);
        assert_eq!(operator.nrows(), 3);
        assert_eq!(operator.ncols(), 3);
    }

    #[test]
    fn test_linear_operator_for_mat_ref_and_mut() {
        let mut matrix: Mat<f64> = mat![[1.0, 2.0], [3.0, 4.0]];
        let vector: Mat<f64> = mat![[1.0], [1.0]];

        let expected = &matrix * &vector;

        let operator_ref: &dyn LinearOperator = &matrix.as_ref();
        let result_ref = operator_ref.apply(vector.as_ref());
        assert_eq!(result_ref, expected);

        let operator_mut: &dyn LinearOperator = &matrix.as_mut();
        let result_mut = operator_mut.apply(vector.as_ref());
        assert_eq!(result_mut, expected);
    }

    #[test]
    fn test_sparse_operator_matches_dense() {
        // A small symmetric tridiagonal matrix, assembled both densely and
        // from triplets.
        let dense: Mat<f64> = mat![[2.0, -1.0, 0.0], [-1.0, 2.0, -1.0], [0.0, -1.0, 2.0],];
        let triplets = [
            Triplet {
                row: 0,
                col: 0,
                val: 2.0,
            },
            Triplet {
                row: 0,
                col: 1,
                val: -1.0,
            },
            Triplet {
                row: 1,
                col: 0,
                val: -1.0,
            },
            Triplet {
                row: 1,
                col: 1,
                val: 2.0,
            },
            Triplet {
                row: 1,
                col: 2,
                val: -1.0,
            },
            Triplet {
                row: 2,
                col: 1,
                val: -1.0,
            },
            Triplet {
                row: 2,
                col: 2,
                val: 2.0,
            },
        ];
        let sparse = SparseColMat::try_new_from_triplets(3, 3, &triplets).unwrap();

        let vector: Mat<f64> = mat![[1.0], [2.0], [3.0]];
        let dense_result = LinearOperator::apply(&dense, vector.as_ref());
        let sparse_result = LinearOperator::apply(&sparse, vector.as_ref());

        assert!((&dense_result - &sparse_result).norm_l2() < 1e-14);
    }

    #[test]
    #[should_panic(
        expected = "Dimension mismatch: operator columns (2) do not match vector rows (3)."
    )]
    fn test_dimension_mismatch_panic() {
        let matrix: Mat<f64> = mat![[1.0, 0.0], [0.0, 1.0]];
        let vector: Mat<f64> = mat![[1.0], [2.0], [3.0]]; // Incorrect dimension

        let operator: &dyn LinearOperator = &matrix;
        operator.apply(vector.as_ref());
    }
}
