//! This module defines the custom error types for the library.
//!
//! All precondition violations that can be detected before an optimizer takes
//! its first step are centralized in a single enum behind [`SolverError`].
//! Numerical conditions that arise *during* iteration (non-convergence,
//! line-search exhaustion) are deliberately not errors; they are reported
//! through the result types of the individual solvers.
//!
//! Using the [`thiserror`] crate allows us to create idiomatic error types with
//! minimal boilerplate.
use thiserror::Error;

/// Represents all possible errors that can occur when configuring a solver.
///
#[derive(Error, Debug)]
#[error(transparent)]
pub struct SolverError(#[from] SolverErrorKind);

/// Private enum containing the distinct kinds of errors.
/// This separation allows for a clean `Display` implementation via [`thiserror`]
/// while keeping the variant set free to evolve without breaking the public API.
#[derive(Error, Debug, PartialEq)]
pub(crate) enum SolverErrorKind {
    /// Indicates that the dimensions of the operator and the starting vector
    /// are incompatible for a matrix-vector product.
    #[error(
        "Dimension mismatch: operator has {operator_cols} columns but vector has {vector_rows} rows."
    )]
    DimensionMismatch {
        operator_cols: usize,
        vector_rows: usize,
    },

    /// Indicates that a deflation subspace does not share the iterate's row
    /// dimension. The subspace must be a `(d, m)` matrix where `d` is the
    /// problem dimension.
    #[error(
        "Subspace shape mismatch: the basis has {subspace_rows} rows but the iterate has {vector_rows} rows."
    )]
    SubspaceShapeMismatch {
        subspace_rows: usize,
        vector_rows: usize,
    },
}

// Manually implement PartialEq for the public error type.
// We compare the inner `SolverErrorKind`.
impl PartialEq for SolverError {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

// Unit tests to ensure error messages are formatted correctly.
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_mismatch_error_message() {
        let error = SolverError(SolverErrorKind::DimensionMismatch {
            operator_cols: 100,
            vector_rows: 99,
        });
        let expected_message =
            "Dimension mismatch: operator has 100 columns but vector has 99 rows.";
        assert_eq!(error.to_string(), expected_message);
    }

    #[test]
    fn test_subspace_shape_mismatch_error_message() {
        let error = SolverError(SolverErrorKind::SubspaceShapeMismatch {
            subspace_rows: 12,
            vector_rows: 10,
        });
        let expected_message =
            "Subspace shape mismatch: the basis has 12 rows but the iterate has 10 rows.";
        assert_eq!(error.to_string(), expected_message);
    }
}
