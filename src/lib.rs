//! Extreme eigenvalues of symmetric operators via Rayleigh-quotient
//! optimization.
//!
//! This crate computes the minimum and/or maximum eigenvalues (and the
//! corresponding eigenvectors) of a symmetric linear operator by iteratively
//! optimizing the Rayleigh quotient
//!
//! ρ(x) = xᵀAx / xᵀx
//!
//! over the unit sphere. Its extrema over unit vectors equal the extreme
//! eigenvalues of `A`, so the eigenproblem becomes a smooth optimization
//! problem that can be attacked with competing first-order methods. Several
//! such optimizers are provided, each encoding a different trade-off between
//! convergence speed and numerical robustness:
//!
//! - [`ConjugateGradient`]: conjugate directions with a closed-form β and a
//!   safeguarded backtracking line search. Fast and robust for the smallest
//!   eigenvalue.
//! - [`RmsProp`]: per-coordinate adaptive gradient scaling sharing the same
//!   line search.
//! - [`Nesterov`]: momentum acceleration with a restartable λ-sequence and a
//!   two-stage routine bracketing the whole spectrum.
//! - [`GradientDescent`]: fixed-step projected gradient tracking both extrema
//!   simultaneously with a shared, dynamically estimated step size.
//! - [`solvers`]: stateless functional variants (power iteration, gradient
//!   descent, Nesterov) with optional deflation for extracting successive
//!   eigenpairs.
//!
//! Built on the [`faer`] linear algebra framework, the optimizers operate on
//! matrix-free operators through the [`LinearOperator`] trait and never
//! require explicit matrix storage; implementations are provided for `faer`'s
//! dense and sparse matrix types.
//!
//! ## Example Usage
//!
//! The following example brackets the spectrum of a small diagonal matrix:
//! the conjugate-gradient solver descends to the smallest eigenvalue while
//! the accelerated solver ascends to the largest.
//!
//! ```rust
//! use faer::mat;
//! use rayleigh_extrema::{ConjugateGradient, Extremum, Nesterov};
//!
//! let a = mat![[2.0, 0.0], [0.0, 1.0]];
//! let x0 = mat![[1.0], [1.0]];
//!
//! // Smallest eigenvalue: minimize the Rayleigh quotient along conjugate
//! // directions until the line search finds no improving step.
//! let mut cg = ConjugateGradient::new(&a, x0.as_ref()).unwrap();
//! let result = cg.run(100);
//! assert!((result.rho() - 1.0).abs() < 1e-6);
//!
//! // Largest eigenvalue: accelerated ascent with a fixed learning rate.
//! let mut nesterov = Nesterov::new(&a, x0.as_ref(), 0.25, Extremum::Max).unwrap();
//! let result = nesterov.run(500);
//! assert!((result.rho() - 2.0).abs() < 1e-6);
//! assert!((result.x().norm_l2() - 1.0).abs() < 1e-6);
//! ```
//!
//! ## Termination
//!
//! Class-form optimizers report a tagged [`RunResult`]: `Converged` when the
//! algorithm's own stopping criterion fired (quotient-change tolerance, or
//! the line-search floor indicating a local optimum to numerical precision)
//! and `Exhausted` when the iteration budget ran out first. Non-convergence
//! is never an error; only malformed inputs (dimension or subspace shape
//! mismatches) are rejected, before the first iteration, as [`SolverError`].
//!
//! The functional variants in [`solvers`] and the always-`Exhausted`
//! [`GradientDescent`] deliberately do not distinguish convergence from
//! exhaustion; see their documentation.

// Declare the modules that form the crate's API structure.
pub mod algorithms;
pub mod error;
pub mod operator;
pub mod solvers;

// Re-export the main API for convenient access.
// These are the primary types that users should use.
pub use algorithms::conjugate_gradient::ConjugateGradient;
pub use algorithms::gradient_descent::GradientDescent;
pub use algorithms::nesterov::{ExtremeEigenvalues, Nesterov};
pub use algorithms::rmsprop::RmsProp;
pub use algorithms::{Extremum, RunResult, rayleigh_quotient};
pub use error::SolverError;
pub use operator::LinearOperator;
