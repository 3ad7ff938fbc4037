//! Error types shared across the crate.
//!
//! The adaptive integration routines report failures in the same terms as the
//! classic QUADPACK-style status codes, while construction and evaluation of
//! curves, grids and interpolators report argument and domain violations.

use thiserror::Error;

/// The error type of this crate.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Evaluation outside the domain of definition of a function.
    #[error("domain error: {0}")]
    Domain(String),

    /// Inconsistent arguments passed to a constructor or method.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The integral is divergent or converges too slowly.
    #[error("integral is divergent or converges too slowly")]
    Divergent,

    /// The maximum number of subdivisions was exhausted.
    #[error("maximum number of subdivisions reached")]
    MaxSubdivisions,

    /// Roundoff error prevents the requested tolerance from being reached.
    #[error("cannot reach tolerance because of roundoff error")]
    Roundoff,

    /// Non-integrable behaviour of the integrand was detected.
    #[error("bad integrand behaviour found in the integration interval")]
    BadIntegrand,

    /// A workspace could not be allocated.
    #[error("allocation failed: {0}")]
    Allocation(String),

    /// An unrecognised solution method was selected.
    #[error("unknown method")]
    UnknownMethod,
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
