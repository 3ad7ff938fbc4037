//! # khuri-treiman: Khuri-Treiman equations in Rust
//!
//! Dispersion-relation machinery for the decay/scattering of an I=0, J=1,
//! P=C=-1 particle into three pions: the Omnes function of an arbitrary
//! phase (evaluable in the whole complex plane, including on the cut and on
//! the second Riemann sheet), piecewise complex integration contours, and
//! the solution of the Khuri-Treiman equations via the modified
//! Gasser-Rusetsky method, exposed as a basis of solutions evaluable at
//! arbitrary complex Mandelstam s.

use num_complex::Complex64;

pub mod cauchy;
pub mod chpt;
pub mod curved_omnes;
pub mod error;
pub mod gauss;
pub mod grid;
pub mod iam;
pub mod interpolate;
pub mod kernel;
pub mod mandelstam;
pub mod omnes;
pub mod phase_space;
pub mod piecewise;
pub mod quad;

/// A real-valued function of a real variable, shared by value.
pub type RealFunction = std::sync::Arc<dyn Fn(f64) -> f64 + Send + Sync>;

/// A complex-valued function of a complex variable, shared by value.
pub type ComplexFunction = std::sync::Arc<dyn Fn(Complex64) -> Complex64 + Send + Sync>;

// Re-export commonly used types and functions.
pub use cauchy::{c_integrate, c_integrate_along};
pub use curved_omnes::CurvedOmnes;
pub use error::{Error, Result};
pub use gauss::Rule;
pub use grid::{Curve, Grid, Point};
pub use interpolate::Method as InterpolationMethod;
pub use kernel::{make_basis, threshold, Basis, Method as SolverMethod};
pub use omnes::{second_sheet, Omnes};
pub use phase_space::{rho, sigma};
pub use piecewise::{Para, Piecewise};
pub use quad::{Cquad, Integrate, Qag, Settings};

// Re-export the complex scalar for convenience.
pub use num_complex::Complex64 as Complex;
