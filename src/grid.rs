//! Grid used in the solution of KT equations.
//!
//! Here and in the following, x usually refers to an integration variable in
//! the Mandelstam-s plane, while z is the cosine of the scattering angle.
//! Gauss-Legendre quadrature is employed in solving the integral equations:
//! the integrands are sampled on a grid in the (x, z) plane (x might be
//! complex), with sampling points and weights determined via the
//! Gauss-Legendre method.

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::gauss::Rule;

/// A (point, weight, derivative) triple produced by sampling a curve at a
/// Gauss-Legendre abscissa of a parameter interval.
pub type Sample<T> = (T, f64, T);

/// A curve in the complex plane.
pub trait Curve {
    /// Evaluate the curve at parameter `x`.
    ///
    /// # Panics
    /// Panics if `x` lies outside the parameter domain of the curve.
    fn curve(&self, x: f64) -> Complex64;

    /// Evaluate the derivative of the curve at parameter `x`.
    ///
    /// # Panics
    /// Panics if `x` lies outside the parameter domain of the curve.
    fn derivative(&self, x: f64) -> Complex64;

    /// Determine whether `s` hits the curve.
    ///
    /// If `s` lies on the curve, return the parameter values marking the
    /// beginning and the end of the segment that is hit.
    fn hits(&self, s: Complex64) -> Option<(f64, f64)>;

    /// The parameter values corresponding to the start of the curve, the
    /// points at which the pieces are glued together, and the end of the
    /// curve. For a curve connecting A and B in the complex plane,
    /// `curve(boundaries()[0]) == A` and `curve(boundaries()[1]) == B`.
    fn boundaries(&self) -> Vec<f64>;
}

/// Return (point, weight) pairs for Gauss-Legendre integration in the
/// interval [`start`, `end`].
pub fn generate_knots(start: f64, end: f64, points: usize) -> Vec<(f64, f64)> {
    let rule = Rule::new(points);
    (0..points).map(|i| rule.point(start, end, i)).collect()
}

/// Compute `curve` and `derivative` at Gauss-Legendre knots.
pub fn knots_along_curve<T, F1, F2>(
    start: f64,
    end: f64,
    points: usize,
    curve: F1,
    derivative: F2,
) -> Vec<Sample<T>>
where
    F1: Fn(f64) -> T,
    F2: Fn(f64) -> T,
{
    generate_knots(start, end, points)
        .into_iter()
        .map(|(point, weight)| (curve(point), weight, derivative(point)))
        .collect()
}

/// Compute `curve` and `derivative` at Gauss-Legendre knots for a piecewise
/// defined curve.
///
/// `boundaries` is the output of [`Curve::boundaries`]; `points` holds the
/// number of knots along the different segments of the curve.
pub fn knots_along_piecewise_curve<T, F1, F2>(
    boundaries: &[f64],
    points: &[usize],
    curve: F1,
    derivative: F2,
) -> Result<Vec<Sample<T>>>
where
    F1: Fn(f64) -> T,
    F2: Fn(f64) -> T,
{
    if boundaries.len() != points.len() + 1 {
        return Err(Error::InvalidArgument(
            "each segment requires a number of knots".into(),
        ));
    }
    let mut result = Vec::new();
    for (i, &count) in points.iter().enumerate() {
        result.extend(knots_along_curve(
            boundaries[i],
            boundaries[i + 1],
            count,
            &curve,
            &derivative,
        ));
    }
    Ok(result)
}

/// A point in the (x, z) plane.
#[derive(Debug, Clone, Copy)]
pub struct Point {
    pub x: Complex64,
    pub x_weight: f64,
    pub x_derivative: Complex64,
    pub z: f64,
    pub z_weight: f64,
}

/// A grid in the (x, z) plane.
///
/// The z-values are independent of the x-values, that is, for each x-value
/// the corresponding z-values are the same. The x-values are specified by an
/// arbitrary curve in the complex plane, while the z-values run along the
/// straight line from -1 to 1. The grid decorates a continuous [`Curve`]
/// with discrete Gauss-Legendre sampling.
#[derive(Debug, Clone)]
pub struct Grid<C> {
    curve: C,
    x_lower: f64,
    x_upper: f64,
    x_sizes: Vec<usize>,
    x_knots: Vec<Sample<Complex64>>,
    z_knots: Vec<(f64, f64)>,
}

const Z_LOWER: f64 = -1.0;
const Z_UPPER: f64 = 1.0;

impl<C: Curve> Grid<C> {
    /// Build a grid with `x_sizes[k]` knots along the k-th segment of
    /// `curve` and `z_size` knots along the z-line.
    pub fn new(curve: C, x_sizes: Vec<usize>, z_size: usize) -> Result<Self> {
        let boundaries = curve.boundaries();
        let x_knots = knots_along_piecewise_curve(
            &boundaries,
            &x_sizes,
            |x| curve.curve(x),
            |x| curve.derivative(x),
        )?;
        Ok(Self {
            x_lower: boundaries[0],
            x_upper: boundaries[boundaries.len() - 1],
            curve,
            x_sizes,
            x_knots,
            z_knots: generate_knots(Z_LOWER, Z_UPPER, z_size),
        })
    }

    /// Return the grid point at the corresponding position.
    pub fn point(&self, x_index: usize, z_index: usize) -> Point {
        let (x, x_weight, x_derivative) = self.x_knots[x_index];
        let (z, z_weight) = self.z_knots[z_index];
        Point {
            x,
            x_weight,
            x_derivative,
            z,
            z_weight,
        }
    }

    /// The parameter values at which the curve in the x-plane is sampled.
    pub fn x_parameter_values(&self) -> Vec<f64> {
        let identity = |x: f64| x;
        // The boundary layout was validated during construction.
        knots_along_piecewise_curve(&self.curve.boundaries(), &self.x_sizes, identity, identity)
            .map(|knots| knots.into_iter().map(|(point, _, _)| point).collect())
            .unwrap_or_default()
    }

    /// The x-value corresponding to `x_index`.
    pub fn x(&self, x_index: usize) -> Complex64 {
        self.x_knots[x_index].0
    }

    /// The curve derivative corresponding to `x_index`.
    pub fn x_derivative(&self, x_index: usize) -> Complex64 {
        self.x_knots[x_index].2
    }

    /// The z-value corresponding to `z_index`.
    pub fn z(&self, z_index: usize) -> f64 {
        self.z_knots[z_index].0
    }

    pub fn x_size(&self) -> usize {
        self.x_knots.len()
    }

    pub fn z_size(&self) -> usize {
        self.z_knots.len()
    }

    /// The parameter corresponding to the beginning of the curve.
    pub fn x_parameter_lower(&self) -> f64 {
        self.x_lower
    }

    /// The parameter corresponding to the end of the curve.
    pub fn x_parameter_upper(&self) -> f64 {
        self.x_upper
    }
}

impl<C: Curve> Curve for Grid<C> {
    fn curve(&self, x: f64) -> Complex64 {
        self.curve.curve(x)
    }

    fn derivative(&self, x: f64) -> Complex64 {
        self.curve.derivative(x)
    }

    fn hits(&self, s: Complex64) -> Option<(f64, f64)> {
        self.curve.hits(s)
    }

    fn boundaries(&self) -> Vec<f64> {
        self.curve.boundaries()
    }
}
