//! Piecewise parameterised paths in the complex plane, used as deformed
//! integration contours for the KT equations.

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::grid::Curve;
use crate::mandelstam::{s_greater, Critical};

/// The available parametrisations of a single segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Para {
    Linear,
    Quadratic,
}

/// Tolerance below which two knots count as coincident and below which a
/// probe point counts as lying on a segment.
const MINIMAL_DISTANCE: f64 = 1e-10;

/// Determine whether `x` lies on the connecting line of `a` and `b` in
/// between `a` and `b`.
fn in_between(x: Complex64, a: Complex64, b: Complex64) -> bool {
    let difference = (x - a).norm() + (x - b).norm() - (a - b).norm();
    difference.abs() < MINIMAL_DISTANCE
}

/// A piecewise path in the complex plane.
///
/// The path connects the knots in order; segment k spans the parameter
/// interval [k, k+1].
#[derive(Debug, Clone)]
pub struct Piecewise {
    parametrisations: Vec<Para>,
    /// Per segment: (delta to the next knot, offset).
    pieces: Vec<(Complex64, Complex64)>,
    /// Per segment: the adjacent pair of knots.
    adjacent: Vec<(Complex64, Complex64)>,
}

impl Piecewise {
    /// Create a path connecting `knots` with the given per-segment
    /// parametrisations.
    ///
    /// Each curve segment needs one parametrisation, i.e.
    /// `parametrisations.len() + 1 == knots.len()`, and consecutive knots
    /// must be distinct.
    pub fn new(knots: &[Complex64], parametrisations: &[Para]) -> Result<Self> {
        if parametrisations.len() + 1 != knots.len() {
            return Err(Error::InvalidArgument(
                "each curve segment needs one parametrisation".into(),
            ));
        }
        if knots
            .windows(2)
            .any(|w| (w[1] - w[0]).norm() <= MINIMAL_DISTANCE)
        {
            return Err(Error::InvalidArgument(
                "consecutive knots need to be distinct".into(),
            ));
        }

        let pieces = knots
            .windows(2)
            .map(|w| (w[1] - w[0], w[0]))
            .collect();
        let adjacent = knots.windows(2).map(|w| (w[0], w[1])).collect();

        Ok(Self {
            parametrisations: parametrisations.to_vec(),
            pieces,
            adjacent,
        })
    }

    /// A vector of `size` linear parametrisations.
    pub fn all_linear(size: usize) -> Vec<Para> {
        vec![Para::Linear; size]
    }

    /// Linear curve along the real axis from `threshold` to `cut`.
    pub fn real(threshold: f64, cut: f64) -> Result<Self> {
        Self::new(
            &[threshold.into(), cut.into()],
            &Self::all_linear(1),
        )
    }

    /// The six-knot decay contour described by Gasser and Rusetsky,
    /// applicable to virtualities above the three-pion threshold.
    pub fn vector_decay(pion_mass: f64, virtuality: f64, cut: f64) -> Result<Self> {
        let m2 = pion_mass * pion_mass;
        let a = virtuality - 2.5 * m2;
        let b = -7.0 * m2;

        let knots = [
            Complex64::from(4.0 * m2),
            Complex64::new(5.0 * m2, b),
            Complex64::new(a, b),
            Complex64::from(a),
            Complex64::from(s_greater(pion_mass, virtuality)?),
            Complex64::from(cut),
        ];
        Self::new(&knots, &Self::all_linear(5))
    }

    /// A six-knot contour whose excursion into the lower half plane is sized
    /// from the critical region of the decay, applicable to arbitrary
    /// virtualities above the three-pion threshold and arbitrary pion masses.
    pub fn adaptive(pion_mass: f64, virtuality: f64, cut: f64) -> Result<Self> {
        let m2 = pion_mass * pion_mass;
        let critical = Critical::new(pion_mass, virtuality);
        let lower = -critical.imaginary_radius();
        let right = critical.right() + m2;

        let start = 4.0 * m2;
        let knots = [
            Complex64::from(start),
            Complex64::new(start, lower),
            Complex64::new(right, lower),
            Complex64::from(right),
            Complex64::from(s_greater(pion_mass, virtuality)?),
            Complex64::from(cut),
        ];
        Self::new(&knots, &Self::all_linear(5))
    }

    /// The parameter value corresponding to the start of the curve.
    pub fn lower(&self) -> f64 {
        0.0
    }

    /// The parameter value corresponding to the end of the curve.
    pub fn upper(&self) -> f64 {
        self.pieces.len() as f64
    }

    /// The number of the segment corresponding to the parameter value `x`.
    ///
    /// # Panics
    /// Panics if `x` lies outside [`lower`, `upper`].
    pub fn piece_index(&self, x: f64) -> usize {
        assert!(
            x >= self.lower() && x <= self.upper(),
            "tried to evaluate piecewise curve outside domain of definition"
        );
        // The class invariant assures that upper() >= 1.
        let index = x as usize;
        if index == self.pieces.len() {
            index - 1
        } else {
            index
        }
    }
}

impl Curve for Piecewise {
    fn curve(&self, x: f64) -> Complex64 {
        let k = self.piece_index(x);
        let (delta, offset) = self.pieces[k];
        let local = x - k as f64;
        match self.parametrisations[k] {
            Para::Linear => delta * local + offset,
            Para::Quadratic => delta * local * local + offset,
        }
    }

    fn derivative(&self, x: f64) -> Complex64 {
        let k = self.piece_index(x);
        let (delta, _) = self.pieces[k];
        match self.parametrisations[k] {
            Para::Linear => delta,
            Para::Quadratic => 2.0 * delta * (x - k as f64),
        }
    }

    fn hits(&self, s: Complex64) -> Option<(f64, f64)> {
        self.adjacent
            .iter()
            .position(|&(a, b)| in_between(s, a, b))
            .map(|k| (k as f64, k as f64 + 1.0))
    }

    fn boundaries(&self) -> Vec<f64> {
        (0..=self.pieces.len()).map(|k| k as f64).collect()
    }
}
