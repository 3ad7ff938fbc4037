//! Omnes function with the branch cut deformed along a curve.
//!
//! The deformed contour of the KT equations dips into the lower half plane
//! and returns to the real axis: any probe point below the roof spanned by
//! the leading knots and above the imaginary floor is reached by analytic
//! continuation through the cut, i.e. lies on the second Riemann sheet.

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::grid::Curve;
use crate::omnes::{second_sheet, Omnes};
use crate::ComplexFunction;

/// Extract the first `size` boundary points of `curve`.
pub fn first_points(curve: &dyn Curve, size: usize) -> Result<Vec<Complex64>> {
    let boundaries = curve.boundaries();
    if boundaries.len() < size {
        return Err(Error::InvalidArgument(format!(
            "tried to retrieve {size} elements, but curve has only {} boundary points",
            boundaries.len()
        )));
    }
    Ok(boundaries[..size].iter().map(|&x| curve.curve(x)).collect())
}

/// Determine if `mandelstam_s` is on the second sheet.
///
/// This is a rectangle test on the first four knots of the contour; it
/// matches the contour families provided in [`crate::piecewise`], whose first
/// four knots frame the excursion into the lower half plane.
pub fn on_second_sheet(points: &[Complex64], mandelstam_s: Complex64) -> bool {
    points[0].re < mandelstam_s.re
        && mandelstam_s.re < points[3].re
        && points[1].im < mandelstam_s.im
        && mandelstam_s.im < 0.0
}

/// An Omnes function with a cut along a deformed contour.
///
/// Contours with fewer than four boundary points (in particular the purely
/// real two-knot contour) are evaluated on the first sheet everywhere.
#[derive(Clone)]
pub struct CurvedOmnes {
    omnes: Omnes,
    amplitude: ComplexFunction,
    points: Vec<Complex64>,
}

impl std::fmt::Debug for CurvedOmnes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CurvedOmnes")
            .field("omnes", &self.omnes)
            .field("points", &self.points)
            .finish()
    }
}

impl CurvedOmnes {
    /// Wrap `omnes` such that its cut runs along `curve`.
    ///
    /// `amplitude` is the two-to-two scattering amplitude associated with the
    /// phase of `omnes`.
    pub fn new(omnes: Omnes, amplitude: ComplexFunction, curve: &dyn Curve) -> Self {
        let points = first_points(curve, 4).unwrap_or_default();
        Self {
            omnes,
            amplitude,
            points,
        }
    }

    /// Evaluate the Omnes function with deformed cut at `s`.
    pub fn eval(&self, s: Complex64) -> Result<Complex64> {
        if self.points.len() >= 4 && on_second_sheet(&self.points, s) {
            second_sheet(&self.omnes, |z| (self.amplitude)(z), s)
        } else {
            self.omnes.eval(s)
        }
    }

    /// The wrapped Omnes function with the usual right-hand cut.
    pub fn original(&self) -> &Omnes {
        &self.omnes
    }

    /// The amplitude associated with the phase of the Omnes function.
    pub fn amplitude(&self) -> &ComplexFunction {
        &self.amplitude
    }
}
