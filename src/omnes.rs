//! The Omnes function of an arbitrary phase.
//!
//! Each instance of [`Omnes`] provides the Omnes function for one specific
//! phase. The function is evaluable in the whole complex plane, including on
//! the branch cut (via a Cauchy principal value prescription) and close to
//! the threshold branch point (via an averaging prescription). The analytic
//! continuation to the second Riemann sheet is provided by [`second_sheet`].

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::cauchy;
use crate::error::Result;
use crate::phase_space::rho;
use crate::quad::{Cquad, Integrate, Settings};
use crate::RealFunction;

/// The Omnes function for arbitrary phases and thresholds.
///
/// The instance owns its integration workspace; cloning an `Omnes` clones the
/// workspace, so clones may be evaluated independently.
#[derive(Clone)]
pub struct Omnes {
    /// The phase below `cut`.
    phase_below: RealFunction,
    constant: f64,
    threshold: f64,
    cut: f64,
    minimal_distance: f64,
    integrate: Cquad,
    derivative: f64,
}

impl std::fmt::Debug for Omnes {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Omnes")
            .field("constant", &self.constant)
            .field("threshold", &self.threshold)
            .field("cut", &self.cut)
            .field("minimal_distance", &self.minimal_distance)
            .finish()
    }
}

impl Omnes {
    /// Create the Omnes function of `phase`, with the branch cut starting at
    /// `threshold` and extending to infinity.
    ///
    /// `minimal_distance` is half the width of a band around the cut: for
    /// arguments in this band, a different prescription is used for the
    /// evaluation to take care of the singularity in the dispersive integral.
    pub fn new(
        phase: RealFunction,
        threshold: f64,
        minimal_distance: f64,
        config: Settings,
    ) -> Result<Self> {
        // The value of `constant` is irrelevant if `cut` is infinite.
        Self::with_cut(phase, 0.0, threshold, f64::INFINITY, minimal_distance, config)
    }

    /// Create the Omnes function of a phase equal to `phase` on
    /// [`threshold`, `cut`] and to `constant` along the real line above
    /// `cut`.
    pub fn with_cut(
        phase: RealFunction,
        constant: f64,
        threshold: f64,
        cut: f64,
        minimal_distance: f64,
        config: Settings,
    ) -> Result<Self> {
        let integrate = Cquad::new(config);
        let derivative = derivative_0(&phase, threshold, cut, constant, &integrate)?;
        Ok(Self {
            phase_below: phase,
            constant,
            threshold,
            cut,
            minimal_distance,
            integrate,
            derivative,
        })
    }

    /// Evaluate the Omnes function at `s`.
    pub fn eval(&self, s: Complex64) -> Result<Complex64> {
        // Apply the Schwartz reflection principle.
        if s.im < 0.0 {
            Ok(self.upper(s.conj())?.conj())
        } else {
            self.upper(s)
        }
    }

    /// The derivative of the Omnes function at the origin.
    pub fn derivative_at_zero(&self) -> f64 {
        self.derivative
    }

    /// The start of the branch cut.
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    // Evaluate the Omnes function in the upper half of the complex plane.
    fn upper(&self, s: Complex64) -> Result<Complex64> {
        if self.hits_threshold(s) {
            self.threshold_prescription()
        } else if self.hits_cut(s) {
            self.cut_prescription(s.re)
        } else {
            self.ordinary_prescription(s)
        }
    }

    fn hits_threshold(&self, s: Complex64) -> bool {
        (s - self.threshold).norm() <= self.minimal_distance
    }

    fn hits_cut(&self, s: Complex64) -> bool {
        s.re >= self.threshold && s.im.abs() <= self.minimal_distance
    }

    // Average the on-cut and the ordinary prescription across the threshold.
    fn threshold_prescription(&self) -> Result<Complex64> {
        let above = self.cut_prescription(self.threshold + self.minimal_distance)?;
        let below = self
            .ordinary_prescription(Complex64::from(self.threshold - self.minimal_distance))?;
        Ok((above + below) / 2.0)
    }

    // Calculate the Omnes function if `s` is not close to the branch cut.
    fn ordinary_prescription(&self, s: Complex64) -> Result<Complex64> {
        let above_cut = (1.0 - s / self.cut).ln();
        let (integral, _, _) = cauchy::c_integrate(
            |z| (self.phase_below)(z) / (z * (z - s)),
            self.threshold,
            self.cut,
            &self.integrate,
        )?;
        Ok(((s * integral - self.constant * above_cut) / PI).exp())
    }

    // Calculate the Omnes function if `s` is close to the branch cut.
    fn cut_prescription(&self, s: f64) -> Result<Complex64> {
        Ok(self.abs_cut(s)? * Complex64::new(0.0, self.phase(s)).exp())
    }

    // The phase of the Omnes function along the branch cut.
    fn phase(&self, s: f64) -> f64 {
        if s < self.cut {
            (self.phase_below)(s)
        } else {
            self.constant
        }
    }

    // The absolute value of the Omnes function along the branch cut.
    fn abs_cut(&self, s: f64) -> Result<f64> {
        let phase_at_s = self.phase(s);
        let (integral, _) = self.integrate.integrate(
            &|z| ((self.phase_below)(z) - phase_at_s) / (z * (z - s)),
            self.threshold,
            self.cut,
        )?;
        let above = if s < self.cut {
            self.constant - phase_at_s
        } else {
            0.0
        };
        Ok(((s * integral + above * abs_helper(s, self.cut)
            + phase_at_s * abs_helper(s, self.threshold))
            / PI)
            .exp())
    }
}

// Simplify the calculation of the absolute value of the Omnes function along
// the cut.
fn abs_helper(s: f64, value: f64) -> f64 {
    let temp = 1.0 - s / value;
    (1.0 / temp).abs().ln()
}

// The derivative of the Omnes function at s=0.
fn derivative_0(
    phase: &RealFunction,
    threshold: f64,
    cut: f64,
    constant: f64,
    integrate: &Cquad,
) -> Result<f64> {
    let (first, _) = integrate.integrate(&|x| phase(x) / (x * x), threshold, cut)?;
    let second = constant / cut;
    Ok((first + second) / PI)
}

/// The Omnes function on the second Riemann sheet.
///
/// `amplitude` is the two-to-two scattering amplitude associated with the
/// phase of `omnes`; the particle mass is inferred from the threshold.
pub fn second_sheet<F>(omnes: &Omnes, amplitude: F, s: Complex64) -> Result<Complex64>
where
    F: Fn(Complex64) -> Complex64,
{
    let mass = omnes.threshold().sqrt() / 2.0;
    let denominator = 1.0 + 2.0 * Complex64::i() * rho(mass, s) * amplitude(s);
    Ok(omnes.eval(s)? / denominator)
}

#[cfg(test)]
#[path = "omnes_tests.rs"]
mod tests;
