//! Mandelstam variables for a general four-particle process as well as
//! simplified computations for photon(-like) + pion -> pion + pion.
//!
//! Throughout, `virtuality` denotes the squared 'mass' of the I=0, J=1,
//! P=C=-1 particle; it may take arbitrary real values unless stated
//! otherwise.

use num_complex::Complex64;

use crate::error::{Error, Result};
use crate::phase_space::{rho, sigma};

/// The Kaellen function.
#[inline]
pub fn kaellen(a: Complex64, b: Complex64, c: Complex64) -> Complex64 {
    a * a + b * b + c * c - 2.0 * (a * b + a * c + b * c)
}

/// The Mandelstam variable t in the CMS.
///
/// `squared_1` ... `squared_4` are the squared masses of the four particles.
/// Signals a domain error at s = 0.
pub fn t(
    s: Complex64,
    z: f64,
    squared_1: f64,
    squared_2: f64,
    squared_3: f64,
    squared_4: f64,
) -> Result<Complex64> {
    if s == Complex64::new(0.0, 0.0) {
        return Err(Error::Domain("s==0 not allowed".into()));
    }
    let sum = squared_1 + squared_2 + squared_3 + squared_4;
    let delta_1 = squared_1 - squared_2;
    let delta_2 = squared_3 - squared_4;
    let kaellen_1 = kaellen(s, squared_1.into(), squared_2.into());
    let kaellen_2 = kaellen(s, squared_3.into(), squared_4.into());
    Ok((sum - s - (delta_1 * delta_2 - z * (kaellen_1 * kaellen_2).sqrt()) / s) / 2.0)
}

/// The Mandelstam variable u in the CMS.
pub fn u(
    s: Complex64,
    z: f64,
    squared_1: f64,
    squared_2: f64,
    squared_3: f64,
    squared_4: f64,
) -> Result<Complex64> {
    t(s, -z, squared_1, squared_2, squared_4, squared_3)
}

fn s_greater_value(pion_mass: f64, virtuality: f64) -> f64 {
    let temp = virtuality.sqrt() + pion_mass;
    temp * temp
}

/// The upper bound of the region in which t is complex for
/// photon + pion -> pion + pion. Signals a domain error for negative
/// virtualities.
pub fn s_greater(pion_mass: f64, virtuality: f64) -> Result<f64> {
    if virtuality < 0.0 {
        return Err(Error::Domain("virtuality needs to be non-negative".into()));
    }
    Ok(s_greater_value(pion_mass, virtuality))
}

/// The lower bound of the region in which t is complex for
/// photon + pion -> pion + pion.
pub fn s_smaller(pion_mass: f64, virtuality: f64) -> Result<f64> {
    if virtuality < 0.0 {
        return Err(Error::Domain("virtuality needs to be non-negative".into()));
    }
    Ok(s_greater_value(-pion_mass, virtuality))
}

pub fn a_photon_pion(s: Complex64, pion_mass: f64, virtuality: f64) -> Complex64 {
    (3.0 * pion_mass * pion_mass + virtuality - s) / 2.0
}

pub fn b_photon_pion(s: Complex64, pion_mass: f64, virtuality: f64) -> Complex64 {
    if virtuality <= 0.0 {
        return 0.5
            * rho(pion_mass, s)
            * kaellen(s, virtuality.into(), (pion_mass * pion_mass).into()).sqrt();
    }
    let sqrt_1 = (s - s_greater_value(pion_mass, virtuality)).sqrt();
    let sqrt_2 = (s - s_greater_value(-pion_mass, virtuality)).sqrt();
    0.5 * rho(pion_mass, s) * sqrt_1 * sqrt_2
}

/// The Mandelstam variable t for photon + pion -> pion + pion in the CMS.
#[inline]
pub fn t_photon_pion(s: Complex64, z: f64, pion_mass: f64, virtuality: f64) -> Complex64 {
    a_photon_pion(s, pion_mass, virtuality) + z * b_photon_pion(s, pion_mass, virtuality)
}

/// `t_photon_pion` evaluated at z = -1.
#[inline]
pub fn t_photon_pion_min(s: Complex64, pion_mass: f64, virtuality: f64) -> Complex64 {
    t_photon_pion(s, -1.0, pion_mass, virtuality)
}

/// `t_photon_pion` evaluated at z = 1.
#[inline]
pub fn t_photon_pion_max(s: Complex64, pion_mass: f64, virtuality: f64) -> Complex64 {
    t_photon_pion(s, 1.0, pion_mass, virtuality)
}

/// The characteristics of the singular region where Mandelstam t hits the
/// branch point at the two-pion threshold.
///
/// The region is contained in a rectangle in the complex plane whose left
/// boundary is a vertical line at `left`, the right one a vertical line at
/// `right`, the upper/lower one a horizontal line at +/- `imaginary_radius`.
#[derive(Debug, Clone, Copy)]
pub struct Critical {
    pion_mass: f64,
    virtuality: f64,
}

impl Critical {
    pub const fn new(pion_mass: f64, virtuality: f64) -> Self {
        Self {
            pion_mass,
            virtuality,
        }
    }

    /// An upper bound for the maximal imaginary value of the region.
    pub fn imaginary_radius(&self) -> f64 {
        (self.virtuality - 8.0 * self.pion_mass * self.pion_mass).abs() / 3.0
    }

    pub fn left(&self) -> f64 {
        0.5 * (self.virtuality - self.pion_mass * self.pion_mass)
    }

    pub fn right(&self) -> f64 {
        self.virtuality - 5.0 * self.pion_mass * self.pion_mass
    }
}

/// The boundary of the region in the t-plane where Mandelstam t becomes
/// complex for photon + pion -> pion + pion, parameterised by arc-like
/// parameter x in [0, 4 unit].
///
/// The lower half (x <= 2 unit) traces t(s, z=-1) as s runs from the two-pion
/// threshold up to `s_greater`; the upper half is the Schwartz reflection.
#[derive(Debug, Clone, Copy)]
pub struct Egg {
    pion_mass: f64,
    virtuality: f64,
    s_greater: f64,
    s_smaller: f64,
    unit: f64,
}

impl Egg {
    pub fn new(pion_mass: f64, virtuality: f64) -> Result<Self> {
        let greater = s_greater(pion_mass, virtuality)?;
        let smaller = s_smaller(pion_mass, virtuality)?;
        let unit = std::f64::consts::SQRT_2 * (greater - 4.0 * pion_mass * pion_mass).sqrt();
        Ok(Self {
            pion_mass,
            virtuality,
            s_greater: greater,
            s_smaller: smaller,
            unit,
        })
    }

    /// Parameter value at which the curve switches from the lower to the
    /// upper half.
    pub fn change(&self) -> f64 {
        2.0 * self.unit
    }

    fn inside_region(&self, x: f64) -> Result<()> {
        if x < 0.0 || 2.0 * self.unit < x {
            return Err(Error::Domain("egg is not defined in this region".into()));
        }
        Ok(())
    }

    fn change_1(&self, x: f64) -> f64 {
        4.0 * self.pion_mass * self.pion_mass + x * x / 4.0
    }

    fn change_2(&self, x: f64) -> f64 {
        let temp = 2.0 * self.unit - x;
        self.s_greater - temp * temp / 4.0
    }

    fn lower_segment(&self, x: f64) -> Result<Complex64> {
        self.inside_region(x)?;
        let y = if x <= self.unit {
            self.change_1(x)
        } else {
            self.change_2(x)
        };
        Ok(t_photon_pion_min(y.into(), self.pion_mass, self.virtuality))
    }

    fn upper_segment(&self, x: f64) -> Result<Complex64> {
        Ok(self.lower_segment(4.0 * self.unit - x)?.conj())
    }

    /// Evaluate the boundary curve at parameter `x`.
    pub fn eval(&self, x: f64) -> Result<Complex64> {
        if x <= self.change() {
            self.lower_segment(x)
        } else {
            self.upper_segment(x)
        }
    }

    fn first_half(&self, x: f64) -> Complex64 {
        let y = self.change_1(x);
        let sig = sigma(self.pion_mass, y.into()).re;
        let sq = ((y - self.s_smaller) * (self.s_greater - y)).sqrt();
        let m2 = self.pion_mass * self.pion_mass;
        let real = -x / 4.0;
        let imag = m2 / (y * y) * sq * y.sqrt()
            + x / 8.0 * sig * (self.s_greater + self.s_smaller - 2.0 * y) / sq;
        Complex64::new(real, -imag)
    }

    fn second_half(&self, x: f64) -> Complex64 {
        let y = self.change_2(x);
        let sig = sigma(self.pion_mass, y.into()).re;
        let sq = (y - self.s_smaller).sqrt();
        let shift = x / 2.0 - self.unit;
        let m2 = self.pion_mass * self.pion_mass;
        let real = shift / 2.0;
        let imag = -shift * m2 / (y * y)
            * sq
            * (y * (self.s_greater - y) / (y - 4.0 * m2)).sqrt()
            + sig / 4.0 * (self.s_greater + self.s_smaller - 2.0 * y) / sq;
        Complex64::new(real, -imag)
    }

    fn lower_derivative(&self, x: f64) -> Result<Complex64> {
        self.inside_region(x)?;
        if x <= self.unit {
            Ok(self.first_half(x))
        } else {
            Ok(self.second_half(x))
        }
    }

    fn upper_derivative(&self, x: f64) -> Result<Complex64> {
        Ok(-self.lower_derivative(4.0 * self.unit - x)?.conj())
    }

    /// Evaluate the derivative of the boundary curve at parameter `x`.
    pub fn derivative(&self, x: f64) -> Result<Complex64> {
        if x <= self.change() {
            self.lower_derivative(x)
        } else {
            self.upper_derivative(x)
        }
    }

    /// The parameter on the lower half corresponding to Mandelstam `s`.
    pub fn lower(&self, s: f64) -> Result<f64> {
        let threshold = 4.0 * self.pion_mass * self.pion_mass;
        if s < threshold || self.s_greater < s {
            return Err(Error::Domain("egg is not defined in this region".into()));
        }
        let boundary = 0.5 * (self.s_greater + threshold);
        if s < boundary {
            Ok(2.0 * (s - threshold).sqrt())
        } else {
            Ok(2.0 * (self.unit - (self.s_greater - s).sqrt()))
        }
    }

    /// The parameter on the upper half corresponding to Mandelstam `s`.
    pub fn upper(&self, s: f64) -> Result<f64> {
        Ok(4.0 * self.unit - self.lower(s)?)
    }
}
