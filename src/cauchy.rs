//! Facilities for dealing with complex-valued functions of a real parameter:
//! integration along curves in the complex plane and interpolation of
//! complex-valued samples.

use num_complex::Complex64;

use crate::error::Result;
use crate::interpolate::{self, Method};
use crate::quad::Integrate;

/// Integrate a complex-valued function of a real variable.
///
/// Real and imaginary part are integrated separately; the return value is the
/// integral together with the error of the real and of the imaginary part.
pub fn c_integrate<F>(
    f: F,
    lower: f64,
    upper: f64,
    integrate: &dyn Integrate,
) -> Result<(Complex64, f64, f64)>
where
    F: Fn(f64) -> Complex64,
{
    let (real, real_error) = integrate.integrate(&|x| f(x).re, lower, upper)?;
    let (imaginary, imaginary_error) = integrate.integrate(&|x| f(x).im, lower, upper)?;
    Ok((Complex64::new(real, imaginary), real_error, imaginary_error))
}

/// Integrate `f` along the curve `c` in the interval [`lower`, `upper`].
pub fn c_integrate_along<F, C, D>(
    f: F,
    curve: C,
    curve_derivative: D,
    lower: f64,
    upper: f64,
    integrate: &dyn Integrate,
) -> Result<(Complex64, f64, f64)>
where
    F: Fn(Complex64) -> Complex64,
    C: Fn(f64) -> Complex64,
    D: Fn(f64) -> Complex64,
{
    c_integrate(
        |x| f(curve(x)) * curve_derivative(x),
        lower,
        upper,
        integrate,
    )
}

/// Interpolate data provided as pairs (x_i, y_i), where y_i is complex.
///
/// Evaluation outside the interval [`front`, `back`] returns the boundary
/// values.
#[derive(Debug, Clone)]
pub struct Interpolate {
    real_part: interpolate::Interpolate,
    imaginary_part: interpolate::Interpolate,
}

impl Interpolate {
    /// The sizes of `x` and `y` need to be the same.
    pub fn new(x: &[f64], y: &[Complex64], method: Method) -> Result<Self> {
        let real: Vec<f64> = y.iter().map(|v| v.re).collect();
        let imaginary: Vec<f64> = y.iter().map(|v| v.im).collect();
        Ok(Self {
            real_part: interpolate::Interpolate::new(x.to_vec(), real, method, true)?,
            imaginary_part: interpolate::Interpolate::new(x.to_vec(), imaginary, method, true)?,
        })
    }

    /// Return the value of the (interpolated) data at point `x`.
    pub fn eval(&self, x: f64) -> Complex64 {
        Complex64::new(self.real_part.clamped(x), self.imaginary_part.clamped(x))
    }

    pub fn front(&self) -> f64 {
        self.real_part.front()
    }

    pub fn back(&self) -> f64 {
        self.real_part.back()
    }
}

/// Interpolate `f` along the curve `c` at the sorted parameter values `at`.
pub fn sample<F, C>(f: F, curve: C, at: &[f64], method: Method) -> Result<Interpolate>
where
    F: Fn(Complex64) -> Complex64,
    C: Fn(f64) -> Complex64,
{
    let y: Vec<Complex64> = at.iter().map(|&x| f(curve(x))).collect();
    Interpolate::new(at, &y, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quad::{Cquad, Settings};
    use num_complex::Complex64;

    fn integrator() -> Cquad {
        Cquad::new(Settings::default())
    }

    #[test]
    fn contour_integral_along_semicircle() {
        // f(z) = z^2 + 3 z^3 along the upper unit semicircle has the
        // antiderivative z^3/3 + 3 z^4/4, hence the value -2/3.
        let f = |z: Complex64| z * z + 3.0 * z * z * z;
        let curve = |theta: f64| Complex64::new(0.0, theta).exp();
        let derivative = |theta: f64| Complex64::i() * Complex64::new(0.0, theta).exp();
        let (value, _, _) = c_integrate_along(
            f,
            curve,
            derivative,
            0.0,
            std::f64::consts::PI,
            &integrator(),
        )
        .unwrap();
        assert!((value.re + 2.0 / 3.0).abs() < 1e-6);
        assert!(value.im.abs() < 1e-6);
    }

    #[test]
    fn full_period_of_exponential_vanishes() {
        let (value, _, _) = c_integrate(
            |theta| Complex64::new(0.0, theta).exp(),
            0.0,
            2.0 * std::f64::consts::PI,
            &integrator(),
        )
        .unwrap();
        assert!(value.norm() < 1e-6);
    }

    #[test]
    fn complex_interpolation_matches_samples() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y: Vec<Complex64> = x
            .iter()
            .map(|&v| Complex64::new(2.0 * v, -v))
            .collect();
        let interpolated = Interpolate::new(&x, &y, Method::Linear).unwrap();
        assert_eq!(interpolated.eval(1.5), Complex64::new(3.0, -1.5));
        // Boundary values extend beyond the interval.
        assert_eq!(interpolated.eval(-1.0), y[0]);
        assert_eq!(interpolated.eval(5.0), y[3]);
    }

    #[test]
    fn sampling_a_curve() {
        let at = [0.0, 0.5, 1.0, 1.5, 2.0];
        let interpolated = sample(
            |z| z * z,
            |x| Complex64::new(x, x),
            &at,
            Method::Linear,
        )
        .unwrap();
        // (x + ix)^2 = 2 i x^2
        assert!((interpolated.eval(1.0) - Complex64::new(0.0, 2.0)).norm() < 1e-12);
    }
}
