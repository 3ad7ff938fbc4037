//! Solve KT equations via the modified Gasser-Rusetsky method.
//!
//! Means are provided to solve KT equations for the scattering/decay
//! involving three pions with arbitrary mass and one particle with I=0, J=1,
//! P=C=-1 and arbitrary mass. The equations can be solved both iteratively
//! and via direct matrix inversion. The only facilities to be used directly
//! are [`Basis`] and [`make_basis`]; everything else may be considered an
//! implementation detail.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};
use num_complex::Complex64;

use crate::cauchy;
use crate::curved_omnes::CurvedOmnes;
use crate::error::{Error, Result};
use crate::grid::{Curve, Grid};
use crate::interpolate::Method as InterpolationMethod;
use crate::mandelstam::t_photon_pion;
use crate::omnes::Omnes;
use crate::phase_space::sigma;
use crate::quad::{Cquad, Settings};
use crate::ComplexFunction;

/// Dense integration-kernel matrix.
pub type Matrix = DMatrix<Complex64>;
/// Discretised solution vector.
pub type Vector = DVector<Complex64>;

/// Return the two-pion threshold.
#[inline]
pub fn threshold(pion_mass: f64) -> f64 {
    4.0 * pion_mass * pion_mass
}

/// Return true if `s` is within `minimal_distance` of the two-pion threshold.
#[inline]
pub fn hits_threshold(pion_mass: f64, s: Complex64, minimal_distance: f64) -> bool {
    (s - threshold(pion_mass)).norm() < minimal_distance
}

/// Convert from two-dimensional to one-dimensional indices.
#[inline]
pub const fn index(x_index: usize, z_index: usize, z_size: usize) -> usize {
    x_index * z_size + z_index
}

/// Compute the angular contribution at a given point of the grid.
#[inline]
fn angular<C: Curve>(g: &Grid<C>, z_index: usize) -> f64 {
    let z = g.z(z_index);
    1.0 - z * z
}

/// Evaluate Mandelstam t at a given point of a grid.
fn t_at<C: Curve>(
    g: &Grid<C>,
    x_index: usize,
    z_index: usize,
    pion_mass: f64,
    virtuality: f64,
) -> Complex64 {
    let point = g.point(x_index, z_index);
    t_photon_pion(point.x, point.z, pion_mass, virtuality)
}

/// Sample `f` at the values of Mandelstam t on the grid `g`.
fn sample_on_grid<C, F>(f: F, g: &Grid<C>, pion_mass: f64, virtuality: f64) -> Result<Vector>
where
    C: Curve,
    F: Fn(Complex64) -> Result<Complex64>,
{
    let n_z = g.z_size();
    let mut result = Vector::zeros(g.x_size() * n_z);
    for i in 0..g.x_size() {
        for a in 0..n_z {
            result[index(i, a, n_z)] = f(t_at(g, i, a, pion_mass, virtuality))?;
        }
    }
    Ok(result)
}

/// Return the squared maximal entrywise difference of `a` and `b`.
fn max_distance(a: &Vector, b: &Vector) -> f64 {
    (a - b).iter().map(|c| c.norm_sqr()).fold(0.0, f64::max)
}

/// Generate the x_j dependent terms needed in the integration kernel.
fn generate_x_dependent<C: Curve>(
    omnes: &Omnes,
    pi_pi: &ComplexFunction,
    g: &Grid<C>,
    pion_mass: f64,
    subtractions: usize,
) -> Result<Vec<Complex64>> {
    (0..g.x_size())
        .map(|j| {
            let x = g.x(j);
            Ok(pi_pi(x) / omnes.eval(x)? * sigma(pion_mass, x) / x.powi(subtractions as i32))
        })
        .collect()
}

/// Compute the integration kernel.
pub fn generate_kernel<C: Curve>(
    omnes: &CurvedOmnes,
    pi_pi: &ComplexFunction,
    g: &Grid<C>,
    pion_mass: f64,
    virtuality: f64,
    subtractions: usize,
) -> Result<Matrix> {
    let n_x = g.x_size();
    let n_z = g.z_size();
    let n = n_x * n_z;

    let x_dependent = generate_x_dependent(omnes.original(), pi_pi, g, pion_mass, subtractions)?;

    // t(x_i, z_a) dependent terms.
    let mut t = vec![Complex64::default(); n];
    let mut t_dependent = vec![Complex64::default(); n];
    for i in 0..n_x {
        for a in 0..n_z {
            let row = index(i, a, n_z);
            t[row] = t_at(g, i, a, pion_mass, virtuality);
            t_dependent[row] = omnes.eval(t[row])? * t[row].powi(subtractions as i32);
        }
    }

    let coefficient = 1.5 / PI;
    let mut result = Matrix::zeros(n, n);
    for i in 0..n_x {
        for a in 0..n_z {
            let row = index(i, a, n_z);
            let t_term = t_dependent[row];
            for j in 0..n_x {
                let x_term = x_dependent[j];
                // The Cauchy denominator is the only term coupling rows and
                // columns.
                let cauchy = g.x(j) - t[row];
                for b in 0..n_z {
                    let point = g.point(j, b);
                    let weight = point.x_weight * point.z_weight;
                    result[(row, index(j, b, n_z))] = coefficient
                        * x_term
                        * t_term
                        * weight
                        * angular(g, b)
                        * point.x_derivative
                        / cauchy;
                }
            }
        }
    }

    Ok(result)
}

/// Solve the KT equations iteratively.
///
/// The Neumann iteration terminates once the squared maximal entrywise
/// change falls below `accuracy`.
pub fn iteration(kernel: &Matrix, start: &Vector, accuracy: f64) -> Vector {
    let mut previous = start.clone();
    let mut next = start + kernel * start;
    while max_distance(&previous, &next) > accuracy {
        previous = next;
        next = start + kernel * &previous;
    }
    next
}

/// Solve the KT equations via direct matrix inversion, i.e. solve
/// (1 - K) x = start with a partial-pivot LU decomposition.
pub fn inverse(kernel: &Matrix, start: &Vector) -> Result<Vector> {
    let n = kernel.nrows();
    let identity = Matrix::identity(n, n);
    (identity - kernel)
        .lu()
        .solve(start)
        .ok_or_else(|| Error::InvalidArgument("kernel matrix yields a singular system".into()))
}

/// Default termination accuracy of [`iteration`].
pub const DEFAULT_ACCURACY: f64 = 1e-8;

/// The available solution methods.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Method {
    /// Neumann iteration with the given accuracy
    /// ([`DEFAULT_ACCURACY`] if absent).
    Iteration(Option<f64>),
    /// Direct solve via LU decomposition.
    Inverse,
}

impl Method {
    /// Resolve an integer selector as used by foreign-function callers.
    pub fn from_selector(selector: u32) -> Result<Self> {
        match selector {
            0 => Ok(Method::Iteration(None)),
            1 => Ok(Method::Inverse),
            _ => Err(Error::UnknownMethod),
        }
    }
}

/// Compute the set of discretised basis vectors for a given KT problem.
///
/// # Arguments
/// * `omnes` - the Omnes function with deformed cut
/// * `pi_pi` - the pion-pion scattering amplitude
/// * `subtractions` - the number of subtractions
/// * `g` - the grid on which the integrands of the KT equations are sampled
/// * `pion_mass` - the pion mass
/// * `virtuality` - the squared 'mass' of the I=0, J=1, P=C=-1 particle;
///   zero and negative values are allowed, too
/// * `method` - whether the equations are solved iteratively or via direct
///   matrix inversion
pub fn basis<C: Curve>(
    omnes: &CurvedOmnes,
    pi_pi: &ComplexFunction,
    subtractions: usize,
    g: &Grid<C>,
    pion_mass: f64,
    virtuality: f64,
    method: Method,
) -> Result<Vec<Vector>> {
    let kernel = generate_kernel(omnes, pi_pi, g, pion_mass, virtuality, subtractions)?;
    let omnes_start = sample_on_grid(|t| omnes.eval(t), g, pion_mass, virtuality)?;

    let mut result = Vec::with_capacity(subtractions);
    for i in 0..subtractions {
        let polynomial = sample_on_grid(|t| Ok(t.powi(i as i32)), g, pion_mass, virtuality)?;
        let start = polynomial.component_mul(&omnes_start);
        let solution = match method {
            Method::Iteration(accuracy) => {
                iteration(&kernel, &start, accuracy.unwrap_or(DEFAULT_ACCURACY))
            }
            Method::Inverse => inverse(&kernel, &start)?,
        };
        result.push(solution);
    }
    Ok(result)
}

/// Return the Mandelstam-s independent part of the integrand needed in the
/// evaluation of a basis function, sampled along the x-knots.
fn discrete_basis_integrand<C: Curve>(
    omnes: &Omnes,
    pi_pi: &ComplexFunction,
    basis: &Vector,
    g: &Grid<C>,
    pion_mass: f64,
) -> Result<Vec<Complex64>> {
    let n_z = g.z_size();
    (0..g.x_size())
        .map(|j| {
            let mut sum = Complex64::default();
            for b in 0..n_z {
                sum += angular(g, b) * basis[index(j, b, n_z)] * g.point(j, b).z_weight;
            }
            let x = g.x(j);
            Ok(sum * pi_pi(x) * sigma(pion_mass, x) / omnes.eval(x)?)
        })
        .collect()
}

/// Interpolate the Mandelstam-s independent part of the integrand in the
/// curve parameter.
fn basis_integrand<C: Curve>(
    omnes: &Omnes,
    pi_pi: &ComplexFunction,
    basis: &Vector,
    g: &Grid<C>,
    pion_mass: f64,
) -> Result<cauchy::Interpolate> {
    let discrete = discrete_basis_integrand(omnes, pi_pi, basis, g, pion_mass)?;
    cauchy::Interpolate::new(
        &g.x_parameter_values(),
        &discrete,
        InterpolationMethod::Linear,
    )
}

fn basis_integrands<C: Curve>(
    omnes: &Omnes,
    pi_pi: &ComplexFunction,
    basis: &[Vector],
    g: &Grid<C>,
    pion_mass: f64,
) -> Result<Vec<cauchy::Interpolate>> {
    basis
        .iter()
        .map(|vector| basis_integrand(omnes, pi_pi, vector, g, pion_mass))
        .collect()
}

/// Compute the dispersive integral with integrand `f` assuming that `s` hits
/// the integration contour, i.e. via Cauchy principal value.
///
/// This works only for linearly parametrised linear curve segments; the
/// contour families of [`crate::piecewise`] satisfy this.
fn cut_prescription<C, F>(
    grid: &Grid<C>,
    lower: f64,
    upper: f64,
    s: f64,
    f: F,
    subtractions: usize,
    integrate: &Cquad,
) -> Result<Complex64>
where
    C: Curve,
    F: Fn(f64) -> Complex64,
{
    let start = grid.curve(lower);
    let end = grid.curve(upper);
    let singularity = ((s - start) / (end - start)).re + lower;
    let f_at_s = f(singularity);
    let log_term = ((1.0 - s / end) / (s / start - 1.0)).ln();
    let sub = subtractions as i32 - 1;
    let s_complex = Complex64::from(s);

    let h = |x: f64| {
        let cx = grid.curve(x);
        (f(x) / cx.powi(sub) - f_at_s / s_complex.powi(sub)) / cx / (x - singularity)
    };
    let (integral, _, _) = cauchy::c_integrate(h, lower, upper, integrate)?;

    Ok(s_complex.powi(subtractions as i32) * integral
        + f_at_s * (Complex64::i() * PI + log_term))
}

/// Compute the dispersive integral with integrand `f` assuming that `s` does
/// not hit the integration contour.
fn ordinary_prescription<C, F>(
    grid: &Grid<C>,
    lower: f64,
    upper: f64,
    s: Complex64,
    f: F,
    subtractions: usize,
    integrate: &Cquad,
) -> Result<Complex64>
where
    C: Curve,
    F: Fn(f64) -> Complex64,
{
    let h = |x: f64| {
        let cx = grid.curve(x);
        let dx = grid.derivative(x);
        f(x) / cx.powi(subtractions as i32) / (cx - s) * dx
    };
    let (integral, _, _) = cauchy::c_integrate(h, lower, upper, integrate)?;
    Ok(s.powi(subtractions as i32) * integral)
}

/// Check whether `a` and `b` are equal up to `tolerance`.
fn tolerant_equal(a: f64, b: f64) -> bool {
    const TOLERANCE: f64 = 1e-16;
    a - b < TOLERANCE && b - a < TOLERANCE
}

/// Return all pairs of non-equal successive values, excluding `omit`.
fn segments_without(points: &[f64], omit: (f64, f64)) -> Vec<(f64, f64)> {
    points
        .windows(2)
        .map(|w| (w[0], w[1]))
        .filter(|&(a, b)| !tolerant_equal(a, b))
        .filter(|&pair| pair != omit)
        .collect()
}

/// The basis of the solution space to a KT equation.
///
/// Each basis function is the Omnes function times the sum of a subtraction
/// monomial and a dispersive integral over the deformed contour; the
/// discretised solution enters the integrand through a linear interpolation
/// along the curve parameter.
pub struct Basis<C> {
    integrate: Cquad,
    curved_omnes: CurvedOmnes,
    basis: Vec<Vector>,
    subtractions: usize,
    pion_mass: f64,
    minimal_distance: f64,
    grid: Grid<C>,
    integrands: Vec<cauchy::Interpolate>,
}

impl<C: Curve> Basis<C> {
    /// Generate the basis of the solution space to a KT problem.
    ///
    /// # Arguments
    /// * `omnes` - the Omnes function of the input phase
    /// * `pi_pi` - the pion-pion scattering amplitude
    /// * `subtractions` - the number of subtractions, at least 1
    /// * `grid` - the grid on which the integrands of the KT equations are
    ///   sampled
    /// * `pion_mass` - the pion mass
    /// * `virtuality` - the squared 'mass' of the I=0, J=1, P=C=-1 particle
    /// * `method` - the solution method
    /// * `config` - the settings for the integration routine used in the
    ///   evaluation of the basis functions
    /// * `minimal_distance` - evaluation points closer to the two-pion
    ///   threshold than this are handled by an averaging prescription
    pub fn new(
        omnes: Omnes,
        pi_pi: ComplexFunction,
        subtractions: usize,
        grid: Grid<C>,
        pion_mass: f64,
        virtuality: f64,
        method: Method,
        config: Settings,
        minimal_distance: f64,
    ) -> Result<Self> {
        if subtractions == 0 {
            return Err(Error::InvalidArgument(
                "at least one subtraction is required".into(),
            ));
        }
        let curved_omnes = CurvedOmnes::new(omnes, pi_pi.clone(), &grid);
        let basis = basis(
            &curved_omnes,
            &pi_pi,
            subtractions,
            &grid,
            pion_mass,
            virtuality,
            method,
        )?;
        let integrands =
            basis_integrands(curved_omnes.original(), &pi_pi, &basis, &grid, pion_mass)?;
        Ok(Self {
            integrate: Cquad::new(config),
            curved_omnes,
            basis,
            subtractions,
            pion_mass,
            minimal_distance,
            grid,
            integrands,
        })
    }

    /// The number of subtractions, i.e. the number of basis functions.
    pub fn subtractions(&self) -> usize {
        self.subtractions
    }

    /// The discretised solution vector of basis function `i`.
    pub fn vector(&self, i: usize) -> &Vector {
        &self.basis[i]
    }

    /// Evaluate the basis function with subtraction polynomial s^`i` at `s`.
    pub fn eval(&self, i: usize, s: Complex64) -> Result<Complex64> {
        if hits_threshold(self.pion_mass, s, self.minimal_distance) {
            let shift = self.minimal_distance * 1.1;
            return Ok((self.eval(i, s - shift)? + self.eval(i, s + shift)?) / 2.0);
        }

        let integrand = &self.integrands[i];
        let dispersive = if let Some((x1, x2)) = self.grid.hits(s) {
            let x0 = self.grid.x_parameter_lower();
            let x3 = self.grid.x_parameter_upper();
            let real = s.re;
            let mut integral = cut_prescription(
                &self.grid,
                x1,
                x2,
                real,
                |x| integrand.eval(x),
                self.subtractions,
                &self.integrate,
            )?;
            for (lower, upper) in segments_without(&[x0, x1, x2, x3], (x1, x2)) {
                integral += ordinary_prescription(
                    &self.grid,
                    lower,
                    upper,
                    Complex64::from(real),
                    |x| integrand.eval(x),
                    self.subtractions,
                    &self.integrate,
                )?;
            }
            integral
        } else {
            ordinary_prescription(
                &self.grid,
                self.grid.x_parameter_lower(),
                self.grid.x_parameter_upper(),
                s,
                |x| integrand.eval(x),
                self.subtractions,
                &self.integrate,
            )?
        };

        Ok(self.curved_omnes.eval(s)?
            * (s.powi(i as i32) + 1.5 / PI * dispersive))
    }
}

impl<C: std::fmt::Debug> std::fmt::Debug for Basis<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Basis")
            .field("subtractions", &self.subtractions)
            .field("pion_mass", &self.pion_mass)
            .field("minimal_distance", &self.minimal_distance)
            .finish()
    }
}

/// Generate a basis of the solution space to a KT equation with the default
/// integrator settings and threshold distance.
pub fn make_basis<C: Curve>(
    omnes: Omnes,
    pi_pi: ComplexFunction,
    subtractions: usize,
    grid: Grid<C>,
    pion_mass: f64,
    virtuality: f64,
    method: Method,
) -> Result<Basis<C>> {
    Basis::new(
        omnes,
        pi_pi,
        subtractions,
        grid,
        pion_mass,
        virtuality,
        method,
        Settings::default(),
        1e-4,
    )
}

#[cfg(test)]
#[path = "kernel_tests.rs"]
mod tests;
