//! One-dimensional interpolation of real data.
//!
//! Data is provided as pairs (x_i, y_i) with strictly ascending abscissae.
//! The available methods mirror the classic spline families: piecewise
//! linear, global polynomial, natural and periodic cubic splines, Akima
//! (plain and periodic) and Steffen's monotonicity-preserving scheme.

use crate::error::{Error, Result};

/// The available interpolation methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Linear,
    Polynomial,
    Cubic,
    CubicPeriodic,
    Akima,
    AkimaPeriodic,
    Steffen,
}

impl Method {
    /// Return the minimal number of data points required by the method.
    pub fn min_size(self) -> usize {
        match self {
            Method::Linear => 2,
            Method::Polynomial => 3,
            Method::Cubic => 3,
            Method::CubicPeriodic => 2,
            Method::Akima => 5,
            Method::AkimaPeriodic => 5,
            Method::Steffen => 3,
        }
    }
}

/// Per-method precomputed coefficients.
#[derive(Debug, Clone)]
enum Coefficients {
    /// No precomputation needed (linear, polynomial).
    None,
    /// Second derivatives at the nodes (cubic splines).
    SecondDerivatives(Vec<f64>),
    /// First derivatives at the nodes (Hermite-form methods).
    FirstDerivatives(Vec<f64>),
}

/// Interpolation of one-dimensional data provided as pairs (x_i, y_i).
#[derive(Debug, Clone)]
pub struct Interpolate {
    x: Vec<f64>,
    y: Vec<f64>,
    method: Method,
    tolerant: bool,
    coefficients: Coefficients,
}

impl Interpolate {
    /// Create an interpolator for the given data.
    ///
    /// The sizes of `x` and `y` need to be the same and at least
    /// `method.min_size()`; `x` must be strictly ascending. `tolerant`
    /// influences the behaviour of [`Interpolate::eval`] beyond the
    /// boundaries, see there.
    pub fn new(x: Vec<f64>, y: Vec<f64>, method: Method, tolerant: bool) -> Result<Self> {
        if x.len() != y.len() {
            return Err(Error::InvalidArgument(
                "x and y need to have the same size".into(),
            ));
        }
        if x.len() < method.min_size() {
            return Err(Error::InvalidArgument(
                "not enough data points for the chosen interpolation method".into(),
            ));
        }
        if x.windows(2).any(|w| w[0] >= w[1]) {
            return Err(Error::InvalidArgument(
                "abscissae need to be strictly ascending".into(),
            ));
        }

        let coefficients = match method {
            Method::Linear | Method::Polynomial => Coefficients::None,
            Method::Cubic => Coefficients::SecondDerivatives(natural_cubic(&x, &y)),
            Method::CubicPeriodic => Coefficients::SecondDerivatives(periodic_cubic(&x, &y)),
            Method::Akima => Coefficients::FirstDerivatives(akima_derivatives(&x, &y, false)),
            Method::AkimaPeriodic => Coefficients::FirstDerivatives(akima_derivatives(&x, &y, true)),
            Method::Steffen => Coefficients::FirstDerivatives(steffen_derivatives(&x, &y)),
        };

        Ok(Self {
            x,
            y,
            method,
            tolerant,
            coefficients,
        })
    }

    /// Return the value of the interpolated data at point `x`.
    ///
    /// If the interpolator is tolerant, the boundary values are returned
    /// outside the interval [`front`, `back`]; otherwise evaluation outside
    /// the interval signals a [`Error::Domain`].
    pub fn eval(&self, x: f64) -> Result<f64> {
        if x < self.front() || x > self.back() {
            if self.tolerant {
                return Ok(self.clamped(x));
            }
            return Err(Error::Domain(format!(
                "interpolation evaluated at {x} outside [{}, {}]",
                self.front(),
                self.back()
            )));
        }
        Ok(self.value_inside(x))
    }

    /// Evaluate with the boundary values extended beyond the interval,
    /// independent of the tolerance flag.
    pub fn clamped(&self, x: f64) -> f64 {
        if x <= self.front() {
            self.y[0]
        } else if x >= self.back() {
            self.y[self.y.len() - 1]
        } else {
            self.value_inside(x)
        }
    }

    pub fn front(&self) -> f64 {
        self.x[0]
    }

    pub fn back(&self) -> f64 {
        self.x[self.x.len() - 1]
    }

    pub fn is_tolerant(&self) -> bool {
        self.tolerant
    }

    pub fn be_tolerant(&mut self) {
        self.tolerant = true;
    }

    pub fn be_strict(&mut self) {
        self.tolerant = false;
    }

    pub fn method(&self) -> Method {
        self.method
    }

    /// Index of the segment containing `x`; `x` is assumed inside the range.
    fn segment(&self, x: f64) -> usize {
        let upper = self.x.partition_point(|&v| v <= x);
        upper.clamp(1, self.x.len() - 1) - 1
    }

    fn value_inside(&self, x: f64) -> f64 {
        match (&self.coefficients, self.method) {
            (Coefficients::None, Method::Polynomial) => neville(&self.x, &self.y, x),
            (Coefficients::None, _) => {
                let k = self.segment(x);
                let h = self.x[k + 1] - self.x[k];
                self.y[k] + (self.y[k + 1] - self.y[k]) * (x - self.x[k]) / h
            }
            (Coefficients::SecondDerivatives(c), _) => {
                let k = self.segment(x);
                let h = self.x[k + 1] - self.x[k];
                let a = (self.x[k + 1] - x) / h;
                let b = 1.0 - a;
                a * self.y[k]
                    + b * self.y[k + 1]
                    + ((a * a * a - a) * c[k] + (b * b * b - b) * c[k + 1]) * h * h / 6.0
            }
            (Coefficients::FirstDerivatives(d), _) => {
                let k = self.segment(x);
                let h = self.x[k + 1] - self.x[k];
                let dx = x - self.x[k];
                let slope = (self.y[k + 1] - self.y[k]) / h;
                self.y[k]
                    + d[k] * dx
                    + (3.0 * slope - 2.0 * d[k] - d[k + 1]) * dx * dx / h
                    + (d[k] + d[k + 1] - 2.0 * slope) * dx * dx * dx / (h * h)
            }
        }
    }
}

/// Interpolate `f` along the sorted abscissae `x`.
pub fn sample<F: Fn(f64) -> f64>(f: F, x: &[f64], method: Method) -> Result<Interpolate> {
    let y = x.iter().map(|&v| f(v)).collect();
    Interpolate::new(x.to_vec(), y, method, true)
}

// -- Method-specific precomputation -------------------------------------------

/// Second derivatives of the natural cubic spline (tridiagonal solve).
fn natural_cubic(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let mut c = vec![0.0; n];
    if n < 3 {
        return c;
    }

    // Forward sweep of the Thomas algorithm on the interior equations.
    let mut diag = vec![0.0; n];
    let mut rhs = vec![0.0; n];
    for i in 1..n - 1 {
        let h0 = x[i] - x[i - 1];
        let h1 = x[i + 1] - x[i];
        let d = 2.0 * (h0 + h1) - h0 * if i > 1 { h0 / diag[i - 1] } else { 0.0 };
        let r = 6.0 * ((y[i + 1] - y[i]) / h1 - (y[i] - y[i - 1]) / h0)
            - h0 * if i > 1 { rhs[i - 1] / diag[i - 1] } else { 0.0 };
        diag[i] = d;
        rhs[i] = r;
    }
    for i in (1..n - 1).rev() {
        let h1 = x[i + 1] - x[i];
        c[i] = (rhs[i] - h1 * c[i + 1]) / diag[i];
    }
    c
}

/// Second derivatives of the periodic cubic spline (cyclic tridiagonal solve
/// via the Sherman-Morrison correction).
fn periodic_cubic(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let m = n - 1; // number of independent second derivatives, c[n-1] = c[0]
    let mut c = vec![0.0; n];
    if m < 2 {
        return c;
    }

    let h: Vec<f64> = (0..m).map(|i| x[i + 1] - x[i]).collect();
    let s: Vec<f64> = (0..m).map(|i| (y[i + 1] - y[i]) / h[i]).collect();
    let prev = |i: usize| (i + m - 1) % m;

    let diag: Vec<f64> = (0..m).map(|i| 2.0 * (h[prev(i)] + h[i])).collect();
    let rhs: Vec<f64> = (0..m).map(|i| 6.0 * (s[i] - s[prev(i)])).collect();

    if m == 2 {
        // Dense 2x2 solve; the cyclic couplings collapse onto the
        // off-diagonal.
        let off = h[0] + h[1];
        let det = diag[0] * diag[1] - off * off;
        c[0] = (rhs[0] * diag[1] - rhs[1] * off) / det;
        c[1] = (rhs[1] * diag[0] - rhs[0] * off) / det;
        c[2] = c[0];
        return c;
    }

    // Sherman-Morrison: remove the corner entries h[m-1] with the rank-one
    // update A = A' + gamma * u v^T.
    let gamma = -diag[0];
    let mut diag_mod = diag.clone();
    diag_mod[0] -= gamma;
    diag_mod[m - 1] -= h[m - 1] * h[m - 1] / gamma;

    let solve = |rhs: &[f64]| -> Vec<f64> {
        // Thomas algorithm with sub/super-diagonal entries h[i].
        let mut d = diag_mod.clone();
        let mut r = rhs.to_vec();
        for i in 1..m {
            let w = h[i - 1] / d[i - 1];
            d[i] -= w * h[i - 1];
            r[i] -= w * r[i - 1];
        }
        let mut out = vec![0.0; m];
        out[m - 1] = r[m - 1] / d[m - 1];
        for i in (0..m - 1).rev() {
            out[i] = (r[i] - h[i] * out[i + 1]) / d[i];
        }
        out
    };

    let mut u = vec![0.0; m];
    u[0] = gamma;
    u[m - 1] = h[m - 1];
    let z = solve(&rhs);
    let q = solve(&u);
    let factor = (z[0] + h[m - 1] * z[m - 1] / gamma) / (1.0 + q[0] + h[m - 1] * q[m - 1] / gamma);
    for i in 0..m {
        c[i] = z[i] - factor * q[i];
    }
    c[n - 1] = c[0];
    c
}

/// Node derivatives of the Akima spline.
fn akima_derivatives(x: &[f64], y: &[f64], periodic: bool) -> Vec<f64> {
    let n = x.len();
    let segments = n - 1;
    let slope: Vec<f64> = (0..segments)
        .map(|i| (y[i + 1] - y[i]) / (x[i + 1] - x[i]))
        .collect();

    // Extended slopes s_{-2} .. s_{n-1}, stored with offset 2.
    let mut ext = vec![0.0; segments + 4];
    for i in 0..segments {
        ext[i + 2] = slope[i];
    }
    if periodic {
        ext[1] = slope[segments - 1];
        ext[0] = slope[segments - 2];
        ext[segments + 2] = slope[0];
        ext[segments + 3] = slope[1];
    } else {
        ext[1] = 2.0 * ext[2] - ext[3];
        ext[0] = 2.0 * ext[1] - ext[2];
        ext[segments + 2] = 2.0 * ext[segments + 1] - ext[segments];
        ext[segments + 3] = 2.0 * ext[segments + 2] - ext[segments + 1];
    }

    (0..n)
        .map(|i| {
            let w1 = (ext[i + 3] - ext[i + 2]).abs();
            let w2 = (ext[i + 1] - ext[i]).abs();
            if w1 + w2 == 0.0 {
                0.5 * (ext[i + 1] + ext[i + 2])
            } else {
                (w1 * ext[i + 1] + w2 * ext[i + 2]) / (w1 + w2)
            }
        })
        .collect()
}

/// Node derivatives of Steffen's monotonicity-preserving spline.
fn steffen_derivatives(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    let h: Vec<f64> = (0..n - 1).map(|i| x[i + 1] - x[i]).collect();
    let s: Vec<f64> = (0..n - 1).map(|i| (y[i + 1] - y[i]) / h[i]).collect();

    let boundary = |s0: f64, s1: f64, h0: f64, h1: f64| -> f64 {
        let p = s0 * (1.0 + h0 / (h0 + h1)) - s1 * (h0 / (h0 + h1));
        if p * s0 <= 0.0 {
            0.0
        } else if p.abs() > 2.0 * s0.abs() {
            2.0 * s0
        } else {
            p
        }
    };

    let mut d = vec![0.0; n];
    d[0] = boundary(s[0], s[1], h[0], h[1]);
    d[n - 1] = boundary(s[n - 2], s[n - 3], h[n - 2], h[n - 3]);
    for i in 1..n - 1 {
        let p = (s[i - 1] * h[i] + s[i] * h[i - 1]) / (h[i - 1] + h[i]);
        d[i] = (1.0_f64.copysign(s[i - 1]) + 1.0_f64.copysign(s[i]))
            * s[i - 1].abs().min(s[i].abs()).min(0.5 * p.abs());
    }
    d
}

/// Neville's scheme for the global interpolating polynomial.
fn neville(x: &[f64], y: &[f64], at: f64) -> f64 {
    let mut p = y.to_vec();
    let n = p.len();
    for level in 1..n {
        for i in 0..n - level {
            p[i] = ((at - x[i + level]) * p[i] + (x[i] - at) * p[i + 1]) / (x[i] - x[i + level]);
        }
    }
    p[0]
}

#[cfg(test)]
#[path = "interpolate_tests.rs"]
mod tests;
