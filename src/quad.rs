//! Adaptive one-dimensional integration.
//!
//! Two routines are provided: [`Qag`], a globally adaptive Gauss-Kronrod
//! integrator, and [`Cquad`], a doubly-adaptive scheme built on nested
//! Clenshaw-Curtis rules that copes with more difficult integrands (isolated
//! non-finite points, subtracted principal-value integrands). Both accept
//! infinite limits through a change of variables onto (0, 1].

use crate::error::{Error, Result};

/// A value together with an estimate of its absolute error.
pub type Value = (f64, f64);

/// Configuration shared by the adaptive routines.
///
/// If `absolute_precision` is set to zero, `relative_precision` is used and
/// vice versa. `space` bounds the number of intervals stored during
/// subdivision.
#[derive(Debug, Clone, Copy)]
pub struct Settings {
    pub absolute_precision: f64,
    pub relative_precision: f64,
    pub space: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            absolute_precision: 0.0,
            relative_precision: 1e-7,
            space: 1000,
        }
    }
}

/// Adaptive integration over a (possibly infinite) interval.
pub trait Integrate {
    /// Integrate `f` in the interval [`lower`, `upper`].
    ///
    /// Both `lower` and `upper` are allowed to be infinite
    /// (use `f64::INFINITY` / `f64::NEG_INFINITY`).
    fn integrate(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<Value>;
}

// -- Interval transformations -------------------------------------------------

/// Map an integral with infinite endpoint(s) onto (0, 1].
///
/// The substitutions match the classic treatment: x = a + (1-t)/t for an
/// infinite upper limit, x = b + (t-1)/t for an infinite lower limit and the
/// folded sum of both for a doubly infinite interval.
fn map_infinite<'a>(
    f: &'a dyn Fn(f64) -> f64,
    lower: f64,
    upper: f64,
) -> (Box<dyn Fn(f64) -> f64 + 'a>, f64, f64) {
    let lower_inf = lower.is_infinite();
    let upper_inf = upper.is_infinite();
    if lower_inf && upper_inf {
        (
            Box::new(move |t| (f((1.0 - t) / t) + f((t - 1.0) / t)) / (t * t)),
            0.0,
            1.0,
        )
    } else if lower_inf {
        (Box::new(move |t| f(upper + (t - 1.0) / t) / (t * t)), 0.0, 1.0)
    } else if upper_inf {
        (Box::new(move |t| f(lower + (1.0 - t) / t) / (t * t)), 0.0, 1.0)
    } else {
        (Box::new(move |x| f(x)), lower, upper)
    }
}

// -- Shared adaptive driver ---------------------------------------------------

/// Local quadrature result on a single interval: the integral estimate, its
/// error estimate and the integral of the absolute value of the integrand.
type Local = (f64, f64, f64);

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: f64,
    b: f64,
    result: f64,
    error: f64,
    magnitude: f64,
}

impl Segment {
    fn new(a: f64, b: f64, local: Local) -> Self {
        Self {
            a,
            b,
            result: local.0,
            error: local.1,
            magnitude: local.2,
        }
    }
}

/// Bisect the interval with the largest error estimate until the global error
/// satisfies the tolerance. `rule` evaluates the local quadrature pair on a
/// subinterval.
fn adaptive<R>(
    rule: R,
    f: &dyn Fn(f64) -> f64,
    lower: f64,
    upper: f64,
    absolute: f64,
    relative: f64,
    space: usize,
) -> Result<Value>
where
    R: Fn(&dyn Fn(f64) -> f64, f64, f64) -> Result<Local>,
{
    let mut segments = vec![Segment::new(lower, upper, rule(f, lower, upper)?)];

    let mut iterations = 0usize;
    let mut roundoff_shrink = 0usize;
    let mut roundoff_grow = 0usize;

    loop {
        let result: f64 = segments.iter().map(|s| s.result).sum();
        let errsum: f64 = segments.iter().map(|s| s.error).sum();
        let magnitude: f64 = segments.iter().map(|s| s.magnitude).sum();
        if !result.is_finite() {
            return Err(Error::Divergent);
        }
        // The second bound accepts once the remaining error sits at the
        // roundoff floor of the integrand magnitude; a vanishing integral of
        // a non-vanishing integrand cannot satisfy a purely relative bound.
        if errsum <= absolute.max(relative * result.abs())
            || errsum <= 100.0 * f64::EPSILON * magnitude
        {
            return Ok((result, errsum));
        }
        if segments.len() >= space {
            return Err(Error::MaxSubdivisions);
        }
        if roundoff_shrink >= 6 || roundoff_grow >= 20 {
            return Err(Error::Roundoff);
        }

        let worst = segments
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.error.total_cmp(&b.1.error))
            .map(|(k, _)| k)
            .unwrap_or(0);
        let segment = segments.swap_remove(worst);
        let mid = 0.5 * (segment.a + segment.b);
        if !(segment.a < mid && mid < segment.b) {
            // The interval is too small to refine any further.
            return Err(Error::BadIntegrand);
        }

        let left = rule(f, segment.a, mid)?;
        let right = rule(f, mid, segment.b)?;

        let sum = left.0 + right.0;
        let err12 = left.1 + right.1;
        if (segment.result - sum).abs() <= 1e-5 * sum.abs() && err12 >= 0.99 * segment.error {
            roundoff_shrink += 1;
        }
        if iterations > 10 && err12 > segment.error {
            roundoff_grow += 1;
        }
        iterations += 1;

        segments.push(Segment::new(segment.a, mid, left));
        segments.push(Segment::new(mid, segment.b, right));
    }
}

/// Order limits and record the sign of the integral.
fn signed_interval(lower: f64, upper: f64) -> (f64, f64, f64) {
    if lower > upper {
        (upper, lower, -1.0)
    } else {
        (lower, upper, 1.0)
    }
}

// -- Gauss-Kronrod 15(7) ------------------------------------------------------

// Abscissae and weights of the 15-point Kronrod rule and its embedded 7-point
// Gauss rule, as tabulated in QUADPACK.
const XGK: [f64; 8] = [
    0.991455371120812639206854697526329,
    0.949107912342758524526189684047851,
    0.864864423359769072789712788640926,
    0.741531185599394439863864773280788,
    0.586087235467691130294144838258730,
    0.405845151377397166906606412076961,
    0.207784955007898467600689403773245,
    0.000000000000000000000000000000000,
];

const WGK: [f64; 8] = [
    0.022935322010529224963732008058970,
    0.063092092629978553290700663189204,
    0.104790010322250183839876322541518,
    0.140653259715525918745189590510238,
    0.169004726639267902826583426598550,
    0.190350578064785409913256402421014,
    0.204432940075298892414161999234649,
    0.209482141084727828012999174891714,
];

const WG: [f64; 4] = [
    0.129484966168869693270611432679082,
    0.279705391489276667901467771423780,
    0.381830050505118944950369775488975,
    0.417959183673469387755102040816327,
];

/// Apply the 15-point Kronrod rule on [`a`, `b`] and estimate the error from
/// the embedded 7-point Gauss result.
fn gauss_kronrod(f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<Local> {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let f_center = f(center);
    let mut fv1 = [0.0; 7];
    let mut fv2 = [0.0; 7];
    for j in 0..7 {
        fv1[j] = f(center - half * XGK[j]);
        fv2[j] = f(center + half * XGK[j]);
    }
    if !f_center.is_finite() || fv1.iter().chain(fv2.iter()).any(|v| !v.is_finite()) {
        return Err(Error::BadIntegrand);
    }

    let mut resk = WGK[7] * f_center;
    let mut resabs = resk.abs();
    for j in 0..7 {
        resk += WGK[j] * (fv1[j] + fv2[j]);
        resabs += WGK[j] * (fv1[j].abs() + fv2[j].abs());
    }
    let mut resg = WG[3] * f_center;
    for j in 0..3 {
        resg += WG[j] * (fv1[2 * j + 1] + fv2[2 * j + 1]);
    }

    let reskh = 0.5 * resk;
    let mut resasc = WGK[7] * (f_center - reskh).abs();
    for j in 0..7 {
        resasc += WGK[j] * ((fv1[j] - reskh).abs() + (fv2[j] - reskh).abs());
    }
    resasc *= half.abs();
    resabs *= half.abs();

    let result = resk * half;
    let mut error = ((resk - resg) * half).abs();
    if resasc != 0.0 && error != 0.0 {
        error = resasc * 1.0_f64.min((200.0 * error / resasc).powf(1.5));
    }
    let floor = 50.0 * f64::EPSILON * resabs;
    if resabs > f64::MIN_POSITIVE / (50.0 * f64::EPSILON) {
        error = error.max(floor);
    }

    Ok((result, error, resabs))
}

/// Globally adaptive Gauss-Kronrod integration.
#[derive(Debug, Clone)]
pub struct Qag {
    absolute_precision: f64,
    relative_precision: f64,
    space: usize,
}

impl Qag {
    pub fn new(settings: Settings) -> Self {
        Self {
            absolute_precision: settings.absolute_precision,
            relative_precision: settings.relative_precision,
            space: settings.space,
        }
    }

    pub fn set_absolute(&mut self, absolute: f64) {
        self.absolute_precision = absolute;
    }

    pub fn set_relative(&mut self, relative: f64) {
        self.relative_precision = relative;
    }

    pub fn absolute(&self) -> f64 {
        self.absolute_precision
    }

    pub fn relative(&self) -> f64 {
        self.relative_precision
    }

    pub fn size(&self) -> usize {
        self.space
    }
}

impl Default for Qag {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Integrate for Qag {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<Value> {
        let (lower, upper, sign) = signed_interval(lower, upper);
        let (g, a, b) = map_infinite(f, lower, upper);
        let (value, error) = adaptive(
            gauss_kronrod,
            &g,
            a,
            b,
            self.absolute_precision,
            self.relative_precision,
            self.space,
        )?;
        Ok((sign * value, error))
    }
}

// -- Clenshaw-Curtis ----------------------------------------------------------

/// Integrate the Chebyshev interpolant through `n + 1` samples at the points
/// cos(j pi / n) over [-1, 1]. `n` must be even.
fn clenshaw_curtis_sum(fv: &[f64], n: usize) -> f64 {
    let mut integral = 0.0;
    let mut k = 0;
    while k <= n {
        // Type-I DCT coefficient of the interpolant.
        let endpoint_sign = if k % 2 == 0 { 1.0 } else { -1.0 };
        let mut ak = 0.5 * (fv[0] + endpoint_sign * fv[n]);
        for j in 1..n {
            ak += fv[j] * (std::f64::consts::PI * (k * j) as f64 / n as f64).cos();
        }
        ak *= 2.0 / n as f64;

        // Integral of T_k over [-1, 1]; odd k contribute nothing.
        integral += if k == 0 {
            ak
        } else if k == n {
            ak / (1.0 - (k * k) as f64)
        } else {
            2.0 * ak / (1.0 - (k * k) as f64)
        };
        k += 2;
    }
    integral
}

/// Evaluate a nested Clenshaw-Curtis pair of degrees 8 and 16 on a single
/// interval. Non-finite samples (isolated singularities, removable 0/0 points
/// of subtracted integrands) are replaced by zero.
fn clenshaw_curtis(f: &dyn Fn(f64) -> f64, a: f64, b: f64) -> Result<Local> {
    const N: usize = 16;
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let mut fv = [0.0; N + 1];
    for (j, value) in fv.iter_mut().enumerate() {
        let x = (std::f64::consts::PI * j as f64 / N as f64).cos();
        let sample = f(center + half * x);
        *value = if sample.is_finite() { sample } else { 0.0 };
    }

    let nested: Vec<f64> = fv.iter().step_by(2).copied().collect();
    let i8 = clenshaw_curtis_sum(&nested, 8);
    let i16 = clenshaw_curtis_sum(&fv, 16);

    let absolute: Vec<f64> = fv.iter().map(|v| v.abs()).collect();
    let magnitude = clenshaw_curtis_sum(&absolute, 16) * half.abs();

    let error = (i16 - i8).abs().max(f64::EPSILON * i16.abs()) * half.abs();
    Ok((i16 * half, error, magnitude))
}

/// Doubly-adaptive integration on nested Clenshaw-Curtis rules.
///
/// This routine is able to handle more difficult integrands compared to
/// [`Qag`]: within each interval the degree ladder supplies the error
/// estimate, and isolated non-finite points of the integrand are tolerated.
#[derive(Debug, Clone)]
pub struct Cquad {
    absolute_precision: f64,
    relative_precision: f64,
    space: usize,
}

impl Cquad {
    pub fn new(settings: Settings) -> Self {
        Self {
            absolute_precision: settings.absolute_precision,
            relative_precision: settings.relative_precision,
            space: settings.space,
        }
    }

    pub fn set_absolute(&mut self, absolute: f64) {
        self.absolute_precision = absolute;
    }

    pub fn set_relative(&mut self, relative: f64) {
        self.relative_precision = relative;
    }

    pub fn absolute(&self) -> f64 {
        self.absolute_precision
    }

    pub fn relative(&self) -> f64 {
        self.relative_precision
    }

    pub fn size(&self) -> usize {
        self.space
    }
}

impl Default for Cquad {
    fn default() -> Self {
        Self::new(Settings::default())
    }
}

impl Integrate for Cquad {
    fn integrate(&self, f: &dyn Fn(f64) -> f64, lower: f64, upper: f64) -> Result<Value> {
        let (lower, upper, sign) = signed_interval(lower, upper);
        let (g, a, b) = map_infinite(f, lower, upper);
        let (value, error) = adaptive(
            clenshaw_curtis,
            &g,
            a,
            b,
            self.absolute_precision,
            self.relative_precision,
            self.space,
        )?;
        Ok((sign * value, error))
    }
}

#[cfg(test)]
#[path = "quad_tests.rs"]
mod tests;
