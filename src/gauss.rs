//! Gauss-Legendre quadrature rules.
//!
//! An n-point rule integrates polynomials up to degree 2n-1 exactly on the
//! reference interval [-1, 1]; `Rule::point` maps nodes and weights onto an
//! arbitrary finite interval. The rules are used both directly (cheap
//! integration of smooth functions) and to discretise curves in [`crate::grid`].

use ndarray::Array1;

/// Fixed-order Gauss-Legendre rule.
///
/// The nodes and weights are stored on the reference interval [-1, 1] and
/// mapped on demand, so a single rule serves arbitrarily many intervals.
#[derive(Debug, Clone)]
pub struct Rule {
    x: Array1<f64>,
    w: Array1<f64>,
}

impl Rule {
    /// Create an `n`-point Gauss-Legendre rule.
    pub fn new(n: usize) -> Self {
        let (x, w) = nodes_weights(n);
        Self {
            x: Array1::from(x),
            w: Array1::from(w),
        }
    }

    /// Return the number of points of the rule.
    pub fn size(&self) -> usize {
        self.x.len()
    }

    /// Adjust the number of points of the rule.
    pub fn resize(&mut self, n: usize) {
        if n != self.size() {
            *self = Self::new(n);
        }
    }

    /// Return the `i`-th (node, weight) pair for integration over
    /// [`lower`, `upper`].
    ///
    /// Reversed limits produce negative weights, so integrals pick up the
    /// usual sign flip.
    ///
    /// # Panics
    /// Panics if `i` is not smaller than the size of the rule.
    pub fn point(&self, lower: f64, upper: f64, i: usize) -> (f64, f64) {
        assert!(i < self.size(), "requested knot index exceeds rule size");
        let half = 0.5 * (upper - lower);
        let mid = 0.5 * (upper + lower);
        (mid + half * self.x[i], half * self.w[i])
    }

    /// Integrate `f` over [`lower`, `upper`] with the fixed-order rule.
    pub fn integrate<F: Fn(f64) -> f64>(&self, f: F, lower: f64, upper: f64) -> f64 {
        let mut sum = 0.0;
        for i in 0..self.size() {
            let (x, w) = self.point(lower, upper, i);
            sum += w * f(x);
        }
        sum
    }
}

/// Compute nodes and weights on [-1, 1] via Newton iteration on the Legendre
/// recurrence, seeded with Chebyshev estimates of the roots.
fn nodes_weights(n: usize) -> (Vec<f64>, Vec<f64>) {
    if n == 0 {
        return (Vec::new(), Vec::new());
    }
    if n == 1 {
        return (vec![0.0], vec![2.0]);
    }

    let mut x = Vec::with_capacity(n);
    let mut w = Vec::with_capacity(n);

    let m = (n + 1) / 2;
    for i in 0..m {
        let mut z = (std::f64::consts::PI * (i as f64 + 0.75) / (n as f64 + 0.5)).cos();

        for _ in 0..100 {
            let (p, dp) = legendre_and_derivative(n, z);
            let step = p / dp;
            z -= step;
            if step.abs() < 1e-15 {
                break;
            }
        }

        let (_, dp) = legendre_and_derivative(n, z);
        let weight = 2.0 / ((1.0 - z * z) * dp * dp);

        x.push(-z);
        w.push(weight);
        if i != n - 1 - i {
            x.push(z);
            w.push(weight);
        }
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.sort_by(|&a, &b| x[a].total_cmp(&x[b]));
    let sorted_x: Vec<f64> = indices.iter().map(|&i| x[i]).collect();
    let sorted_w: Vec<f64> = indices.iter().map(|&i| w[i]).collect();

    (sorted_x, sorted_w)
}

/// Evaluate the Legendre polynomial of degree `n` and its derivative at `x`.
fn legendre_and_derivative(n: usize, x: f64) -> (f64, f64) {
    if n == 0 {
        return (1.0, 0.0);
    }
    if n == 1 {
        return (x, 1.0);
    }

    let mut p0 = 1.0;
    let mut p1 = x;
    let mut dp0 = 0.0;
    let mut dp1 = 1.0;

    for k in 2..=n {
        let k_f = k as f64;
        let k1_f = (k - 1) as f64;
        let p2 = ((2.0 * k1_f + 1.0) * x * p1 - k1_f * p0) / k_f;
        let dp2 = ((2.0 * k1_f + 1.0) * (p1 + x * dp1) - k1_f * dp0) / k_f;
        p0 = p1;
        p1 = p2;
        dp0 = dp1;
        dp1 = dp2;
    }

    (p1, dp1)
}

#[cfg(test)]
#[path = "gauss_tests.rs"]
mod tests;
