//! Different versions of the two-particle phase space.

use num_complex::Complex64;

/// Signum of the imaginary part of a number.
#[inline]
pub fn signum_im(x: Complex64) -> f64 {
    if x.im >= 0.0 {
        1.0
    } else {
        -1.0
    }
}

/// Square root with cut on the positive real axis.
///
/// The principal square root has its cut on the negative real axis; flipping
/// the sign in the lower half plane moves it to the positive one.
#[inline]
pub fn alt_sqrt(x: Complex64) -> Complex64 {
    signum_im(x) * x.sqrt()
}

/// The two-body phase space with cuts along [4 mass^2, oo) and (-oo, 0].
#[inline]
pub fn rho(mass: f64, s: Complex64) -> Complex64 {
    alt_sqrt(1.0 - 4.0 * mass * mass / s)
}

/// The two-body phase space with cut along [0, 4 mass^2].
#[inline]
pub fn sigma(mass: f64, s: Complex64) -> Complex64 {
    (1.0 - 4.0 * mass * mass / s).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASS: f64 = 1.0;
    const THRESHOLD: f64 = 4.0 * MASS * MASS;

    #[test]
    fn versions_agree_above_threshold() {
        // Above threshold both versions are real and coincide.
        for i in 0..50 {
            let s = Complex64::from(THRESHOLD + 0.5 + i as f64 * 19.0);
            let difference = rho(MASS, s) - sigma(MASS, s);
            assert!(difference.norm() < 1e-12);
            assert!(rho(MASS, s).im.abs() < 1e-12);
        }
    }

    #[test]
    fn rho_is_continuous_between_cuts() {
        // On (0, 4 mass^2) the cuts of rho are absent, so the values just
        // above and just below the real axis agree.
        for i in 1..20 {
            let x = THRESHOLD * i as f64 / 20.0;
            let above = rho(MASS, Complex64::new(x, 1e-12));
            let below = rho(MASS, Complex64::new(x, -1e-12));
            assert!((above - below).norm() < 1e-5);
            // The product across the axis is real accordingly.
            assert!((above * below).im.abs() < 1e-5);
        }
    }

    #[test]
    fn sigma_has_cut_between_zero_and_threshold() {
        // sigma jumps across (0, 4 mass^2): boundary values are complex
        // conjugate, so their product is non-negative.
        for i in 1..20 {
            let x = THRESHOLD * i as f64 / 20.0;
            let above = sigma(MASS, Complex64::new(x, 1e-12));
            let below = sigma(MASS, Complex64::new(x, -1e-12));
            let product = above * below;
            assert!(product.im.abs() < 1e-5);
            assert!(product.re >= 0.0);
        }
    }

    #[test]
    fn rho_jumps_across_its_cuts() {
        let above = rho(MASS, Complex64::new(10.0, 1e-12));
        let below = rho(MASS, Complex64::new(10.0, -1e-12));
        assert!((above + below).norm() < 1e-5);
    }
}
