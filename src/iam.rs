//! The inverse amplitude method (IAM) in terms of the pion decay constant in
//! the chiral limit.

use num_complex::Complex64;

use crate::chpt::{t2, t4};

/// The IAM amplitude up to NLO on the first Riemann sheet.
///
/// # Arguments
/// * `mass` - pion mass in physical units
/// * `s` - Mandelstam s in physical units
/// * `pion_decay` - pion decay constant in the chiral limit in physical units
/// * `l_diff` - linear combination of LECs: l_diff := 48 pi^2 (l_2 - 2 l_1)
pub fn iam_nlo(mass: f64, s: Complex64, pion_decay: f64, l_diff: f64) -> Complex64 {
    let lo = t2(mass, s, pion_decay);
    let nlo = t4(mass, s, pion_decay, l_diff);
    lo * lo / (lo - nlo)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASS: f64 = 0.139;
    const PION_DECAY: f64 = 0.0924;
    const L_DIFF: f64 = 5.7;

    #[test]
    fn defining_identity() {
        for s in [
            Complex64::new(0.5, 0.0),
            Complex64::new(0.5, 0.3),
            Complex64::new(-1.0, 0.1),
        ] {
            let lo = t2(MASS, s, PION_DECAY);
            let nlo = t4(MASS, s, PION_DECAY, L_DIFF);
            let amplitude = iam_nlo(MASS, s, PION_DECAY, L_DIFF);
            assert!(((lo - nlo) * amplitude - lo * lo).norm() < 1e-12);
        }
    }

    #[test]
    fn reduces_to_lo_for_small_nlo() {
        // Far below threshold with a large decay constant, the NLO piece is
        // negligible and the IAM amplitude approaches the LO one.
        let s = Complex64::from(0.01);
        let amplitude = iam_nlo(MASS, s, 10.0, L_DIFF);
        let lo = t2(MASS, s, 10.0);
        assert!((amplitude - lo).norm() < 1e-3 * lo.norm());
    }
}
