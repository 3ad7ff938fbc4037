//! I=J=1 pi pi -> pi pi ChPT partial-wave amplitudes up to NLO in terms of
//! the pion decay constant in the chiral limit.

use std::f64::consts::PI;

use num_complex::Complex64;

use crate::phase_space::{rho, sigma};

/// The ChPT LO amplitude.
///
/// # Arguments
/// * `mass` - pion mass in physical units
/// * `s` - Mandelstam s in physical units
/// * `pion_decay` - pion decay constant (either in the chiral limit or not)
///   in physical units
pub fn t2(mass: f64, s: Complex64, pion_decay: f64) -> Complex64 {
    (s - 4.0 * mass * mass) / (96.0 * pion_decay * pion_decay * PI)
}

fn sigma_fraction(mass: f64, s: Complex64) -> Complex64 {
    let sig = sigma(mass, s);
    (1.0 + sig) / (1.0 - sig)
}

fn log_sigma(mass: f64, s: Complex64) -> Complex64 {
    sigma_fraction(mass, s).ln()
}

fn l_sigma(mass: f64, s: Complex64) -> Complex64 {
    let sig = sigma(mass, s);
    let fraction = 1.0 / sig;
    fraction * fraction * (0.5 * fraction * log_sigma(mass, s) - 1.0)
}

/// The ChPT NLO amplitude.
///
/// # Arguments
/// * `mass` - pion mass in physical units
/// * `s` - Mandelstam s in physical units
/// * `pion_decay` - pion decay constant in the chiral limit in physical units
/// * `l_diff` - linear combination of LECs: l_diff := 48 pi^2 (l_2 - 2 l_1)
pub fn t4(mass: f64, s: Complex64, pion_decay: f64, l_diff: f64) -> Complex64 {
    let ps = sigma(mass, s);
    let pss = ps * ps;
    let lo = t2(mass, s, pion_decay);
    let ls = l_sigma(mass, s);
    let coefficient = s * pss / (4608.0 * PI.powi(3) * pion_decay.powi(4));
    let c_term = s * (l_diff + 1.0 / 3.0) - 7.5 * mass * mass;
    let b_term = mass.powi(4) * 0.5 / s
        * ((15.0 - 96.0 * pss + 9.0 * pss * pss) * ls * ls - (146.0 - 50.0 * pss) * ls + 41.0);
    let imaginary = rho(mass, s) * lo * lo;
    coefficient * (c_term - b_term) + Complex64::i() * imaginary
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASS: f64 = 0.139;
    const PION_DECAY: f64 = 0.0924;
    const L_DIFF: f64 = 5.7;

    #[test]
    fn leading_order_is_real_below_threshold() {
        for i in 0..20 {
            let s = Complex64::from(4.0 * MASS * MASS * i as f64 / 20.0 + 1e-3);
            assert_eq!(t2(MASS, s, PION_DECAY).im, 0.0);
        }
    }

    #[test]
    fn leading_order_vanishes_at_threshold() {
        let threshold = Complex64::from(4.0 * MASS * MASS);
        assert!(t2(MASS, threshold, PION_DECAY).norm() < 1e-15);
    }

    #[test]
    fn next_to_leading_order_is_real_below_threshold() {
        // Between s=0 and the two-pion threshold the full NLO amplitude is
        // real: sigma is purely imaginary there and the would-be absorptive
        // part cancels.
        for i in 1..20 {
            let s = Complex64::from(4.0 * MASS * MASS * i as f64 / 20.0);
            assert!(t4(MASS, s, PION_DECAY, L_DIFF).im.abs() < 1e-10);
        }
    }

    #[test]
    fn unitarity_relates_absorptive_part_to_lo() {
        // Above threshold, Im t4 = rho |t2|^2 at this order.
        for i in 1..10 {
            let s = Complex64::from(4.0 * MASS * MASS + 0.1 * i as f64);
            let absorptive = t4(MASS, s, PION_DECAY, L_DIFF).im;
            let expected = (rho(MASS, s) * t2(MASS, s, PION_DECAY).powi(2)).re;
            assert!((absorptive - expected).abs() < 1e-10);
        }
    }
}
