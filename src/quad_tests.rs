use super::*;
use crate::error::Error;

fn integrators() -> (Qag, Cquad) {
    (Qag::default(), Cquad::default())
}

#[test]
fn finite_interval() {
    let (qag, cquad) = integrators();
    for integrate in [&qag as &dyn Integrate, &cquad] {
        let (value, error) = integrate.integrate(&|x| x * x, 0.0, 1.0).unwrap();
        assert!((value - 1.0 / 3.0).abs() < 1e-10);
        assert!(error < 1e-6);
    }
}

#[test]
fn reversed_limits_negate_the_result() {
    let (qag, cquad) = integrators();
    for integrate in [&qag as &dyn Integrate, &cquad] {
        let (forward, _) = integrate.integrate(&f64::sin, 0.0, 2.0).unwrap();
        let (backward, _) = integrate.integrate(&f64::sin, 2.0, 0.0).unwrap();
        assert!((forward + backward).abs() < 1e-10);
    }
}

#[test]
fn semi_infinite_interval() {
    let (qag, cquad) = integrators();
    for integrate in [&qag as &dyn Integrate, &cquad] {
        let (value, _) = integrate
            .integrate(&|x| (-x).exp(), 0.0, f64::INFINITY)
            .unwrap();
        assert!((value - 1.0).abs() < 1e-6);
    }
}

#[test]
fn lower_infinite_interval() {
    let (qag, cquad) = integrators();
    for integrate in [&qag as &dyn Integrate, &cquad] {
        let (value, _) = integrate
            .integrate(&|x| x.exp(), f64::NEG_INFINITY, 0.0)
            .unwrap();
        assert!((value - 1.0).abs() < 1e-6);
    }
}

#[test]
fn doubly_infinite_interval() {
    let (qag, cquad) = integrators();
    for integrate in [&qag as &dyn Integrate, &cquad] {
        let (value, _) = integrate
            .integrate(&|x| (-x * x).exp(), f64::NEG_INFINITY, f64::INFINITY)
            .unwrap();
        assert!((value - std::f64::consts::PI.sqrt()).abs() < 1e-6);
    }
}

#[test]
fn oscillatory_integrand() {
    let (qag, cquad) = integrators();
    for integrate in [&qag as &dyn Integrate, &cquad] {
        let (value, _) = integrate.integrate(&|x| (10.0 * x).sin(), 0.0, 1.0).unwrap();
        let exact = (1.0 - 10.0_f64.cos()) / 10.0;
        assert!((value - exact).abs() < 1e-8);
    }
}

#[test]
fn exhausted_workspace_is_reported() {
    let settings = Settings {
        absolute_precision: 0.0,
        relative_precision: 1e-12,
        space: 2,
    };
    let qag = Qag::new(settings);
    let result = qag.integrate(&|x| (50.0 * x).sin() / (1.0 + x * x), 0.0, 20.0);
    assert_eq!(result, Err(Error::MaxSubdivisions));
}

#[test]
fn cquad_tolerates_isolated_singular_points() {
    // The sample at the removable singularity evaluates to NaN and is
    // discarded; the integral of the continuous extension remains correct.
    let cquad = Cquad::default();
    let (value, _) = cquad.integrate(&|x: f64| x.sin() / x, 0.0, 1.0).unwrap();
    assert!((value - 0.946083070367183).abs() < 1e-6);
}

#[test]
fn precision_configuration_is_respected() {
    let mut cquad = Cquad::default();
    cquad.set_absolute(1e-3);
    cquad.set_relative(0.0);
    assert_eq!(cquad.absolute(), 1e-3);
    assert_eq!(cquad.relative(), 0.0);
    let (value, error) = cquad.integrate(&|x| x.exp(), 0.0, 1.0).unwrap();
    assert!((value - (std::f64::consts::E - 1.0)).abs() < 1e-3);
    assert!(error <= 1e-3);
}
