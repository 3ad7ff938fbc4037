use super::*;

fn nodes() -> Vec<f64> {
    vec![1.0, 2.0, 3.0, 4.0, 5.0]
}

#[test]
fn linear_interpolation_of_a_line_is_exact() {
    let x = nodes();
    let y: Vec<f64> = x.iter().map(|&v| 2.0 * v).collect();
    let interpolated = Interpolate::new(x, y, Method::Linear, true).unwrap();
    assert_eq!(interpolated.eval(2.5).unwrap(), 5.0);
    assert_eq!(interpolated.eval(1.0).unwrap(), 2.0);
    assert_eq!(interpolated.eval(5.0).unwrap(), 10.0);
}

#[test]
fn tolerant_evaluation_clamps_to_boundary_values() {
    let x = nodes();
    let y: Vec<f64> = x.iter().map(|&v| 2.0 * v).collect();
    let interpolated = Interpolate::new(x, y, Method::Linear, true).unwrap();
    assert_eq!(interpolated.eval(0.0).unwrap(), 2.0);
    assert_eq!(interpolated.eval(9.0).unwrap(), 10.0);
}

#[test]
fn strict_evaluation_signals_domain_errors() {
    let x = nodes();
    let y: Vec<f64> = x.iter().map(|&v| 2.0 * v).collect();
    let mut interpolated = Interpolate::new(x, y, Method::Linear, true).unwrap();
    interpolated.be_strict();
    assert!(!interpolated.is_tolerant());
    assert!(matches!(
        interpolated.eval(0.0),
        Err(crate::error::Error::Domain(_))
    ));
    assert!(interpolated.eval(3.3).is_ok());
    interpolated.be_tolerant();
    assert!(interpolated.eval(0.0).is_ok());
}

#[test]
fn every_method_reproduces_linear_data() {
    let x = nodes();
    let y: Vec<f64> = x.iter().map(|&v| 3.0 * v - 1.0).collect();
    for method in [
        Method::Linear,
        Method::Polynomial,
        Method::Cubic,
        Method::Akima,
        Method::Steffen,
    ] {
        let interpolated = Interpolate::new(x.clone(), y.clone(), method, true).unwrap();
        for i in 0..=20 {
            let at = 1.0 + 4.0 * i as f64 / 20.0;
            assert!(
                (interpolated.eval(at).unwrap() - (3.0 * at - 1.0)).abs() < 1e-12,
                "{method:?} deviates at {at}"
            );
        }
    }
}

#[test]
fn polynomial_reproduces_a_cubic() {
    let x = vec![0.0, 1.0, 2.0, 4.0];
    let cubic = |v: f64| v * v * v - 2.0 * v + 1.0;
    let y: Vec<f64> = x.iter().map(|&v| cubic(v)).collect();
    let interpolated = Interpolate::new(x, y, Method::Polynomial, true).unwrap();
    assert!((interpolated.eval(3.0).unwrap() - cubic(3.0)).abs() < 1e-12);
    assert!((interpolated.eval(0.5).unwrap() - cubic(0.5)).abs() < 1e-12);
}

#[test]
fn cubic_interpolates_the_nodes() {
    let x = nodes();
    let y = vec![0.0, 1.0, 0.0, -1.0, 0.0];
    let interpolated = Interpolate::new(x.clone(), y.clone(), Method::Cubic, true).unwrap();
    for (xi, yi) in x.iter().zip(y.iter()) {
        assert!((interpolated.eval(*xi).unwrap() - yi).abs() < 1e-12);
    }
}

#[test]
fn periodic_methods_interpolate_periodic_data() {
    // One full period of a sine sampled at six points.
    let n = 6;
    let x: Vec<f64> = (0..n)
        .map(|i| 2.0 * std::f64::consts::PI * i as f64 / (n - 1) as f64)
        .collect();
    let y: Vec<f64> = x.iter().map(|&v| v.sin()).collect();
    for method in [Method::CubicPeriodic, Method::AkimaPeriodic] {
        let interpolated = Interpolate::new(x.clone(), y.clone(), method, true).unwrap();
        for (xi, yi) in x.iter().zip(y.iter()) {
            assert!((interpolated.eval(*xi).unwrap() - yi).abs() < 1e-12);
        }
        // Between the nodes the interpolant stays close to the sine.
        let mid = 0.5 * (x[1] + x[2]);
        assert!((interpolated.eval(mid).unwrap() - mid.sin()).abs() < 0.1);
    }
}

#[test]
fn steffen_preserves_monotonicity() {
    let x = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
    let y = vec![0.0, 0.0, 0.1, 4.0, 4.1, 4.1];
    let interpolated = Interpolate::new(x, y, Method::Steffen, true).unwrap();
    let mut previous = interpolated.eval(0.0).unwrap();
    for i in 1..=100 {
        let value = interpolated.eval(5.0 * i as f64 / 100.0).unwrap();
        assert!(value >= previous - 1e-12);
        previous = value;
    }
}

#[test]
fn size_mismatch_is_rejected() {
    let result = Interpolate::new(vec![0.0, 1.0], vec![1.0], Method::Linear, true);
    assert!(result.is_err());
}

#[test]
fn too_few_points_are_rejected() {
    let x = vec![0.0, 1.0, 2.0, 3.0];
    let y = x.clone();
    assert!(Interpolate::new(x, y, Method::Akima, true).is_err());
}

#[test]
fn unsorted_abscissae_are_rejected() {
    let result = Interpolate::new(
        vec![0.0, 2.0, 1.0],
        vec![0.0, 0.0, 0.0],
        Method::Linear,
        true,
    );
    assert!(result.is_err());
}

#[test]
fn minimal_sizes() {
    assert_eq!(Method::Linear.min_size(), 2);
    assert_eq!(Method::Polynomial.min_size(), 3);
    assert_eq!(Method::Cubic.min_size(), 3);
    assert_eq!(Method::CubicPeriodic.min_size(), 2);
    assert_eq!(Method::Akima.min_size(), 5);
    assert_eq!(Method::AkimaPeriodic.min_size(), 5);
    assert_eq!(Method::Steffen.min_size(), 3);
}
