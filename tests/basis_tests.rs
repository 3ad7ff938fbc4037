//! End-to-end construction and evaluation of a KT basis on both contour
//! families.

use std::sync::Arc;

use khuri_treiman::kernel::{threshold, Method};
use khuri_treiman::{make_basis, Complex, ComplexFunction, Grid, Omnes, Piecewise, Settings};

fn omnes_with_constant_phase(pion_mass: f64) -> Omnes {
    Omnes::new(
        Arc::new(|_| std::f64::consts::PI),
        threshold(pion_mass),
        1e-10,
        Settings::default(),
    )
    .unwrap()
}

fn weak_amplitude(pion_mass: f64) -> ComplexFunction {
    Arc::new(move |s| khuri_treiman::chpt::t2(pion_mass, s, 10.0))
}

#[test]
fn real_contour_basis() {
    let pion_mass = 1.0;
    let virtuality = 0.0;
    let curve = Piecewise::real(threshold(pion_mass), 100.0).unwrap();
    let grid = Grid::new(curve, vec![5], 2).unwrap();
    let basis = make_basis(
        omnes_with_constant_phase(pion_mass),
        weak_amplitude(pion_mass),
        1,
        grid,
        pion_mass,
        virtuality,
        Method::Inverse,
    )
    .unwrap();

    // Off the contour, below the real axis.
    let value = basis.eval(0, Complex::new(2.0, -10.0)).unwrap();
    assert!(value.is_finite());
    // The subtraction point pins the basis function to the Omnes function.
    let at_origin = basis.eval(0, Complex::new(0.0, 0.0)).unwrap();
    assert!((at_origin - Complex::new(1.0, 0.0)).norm() < 1e-6);
}

#[test]
fn solver_choice_does_not_change_the_basis() {
    let pion_mass = 1.0;
    let virtuality = 0.0;
    let curve = Piecewise::real(threshold(pion_mass), 100.0).unwrap();

    let mut values = Vec::new();
    for method in [Method::Inverse, Method::Iteration(Some(1e-14))] {
        let grid = Grid::new(curve.clone(), vec![5], 2).unwrap();
        let basis = make_basis(
            omnes_with_constant_phase(pion_mass),
            weak_amplitude(pion_mass),
            1,
            grid,
            pion_mass,
            virtuality,
            method,
        )
        .unwrap();
        values.push(basis.eval(0, Complex::new(-3.0, 0.5)).unwrap());
    }
    assert!((values[0] - values[1]).norm() < 1e-6);
}

#[test]
fn decay_contour_basis_threshold_guard() {
    let pion_mass = 0.14;
    let virtuality = 0.5;
    let curve = Piecewise::vector_decay(pion_mass, virtuality, 10.0).unwrap();
    let grid = Grid::new(curve, vec![4; 5], 3).unwrap();
    let basis = make_basis(
        omnes_with_constant_phase(pion_mass),
        weak_amplitude(pion_mass),
        1,
        grid,
        pion_mass,
        virtuality,
        Method::Inverse,
    )
    .unwrap();

    // Exactly at the two-pion threshold, where the contour starts: the
    // averaging prescription keeps the evaluation finite.
    let at_threshold = basis
        .eval(0, Complex::new(threshold(pion_mass), 0.0))
        .unwrap();
    assert!(at_threshold.is_finite());

    // A probe on the straight real tail of the deformed contour exercises
    // the principal-value prescription.
    let on_tail = basis.eval(0, Complex::new(5.0, 0.0)).unwrap();
    assert!(on_tail.is_finite());
}
