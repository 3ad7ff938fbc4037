use super::*;

#[test]
fn single_point_rule() {
    let rule = Rule::new(1);
    assert_eq!(rule.size(), 1);
    let (x, w) = rule.point(-1.0, 1.0, 0);
    assert_eq!(x, 0.0);
    assert_eq!(w, 2.0);
}

#[test]
fn nodes_are_symmetric_and_weights_positive() {
    let rule = Rule::new(7);
    for i in 0..7 {
        let (x, w) = rule.point(-1.0, 1.0, i);
        let (x_mirror, w_mirror) = rule.point(-1.0, 1.0, 6 - i);
        assert!((x + x_mirror).abs() < 1e-14);
        assert!((w - w_mirror).abs() < 1e-14);
        assert!(w > 0.0);
    }
}

#[test]
fn weights_sum_to_interval_length() {
    let rule = Rule::new(10);
    let sum: f64 = (0..10).map(|i| rule.point(2.0, 9.0, i).1).sum();
    assert!((sum - 7.0).abs() < 1e-12);
}

#[test]
fn three_points_integrate_a_quintic_exactly() {
    // A 3-point rule is exact up to degree five.
    let rule = Rule::new(3);
    let f = |x: f64| 2.0 * x.powi(5) - x * x + 3.5 * x - 1.0;
    let value = rule.integrate(f, -2.0, 5.0);
    assert!((value - 5172.4166666).abs() < 1e-2);
}

#[test]
fn reversing_the_limits_negates_the_result() {
    let rule = Rule::new(3);
    let f = |x: f64| 2.0 * x.powi(5) - x * x + 3.5 * x - 1.0;
    let forward = rule.integrate(f, -2.0, 5.0);
    let backward = rule.integrate(f, 5.0, -2.0);
    assert!((forward + backward).abs() < 1e-8);
}

#[test]
fn high_order_rule_handles_smooth_integrand() {
    let rule = Rule::new(32);
    let value = rule.integrate(f64::sin, 0.0, std::f64::consts::PI);
    assert!((value - 2.0).abs() < 1e-12);
}

#[test]
fn resize_changes_the_order() {
    let mut rule = Rule::new(3);
    rule.resize(8);
    assert_eq!(rule.size(), 8);
    // Resizing to the current size keeps the rule intact.
    rule.resize(8);
    assert_eq!(rule.size(), 8);
}

#[test]
#[should_panic(expected = "requested knot index exceeds rule size")]
fn out_of_range_knot_panics() {
    let rule = Rule::new(3);
    let _ = rule.point(0.0, 1.0, 3);
}
