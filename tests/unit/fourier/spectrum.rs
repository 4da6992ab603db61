use super::*;

fn path(points: &[(f64, f64)]) -> PointPath {
    PointPath::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
}

fn blob(m: usize) -> PointPath {
    let pts = (0..m)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / m as f64;
            let r = 100.0 + 30.0 * (3.0 * a).cos() + 10.0 * (7.0 * a).sin();
            Point::new(200.0 + r * a.cos(), 300.0 + r * a.sin())
        })
        .collect();
    PointPath::new(pts).unwrap()
}

#[test]
fn frequency_range_has_n_contiguous_keys() {
    for n in 2..=40 {
        let r = frequency_range(TermCount::new(n).unwrap());
        assert_eq!(r.clone().count(), n);
        assert!(r.start <= 0 && r.end >= 1);
        assert!((r.start + r.end - 1).abs() <= 1);
    }
    assert_eq!(frequency_range(TermCount::new(3).unwrap()), -1..2);
    assert_eq!(frequency_range(TermCount::new(8).unwrap()), -4..4);
}

#[test]
fn term_count_clamps_into_valid_range() {
    assert_eq!(TermCount::clamp(0, 100, 501).get(), 2);
    assert_eq!(TermCount::clamp(50, 40, 501).get(), 40);
    assert_eq!(TermCount::clamp(900, 1000, 501).get(), 501);
    assert_eq!(TermCount::clamp(11, 1000, 501).get(), 11);
    assert_eq!(TermCount::clamp_f64(11.9, 1000, 501).get(), 11);
    assert_eq!(TermCount::clamp_f64(f64::NAN, 1000, 501).get(), 2);
    assert_eq!(TermCount::clamp_f64(1e300, 1000, 501).get(), 501);
    assert!(TermCount::new(1).is_err());
}

#[test]
fn spectrum_has_one_entry_per_term() {
    let p = blob(64);
    for n in [2, 3, 10, 33, 64] {
        let s = coefficients(&p, TermCount::new(n).unwrap());
        assert_eq!(s.len(), n);
        assert_eq!(s.samples(), 64);
        assert_eq!(s.frequencies(), frequency_range(TermCount::new(n).unwrap()));
        assert_eq!(s.iter().count(), n);
    }
}

#[test]
fn dc_term_is_centroid() {
    let p = path(&[(0.0, 0.0), (2.0, 0.0), (2.0, 2.0), (0.0, 2.0)]);
    let s = coefficients(&p, TermCount::new(3).unwrap());
    let c0 = s.get(0).unwrap();
    assert!((c0.re - 1.0).abs() < 1e-12);
    assert!((c0.im - 1.0).abs() < 1e-12);
    assert!(s.get(5).is_none());
    assert!(s.get(-2).is_none());
}

#[test]
fn unit_circle_has_single_harmonic() {
    let m = 32;
    let pts = (0..m)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / m as f64;
            Point::new(a.cos(), a.sin())
        })
        .collect();
    let s = coefficients(&PointPath::new(pts).unwrap(), TermCount::new(9).unwrap());
    for (n, c) in s.iter() {
        let expected = if n == 1 { 1.0 } else { 0.0 };
        assert!((c.norm() - expected).abs() < 1e-12, "n={n} |c|={}", c.norm());
    }
}

#[test]
fn identical_points_give_zero_radius_harmonics() {
    let p = path(&[(4.0, -2.0), (4.0, -2.0), (4.0, -2.0), (4.0, -2.0)]);
    let s = coefficients(&p, TermCount::new(4).unwrap());
    for (n, c) in s.iter() {
        assert!(c.re.is_finite() && c.im.is_finite());
        if n == 0 {
            assert!((c - Complex64::new(4.0, -2.0)).norm() < 1e-12);
        } else {
            assert!(c.norm() < 1e-12);
        }
    }
}

#[test]
fn parallel_matches_serial() {
    let p = blob(200);
    let n = TermCount::new(101).unwrap();
    assert_eq!(coefficients(&p, n), coefficients_par(&p, n));
}

#[test]
fn term_count_serde_rejects_small_values() {
    assert!(serde_json::from_str::<TermCount>("1").is_err());
    assert_eq!(serde_json::from_str::<TermCount>("7").unwrap().get(), 7);
}
