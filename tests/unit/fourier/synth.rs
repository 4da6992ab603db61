use super::*;
use crate::geometry::resample::resample_to_count;

fn path(points: &[(f64, f64)]) -> PointPath {
    PointPath::new(points.iter().map(|&(x, y)| Point::new(x, y)).collect()).unwrap()
}

fn star(m: usize) -> PointPath {
    let pts = (0..m)
        .map(|i| {
            let a = std::f64::consts::TAU * i as f64 / m as f64;
            let r = if i % 2 == 0 { 120.0 } else { 45.0 };
            Point::new(250.0 + r * a.cos(), 250.0 + r * a.sin())
        })
        .collect();
    PointPath::new(pts).unwrap()
}

fn max_distance(a: &[Point], b: &[Point]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(p, q)| p.distance(*q))
        .fold(0.0, f64::max)
}

#[test]
fn full_series_reconstructs_exactly() {
    for m in [2, 3, 7, 40, 121] {
        let p = star(m);
        let (_, approx) = synthesize(&p, TermCount::new(m).unwrap());
        assert_eq!(approx.len(), m);
        let scale = p.bounds().width().max(p.bounds().height());
        assert!(max_distance(approx.points(), p.points()) < 1e-6 * scale);
    }
}

#[test]
fn unit_square_eight_samples_round_trip() {
    let square = path(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)]);
    let sampled = resample_to_count(&square, 8).unwrap();
    let (spectrum, approx) = synthesize(&sampled, TermCount::new(8).unwrap());
    assert_eq!(spectrum.len(), 8);
    assert!(max_distance(approx.points(), sampled.points()) < 1e-9);
}

#[test]
fn error_is_non_increasing_in_term_count() {
    let p = star(60);
    let mut prev = f64::INFINITY;
    for n in 2..=60 {
        let (_, approx) = synthesize(&p, TermCount::new(n).unwrap());
        let err = rms_error(approx.points(), p.points());
        assert!(err <= prev + 1e-9, "n={n}: {err} > {prev}");
        prev = err;
    }
    assert!(prev < 1e-9);
}

#[test]
fn parallel_matches_serial() {
    let p = star(150);
    let n = TermCount::new(75).unwrap();
    assert_eq!(synthesize(&p, n), synthesize_par(&p, n));
}

#[test]
fn identical_points_reconstruct_to_themselves() {
    let p = path(&[(7.0, 7.0), (7.0, 7.0), (7.0, 7.0)]);
    let (_, approx) = synthesize(&p, TermCount::new(2).unwrap());
    for q in approx.points() {
        assert!(q.is_finite());
        assert!(q.distance(Point::new(7.0, 7.0)) < 1e-12);
    }
}

#[test]
fn closed_output_repeats_first_point() {
    let (_, approx) = synthesize(&star(10), TermCount::new(4).unwrap());
    let closed = approx.closed_points();
    assert_eq!(closed.len(), 11);
    assert_eq!(closed[0], closed[10]);
    assert!(approx.to_bez_path().to_svg().ends_with('Z'));
}

#[test]
fn rms_error_basics() {
    let a = [Point::new(0.0, 0.0), Point::new(1.0, 0.0)];
    let b = [Point::new(0.0, 3.0), Point::new(1.0, 4.0)];
    assert!((rms_error(&a, &b) - 12.5f64.sqrt()).abs() < 1e-12);
    assert_eq!(rms_error(&[], &[]), 0.0);
}
