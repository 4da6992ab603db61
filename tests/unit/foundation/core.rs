use super::*;

fn square() -> PointPath {
    PointPath::new(vec![
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
    .unwrap()
}

#[test]
fn point_path_requires_two_points() {
    assert!(matches!(
        PointPath::new(vec![]),
        Err(EpicycleError::InsufficientPoints { found: 0 })
    ));
    assert!(matches!(
        PointPath::new(vec![Point::new(1.0, 2.0)]),
        Err(EpicycleError::InsufficientPoints { found: 1 })
    ));
    assert!(PointPath::new(vec![Point::ZERO, Point::new(1.0, 0.0)]).is_ok());
}

#[test]
fn point_path_rejects_non_finite() {
    let err = PointPath::new(vec![Point::ZERO, Point::new(f64::NAN, 0.0)]).unwrap_err();
    assert!(matches!(err, EpicycleError::Validation(_)));
}

#[test]
fn perimeter_includes_closing_edge() {
    assert!((square().perimeter() - 4.0).abs() < 1e-12);

    let seg = PointPath::new(vec![Point::ZERO, Point::new(3.0, 4.0)]).unwrap();
    assert!((seg.perimeter() - 10.0).abs() < 1e-12);
}

#[test]
fn closed_points_repeat_first() {
    let pts = square().closed_points();
    assert_eq!(pts.len(), 5);
    assert_eq!(pts[0], pts[4]);
}

#[test]
fn bounds_cover_all_points() {
    let r = square().bounds();
    assert_eq!(r, Rect::new(0.0, 0.0, 1.0, 1.0));
    assert!(bounds_of(&[]).is_none());
}

#[test]
fn serde_roundtrip_validates() {
    let json = serde_json::to_string(&square()).unwrap();
    let back: PointPath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, square());

    let one = r#"[{"x":1.0,"y":2.0}]"#;
    assert!(serde_json::from_str::<PointPath>(one).is_err());
}

#[test]
fn viewport_validation() {
    assert!(Viewport::new(100.0, 200.0).is_ok());
    assert!(Viewport::new(0.0, 200.0).is_err());
    assert!(Viewport::new(100.0, f64::INFINITY).is_err());
}
