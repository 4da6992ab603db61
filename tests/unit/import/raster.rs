use std::io::Cursor;

use super::*;

fn encode_png(img: &image::RgbaImage) -> Vec<u8> {
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

fn canvas(w: u32, h: u32, bg: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(w, h, image::Rgba(bg))
}

fn fill_rect(img: &mut image::RgbaImage, x0: u32, y0: u32, x1: u32, y1: u32, c: [u8; 4]) {
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, image::Rgba(c));
        }
    }
}

const WHITE: [u8; 4] = [255, 255, 255, 255];
const BLACK: [u8; 4] = [0, 0, 0, 255];

#[test]
fn filled_square_boundary_pixels() {
    let mut img = canvas(32, 32, WHITE);
    fill_rect(&mut img, 5, 5, 15, 15, BLACK);
    let pts = trace_silhouette(&encode_png(&img), &SilhouetteOptions::default()).unwrap();
    assert_eq!(pts.len(), 36);
    assert_eq!(pts[0], Point::new(5.5, 5.5));
    for p in &pts {
        let on_x_edge = p.x == 5.5 || p.x == 14.5;
        let on_y_edge = p.y == 5.5 || p.y == 14.5;
        assert!(on_x_edge || on_y_edge, "{p:?} is not on the boundary");
    }
}

#[test]
fn disc_contour_is_roughly_circular() {
    let mut img = canvas(64, 64, WHITE);
    for y in 0..64u32 {
        for x in 0..64u32 {
            let dx = x as f64 + 0.5 - 32.0;
            let dy = y as f64 + 0.5 - 32.0;
            if dx.hypot(dy) <= 20.0 {
                img.put_pixel(x, y, image::Rgba(BLACK));
            }
        }
    }
    let pts = trace_silhouette(&encode_png(&img), &SilhouetteOptions::default()).unwrap();
    assert!(pts.len() > 60);
    for p in &pts {
        let r = (p.x - 32.0).hypot(p.y - 32.0);
        assert!((r - 20.0).abs() < 1.5, "r = {r}");
    }
}

#[test]
fn largest_component_wins() {
    let mut img = canvas(40, 40, WHITE);
    fill_rect(&mut img, 1, 1, 4, 4, BLACK);
    fill_rect(&mut img, 10, 10, 30, 30, BLACK);
    let pts = trace_silhouette(&encode_png(&img), &SilhouetteOptions::default()).unwrap();
    assert!(pts.iter().all(|p| p.x >= 10.0 && p.y >= 10.0));
}

#[test]
fn alpha_mask_is_used_when_transparent() {
    let mut img = canvas(20, 20, [0, 0, 0, 0]);
    fill_rect(&mut img, 4, 4, 12, 12, WHITE);
    let pts = trace_silhouette(&encode_png(&img), &SilhouetteOptions::default()).unwrap();
    assert_eq!(pts.len(), 28);
}

#[test]
fn long_contours_are_decimated() {
    let mut img = canvas(200, 200, WHITE);
    fill_rect(&mut img, 10, 10, 190, 190, BLACK);
    let opts = SilhouetteOptions {
        max_points: 100,
        ..SilhouetteOptions::default()
    };
    let pts = trace_silhouette(&encode_png(&img), &opts).unwrap();
    // 716 boundary pixels, every 7th kept.
    assert_eq!(pts.len(), 103);
}

#[test]
fn blank_and_tiny_images_are_rejected() {
    let img = canvas(8, 8, WHITE);
    assert!(matches!(
        trace_silhouette(&encode_png(&img), &SilhouetteOptions::default()),
        Err(EpicycleError::Import(_))
    ));

    let mut dot = canvas(8, 8, WHITE);
    dot.put_pixel(3, 3, image::Rgba(BLACK));
    assert!(trace_silhouette(&encode_png(&dot), &SilhouetteOptions::default()).is_err());

    assert!(trace_silhouette(b"not an image", &SilhouetteOptions::default()).is_err());
}
