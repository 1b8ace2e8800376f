//! Motion estimation and compensation integration tests.

use oxicodec_core::{GrayImage, mse};
use oxicodec_motion::{MotionEstimator, MotionVectorField, compensate};

fn world(x: usize, y: usize) -> u8 {
    (128.0 + 40.0 * (x as f64 / 8.0).sin() + 40.0 * (y as f64 / 8.0).cos()) as u8
}

fn crop(ox: usize, oy: usize) -> GrayImage {
    GrayImage::from_fn(32, 32, |x, y| world(x + ox, y + oy)).expect("frame build failed")
}

#[test]
fn test_known_shift_recovered() {
    let (dx0, dy0) = (2i32, -1i32);
    let reference = crop(10, 10);
    // current(x, y) = reference(x + dx0, y + dy0)
    let current = crop(12, 9);

    let estimator = MotionEstimator::new(8, 4).expect("invalid estimator");
    let field = estimator.estimate(&reference, &current).expect("estimation failed");
    assert_eq!(field.len(), 16);

    for v in &field {
        let inside = v.block_x as i32 + dx0 >= 0
            && v.block_x as i32 + dx0 + 8 <= 32
            && v.block_y as i32 + dy0 >= 0
            && v.block_y as i32 + dy0 + 8 <= 32;
        if inside {
            assert_eq!((v.dx, v.dy), (dx0, dy0), "block ({}, {})", v.block_x, v.block_y);
        }
    }

    let predicted = compensate(&reference, &field, 8).expect("compensation failed");
    assert!(mse(&current, &predicted).unwrap() < 50.0);
}

#[test]
fn test_field_survives_serialization() {
    let reference = crop(0, 0);
    let current = crop(1, 2);
    let field = MotionEstimator::default()
        .estimate(&reference, &current)
        .expect("estimation failed");
    let bytes = field.to_bytes().expect("serialization failed");
    assert_eq!(bytes.len(), field.encoded_len());

    let parsed = MotionVectorField::from_bytes(&bytes).expect("parse failed");
    assert_eq!(
        compensate(&reference, &parsed, 8).unwrap(),
        compensate(&reference, &field, 8).unwrap()
    );
}

#[test]
fn test_window_bounds_displacement() {
    let reference = crop(20, 20);
    let current = crop(26, 20);
    let field = MotionEstimator::new(8, 3)
        .expect("invalid estimator")
        .estimate(&reference, &current)
        .expect("estimation failed");
    assert!(field.iter().all(|v| v.dx.abs() <= 3 && v.dy.abs() <= 3));
}
