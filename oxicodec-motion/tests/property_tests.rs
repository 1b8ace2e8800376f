use oxicodec_core::GrayImage;
use oxicodec_motion::{MotionEstimator, compensate};
use proptest::prelude::*;

fn frame(width: usize, height: usize, pixels: &[u8]) -> GrayImage {
    GrayImage::from_fn(width, height, |x, y| pixels[(y * width + x) % pixels.len()]).unwrap()
}

proptest! {
    #[test]
    fn test_vectors_stay_inside_reference(
        width in 1..40usize,
        height in 1..40usize,
        window in 0..6usize,
        a in prop::collection::vec(any::<u8>(), 1..64),
        b in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        let reference = frame(width, height, &a);
        let current = frame(width, height, &b);
        let field = MotionEstimator::new(8, window).unwrap().estimate(&reference, &current).unwrap();

        prop_assert_eq!(field.len(), width.div_ceil(8) * height.div_ceil(8));
        // Frames smaller than a block match the whole frame along that axis.
        let (block_w, block_h) = (8.min(width), 8.min(height));
        for v in &field {
            let (rx, ry) = v.source().unwrap();
            prop_assert!(rx + block_w <= width && ry + block_h <= height);
        }
        prop_assert!(compensate(&reference, &field, 8).is_ok());
    }

    #[test]
    fn test_self_prediction_is_exact(
        width in 8..40usize,
        height in 8..40usize,
        pixels in prop::collection::vec(any::<u8>(), 1..64),
    ) {
        // A frame always matches itself, but edge tiles may not reach the
        // zero offset, so only full interior tiles are compared.
        let reference = frame(width, height, &pixels);
        let field = MotionEstimator::new(8, 2).unwrap().estimate(&reference, &reference).unwrap();
        let predicted = compensate(&reference, &field, 8).unwrap();
        for y in 0..(height / 8) * 8 {
            for x in 0..(width / 8) * 8 {
                prop_assert_eq!(predicted.pixel(x, y), reference.pixel(x, y));
            }
        }
    }
}
