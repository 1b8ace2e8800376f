//! Predictive I/P frame coder.
//!
//! The first frame is intra coded with the block-DCT codec. Every later
//! frame is predicted from the previous reconstruction by block motion
//! compensation, and only the residual goes through the block DCT.
//!
//! The encoder predicts from its own reconstruction (what the decoder will
//! hold), not from the source frame, so quantization error does not
//! accumulate along the sequence.
//!
//! P-frame payload, little-endian:
//!
//! ```text
//! u8 quality | u32 block_size | u32 field_len | motion field | residual blocks
//! ```

use crate::frame::{CodedFrame, FrameType, read_stream, write_stream};
use log::{debug, error, warn};
use oxicodec_core::buffer::try_with_capacity;
use oxicodec_core::bytes::ByteCursor;
use oxicodec_core::error::{CodecError, Result};
use oxicodec_core::image::GrayImage;
use oxicodec_motion::{MotionEstimator, MotionVectorField, compensate};
use oxicodec_transform::JpegCodec;
use oxicodec_transform::buffer::{TransformBuffer, clamp_to_pixel};

/// Fixed part of a P-frame payload.
const P_HEADER_LEN: usize = 9;

/// Encoder parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoConfig {
    /// Motion tile edge length.
    pub block_size: usize,
    /// Motion search radius.
    pub search_window: usize,
    /// Block-DCT quality for intra frames and residuals (1..=100).
    pub quality: u8,
}

impl VideoConfig {
    /// Build the motion estimator and transform codec, validating the
    /// parameters.
    fn components(&self) -> Result<(MotionEstimator, JpegCodec)> {
        let estimator = MotionEstimator::new(self.block_size, self.search_window)?;
        let codec = JpegCodec::new(self.quality)?;
        Ok((estimator, codec))
    }
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            block_size: MotionEstimator::DEFAULT_BLOCK_SIZE,
            search_window: MotionEstimator::DEFAULT_SEARCH_WINDOW,
            quality: JpegCodec::DEFAULT_QUALITY,
        }
    }
}

/// `prediction + residual`, clamped to pixels.
fn reconstruct(prediction: &GrayImage, residual: &TransformBuffer) -> Result<GrayImage> {
    let pixels = prediction
        .as_bytes()
        .iter()
        .zip(residual.as_slice())
        .map(|(&p, &r)| clamp_to_pixel(p as f64 + r))
        .collect();
    GrayImage::new(prediction.width(), prediction.height(), pixels)
}

/// Frame-at-a-time encoder.
#[derive(Debug, Clone)]
pub struct PredictiveEncoder {
    estimator: MotionEstimator,
    codec: JpegCodec,
    reference: Option<GrayImage>,
    frames: usize,
}

impl PredictiveEncoder {
    /// Create an encoder; fails on invalid parameters.
    pub fn new(config: &VideoConfig) -> Result<Self> {
        let (estimator, codec) = config.components()?;
        Ok(Self {
            estimator,
            codec,
            reference: None,
            frames: 0,
        })
    }

    /// Frames encoded so far.
    pub fn frames_encoded(&self) -> usize {
        self.frames
    }

    /// Reconstruction of the last encoded frame, as the decoder will see it.
    pub fn reference(&self) -> Option<&GrayImage> {
        self.reference.as_ref()
    }

    /// Encode the next frame.
    pub fn encode_frame(&mut self, frame: &GrayImage) -> Result<CodedFrame> {
        let (width, height) = frame.dimensions();
        let (coded, reconstruction) = match &self.reference {
            None => self.encode_intra(frame)?,
            Some(reference) => {
                if let Err(err) = reference.ensure_same_dimensions(frame) {
                    error!(
                        "video: frame {} is {width}x{height}, sequence is {}x{}",
                        self.frames,
                        reference.width(),
                        reference.height()
                    );
                    return Err(err);
                }
                self.encode_predicted(reference, frame)?
            }
        };

        debug!(
            "video: frame {} coded as {} in {} bytes",
            self.frames,
            coded.frame_type.as_char(),
            coded.payload.len()
        );
        self.reference = Some(reconstruction);
        self.frames += 1;
        Ok(coded)
    }

    fn encode_intra(&self, frame: &GrayImage) -> Result<(CodedFrame, GrayImage)> {
        let (width, height) = frame.dimensions();
        let payload = self.codec.encode(frame)?;
        let reconstruction = JpegCodec::decode(&payload, width, height)?;
        let coded = CodedFrame {
            frame_type: FrameType::Intra,
            width,
            height,
            payload,
        };
        Ok((coded, reconstruction))
    }

    fn encode_predicted(
        &self,
        reference: &GrayImage,
        frame: &GrayImage,
    ) -> Result<(CodedFrame, GrayImage)> {
        let (width, height) = frame.dimensions();
        let block_size = self.estimator.block_size();

        let field = self.estimator.estimate(reference, frame)?;
        let prediction = compensate(reference, &field, block_size)?;

        let mut residual = TransformBuffer::new(width, height)?;
        for ((dst, &cur), &pred) in residual
            .as_mut_slice()
            .iter_mut()
            .zip(frame.as_bytes())
            .zip(prediction.as_bytes())
        {
            *dst = cur as f64 - pred as f64;
        }
        let residual_bytes = self.codec.encode_plane(&residual)?;
        let decoded_residual = self.codec.decode_plane(&residual_bytes, width, height)?;
        let reconstruction = reconstruct(&prediction, &decoded_residual)?;

        let field_bytes = field.to_bytes()?;
        let field_len = u32::try_from(field_bytes.len())
            .map_err(|_| CodecError::invalid_argument("motion field too large"))?;
        let mut payload = try_with_capacity(P_HEADER_LEN + field_bytes.len() + residual_bytes.len())?;
        payload.push(self.codec.quality());
        payload.extend_from_slice(&(block_size as u32).to_le_bytes());
        payload.extend_from_slice(&field_len.to_le_bytes());
        payload.extend_from_slice(&field_bytes);
        payload.extend_from_slice(&residual_bytes);

        let coded = CodedFrame {
            frame_type: FrameType::Predicted,
            width,
            height,
            payload,
        };
        Ok((coded, reconstruction))
    }
}

/// Frame-at-a-time decoder. Frames must arrive in stream order.
#[derive(Debug, Clone, Default)]
pub struct PredictiveDecoder {
    reference: Option<GrayImage>,
    frames: usize,
}

impl PredictiveDecoder {
    /// Create a decoder with no reference frame.
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames decoded so far.
    pub fn frames_decoded(&self) -> usize {
        self.frames
    }

    /// Decode the next frame.
    pub fn decode_frame(&mut self, coded: &CodedFrame) -> Result<GrayImage> {
        let (width, height) = (coded.width, coded.height);
        let frame = match coded.frame_type {
            FrameType::Intra => JpegCodec::decode(&coded.payload, width, height)?,
            FrameType::Predicted => {
                let Some(reference) = &self.reference else {
                    warn!("video: P-frame {} has no reference frame", self.frames);
                    return Err(CodecError::corrupted(
                        0,
                        format!("P-frame {} has no reference frame", self.frames),
                    ));
                };
                if reference.dimensions() != (width, height) {
                    error!(
                        "video: P-frame {} is {width}x{height}, reference is {}x{}",
                        self.frames,
                        reference.width(),
                        reference.height()
                    );
                    return Err(CodecError::dimension_mismatch(
                        reference.dimensions(),
                        (width, height),
                    ));
                }
                decode_predicted(reference, &coded.payload, width, height)?
            }
        };

        debug!(
            "video: decoded frame {} ({}) {width}x{height}",
            self.frames,
            coded.frame_type.as_char()
        );
        self.reference = Some(frame.clone());
        self.frames += 1;
        Ok(frame)
    }
}

fn decode_predicted(
    reference: &GrayImage,
    payload: &[u8],
    width: usize,
    height: usize,
) -> Result<GrayImage> {
    let mut cursor = ByteCursor::new(payload);
    let quality = cursor.read_u8()?;
    let codec = JpegCodec::new(quality)
        .map_err(|_| CodecError::corrupted(0, format!("residual quality {quality} out of range")))?;
    let block_size = cursor.read_u32_le()? as usize;
    let field_len = cursor.read_u32_le()? as usize;
    let field = MotionVectorField::from_bytes(cursor.take(field_len)?)?;

    let prediction = compensate(reference, &field, block_size)?;
    let residual = codec.decode_plane(cursor.rest(), width, height)?;
    reconstruct(&prediction, &residual)
}

/// Encode every frame of a sequence.
pub fn encode_frames(frames: &[GrayImage], config: &VideoConfig) -> Result<Vec<CodedFrame>> {
    let mut encoder = PredictiveEncoder::new(config)?;
    frames.iter().map(|f| encoder.encode_frame(f)).collect()
}

/// Encode a sequence into a stream.
pub fn encode_sequence(frames: &[GrayImage], config: &VideoConfig) -> Result<Vec<u8>> {
    write_stream(&encode_frames(frames, config)?)
}

/// Decode every frame of a stream.
pub fn decode_sequence(data: &[u8]) -> Result<Vec<GrayImage>> {
    let mut decoder = PredictiveDecoder::new();
    read_stream(data)?
        .iter()
        .map(|coded| decoder.decode_frame(coded))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use oxicodec_core::image::mse;

    fn world(x: usize, y: usize) -> u8 {
        (128.0 + 40.0 * (x as f64 / 8.0).sin() + 40.0 * (y as f64 / 8.0).cos()) as u8
    }

    fn panning(count: usize) -> Vec<GrayImage> {
        (0..count)
            .map(|t| GrayImage::from_fn(32, 32, |x, y| world(x + 10 + 2 * t, y + 10 + t)).unwrap())
            .collect()
    }

    #[test]
    fn test_frame_types() {
        let coded = encode_frames(&panning(3), &VideoConfig::default()).unwrap();
        let types: Vec<_> = coded.iter().map(|f| f.frame_type).collect();
        assert_eq!(
            types,
            vec![FrameType::Intra, FrameType::Predicted, FrameType::Predicted]
        );
    }

    #[test]
    fn test_encoder_tracks_decoder() {
        let frames = panning(4);
        let mut encoder = PredictiveEncoder::new(&VideoConfig::default()).unwrap();
        let mut decoder = PredictiveDecoder::new();
        for frame in &frames {
            let coded = encoder.encode_frame(frame).unwrap();
            let decoded = decoder.decode_frame(&coded).unwrap();
            assert_eq!(Some(&decoded), encoder.reference());
        }
        assert_eq!(encoder.frames_encoded(), 4);
        assert_eq!(decoder.frames_decoded(), 4);
    }

    #[test]
    fn test_p_frame_without_reference() {
        let coded = encode_frames(&panning(2), &VideoConfig::default()).unwrap();
        let mut decoder = PredictiveDecoder::new();
        assert!(matches!(
            decoder.decode_frame(&coded[1]),
            Err(CodecError::Corrupted { .. })
        ));
    }

    #[test]
    fn test_size_change_aborts() {
        let mut frames = panning(2);
        frames.push(GrayImage::filled(16, 16, 0).unwrap());
        assert!(matches!(
            encode_sequence(&frames, &VideoConfig::default()),
            Err(CodecError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_invalid_config() {
        let config = VideoConfig {
            quality: 0,
            ..VideoConfig::default()
        };
        assert!(PredictiveEncoder::new(&config).is_err());
        let config = VideoConfig {
            block_size: 0,
            ..VideoConfig::default()
        };
        assert!(encode_sequence(&panning(1), &config).is_err());
    }

    #[test]
    fn test_static_scene_residual_small() {
        let frame = GrayImage::from_fn(32, 32, world).unwrap();
        let frames = vec![frame.clone(), frame.clone(), frame];
        let decoded = decode_sequence(&encode_sequence(&frames, &VideoConfig::default()).unwrap()).unwrap();
        for (orig, dec) in frames.iter().zip(&decoded) {
            assert!(mse(orig, dec).unwrap() < 10.0);
        }
    }
}
