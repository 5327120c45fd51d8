//! Depth frame types

use crate::depth_pipeline::common::error::{CaptureError, Result};

/// Width of the time-of-flight depth image in pixels.
pub const DEPTH_WIDTH: usize = 512;
/// Height of the time-of-flight depth image in pixels.
pub const DEPTH_HEIGHT: usize = 424;

/// Anything that exposes a row-major grid of f32 depth samples.
///
/// Writers and the point cloud builder accept this so they work on both
/// driver frames and the capture buffer.
pub trait DepthSamples {
    fn width(&self) -> usize;
    fn height(&self) -> usize;
    fn samples(&self) -> &[f32];
}

/// A single depth image, one f32 per pixel (millimetres for Kinect v2 frames).
#[derive(Debug, Clone, PartialEq)]
pub struct DepthFrame {
    /// Width of the frame in pixels
    pub width: usize,
    /// Height of the frame in pixels
    pub height: usize,
    /// Row-major pixel data, `width * height` samples
    pub data: Vec<f32>,
}

impl DepthFrame {
    /// Builds a frame, checking that `data` covers exactly `width * height` pixels.
    pub fn new(width: usize, height: usize, data: Vec<f32>) -> Result<Self> {
        if width == 0 || height == 0 || width.checked_mul(height) != Some(data.len()) {
            return Err(CaptureError::InvalidDimensions(width, height));
        }
        Ok(Self { width, height, data })
    }

    /// A zero-filled frame of the given size.
    pub fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width * height],
        }
    }

    /// A frame where every pixel holds `value`.
    pub fn filled(width: usize, height: usize, value: f32) -> Self {
        Self {
            width,
            height,
            data: vec![value; width * height],
        }
    }
}

impl DepthSamples for DepthFrame {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn samples(&self) -> &[f32] {
        &self.data
    }
}
