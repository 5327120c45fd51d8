//! Types exchanged with the camera driver

use std::fmt;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::frame::DepthFrame;

/// Driver-side strategy used to decode raw sensor packets into frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ProcessingBackend {
    /// Plain CPU decoding
    Cpu,
    /// OpenGL accelerated decoding
    #[default]
    #[value(name = "opengl")]
    OpenGl,
    /// CUDA accelerated decoding
    Cuda,
}

impl fmt::Display for ProcessingBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProcessingBackend::Cpu => "cpu",
            ProcessingBackend::OpenGl => "opengl",
            ProcessingBackend::Cuda => "cuda",
        };
        f.write_str(name)
    }
}

/// Channels a frame listener can subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Color,
    Ir,
    Depth,
}

impl FrameKind {
    pub const ALL: [FrameKind; 3] = [FrameKind::Color, FrameKind::Ir, FrameKind::Depth];
}

/// Full-HD color stream resolution of the Kinect v2.
pub const COLOR_WIDTH: usize = 1920;
pub const COLOR_HEIGHT: usize = 1080;

/// Packed color image as delivered by the driver (BGRX for Kinect v2).
#[derive(Debug, Clone, Default)]
pub struct ColorFrame {
    pub width: usize,
    pub height: usize,
    pub bytes_per_pixel: usize,
    pub data: Vec<u8>,
}

impl ColorFrame {
    /// An all-black BGRX frame.
    pub fn blank(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            bytes_per_pixel: 4,
            data: vec![0; width * height * 4],
        }
    }

    /// Whether `data` holds every pixel the dimensions promise.
    pub fn is_complete(&self) -> bool {
        self.data.len() == self.width * self.height * self.bytes_per_pixel
    }
}

/// One synchronized capture event.
///
/// Handed out by [`DepthDevice::wait_for_new_frame`](super::DepthDevice::wait_for_new_frame)
/// and given back by value through `release`, so each set is released exactly once.
#[derive(Debug, Default)]
pub struct FrameSet {
    pub color: Option<ColorFrame>,
    pub ir: Option<DepthFrame>,
    pub depth: Option<DepthFrame>,
}

impl FrameSet {
    pub fn depth(&self) -> Result<&DepthFrame> {
        self.depth
            .as_ref()
            .ok_or(CaptureError::MissingFrame(FrameKind::Depth))
    }

    pub fn color(&self) -> Option<&ColorFrame> {
        self.color.as_ref()
    }

    pub fn ir(&self) -> Option<&DepthFrame> {
        self.ir.as_ref()
    }
}

/// Depth (IR) camera intrinsic calibration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraIntrinsics {
    /// Focal length x (pixels)
    pub fx: f32,
    /// Focal length y (pixels)
    pub fy: f32,
    /// Principal point x (pixels)
    pub cx: f32,
    /// Principal point y (pixels)
    pub cy: f32,
    /// Radial distortion, 1st to 3rd order
    pub k1: f32,
    pub k2: f32,
    pub k3: f32,
    /// Tangential distortion
    pub p1: f32,
    pub p2: f32,
}

impl CameraIntrinsics {
    /// Factory preset the Kinect v2 reports when no per-device calibration is read.
    pub fn kinect_v2_default() -> Self {
        Self {
            fx: 365.456,
            fy: 365.456,
            cx: 254.878,
            cy: 205.395,
            k1: 0.0905474,
            k2: -0.26819,
            k3: 0.0950862,
            p1: 0.0,
            p2: 0.0,
        }
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self::kinect_v2_default()
    }
}
