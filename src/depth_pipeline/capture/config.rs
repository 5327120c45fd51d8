//! Capture configuration types

use std::time::Duration;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::driver::ProcessingBackend;
use crate::depth_pipeline::point_cloud::PointCloudMode;

/// Degrees in a full turn of the turntable.
const FULL_TURN_DEGREES: u32 = 360;

/// Configuration for a capture session
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Output file prefix. `None` disables file output.
    pub output_prefix: Option<String>,
    /// Rotation step in degrees; the session captures `360 / angle` frames
    pub angle: u32,
    /// Nearest depth kept in the point cloud (millimetres)
    pub min_depth: f32,
    /// Farthest depth kept in the point cloud (millimetres)
    pub max_depth: f32,
    /// How long to wait for a frame set before giving up
    pub frame_timeout: Duration,
    /// Driver-side decoding backend
    pub backend: ProcessingBackend,
    pub point_cloud_mode: PointCloudMode,
    /// Also write CSV depth grids and `x,y,z` text point clouds
    pub text_outputs: bool,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            output_prefix: None,
            angle: FULL_TURN_DEGREES,
            min_depth: 700.0,
            max_depth: 900.0,
            frame_timeout: Duration::from_millis(5000),
            backend: ProcessingBackend::OpenGl,
            point_cloud_mode: PointCloudMode::Unproject,
            text_outputs: false,
        }
    }
}

impl CaptureConfig {
    pub fn builder() -> CaptureConfigBuilder {
        CaptureConfigBuilder::default()
    }

    /// Number of frames the session captures at most.
    pub fn iteration_count(&self) -> usize {
        (FULL_TURN_DEGREES / self.angle.max(1)) as usize
    }

    pub fn writes_files(&self) -> bool {
        self.output_prefix.is_some()
    }

    pub fn validate(&self) -> Result<()> {
        if self.angle == 0 || self.angle > FULL_TURN_DEGREES {
            return Err(CaptureError::InvalidConfig(format!(
                "angle must be between 1 and {} degrees, got {}",
                FULL_TURN_DEGREES, self.angle
            )));
        }
        if !(self.min_depth <= self.max_depth) {
            return Err(CaptureError::InvalidConfig(format!(
                "depth range [{}, {}] is empty",
                self.min_depth, self.max_depth
            )));
        }
        if self.frame_timeout.is_zero() {
            return Err(CaptureError::InvalidConfig("frame timeout must be positive".to_string()));
        }
        if self.output_prefix.as_deref() == Some("") {
            return Err(CaptureError::InvalidConfig("output prefix is empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for CaptureConfig
#[derive(Default)]
pub struct CaptureConfigBuilder {
    output_prefix: Option<Option<String>>,
    angle: Option<u32>,
    depth_range: Option<(f32, f32)>,
    frame_timeout: Option<Duration>,
    backend: Option<ProcessingBackend>,
    point_cloud_mode: Option<PointCloudMode>,
    text_outputs: Option<bool>,
}

impl CaptureConfigBuilder {
    pub fn output_prefix(mut self, prefix: Option<String>) -> Self {
        self.output_prefix = Some(prefix);
        self
    }

    pub fn angle(mut self, angle: u32) -> Self {
        self.angle = Some(angle);
        self
    }

    pub fn depth_range(mut self, min_depth: f32, max_depth: f32) -> Self {
        self.depth_range = Some((min_depth, max_depth));
        self
    }

    pub fn frame_timeout(mut self, timeout: Duration) -> Self {
        self.frame_timeout = Some(timeout);
        self
    }

    pub fn backend(mut self, backend: ProcessingBackend) -> Self {
        self.backend = Some(backend);
        self
    }

    pub fn point_cloud_mode(mut self, mode: PointCloudMode) -> Self {
        self.point_cloud_mode = Some(mode);
        self
    }

    pub fn text_outputs(mut self, enable: bool) -> Self {
        self.text_outputs = Some(enable);
        self
    }

    pub fn build(self) -> CaptureConfig {
        let default = CaptureConfig::default();
        let (min_depth, max_depth) = self
            .depth_range
            .unwrap_or((default.min_depth, default.max_depth));
        CaptureConfig {
            output_prefix: self.output_prefix.unwrap_or(default.output_prefix),
            angle: self.angle.unwrap_or(default.angle),
            min_depth,
            max_depth,
            frame_timeout: self.frame_timeout.unwrap_or(default.frame_timeout),
            backend: self.backend.unwrap_or(default.backend),
            point_cloud_mode: self.point_cloud_mode.unwrap_or(default.point_cloud_mode),
            text_outputs: self.text_outputs.unwrap_or(default.text_outputs),
        }
    }
}
