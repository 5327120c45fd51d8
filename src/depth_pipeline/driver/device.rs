use std::time::Duration;

use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::driver::types::{CameraIntrinsics, FrameKind, FrameSet, ProcessingBackend};

/// Entry point of a camera driver: discovers and opens devices.
pub trait DepthDriver {
    type Device: DepthDevice;

    /// Number of devices currently attached.
    fn enumerate_devices(&mut self) -> usize;

    /// Opens the default (first) device using the given processing backend.
    fn open_default_device(&mut self, backend: ProcessingBackend) -> Result<Self::Device>;
}

/// An opened camera.
///
/// Frame sets returned by `wait_for_new_frame` hold driver buffers and must be
/// passed back through `release` before the next wait.
pub trait DepthDevice {
    fn serial_number(&self) -> String;

    fn firmware_version(&self) -> String;

    /// Registers a synchronized listener for the given channels.
    fn set_frame_listener(&mut self, kinds: &[FrameKind]);

    fn start_streams(&mut self, enable_color: bool, enable_depth: bool) -> Result<()>;

    /// Blocks until a complete frame set arrives. `Ok(None)` means the timeout elapsed.
    fn wait_for_new_frame(&mut self, timeout: Duration) -> Result<Option<FrameSet>>;

    fn release(&mut self, frames: FrameSet);

    fn ir_camera_params(&self) -> CameraIntrinsics;

    fn stop(&mut self) -> Result<()>;

    fn close(&mut self) -> Result<()>;
}
