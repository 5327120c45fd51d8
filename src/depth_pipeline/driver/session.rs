use std::time::Duration;

use tracing::{debug, info, warn};

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::driver::device::{DepthDevice, DepthDriver};
use crate::depth_pipeline::driver::types::{CameraIntrinsics, FrameKind, FrameSet, ProcessingBackend};

/// An opened, streaming device.
///
/// Dropping the session stops the streams and closes the device, so teardown
/// also happens when capture bails out with an error.
pub struct StreamingSession<D: DepthDevice> {
    device: D,
    streaming: bool,
    closed: bool,
}

impl<D: DepthDevice> StreamingSession<D> {
    /// Discovers a device, opens it with `backend`, registers color/IR/depth
    /// listeners and starts the depth stream with color disabled.
    pub fn open<Dr>(driver: &mut Dr, backend: ProcessingBackend) -> Result<Self>
    where
        Dr: DepthDriver<Device = D>,
    {
        let count = driver.enumerate_devices();
        info!("Found {} device(s)", count);
        if count == 0 {
            return Err(CaptureError::NoDevice);
        }

        let device = driver.open_default_device(backend)?;
        info!(backend = %backend, "Opened default device");

        let mut session = Self {
            device,
            streaming: false,
            closed: false,
        };

        session.device.set_frame_listener(&FrameKind::ALL);
        session.device.start_streams(false, true)?;
        session.streaming = true;

        info!(
            serial = %session.device.serial_number(),
            firmware = %session.device.firmware_version(),
            "Streaming started"
        );

        Ok(session)
    }

    /// Waits for the next frame set. A timeout is reported as an error.
    pub fn wait_for_frames(&mut self, timeout: Duration) -> Result<FrameSet> {
        match self.device.wait_for_new_frame(timeout)? {
            Some(frames) => Ok(frames),
            None => Err(CaptureError::FrameTimeout(timeout)),
        }
    }

    pub fn release(&mut self, frames: FrameSet) {
        self.device.release(frames);
    }

    pub fn intrinsics(&self) -> CameraIntrinsics {
        self.device.ir_camera_params()
    }

    /// Stops and closes the device, reporting teardown failures.
    pub fn shutdown(mut self) -> Result<()> {
        self.teardown()
    }

    fn teardown(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }

        let stopped = if self.streaming {
            self.streaming = false;
            self.device.stop()
        } else {
            Ok(())
        };
        self.closed = true;
        let closed = self.device.close();

        debug!("Device stopped and closed");
        stopped.and(closed)
    }
}

impl<D: DepthDevice> Drop for StreamingSession<D> {
    fn drop(&mut self) {
        if let Err(e) = self.teardown() {
            warn!("Device teardown failed: {}", e);
        }
    }
}
