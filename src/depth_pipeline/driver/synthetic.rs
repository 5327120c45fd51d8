//! Driver that renders frames in software.
//!
//! Useful without hardware attached: every frame shows a plane tilted along x
//! whose depth runs from 600mm at the left edge to 1000mm at the right edge.

use std::time::Duration;

use tracing::debug;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::driver::device::{DepthDevice, DepthDriver};
use crate::depth_pipeline::driver::types::{
    CameraIntrinsics, ColorFrame, FrameKind, FrameSet, ProcessingBackend, COLOR_HEIGHT, COLOR_WIDTH,
};
use crate::depth_pipeline::frame::{DepthFrame, DEPTH_HEIGHT, DEPTH_WIDTH};

const NEAR_MM: f32 = 600.0;
const FAR_MM: f32 = 1000.0;

pub struct SyntheticDriver {
    device_count: usize,
}

impl SyntheticDriver {
    pub fn new() -> Self {
        Self { device_count: 1 }
    }

    /// A driver that reports no attached devices.
    pub fn disconnected() -> Self {
        Self { device_count: 0 }
    }
}

impl Default for SyntheticDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl DepthDriver for SyntheticDriver {
    type Device = SyntheticDevice;

    fn enumerate_devices(&mut self) -> usize {
        self.device_count
    }

    fn open_default_device(&mut self, backend: ProcessingBackend) -> Result<SyntheticDevice> {
        if self.device_count == 0 {
            return Err(CaptureError::NoDevice);
        }
        debug!(backend = %backend, "Opening synthetic device");
        Ok(SyntheticDevice::new())
    }
}

pub struct SyntheticDevice {
    listeners: Vec<FrameKind>,
    streaming: bool,
    outstanding: bool,
    frames_delivered: u64,
}

impl SyntheticDevice {
    fn new() -> Self {
        Self {
            listeners: Vec::new(),
            streaming: false,
            outstanding: false,
            frames_delivered: 0,
        }
    }

    fn render_depth() -> DepthFrame {
        let span = (DEPTH_WIDTH - 1) as f32;
        let row: Vec<f32> = (0..DEPTH_WIDTH)
            .map(|c| NEAR_MM + (FAR_MM - NEAR_MM) * c as f32 / span)
            .collect();
        let data = row
            .iter()
            .copied()
            .cycle()
            .take(DEPTH_WIDTH * DEPTH_HEIGHT)
            .collect();

        DepthFrame {
            width: DEPTH_WIDTH,
            height: DEPTH_HEIGHT,
            data,
        }
    }

    fn listens(&self, kind: FrameKind) -> bool {
        self.listeners.contains(&kind)
    }
}

impl DepthDevice for SyntheticDevice {
    fn serial_number(&self) -> String {
        "SYNTHETIC-000000".to_string()
    }

    fn firmware_version(&self) -> String {
        "0.0.0".to_string()
    }

    fn set_frame_listener(&mut self, kinds: &[FrameKind]) {
        self.listeners = kinds.to_vec();
    }

    fn start_streams(&mut self, _enable_color: bool, enable_depth: bool) -> Result<()> {
        if !enable_depth || !self.listens(FrameKind::Depth) {
            return Err(CaptureError::StreamStartError(
                "depth stream requires a registered depth listener".to_string(),
            ));
        }
        self.streaming = true;
        Ok(())
    }

    fn wait_for_new_frame(&mut self, _timeout: Duration) -> Result<Option<FrameSet>> {
        // An unreleased set holds the only buffer, so nothing new can arrive.
        if !self.streaming || self.outstanding {
            return Ok(None);
        }

        self.outstanding = true;
        self.frames_delivered += 1;

        let color = self
            .listens(FrameKind::Color)
            .then(|| ColorFrame::blank(COLOR_WIDTH, COLOR_HEIGHT));
        let ir = self
            .listens(FrameKind::Ir)
            .then(|| DepthFrame::zeroed(DEPTH_WIDTH, DEPTH_HEIGHT));

        Ok(Some(FrameSet {
            color,
            ir,
            depth: Some(Self::render_depth()),
        }))
    }

    fn release(&mut self, _frames: FrameSet) {
        self.outstanding = false;
    }

    fn ir_camera_params(&self) -> CameraIntrinsics {
        CameraIntrinsics::kinect_v2_default()
    }

    fn stop(&mut self) -> Result<()> {
        debug!(frames = self.frames_delivered, "Stopping synthetic streams");
        self.streaming = false;
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        self.listeners.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_device() -> SyntheticDevice {
        let mut device = SyntheticDriver::new()
            .open_default_device(ProcessingBackend::Cpu)
            .unwrap();
        device.set_frame_listener(&FrameKind::ALL);
        device.start_streams(false, true).unwrap();
        device
    }

    #[test]
    fn test_disconnected_driver_has_no_device() {
        let mut driver = SyntheticDriver::disconnected();
        assert_eq!(driver.enumerate_devices(), 0);
        assert!(matches!(
            driver.open_default_device(ProcessingBackend::OpenGl),
            Err(CaptureError::NoDevice)
        ));
    }

    #[test]
    fn test_unreleased_frame_set_blocks_next_wait() {
        let mut device = started_device();
        let timeout = Duration::from_millis(10);

        let first = device.wait_for_new_frame(timeout).unwrap();
        assert!(first.is_some());
        assert!(device.wait_for_new_frame(timeout).unwrap().is_none());

        device.release(first.unwrap());
        assert!(device.wait_for_new_frame(timeout).unwrap().is_some());
    }

    #[test]
    fn test_frame_set_carries_all_channels() {
        let mut device = started_device();
        let frames = device
            .wait_for_new_frame(Duration::from_millis(10))
            .unwrap()
            .unwrap();

        let depth = frames.depth().unwrap();
        assert_eq!((depth.width, depth.height), (DEPTH_WIDTH, DEPTH_HEIGHT));
        assert_eq!(depth.data[0], NEAR_MM);
        assert_eq!(depth.data[DEPTH_WIDTH - 1], FAR_MM);
        let color = frames.color().unwrap();
        assert_eq!((color.width, color.height, color.bytes_per_pixel), (COLOR_WIDTH, COLOR_HEIGHT, 4));
        assert!(color.is_complete());
        assert!(frames.ir().is_some());
    }

    #[test]
    fn test_start_without_depth_listener_fails() {
        let mut device = SyntheticDriver::new()
            .open_default_device(ProcessingBackend::Cpu)
            .unwrap();
        device.set_frame_listener(&[FrameKind::Color]);
        assert!(matches!(
            device.start_streams(false, true),
            Err(CaptureError::StreamStartError(_))
        ));
    }
}
