//! Driver that plays back previously captured depth dumps.
//!
//! Every regular file in the directory that is not a point cloud (`pc_*`) or a
//! diagnostic export is treated as one frame, in lexical order. Once the files
//! run out the device stops delivering and waits time out.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, warn};

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::depth_dump::BinaryDepthReader;
use crate::depth_pipeline::driver::device::{DepthDevice, DepthDriver};
use crate::depth_pipeline::driver::types::{CameraIntrinsics, FrameKind, FrameSet, ProcessingBackend};

pub struct ReplayDriver {
    dir: PathBuf,
    intrinsics: CameraIntrinsics,
}

impl ReplayDriver {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            intrinsics: CameraIntrinsics::kinect_v2_default(),
        }
    }

    fn recordings(&self) -> Result<Vec<PathBuf>> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            CaptureError::InputReadError(format!("{}: {}", self.dir.display(), e))
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.is_file() && is_depth_dump_name(&path) {
                files.push(path);
            }
        }
        files.sort();
        Ok(files)
    }
}

fn is_depth_dump_name(path: &Path) -> bool {
    let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };
    !name.starts_with("pc_") && !name.starts_with('.') && path.extension().is_none()
}

impl DepthDriver for ReplayDriver {
    type Device = ReplayDevice;

    fn enumerate_devices(&mut self) -> usize {
        match self.recordings() {
            Ok(files) if !files.is_empty() => 1,
            Ok(_) => 0,
            Err(e) => {
                warn!("Cannot scan replay directory: {}", e);
                0
            }
        }
    }

    fn open_default_device(&mut self, backend: ProcessingBackend) -> Result<ReplayDevice> {
        let files = self
            .recordings()
            .map_err(|e| CaptureError::DeviceOpenError(e.to_string()))?;
        if files.is_empty() {
            return Err(CaptureError::NoDevice);
        }
        debug!(backend = %backend, frames = files.len(), "Opening replay device");
        Ok(ReplayDevice {
            dir: self.dir.clone(),
            files,
            next: 0,
            listeners: Vec::new(),
            streaming: false,
            outstanding: false,
            intrinsics: self.intrinsics,
        })
    }
}

pub struct ReplayDevice {
    dir: PathBuf,
    files: Vec<PathBuf>,
    next: usize,
    listeners: Vec<FrameKind>,
    streaming: bool,
    outstanding: bool,
    intrinsics: CameraIntrinsics,
}

impl DepthDevice for ReplayDevice {
    fn serial_number(&self) -> String {
        format!("REPLAY:{}", self.dir.display())
    }

    fn firmware_version(&self) -> String {
        "replay".to_string()
    }

    fn set_frame_listener(&mut self, kinds: &[FrameKind]) {
        self.listeners = kinds.to_vec();
    }

    fn start_streams(&mut self, _enable_color: bool, enable_depth: bool) -> Result<()> {
        if !enable_depth || !self.listeners.contains(&FrameKind::Depth) {
            return Err(CaptureError::StreamStartError(
                "replay only provides a depth stream".to_string(),
            ));
        }
        self.streaming = true;
        Ok(())
    }

    fn wait_for_new_frame(&mut self, _timeout: Duration) -> Result<Option<FrameSet>> {
        if !self.streaming || self.outstanding {
            return Ok(None);
        }
        let Some(path) = self.files.get(self.next) else {
            return Ok(None);
        };

        let depth = BinaryDepthReader.read_file(path)?;
        debug!(file = %path.display(), "Replaying depth frame");
        self.next += 1;
        self.outstanding = true;

        Ok(Some(FrameSet {
            color: None,
            ir: None,
            depth: Some(depth),
        }))
    }

    fn release(&mut self, _frames: FrameSet) {
        self.outstanding = false;
    }

    fn ir_camera_params(&self) -> CameraIntrinsics {
        self.intrinsics
    }

    fn stop(&mut self) -> Result<()> {
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
    use crate::depth_pipeline::depth_dump::{BinaryDepthWriter, write_depth_file};
    use crate::depth_pipeline::frame::DepthFrame;

    #[test]
    fn test_replays_dumps_in_order_then_times_out() {
        let dir = tempfile::tempdir().unwrap();
        write_depth_file(&BinaryDepthWriter, &DepthFrame::filled(2, 2, 2.0), &dir.path().join("scan_002")).unwrap();
        write_depth_file(&BinaryDepthWriter, &DepthFrame::filled(2, 2, 1.0), &dir.path().join("scan_001")).unwrap();
        std::fs::write(dir.path().join("pc_scan_001"), b"ply\n").unwrap();
        std::fs::write(dir.path().join("scan_001.csv"), b"1,1\n1,1\n").unwrap();

        let mut driver = ReplayDriver::new(dir.path());
        assert_eq!(driver.enumerate_devices(), 1);

        let mut device = driver.open_default_device(ProcessingBackend::Cpu).unwrap();
        device.set_frame_listener(&FrameKind::ALL);
        device.start_streams(false, true).unwrap();

        let timeout = Duration::from_millis(5);
        for expected in [1.0, 2.0] {
            let frames = device.wait_for_new_frame(timeout).unwrap().unwrap();
            assert_eq!(frames.depth().unwrap().data, vec![expected; 4]);
            device.release(frames);
        }
        assert!(device.wait_for_new_frame(timeout).unwrap().is_none());
    }

    #[test]
    fn test_empty_directory_has_no_device() {
        let dir = tempfile::tempdir().unwrap();
        let mut driver = ReplayDriver::new(dir.path());

        assert_eq!(driver.enumerate_devices(), 0);
        assert!(matches!(
            driver.open_default_device(ProcessingBackend::Cpu),
            Err(CaptureError::NoDevice)
        ));
    }
}
