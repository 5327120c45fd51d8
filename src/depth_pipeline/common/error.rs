use std::time::Duration;

use thiserror::Error;

use crate::depth_pipeline::driver::FrameKind;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("No depth device found")]
    NoDevice,

    #[error("Failed to open device: {0}")]
    DeviceOpenError(String),

    #[error("Failed to start streams: {0}")]
    StreamStartError(String),

    #[error("Timed out after {}ms waiting for a new frame set", .0.as_millis())]
    FrameTimeout(Duration),

    #[error("Frame set is missing the {0:?} frame")]
    MissingFrame(FrameKind),

    #[error("Frame is {got_width}x{got_height}, buffer expects {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: usize,
        expected_height: usize,
        got_width: usize,
        got_height: usize,
    },

    #[error("Invalid frame dimensions: width={0}, height={1}")]
    InvalidDimensions(usize, usize),

    #[error("Failed to read input file: {0}")]
    InputReadError(String),

    #[error("Failed to write output file: {0}")]
    OutputWriteError(String),

    #[error("Malformed depth dump: {0}")]
    MalformedDump(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CaptureError>;
