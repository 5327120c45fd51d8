//! Depth capture pipeline module
//!
//! Grabs depth frames from a camera driver and serializes them to disk, with
//! separate modules for the driver seam, frame buffering, depth dumps, point
//! clouds, and capture orchestration.

pub mod capture;
pub mod common;
pub mod depth_dump;
pub mod driver;
pub mod frame;
pub mod point_cloud;

pub use common::{
    CaptureError,
    Result,
};

pub use frame::{
    DepthFrame,
    DepthSamples,
    FrameBuffer,
};

pub use driver::{
    CameraIntrinsics,
    DepthDevice,
    DepthDriver,
    ProcessingBackend,
    ReplayDriver,
    StreamingSession,
    SyntheticDriver,
};

pub use depth_dump::{
    BinaryDepthReader,
    BinaryDepthWriter,
    CsvDepthWriter,
    DepthWriter,
};

pub use point_cloud::{
    PlyWriter,
    Point3,
    PointCloudBuilder,
    PointCloudMode,
    PointCloudWriter,
    XyzWriter,
};

pub use capture::{
    AutoContinue,
    CaptureConfig,
    CaptureConfigBuilder,
    CapturePipeline,
    CaptureReport,
    ContinuePrompt,
    StdinPrompt,
};
