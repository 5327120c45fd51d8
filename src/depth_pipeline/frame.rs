//! Depth frame module
//!
//! Depth frame value types and the latest-frame buffer the capture loop copies into.

mod buffer;
pub mod types;

pub use buffer::FrameBuffer;
pub use types::{DepthFrame, DepthSamples, DEPTH_HEIGHT, DEPTH_WIDTH};
