//! Camera driver module
//!
//! The camera driver is consumed through the [`DepthDriver`] and [`DepthDevice`]
//! traits. [`StreamingSession`] wraps an opened device so that streams are stopped
//! and the device closed on every exit path.

mod device;
mod replay;
mod session;
mod synthetic;
pub mod types;

pub use device::{DepthDevice, DepthDriver};
pub use replay::{ReplayDevice, ReplayDriver};
pub use session::StreamingSession;
pub use synthetic::{SyntheticDevice, SyntheticDriver};
pub use types::{CameraIntrinsics, ColorFrame, FrameKind, FrameSet, ProcessingBackend};
