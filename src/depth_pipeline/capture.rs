//! Capture loop module
//!
//! Orchestrates one capture session: open the device, grab `360 / angle` depth
//! frames (or fewer if the user quits), and write each one to disk.

mod config;
mod naming;
mod pipeline;
mod prompt;
mod timing;


pub use config::{CaptureConfig, CaptureConfigBuilder};
pub use naming::{depth_file_name, point_cloud_file_name};
pub use pipeline::{CapturePipeline, CaptureReport};
pub use prompt::{AutoContinue, ContinuePrompt, StdinPrompt};
pub use timing::{PipelineTimings, StepTiming, Timer};
