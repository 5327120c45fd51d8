use std::io::Write;

use tracing::debug;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::depth_dump::writer::DepthWriter;
use crate::depth_pipeline::frame::DepthSamples;

/// Writes `"<width> <height>\n"` followed by every sample as a little-endian f32.
pub struct BinaryDepthWriter;

impl DepthWriter for BinaryDepthWriter {
    fn write_depth(&self, frame: &dyn DepthSamples, output: &mut dyn Write) -> Result<()> {
        let (width, height) = (frame.width(), frame.height());
        let samples = frame.samples();
        if samples.len() != width * height {
            return Err(CaptureError::InvalidDimensions(width, height));
        }

        debug!("Writing binary depth dump: {}x{}", width, height);

        let mut buffer = Vec::with_capacity(16 + samples.len() * 4);
        writeln!(buffer, "{} {}", width, height)?;
        for sample in samples {
            buffer.extend_from_slice(&sample.to_le_bytes());
        }

        output.write_all(&buffer)?;
        Ok(())
    }
}
