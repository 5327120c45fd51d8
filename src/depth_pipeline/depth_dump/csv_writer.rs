use std::io::Write;

use tracing::debug;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::depth_dump::writer::DepthWriter;
use crate::depth_pipeline::frame::DepthSamples;

/// Writes one comma-separated line per scanline.
pub struct CsvDepthWriter;

impl DepthWriter for CsvDepthWriter {
    fn write_depth(&self, frame: &dyn DepthSamples, output: &mut dyn Write) -> Result<()> {
        let width = frame.width();
        let samples = frame.samples();
        if width == 0 || samples.len() != width * frame.height() {
            return Err(CaptureError::InvalidDimensions(width, frame.height()));
        }

        debug!("Writing CSV depth grid: {}x{}", width, frame.height());

        let mut line = String::new();
        for row in samples.chunks_exact(width) {
            line.clear();
            for (k, value) in row.iter().enumerate() {
                if k > 0 {
                    line.push(',');
                }
                line.push_str(&value.to_string());
            }
            line.push('\n');
            output.write_all(line.as_bytes())?;
        }
        Ok(())
    }
}
