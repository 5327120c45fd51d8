use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::frame::DepthSamples;

pub trait DepthWriter {
    fn write_depth(&self, frame: &dyn DepthSamples, output: &mut dyn Write) -> Result<()>;
}

/// Creates (or truncates) `path` and writes `frame` into it with `writer`.
pub fn write_depth_file<W: DepthWriter + ?Sized>(
    writer: &W,
    frame: &dyn DepthSamples,
    path: &Path,
) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        CaptureError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    let mut output = BufWriter::new(file);

    writer.write_depth(frame, &mut output)?;
    output.flush().map_err(|e| {
        CaptureError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    Ok(())
}
