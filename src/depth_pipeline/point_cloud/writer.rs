use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::point_cloud::types::Point3;

pub trait PointCloudWriter {
    fn write_points(&self, points: &[Point3], output: &mut dyn Write) -> Result<()>;
}

/// Creates (or truncates) `path` and writes `points` into it with `writer`.
pub fn write_point_cloud_file<W: PointCloudWriter + ?Sized>(
    writer: &W,
    points: &[Point3],
    path: &Path,
) -> Result<()> {
    let file = File::create(path).map_err(|e| {
        CaptureError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    let mut output = BufWriter::new(file);

    writer.write_points(points, &mut output)?;
    output.flush().map_err(|e| {
        CaptureError::OutputWriteError(format!("{}: {}", path.display(), e))
    })?;
    Ok(())
}
