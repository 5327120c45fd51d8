use std::io::Write;

use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::point_cloud::types::Point3;
use crate::depth_pipeline::point_cloud::writer::PointCloudWriter;

/// Plain text `x,y,z` per line.
pub struct XyzWriter;

impl PointCloudWriter for XyzWriter {
    fn write_points(&self, points: &[Point3], output: &mut dyn Write) -> Result<()> {
        for p in points {
            writeln!(output, "{},{},{}", p.x, p.y, p.z)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_line_per_point() {
        let mut output = Vec::new();
        XyzWriter
            .write_points(&[Point3::new(0.5, -1.0, 0.75), Point3::new(0.0, 0.0, 0.9)], &mut output)
            .unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "0.5,-1,0.75\n0,0,0.9\n");
    }
}
