use std::io::Write;

use tracing::debug;

use crate::depth_pipeline::common::error::Result;
use crate::depth_pipeline::point_cloud::types::Point3;
use crate::depth_pipeline::point_cloud::writer::PointCloudWriter;

/// Vertex-only binary little-endian PLY with float x/y/z properties.
pub struct PlyWriter;

impl PlyWriter {
    fn header(vertex_count: usize) -> String {
        format!(
            "ply\n\
             format binary_little_endian 1.0\n\
             comment pointcloud from kinect\n\
             element vertex {}\n\
             property float x\n\
             property float y\n\
             property float z\n\
             end_header\n",
            vertex_count
        )
    }
}

impl PointCloudWriter for PlyWriter {
    fn write_points(&self, points: &[Point3], output: &mut dyn Write) -> Result<()> {
        debug!("Writing PLY point cloud: {} vertices", points.len());

        let header = Self::header(points.len());
        let mut buffer = Vec::with_capacity(header.len() + points.len() * 12);
        buffer.extend_from_slice(header.as_bytes());
        for point in points {
            buffer.extend_from_slice(&point.x.to_le_bytes());
            buffer.extend_from_slice(&point.y.to_le_bytes());
            buffer.extend_from_slice(&point.z.to_le_bytes());
        }

        output.write_all(&buffer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const END_HEADER: &[u8] = b"end_header\n";

    fn split_header(bytes: &[u8]) -> (String, &[u8]) {
        let end = bytes
            .windows(END_HEADER.len())
            .position(|w| w == END_HEADER)
            .unwrap()
            + END_HEADER.len();
        (String::from_utf8(bytes[..end].to_vec()).unwrap(), &bytes[end..])
    }

    fn declared_vertices(header: &str) -> usize {
        header
            .lines()
            .find_map(|l| l.strip_prefix("element vertex "))
            .unwrap()
            .parse()
            .unwrap()
    }

    #[test]
    fn test_empty_cloud_is_valid_ply() {
        let mut output = Vec::new();
        PlyWriter.write_points(&[], &mut output).unwrap();

        let (header, body) = split_header(&output);
        assert!(header.starts_with("ply\nformat binary_little_endian 1.0\n"));
        assert_eq!(declared_vertices(&header), 0);
        assert!(body.is_empty());
    }

    #[test]
    fn test_vertex_count_matches_body_length() {
        let points: Vec<Point3> = (0..37)
            .map(|i| Point3::new(i as f32, -(i as f32), 0.5))
            .collect();
        let mut output = Vec::new();
        PlyWriter.write_points(&points, &mut output).unwrap();

        let (header, body) = split_header(&output);
        assert_eq!(declared_vertices(&header), 37);
        assert_eq!(body.len(), 37 * 12);
    }

    #[test]
    fn test_body_preserves_point_order() {
        let points = [Point3::new(1.0, 2.0, 3.0), Point3::new(-4.0, 5.5, 0.25)];
        let mut output = Vec::new();
        PlyWriter.write_points(&points, &mut output).unwrap();

        let (_, body) = split_header(&output);
        let floats: Vec<f32> = body
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(floats, vec![1.0, 2.0, 3.0, -4.0, 5.5, 0.25]);
    }

    #[test]
    fn test_header_declares_only_xyz() {
        let mut output = Vec::new();
        PlyWriter.write_points(&[Point3::default()], &mut output).unwrap();

        let (header, _) = split_header(&output);
        let properties: Vec<&str> = header.lines().filter(|l| l.starts_with("property")).collect();
        assert_eq!(properties, vec!["property float x", "property float y", "property float z"]);
        assert!(!header.contains("element face"));
    }
}
