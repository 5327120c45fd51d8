use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use tracing::debug;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::frame::DepthFrame;

/// Header lines longer than this are not depth dumps.
const MAX_HEADER_LEN: usize = 64;

/// Parses files produced by [`BinaryDepthWriter`](super::BinaryDepthWriter).
pub struct BinaryDepthReader;

impl BinaryDepthReader {
    pub fn read_depth(&self, input: &mut dyn BufRead) -> Result<DepthFrame> {
        let mut header = Vec::new();
        (&mut *input)
            .take(MAX_HEADER_LEN as u64)
            .read_until(b'\n', &mut header)?;
        if header.last() != Some(&b'\n') {
            return Err(CaptureError::MalformedDump("missing header line".to_string()));
        }

        let header = std::str::from_utf8(&header[..header.len() - 1])
            .map_err(|_| CaptureError::MalformedDump("header is not ASCII".to_string()))?;
        let (width, height) = parse_header(header)?;

        debug!("Reading depth dump: {}x{}", width, height);

        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(4))
            .ok_or_else(|| CaptureError::MalformedDump(format!("{}x{} payload overflows", width, height)))?;

        // Grow with the bytes actually present instead of trusting the header.
        let mut body = Vec::new();
        (&mut *input).take(expected as u64).read_to_end(&mut body)?;
        if body.len() != expected {
            return Err(CaptureError::MalformedDump(format!(
                "expected {} payload bytes, found {}",
                expected,
                body.len()
            )));
        }

        let data = body
            .chunks_exact(4)
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        DepthFrame::new(width, height, data)
    }

    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> Result<DepthFrame> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            CaptureError::InputReadError(format!("{}: {}", path.display(), e))
        })?;
        self.read_depth(&mut BufReader::new(file))
    }
}

fn parse_header(header: &str) -> Result<(usize, usize)> {
    let mut fields = header.split(' ');
    let mut next_dim = |name: &str| -> Result<usize> {
        fields
            .next()
            .and_then(|f| f.parse::<usize>().ok())
            .ok_or_else(|| CaptureError::MalformedDump(format!("bad {} in header {:?}", name, header)))
    };

    let width = next_dim("width")?;
    let height = next_dim("height")?;
    if fields.next().is_some() {
        return Err(CaptureError::MalformedDump(format!("trailing fields in header {:?}", header)));
    }
    if width == 0 || height == 0 {
        return Err(CaptureError::InvalidDimensions(width, height));
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::depth_pipeline::depth_dump::{BinaryDepthWriter, DepthWriter, write_depth_file};

    #[test]
    fn test_round_trip_is_bit_exact() {
        let data = vec![0.0, -0.0, 1.0e-38, 701.25, f32::MAX, f32::NAN, f32::INFINITY, 3.5];
        let frame = DepthFrame::new(4, 2, data).unwrap();

        let mut bytes = Vec::new();
        BinaryDepthWriter.write_depth(&frame, &mut bytes).unwrap();
        let decoded = BinaryDepthReader.read_depth(&mut Cursor::new(bytes)).unwrap();

        assert_eq!((decoded.width, decoded.height), (4, 2));
        let original: Vec<u32> = frame.data.iter().map(|v| v.to_bits()).collect();
        let restored: Vec<u32> = decoded.data.iter().map(|v| v.to_bits()).collect();
        assert_eq!(original, restored);
    }

    #[test]
    fn test_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan_001");
        let frame = DepthFrame::filled(512, 424, 777.0);

        write_depth_file(&BinaryDepthWriter, &frame, &path).unwrap();

        assert_eq!(std::fs::metadata(&path).unwrap().len(), 8 + 512 * 424 * 4);
        assert_eq!(BinaryDepthReader.read_file(&path).unwrap(), frame);
    }

    #[test]
    fn test_truncated_payload_is_rejected() {
        let mut bytes = b"2 2\n".to_vec();
        bytes.extend_from_slice(&[0u8; 12]);

        let result = BinaryDepthReader.read_depth(&mut Cursor::new(bytes));
        assert!(matches!(result, Err(CaptureError::MalformedDump(_))));
    }

    #[test]
    fn test_overflowing_dimensions_are_rejected() {
        let result = BinaryDepthReader.read_depth(&mut Cursor::new(b"99999999999 99999999999\n".to_vec()));
        assert!(matches!(result, Err(CaptureError::MalformedDump(_))));
    }

    #[test]
    fn test_huge_header_with_short_body_is_rejected() {
        let result = BinaryDepthReader.read_depth(&mut Cursor::new(b"200000 200000\n\0\0\0\0".to_vec()));
        assert!(matches!(result, Err(CaptureError::MalformedDump(_))));
    }

    #[test]
    fn test_garbage_header_is_rejected() {
        let result = BinaryDepthReader.read_depth(&mut Cursor::new(b"ply\nformat".to_vec()));
        assert!(matches!(result, Err(CaptureError::MalformedDump(_))));
    }

    #[test]
    fn test_missing_file_reports_input_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = BinaryDepthReader.read_file(dir.path().join("absent"));
        assert!(matches!(result, Err(CaptureError::InputReadError(_))));
    }
}
