use tracing::trace;

use crate::depth_pipeline::common::error::{CaptureError, Result};
use crate::depth_pipeline::frame::types::{DepthFrame, DepthSamples, DEPTH_HEIGHT, DEPTH_WIDTH};

/// Holds the most recent depth sample grid.
///
/// The buffer is cleared before every wait and then overwritten with the new
/// frame. Values are never summed across frames.
#[derive(Debug, Clone)]
pub struct FrameBuffer {
    frame: DepthFrame,
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            frame: DepthFrame::zeroed(width, height),
        }
    }

    /// Buffer sized for the 512x424 depth stream.
    pub fn for_depth_stream() -> Self {
        Self::new(DEPTH_WIDTH, DEPTH_HEIGHT)
    }

    pub fn reset(&mut self) {
        self.frame.data.fill(0.0);
    }

    /// Copies `source` element-wise into the buffer.
    ///
    /// Fails without touching the buffer if the dimensions differ.
    pub fn copy_from(&mut self, source: &impl DepthSamples) -> Result<()> {
        if source.width() != self.frame.width || source.height() != self.frame.height {
            return Err(CaptureError::DimensionMismatch {
                expected_width: self.frame.width,
                expected_height: self.frame.height,
                got_width: source.width(),
                got_height: source.height(),
            });
        }
        if source.samples().len() != self.frame.data.len() {
            return Err(CaptureError::InvalidDimensions(source.width(), source.height()));
        }

        self.frame.data.copy_from_slice(source.samples());
        trace!(pixels = self.frame.data.len(), "Copied depth samples into buffer");
        Ok(())
    }

    pub fn frame(&self) -> &DepthFrame {
        &self.frame
    }
}

impl DepthSamples for FrameBuffer {
    fn width(&self) -> usize {
        self.frame.width
    }

    fn height(&self) -> usize {
        self.frame.height
    }

    fn samples(&self) -> &[f32] {
        &self.frame.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copy_overwrites_instead_of_summing() {
        let mut buffer = FrameBuffer::new(4, 2);
        buffer.copy_from(&DepthFrame::filled(4, 2, 800.0)).unwrap();
        buffer.reset();
        buffer.copy_from(&DepthFrame::filled(4, 2, 750.0)).unwrap();

        assert!(buffer.samples().iter().all(|&v| v == 750.0));
    }

    #[test]
    fn test_reset_zeroes_every_sample() {
        let mut buffer = FrameBuffer::new(3, 3);
        buffer.copy_from(&DepthFrame::filled(3, 3, 1.5)).unwrap();
        buffer.reset();

        assert!(buffer.samples().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_dimension_mismatch_leaves_buffer_untouched() {
        let mut buffer = FrameBuffer::new(4, 4);
        buffer.copy_from(&DepthFrame::filled(4, 4, 9.0)).unwrap();

        let result = buffer.copy_from(&DepthFrame::filled(2, 8, 1.0));

        assert!(matches!(result, Err(CaptureError::DimensionMismatch { got_width: 2, got_height: 8, .. })));
        assert!(buffer.samples().iter().all(|&v| v == 9.0));
    }

    #[test]
    fn test_depth_stream_buffer_shape() {
        let buffer = FrameBuffer::for_depth_stream();
        assert_eq!(buffer.width(), 512);
        assert_eq!(buffer.height(), 424);
        assert_eq!(buffer.samples().len(), 512 * 424);
    }

    #[test]
    fn test_depth_frame_rejects_short_data() {
        let result = DepthFrame::new(4, 4, vec![0.0; 15]);
        assert!(matches!(result, Err(CaptureError::InvalidDimensions(4, 4))));
    }
}
