//! Depth dump module
//!
//! Serializes depth grids to disk: the binary `"<w> <h>\n"` + f32 format used by
//! the capture loop, a CSV grid for inspection, and a reader for the binary format.

mod binary_writer;
mod csv_writer;
mod reader;
mod writer;

pub use binary_writer::BinaryDepthWriter;
pub use csv_writer::CsvDepthWriter;
pub use reader::BinaryDepthReader;
pub use writer::{DepthWriter, write_depth_file};
