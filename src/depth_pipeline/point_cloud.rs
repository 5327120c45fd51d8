//! Point cloud module
//!
//! Unprojects depth grids into camera-space points and writes them as binary
//! PLY (or as plain `x,y,z` text for inspection).

mod builder;
mod ply_writer;
pub mod types;
mod writer;
mod xyz_writer;

pub use builder::PointCloudBuilder;
pub use ply_writer::PlyWriter;
pub use types::{Point3, PointCloud, PointCloudMode};
pub use writer::{PointCloudWriter, write_point_cloud_file};
pub use xyz_writer::XyzWriter;
