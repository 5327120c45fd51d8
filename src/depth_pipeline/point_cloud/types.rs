//! Point cloud types

/// A camera-space point in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Point3 {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

pub type PointCloud = Vec<Point3>;

/// How depth frames are turned into point clouds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointCloudMode {
    /// Pinhole unprojection of every in-range pixel
    #[default]
    Unproject,
    /// Always produce an empty cloud (the PLY file is still written)
    Disabled,
}
