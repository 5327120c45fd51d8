use tracing::debug;

use crate::depth_pipeline::driver::CameraIntrinsics;
use crate::depth_pipeline::frame::DepthSamples;
use crate::depth_pipeline::point_cloud::types::{Point3, PointCloud, PointCloudMode};

const MM_PER_M: f32 = 1000.0;

/// Converts depth grids (millimetres) into camera-space point clouds (metres).
#[derive(Debug, Clone)]
pub struct PointCloudBuilder {
    /// Nearest accepted depth in millimetres, inclusive
    pub min_depth: f32,
    /// Farthest accepted depth in millimetres, inclusive
    pub max_depth: f32,
    pub mode: PointCloudMode,
}

impl Default for PointCloudBuilder {
    fn default() -> Self {
        Self {
            min_depth: 700.0,
            max_depth: 900.0,
            mode: PointCloudMode::Unproject,
        }
    }
}

impl PointCloudBuilder {
    pub fn new(min_depth: f32, max_depth: f32, mode: PointCloudMode) -> Self {
        Self {
            min_depth,
            max_depth,
            mode,
        }
    }

    fn in_range(&self, depth: f32) -> bool {
        depth >= self.min_depth && depth <= self.max_depth
    }

    /// Unprojects every pixel whose depth lies in `[min_depth, max_depth]`.
    ///
    /// Pixels are sampled at their centre, so pixel `(c, r)` maps to
    /// `x = (c + 0.5 - cx) * z / fx` and `y = (r + 0.5 - cy) * z / fy`.
    /// Points come out in row-major pixel order.
    pub fn build(&self, frame: &dyn DepthSamples, intrinsics: &CameraIntrinsics) -> PointCloud {
        if self.mode == PointCloudMode::Disabled {
            return PointCloud::new();
        }

        let width = frame.width();
        if width == 0 {
            return PointCloud::new();
        }

        let inv_fx = 1.0 / intrinsics.fx;
        let inv_fy = 1.0 / intrinsics.fy;

        let cloud: PointCloud = frame
            .samples()
            .iter()
            .enumerate()
            .filter(|&(_, &depth)| self.in_range(depth))
            .map(|(index, &depth)| {
                let c = (index % width) as f32;
                let r = (index / width) as f32;
                let z = depth / MM_PER_M;
                Point3::new(
                    (c + 0.5 - intrinsics.cx) * inv_fx * z,
                    (r + 0.5 - intrinsics.cy) * inv_fy * z,
                    z,
                )
            })
            .collect();

        debug!(
            points = cloud.len(),
            min_depth = self.min_depth,
            max_depth = self.max_depth,
            "Built point cloud"
        );
        cloud
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth_pipeline::frame::DepthFrame;

    fn centred_intrinsics() -> CameraIntrinsics {
        CameraIntrinsics {
            fx: 2.0,
            fy: 4.0,
            cx: 0.5,
            cy: 0.5,
            ..CameraIntrinsics::default()
        }
    }

    #[test]
    fn test_all_pixels_out_of_range_gives_empty_cloud() {
        let frame = DepthFrame::new(3, 2, vec![0.0, 699.9, 900.1, 5000.0, f32::NAN, -1.0]).unwrap();
        let cloud = PointCloudBuilder::default().build(&frame, &CameraIntrinsics::default());
        assert!(cloud.is_empty());
    }

    #[test]
    fn test_all_pixels_in_range_gives_one_point_each() {
        let frame = DepthFrame::filled(512, 424, 800.0);
        let cloud = PointCloudBuilder::default().build(&frame, &CameraIntrinsics::default());
        assert_eq!(cloud.len(), 512 * 424);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let frame = DepthFrame::new(2, 1, vec![700.0, 900.0]).unwrap();
        let cloud = PointCloudBuilder::default().build(&frame, &CameraIntrinsics::default());
        assert_eq!(cloud.len(), 2);
    }

    #[test]
    fn test_unprojection_uses_pixel_centres() {
        let frame = DepthFrame::new(2, 2, vec![0.0, 0.0, 0.0, 800.0]).unwrap();
        let cloud = PointCloudBuilder::default().build(&frame, &centred_intrinsics());

        assert_eq!(cloud.len(), 1);
        let p = cloud[0];
        assert!((p.z - 0.8).abs() < 1e-6);
        assert!((p.x - 0.4).abs() < 1e-6);
        assert!((p.y - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_principal_point_maps_to_optical_axis() {
        let frame = DepthFrame::new(2, 2, vec![750.0, 0.0, 0.0, 0.0]).unwrap();
        let intrinsics = CameraIntrinsics {
            cx: 0.5,
            cy: 0.5,
            ..CameraIntrinsics::default()
        };
        let cloud = PointCloudBuilder::default().build(&frame, &intrinsics);

        assert_eq!(cloud, vec![Point3::new(0.0, 0.0, 0.75)]);
    }

    #[test]
    fn test_disabled_mode_always_empty() {
        let frame = DepthFrame::filled(4, 4, 800.0);
        let builder = PointCloudBuilder::new(700.0, 900.0, PointCloudMode::Disabled);
        assert!(builder.build(&frame, &CameraIntrinsics::default()).is_empty());
    }
}
