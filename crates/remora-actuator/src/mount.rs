//! Body-relative placement snapshots.

use nalgebra::{Isometry3, Point3, Vector3};

// ---------------------------------------------------------------------------
// Mount
// ---------------------------------------------------------------------------

/// Application point and direction captured in a body's local frame.
///
/// Built once at actuator init from the body's pose at that instant; each
/// tick the point and axis are re-expressed in world space from the body's
/// current pose.  The axis is treated as a direction and is not normalized
/// here; callers supply unit axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mount {
    local_point: Point3<f32>,
    local_axis: Vector3<f32>,
}

impl Mount {
    /// Capture a world-space `point` and `axis` relative to `init_pose`.
    #[must_use]
    pub fn new(init_pose: &Isometry3<f32>, point: Point3<f32>, axis: Vector3<f32>) -> Self {
        Self {
            local_point: init_pose.inverse_transform_point(&point),
            local_axis: init_pose.inverse_transform_vector(&axis),
        }
    }

    /// The application point in world space for the current pose.
    #[must_use]
    pub fn world_point(&self, pose: &Isometry3<f32>) -> Point3<f32> {
        pose.transform_point(&self.local_point)
    }

    /// The direction in world space for the current pose.
    #[must_use]
    pub fn world_axis(&self, pose: &Isometry3<f32>) -> Vector3<f32> {
        pose.transform_vector(&self.local_axis)
    }

    /// The stored body-local application point.
    #[must_use]
    pub const fn local_point(&self) -> Point3<f32> {
        self.local_point
    }

    /// The stored body-local direction.
    #[must_use]
    pub const fn local_axis(&self) -> Vector3<f32> {
        self.local_axis
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
