//! Mock implementations of the backend capability traits.

use nalgebra::{Isometry3, Vector3};

use remora_core::traits::{PhysicsWorld, RevoluteJoint, RigidBody, SixDofJoint, WaterSurface};
use remora_core::types::{BodyHandle, JointDof, RevoluteHandle, SixDofHandle, SpringDesc};

// ---------------------------------------------------------------------------
// MockBody
// ---------------------------------------------------------------------------

/// A rigid body that records everything applied to it.
///
/// Kinematic state is plain public data so tests can stage arbitrary poses
/// and velocities; the mock never integrates motion.
#[derive(Debug, Clone)]
pub struct MockBody {
    /// World pose.
    pub pose: Isometry3<f32>,
    /// Linear velocity (m/s).
    pub linear_velocity: Vector3<f32>,
    /// Angular velocity (rad/s).
    pub angular_velocity: Vector3<f32>,
    /// Accumulated force (N).
    pub force: Vector3<f32>,
    /// Accumulated torque (Nm).
    pub torque: Vector3<f32>,
    /// Accumulated linear impulse (Ns).
    pub impulse: Vector3<f32>,
    /// Accumulated angular impulse (Nms).
    pub angular_impulse: Vector3<f32>,
}

impl Default for MockBody {
    fn default() -> Self {
        Self::new()
    }
}

impl MockBody {
    /// A body at the world origin, at rest.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pose: Isometry3::identity(),
            linear_velocity: Vector3::zeros(),
            angular_velocity: Vector3::zeros(),
            force: Vector3::zeros(),
            torque: Vector3::zeros(),
            impulse: Vector3::zeros(),
            angular_impulse: Vector3::zeros(),
        }
    }

    /// A body translated to the given position, at rest.
    #[must_use]
    pub fn at(x: f32, y: f32, z: f32) -> Self {
        Self {
            pose: Isometry3::translation(x, y, z),
            ..Self::new()
        }
    }

    /// Builder: set linear velocity.
    #[must_use]
    pub fn with_linear_velocity(mut self, velocity: Vector3<f32>) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Zero all recorded accumulators, as a backend would between ticks.
    pub fn clear_accumulators(&mut self) {
        self.force = Vector3::zeros();
        self.torque = Vector3::zeros();
        self.impulse = Vector3::zeros();
        self.angular_impulse = Vector3::zeros();
    }
}

impl RigidBody for MockBody {
    fn pose(&self) -> Isometry3<f32> {
        self.pose
    }

    fn linear_velocity(&self) -> Vector3<f32> {
        self.linear_velocity
    }

    fn angular_velocity(&self) -> Vector3<f32> {
        self.angular_velocity
    }

    fn apply_force(&mut self, force: Vector3<f32>) {
        self.force += force;
    }

    fn apply_torque(&mut self, torque: Vector3<f32>) {
        self.torque += torque;
    }

    fn apply_impulse(&mut self, impulse: Vector3<f32>) {
        self.impulse += impulse;
    }

    fn apply_angular_impulse(&mut self, impulse: Vector3<f32>) {
        self.angular_impulse += impulse;
    }
}

// ---------------------------------------------------------------------------
// MockRevolute
// ---------------------------------------------------------------------------

/// A revolute joint recording applied torque.
#[derive(Debug, Clone, Default)]
pub struct MockRevolute {
    /// Angular velocity about the joint axis (rad/s).
    pub angular_velocity: f32,
    /// Accumulated torque (Nm).
    pub torque: f32,
}

impl MockRevolute {
    /// A joint spinning at the given rate.
    #[must_use]
    pub const fn spinning(angular_velocity: f32) -> Self {
        Self {
            angular_velocity,
            torque: 0.0,
        }
    }
}

impl RevoluteJoint for MockRevolute {
    fn angular_velocity(&self) -> f32 {
        self.angular_velocity
    }

    fn apply_torque(&mut self, torque: f32) {
        self.torque += torque;
    }
}

// ---------------------------------------------------------------------------
// MockSixDof
// ---------------------------------------------------------------------------

/// A six-DoF joint with settable per-axis state.
#[derive(Debug, Clone, Default)]
pub struct MockSixDof {
    /// When `true`, the mock claims to integrate joint springs itself.
    pub internal_springs: bool,
    /// Per-DoF displacement, indexed by [`JointDof::index`].
    pub displacements: [f32; 6],
    /// Per-DoF velocity, indexed by [`JointDof::index`].
    pub velocities: [f32; 6],
    /// Per-DoF accumulated force/torque, indexed by [`JointDof::index`].
    pub axis_forces: [f32; 6],
    /// Spring descriptors handed over via `set_spring`.
    pub configured_springs: Vec<(JointDof, SpringDesc)>,
}

impl MockSixDof {
    /// A joint whose backend integrates springs internally.
    #[must_use]
    pub fn with_internal_springs() -> Self {
        Self {
            internal_springs: true,
            ..Self::default()
        }
    }
}

impl SixDofJoint for MockSixDof {
    fn drives_springs_internally(&self) -> bool {
        self.internal_springs
    }

    fn set_spring(&mut self, dof: JointDof, desc: SpringDesc) {
        self.configured_springs.push((dof, desc));
    }

    fn displacement(&self, dof: JointDof) -> f32 {
        self.displacements[dof.index()]
    }

    fn velocity(&self, dof: JointDof) -> f32 {
        self.velocities[dof.index()]
    }

    fn apply_axis_force(&mut self, dof: JointDof, magnitude: f32) {
        self.axis_forces[dof.index()] += magnitude;
    }
}

// ---------------------------------------------------------------------------
// MockWorld
// ---------------------------------------------------------------------------

/// A backend stub: flat arenas of mock bodies and joints.
#[derive(Debug, Clone, Default)]
pub struct MockWorld {
    /// Bodies, indexed by [`BodyHandle`].
    pub bodies: Vec<MockBody>,
    /// Revolute joints, indexed by [`RevoluteHandle`].
    pub revolutes: Vec<MockRevolute>,
    /// Six-DoF joints, indexed by [`SixDofHandle`].
    pub six_dofs: Vec<MockSixDof>,
}

impl MockWorld {
    /// An empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a body, returning its handle.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_body(&mut self, body: MockBody) -> BodyHandle {
        self.bodies.push(body);
        BodyHandle(self.bodies.len() as u32 - 1)
    }

    /// Insert a revolute joint, returning its handle.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_revolute(&mut self, joint: MockRevolute) -> RevoluteHandle {
        self.revolutes.push(joint);
        RevoluteHandle(self.revolutes.len() as u32 - 1)
    }

    /// Insert a six-DoF joint, returning its handle.
    #[allow(clippy::cast_possible_truncation)]
    pub fn add_six_dof(&mut self, joint: MockSixDof) -> SixDofHandle {
        self.six_dofs.push(joint);
        SixDofHandle(self.six_dofs.len() as u32 - 1)
    }

    /// Zero every body's accumulators, as a backend would between ticks.
    pub fn clear_accumulators(&mut self) {
        for body in &mut self.bodies {
            body.clear_accumulators();
        }
    }
}

impl PhysicsWorld for MockWorld {
    type Body = MockBody;
    type Revolute = MockRevolute;
    type SixDof = MockSixDof;

    fn body(&self, handle: BodyHandle) -> Option<&MockBody> {
        self.bodies.get(handle.0 as usize)
    }

    fn body_mut(&mut self, handle: BodyHandle) -> Option<&mut MockBody> {
        self.bodies.get_mut(handle.0 as usize)
    }

    fn revolute(&self, handle: RevoluteHandle) -> Option<&MockRevolute> {
        self.revolutes.get(handle.0 as usize)
    }

    fn revolute_mut(&mut self, handle: RevoluteHandle) -> Option<&mut MockRevolute> {
        self.revolutes.get_mut(handle.0 as usize)
    }

    fn six_dof(&self, handle: SixDofHandle) -> Option<&MockSixDof> {
        self.six_dofs.get(handle.0 as usize)
    }

    fn six_dof_mut(&mut self, handle: SixDofHandle) -> Option<&mut MockSixDof> {
        self.six_dofs.get_mut(handle.0 as usize)
    }
}

// ---------------------------------------------------------------------------
// Water surfaces
// ---------------------------------------------------------------------------

/// A level water surface at a fixed height (world Y).
#[derive(Debug, Clone, Copy)]
pub struct FlatWater {
    /// Surface height (world Y).
    pub height: f32,
}

impl FlatWater {
    /// Water surface at the given height.
    #[must_use]
    pub const fn new(height: f32) -> Self {
        Self { height }
    }
}

impl WaterSurface for FlatWater {
    fn height_at(&self, _x: f32, _y: f32, _z: f32) -> f32 {
        self.height
    }
}

/// A planar water surface sloping along X: `height = base + slope·x`.
#[derive(Debug, Clone, Copy)]
pub struct SlopedWater {
    /// Height at x = 0.
    pub base: f32,
    /// Height change per meter of X.
    pub slope: f32,
}

impl WaterSurface for SlopedWater {
    fn height_at(&self, x: f32, _y: f32, _z: f32) -> f32 {
        self.slope.mul_add(x, self.base)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
