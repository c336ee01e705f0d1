//! Fixed-direction force and impulse actuators.

use nalgebra::{Point3, Vector3};

use remora_core::error::ActuatorError;
use remora_core::traits::{PhysicsWorld, RigidBody};
use remora_core::types::BodyHandle;

use crate::mount::Mount;
use crate::{kind, Actuator};

// ---------------------------------------------------------------------------
// ForceActuator
// ---------------------------------------------------------------------------

/// Applies a scalar force along a body-relative axis at a body-relative
/// point, accumulated continuously into the body's force accumulator.
#[derive(Debug, Clone)]
pub struct ForceActuator {
    body: BodyHandle,
    mount: Mount,
    force: f32,
}

impl ForceActuator {
    /// Attach to `body`, capturing `point` and `axis` (world space, unit
    /// axis) relative to the body's current pose.
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        point: Point3<f32>,
        axis: Vector3<f32>,
    ) -> Result<Self, ActuatorError> {
        let pose = world
            .body(body)
            .ok_or(ActuatorError::BodyNotFound(body))?
            .pose();
        Ok(Self {
            body,
            mount: Mount::new(&pose, point, axis),
            force: 0.0,
        })
    }

    /// Set the force magnitude (N).
    pub fn set_force(&mut self, force: f32) {
        self.force = force;
    }

    /// Current force magnitude (N).
    #[must_use]
    pub const fn force(&self) -> f32 {
        self.force
    }

    /// Handle of the driven body.
    #[must_use]
    pub const fn body(&self) -> BodyHandle {
        self.body
    }
}

impl<W: PhysicsWorld> Actuator<W> for ForceActuator {
    fn apply(&mut self, world: &mut W, _dt: f32) {
        let Some(body) = world.body_mut(self.body) else {
            return;
        };
        let pose = body.pose();
        let force = self.mount.world_axis(&pose) * self.force;
        body.apply_force_at(force, self.mount.world_point(&pose));
    }

    fn kind(&self) -> &'static str {
        kind::FORCE
    }
}

// ---------------------------------------------------------------------------
// ImpulseActuator
// ---------------------------------------------------------------------------

/// Applies a scalar impulse along a body-relative axis at a body-relative
/// point: an instantaneous momentum change, once per `apply` call.
#[derive(Debug, Clone)]
pub struct ImpulseActuator {
    body: BodyHandle,
    mount: Mount,
    impulse: f32,
}

impl ImpulseActuator {
    /// Attach to `body`, capturing `point` and `axis` (world space, unit
    /// axis) relative to the body's current pose.
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        point: Point3<f32>,
        axis: Vector3<f32>,
    ) -> Result<Self, ActuatorError> {
        let pose = world
            .body(body)
            .ok_or(ActuatorError::BodyNotFound(body))?
            .pose();
        Ok(Self {
            body,
            mount: Mount::new(&pose, point, axis),
            impulse: 0.0,
        })
    }

    /// Set the impulse magnitude (Ns).
    pub fn set_impulse(&mut self, impulse: f32) {
        self.impulse = impulse;
    }

    /// Current impulse magnitude (Ns).
    #[must_use]
    pub const fn impulse(&self) -> f32 {
        self.impulse
    }

    /// Handle of the driven body.
    #[must_use]
    pub const fn body(&self) -> BodyHandle {
        self.body
    }

    /// Deliver `magnitude` along the mounted axis at the mounted point.
    ///
    /// Shared application path for the impulse-based hydrodynamic actuators.
    pub(crate) fn deliver<W: PhysicsWorld>(
        world: &mut W,
        body: BodyHandle,
        mount: &Mount,
        magnitude: f32,
    ) {
        let Some(body) = world.body_mut(body) else {
            return;
        };
        let pose = body.pose();
        let impulse = mount.world_axis(&pose) * magnitude;
        body.apply_impulse_at(impulse, mount.world_point(&pose));
    }
}

impl<W: PhysicsWorld> Actuator<W> for ImpulseActuator {
    fn apply(&mut self, world: &mut W, _dt: f32) {
        Self::deliver(world, self.body, &self.mount, self.impulse);
    }

    fn kind(&self) -> &'static str {
        kind::IMPULSE
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
