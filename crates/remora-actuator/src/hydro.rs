//! Hydrodynamic actuators: propeller thrust, hydrofoil lift, liquid drag.

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

use remora_core::config::WATER_DENSITY;
use remora_core::error::ActuatorError;
use remora_core::traits::{PhysicsWorld, RigidBody};
use remora_core::types::BodyHandle;

use crate::force::ImpulseActuator;
use crate::mount::Mount;
use crate::{kind, Actuator};

/// Velocities with squared norm below this produce no drag (avoids a
/// zero-length normalization).
const MIN_SPEED_SQUARED: f32 = 1e-12;

// ---------------------------------------------------------------------------
// Propeller
// ---------------------------------------------------------------------------

/// Voltage-driven propeller for an underwater body.
///
/// First-order feed-forward thruster model: the motor electrical dynamics
/// are lumped into a single experimentally determined gain, giving thrust
/// `T = lumped_gain · V(t)` applied as an impulse along the mounted axis.
#[derive(Debug, Clone)]
pub struct Propeller {
    body: BodyHandle,
    mount: Mount,
    lumped_gain: f32,
    voltage: f32,
}

impl Propeller {
    /// Attach to `body` at a world-space `point`, thrusting along `axis`
    /// (unit), with the given lumped gain (N/V).
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        point: Point3<f32>,
        axis: Vector3<f32>,
        lumped_gain: f32,
    ) -> Result<Self, ActuatorError> {
        let pose = world
            .body(body)
            .ok_or(ActuatorError::BodyNotFound(body))?
            .pose();
        Ok(Self {
            body,
            mount: Mount::new(&pose, point, axis),
            lumped_gain,
            voltage: 0.0,
        })
    }

    /// Set the drive voltage (V).
    pub fn set_voltage(&mut self, voltage: f32) {
        self.voltage = voltage;
    }

    /// Current drive voltage (V).
    #[must_use]
    pub const fn voltage(&self) -> f32 {
        self.voltage
    }

    /// The lumped thrust gain (N/V).
    #[must_use]
    pub const fn lumped_gain(&self) -> f32 {
        self.lumped_gain
    }
}

impl<W: PhysicsWorld> Actuator<W> for Propeller {
    fn apply(&mut self, world: &mut W, _dt: f32) {
        let thrust = self.lumped_gain * self.voltage;
        ImpulseActuator::deliver(world, self.body, &self.mount, thrust);
    }

    fn kind(&self) -> &'static str {
        kind::PROPELLER
    }
}

// ---------------------------------------------------------------------------
// LiftCoefficients
// ---------------------------------------------------------------------------

/// Quadratic lift-coefficient model `Cl(α) = a·α² + b·α + c`.
///
/// The terms are experimentally determined for a given foil section.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LiftCoefficients {
    /// Quadratic term.
    pub a: f32,
    /// Linear term.
    pub b: f32,
    /// Constant term.
    pub c: f32,
}

impl LiftCoefficients {
    /// Create from the quadratic's terms.
    #[must_use]
    pub const fn new(a: f32, b: f32, c: f32) -> Self {
        Self { a, b, c }
    }

    /// Lift coefficient at angle of attack `alpha` (rad).
    #[must_use]
    pub fn evaluate(&self, alpha: f32) -> f32 {
        self.a.mul_add(alpha * alpha, self.b.mul_add(alpha, self.c))
    }
}

// ---------------------------------------------------------------------------
// Hydrofoil
// ---------------------------------------------------------------------------

/// Lift-generating fin for an underwater body.
///
/// `L = ½ · ρ · Cl(α) · Af · V²`, with `V` the component of the body's
/// velocity along the foil's orientation axis; the impulse `L·dt` is
/// applied along the lift axis at the mounted point.
#[derive(Debug, Clone)]
pub struct Hydrofoil {
    body: BodyHandle,
    /// Mounted point plus lift direction.
    mount: Mount,
    /// Flow-alignment direction in the body frame.
    local_orientation: Vector3<f32>,
    frontal_area: f32,
    lift: LiftCoefficients,
    density: f32,
    alpha: f32,
}

impl Hydrofoil {
    /// Attach to `body` at a world-space `point`.
    ///
    /// `orientation_axis` is the direction (unit) along which oncoming flow
    /// produces lift; `lift_axis` is the direction (unit) the lift force
    /// acts in.  `density` is the fluid density (kg/m³).
    #[allow(clippy::too_many_arguments)]
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        point: Point3<f32>,
        orientation_axis: Vector3<f32>,
        lift_axis: Vector3<f32>,
        frontal_area: f32,
        lift: LiftCoefficients,
        density: f32,
    ) -> Result<Self, ActuatorError> {
        let pose = world
            .body(body)
            .ok_or(ActuatorError::BodyNotFound(body))?
            .pose();
        Ok(Self {
            body,
            mount: Mount::new(&pose, point, lift_axis),
            local_orientation: pose.inverse_transform_vector(&orientation_axis),
            frontal_area,
            lift,
            density,
            alpha: 0.0,
        })
    }

    /// Attach with the default fluid density (fresh water).
    pub fn attach_in_water<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        point: Point3<f32>,
        orientation_axis: Vector3<f32>,
        lift_axis: Vector3<f32>,
        frontal_area: f32,
        lift: LiftCoefficients,
    ) -> Result<Self, ActuatorError> {
        Self::attach(
            world,
            body,
            point,
            orientation_axis,
            lift_axis,
            frontal_area,
            lift,
            WATER_DENSITY,
        )
    }

    /// Set the angle of attack (rad).
    ///
    /// Caller contract: `alpha ∈ [-π/2, π/2]`.  Values outside that range
    /// are not validated here and produce extrapolated coefficients.
    pub fn set_angle(&mut self, alpha: f32) {
        self.alpha = alpha;
    }

    /// Current angle of attack (rad).
    #[must_use]
    pub const fn angle(&self) -> f32 {
        self.alpha
    }
}

impl<W: PhysicsWorld> Actuator<W> for Hydrofoil {
    fn apply(&mut self, world: &mut W, dt: f32) {
        let Some(body) = world.body(self.body) else {
            return;
        };
        let pose = body.pose();
        let flow_axis = pose.transform_vector(&self.local_orientation);
        let speed_along = body.linear_velocity().dot(&flow_axis);

        let cl = self.lift.evaluate(self.alpha);
        let lift =
            0.5 * self.density * cl * self.frontal_area * speed_along * speed_along;
        ImpulseActuator::deliver(world, self.body, &self.mount, lift * dt);
    }

    fn kind(&self) -> &'static str {
        kind::HYDROFOIL
    }
}

// ---------------------------------------------------------------------------
// LiquidDrag
// ---------------------------------------------------------------------------

/// Quadratic drag through a liquid.
///
/// `D = ½ · ρ · Cd · Af · |v|²` opposing the body's velocity direction,
/// accumulated as a continuous force.
#[derive(Debug, Clone)]
pub struct LiquidDrag {
    body: BodyHandle,
    frontal_area: f32,
    drag_coefficient: f32,
    density: f32,
}

impl LiquidDrag {
    /// Attach to `body` with a frontal area (m²), drag coefficient, and
    /// fluid density (kg/m³).
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        frontal_area: f32,
        drag_coefficient: f32,
        density: f32,
    ) -> Result<Self, ActuatorError> {
        if world.body(body).is_none() {
            return Err(ActuatorError::BodyNotFound(body));
        }
        Ok(Self {
            body,
            frontal_area,
            drag_coefficient,
            density,
        })
    }

    /// Attach with the default fluid density (fresh water).
    pub fn attach_in_water<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        frontal_area: f32,
        drag_coefficient: f32,
    ) -> Result<Self, ActuatorError> {
        Self::attach(world, body, frontal_area, drag_coefficient, WATER_DENSITY)
    }

    /// Drag force for a given velocity (shared with the buoyancy model).
    pub(crate) fn drag_force(&self, velocity: Vector3<f32>) -> Vector3<f32> {
        let speed_squared = velocity.norm_squared();
        if speed_squared < MIN_SPEED_SQUARED {
            return Vector3::zeros();
        }
        let magnitude = 0.5 * self.density * self.drag_coefficient * self.frontal_area
            * speed_squared;
        velocity * (-magnitude / speed_squared.sqrt())
    }

    /// Handle of the dragged body.
    #[must_use]
    pub const fn body(&self) -> BodyHandle {
        self.body
    }
}

impl<W: PhysicsWorld> Actuator<W> for LiquidDrag {
    fn apply(&mut self, world: &mut W, _dt: f32) {
        let Some(body) = world.body_mut(self.body) else {
            return;
        };
        let drag = self.drag_force(body.linear_velocity());
        body.apply_force(drag);
    }

    fn kind(&self) -> &'static str {
        kind::LIQUID_DRAG
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
