//! Tick-driven actuator models for rigid-body simulation.
//!
//! Every actuator implements [`Actuator`]: once per simulation tick the
//! owning loop calls `apply(world, dt)`, the actuator reads kinematic state
//! from its attached body or joint through the
//! [`PhysicsWorld`](remora_core::traits::PhysicsWorld) capability surface,
//! and writes a force, torque, or impulse back.  Actuators hold handles,
//! never references; a handle whose referent is gone makes `apply` a no-op.
//!
//! # Pipeline
//!
//! ```text
//! control logic ──► parameter setters ──► Actuator::apply(world, dt) ──► backend
//!                   (voltage, angle, …)   (reads state, writes forces)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nalgebra::{Point3, Vector3};
//! use remora_actuator::prelude::*;
//! use remora_test_utils::{MockBody, MockWorld};
//!
//! let mut world = MockWorld::new();
//! let hull = world.add_body(MockBody::new());
//!
//! let mut prop = Propeller::attach(
//!     &world,
//!     hull,
//!     Point3::new(0.0, 0.0, -1.0),
//!     Vector3::new(0.0, 0.0, 1.0),
//!     0.5,
//! )
//! .unwrap();
//! prop.set_voltage(12.0);
//!
//! let mut rig = ActuatorRig::new();
//! rig.push(prop);
//! rig.apply_all(&mut world, 0.01);
//! ```

pub mod buoyancy;
pub mod config;
pub mod force;
pub mod hydro;
pub mod motor;
pub mod mount;
pub mod registry;
pub mod spring;

use remora_core::traits::PhysicsWorld;

// ---------------------------------------------------------------------------
// Kind identifiers
// ---------------------------------------------------------------------------

/// Type identifiers for the built-in actuator kinds.
///
/// Used both as [`Actuator::kind`] return values and as registry keys.
pub mod kind {
    pub const FORCE: &str = "force";
    pub const IMPULSE: &str = "impulse";
    pub const DC_MOTOR: &str = "dc_motor";
    pub const PROPELLER: &str = "propeller";
    pub const HYDROFOIL: &str = "hydrofoil";
    pub const LIQUID_DRAG: &str = "liquid_drag";
    pub const SPRING: &str = "spring";
    pub const LINK_SPRING: &str = "link_spring";
    pub const BUOYANCY: &str = "buoyancy";
}

// ---------------------------------------------------------------------------
// Actuator
// ---------------------------------------------------------------------------

/// The actuator capability: compute and inject a force, torque, or impulse
/// once per simulation tick.
///
/// Implementations mutate their internal state only inside `apply` and the
/// type-specific parameter setters; the subsystem provides no locking, and
/// callers must not invoke these concurrently on one instance.
pub trait Actuator<W: PhysicsWorld>: Send + Sync {
    /// Run the actuator for the current time step.
    ///
    /// A non-positive `dt` and missing referents must degrade to a zero
    /// contribution, never corrupt state or panic.
    fn apply(&mut self, world: &mut W, dt: f32);

    /// Stable type identifier (see [`kind`]).
    fn kind(&self) -> &'static str;
}

// ---------------------------------------------------------------------------
// ActuatorRig
// ---------------------------------------------------------------------------

/// An owning collection of actuators driven once per tick.
///
/// The rig is the "owning loop" of the subsystem contract: it applies every
/// actuator in insertion order and isolates degenerate ones (their `apply`
/// is a no-op) rather than failing the tick.
pub struct ActuatorRig<W: PhysicsWorld> {
    actuators: Vec<Box<dyn Actuator<W>>>,
}

impl<W: PhysicsWorld> Default for ActuatorRig<W> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: PhysicsWorld> ActuatorRig<W> {
    /// An empty rig.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actuators: Vec::new(),
        }
    }

    /// Add an actuator to the rig.
    pub fn push(&mut self, actuator: impl Actuator<W> + 'static) {
        self.actuators.push(Box::new(actuator));
    }

    /// Add an already-boxed actuator (e.g. from the registry).
    pub fn push_boxed(&mut self, actuator: Box<dyn Actuator<W>>) {
        self.actuators.push(actuator);
    }

    /// Apply every actuator for this tick, in insertion order.
    pub fn apply_all(&mut self, world: &mut W, dt: f32) {
        for actuator in &mut self.actuators {
            actuator.apply(world, dt);
        }
    }

    /// Number of actuators in the rig.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actuators.len()
    }

    /// Returns `true` when the rig holds no actuators.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actuators.is_empty()
    }

    /// Kind identifiers of the actuators, in insertion order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.actuators.iter().map(|a| a.kind())
    }

    /// Remove all actuators.
    pub fn clear(&mut self) {
        self.actuators.clear();
    }
}

// ---------------------------------------------------------------------------
// Prelude
// ---------------------------------------------------------------------------

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::buoyancy::{Buoyancy, BuoyancyVolume};
    pub use crate::config::{ActuatorConfig, RigConfig};
    pub use crate::force::{ForceActuator, ImpulseActuator};
    pub use crate::hydro::{Hydrofoil, LiftCoefficients, LiquidDrag, Propeller};
    pub use crate::motor::DcMotor;
    pub use crate::mount::Mount;
    pub use crate::registry::ActuatorRegistry;
    pub use crate::spring::{GenericLinkSpring, Spring};
    pub use crate::{Actuator, ActuatorRig};
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
