//! Explicit factory registry for actuator kinds.
//!
//! Replaces runtime reflection with a plain map from kind identifier to
//! builder function, populated at process start.  Builders resolve an
//! [`ActuatorConfig`] descriptor against a concrete world and hand back a
//! boxed [`Actuator`].

use std::collections::HashMap;

use nalgebra::{Point3, Vector3};

use remora_core::error::ActuatorError;
use remora_core::traits::PhysicsWorld;
use remora_core::types::{Axis, BodyHandle, RevoluteHandle, SixDofHandle, SpringDesc};

use crate::buoyancy::{Buoyancy, BuoyancyVolume};
use crate::config::{ActuatorConfig, RigConfig};
use crate::force::{ForceActuator, ImpulseActuator};
use crate::hydro::{Hydrofoil, LiquidDrag, Propeller};
use crate::motor::DcMotor;
use crate::spring::{GenericLinkSpring, Spring};
use crate::{kind, Actuator, ActuatorRig};

/// Builder function: descriptor in, live actuator out.
pub type BuildFn<W> =
    fn(&W, &ActuatorConfig) -> Result<Box<dyn Actuator<W>>, ActuatorError>;

fn mismatched<W>(expected: &'static str) -> Result<Box<dyn Actuator<W>>, ActuatorError>
where
    W: PhysicsWorld,
{
    Err(ActuatorError::InvalidConfig {
        kind: expected,
        message: "descriptor kind does not match builder".into(),
    })
}

// ---------------------------------------------------------------------------
// ActuatorRegistry
// ---------------------------------------------------------------------------

/// Map from kind identifier to builder function.
pub struct ActuatorRegistry<W: PhysicsWorld> {
    builders: HashMap<&'static str, BuildFn<W>>,
}

impl<W: PhysicsWorld> Default for ActuatorRegistry<W> {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl<W: PhysicsWorld> ActuatorRegistry<W> {
    /// An empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// A registry with every built-in actuator kind registered.
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(kind::FORCE, build_force);
        registry.register(kind::IMPULSE, build_impulse);
        registry.register(kind::DC_MOTOR, build_dc_motor);
        registry.register(kind::PROPELLER, build_propeller);
        registry.register(kind::HYDROFOIL, build_hydrofoil);
        registry.register(kind::LIQUID_DRAG, build_liquid_drag);
        registry.register(kind::SPRING, build_spring);
        registry.register(kind::LINK_SPRING, build_link_spring);
        registry.register(kind::BUOYANCY, build_buoyancy);
        registry
    }

    /// Register (or replace) a builder for a kind identifier.
    pub fn register(&mut self, kind: &'static str, build: BuildFn<W>) {
        self.builders.insert(kind, build);
    }

    /// Returns `true` when a builder exists for the kind.
    #[must_use]
    pub fn contains(&self, kind: &str) -> bool {
        self.builders.contains_key(kind)
    }

    /// Registered kind identifiers, in arbitrary order.
    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.builders.keys().copied()
    }

    /// Build one actuator from its descriptor.
    pub fn build(
        &self,
        world: &W,
        config: &ActuatorConfig,
    ) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
        let build = self
            .builders
            .get(config.kind())
            .ok_or_else(|| ActuatorError::UnknownKind(config.kind().into()))?;
        build(world, config)
    }

    /// Build a whole rig from a configuration, in order.
    pub fn build_rig(
        &self,
        world: &W,
        config: &RigConfig,
    ) -> Result<ActuatorRig<W>, ActuatorError> {
        let mut rig = ActuatorRig::new();
        for actuator in &config.actuators {
            rig.push_boxed(self.build(world, actuator)?);
        }
        Ok(rig)
    }
}

// ---------------------------------------------------------------------------
// Built-in builders
// ---------------------------------------------------------------------------

fn build_force<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::Force {
        body,
        point,
        axis,
        force,
    } = config
    else {
        return mismatched(kind::FORCE);
    };
    let mut actuator = ForceActuator::attach(
        world,
        BodyHandle(*body),
        Point3::from(*point),
        Vector3::from(*axis),
    )?;
    actuator.set_force(*force);
    Ok(Box::new(actuator))
}

fn build_impulse<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::Impulse {
        body,
        point,
        axis,
        impulse,
    } = config
    else {
        return mismatched(kind::IMPULSE);
    };
    let mut actuator = ImpulseActuator::attach(
        world,
        BodyHandle(*body),
        Point3::from(*point),
        Vector3::from(*axis),
    )?;
    actuator.set_impulse(*impulse);
    Ok(Box::new(actuator))
}

fn build_dc_motor<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::DcMotor {
        joint,
        torque_constant,
        back_emf_constant,
        armature_resistance,
    } = config
    else {
        return mismatched(kind::DC_MOTOR);
    };
    let motor = DcMotor::attach(
        world,
        RevoluteHandle(*joint),
        *torque_constant,
        *back_emf_constant,
        *armature_resistance,
    )?;
    Ok(Box::new(motor))
}

fn build_propeller<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::Propeller {
        body,
        point,
        axis,
        lumped_gain,
        voltage,
    } = config
    else {
        return mismatched(kind::PROPELLER);
    };
    let mut propeller = Propeller::attach(
        world,
        BodyHandle(*body),
        Point3::from(*point),
        Vector3::from(*axis),
        *lumped_gain,
    )?;
    propeller.set_voltage(*voltage);
    Ok(Box::new(propeller))
}

fn build_hydrofoil<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::Hydrofoil {
        body,
        point,
        orientation_axis,
        lift_axis,
        area,
        lift,
        density,
    } = config
    else {
        return mismatched(kind::HYDROFOIL);
    };
    let foil = Hydrofoil::attach(
        world,
        BodyHandle(*body),
        Point3::from(*point),
        Vector3::from(*orientation_axis),
        Vector3::from(*lift_axis),
        *area,
        *lift,
        *density,
    )?;
    Ok(Box::new(foil))
}

fn build_liquid_drag<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::LiquidDrag {
        body,
        area,
        drag_coefficient,
        density,
    } = config
    else {
        return mismatched(kind::LIQUID_DRAG);
    };
    let drag = LiquidDrag::attach(world, BodyHandle(*body), *area, *drag_coefficient, *density)?;
    Ok(Box::new(drag))
}

fn build_spring<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::Spring {
        body_a,
        body_b,
        target,
        spring_coefficient,
        damper_coefficient,
    } = config
    else {
        return mismatched(kind::SPRING);
    };
    let spring = Spring::attach(
        world,
        BodyHandle(*body_a),
        BodyHandle(*body_b),
        SpringDesc::new(*target, *spring_coefficient, *damper_coefficient),
    )?;
    Ok(Box::new(spring))
}

fn build_link_spring<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::LinkSpring {
        joint,
        linear,
        angular,
    } = config
    else {
        return mismatched(kind::LINK_SPRING);
    };
    let mut spring = GenericLinkSpring::attach(world, SixDofHandle(*joint))?;
    for (axis, desc) in Axis::ALL.iter().zip(linear.iter()) {
        if let Some(desc) = desc {
            spring.set_linear_spring(*axis, *desc);
        }
    }
    for (axis, desc) in Axis::ALL.iter().zip(angular.iter()) {
        if let Some(desc) = desc {
            spring.set_angular_spring(*axis, *desc);
        }
    }
    Ok(Box::new(spring))
}

fn build_buoyancy<W: PhysicsWorld>(
    world: &W,
    config: &ActuatorConfig,
) -> Result<Box<dyn Actuator<W>>, ActuatorError> {
    let ActuatorConfig::Buoyancy {
        body,
        half_extents,
        center,
        density,
        gravity,
        substeps,
        drag,
    } = config
    else {
        return mismatched(kind::BUOYANCY);
    };
    let volume = BuoyancyVolume::new(Vector3::from(*half_extents))
        .with_center(Point3::from(*center));
    let mut buoyancy = Buoyancy::attach(world, BodyHandle(*body), volume, *density)?
        .with_gravity(*gravity)
        .with_substeps(*substeps);
    if let Some(drag) = drag {
        buoyancy = buoyancy.with_drag(LiquidDrag::attach(
            world,
            BodyHandle(*body),
            drag.area,
            drag.drag_coefficient,
            drag.density,
        )?);
    }
    Ok(Box::new(buoyancy))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
