//! Hookean springs: two-body springs and per-axis joint springs.

use remora_core::error::ActuatorError;
use remora_core::traits::{PhysicsWorld, RigidBody, SixDofJoint};
use remora_core::types::{Axis, BodyHandle, JointDof, SixDofHandle, SpringDesc};

use crate::{kind, Actuator};

/// Separations below this length produce no spring force (the direction is
/// undefined at zero length).
const MIN_SEPARATION: f32 = 1e-6;

// ---------------------------------------------------------------------------
// Spring
// ---------------------------------------------------------------------------

/// A Hookean spring between two bodies.
///
/// With `L` the vector from body B to body A and `L̇` the relative velocity
/// along it:
///
/// `f_a = -ks·(|L| - rest)·L̂ - kd·L̇·L̂`, `f_b = -f_a`
#[derive(Debug, Clone)]
pub struct Spring {
    body_a: BodyHandle,
    body_b: BodyHandle,
    desc: SpringDesc,
}

impl Spring {
    /// Attach between two bodies.  `desc.target` is the rest length.
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        body_a: BodyHandle,
        body_b: BodyHandle,
        desc: SpringDesc,
    ) -> Result<Self, ActuatorError> {
        if world.body(body_a).is_none() {
            return Err(ActuatorError::BodyNotFound(body_a));
        }
        if world.body(body_b).is_none() {
            return Err(ActuatorError::BodyNotFound(body_b));
        }
        Ok(Self {
            body_a,
            body_b,
            desc,
        })
    }

    /// The spring parameters.
    #[must_use]
    pub const fn desc(&self) -> SpringDesc {
        self.desc
    }

    /// Replace the spring parameters.
    pub fn set_desc(&mut self, desc: SpringDesc) {
        self.desc = desc;
    }
}

impl<W: PhysicsWorld> Actuator<W> for Spring {
    fn apply(&mut self, world: &mut W, _dt: f32) {
        let force_on_a = {
            let (Some(a), Some(b)) = (world.body(self.body_a), world.body(self.body_b)) else {
                return;
            };
            let separation = a.pose().translation.vector - b.pose().translation.vector;
            let length = separation.norm();
            if length < MIN_SEPARATION {
                return;
            }
            let direction = separation / length;
            let stretch_rate = (a.linear_velocity() - b.linear_velocity()).dot(&direction);
            direction * self.desc.force(length, stretch_rate)
        };

        if let Some(a) = world.body_mut(self.body_a) {
            a.apply_force(force_on_a);
        }
        if let Some(b) = world.body_mut(self.body_b) {
            b.apply_force(-force_on_a);
        }
    }

    fn kind(&self) -> &'static str {
        kind::SPRING
    }
}

// ---------------------------------------------------------------------------
// GenericLinkSpring
// ---------------------------------------------------------------------------

/// One independent spring per degree of freedom of a six-DoF joint.
///
/// Backends that integrate joint springs themselves
/// ([`SixDofJoint::drives_springs_internally`]) receive the descriptors
/// through [`SixDofJoint::set_spring`] on the next `apply` and no per-tick
/// force is computed here; otherwise each configured axis gets
/// `-ks·(x - target) - kd·v` through
/// [`SixDofJoint::apply_axis_force`] every tick.
#[derive(Debug, Clone)]
pub struct GenericLinkSpring {
    joint: SixDofHandle,
    springs: [Option<SpringDesc>; 6],
    delegated: bool,
}

impl GenericLinkSpring {
    /// Attach to a six-DoF joint with no springs configured.
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        joint: SixDofHandle,
    ) -> Result<Self, ActuatorError> {
        if world.six_dof(joint).is_none() {
            return Err(ActuatorError::SixDofNotFound(joint));
        }
        Ok(Self {
            joint,
            springs: [None; 6],
            delegated: false,
        })
    }

    /// Configure the spring on a linear axis.  `desc.target` is the rest
    /// offset (m).
    pub fn set_linear_spring(&mut self, axis: Axis, desc: SpringDesc) {
        self.springs[JointDof::Linear(axis).index()] = Some(desc);
        self.delegated = false;
    }

    /// Configure the spring on an angular axis.  `desc.target` is the
    /// neutral angle (rad).
    pub fn set_angular_spring(&mut self, axis: Axis, desc: SpringDesc) {
        self.springs[JointDof::Angular(axis).index()] = Some(desc);
        self.delegated = false;
    }

    /// The spring configured on a linear axis, if any.
    #[must_use]
    pub const fn linear_spring(&self, axis: Axis) -> Option<SpringDesc> {
        self.springs[JointDof::Linear(axis).index()]
    }

    /// The spring configured on an angular axis, if any.
    #[must_use]
    pub const fn angular_spring(&self, axis: Axis) -> Option<SpringDesc> {
        self.springs[JointDof::Angular(axis).index()]
    }

    /// `true` once the descriptors have been handed to a backend that
    /// drives springs internally.
    #[must_use]
    pub const fn is_delegated(&self) -> bool {
        self.delegated
    }
}

impl<W: PhysicsWorld> Actuator<W> for GenericLinkSpring {
    fn apply(&mut self, world: &mut W, _dt: f32) {
        let Some(joint) = world.six_dof_mut(self.joint) else {
            return;
        };

        if joint.drives_springs_internally() {
            // Hand over once; reconfiguring an axis re-arms the handover.
            if !self.delegated {
                for (dof, desc) in JointDof::ALL.iter().zip(self.springs.iter()) {
                    if let Some(desc) = desc {
                        joint.set_spring(*dof, *desc);
                    }
                }
                self.delegated = true;
            }
            return;
        }

        for (dof, desc) in JointDof::ALL.iter().zip(self.springs.iter()) {
            if let Some(desc) = desc {
                let force = desc.force(joint.displacement(*dof), joint.velocity(*dof));
                joint.apply_axis_force(*dof, force);
            }
        }
    }

    fn kind(&self) -> &'static str {
        kind::LINK_SPRING
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Vector3;
    use remora_test_utils::{MockBody, MockSixDof, MockWorld};

    const DT: f32 = 0.01;

    // -- Spring --

    #[test]
    fn attach_validates_both_bodies() {
        let mut world = MockWorld::new();
        let a = world.add_body(MockBody::new());
        let err =
            Spring::attach(&world, a, BodyHandle(9), SpringDesc::new(1.0, 10.0, 0.0))
                .unwrap_err();
        assert_eq!(err, ActuatorError::BodyNotFound(BodyHandle(9)));
    }

    #[test]
    fn stretched_spring_pulls_bodies_together() {
        let mut world = MockWorld::new();
        let a = world.add_body(MockBody::at(2.0, 0.0, 0.0));
        let b = world.add_body(MockBody::at(0.0, 0.0, 0.0));
        // Rest length 1, separation 2 → stretch 1.
        let mut spring =
            Spring::attach(&world, a, b, SpringDesc::new(1.0, 10.0, 0.0)).unwrap();
        spring.apply(&mut world, DT);

        // Force on A points toward B (-X), magnitude ks·stretch = 10.
        assert!((world.body(a).unwrap().force - Vector3::new(-10.0, 0.0, 0.0)).norm() < 1e-5);
        assert!((world.body(b).unwrap().force - Vector3::new(10.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn compressed_spring_pushes_bodies_apart() {
        let mut world = MockWorld::new();
        let a = world.add_body(MockBody::at(0.5, 0.0, 0.0));
        let b = world.add_body(MockBody::at(0.0, 0.0, 0.0));
        let mut spring =
            Spring::attach(&world, a, b, SpringDesc::new(1.0, 10.0, 0.0)).unwrap();
        spring.apply(&mut world, DT);
        // Compression 0.5 → force on A along +X, magnitude 5.
        assert!((world.body(a).unwrap().force - Vector3::new(5.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn spring_forces_are_equal_and_opposite() {
        let mut world = MockWorld::new();
        let a = world.add_body(
            MockBody::at(1.3, -0.2, 0.7).with_linear_velocity(Vector3::new(0.5, 1.0, -0.3)),
        );
        let b = world.add_body(
            MockBody::at(-0.4, 0.9, 0.1).with_linear_velocity(Vector3::new(-1.0, 0.2, 0.0)),
        );
        let mut spring =
            Spring::attach(&world, a, b, SpringDesc::new(0.5, 40.0, 3.0)).unwrap();
        for _ in 0..5 {
            world.clear_accumulators();
            spring.apply(&mut world, DT);
            let fa = world.body(a).unwrap().force;
            let fb = world.body(b).unwrap().force;
            assert!((fa + fb).norm() < 1e-4, "fa = {fa:?}, fb = {fb:?}");
        }
    }

    #[test]
    fn damping_opposes_separation_rate() {
        let mut world = MockWorld::new();
        // At rest length, moving apart: only the damper acts.
        let a = world.add_body(
            MockBody::at(1.0, 0.0, 0.0).with_linear_velocity(Vector3::new(2.0, 0.0, 0.0)),
        );
        let b = world.add_body(MockBody::new());
        let mut spring =
            Spring::attach(&world, a, b, SpringDesc::new(1.0, 10.0, 4.0)).unwrap();
        spring.apply(&mut world, DT);
        // Stretch rate +2 → damping force on A is -kd·2 = -8 along +X.
        assert!((world.body(a).unwrap().force - Vector3::new(-8.0, 0.0, 0.0)).norm() < 1e-5);
    }

    #[test]
    fn coincident_bodies_produce_no_force() {
        let mut world = MockWorld::new();
        let a = world.add_body(MockBody::new());
        let b = world.add_body(MockBody::new());
        let mut spring =
            Spring::attach(&world, a, b, SpringDesc::new(1.0, 100.0, 10.0)).unwrap();
        spring.apply(&mut world, DT);
        assert!(world.body(a).unwrap().force.norm() < f32::EPSILON);
        assert!(world.body(b).unwrap().force.norm() < f32::EPSILON);
    }

    #[test]
    fn spring_with_dangling_body_is_a_no_op() {
        let mut world = MockWorld::new();
        let a = world.add_body(MockBody::at(1.0, 0.0, 0.0));
        let b = world.add_body(MockBody::new());
        let mut spring =
            Spring::attach(&world, a, b, SpringDesc::new(0.5, 10.0, 0.0)).unwrap();
        let mut tiny = MockWorld::new();
        tiny.add_body(MockBody::new());
        spring.apply(&mut tiny, DT); // body B missing: must not panic
    }

    // -- GenericLinkSpring --

    #[test]
    fn link_spring_drives_configured_axes_only() {
        let mut world = MockWorld::new();
        let mut joint = MockSixDof::default();
        joint.displacements[JointDof::Linear(Axis::X).index()] = 0.5;
        joint.displacements[JointDof::Angular(Axis::Z).index()] = 0.2;
        let handle = world.add_six_dof(joint);

        let mut spring = GenericLinkSpring::attach(&world, handle).unwrap();
        spring.set_linear_spring(Axis::X, SpringDesc::new(0.0, 10.0, 0.0));
        spring.apply(&mut world, DT);

        let joint = world.six_dof(handle).unwrap();
        // Configured axis: -10·0.5 = -5.
        assert!((joint.axis_forces[0] - (-5.0)).abs() < 1e-5);
        // Unconfigured angular Z axis untouched.
        assert!(joint.axis_forces[JointDof::Angular(Axis::Z).index()].abs() < f32::EPSILON);
    }

    #[test]
    fn link_spring_angular_axis() {
        let mut world = MockWorld::new();
        let mut joint = MockSixDof::default();
        let dof = JointDof::Angular(Axis::Y);
        joint.displacements[dof.index()] = 0.3;
        joint.velocities[dof.index()] = 1.0;
        let handle = world.add_six_dof(joint);

        let mut spring = GenericLinkSpring::attach(&world, handle).unwrap();
        spring.set_angular_spring(Axis::Y, SpringDesc::new(0.1, 20.0, 2.0));
        spring.apply(&mut world, DT);

        // -20·(0.3-0.1) - 2·1 = -6.
        let joint = world.six_dof(handle).unwrap();
        assert!((joint.axis_forces[dof.index()] - (-6.0)).abs() < 1e-5);
    }

    #[test]
    fn link_spring_delegates_to_internal_backend() {
        let mut world = MockWorld::new();
        let handle = world.add_six_dof(MockSixDof::with_internal_springs());

        let mut spring = GenericLinkSpring::attach(&world, handle).unwrap();
        let desc = SpringDesc::new(0.0, 50.0, 5.0);
        spring.set_linear_spring(Axis::Y, desc);
        spring.apply(&mut world, DT);
        spring.apply(&mut world, DT);

        let joint = world.six_dof(handle).unwrap();
        // Handed over exactly once, no per-tick forces.
        assert_eq!(joint.configured_springs, vec![(JointDof::Linear(Axis::Y), desc)]);
        assert!(joint.axis_forces.iter().all(|f| f.abs() < f32::EPSILON));
        assert!(spring.is_delegated());
    }

    #[test]
    fn reconfiguring_rearms_the_handover() {
        let mut world = MockWorld::new();
        let handle = world.add_six_dof(MockSixDof::with_internal_springs());

        let mut spring = GenericLinkSpring::attach(&world, handle).unwrap();
        spring.set_linear_spring(Axis::X, SpringDesc::new(0.0, 10.0, 0.0));
        spring.apply(&mut world, DT);
        assert_eq!(world.six_dof(handle).unwrap().configured_springs.len(), 1);

        spring.set_linear_spring(Axis::X, SpringDesc::new(0.0, 30.0, 0.0));
        assert!(!spring.is_delegated());
        spring.apply(&mut world, DT);
        assert_eq!(world.six_dof(handle).unwrap().configured_springs.len(), 2);
    }

    #[test]
    fn link_spring_getters() {
        let mut world = MockWorld::new();
        let handle = world.add_six_dof(MockSixDof::default());
        let mut spring = GenericLinkSpring::attach(&world, handle).unwrap();
        assert!(spring.linear_spring(Axis::X).is_none());
        let desc = SpringDesc::new(1.0, 2.0, 3.0);
        spring.set_angular_spring(Axis::Z, desc);
        assert_eq!(spring.angular_spring(Axis::Z), Some(desc));
        assert!(spring.angular_spring(Axis::X).is_none());
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn springs_are_send_sync() {
        assert_send_sync::<Spring>();
        assert_send_sync::<GenericLinkSpring>();
    }
}
