//! Iterative buoyancy estimator driven by an external water-height query.

use std::sync::Arc;

use nalgebra::{Point3, Vector3};

use remora_core::config::{EnvConfig, STANDARD_GRAVITY, WATER_DENSITY};
use remora_core::error::ActuatorError;
use remora_core::traits::{PhysicsWorld, RigidBody, WaterSurface};
use remora_core::types::BodyHandle;

use crate::hydro::LiquidDrag;
use crate::{kind, Actuator};

// ---------------------------------------------------------------------------
// BuoyancyVolume
// ---------------------------------------------------------------------------

/// Displaced-volume description: an axis-aligned box in the body's frame.
///
/// The body capability surface carries no geometry, so the extent the
/// estimator integrates over is supplied here at attach time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuoyancyVolume {
    /// Box center in the body frame.
    pub center: Point3<f32>,
    /// Box half-extents (m), all > 0.
    pub half_extents: Vector3<f32>,
}

impl BuoyancyVolume {
    /// A box centered on the body origin.
    #[must_use]
    pub fn new(half_extents: Vector3<f32>) -> Self {
        Self {
            center: Point3::origin(),
            half_extents,
        }
    }

    /// Builder: offset the box center in the body frame.
    #[must_use]
    pub const fn with_center(mut self, center: Point3<f32>) -> Self {
        self.center = center;
        self
    }

    /// Total displaced volume (m³).
    #[must_use]
    pub fn volume(&self) -> f32 {
        8.0 * self.half_extents.x * self.half_extents.y * self.half_extents.z
    }

    /// Vertical extent of the box (m), along the body-local Y axis.
    #[must_use]
    pub fn height(&self) -> f32 {
        2.0 * self.half_extents.y
    }
}

// ---------------------------------------------------------------------------
// Buoyancy
// ---------------------------------------------------------------------------

/// Buoyant-force estimator for a partially or fully submerged body.
///
/// The volume's vertical extent is cut into `substeps` slabs along the
/// body-local Y axis.  Each tick, every slab's sample point is transformed
/// into world space, the water height queried at its world (x, z), and the
/// slab contributes `ρ·g·(V/substeps)` scaled by its submerged fraction.
/// The summed force acts upward (world +Y) at the volume center, inducing
/// the corresponding righting torque when the center is offset.
///
/// Fully submerged the sum is exactly `ρ·g·V` (the displaced fluid weight);
/// fully above the water line it is zero.  The slab height is measured in
/// the body frame, so the partial-submersion ramp is approximate for large
/// roll/pitch angles.
///
/// Without a water surface attached, `apply` only runs the optional drag.
pub struct Buoyancy {
    body: BodyHandle,
    volume: BuoyancyVolume,
    density: f32,
    gravity: f32,
    substeps: u32,
    water: Option<Arc<dyn WaterSurface>>,
    drag: Option<LiquidDrag>,
}

impl Buoyancy {
    /// Attach to `body` with the given displaced volume and fluid density
    /// (kg/m³).
    pub fn attach<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        volume: BuoyancyVolume,
        density: f32,
    ) -> Result<Self, ActuatorError> {
        if world.body(body).is_none() {
            return Err(ActuatorError::BodyNotFound(body));
        }
        Ok(Self {
            body,
            volume,
            density,
            gravity: STANDARD_GRAVITY,
            substeps: 10,
            water: None,
            drag: None,
        })
    }

    /// Attach with the default fluid density (fresh water).
    pub fn attach_in_water<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        volume: BuoyancyVolume,
    ) -> Result<Self, ActuatorError> {
        Self::attach(world, body, volume, WATER_DENSITY)
    }

    /// Attach taking density, gravity, and substep count from an
    /// environment configuration.
    pub fn from_env<W: PhysicsWorld>(
        world: &W,
        body: BodyHandle,
        volume: BuoyancyVolume,
        env: &EnvConfig,
    ) -> Result<Self, ActuatorError> {
        Ok(Self::attach(world, body, volume, env.fluid_density)?
            .with_gravity(env.gravity)
            .with_substeps(env.buoyancy_substeps))
    }

    /// Builder: set the vertical sample count (clamped to >= 1).
    #[must_use]
    pub fn with_substeps(mut self, substeps: u32) -> Self {
        self.substeps = substeps.max(1);
        self
    }

    /// Builder: override gravitational acceleration (m/s²).
    #[must_use]
    pub const fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    /// Builder: attach a liquid drag model applied in the same tick.
    #[must_use]
    pub fn with_drag(mut self, drag: LiquidDrag) -> Self {
        self.drag = Some(drag);
        self
    }

    /// Set the external water-height query.
    pub fn set_water_surface(&mut self, water: Arc<dyn WaterSurface>) {
        self.water = Some(water);
    }

    /// The current water-height query, if any.
    #[must_use]
    pub fn water_surface(&self) -> Option<&Arc<dyn WaterSurface>> {
        self.water.as_ref()
    }

    /// Vertical sample count.
    #[must_use]
    pub const fn substeps(&self) -> u32 {
        self.substeps
    }

    /// Buoyant force magnitude for the current pose (N).
    fn submerged_force<B: RigidBody>(&self, body: &B, water: &dyn WaterSurface) -> f32 {
        let pose = body.pose();
        let slab_height = self.volume.height() / self.substeps as f32;
        let slab_volume = self.volume.volume() / self.substeps as f32;
        let bottom = self.volume.center.y - self.volume.half_extents.y;

        let mut force = 0.0_f32;
        for i in 0..self.substeps {
            let local = Point3::new(
                self.volume.center.x,
                (i as f32).mul_add(slab_height, bottom),
                self.volume.center.z,
            );
            let sample = pose.transform_point(&local);
            let depth = water.height_at(sample.x, sample.y, sample.z) - sample.y;
            if depth <= 0.0 {
                continue;
            }
            let fraction = (depth / slab_height).min(1.0);
            force = (self.density * self.gravity * slab_volume).mul_add(fraction, force);
        }
        force
    }
}

impl<W: PhysicsWorld> Actuator<W> for Buoyancy {
    fn apply(&mut self, world: &mut W, dt: f32) {
        if let Some(water) = &self.water {
            let lift = match world.body(self.body) {
                Some(body) => self.submerged_force(body, water.as_ref()),
                None => return,
            };
            if lift > 0.0 {
                let center = self.volume.center;
                if let Some(body) = world.body_mut(self.body) {
                    let at = body.pose().transform_point(&center);
                    body.apply_force_at(Vector3::new(0.0, lift, 0.0), at);
                }
            }
        }

        if let Some(drag) = &mut self.drag {
            drag.apply(world, dt);
        }
    }

    fn kind(&self) -> &'static str {
        kind::BUOYANCY
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use remora_test_utils::{FlatWater, MockBody, MockWorld, SlopedWater};

    const DT: f32 = 0.01;

    /// 2×2×2 m cube: volume 8 m³.
    fn cube() -> BuoyancyVolume {
        BuoyancyVolume::new(Vector3::new(1.0, 1.0, 1.0))
    }

    fn buoyancy_at(depth_y: f32, water_height: f32) -> (MockWorld, BodyHandle, Buoyancy) {
        let mut world = MockWorld::new();
        let hull = world.add_body(MockBody::at(0.0, depth_y, 0.0));
        let mut buoyancy = Buoyancy::attach(&world, hull, cube(), 1000.0)
            .unwrap()
            .with_gravity(10.0);
        buoyancy.set_water_surface(Arc::new(FlatWater::new(water_height)));
        (world, hull, buoyancy)
    }

    #[test]
    fn volume_and_height() {
        let v = cube();
        assert!((v.volume() - 8.0).abs() < 1e-6);
        assert!((v.height() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn fully_submerged_force_equals_displaced_weight() {
        // Hull center 10 m down, surface at 0: fully submerged.
        let (mut world, hull, mut buoyancy) = buoyancy_at(-10.0, 0.0);
        buoyancy.apply(&mut world, DT);
        let force = world.body(hull).unwrap().force;
        // ρ·g·V = 1000·10·8 = 80 000 N, straight up.
        assert!((force.y - 80_000.0).abs() < 1.0, "force.y = {}", force.y);
        assert!(force.x.abs() < f32::EPSILON);
        assert!(force.z.abs() < f32::EPSILON);
    }

    #[test]
    fn fully_above_water_force_is_zero() {
        let (mut world, hull, mut buoyancy) = buoyancy_at(10.0, 0.0);
        buoyancy.apply(&mut world, DT);
        assert!(world.body(hull).unwrap().force.norm() < f32::EPSILON);
    }

    #[test]
    fn half_submerged_force_is_about_half() {
        // Hull centered on the surface: bottom half submerged.
        let (mut world, hull, mut buoyancy) = buoyancy_at(0.0, 0.0);
        buoyancy.apply(&mut world, DT);
        let force_y = world.body(hull).unwrap().force.y;
        let full = 80_000.0;
        assert!(
            (force_y - 0.5 * full).abs() < full * 0.06,
            "force.y = {force_y}"
        );
    }

    #[test]
    fn force_grows_monotonically_with_depth() {
        let mut previous = 0.0;
        for step in 0..8 {
            let y = 1.5 - step as f32 * 0.5;
            let (mut world, hull, mut buoyancy) = buoyancy_at(y, 0.0);
            buoyancy.apply(&mut world, DT);
            let force_y = world.body(hull).unwrap().force.y;
            assert!(
                force_y >= previous - 1e-3,
                "depth {y}: {force_y} < {previous}"
            );
            previous = force_y;
        }
    }

    #[test]
    fn more_substeps_refine_the_estimate() {
        // Quarter submerged: exact force = 20 000 N.
        let mut world = MockWorld::new();
        let hull = world.add_body(MockBody::at(0.0, 0.5, 0.0));
        let mut coarse = Buoyancy::attach(&world, hull, cube(), 1000.0)
            .unwrap()
            .with_gravity(10.0)
            .with_substeps(2);
        let mut fine = Buoyancy::attach(&world, hull, cube(), 1000.0)
            .unwrap()
            .with_gravity(10.0)
            .with_substeps(64);
        coarse.set_water_surface(Arc::new(FlatWater::new(0.0)));
        fine.set_water_surface(Arc::new(FlatWater::new(0.0)));

        coarse.apply(&mut world, DT);
        let coarse_force = world.body(hull).unwrap().force.y;
        world.clear_accumulators();
        fine.apply(&mut world, DT);
        let fine_force = world.body(hull).unwrap().force.y;

        let exact = 20_000.0;
        assert!((fine_force - exact).abs() <= (coarse_force - exact).abs() + 1e-3);
        assert!((fine_force - exact).abs() < exact * 0.05);
    }

    #[test]
    fn offset_volume_induces_righting_torque() {
        let mut world = MockWorld::new();
        let hull = world.add_body(MockBody::at(0.0, -10.0, 0.0));
        let volume = cube().with_center(Point3::new(1.0, 0.0, 0.0));
        let mut buoyancy = Buoyancy::attach(&world, hull, volume, 1000.0)
            .unwrap()
            .with_gravity(10.0);
        buoyancy.set_water_surface(Arc::new(FlatWater::new(0.0)));
        buoyancy.apply(&mut world, DT);

        let body = world.body(hull).unwrap();
        // Upward force at +X offset: torque = x̂ × F·ŷ = F·ẑ.
        assert!((body.torque.z - 80_000.0).abs() < 1.0);
    }

    #[test]
    fn sloped_water_uses_sample_position() {
        let mut world = MockWorld::new();
        // Two identical hulls at different X under a sloped surface.
        let wet = world.add_body(MockBody::at(10.0, 0.0, 0.0));
        let dry = world.add_body(MockBody::at(-10.0, 0.0, 0.0));
        let water: Arc<dyn WaterSurface> = Arc::new(SlopedWater {
            base: 0.0,
            slope: 1.0,
        });
        for handle in [wet, dry] {
            let mut buoyancy = Buoyancy::attach(&world, handle, cube(), 1000.0)
                .unwrap()
                .with_gravity(10.0);
            buoyancy.set_water_surface(Arc::clone(&water));
            buoyancy.apply(&mut world, DT);
        }
        // At x=10 the surface is at +10: fully submerged.  At x=-10 it is
        // at -10: fully dry.
        assert!((world.body(wet).unwrap().force.y - 80_000.0).abs() < 1.0);
        assert!(world.body(dry).unwrap().force.norm() < f32::EPSILON);
    }

    #[test]
    fn no_water_surface_is_a_no_op() {
        let mut world = MockWorld::new();
        let hull = world.add_body(MockBody::at(0.0, -10.0, 0.0));
        let mut buoyancy = Buoyancy::attach(&world, hull, cube(), 1000.0).unwrap();
        buoyancy.apply(&mut world, DT);
        assert!(world.body(hull).unwrap().force.norm() < f32::EPSILON);
    }

    #[test]
    fn attached_drag_runs_in_the_same_tick() {
        let mut world = MockWorld::new();
        let hull = world.add_body(
            MockBody::at(0.0, -10.0, 0.0).with_linear_velocity(Vector3::new(2.0, 0.0, 0.0)),
        );
        let drag = LiquidDrag::attach(&world, hull, 1.0, 1.0, 1000.0).unwrap();
        let mut buoyancy = Buoyancy::attach(&world, hull, cube(), 1000.0)
            .unwrap()
            .with_gravity(10.0)
            .with_drag(drag);
        buoyancy.set_water_surface(Arc::new(FlatWater::new(0.0)));
        buoyancy.apply(&mut world, DT);

        let body = world.body(hull).unwrap();
        // Buoyant lift plus drag: D = ½·1000·1·1·4 = 2000 along -X.
        assert!((body.force.y - 80_000.0).abs() < 1.0);
        assert!((body.force.x - (-2000.0)).abs() < 1e-1);
    }

    #[test]
    fn from_env_takes_fluid_parameters() {
        let mut world = MockWorld::new();
        let hull = world.add_body(MockBody::at(0.0, -10.0, 0.0));
        let env = EnvConfig {
            fluid_density: 1025.0,
            gravity: 10.0,
            buoyancy_substeps: 4,
            ..EnvConfig::default()
        };
        let mut buoyancy = Buoyancy::from_env(&world, hull, cube(), &env).unwrap();
        assert_eq!(buoyancy.substeps(), 4);
        buoyancy.set_water_surface(Arc::new(FlatWater::new(0.0)));
        buoyancy.apply(&mut world, DT);
        // ρ·g·V = 1025·10·8.
        assert!((world.body(hull).unwrap().force.y - 82_000.0).abs() < 1.0);
    }

    #[test]
    fn substeps_clamped_to_at_least_one() {
        let mut world = MockWorld::new();
        let hull = world.add_body(MockBody::new());
        let buoyancy = Buoyancy::attach(&world, hull, cube(), 1000.0)
            .unwrap()
            .with_substeps(0);
        assert_eq!(buoyancy.substeps(), 1);
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn buoyancy_is_send_sync() {
        assert_send_sync::<Buoyancy>();
    }
}
