// remora-core: capability traits, handles, value types, errors, and
// configuration shared across the remora actuator toolkit.

pub mod config;
pub mod error;
pub mod traits;
pub mod types;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::config::{EnvConfig, STANDARD_GRAVITY, WATER_DENSITY};
    pub use crate::error::{ActuatorError, ConfigError, RemoraError};
    pub use crate::traits::{PhysicsWorld, RevoluteJoint, RigidBody, SixDofJoint, WaterSurface};
    pub use crate::types::{Axis, BodyHandle, JointDof, RevoluteHandle, SixDofHandle, SpringDesc};
}
