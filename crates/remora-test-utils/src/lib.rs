//! Test utilities for the remora actuator toolkit.
//!
//! Provides a mock physics backend ([`MockWorld`]) whose bodies and joints
//! record every force, torque, and impulse written to them, plus simple
//! [`WaterSurface`](remora_core::traits::WaterSurface) implementations.
//! Intended for unit and integration tests in any crate of the workspace.

pub mod mocks;

pub use mocks::{FlatWater, MockBody, MockRevolute, MockSixDof, MockWorld, SlopedWater};
