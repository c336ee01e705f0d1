//! Framework-agnostic control-law kernel for actuator simulation.
//!
//! Pure Rust library with no engine or math-library dependencies.  Provides
//! the discrete PID control law, a classifying quadratic-root solver, and a
//! Laplace-domain transfer-function simulator built on discrete convolution.
//!
//! # Quick Start
//!
//! ```
//! use remora_control::prelude::*;
//!
//! let mut pid = Pid::new(2.0, 0.5, 0.1);
//! let dt = 0.01;
//! let command = pid.update(1.0, 0.2, dt);
//! assert!(command > 0.0);
//!
//! let mut lag = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, dt).unwrap();
//! let response = lag.output(0.0, 1.0);
//! ```

pub mod laplace;
pub mod pid;
pub mod roots;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::laplace::{TransferFunction, TransferFunctionError};
    pub use crate::pid::Pid;
    pub use crate::roots::{quadratic_roots, QuadraticRoots};
}
