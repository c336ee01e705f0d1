//! Discrete PID control law with output and integral clamping.

// ---------------------------------------------------------------------------
// Pid
// ---------------------------------------------------------------------------

/// PID controller producing a bounded output from a tracking error.
///
/// Features:
/// - Anti-windup: the integral is re-clamped after every accumulation.
/// - Asymmetric output clamp `[min_out, max_out]` and integral clamp
///   `[min_int, max_int]`, both defaulting to `[-100, 100]`.
/// - Derivative-of-error (not derivative-of-measurement).
///
/// A non-positive `dt` is tolerated: the derivative term is zero, the
/// integral and the stored error are left untouched, and the clamped
/// proportional + integral sum is still returned.
#[derive(Clone, Debug)]
pub struct Pid {
    kp: f32,
    ki: f32,
    kd: f32,
    min_out: f32,
    max_out: f32,
    min_int: f32,
    max_int: f32,
    integral: f32,
    last_error: f32,
}

impl Pid {
    /// Create a new PID controller with the given gains.
    ///
    /// Output and integral clamps default to `[-100, 100]`.
    #[must_use]
    pub const fn new(kp: f32, ki: f32, kd: f32) -> Self {
        Self {
            kp,
            ki,
            kd,
            min_out: -100.0,
            max_out: 100.0,
            min_int: -100.0,
            max_int: 100.0,
            integral: 0.0,
            last_error: 0.0,
        }
    }

    /// Set the output clamp range.
    ///
    /// # Panics
    ///
    /// Panics if `min > max` (malformed clamp ranges are a caller contract
    /// violation and fail fast).
    #[must_use]
    pub fn with_output_clamp(mut self, min: f32, max: f32) -> Self {
        assert!(min <= max, "output clamp range must satisfy min <= max");
        self.min_out = min;
        self.max_out = max;
        self
    }

    /// Set the integral (anti-windup) clamp range.
    ///
    /// # Panics
    ///
    /// Panics if `min > max`.
    #[must_use]
    pub fn with_integral_clamp(mut self, min: f32, max: f32) -> Self {
        assert!(min <= max, "integral clamp range must satisfy min <= max");
        self.min_int = min;
        self.max_int = max;
        self
    }

    /// Compute control output from a setpoint and a measurement.
    pub fn update(&mut self, desired: f32, actual: f32, dt: f32) -> f32 {
        self.update_error(desired - actual, dt)
    }

    /// Compute control output from a precomputed tracking error.
    pub fn update_error(&mut self, error: f32, dt: f32) -> f32 {
        if dt <= 0.0 {
            // Degenerate tick: no state mutation, no derivative.
            let output = self.kp.mul_add(error, self.ki * self.integral);
            return output.clamp(self.min_out, self.max_out);
        }

        self.integral = (self.integral + error * dt).clamp(self.min_int, self.max_int);
        let derivative = (error - self.last_error) / dt;
        self.last_error = error;

        let output = self
            .kd
            .mul_add(derivative, self.kp.mul_add(error, self.ki * self.integral));
        output.clamp(self.min_out, self.max_out)
    }

    /// Reset integral and derivative state.
    pub const fn reset(&mut self) {
        self.integral = 0.0;
        self.last_error = 0.0;
    }

    /// Returns the accumulated integral term.
    #[must_use]
    pub const fn integral(&self) -> f32 {
        self.integral
    }

    /// Returns the error stored from the previous update.
    #[must_use]
    pub const fn last_error(&self) -> f32 {
        self.last_error
    }

    /// Returns the proportional gain.
    #[must_use]
    pub const fn kp(&self) -> f32 {
        self.kp
    }

    /// Returns the integral gain.
    #[must_use]
    pub const fn ki(&self) -> f32 {
        self.ki
    }

    /// Returns the derivative gain.
    #[must_use]
    pub const fn kd(&self) -> f32 {
        self.kd
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
