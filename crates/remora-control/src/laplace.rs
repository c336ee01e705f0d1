//! Laplace-domain transfer-function simulator.
//!
//! A quadratic-denominator transfer function `H(s) = num / (a·s² + b·s + c)`
//! is converted once, at construction, into a sampled closed-form impulse
//! response derived from the denominator's roots:
//!
//! - distinct real roots `r1, r2`:
//!   `h(t) = num/(a·(r1-r2)) · (e^{r1·t} - e^{r2·t})`
//! - repeated real root `r`: `h(t) = (num/a) · t · e^{r·t}`
//! - complex pair `re ± im·i`: `h(t) = num/(a·im) · e^{re·t} · sin(im·t)`
//!
//! [`TransferFunction::output`] then produces the response by discrete
//! convolution of the stored input history against that table.  The history
//! grows without bound and each call is O(history length); callers needing
//! bounded cost must truncate externally.

use thiserror::Error;

use crate::roots::{quadratic_roots, QuadraticRoots};

/// Impulse-response samples stop once the decay envelope falls below this.
const DECAY_TOLERANCE: f32 = 1e-6;

/// Hard cap on the impulse-response table length.
const MAX_IMPULSE_SAMPLES: usize = 8192;

// ---------------------------------------------------------------------------
// TransferFunctionError
// ---------------------------------------------------------------------------

/// Construction errors for [`TransferFunction`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransferFunctionError {
    #[error("denominator is not quadratic: leading coefficient is zero")]
    DegenerateDenominator,

    #[error("impulse response is unbounded: both denominator roots at the origin")]
    UnstableResponse,

    #[error("sample step must be > 0, got {0}")]
    InvalidSampleStep(f32),
}

// ---------------------------------------------------------------------------
// TransferFunction
// ---------------------------------------------------------------------------

/// Discrete simulator for a quadratic-denominator transfer function.
///
/// The impulse-response table is computed once at construction and is
/// immutable thereafter; the input history accumulates across calls.
/// Callers are expected to invoke [`output`](Self::output) once per tick of
/// `delta_t` seconds with a monotonically non-decreasing `time`.
#[derive(Clone, Debug)]
pub struct TransferFunction {
    delta_t: f32,
    impulse: Vec<f32>,
    history: Vec<(f32, f32)>,
}

impl TransferFunction {
    /// Build the simulator for `H(s) = num / (a·s² + b·s + c)`.
    ///
    /// `delta_t` is both the impulse-response sample spacing and the
    /// expected tick length.  Errors on a non-quadratic denominator
    /// (`a == 0`), on a repeated root at the origin (unbounded ramp
    /// response), and on a non-positive `delta_t`.
    pub fn quadratic(
        num: f32,
        a: f32,
        b: f32,
        c: f32,
        delta_t: f32,
    ) -> Result<Self, TransferFunctionError> {
        if delta_t <= 0.0 {
            return Err(TransferFunctionError::InvalidSampleStep(delta_t));
        }
        let roots =
            quadratic_roots(a, b, c).ok_or(TransferFunctionError::DegenerateDenominator)?;
        if matches!(roots, QuadraticRoots::RealRepeated { r } if r == 0.0) {
            return Err(TransferFunctionError::UnstableResponse);
        }

        let scale = num / a;
        let decaying = roots.max_real_part() < 0.0;
        let mut impulse = Vec::new();
        for n in 0..MAX_IMPULSE_SAMPLES {
            let t = n as f32 * delta_t;
            let (value, envelope) = sample_impulse(&roots, scale, t);
            if decaying && n > 0 && envelope < DECAY_TOLERANCE {
                break;
            }
            impulse.push(value);
        }

        Ok(Self {
            delta_t,
            impulse,
            history: Vec::new(),
        })
    }

    /// Record `input` at `time` and return the convolved response.
    ///
    /// `output(t) = Σ_i h(t - t_i) · u_i · Δt` over the accumulated history;
    /// contributions older than the impulse-response horizon have fully
    /// decayed and are dropped from the sum (but not from the history).
    pub fn output(&mut self, time: f32, input: f32) -> f32 {
        self.history.push((time, input));
        let mut acc = 0.0_f32;
        for &(t_i, u_i) in &self.history {
            let elapsed = time - t_i;
            if elapsed < 0.0 {
                continue;
            }
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            let index = (elapsed / self.delta_t).round() as usize;
            if let Some(&h) = self.impulse.get(index) {
                acc = (h * u_i).mul_add(self.delta_t, acc);
            }
        }
        acc
    }

    /// Sample spacing of the impulse-response table (seconds).
    #[must_use]
    pub const fn sample_step(&self) -> f32 {
        self.delta_t
    }

    /// The sampled impulse response.
    #[must_use]
    pub fn impulse_response(&self) -> &[f32] {
        &self.impulse
    }

    /// Number of inputs recorded so far.
    #[must_use]
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Drop the accumulated input history, keeping the impulse response.
    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}

/// Closed-form impulse-response value and decay envelope at `t`.
fn sample_impulse(roots: &QuadraticRoots, scale: f32, t: f32) -> (f32, f32) {
    match *roots {
        QuadraticRoots::RealDistinct { r1, r2 } => {
            let k = scale / (r1 - r2);
            let e1 = (r1 * t).exp();
            let e2 = (r2 * t).exp();
            (k * (e1 - e2), k.abs() * (e1 + e2))
        }
        QuadraticRoots::RealRepeated { r } => {
            let value = scale * t * (r * t).exp();
            (value, value.abs())
        }
        QuadraticRoots::Complex { re, im } => {
            let envelope = (scale / im).abs() * (re * t).exp();
            (scale / im * (re * t).exp() * (im * t).sin(), envelope)
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 0.01;

    #[test]
    fn degenerate_denominator_rejected() {
        let err = TransferFunction::quadratic(1.0, 0.0, 1.0, 1.0, DT).unwrap_err();
        assert_eq!(err, TransferFunctionError::DegenerateDenominator);
    }

    #[test]
    fn double_root_at_origin_rejected() {
        let err = TransferFunction::quadratic(1.0, 1.0, 0.0, 0.0, DT).unwrap_err();
        assert_eq!(err, TransferFunctionError::UnstableResponse);
    }

    #[test]
    fn non_positive_sample_step_rejected() {
        let err = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, 0.0).unwrap_err();
        assert_eq!(err, TransferFunctionError::InvalidSampleStep(0.0));
    }

    #[test]
    fn impulse_response_starts_at_zero() {
        // h(0) = 0 in all three root classes.
        for (a, b, c) in [(1.0, -3.0, 2.0), (1.0, 2.0, 1.0), (1.0, 2.0, 5.0)] {
            let tf = TransferFunction::quadratic(1.0, a, b, c, DT).unwrap();
            assert!(tf.impulse_response()[0].abs() < f32::EPSILON);
        }
    }

    #[test]
    fn repeated_root_impulse_matches_closed_form() {
        // H(s) = 1/(s+1)²: h(t) = t·e^{-t}.
        let tf = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, DT).unwrap();
        let h = tf.impulse_response();
        for n in [1_usize, 10, 100, 500] {
            let t = n as f32 * DT;
            let expected = t * (-t).exp();
            assert!(
                (h[n] - expected).abs() < 1e-5,
                "h({t}) = {}, expected {expected}",
                h[n]
            );
        }
    }

    #[test]
    fn distinct_roots_impulse_matches_closed_form() {
        // H(s) = 1/((s+1)(s+2)): h(t) = e^{-t} - e^{-2t}.
        let tf = TransferFunction::quadratic(1.0, 1.0, 3.0, 2.0, DT).unwrap();
        let h = tf.impulse_response();
        for n in [1_usize, 50, 200] {
            let t = n as f32 * DT;
            let expected = (-t).exp() - (-2.0 * t).exp();
            assert!((h[n] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn complex_roots_impulse_matches_closed_form() {
        // H(s) = 1/(s² + 2s + 5): roots -1 ± 2i, h(t) = ½·e^{-t}·sin(2t).
        let tf = TransferFunction::quadratic(1.0, 1.0, 2.0, 5.0, DT).unwrap();
        let h = tf.impulse_response();
        for n in [1_usize, 25, 100] {
            let t = n as f32 * DT;
            let expected = 0.5 * (-t).exp() * (2.0 * t).sin();
            assert!((h[n] - expected).abs() < 1e-5);
        }
    }

    #[test]
    fn decaying_response_table_is_truncated() {
        let tf = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, DT).unwrap();
        let len = tf.impulse_response().len();
        assert!(len < MAX_IMPULSE_SAMPLES, "table not truncated: {len}");
        // The tail must actually have decayed.
        assert!(tf.impulse_response().last().unwrap().abs() < 1e-4);
    }

    #[test]
    fn step_response_converges_to_dc_gain() {
        // Unit step into H(s) = 1/(s+1)²: steady state = H(0) = 1.
        let mut tf = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, DT).unwrap();
        let mut out = 0.0;
        for n in 0..2500 {
            out = tf.output(n as f32 * DT, 1.0);
        }
        assert!((out - 1.0).abs() < 1e-3, "steady state {out}");
    }

    #[test]
    fn oscillatory_step_response_converges_to_dc_gain() {
        // H(s) = 1/(s² + 2s + 5): DC gain 0.2.
        let mut tf = TransferFunction::quadratic(1.0, 1.0, 2.0, 5.0, DT).unwrap();
        let mut out = 0.0;
        for n in 0..2000 {
            out = tf.output(n as f32 * DT, 1.0);
        }
        assert!((out - 0.2).abs() < 1e-3, "steady state {out}");
    }

    #[test]
    fn output_is_linear_in_input() {
        let mut a = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, DT).unwrap();
        let mut b = a.clone();
        let mut out_a = 0.0;
        let mut out_b = 0.0;
        for n in 0..200 {
            let t = n as f32 * DT;
            out_a = a.output(t, 1.0);
            out_b = b.output(t, 2.0);
        }
        assert!((out_b - 2.0 * out_a).abs() < 1e-5);
    }

    #[test]
    fn numerator_scales_response() {
        let mut unit = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, DT).unwrap();
        let mut triple = TransferFunction::quadratic(3.0, 1.0, 2.0, 1.0, DT).unwrap();
        let mut out_unit = 0.0;
        let mut out_triple = 0.0;
        for n in 0..200 {
            let t = n as f32 * DT;
            out_unit = unit.output(t, 1.0);
            out_triple = triple.output(t, 1.0);
        }
        assert!((out_triple - 3.0 * out_unit).abs() < 1e-4);
    }

    #[test]
    fn history_accumulates_and_clears() {
        let mut tf = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, DT).unwrap();
        for n in 0..5 {
            tf.output(n as f32 * DT, 1.0);
        }
        assert_eq!(tf.history_len(), 5);
        tf.clear_history();
        assert_eq!(tf.history_len(), 0);
    }

    #[test]
    fn zero_input_history_produces_zero_output() {
        let mut tf = TransferFunction::quadratic(1.0, 1.0, 2.0, 1.0, DT).unwrap();
        for n in 0..50 {
            let out = tf.output(n as f32 * DT, 0.0);
            assert!(out.abs() < f32::EPSILON);
        }
    }

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn transfer_function_is_send_sync() {
        assert_send_sync::<TransferFunction>();
        assert_send_sync::<TransferFunctionError>();
    }
}
