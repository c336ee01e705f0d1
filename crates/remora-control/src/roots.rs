//! Quadratic-root solver with discriminant classification.

// ---------------------------------------------------------------------------
// QuadraticRoots
// ---------------------------------------------------------------------------

/// Roots of `a·s² + b·s + c = 0`, classified by discriminant sign.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// Discriminant > 0: two distinct real roots.
    ///
    /// `r1` carries the `+√d` branch, `r2` the `-√d` branch.
    RealDistinct { r1: f32, r2: f32 },
    /// Discriminant == 0: one repeated real root.
    RealRepeated { r: f32 },
    /// Discriminant < 0: a complex-conjugate pair `re ± im·i` with `im > 0`.
    Complex { re: f32, im: f32 },
}

impl QuadraticRoots {
    /// Largest real part among the roots.
    ///
    /// Negative for every root of a strictly stable denominator.
    #[must_use]
    pub fn max_real_part(&self) -> f32 {
        match *self {
            Self::RealDistinct { r1, r2 } => r1.max(r2),
            Self::RealRepeated { r } => r,
            Self::Complex { re, .. } => re,
        }
    }
}

/// Solve `a·s² + b·s + c = 0`.
///
/// Returns `None` when `a == 0` (not a quadratic).
#[must_use]
pub fn quadratic_roots(a: f32, b: f32, c: f32) -> Option<QuadraticRoots> {
    if a == 0.0 {
        return None;
    }
    let discriminant = b.mul_add(b, -(4.0 * a * c));
    let two_a = 2.0 * a;
    let roots = if discriminant > 0.0 {
        let sqrt_d = discriminant.sqrt();
        QuadraticRoots::RealDistinct {
            r1: (-b + sqrt_d) / two_a,
            r2: (-b - sqrt_d) / two_a,
        }
    } else if discriminant < 0.0 {
        QuadraticRoots::Complex {
            re: -b / two_a,
            im: (-discriminant).sqrt() / two_a.abs(),
        }
    } else {
        QuadraticRoots::RealRepeated { r: -b / two_a }
    };
    Some(roots)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
