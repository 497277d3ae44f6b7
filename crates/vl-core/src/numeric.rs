use crate::VlError;

/// Floating point type used throughout the system.
pub type Real = f64;

/// Approximate equality with absolute and relative tolerances.
pub fn nearly_equal(a: Real, b: Real, abs: Real, rel: Real) -> bool {
    let diff = (a - b).abs();
    if diff <= abs {
        return true;
    }
    diff <= rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, VlError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(VlError::NonFinite { what, value: v })
    }
}

/// Clamp a percentage to [0, 100].
pub fn clamp_percent(v: Real) -> Real {
    v.clamp(0.0, 100.0)
}
