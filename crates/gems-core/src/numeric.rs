use crate::CoreError;

/// Floating point type used for every bound parameter value.
pub type Real = f64;

pub fn ensure_finite(v: Real, what: impl Into<String>) -> Result<Real, CoreError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(CoreError::NonFinite {
            what: what.into(),
            value: v,
        })
    }
}
