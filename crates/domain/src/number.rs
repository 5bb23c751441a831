//! JSON number helpers shared by request rules.

use serde_json::Number;

/// Integer value of a JSON number with no fractional part.
///
/// Floats such as `5.0` count when they fit in an `i64`; `5.5`, non-finite
/// values and out-of-range magnitudes yield `None`.
#[must_use]
pub fn integral(number: &Number) -> Option<i64> {
    if let Some(integer) = number.as_i64() {
        return Some(integer);
    }
    let float = number.as_f64()?;
    if float.is_finite() && float.fract() == 0.0 {
        format!("{float:.0}").parse().ok()
    } else {
        None
    }
}
