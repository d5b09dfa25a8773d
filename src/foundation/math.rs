/// Smallest magnitude used as the tolerance floor in [`nearly_eq`].
pub(crate) const ABS_EPSILON: f64 = 1e-12;

/// Relative comparison with an absolute floor so values near zero still compare sanely.
pub fn nearly_eq(a: f64, b: f64, rel_tol: f64) -> bool {
    if a == b {
        return true;
    }
    let scale = a.abs().max(b.abs());
    (a - b).abs() <= (scale * rel_tol).max(ABS_EPSILON)
}

/// `true` for finite values strictly above zero.
pub fn is_positive_finite(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
