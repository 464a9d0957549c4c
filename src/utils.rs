//! Miscellaneous utilities.

use crate::math::Real;

/// Solves `a·t² + b·t + c = 0` for `t`.
///
/// Returns the roots `(-b - √disc) / 2a` and `(-b + √disc) / 2a`, or `None`
/// when the discriminant is negative. Callers are expected to reject a
/// vanishing `a` themselves.
pub fn solve_quadratic(a: Real, b: Real, c: Real) -> Option<(Real, Real)> {
    let discr = b * b - 4.0 * a * c;

    if discr < 0.0 {
        return None;
    }

    let discr = discr.sqrt();
    let inv2a = 0.5 / a;
    Some(((-b - discr) * inv2a, (-b + discr) * inv2a))
}
