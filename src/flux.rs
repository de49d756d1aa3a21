//! The convex Burgers' flux `f(q) = q^2 / 2` and the relations derived from it.

/// Burgers' flux.
pub fn flux(q: f64) -> f64 {
    0.5 * q * q
}

/// `f'(q)`, the speed of the characteristic carrying `q`.
pub fn characteristic_speed(q: f64) -> f64 {
    q
}

/// Speed of a discontinuity between `q_l` and `q_r`.
///
/// Rankine-Hugoniot: `s (q_r - q_l) = f(q_r) - f(q_l)`, which for Burgers'
/// flux reduces to the mean of both states. This holds whether or not the
/// jump satisfies the entropy condition.
///
/// Both states are halved before adding so the speed stays finite for any
/// finite states.
pub fn shock_speed(q_l: f64, q_r: f64) -> f64 {
    0.5 * q_l + 0.5 * q_r
}

/// Entropy condition for a convex flux: `f'(q_l) > f'(q_r)`.
pub fn is_entropy_satisfying(q_l: f64, q_r: f64) -> bool {
    characteristic_speed(q_l) > characteristic_speed(q_r)
}

/// Time at which the characteristics leaving `x_l` (carrying `q_l`) and `x_r`
/// (carrying `q_r`) cross, if they ever do.
///
/// Characteristics starting from `x_l < x_r` only cross when the left one is
/// faster.
pub fn breaking_time(x_l: f64, q_l: f64, x_r: f64, q_r: f64) -> Option<f64> {
    let half_dv = 0.5 * characteristic_speed(q_l) - 0.5 * characteristic_speed(q_r);
    if half_dv <= 0. || x_r <= x_l {
        return None;
    }
    Some((0.5 * x_r - 0.5 * x_l) / half_dv)
}
