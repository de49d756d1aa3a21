use crate::flux::characteristic_speed;

use super::Wave;

/// Centered rarefaction fan, `q = x / t` between the characteristics of both states.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rarefaction {
    q_l: f64,
    q_r: f64,
}

impl Rarefaction {
    pub(super) fn new(q_l: f64, q_r: f64) -> Self {
        debug_assert!(q_l < q_r, "A rarefaction requires q_l < q_r!");
        Self { q_l, q_r }
    }

    /// Speed of the characteristic bounding the fan on the left.
    pub fn head_speed(&self) -> f64 {
        characteristic_speed(self.q_l)
    }

    /// Speed of the characteristic bounding the fan on the right.
    pub fn tail_speed(&self) -> f64 {
        characteristic_speed(self.q_r)
    }
}

impl Wave for Rarefaction {
    fn left_state(&self) -> f64 {
        self.q_l
    }

    fn right_state(&self) -> f64 {
        self.q_r
    }

    fn edge_speeds(&self) -> (f64, f64) {
        (self.head_speed(), self.tail_speed())
    }

    fn sample(&self, x: f64, t: f64) -> f64 {
        // Compare positions rather than x / t, so that the edges are exact.
        if x <= self.head_speed() * t {
            self.q_l
        } else if x >= self.tail_speed() * t {
            self.q_r
        } else {
            x / t
        }
    }
}
