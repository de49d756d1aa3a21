use crate::flux::{is_entropy_satisfying, shock_speed};

use super::Wave;

/// A single discontinuity travelling at the Rankine-Hugoniot speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shock {
    q_l: f64,
    q_r: f64,
}

impl Shock {
    pub(super) fn new(q_l: f64, q_r: f64) -> Self {
        Self { q_l, q_r }
    }

    pub fn speed(&self) -> f64 {
        shock_speed(self.q_l, self.q_r)
    }

    /// Position of the shock at time `t`, starting from the origin.
    pub fn position(&self, t: f64) -> f64 {
        self.speed() * t
    }

    /// Whether characteristics run into this shock from both sides.
    pub fn is_admissible(&self) -> bool {
        is_entropy_satisfying(self.q_l, self.q_r)
    }
}

impl Wave for Shock {
    fn left_state(&self) -> f64 {
        self.q_l
    }

    fn right_state(&self) -> f64 {
        self.q_r
    }

    fn edge_speeds(&self) -> (f64, f64) {
        let s = self.speed();
        (s, s)
    }

    fn sample(&self, x: f64, t: f64) -> f64 {
        if x < self.position(t) {
            self.q_l
        } else {
            self.q_r
        }
    }
}
