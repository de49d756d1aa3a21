use glam::DVec2;

use crate::errors::{Result, SolverError};
use crate::flux::characteristic_speed;

use super::RiemannSolution;

/// Which part of the initial data a characteristic originates from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharacteristicFamily {
    /// Starts in the left constant state.
    Left,
    /// Starts in the right constant state.
    Right,
    /// Emanates from the discontinuity inside a rarefaction fan.
    Fan,
}

/// A straight line `x = origin + speed * t` in the x-t plane, carrying the value `speed`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Characteristic {
    pub origin: f64,
    pub speed: f64,
    /// Time at which the characteristic runs into a shock, if ever.
    pub t_end: Option<f64>,
    pub family: CharacteristicFamily,
}

impl Characteristic {
    /// The carried value of `q`.
    pub fn value(&self) -> f64 {
        self.speed
    }

    /// Point `(x, t)` of the characteristic at time `t`.
    pub fn point_at(&self, t: f64) -> DVec2 {
        DVec2::new(self.origin + self.speed * t, t)
    }

    pub fn start_point(&self) -> DVec2 {
        self.point_at(0.)
    }

    pub fn end_point(&self) -> Option<DVec2> {
        self.t_end.map(|t| self.point_at(t))
    }

    pub fn is_alive_at(&self, t: f64) -> bool {
        t >= 0. && self.t_end.map_or(true, |t_end| t <= t_end)
    }
}

/// How densely characteristics are sampled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacteristicResolution {
    /// Characteristics of the constant states start in `[-half_width, half_width]`.
    /// Must be finite and positive.
    pub half_width: f64,
    /// Number of characteristics per family.
    pub lines: usize,
}

impl CharacteristicResolution {
    pub fn new(half_width: f64, lines: usize) -> Result<Self> {
        let resolution = Self { half_width, lines };
        resolution.validate()?;
        Ok(resolution)
    }

    pub(super) fn validate(&self) -> Result<()> {
        if !self.half_width.is_finite() || self.half_width <= 0. {
            return Err(SolverError::InvalidOption {
                name: "half_width",
                value: self.half_width,
            });
        }
        Ok(())
    }
}

impl Default for CharacteristicResolution {
    fn default() -> Self {
        Self {
            half_width: 1.,
            lines: 10,
        }
    }
}

/// Lazy iterator over the characteristics of a [`RiemannSolution`].
///
/// Yields the left family, then the right family and finally the fan (for
/// rarefactions only). Everything is recomputed from the solution's states.
#[derive(Debug, Clone)]
pub struct Characteristics {
    solution: RiemannSolution,
    resolution: CharacteristicResolution,
    next: usize,
}

impl Characteristics {
    pub(super) fn new(solution: RiemannSolution, resolution: CharacteristicResolution) -> Self {
        Self {
            solution,
            resolution,
            next: 0,
        }
    }

    fn fan_lines(&self) -> usize {
        match self.solution {
            RiemannSolution::Rarefaction(_) => self.resolution.lines,
            _ => 0,
        }
    }

    fn total(&self) -> usize {
        2 * self.resolution.lines + self.fan_lines()
    }

    /// Time at which a characteristic from `origin` with `speed` meets the shock, if any.
    fn shock_contact(&self, origin: f64, speed: f64) -> Option<f64> {
        let RiemannSolution::Shock(shock) = self.solution else {
            return None;
        };
        let dv = shock.speed() - speed;
        if dv == 0. {
            return None;
        }
        let t = origin / dv;
        (t > 0.).then_some(t)
    }

    fn constant_state(&self, origin: f64, q: f64, family: CharacteristicFamily) -> Characteristic {
        let speed = characteristic_speed(q);
        Characteristic {
            origin,
            speed,
            t_end: self.shock_contact(origin, speed),
            family,
        }
    }

    fn get(&self, index: usize) -> Characteristic {
        let lines = self.resolution.lines;
        let dx = self.resolution.half_width / lines as f64;
        if index < lines {
            let origin = -self.resolution.half_width + index as f64 * dx;
            self.constant_state(origin, self.solution.left_state(), CharacteristicFamily::Left)
        } else if index < 2 * lines {
            let origin = (index - lines + 1) as f64 * dx;
            self.constant_state(origin, self.solution.right_state(), CharacteristicFamily::Right)
        } else {
            let i = index - 2 * lines;
            let q_l = self.solution.left_state();
            let q_r = self.solution.right_state();
            let frac = if lines > 1 {
                i as f64 / (lines - 1) as f64
            } else {
                0.5
            };
            Characteristic {
                origin: 0.,
                speed: characteristic_speed(q_l + frac * (q_r - q_l)),
                t_end: None,
                family: CharacteristicFamily::Fan,
            }
        }
    }
}

impl Iterator for Characteristics {
    type Item = Characteristic;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.total() {
            return None;
        }
        let characteristic = self.get(self.next);
        self.next += 1;
        Some(characteristic)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Characteristics {}
