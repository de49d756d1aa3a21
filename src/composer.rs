//! Wave tracking for piecewise-constant initial data.
//!
//! Every discontinuity of the initial data is resolved by the exact Riemann
//! solver. The resulting waves are then followed forward in time: whenever two
//! neighbouring waves meet, both are replaced by the solution of the Riemann
//! problem between the states on their far sides.

use std::collections::BinaryHeap;

use crate::errors::{Result, SolverError};
use crate::riemann_solver::solve;

mod event;
mod initial_data;
mod segment;

pub use event::{CollisionEvent, ParallelWaves};
pub use initial_data::PiecewiseInitialData;
pub use segment::WaveSegment;

use event::PendingCollision;

/// Settings of the collision loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComposerOptions {
    /// Collisions after this time are not resolved.
    pub horizon: f64,
    /// Facing wave speeds closer than this are treated as parallel.
    pub speed_tolerance: f64,
}

impl Default for ComposerOptions {
    fn default() -> Self {
        Self {
            horizon: f64::INFINITY,
            speed_tolerance: 1e-12,
        }
    }
}

impl ComposerOptions {
    fn validate(&self) -> Result<()> {
        if self.horizon.is_nan() || self.horizon < 0. {
            return Err(SolverError::InvalidOption {
                name: "horizon",
                value: self.horizon,
            });
        }
        if !self.speed_tolerance.is_finite() || self.speed_tolerance < 0. {
            return Err(SolverError::InvalidOption {
                name: "speed_tolerance",
                value: self.speed_tolerance,
            });
        }
        Ok(())
    }
}

/// Exact solution of a piecewise-constant initial value problem, including
/// wave interactions up to the horizon.
#[derive(Debug, Clone)]
pub struct Composer {
    initial_data: PiecewiseInitialData,
    options: ComposerOptions,
    /// Every segment ever created, indexed by id.
    segments: Vec<WaveSegment>,
    /// Ids of the segments that are still alive, from left to right.
    live: Vec<usize>,
    events: Vec<CollisionEvent>,
    parallel_waves: Vec<ParallelWaves>,
}

impl Composer {
    pub fn new(initial_data: PiecewiseInitialData) -> Result<Self> {
        Self::with_options(initial_data, ComposerOptions::default())
    }

    pub fn with_options(
        initial_data: PiecewiseInitialData,
        options: ComposerOptions,
    ) -> Result<Self> {
        options.validate()?;

        let mut segments = Vec::with_capacity(2 * initial_data.num_discontinuities());
        for (interface, (&x0, states)) in initial_data
            .breakpoints()
            .iter()
            .zip(initial_data.states().windows(2))
            .enumerate()
        {
            let solution = solve(states[0], states[1])?;
            // Adjacent states always differ, so this never skips an interface.
            if let Some(segment) =
                WaveSegment::new(segments.len(), solution, x0, 0., interface..=interface)
            {
                segments.push(segment);
            }
        }

        let mut composer = Self {
            initial_data,
            options,
            live: (0..segments.len()).collect(),
            segments,
            events: vec![],
            parallel_waves: vec![],
        };
        composer.run()?;

        tracing::debug!(
            waves = composer.segments.len(),
            collisions = composer.events.len(),
            remaining = composer.live.len(),
            "Composed wave pattern"
        );

        Ok(composer)
    }

    /// Resolve collisions in chronological order until none are left before the horizon.
    fn run(&mut self) -> Result<()> {
        let mut pending = BinaryHeap::new();
        for idx in 1..self.live.len() {
            if let Some(collision) = self.predict(self.live[idx - 1], self.live[idx]) {
                pending.push(collision);
            }
        }

        while let Some(collision) = pending.pop() {
            if self.live.len() < 2 {
                break;
            }
            // Skip predictions involving segments that have since been replaced.
            let Some(position) = self.live.iter().position(|&id| id == collision.left) else {
                continue;
            };
            if self.live.get(position + 1) != Some(&collision.right) {
                continue;
            }

            for (left, right) in self.resolve(collision, position)? {
                if let Some(collision) = self.predict(left, right) {
                    pending.push(collision);
                }
            }
        }

        Ok(())
    }

    /// Predict when the facing edges of two adjacent segments meet.
    fn predict(&mut self, left_id: usize, right_id: usize) -> Option<PendingCollision> {
        let left = self.segments[left_id];
        let right = self.segments[right_id];
        let v_l = left.right_speed();
        let v_r = right.left_speed();
        // Half the relative speed, finite for any pair of finite speeds
        let half_dv = 0.5 * v_l - 0.5 * v_r;
        let dv = 2. * half_dv;

        if half_dv.abs() <= 0.5 * self.options.speed_tolerance {
            if dv != 0. {
                tracing::warn!(
                    left = left_id,
                    right = right_id,
                    speed_difference = dv,
                    "Treating nearly parallel waves as non-colliding"
                );
                self.parallel_waves.push(ParallelWaves {
                    left: left_id,
                    right: right_id,
                    speed_difference: dv,
                });
            }
            return None;
        }
        if half_dv < 0. {
            // Diverging
            return None;
        }

        let t_min = left.t_created().max(right.t_created());
        let t = (0.5 * right.x0() - 0.5 * left.x0() + 0.5 * v_l * left.t_created()
            - 0.5 * v_r * right.t_created())
            / half_dv;
        if t > self.options.horizon {
            return None;
        }
        // Waves created at a common point collide immediately.
        let t = if t < t_min { t_min } else { t };
        let x = left.x0() + v_l * (t - left.t_created());
        if !t.is_finite() || !x.is_finite() {
            tracing::warn!(
                left = left_id,
                right = right_id,
                t,
                x,
                "Collision point is not representable, treating waves as non-colliding"
            );
            return None;
        }

        Some(PendingCollision {
            t,
            x,
            left: left_id,
            right: right_id,
        })
    }

    /// Replace two colliding segments by the wave between their outer states.
    ///
    /// Returns the pairs of adjacent live segments that need a new prediction.
    fn resolve(
        &mut self,
        collision: PendingCollision,
        position: usize,
    ) -> Result<Vec<(usize, usize)>> {
        let PendingCollision { t, x, left, right } = collision;
        self.segments[left].destroy(t);
        self.segments[right].destroy(t);

        let q_l = self.segments[left].solution().left_state();
        let q_r = self.segments[right].solution().right_state();
        let solution = solve(q_l, q_r)?;
        let interfaces =
            *self.segments[left].interfaces().start()..=*self.segments[right].interfaces().end();

        let result = WaveSegment::new(self.segments.len(), solution, x, t, interfaces);
        let mut neighbours = vec![];
        match result {
            Some(segment) => {
                let id = segment.id();
                self.segments.push(segment);
                self.live[position] = id;
                self.live.remove(position + 1);
                if position > 0 {
                    neighbours.push((self.live[position - 1], id));
                }
                if let Some(&next) = self.live.get(position + 1) {
                    neighbours.push((id, next));
                }
            }
            None => {
                self.live.drain(position..position + 2);
                if position > 0 && position < self.live.len() {
                    neighbours.push((self.live[position - 1], self.live[position]));
                }
            }
        }

        let event = CollisionEvent {
            x,
            t,
            left,
            right,
            result: result.map(|segment| segment.id()),
        };
        tracing::debug!(
            x,
            t,
            left,
            right,
            result = ?event.result,
            kind = ?solution.wave_kind(),
            "Resolved wave collision"
        );
        self.events.push(event);

        Ok(neighbours)
    }

    pub fn initial_data(&self) -> &PiecewiseInitialData {
        &self.initial_data
    }

    pub fn options(&self) -> &ComposerOptions {
        &self.options
    }

    /// Time up to which collisions are resolved.
    pub fn horizon(&self) -> f64 {
        self.options.horizon
    }

    /// All segments ever created, indexed by their id.
    pub fn segments(&self) -> &[WaveSegment] {
        &self.segments
    }

    pub fn segment(&self, id: usize) -> Option<&WaveSegment> {
        self.segments.get(id)
    }

    /// Collisions in the order in which they were resolved (increasing time).
    pub fn events(&self) -> &[CollisionEvent] {
        &self.events
    }

    /// Neighbouring waves that were treated as parallel because of the speed tolerance.
    pub fn parallel_waves(&self) -> &[ParallelWaves] {
        &self.parallel_waves
    }

    /// Segments alive at time `t`, from left to right.
    pub fn alive_at(&self, t: f64) -> Vec<&WaveSegment> {
        let mut alive: Vec<_> = self
            .segments
            .iter()
            .filter(|segment| segment.is_alive_at(t))
            .collect();
        // Alive segments cover disjoint, ordered ranges of interfaces.
        alive.sort_by_key(|segment| *segment.interfaces().start());
        alive
    }

    fn evaluate_among(&self, alive: &[&WaveSegment], x: f64, t: f64) -> f64 {
        alive
            .iter()
            .find(|segment| segment.right_edge(t) >= x)
            .map_or_else(|| self.initial_data.far_right(), |segment| segment.evaluate(x, t))
    }

    /// Solution `q(x, t)`.
    ///
    /// Beyond the horizon, unresolved collisions are ignored.
    pub fn evaluate(&self, x: f64, t: f64) -> f64 {
        if t <= 0. {
            return self.initial_data.evaluate(x);
        }
        self.evaluate_among(&self.alive_at(t), x, t)
    }

    /// Solution at time `t` for many positions at once.
    pub fn evaluate_all(&self, x: &[f64], t: f64) -> Vec<f64> {
        if t <= 0. {
            return x.iter().map(|&x| self.initial_data.evaluate(x)).collect();
        }
        let alive = self.alive_at(t);
        x.iter().map(|&x| self.evaluate_among(&alive, x, t)).collect()
    }
}
