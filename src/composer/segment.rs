use std::ops::RangeInclusive;

use glam::DVec2;

use crate::riemann_solver::RiemannSolution;

/// A shock or rarefaction tracked by the [`Composer`](super::Composer).
///
/// The wave starts at `(x0, t_created)` and lives until `t_destroyed`, which
/// stays infinite until it collides with a neighbour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WaveSegment {
    id: usize,
    solution: RiemannSolution,
    speeds: (f64, f64),
    x0: f64,
    t_created: f64,
    t_destroyed: f64,
    first_interface: usize,
    last_interface: usize,
}

impl WaveSegment {
    /// Returns `None` for a degenerate solution: constant states carry no wave.
    pub(super) fn new(
        id: usize,
        solution: RiemannSolution,
        x0: f64,
        t_created: f64,
        interfaces: RangeInclusive<usize>,
    ) -> Option<Self> {
        let speeds = solution.speeds()?;
        Some(Self {
            id,
            solution,
            speeds,
            x0,
            t_created,
            t_destroyed: f64::INFINITY,
            first_interface: *interfaces.start(),
            last_interface: *interfaces.end(),
        })
    }

    pub(super) fn destroy(&mut self, t: f64) {
        debug_assert!(t >= self.t_created);
        self.t_destroyed = t;
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn solution(&self) -> &RiemannSolution {
        &self.solution
    }

    pub fn x0(&self) -> f64 {
        self.x0
    }

    pub fn t_created(&self) -> f64 {
        self.t_created
    }

    pub fn t_destroyed(&self) -> f64 {
        self.t_destroyed
    }

    /// Point in the x-t plane where this wave starts.
    pub fn origin(&self) -> DVec2 {
        DVec2::new(self.x0, self.t_created)
    }

    /// Indices of the initial interfaces this wave originates from.
    pub fn interfaces(&self) -> RangeInclusive<usize> {
        self.first_interface..=self.last_interface
    }

    pub fn is_alive_at(&self, t: f64) -> bool {
        self.t_created <= t && t < self.t_destroyed
    }

    /// Speed of the edge facing the left neighbour.
    pub fn left_speed(&self) -> f64 {
        self.speeds.0
    }

    /// Speed of the edge facing the right neighbour.
    pub fn right_speed(&self) -> f64 {
        self.speeds.1
    }

    pub fn left_edge(&self, t: f64) -> f64 {
        self.x0 + self.solution.left_edge(t - self.t_created)
    }

    pub fn right_edge(&self, t: f64) -> f64 {
        self.x0 + self.solution.right_edge(t - self.t_created)
    }

    /// Evaluate the wave in its local frame.
    pub fn evaluate(&self, x: f64, t: f64) -> f64 {
        self.solution.evaluate(x - self.x0, t - self.t_created)
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::riemann_solver::solve;

    use super::*;

    #[test]
    fn test_local_frame() {
        let segment = WaveSegment::new(0, solve(-1.5, 0.5).unwrap(), 1., 0.5, 1..=1).unwrap();
        assert!(segment.is_alive_at(0.5));
        assert!(!segment.is_alive_at(0.4));
        assert_approx_eq!(f64, segment.left_edge(1.5), -0.5);
        assert_approx_eq!(f64, segment.right_edge(1.5), 1.5);
        assert_eq!(segment.evaluate(-3., 1.5), -1.5);
        assert_approx_eq!(f64, segment.evaluate(1.25, 1.5), 0.25);
        assert_eq!(segment.origin(), DVec2::new(1., 0.5));
    }

    #[test]
    fn test_degenerate_has_no_segment() {
        assert!(WaveSegment::new(0, solve(2., 2.).unwrap(), 0., 0., 0..=0).is_none());
    }

    #[test]
    fn test_destroy() {
        let mut segment = WaveSegment::new(3, solve(4., 2.).unwrap(), -1., 0., 0..=0).unwrap();
        segment.destroy(1.);
        assert!(segment.is_alive_at(0.999));
        assert!(!segment.is_alive_at(1.));
    }
}
