//! Exact Riemann solver for Burgers' equation `q_t + (q^2 / 2)_x = 0`.
//!
//! Given a left and right state separated by a discontinuity at `x = 0`, the
//! entropy-admissible weak solution is either a single shock (`q_l > q_r`) or a
//! rarefaction fan (`q_l < q_r`). Equal states yield a constant solution.

use crate::errors::{check_state, Result, SolverError};

mod characteristics;
mod rarefaction;
mod shock;

pub use characteristics::{
    Characteristic, CharacteristicFamily, CharacteristicResolution, Characteristics,
};
pub use rarefaction::Rarefaction;
pub use shock::Shock;

/// The single wave emanating from a Riemann problem.
pub trait Wave {
    fn left_state(&self) -> f64;

    fn right_state(&self) -> f64;

    /// Speeds of the left and right edge of the wave (equal for a shock).
    fn edge_speeds(&self) -> (f64, f64);

    /// Solution at `(x, t)` for `t > 0` in the frame where the wave starts at the origin.
    fn sample(&self, x: f64, t: f64) -> f64;
}

/// Classification of the wave solving a Riemann problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveKind {
    Shock,
    Rarefaction,
    Degenerate,
}

/// Left and right state of a Riemann problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiemannProblem {
    q_l: f64,
    q_r: f64,
}

impl RiemannProblem {
    pub fn new(q_l: f64, q_r: f64) -> Result<Self> {
        Ok(Self {
            q_l: check_state(q_l)?,
            q_r: check_state(q_r)?,
        })
    }

    pub fn left_state(&self) -> f64 {
        self.q_l
    }

    pub fn right_state(&self) -> f64 {
        self.q_r
    }

    /// The entropy condition for a convex flux reduces to comparing both states.
    pub fn wave_kind(&self) -> WaveKind {
        if self.q_l > self.q_r {
            WaveKind::Shock
        } else if self.q_l < self.q_r {
            WaveKind::Rarefaction
        } else {
            WaveKind::Degenerate
        }
    }

    pub fn solve(&self) -> RiemannSolution {
        match self.wave_kind() {
            WaveKind::Shock => RiemannSolution::Shock(Shock::new(self.q_l, self.q_r)),
            WaveKind::Rarefaction => {
                RiemannSolution::Rarefaction(Rarefaction::new(self.q_l, self.q_r))
            }
            WaveKind::Degenerate => RiemannSolution::Degenerate { q: self.q_l },
        }
    }
}

/// Solve the Riemann problem with states `q_l` and `q_r`.
pub fn solve(q_l: f64, q_r: f64) -> Result<RiemannSolution> {
    Ok(RiemannProblem::new(q_l, q_r)?.solve())
}

/// Exact solution of a single Riemann problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiemannSolution {
    Shock(Shock),
    Rarefaction(Rarefaction),
    Degenerate { q: f64 },
}

impl RiemannSolution {
    /// The entropy-violating shock connecting `q_l < q_r`.
    ///
    /// It is a valid weak solution but not the physical one. It is never
    /// returned by [`solve`] and is only useful as a counter-example next to
    /// the rarefaction that should be there instead.
    pub fn expansion_shock(q_l: f64, q_r: f64) -> Result<Self> {
        let problem = RiemannProblem::new(q_l, q_r)?;
        if problem.wave_kind() != WaveKind::Rarefaction {
            return Err(SolverError::NotAnExpansion { q_l, q_r });
        }
        Ok(Self::Shock(Shock::new(q_l, q_r)))
    }

    pub fn wave_kind(&self) -> WaveKind {
        match self {
            Self::Shock(_) => WaveKind::Shock,
            Self::Rarefaction(_) => WaveKind::Rarefaction,
            Self::Degenerate { .. } => WaveKind::Degenerate,
        }
    }

    pub fn problem(&self) -> RiemannProblem {
        RiemannProblem {
            q_l: self.left_state(),
            q_r: self.right_state(),
        }
    }

    fn wave(&self) -> Option<&dyn Wave> {
        match self {
            Self::Shock(shock) => Some(shock as &dyn Wave),
            Self::Rarefaction(rarefaction) => Some(rarefaction),
            Self::Degenerate { .. } => None,
        }
    }

    pub fn left_state(&self) -> f64 {
        match self {
            Self::Shock(shock) => shock.left_state(),
            Self::Rarefaction(rarefaction) => rarefaction.left_state(),
            Self::Degenerate { q } => *q,
        }
    }

    pub fn right_state(&self) -> f64 {
        match self {
            Self::Shock(shock) => shock.right_state(),
            Self::Rarefaction(rarefaction) => rarefaction.right_state(),
            Self::Degenerate { q } => *q,
        }
    }

    /// Speeds of the leftmost and rightmost edge of the wave, `None` when there is no wave.
    pub fn speeds(&self) -> Option<(f64, f64)> {
        self.wave().map(|wave| wave.edge_speeds())
    }

    /// Position of the left edge of the wave at time `t`.
    pub(crate) fn left_edge(&self, t: f64) -> f64 {
        self.speeds().map_or(0., |(v_l, _)| v_l * t)
    }

    /// Position of the right edge of the wave at time `t`.
    pub(crate) fn right_edge(&self, t: f64) -> f64 {
        self.speeds().map_or(0., |(_, v_r)| v_r * t)
    }

    /// Solution `q(x, t)`, with the initial discontinuity located at `x = 0`.
    ///
    /// For `t <= 0` the initial data is returned, taking the right state at
    /// the discontinuity itself.
    pub fn evaluate(&self, x: f64, t: f64) -> f64 {
        match self.wave() {
            None => self.left_state(),
            Some(wave) if t <= 0. => {
                if x < 0. {
                    wave.left_state()
                } else {
                    wave.right_state()
                }
            }
            Some(wave) => wave.sample(x, t),
        }
    }

    /// Lazily enumerate characteristic lines of this solution.
    ///
    /// The iterator owns a copy of the solution and can be cloned to restart it.
    /// Fails for a `half_width` that is not finite and positive.
    pub fn characteristics(
        &self,
        resolution: CharacteristicResolution,
    ) -> Result<Characteristics> {
        resolution.validate()?;
        Ok(Characteristics::new(*self, resolution))
    }
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use super::*;

    #[test]
    fn test_classification() {
        assert_eq!(solve(4., 2.).unwrap().wave_kind(), WaveKind::Shock);
        assert_eq!(solve(-1.5, 0.5).unwrap().wave_kind(), WaveKind::Rarefaction);
        assert_eq!(solve(0.3, 0.3).unwrap().wave_kind(), WaveKind::Degenerate);
        assert_eq!(
            RiemannProblem::new(3., -2.).unwrap().wave_kind(),
            solve(3., -2.).unwrap().wave_kind()
        );
    }

    #[test]
    fn test_problem_round_trip() {
        for (q_l, q_r) in [(4., 2.), (-1.5, 0.5), (0.3, 0.3)] {
            let problem = RiemannProblem::new(q_l, q_r).unwrap();
            let solution = problem.solve();
            assert_eq!(solution.problem(), problem);
            assert_eq!(solution.problem().left_state(), q_l);
            assert_eq!(solution.problem().right_state(), q_r);
        }
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            solve(f64::NAN, 1.),
            Err(SolverError::NonFiniteState(q)) if q.is_nan()
        ));
        assert!(matches!(
            solve(1., f64::INFINITY),
            Err(SolverError::NonFiniteState(q)) if q == f64::INFINITY
        ));
        assert!(matches!(
            solve(f64::NEG_INFINITY, 0.),
            Err(SolverError::NonFiniteState(_))
        ));
    }

    #[test]
    fn test_speeds() {
        let (s_l, s_r) = solve(4., 2.).unwrap().speeds().unwrap();
        assert_approx_eq!(f64, s_l, 3.);
        assert_approx_eq!(f64, s_r, 3.);
        assert_eq!(solve(-1.5, 0.5).unwrap().speeds(), Some((-1.5, 0.5)));
        assert_eq!(solve(1., 1.).unwrap().speeds(), None);
    }

    #[test]
    fn test_initial_data() {
        for solution in [solve(4., 2.), solve(-1., 3.), solve(2., 2.)] {
            let solution = solution.unwrap();
            assert_eq!(solution.evaluate(-0.5, 0.), solution.left_state());
            assert_eq!(solution.evaluate(0.5, 0.), solution.right_state());
            assert_eq!(solution.evaluate(0., -1.), solution.right_state());
        }
    }

    #[test]
    fn test_degenerate() {
        let solution = solve(-0.75, -0.75).unwrap();
        for (x, t) in [(-10., 1.), (0., 0.), (3., 100.)] {
            assert_eq!(solution.evaluate(x, t), -0.75);
        }
    }

    #[test]
    fn test_expansion_shock() {
        let unphysical = RiemannSolution::expansion_shock(-1., 1.).unwrap();
        let RiemannSolution::Shock(shock) = unphysical else {
            panic!("Expected a shock!");
        };
        assert!(!shock.is_admissible());
        assert_eq!(shock.speed(), 0.);
        assert_eq!(unphysical.evaluate(-0.1, 1.), -1.);
        assert_eq!(unphysical.evaluate(0.1, 1.), 1.);

        // The physical solution of the same problem is a rarefaction
        assert_eq!(solve(-1., 1.).unwrap().wave_kind(), WaveKind::Rarefaction);

        assert_eq!(
            RiemannSolution::expansion_shock(1., -1.),
            Err(SolverError::NotAnExpansion { q_l: 1., q_r: -1. })
        );
        assert!(RiemannSolution::expansion_shock(1., 1.).is_err());
    }
}
