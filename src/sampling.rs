//! Sampling of exact solutions for external drivers (plots, animations, UIs).
//!
//! The solver knows nothing about how results are displayed. Callers provide
//! problem parameters through a [`ParameterSource`] and receive sampled
//! [`Frame`]s through a [`SampleSink`].

use std::convert::Infallible;

use rayon::prelude::*;

use crate::composer::{Composer, PiecewiseInitialData};
use crate::errors::{check_state, Result, SolverError};

/// Supplier of the problem to solve and the time at which to look at it.
pub trait ParameterSource {
    fn initial_data(&self) -> Result<PiecewiseInitialData>;

    fn time(&self) -> f64;
}

/// A single Riemann problem with its discontinuity at the origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiemannParameters {
    pub q_l: f64,
    pub q_r: f64,
    pub t: f64,
}

impl ParameterSource for RiemannParameters {
    fn initial_data(&self) -> Result<PiecewiseInitialData> {
        PiecewiseInitialData::riemann(0., self.q_l, self.q_r)
    }

    fn time(&self) -> f64 {
        self.t
    }
}

/// Three constant states separated by discontinuities at `x = -1` and `x = 1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TripleStateParameters {
    pub q_l: f64,
    pub q_m: f64,
    pub q_r: f64,
    pub t: f64,
}

impl ParameterSource for TripleStateParameters {
    fn initial_data(&self) -> Result<PiecewiseInitialData> {
        PiecewiseInitialData::new(vec![-1., 1.], vec![self.q_l, self.q_m, self.q_r])
    }

    fn time(&self) -> f64 {
        self.t
    }
}

/// The solution sampled on a grid at a given time.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub time: f64,
    pub x: Vec<f64>,
    pub q: Vec<f64>,
}

/// Consumer of sampled frames.
pub trait SampleSink {
    type Error;

    fn write_frame(&mut self, index: usize, frame: &Frame) -> std::result::Result<(), Self::Error>;
}

impl SampleSink for Vec<Frame> {
    type Error = Infallible;

    fn write_frame(
        &mut self,
        _index: usize,
        frame: &Frame,
    ) -> std::result::Result<(), Self::Error> {
        self.push(frame.clone());
        Ok(())
    }
}

/// Uniform grid of `num_x` points covering `[x_min, x_max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    x_min: f64,
    x_max: f64,
    num_x: usize,
}

impl Grid {
    pub fn new(x_min: f64, x_max: f64, num_x: usize) -> Result<Self> {
        if !x_min.is_finite() || !x_max.is_finite() || x_min >= x_max {
            return Err(SolverError::InvalidOption {
                name: "x_max",
                value: x_max,
            });
        }
        if num_x < 2 {
            return Err(SolverError::InvalidOption {
                name: "num_x",
                value: num_x as f64,
            });
        }
        Ok(Self { x_min, x_max, num_x })
    }

    pub fn spacing(&self) -> f64 {
        (self.x_max - self.x_min) / (self.num_x - 1) as f64
    }

    pub fn points(&self) -> Vec<f64> {
        let dx = self.spacing();
        (0..self.num_x)
            .map(|i| self.x_min + i as f64 * dx)
            .collect()
    }
}

/// `num_frames` evenly spaced times from 0 up to and including `t_end`.
pub fn frame_times(t_end: f64, num_frames: usize) -> Result<Vec<f64>> {
    check_state(t_end)?;
    if t_end < 0. {
        return Err(SolverError::InvalidOption {
            name: "t_end",
            value: t_end,
        });
    }
    Ok(match num_frames {
        0 => vec![],
        1 => vec![t_end],
        _ => {
            let dt = t_end / (num_frames - 1) as f64;
            (0..num_frames).map(|i| i as f64 * dt).collect()
        }
    })
}

/// Sample the solution at time `t` on every grid point.
pub fn sample(composer: &Composer, grid: &Grid, t: f64) -> Frame {
    let x = grid.points();
    let q = composer.evaluate_all(&x, t);
    Frame { time: t, x, q }
}

/// Sample the solution at all `times`, in parallel.
pub fn sample_frames(composer: &Composer, grid: &Grid, times: &[f64]) -> Vec<Frame> {
    times
        .par_iter()
        .map(|&t| sample(composer, grid, t))
        .collect()
}

/// Feed the frames at `times` to `sink`, in order.
pub fn drive<S: SampleSink>(
    composer: &Composer,
    grid: &Grid,
    times: &[f64],
    sink: &mut S,
) -> std::result::Result<(), S::Error> {
    for (index, frame) in sample_frames(composer, grid, times).iter().enumerate() {
        sink.write_frame(index, frame)?;
    }
    Ok(())
}

/// Solve the problem supplied by `source` and sample it at the requested time.
pub fn snapshot<P: ParameterSource>(source: &P, grid: &Grid) -> Result<Frame> {
    let composer = Composer::new(source.initial_data()?)?;
    Ok(sample(&composer, grid, source.time()))
}

/// Compose independent problems in parallel.
pub fn compose_all(problems: &[PiecewiseInitialData]) -> Result<Vec<Composer>> {
    problems
        .par_iter()
        .map(|data| Composer::new(data.clone()))
        .collect()
}

/// Midpoint-rule approximation of the integral of `f` over `[a, b]`.
pub fn integrate<F: Fn(f64) -> f64>(f: F, a: f64, b: f64, cells: usize) -> f64 {
    let dx = (b - a) / cells as f64;
    (0..cells)
        .map(|i| f(a + (i as f64 + 0.5) * dx))
        .sum::<f64>()
        * dx
}

#[cfg(test)]
mod test {
    use float_cmp::assert_approx_eq;

    use crate::riemann_solver::solve;

    use super::*;

    #[test]
    fn test_grid() {
        let grid = Grid::new(-1., 1., 5).unwrap();
        assert_eq!(grid.points(), vec![-1., -0.5, 0., 0.5, 1.]);
        assert!(Grid::new(1., -1., 5).is_err());
        assert!(Grid::new(-1., 1., 1).is_err());
        assert!(Grid::new(f64::NEG_INFINITY, 1., 10).is_err());
    }

    #[test]
    fn test_frame_times() {
        assert_eq!(frame_times(2., 5).unwrap(), vec![0., 0.5, 1., 1.5, 2.]);
        assert_eq!(frame_times(2., 1).unwrap(), vec![2.]);
        assert!(frame_times(2., 0).unwrap().is_empty());
        assert!(frame_times(-1., 3).is_err());
        assert!(frame_times(f64::NAN, 3).is_err());
    }

    #[test]
    fn test_riemann_snapshot() {
        let grid = Grid::new(-2., 2., 41).unwrap();
        let parameters = RiemannParameters {
            q_l: -1.,
            q_r: 1.,
            t: 1.,
        };
        let frame = snapshot(&parameters, &grid).unwrap();
        let solution = solve(-1., 1.).unwrap();
        assert_eq!(frame.time, 1.);
        for (&x, &q) in frame.x.iter().zip(frame.q.iter()) {
            assert_approx_eq!(f64, q, solution.evaluate(x, 1.));
        }
    }

    #[test]
    fn test_drive_in_order() {
        let parameters = TripleStateParameters {
            q_l: 4.,
            q_m: 2.,
            q_r: 0.,
            t: 0.,
        };
        let composer = Composer::new(parameters.initial_data().unwrap()).unwrap();
        let grid = Grid::new(-3., 5., 17).unwrap();
        let times = frame_times(2., 9).unwrap();
        let mut frames: Vec<Frame> = vec![];
        drive(&composer, &grid, &times, &mut frames).unwrap();
        assert_eq!(frames.len(), 9);
        assert!(frames.windows(2).all(|w| w[0].time < w[1].time));
        assert_eq!(frames[0].q, composer.evaluate_all(&grid.points(), 0.));
    }

    #[test]
    fn test_compose_all() {
        let problems = [(4., 2., 0.), (4., -1.5, 0.5), (-1., 3., -2.)]
            .map(|(q_l, q_m, q_r)| {
                TripleStateParameters { q_l, q_m, q_r, t: 1. }
                    .initial_data()
                    .unwrap()
            });
        let composers = compose_all(&problems).unwrap();
        assert_eq!(composers.len(), 3);
        assert!(composers.iter().all(|composer| composer.events().len() == 1));
    }

    #[test]
    fn test_integrate() {
        assert_approx_eq!(f64, integrate(|x| x, 0., 2., 10), 2.);
        assert_approx_eq!(f64, integrate(|_| 3., -1., 1., 7), 6., epsilon = 1e-12);
    }
}
