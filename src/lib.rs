//! Exact solutions of the inviscid Burgers' equation `q_t + (q^2 / 2)_x = 0`
//! for piecewise-constant initial data.
//!
//! The [`riemann_solver`] module solves a single discontinuity exactly, the
//! [`composer`] module tracks the resulting shocks and rarefactions through
//! their collisions.

pub use composer::{CollisionEvent, Composer, ComposerOptions, PiecewiseInitialData, WaveSegment};
pub use errors::{Result, SolverError};
pub use riemann_solver::{solve, RiemannProblem, RiemannSolution, WaveKind};

pub mod composer;
mod errors;
pub mod flux;
pub mod presets;
pub mod riemann_solver;
pub mod sampling;
