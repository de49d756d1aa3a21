use crate::errors::{check_state, Result, SolverError};

/// Piecewise-constant initial data: `states[i]` holds between `breakpoints[i - 1]`
/// and `breakpoints[i]`.
///
/// Breakpoints are finite and strictly increasing, and adjacent states always
/// differ: equal neighbours are merged on construction.
#[derive(Debug, Clone, PartialEq)]
pub struct PiecewiseInitialData {
    breakpoints: Vec<f64>,
    states: Vec<f64>,
}

impl PiecewiseInitialData {
    pub fn new(breakpoints: Vec<f64>, states: Vec<f64>) -> Result<Self> {
        if states.is_empty() {
            return Err(SolverError::EmptyInitialData);
        }
        if states.len() != breakpoints.len() + 1 {
            return Err(SolverError::StateCountMismatch {
                breakpoints: breakpoints.len(),
                expected: breakpoints.len() + 1,
                found: states.len(),
            });
        }
        for &q in states.iter() {
            check_state(q)?;
        }
        if let Some(&x) = breakpoints.iter().find(|x| !x.is_finite()) {
            return Err(SolverError::NonFiniteBreakpoint(x));
        }
        if let Some(pair) = breakpoints.windows(2).find(|pair| pair[0] >= pair[1]) {
            return Err(SolverError::NonMonotonicBreakpoints {
                previous: pair[0],
                next: pair[1],
            });
        }

        // Merge regions with equal states
        let mut merged_breakpoints = Vec::with_capacity(breakpoints.len());
        let mut merged_states = Vec::with_capacity(states.len());
        merged_states.push(states[0]);
        for (&x, &q) in breakpoints.iter().zip(states.iter().skip(1)) {
            if merged_states.last() == Some(&q) {
                tracing::debug!(x, q, "Merging constant regions with equal states");
                continue;
            }
            merged_breakpoints.push(x);
            merged_states.push(q);
        }

        Ok(Self {
            breakpoints: merged_breakpoints,
            states: merged_states,
        })
    }

    /// Build from the leftmost state and `(breakpoint, state right of it)` pairs.
    pub fn from_regions(first_state: f64, regions: &[(f64, f64)]) -> Result<Self> {
        let (breakpoints, mut states): (Vec<_>, Vec<_>) = regions.iter().copied().unzip();
        states.insert(0, first_state);
        Self::new(breakpoints, states)
    }

    /// A single Riemann problem with its discontinuity at `x0`.
    pub fn riemann(x0: f64, q_l: f64, q_r: f64) -> Result<Self> {
        Self::new(vec![x0], vec![q_l, q_r])
    }

    pub fn constant(q: f64) -> Result<Self> {
        Self::new(vec![], vec![q])
    }

    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    pub fn states(&self) -> &[f64] {
        &self.states
    }

    pub fn num_discontinuities(&self) -> usize {
        self.breakpoints.len()
    }

    pub fn far_left(&self) -> f64 {
        self.states[0]
    }

    pub fn far_right(&self) -> f64 {
        self.states[self.states.len() - 1]
    }

    /// Value of the initial data at `x`, taking the right state at a breakpoint.
    pub fn evaluate(&self, x: f64) -> f64 {
        let region = self.breakpoints.partition_point(|&b| b <= x);
        self.states[region]
    }
}
