/// Result type used throughout the solver.
pub type Result<T> = std::result::Result<T, SolverError>;

/// Invalid input detected while setting up a Riemann problem or a composed problem.
///
/// Degenerate interfaces (`q_l == q_r`) are not errors: they are reported through
/// [`crate::riemann_solver::WaveKind::Degenerate`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SolverError {
    #[error("State values must be finite, found: {0}")]
    NonFiniteState(f64),
    #[error("Breakpoints must be finite, found: {0}")]
    NonFiniteBreakpoint(f64),
    #[error("Breakpoints must be strictly increasing, found {previous} followed by {next}")]
    NonMonotonicBreakpoints { previous: f64, next: f64 },
    #[error("Expected {expected} states for {breakpoints} breakpoints, but found {found}")]
    StateCountMismatch {
        breakpoints: usize,
        expected: usize,
        found: usize,
    },
    #[error("Initial data requires at least one state")]
    EmptyInitialData,
    #[error("An expansion shock requires q_l < q_r, found q_l = {q_l}, q_r = {q_r}")]
    NotAnExpansion { q_l: f64, q_r: f64 },
    #[error("Unknown preset initial conditions: {0}")]
    UnknownPreset(String),
    #[error("Invalid option {name}: {value}")]
    InvalidOption { name: &'static str, value: f64 },
}

pub(crate) fn check_state(q: f64) -> Result<f64> {
    if q.is_finite() {
        Ok(q)
    } else {
        Err(SolverError::NonFiniteState(q))
    }
}
