//! Named initial conditions, used by the binary and handy for quick experiments.

use crate::composer::PiecewiseInitialData;
use crate::errors::{Result, SolverError};

/// Names accepted by [`from_preset`].
pub const PRESETS: [&str; 6] = [
    "shock",
    "rarefaction",
    "transonic-rarefaction",
    "shock-shock",
    "shock-rarefaction",
    "rarefaction-shock",
];

fn triple_state(q_l: f64, q_m: f64, q_r: f64) -> Result<PiecewiseInitialData> {
    PiecewiseInitialData::new(vec![-1., 1.], vec![q_l, q_m, q_r])
}

/// Right-moving shock.
pub fn shock() -> Result<PiecewiseInitialData> {
    PiecewiseInitialData::riemann(0., 1., 0.)
}

/// Rarefaction fan moving entirely to the right.
pub fn rarefaction() -> Result<PiecewiseInitialData> {
    PiecewiseInitialData::riemann(0., 0.5, 2.)
}

/// Rarefaction fan containing the sonic point `q = 0`.
pub fn transonic_rarefaction() -> Result<PiecewiseInitialData> {
    PiecewiseInitialData::riemann(0., -1., 1.)
}

/// Two right-moving shocks, the faster one catching up at `t = 1`.
pub fn shock_shock() -> Result<PiecewiseInitialData> {
    triple_state(4., 2., 0.)
}

/// A shock overtaking a rarefaction.
pub fn shock_rarefaction() -> Result<PiecewiseInitialData> {
    triple_state(4., -1.5, 0.5)
}

/// A rarefaction running into a shock, reversing its direction.
pub fn rarefaction_shock() -> Result<PiecewiseInitialData> {
    triple_state(-1., 3., -2.)
}

pub fn from_preset(name: &str) -> Result<PiecewiseInitialData> {
    match name {
        "shock" => shock(),
        "rarefaction" => rarefaction(),
        "transonic-rarefaction" => transonic_rarefaction(),
        "shock-shock" => shock_shock(),
        "shock-rarefaction" => shock_rarefaction(),
        "rarefaction-shock" => rarefaction_shock(),
        _ => Err(SolverError::UnknownPreset(name.to_string())),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_all_presets() {
        for name in PRESETS {
            let data = from_preset(name).unwrap();
            assert!(data.num_discontinuities() > 0);
        }
        assert_eq!(
            from_preset("sodshock"),
            Err(SolverError::UnknownPreset("sodshock".to_string()))
        );
    }
}
