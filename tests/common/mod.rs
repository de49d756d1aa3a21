use burgers_waves::{flux::flux, sampling::integrate, Composer, PiecewiseInitialData};
use rand::{rngs::StdRng, Rng, SeedableRng};

pub const SEED: u64 = 0x5eed;

pub fn triple_state(q_l: f64, q_m: f64, q_r: f64) -> Composer {
    let data = PiecewiseInitialData::new(vec![-1., 1.], vec![q_l, q_m, q_r])
        .expect("Error creating initial data!");
    Composer::new(data).expect("Error composing solution!")
}

pub fn rng() -> StdRng {
    StdRng::seed_from_u64(SEED)
}

/// Random pair of distinct states with `q_l > q_r`.
pub fn _shock_states(rng: &mut StdRng) -> (f64, f64) {
    let a: f64 = rng.gen_range(-5.0..5.0);
    let b: f64 = rng.gen_range(-5.0..5.0);
    if a == b {
        (a + 1., b)
    } else {
        (a.max(b), a.min(b))
    }
}

/// Random pair of distinct states with `q_l < q_r`.
pub fn _rarefaction_states(rng: &mut StdRng) -> (f64, f64) {
    let (q_r, q_l) = _shock_states(rng);
    (q_l, q_r)
}

/// Integral of `q(., t)` over `[a, b]`.
pub fn _mass<F: Fn(f64, f64) -> f64>(q: F, a: f64, b: f64, t: f64) -> f64 {
    integrate(|x| q(x, t), a, b, 200_000)
}

/// Mass expected at time `t` in `[a, b]` when `q_l` flows in on the left and
/// `q_r` flows out on the right.
pub fn _expected_mass(initial_mass: f64, q_l: f64, q_r: f64, t: f64) -> f64 {
    initial_mass + t * (flux(q_l) - flux(q_r))
}
