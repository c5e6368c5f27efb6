//! Thermonuclear reaction rates `N_A <sigma v>` in cm^3 mol^-1 s^-1.
//!
//! Analytic fits from Caughlan & Fowler (1988), Atomic Data and Nuclear Data
//! Tables 40, 283. Each fit is a function of `T9 = T / 1e9 K`.

/// Weight applied to the uncertain resonance terms that CF88 brackets
/// between 0 and 1.
const RESONANCE_FACTOR: f64 = 0.5;

/// Fractional powers of `T9` shared by the fits.
#[derive(Debug, Clone, Copy)]
pub struct T9 {
    pub t9: f64,
    t912: f64,
    t913: f64,
    t923: f64,
    t932: f64,
    t943: f64,
    t953: f64,
    t965: f64,
}

impl T9 {
    pub fn from_kelvin(temperature: f64) -> Self {
        let t9 = temperature / 1.0e9;
        T9 {
            t9,
            t912: t9.sqrt(),
            t913: t9.cbrt(),
            t923: t9.powf(2.0 / 3.0),
            t932: t9.powf(1.5),
            t943: t9.powf(4.0 / 3.0),
            t953: t9.powf(5.0 / 3.0),
            t965: t9.powf(1.2),
        }
    }
}

pub fn c12_pg_n13(t: &T9) -> f64 {
    2.04e7 / t.t923
        * (-13.690 / t.t913 - (t.t9 / 1.500).powi(2)).exp()
        * (1.0 + 0.030 * t.t913 + 1.19 * t.t923 + 0.254 * t.t9 + 2.06 * t.t943 + 1.12 * t.t953)
        + 1.08e5 / t.t932 * (-4.925 / t.t9).exp()
        + 2.15e5 / t.t932 * (-18.179 / t.t9).exp()
}

pub fn c13_pg_n14(t: &T9) -> f64 {
    8.01e7 / t.t923
        * (-13.717 / t.t913 - (t.t9 / 2.000).powi(2)).exp()
        * (1.0 + 0.030 * t.t913 + 0.958 * t.t923 + 0.204 * t.t9 + 1.39 * t.t943 + 0.753 * t.t953)
        + 1.21e6 / t.t965 * (-5.701 / t.t9).exp()
}

pub fn n14_pg_o15(t: &T9) -> f64 {
    4.90e7 / t.t923
        * (-15.202 / t.t913 - (t.t9 / 1.191).powi(2)).exp()
        * (1.0 + 0.027 * t.t913 - 0.778 * t.t923 - 0.149 * t.t9 + 0.261 * t.t943 + 0.127 * t.t953)
        + 2.37e3 / t.t932 * (-3.011 / t.t9).exp()
        + 2.19e4 * (-12.530 / t.t9).exp()
}

pub fn n15_pa_c12(t: &T9) -> f64 {
    1.08e12 / t.t923
        * (-15.251 / t.t913 - (t.t9 / 0.522).powi(2)).exp()
        * (1.0 + 0.027 * t.t913 + 2.62 * t.t923 + 0.501 * t.t9 + 5.36 * t.t943 + 2.60 * t.t953)
        + 1.19e8 / t.t932 * (-3.676 / t.t9).exp()
        + 5.41e8 / t.t912 * (-8.926 / t.t9).exp()
        + RESONANCE_FACTOR * 4.72e8 / t.t932 * (-7.721 / t.t9).exp()
        + 2.20e9 / t.t932 * (-11.418 / t.t9).exp()
}

pub fn n15_pg_o16(t: &T9) -> f64 {
    9.78e8 / t.t923
        * (-15.251 / t.t913 - (t.t9 / 0.450).powi(2)).exp()
        * (1.0 + 0.027 * t.t913 + 0.219 * t.t923 + 0.042 * t.t9 + 6.83 * t.t943 + 3.32 * t.t953)
        + 1.11e4 / t.t932 * (-3.328 / t.t9).exp()
        + 1.49e4 / t.t932 * (-4.665 / t.t9).exp()
        + 3.80e6 / t.t932 * (-11.048 / t.t9).exp()
}

pub fn o16_pg_f17(t: &T9) -> f64 {
    1.50e8 / (t.t923 * (1.0 + 2.13 * (1.0 - (-0.728 * t.t923).exp()))) * (-16.692 / t.t913).exp()
}

pub fn o17_pa_n14(t: &T9) -> f64 {
    1.53e7 / t.t923
        * (-16.712 / t.t913 - (t.t9 / 0.565).powi(2)).exp()
        * (1.0 + 0.025 * t.t913 + 5.39 * t.t923 + 0.940 * t.t9 + 13.5 * t.t943 + 5.98 * t.t953)
        + RESONANCE_FACTOR
            * (4.81e10 * t.t9 * (-16.712 / t.t913 - (t.t9 / 0.040).powi(2)).exp()
                + 5.05e-5 / t.t932 * (-0.723 / t.t9).exp())
        + RESONANCE_FACTOR * 1.31e1 / t.t932 * (-1.961 / t.t9).exp()
}

pub fn o17_pg_f18(t: &T9) -> f64 {
    let t9a = t.t9 / (1.0 + 2.69 * t.t9);
    7.97e7 * t9a.powf(5.0 / 6.0) / t.t932 * (-16.712 / t9a.cbrt()).exp()
        + 1.51e8 / t.t923
            * (-16.712 / t.t913).exp()
            * (1.0 + 0.025 * t.t913 - 0.051 * t.t923 - 8.82e-3 * t.t9)
        + 1.56e5 / t.t9 * (-6.272 / t.t9).exp()
        + RESONANCE_FACTOR * 1.31e1 / t.t932 * (-1.961 / t.t9).exp()
}

pub fn o18_pa_n15(t: &T9) -> f64 {
    3.63e11 / t.t923
        * (-16.729 / t.t913 - (t.t9 / 1.361).powi(2)).exp()
        * (1.0 + 0.025 * t.t913 + 1.88 * t.t923 + 0.327 * t.t9 + 4.66 * t.t943 + 2.06 * t.t953)
        + 9.90e-14 / t.t932 * (-0.231 / t.t9).exp()
        + 2.66e4 / t.t932 * (-1.670 / t.t9).exp()
        + 2.41e9 / t.t932 * (-7.638 / t.t9).exp()
        + 1.46e9 / t.t9 * (-8.310 / t.t9).exp()
}

/// Decay constant (s^-1) for a half-life in seconds.
pub fn decay_constant(half_life: f64) -> f64 {
    std::f64::consts::LN_2 / half_life
}
