/// CNO-cycle burn network: the simulation that produces `results.dat`.
///
/// ```text
///   Burn (T, rho, t_stop, X0)
///        │
///        ▼
///   ┌──────────┐   rates.rs: CF88 N_A<sigma v>, beta+ decay constants
///   │ Network  │   dY/dt and analytic Jacobian
///   └──────────┘
///        │
///        ▼
///   ┌────────────┐
///   │ integrator │  backward Euler + Newton, adaptive step
///   └────────────┘
///        │
///        ▼
///   Table (tnow + 13 mass fractions per accepted step)
/// ```
pub mod integrator;
pub mod rates;

use nalgebra::{SMatrix, SVector};

use crate::data::Table;
use crate::species::TIME_COLUMN;

pub use integrator::{IntegrationError, Integrator};

/// Number of isotopes in the network.
pub const N_ISO: usize = 13;

pub const HE4: usize = 0;
pub const C12: usize = 1;
pub const N13: usize = 2;
pub const C13: usize = 3;
pub const N14: usize = 4;
pub const O15: usize = 5;
pub const N15: usize = 6;
pub const O16: usize = 7;
pub const F17: usize = 8;
pub const O17: usize = 9;
pub const F18: usize = 10;
pub const O18: usize = 11;
pub const H1: usize = 12;

/// Output column name of each isotope, in index order.
pub const COLUMN_NAMES: [&str; N_ISO] = [
    "he4", "c12", "n13", "c13", "n14", "o15", "n15", "o16", "f17", "o17", "f18", "o18", "h1",
];

/// Molar masses in g/mol, in index order.
pub const MOLAR_MASS: [f64; N_ISO] = [
    4.002602,
    12.0,
    13.005738609,
    13.00335483778,
    14.00307400478,
    15.003065617,
    15.00010889823,
    15.99491461956,
    17.002095237,
    16.999131703,
    18.000937956,
    17.999161001,
    1.00794,
];

/// Nucleon number of each isotope, in index order.
pub const MASS_NUMBER: [f64; N_ISO] = [4.0, 12.0, 13.0, 13.0, 14.0, 15.0, 15.0, 16.0, 17.0, 17.0, 18.0, 18.0, 1.0];

/// Mass fractions below this are reset to zero after every step.
pub const KILL_THRESHOLD: f64 = 1.0e-20;

pub type Abundances = SVector<f64, N_ISO>;
pub type Jacobian = SMatrix<f64, N_ISO, N_ISO>;

// ---------------------------------------------------------------------------
// Reactions
// ---------------------------------------------------------------------------

/// Proton capture `target(p, gamma|alpha)product`.
#[derive(Debug, Clone, Copy)]
struct Capture {
    target: usize,
    product: usize,
    /// (p, alpha): an He4 nucleus leaves along with the product.
    alpha: bool,
    rate: fn(&rates::T9) -> f64,
}

/// beta+ decay `parent -> daughter`.
#[derive(Debug, Clone, Copy)]
struct Decay {
    parent: usize,
    daughter: usize,
    /// seconds
    half_life: f64,
}

const CAPTURES: [Capture; 9] = [
    Capture { target: C12, product: N13, alpha: false, rate: rates::c12_pg_n13 },
    Capture { target: C13, product: N14, alpha: false, rate: rates::c13_pg_n14 },
    Capture { target: N14, product: O15, alpha: false, rate: rates::n14_pg_o15 },
    Capture { target: N15, product: C12, alpha: true, rate: rates::n15_pa_c12 },
    Capture { target: N15, product: O16, alpha: false, rate: rates::n15_pg_o16 },
    Capture { target: O16, product: F17, alpha: false, rate: rates::o16_pg_f17 },
    Capture { target: O17, product: N14, alpha: true, rate: rates::o17_pa_n14 },
    Capture { target: O17, product: F18, alpha: false, rate: rates::o17_pg_f18 },
    Capture { target: O18, product: N15, alpha: true, rate: rates::o18_pa_n15 },
];

const DECAYS: [Decay; 4] = [
    Decay { parent: N13, daughter: C13, half_life: 9.965 * 60.0 },
    Decay { parent: O15, daughter: N15, half_life: 122.24 },
    Decay { parent: F17, daughter: O17, half_life: 64.49 },
    Decay { parent: F18, daughter: O18, half_life: 109.771 * 60.0 },
];

/// Rate coefficients evaluated at a fixed temperature and density.
///
/// Abundances are molar, `Y_i = X_i / M_i` (mol/g).
#[derive(Debug, Clone)]
pub struct Network {
    /// `rho * N_A<sigma v>` per capture (g mol^-1 s^-1).
    capture: [f64; CAPTURES.len()],
    /// s^-1 per decay
    decay: [f64; DECAYS.len()],
}

impl Network {
    pub fn new(temperature: f64, density: f64) -> Self {
        let t9 = rates::T9::from_kelvin(temperature);
        Network {
            capture: CAPTURES.map(|c| density * (c.rate)(&t9)),
            decay: DECAYS.map(|d| rates::decay_constant(d.half_life)),
        }
    }

    /// Time derivative of the molar abundances.
    pub fn rhs(&self, y: &Abundances) -> Abundances {
        let mut dydt = Abundances::zeros();
        for (c, &k) in CAPTURES.iter().zip(&self.capture) {
            let flux = k * y[c.target] * y[H1];
            dydt[c.target] -= flux;
            dydt[H1] -= flux;
            dydt[c.product] += flux;
            if c.alpha {
                dydt[HE4] += flux;
            }
        }
        for (d, &lambda) in DECAYS.iter().zip(&self.decay) {
            let flux = lambda * y[d.parent];
            dydt[d.parent] -= flux;
            dydt[d.daughter] += flux;
        }
        dydt
    }

    /// `J[i][j] = d(dY_i/dt) / dY_j`.
    pub fn jacobian(&self, y: &Abundances) -> Jacobian {
        let mut jac = Jacobian::zeros();
        for (c, &k) in CAPTURES.iter().zip(&self.capture) {
            let d_target = k * y[H1];
            let d_proton = k * y[c.target];
            let mut add = |row: usize, sign: f64| {
                jac[(row, c.target)] += sign * d_target;
                jac[(row, H1)] += sign * d_proton;
            };
            add(c.target, -1.0);
            add(H1, -1.0);
            add(c.product, 1.0);
            if c.alpha {
                add(HE4, 1.0);
            }
        }
        for (d, &lambda) in DECAYS.iter().zip(&self.decay) {
            jac[(d.parent, d.parent)] -= lambda;
            jac[(d.daughter, d.parent)] += lambda;
        }
        jac
    }
}

/// Convert mass fractions to molar abundances.
pub fn to_molar(mass_fractions: &[f64; N_ISO]) -> Abundances {
    Abundances::from_fn(|i, _| mass_fractions[i] / MOLAR_MASS[i])
}

/// Convert molar abundances to mass fractions.
pub fn to_mass_fractions(y: &Abundances) -> [f64; N_ISO] {
    std::array::from_fn(|i| y[i] * MOLAR_MASS[i])
}

// ---------------------------------------------------------------------------
// Burn: one hydrostatic run
// ---------------------------------------------------------------------------

/// Conditions of a constant temperature and density burn.
#[derive(Debug, Clone)]
pub struct Burn {
    /// K
    pub temperature: f64,
    /// g/cm^3
    pub density: f64,
    /// s
    pub t_stop: f64,
    pub initial: [f64; N_ISO],
}

impl Default for Burn {
    fn default() -> Self {
        Burn {
            temperature: 1.5e7,
            density: 150.0,
            t_stop: 1.0e22,
            initial: solar_core_start(),
        }
    }
}

/// 99% H1 and 1% C12 by mass; the rest at a tiny positive floor.
pub fn solar_core_start() -> [f64; N_ISO] {
    let mut x = [KILL_THRESHOLD; N_ISO];
    x[H1] = 0.99;
    x[C12] = 0.01;
    x
}

impl Burn {
    /// Integrate from t = 0 to `t_stop`. One table row per accepted step,
    /// columns `tnow` followed by the mass fractions in index order.
    pub fn run(&self) -> Result<Table, IntegrationError> {
        let network = Network::new(self.temperature, self.density);
        let mut integrator = Integrator::new(&network, to_molar(&self.initial));

        let mut table = Table::with_columns(std::iter::once(TIME_COLUMN).chain(COLUMN_NAMES));
        let mut row = [0.0; N_ISO + 1];

        while integrator.time() < self.t_stop {
            integrator.advance(self.t_stop)?;
            integrator.kill_below(KILL_THRESHOLD);

            row[0] = integrator.time();
            row[1..].copy_from_slice(&to_mass_fractions(integrator.abundances()));
            table.push_row(&row);
        }

        log::info!(
            "Burn at T = {:.3e} K, rho = {} g/cm^3 reached t = {:.3e} s in {} steps ({} rejected)",
            self.temperature,
            self.density,
            integrator.time(),
            integrator.stats().accepted,
            integrator.stats().rejected,
        );
        Ok(table)
    }
}
