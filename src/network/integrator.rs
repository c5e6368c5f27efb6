use super::{Abundances, Jacobian, Network, MOLAR_MASS, N_ISO};

/// First trial step in seconds.
pub const INITIAL_STEP: f64 = 1.0e-8;

const MAX_NEWTON_ITERATIONS: usize = 10;
const NEWTON_TOLERANCE: f64 = 1.0e-8;
/// Molar abundance below which relative changes are measured against this
/// floor instead (X ~ 1e-11, under the plotted range).
const ABUNDANCE_FLOOR: f64 = 1.0e-12;
/// Largest relative change of any abundance accepted in one step.
const MAX_CHANGE: f64 = 0.2;
/// Steps with a relative change under this grow by [`GROWTH`].
const SMALL_CHANGE: f64 = 0.05;
const GROWTH: f64 = 2.0;
const MIN_STEP: f64 = 1.0e-20;
const MAX_STEPS: usize = 1_000_000;

#[derive(Debug, thiserror::Error)]
pub enum IntegrationError {
    /// The step size collapsed while trying to satisfy the change limit.
    #[error("step size underflow at t = {time:e} s (h = {step:e} s)")]
    StepUnderflow { time: f64, step: f64 },

    #[error("gave up after {0} steps")]
    TooManySteps(usize),
}

/// Step counters for one integration.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats {
    pub accepted: usize,
    pub rejected: usize,
}

/// Implicit (backward) Euler on a stiff network with step-size control.
///
/// Each step solves `Y1 = Y0 + h f(Y1)` by Newton iteration on
/// `(I - h J) dY = -(Y - Y0 - h f(Y))`. A step is rejected and halved when
/// Newton fails, an abundance goes negative, or any abundance changes by
/// more than [`MAX_CHANGE`] relative to its size.
pub struct Integrator<'a> {
    network: &'a Network,
    y: Abundances,
    time: f64,
    step: f64,
    stats: Stats,
}

impl<'a> Integrator<'a> {
    pub fn new(network: &'a Network, y0: Abundances) -> Self {
        Integrator {
            network,
            y: y0,
            time: 0.0,
            step: INITIAL_STEP,
            stats: Stats::default(),
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn abundances(&self) -> &Abundances {
        &self.y
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Take one accepted step towards `t_stop`, never stepping past it.
    pub fn advance(&mut self, t_stop: f64) -> Result<(), IntegrationError> {
        loop {
            if self.stats.accepted + self.stats.rejected >= MAX_STEPS {
                return Err(IntegrationError::TooManySteps(MAX_STEPS));
            }
            let remaining = t_stop - self.time;
            let last = self.step >= remaining;
            let h = if last { remaining } else { self.step };
            if h < MIN_STEP {
                return Err(IntegrationError::StepUnderflow {
                    time: self.time,
                    step: h,
                });
            }

            let Some(next) = self.implicit_step(h) else {
                self.stats.rejected += 1;
                self.step = 0.5 * h;
                continue;
            };

            let change = relative_change(&self.y, &next);
            if change > MAX_CHANGE {
                self.stats.rejected += 1;
                self.step = 0.5 * h;
                continue;
            }

            self.y = next;
            // Land exactly on t_stop rather than a rounding error short of it.
            self.time = if last { t_stop } else { self.time + h };
            self.stats.accepted += 1;
            if change < SMALL_CHANGE {
                self.step = GROWTH * h;
            }
            log::debug!("t = {:.4e} s, h = {h:.3e} s, change = {change:.3e}", self.time);
            return Ok(());
        }
    }

    /// Zero any abundance whose mass fraction fell below `threshold`.
    pub fn kill_below(&mut self, threshold: f64) {
        for i in 0..N_ISO {
            if self.y[i] * MOLAR_MASS[i] < threshold {
                self.y[i] = 0.0;
            }
        }
    }

    fn implicit_step(&self, h: f64) -> Option<Abundances> {
        let mut y = self.y;
        for _ in 0..MAX_NEWTON_ITERATIONS {
            let residual = y - self.y - self.network.rhs(&y) * h;
            let matrix = Jacobian::identity() - self.network.jacobian(&y) * h;
            let delta = matrix.lu().solve(&(-residual))?;
            y += delta;

            let converged = (0..N_ISO).all(|i| delta[i].abs() <= NEWTON_TOLERANCE * y[i].abs().max(ABUNDANCE_FLOOR));
            if converged {
                // Rounding may leave values a hair below zero.
                if (0..N_ISO).any(|i| y[i] < -ABUNDANCE_FLOOR) {
                    return None;
                }
                return Some(y.map(|v| v.max(0.0)));
            }
        }
        None
    }
}

fn relative_change(before: &Abundances, after: &Abundances) -> f64 {
    (0..N_ISO)
        .map(|i| {
            let scale = before[i].abs().max(after[i].abs()).max(ABUNDANCE_FLOOR);
            (after[i] - before[i]).abs() / scale
        })
        .fold(0.0, f64::max)
}
