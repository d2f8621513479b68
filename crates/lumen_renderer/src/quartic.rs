//! Durand-Kerner root finding for monic quartics.
//!
//! All four roots are refined simultaneously from complex seeds. An attempt
//! fails when it runs out of iterations or produces a non-finite update; the
//! solver then re-seeds and retries a bounded number of times. Re-seeding
//! draws from a `StdRng` seeded by the configuration, so a given quartic
//! always takes the same path and renders are reproducible.

use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Tuning for the quartic solver.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuarticSolverConfig {
    /// An attempt has converged once every root moves less than this.
    pub threshold: f64,
    /// Roots with an imaginary part below this count as real.
    pub imaginary_epsilon: f64,
    /// Iterations per attempt.
    pub max_iterations: u32,
    /// Re-seeded attempts after the first one.
    pub max_restarts: u32,
    /// Seed for re-seeding.
    pub seed: u64,
}

impl Default for QuarticSolverConfig {
    fn default() -> Self {
        Self {
            threshold: 1e-5,
            imaginary_epsilon: 1e-5,
            max_iterations: 1000,
            max_restarts: 8,
            seed: 0x5EED,
        }
    }
}

/// The monic quartic `x^4 + a x^3 + b x^2 + c x + d`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quartic {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
}

impl Quartic {
    pub fn new(a: f64, b: f64, c: f64, d: f64) -> Self {
        Self { a, b, c, d }
    }

    /// Evaluate with Horner's scheme.
    #[inline]
    pub fn eval(&self, x: Complex64) -> Complex64 {
        self.d + x * (self.c + x * (self.b + x * (self.a + x)))
    }

    /// Find all four complex roots, or `None` when every attempt failed.
    pub fn roots(&self, config: &QuarticSolverConfig) -> Option<[Complex64; 4]> {
        let mut rng: Option<StdRng> = None;
        let mut seed = Complex64::new(0.4, 0.9);

        for attempt in 0..=config.max_restarts {
            if let Some(roots) = self.durand_kerner(seeds(seed), config) {
                return Some(roots);
            }

            let rng = rng.get_or_insert_with(|| StdRng::seed_from_u64(config.seed));
            seed = Complex64::new(rng.gen::<f64>(), rng.gen::<f64>());
            log::trace!("Durand-Kerner attempt {} failed for {:?}, re-seeding", attempt, self);
        }

        None
    }

    /// Smallest real root strictly greater than `lower`.
    pub fn smallest_real_root_above(&self, lower: f64, config: &QuarticSolverConfig) -> Option<f64> {
        let roots = self.roots(config)?;
        roots
            .iter()
            .filter(|root| root.im.abs() < config.imaginary_epsilon && root.re > lower)
            .map(|root| root.re)
            .min_by(f64::total_cmp)
    }

    fn durand_kerner(&self, mut roots: [Complex64; 4], config: &QuarticSolverConfig) -> Option<[Complex64; 4]> {
        for _ in 0..config.max_iterations {
            let mut next = roots;
            let mut converged = true;

            for i in 0..4 {
                let mut denominator = Complex64::new(1.0, 0.0);
                for (j, other) in roots.iter().enumerate() {
                    if i != j {
                        denominator *= roots[i] - other;
                    }
                }

                let updated = roots[i] - self.eval(roots[i]) / denominator;
                if !updated.is_finite() {
                    return None;
                }
                if (updated - roots[i]).norm() >= config.threshold {
                    converged = false;
                }
                next[i] = updated;
            }

            if converged {
                return Some(next);
            }
            roots = next;
        }

        None
    }
}

/// Seeds `1, q, q^2, q^3`.
fn seeds(q: Complex64) -> [Complex64; 4] {
    let q2 = q * q;
    [Complex64::new(1.0, 0.0), q, q2, q2 * q]
}
