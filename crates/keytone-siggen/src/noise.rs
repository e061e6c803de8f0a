use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Zero-mean Gaussian noise generated with the Box-Muller transform.
///
/// The generator is seeded explicitly, so two instances built from the same
/// seed produce the same sequence.
pub struct GaussianNoise {
    std_dev: f64,
    rng: StdRng,
    spare: Option<f64>,
}

impl GaussianNoise {
    pub fn seeded(std_dev: f64, seed: u64) -> Self {
        Self {
            std_dev,
            rng: StdRng::seed_from_u64(seed),
            spare: None,
        }
    }

    /// Standard deviation applied to every drawn sample.
    pub fn std_dev(&self) -> f64 {
        self.std_dev
    }

    /// Draw the next sample.
    pub fn next_sample(&mut self) -> f64 {
        if let Some(z1) = self.spare.take() {
            return z1 * self.std_dev;
        }
        // `gen` yields [0, 1); flip it so the logarithm never sees zero.
        let u1 = 1.0 - self.rng.gen::<f64>();
        let u2 = self.rng.gen::<f64>();
        let r = (-2.0 * u1.ln()).sqrt();
        let theta = std::f64::consts::TAU * u2;
        self.spare = Some(r * theta.sin());
        r * theta.cos() * self.std_dev
    }

    /// Add noise to every sample in place.
    pub fn add_to(&mut self, samples: &mut [f64]) {
        for sample in samples {
            *sample += self.next_sample();
        }
    }

    /// A fresh buffer of pure noise.
    pub fn generate(&mut self, len: usize) -> Vec<f64> {
        (0..len).map(|_| self.next_sample()).collect()
    }
}
