//! Test and demo signal sources: tones, modulated carriers and additive noise,
//! plus the convolution and spectral-gate helpers used to shape them.

pub mod convolve;
pub mod modulation;
pub mod noise;
pub mod spectrum;
pub mod tone;

pub use convolve::{circular_convolve, convolve_same, correlation_sums, normalize_by_area};
pub use modulation::{am, fm, Modulation};
pub use noise::GaussianNoise;
pub use spectrum::{magnitude_spectrum, spectral_gate};
pub use tone::{samples_for, tone, two_tone};
