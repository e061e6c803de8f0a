/// A borrowed window of real samples captured at a fixed sample rate.
///
/// The window must hold at least one sample and the sample rate must be
/// positive. Both are caller obligations and are only checked in debug builds.
#[derive(Debug, Clone, Copy)]
pub struct SampleWindow<'a> {
    samples: &'a [f64],
    sample_rate_hz: f64,
}

impl<'a> SampleWindow<'a> {
    pub fn new(samples: &'a [f64], sample_rate_hz: f64) -> Self {
        debug_assert!(!samples.is_empty(), "sample window must not be empty");
        debug_assert!(sample_rate_hz > 0.0, "sample rate must be positive");
        Self {
            samples,
            sample_rate_hz,
        }
    }

    /// The borrowed samples, in time order.
    pub fn samples(&self) -> &'a [f64] {
        self.samples
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    /// Window length `N`, which also fixes the bin spacing.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Frequency spacing between adjacent bins.
    pub fn bin_step_hz(&self) -> f64 {
        self.sample_rate_hz / self.samples.len() as f64
    }

    /// Highest bin index a range may extend to.
    pub fn max_bin(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }
}

/// An inclusive band of interest in Hz.
///
/// A range with `low_hz > high_hz` covers no bins.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrequencyRange {
    pub low_hz: f64,
    pub high_hz: f64,
}

impl FrequencyRange {
    pub fn new(low_hz: f64, high_hz: f64) -> Self {
        Self { low_hz, high_hz }
    }
}

impl From<(f64, f64)> for FrequencyRange {
    fn from((low_hz, high_hz): (f64, f64)) -> Self {
        Self::new(low_hz, high_hz)
    }
}

/// One evaluated DFT bin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BinResult {
    /// Bin index `k` within the window.
    pub bin: usize,
    /// Bin center frequency, `k / len * sample_rate`.
    pub frequency_hz: f64,
    pub real: f64,
    pub imag: f64,
    /// `d2^2 + d1^2 - w_real * d1 * d2` from the final recurrence state.
    pub power: f64,
}
