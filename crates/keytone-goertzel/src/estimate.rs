use std::collections::HashSet;

use tracing::{debug, trace};

use crate::error::EstimateError;
use crate::window::{BinResult, FrequencyRange, SampleWindow};

/// Recurrence coefficients for a single DFT bin.
#[derive(Debug, Clone, Copy)]
pub struct BinCoefficients {
    bin: usize,
    f_norm: f64,
    w_real: f64,
    w_imag: f64,
}

impl BinCoefficients {
    /// Coefficients for bin `bin` of a `window_len`-sample window.
    pub fn new(bin: usize, window_len: usize) -> Self {
        let f_norm = bin as f64 / window_len as f64;
        let omega = std::f64::consts::TAU * f_norm;
        Self {
            bin,
            f_norm,
            w_real: 2.0 * omega.cos(),
            w_imag: omega.sin(),
        }
    }

    /// Run the second-order recurrence over `samples` in order and return the
    /// final `(d1, d2)` state.
    pub fn accumulate(&self, samples: &[f64]) -> (f64, f64) {
        let mut d1 = 0.0;
        let mut d2 = 0.0;
        for &x in samples {
            let y = x + self.w_real * d1 - d2;
            d2 = d1;
            d1 = y;
        }
        (d1, d2)
    }

    /// Turn the final recurrence state into a bin result.
    pub fn finish(&self, d1: f64, d2: f64, sample_rate_hz: f64) -> BinResult {
        BinResult {
            bin: self.bin,
            frequency_hz: self.f_norm * sample_rate_hz,
            real: 0.5 * self.w_real * d1 - d2,
            imag: self.w_imag * d1,
            power: d2 * d2 + d1 * d1 - self.w_real * d1 * d2,
        }
    }

    pub fn evaluate(&self, window: &SampleWindow<'_>) -> BinResult {
        let (d1, d2) = self.accumulate(window.samples());
        self.finish(d1, d2, window.sample_rate_hz())
    }
}

/// Compute every bin covered by `ranges`.
///
/// Each range selects `floor(low / f_step) <= k < ceil(high / f_step)` with
/// `f_step = sample_rate / len`. Results follow the order of `ranges`, ascending
/// within each range, and a bin shared by several ranges is reported once at
/// its first position.
///
/// All ranges are validated before any bin is computed: if one of them reaches
/// past the last usable bin the call fails and nothing is returned.
pub fn estimate(
    window: &SampleWindow<'_>,
    ranges: &[FrequencyRange],
) -> Result<Vec<BinResult>, EstimateError> {
    let bins = select_bins(window, ranges)?;
    debug!(
        bins = bins.len(),
        window_len = window.len(),
        sample_rate_hz = window.sample_rate_hz(),
        "estimating goertzel bins"
    );

    let results = bins
        .into_iter()
        .map(|k| {
            let result = BinCoefficients::new(k, window.len()).evaluate(window);
            trace!(
                bin = result.bin,
                frequency_hz = result.frequency_hz,
                power = result.power,
                "bin evaluated"
            );
            result
        })
        .collect();
    Ok(results)
}

/// Resolve `ranges` to the ordered, de-duplicated list of bin indices.
pub fn select_bins(
    window: &SampleWindow<'_>,
    ranges: &[FrequencyRange],
) -> Result<Vec<usize>, EstimateError> {
    let f_step = window.bin_step_hz();
    let max_bin = window.max_bin();

    let mut spans = Vec::with_capacity(ranges.len());
    for range in ranges {
        let end = (range.high_hz / f_step).ceil();
        // Negated so that a NaN bound is rejected as well.
        if !(end <= max_bin as f64) {
            return Err(EstimateError::OutOfRangeFrequency {
                frequency_hz: range.high_hz,
                bin: end,
                max_bin,
            });
        }
        let start = (range.low_hz / f_step).floor().max(0.0);
        spans.push((start as usize, end as usize));
    }

    let mut seen = HashSet::new();
    let mut bins = Vec::new();
    for (start, end) in spans {
        for k in start..end {
            if seen.insert(k) {
                bins.push(k);
            }
        }
    }
    Ok(bins)
}
