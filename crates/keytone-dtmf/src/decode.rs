use keytone_goertzel::{estimate, BinResult, EstimateError, SampleWindow};
use tracing::debug;

use crate::table::{TonePair, ToneTable};

pub const DEFAULT_TOP_K: usize = 4;
pub const DEFAULT_VICINITY_HZ: u32 = 10;
pub const DEFAULT_STEP_HZ: u32 = 1;

/// Outcome of decoding one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Digit(char),
    /// The dominant frequencies, in whole Hz, did not resolve to any symbol.
    NoMatch { low_hz: u32, high_hz: u32 },
}

impl Decision {
    /// The decoded symbol, or `None` for [`Decision::NoMatch`].
    ///
    /// ```
    /// use keytone_dtmf::Decision;
    ///
    /// assert_eq!(Decision::Digit('5').digit(), Some('5'));
    /// assert_eq!(Decision::NoMatch { low_hz: 400, high_hz: 600 }.digit(), None);
    /// ```
    pub fn digit(&self) -> Option<char> {
        match self {
            Decision::Digit(symbol) => Some(*symbol),
            Decision::NoMatch { .. } => None,
        }
    }
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Digit(symbol) => write!(f, "{}", symbol),
            Decision::NoMatch { low_hz, high_hz } => {
                write!(f, "no match ({} Hz, {} Hz)", low_hz, high_hz)
            }
        }
    }
}

/// Maps Goertzel bins to a keypad symbol.
///
/// The strongest `top_k` bins are reduced to their lowest and highest
/// frequency. That pair is looked up exactly, then within a
/// `±vicinity_hz` box scanned in `step_hz` increments.
#[derive(Debug, Clone)]
pub struct Decoder {
    top_k: usize,
    vicinity_hz: u32,
    step_hz: u32,
}

impl Default for Decoder {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Decoder {
    /// Create a builder with default settings.
    pub fn builder() -> DecoderBuilder {
        DecoderBuilder::new()
    }

    /// Number of strongest bins that take part in the decision.
    pub fn top_k(&self) -> usize {
        self.top_k
    }

    /// Half-width of the fallback search box in Hz.
    pub fn vicinity_hz(&self) -> u32 {
        self.vicinity_hz
    }

    /// Candidate spacing of the fallback search in Hz.
    pub fn step_hz(&self) -> u32 {
        self.step_hz
    }

    /// Decode a set of bins against `table`.
    ///
    /// Never fails: an empty input or an unresolved pair yields
    /// [`Decision::NoMatch`].
    pub fn decode(&self, bins: &[BinResult], table: &ToneTable) -> Decision {
        let dominant = dominant_bins(bins, self.top_k);
        let Some((low, high)) = frequency_pair(&dominant) else {
            debug!("no bins to decode");
            return Decision::NoMatch {
                low_hz: 0,
                high_hz: 0,
            };
        };

        if let Some(symbol) = table.symbol(TonePair::new(high, low)) {
            debug!(low, high, %symbol, "exact tone match");
            return Decision::Digit(symbol);
        }

        match self.search_vicinity(low, high, table) {
            Some(symbol) => {
                debug!(low, high, %symbol, "tone matched in vicinity");
                Decision::Digit(symbol)
            }
            None => {
                debug!(low, high, "no tone match");
                Decision::NoMatch {
                    low_hz: low,
                    high_hz: high,
                }
            }
        }
    }

    /// Estimate the bins `table` needs from `window`, then decode them.
    pub fn detect(
        &self,
        window: &SampleWindow<'_>,
        table: &ToneTable,
    ) -> Result<Decision, EstimateError> {
        let ranges = table.search_ranges(self.vicinity_hz);
        let bins = estimate(window, &ranges)?;
        Ok(self.decode(&bins, table))
    }

    // Low candidates form the outer loop and high candidates the inner one,
    // both ascending. When several entries fall inside the box the first one
    // reached wins, not the closest.
    fn search_vicinity(&self, low: u32, high: u32, table: &ToneTable) -> Option<char> {
        let offset = i64::from(self.vicinity_hz);
        let step = self.step_hz as usize;
        let (low, high) = (i64::from(low), i64::from(high));

        for low_c in (low - offset..low + offset).step_by(step) {
            let Ok(low_c) = u32::try_from(low_c) else {
                continue;
            };
            for high_c in (high - offset..high + offset).step_by(step) {
                let Ok(high_c) = u32::try_from(high_c) else {
                    continue;
                };
                if let Some(symbol) = table.symbol(TonePair::new(high_c, low_c)) {
                    return Some(symbol);
                }
            }
        }
        None
    }
}

/// Decode with the default decoder settings.
pub fn decode(bins: &[BinResult], table: &ToneTable) -> Decision {
    Decoder::default().decode(bins, table)
}

/// Highest power first, lower frequency first on ties.
fn dominant_bins(bins: &[BinResult], top_k: usize) -> Vec<&BinResult> {
    let mut ranked: Vec<&BinResult> = bins.iter().collect();
    ranked.sort_by(|a, b| {
        b.power
            .total_cmp(&a.power)
            .then_with(|| a.frequency_hz.total_cmp(&b.frequency_hz))
    });
    ranked.truncate(top_k);
    ranked
}

fn frequency_pair(bins: &[&BinResult]) -> Option<(u32, u32)> {
    if bins.is_empty() {
        return None;
    }
    let min = bins.iter().map(|b| b.frequency_hz).fold(f64::INFINITY, f64::min);
    let max = bins
        .iter()
        .map(|b| b.frequency_hz)
        .fold(f64::NEG_INFINITY, f64::max);
    Some((min.floor() as u32, max.floor() as u32))
}

/// Builder for configuring a [`Decoder`].
pub struct DecoderBuilder {
    top_k: usize,
    vicinity_hz: u32,
    step_hz: u32,
}

impl Default for DecoderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DecoderBuilder {
    pub fn new() -> Self {
        Self {
            top_k: DEFAULT_TOP_K,
            vicinity_hz: DEFAULT_VICINITY_HZ,
            step_hz: DEFAULT_STEP_HZ,
        }
    }

    /// Set how many of the strongest bins take part in the decision.
    pub fn top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    /// Set the half-width of the fallback search box in Hz.
    pub fn vicinity_hz(mut self, vicinity_hz: u32) -> Self {
        self.vicinity_hz = vicinity_hz;
        self
    }

    /// Set the candidate spacing of the fallback search in Hz.
    pub fn step_hz(mut self, step_hz: u32) -> Self {
        self.step_hz = step_hz.max(1);
        self
    }

    pub fn build(self) -> Decoder {
        Decoder {
            top_k: self.top_k,
            vicinity_hz: self.vicinity_hz,
            step_hz: self.step_hz,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(frequency_hz: f64, power: f64) -> BinResult {
        BinResult {
            bin: 0,
            frequency_hz,
            real: 0.0,
            imag: 0.0,
            power,
        }
    }

    #[test]
    fn exact_pair_resolves() {
        let bins = [
            bin(697.0, 10.0),
            bin(1209.0, 9.0),
            bin(698.0, 5.0),
            bin(1208.0, 4.0),
            bin(1400.0, 1.0),
        ];
        assert_eq!(decode(&bins, ToneTable::standard()), Decision::Digit('1'));
    }

    #[test]
    fn offset_pair_resolves_in_vicinity() {
        let bins = [bin(692.5, 10.0), bin(1215.9, 9.0)];
        assert_eq!(decode(&bins, ToneTable::standard()), Decision::Digit('1'));
    }

    #[test]
    fn weak_bins_outside_top_k_are_ignored() {
        let bins = [
            bin(1500.0, 0.5),
            bin(855.0, 10.0),
            bin(1470.0, 9.0),
            bin(1474.0, 8.0),
            bin(850.0, 7.0),
            bin(300.0, 0.25),
        ];
        assert_eq!(decode(&bins, ToneTable::standard()), Decision::Digit('9'));
    }

    #[test]
    fn equal_power_prefers_lower_frequency() {
        let bins = [bin(1336.0, 1.0), bin(1209.0, 1.0), bin(697.0, 1.0)];
        let decoder = Decoder::builder().top_k(2).build();
        assert_eq!(decoder.decode(&bins, ToneTable::standard()), Decision::Digit('1'));
    }

    #[test]
    fn unresolved_pair_carries_estimate() {
        let bins = [bin(400.7, 5.0), bin(600.2, 4.0)];
        assert_eq!(
            decode(&bins, ToneTable::standard()),
            Decision::NoMatch {
                low_hz: 400,
                high_hz: 600,
            }
        );
    }

    #[test]
    fn empty_input_is_no_match() {
        assert_eq!(
            decode(&[], ToneTable::standard()),
            Decision::NoMatch {
                low_hz: 0,
                high_hz: 0,
            }
        );
    }

    #[test]
    fn search_order_decides_between_close_entries() {
        let table = ToneTable::new([
            ('y', TonePair::new(1000, 505)),
            ('x', TonePair::new(1000, 500)),
        ])
        .expect("table");
        // 505 is nearer to 503, but 500 is reached first by the ascending scan.
        let bins = [bin(503.0, 2.0), bin(1003.0, 1.0)];
        assert_eq!(decode(&bins, &table), Decision::Digit('x'));
    }

    #[test]
    fn vicinity_box_is_half_open() {
        let table = ToneTable::new([('x', TonePair::new(1000, 500))]).expect("table");
        // low - 10 is searched, low + 10 is not.
        assert_eq!(
            decode(&[bin(510.0, 2.0), bin(1000.0, 1.0)], &table),
            Decision::Digit('x')
        );
        assert_eq!(
            decode(&[bin(490.0, 2.0), bin(1000.0, 1.0)], &table),
            Decision::NoMatch {
                low_hz: 490,
                high_hz: 1000,
            }
        );
    }

    #[test]
    fn coarse_step_skips_candidates() {
        let bins = [bin(692.0, 2.0), bin(1215.0, 1.0)];
        let decoder = Decoder::builder().step_hz(5).build();
        // High candidates are 1205, 1210, 1215, 1220: 1209 is never tried.
        assert_eq!(
            decoder.decode(&bins, ToneTable::standard()),
            Decision::NoMatch {
                low_hz: 692,
                high_hz: 1215,
            }
        );
    }

    #[test]
    fn low_estimates_skip_negative_candidates() {
        let table = ToneTable::new([('x', TonePair::new(20, 0))]).expect("table");
        let bins = [bin(3.0, 2.0), bin(25.0, 1.0)];
        assert_eq!(decode(&bins, &table), Decision::Digit('x'));
    }

    #[test]
    fn nan_power_does_not_panic() {
        let bins = [bin(697.0, f64::NAN), bin(1209.0, 3.0), bin(700.0, 2.0)];
        assert_eq!(decode(&bins, ToneTable::standard()), Decision::Digit('1'));
    }

    #[test]
    fn builder_clamps_zero_settings() {
        let decoder = Decoder::builder().top_k(0).step_hz(0).vicinity_hz(3).build();
        assert_eq!(decoder.top_k(), 1);
        assert_eq!(decoder.step_hz(), 1);
        assert_eq!(decoder.vicinity_hz(), 3);

        let defaults = Decoder::default();
        assert_eq!(defaults.top_k(), DEFAULT_TOP_K);
        assert_eq!(defaults.vicinity_hz(), DEFAULT_VICINITY_HZ);
        assert_eq!(defaults.step_hz(), DEFAULT_STEP_HZ);
    }

    #[test]
    fn decision_display() {
        assert_eq!(Decision::Digit('#').to_string(), "#");
        assert_eq!(
            Decision::NoMatch {
                low_hz: 10,
                high_hz: 20,
            }
            .to_string(),
            "no match (10 Hz, 20 Hz)"
        );
        assert_eq!(Decision::Digit('7').digit(), Some('7'));
    }
}
