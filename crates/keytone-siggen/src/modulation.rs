use std::f64::consts::TAU;

/// Parameters shared by the AM and FM generators.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Modulation {
    pub carrier_hz: f64,
    pub signal_hz: f64,
    pub carrier_amp: f64,
    pub signal_amp: f64,
    /// Modulation index `km`.
    pub depth: f64,
}

impl Default for Modulation {
    fn default() -> Self {
        Self {
            carrier_hz: 10.0,
            signal_hz: 2.0,
            carrier_amp: 1.0,
            signal_amp: 1.0,
            depth: 1.0,
        }
    }
}

/// Amplitude modulation: `Ac * (1 + km * As * cos(2π fs t)) * cos(2π fc t)`.
pub fn am(params: &Modulation, sample_rate_hz: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate_hz;
            let envelope = 1.0 + params.depth * params.signal_amp * (TAU * params.signal_hz * t).cos();
            params.carrier_amp * envelope * (TAU * params.carrier_hz * t).cos()
        })
        .collect()
}

/// Frequency modulation: `Ac * cos(2π fc t + As * km * cos(2π fs t))`.
pub fn fm(params: &Modulation, sample_rate_hz: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate_hz;
            let deviation = params.signal_amp * params.depth * (TAU * params.signal_hz * t).cos();
            params.carrier_amp * (TAU * params.carrier_hz * t + deviation).cos()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn am_peaks_at_full_envelope() {
        let params = Modulation {
            carrier_amp: 10.0,
            signal_amp: 2.0,
            depth: 0.5,
            ..Modulation::default()
        };
        let samples = am(&params, 1000.0, 4);
        // t = 0: both cosines are 1.
        assert!((samples[0] - 10.0 * (1.0 + 0.5 * 2.0)).abs() < 1e-12);
    }

    #[test]
    fn fm_keeps_constant_envelope() {
        let params = Modulation {
            carrier_hz: 100.0,
            signal_hz: 5.0,
            carrier_amp: 3.0,
            signal_amp: 1.0,
            depth: 2.0,
        };
        let samples = fm(&params, 8000.0, 1000);
        assert!(samples.iter().all(|s| s.abs() <= 3.0 + 1e-12));
        assert!((samples[0] - 3.0 * 2.0_f64.cos()).abs() < 1e-12);
    }

    #[test]
    fn zero_depth_am_is_plain_carrier() {
        let params = Modulation {
            carrier_hz: 50.0,
            depth: 0.0,
            ..Modulation::default()
        };
        let samples = am(&params, 1000.0, 40);
        for (n, s) in samples.iter().enumerate() {
            let expected = (TAU * 50.0 * n as f64 / 1000.0).cos();
            assert!((s - expected).abs() < 1e-12);
        }
    }
}
