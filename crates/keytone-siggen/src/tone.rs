use std::f64::consts::TAU;

/// Number of samples covering `duration_s` at `sample_rate_hz`, at least one.
pub fn samples_for(duration_s: f64, sample_rate_hz: f64) -> usize {
    let len = (duration_s * sample_rate_hz).round() as usize;
    len.max(1)
}

/// A sine at `freq_hz`. Sample `n` is taken at `n / sample_rate_hz` seconds.
pub fn tone(freq_hz: f64, amplitude: f64, sample_rate_hz: f64, len: usize) -> Vec<f64> {
    (0..len)
        .map(|n| amplitude * (TAU * freq_hz * n as f64 / sample_rate_hz).sin())
        .collect()
}

/// Sum of two equal-amplitude sines, as sent for one DTMF key.
pub fn two_tone(
    low_hz: f64,
    high_hz: f64,
    amplitude: f64,
    sample_rate_hz: f64,
    len: usize,
) -> Vec<f64> {
    (0..len)
        .map(|n| {
            let t = n as f64 / sample_rate_hz;
            amplitude * ((TAU * low_hz * t).sin() + (TAU * high_hz * t).sin())
        })
        .collect()
}
