use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

fn forward(samples: &[f64]) -> Vec<Complex<f64>> {
    let mut buf: Vec<Complex<f64>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    if !buf.is_empty() {
        FftPlanner::<f64>::new()
            .plan_fft_forward(buf.len())
            .process(&mut buf);
    }
    buf
}

/// `|X[k]|` for every bin of the full, unscaled DFT.
pub fn magnitude_spectrum(samples: &[f64]) -> Vec<f64> {
    forward(samples).iter().map(|c| c.norm()).collect()
}

/// Zero every DFT component whose magnitude is below `threshold`, then
/// transform back and keep the real part.
///
/// Phase is preserved for the surviving components. The threshold is in the
/// same unscaled units as [`magnitude_spectrum`], so a sinusoid of amplitude
/// `A` over `N` samples shows up as `A * N / 2`.
pub fn spectral_gate(samples: &[f64], threshold: f64) -> Vec<f64> {
    let mut spectrum = forward(samples);
    if spectrum.is_empty() {
        return Vec::new();
    }
    let zero = Complex::new(0.0, 0.0);
    for c in spectrum.iter_mut().filter(|c| c.norm() < threshold) {
        *c = zero;
    }
    let n = spectrum.len();
    FftPlanner::<f64>::new().plan_fft_inverse(n).process(&mut spectrum);

    // rustfft's inverse is unscaled.
    let scale = 1.0 / n as f64;
    spectrum.iter().map(|c| c.re * scale).collect()
}
