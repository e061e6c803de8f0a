use rustfft::num_complex::Complex;
use rustfft::FftPlanner;

/// Linear convolution of `a` with `b`, trimmed to `a.len()` samples centered
/// on the full result.
///
/// The full result has `a.len() + b.len() - 1` samples; the kept window starts
/// at `(b.len() - 1) / 2`.
pub fn convolve_same(a: &[f64], b: &[f64]) -> Vec<f64> {
    let offset = b.len().saturating_sub(1) / 2;
    (0..a.len())
        .map(|n| {
            let i = n + offset;
            a.iter()
                .enumerate()
                .take(i + 1)
                .filter_map(|(j, &x)| b.get(i - j).map(|&y| x * y))
                .sum::<f64>()
        })
        .collect()
}

/// Circular convolution over `max(a.len(), b.len())` points, computed through
/// the FFT. The shorter input is zero-padded.
pub fn circular_convolve(a: &[f64], b: &[f64]) -> Vec<f64> {
    let n = a.len().max(b.len());
    if n == 0 {
        return Vec::new();
    }
    let padded = |x: &[f64]| -> Vec<Complex<f64>> {
        let mut buf: Vec<Complex<f64>> = x.iter().map(|&v| Complex::new(v, 0.0)).collect();
        buf.resize(n, Complex::new(0.0, 0.0));
        buf
    };
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(n);
    let ifft = planner.plan_fft_inverse(n);

    let mut fa = padded(a);
    let mut fb = padded(b);
    fft.process(&mut fa);
    fft.process(&mut fb);
    for (x, y) in fa.iter_mut().zip(&fb) {
        *x *= y;
    }
    ifft.process(&mut fa);

    // rustfft's inverse is unscaled.
    let scale = 1.0 / n as f64;
    fa.iter().map(|c| c.re * scale).collect()
}

/// Correlation of `a` against `b` rotated by each lag.
///
/// Entry `i` is `sum(a[n] * b[(n - i) mod b.len()])` over the samples both
/// inputs share, for lags `0 .. (a.len() + b.len()) / 2`.
pub fn correlation_sums(a: &[f64], b: &[f64]) -> Vec<f64> {
    let lags = (a.len() + b.len()) / 2;
    if b.is_empty() {
        return vec![0.0; lags];
    }
    let m = b.len();
    (0..lags)
        .map(|i| {
            let shift = i % m;
            a.iter()
                .zip(0..m)
                .map(|(&x, n)| x * b[(n + m - shift) % m])
                .sum::<f64>()
        })
        .collect()
}

/// Divide `values` by the sum of `reference`, leaving them untouched when
/// that sum is zero.
pub fn normalize_by_area(values: &mut [f64], reference: &[f64]) {
    let area: f64 = reference.iter().sum();
    if area != 0.0 {
        for v in values {
            *v /= area;
        }
    }
}
