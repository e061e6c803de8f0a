/// Errors returned by [`estimate`](crate::estimate).
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EstimateError {
    /// A range's upper bound needs a bin the window cannot resolve.
    #[error(
        "frequency {frequency_hz} Hz reaches bin {bin}, beyond the last usable bin {max_bin}"
    )]
    OutOfRangeFrequency {
        frequency_hz: f64,
        bin: f64,
        max_bin: usize,
    },
}
