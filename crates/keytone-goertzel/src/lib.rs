//! Sparse DFT bin estimation with the Goertzel recurrence.
//!
//! Only the bins that fall inside the requested frequency ranges are computed,
//! so the cost is proportional to the number of selected bins times the window
//! length rather than to a full transform.

pub mod error;
pub mod estimate;
pub mod window;

pub use error::EstimateError;
pub use estimate::{estimate, select_bins, BinCoefficients};
pub use window::{BinResult, FrequencyRange, SampleWindow};
