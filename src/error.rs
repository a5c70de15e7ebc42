//! Types for working with errors produced by frame-resolution.

use thiserror::Error;

use std::time::Duration;

/// Error type for building frame-rate parameters or an adjuster baseline.
///
/// Only construction paths return this. Once an adjuster exists,
/// `enable` and `disable` always complete.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    #[error("ResolutionError - NotPowerOfTwo: frames per day must be a nonzero power of two, got {0}")]
    NotPowerOfTwo(u32),
    #[error(
        "ResolutionError - InconsistentTimePerFrame: {frames_per_day} frames of {time_per_frame:?} do not add up to one day"
    )]
    InconsistentTimePerFrame {
        frames_per_day: u32,
        time_per_frame: Duration,
    },
    #[error("ResolutionError - BaselineAlreadyAdjusted: live clock already runs at the custom resolution")]
    BaselineAlreadyAdjusted,
}
