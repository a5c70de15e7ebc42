use serde::{Deserialize, Serialize};
use serde_with::serde_as;

use std::{fmt, time::Duration};

use crate::{error::ResolutionError, state::duration_ticks};

/// Length of one in-game day in ticks (nanoseconds).
pub const TICKS_PER_DAY: i64 = 86_400_000_000_000;

/// Frames per day of the fine resolution applied by `enable`.
pub const CUSTOM_FRAMES_PER_DAY: u32 = 1 << 16;

/// A validated frames-per-day resolution.
///
/// `frames_per_day` is always a nonzero power of two, so `frame_mask()` can be
/// used for wraparound, and `time_per_frame * frames_per_day` is one day to
/// within less than one nanosecond per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "FrameRateRepr", into = "FrameRateRepr")]
pub struct FrameRateParameters {
    frames_per_day: u32,
    time_per_frame: Duration,
}

impl FrameRateParameters {
    /// 65536 frames per day, 1.318359375 seconds per frame.
    pub const CUSTOM: Self = Self {
        frames_per_day: CUSTOM_FRAMES_PER_DAY,
        time_per_frame: Duration::from_nanos(TICKS_PER_DAY as u64 / CUSTOM_FRAMES_PER_DAY as u64),
    };

    /// Validate a resolution as reported by the host.
    pub fn new(frames_per_day: u32, time_per_frame: Duration) -> Result<Self, ResolutionError> {
        if !frames_per_day.is_power_of_two() {
            return Err(ResolutionError::NotPowerOfTwo(frames_per_day));
        }
        let day = time_per_frame.as_nanos() * u128::from(frames_per_day);
        if day.abs_diff(TICKS_PER_DAY as u128) >= u128::from(frames_per_day) {
            return Err(ResolutionError::InconsistentTimePerFrame {
                frames_per_day,
                time_per_frame,
            });
        }
        Ok(Self {
            frames_per_day,
            time_per_frame,
        })
    }

    /// Derive the resolution that splits one day into `frames_per_day` frames.
    pub fn from_frames_per_day(frames_per_day: u32) -> Result<Self, ResolutionError> {
        if !frames_per_day.is_power_of_two() {
            return Err(ResolutionError::NotPowerOfTwo(frames_per_day));
        }
        Ok(Self {
            frames_per_day,
            time_per_frame: Duration::from_nanos(TICKS_PER_DAY as u64 / u64::from(frames_per_day)),
        })
    }

    pub fn frames_per_day(&self) -> u32 {
        self.frames_per_day
    }

    pub fn time_per_frame(&self) -> Duration {
        self.time_per_frame
    }

    /// Length of one frame in ticks.
    pub fn time_per_frame_ticks(&self) -> i128 {
        duration_ticks(self.time_per_frame)
    }

    /// Mask reducing a frame counter modulo `frames_per_day`.
    pub fn frame_mask(&self) -> u32 {
        self.frames_per_day - 1
    }

    pub fn frame_to_hour(&self) -> f32 {
        24.0 / self.frames_per_day as f32
    }

    pub fn hour_to_frame(&self) -> f32 {
        self.frames_per_day as f32 / 24.0
    }
}

impl fmt::Display for FrameRateParameters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} frames/day ({:?}/frame)",
            self.frames_per_day, self.time_per_frame
        )
    }
}

#[serde_as]
#[derive(Clone, Serialize, Deserialize)]
struct FrameRateRepr {
    frames_per_day: u32,
    #[serde_as(as = "serde_with::DurationNanoSeconds<u64>")]
    time_per_frame_ns: Duration,
}

impl TryFrom<FrameRateRepr> for FrameRateParameters {
    type Error = ResolutionError;

    fn try_from(repr: FrameRateRepr) -> Result<Self, Self::Error> {
        Self::new(repr.frames_per_day, repr.time_per_frame_ns)
    }
}

impl From<FrameRateParameters> for FrameRateRepr {
    fn from(params: FrameRateParameters) -> Self {
        Self {
            frames_per_day: params.frames_per_day,
            time_per_frame_ns: params.time_per_frame,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_custom_divides_day_exactly() {
        let custom = FrameRateParameters::CUSTOM;
        assert_eq!(custom.frames_per_day(), 65536);
        assert_eq!(custom.time_per_frame(), Duration::from_nanos(1_318_359_375));
        assert_eq!(
            custom.time_per_frame_ticks() * i128::from(custom.frames_per_day()),
            i128::from(TICKS_PER_DAY)
        );
        assert_eq!(FrameRateParameters::from_frames_per_day(65536), Ok(custom));
    }

    #[test]
    fn test_rejects_non_power_of_two() {
        assert_eq!(
            FrameRateParameters::from_frames_per_day(0),
            Err(ResolutionError::NotPowerOfTwo(0))
        );
        assert_eq!(
            FrameRateParameters::new(1000, Duration::from_millis(86_400)),
            Err(ResolutionError::NotPowerOfTwo(1000))
        );
    }

    #[test]
    fn test_rejects_time_per_frame_that_misses_a_day() {
        let err = FrameRateParameters::new(1024, Duration::from_secs(84)).unwrap_err();
        assert!(matches!(
            err,
            ResolutionError::InconsistentTimePerFrame {
                frames_per_day: 1024,
                ..
            }
        ));
    }

    #[test]
    fn test_accepts_truncated_time_per_frame() {
        // 24h / 2^20 is not a whole number of nanoseconds
        let params = FrameRateParameters::from_frames_per_day(1 << 20).unwrap();
        assert_eq!(params.time_per_frame(), Duration::from_nanos(82_397_460));
        assert_eq!(
            FrameRateParameters::new(1 << 20, params.time_per_frame()),
            Ok(params)
        );
    }

    #[test]
    fn test_conversion_constants() {
        let params = FrameRateParameters::from_frames_per_day(1024).unwrap();
        assert_eq!(params.frame_mask(), 1023);
        assert_eq!(params.frame_to_hour(), 24.0 / 1024.0);
        assert_eq!(params.hour_to_frame(), 1024.0 / 24.0);
    }

    #[test]
    fn test_deserialize_validates() {
        let params: FrameRateParameters =
            serde_json::from_str(r#"{"frames_per_day":1024,"time_per_frame_ns":84375000000}"#)
                .unwrap();
        assert_eq!(params.frames_per_day(), 1024);

        let err = serde_json::from_str::<FrameRateParameters>(
            r#"{"frames_per_day":1000,"time_per_frame_ns":86400000000}"#,
        );
        assert!(err.is_err());
    }
}
