use chrono::{DateTime, Timelike, Utc};

use std::time::Duration;

use crate::{error::ResolutionError, params::FrameRateParameters, rebase::rebase};

const NANOS_PER_SECOND: i64 = 1_000_000_000;

/// Convert a date-time into ticks (nanoseconds since the Unix epoch).
///
/// Ticks are `i128`, so every date chrono can represent (including the
/// host's years 1 to 9999) converts without loss.
pub fn ticks_of(time: DateTime<Utc>) -> i128 {
    i128::from(time.timestamp()) * i128::from(NANOS_PER_SECOND)
        + i128::from(time.timestamp_subsec_nanos())
}

/// Convert ticks back into a date-time.
///
/// Returns `None` outside the range chrono can represent.
pub fn from_ticks(ticks: i128) -> Option<DateTime<Utc>> {
    let nanos = i128::from(NANOS_PER_SECOND);
    let seconds = i64::try_from(ticks.div_euclid(nanos)).ok()?;
    // rem_euclid keeps this in [0, 1e9)
    let subsec = ticks.rem_euclid(nanos) as u32;
    DateTime::from_timestamp(seconds, subsec)
}

/// Length of `duration` in ticks.
pub fn duration_ticks(duration: Duration) -> i128 {
    i128::from(duration.as_secs()) * i128::from(NANOS_PER_SECOND)
        + i128::from(duration.subsec_nanos())
}

/// Hours elapsed since midnight of `time`, in `[0, 24)`.
pub(crate) fn day_time_hour(time: DateTime<Utc>) -> f32 {
    let seconds = f64::from(time.num_seconds_from_midnight())
        + f64::from(time.nanosecond()) / NANOS_PER_SECOND as f64;
    let hour = (seconds / 3600.0) as f32;
    // the last nanoseconds of a day round up to 24.0 in f32
    if hour >= 24.0 {
        f32::from_bits(24.0f32.to_bits() - 1)
    } else {
        hour
    }
}

/// The host's day/night clock.
///
/// The host owns this and advances it every frame. The adjuster only
/// rewrites the resolution-dependent fields; `current_game_time` and
/// `current_frame_index` are never touched.
#[derive(Debug, Clone, PartialEq)]
pub struct ClockState {
    /// Authoritative in-game date-time.
    pub current_game_time: DateTime<Utc>,
    /// Frames since simulation start.
    pub current_frame_index: u32,
    /// Offset such that `time_offset_ticks + current_frame_index * time_per_frame`
    /// reconstructs `current_game_time`.
    pub time_offset_ticks: i128,
    pub current_day_time_hour: f32,
    pub day_time_frame: u32,
    pub day_time_offset_frames: u32,
    pub frames_per_day: u32,
    pub frame_to_hour: f32,
    pub hour_to_frame: f32,
    pub time_per_frame: Duration,
}

impl ClockState {
    /// Build a consistent clock running at `params`.
    pub fn new(
        current_game_time: DateTime<Utc>,
        current_frame_index: u32,
        params: FrameRateParameters,
    ) -> Self {
        let mut clock = Self {
            current_game_time,
            current_frame_index,
            time_offset_ticks: 0,
            current_day_time_hour: 0.0,
            day_time_frame: 0,
            day_time_offset_frames: 0,
            frames_per_day: 0,
            frame_to_hour: 0.0,
            hour_to_frame: 0.0,
            time_per_frame: Duration::ZERO,
        };
        rebase(&mut clock, &params);
        clock
    }

    /// The resolution the clock is currently running at.
    pub fn live_parameters(&self) -> Result<FrameRateParameters, ResolutionError> {
        FrameRateParameters::new(self.frames_per_day, self.time_per_frame)
    }

    /// Check if the clock already runs at the custom resolution.
    pub fn is_custom_resolution(&self) -> bool {
        self.time_per_frame == FrameRateParameters::CUSTOM.time_per_frame()
    }

    /// Reconstruct the game time of `frame_index` from the current offset.
    ///
    /// Returns `None` if that frame lies outside the range chrono can represent.
    pub fn frame_time(&self, frame_index: u32) -> Option<DateTime<Utc>> {
        let frame_ticks = i128::from(frame_index) * duration_ticks(self.time_per_frame);
        from_ticks(self.time_offset_ticks + frame_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_ticks_round_trip_sub_second() {
        let time = Utc.with_ymd_and_hms(2024, 3, 9, 7, 15, 0).unwrap()
            + chrono::Duration::nanoseconds(123_456_789);
        assert_eq!(
            ticks_of(time),
            i128::from(time.timestamp_nanos_opt().unwrap())
        );
        assert_eq!(from_ticks(ticks_of(time)), Some(time));
    }

    #[test]
    fn test_ticks_round_trip_beyond_i64_nanos() {
        // i64 nanoseconds only cover 1677-09-21 to 2262-04-11
        for time in [
            Utc.with_ymd_and_hms(1, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(1677, 9, 21, 0, 12, 43).unwrap(),
            Utc.with_ymd_and_hms(2262, 4, 11, 23, 47, 17).unwrap(),
            Utc.with_ymd_and_hms(2300, 1, 5, 12, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(9999, 12, 31, 23, 59, 59).unwrap()
                + chrono::Duration::nanoseconds(999_999_999),
        ] {
            assert_eq!(from_ticks(ticks_of(time)), Some(time));
        }
    }

    #[test]
    fn test_from_ticks_out_of_range() {
        assert_eq!(from_ticks(i128::MAX), None);
        assert_eq!(from_ticks(i128::MIN), None);
    }

    #[test]
    fn test_duration_ticks() {
        assert_eq!(duration_ticks(Duration::from_nanos(1_318_359_375)), 1_318_359_375);
        assert_eq!(duration_ticks(Duration::MAX), i128::from(u64::MAX) * 1_000_000_000 + 999_999_999);
    }

    #[test]
    fn test_day_time_hour() {
        let noon = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        assert_eq!(day_time_hour(noon), 12.0);

        let quarter_past_six = Utc.with_ymd_and_hms(2024, 1, 5, 6, 15, 0).unwrap();
        assert_eq!(day_time_hour(quarter_past_six), 6.25);

        let midnight = Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap();
        assert_eq!(day_time_hour(midnight), 0.0);
    }

    #[test]
    fn test_day_time_hour_stays_below_24() {
        let almost_midnight = Utc.with_ymd_and_hms(2024, 1, 5, 23, 59, 59).unwrap()
            + chrono::Duration::nanoseconds(999_999_999);
        let hour = day_time_hour(almost_midnight);
        assert!(hour < 24.0);
        assert!(hour > 23.99);
    }

    #[test]
    fn test_new_is_consistent() {
        let params = FrameRateParameters::from_frames_per_day(1024).unwrap();
        let time = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
        let clock = ClockState::new(time, 5000, params);

        assert_eq!(clock.live_parameters(), Ok(params));
        assert_eq!(clock.frame_time(5000), Some(time));
        assert_eq!(
            clock.frame_time(5001),
            Some(time + chrono::Duration::nanoseconds(84_375_000_000))
        );
        assert!(!clock.is_custom_resolution());
    }
}
