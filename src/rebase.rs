use chrono::{DateTime, Utc};

use crate::{
    params::FrameRateParameters,
    state::{ClockState, day_time_hour, ticks_of},
};

/// Switch `clock` to `params` without moving its apparent time.
///
/// The frame counter is left alone. Only the tick offset is recomputed, so
/// that `time_offset_ticks + current_frame_index * time_per_frame` still
/// lands exactly on `current_game_time` under the new frame length. The
/// day-time fields are then derived again at the new granularity.
///
/// Returns `current_game_time`, which is unchanged.
pub fn rebase(clock: &mut ClockState, params: &FrameRateParameters) -> DateTime<Utc> {
    let frames_per_day = params.frames_per_day();
    clock.frames_per_day = frames_per_day;
    clock.time_per_frame = params.time_per_frame();
    clock.frame_to_hour = params.frame_to_hour();
    clock.hour_to_frame = params.hour_to_frame();

    // u32 frames times at most one day per frame stays far inside i128
    let frame_ticks = i128::from(clock.current_frame_index) * params.time_per_frame_ticks();
    clock.time_offset_ticks = ticks_of(clock.current_game_time) - frame_ticks;

    clock.current_day_time_hour = day_time_hour(clock.current_game_time);
    clock.day_time_frame = (frames_per_day as f32 * clock.current_day_time_hour / 24.0) as u32;
    // u32 wraparound then mask is the two's-complement modulo the host expects
    clock.day_time_offset_frames = clock
        .day_time_frame
        .wrapping_sub(clock.current_frame_index)
        & params.frame_mask();

    tracing::debug!(
        frames_per_day,
        time_offset_ticks = clock.time_offset_ticks,
        day_time_frame = clock.day_time_frame,
        "clock re-based"
    );

    clock.current_game_time
}
