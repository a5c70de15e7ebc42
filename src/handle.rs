use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use std::sync::Arc;

use crate::{
    adjuster::TimeResolutionAdjuster, config::ResolutionConfig, error::ResolutionError,
    state::ClockState,
};

/// A shared handle to a host clock.
///
/// Cheap to clone; all clones see the same [`ClockState`]. Every operation
/// holds the lock for its whole duration, so a frame tick running on another
/// thread never observes a half re-based clock.
///
/// ```rust
/// use frame_resolution::{ClockHandle, ClockState, FrameRateParameters, ResolutionConfig};
/// use chrono::{TimeZone, Utc};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
/// let vanilla = FrameRateParameters::from_frames_per_day(1024).unwrap();
/// let clock = ClockHandle::new(ClockState::new(start, 5000, vanilla));
///
/// let adjuster = clock.init_adjuster(ResolutionConfig::default()).unwrap();
/// assert_eq!(clock.enable(&adjuster), start);
/// clock.disable(&adjuster);
/// assert_eq!(clock.now(), start);
/// ```
#[derive(Clone)]
pub struct ClockHandle {
    inner: Arc<Mutex<ClockState>>,
}

impl ClockHandle {
    pub fn new(state: ClockState) -> Self {
        Self {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    /// Current apparent game time.
    pub fn now(&self) -> DateTime<Utc> {
        self.inner.lock().current_game_time
    }

    /// Copy of the full clock state.
    pub fn snapshot(&self) -> ClockState {
        self.inner.lock().clone()
    }

    /// Run `f` with exclusive access to the clock, e.g. to advance a frame.
    pub fn with_state<R>(&self, f: impl FnOnce(&mut ClockState) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Build an adjuster whose baseline comes from `config` or the live clock.
    pub fn init_adjuster(
        &self,
        config: ResolutionConfig,
    ) -> Result<TimeResolutionAdjuster, ResolutionError> {
        TimeResolutionAdjuster::init(config, &self.inner.lock())
    }

    pub fn enable(&self, adjuster: &TimeResolutionAdjuster) -> DateTime<Utc> {
        adjuster.enable(&mut self.inner.lock())
    }

    pub fn disable(&self, adjuster: &TimeResolutionAdjuster) {
        adjuster.disable(&mut self.inner.lock())
    }
}

impl std::fmt::Debug for ClockHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("ClockHandle")
            .field("now", &state.current_game_time)
            .field("frames_per_day", &state.frames_per_day)
            .finish()
    }
}
