use chrono::{DateTime, Utc};

use crate::{
    config::ResolutionConfig, error::ResolutionError, params::FrameRateParameters,
    rebase::rebase, state::ClockState,
};

/// Switches a host clock between its original resolution and
/// [`FrameRateParameters::CUSTOM`], keeping the apparent time fixed.
///
/// The baseline is fixed at construction. The adjuster holds no other
/// state, so `enable` and `disable` can be called any number of times.
#[derive(Debug, Clone)]
pub struct TimeResolutionAdjuster {
    vanilla: FrameRateParameters,
    warn_on_reentry: bool,
}

impl TimeResolutionAdjuster {
    /// Create an adjuster restoring `vanilla` on `disable`.
    pub fn new(vanilla: FrameRateParameters) -> Self {
        Self {
            vanilla,
            warn_on_reentry: true,
        }
    }

    /// Capture the live resolution of `clock` as the baseline.
    ///
    /// Fails if the clock already runs at the custom resolution, since that
    /// baseline could never be restored.
    pub fn capture(clock: &ClockState) -> Result<Self, ResolutionError> {
        if clock.is_custom_resolution() {
            return Err(ResolutionError::BaselineAlreadyAdjusted);
        }
        Ok(Self::new(clock.live_parameters()?))
    }

    pub fn init(config: ResolutionConfig, clock: &ClockState) -> Result<Self, ResolutionError> {
        let mut adjuster = match config.vanilla {
            Some(vanilla) if vanilla == FrameRateParameters::CUSTOM => {
                return Err(ResolutionError::BaselineAlreadyAdjusted);
            }
            Some(vanilla) => Self::new(vanilla),
            None => Self::capture(clock)?,
        };
        adjuster.warn_on_reentry = config.warn_on_reentry;
        Ok(adjuster)
    }

    pub fn vanilla(&self) -> FrameRateParameters {
        self.vanilla
    }

    pub fn custom(&self) -> FrameRateParameters {
        FrameRateParameters::CUSTOM
    }

    /// Check if `clock` currently runs at the custom resolution.
    pub fn is_active(&self, clock: &ClockState) -> bool {
        clock.is_custom_resolution()
    }

    /// Switch `clock` to the custom resolution.
    ///
    /// Returns the apparent game time, which is the same before and after.
    /// Calling this while already enabled is logged and otherwise harmless.
    #[cfg_attr(
        feature = "instrument",
        tracing::instrument(
            name = "frame_resolution.enable",
            skip_all,
            fields(frame_index = clock.current_frame_index)
        )
    )]
    pub fn enable(&self, clock: &mut ClockState) -> DateTime<Utc> {
        if self.warn_on_reentry && self.is_active(clock) {
            tracing::warn!(
                frames_per_day = clock.frames_per_day,
                "custom time resolution already active, missing disable?"
            );
        }
        rebase(clock, &FrameRateParameters::CUSTOM)
    }

    /// Restore the captured baseline resolution on `clock`.
    #[cfg_attr(
        feature = "instrument",
        tracing::instrument(
            name = "frame_resolution.disable",
            skip_all,
            fields(frame_index = clock.current_frame_index)
        )
    )]
    pub fn disable(&self, clock: &mut ClockState) {
        rebase(clock, &self.vanilla);
    }
}
