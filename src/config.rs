use serde::{Deserialize, Serialize};

use crate::params::FrameRateParameters;

/// Configuration of a [`TimeResolutionAdjuster`](crate::TimeResolutionAdjuster).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResolutionConfig {
    /// Resolution to restore on `disable`.
    /// When absent the baseline is captured from the live clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vanilla: Option<FrameRateParameters>,
    /// Warn when `enable` finds the custom resolution already active.
    #[serde(default = "default_warn_on_reentry")]
    pub warn_on_reentry: bool,
}

fn default_warn_on_reentry() -> bool {
    true
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            vanilla: None,
            warn_on_reentry: default_warn_on_reentry(),
        }
    }
}
