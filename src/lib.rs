//! Finer frames-per-day resolution for a day/night simulation clock.
//!
//! A host simulation advances its in-game clock in discrete frames, a fixed
//! number per day. This crate switches such a clock to a much finer
//! resolution ([`FrameRateParameters::CUSTOM`], 65536 frames per day) and
//! back again, without the apparent game time jumping in either direction.
//!
//! # Overview
//!
//! - [`ClockState`] mirrors the host's clock fields. The host owns it.
//! - [`TimeResolutionAdjuster`] captures the original resolution and offers
//!   `enable()` / `disable()`.
//! - [`rebase`] is the routine behind both: it keeps the frame counter,
//!   recomputes the tick offset and re-derives the day-time fields.
//! - [`ClockHandle`] shares a clock between threads behind a lock.
//!
//! # Example
//!
//! ```rust
//! use frame_resolution::{ClockState, FrameRateParameters, TimeResolutionAdjuster};
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 5, 12, 0, 0).unwrap();
//! let vanilla = FrameRateParameters::from_frames_per_day(1024).unwrap();
//! let mut clock = ClockState::new(now, 5000, vanilla);
//!
//! let adjuster = TimeResolutionAdjuster::capture(&clock).unwrap();
//! assert_eq!(adjuster.enable(&mut clock), now);
//! assert_eq!(clock.frames_per_day, 65536);
//! assert_eq!(clock.frame_time(5000), Some(now));
//!
//! adjuster.disable(&mut clock);
//! assert_eq!(clock.frames_per_day, 1024);
//! ```

#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![cfg_attr(feature = "fail-on-warnings", deny(clippy::all))]
#![forbid(unsafe_code)]

mod adjuster;
mod config;
pub mod error;
mod handle;
mod params;
mod rebase;
mod state;

pub use adjuster::*;
pub use config::*;
#[doc(inline)]
pub use error::*;
pub use handle::*;
pub use params::*;
pub use rebase::*;
pub use state::*;
