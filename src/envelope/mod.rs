//! Linear envelope generators.
//!
//! Both envelopes are explicit state machines advanced once per sample by
//! `process`. Time parameters are floored at 1 ms and converted into per-sample
//! increments whenever a parameter or the sample rate changes.

pub mod adsr;
pub mod ar;

pub use adsr::{Adsr, AdsrStage};
pub use ar::{Ar, ArStage};

/// Shortest stage time in seconds.
pub const MIN_TIME: f32 = 0.001;

/// Distance from a stage target at which the stage counts as finished. Absorbs
/// the rounding error accumulated by summing increments in `f32`.
pub const LEVEL_EPSILON: f32 = 1.0e-4;

/// Per-sample increment covering `span` in `time` seconds.
#[inline]
pub(crate) fn increment(span: f32, time: f32, sample_rate: f32) -> f32 {
    span / (time * sample_rate)
}

#[inline]
pub(crate) fn sanitize_time(time: f32) -> f32 {
    if time.is_nan() {
        MIN_TIME
    } else {
        time.max(MIN_TIME)
    }
}

#[inline]
pub(crate) fn sanitize_sample_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate >= 1.0 {
        sample_rate
    } else {
        1.0
    }
}
