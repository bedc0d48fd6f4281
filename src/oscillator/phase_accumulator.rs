//! Normalized phase counter.
//!
//! Phase and increment are kept in `f64` so that a note held for hours does
//! not drift audibly, while callers only ever see `f32`.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::SAMPLE_RATE_F;

/// Highest frequency accepted, as a fraction of the sample rate.
pub const MAX_NORMALIZED_FREQUENCY: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseAccumulator {
    phase: f64,
    increment: f64,
    sample_rate: f32,
    // Requested frequency before the Nyquist clamp.
    frequency: f32,
}

impl Default for PhaseAccumulator {
    fn default() -> Self {
        Self::new(SAMPLE_RATE_F)
    }
}

impl PhaseAccumulator {
    pub fn new(sample_rate: f32) -> Self {
        Self {
            phase: 0.0,
            increment: 0.0,
            sample_rate: sanitize_sample_rate(sample_rate),
            frequency: 0.0,
        }
    }

    /// Sets the per-sample increment to `frequency / sample_rate`.
    ///
    /// Negative or NaN frequencies stop the phase; anything above Nyquist is
    /// clamped to Nyquist.
    #[inline]
    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency;
        let increment = f64::from(frequency) / f64::from(self.sample_rate);
        self.increment = if increment.is_nan() {
            0.0
        } else {
            increment.clamp(0.0, MAX_NORMALIZED_FREQUENCY)
        };
    }

    /// Frequency in Hz actually played, after the Nyquist clamp.
    #[inline]
    pub fn frequency(&self) -> f32 {
        (self.increment * f64::from(self.sample_rate)) as f32
    }

    /// Changes the sample rate. The increment is recomputed from the last
    /// requested frequency, so a pitch clamped at the old rate is restored
    /// when the new rate allows it.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sanitize_sample_rate(sample_rate);
        self.set_frequency(self.frequency);
    }

    #[inline]
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    #[inline]
    pub fn increment(&self) -> f64 {
        self.increment
    }

    /// Advances by one sample and returns the new phase in 0.0..1.0.
    #[inline]
    pub fn tick(&mut self) -> f32 {
        self.phase += self.increment;
        if self.phase >= 1.0 {
            self.phase -= 1.0;
        }
        self.phase()
    }

    /// Current phase without advancing.
    #[inline]
    pub fn phase(&self) -> f32 {
        // A phase just below 1.0 rounds up to 1.0 in f32.
        let phase = self.phase as f32;
        if phase < 1.0 {
            phase
        } else {
            0.0
        }
    }

    /// Sets the phase, wrapping any finite value into 0.0..1.0.
    pub fn set_phase(&mut self, phase: f32) {
        let phase = f64::from(phase);
        let wrapped = phase - phase.floor();
        self.phase = if wrapped.is_finite() && wrapped < 1.0 {
            wrapped
        } else {
            0.0
        };
    }

    /// Zeroes the phase. The frequency is kept.
    #[inline]
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }
}

#[inline]
fn sanitize_sample_rate(sample_rate: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate >= 1.0 {
        sample_rate
    } else {
        1.0
    }
}
