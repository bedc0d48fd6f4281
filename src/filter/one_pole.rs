//! First-order low-pass with a complementary high-pass output.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::SAMPLE_RATE_F;
use crate::filter::FilterMode;

const TWO_PI: f32 = 2.0 * core::f32::consts::PI;

/// Lowest cutoff in Hz.
pub const MIN_CUTOFF: f32 = 1.0;

/// Highest cutoff as a fraction of the sample rate.
pub const MAX_CUTOFF_RATIO: f32 = 0.49;

/// Both responses of a single update. `low_pass + high_pass == input`.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct OnePoleOutputs {
    pub low_pass: f32,
    pub high_pass: f32,
}

#[derive(Debug, Clone)]
pub struct OnePole {
    alpha: f32,
    state: f32,
    cutoff: f32,
    sample_rate: f32,
}

impl Default for OnePole {
    fn default() -> Self {
        Self::with_cutoff(1000.0, SAMPLE_RATE_F)
    }
}

impl OnePole {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cutoff(cutoff: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            alpha: 1.0,
            state: 0.0,
            cutoff,
            sample_rate: sample_rate.max(1.0),
        };
        filter.set_cutoff(cutoff);
        filter
    }

    /// Cutoff in Hz, clamped to `1 Hz ..= 0.49 * sample_rate`.
    pub fn set_cutoff(&mut self, cutoff: f32) {
        let max = self.sample_rate * MAX_CUTOFF_RATIO;
        self.cutoff = if cutoff.is_nan() {
            MIN_CUTOFF
        } else {
            cutoff.clamp(MIN_CUTOFF, max.max(MIN_CUTOFF))
        };
        self.update_coefficient();
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.set_cutoff(self.cutoff);
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    /// Smoothing coefficient `1 - exp(-2π·cutoff/sample_rate)`.
    #[inline]
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> OnePoleOutputs {
        self.state = self.alpha * input + (1.0 - self.alpha) * self.state;
        OnePoleOutputs {
            low_pass: self.state,
            high_pass: input - self.state,
        }
    }

    #[inline]
    pub fn process_low_pass(&mut self, input: f32) -> f32 {
        self.process(input).low_pass
    }

    #[inline]
    pub fn process_high_pass(&mut self, input: f32) -> f32 {
        self.process(input).high_pass
    }

    /// Filters a block in place. A single pole has no band-pass or notch
    /// response; those modes output silence.
    #[inline]
    pub fn process_buffer(&mut self, in_out: &mut [f32], mode: FilterMode) {
        for sample in in_out.iter_mut() {
            let outputs = self.process(*sample);
            *sample = match mode {
                FilterMode::LowPass => outputs.low_pass,
                FilterMode::HighPass => outputs.high_pass,
                _ => 0.0,
            };
        }
    }

    pub fn reset(&mut self) {
        self.state = 0.0;
    }

    fn update_coefficient(&mut self) {
        let omega = TWO_PI * self.cutoff / self.sample_rate;
        self.alpha = 1.0 - (-omega).exp();
    }
}
