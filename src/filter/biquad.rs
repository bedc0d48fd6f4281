//! Direct form I biquad with low-pass, high-pass and band-pass designs.
//!
//! The designs are the usual bilinear-transformed analog prototypes
//! (normalized so that `a0 == 1`).

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::SAMPLE_RATE_F;

const TWO_PI: f32 = 2.0 * core::f32::consts::PI;
const LN_2: f32 = core::f32::consts::LN_2;

/// Q of a second order Butterworth response.
pub const BUTTERWORTH_Q: f32 = 0.7071;

pub const MIN_FREQUENCY: f32 = 1.0;
pub const MAX_FREQUENCY_RATIO: f32 = 0.49;

/// Band-pass bandwidth limits, in octaves.
pub const MIN_BANDWIDTH: f32 = 0.01;
pub const MAX_BANDWIDTH: f32 = 4.0;

/// Last design applied, so that a sample rate change can recompute it.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Design {
    Custom,
    LowPass { cutoff: f32 },
    HighPass { cutoff: f32 },
    BandPass { center: f32, bandwidth: f32 },
}

#[derive(Debug, Clone)]
pub struct Biquad {
    x1: f32,
    x2: f32,
    y1: f32,
    y2: f32,

    b0: f32,
    b1: f32,
    b2: f32,
    a1: f32,
    a2: f32,

    design: Design,
    sample_rate: f32,
}

impl Default for Biquad {
    /// Pass-through until a design is selected.
    fn default() -> Self {
        Self::with_sample_rate(SAMPLE_RATE_F)
    }
}

impl Biquad {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sample_rate(sample_rate: f32) -> Self {
        Self {
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            b0: 1.0,
            b1: 0.0,
            b2: 0.0,
            a1: 0.0,
            a2: 0.0,
            design: Design::Custom,
            sample_rate: sample_rate.max(1.0),
        }
    }

    pub fn low_pass(cutoff: f32, sample_rate: f32) -> Self {
        let mut filter = Self::with_sample_rate(sample_rate);
        filter.set_low_pass(cutoff);
        filter
    }

    pub fn high_pass(cutoff: f32, sample_rate: f32) -> Self {
        let mut filter = Self::with_sample_rate(sample_rate);
        filter.set_high_pass(cutoff);
        filter
    }

    pub fn band_pass(center: f32, bandwidth: f32, sample_rate: f32) -> Self {
        let mut filter = Self::with_sample_rate(sample_rate);
        filter.set_band_pass(center, bandwidth);
        filter
    }

    /// Raw coefficients, `a0` is assumed to be 1.
    pub fn set_coefficients(&mut self, b0: f32, b1: f32, b2: f32, a1: f32, a2: f32) {
        self.b0 = b0;
        self.b1 = b1;
        self.b2 = b2;
        self.a1 = a1;
        self.a2 = a2;
        self.design = Design::Custom;
    }

    /// `(b0, b1, b2, a1, a2)`
    pub fn coefficients(&self) -> (f32, f32, f32, f32, f32) {
        (self.b0, self.b1, self.b2, self.a1, self.a2)
    }

    /// Butterworth low-pass.
    pub fn set_low_pass(&mut self, cutoff: f32) {
        let cutoff = self.clamp_frequency(cutoff);
        let (sin_omega, cos_omega) = self.omega(cutoff).sin_cos();
        let alpha = sin_omega / (2.0 * BUTTERWORTH_Q);

        let a0 = 1.0 + alpha;
        self.b0 = (1.0 - cos_omega) / (2.0 * a0);
        self.b1 = (1.0 - cos_omega) / a0;
        self.b2 = (1.0 - cos_omega) / (2.0 * a0);
        self.a1 = (-2.0 * cos_omega) / a0;
        self.a2 = (1.0 - alpha) / a0;
        self.design = Design::LowPass { cutoff };
    }

    /// Butterworth high-pass.
    pub fn set_high_pass(&mut self, cutoff: f32) {
        let cutoff = self.clamp_frequency(cutoff);
        let (sin_omega, cos_omega) = self.omega(cutoff).sin_cos();
        let alpha = sin_omega / (2.0 * BUTTERWORTH_Q);

        let a0 = 1.0 + alpha;
        self.b0 = (1.0 + cos_omega) / (2.0 * a0);
        self.b1 = -(1.0 + cos_omega) / a0;
        self.b2 = (1.0 + cos_omega) / (2.0 * a0);
        self.a1 = (-2.0 * cos_omega) / a0;
        self.a2 = (1.0 - alpha) / a0;
        self.design = Design::HighPass { cutoff };
    }

    /// Constant 0 dB peak gain band-pass around `center` Hz, `bandwidth` in octaves.
    pub fn set_band_pass(&mut self, center: f32, bandwidth: f32) {
        let center = self.clamp_frequency(center);
        let bandwidth = if bandwidth.is_nan() {
            MIN_BANDWIDTH
        } else {
            bandwidth.clamp(MIN_BANDWIDTH, MAX_BANDWIDTH)
        };
        let omega = self.omega(center);
        let (sin_omega, cos_omega) = omega.sin_cos();
        let alpha = sin_omega * (LN_2 / 2.0 * bandwidth * omega / sin_omega).sinh();

        let a0 = 1.0 + alpha;
        self.b0 = alpha / a0;
        self.b1 = 0.0;
        self.b2 = -alpha / a0;
        self.a1 = (-2.0 * cos_omega) / a0;
        self.a2 = (1.0 - alpha) / a0;
        self.design = Design::BandPass { center, bandwidth };
    }

    /// Changes the sample rate and recomputes the current design. Raw
    /// coefficients set with [`set_coefficients`](Self::set_coefficients) are kept.
    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        match self.design {
            Design::Custom => {}
            Design::LowPass { cutoff } => self.set_low_pass(cutoff),
            Design::HighPass { cutoff } => self.set_high_pass(cutoff),
            Design::BandPass { center, bandwidth } => self.set_band_pass(center, bandwidth),
        }
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let output = self.b0 * input + self.b1 * self.x1 + self.b2 * self.x2
            - self.a1 * self.y1
            - self.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;

        output
    }

    #[inline]
    pub fn process_buffer(&mut self, in_out: &mut [f32]) {
        for sample in in_out.iter_mut() {
            *sample = self.process(*sample);
        }
    }

    pub fn reset(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }

    #[inline]
    fn omega(&self, frequency: f32) -> f32 {
        TWO_PI * frequency / self.sample_rate
    }

    #[inline]
    fn clamp_frequency(&self, frequency: f32) -> f32 {
        let max = (self.sample_rate * MAX_FREQUENCY_RATIO).max(MIN_FREQUENCY);
        if frequency.is_nan() {
            MIN_FREQUENCY
        } else {
            frequency.clamp(MIN_FREQUENCY, max)
        }
    }
}
