//! Chamberlin state-variable filter.
//!
//! One update produces low-pass, high-pass, band-pass and notch outputs at the
//! same time. The tuning coefficient is limited to 1.9 and the damping to
//! `0.01 ..= 2`. Very high cutoffs combined with very low resonance can still
//! leave the stable region of the recursion.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::SAMPLE_RATE_F;
use crate::filter::FilterMode;
use crate::utils::flush_denormal;

const PI: f32 = core::f32::consts::PI;

pub const MIN_CUTOFF: f32 = 1.0;
pub const MAX_CUTOFF_RATIO: f32 = 0.45;

pub const MIN_RESONANCE: f32 = 0.1;
pub const MAX_RESONANCE: f32 = 10.0;

const MAX_F: f32 = 1.9;
const MIN_Q: f32 = 0.01;
const MAX_Q: f32 = 2.0;

#[derive(Debug, Clone)]
pub struct Svf {
    low: f32,
    band: f32,
    high: f32,

    f: f32,
    q: f32,

    cutoff: f32,
    resonance: f32,
    sample_rate: f32,
}

impl Default for Svf {
    fn default() -> Self {
        Self::with_params(1000.0, 0.7, SAMPLE_RATE_F)
    }
}

impl Svf {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_params(cutoff: f32, resonance: f32, sample_rate: f32) -> Self {
        let mut filter = Self {
            low: 0.0,
            band: 0.0,
            high: 0.0,
            f: 0.0,
            q: 1.0,
            cutoff,
            resonance,
            sample_rate: sample_rate.max(1.0),
        };
        filter.set_params(cutoff, resonance);
        filter
    }

    /// Cutoff is clamped to `1 Hz ..= 0.45 * sample_rate`, resonance to `0.1 ..= 10`.
    pub fn set_params(&mut self, cutoff: f32, resonance: f32) {
        let max_cutoff = (self.sample_rate * MAX_CUTOFF_RATIO).max(MIN_CUTOFF);
        self.cutoff = if cutoff.is_nan() {
            MIN_CUTOFF
        } else {
            cutoff.clamp(MIN_CUTOFF, max_cutoff)
        };
        self.resonance = if resonance.is_nan() {
            MIN_RESONANCE
        } else {
            resonance.clamp(MIN_RESONANCE, MAX_RESONANCE)
        };
        self.update_coefficients();
    }

    #[inline]
    pub fn set_cutoff(&mut self, cutoff: f32) {
        self.set_params(cutoff, self.resonance);
    }

    #[inline]
    pub fn set_resonance(&mut self, resonance: f32) {
        self.set_params(self.cutoff, resonance);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate.max(1.0);
        self.set_params(self.cutoff, self.resonance);
    }

    #[inline]
    pub fn cutoff(&self) -> f32 {
        self.cutoff
    }

    #[inline]
    pub fn resonance(&self) -> f32 {
        self.resonance
    }

    /// Runs one step of the recursion. Read the results with the output getters.
    #[inline]
    pub fn process(&mut self, input: f32) {
        self.low += self.f * self.band;
        self.high = input - self.low - self.q * self.band;
        self.band += self.f * self.high;

        self.low = flush_denormal(self.low);
        self.band = flush_denormal(self.band);
        self.high = flush_denormal(self.high);
    }

    /// Runs one step and returns the output selected by `mode`.
    #[inline]
    pub fn process_mode(&mut self, input: f32, mode: FilterMode) -> f32 {
        self.process(input);
        self.output(mode)
    }

    #[inline]
    pub fn process_buffer(&mut self, in_out: &mut [f32], mode: FilterMode) {
        for sample in in_out.iter_mut() {
            *sample = self.process_mode(*sample, mode);
        }
    }

    #[inline]
    pub fn output(&self, mode: FilterMode) -> f32 {
        match mode {
            FilterMode::LowPass => self.low_pass(),
            FilterMode::HighPass => self.high_pass(),
            FilterMode::BandPass => self.band_pass(),
            FilterMode::Notch => self.notch(),
        }
    }

    #[inline]
    pub fn low_pass(&self) -> f32 {
        self.low
    }

    #[inline]
    pub fn high_pass(&self) -> f32 {
        self.high
    }

    #[inline]
    pub fn band_pass(&self) -> f32 {
        self.band
    }

    #[inline]
    pub fn notch(&self) -> f32 {
        self.low + self.high
    }

    pub fn reset(&mut self) {
        self.low = 0.0;
        self.band = 0.0;
        self.high = 0.0;
    }

    fn update_coefficients(&mut self) {
        self.f = (2.0 * (PI * self.cutoff / self.sample_rate).sin()).clamp(0.0, MAX_F);
        self.q = (1.0 / self.resonance).clamp(MIN_Q, MAX_Q);
    }
}
