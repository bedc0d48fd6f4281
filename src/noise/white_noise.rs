//! White noise from a xorshift generator.

use crate::oscillator::SampleSource;
use crate::utils::clamp_unit;
use crate::utils::random::XorShift32;

/// Seed used by [`NoiseSource::default`] and [`SampleSource::reset`].
pub const DEFAULT_SEED: u32 = 1;

#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: XorShift32,
    amplitude: f32,
}

impl Default for NoiseSource {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl NoiseSource {
    /// Seed 0 is silently replaced by 1.
    pub fn new(seed: u32) -> Self {
        Self {
            rng: XorShift32::new(seed),
            amplitude: 1.0,
        }
    }

    #[inline]
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = clamp_unit(amplitude);
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Uniform sample in -amplitude..=amplitude.
    #[inline]
    pub fn process(&mut self) -> f32 {
        self.rng.get_bipolar() * self.amplitude
    }

    /// Restarts the sequence from `seed` (0 is replaced by 1).
    pub fn reseed(&mut self, seed: u32) {
        self.rng.seed(seed);
    }
}

impl SampleSource for NoiseSource {
    #[inline]
    fn process(&mut self) -> f32 {
        NoiseSource::process(self)
    }

    fn reset(&mut self) {
        self.reseed(DEFAULT_SEED);
    }
}
