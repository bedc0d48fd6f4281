//! Wavetable oscillator with linear interpolation.

use crate::config::{SAMPLE_RATE_F, WAVETABLE_SIZE};
use crate::oscillator::phase_accumulator::PhaseAccumulator;
use crate::oscillator::{FrequencyControl, SampleSource};
use crate::utils::clamp_unit;
use crate::wavetable::{self, Waveform, Wavetable};

/// Oscillator reading a borrowed table of `N` samples.
///
/// Each call to [`process`](Self::process) outputs the table value at the
/// current phase and then advances the phase, so a freshly reset oscillator
/// starts at phase 0.
#[derive(Debug, Clone)]
pub struct WavetableOscillator<'a, const N: usize = WAVETABLE_SIZE> {
    phase: PhaseAccumulator,
    wavetable: &'a Wavetable<N>,
    amplitude: f32,
}

/// Oscillator over the built-in table size.
pub type Oscillator<'a> = WavetableOscillator<'a, WAVETABLE_SIZE>;

impl<'a, const N: usize> WavetableOscillator<'a, N> {
    pub fn new(wavetable: &'a Wavetable<N>) -> Self {
        Self::with_sample_rate(wavetable, SAMPLE_RATE_F)
    }

    pub fn with_sample_rate(wavetable: &'a Wavetable<N>, sample_rate: f32) -> Self {
        Self {
            phase: PhaseAccumulator::new(sample_rate),
            wavetable,
            amplitude: 1.0,
        }
    }

    #[inline]
    pub fn set_frequency(&mut self, frequency: f32) {
        self.phase.set_frequency(frequency);
    }

    #[inline]
    pub fn frequency(&self) -> f32 {
        self.phase.frequency()
    }

    /// Output gain, clamped to 0.0..=1.0.
    #[inline]
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = clamp_unit(amplitude);
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    #[inline]
    pub fn set_phase(&mut self, phase: f32) {
        self.phase.set_phase(phase);
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase.phase()
    }

    /// Swaps the table without touching the phase, so the timbre changes
    /// without a discontinuity in time.
    #[inline]
    pub fn set_wavetable(&mut self, wavetable: &'a Wavetable<N>) {
        self.wavetable = wavetable;
    }

    #[inline]
    pub fn wavetable(&self) -> &'a Wavetable<N> {
        self.wavetable
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.phase.set_sample_rate(sample_rate);
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        let index = self.phase.phase() * N as f32;
        self.phase.tick();
        self.wavetable.interpolated(index) * self.amplitude
    }

    /// Zeroes the phase only.
    #[inline]
    pub fn reset(&mut self) {
        self.phase.reset();
    }
}

impl WavetableOscillator<'static, WAVETABLE_SIZE> {
    /// Oscillator over one of the shared built-in tables.
    pub fn with_waveform(waveform: Waveform) -> Self {
        Self::new(wavetable::wavetable(waveform))
    }

    pub fn set_waveform(&mut self, waveform: Waveform) {
        self.set_wavetable(wavetable::wavetable(waveform));
    }
}

impl<const N: usize> SampleSource for WavetableOscillator<'_, N> {
    #[inline]
    fn process(&mut self) -> f32 {
        WavetableOscillator::process(self)
    }

    #[inline]
    fn reset(&mut self) {
        WavetableOscillator::reset(self);
    }
}

impl<const N: usize> FrequencyControl for WavetableOscillator<'_, N> {
    #[inline]
    fn set_frequency(&mut self, frequency: f32) {
        WavetableOscillator::set_frequency(self, frequency);
    }

    #[inline]
    fn frequency(&self) -> f32 {
        WavetableOscillator::frequency(self)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        WavetableOscillator::set_sample_rate(self, sample_rate);
    }
}
