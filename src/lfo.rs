//! Low frequency oscillator for parameter modulation.
//!
//! Waveforms are computed directly from the phase, no table lookup. The output
//! is `wave * amplitude + offset` and is not clamped: a full amplitude with a
//! non-zero offset can leave -1.0..=1.0.

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::SAMPLE_RATE_F;
use crate::oscillator::{FrequencyControl, PhaseAccumulator, SampleSource};
use crate::utils::random::XorShift32;
use crate::utils::{clamp_bipolar, clamp_unit};

const TWO_PI: f32 = 2.0 * core::f32::consts::PI;

pub const MIN_FREQUENCY: f32 = 0.001;
pub const MAX_FREQUENCY: f32 = 100.0;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum LfoWaveform {
    #[default]
    Sine,
    Triangle,
    Saw,
    Square,
    /// New random value once per cycle, held until the phase wraps.
    SampleHold,
    /// New random value every sample.
    Noise,
}

#[derive(Debug, Clone)]
pub struct Lfo {
    phase: PhaseAccumulator,
    waveform: LfoWaveform,
    amplitude: f32,
    offset: f32,

    rng: XorShift32,
    held_value: f32,
    // Set when the last step wrapped the phase.
    cycle_start: bool,
}

impl Default for Lfo {
    fn default() -> Self {
        Self::new(SAMPLE_RATE_F)
    }
}

impl Lfo {
    /// 1 Hz sine at full amplitude, no offset.
    pub fn new(sample_rate: f32) -> Self {
        let mut lfo = Self {
            phase: PhaseAccumulator::new(sample_rate),
            waveform: LfoWaveform::Sine,
            amplitude: 1.0,
            offset: 0.0,
            rng: XorShift32::default(),
            held_value: 0.0,
            cycle_start: true,
        };
        lfo.set_frequency(1.0);
        lfo
    }

    /// Frequency clamped to `0.001 ..= 100` Hz.
    #[inline]
    pub fn set_frequency(&mut self, frequency: f32) {
        let frequency = if frequency.is_nan() {
            MIN_FREQUENCY
        } else {
            frequency.clamp(MIN_FREQUENCY, MAX_FREQUENCY)
        };
        self.phase.set_frequency(frequency);
    }

    #[inline]
    pub fn frequency(&self) -> f32 {
        self.phase.frequency()
    }

    /// Depth clamped to 0.0..=1.0.
    #[inline]
    pub fn set_amplitude(&mut self, amplitude: f32) {
        self.amplitude = clamp_unit(amplitude);
    }

    #[inline]
    pub fn amplitude(&self) -> f32 {
        self.amplitude
    }

    /// Offset clamped to -1.0..=1.0.
    #[inline]
    pub fn set_offset(&mut self, offset: f32) {
        self.offset = clamp_bipolar(offset);
    }

    #[inline]
    pub fn offset(&self) -> f32 {
        self.offset
    }

    #[inline]
    pub fn set_waveform(&mut self, waveform: LfoWaveform) {
        self.waveform = waveform;
    }

    #[inline]
    pub fn waveform(&self) -> LfoWaveform {
        self.waveform
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.phase.set_sample_rate(sample_rate);
    }

    #[inline]
    pub fn phase(&self) -> f32 {
        self.phase.phase()
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        let phase = self.phase.phase();

        let wave = match self.waveform {
            LfoWaveform::Sine => (TWO_PI * phase).sin(),
            LfoWaveform::Triangle => {
                if phase < 0.5 {
                    4.0 * phase - 1.0
                } else {
                    3.0 - 4.0 * phase
                }
            }
            LfoWaveform::Saw => 2.0 * phase - 1.0,
            LfoWaveform::Square => {
                if phase < 0.5 {
                    1.0
                } else {
                    -1.0
                }
            }
            LfoWaveform::SampleHold => {
                if self.cycle_start {
                    self.held_value = self.rng.get_bipolar();
                }
                self.held_value
            }
            LfoWaveform::Noise => self.rng.get_bipolar(),
        };

        self.cycle_start = self.phase.tick() < phase;

        wave * self.amplitude + self.offset
    }

    /// Zeroes the phase and starts a new sample & hold cycle. Parameters and
    /// the noise sequence position are kept.
    pub fn reset(&mut self) {
        self.phase.reset();
        self.held_value = 0.0;
        self.cycle_start = true;
    }
}

impl SampleSource for Lfo {
    #[inline]
    fn process(&mut self) -> f32 {
        Lfo::process(self)
    }

    fn reset(&mut self) {
        Lfo::reset(self);
    }
}

impl FrequencyControl for Lfo {
    #[inline]
    fn set_frequency(&mut self, frequency: f32) {
        Lfo::set_frequency(self, frequency);
    }

    #[inline]
    fn frequency(&self) -> f32 {
        Lfo::frequency(self)
    }

    fn set_sample_rate(&mut self, sample_rate: f32) {
        Lfo::set_sample_rate(self, sample_rate);
    }
}
