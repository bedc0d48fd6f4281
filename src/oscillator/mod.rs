//! Sample sources: the table-driven oscillator and the capability traits shared
//! with the noise source and the LFO.

pub mod phase_accumulator;
pub mod wavetable_oscillator;

use dyn_clone::DynClone;

pub use phase_accumulator::PhaseAccumulator;
pub use wavetable_oscillator::{Oscillator, WavetableOscillator};

/// Anything that produces one sample per call.
///
/// Boxed sources can be cloned, which is handy for duplicating a configured
/// voice before handing it to the real-time callback.
pub trait SampleSource: DynClone + Send {
    /// Produces the next sample.
    fn process(&mut self) -> f32;

    /// Returns the source to its initial running state. Parameters are kept.
    fn reset(&mut self);

    /// Fills `out` with consecutive samples.
    #[inline]
    fn render(&mut self, out: &mut [f32]) {
        for out_sample in out.iter_mut() {
            *out_sample = self.process();
        }
    }
}

dyn_clone::clone_trait_object!(SampleSource);

/// Pitch control, only implemented by periodic sources.
pub trait FrequencyControl {
    /// Frequency in Hz. Out of range values are clamped by the implementation.
    fn set_frequency(&mut self, frequency: f32);

    fn frequency(&self) -> f32;

    /// Changes the sample rate while keeping the frequency in Hz.
    fn set_sample_rate(&mut self, sample_rate: f32);
}
