//! Single-cycle wavetables with 16-bit quantized samples.
//!
//! A [`Wavetable`] is immutable once built. Lookups wrap modulo the table size,
//! so the table is treated as one period of an endless waveform. Oscillators
//! only borrow tables, several of them can share one instance.

pub mod basic;
pub mod generator;

#[allow(unused_imports)]
use num_traits::float::Float;

use crate::config::SAMPLE_SCALE;
use crate::utils::crossfade;

pub use basic::{wavetable, Waveform};
pub use generator::{generate_wavetable, wavetable_from_samples, WavetableBank};

/// Stored sample type.
pub type WavetableSample = i16;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Wavetable<const N: usize> {
    samples: [WavetableSample; N],
}

impl<const N: usize> Wavetable<N> {
    const NON_EMPTY: () = assert!(N > 0, "a wavetable needs at least one sample");

    /// Wraps already quantized samples.
    pub const fn new(samples: [WavetableSample; N]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self { samples }
    }

    /// Exact stored value at `index mod N`.
    #[inline]
    pub fn sample(&self, index: usize) -> WavetableSample {
        self.samples[index % N]
    }

    /// Linearly interpolated value at a fractional index, de-quantized to -1.0..=1.0.
    ///
    /// Any finite index is accepted and wrapped into `0..N` first.
    #[inline]
    pub fn interpolated(&self, index: f32) -> f32 {
        let size = N as f32;
        let mut index = index - (index / size).floor() * size;
        if !(index >= 0.0 && index < size) {
            // NaN, or a value that rounded onto the upper bound.
            index = 0.0;
        }

        let index_integral = index as usize;
        let index_fractional = index - index_integral as f32;

        let a = f32::from(self.samples[index_integral]);
        let b = f32::from(self.samples[(index_integral + 1) % N]);

        crossfade(a, b, index_fractional) / SAMPLE_SCALE
    }

    /// Number of samples in one period.
    #[inline]
    pub const fn size(&self) -> usize {
        N
    }

    #[inline]
    pub fn data(&self) -> &[WavetableSample; N] {
        &self.samples
    }
}

/// Converts a real amplitude into the stored fixed-point representation.
///
/// The value is clamped to -1.0..=1.0 and truncated towards zero. NaN maps to 0.
#[inline]
pub fn quantize(value: f32) -> WavetableSample {
    let value = crate::utils::clamp_bipolar(value);
    (value * SAMPLE_SCALE) as WavetableSample
}

/// Inverse of [`quantize`].
#[inline]
pub fn dequantize(sample: WavetableSample) -> f32 {
    f32::from(sample) / SAMPLE_SCALE
}
