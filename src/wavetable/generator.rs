//! Table construction from formulas or precomputed amplitudes.

use super::{quantize, Wavetable};

/// Evaluates `generator` for every index `0..N`, clamps and quantizes the results.
pub fn generate_wavetable<const N: usize, F>(generator: F) -> Wavetable<N>
where
    F: Fn(usize) -> f32,
{
    Wavetable::new(core::array::from_fn(|i| quantize(generator(i))))
}

/// Quantizes a precomputed cycle of real amplitudes.
pub fn wavetable_from_samples<const N: usize>(samples: &[f32; N]) -> Wavetable<N> {
    Wavetable::new(core::array::from_fn(|i| quantize(samples[i])))
}

impl<const N: usize> Wavetable<N> {
    /// See [`generate_wavetable`].
    pub fn from_fn<F>(generator: F) -> Self
    where
        F: Fn(usize) -> f32,
    {
        generate_wavetable(generator)
    }

    /// See [`wavetable_from_samples`].
    pub fn from_samples(samples: &[f32; N]) -> Self {
        wavetable_from_samples(samples)
    }
}

/// Fixed collection of `W` borrowed tables of `N` samples each.
#[derive(Debug, Clone, Copy)]
pub struct WavetableBank<'a, const W: usize, const N: usize> {
    waves: [&'a Wavetable<N>; W],
}

impl<'a, const W: usize, const N: usize> WavetableBank<'a, W, N> {
    const NON_EMPTY: () = assert!(W > 0, "a wavetable bank needs at least one table");

    pub const fn new(waves: [&'a Wavetable<N>; W]) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::NON_EMPTY;
        Self { waves }
    }

    /// Table at `index mod W`.
    #[inline]
    pub fn wave(&self, index: usize) -> &'a Wavetable<N> {
        self.waves[index % W]
    }

    #[inline]
    pub const fn num_waves(&self) -> usize {
        W
    }

    #[inline]
    pub const fn wave_size(&self) -> usize {
        N
    }
}
