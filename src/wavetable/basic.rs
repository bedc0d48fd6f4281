//! Built-in single-cycle waveforms.
//!
//! Each table is generated on first use and then lives for the rest of the
//! program, so handing out `&'static` references is free.

#[allow(unused_imports)]
use num_traits::float::Float;
use spin::Once;

use super::generator::{generate_wavetable, WavetableBank};
use super::Wavetable;
use crate::config::WAVETABLE_SIZE;

const TWO_PI: f32 = 2.0 * core::f32::consts::PI;

/// Harmonics summed into the soft saw.
pub const SOFT_SAW_HARMONICS: usize = 8;

/// Gain applied to the soft saw harmonic sum. Keeps the 8-harmonic sum (peak
/// around 1.85) inside full scale; needs retuning if the harmonic count changes.
pub const SOFT_SAW_SCALE: f32 = 0.3;

/// Number of built-in waveforms.
pub const NUM_BASIC_WAVES: usize = 6;

pub type BasicTable = Wavetable<WAVETABLE_SIZE>;
pub type BasicBank = WavetableBank<'static, NUM_BASIC_WAVES, WAVETABLE_SIZE>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Waveform {
    #[default]
    Sine = 0,
    Saw = 1,
    Square = 2,
    Triangle = 3,
    SoftSaw = 4,
    Pulse = 5,
}

impl Waveform {
    pub const ALL: [Waveform; NUM_BASIC_WAVES] = [
        Waveform::Sine,
        Waveform::Saw,
        Waveform::Square,
        Waveform::Triangle,
        Waveform::SoftSaw,
        Waveform::Pulse,
    ];

    /// Position of the waveform inside the basic bank.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// One period of a sine.
pub fn sine(i: usize, size: usize) -> f32 {
    (TWO_PI * i as f32 / size as f32).sin()
}

/// Linear ramp from -1.0 at the first sample to +1.0 at the last.
pub fn saw(i: usize, size: usize) -> f32 {
    2.0 * i as f32 / (size.max(2) - 1) as f32 - 1.0
}

/// 50% duty square.
pub fn square(i: usize, size: usize) -> f32 {
    if i < size / 2 {
        1.0
    } else {
        -1.0
    }
}

pub fn triangle(i: usize, size: usize) -> f32 {
    let x = i as f32 / size as f32;
    if i < size / 2 {
        4.0 * x - 1.0
    } else {
        3.0 - 4.0 * x
    }
}

/// Band-limited saw: sum of `harmonics` sine partials at 1/k amplitude.
pub fn soft_saw(i: usize, size: usize, harmonics: usize, scale: f32) -> f32 {
    let phase = TWO_PI * i as f32 / size as f32;
    let sum: f32 = (1..=harmonics)
        .map(|k| (k as f32 * phase).sin() / k as f32)
        .sum();
    sum * scale
}

/// 25% duty pulse.
pub fn pulse(i: usize, size: usize) -> f32 {
    if i < size / 4 {
        1.0
    } else {
        -1.0
    }
}

static SINE: Once<BasicTable> = Once::new();
static SAW: Once<BasicTable> = Once::new();
static SQUARE: Once<BasicTable> = Once::new();
static TRIANGLE: Once<BasicTable> = Once::new();
static SOFT_SAW: Once<BasicTable> = Once::new();
static PULSE: Once<BasicTable> = Once::new();

static BASIC_BANK: Once<BasicBank> = Once::new();

/// Shared built-in table for `waveform`.
pub fn wavetable(waveform: Waveform) -> &'static BasicTable {
    const N: usize = WAVETABLE_SIZE;
    match waveform {
        Waveform::Sine => SINE.call_once(|| generate_wavetable(|i| sine(i, N))),
        Waveform::Saw => SAW.call_once(|| generate_wavetable(|i| saw(i, N))),
        Waveform::Square => SQUARE.call_once(|| generate_wavetable(|i| square(i, N))),
        Waveform::Triangle => TRIANGLE.call_once(|| generate_wavetable(|i| triangle(i, N))),
        Waveform::SoftSaw => SOFT_SAW.call_once(|| {
            generate_wavetable(|i| soft_saw(i, N, SOFT_SAW_HARMONICS, SOFT_SAW_SCALE))
        }),
        Waveform::Pulse => PULSE.call_once(|| generate_wavetable(|i| pulse(i, N))),
    }
}

/// All built-in tables, indexed by [`Waveform::index`].
pub fn basic_bank() -> &'static BasicBank {
    BASIC_BANK.call_once(|| WavetableBank::new(Waveform::ALL.map(wavetable)))
}

/// Builds every built-in table now instead of on first use.
///
/// Call this before starting the output engine so that the real-time handler
/// never pays for table generation.
pub fn warm_up() {
    basic_bank();
}
