//! Real-time PWM audio output.

pub mod engine;
pub mod hardware;

pub use engine::{AudioCallback, AudioEngine, EngineState};
pub use hardware::{AlarmTimer, DutyCycleOutput};

use crate::utils::clamp_bipolar;

/// Maps a sample in -1.0..=1.0 linearly onto `0 ..= max_code`.
///
/// Out of range samples are clamped and NaN is treated as silence, so the
/// result never exceeds `max_code`.
#[inline]
pub fn sample_to_code(sample: f32, max_code: u16) -> u16 {
    let scaled = (clamp_bipolar(sample) + 1.0) * 0.5;
    let code = (scaled * f32::from(max_code)) as u16;
    code.min(max_code)
}
