//! Small numeric helpers shared by the DSP units.

#[allow(unused_imports)]
use num_traits::float::Float;

pub mod random;

/// Magnitude below which recursive filter state is snapped to zero.
pub const DENORMAL_THRESHOLD: f32 = 1.0e-10;

/// Forces values too small to matter to exact zero, keeping the FPU off its
/// slow subnormal path.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < DENORMAL_THRESHOLD {
        0.0
    } else {
        x
    }
}

/// Clamps a sample to -1.0..=1.0. NaN becomes silence.
#[inline]
pub fn clamp_bipolar(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(-1.0, 1.0)
    }
}

/// Clamps a gain to 0.0..=1.0. NaN becomes 0.0.
#[inline]
pub fn clamp_unit(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else {
        x.clamp(0.0, 1.0)
    }
}

#[inline]
pub fn crossfade(a: f32, b: f32, fade: f32) -> f32 {
    a + (b - a) * fade
}
