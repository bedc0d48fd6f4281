//! Sample-by-sample filters: one-pole, state-variable, biquad and DC blocker.
//!
//! Every filter owns its history, clamps its parameters to documented ranges and
//! can be reset at any time without recomputing coefficients.

pub mod biquad;
pub mod dc_blocker;
pub mod one_pole;
pub mod svf;

pub use biquad::Biquad;
pub use dc_blocker::DcBlocker;
pub use one_pole::{OnePole, OnePoleOutputs};
pub use svf::Svf;

/// Response selected when a filter is asked for a single output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum FilterMode {
    #[default]
    LowPass,
    HighPass,
    BandPass,
    Notch,
}
