//! Errors reported by the output engine.
//!
//! The DSP units never fail: every parameter setter clamps into a safe range.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error("sample rate {0} Hz is outside 1..=1000000")]
    InvalidSampleRate(u32),

    #[error("PWM resolution of {0} bits is outside 1..=16")]
    InvalidResolution(u8),

    #[error("output channel {0} does not exist")]
    InvalidChannel(u8),

    #[error("output channel {0} is already driven by another engine")]
    ChannelBusy(u8),

    #[error("duty-cycle output could not be configured")]
    OutputConfiguration,

    #[error("sample alarm could not be armed")]
    TimerArm,
}
