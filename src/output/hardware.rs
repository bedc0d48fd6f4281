//! Hardware collaborators consumed by the output engine.
//!
//! Board support code implements these for its PWM slice and alarm peripheral.
//! The alarm interrupt handler is expected to call
//! [`AudioEngine::on_alarm`](crate::output::AudioEngine::on_alarm).

use core::fmt::Debug;

/// Duty-cycle (PWM) output.
pub trait DutyCycleOutput {
    type Error: Debug;

    /// Routes `channel` to the PWM peripheral with the given carrier frequency
    /// and resolution. Codes written afterwards span `0 ..= 2^resolution_bits - 1`.
    fn configure(
        &mut self,
        channel: u8,
        carrier_hz: u32,
        resolution_bits: u8,
    ) -> Result<(), Self::Error>;

    /// Sets the duty cycle. Called from interrupt context, must not block.
    fn write(&mut self, channel: u8, code: u16);
}

/// One-shot microsecond alarm.
pub trait AlarmTimer {
    type Error: Debug;

    /// Fires once after `delay_us` microseconds, replacing any pending alarm.
    fn arm_once(&mut self, delay_us: u32) -> Result<(), Self::Error>;

    /// Cancels a pending alarm. No-op when none is pending.
    fn cancel(&mut self);
}
