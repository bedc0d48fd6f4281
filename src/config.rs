//! Build-time constants and the output engine configuration.

/// Default audio sample rate in Hz.
pub const SAMPLE_RATE: u32 = 22050;

/// Default sample rate as a float, for the DSP units.
pub const SAMPLE_RATE_F: f32 = SAMPLE_RATE as f32;

/// Number of samples in each built-in wavetable.
pub const WAVETABLE_SIZE: usize = 1024;

/// Full-scale value of a quantized wavetable sample.
pub const SAMPLE_SCALE: f32 = 32767.0;

/// Duty-cycle resolution of the PWM output.
pub const PWM_RESOLUTION_BITS: u8 = 12;

/// PWM carrier frequency. Far above the audio band so that a simple RC filter
/// removes it.
pub const PWM_CARRIER_HZ: u32 = 100_000;

/// Default PWM output channel (pin).
pub const DEFAULT_CHANNEL: u8 = 1;

/// Highest sample rate the alarm-driven pipeline accepts (one sample per microsecond).
pub const MAX_SAMPLE_RATE: u32 = 1_000_000;

/// Accepted PWM resolutions in bits.
pub const MIN_RESOLUTION_BITS: u8 = 1;
pub const MAX_RESOLUTION_BITS: u8 = 16;

/// Settings used by [`AudioEngine::begin_with`](crate::output::AudioEngine::begin_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Hardware output channel
    pub channel: u8,
    /// PWM carrier frequency in Hz
    pub carrier_hz: u32,
    /// PWM duty-cycle resolution in bits (1 - 16). Values outside that range
    /// are rejected when the engine starts.
    pub resolution_bits: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_rate: SAMPLE_RATE,
            channel: DEFAULT_CHANNEL,
            carrier_hz: PWM_CARRIER_HZ,
            resolution_bits: PWM_RESOLUTION_BITS,
        }
    }
}

impl EngineConfig {
    pub fn new(sample_rate: u32, channel: u8) -> Self {
        Self {
            sample_rate,
            channel,
            ..Self::default()
        }
    }

    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    pub fn with_channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self
    }

    pub fn with_carrier(mut self, carrier_hz: u32) -> Self {
        self.carrier_hz = carrier_hz;
        self
    }

    pub fn with_resolution(mut self, resolution_bits: u8) -> Self {
        self.resolution_bits = resolution_bits.clamp(MIN_RESOLUTION_BITS, MAX_RESOLUTION_BITS);
        self
    }

    /// Largest output code, `2^resolution_bits - 1`.
    #[inline]
    pub fn max_code(&self) -> u16 {
        let bits = self
            .resolution_bits
            .clamp(MIN_RESOLUTION_BITS, MAX_RESOLUTION_BITS);
        let bits = u32::from(bits);
        ((1u32 << bits) - 1) as u16
    }

    /// Output code for silence.
    #[inline]
    pub fn center_code(&self) -> u16 {
        self.max_code() / 2
    }

    /// Alarm period in microseconds. Zero when the sample rate is zero.
    #[inline]
    pub fn period_us(&self) -> u32 {
        if self.sample_rate == 0 {
            0
        } else {
            1_000_000 / self.sample_rate
        }
    }
}
