//! Alarm-driven sample pipeline.
//!
//! Every alarm firing pulls one sample from the registered callback, writes it
//! to the PWM output and re-arms the alarm for the next sample period. The
//! engine is an owned value; the platform's interrupt handler reaches it
//! through whatever critical-section wrapper the board support code uses and
//! calls [`AudioEngine::on_alarm`].
//!
//! A channel can only be driven by one running engine at a time. Claims are
//! tracked process-wide, so a second engine asking for a busy channel gets
//! [`EngineError::ChannelBusy`].

use alloc::boxed::Box;
use core::sync::atomic::{AtomicU32, Ordering};

use crate::config::{EngineConfig, MAX_RESOLUTION_BITS, MAX_SAMPLE_RATE, MIN_RESOLUTION_BITS};
use crate::error::EngineError;
use crate::oscillator::SampleSource;
use crate::output::hardware::{AlarmTimer, DutyCycleOutput};
use crate::output::sample_to_code;

/// Number of claimable output channels.
pub const MAX_CHANNELS: u8 = 32;

/// Bit `n` is set while channel `n` is driven by a running engine.
static CLAIMED_CHANNELS: AtomicU32 = AtomicU32::new(0);

/// Sample generator invoked once per sample period in interrupt context.
pub type AudioCallback = Box<dyn FnMut() -> f32 + Send>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EngineState {
    #[default]
    Stopped,
    Running,
}

pub struct AudioEngine<O: DutyCycleOutput, T: AlarmTimer> {
    output: O,
    timer: T,
    state: EngineState,
    config: Option<EngineConfig>,
    claimed: bool,
    callback: Option<AudioCallback>,
}

impl<O: DutyCycleOutput, T: AlarmTimer> AudioEngine<O, T> {
    pub fn new(output: O, timer: T) -> Self {
        Self {
            output,
            timer,
            state: EngineState::Stopped,
            config: None,
            claimed: false,
            callback: None,
        }
    }

    /// Starts the pipeline with the default carrier and resolution.
    pub fn begin(&mut self, sample_rate: u32, channel: u8) -> Result<(), EngineError> {
        self.begin_with(EngineConfig::new(sample_rate, channel))
    }

    /// Starts the pipeline. A running engine is stopped first, which also
    /// clears its callback.
    ///
    /// On error the engine is left stopped and holds no channel.
    pub fn begin_with(&mut self, config: EngineConfig) -> Result<(), EngineError> {
        if self.state == EngineState::Running {
            self.end();
        }

        if let Err(err) = validate(&config) {
            log::warn!("Audio engine not started: {}", err);
            return Err(err);
        }

        if let Err(err) = claim_channel(config.channel) {
            log::warn!("Audio engine not started: {}", err);
            return Err(err);
        }

        if let Err(err) =
            self.output
                .configure(config.channel, config.carrier_hz, config.resolution_bits)
        {
            log::warn!(
                "PWM configuration failed on channel {}: {:?}",
                config.channel,
                err
            );
            release_channel(config.channel);
            return Err(EngineError::OutputConfiguration);
        }

        self.output.write(config.channel, config.center_code());

        if let Err(err) = self.timer.arm_once(config.period_us()) {
            log::warn!("Audio alarm could not be armed: {:?}", err);
            release_channel(config.channel);
            return Err(EngineError::TimerArm);
        }

        self.config = Some(config);
        self.claimed = true;
        self.state = EngineState::Running;

        log::debug!(
            "Audio engine started on channel {} at {} Hz ({} us period)",
            config.channel,
            config.sample_rate,
            config.period_us()
        );

        Ok(())
    }

    /// Registers the sample generator, replacing any previous one.
    pub fn set_callback<F>(&mut self, callback: F)
    where
        F: FnMut() -> f32 + Send + 'static,
    {
        self.callback = Some(Box::new(callback));
    }

    /// Uses a sample source as the generator.
    pub fn set_source<S>(&mut self, mut source: S)
    where
        S: SampleSource + 'static,
    {
        self.set_callback(move || source.process());
    }

    /// Removes the generator. The output then plays silence.
    pub fn clear_callback(&mut self) {
        self.callback = None;
    }

    #[inline]
    pub fn has_callback(&self) -> bool {
        self.callback.is_some()
    }

    /// Alarm handler, called once per sample period from interrupt context.
    ///
    /// Does nothing while stopped. If the alarm cannot be re-armed the engine
    /// stops itself.
    #[inline]
    pub fn on_alarm(&mut self) {
        if self.state != EngineState::Running {
            return;
        }
        let Some(config) = self.config else {
            return;
        };

        let sample = match self.callback.as_mut() {
            Some(callback) => callback(),
            None => 0.0,
        };
        self.output
            .write(config.channel, sample_to_code(sample, config.max_code()));

        if let Err(err) = self.timer.arm_once(config.period_us()) {
            log::error!("Audio alarm could not be re-armed: {:?}", err);
            self.end();
        }
    }

    /// Writes one sample directly. Ignored unless the engine holds its channel.
    pub fn write_sample(&mut self, sample: f32) {
        if !self.claimed {
            return;
        }
        if let Some(config) = self.config {
            self.output
                .write(config.channel, sample_to_code(sample, config.max_code()));
        }
    }

    /// Stops the pipeline: cancels the alarm, writes the silence code, clears
    /// the callback and releases the channel. Must not be called from the
    /// callback. Calling it on a stopped engine is harmless.
    pub fn end(&mut self) {
        if self.state == EngineState::Running {
            self.timer.cancel();
            self.state = EngineState::Stopped;
        }

        if self.claimed {
            if let Some(config) = self.config {
                self.output.write(config.channel, config.center_code());
                release_channel(config.channel);
                log::debug!("Audio engine stopped, channel {} released", config.channel);
            }
            self.claimed = false;
        }

        self.callback = None;
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.state == EngineState::Running
    }

    #[inline]
    pub fn state(&self) -> EngineState {
        self.state
    }

    /// Sample rate of the last successful start, 0 if never started.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.config.map_or(0, |config| config.sample_rate)
    }

    /// Output channel of the last successful start.
    #[inline]
    pub fn channel(&self) -> Option<u8> {
        self.config.map(|config| config.channel)
    }

    #[inline]
    pub fn config(&self) -> Option<&EngineConfig> {
        self.config.as_ref()
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }
}

impl<O: DutyCycleOutput, T: AlarmTimer> Drop for AudioEngine<O, T> {
    fn drop(&mut self) {
        self.end();
    }
}

impl<O: DutyCycleOutput, T: AlarmTimer> core::fmt::Debug for AudioEngine<O, T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("AudioEngine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("claimed", &self.claimed)
            .field("has_callback", &self.callback.is_some())
            .finish_non_exhaustive()
    }
}

/// Returns `true` while a running engine drives `channel`.
pub fn is_channel_claimed(channel: u8) -> bool {
    if channel >= MAX_CHANNELS {
        return false;
    }
    CLAIMED_CHANNELS.load(Ordering::Acquire) & (1 << channel) != 0
}

fn validate(config: &EngineConfig) -> Result<(), EngineError> {
    if config.sample_rate == 0 || config.sample_rate > MAX_SAMPLE_RATE {
        return Err(EngineError::InvalidSampleRate(config.sample_rate));
    }
    if config.channel >= MAX_CHANNELS {
        return Err(EngineError::InvalidChannel(config.channel));
    }
    if !(MIN_RESOLUTION_BITS..=MAX_RESOLUTION_BITS).contains(&config.resolution_bits) {
        return Err(EngineError::InvalidResolution(config.resolution_bits));
    }
    Ok(())
}

fn claim_channel(channel: u8) -> Result<(), EngineError> {
    let mask = 1u32 << channel;
    let previous = CLAIMED_CHANNELS.fetch_or(mask, Ordering::AcqRel);
    if previous & mask != 0 {
        return Err(EngineError::ChannelBusy(channel));
    }
    log::debug!("Claimed output channel {}", channel);
    Ok(())
}

fn release_channel(channel: u8) {
    let mask = 1u32 << channel;
    CLAIMED_CHANNELS.fetch_and(!mask, Ordering::AcqRel);
}
