//! Attack / decay / sustain / release envelope.

use crate::config::SAMPLE_RATE_F;
use crate::envelope::{increment, sanitize_sample_rate, sanitize_time, LEVEL_EPSILON};
use crate::utils::clamp_unit;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum AdsrStage {
    /// Output is 0.
    #[default]
    Idle,
    /// Rising towards 1.0.
    Attack,
    /// Falling from 1.0 to the sustain level.
    Decay,
    /// Holding the sustain level until note off.
    Sustain,
    /// Falling to 0.0.
    Release,
}

#[derive(Debug, Clone)]
pub struct Adsr {
    stage: AdsrStage,
    level: f32,
    increment: f32,

    // Seconds, except sustain which is a level.
    attack_time: f32,
    decay_time: f32,
    sustain_level: f32,
    release_time: f32,

    sample_rate: f32,

    attack_increment: f32,
    decay_increment: f32,
    release_increment: f32,
}

impl Default for Adsr {
    fn default() -> Self {
        Self::new(SAMPLE_RATE_F)
    }
}

impl Adsr {
    /// 10 ms attack, 100 ms decay, 0.7 sustain, 300 ms release.
    pub fn new(sample_rate: f32) -> Self {
        let mut envelope = Self {
            stage: AdsrStage::Idle,
            level: 0.0,
            increment: 0.0,
            attack_time: 0.01,
            decay_time: 0.1,
            sustain_level: 0.7,
            release_time: 0.3,
            sample_rate: sanitize_sample_rate(sample_rate),
            attack_increment: 0.0,
            decay_increment: 0.0,
            release_increment: 0.0,
        };
        envelope.update_increments();
        envelope
    }

    /// Times in seconds (floored at 1 ms), sustain level clamped to 0.0..=1.0.
    pub fn set_adsr(&mut self, attack: f32, decay: f32, sustain: f32, release: f32) {
        self.attack_time = sanitize_time(attack);
        self.decay_time = sanitize_time(decay);
        self.sustain_level = clamp_unit(sustain);
        self.release_time = sanitize_time(release);
        self.update_increments();
    }

    pub fn set_attack(&mut self, attack: f32) {
        self.set_adsr(attack, self.decay_time, self.sustain_level, self.release_time);
    }

    pub fn set_decay(&mut self, decay: f32) {
        self.set_adsr(self.attack_time, decay, self.sustain_level, self.release_time);
    }

    pub fn set_sustain(&mut self, sustain: f32) {
        self.set_adsr(self.attack_time, self.decay_time, sustain, self.release_time);
    }

    pub fn set_release(&mut self, release: f32) {
        self.set_adsr(self.attack_time, self.decay_time, self.sustain_level, release);
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sanitize_sample_rate(sample_rate);
        self.update_increments();
    }

    /// Starts the attack from the current level.
    pub fn note_on(&mut self) {
        self.stage = AdsrStage::Attack;
        self.increment = self.attack_increment;
    }

    /// Starts the release. Does nothing while idle.
    pub fn note_off(&mut self) {
        if self.stage == AdsrStage::Idle {
            return;
        }
        self.stage = AdsrStage::Release;
        self.increment = -self.release_increment_from(self.level);
    }

    /// Advances one sample and returns the level.
    #[inline]
    pub fn process(&mut self) -> f32 {
        match self.stage {
            AdsrStage::Idle => {
                self.level = 0.0;
            }
            AdsrStage::Attack => {
                self.level += self.increment;
                if self.level >= 1.0 - LEVEL_EPSILON {
                    self.level = 1.0;
                    self.stage = AdsrStage::Decay;
                    self.increment = -self.decay_increment;
                }
            }
            AdsrStage::Decay => {
                self.level += self.increment;
                if self.level <= self.sustain_level + LEVEL_EPSILON {
                    self.level = self.sustain_level;
                    self.stage = AdsrStage::Sustain;
                    self.increment = 0.0;
                }
            }
            AdsrStage::Sustain => {
                self.level = self.sustain_level;
            }
            AdsrStage::Release => {
                self.level += self.increment;
                if self.level <= LEVEL_EPSILON {
                    self.level = 0.0;
                    self.stage = AdsrStage::Idle;
                    self.increment = 0.0;
                }
            }
        }

        self.level
    }

    /// Advances one sample and returns `input` scaled by the level.
    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        input * self.process()
    }

    /// Multiplies a block in place by consecutive envelope levels.
    #[inline]
    pub fn process_buffer(&mut self, in_out: &mut [f32]) {
        for sample in in_out.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.stage != AdsrStage::Idle
    }

    #[inline]
    pub fn stage(&self) -> AdsrStage {
        self.stage
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    /// Back to idle at level 0. Parameters are kept.
    pub fn reset(&mut self) {
        self.stage = AdsrStage::Idle;
        self.level = 0.0;
        self.increment = 0.0;
    }

    pub fn attack(&self) -> f32 {
        self.attack_time
    }

    pub fn decay(&self) -> f32 {
        self.decay_time
    }

    pub fn sustain(&self) -> f32 {
        self.sustain_level
    }

    pub fn release(&self) -> f32 {
        self.release_time
    }

    fn update_increments(&mut self) {
        self.attack_increment = increment(1.0, self.attack_time, self.sample_rate);
        self.decay_increment =
            increment(1.0 - self.sustain_level, self.decay_time, self.sample_rate);
        self.release_increment = increment(self.sustain_level, self.release_time, self.sample_rate);

        // The running stage picks up the new slope immediately.
        self.increment = match self.stage {
            AdsrStage::Idle | AdsrStage::Sustain => 0.0,
            AdsrStage::Attack => self.attack_increment,
            AdsrStage::Decay => -self.decay_increment,
            AdsrStage::Release => -self.release_increment_from(self.level),
        };
    }

    /// Release slope: sustain level over the release time. With a zero sustain
    /// level that slope would be flat, so the current level is used instead.
    fn release_increment_from(&self, level: f32) -> f32 {
        if self.sustain_level > 0.0 {
            self.release_increment
        } else {
            increment(level, self.release_time, self.sample_rate)
        }
    }
}
