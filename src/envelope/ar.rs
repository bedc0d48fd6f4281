//! Attack / release envelope for percussive sounds.

use crate::config::SAMPLE_RATE_F;
use crate::envelope::{increment, sanitize_sample_rate, sanitize_time, LEVEL_EPSILON};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArStage {
    #[default]
    Idle,
    Attack,
    Release,
}

#[derive(Debug, Clone)]
pub struct Ar {
    stage: ArStage,
    level: f32,
    increment: f32,

    attack_time: f32,
    release_time: f32,
    sample_rate: f32,

    attack_increment: f32,
    release_increment: f32,
}

impl Default for Ar {
    fn default() -> Self {
        Self::new(SAMPLE_RATE_F)
    }
}

impl Ar {
    /// 10 ms attack, 300 ms release.
    pub fn new(sample_rate: f32) -> Self {
        let mut envelope = Self {
            stage: ArStage::Idle,
            level: 0.0,
            increment: 0.0,
            attack_time: 0.01,
            release_time: 0.3,
            sample_rate: sanitize_sample_rate(sample_rate),
            attack_increment: 0.0,
            release_increment: 0.0,
        };
        envelope.update_increments();
        envelope
    }

    /// Times in seconds, floored at 1 ms. The release time is measured from
    /// full level.
    pub fn set_ar(&mut self, attack: f32, release: f32) {
        self.attack_time = sanitize_time(attack);
        self.release_time = sanitize_time(release);
        self.update_increments();
    }

    pub fn set_sample_rate(&mut self, sample_rate: f32) {
        self.sample_rate = sanitize_sample_rate(sample_rate);
        self.update_increments();
    }

    /// Restarts the attack from the current level, whatever the stage.
    pub fn trigger(&mut self) {
        self.stage = ArStage::Attack;
        self.increment = self.attack_increment;
    }

    #[inline]
    pub fn process(&mut self) -> f32 {
        match self.stage {
            ArStage::Idle => {
                self.level = 0.0;
            }
            ArStage::Attack => {
                self.level += self.increment;
                if self.level >= 1.0 - LEVEL_EPSILON {
                    self.level = 1.0;
                    self.stage = ArStage::Release;
                    self.increment = -self.release_increment;
                }
            }
            ArStage::Release => {
                self.level += self.increment;
                if self.level <= LEVEL_EPSILON {
                    self.level = 0.0;
                    self.stage = ArStage::Idle;
                    self.increment = 0.0;
                }
            }
        }

        self.level
    }

    #[inline]
    pub fn process_sample(&mut self, input: f32) -> f32 {
        input * self.process()
    }

    #[inline]
    pub fn process_buffer(&mut self, in_out: &mut [f32]) {
        for sample in in_out.iter_mut() {
            *sample = self.process_sample(*sample);
        }
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.stage != ArStage::Idle
    }

    #[inline]
    pub fn stage(&self) -> ArStage {
        self.stage
    }

    #[inline]
    pub fn level(&self) -> f32 {
        self.level
    }

    pub fn attack(&self) -> f32 {
        self.attack_time
    }

    pub fn release(&self) -> f32 {
        self.release_time
    }

    pub fn reset(&mut self) {
        self.stage = ArStage::Idle;
        self.level = 0.0;
        self.increment = 0.0;
    }

    fn update_increments(&mut self) {
        self.attack_increment = increment(1.0, self.attack_time, self.sample_rate);
        self.release_increment = increment(1.0, self.release_time, self.sample_rate);

        self.increment = match self.stage {
            ArStage::Idle => 0.0,
            ArStage::Attack => self.attack_increment,
            ArStage::Release => -self.release_increment,
        };
    }
}
