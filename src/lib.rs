#![doc = include_str!("../README.md")]
#![cfg_attr(not(test), no_std)]

extern crate alloc;

pub mod config;
pub mod envelope;
pub mod error;
pub mod filter;
pub mod lfo;
pub mod noise;
pub mod oscillator;
pub mod output;
pub mod param;
pub mod utils;
pub mod wavetable;

pub use config::{
    EngineConfig, PWM_CARRIER_HZ, PWM_RESOLUTION_BITS, SAMPLE_RATE, SAMPLE_RATE_F, SAMPLE_SCALE,
    WAVETABLE_SIZE,
};
pub use error::EngineError;
