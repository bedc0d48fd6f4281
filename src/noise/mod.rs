//! Noise sources.

pub mod white_noise;

pub use white_noise::NoiseSource;
