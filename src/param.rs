//! Lock-free parameter cells for handing control values to the real-time
//! callback.
//!
//! DSP units are not synchronized. When a value is changed from foreground code
//! while the callback runs in interrupt context, store it in a [`SharedParam`]
//! and let the callback copy it into the unit once per sample or block.

use core::sync::atomic::{AtomicU32, Ordering};

/// An `f32` stored as its bit pattern in an `AtomicU32`.
#[derive(Debug)]
pub struct SharedParam {
    bits: AtomicU32,
}

impl SharedParam {
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn set(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Relaxed);
    }

    #[inline]
    pub fn get(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Relaxed))
    }
}

impl Default for SharedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
