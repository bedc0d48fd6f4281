//! Fast 32-bit xorshift pseudo random number generator.

/// Xorshift32 state. Zero is the generator's fixed point and is never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl Default for XorShift32 {
    fn default() -> Self {
        Self::new(1)
    }
}

impl XorShift32 {
    /// Seed 0 is remapped to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: sanitize_seed(seed),
        }
    }

    pub fn seed(&mut self, seed: u32) {
        self.state = sanitize_seed(seed);
    }

    #[inline]
    pub fn state(&self) -> u32 {
        self.state
    }

    #[inline]
    pub fn get_word(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform value in 0.0..=1.0.
    #[inline]
    pub fn get_float(&mut self) -> f32 {
        self.get_word() as f32 / u32::MAX as f32
    }

    /// Uniform value in -1.0..=1.0.
    #[inline]
    pub fn get_bipolar(&mut self) -> f32 {
        self.get_float() * 2.0 - 1.0
    }
}

#[inline]
fn sanitize_seed(seed: u32) -> u32 {
    if seed == 0 {
        1
    } else {
        seed
    }
}
