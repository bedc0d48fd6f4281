//! Fixed-pole DC blocker, `y = x - x1 + 0.995 * y1`.

/// Corner frequency is roughly `(1 - POLE) * sample_rate / 2π`.
pub const POLE: f32 = 0.995;

#[derive(Debug, Default, Clone)]
pub struct DcBlocker {
    x: f32,
    y: f32,
}

impl DcBlocker {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        self.y = input - self.x + POLE * self.y;
        self.x = input;
        self.y
    }

    #[inline]
    pub fn process_buffer(&mut self, in_out: &mut [f32]) {
        let mut x = self.x;
        let mut y = self.y;
        for sample in in_out.iter_mut() {
            let old_x = x;
            x = *sample;
            y = y * POLE + x - old_x;
            *sample = y;
        }
        self.x = x;
        self.y = y;
    }

    pub fn reset(&mut self) {
        self.x = 0.0;
        self.y = 0.0;
    }
}
