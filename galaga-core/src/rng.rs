/// Xorshift32 generator. Only cosmetic state (the starfield) draws from it,
/// so a seed fully determines a session's visuals.
#[derive(Clone, Copy, Debug)]
pub struct SeededRng {
    state: u32,
}

impl SeededRng {
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xDEAD_BEEF } else { seed },
        }
    }

    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        self.state
    }

    /// Uniform in `[0, 1)` with 24 bits of precision.
    pub fn next_unit(&mut self) -> f64 {
        f64::from(self.next() >> 8) / f64::from(1u32 << 24)
    }

    /// Uniform in `[min, min + span)`.
    pub fn next_in(&mut self, min: f64, span: f64) -> f64 {
        min + self.next_unit() * span
    }
}
