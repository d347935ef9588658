use crate::util::time;

/// Source of uniformly distributed numbers in `[0, 1)`.
///
/// The rainbow brush draws from this for its mix factor, brightness jitter
/// and palette drift, so tests can swap in a scripted sequence.
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;
}

/// Small seeded xorshift32 generator.
#[derive(Debug, Clone)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        // xorshift never leaves the all-zero state
        Self { state: seed.max(1) }
    }

    /// Seed from the wall clock.
    pub fn from_time() -> Self {
        let secs = time::current_time_secs();
        let seed = (secs.fract() * u32::MAX as f64) as u32 ^ secs as u32;
        Self::new(seed)
    }

    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }
}

impl RandomSource for XorShift32 {
    fn next_f32(&mut self) -> f32 {
        // 24 bits keeps the result exactly representable and below 1.0
        (self.next_u32() >> 8) as f32 / (1u32 << 24) as f32
    }
}

/// Replays a fixed list of values, cycling when it runs out.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
