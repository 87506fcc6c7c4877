//! RNG module - deterministic piece and colour draws
//!
//! Sessions draw every random value (tray shapes, tray colours) from one seeded
//! generator so a seed fully determines a game's piece supply.

use crate::types::CellColor;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed. Seed 0 is remapped to 1.
    pub fn new(seed: u32) -> Self {
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Current state; feeding it back to [`SimpleRng::new`] resumes the sequence
    pub fn state(&self) -> u32 {
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        // a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Random value in `[0, max)`; 0 when `max` is 0
    pub fn next_range(&mut self, max: u32) -> u32 {
        if max == 0 {
            return 0;
        }
        // High bits of an LCG are far better distributed than the low ones
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Uniform pick from `items`, None when empty
    pub fn pick<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let idx = self.next_range(items.len() as u32) as usize;
        items.get(idx)
    }

    /// Random 24-bit display colour
    pub fn next_color(&mut self) -> CellColor {
        CellColor(self.next_u32() >> 8)
    }
}

impl Default for SimpleRng {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let mut a = SimpleRng::new(0);
        let mut b = SimpleRng::new(1);
        assert_eq!(a.next_u32(), b.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        let mut seen = [false; 5];
        for _ in 0..500 {
            let v = rng.next_range(5);
            assert!(v < 5);
            seen[v as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
        assert_eq!(rng.next_range(0), 0);
    }

    #[test]
    fn test_pick() {
        let mut rng = SimpleRng::new(3);
        let empty: [u8; 0] = [];
        assert!(rng.pick(&empty).is_none());
        assert_eq!(rng.pick(&[42]), Some(&42));
    }

    #[test]
    fn test_resume_from_state() {
        let mut rng = SimpleRng::new(99);
        rng.next_u32();
        let mut resumed = SimpleRng::new(rng.state());
        assert_eq!(rng.next_u32(), resumed.next_u32());
    }

    #[test]
    fn test_color_is_24_bit() {
        let mut rng = SimpleRng::new(5);
        for _ in 0..50 {
            assert!(rng.next_color().0 <= 0xFF_FFFF);
        }
    }
}
