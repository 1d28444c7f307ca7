// Seed & PRNG Module
// Derives 32-bit seeds from handles and drives the xorshift content stream.

/// Salt XORed into a profile seed so the reel stream never shadows the post stream
pub const REEL_STREAM_SALT: u32 = 0x9e37_79b9;

/// Derive a non-zero 32-bit seed from a string.
///
/// Polynomial rolling hash over UTF-16 code units: `acc = acc * 31 + unit`,
/// wrapping at 2^32. A zero result is coerced to 1 because xorshift has a
/// fixed point at zero.
pub fn seed_from(s: &str) -> u32 {
    let acc = s
        .encode_utf16()
        .fold(0u32, |acc, unit| acc.wrapping_mul(31).wrapping_add(unit as u32));
    if acc == 0 {
        1
    } else {
        acc
    }
}

/// Marsaglia xorshift32 (13, 17, 5) stream.
///
/// Every draw advances the state exactly once, so two streams built from the
/// same seed yield identical sequences as long as draws happen in the same
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    pub fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Stream seeded from the hash of `s`
    pub fn from_str_seed(s: &str) -> Self {
        Self::new(seed_from(s))
    }

    fn step(&mut self) -> u32 {
        let mut s = self.state;
        s ^= s << 13;
        s ^= s >> 17;
        s ^= s << 5;
        self.state = s;
        s
    }

    /// Next draw as a double: the updated state divided by 2^32 - 1
    pub fn next_f64(&mut self) -> f64 {
        self.step() as f64 / u32::MAX as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_from_known_values() {
        assert_eq!(seed_from("a"), 97);
        assert_eq!(seed_from("@"), 64);
        assert_eq!(seed_from("testuser"), 3_149_174_621);
        assert_eq!(seed_from("@testuser"), 3_436_205_981);
        assert_eq!(seed_from("profile_testuser"), 3_310_423_347);
    }

    #[test]
    fn test_seed_from_empty_is_one() {
        assert_eq!(seed_from(""), 1);
    }

    #[test]
    fn test_seed_from_adjacent_handles() {
        assert_eq!(seed_from("user1"), 111_578_566);
        assert_eq!(seed_from("user2"), 111_578_567);
    }

    #[test]
    fn test_seed_from_counts_utf16_units() {
        // U+1F600 is a surrogate pair: 0xD83D, 0xDE00
        let expected = 0xD83Du32.wrapping_mul(31).wrapping_add(0xDE00);
        assert_eq!(seed_from("\u{1F600}"), expected);
    }

    #[test]
    fn test_seed_from_long_input_wraps() {
        let long = "x".repeat(10_000);
        assert_ne!(seed_from(&long), 0);
        assert_eq!(seed_from(&long), seed_from(&long));
    }

    #[test]
    fn test_xorshift_known_sequence() {
        let mut rng = XorShift32::new(1);
        assert_eq!(rng.step(), 270_369);
        assert_eq!(rng.step(), 67_634_689);
        assert_eq!(rng.step(), 2_647_435_461);
    }

    #[test]
    fn test_next_f64_divides_by_u32_max() {
        let mut rng = XorShift32::new(1);
        let draw = rng.next_f64();
        assert_eq!(draw, 270_369.0 / 4_294_967_295.0);
        assert_eq!(rng.state, 270_369);
    }

    #[test]
    fn test_draws_stay_in_unit_interval() {
        let mut rng = XorShift32::from_str_seed("testuser");
        for _ in 0..1000 {
            let draw = rng.next_f64();
            assert!((0.0..=1.0).contains(&draw));
        }
    }

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = XorShift32::new(42);
        let mut b = XorShift32::new(42);
        for _ in 0..100 {
            assert_eq!(a.next_f64().to_bits(), b.next_f64().to_bits());
        }
    }
}
