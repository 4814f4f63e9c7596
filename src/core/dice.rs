//! Six-sided dice
//!
//! All randomness in a game comes from the world's seeded ChaCha8Rng, so a
//! seed fully determines every roll.

use rand::Rng;

/// A single d6 result (1..=6)
pub type Roll = u8;

pub fn roll_d6<R: Rng + ?Sized>(rng: &mut R) -> Roll {
    rng.gen_range(1..=6)
}

/// Roll `count` dice
pub fn roll_many<R: Rng + ?Sized>(rng: &mut R, count: u32) -> Vec<Roll> {
    (0..count).map(|_| roll_d6(rng)).collect()
}
