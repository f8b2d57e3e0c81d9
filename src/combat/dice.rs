//! Random draws for combat
//!
//! Every draw takes the RNG explicitly so a session can run from a seed.

use rand::Rng;

/// Chance that an attack misses outright
pub const MISS_CHANCE: f64 = 0.1;

/// Chance that a landed attack is a critical hit
pub const CRIT_CHANCE: f64 = 0.2;

/// Inclusive bounds of the base damage roll
pub const DAMAGE_ROLL: (i32, i32) = (8, 14);

/// Inclusive bounds of the heal roll
pub const HEAL_ROLL: (i32, i32) = (10, 19);

/// Roll a uniform integer in `min..=max`
pub fn roll_between<R: Rng + ?Sized>(rng: &mut R, min: i32, max: i32) -> i32 {
    rng.random_range(min..=max)
}

/// Return true with probability `chance`
pub fn roll_chance<R: Rng + ?Sized>(rng: &mut R, chance: f64) -> bool {
    rng.random::<f64>() < chance
}

/// The random inputs of a single attack, drawn before any state changes.
///
/// A missed attack draws nothing past the miss check, so `critical` is
/// false and `damage_roll` is zero in that case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackRolls {
    /// The attack whiffed
    pub missed: bool,
    /// The attack is a critical hit
    pub critical: bool,
    /// Base damage roll before attack power and defense
    pub damage_roll: i32,
}

impl AttackRolls {
    /// A landed, non-critical hit with the given damage roll
    pub fn hit(damage_roll: i32) -> Self {
        Self {
            missed: false,
            critical: false,
            damage_roll,
        }
    }

    /// A landed critical hit with the given damage roll
    pub fn critical(damage_roll: i32) -> Self {
        Self {
            missed: false,
            critical: true,
            damage_roll,
        }
    }

    /// A miss
    pub fn miss() -> Self {
        Self {
            missed: true,
            critical: false,
            damage_roll: 0,
        }
    }

    /// Draw miss, then crit, then the damage roll
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if roll_chance(rng, MISS_CHANCE) {
            return Self::miss();
        }

        let critical = roll_chance(rng, CRIT_CHANCE);
        let damage_roll = roll_between(rng, DAMAGE_ROLL.0, DAMAGE_ROLL.1);

        Self {
            missed: false,
            critical,
            damage_roll,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_roll_between_bounds() {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let roll = roll_between(&mut rng, DAMAGE_ROLL.0, DAMAGE_ROLL.1);
            assert!((8..=14).contains(&roll), "Roll {} outside 8..=14", roll);
        }
    }

    #[test]
    fn test_roll_between_hits_both_ends() {
        let mut rng = StdRng::seed_from_u64(11);
        let rolls: Vec<i32> = (0..1000)
            .map(|_| roll_between(&mut rng, HEAL_ROLL.0, HEAL_ROLL.1))
            .collect();

        assert!(rolls.contains(&10));
        assert!(rolls.contains(&19));
        assert!(rolls.iter().all(|r| (10..=19).contains(r)));
    }

    #[test]
    fn test_roll_chance_extremes() {
        let mut rng = StdRng::seed_from_u64(3);

        for _ in 0..100 {
            assert!(!roll_chance(&mut rng, 0.0));
            assert!(roll_chance(&mut rng, 1.0));
        }
    }

    #[test]
    fn test_attack_rolls_distribution() {
        let mut rng = StdRng::seed_from_u64(42);
        let rolls: Vec<AttackRolls> = (0..10_000).map(|_| AttackRolls::roll(&mut rng)).collect();

        let misses = rolls.iter().filter(|r| r.missed).count();
        let crits = rolls.iter().filter(|r| r.critical).count();

        // 10% miss, 20% of the remaining 90% crit
        assert!((700..1300).contains(&misses), "misses = {}", misses);
        assert!((1500..2100).contains(&crits), "crits = {}", crits);
    }

    #[test]
    fn test_missed_rolls_carry_nothing() {
        let mut rng = StdRng::seed_from_u64(5);

        for rolls in (0..1000).map(|_| AttackRolls::roll(&mut rng)) {
            if rolls.missed {
                assert!(!rolls.critical);
                assert_eq!(rolls.damage_roll, 0);
            } else {
                assert!((8..=14).contains(&rolls.damage_roll));
            }
        }
    }
}
