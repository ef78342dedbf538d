//! Seeded randomness helpers.
//!
//! Every component draws from a generator created here so that a fixed
//! seed reproduces the same search.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used when a configuration does not provide one.
pub const DEFAULT_SEED: u64 = 1024 * 1024 - 1;

/// Creates the generator used by a search.
pub fn create_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Removes and returns a uniformly chosen element of `pool`.
///
/// Uses `swap_remove`, so the remaining order is perturbed deterministically.
pub fn take_random<T, R: Rng>(pool: &mut Vec<T>, rng: &mut R) -> Option<T> {
    if pool.is_empty() {
        return None;
    }
    let idx = rng.random_range(0..pool.len());
    Some(pool.swap_remove(idx))
}

/// Returns a uniformly chosen element of `items`.
pub fn pick<'a, T, R: Rng>(items: &'a [T], rng: &mut R) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    Some(&items[rng.random_range(0..items.len())])
}

/// Uniform draw between two bounds given in any order.
pub fn uniform_between<R: Rng>(a: f64, b: f64, rng: &mut R) -> f64 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    if lo == hi {
        lo
    } else {
        rng.random_range(lo..hi)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_seed_same_stream() {
        let mut a = create_rng(7);
        let mut b = create_rng(7);
        for _ in 0..10 {
            assert_eq!(a.random::<u64>(), b.random::<u64>());
        }
    }

    #[test]
    fn test_take_random_drains_pool() {
        let mut rng = create_rng(1);
        let mut pool = vec![1, 2, 3, 4];
        let mut taken = Vec::new();
        while let Some(x) = take_random(&mut pool, &mut rng) {
            taken.push(x);
        }
        taken.sort_unstable();
        assert_eq!(taken, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_uniform_between_handles_reversed_and_equal_bounds() {
        let mut rng = create_rng(3);
        for _ in 0..100 {
            let x = uniform_between(4.0, 2.0, &mut rng);
            assert!((2.0..4.0).contains(&x), "draw {x} out of [2, 4)");
        }
        assert_eq!(uniform_between(5.0, 5.0, &mut rng), 5.0);
    }

    #[test]
    fn test_pick_empty() {
        let mut rng = create_rng(3);
        let empty: [u8; 0] = [];
        assert!(pick(&empty, &mut rng).is_none());
    }
}
