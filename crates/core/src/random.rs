//! Uniform selection from a candidate set.

use rand::Rng;

/// Draw a uniform index into a candidate set of `len` items.
///
/// Returns `None` for an empty set.
pub fn pick_index(len: u64) -> Option<u64> {
    pick_index_with(&mut rand::rng(), len)
}

/// Same as [`pick_index`] with a caller-supplied generator.
pub fn pick_index_with<R: Rng + ?Sized>(rng: &mut R, len: u64) -> Option<u64> {
    if len == 0 {
        None
    } else {
        Some(rng.random_range(0..len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn empty_set_yields_none() {
        assert_eq!(pick_index(0), None);
    }

    #[test]
    fn single_candidate_is_always_chosen() {
        for _ in 0..20 {
            assert_eq!(pick_index(1), Some(0));
        }
    }

    #[test]
    fn index_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1_000 {
            let idx = pick_index_with(&mut rng, 3).unwrap();
            assert!(idx < 3);
        }
    }

    #[test]
    fn every_candidate_is_reachable() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = [0u32; 4];
        for _ in 0..4_000 {
            seen[pick_index_with(&mut rng, 4).unwrap() as usize] += 1;
        }
        // Uniform draws put roughly 1000 in each bucket.
        assert!(seen.iter().all(|&n| n > 800), "skewed distribution: {seen:?}");
    }
}
