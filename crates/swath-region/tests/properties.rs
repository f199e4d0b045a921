//! Algebraic and topological laws checked with proptest.

use proptest::prelude::*;
use swath_region::Region;
use swath_test_utils::assert_padding_clear;
use swath_test_utils::strategies::{region, region_and_point, region_pair, sparse_region};

proptest! {
    #[test]
    fn insert_then_remove_touches_one_cell((r, p) in region_and_point(1..50, 1..150)) {
        let was_on = r.contains(p);
        let mut on = r.clone();
        on.insert_point(p);
        prop_assert!(on.contains(p));
        prop_assert_eq!(on.size(), r.size() + usize::from(!was_on));
        assert_padding_clear(&on);

        let mut off = on.clone();
        off.remove_point(p);
        prop_assert!(!off.contains(p));
        prop_assert_eq!(off.size(), on.size() - 1);
        if !was_on {
            prop_assert_eq!(off, r);
        }
    }

    #[test]
    fn xor_with_self_is_empty(r in region(0..60, 0..140)) {
        let mut x = r.clone();
        x.xor(&r);
        prop_assert!(x.is_empty());
    }

    #[test]
    fn double_negation_is_identity(r in region(0..60, 0..140)) {
        let mut n = r.clone();
        n.not();
        assert_padding_clear(&n);
        n.not();
        prop_assert_eq!(n, r);
    }

    #[test]
    fn de_morgan((a, b) in region_pair(1..40, 1..140)) {
        let mut lhs = a.clone();
        lhs.and(&b).not();
        let mut na = a.clone();
        na.not();
        let mut nb = b.clone();
        nb.not();
        na.or(&nb);
        prop_assert_eq!(lhs, na);
    }

    #[test]
    fn surface_never_grows(r in region(2..40, 1..140)) {
        let mut s = r.clone();
        s.surface8way();
        prop_assert!(s.size() <= r.size());
    }

    #[test]
    fn expansion_reaches_fixed_point(r in sparse_region(2..40, 1..100, 0.02)) {
        let series = r.expand8way_series_to_limit();
        prop_assert!(series.len() <= r.width() + r.height());
        if let Some(last) = series.last() {
            let mut again = last.clone();
            again.expand8way();
            prop_assert_eq!(&again, last);
        }
    }

    #[test]
    fn flood_stays_in_bounds((seed, bounds) in region_pair(1..40, 1..140)) {
        let mut inside = seed.clone();
        inside.and(&bounds);
        let mut filled = inside.clone();
        filled.flood8way_n(&bounds, 10);
        prop_assert!(bounds.contains_all(&filled));
        assert_padding_clear(&filled);
    }

    #[test]
    fn tally_matches_iteration(r in region(0..30, 0..200)) {
        prop_assert_eq!(r.size(), r.iter().count());
        let mut grown = r.clone();
        grown.expand();
        prop_assert_eq!(grown.size(), grown.iter().count());
    }

    #[test]
    fn random_region_has_exact_size(
        r in region(1..30, 1..100),
        count in 0usize..200,
        seed in any::<u64>(),
    ) {
        let mut rng = swath_test_utils::seeded(seed);
        let mut picked = r.clone();
        picked.random_region(&mut rng, count);
        prop_assert_eq!(picked.size(), count.min(r.size()));
        prop_assert!(r.contains_all(&picked));
    }
}
