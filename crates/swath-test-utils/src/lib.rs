//! Test utilities for swath development.
//!
//! Provides proptest strategies that generate [`Region`]s of bounded size
//! (see [`strategies`]), hand-drawn region fixtures (see [`fixtures`]) and
//! invariant checks shared by integration tests and benchmarks.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;
pub mod strategies;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use swath_region::Region;

/// A reproducible generator for tests.
pub fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Panic unless every padding bit past `height` is clear and the word
/// array has the expected length.
pub fn assert_padding_clear(r: &Region) {
    let ys = r.y_sections();
    assert_eq!(r.words().len(), r.width() * ys, "word array length");
    let used = r.height() % 64;
    if ys == 0 || used == 0 {
        return;
    }
    let mask = (1u64 << used) - 1;
    for x in 0..r.width() {
        let last = r.words()[x * ys + ys - 1];
        assert_eq!(last & !mask, 0, "padding set in column {x}");
    }
}

/// Panic unless `inner` is a subset of `outer`.
pub fn assert_subset(inner: &Region, outer: &Region) {
    assert!(
        outer.contains_all(inner),
        "{} cells of the inner region lie outside the outer region",
        inner.iter().filter(|p| !outer.contains(*p)).count()
    );
}
