//! Shared helpers for this crate's unit tests.

use std::ops::Range;

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::region::Region;

pub(crate) fn seeded(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Panic if any bit past `height` is set in a column's final band.
pub(crate) fn assert_padding_clear(r: &Region) {
    assert_eq!(r.words().len(), r.width() * r.y_sections());
    if r.y_sections() == 0 {
        return;
    }
    for x in 0..r.width() {
        let last = r.words()[x * r.y_sections() + r.y_sections() - 1];
        assert_eq!(last & !r.y_end_mask, 0, "padding set in column {x}");
    }
}

fn from_cells(width: usize, height: usize, cells: &[bool]) -> Region {
    Region::from_fn(width, height, |x, y| cells[x * height + y])
}

pub(crate) fn arb_region(
    widths: Range<usize>,
    heights: Range<usize>,
) -> impl Strategy<Value = Region> {
    (widths, heights)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), prop::collection::vec(any::<bool>(), w * h)))
        .prop_map(|(w, h, cells)| from_cells(w, h, &cells))
}

/// Two regions of the same dimensions.
pub(crate) fn arb_region_pair(
    widths: Range<usize>,
    heights: Range<usize>,
) -> impl Strategy<Value = (Region, Region)> {
    (widths, heights)
        .prop_flat_map(|(w, h)| {
            (
                Just(w),
                Just(h),
                prop::collection::vec(any::<bool>(), w * h),
                prop::collection::vec(any::<bool>(), w * h),
            )
        })
        .prop_map(|(w, h, a, b)| (from_cells(w, h, &a), from_cells(w, h, &b)))
}

/// `r` with its outermost ring of cells cleared.
pub(crate) fn interior(r: &Region) -> Region {
    let (w, h) = (r.width() as i32, r.height() as i32);
    Region::from_fn(r.width(), r.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        x > 0 && y > 0 && x < w - 1 && y < h - 1 && r.get(x, y)
    })
}

const ORTHOGONAL: [(i32, i32); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];
const DIAGONAL: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];

fn offsets(eight: bool) -> impl Iterator<Item = (i32, i32)> {
    let diagonals: &[(i32, i32)] = if eight { &DIAGONAL } else { &[] };
    ORTHOGONAL.into_iter().chain(diagonals.iter().copied())
}

/// Cell-by-cell expansion.
pub(crate) fn naive_expand(r: &Region, eight: bool) -> Region {
    Region::from_fn(r.width(), r.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        r.get(x, y) || offsets(eight).any(|(dx, dy)| r.get(x + dx, y + dy))
    })
}

/// Cell-by-cell retraction; neighbours outside the grid count as off.
pub(crate) fn naive_retract(r: &Region, eight: bool) -> Region {
    Region::from_fn(r.width(), r.height(), |x, y| {
        let (x, y) = (x as i32, y as i32);
        r.get(x, y) && offsets(eight).all(|(dx, dy)| r.get(x + dx, y + dy))
    })
}
