//! Proptest strategies for regions.

use std::ops::Range;

use proptest::prelude::*;
use swath_core::Point;
use swath_region::Region;

fn from_cells(width: usize, height: usize, cells: &[bool]) -> Region {
    Region::from_fn(width, height, |x, y| cells[x * height + y])
}

/// A region with dimensions drawn from the ranges and each cell on with
/// probability 1/2.
pub fn region(widths: Range<usize>, heights: Range<usize>) -> impl Strategy<Value = Region> {
    (widths, heights)
        .prop_flat_map(|(w, h)| (Just(w), Just(h), prop::collection::vec(any::<bool>(), w * h)))
        .prop_map(|(w, h, cells)| from_cells(w, h, &cells))
}

/// A region whose cells are on with probability `density`.
pub fn sparse_region(
    widths: Range<usize>,
    heights: Range<usize>,
    density: f64,
) -> impl Strategy<Value = Region> {
    (widths, heights)
        .prop_flat_map(move |(w, h)| {
            (
                Just(w),
                Just(h),
                prop::collection::vec(prop::bool::weighted(density), w * h),
            )
        })
        .prop_map(|(w, h, cells)| from_cells(w, h, &cells))
}

/// Two regions of identical dimensions.
pub fn region_pair(
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

/// A region together with one of its cells (in bounds, on or off).
pub fn region_and_point(
    widths: Range<usize>,
    heights: Range<usize>,
) -> impl Strategy<Value = (Region, Point)> {
    region(widths, heights).prop_flat_map(|r| {
        let (w, h) = (r.width().max(1) as i32, r.height().max(1) as i32);
        (Just(r), (0..w, 0..h).prop_map(|(x, y)| Point::new(x, y)))
    })
}
