//! Rank queries and random / quasi-random selection.
//!
//! Cells are ranked in column-major order. Rank queries go through the
//! cumulative tally, so the first query after a mutation pays one pass
//! over the words and later ones are a binary search.

use rand::seq::index;
use rand::Rng;

use swath_core::bits::{approximate_bits, select_bit};
use swath_core::Point;

use crate::blue::{blue_levels, BLUE_LEVEL_COUNT};
use crate::convert::{fraction_to_bits, tight_code};
use crate::region::Region;

/// Fractional part of the inverse golden ratio, the step of the R1
/// low-discrepancy sequence in one dimension.
const R1_STEP: f64 = 0.618_033_988_749_894_9;

/// Requested count for a fraction of `size`, capped by `limit`.
fn target_count(size: usize, fraction: f64, limit: Option<usize>) -> usize {
    let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
    let wanted = (fraction * size as f64).round() as usize;
    limit.map_or(wanted, |l| wanted.min(l)).min(size)
}

impl Region {
    // ── Rank queries ────────────────────────────────────────────

    /// The `k`-th on cell in column-major order, counting from 0.
    pub fn nth(&self, k: usize) -> Option<Point> {
        let tally = self.tallied();
        if k >= tally.total {
            return None;
        }
        let i = tally.counts.partition_point(|&c| c <= k);
        let before = if i == 0 { 0 } else { tally.counts[i - 1] };
        let bit = select_bit(self.data[i], (k - before) as u32)?;
        Some(self.point_of(i, bit))
    }

    /// The on cell at `fraction` of the way through the column-major
    /// ordering. `fraction` is clamped to `[0, 1]`.
    pub fn at_fraction(&self, fraction: f64) -> Option<Point> {
        let size = self.size();
        if size == 0 {
            return None;
        }
        let fraction = if fraction.is_nan() { 0.0 } else { fraction.clamp(0.0, 1.0) };
        let k = ((fraction * size as f64) as usize).min(size - 1);
        self.nth(k)
    }

    /// [`at_fraction`](Region::at_fraction) packed as `y * width + x`.
    ///
    /// `None` also when the packed value does not fit in an `i32`.
    pub fn at_fraction_tight(&self, fraction: f64) -> Option<i32> {
        self.at_fraction(fraction)
            .and_then(|p| tight_code(p, self.width))
    }

    // ── Random selection ────────────────────────────────────────

    /// A uniformly chosen on cell.
    pub fn single_random<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Point> {
        let size = self.size();
        if size == 0 {
            return None;
        }
        self.nth(rng.random_range(0..size))
    }

    /// `count` distinct on cells chosen uniformly, or every on cell if
    /// there are fewer than `count`. Returned in column-major order.
    pub fn random_points<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<Point> {
        let size = self.size();
        if count >= size {
            return self.points();
        }
        let mut ranks = index::sample(rng, size, count).into_vec();
        ranks.sort_unstable();
        ranks.into_iter().filter_map(|k| self.nth(k)).collect()
    }

    /// Keep exactly `count` uniformly chosen on cells (or all of them if
    /// there are fewer).
    pub fn random_region<R: Rng + ?Sized>(&mut self, rng: &mut R, count: usize) -> &mut Self {
        let picked = self.random_points(rng, count);
        self.clear().insert_several(picked)
    }

    /// Keep each on cell with probability close to `preservation`.
    pub fn deteriorate<R: Rng + ?Sized>(&mut self, rng: &mut R, preservation: f64) -> &mut Self {
        let bits = fraction_to_bits(preservation);
        for w in &mut self.data {
            *w &= approximate_bits(rng, bits);
        }
        self.touch();
        self
    }

    /// Randomly pick on cells that are pairwise more than `min_distance`
    /// apart in Chebyshev distance, until none are left or `limit` are
    /// chosen.
    pub fn random_scatter<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
        min_distance: u32,
        limit: Option<usize>,
    ) -> Vec<Point> {
        let limit = limit.unwrap_or(usize::MAX);
        // Largest radius whose box side still fits in an i32.
        let d = min_distance.min((i32::MAX as u32 - 1) / 2) as i32;
        let side = 2 * d + 1;
        let mut remaining = self.clone();
        let mut out = Vec::new();
        while out.len() < limit {
            let Some(p) = remaining.single_random(rng) else {
                break;
            };
            remaining.remove_rectangle(p.x - d, p.y - d, side, side);
            out.push(p);
        }
        out
    }

    /// Replace the region with a [`random_scatter`](Region::random_scatter)
    /// of itself.
    pub fn random_scatter_region<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        min_distance: u32,
        limit: Option<usize>,
    ) -> &mut Self {
        let picked = self.random_scatter(rng, min_distance, limit);
        self.clear().insert_several(picked)
    }

    // ── Deterministic selection ─────────────────────────────────

    /// Ranks chosen by the R1 sequence, distinct and in selection order.
    fn quasi_random_ranks(&self, fraction: f64, limit: Option<usize>) -> Vec<usize> {
        let size = self.size();
        let target = target_count(size, fraction, limit);
        let mut taken = vec![false; size];
        let mut ranks = Vec::with_capacity(target);
        let mut t = 0.5;
        while ranks.len() < target {
            let mut k = ((t * size as f64) as usize).min(size - 1);
            // Collisions probe forward to the next free rank.
            while taken[k] {
                k = (k + 1) % size;
            }
            taken[k] = true;
            ranks.push(k);
            t = (t + R1_STEP).fract();
        }
        ranks
    }

    /// A deterministic, evenly spread subset of about `fraction` of the
    /// on cells, at most `limit` of them.
    pub fn quasi_random_points(&self, fraction: f64, limit: Option<usize>) -> Vec<Point> {
        let mut ranks = self.quasi_random_ranks(fraction, limit);
        ranks.sort_unstable();
        ranks.into_iter().filter_map(|k| self.nth(k)).collect()
    }

    /// Keep only [`quasi_random_points`](Region::quasi_random_points).
    pub fn quasi_random_region(&mut self, fraction: f64, limit: Option<usize>) -> &mut Self {
        let picked = self.quasi_random_points(fraction, limit);
        self.clear().insert_several(picked)
    }

    /// Keep a blue-noise subset of about `fraction` of the on cells, at
    /// most `limit` of them.
    ///
    /// Uses the densest blue-noise level that does not exceed the target.
    /// If even the sparsest level is too dense, an evenly spaced subset of
    /// that level is kept instead, so the result has exactly the target
    /// size. The result depends only on the input.
    pub fn separated_region_blue(&mut self, fraction: f64, limit: Option<usize>) -> &mut Self {
        let target = target_count(self.size(), fraction, limit);
        if target == 0 {
            return self.clear();
        }
        let levels = blue_levels();
        let masked = |level: usize| {
            let mut r = self.clone();
            r.and_wrapping64(&levels[level]);
            r
        };
        // Levels are nested, so counts grow with the level index.
        let (mut lo, mut hi) = (0usize, BLUE_LEVEL_COUNT);
        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if masked(mid).size() <= target {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        if lo > 0 {
            let chosen = masked(lo - 1);
            log::trace!("blue level {} keeps {} of {target} cells", lo - 1, chosen.size());
            self.remake(&chosen);
            return self;
        }
        let sparsest = masked(0);
        let m = sparsest.size();
        let picked: Vec<Point> = (0..target)
            .filter_map(|j| sparsest.nth(j * m / target + m / (2 * target)))
            .collect();
        self.clear().insert_several(picked)
    }

    /// The cells [`separated_region_blue`](Region::separated_region_blue)
    /// would keep, in column-major order.
    pub fn separated_blue(&self, fraction: f64, limit: Option<usize>) -> Vec<Point> {
        let mut copy = self.clone();
        copy.separated_region_blue(fraction, limit);
        copy.points()
    }
}
