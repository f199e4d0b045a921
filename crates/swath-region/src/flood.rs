//! Bounded flood fills.
//!
//! Every fill here grows the region only into cells that are on in
//! `bounds`. `bounds` may have different dimensions; cells outside it
//! count as off, so the result never leaves `bounds ∪ original`.

use indexmap::IndexSet;
use rand::Rng;

use swath_core::bits::approximate_bits;
use swath_core::Point;

use crate::convert::fraction_to_bits;
use crate::region::Region;

impl Region {
    /// The off cells one four-way step would reach inside `bounds`.
    fn fringe_within(&self, bounds: &Region) -> Region {
        let mut ring = self.clone();
        ring.rebuild(|g, x, s| {
            (g.vertical_or(x, s) | g.word(x - 1, s) | g.word(x + 1, s))
                & !g.word(x, s)
                & bounds.word_or_zero(x, s)
        });
        ring
    }

    // ── Flood ───────────────────────────────────────────────────

    /// Grow one four-way step, only into cells that are on in `bounds`.
    pub fn flood(&mut self, bounds: &Region) -> &mut Self {
        self.rebuild(|g, x, s| {
            g.word(x, s)
                | ((g.vertical_or(x, s) | g.word(x - 1, s) | g.word(x + 1, s))
                    & bounds.word_or_zero(x, s))
        });
        self
    }

    /// Flood up to `amount` times, stopping once the fill saturates.
    pub fn flood_n(&mut self, bounds: &Region, amount: usize) -> &mut Self {
        self.repeat(amount, |r| {
            r.flood(bounds);
        })
    }

    /// Every state of up to `amount` successive floods.
    pub fn flood_series(&self, bounds: &Region, amount: usize) -> Vec<Region> {
        self.series(amount, |r| {
            r.flood(bounds);
        })
    }

    /// Every state of successive floods until the fill saturates.
    pub fn flood_series_to_limit(&self, bounds: &Region) -> Vec<Region> {
        self.series_to_limit(|r| {
            r.flood(bounds);
        })
    }

    /// Grow one eight-way step, only into cells that are on in `bounds`.
    pub fn flood8way(&mut self, bounds: &Region) -> &mut Self {
        self.rebuild(|g, x, s| {
            g.word(x, s)
                | ((g.vertical_or(x, s) | g.vertical_or(x - 1, s) | g.vertical_or(x + 1, s))
                    & bounds.word_or_zero(x, s))
        });
        self
    }

    /// Eight-way flood up to `amount` times.
    pub fn flood8way_n(&mut self, bounds: &Region, amount: usize) -> &mut Self {
        self.repeat(amount, |r| {
            r.flood8way(bounds);
        })
    }

    /// Every state of up to `amount` successive eight-way floods.
    pub fn flood8way_series(&self, bounds: &Region, amount: usize) -> Vec<Region> {
        self.series(amount, |r| {
            r.flood8way(bounds);
        })
    }

    /// Every state of successive eight-way floods until saturation.
    pub fn flood8way_series_to_limit(&self, bounds: &Region) -> Vec<Region> {
        self.series_to_limit(|r| {
            r.flood8way(bounds);
        })
    }

    // ── Randomized fills ────────────────────────────────────────

    /// Grow one random fringe cell at a time until the region holds
    /// `volume` cells or no in-bounds fringe is left.
    ///
    /// The fill stays four-way connected to the original cells. A region
    /// that already holds `volume` or more cells is unchanged.
    pub fn spill<R: Rng + ?Sized>(
        &mut self,
        bounds: &Region,
        volume: usize,
        rng: &mut R,
    ) -> &mut Self {
        if self.size() >= volume {
            return self;
        }
        let mut candidates: IndexSet<Point> = self.fringe_within(bounds).iter().collect();
        let mut size = self.size();
        while size < volume && !candidates.is_empty() {
            let pick = rng.random_range(0..candidates.len());
            let Some(p) = candidates.swap_remove_index(pick) else {
                break;
            };
            self.insert_point(p);
            size += 1;
            for n in p.neighbours4() {
                if bounds.contains(n) && n.within(self.width, self.height) && !self.contains(n) {
                    candidates.insert(n);
                }
            }
        }
        log::trace!("spill stopped at {size} cells with {} candidates left", candidates.len());
        self
    }

    /// Randomized flood: each of `amount` steps turns on roughly
    /// `density` of the in-bounds four-way fringe.
    ///
    /// Stops early once the fringe is empty. A step whose random mask
    /// misses every fringe cell adds nothing but still counts.
    pub fn splash<R: Rng + ?Sized>(
        &mut self,
        bounds: &Region,
        amount: usize,
        density: f64,
        rng: &mut R,
    ) -> &mut Self {
        let bits = fraction_to_bits(density);
        for _ in 0..amount {
            let mut ring = self.fringe_within(bounds);
            if ring.is_empty() {
                break;
            }
            for w in &mut ring.data {
                *w &= approximate_bits(rng, bits);
            }
            ring.touch();
            self.or(&ring);
        }
        self
    }
}
