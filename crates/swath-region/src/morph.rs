//! Morphological growth and shrink operations.
//!
//! Four-way operations look at the N/S/E/W neighbours, eight-way ones add
//! the diagonals. The grid border counts as off, so retracting always
//! clears the outermost ring. Grids narrower than two columns are left
//! unchanged by the neighbourhood passes (expand, retract, connect, thin).
//!
//! `*_n` variants repeat a step up to `amount` times and stop early once
//! the size stops changing. `*_series` variants return a copy of every
//! intermediate state, at most `amount` of them, and also stop at the
//! fixed point. `*_series_to_limit` variants have no step cap.

use rand::Rng;

use crate::region::Region;

/// A single in-place step, such as [`Region::expand`].
type Step = fn(&mut Region) -> &mut Region;

fn by(step: Step) -> impl FnMut(&mut Region) {
    move |r| {
        step(r);
    }
}

impl Region {
    // ── Drivers ─────────────────────────────────────────────────

    pub(crate) fn repeat<F>(&mut self, amount: usize, mut step: F) -> &mut Self
    where
        F: FnMut(&mut Region),
    {
        let mut size = self.size();
        for _ in 0..amount {
            step(self);
            let next = self.size();
            if next == size {
                break;
            }
            size = next;
        }
        self
    }

    pub(crate) fn series<F>(&self, amount: usize, step: F) -> Vec<Region>
    where
        F: FnMut(&mut Region),
    {
        self.states_until_fixed(amount, step)
    }

    pub(crate) fn series_to_limit<F: FnMut(&mut Region)>(&self, step: F) -> Vec<Region> {
        self.states_until_fixed(usize::MAX, step)
    }

    /// Up to `amount` successive states, stopping once a step leaves the
    /// size unchanged. The unchanged state is not included.
    fn states_until_fixed<F>(&self, amount: usize, mut step: F) -> Vec<Region>
    where
        F: FnMut(&mut Region),
    {
        let mut current = self.clone();
        let mut size = current.size();
        let mut out = Vec::new();
        while out.len() < amount {
            step(&mut current);
            let next = current.size();
            if next == size {
                log::trace!("series reached a fixed point after {} steps", out.len());
                break;
            }
            size = next;
            out.push(current.clone());
        }
        out
    }

    /// Rings between consecutive states of a growing series.
    fn rings(&self, grown: Vec<Region>) -> Vec<Region> {
        let mut previous = self.clone();
        grown
            .into_iter()
            .map(|g| {
                let mut ring = g.clone();
                ring.and_not(&previous);
                previous = g;
                ring
            })
            .collect()
    }

    /// Rings peeled off between consecutive states of a shrinking series.
    fn peels(&self, shrunk: Vec<Region>) -> Vec<Region> {
        let mut previous = self.clone();
        shrunk
            .into_iter()
            .map(|s| {
                let mut ring = previous.clone();
                ring.and_not(&s);
                previous = s;
                ring
            })
            .collect()
    }

    // ── Expand ──────────────────────────────────────────────────

    /// Turn on every cell orthogonally adjacent to an on cell.
    pub fn expand(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        self.rebuild(|g, x, s| g.vertical_or(x, s) | g.word(x - 1, s) | g.word(x + 1, s));
        self
    }

    /// Expand up to `amount` times, stopping once nothing grows.
    pub fn expand_n(&mut self, amount: usize) -> &mut Self {
        self.repeat(amount, by(Region::expand))
    }

    /// Every state of up to `amount` successive expansions.
    pub fn expand_series(&self, amount: usize) -> Vec<Region> {
        self.series(amount, by(Region::expand))
    }

    /// Every state of successive expansions until the region stops growing.
    pub fn expand_series_to_limit(&self) -> Vec<Region> {
        self.series_to_limit(by(Region::expand))
    }

    /// Turn on every cell adjacent (diagonals included) to an on cell.
    pub fn expand8way(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        self.rebuild(|g, x, s| {
            g.vertical_or(x, s) | g.vertical_or(x - 1, s) | g.vertical_or(x + 1, s)
        });
        self
    }

    /// Expand eight-way up to `amount` times.
    pub fn expand8way_n(&mut self, amount: usize) -> &mut Self {
        self.repeat(amount, by(Region::expand8way))
    }

    /// Every state of up to `amount` successive eight-way expansions.
    pub fn expand8way_series(&self, amount: usize) -> Vec<Region> {
        self.series(amount, by(Region::expand8way))
    }

    /// Every state of successive eight-way expansions until stable.
    pub fn expand8way_series_to_limit(&self) -> Vec<Region> {
        self.series_to_limit(by(Region::expand8way))
    }

    // ── Retract ─────────────────────────────────────────────────

    /// Keep only cells whose four orthogonal neighbours are all on.
    pub fn retract(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        self.rebuild(|g, x, s| g.vertical_and(x, s) & g.word(x - 1, s) & g.word(x + 1, s));
        self
    }

    /// Retract up to `amount` times, stopping once nothing shrinks.
    pub fn retract_n(&mut self, amount: usize) -> &mut Self {
        self.repeat(amount, by(Region::retract))
    }

    /// Every state of up to `amount` successive retractions.
    pub fn retract_series(&self, amount: usize) -> Vec<Region> {
        self.series(amount, by(Region::retract))
    }

    /// Every state of successive retractions until the region stops
    /// shrinking (usually when it is empty).
    pub fn retract_series_to_limit(&self) -> Vec<Region> {
        self.series_to_limit(by(Region::retract))
    }

    /// Keep only cells whose eight neighbours are all on.
    pub fn retract8way(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        self.rebuild(|g, x, s| {
            g.vertical_and(x, s) & g.vertical_and(x - 1, s) & g.vertical_and(x + 1, s)
        });
        self
    }

    /// Retract eight-way up to `amount` times.
    pub fn retract8way_n(&mut self, amount: usize) -> &mut Self {
        self.repeat(amount, by(Region::retract8way))
    }

    /// Every state of up to `amount` successive eight-way retractions.
    pub fn retract8way_series(&self, amount: usize) -> Vec<Region> {
        self.series(amount, by(Region::retract8way))
    }

    /// Every state of successive eight-way retractions until stable.
    pub fn retract8way_series_to_limit(&self) -> Vec<Region> {
        self.series_to_limit(by(Region::retract8way))
    }

    // ── Fringe ──────────────────────────────────────────────────

    /// Replace the region with the cells one four-way step would add.
    pub fn fringe(&mut self) -> &mut Self {
        let original = self.clone();
        self.expand().and_not(&original)
    }

    /// Replace the region with the cells `amount` four-way steps would add.
    pub fn fringe_n(&mut self, amount: usize) -> &mut Self {
        let original = self.clone();
        self.expand_n(amount).and_not(&original)
    }

    /// The rings added by each of `amount` four-way expansions.
    pub fn fringe_series(&self, amount: usize) -> Vec<Region> {
        self.rings(self.expand_series(amount))
    }

    /// The rings added by four-way expansion until nothing more is added.
    pub fn fringe_series_to_limit(&self) -> Vec<Region> {
        self.rings(self.expand_series_to_limit())
    }

    /// Replace the region with the cells one eight-way step would add.
    pub fn fringe8way(&mut self) -> &mut Self {
        let original = self.clone();
        self.expand8way().and_not(&original)
    }

    /// Replace the region with the cells `amount` eight-way steps would add.
    pub fn fringe8way_n(&mut self, amount: usize) -> &mut Self {
        let original = self.clone();
        self.expand8way_n(amount).and_not(&original)
    }

    /// The rings added by each of `amount` eight-way expansions.
    pub fn fringe8way_series(&self, amount: usize) -> Vec<Region> {
        self.rings(self.expand8way_series(amount))
    }

    /// The rings added by eight-way expansion until nothing more is added.
    pub fn fringe8way_series_to_limit(&self) -> Vec<Region> {
        self.rings(self.expand8way_series_to_limit())
    }

    // ── Surface ─────────────────────────────────────────────────

    /// Replace the region with the cells one four-way retraction removes.
    pub fn surface(&mut self) -> &mut Self {
        let mut inner = self.clone();
        inner.retract();
        self.xor(&inner)
    }

    /// Replace the region with the cells `amount` four-way retractions
    /// remove.
    pub fn surface_n(&mut self, amount: usize) -> &mut Self {
        let mut inner = self.clone();
        inner.retract_n(amount);
        self.xor(&inner)
    }

    /// The layers peeled off by each of `amount` four-way retractions,
    /// outermost first.
    pub fn surface_series(&self, amount: usize) -> Vec<Region> {
        self.peels(self.retract_series(amount))
    }

    /// The layers peeled off by four-way retraction until nothing changes.
    pub fn surface_series_to_limit(&self) -> Vec<Region> {
        self.peels(self.retract_series_to_limit())
    }

    /// Replace the region with the cells one eight-way retraction removes.
    pub fn surface8way(&mut self) -> &mut Self {
        let mut inner = self.clone();
        inner.retract8way();
        self.xor(&inner)
    }

    /// Replace the region with the cells `amount` eight-way retractions
    /// remove.
    pub fn surface8way_n(&mut self, amount: usize) -> &mut Self {
        let mut inner = self.clone();
        inner.retract8way_n(amount);
        self.xor(&inner)
    }

    /// The layers peeled off by each of `amount` eight-way retractions.
    pub fn surface8way_series(&self, amount: usize) -> Vec<Region> {
        self.peels(self.retract8way_series(amount))
    }

    /// The layers peeled off by eight-way retraction until nothing changes.
    pub fn surface8way_series_to_limit(&self) -> Vec<Region> {
        self.peels(self.retract8way_series_to_limit())
    }

    // ── Connect ─────────────────────────────────────────────────

    /// Fill every off cell that sits between two on cells two apart
    /// horizontally or vertically.
    pub fn connect(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        self.rebuild(|g, x, s| {
            g.word(x, s)
                | (g.word(x - 1, s) & g.word(x + 1, s))
                | (g.north(x, s) & g.south(x, s))
        });
        self
    }

    /// Like [`connect`](Region::connect), and also fill cells between two
    /// on cells that are diagonal across them.
    pub fn connect8way(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        self.rebuild(|g, x, s| {
            g.word(x, s)
                | (g.word(x - 1, s) & g.word(x + 1, s))
                | (g.north(x, s) & g.south(x, s))
                | (g.north(x - 1, s) & g.south(x + 1, s))
                | (g.north(x + 1, s) & g.south(x - 1, s))
        });
        self
    }

    /// Turn diagonal steps into orthogonally connected lines.
    ///
    /// Orthogonal one-cell gaps are filled as in
    /// [`connect`](Region::connect). A bare diagonal step (two on cells
    /// touching only at a corner, with both corner cells off) gets exactly
    /// one bridge: the corner cell to the right of the left cell. A cell
    /// that would bridge a step up and a step down at the same time is
    /// left off, and existing right-angle corners are never thickened.
    pub fn connect_lines(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        self.rebuild(|g, x, s| {
            let west = g.word(x - 1, s);
            let down_step = west & g.south(x, s) & !g.south(x - 1, s);
            let up_step = west & g.north(x, s) & !g.north(x - 1, s);
            g.word(x, s)
                | (west & g.word(x + 1, s))
                | (g.north(x, s) & g.south(x, s))
                | (down_step ^ up_step)
        });
        self
    }

    // ── Thin ────────────────────────────────────────────────────

    /// Shrink the region without disconnecting it.
    ///
    /// Keeps the retracted core plus the original cells that border the
    /// ring the core would regrow into.
    pub fn thin(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        let mut core = self.clone();
        core.retract();
        let mut support = core.clone();
        support.expand().xor(self).expand().and(self);
        self.remake(&core);
        self.or(&support)
    }

    /// Eight-way version of [`thin`](Region::thin).
    pub fn thin8way(&mut self) -> &mut Self {
        if self.width < 2 {
            return self;
        }
        let mut core = self.clone();
        core.retract8way();
        let mut support = core.clone();
        support.expand8way().xor(self).expand8way().and(self);
        self.remake(&core);
        self.or(&support)
    }

    /// Thin repeatedly until the size stops changing.
    pub fn thin_fully(&mut self) -> &mut Self {
        self.repeat(usize::MAX, by(Region::thin))
    }

    /// Eight-way thin repeatedly until the size stops changing.
    pub fn thin_fully8way(&mut self) -> &mut Self {
        self.repeat(usize::MAX, by(Region::thin8way))
    }

    // ── Disperse ────────────────────────────────────────────────

    /// Keep only cells on a checkerboard (`x + y` even), so no two
    /// remaining cells are orthogonal neighbours.
    pub fn disperse(&mut self) -> &mut Self {
        let ys = self.y_sections;
        for x in 0..self.width {
            let mask = if x & 1 == 0 {
                0x5555_5555_5555_5555
            } else {
                0xAAAA_AAAA_AAAA_AAAA
            };
            for w in &mut self.data[x * ys..(x + 1) * ys] {
                *w &= mask;
            }
        }
        self.touch();
        self
    }

    /// Keep only cells with even `x` and even `y`, so no two remaining
    /// cells are adjacent in any direction.
    pub fn disperse8way(&mut self) -> &mut Self {
        let ys = self.y_sections;
        for x in 0..self.width {
            let mask = if x & 1 == 0 { 0x5555_5555_5555_5555 } else { 0 };
            for w in &mut self.data[x * ys..(x + 1) * ys] {
                *w &= mask;
            }
        }
        self.touch();
        self
    }

    /// Keep each cell with probability 1/2.
    pub fn disperse_random<R: Rng + ?Sized>(&mut self, rng: &mut R) -> &mut Self {
        for w in &mut self.data {
            *w &= rng.random::<u64>();
        }
        self.touch();
        self
    }
}
