//! The packed [`Region`] bit-grid and its storage-level operations.
//!
//! Storage is column-major and y-banded: for a grid of height `h`,
//! `y_sections = ceil(h / 64)` words hold one column, and word
//! `data[x * y_sections + s]` holds rows `s * 64 .. s * 64 + 63` of column
//! `x`. Bits at `y >= height` in the final band are always zero; every
//! operation that could set them re-masks with `y_end_mask`.

use std::cell::OnceCell;
use std::fmt;
use std::hash::{Hash, Hasher};

use swath_core::bits::{end_mask, sections_for, WORD_BITS};
use swath_core::{Point, RegionError};

/// Cumulative popcounts over the word array.
///
/// `counts[i]` is the number of on cells in words `0..=i`; `total` is the
/// last entry (or 0 for an empty grid).
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct Tally {
    pub(crate) total: usize,
    pub(crate) counts: Vec<usize>,
}

impl Tally {
    fn build(data: &[u64]) -> Self {
        let mut running = 0usize;
        let counts: Vec<usize> = data
            .iter()
            .map(|w| {
                running += w.count_ones() as usize;
                running
            })
            .collect();
        Self {
            total: running,
            counts,
        }
    }
}

/// A dense on/off state over every cell of a `width × height` grid.
///
/// Most methods mutate in place and return `&mut Self` so calls chain;
/// copy first with [`Clone`] when the original must be kept.
///
/// # Examples
///
/// ```
/// use swath_region::Region;
///
/// let mut r = Region::new(10, 10);
/// r.insert(5, 5);
/// r.expand();
/// assert_eq!(r.size(), 5);
/// ```
#[derive(Clone)]
pub struct Region {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) y_sections: usize,
    pub(crate) y_end_mask: u64,
    pub(crate) data: Vec<u64>,
    /// Empty while stale. Every mutation resets it.
    pub(crate) tally: OnceCell<Tally>,
}

impl Region {
    /// Create an all-off region.
    pub fn new(width: usize, height: usize) -> Self {
        // A grid with no cells collapses to 0×0.
        let (width, height) = if width == 0 || height == 0 {
            (0, 0)
        } else {
            (width, height)
        };
        let y_sections = sections_for(height);
        Self {
            width,
            height,
            y_sections,
            y_end_mask: end_mask(height),
            data: vec![0; width * y_sections],
            tally: OnceCell::new(),
        }
    }

    /// Create an all-on region.
    pub fn filled(width: usize, height: usize) -> Self {
        let mut r = Self::new(width, height);
        r.fill(true);
        r
    }

    /// Build a region directly from its column-major word array.
    ///
    /// Padding bits past `height` are cleared.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DimensionMismatch`] if `words.len()` is not
    /// `width * ceil(height / 64)`, saturating at `usize::MAX`.
    pub fn from_words(width: usize, height: usize, words: Vec<u64>) -> Result<Self, RegionError> {
        // Validate before allocating.
        let expected = if width == 0 || height == 0 {
            0
        } else {
            width
                .checked_mul(sections_for(height))
                .unwrap_or(usize::MAX)
        };
        if words.len() != expected {
            return Err(RegionError::DimensionMismatch {
                expected,
                found: words.len(),
            });
        }
        let mut r = Self::new(width, height);
        r.data = words;
        r.mask_end();
        Ok(r)
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of 64-bit words per column.
    pub fn y_sections(&self) -> usize {
        self.y_sections
    }

    /// The raw column-major word array.
    pub fn words(&self) -> &[u64] {
        &self.data
    }

    /// Zero the region at the given dimensions.
    ///
    /// The existing word array is reused when the dimensions are
    /// unchanged; otherwise it is reallocated.
    pub fn resize(&mut self, width: usize, height: usize) -> &mut Self {
        if width == self.width && height == self.height {
            self.data.fill(0);
            self.touch();
        } else {
            *self = Self::new(width, height);
        }
        self
    }

    /// Copy `other`'s dimensions and contents into this region, reusing
    /// storage when the sizes already match.
    pub fn remake(&mut self, other: &Region) -> &mut Self {
        if self.width == other.width && self.height == other.height {
            self.data.copy_from_slice(&other.data);
            self.tally = other.tally.clone();
        } else {
            self.clone_from(other);
        }
        self
    }

    // ── Internal helpers ────────────────────────────────────────

    /// Drop the cached tally. Called by every mutation.
    #[inline]
    pub(crate) fn touch(&mut self) {
        self.tally.take();
    }

    /// Clear padding bits in the final band of every column.
    pub(crate) fn mask_end(&mut self) {
        self.touch();
        if self.y_sections == 0 || self.y_end_mask == u64::MAX {
            return;
        }
        let ys = self.y_sections;
        let mask = self.y_end_mask;
        for x in 0..self.width {
            self.data[x * ys + ys - 1] &= mask;
        }
    }

    /// The bands of column `x`.
    #[inline]
    pub(crate) fn column(&self, x: usize) -> &[u64] {
        let ys = self.y_sections;
        &self.data[x * ys..(x + 1) * ys]
    }

    /// Word index and bit mask for `(x, y)`, or `None` out of bounds.
    #[inline]
    pub(crate) fn locate(&self, x: i32, y: i32) -> Option<(usize, u64)> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((
            x * self.y_sections + y / WORD_BITS,
            1u64 << (y % WORD_BITS),
        ))
    }

    /// Point for bit `bit` of word `index`.
    #[inline]
    pub(crate) fn point_of(&self, index: usize, bit: u32) -> Point {
        let x = index / self.y_sections;
        let y = (index % self.y_sections) * WORD_BITS + bit as usize;
        Point::new(x as i32, y as i32)
    }

    /// Set rows `y0..y1` (clamped) of column `x` to `on`.
    fn set_column_range(&mut self, x: usize, y0: usize, y1: usize, on: bool) {
        let y1 = y1.min(self.height);
        if y0 >= y1 {
            return;
        }
        let ys = self.y_sections;
        for s in y0 / WORD_BITS..=(y1 - 1) / WORD_BITS {
            let lo = (s * WORD_BITS).max(y0) - s * WORD_BITS;
            let hi = (((s + 1) * WORD_BITS).min(y1) - s * WORD_BITS) as u32;
            let upper = if hi == 64 { u64::MAX } else { (1u64 << hi) - 1 };
            let mask = upper & !((1u64 << lo) - 1);
            if on {
                self.data[x * ys + s] |= mask;
            } else {
                self.data[x * ys + s] &= !mask;
            }
        }
    }

    // ── Cell access ─────────────────────────────────────────────

    /// Whether `(x, y)` is on. Out-of-bounds cells are off.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .is_some_and(|(i, bit)| self.data[i] & bit != 0)
    }

    /// Whether `p` is on.
    pub fn contains(&self, p: Point) -> bool {
        self.get(p.x, p.y)
    }

    /// Set `(x, y)` to `value`. Out-of-bounds cells are ignored.
    pub fn set(&mut self, value: bool, x: i32, y: i32) -> &mut Self {
        if let Some((i, bit)) = self.locate(x, y) {
            if value {
                self.data[i] |= bit;
            } else {
                self.data[i] &= !bit;
            }
            self.touch();
        }
        self
    }

    /// Turn `(x, y)` on.
    pub fn insert(&mut self, x: i32, y: i32) -> &mut Self {
        self.set(true, x, y)
    }

    /// Turn `(x, y)` off.
    pub fn remove(&mut self, x: i32, y: i32) -> &mut Self {
        self.set(false, x, y)
    }

    /// Turn `p` on.
    pub fn insert_point(&mut self, p: Point) -> &mut Self {
        self.set(true, p.x, p.y)
    }

    /// Turn `p` off.
    pub fn remove_point(&mut self, p: Point) -> &mut Self {
        self.set(false, p.x, p.y)
    }

    /// Turn every point on.
    pub fn insert_several<I: IntoIterator<Item = Point>>(&mut self, points: I) -> &mut Self {
        for p in points {
            self.set(true, p.x, p.y);
        }
        self
    }

    /// Turn every point off.
    pub fn remove_several<I: IntoIterator<Item = Point>>(&mut self, points: I) -> &mut Self {
        for p in points {
            self.set(false, p.x, p.y);
        }
        self
    }

    fn rectangle(&mut self, x: i32, y: i32, w: i32, h: i32, on: bool) -> &mut Self {
        let x0 = x.max(0) as i64;
        let y0 = y.max(0) as i64;
        let x1 = (i64::from(x) + i64::from(w.max(0))).min(self.width as i64);
        let y1 = (i64::from(y) + i64::from(h.max(0))).min(self.height as i64);
        if x0 >= x1 || y0 >= y1 {
            return self;
        }
        for cx in x0 as usize..x1 as usize {
            self.set_column_range(cx, y0 as usize, y1 as usize, on);
        }
        self.touch();
        self
    }

    /// Turn on the `w × h` rectangle whose top-left corner is `(x, y)`,
    /// clipped to the grid.
    pub fn insert_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32) -> &mut Self {
        self.rectangle(x, y, w, h, true)
    }

    /// Turn off the `w × h` rectangle whose top-left corner is `(x, y)`,
    /// clipped to the grid.
    pub fn remove_rectangle(&mut self, x: i32, y: i32, w: i32, h: i32) -> &mut Self {
        self.rectangle(x, y, w, h, false)
    }

    /// Turn on every cell within Euclidean `radius` of `center`.
    pub fn insert_circle(&mut self, center: Point, radius: i32) -> &mut Self {
        if radius < 0 {
            return self;
        }
        let r2 = i64::from(radius) * i64::from(radius);
        for dx in -radius..=radius {
            let rem = r2 - i64::from(dx) * i64::from(dx);
            let half = (rem as f64).sqrt().floor() as i32;
            let cx = center.x + dx;
            if cx < 0 || cx as usize >= self.width {
                continue;
            }
            let top = i64::from(center.y - half).max(0);
            let bottom = i64::from(center.y + half + 1);
            if bottom <= top {
                continue;
            }
            let bottom = bottom.min(self.height as i64) as usize;
            self.set_column_range(cx as usize, top as usize, bottom, true);
        }
        self.touch();
        self
    }

    /// Set every cell to `on`.
    pub fn fill(&mut self, on: bool) -> &mut Self {
        self.data.fill(if on { u64::MAX } else { 0 });
        self.mask_end();
        self
    }

    /// Turn every cell off.
    pub fn clear(&mut self) -> &mut Self {
        self.fill(false)
    }

    /// Whether no cell is on.
    pub fn is_empty(&self) -> bool {
        match self.tally.get() {
            Some(t) => t.total == 0,
            None => self.data.iter().all(|&w| w == 0),
        }
    }

    /// Whether every on cell of `other` is also on here (subset test over
    /// the overlap; cells of `other` outside this grid count as missing).
    pub fn contains_all(&self, other: &Region) -> bool {
        let oys = other.y_sections;
        for x in 0..other.width {
            for s in 0..oys {
                let theirs = other.data[x * oys + s];
                if theirs == 0 {
                    continue;
                }
                let mine = if x < self.width && s < self.y_sections {
                    self.data[x * self.y_sections + s]
                } else {
                    0
                };
                if theirs & !mine != 0 {
                    return false;
                }
            }
        }
        true
    }

    /// Whether any cell is on in both regions.
    pub fn intersects(&self, other: &Region) -> bool {
        let w = self.width.min(other.width);
        let ys = self.y_sections.min(other.y_sections);
        (0..w).any(|x| {
            (0..ys).any(|s| {
                self.data[x * self.y_sections + s] & other.data[x * other.y_sections + s] != 0
            })
        })
    }

    /// The first on cell in column-major order.
    pub fn first(&self) -> Option<Point> {
        self.data
            .iter()
            .position(|&w| w != 0)
            .map(|i| self.point_of(i, self.data[i].trailing_zeros()))
    }

    /// The last on cell in column-major order.
    pub fn last(&self) -> Option<Point> {
        self.data
            .iter()
            .rposition(|&w| w != 0)
            .map(|i| self.point_of(i, 63 - self.data[i].leading_zeros()))
    }

    /// Iterate over on cells in column-major order.
    pub fn iter(&self) -> Cells<'_> {
        Cells {
            region: self,
            index: 0,
            current: self.data.first().copied().unwrap_or(0),
        }
    }
}

/// Iterator over the on cells of a [`Region`], created by [`Region::iter`].
pub struct Cells<'a> {
    region: &'a Region,
    index: usize,
    current: u64,
}

impl Iterator for Cells<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros();
                self.current &= self.current - 1;
                return Some(self.region.point_of(self.index, bit));
            }
            self.index += 1;
            self.current = *self.region.data.get(self.index)?;
        }
    }
}

impl<'a> IntoIterator for &'a Region {
    type Item = Point;
    type IntoIter = Cells<'a>;

    fn into_iter(self) -> Cells<'a> {
        self.iter()
    }
}

impl Default for Region {
    fn default() -> Self {
        Self::new(0, 0)
    }
}

impl PartialEq for Region {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.data == other.data
    }
}

impl Eq for Region {}

impl Hash for Region {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.width.hash(state);
        self.height.hash(state);
        self.data.hash(state);
    }
}

impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Region")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("on", &self.data.iter().map(|w| w.count_ones() as usize).sum::<usize>())
            .finish()
    }
}

impl Region {
    /// The cached tally, rebuilding it if stale.
    pub(crate) fn tallied(&self) -> &Tally {
        self.tally.get_or_init(|| Tally::build(&self.data))
    }

    /// Force the rank cache to be rebuilt now.
    pub fn tally(&mut self) -> &mut Self {
        self.touch();
        let _ = self.tallied();
        self
    }

    /// Number of on cells. Uses the cached tally, building it if stale.
    pub fn size(&self) -> usize {
        self.tallied().total
    }
}
