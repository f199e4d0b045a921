//! Construction from and extraction to plain arrays and point lists.
//!
//! Two-dimensional inputs are indexed `map[x][y]`: the outer slice is the
//! width and each inner row is one column. Ragged inner rows are allowed;
//! the height is taken from `map[0]` and missing entries count as off.
//!
//! Every `from_*` constructor has a `refill_*` twin that writes into an
//! existing region, reusing its word array when the dimensions match.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use swath_core::bits::{approximate_bits, WORD_BITS};
use swath_core::{Point, RegionError};

use crate::region::Region;

fn dims<T, R: AsRef<[T]>>(map: &[R]) -> (usize, usize) {
    let height = map.first().map_or(0, |col| col.as_ref().len());
    (map.len(), height)
}

fn cell<T, R: AsRef<[T]>>(map: &[R], x: usize, y: usize) -> Option<&T> {
    map.get(x).and_then(|col| col.as_ref().get(y))
}

impl Region {
    /// Zero the region at `width × height` and turn on every cell for
    /// which `on(x, y)` holds.
    pub fn refill_with<F>(&mut self, width: usize, height: usize, mut on: F) -> &mut Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        self.resize(width, height);
        let ys = self.y_sections;
        for x in 0..self.width {
            for y in 0..self.height {
                if on(x, y) {
                    self.data[x * ys + y / WORD_BITS] |= 1u64 << (y % WORD_BITS);
                }
            }
        }
        self.touch();
        self
    }

    /// Build a region from a predicate over every cell.
    pub fn from_fn<F>(width: usize, height: usize, on: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let mut r = Self::new(width, height);
        r.refill_with(width, height, on);
        r
    }

    // ── Boolean sources ─────────────────────────────────────────

    /// On wherever `map[x][y]` is `true`.
    pub fn from_bools<R: AsRef<[bool]>>(map: &[R]) -> Self {
        let mut r = Self::default();
        r.refill_bools(map);
        r
    }

    /// Refill from a 2D boolean array.
    pub fn refill_bools<R: AsRef<[bool]>>(&mut self, map: &[R]) -> &mut Self {
        let (w, h) = dims(map);
        self.refill_with(w, h, |x, y| cell(map, x, y).copied().unwrap_or(false))
    }

    /// On wherever `bits[y * width + x]` is `true`.
    ///
    /// # Errors
    ///
    /// Returns [`RegionError::DimensionMismatch`] unless
    /// `bits.len() == width * height`.
    pub fn from_flat_bools(
        bits: &[bool],
        width: usize,
        height: usize,
    ) -> Result<Self, RegionError> {
        if bits.len() != width * height {
            return Err(RegionError::DimensionMismatch {
                expected: width * height,
                found: bits.len(),
            });
        }
        Ok(Self::from_fn(width, height, |x, y| bits[y * width + x]))
    }

    // ── Character sources ───────────────────────────────────────

    /// On wherever `map[x][y] == on`.
    pub fn from_chars<R: AsRef<[char]>>(map: &[R], on: char) -> Self {
        let mut r = Self::default();
        r.refill_chars(map, on);
        r
    }

    /// Refill from a 2D char array, on where the char equals `on`.
    pub fn refill_chars<R: AsRef<[char]>>(&mut self, map: &[R], on: char) -> &mut Self {
        let (w, h) = dims(map);
        self.refill_with(w, h, |x, y| cell(map, x, y) == Some(&on))
    }

    /// On wherever `map[x][y]` is any of `on`.
    pub fn from_chars_any<R: AsRef<[char]>>(map: &[R], on: &[char]) -> Self {
        let mut r = Self::default();
        r.refill_chars_any(map, on);
        r
    }

    /// Refill from a 2D char array, on where the char is any of `on`.
    pub fn refill_chars_any<R: AsRef<[char]>>(&mut self, map: &[R], on: &[char]) -> &mut Self {
        let (w, h) = dims(map);
        self.refill_with(w, h, |x, y| cell(map, x, y).is_some_and(|c| on.contains(c)))
    }

    // ── Numeric sources ─────────────────────────────────────────

    /// On wherever `map[x][y] == yes`. Works for any integer width.
    pub fn from_eq<T: PartialEq, R: AsRef<[T]>>(map: &[R], yes: &T) -> Self {
        let mut r = Self::default();
        r.refill_eq(map, yes);
        r
    }

    /// Refill, on where the value equals `yes`.
    pub fn refill_eq<T: PartialEq, R: AsRef<[T]>>(&mut self, map: &[R], yes: &T) -> &mut Self {
        let (w, h) = dims(map);
        self.refill_with(w, h, |x, y| cell(map, x, y) == Some(yes))
    }

    /// On wherever `lower <= map[x][y] < upper`.
    pub fn from_range<T: PartialOrd, R: AsRef<[T]>>(map: &[R], lower: &T, upper: &T) -> Self {
        let mut r = Self::default();
        r.refill_range(map, lower, upper);
        r
    }

    /// Refill, on where the value lies in `[lower, upper)`.
    pub fn refill_range<T: PartialOrd, R: AsRef<[T]>>(
        &mut self,
        map: &[R],
        lower: &T,
        upper: &T,
    ) -> &mut Self {
        let (w, h) = dims(map);
        self.refill_with(w, h, |x, y| {
            cell(map, x, y).is_some_and(|v| v >= lower && v < upper)
        })
    }

    /// On wherever `map[x][y] <= upper`.
    pub fn from_floats_below<R: AsRef<[f64]>>(map: &[R], upper: f64) -> Self {
        let mut r = Self::default();
        r.refill_floats_below(map, upper);
        r
    }

    /// Refill, on where the value is at most `upper`.
    pub fn refill_floats_below<R: AsRef<[f64]>>(&mut self, map: &[R], upper: f64) -> &mut Self {
        let (w, h) = dims(map);
        self.refill_with(w, h, |x, y| cell(map, x, y).is_some_and(|&v| v <= upper))
    }

    /// Upscaled float range: every source cell with a value in
    /// `[lower, upper)` becomes a `scale × scale` block of on cells.
    ///
    /// A `scale` of 0 is treated as 1.
    pub fn from_floats_scaled<R: AsRef<[f64]>>(
        map: &[R],
        lower: f64,
        upper: f64,
        scale: usize,
    ) -> Self {
        let mut r = Self::default();
        r.refill_floats_scaled(map, lower, upper, scale);
        r
    }

    /// Refill from an upscaled float range.
    pub fn refill_floats_scaled<R: AsRef<[f64]>>(
        &mut self,
        map: &[R],
        lower: f64,
        upper: f64,
        scale: usize,
    ) -> &mut Self {
        let scale = scale.max(1);
        let (w, h) = dims(map);
        self.refill_with(w * scale, h * scale, |x, y| {
            cell(map, x / scale, y / scale).is_some_and(|&v| v >= lower && v < upper)
        })
    }

    // ── Points ──────────────────────────────────────────────────

    /// A `width × height` region with only `p` on (if it is in bounds).
    pub fn from_point(width: usize, height: usize, p: Point) -> Self {
        let mut r = Self::new(width, height);
        r.insert_point(p);
        r
    }

    /// A `width × height` region with every in-bounds point on.
    pub fn from_points<I>(width: usize, height: usize, points: I) -> Self
    where
        I: IntoIterator<Item = Point>,
    {
        let mut r = Self::new(width, height);
        r.insert_several(points);
        r
    }

    /// Decode the compact `y * width + x` form produced by
    /// [`tight_encoded`](Region::tight_encoded). Entries outside the grid
    /// are ignored.
    pub fn from_tight(encoded: &[i32], width: usize, height: usize) -> Self {
        let mut r = Self::new(width, height);
        if r.width == 0 {
            return r;
        }
        let cells = (r.width * r.height) as i64;
        for &code in encoded {
            let code = i64::from(code);
            if code < 0 || code >= cells {
                continue;
            }
            let x = (code % r.width as i64) as i32;
            let y = (code / r.width as i64) as i32;
            r.insert(x, y);
        }
        r
    }

    // ── Random fill ─────────────────────────────────────────────

    /// Every cell on with probability 1/2.
    pub fn random<R: Rng + ?Sized>(rng: &mut R, width: usize, height: usize) -> Self {
        let mut r = Self::new(width, height);
        r.refill_random(rng, width, height);
        r
    }

    /// Refill with uniformly random words.
    pub fn refill_random<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        width: usize,
        height: usize,
    ) -> &mut Self {
        self.resize(width, height);
        for w in &mut self.data {
            *w = rng.random();
        }
        self.mask_end();
        self
    }

    /// Every cell on with probability close to `fraction`.
    ///
    /// Density resolution is 1/64; see
    /// [`approximate_bits`](swath_core::bits::approximate_bits).
    pub fn random_fraction<R: Rng + ?Sized>(
        rng: &mut R,
        fraction: f64,
        width: usize,
        height: usize,
    ) -> Self {
        let mut r = Self::new(width, height);
        r.refill_random_fraction(rng, fraction, width, height);
        r
    }

    /// Refill with approximate-density random words.
    pub fn refill_random_fraction<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        fraction: f64,
        width: usize,
        height: usize,
    ) -> &mut Self {
        self.resize(width, height);
        let bit_count = fraction_to_bits(fraction);
        for w in &mut self.data {
            *w = approximate_bits(rng, bit_count);
        }
        self.mask_end();
        self
    }

    /// Reproducible random fill with a ChaCha8 generator seeded from `seed`.
    pub fn random_seeded(seed: u64, fraction: f64, width: usize, height: usize) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        Self::random_fraction(&mut rng, fraction, width, height)
    }

    // ── Extraction ──────────────────────────────────────────────

    /// `map[x][y]` booleans.
    pub fn to_bools(&self) -> Vec<Vec<bool>> {
        self.to_grid(true, false)
    }

    /// `map[x][y]` chars, `on` where set and `off` elsewhere.
    pub fn to_chars(&self, on: char, off: char) -> Vec<Vec<char>> {
        self.to_grid(on, off)
    }

    /// `map[x][y]` ints, `on` where set and `off` elsewhere.
    pub fn to_ints(&self, on: i32, off: i32) -> Vec<Vec<i32>> {
        self.to_grid(on, off)
    }

    /// `map[x][y]` floats, `on` where set and `off` elsewhere.
    pub fn to_floats(&self, on: f64, off: f64) -> Vec<Vec<f64>> {
        self.to_grid(on, off)
    }

    fn to_grid<T: Copy>(&self, on: T, off: T) -> Vec<Vec<T>> {
        (0..self.width)
            .map(|x| {
                let col = self.column(x);
                (0..self.height)
                    .map(|y| {
                        if col[y / WORD_BITS] >> (y % WORD_BITS) & 1 != 0 {
                            on
                        } else {
                            off
                        }
                    })
                    .collect()
            })
            .collect()
    }

    /// Write `value` into `map[x][y]` for every on cell that fits in `map`,
    /// leaving other entries untouched.
    pub fn write_ints_into<R: AsMut<[i32]>>(&self, map: &mut [R], value: i32) {
        self.write_into(map, value);
    }

    /// Write `value` into `map[x][y]` for every on cell that fits in `map`,
    /// leaving other entries untouched.
    pub fn write_chars_into<R: AsMut<[char]>>(&self, map: &mut [R], value: char) {
        self.write_into(map, value);
    }

    fn write_into<T: Copy, R: AsMut<[T]>>(&self, map: &mut [R], value: T) {
        for p in self.iter() {
            if let Some(slot) = map
                .get_mut(p.x as usize)
                .and_then(|col| col.as_mut().get_mut(p.y as usize))
            {
                *slot = value;
            }
        }
    }

    /// Every on cell, column-major.
    pub fn points(&self) -> Vec<Point> {
        let mut out = Vec::with_capacity(self.size());
        out.extend(self.iter());
        out
    }

    /// Every on cell packed as `y * width + x`, column-major.
    ///
    /// The packed form only suits grids of fewer than `i32::MAX` cells;
    /// cells whose code would not fit are left out.
    pub fn tight_encoded(&self) -> Vec<i32> {
        self.iter().filter_map(|p| tight_code(p, self.width)).collect()
    }
}

/// `y * width + x`, or `None` if that does not fit in an `i32`.
pub(crate) fn tight_code(p: Point, width: usize) -> Option<i32> {
    let width = i64::try_from(width).ok()?;
    let code = i64::from(p.y).checked_mul(width)?.checked_add(i64::from(p.x))?;
    i32::try_from(code).ok()
}

/// Map a density in `[0, 1]` to a per-word bit count.
pub(crate) fn fraction_to_bits(fraction: f64) -> i32 {
    if fraction.is_nan() {
        return 0;
    }
    (fraction.clamp(0.0, 1.0) * 64.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::assert_padding_clear;

    #[test]
    fn tight_code_rejects_overflow() {
        assert_eq!(tight_code(Point::new(2, 3), 7), Some(23));
        assert_eq!(tight_code(Point::new(0, 2), 1 << 30), None);
        assert_eq!(tight_code(Point::new(5, 1), i32::MAX as usize - 5), Some(i32::MAX));
        assert_eq!(tight_code(Point::new(6, 1), i32::MAX as usize - 5), None);
        assert_eq!(tight_code(Point::new(0, 1), usize::MAX), None);
    }

    #[test]
    fn bools_round_trip() {
        let map = vec![
            vec![true, false, false],
            vec![false, true, false],
            vec![false, false, true],
            vec![true, true, true],
        ];
        let r = Region::from_bools(&map);
        assert_eq!(r.width(), 4);
        assert_eq!(r.height(), 3);
        assert_eq!(r.size(), 6);
        assert_eq!(r.to_bools(), map);
    }

    #[test]
    fn chars_single_and_set() {
        let map: Vec<Vec<char>> = ["#.#", ".+.", "###"]
            .iter()
            .map(|s| s.chars().collect())
            .collect();
        assert_eq!(Region::from_chars(&map, '#').size(), 5);
        assert_eq!(Region::from_chars_any(&map, &['#', '+']).size(), 6);
    }

    #[test]
    fn numeric_predicates() {
        let ints: Vec<Vec<i16>> = vec![vec![0, 1, 2], vec![3, 4, 5]];
        assert_eq!(Region::from_eq(&ints, &4).points(), vec![Point::new(1, 1)]);
        let ranged = Region::from_range(&ints, &1, &4);
        assert_eq!(ranged.size(), 3);
        assert!(!ranged.get(1, 1));

        let bytes: Vec<Vec<u8>> = vec![vec![7; 70]; 2];
        assert_eq!(Region::from_eq(&bytes, &7u8).size(), 140);

        let floats = vec![vec![0.1, 0.5, 0.9]];
        assert_eq!(Region::from_floats_below(&floats, 0.5).size(), 2);
        assert_eq!(Region::from_range(&floats, &0.5, &1.0).size(), 2);
    }

    #[test]
    fn scaled_floats_make_blocks() {
        let floats = vec![vec![1.0, 0.0], vec![0.0, 0.0]];
        let r = Region::from_floats_scaled(&floats, 0.5, 2.0, 3);
        assert_eq!(r.width(), 6);
        assert_eq!(r.height(), 6);
        assert_eq!(r.size(), 9);
        assert!(r.get(2, 2));
        assert!(!r.get(3, 0));
    }

    #[test]
    fn flat_bools_checks_length() {
        let bits = [true, false, false, true, true, false];
        let r = Region::from_flat_bools(&bits, 3, 2).unwrap();
        assert!(r.get(0, 0));
        assert!(r.get(0, 1));
        assert!(r.get(1, 1));
        assert_eq!(r.size(), 3);
        assert!(Region::from_flat_bools(&bits, 4, 2).is_err());
    }

    #[test]
    fn refill_reuses_storage_when_sizes_match() {
        let map = vec![vec![true; 10]; 10];
        let mut r = Region::new(10, 10);
        let ptr = r.words().as_ptr();
        r.refill_bools(&map);
        assert_eq!(r.words().as_ptr(), ptr);
        assert_eq!(r.size(), 100);

        let bigger = vec![vec![false; 80]; 12];
        r.refill_bools(&bigger);
        assert_eq!(r.width(), 12);
        assert_eq!(r.y_sections(), 2);
        assert!(r.is_empty());
    }

    #[test]
    fn tight_encoding_round_trip() {
        let mut r = Region::new(7, 5);
        r.insert(6, 4).insert(0, 0).insert(3, 2);
        let enc = r.tight_encoded();
        assert!(enc.contains(&(4 * 7 + 6)));
        assert_eq!(Region::from_tight(&enc, 7, 5), r);
        assert!(Region::from_tight(&[-1, 35, 1000], 7, 5).is_empty());
    }

    #[test]
    fn random_fill_keeps_padding_clear() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let r = Region::random(&mut rng, 9, 77);
        assert_padding_clear(&r);
        assert!(r.size() > 9 * 77 / 4);

        let sparse = Region::random_fraction(&mut rng, 0.125, 64, 640);
        assert_padding_clear(&sparse);
        let density = sparse.size() as f64 / (64.0 * 640.0);
        assert!((density - 0.125).abs() < 0.02, "density {density}");
    }

    #[test]
    fn seeded_random_is_reproducible() {
        let a = Region::random_seeded(99, 0.3, 40, 40);
        let b = Region::random_seeded(99, 0.3, 40, 40);
        assert_eq!(a, b);
    }

    #[test]
    fn extraction_arrays() {
        let r = Region::from_points(2, 2, [Point::new(1, 0)]);
        assert_eq!(r.to_chars('#', '.'), vec![vec!['.', '.'], vec!['#', '.']]);
        assert_eq!(r.to_ints(5, 0), vec![vec![0, 0], vec![5, 0]]);
        assert_eq!(r.to_floats(1.0, 0.0)[1][0], 1.0);

        let mut map = vec![vec!['x'; 2]; 1];
        r.write_chars_into(&mut map, '#');
        assert_eq!(map, vec![vec!['x', 'x']]);
        let mut ints = vec![vec![9; 3]; 3];
        r.write_ints_into(&mut ints, 1);
        assert_eq!(ints[1][0], 1);
        assert_eq!(ints[0][0], 9);
    }
}
