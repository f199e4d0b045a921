//! Geometric transforms: shifting, scaling, mirroring and rotation.

use swath_core::bits::{double_bits, shift_column};
use swath_core::Point;

use crate::region::Region;

impl Region {
    /// Move every cell by `(dx, dy)`. Cells that leave the grid are lost
    /// and vacated cells are off.
    pub fn translate(&mut self, dx: i32, dy: i32) -> &mut Self {
        if self.data.is_empty() || (dx == 0 && dy == 0) {
            return self;
        }
        let ys = self.y_sections;
        let mut next = vec![0u64; self.data.len()];
        for x in 0..self.width {
            let src = x as i64 - i64::from(dx);
            if src < 0 || src >= self.width as i64 {
                continue;
            }
            let src = src as usize;
            shift_column(
                &self.data[src * ys..(src + 1) * ys],
                &mut next[x * ys..(x + 1) * ys],
                i64::from(dy),
            );
        }
        self.data = next;
        self.mask_end();
        self
    }

    /// Scale by two: every on cell becomes a 2×2 block, with the point
    /// `(x, y)` of the doubled grid placed at `(0, 0)`. The dimensions stay
    /// the same, so anything past the edge is dropped.
    ///
    /// `zoom(width / 2, height / 2)` zooms about the centre.
    pub fn zoom(&mut self, x: i32, y: i32) -> &mut Self {
        if self.data.is_empty() {
            return self;
        }
        let ys = self.y_sections;
        let mut doubled = vec![0u64; ys * 2];
        let mut next = vec![0u64; self.data.len()];
        for nx in 0..self.width {
            let src = (nx as i64 + i64::from(x)).div_euclid(2);
            if src < 0 || src >= self.width as i64 {
                continue;
            }
            for (s, &w) in self.column(src as usize).iter().enumerate() {
                doubled[2 * s] = double_bits(w as u32);
                doubled[2 * s + 1] = double_bits((w >> 32) as u32);
            }
            shift_column(&doubled, &mut next[nx * ys..(nx + 1) * ys], -i64::from(y));
        }
        self.data = next;
        self.mask_end();
        self
    }

    /// Mirror horizontally, vertically, or both.
    pub fn flip(&mut self, left_right: bool, up_down: bool) -> &mut Self {
        if self.data.is_empty() {
            return self;
        }
        let ys = self.y_sections;
        if left_right {
            let w = self.width;
            for x in 0..w / 2 {
                for s in 0..ys {
                    self.data.swap(x * ys + s, (w - 1 - x) * ys + s);
                }
            }
        }
        if up_down {
            let pad = (ys * 64 - self.height) as i64;
            let mut reversed = vec![0u64; ys];
            for x in 0..self.width {
                let col = &mut self.data[x * ys..(x + 1) * ys];
                for (dst, src) in reversed.iter_mut().zip(col.iter().rev()) {
                    *dst = src.reverse_bits();
                }
                shift_column(&reversed, col, -pad);
            }
        }
        self.mask_end();
        self
    }

    /// Rotate clockwise by `quarter_turns` right angles (negative turns
    /// rotate counter-clockwise). Odd turns swap width and height.
    pub fn rotate(&mut self, quarter_turns: i32) -> &mut Self {
        let turns = quarter_turns.rem_euclid(4);
        if turns == 0 || self.data.is_empty() {
            return self;
        }
        if turns == 2 {
            return self.flip(true, true);
        }
        let (w, h) = (self.width as i32, self.height as i32);
        let mut next = Region::new(self.height, self.width);
        for p in self.iter() {
            let q = if turns == 1 {
                Point::new(h - 1 - p.y, p.x)
            } else {
                Point::new(p.y, w - 1 - p.x)
            };
            next.insert_point(q);
        }
        *self = next;
        self
    }

    /// OR `other` into this region with its origin at `(x, y)`. Cells that
    /// land outside this grid are dropped.
    pub fn insert_region(&mut self, x: i32, y: i32, other: &Region) -> &mut Self {
        if self.data.is_empty() || other.data.is_empty() {
            return self;
        }
        let ys = self.y_sections;
        let mut shifted = vec![0u64; ys];
        for ox in 0..other.width {
            let tx = ox as i64 + i64::from(x);
            if tx < 0 || tx >= self.width as i64 {
                continue;
            }
            let tx = tx as usize;
            shift_column(other.column(ox), &mut shifted, i64::from(y));
            for (dst, src) in self.data[tx * ys..(tx + 1) * ys].iter_mut().zip(&shifted) {
                *dst |= src;
            }
        }
        self.mask_end();
        self
    }

    /// Resize to `width × height`, keeping the cells of the overlap.
    pub fn extend_to(&mut self, width: usize, height: usize) -> &mut Self {
        if width == self.width && height == self.height {
            return self;
        }
        let mut next = Region::new(width, height);
        let w = next.width.min(self.width);
        let ys = next.y_sections.min(self.y_sections);
        let (theirs, mine) = (next.y_sections, self.y_sections);
        for x in 0..w {
            next.data[x * theirs..x * theirs + ys]
                .copy_from_slice(&self.data[x * mine..x * mine + ys]);
        }
        next.mask_end();
        *self = next;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{arb_region, assert_padding_clear};
    use proptest::prelude::*;

    // ── Translate ───────────────────────────────────────────────

    #[test]
    fn translate_moves_and_drops() {
        let mut r = Region::from_points(10, 100, [Point::new(1, 1), Point::new(9, 99)]);
        r.translate(2, 70);
        assert_eq!(r.points(), vec![Point::new(3, 71)]);
        r.translate(-3, -71);
        assert_eq!(r.points(), vec![Point::new(0, 0)]);
        assert_padding_clear(&r);
    }

    // ── Zoom ────────────────────────────────────────────────────

    #[test]
    fn zoom_makes_blocks() {
        let mut r = Region::from_point(8, 8, Point::new(1, 1));
        r.zoom(0, 0);
        let mut pts = r.points();
        pts.sort();
        assert_eq!(
            pts,
            vec![Point::new(2, 2), Point::new(2, 3), Point::new(3, 2), Point::new(3, 3)]
        );
    }

    #[test]
    fn zoom_about_centre_keeps_centre() {
        let mut r = Region::from_point(10, 100, Point::new(5, 50));
        r.zoom(5, 50);
        assert!(r.get(5, 50));
        assert_eq!(r.size(), 4);
        assert!(r.get(6, 51));
        assert_padding_clear(&r);
    }

    #[test]
    fn zoom_spans_band_boundary() {
        let mut r = Region::from_point(2, 128, Point::new(0, 40));
        r.zoom(0, 0);
        assert!(r.get(0, 80));
        assert!(r.get(0, 81));
        assert!(r.get(1, 80));
        assert_eq!(r.size(), 4);
    }

    // ── Flip / rotate ───────────────────────────────────────────

    #[test]
    fn flip_both_axes() {
        let mut r = Region::from_point(5, 70, Point::new(0, 3));
        r.flip(true, false);
        assert_eq!(r.points(), vec![Point::new(4, 3)]);
        r.flip(false, true);
        assert_eq!(r.points(), vec![Point::new(4, 66)]);
        assert_padding_clear(&r);
    }

    #[test]
    fn rotate_clockwise_swaps_dimensions() {
        let mut r = Region::from_point(4, 2, Point::new(0, 0));
        r.rotate(1);
        assert_eq!((r.width(), r.height()), (2, 4));
        assert_eq!(r.points(), vec![Point::new(1, 0)]);
        r.rotate(-1);
        assert_eq!((r.width(), r.height()), (4, 2));
        assert_eq!(r.points(), vec![Point::new(0, 0)]);
        r.rotate(2);
        assert_eq!(r.points(), vec![Point::new(3, 1)]);
    }

    // ── Insert / extend ─────────────────────────────────────────

    #[test]
    fn insert_region_at_offset() {
        let stamp = Region::filled(3, 3);
        let mut r = Region::new(10, 100);
        r.insert_region(8, 62, &stamp);
        assert_eq!(r.size(), 6);
        assert!(r.get(9, 64));
        assert!(r.get(8, 62));
        r.insert_region(-2, -2, &stamp);
        assert!(r.get(0, 0));
        assert_eq!(r.size(), 7);
    }

    #[test]
    fn extend_to_keeps_overlap() {
        let mut r = Region::filled(5, 5);
        r.extend_to(10, 100);
        assert_eq!(r.size(), 25);
        assert_eq!(r.y_sections(), 2);
        r.extend_to(3, 2);
        assert_eq!(r.size(), 6);
        assert_padding_clear(&r);
    }

    proptest! {
        #[test]
        fn translate_matches_pointwise(
            r in arb_region(1..30, 1..150),
            dx in -40i32..40,
            dy in -160i32..160,
        ) {
            let mut fast = r.clone();
            fast.translate(dx, dy);
            let expected = Region::from_points(
                r.width(),
                r.height(),
                r.iter().map(|p| p.translate(dx, dy)),
            );
            prop_assert_eq!(&fast, &expected);
            assert_padding_clear(&fast);
        }

        #[test]
        fn four_quarter_turns_is_identity(r in arb_region(1..30, 1..90)) {
            let mut turned = r.clone();
            turned.rotate(1).rotate(1).rotate(1).rotate(1);
            prop_assert_eq!(&turned, &r);
        }

        #[test]
        fn double_flip_is_identity(r in arb_region(1..30, 1..150)) {
            let mut flipped = r.clone();
            flipped.flip(true, true).flip(true, true);
            prop_assert_eq!(flipped, r);
        }
    }
}
