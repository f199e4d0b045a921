//! Word-parallel set algebra.
//!
//! Binary operations run over the overlap of the two grids: columns up to
//! the smaller width and bands up to the smaller section count. Cells
//! outside the overlap are left alone, so mismatched sizes never fail.
//! Operations that can set padding bits re-mask the final band.

use crate::region::Region;

impl Region {
    fn zip_overlap<F: Fn(u64, u64) -> u64>(&mut self, other: &Region, op: F) {
        let w = self.width.min(other.width);
        let ys = self.y_sections.min(other.y_sections);
        let (mine, theirs) = (self.y_sections, other.y_sections);
        for x in 0..w {
            for s in 0..ys {
                let i = x * mine + s;
                self.data[i] = op(self.data[i], other.data[x * theirs + s]);
            }
        }
        self.touch();
    }

    /// Union: on where either region is on.
    pub fn or(&mut self, other: &Region) -> &mut Self {
        self.zip_overlap(other, |a, b| a | b);
        self.mask_end();
        self
    }

    /// Intersection: on where both regions are on.
    pub fn and(&mut self, other: &Region) -> &mut Self {
        self.zip_overlap(other, |a, b| a & b);
        self
    }

    /// Difference: on here and off in `other`.
    pub fn and_not(&mut self, other: &Region) -> &mut Self {
        self.zip_overlap(other, |a, b| a & !b);
        self
    }

    /// Reverse difference: on in `other` and off here.
    pub fn not_and(&mut self, other: &Region) -> &mut Self {
        self.zip_overlap(other, |a, b| b & !a);
        self.mask_end();
        self
    }

    /// Symmetric difference: on where exactly one region is on.
    pub fn xor(&mut self, other: &Region) -> &mut Self {
        self.zip_overlap(other, |a, b| a ^ b);
        self.mask_end();
        self
    }

    /// Complement every cell.
    pub fn not(&mut self) -> &mut Self {
        for w in &mut self.data {
            *w = !*w;
        }
        self.mask_end();
        self
    }

    /// Intersect with a 64×64 tile repeated across the whole grid.
    ///
    /// `tile[x]` is the column word for every grid column `x ≡ tile index
    /// (mod 64)`; since a band is 64 rows tall the same word applies to
    /// every band of that column.
    pub fn and_wrapping64(&mut self, tile: &[u64; 64]) -> &mut Self {
        let ys = self.y_sections;
        for x in 0..self.width {
            let t = tile[x & 63];
            for w in &mut self.data[x * ys..(x + 1) * ys] {
                *w &= t;
            }
        }
        self.touch();
        self
    }

    /// Union with a 64×64 tile repeated across the whole grid.
    pub fn or_wrapping64(&mut self, tile: &[u64; 64]) -> &mut Self {
        let ys = self.y_sections;
        for x in 0..self.width {
            let t = tile[x & 63];
            for w in &mut self.data[x * ys..(x + 1) * ys] {
                *w |= t;
            }
        }
        self.mask_end();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{arb_region_pair, assert_padding_clear, seeded};
    use proptest::prelude::*;
    use swath_core::Point;

    #[test]
    fn xor_self_is_empty() {
        let mut rng = seeded(3);
        let a = Region::random(&mut rng, 30, 90);
        let mut b = a.clone();
        b.xor(&a);
        assert!(b.is_empty());
    }

    #[test]
    fn not_twice_is_identity_and_masks() {
        let mut rng = seeded(4);
        let a = Region::random(&mut rng, 13, 71);
        let mut b = a.clone();
        b.not();
        assert_padding_clear(&b);
        assert_eq!(b.size() + a.size(), 13 * 71);
        b.not();
        assert_eq!(a, b);
    }

    #[test]
    fn mismatched_sizes_touch_overlap_only() {
        let mut big = Region::filled(10, 100);
        let small = Region::new(4, 10);
        big.and(&small);
        // Columns 0..4, band 0 cleared; band 1 and columns 4.. untouched.
        assert!(!big.get(3, 63));
        assert!(big.get(3, 64));
        assert!(big.get(4, 0));
        assert_eq!(big.size(), 1000 - 4 * 64);

        let mut small = Region::new(4, 10);
        small.or(&Region::filled(10, 100));
        assert_eq!(small.size(), 40);
        assert_padding_clear(&small);
    }

    #[test]
    fn difference_directions() {
        let mut a = Region::new(4, 4);
        a.insert(0, 0).insert(1, 1);
        let mut b = Region::new(4, 4);
        b.insert(1, 1).insert(2, 2);

        let mut d = a.clone();
        d.and_not(&b);
        assert_eq!(d.points(), vec![Point::new(0, 0)]);

        let mut d = a.clone();
        d.not_and(&b);
        assert_eq!(d.points(), vec![Point::new(2, 2)]);
    }

    #[test]
    fn reverse_difference_with_taller_region_masks() {
        let mut short = Region::new(2, 10);
        let mut tall = Region::new(2, 20);
        tall.insert(0, 15).insert(1, 3);
        short.not_and(&tall);
        assert_padding_clear(&short);
        assert_eq!(short.points(), vec![Point::new(1, 3)]);
        assert_eq!(short.size(), 1);
    }

    #[test]
    fn wrapping_tile_repeats() {
        let mut tile = [0u64; 64];
        tile[1] = 1; // column 1, row 0 of every tile
        let mut r = Region::filled(130, 130);
        r.and_wrapping64(&tile);
        let pts = r.points();
        // Columns 1, 65, 129; rows 0, 64, 128.
        assert_eq!(pts.len(), 9);
        assert!(r.get(65, 64));
        assert!(r.get(129, 128));

        let mut r = Region::new(70, 70);
        r.or_wrapping64(&[u64::MAX; 64]);
        assert_eq!(r.size(), 70 * 70);
        assert_padding_clear(&r);
    }

    proptest! {
        #[test]
        fn de_morgan_holds((a, b) in arb_region_pair(1..80, 1..150)) {
            // !(a | b) == !a & !b
            let mut lhs = a.clone();
            lhs.or(&b).not();
            let mut rhs = a.clone();
            rhs.not();
            let mut nb = b.clone();
            nb.not();
            rhs.and(&nb);
            prop_assert_eq!(&lhs, &rhs);

            // !(a & b) == !a | !b
            let mut lhs = a.clone();
            lhs.and(&b).not();
            let mut rhs = a.clone();
            rhs.not().or(&nb);
            prop_assert_eq!(lhs, rhs);
        }

        #[test]
        fn union_then_intersect_recovers((a, b) in arb_region_pair(1..80, 1..150)) {
            let mut u = a.clone();
            u.or(&b).and(&b);
            prop_assert_eq!(&u, &b);
            assert_padding_clear(&u);
        }
    }
}
