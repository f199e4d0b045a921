//! Word-level bit helpers for column-major, y-banded grids.
//!
//! A region column is a run of `u64` bands. Bit `b` of band `s` is the
//! cell at `y = s * 64 + b`, so "down" (toward higher y) is a left shift
//! and "up" is a right shift. Every vertical neighbour operation in the
//! region engine goes through the carry helpers here so band boundaries
//! are handled in exactly one place.

use rand::Rng;

/// Bits per storage word.
pub const WORD_BITS: usize = 64;

/// Number of 64-bit bands needed for a column of `height` cells.
pub const fn sections_for(height: usize) -> usize {
    height.div_ceil(WORD_BITS)
}

/// Mask of the valid bits in the final band of a column of `height` cells.
///
/// All ones when `height` is a multiple of 64.
pub const fn end_mask(height: usize) -> u64 {
    let rem = height % WORD_BITS;
    if rem == 0 {
        u64::MAX
    } else {
        (1u64 << rem) - 1
    }
}

/// Move every cell of `word` one step toward higher y.
///
/// Bit 0 is filled from bit 63 of `band_above`, the band holding the 64
/// cells directly above this one (pass 0 at the top of the grid). The old
/// bit 63 falls off; callers re-mask the final band.
#[inline(always)]
pub const fn shift_down_with_carry(word: u64, band_above: u64) -> u64 {
    (word << 1) | (band_above >> 63)
}

/// Move every cell of `word` one step toward lower y.
///
/// Bit 63 is filled from bit 0 of `band_below` (pass 0 at the bottom of
/// the grid).
#[inline(always)]
pub const fn shift_up_with_carry(word: u64, band_below: u64) -> u64 {
    (word >> 1) | (band_below << 63)
}

/// For band `s` of `column`, the cells whose north neighbour (y - 1) is on.
#[inline(always)]
pub fn from_north(column: &[u64], s: usize) -> u64 {
    let above = if s > 0 { column[s - 1] } else { 0 };
    shift_down_with_carry(column[s], above)
}

/// For band `s` of `column`, the cells whose south neighbour (y + 1) is on.
#[inline(always)]
pub fn from_south(column: &[u64], s: usize) -> u64 {
    let below = column.get(s + 1).copied().unwrap_or(0);
    shift_up_with_carry(column[s], below)
}

/// Band `s` of `column` ORed with both vertical neighbours.
#[inline(always)]
pub fn vertical_or(column: &[u64], s: usize) -> u64 {
    column[s] | from_north(column, s) | from_south(column, s)
}

/// Band `s` of `column` ANDed with both vertical neighbours.
///
/// Cells outside the column count as off, so the top cell never survives
/// and the bottom cell survives only if the padding below it were on,
/// which it never is.
#[inline(always)]
pub fn vertical_and(column: &[u64], s: usize) -> u64 {
    column[s] & from_north(column, s) & from_south(column, s)
}

fn word_at(src: &[u64], idx: i64) -> u64 {
    if idx < 0 {
        0
    } else {
        src.get(idx as usize).copied().unwrap_or(0)
    }
}

/// Write `src` shifted by `dy` cells into `dst`.
///
/// Positive `dy` moves toward higher y. Bits that leave the range of
/// `dst` are dropped and vacated cells are zero; nothing wraps. `src` and
/// `dst` may have different lengths. The caller owns end masking.
pub fn shift_column(src: &[u64], dst: &mut [u64], dy: i64) {
    let bits = WORD_BITS as i64;
    if dy >= 0 {
        let q = dy / bits;
        let r = (dy % bits) as u32;
        for (s, out) in dst.iter_mut().enumerate() {
            let base = s as i64 - q;
            let lo = word_at(src, base);
            *out = if r == 0 {
                lo
            } else {
                (lo << r) | (word_at(src, base - 1) >> (64 - r))
            };
        }
    } else {
        let d = -dy;
        let q = d / bits;
        let r = (d % bits) as u32;
        for (s, out) in dst.iter_mut().enumerate() {
            let base = s as i64 + q;
            let hi = word_at(src, base);
            *out = if r == 0 {
                hi
            } else {
                (hi >> r) | (word_at(src, base + 1) << (64 - r))
            };
        }
    }
}

/// Spread the 32 bits of `v` so bit `i` lands on bit `2i`.
#[inline]
pub const fn spread_bits(v: u32) -> u64 {
    let mut v = v as u64;
    v = (v | (v << 16)) & 0x0000_FFFF_0000_FFFF;
    v = (v | (v << 8)) & 0x00FF_00FF_00FF_00FF;
    v = (v | (v << 4)) & 0x0F0F_0F0F_0F0F_0F0F;
    v = (v | (v << 2)) & 0x3333_3333_3333_3333;
    (v | (v << 1)) & 0x5555_5555_5555_5555
}

/// Double every bit of `v`: bit `i` lands on bits `2i` and `2i + 1`.
#[inline]
pub const fn double_bits(v: u32) -> u64 {
    let s = spread_bits(v);
    s | (s << 1)
}

/// Position of the `k`-th set bit of `word` (0-based), or `None` if
/// `word` has `k` or fewer set bits.
#[inline]
pub fn select_bit(mut word: u64, k: u32) -> Option<u32> {
    if word.count_ones() <= k {
        return None;
    }
    for _ in 0..k {
        word &= word - 1;
    }
    Some(word.trailing_zeros())
}

/// A random word whose expected popcount is `bit_count`.
///
/// This is an approximation: each bit is set independently with
/// probability `bit_count / 64`, built from the binary expansion of that
/// probability by alternately ANDing and ORing fresh random words. It
/// costs at most six draws from `rng` instead of one per bit. Counts are
/// clamped to `0..=64`.
pub fn approximate_bits<R: Rng + ?Sized>(rng: &mut R, bit_count: i32) -> u64 {
    if bit_count <= 0 {
        return 0;
    }
    if bit_count >= 64 {
        return u64::MAX;
    }
    if bit_count == 32 {
        return rng.random::<u64>();
    }
    let high = bit_count > 32;
    let altered = (if high { 64 - bit_count } else { bit_count }) as u32;
    // Density starts at 1/2; walking up from the lowest set bit of
    // `altered`, an OR step maps p to (1 + p) / 2 and an AND step to p / 2.
    let lsb = altered & altered.wrapping_neg();
    let mut data = rng.random::<u64>();
    let mut i = lsb << 1;
    while i <= 16 {
        if altered & i == 0 {
            data &= rng.random::<u64>();
        } else {
            data |= rng.random::<u64>();
        }
        i <<= 1;
    }
    let last = rng.random::<u64>() & data;
    if high {
        !last
    } else {
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn end_mask_values() {
        assert_eq!(end_mask(64), u64::MAX);
        assert_eq!(end_mask(128), u64::MAX);
        assert_eq!(end_mask(1), 1);
        assert_eq!(end_mask(10), 0x3FF);
        assert_eq!(end_mask(65), 1);
        assert_eq!(sections_for(0), 0);
        assert_eq!(sections_for(1), 1);
        assert_eq!(sections_for(64), 1);
        assert_eq!(sections_for(65), 2);
    }

    // ── Carry helpers ───────────────────────────────────────────

    #[test]
    fn carries_cross_band_boundaries() {
        // Cell 63 of band 0 and cell 0 of band 1 are vertical neighbours.
        let column = [1u64 << 63, 0];
        assert_eq!(from_north(&column, 1), 1);
        assert_eq!(from_north(&column, 0), 0);

        let column = [0u64, 1];
        assert_eq!(from_south(&column, 0), 1 << 63);
        assert_eq!(from_south(&column, 1), 0);
    }

    #[test]
    fn vertical_and_drops_top_cell() {
        let column = [0b111u64];
        assert_eq!(vertical_and(&column, 0), 0b010);
        assert_eq!(vertical_or(&column, 0), 0b1111);
    }

    #[test]
    fn shift_column_moves_across_bands() {
        let src = [1u64 << 63, 0, 0];
        let mut dst = [0u64; 3];
        shift_column(&src, &mut dst, 1);
        assert_eq!(dst, [0, 1, 0]);

        shift_column(&src, &mut dst, 65);
        assert_eq!(dst, [0, 0, 1]);

        shift_column(&src, &mut dst, -63);
        assert_eq!(dst, [1, 0, 0]);

        shift_column(&src, &mut dst, -64);
        assert_eq!(dst, [0, 0, 0]);

        shift_column(&src, &mut dst, 200);
        assert_eq!(dst, [0, 0, 0]);
    }

    #[test]
    fn shift_column_zero_is_copy() {
        let src = [0xDEAD_BEEFu64, 7];
        let mut dst = [0u64; 2];
        shift_column(&src, &mut dst, 0);
        assert_eq!(dst, src);
    }

    // ── Spreading ───────────────────────────────────────────────

    #[test]
    fn spread_and_double() {
        assert_eq!(spread_bits(0b1011), 0b1000101);
        assert_eq!(double_bits(0b101), 0b110011);
        assert_eq!(double_bits(u32::MAX), u64::MAX);
    }

    #[test]
    fn select_bit_finds_kth() {
        let w = 0b1011_0100u64;
        assert_eq!(select_bit(w, 0), Some(2));
        assert_eq!(select_bit(w, 1), Some(4));
        assert_eq!(select_bit(w, 3), Some(7));
        assert_eq!(select_bit(w, 4), None);
    }

    // ── Approximate bits ────────────────────────────────────────

    #[test]
    fn approximate_bits_extremes() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert_eq!(approximate_bits(&mut rng, 0), 0);
        assert_eq!(approximate_bits(&mut rng, -5), 0);
        assert_eq!(approximate_bits(&mut rng, 64), u64::MAX);
        assert_eq!(approximate_bits(&mut rng, 99), u64::MAX);
    }

    #[test]
    fn approximate_bits_mean_tracks_request() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for target in [1, 3, 8, 16, 21, 32, 40, 57, 63] {
            let trials = 4000;
            let total: u64 = (0..trials)
                .map(|_| u64::from(approximate_bits(&mut rng, target).count_ones()))
                .sum();
            let mean = total as f64 / f64::from(trials);
            assert!(
                (mean - f64::from(target)).abs() < 1.0,
                "target {target}: mean popcount {mean}"
            );
        }
    }

    proptest! {
        #[test]
        fn shift_roundtrip_keeps_inner_bits(word in any::<u64>(), dy in 0i64..64) {
            let src = [word, 0];
            let mut down = [0u64; 2];
            shift_column(&src, &mut down, dy);
            let mut back = [0u64; 2];
            shift_column(&down, &mut back, -dy);
            prop_assert_eq!(back, src);
        }
    }
}
