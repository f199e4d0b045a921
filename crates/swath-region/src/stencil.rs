//! Read-only neighbour view over a region's words, used by every
//! whole-grid pass that reads the previous state while writing the next.

use swath_core::bits::{from_north, from_south};

use crate::region::Region;

/// Neighbour lookups for word `(x, s)` of a snapshot.
///
/// Columns outside `0..width` read as all-off, which is what makes the
/// grid border behave as "off outside the grid" for every pass.
pub(crate) struct Stencil<'a> {
    data: &'a [u64],
    width: usize,
    ys: usize,
}

impl<'a> Stencil<'a> {
    pub(crate) fn new(data: &'a [u64], width: usize, ys: usize) -> Self {
        Self { data, width, ys }
    }

    #[inline]
    fn column(&self, x: isize) -> Option<&'a [u64]> {
        if x < 0 || x as usize >= self.width {
            return None;
        }
        let x = x as usize;
        Some(&self.data[x * self.ys..(x + 1) * self.ys])
    }

    /// Band `s` of column `x`.
    #[inline]
    pub(crate) fn word(&self, x: isize, s: usize) -> u64 {
        self.column(x).map_or(0, |c| c[s])
    }

    /// Cells of column `x` whose north neighbour is on.
    #[inline]
    pub(crate) fn north(&self, x: isize, s: usize) -> u64 {
        self.column(x).map_or(0, |c| from_north(c, s))
    }

    /// Cells of column `x` whose south neighbour is on.
    #[inline]
    pub(crate) fn south(&self, x: isize, s: usize) -> u64 {
        self.column(x).map_or(0, |c| from_south(c, s))
    }

    /// Column `x` ORed with its vertical neighbours.
    #[inline]
    pub(crate) fn vertical_or(&self, x: isize, s: usize) -> u64 {
        self.word(x, s) | self.north(x, s) | self.south(x, s)
    }

    /// Column `x` ANDed with its vertical neighbours.
    #[inline]
    pub(crate) fn vertical_and(&self, x: isize, s: usize) -> u64 {
        self.word(x, s) & self.north(x, s) & self.south(x, s)
    }
}

impl Region {
    /// Replace every word with `f(previous state, x, s)`, then re-mask.
    pub(crate) fn rebuild<F>(&mut self, f: F)
    where
        F: Fn(&Stencil<'_>, isize, usize) -> u64,
    {
        if self.data.is_empty() {
            return;
        }
        let ys = self.y_sections;
        let mut next = vec![0u64; self.data.len()];
        {
            let view = Stencil::new(&self.data, self.width, ys);
            for x in 0..self.width {
                for s in 0..ys {
                    next[x * ys + s] = f(&view, x as isize, s);
                }
            }
        }
        self.data = next;
        self.mask_end();
    }

    /// Band `s` of column `x` of `self`, or 0 outside this grid. Used when
    /// another region of possibly different size bounds a pass.
    #[inline]
    pub(crate) fn word_or_zero(&self, x: isize, s: usize) -> u64 {
        if x < 0 || x as usize >= self.width || s >= self.y_sections {
            0
        } else {
            self.data[x as usize * self.y_sections + s]
        }
    }
}
