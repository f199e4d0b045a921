//! The Hilbert walk over one 256×128 tile.
//!
//! The left 128×128 half is walked along an order-7 Hilbert curve from
//! `(0, 0)` to `(127, 0)`. The right half is the mirror image of that
//! curve walked backwards, from `(128, 0)` to `(255, 0)`, so consecutive
//! cells of the walk are always orthogonal neighbours.

use std::sync::OnceLock;

/// Side of the square Hilbert curve covering half a tile.
pub const CURVE_SIDE: u32 = 128;

static ORDER: OnceLock<Vec<(u16, u16)>> = OnceLock::new();

/// Rotate/flip a quadrant.
fn rot(n: u32, x: &mut u32, y: &mut u32, rx: u32, ry: u32) {
    if ry == 0 {
        if rx == 1 {
            *x = n - 1 - *x;
            *y = n - 1 - *y;
        }
        std::mem::swap(x, y);
    }
}

/// Position `d` along the Hilbert curve filling an `n × n` square
/// (`n` a power of two).
pub fn d_to_xy(n: u32, d: u32) -> (u32, u32) {
    let (mut x, mut y) = (0, 0);
    let mut t = d;
    let mut s = 1;
    while s < n {
        let rx = 1 & (t / 2);
        let ry = 1 & (t ^ rx);
        rot(s, &mut x, &mut y, rx, ry);
        x += s * rx;
        y += s * ry;
        t /= 4;
        s *= 2;
    }
    (x, y)
}

/// Every `(x, y)` offset of a 256×128 tile in walk order.
pub fn tile_order() -> &'static [(u16, u16)] {
    ORDER.get_or_init(|| {
        let half = CURVE_SIDE * CURVE_SIDE;
        let left: Vec<(u16, u16)> = (0..half)
            .map(|d| {
                let (x, y) = d_to_xy(CURVE_SIDE, d);
                (x as u16, y as u16)
            })
            .collect();
        let mirrored = left
            .iter()
            .rev()
            .map(|&(x, y)| ((2 * CURVE_SIDE - 1) as u16 - x, y));
        left.iter().copied().chain(mirrored).collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_covers_tile_once() {
        let order = tile_order();
        assert_eq!(order.len(), 256 * 128);
        let mut seen = vec![false; 256 * 128];
        for &(x, y) in order {
            assert!(x < 256 && y < 128);
            let i = x as usize * 128 + y as usize;
            assert!(!seen[i], "({x}, {y}) visited twice");
            seen[i] = true;
        }
    }

    #[test]
    fn walk_is_continuous() {
        let order = tile_order();
        assert_eq!(order[0], (0, 0));
        assert_eq!(order[128 * 128 - 1], (127, 0));
        assert_eq!(order[128 * 128], (128, 0));
        assert_eq!(order[order.len() - 1], (255, 0));
        for pair in order.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            let step = (a.0 as i32 - b.0 as i32).abs() + (a.1 as i32 - b.1 as i32).abs();
            assert_eq!(step, 1, "{a:?} -> {b:?}");
        }
    }
}
