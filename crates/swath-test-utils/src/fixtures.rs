//! Hand-drawn regions for scenario tests.
//!
//! Pictures are written one row per string, `#` for on and anything else
//! for off, so they read the same way [`Region`]'s `Display` prints.

use swath_core::Point;
use swath_region::Region;

/// Parse a picture (rows of `#`/`.`) into a region. Short rows are padded
/// with off cells.
pub fn picture(rows: &[&str]) -> Region {
    let height = rows.len();
    let width = rows.iter().map(|r| r.chars().count()).max().unwrap_or(0);
    let cells: Vec<Vec<char>> = rows.iter().map(|r| r.chars().collect()).collect();
    Region::from_fn(width, height, |x, y| cells[y].get(x) == Some(&'#'))
}

/// A single on cell at `(x, y)`.
pub fn single(width: usize, height: usize, x: i32, y: i32) -> Region {
    Region::from_point(width, height, Point::new(x, y))
}

/// Two rooms joined by a one-cell-wide corridor, on a 24×8 grid.
///
/// ```text
/// ........................
/// .######..........######.
/// .######..........######.
/// .######..........######.
/// .######################.
/// .######..........######.
/// .######..........######.
/// ........................
/// ```
pub fn two_rooms() -> Region {
    let mut r = Region::new(24, 8);
    r.insert_rectangle(1, 1, 6, 6)
        .insert_rectangle(17, 1, 6, 6)
        .insert_rectangle(7, 4, 10, 1);
    r
}

/// A full grid with a single-cell wall splitting it into left and right
/// halves.
pub fn walled(width: usize, height: usize) -> Region {
    let mut r = Region::filled(width, height);
    r.remove_rectangle((width / 2) as i32, 0, 1, height as i32);
    r
}

/// A ring of on cells one cell in from the border.
pub fn ring(width: usize, height: usize) -> Region {
    let mut r = Region::new(width, height);
    r.insert_rectangle(1, 1, width as i32 - 2, height as i32 - 2);
    let mut inner = Region::new(width, height);
    inner.insert_rectangle(2, 2, width as i32 - 4, height as i32 - 4);
    r.and_not(&inner);
    r
}
