//! The [`Point`] grid coordinate.

use std::fmt;
use std::ops::{Add, Index, Sub};

/// A cell coordinate on a region grid.
///
/// `x` grows to the right and `y` grows downward. Coordinates may be
/// negative or past the grid edge; region operations ignore such points.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    /// Column.
    pub x: i32,
    /// Row.
    pub y: i32,
}

impl Point {
    /// Create a point.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Component by axis: 0 is `x`, 1 is `y`, anything else is `None`.
    pub fn component(&self, axis: usize) -> Option<i32> {
        match axis {
            0 => Some(self.x),
            1 => Some(self.y),
            _ => None,
        }
    }

    /// Return this point moved by `(dx, dy)`.
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// The four orthogonal neighbours, in N, S, W, E order.
    pub const fn neighbours4(self) -> [Point; 4] {
        [
            self.translate(0, -1),
            self.translate(0, 1),
            self.translate(-1, 0),
            self.translate(1, 0),
        ]
    }

    /// Chebyshev (L∞) distance.
    pub fn chebyshev(self, other: Point) -> u32 {
        let dx = (self.x - other.x).unsigned_abs();
        let dy = (self.y - other.y).unsigned_abs();
        dx.max(dy)
    }

    /// Squared Euclidean distance.
    pub fn distance_sq(self, other: Point) -> i64 {
        let dx = i64::from(self.x - other.x);
        let dy = i64::from(self.y - other.y);
        dx * dx + dy * dy
    }

    /// Whether `0 <= x < width` and `0 <= y < height`.
    pub fn within(self, width: usize, height: usize) -> bool {
        self.x >= 0 && self.y >= 0 && (self.x as usize) < width && (self.y as usize) < height
    }
}

impl Index<usize> for Point {
    type Output = i32;

    /// # Panics
    ///
    /// Panics if `axis` is not 0 or 1.
    fn index(&self, axis: usize) -> &i32 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("point axis {axis} out of range (expected 0 or 1)"),
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.translate(rhs.x, rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        self.translate(-rhs.x, -rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
