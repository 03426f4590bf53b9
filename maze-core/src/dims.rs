use std::{
    fmt,
    ops::{Add, AddAssign, Sub, SubAssign},
};

use serde::{Deserialize, Serialize};

/// Position of a cell in the grid, stored as `(row, col)`.
///
/// Signed so that offsets (and positions one step outside the grid) can be
/// represented without underflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Pos(pub i32, pub i32);

impl Pos {
    pub const ZERO: Pos = Pos(0, 0);

    pub fn row(self) -> i32 {
        self.0
    }

    pub fn col(self) -> i32 {
        self.1
    }

    /// Iterates every position of a `rows × cols` rectangle in row-major order.
    pub fn iter_fill(rows: usize, cols: usize) -> impl Iterator<Item = Pos> {
        (0..rows as i32).flat_map(move |r| (0..cols as i32).map(move |c| Pos(r, c)))
    }

    pub fn manhattan(self, other: Pos) -> i32 {
        (self.0 - other.0).abs() + (self.1 - other.1).abs()
    }

    pub fn abs_sum(self) -> i32 {
        self.0.abs() + self.1.abs()
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.0, self.1)
    }
}

impl Add for Pos {
    type Output = Pos;

    fn add(self, other: Pos) -> Pos {
        Pos(self.0 + other.0, self.1 + other.1)
    }
}

impl Sub for Pos {
    type Output = Pos;

    fn sub(self, other: Pos) -> Pos {
        Pos(self.0 - other.0, self.1 - other.1)
    }
}

impl AddAssign for Pos {
    fn add_assign(&mut self, other: Pos) {
        self.0 += other.0;
        self.1 += other.1;
    }
}

impl SubAssign for Pos {
    fn sub_assign(&mut self, other: Pos) {
        self.0 -= other.0;
        self.1 -= other.1;
    }
}

impl From<(i32, i32)> for Pos {
    fn from(tuple: (i32, i32)) -> Self {
        Pos(tuple.0, tuple.1)
    }
}

impl From<(usize, usize)> for Pos {
    fn from(tuple: (usize, usize)) -> Self {
        Pos(tuple.0 as i32, tuple.1 as i32)
    }
}

impl From<Pos> for (i32, i32) {
    fn from(val: Pos) -> Self {
        (val.0, val.1)
    }
}
