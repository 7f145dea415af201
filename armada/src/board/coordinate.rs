// Copyright 2020 Zachary Stewart
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::fmt;

/// A cell on a board. `x` grows to the east and `y` grows to the north.
///
/// Coordinates are signed so that ship geometry can be computed before it is checked
/// against a particular board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    /// Horizontal position of the cell.
    pub x: i32,
    /// Vertical position of the cell.
    pub y: i32,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `x` and `y`.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Step `n` times along the vector `(dx, dy)`. Returns `None` if the result does
    /// not fit in an `i32`.
    pub fn step(self, (dx, dy): (i32, i32), n: i32) -> Option<Self> {
        let x = dx.checked_mul(n).and_then(|d| self.x.checked_add(d))?;
        let y = dy.checked_mul(n).and_then(|d| self.y.checked_add(d))?;
        Some(Self::new(x, y))
    }
}

impl From<(i32, i32)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(x, y)` pair.
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Coordinate> for (i32, i32) {
    /// Convert the [`Coordinate`] into an `(x, y)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.x, coord.y)
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "x:{}/y:{}", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stepping() {
        let stern = Coordinate::new(4, 5);
        assert_eq!(stern.step((1, 0), 3), Some(Coordinate::new(7, 5)));
        assert_eq!(stern.step((0, -1), 2), Some(Coordinate::new(4, 3)));
        assert_eq!(stern.step((-1, 0), 1), Some(Coordinate::new(3, 5)));
    }

    #[test]
    fn stepping_past_the_range() {
        assert_eq!(Coordinate::new(i32::MAX - 1, 0).step((1, 0), 2), None);
        assert_eq!(Coordinate::new(0, i32::MIN).step((0, -1), 1), None);
        assert_eq!(Coordinate::new(0, 0).step((1, 0), i32::MIN), None);
        assert_eq!(
            Coordinate::new(i32::MAX, 0).step((1, 0), 0),
            Some(Coordinate::new(i32::MAX, 0))
        );
    }

    #[test]
    fn conversions_and_display() {
        let coord: Coordinate = (2, -3).into();
        assert_eq!(<(i32, i32)>::from(coord), (2, -3));
        assert_eq!(coord.to_string(), "x:2/y:-3");
    }
}
