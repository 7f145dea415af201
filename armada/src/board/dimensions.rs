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

use std::borrow::Borrow;

use crate::board::Coordinate;

/// Size and ship ceiling shared by every board of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardParameters {
    /// Width of the board. This cooresponds to the `x` [`Coordinate`].
    pub width: usize,
    /// Height of the board. This cooresponds to the `y` [`Coordinate`].
    pub height: usize,
    /// Number of ships each participant may deploy.
    pub max_ships: usize,
}

impl BoardParameters {
    /// Construct [`BoardParameters`]. No validation happens here; games validate the
    /// parameters they are created with.
    pub fn new(width: usize, height: usize, max_ships: usize) -> Self {
        Self {
            width,
            height,
            max_ships,
        }
    }

    /// Get `(width, height)`.
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Number of cells on the board.
    pub fn total_size(&self) -> usize {
        self.width * self.height
    }

    /// Returns true if the coordinate lies on the board.
    pub fn contains<B: Borrow<Coordinate>>(&self, coord: B) -> bool {
        self.try_linearize(coord).is_some()
    }

    /// Convert a coordinate to a linear index, row by row from `y == 0`.
    /// Returns `None` if the coordinate is off the board.
    pub fn try_linearize<B: Borrow<Coordinate>>(&self, coord: B) -> Option<usize> {
        let c = coord.borrow();
        if c.x < 0 || c.y < 0 {
            return None;
        }
        let (x, y) = (c.x as usize, c.y as usize);
        if x < self.width && y < self.height {
            Some(y * self.width + x)
        } else {
            None
        }
    }

    /// Get an iterator over rows of this board as drawn: the northmost row first. Each
    /// row is an iterator over its coordinates from west to east.
    pub fn iter_rows(&self) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let width = self.width as i32;
        (0..self.height as i32)
            .rev()
            .map(move |y| (0..width).map(move |x| Coordinate::new(x, y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let params = BoardParameters::new(3, 2, 1);
        assert_eq!(params.total_size(), 6);
        assert_eq!(params.try_linearize(Coordinate::new(2, 1)), Some(5));
        assert!(!params.contains(Coordinate::new(3, 0)));
        assert!(!params.contains(Coordinate::new(0, 2)));
        assert!(!params.contains(Coordinate::new(-1, 0)));
    }

    #[test]
    fn rows_run_north_to_south() {
        let params = BoardParameters::new(2, 2, 1);
        let rows: Vec<Vec<_>> = params.iter_rows().map(|row| row.collect()).collect();
        assert_eq!(
            rows,
            vec![
                vec![Coordinate::new(0, 1), Coordinate::new(1, 1)],
                vec![Coordinate::new(0, 0), Coordinate::new(1, 0)],
            ]
        );
    }
}
