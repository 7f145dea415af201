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

//! Character grid used to draw a board.

use std::{borrow::Borrow, fmt};

use crate::board::{BoardParameters, Coordinate};

/// Character drawn for a cell with neither a ship nor an impact.
pub(super) const FILLER: char = '#';

/// One character per cell, linearized with [`BoardParameters::try_linearize`].
#[derive(Debug)]
pub(super) struct Grid {
    /// Dimensions of the drawn board.
    params: BoardParameters,
    /// Cells that make up this board.
    cells: Box<[char]>,
}

impl Grid {
    pub(super) fn new(params: BoardParameters) -> Self {
        let cells = vec![FILLER; params.total_size()].into_boxed_slice();
        Self { params, cells }
    }

    /// Draw `symbol` at the given [`Coordinate`]. Cells off the board are skipped.
    pub(super) fn paint<B: Borrow<Coordinate>>(&mut self, coord: B, symbol: char) {
        if let Some(cell) = self
            .params
            .try_linearize(coord)
            .and_then(|i| self.cells.get_mut(i))
        {
            *cell = symbol;
        }
    }

    /// Get the character at the given [`Coordinate`].
    pub(super) fn get<B: Borrow<Coordinate>>(&self, coord: B) -> Option<char> {
        self.params
            .try_linearize(coord)
            .and_then(|i| self.cells.get(i))
            .copied()
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in self.params.iter_rows() {
            for coord in row {
                write!(f, "{} ", self.get(coord).unwrap_or(FILLER))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
