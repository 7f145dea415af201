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

//! Per-participant board: deployed ships, recorded impacts and rendering.

use std::fmt;

use tracing::debug;

use crate::{
    ships::{Ship, ShipClass},
    weapons::Exploder,
};

use self::grid::Grid;
pub use self::{coordinate::Coordinate, dimensions::BoardParameters, errors::DeployError};

mod coordinate;
mod dimensions;
mod errors;
mod grid;

/// A recorded attack on a cell, independent of whether a ship was there.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Impact {
    /// The cell that was struck.
    pub coord: Coordinate,
    /// Symbol of the weapon that struck it.
    pub symbol: char,
}

/// Result of one affected cell when a weapon is fired at a board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The cell held no ship.
    Miss(Coordinate),
    /// The given ship was hit but it was not sunk.
    Hit(ShipClass),
    /// The given ship was hit and sunk, but the board still has other ships afloat.
    Sunk(ShipClass),
    /// The given ship was hit and sunk, and every ship on the board is now destroyed.
    Defeated(ShipClass),
}

impl ShotOutcome {
    /// Get the class of the ship that was hit, if any.
    pub fn ship(&self) -> Option<ShipClass> {
        match *self {
            ShotOutcome::Miss(_) => None,
            ShotOutcome::Hit(class) | ShotOutcome::Sunk(class) | ShotOutcome::Defeated(class) => {
                Some(class)
            }
        }
    }
}

/// Represents a single participant's side of the ocean.
#[derive(Debug, Clone)]
pub struct Board {
    params: BoardParameters,
    /// Deployed ships. Never contains two ships that overlap.
    ships: Vec<Ship>,
    /// Append-only log of impacts.
    impacts: Vec<Impact>,
}

impl Board {
    /// Create an empty board with the given parameters.
    pub fn new(params: BoardParameters) -> Self {
        Self {
            params,
            ships: Vec::new(),
            impacts: Vec::new(),
        }
    }

    /// Parameters this board was created with.
    pub fn parameters(&self) -> &BoardParameters {
        &self.params
    }

    /// Get `(width, height)` of this board.
    pub fn dimensions(&self) -> (usize, usize) {
        self.params.dimensions()
    }

    /// Number of cells on this board.
    pub fn size(&self) -> usize {
        self.params.total_size()
    }

    /// Ships deployed so far, in deployment order.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Impacts recorded so far, oldest first.
    pub fn impacts(&self) -> &[Impact] {
        &self.impacts
    }

    /// Returns true if `coord` lies on this board.
    pub fn contains(&self, coord: Coordinate) -> bool {
        self.params.contains(coord)
    }

    /// Returns true if every cell of `ship` lies on this board.
    pub fn fits(&self, ship: &Ship) -> bool {
        ship.coords().all(|c| self.params.contains(c))
    }

    /// Get the deployed ship covering `coord`, if any.
    pub fn ship_at(&self, coord: Coordinate) -> Option<&Ship> {
        self.ships.iter().find(|ship| ship.occupies(coord))
    }

    /// Deploy `ship` unless it overlaps any ship already on the board. On failure the
    /// board is unchanged and the ship is handed back inside the error.
    ///
    /// The ship ceiling in [`BoardParameters::max_ships`] is not checked here; games
    /// enforce it per participant.
    pub fn deploy_ship(&mut self, ship: Ship) -> Result<(), DeployError> {
        if let Some(existing) = self.ships.iter().find(|other| other.collides(&ship)) {
            return Err(DeployError::new(ship, existing.clone()));
        }
        debug!(%ship, "ship deployed");
        self.ships.push(ship);
        Ok(())
    }

    /// Append an impact to the log. Which ship, if any, was struck is not resolved here.
    pub fn record_impact(&mut self, coord: Coordinate, symbol: char) {
        self.impacts.push(Impact { coord, symbol });
    }

    /// Fire `weapon` at `target`. Every affected cell on the board is recorded as an
    /// impact and damages the ship covering it. Affected cells off the board are
    /// ignored.
    pub fn fire(&mut self, weapon: &dyn Exploder, target: Coordinate) -> Vec<ShotOutcome> {
        let cells: Vec<_> = weapon
            .explode(target)
            .into_iter()
            .filter(|c| self.params.contains(c))
            .collect();
        let mut outcomes = Vec::with_capacity(cells.len());
        for coord in cells {
            self.record_impact(coord, weapon.symbol());
            let struck = match self.ships.iter_mut().find(|ship| ship.occupies(coord)) {
                None => {
                    outcomes.push(ShotOutcome::Miss(coord));
                    continue;
                }
                Some(ship) => {
                    let was_destroyed = ship.is_destroyed();
                    ship.register_hit(coord);
                    (ship.class(), !was_destroyed && ship.is_destroyed())
                }
            };
            outcomes.push(match struck {
                (class, true) if self.defeated() => ShotOutcome::Defeated(class),
                (class, true) => ShotOutcome::Sunk(class),
                (class, false) => ShotOutcome::Hit(class),
            });
        }
        outcomes
    }

    /// Returns true if at least one ship was deployed and all of them are destroyed.
    pub fn defeated(&self) -> bool {
        !self.ships.is_empty() && self.ships.iter().all(Ship::is_destroyed)
    }

    /// Draw the board. Rows run from the northmost row down, cells from west to east.
    /// Each cell is followed by a space and each row ends with a newline. An impact is
    /// drawn over a ship, a ship over the `#` filler.
    pub fn render(&self) -> String {
        self.to_string()
    }

    /// Find a random in-bounds placement for a ship of `class` that does not collide with
    /// any deployed ship. Gives up after a bounded number of attempts.
    #[cfg(feature = "rng_gen")]
    pub fn random_ship<R: rand::Rng + ?Sized>(
        &self,
        class: ShipClass,
        rng: &mut R,
    ) -> Option<Ship> {
        if self.params.width == 0 || self.params.height == 0 {
            return None;
        }
        for _ in 0..100 {
            let stern = Coordinate::new(
                rng.gen_range(0, self.params.width as i32),
                rng.gen_range(0, self.params.height as i32),
            );
            if let Ok(ship) = Ship::new(class, stern, rng.gen()) {
                if self.fits(&ship) && !self.ships.iter().any(|other| other.collides(&ship)) {
                    return Some(ship);
                }
            }
        }
        None
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut grid = Grid::new(self.params);
        for ship in &self.ships {
            for coord in ship.coords() {
                grid.paint(coord, ship.symbol());
            }
        }
        for impact in &self.impacts {
            grid.paint(impact.coord, impact.symbol);
        }
        fmt::Display::fmt(&grid, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weapons::{SeaMine, SimpleTorpedo};

    fn ship(class: &str, x: i32, y: i32, dir: &str) -> Ship {
        Ship::from_tokens(class, Coordinate::new(x, y), dir).unwrap()
    }

    #[test]
    fn deployment_rejects_collisions() {
        let mut board = Board::new(BoardParameters::new(8, 8, 4));
        board.deploy_ship(ship("Destroyer", 3, 3, "n")).unwrap();
        board.deploy_ship(ship("Frigate", 5, 6, "s")).unwrap();
        assert_eq!(board.ships().len(), 2);

        let err = board.deploy_ship(ship("Frigate", 5, 6, "s")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Collision);
        assert_eq!(err.existing(), &ship("Frigate", 5, 6, "s"));
        assert_eq!(board.ships().len(), 2);
    }

    #[test]
    fn collision_checked_against_every_ship() {
        let mut board = Board::new(BoardParameters::new(12, 12, 5));
        board.deploy_ship(ship("Carrier", 0, 0, "e")).unwrap();
        board.deploy_ship(ship("Submarine", 0, 5, "n")).unwrap();
        // Overlaps the first ship, not the most recent one.
        let rejected = board.deploy_ship(ship("Cruiser", 6, 0, "n")).unwrap_err();
        assert_eq!(rejected.existing().class(), ShipClass::Carrier);
        let before = board.render();
        assert_eq!(board.ships().len(), 2);
        assert_eq!(board.render(), before);

        // Moving off the conflicting cell succeeds.
        board.deploy_ship(ship("Cruiser", 7, 1, "n")).unwrap();
        assert_eq!(board.ships().len(), 3);
    }

    #[test]
    fn render_golden() {
        let mut board = Board::new(BoardParameters::new(8, 8, 4));
        board.deploy_ship(ship("Destroyer", 0, 0, "n")).unwrap();
        board.deploy_ship(ship("Carrier", 5, 6, "s")).unwrap();
        let expected = concat!(
            "# # # # # # # # \n",
            "# # # # # T # # \n",
            "# # # # # T # # \n",
            "# # # # # T # # \n",
            "D # # # # T # # \n",
            "D # # # # T # # \n",
            "D # # # # T # # \n",
            "D # # # # T # # \n",
        );
        assert_eq!(board.render(), expected);
        assert_eq!(board.to_string(), expected);
    }

    #[test]
    fn impacts_drawn_over_ships() {
        let mut board = Board::new(BoardParameters::new(3, 2, 1));
        board.deploy_ship(ship("Submarine", 0, 0, "e")).unwrap();
        board.record_impact(Coordinate::new(1, 0), 'X');
        board.record_impact(Coordinate::new(2, 1), 'O');
        assert_eq!(board.render(), "# # O \nS X # \n");
        assert_eq!(board.impacts().len(), 2);
    }

    #[test]
    fn dimensions_and_size() {
        let board = Board::new(BoardParameters::new(12, 10, 5));
        assert_eq!(board.dimensions(), (12, 10));
        assert_eq!(board.size(), 120);
    }

    #[test]
    fn fire_resolves_hits() {
        let mut board = Board::new(BoardParameters::new(10, 10, 2));
        board.deploy_ship(ship("Submarine", 0, 0, "n")).unwrap();
        board.deploy_ship(ship("Submarine", 5, 5, "e")).unwrap();

        assert_eq!(
            board.fire(&SimpleTorpedo, Coordinate::new(9, 9)),
            vec![ShotOutcome::Miss(Coordinate::new(9, 9))]
        );
        assert_eq!(
            board.fire(&SimpleTorpedo, Coordinate::new(0, 0)),
            vec![ShotOutcome::Hit(ShipClass::Submarine)]
        );
        assert_eq!(
            board.fire(&SeaMine, Coordinate::new(0, 1)),
            vec![ShotOutcome::Sunk(ShipClass::Submarine)]
        );
        // Striking a wreck again reports a plain hit.
        assert_eq!(
            board.fire(&SimpleTorpedo, Coordinate::new(0, 1)),
            vec![ShotOutcome::Hit(ShipClass::Submarine)]
        );
        board.fire(&SimpleTorpedo, Coordinate::new(5, 5));
        assert!(!board.defeated());
        assert_eq!(
            board.fire(&SimpleTorpedo, Coordinate::new(6, 5)),
            vec![ShotOutcome::Defeated(ShipClass::Submarine)]
        );
        assert!(board.defeated());
        assert_eq!(board.impacts().len(), 6);
    }

    #[test]
    fn fire_off_board_records_nothing() {
        let mut board = Board::new(BoardParameters::new(10, 10, 2));
        assert!(board.fire(&SimpleTorpedo, Coordinate::new(10, 0)).is_empty());
        assert!(board.impacts().is_empty());
    }

    #[cfg(feature = "rng_gen")]
    #[test]
    fn random_ships_fit_without_collisions() {
        use rand::SeedableRng;
        let mut rng = rand::rngs::StdRng::seed_from_u64(7);
        let mut board = Board::new(BoardParameters::new(10, 10, 5));
        for &class in ShipClass::ALL {
            let ship = board.random_ship(class, &mut rng).unwrap();
            assert!(board.fits(&ship));
            board.deploy_ship(ship).unwrap();
        }
        assert_eq!(board.ships().len(), ShipClass::ALL.len());
    }
}
