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

//! Ship geometry, damage tracking and collision checks.
use std::{fmt, str::FromStr};

use crate::board::Coordinate;

pub use self::{class::ShipClass, errors::ShipError};

mod class;
mod errors;

/// Heading of a ship, pointing from the stern to the bow.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// All orientations, clockwise from north.
    pub const ALL: &'static [Orientation] = &[
        Orientation::North,
        Orientation::East,
        Orientation::South,
        Orientation::West,
    ];

    /// Unit step from one structure cell to the next.
    pub fn vector(self) -> (i32, i32) {
        match self {
            Orientation::North => (0, 1),
            Orientation::East => (1, 0),
            Orientation::South => (0, -1),
            Orientation::West => (-1, 0),
        }
    }

    /// Single letter token for this orientation.
    pub fn token(self) -> &'static str {
        match self {
            Orientation::North => "n",
            Orientation::East => "e",
            Orientation::South => "s",
            Orientation::West => "w",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(match self {
            Orientation::North => "North",
            Orientation::East => "East",
            Orientation::South => "South",
            Orientation::West => "West",
        })
    }
}

impl FromStr for Orientation {
    type Err = ShipError;

    /// Parse one of the tokens `n`, `e`, `s`, `w`. Full compass names are also accepted.
    /// Case is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(Orientation::North),
            "e" | "east" => Ok(Orientation::East),
            "s" | "south" => Ok(Orientation::South),
            "w" | "west" => Ok(Orientation::West),
            _ => Err(ShipError::InvalidOrientation(s.to_owned())),
        }
    }
}

#[cfg(feature = "rng_gen")]
impl rand::distributions::Distribution<Orientation> for rand::distributions::Standard {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        Orientation::ALL[rng.gen_range(0, Orientation::ALL.len())]
    }
}

/// One cell of a ship's hull.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct StructureUnit {
    /// Cell covered by this unit.
    pub coord: Coordinate,
    /// Whether a weapon has struck this unit.
    pub damaged: bool,
}

/// A single vessel. Geometry is fixed at construction; only damage changes afterwards.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    class: ShipClass,
    orientation: Orientation,
    /// Hull cells from stern to bow.
    structure: Vec<StructureUnit>,
}

impl Ship {
    /// Build an undamaged ship of the given class whose stern sits at `stern`, extending
    /// toward `orientation`. Fails if the bow would not fit in the coordinate range.
    pub fn new(
        class: ShipClass,
        stern: Coordinate,
        orientation: Orientation,
    ) -> Result<Self, ShipError> {
        let dir = orientation.vector();
        let structure = (0..class.len() as i32)
            .map(|i| {
                stern.step(dir, i).map(|coord| StructureUnit {
                    coord,
                    damaged: false,
                })
            })
            .collect::<Option<Vec<_>>>()
            .ok_or(ShipError::OutOfRange {
                class,
                stern,
                orientation,
            })?;
        Ok(Self {
            class,
            orientation,
            structure,
        })
    }

    /// Build a ship from a class name and an orientation token as received from a caller.
    pub fn from_tokens(
        class: &str,
        stern: Coordinate,
        orientation: &str,
    ) -> Result<Self, ShipError> {
        Self::new(class.parse()?, stern, orientation.parse()?)
    }

    /// Class of this ship.
    pub fn class(&self) -> ShipClass {
        self.class
    }

    /// Number of cells this ship covers.
    pub fn len(&self) -> usize {
        self.structure.len()
    }

    /// Character used when drawing this ship.
    pub fn symbol(&self) -> char {
        self.class.symbol()
    }

    /// Heading of this ship.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Hull units from stern to bow.
    pub fn structure(&self) -> &[StructureUnit] {
        &self.structure
    }

    /// Get an iterator over the cells of this ship, from stern to bow.
    pub fn coords(&self) -> impl '_ + Iterator<Item = Coordinate> {
        self.structure.iter().map(|unit| unit.coord)
    }

    /// The anchor cell the ship was built from.
    pub fn stern(&self) -> Coordinate {
        self.structure[0].coord
    }

    /// The cell at the far end from the stern.
    pub fn bow(&self) -> Coordinate {
        self.structure[self.structure.len() - 1].coord
    }

    /// Whether this ship covers `coord`.
    pub fn occupies(&self, coord: Coordinate) -> bool {
        self.coords().any(|c| c == coord)
    }

    /// Returns true if any cell of this ship is also a cell of `other`.
    pub fn collides(&self, other: &Ship) -> bool {
        self.coords().any(|outer| other.occupies(outer))
    }

    /// Mark the unit at `coord` as damaged. Returns false and does nothing if the cell is
    /// not part of this ship.
    pub fn register_hit(&mut self, coord: Coordinate) -> bool {
        match self.structure.iter_mut().find(|unit| unit.coord == coord) {
            Some(unit) => {
                unit.damaged = true;
                true
            }
            None => false,
        }
    }

    /// Number of damaged units.
    pub fn hit_count(&self) -> usize {
        self.structure.iter().filter(|unit| unit.damaged).count()
    }

    /// Returns true once every unit has been damaged.
    pub fn is_destroyed(&self) -> bool {
        self.hit_count() == self.class.len()
    }
}

impl fmt::Display for Ship {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} (Stern: {}, Heading: {}, Length: {}, Hits: {})",
            self.class,
            self.stern(),
            self.orientation,
            self.len(),
            self.hit_count()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ship(class: &str, x: i32, y: i32, dir: &str) -> Ship {
        Ship::from_tokens(class, Coordinate::new(x, y), dir).unwrap()
    }

    #[test]
    fn collides_is_symmetric() {
        let one = ship("Destroyer", 4, 5, "e");
        let two = ship("Frigate", 5, 4, "n");
        let three = ship("Cruiser", 6, 3, "n");
        assert!(one.collides(&two) && two.collides(&one));
        assert!(one.collides(&three) && three.collides(&one));
        assert!(!two.collides(&three) && !three.collides(&two));
    }

    #[test]
    fn bow_and_stern() {
        let one = ship("Destroyer", 4, 5, "e");
        assert_eq!(one.stern(), Coordinate::new(4, 5));
        assert_eq!(one.bow(), Coordinate::new(7, 5));

        let two = ship("Frigate", 5, 4, "n");
        assert_eq!(two.bow(), Coordinate::new(5, 6));

        let three = ship("Frigate", 3, 3, "s");
        assert_eq!(three.stern(), Coordinate::new(3, 3));
        assert_eq!(three.bow(), Coordinate::new(3, 1));
    }

    #[test]
    fn orientation_matches_structure() {
        for &dir in Orientation::ALL {
            let s = Ship::new(ShipClass::Cruiser, Coordinate::new(0, 0), dir).unwrap();
            assert_eq!(s.orientation(), dir);
            let units = s.structure();
            let delta = (
                units[1].coord.x - units[0].coord.x,
                units[1].coord.y - units[0].coord.y,
            );
            assert_eq!(delta, dir.vector());
            assert_eq!(s.len(), ShipClass::Cruiser.len());
        }
    }

    #[test]
    fn hits_and_destruction() {
        let mut sub = ship("Submarine", 2, 2, "w");
        assert_eq!(
            sub.coords().collect::<Vec<_>>(),
            vec![Coordinate::new(2, 2), Coordinate::new(1, 2)]
        );
        assert!(!sub.register_hit(Coordinate::new(3, 2)));
        assert_eq!(sub.hit_count(), 0);
        assert!(sub.register_hit(Coordinate::new(2, 2)));
        // A second strike on the same unit does not count twice.
        assert!(sub.register_hit(Coordinate::new(2, 2)));
        assert_eq!(sub.hit_count(), 1);
        assert!(!sub.is_destroyed());
        sub.register_hit(Coordinate::new(1, 2));
        assert!(sub.is_destroyed());
    }

    #[test]
    fn invalid_tokens() {
        assert_eq!(
            Ship::from_tokens("Destroyer", Coordinate::new(0, 0), "x").unwrap_err(),
            ShipError::InvalidOrientation("x".into())
        );
        assert_eq!(
            Ship::from_tokens("Dinghy", Coordinate::new(0, 0), "n").unwrap_err(),
            ShipError::UnknownClass("Dinghy".into())
        );
    }

    #[test]
    fn hull_past_the_coordinate_range() {
        let stern = Coordinate::new(i32::MAX - 2, 0);
        assert_eq!(
            Ship::new(ShipClass::Carrier, stern, Orientation::East).unwrap_err(),
            ShipError::OutOfRange {
                class: ShipClass::Carrier,
                stern,
                orientation: Orientation::East,
            }
        );
        assert_eq!(
            Ship::from_tokens("Carrier", Coordinate::new(0, i32::MIN + 1), "s")
                .unwrap_err()
                .kind(),
            crate::ErrorKind::Validation
        );
        // Heading away from the edge stays in range.
        let ship = Ship::new(ShipClass::Carrier, stern, Orientation::West).unwrap();
        assert_eq!(ship.bow(), Coordinate::new(i32::MAX - 8, 0));
    }

    #[test]
    fn display() {
        assert_eq!(
            ship("Destroyer", 4, 5, "e").to_string(),
            "Destroyer (Stern: x:4/y:5, Heading: East, Length: 4, Hits: 0)"
        );
    }
}
