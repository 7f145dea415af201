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

use std::{fmt, str::FromStr};

use crate::ships::ShipError;

/// The closed set of ship classes. The class fixes a ship's length and display symbol.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShipClass {
    /// Submarine: length 2.
    Submarine,
    /// Frigate: length 3.
    Frigate,
    /// Destroyer: length 4.
    Destroyer,
    /// Cruiser: length 5.
    Cruiser,
    /// Carrier: length 7.
    Carrier,
}

impl ShipClass {
    /// All ship classes, shortest first.
    pub const ALL: &'static [ShipClass] = &[
        ShipClass::Submarine,
        ShipClass::Frigate,
        ShipClass::Destroyer,
        ShipClass::Cruiser,
        ShipClass::Carrier,
    ];

    /// Get the length of this ship class.
    pub fn len(self) -> usize {
        match self {
            ShipClass::Submarine => 2,
            ShipClass::Frigate => 3,
            ShipClass::Destroyer => 4,
            ShipClass::Cruiser => 5,
            ShipClass::Carrier => 7,
        }
    }

    /// Character used when drawing a ship of this class on a board.
    pub fn symbol(self) -> char {
        match self {
            ShipClass::Submarine => 'S',
            ShipClass::Frigate => 'F',
            ShipClass::Destroyer => 'D',
            ShipClass::Cruiser => 'C',
            ShipClass::Carrier => 'T',
        }
    }

    /// Name of the class.
    pub fn name(self) -> &'static str {
        match self {
            ShipClass::Submarine => "Submarine",
            ShipClass::Frigate => "Frigate",
            ShipClass::Destroyer => "Destroyer",
            ShipClass::Cruiser => "Cruiser",
            ShipClass::Carrier => "Carrier",
        }
    }
}

impl fmt::Display for ShipClass {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for ShipClass {
    type Err = ShipError;

    /// Parse a class from its name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ShipClass::ALL
            .iter()
            .copied()
            .find(|class| class.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ShipError::UnknownClass(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_table() {
        let table: Vec<_> = ShipClass::ALL
            .iter()
            .map(|c| (c.name(), c.len(), c.symbol()))
            .collect();
        assert_eq!(
            table,
            vec![
                ("Submarine", 2, 'S'),
                ("Frigate", 3, 'F'),
                ("Destroyer", 4, 'D'),
                ("Cruiser", 5, 'C'),
                ("Carrier", 7, 'T'),
            ]
        );
    }

    #[test]
    fn parse_ignores_case() {
        assert_eq!("carrier".parse::<ShipClass>().unwrap(), ShipClass::Carrier);
        assert_eq!("FRIGATE".parse::<ShipClass>().unwrap(), ShipClass::Frigate);
        assert_eq!(
            "Battleship".parse::<ShipClass>().unwrap_err(),
            ShipError::UnknownClass("Battleship".into())
        );
    }
}
