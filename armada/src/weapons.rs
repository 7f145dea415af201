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

//! Weapons and their blast patterns.
//!
//! A weapon maps the cell it is aimed at to the set of cells it affects. Both weapons
//! available today only affect the targeted cell; new weapons with wider blasts implement
//! [`Exploder`] and work with [`Board::fire`][crate::board::Board::fire] unchanged.
use std::fmt::Debug;

use crate::board::Coordinate;

/// Capability shared by everything that can be fired at a board.
pub trait Exploder: Debug + Send + Sync {
    /// Cells affected when this weapon detonates at `target`.
    fn explode(&self, target: Coordinate) -> Vec<Coordinate>;

    /// Character recorded on the board for each affected cell.
    fn symbol(&self) -> char;

    /// Name of the weapon.
    fn name(&self) -> &'static str;
}

/// A torpedo that strikes exactly the targeted cell.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SimpleTorpedo;

impl Exploder for SimpleTorpedo {
    fn explode(&self, target: Coordinate) -> Vec<Coordinate> {
        vec![target]
    }

    fn symbol(&self) -> char {
        'X'
    }

    fn name(&self) -> &'static str {
        "torpedo"
    }
}

/// A sea mine. Its blast covers only the cell it was laid in.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct SeaMine;

impl Exploder for SeaMine {
    fn explode(&self, target: Coordinate) -> Vec<Coordinate> {
        vec![target]
    }

    fn symbol(&self) -> char {
        'O'
    }

    fn name(&self) -> &'static str {
        "mine"
    }
}

/// Look up a weapon by name, ignoring ASCII case.
pub fn by_name(name: &str) -> Option<Box<dyn Exploder>> {
    match name.to_ascii_lowercase().as_str() {
        "torpedo" | "simpletorpedo" | "simple_torpedo" => Some(Box::new(SimpleTorpedo)),
        "mine" | "seamine" | "sea_mine" => Some(Box::new(SeaMine)),
        _ => None,
    }
}
