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

//! Errors used by the [`Board`][crate::board::Board].

use std::fmt::{self, Debug};

use thiserror::Error;

use crate::{errors::ErrorKind, ships::Ship};

/// Error returned when a ship overlaps a ship already deployed on the board.
#[derive(Error, Clone, Eq, PartialEq)]
#[error("collision with ship {existing} detected")]
pub struct DeployError {
    /// The ship that was not deployed.
    ship: Ship,
    /// The deployed ship it overlaps.
    existing: Ship,
}

impl DeployError {
    pub(super) fn new(ship: Ship, existing: Ship) -> Self {
        Self { ship, existing }
    }

    /// The ship that was rejected.
    pub fn ship(&self) -> &Ship {
        &self.ship
    }

    /// The already deployed ship that blocked placement.
    pub fn existing(&self) -> &Ship {
        &self.existing
    }

    /// Extract the rejected ship from this error.
    pub fn into_ship(self) -> Ship {
        self.ship
    }

    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Collision
    }
}

impl Debug for DeployError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
