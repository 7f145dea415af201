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

//! Crate-wide error type and the kinds that callers dispatch on.
//!
//! Each module has its own error type which carries the context of the failure. All of
//! them can be converted into [`Error`], and all of them report an [`ErrorKind`] so a
//! transport layer can map failures to its own status codes without looking at message
//! text.

use std::fmt;

use thiserror::Error;

use crate::{board::DeployError, game::GameError, player::RegistryError, ships::ShipError};

/// Classification of every failure the domain model can report.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ErrorKind {
    /// A player name did not match the allowed pattern.
    InvalidName,
    /// A player name was already registered.
    DuplicateName,
    /// A player already holds a slot in the game.
    DuplicateParticipant,
    /// Lookup of a player, game or participant failed.
    NotFound,
    /// A participant or ship ceiling was reached.
    Capacity,
    /// A ship placement overlaps an already deployed ship.
    Collision,
    /// Malformed parameters: board too small, ship capacity, ship class or orientation.
    Validation,
    /// A ranking request asked for more players than are registered.
    OutOfRange,
    /// The operation is not permitted in the current state of the game or player.
    InvalidState,
}

impl ErrorKind {
    /// Short stable identifier for this kind, suitable for logs and wire formats.
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::InvalidName => "invalid_name",
            ErrorKind::DuplicateName => "duplicate_name",
            ErrorKind::DuplicateParticipant => "duplicate_participant",
            ErrorKind::NotFound => "not_found",
            ErrorKind::Capacity => "capacity",
            ErrorKind::Collision => "collision",
            ErrorKind::Validation => "validation",
            ErrorKind::OutOfRange => "out_of_range",
            ErrorKind::InvalidState => "invalid_state",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Any error produced by the domain model.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Ship(#[from] ShipError),
    #[error(transparent)]
    Deploy(#[from] DeployError),
    #[error(transparent)]
    Game(#[from] GameError),
}

impl Error {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Registry(err) => err.kind(),
            Error::Ship(err) => err.kind(),
            Error::Deploy(err) => err.kind(),
            Error::Game(err) => err.kind(),
        }
    }
}

/// Result type used by the [`Lobby`][crate::Lobby].
pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_survives_conversion() {
        let err: Error = RegistryError::NotFound("nemo".into()).into();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        let err: Error = ShipError::UnknownClass("Dinghy".into()).into();
        assert_eq!(err.kind(), ErrorKind::Validation);
    }

    #[test]
    fn display_is_transparent() {
        let inner = RegistryError::DuplicateName("nemo".into());
        let msg = inner.to_string();
        let err: Error = inner.into();
        assert_eq!(err.to_string(), msg);
    }
}
