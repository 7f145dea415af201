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

use thiserror::Error;

use crate::errors::ErrorKind;

/// Errors returned by the [`PlayerRegistry`][crate::player::PlayerRegistry].
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum RegistryError {
    /// The name does not meet the naming rules.
    #[error(
        "player name {0:?} doesn't meet requirements (starts with a letter, only letters, \
         digits, '-' or '_' allowed, max size 32 characters)"
    )]
    InvalidName(String),
    /// The name is already registered.
    #[error("player name {0:?} is already taken")]
    DuplicateName(String),
    /// No player is registered under the name.
    #[error("no player with name {0:?} found")]
    NotFound(String),
    /// A bottom ranking was requested for more players than are registered.
    #[error("ranking of {requested} players requested but only {registered} are registered")]
    OutOfRange { requested: u64, registered: usize },
    /// The player still participates in a game that has not ended.
    #[error("player {0:?} is still participating in an active game")]
    Engaged(String),
}

impl RegistryError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::InvalidName(_) => ErrorKind::InvalidName,
            RegistryError::DuplicateName(_) => ErrorKind::DuplicateName,
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::OutOfRange { .. } => ErrorKind::OutOfRange,
            RegistryError::Engaged(_) => ErrorKind::InvalidState,
        }
    }
}
