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

//! Registered players and their win/loss record.
use std::{cmp::Ordering, fmt, str::FromStr};

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use uuid::Uuid;

pub use self::{errors::RegistryError, registry::PlayerRegistry};

mod errors;
mod registry;

/// Opaque, globally unique identifier of a player.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerId(Uuid);

impl PlayerId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        PlayerId(Uuid::new_v4())
    }
}

impl Default for PlayerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for PlayerId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(PlayerId)
    }
}

/// A registered player.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Player {
    name: String,
    #[cfg_attr(feature = "serde", serde(skip))]
    password_hash: String,
    id: PlayerId,
    registered_at: DateTime<Utc>,
    wins: u32,
    losses: u32,
}

impl Player {
    fn new(name: String, password_hash: String) -> Self {
        Self {
            name,
            password_hash,
            id: PlayerId::new(),
            registered_at: Utc::now(),
            wins: 0,
            losses: 0,
        }
    }

    /// Unique name of the player.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Credential hash as handed in at registration. Never interpreted here.
    pub fn password_hash(&self) -> &str {
        &self.password_hash
    }

    pub fn id(&self) -> PlayerId {
        self.id
    }

    pub fn registered_at(&self) -> DateTime<Utc> {
        self.registered_at
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    /// Ranking order: more wins first, then fewer losses, then name ascending.
    pub fn ranking_cmp(&self, other: &Player) -> Ordering {
        other
            .wins
            .cmp(&self.wins)
            .then_with(|| self.losses.cmp(&other.losses))
            .then_with(|| self.name.cmp(&other.name))
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} ({}W/{}L)", self.name, self.wins, self.losses)
    }
}

/// Starts with a letter, then up to 31 letters, digits, `-` or `_`.
static NAME_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]{0,31}$").unwrap());

/// Check `name` against the player naming rules.
pub fn validate_name(name: &str) -> Result<(), RegistryError> {
    if NAME_PATTERN.is_match(name) {
        Ok(())
    } else {
        Err(RegistryError::InvalidName(name.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn good_names() {
        for name in &[
            "abcde",
            "Abcde",
            "ABCDE",
            "a",
            "a1bcde",
            "A12345_-",
            "A-_1234567890987654321_qwerHGF45",
        ] {
            assert!(validate_name(name).is_ok(), "{} should be valid", name);
        }
    }

    #[test]
    fn bad_names() {
        for name in &[
            "4kjdf",
            "",
            "%çkjcd",
            "abcdä",
            "abcde1234567890987654321234567890",
            "sdlfkj 45",
            "-abc",
        ] {
            assert_eq!(
                validate_name(name),
                Err(RegistryError::InvalidName(name.to_string()))
            );
        }
    }

    #[test]
    fn player_id_round_trips_through_text() {
        let id = PlayerId::new();
        assert_eq!(id.to_string().parse::<PlayerId>().unwrap(), id);
    }
}
