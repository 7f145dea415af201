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

//! Name-indexed player storage with a ranking kept in sync on every change.
use std::{collections::HashMap, convert::TryFrom};

use tracing::{debug, info};

use crate::player::{validate_name, Player, RegistryError};

/// All registered players.
///
/// Players are stored by name. Alongside, the names are kept sorted by
/// [`Player::ranking_cmp`]; every mutation re-sorts before returning, so with exclusive
/// access to the registry no reader can see the ranking out of date.
#[derive(Debug, Default)]
pub struct PlayerRegistry {
    by_name: HashMap<String, Player>,
    /// Names in ranking order, best first.
    ranking: Vec<String>,
}

impl PlayerRegistry {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered players.
    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    /// Returns true if nobody is registered.
    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    /// Register a new player with zero wins and losses.
    pub fn register(
        &mut self,
        name: &str,
        password_hash: impl Into<String>,
    ) -> Result<&Player, RegistryError> {
        validate_name(name)?;
        if self.by_name.contains_key(name) {
            return Err(RegistryError::DuplicateName(name.to_owned()));
        }
        let player = Player::new(name.to_owned(), password_hash.into());
        info!(player = name, id = %player.id(), "registered new player");
        self.by_name.insert(name.to_owned(), player);
        self.ranking.push(name.to_owned());
        self.sort_ranking();
        self.get(name)
    }

    /// Look up a player by name.
    pub fn get(&self, name: &str) -> Result<&Player, RegistryError> {
        self.by_name
            .get(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))
    }

    /// Record a win for the named player.
    pub fn score_win(&mut self, name: &str) -> Result<&Player, RegistryError> {
        self.score(name, |player| player.wins += 1)
    }

    /// Record a loss for the named player.
    pub fn score_loss(&mut self, name: &str) -> Result<&Player, RegistryError> {
        self.score(name, |player| player.losses += 1)
    }

    fn score(
        &mut self,
        name: &str,
        update: impl FnOnce(&mut Player),
    ) -> Result<&Player, RegistryError> {
        let player = self
            .by_name
            .get_mut(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))?;
        update(&mut *player);
        debug!(player = name, wins = player.wins, losses = player.losses, "score updated");
        self.sort_ranking();
        self.get(name)
    }

    /// Get ranked players.
    ///
    /// With `n >= 0`, returns up to `n` players from the top of the ranking, best first.
    /// With `n < 0`, returns exactly `|n|` players from the bottom of the ranking, worst
    /// first, or [`RegistryError::OutOfRange`] if fewer players are registered.
    pub fn rank(&self, n: i64) -> Result<Vec<&Player>, RegistryError> {
        let players = self.ranking.iter().filter_map(|name| self.by_name.get(name));
        if n >= 0 {
            let n = usize::try_from(n).unwrap_or(usize::MAX);
            return Ok(players.take(n).collect());
        }
        let requested = n.unsigned_abs();
        match usize::try_from(requested) {
            Ok(count) if count <= self.len() => Ok(players.rev().take(count).collect()),
            _ => Err(RegistryError::OutOfRange {
                requested,
                registered: self.len(),
            }),
        }
    }

    /// Get an iterator over all players in ranking order, best first.
    pub fn iter(&self) -> impl '_ + Iterator<Item = &Player> {
        self.ranking.iter().filter_map(move |name| self.by_name.get(name))
    }

    /// Remove a player, returning its final record.
    pub fn delete(&mut self, name: &str) -> Result<Player, RegistryError> {
        let player = self
            .by_name
            .remove(name)
            .ok_or_else(|| RegistryError::NotFound(name.to_owned()))?;
        self.ranking.retain(|ranked| ranked != name);
        info!(player = name, "deleted player");
        Ok(player)
    }

    fn sort_ranking(&mut self) {
        let by_name = &self.by_name;
        self.ranking
            .sort_by(|a, b| match (by_name.get(a), by_name.get(b)) {
                (Some(pa), Some(pb)) => pa.ranking_cmp(pb),
                _ => a.cmp(b),
            });
    }
}
