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

//! Id-indexed storage of live games.
use std::{collections::HashMap, sync::Arc};

use parking_lot::{Mutex, RwLock};
use tracing::info;

use crate::game::{Game, GameError, GameId, GameState, GameSummary};

/// A game that may be shared between threads. Lock it to read or change it.
pub type SharedGame = Arc<Mutex<Game>>;

/// All live games.
///
/// The map itself sits behind a read-write lock and each game behind its own mutex, so
/// operations on different games never wait for each other. Always release the map lock
/// before waiting on a game lock; the accessors here hand out clones of the [`Arc`] for
/// that reason.
#[derive(Debug, Default)]
pub struct GameRegistry {
    games: RwLock<HashMap<GameId, SharedGame>>,
}

impl GameRegistry {
    /// Construct an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live games.
    pub fn len(&self) -> usize {
        self.games.read().len()
    }

    /// Returns true if there are no live games.
    pub fn is_empty(&self) -> bool {
        self.games.read().is_empty()
    }

    /// Make `game` reachable by its id.
    pub fn insert(&self, game: Game) -> SharedGame {
        let id = game.id();
        let shared = Arc::new(Mutex::new(game));
        self.games.write().insert(id, Arc::clone(&shared));
        shared
    }

    /// Look up a game by id.
    pub fn get(&self, id: GameId) -> Result<SharedGame, GameError> {
        self.games
            .read()
            .get(&id)
            .cloned()
            .ok_or(GameError::NotFound(id))
    }

    /// Remove a game, returning it. Holders of the returned handle may keep using it,
    /// but it is no longer reachable through the registry.
    pub fn remove(&self, id: GameId) -> Result<SharedGame, GameError> {
        let removed = self.games.write().remove(&id).ok_or(GameError::NotFound(id))?;
        info!(game = %id, "deleted game");
        Ok(removed)
    }

    /// Handles to every live game, in no particular order.
    pub fn all(&self) -> Vec<SharedGame> {
        self.games.read().values().cloned().collect()
    }

    /// Summaries of the live games, oldest first, optionally only those in `state`.
    pub fn summaries(&self, state: Option<GameState>) -> Vec<GameSummary> {
        let mut summaries: Vec<_> = self
            .all()
            .iter()
            .map(|game| game.lock().summary())
            .filter(|summary| state.map_or(true, |wanted| summary.state == wanted))
            .collect();
        summaries.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.description.cmp(&b.description))
        });
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::GameDefaults, ErrorKind};

    fn game(description: &str) -> Game {
        Game::create(10, 10, 3, description, 2, &GameDefaults::default()).unwrap()
    }

    #[test]
    fn insert_get_remove() {
        let registry = GameRegistry::new();
        let id = registry.insert(game("first")).lock().id();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(id).unwrap().lock().description(), "first");

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.lock().id(), id);
        assert!(registry.is_empty());
        assert_eq!(registry.get(id).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(registry.remove(id).unwrap_err(), GameError::NotFound(id));
    }

    #[test]
    fn summaries_filter_by_state() {
        let registry = GameRegistry::new();
        registry.insert(game("one"));
        let aborted = registry.insert(game("two"));
        aborted.lock().transition(GameState::Aborted).unwrap();

        assert_eq!(registry.summaries(None).len(), 2);
        let open = registry.summaries(Some(GameState::Open));
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].description, "one");
        let gone = registry.summaries(Some(GameState::Aborted));
        assert_eq!(gone[0].description, "two");
        assert!(registry.summaries(Some(GameState::Running)).is_empty());
    }
}
