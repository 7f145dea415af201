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

//! The lobby ties the player registry and the live games together behind one
//! thread-safe handle.
//!
//! Every method takes `&self`; a single [`Lobby`] can be shared between request handlers
//! in an [`Arc`][std::sync::Arc]. Locks are always taken in the same order: the player
//! registry, then the game map, then an individual game. No lock is held across a call
//! back into the caller.
use parking_lot::RwLock;
use tracing::{info, warn};

use crate::{
    board::{Coordinate, ShotOutcome},
    config::GameDefaults,
    errors::{Error, Result},
    game::{Game, GameId, GameRegistry, GameState, GameSummary, SharedGame},
    player::{Player, PlayerRegistry, RegistryError},
    ships::Ship,
    weapons::Exploder,
};

/// Shared entry point for players and games.
#[derive(Debug, Default)]
pub struct Lobby {
    defaults: GameDefaults,
    players: RwLock<PlayerRegistry>,
    games: GameRegistry,
}

impl Lobby {
    /// Create an empty lobby that fills unspecified game settings from `defaults`.
    pub fn new(defaults: GameDefaults) -> Self {
        Self {
            defaults,
            players: RwLock::new(PlayerRegistry::new()),
            games: GameRegistry::new(),
        }
    }

    /// Settings used for games created without explicit values.
    pub fn defaults(&self) -> &GameDefaults {
        &self.defaults
    }

    /// Register a new player.
    pub fn register_player(&self, name: &str, password_hash: &str) -> Result<Player> {
        Ok(self.players.write().register(name, password_hash)?.clone())
    }

    /// Look up a player by name.
    pub fn player(&self, name: &str) -> Result<Player> {
        Ok(self.players.read().get(name)?.clone())
    }

    /// Ranked players; see [`PlayerRegistry::rank`].
    pub fn rank(&self, n: i64) -> Result<Vec<Player>> {
        let players = self.players.read();
        Ok(players.rank(n)?.into_iter().cloned().collect())
    }

    /// Record a win for the named player.
    pub fn score_win(&self, name: &str) -> Result<Player> {
        Ok(self.players.write().score_win(name)?.clone())
    }

    /// Record a loss for the named player.
    pub fn score_loss(&self, name: &str) -> Result<Player> {
        Ok(self.players.write().score_loss(name)?.clone())
    }

    /// Delete a player. Refused while the player holds a seat in a game that has not
    /// ended.
    pub fn delete_player(&self, name: &str) -> Result<Player> {
        let mut players = self.players.write();
        players.get(name)?;
        let engaged = self.games.all().iter().any(|game| {
            let game = game.lock();
            !game.state().is_terminal() && game.is_participant(name)
        });
        if engaged {
            return Err(RegistryError::Engaged(name.to_owned()).into());
        }
        Ok(players.delete(name)?)
    }

    /// Create and publish a new game.
    ///
    /// A `width`, `height` or `max_ships` of `None` takes the lobby default; explicit
    /// values are validated as given. Each name in `initial_players` is seated if
    /// possible; names that cannot be seated are logged and skipped without failing the
    /// creation.
    pub fn create_game(
        &self,
        width: Option<usize>,
        height: Option<usize>,
        max_ships: Option<usize>,
        description: &str,
        max_participants: usize,
        initial_players: &[&str],
    ) -> Result<GameSummary> {
        let mut game = Game::create(
            width.unwrap_or(self.defaults.board_width),
            height.unwrap_or(self.defaults.board_height),
            max_ships.unwrap_or(self.defaults.max_ships),
            description,
            max_participants,
            &self.defaults,
        )?;

        let players = self.players.read();
        for &name in initial_players {
            let seated: Result<()> = players
                .get(name)
                .map_err(Error::from)
                .and_then(|player| game.add_participant(player).map_err(Error::from));
            if let Err(err) = seated {
                warn!(game = %game.id(), player = name, error = %err, "skipping initial player");
            }
        }
        let summary = game.summary();
        self.games.insert(game);
        Ok(summary)
    }

    /// Summary of one game.
    pub fn game(&self, id: GameId) -> Result<GameSummary> {
        Ok(self.games.get(id)?.lock().summary())
    }

    /// Shared handle to a game for callers that need more than the summary.
    pub fn shared_game(&self, id: GameId) -> Result<SharedGame> {
        Ok(self.games.get(id)?)
    }

    /// Summaries of all games, oldest first, optionally only those in `state`.
    pub fn games(&self, state: Option<GameState>) -> Vec<GameSummary> {
        self.games.summaries(state)
    }

    /// Remove a game.
    pub fn delete_game(&self, id: GameId) -> Result<()> {
        self.games.remove(id)?;
        Ok(())
    }

    /// Seat the named player in a game.
    pub fn join_game(&self, id: GameId, name: &str) -> Result<()> {
        let players = self.players.read();
        let player = players.get(name)?;
        let game = self.games.get(id)?;
        let mut game = game.lock();
        game.add_participant(player)?;
        Ok(())
    }

    /// Remove the named player from a game.
    pub fn leave_game(&self, id: GameId, name: &str) -> Result<()> {
        self.games.get(id)?.lock().remove_participant(name)?;
        Ok(())
    }

    /// Move a game to another state.
    pub fn transition(&self, id: GameId, to: GameState) -> Result<()> {
        self.games.get(id)?.lock().transition(to)?;
        Ok(())
    }

    /// Deploy a ship for the named participant.
    pub fn deploy_ship(&self, id: GameId, name: &str, ship: Ship) -> Result<()> {
        self.games.get(id)?.lock().deploy_ship(name, ship)?;
        Ok(())
    }

    /// Fire a weapon in a running game. When the shot decides the game, the winner is
    /// credited a win and every other participant a loss.
    pub fn fire(
        &self,
        id: GameId,
        attacker: &str,
        target: &str,
        weapon: &dyn Exploder,
        coord: Coordinate,
    ) -> Result<Vec<ShotOutcome>> {
        let shared = self.games.get(id)?;
        let (outcomes, result) = {
            let mut game = shared.lock();
            let outcomes = game.fire(attacker, target, weapon, coord)?;
            let result = game
                .winner()
                .map(|winner| (winner.to_owned(), game.losers()));
            (outcomes, result)
        };
        if let Some((winner, losers)) = result {
            self.record_result(id, &winner, &losers);
        }
        Ok(outcomes)
    }

    /// Render the named participant's board.
    pub fn render_board(&self, id: GameId, name: &str) -> Result<String> {
        Ok(self.games.get(id)?.lock().board(name)?.render())
    }

    fn record_result(&self, id: GameId, winner: &str, losers: &[String]) {
        let mut players = self.players.write();
        if let Err(err) = players.score_win(winner) {
            warn!(game = %id, player = winner, error = %err, "could not credit win");
        }
        for loser in losers {
            if let Err(err) = players.score_loss(loser) {
                warn!(game = %id, player = %loser, error = %err, "could not record loss");
            }
        }
        info!(game = %id, winner, "recorded game result");
    }
}

#[cfg(test)]
mod tests {
    use std::{sync::Arc, thread};

    use super::*;
    use crate::{weapons::SimpleTorpedo, ErrorKind};

    fn lobby(names: &[&str]) -> Lobby {
        let lobby = Lobby::default();
        for name in names {
            lobby.register_player(name, "secret").unwrap();
        }
        lobby
    }

    fn ship(class: &str, x: i32, y: i32, dir: &str) -> Ship {
        Ship::from_tokens(class, Coordinate::new(x, y), dir).unwrap()
    }

    #[test]
    fn create_game_seeds_players_best_effort() {
        let lobby = lobby(&["armon", "bert", "carl"]);
        let summary = lobby
            .create_game(None, None, None, "", 0, &["armon", "nobody", "armon", "bert", "carl"])
            .unwrap();
        assert_eq!(summary.participants, vec!["armon", "bert"]);
        assert_eq!(summary.parameters.dimensions(), (12, 12));
        assert_eq!(summary.parameters.max_ships, 5);
        assert_eq!(summary.description, "Join Me");
        assert_eq!(lobby.game(summary.id).unwrap(), summary);
    }

    #[test]
    fn create_game_rejects_bad_parameters() {
        let lobby = lobby(&[]);
        let err = lobby
            .create_game(Some(9), Some(12), Some(5), "", 2, &[])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(lobby.games(None).is_empty());
    }

    #[test]
    fn create_game_validates_explicit_zeroes() {
        let lobby = lobby(&[]);
        let no_ships = lobby
            .create_game(Some(12), Some(12), Some(0), "", 2, &[])
            .unwrap_err();
        assert_eq!(no_ships.kind(), ErrorKind::Validation);
        let no_width = lobby
            .create_game(Some(0), Some(12), Some(5), "", 2, &[])
            .unwrap_err();
        assert_eq!(no_width.kind(), ErrorKind::Validation);
        let no_height = lobby.create_game(None, Some(0), None, "", 2, &[]).unwrap_err();
        assert_eq!(no_height.kind(), ErrorKind::Validation);
        assert!(lobby.games(None).is_empty());

        let summary = lobby.create_game(Some(10), None, None, "", 2, &[]).unwrap();
        assert_eq!(summary.parameters.dimensions(), (10, 12));
        assert_eq!(summary.parameters.max_ships, 5);
    }

    #[test]
    fn join_and_leave() {
        let lobby = lobby(&["armon", "bert"]);
        let id = lobby.create_game(Some(10), Some(10), Some(1), "duel", 2, &[]).unwrap().id;
        lobby.join_game(id, "armon").unwrap();
        assert_eq!(
            lobby.join_game(id, "armon").unwrap_err().kind(),
            ErrorKind::DuplicateParticipant
        );
        assert_eq!(
            lobby.join_game(id, "nobody").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        assert_eq!(
            lobby.join_game(GameId::new(), "bert").unwrap_err().kind(),
            ErrorKind::NotFound
        );
        lobby.join_game(id, "bert").unwrap();
        lobby.leave_game(id, "armon").unwrap();
        assert_eq!(lobby.game(id).unwrap().participants, vec!["bert"]);
    }

    #[test]
    fn players_in_running_games_cannot_be_deleted() {
        let lobby = lobby(&["armon", "bert"]);
        let id = lobby
            .create_game(Some(10), Some(10), Some(1), "", 2, &["armon", "bert"])
            .unwrap()
            .id;
        let err = lobby.delete_player("armon").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidState);

        lobby.transition(id, GameState::Aborted).unwrap();
        lobby.delete_player("armon").unwrap();
        assert_eq!(lobby.player("armon").unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(
            lobby.delete_player("armon").unwrap_err().kind(),
            ErrorKind::NotFound
        );
    }

    #[test]
    fn finished_games_update_the_ranking() {
        let lobby = lobby(&["armon", "bert", "carl"]);
        let id = lobby
            .create_game(Some(10), Some(10), Some(1), "", 2, &["bert", "carl"])
            .unwrap()
            .id;
        lobby.transition(id, GameState::DeployingShips).unwrap();
        lobby.deploy_ship(id, "bert", ship("Submarine", 0, 0, "e")).unwrap();
        lobby.deploy_ship(id, "carl", ship("Submarine", 3, 3, "n")).unwrap();
        lobby.transition(id, GameState::Running).unwrap();

        let torpedo = SimpleTorpedo;
        lobby.fire(id, "bert", "carl", &torpedo, Coordinate::new(3, 3)).unwrap();
        lobby.fire(id, "carl", "bert", &torpedo, Coordinate::new(9, 9)).unwrap();
        let outcomes = lobby
            .fire(id, "bert", "carl", &torpedo, Coordinate::new(3, 4))
            .unwrap();
        assert_eq!(
            outcomes,
            vec![ShotOutcome::Defeated(crate::ShipClass::Submarine)]
        );

        let summary = lobby.game(id).unwrap();
        assert_eq!(summary.state, GameState::Finished);
        assert_eq!(summary.winner.as_deref(), Some("bert"));
        let ranking: Vec<_> = lobby
            .rank(3)
            .unwrap()
            .iter()
            .map(|p| (p.name().to_owned(), p.wins(), p.losses()))
            .collect();
        assert_eq!(
            ranking,
            vec![
                ("bert".to_owned(), 1, 0),
                ("armon".to_owned(), 0, 0),
                ("carl".to_owned(), 0, 1),
            ]
        );
        assert_eq!(
            lobby.render_board(id, "carl").unwrap(),
            lobby.shared_game(id).unwrap().lock().board("carl").unwrap().to_string()
        );
        // Finished games leave their players free to go.
        lobby.delete_player("carl").unwrap();
    }

    #[test]
    fn delete_game() {
        let lobby = lobby(&[]);
        let id = lobby.create_game(Some(10), Some(10), Some(1), "", 2, &[]).unwrap().id;
        lobby.delete_game(id).unwrap();
        assert_eq!(lobby.game(id).unwrap_err().kind(), ErrorKind::NotFound);
        assert_eq!(lobby.delete_game(id).unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn concurrent_registration_and_scoring() {
        let lobby = Arc::new(lobby(&["armon"]));
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let lobby = Arc::clone(&lobby);
                thread::spawn(move || {
                    lobby.register_player(&format!("player{}", i), "").unwrap();
                    lobby.score_win("armon").unwrap();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(lobby.player("armon").unwrap().wins(), 8);
        assert_eq!(lobby.rank(-9).unwrap().len(), 9);
        assert_eq!(lobby.rank(1).unwrap()[0].name(), "armon");
    }
}
