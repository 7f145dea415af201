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

//! Games: the participants of one match, their boards, and the state machine that drives
//! a match from the lobby to its end.
//!
//! A game moves through [`GameState`]s in one direction only:
//!
//! ```text
//! Open -> DeployingShips -> Running -> Finished
//!   \__________\______________\-----> Aborted
//! ```
//!
//! Players join and leave while the game is [`Open`][GameState::Open]. Ships are placed
//! while [`DeployingShips`][GameState::DeployingShips]. Shots are exchanged in join order
//! while [`Running`][GameState::Running], and the game finishes on its own once a single
//! participant has ships afloat.
use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    board::{Board, BoardParameters, Coordinate, ShotOutcome},
    config::GameDefaults,
    player::{Player, PlayerId},
    ships::Ship,
    weapons::Exploder,
};

pub use self::{
    errors::{GameError, ParseStateError},
    registry::{GameRegistry, SharedGame},
};

mod errors;
mod registry;

/// Opaque, globally unique identifier of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameId(Uuid);

impl GameId {
    /// Generate a fresh random id.
    pub fn new() -> Self {
        GameId(Uuid::new_v4())
    }
}

impl Default for GameId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for GameId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(GameId)
    }
}

/// Lifecycle state of a game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum GameState {
    /// Waiting for players to join.
    Open,
    /// Participants are placing their ships.
    DeployingShips,
    /// Participants take turns firing at each other.
    Running,
    /// One participant is left with ships afloat.
    Finished,
    /// The game was called off before it finished.
    Aborted,
}

impl GameState {
    /// All states in lifecycle order.
    pub const ALL: &'static [GameState] = &[
        GameState::Open,
        GameState::DeployingShips,
        GameState::Running,
        GameState::Finished,
        GameState::Aborted,
    ];

    /// Human readable name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            GameState::Open => "open",
            GameState::DeployingShips => "deploying ships",
            GameState::Running => "running",
            GameState::Finished => "finished",
            GameState::Aborted => "aborted",
        }
    }

    /// Returns true for states no game ever leaves.
    pub fn is_terminal(self) -> bool {
        matches!(self, GameState::Finished | GameState::Aborted)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.pad(self.name())
    }
}

impl FromStr for GameState {
    type Err = ParseStateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        GameState::ALL
            .iter()
            .copied()
            .find(|state| state.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ParseStateError(s.to_owned()))
    }
}

/// A player's seat in one game, together with their board.
#[derive(Debug, Clone)]
pub struct Participant {
    player: PlayerId,
    name: String,
    board: Board,
}

impl Participant {
    /// Id of the registered player holding this seat.
    pub fn player_id(&self) -> PlayerId {
        self.player
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

/// Read model of a game, detached from any lock.
#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct GameSummary {
    pub id: GameId,
    pub created_at: DateTime<Utc>,
    pub description: String,
    pub state: GameState,
    pub parameters: BoardParameters,
    pub max_participants: usize,
    /// Participant names in join order.
    pub participants: Vec<String>,
    /// Name of the participant whose turn it is, while running.
    pub turn: Option<String>,
    pub winner: Option<String>,
}

/// One match between a handful of players.
#[derive(Debug, Clone)]
pub struct Game {
    id: GameId,
    created_at: DateTime<Utc>,
    description: String,
    max_participants: usize,
    state: GameState,
    params: BoardParameters,
    /// Participants in join order, which is also the turn order.
    participants: Vec<Participant>,
    /// Index into `participants` of the player to fire next. Only meaningful while running.
    turn: usize,
    winner: Option<String>,
}

impl Game {
    /// Create a new open game with no participants.
    ///
    /// Both board edges must be at least [`GameDefaults::min_board_edge`] and at least one
    /// ship must be allowed per board. An empty `description` and a `max_participants` of
    /// zero are replaced by the values from `defaults`.
    pub fn create(
        width: usize,
        height: usize,
        max_ships: usize,
        description: &str,
        max_participants: usize,
        defaults: &GameDefaults,
    ) -> Result<Self, GameError> {
        let min = defaults.min_board_edge;
        if width < min || height < min {
            return Err(GameError::InvalidBoardSize { width, height, min });
        }
        if max_ships < 1 {
            return Err(GameError::InvalidShipCapacity(max_ships));
        }
        let description = match description.trim() {
            "" => defaults.description.clone(),
            text => text.to_owned(),
        };
        let max_participants = match max_participants {
            0 => defaults.max_participants,
            n => n,
        };
        let game = Self {
            id: GameId::new(),
            created_at: Utc::now(),
            description,
            max_participants,
            state: GameState::Open,
            params: BoardParameters::new(width, height, max_ships),
            participants: Vec::new(),
            turn: 0,
            winner: None,
        };
        info!(
            game = %game.id,
            width,
            height,
            max_ships,
            max_participants,
            "created new game"
        );
        Ok(game)
    }

    pub fn id(&self) -> GameId {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn max_participants(&self) -> usize {
        self.max_participants
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Parameters every participant's board is created with.
    pub fn parameters(&self) -> &BoardParameters {
        &self.params
    }

    /// Participants in join order.
    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    /// Names of the participants in join order.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.name.clone()).collect()
    }

    /// Returns true if the named player holds a seat in this game.
    pub fn is_participant(&self, name: &str) -> bool {
        self.participants.iter().any(|p| p.name == name)
    }

    /// Look up a participant by player name.
    pub fn participant(&self, name: &str) -> Result<&Participant, GameError> {
        self.position(name).map(|idx| &self.participants[idx])
    }

    /// Get the board of the named participant.
    pub fn board(&self, name: &str) -> Result<&Board, GameError> {
        self.participant(name).map(Participant::board)
    }

    /// Name of the participant whose turn it is. `None` unless the game is running.
    pub fn current_turn(&self) -> Option<&str> {
        match self.state {
            GameState::Running => self.participants.get(self.turn).map(|p| p.name.as_str()),
            _ => None,
        }
    }

    /// Name of the last participant with ships afloat, once the game has finished.
    pub fn winner(&self) -> Option<&str> {
        self.winner.as_deref()
    }

    /// Names of every participant except the winner. Empty unless there is a winner.
    pub fn losers(&self) -> Vec<String> {
        match &self.winner {
            None => Vec::new(),
            Some(winner) => self
                .participants
                .iter()
                .filter(|p| &p.name != winner)
                .map(|p| p.name.clone())
                .collect(),
        }
    }

    /// Give `player` a seat in this game with an empty board.
    pub fn add_participant(&mut self, player: &Player) -> Result<(), GameError> {
        self.require_state(&[GameState::Open], "add participants")?;
        if self.participants.len() >= self.max_participants {
            return Err(GameError::Full {
                id: self.id,
                max: self.max_participants,
            });
        }
        if self.is_participant(player.name()) {
            return Err(GameError::DuplicateParticipant {
                id: self.id,
                name: player.name().to_owned(),
            });
        }
        self.participants.push(Participant {
            player: player.id(),
            name: player.name().to_owned(),
            board: Board::new(self.params),
        });
        info!(game = %self.id, player = player.name(), "player joined game");
        Ok(())
    }

    /// Take the named participant's seat away, discarding their board.
    pub fn remove_participant(&mut self, name: &str) -> Result<(), GameError> {
        self.require_state(
            &[GameState::Open, GameState::DeployingShips],
            "remove participants",
        )?;
        let idx = self.position(name)?;
        self.participants.remove(idx);
        info!(game = %self.id, player = name, "player left game");
        Ok(())
    }

    /// Move the game to state `to`.
    ///
    /// Allowed moves are `Open -> DeployingShips` with at least two participants,
    /// `DeployingShips -> Running` once every participant has deployed a ship, and from
    /// any state that is not terminal to `Aborted`. A running game reaches `Finished`
    /// only through [`fire`][Game::fire].
    pub fn transition(&mut self, to: GameState) -> Result<(), GameError> {
        let refusal = match (self.state, to) {
            (from, _) if from.is_terminal() => Some("the game has already ended"),
            (_, GameState::Aborted) => None,
            (GameState::Open, GameState::DeployingShips)
            | (GameState::DeployingShips, GameState::Running)
                if self.participants.len() < 2 =>
            {
                Some("at least two participants are required")
            }
            (GameState::Open, GameState::DeployingShips) => None,
            (GameState::DeployingShips, GameState::Running) => self
                .participants
                .iter()
                .find(|p| p.board.ships().is_empty())
                .map(|_| "every participant must deploy at least one ship"),
            _ => Some("no such transition"),
        };
        if let Some(reason) = refusal {
            return Err(GameError::InvalidTransition {
                id: self.id,
                from: self.state,
                to,
                reason,
            });
        }
        self.enter(to);
        Ok(())
    }

    /// Deploy `ship` on the named participant's board.
    pub fn deploy_ship(&mut self, name: &str, ship: Ship) -> Result<(), GameError> {
        self.require_state(&[GameState::DeployingShips], "deploy ships")?;
        let idx = self.position(name)?;
        let max = self.params.max_ships;
        let board = &mut self.participants[idx].board;
        if board.ships().len() >= max {
            return Err(GameError::FleetFull {
                name: name.to_owned(),
                max,
            });
        }
        if !board.fits(&ship) {
            return Err(GameError::ShipOffBoard(ship.to_string()));
        }
        board.deploy_ship(ship)?;
        Ok(())
    }

    /// Fire `weapon` from `attacker` at `coord` on `target`'s board.
    ///
    /// Only the participant whose turn it is may fire, and never at their own board.
    /// Afterwards the turn passes to the next participant in join order who still has
    /// ships afloat. When only one such participant is left, the game finishes with them
    /// as the winner.
    pub fn fire(
        &mut self,
        attacker: &str,
        target: &str,
        weapon: &dyn Exploder,
        coord: Coordinate,
    ) -> Result<Vec<ShotOutcome>, GameError> {
        self.require_state(&[GameState::Running], "fire")?;
        let attacker_idx = self.position(attacker)?;
        let target_idx = self.position(target)?;
        if attacker_idx != self.turn {
            return Err(GameError::OutOfTurn(attacker.to_owned()));
        }
        if attacker_idx == target_idx {
            return Err(GameError::SelfTarget(attacker.to_owned()));
        }
        let board = &mut self.participants[target_idx].board;
        if board.defeated() {
            return Err(GameError::TargetDefeated(target.to_owned()));
        }
        if !board.contains(coord) {
            return Err(GameError::TargetOffBoard(coord));
        }
        let outcomes = board.fire(weapon, coord);
        debug!(
            game = %self.id,
            attacker,
            target,
            weapon = weapon.name(),
            %coord,
            ?outcomes,
            "shot fired"
        );

        let survivor = {
            let mut afloat = self.participants.iter().filter(|p| !p.board.defeated());
            match (afloat.next(), afloat.next()) {
                (Some(last), None) => Some(last.name.clone()),
                _ => None,
            }
        };
        match survivor {
            Some(winner) => {
                info!(game = %self.id, winner = %winner, "game won");
                self.winner = Some(winner);
                self.enter(GameState::Finished);
            }
            None => self.advance_turn(),
        }
        Ok(outcomes)
    }

    /// Detached snapshot of this game.
    pub fn summary(&self) -> GameSummary {
        GameSummary {
            id: self.id,
            created_at: self.created_at,
            description: self.description.clone(),
            state: self.state,
            parameters: self.params,
            max_participants: self.max_participants,
            participants: self.participant_names(),
            turn: self.current_turn().map(str::to_owned),
            winner: self.winner.clone(),
        }
    }

    fn enter(&mut self, to: GameState) {
        info!(game = %self.id, from = %self.state, to = %to, "game state changed");
        if to == GameState::Running {
            self.turn = 0;
        }
        self.state = to;
    }

    fn advance_turn(&mut self) {
        let count = self.participants.len();
        for step in 1..=count {
            let next = (self.turn + step) % count;
            if !self.participants[next].board.defeated() {
                self.turn = next;
                return;
            }
        }
    }

    fn position(&self, name: &str) -> Result<usize, GameError> {
        self.participants
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| GameError::UnknownParticipant {
                id: self.id,
                name: name.to_owned(),
            })
    }

    fn require_state(&self, allowed: &[GameState], action: &'static str) -> Result<(), GameError> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(GameError::InvalidState {
                id: self.id,
                state: self.state,
                action,
            })
        }
    }
}
