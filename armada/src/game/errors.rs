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

use crate::{
    board::{Coordinate, DeployError},
    errors::ErrorKind,
    game::{GameId, GameState},
};

/// Errors returned by [`Game`][crate::game::Game] and the game registry.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum GameError {
    /// Width or height is below the configured minimum.
    #[error("boardsize ({width} * {height}) too small, each side must be at least {min}")]
    InvalidBoardSize {
        width: usize,
        height: usize,
        min: usize,
    },
    /// The per-board ship ceiling is below one.
    #[error("maximum ship capacity ({0}) too small")]
    InvalidShipCapacity(usize),
    /// The game already has its maximum number of participants.
    #[error("game with id {id} has reached max participants ({max}/{max})")]
    Full { id: GameId, max: usize },
    /// The player already holds a slot in this game.
    #[error("player {name} is already participant of game with id {id}")]
    DuplicateParticipant { id: GameId, name: String },
    /// No participant with that name exists in this game.
    #[error("no participant with name {name} found for game with id {id}")]
    UnknownParticipant { id: GameId, name: String },
    /// No live game has this id.
    #[error("no game found for id {0}")]
    NotFound(GameId),
    /// The operation is not allowed in the game's current state.
    #[error("cannot {action} while game {id} is {state}")]
    InvalidState {
        id: GameId,
        state: GameState,
        action: &'static str,
    },
    /// The requested state change is not an edge of the state machine, or its
    /// precondition does not hold.
    #[error("game {id} cannot move from {from} to {to}: {reason}")]
    InvalidTransition {
        id: GameId,
        from: GameState,
        to: GameState,
        reason: &'static str,
    },
    /// The participant already deployed as many ships as the game allows.
    #[error("player {name} has already deployed the maximum of {max} ships")]
    FleetFull { name: String, max: usize },
    /// Some cell of the ship lies outside the board.
    #[error("ship {0} does not fit on the board")]
    ShipOffBoard(String),
    /// The targeted cell lies outside the board.
    #[error("target {0} is off the board")]
    TargetOffBoard(Coordinate),
    /// The ship overlaps one already deployed by the participant.
    #[error(transparent)]
    Collision(#[from] DeployError),
    /// Another participant has the turn.
    #[error("it is not {0}'s turn")]
    OutOfTurn(String),
    /// A participant aimed at their own board.
    #[error("{0} cannot target their own board")]
    SelfTarget(String),
    /// The targeted participant has no ships left.
    #[error("{0} has already been defeated")]
    TargetDefeated(String),
}

impl GameError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidBoardSize { .. }
            | GameError::InvalidShipCapacity(_)
            | GameError::ShipOffBoard(_)
            | GameError::TargetOffBoard(_)
            | GameError::SelfTarget(_) => ErrorKind::Validation,
            GameError::Full { .. } | GameError::FleetFull { .. } => ErrorKind::Capacity,
            GameError::DuplicateParticipant { .. } => ErrorKind::DuplicateParticipant,
            GameError::UnknownParticipant { .. } | GameError::NotFound(_) => ErrorKind::NotFound,
            GameError::InvalidState { .. }
            | GameError::InvalidTransition { .. }
            | GameError::OutOfTurn(_)
            | GameError::TargetDefeated(_) => ErrorKind::InvalidState,
            GameError::Collision(_) => ErrorKind::Collision,
        }
    }
}

/// Error returned when parsing an unknown game state name.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
#[error("invalid game state {0:?}")]
pub struct ParseStateError(pub(super) String);

impl ParseStateError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
