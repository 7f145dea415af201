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

//! Domain model for a multi-player game of Battleship.
//!
//! Players register under a unique name and are ranked by their win/loss record. Games
//! are created with a board size and a ship ceiling, collect participants while open,
//! let every participant deploy ships on their own board, and then let participants take
//! turns firing [weapons] at each other's boards until one fleet is left afloat.
//!
//! The types in [`player`], [`ships`], [`board`] and [`game`] are plain single-owner
//! values. [`Lobby`] wraps the player registry and the set of live games for use from
//! several threads at once.
//!
//! Enable the `rng_gen` feature for random orientations and random ship placement, and
//! the `serde` feature to serialize the read models.

pub use self::{
    board::{Board, BoardParameters, Coordinate, ShotOutcome},
    config::GameDefaults,
    errors::{Error, ErrorKind, Result},
    game::{Game, GameId, GameState, GameSummary},
    lobby::Lobby,
    player::{Player, PlayerId},
    ships::{Orientation, Ship, ShipClass},
    weapons::Exploder,
};

pub mod board;
pub mod config;
pub mod errors;
pub mod game;
pub mod lobby;
pub mod player;
pub mod ships;
pub mod weapons;
