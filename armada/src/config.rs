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

//! Defaults applied when a game is created with unspecified parameters.

/// Defaults and limits used when creating games.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GameDefaults {
    /// Board width used when the caller does not pick one.
    pub board_width: usize,
    /// Board height used when the caller does not pick one.
    pub board_height: usize,
    /// Ship ceiling per board used when the caller does not pick one.
    pub max_ships: usize,
    /// Participant ceiling used when a game is created with a ceiling of 0.
    pub max_participants: usize,
    /// Description used when a game is created with an empty description.
    pub description: String,
    /// Smallest allowed board width or height.
    pub min_board_edge: usize,
}

impl GameDefaults {
    pub const BOARD_WIDTH: usize = 12;
    pub const BOARD_HEIGHT: usize = 12;
    pub const MAX_SHIPS: usize = 5;
    pub const MAX_PARTICIPANTS: usize = 2;
    pub const DESCRIPTION: &'static str = "Join Me";
    pub const MIN_BOARD_EDGE: usize = 10;
}

impl Default for GameDefaults {
    fn default() -> Self {
        Self {
            board_width: Self::BOARD_WIDTH,
            board_height: Self::BOARD_HEIGHT,
            max_ships: Self::MAX_SHIPS,
            max_participants: Self::MAX_PARTICIPANTS,
            description: Self::DESCRIPTION.to_owned(),
            min_board_edge: Self::MIN_BOARD_EDGE,
        }
    }
}
