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

//! Errors raised while building ships from caller input.

use thiserror::Error;

use crate::{
    board::Coordinate,
    errors::ErrorKind,
    ships::{Orientation, ShipClass},
};

/// Reason a ship could not be built.
#[derive(Debug, Error, Clone, Eq, PartialEq)]
pub enum ShipError {
    /// The ship class name is not one of the known classes.
    #[error("unknown ship class {0:?}")]
    UnknownClass(String),
    /// The orientation token is not one of `n`, `e`, `s` or `w`.
    #[error("cannot convert orientation string: {0:?}")]
    InvalidOrientation(String),
    /// Some hull cell would lie outside the representable coordinate range.
    #[error("{class} with stern at {stern} heading {orientation} runs off the coordinate range")]
    OutOfRange {
        class: ShipClass,
        stern: Coordinate,
        orientation: Orientation,
    },
}

impl ShipError {
    /// Get the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }
}
