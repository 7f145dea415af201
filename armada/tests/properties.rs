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

use std::collections::HashSet;

use armada::{
    player::PlayerRegistry, Board, BoardParameters, Coordinate, Orientation, Ship, ShipClass,
};
use proptest::prelude::*;

fn arb_ship() -> impl Strategy<Value = Ship> {
    (
        0..ShipClass::ALL.len(),
        -3..15i32,
        -3..15i32,
        0..Orientation::ALL.len(),
    )
        .prop_map(|(class, x, y, orientation)| {
            Ship::new(
                ShipClass::ALL[class],
                Coordinate::new(x, y),
                Orientation::ALL[orientation],
            )
            .unwrap()
        })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn ship_geometry(ship in arb_ship()) {
        prop_assert_eq!(ship.structure().len(), ship.class().len());
        let (dx, dy) = ship.orientation().vector();
        let coords: Vec<_> = ship.coords().collect();
        for pair in coords.windows(2) {
            prop_assert_eq!(pair[1], Coordinate::new(pair[0].x + dx, pair[0].y + dy));
        }
        prop_assert_eq!(coords.first().copied(), Some(ship.stern()));
        prop_assert_eq!(coords.last().copied(), Some(ship.bow()));
    }

    #[test]
    fn collision_is_symmetric(a in arb_ship(), b in arb_ship()) {
        let cells: HashSet<_> = a.coords().collect();
        let shared = b.coords().any(|c| cells.contains(&c));
        prop_assert_eq!(a.collides(&b), shared);
        prop_assert_eq!(a.collides(&b), b.collides(&a));
    }

    #[test]
    fn rejected_deployments_leave_board_unchanged(
        ships in prop::collection::vec(arb_ship(), 1..12),
    ) {
        let mut board = Board::new(BoardParameters::new(12, 12, 12));
        for ship in ships {
            let before_ships = board.ships().to_vec();
            let before_render = board.render();
            match board.deploy_ship(ship.clone()) {
                Ok(()) => {
                    prop_assert!(before_ships.iter().all(|other| !other.collides(&ship)));
                    prop_assert_eq!(board.ships().len(), before_ships.len() + 1);
                }
                Err(err) => {
                    prop_assert!(err.existing().collides(&ship));
                    prop_assert_eq!(err.into_ship(), ship);
                    prop_assert_eq!(board.ships(), &before_ships[..]);
                    prop_assert_eq!(board.render(), before_render);
                }
            }
        }
        let ships = board.ships();
        for (i, a) in ships.iter().enumerate() {
            for b in &ships[i + 1..] {
                prop_assert!(!a.collides(b));
            }
        }
    }

    #[test]
    fn ranking_is_ordered(records in prop::collection::vec((0..4u32, 0..4u32), 1..10)) {
        let mut registry = PlayerRegistry::new();
        for (i, &(wins, losses)) in records.iter().enumerate() {
            let name = format!("player{}", i);
            registry.register(&name, "").unwrap();
            for _ in 0..wins {
                registry.score_win(&name).unwrap();
            }
            for _ in 0..losses {
                registry.score_loss(&name).unwrap();
            }
        }

        let top = registry.rank(records.len() as i64).unwrap();
        prop_assert_eq!(top.len(), records.len());
        for pair in top.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            prop_assert!(
                (a.wins(), std::cmp::Reverse(a.losses()), std::cmp::Reverse(a.name()))
                    > (b.wins(), std::cmp::Reverse(b.losses()), std::cmp::Reverse(b.name()))
            );
        }

        let bottom = registry.rank(-(records.len() as i64)).unwrap();
        let reversed: Vec<_> = top.iter().rev().map(|p| p.name()).collect();
        prop_assert_eq!(bottom.iter().map(|p| p.name()).collect::<Vec<_>>(), reversed);
        prop_assert!(registry.rank(-(records.len() as i64) - 1).is_err());
    }
}
