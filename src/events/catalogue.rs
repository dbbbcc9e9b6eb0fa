//! The puzzle catalogue of the adventure
//!
//! The chain starts with lighting the lantern, which opens the way to the
//! coins and the locked door. The five coins go into the door's sockets in
//! an order the engine checks against `_ + _ * _^2 + _^3 - _ = 399`; the
//! door leads to the teleporter, which leads to the tablet and the book.

use super::{Event, EventCatalogue, OpenEventSet, Precondition};
use crate::solver::OrderingSearch;

pub const LANTERN_AND_CAN: &str = "lantern_and_can";
pub const FIVE_COINS: &str = "five_coins";
pub const LOCKED_DOOR: &str = "locked_door";
pub const UNLOCK_DOOR: &str = "unlock_door";
pub const TELEPORTER: &str = "teleporter";
pub const TABLET: &str = "tablet";
pub const BOOKSHELF: &str = "bookshelf";

pub const COINS: [&str; 5] = ["red coin", "blue coin", "shiny coin", "concave coin", "corroded coin"];

/// Text the engine prints when a wrong coin order ejects every coin
pub const COINS_RELEASED: &str = "released onto the floor";

/// Build the catalogue and the events open at the start of a run
pub fn standard() -> (EventCatalogue, OpenEventSet) {
    let catalogue = EventCatalogue::new()
        .with(
            Event::new(BOOKSHELF, "Read book", Precondition::text_contains("bookshelf"))
                .actions(["look strange book"]),
        )
        .with(
            Event::new(TABLET, "Wrote on tablet", Precondition::holds(["tablet"]))
                .actions(["use tablet"])
                .unlocks([BOOKSHELF]),
        )
        .with(
            Event::new(TELEPORTER, "Teleporting ...", Precondition::holds(["teleporter"]))
                .actions(["use teleporter"])
                .unlocks([TABLET]),
        )
        .with(
            Event::new(
                LOCKED_DOOR,
                "Locked door! Going back ...",
                Precondition::text_contains("door is locked"),
            )
            .actions(["south"])
            .repeatable(),
        )
        .with(
            Event::new(
                UNLOCK_DOOR,
                "Placed coins in the sockets!",
                Precondition::text_contains("_ + _ * _^2 + _^3 - _ = 399"),
            )
            .ordering_search(COINS.map(|coin| format!("use {}", coin)), coin_search())
            .unlocks([TELEPORTER])
            .locks([LOCKED_DOOR]),
        )
        .with(
            Event::new(FIVE_COINS, "Found the five coins!", Precondition::holds_count("coin", 5))
                .unlocks([UNLOCK_DOOR]),
        )
        .with(
            Event::new(
                LANTERN_AND_CAN,
                "Lantern lit!",
                Precondition::holds(["empty lantern", "can"]),
            )
            .actions(["use can", "use lantern"])
            .unlocks([LOCKED_DOOR, FIVE_COINS]),
        );

    (catalogue, OpenEventSet::new([LANTERN_AND_CAN]))
}

/// Search for the coin order, picking every coin back up after a failure
pub fn coin_search() -> OrderingSearch {
    OrderingSearch::new(COINS_RELEASED, COINS.map(|coin| format!("take {}", coin)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::{ActionProvider, EventId};
    use crate::types::WorldState;

    #[test]
    fn standard_catalogue_is_consistent() {
        let (catalogue, open) = standard();
        assert_eq!(catalogue.len(), 7);
        assert!(catalogue.validate(&open).is_ok());
        assert_eq!(open.iter().collect::<Vec<_>>(), vec![&EventId::from(LANTERN_AND_CAN)]);
    }

    #[test]
    fn only_the_locked_door_repeats() {
        let (catalogue, _) = standard();
        for id in [LANTERN_AND_CAN, FIVE_COINS, UNLOCK_DOOR, TELEPORTER, TABLET, BOOKSHELF] {
            assert!(!catalogue.get(&EventId::from(id)).unwrap().repeatable, "{id}");
        }
        assert!(catalogue.get(&EventId::from(LOCKED_DOOR)).unwrap().repeatable);
    }

    #[test]
    fn unlock_door_searches_coin_order() {
        let (catalogue, _) = standard();
        let event = catalogue.get(&EventId::from(UNLOCK_DOOR)).unwrap();
        match &event.provider {
            ActionProvider::OrderingSearch { seed, .. } => {
                assert_eq!(seed.len(), 5);
                assert_eq!(seed[0], "use red coin");
                assert_eq!(seed[4], "use corroded coin");
            }
            other => panic!("Expected OrderingSearch, got: {other:?}"),
        }
        assert_eq!(event.locks, vec![EventId::from(LOCKED_DOOR)]);
    }

    #[test]
    fn five_coins_needs_exactly_five() {
        let (catalogue, _) = standard();
        let event = catalogue.get(&EventId::from(FIVE_COINS)).unwrap();
        let mut world = WorldState::new();
        for coin in &COINS[..4] {
            world.inventory.insert(coin.to_string());
        }
        assert!(!event.precondition.is_met(&world));
        world.inventory.insert(COINS[4].to_string());
        assert!(event.precondition.is_met(&world));
    }
}
