//! A small deterministic adventure for driving the agent end to end
//!
//! The map mirrors the puzzle chain of the built-in catalogue:
//!
//! ```text
//!   Pantry          Door ---- Sanctum
//!     |              |
//!    Hall -------- Passage(dark) ---- Vault
//!                    |
//!                 Monument ---- Alcove
//! ```
//!
//! Entering the passage before the lantern is lit is fatal.

#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::rc::Rc;
use wayfarer::error::SessionError;
use wayfarer::session::Session;

pub const PROMPT: &str = "What do you do?";
pub const EQUATION: &str = "_ + _ * _^2 + _^3 - _ = 399";

/// Coins and the values the monument weighs them by
const COIN_VALUES: [(&str, i64); 5] = [
    ("red coin", 2),
    ("corroded coin", 3),
    ("shiny coin", 5),
    ("concave coin", 7),
    ("blue coin", 9),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Room {
    Hall,
    Pantry,
    Passage,
    Vault,
    Monument,
    Alcove,
    Door,
    Sanctum,
    Library,
    Study,
}

/// Shared log of every command an engine received
pub type CommandLog = Rc<RefCell<Vec<String>>>;

pub struct FakeEngine {
    room: Room,
    floor: BTreeMap<Room, Vec<String>>,
    inventory: BTreeSet<String>,
    lantern_filled: bool,
    lantern_lit: bool,
    door_open: bool,
    slots: Vec<String>,
    pending: VecDeque<String>,
    dead: bool,
    log: CommandLog,
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::with_log(CommandLog::default())
    }

    pub fn with_log(log: CommandLog) -> Self {
        let mut floor = BTreeMap::new();
        floor.insert(Room::Hall, vec!["empty lantern".to_string(), "tablet".to_string()]);
        floor.insert(Room::Pantry, vec!["can".to_string()]);
        floor.insert(
            Room::Vault,
            vec!["red coin".to_string(), "blue coin".to_string(), "shiny coin".to_string()],
        );
        floor.insert(
            Room::Alcove,
            vec!["concave coin".to_string(), "corroded coin".to_string()],
        );
        floor.insert(Room::Sanctum, vec!["teleporter".to_string()]);

        let mut engine = Self {
            room: Room::Hall,
            floor,
            inventory: BTreeSet::new(),
            lantern_filled: false,
            lantern_lit: false,
            door_open: false,
            slots: Vec::new(),
            pending: VecDeque::new(),
            dead: false,
            log,
        };
        let intro = format!("Welcome to the fake adventure.\n\n{}", engine.describe());
        engine.say(&intro);
        engine
    }

    pub fn log(&self) -> CommandLog {
        Rc::clone(&self.log)
    }

    fn say(&mut self, text: &str) {
        self.pending.extend(text.split('\n').map(str::to_string));
        self.pending.push_back(String::new());
        self.pending.push_back(PROMPT.to_string());
    }

    fn exits(&self) -> Vec<(&'static str, Room)> {
        match self.room {
            Room::Hall => vec![("north", Room::Pantry), ("east", Room::Passage)],
            Room::Pantry => vec![("south", Room::Hall)],
            Room::Passage => vec![
                ("west", Room::Hall),
                ("east", Room::Vault),
                ("north", Room::Monument),
            ],
            Room::Vault => vec![("west", Room::Passage)],
            Room::Monument => vec![
                ("south", Room::Passage),
                ("north", Room::Door),
                ("east", Room::Alcove),
            ],
            Room::Alcove => vec![("west", Room::Monument)],
            Room::Door if self.door_open => {
                vec![("south", Room::Monument), ("north", Room::Sanctum)]
            }
            Room::Door => vec![("south", Room::Monument)],
            Room::Sanctum => vec![("south", Room::Door)],
            Room::Library => vec![("west", Room::Study)],
            Room::Study => vec![("east", Room::Library)],
        }
    }

    fn describe(&self) -> String {
        let (title, body) = match self.room {
            Room::Hall => ("Hall", "A quiet hall with a passage to the east."),
            Room::Pantry => ("Pantry", "Empty shelves line the walls."),
            Room::Passage => ("Passage", "Your lantern lights a narrow passage."),
            Room::Vault => ("Vault", "A small vault, long since looted."),
            Room::Monument => (
                "Monument",
                "A monument with five sockets and an inscription:\n_ + _ * _^2 + _^3 - _ = 399",
            ),
            Room::Alcove => ("Alcove", "A cramped alcove."),
            Room::Door if self.door_open => ("Door", "The door stands open."),
            Room::Door => ("Door", "The door is locked."),
            Room::Sanctum => ("Sanctum", "A humming chamber."),
            Room::Library => ("Library", "A dusty bookshelf lines the wall."),
            Room::Study => ("Study", "A desk covered in notes."),
        };

        let mut text = format!("== {} ==\n{}", title, body);
        if let Some(items) = self.floor.get(&self.room)
            && !items.is_empty()
        {
            text.push_str("\n\nThings of interest here:");
            for item in items {
                text.push_str(&format!("\n- {}", item));
            }
        }

        let exits = self.exits();
        if exits.len() == 1 {
            text.push_str("\n\nThere is 1 exit:");
        } else {
            text.push_str(&format!("\n\nThere are {} exits:", exits.len()));
        }
        for (name, _) in exits {
            text.push_str(&format!("\n- {}", name));
        }
        text
    }

    fn go(&mut self, direction: &str) {
        let Some((_, target)) = self.exits().into_iter().find(|(name, _)| *name == direction)
        else {
            self.say("You cannot go that way.");
            return;
        };

        if target == Room::Passage && !self.lantern_lit {
            self.pending.push_back("It is pitch black.".to_string());
            self.pending.push_back("You have been eaten by a grue.".to_string());
            self.dead = true;
            return;
        }

        self.room = target;
        let description = self.describe();
        self.say(&description);
    }

    fn take(&mut self, item: &str) {
        let floor = self.floor.entry(self.room).or_default();
        match floor.iter().position(|i| i == item) {
            Some(index) => {
                floor.remove(index);
                self.inventory.insert(item.to_string());
                self.say("Taken.");
            }
            None => self.say("You see no such item here."),
        }
    }

    fn use_item(&mut self, item: &str) {
        let held = self.inventory.contains(item)
            || (item == "lantern" && self.inventory.contains("empty lantern"));
        if !held {
            self.say("You can't find that.");
            return;
        }

        match item {
            "can" if self.inventory.contains("empty lantern") => {
                self.lantern_filled = true;
                self.say("You fill your lantern with oil.");
            }
            "empty lantern" | "lantern" if self.lantern_filled => {
                self.lantern_lit = true;
                self.say("Your lantern is now lit.");
            }
            "teleporter" => {
                self.room = Room::Library;
                let text = format!("You activate the teleporter.\n\n{}", self.describe());
                self.say(&text);
            }
            "tablet" => self.say("You write on the tablet."),
            coin if coin.ends_with(" coin") && self.room == Room::Monument => {
                self.inventory.remove(coin);
                self.slots.push(coin.to_string());
                if self.slots.len() < 5 {
                    self.say(&format!("You place the {} into the next socket.", coin));
                } else if self.coins_balance() {
                    self.slots.clear();
                    self.door_open = true;
                    self.say("As you place the last coin, you hear a click from the door.");
                } else {
                    let coins: Vec<String> = self.slots.drain(..).collect();
                    self.floor.entry(Room::Monument).or_default().extend(coins);
                    self.say("As you place the last coin, the coins are released onto the floor.");
                }
            }
            _ => self.say("Nothing happens."),
        }
    }

    fn coins_balance(&self) -> bool {
        let value = |coin: &String| {
            COIN_VALUES
                .iter()
                .find(|(name, _)| *name == coin.as_str())
                .map(|(_, value)| *value)
                .unwrap_or(0)
        };
        let v: Vec<i64> = self.slots.iter().map(value).collect();
        v[0] + v[1] * v[2].pow(2) + v[3].pow(3) - v[4] == 399
    }
}

impl Session for FakeEngine {
    fn send(&mut self, command: &str) -> Result<(), SessionError> {
        if self.dead {
            return Err(SessionError::Closed);
        }
        self.log.borrow_mut().push(command.to_string());

        if let Some(item) = command.strip_prefix("take ") {
            self.take(item);
        } else if let Some(item) = command.strip_prefix("use ") {
            self.use_item(item);
        } else if command == "look strange book" && self.room == Room::Library {
            self.say("The book describes a teleporter calibration ritual.");
        } else if matches!(command, "north" | "south" | "east" | "west") {
            self.go(command);
        } else {
            self.say("I don't understand; try 'help' for instructions.");
        }
        Ok(())
    }

    fn receive_line(&mut self) -> Result<String, SessionError> {
        self.pending.pop_front().ok_or(SessionError::Closed)
    }
}
