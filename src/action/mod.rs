mod game;

use serde::Deserialize;
use strum::Display;

pub use crate::action::game::GameAction;

/// Where in a key's press/repeat/release cycle an action fired. Click
/// bindings always carry `Start`; hold bindings produce all three.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ActionState {
    #[default]
    Start,
    Repeat,
    End,
}

#[derive(Debug, Clone, PartialEq, Eq, Display, Deserialize)]
pub enum Command {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    // Page actions
    Game(GameAction),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Action {
    pub command: Command,
    pub state: ActionState,
}

macro_rules! act {
    ($command:expr) => {
        $crate::action::Action { command: $command, state: $crate::action::ActionState::default() }
    };
    ($command:expr, $state:expr) => {
        $crate::action::Action { command: $command, state: $state }
    };
}

pub(crate) use act;
