use serde::Deserialize;
use strum::Display;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Display, Deserialize)]
pub enum GameAction {
    Flap,
}
