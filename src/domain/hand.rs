use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::eval::HandCategory;

/// Фаза раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Waiting,
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
    HandComplete,
}

impl Phase {
    /// Идёт ли сейчас раунд торговли.
    pub fn is_betting(self) -> bool {
        matches!(self, Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River)
    }

    /// Можно ли начинать новую раздачу.
    pub fn is_idle(self) -> bool {
        matches!(self, Phase::Waiting | Phase::HandComplete)
    }

    /// Следующая улица и сколько карт на неё открывается.
    pub fn next_street(self) -> Option<(Phase, usize)> {
        match self {
            Phase::PreFlop => Some((Phase::Flop, 3)),
            Phase::Flop => Some((Phase::Turn, 1)),
            Phase::Turn => Some((Phase::River, 1)),
            _ => None,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Waiting => "waiting",
            Phase::PreFlop => "pre_flop",
            Phase::Flop => "flop",
            Phase::Turn => "turn",
            Phase::River => "river",
            Phase::Showdown => "showdown",
            Phase::HandComplete => "hand_complete",
        };
        f.write_str(s)
    }
}

/// Кто и сколько выиграл в последней раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinnerRecord {
    pub name: String,
    pub amount: Chips,
    /// Название руки – только если был шоудаун.
    pub hand_name: Option<String>,
    pub category: Option<HandCategory>,
}
