use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::Chips;
use crate::engine::errors::EngineError;

/// Тип действия игрока.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", content = "amount", rename_all = "snake_case")]
pub enum PlayerActionKind {
    Fold,
    Check,
    Call,
    /// Рейз ДО указанной суммы (целевая ставка игрока на улице).
    Raise(Chips),
    /// All-in – поставить весь стек.
    AllIn,
}

impl PlayerActionKind {
    /// Разбор действия в том виде, как его присылает транспорт:
    /// строка `fold|check|call|raise|all_in` + опциональная сумма.
    pub fn parse(action: &str, amount: Option<Chips>) -> Result<Self, EngineError> {
        match action.trim().to_ascii_lowercase().as_str() {
            "fold" => Ok(PlayerActionKind::Fold),
            "check" => Ok(PlayerActionKind::Check),
            "call" => Ok(PlayerActionKind::Call),
            "raise" => amount
                .map(PlayerActionKind::Raise)
                .ok_or(EngineError::MissingRaiseAmount),
            "all_in" | "allin" | "all-in" => Ok(PlayerActionKind::AllIn),
            other => Err(EngineError::UnknownAction(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PlayerActionKind::Fold => "fold",
            PlayerActionKind::Check => "check",
            PlayerActionKind::Call => "call",
            PlayerActionKind::Raise(_) => "raise",
            PlayerActionKind::AllIn => "all_in",
        }
    }
}

impl fmt::Display for PlayerActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayerActionKind::Raise(to) => write!(f, "raise {}", to),
            other => f.write_str(other.name()),
        }
    }
}

/// Конкретное действие игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerAction {
    /// Кто действует (имя уникально за столом).
    pub player: String,
    pub kind: PlayerActionKind,
}

impl PlayerAction {
    pub fn new(player: impl Into<String>, kind: PlayerActionKind) -> Self {
        Self {
            player: player.into(),
            kind,
        }
    }
}
