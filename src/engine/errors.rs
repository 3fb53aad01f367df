use thiserror::Error;

use crate::domain::chips::Chips;
use crate::domain::shoe::ShoeError;
use crate::eval::EvalError;

/// Ошибки движка покера.
///
/// Любая из них означает, что состояние стола НЕ изменилось.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("Сейчас не ход игрока {player}")]
    NotPlayersTurn {
        player: String,
        expected: Option<String>,
    },

    #[error("Игрок {0} не найден за столом")]
    UnknownPlayer(String),

    #[error("Невозможно выполнить check – нужно доплатить {to_call}")]
    IllegalCheck { to_call: Chips },

    #[error("Невозможно выполнить call – нет ставки для уравнивания")]
    NothingToCall,

    #[error("Рейз до {attempted} меньше минимального {minimum}")]
    RaiseBelowMinimum { attempted: Chips, minimum: Chips },

    #[error("Недостаточно игроков с фишками для раздачи: {funded}")]
    InsufficientPlayers { funded: usize },

    #[error(transparent)]
    InvalidCardCount(#[from] EvalError),

    #[error("Раздача уже идёт")]
    HandInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    #[error("Игрок с именем {0} уже сидит за столом")]
    DuplicatePlayer(String),

    #[error("Стол заполнен: {max_players} мест")]
    TableFull { max_players: usize },

    #[error("Неизвестное действие: {0}")]
    UnknownAction(String),

    #[error("Для рейза нужна сумма")]
    MissingRaiseAmount,

    #[error("Некорректный конфиг стола: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Shoe(#[from] ShoeError),
}
