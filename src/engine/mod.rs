//! Покерный движок: ставки, переход улиц, сайд-поты, шоудаун.
//!
//! Высокоуровневый объект: `Game`
//! Основные операции:
//!   - `start_new_hand` – запустить новую раздачу
//!   - `player_action` – применить действие игрока (с авто-переходом улиц)
//!   - `valid_actions` – что может сделать игрок, чей ход

pub mod actions;
pub mod betting;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod side_pots;
pub mod table_manager;
pub mod validation;

pub use actions::{PlayerAction, PlayerActionKind};
pub use betting::BettingState;
pub use errors::EngineError;
pub use game_loop::{Game, HandStart};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use pot::Pot;
pub use side_pots::SidePot;
pub use table_manager::{RegistryError, SharedGame, TableRegistry};
pub use validation::ValidAction;

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
