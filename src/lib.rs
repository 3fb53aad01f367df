//! Texas Hold'em: движок стола, оценка рук и калькулятор шансов.
//!
//! Слои:
//! - `domain` – карты, шуз, игроки, фишки, блайнды, конфиг стола;
//! - `eval` – оценка 5–7 карт и сравнение рук;
//! - `engine` – раздача, ставки, сайд-поты, шоудаун, турнир, реестр столов;
//! - `odds` – Monte Carlo, ауты, пот-оддсы, распределение комбинаций;
//! - `api` – команды / запросы / DTO для транспортного слоя;
//! - `infra` – RNG и загрузка конфига.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod odds;

pub use domain::{Card, Chips, GameMode, Phase, Player, PlayerKind, TableConfig};
pub use engine::{EngineError, Game, HandStart, PlayerActionKind, TableRegistry, ValidAction};
pub use eval::{best_hand, evaluate, HandCategory, HandValue};
pub use infra::{DeterministicRng, SystemRng};
