//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate(5 карт) -> HandValue`
//!   `best_hand(5–7 карт) -> BestHand`
//!   `compare_players(&[(ключ, HandValue)]) -> места`

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;
pub mod ranking;

pub use evaluator::{best_hand, evaluate, BestHand, EvalError};
pub use hand_rank::{HandCategory, HandValue};
pub use ranking::{compare_players, winners, RankedHand};
