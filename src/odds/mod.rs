//! Вероятности: Монте-Карло шансы, ауты, пот-оддсы, распределение рук.

pub mod hand_odds;
pub mod monte_carlo;
pub mod outs;
pub mod pot_odds;
pub mod strength;

pub use hand_odds::{hand_odds, hand_odds_with_rng, HandOddsEntry};
pub use monte_carlo::{estimate, EstimateConfig, WinEstimate};
pub use outs::{compute_outs, hit_probability, OutsReport};
pub use pot_odds::{pot_odds, PotOdds};
pub use strength::StrengthLabel;
