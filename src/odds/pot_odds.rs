use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

use super::monte_carlo::round1;

/// Пот-оддсы для колла.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct PotOdds {
    /// call / (pot + call) * 100, до 0.1.
    pub pot_odds_percent: f64,
    pub call_amount: Chips,
    pub pot: Chips,
}

pub fn pot_odds(pot: Chips, call_amount: Chips) -> PotOdds {
    let total = pot + call_amount;
    let pot_odds_percent = if call_amount.is_zero() || total.is_zero() {
        0.0
    } else {
        round1(call_amount.0 as f64 / total.0 as f64 * 100.0)
    };
    PotOdds {
        pot_odds_percent,
        call_amount,
        pot,
    }
}
