use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего полного рейза; на старте улицы – seat первого ходящего
    /// (на префлопе – BB).
    pub last_raiser: Option<SeatIndex>,
    /// Очередь ходящих (по кругу), кто ещё должен сделать действие на этой улице.
    pub to_act: Vec<SeatIndex>,
}

impl BettingState {
    pub fn new(
        current_bet: Chips,
        min_raise: Chips,
        last_raiser: Option<SeatIndex>,
        to_act: Vec<SeatIndex>,
    ) -> Self {
        Self {
            current_bet,
            min_raise,
            last_raiser,
            to_act,
        }
    }

    /// Удалить seat из очереди to_act, если он там есть.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
    }

    /// Ставка выросла до `new_bet`:
    /// - `full_raise = Some(size)` – полноценный рейз, меняется min_raise и сентинел;
    /// - `None` – неполный all-in, min_raise остаётся прежним.
    ///
    /// В обоих случаях остальные игроки снова должны ответить.
    pub fn on_raise(
        &mut self,
        seat: SeatIndex,
        new_bet: Chips,
        full_raise: Option<Chips>,
        new_to_act: Vec<SeatIndex>,
    ) {
        self.current_bet = new_bet;
        if let Some(size) = full_raise {
            self.min_raise = size;
            self.last_raiser = Some(seat);
        }
        self.to_act = new_to_act;
    }

    /// Раунд завершён, когда очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }

    /// Ставка, до которой нужно рейзить минимум.
    pub fn min_raise_to(&self) -> Chips {
        self.current_bet + self.min_raise
    }
}
