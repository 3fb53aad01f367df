use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;

/// Индекс места за столом (0..max_players-1).
pub type SeatIndex = usize;

/// Метка возможностей участника. Движок на неё НЕ смотрит –
/// решения бота принимает внешний слой оркестрации.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PlayerKind {
    #[default]
    Human,
    Bot,
}

/// Состояние игрока за столом (с точки зрения движка).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    pub seat: SeatIndex,
    pub kind: PlayerKind,
    /// Текущий стек.
    pub chips: Chips,
    /// Карманные карты (0 или 2).
    pub hole_cards: Vec<Card>,
    /// Ставка в текущем раунде торговли.
    pub current_bet: Chips,
    /// Сколько всего внесено в банк за раздачу (для side pots).
    pub total_bet: Chips,
    pub folded: bool,
    pub all_in: bool,
}

impl Player {
    pub fn new(name: impl Into<String>, seat: SeatIndex, chips: Chips, kind: PlayerKind) -> Self {
        Self {
            name: name.into(),
            seat,
            kind,
            chips,
            hole_cards: Vec::new(),
            current_bet: Chips::ZERO,
            total_bet: Chips::ZERO,
            folded: false,
            all_in: false,
        }
    }

    /// Сброс состояния раздачи.
    pub fn clear_hand(&mut self) {
        self.hole_cards.clear();
        self.current_bet = Chips::ZERO;
        self.total_bet = Chips::ZERO;
        self.folded = false;
        self.all_in = false;
    }

    /// Списать до `amount` фишек в банк. Возвращает реально списанное.
    /// Если стек обнулился – игрок в all-in.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let real = amount.min(self.chips);
        self.chips -= real;
        self.current_bet += real;
        self.total_bet += real;
        if self.chips.is_zero() {
            self.all_in = true;
        }
        real
    }

    pub fn has_cards(&self) -> bool {
        !self.hole_cards.is_empty()
    }

    /// Участвует в розыгрыше банка (не сфолдил, получил карты).
    pub fn is_in_hand(&self) -> bool {
        !self.folded && self.has_cards()
    }

    /// Может ещё делать ставки на этой раздаче.
    pub fn can_act(&self) -> bool {
        self.is_in_hand() && !self.all_in && !self.chips.is_zero()
    }

    /// Сколько нужно доплатить, чтобы уравнять `bet_level`.
    pub fn to_call(&self, bet_level: Chips) -> Chips {
        bet_level.saturating_sub(self.current_bet)
    }
}
