use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Phase;
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted { hand_number: u32, dealer: SeatIndex },

    /// Турнир перешёл на новый уровень блайндов.
    BlindLevelChanged {
        level: u32,
        small_blind: Chips,
        big_blind: Chips,
    },

    /// Блайнды (имя, сколько реально поставлено).
    BlindsPosted {
        small_blind: (String, Chips),
        big_blind: (String, Chips),
    },

    /// Игрок получил карманные карты (сами карты в историю не пишем).
    HoleCardsDealt { player: String },

    /// Открыты общие карты на борде.
    BoardDealt { phase: Phase, cards: Vec<Card> },

    /// Действие игрока.
    PlayerActed {
        player: String,
        action: PlayerActionKind,
        /// Сколько фишек внесено этим действием.
        amount: Chips,
        new_stack: Chips,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        player: String,
        hole_cards: Vec<Card>,
        hand_name: String,
    },

    /// Выплата банка(ов).
    PotAwarded { player: String, amount: Chips },

    /// Турнирный вылет.
    PlayerEliminated { player: String, position: u32 },

    /// Раздача завершена.
    HandFinished { hand_number: u32 },
}

/// Событие в раздаче с порядковым номером, фазой и банком на тот момент.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub phase: Phase,
    /// Банк сразу после события: фишки блайндов и ставок уже в нём,
    /// выплата (`PotAwarded`) из него ещё не списана.
    pub pot: Chips,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub hand_number: u32,
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new(hand_number: u32) -> Self {
        Self {
            hand_number,
            events: Vec::new(),
        }
    }

    pub fn push(&mut self, phase: Phase, pot: Chips, kind: HandEventKind) {
        let index = self.events.len() as u32;
        self.events.push(HandEvent {
            index,
            phase,
            pot,
            kind,
        });
    }

    /// Последние `n` событий.
    pub fn tail(&self, n: usize) -> &[HandEvent] {
        let start = self.events.len().saturating_sub(n);
        &self.events[start..]
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Действия игроков по порядку – для реплея.
    pub fn actions(&self) -> impl Iterator<Item = (&str, &PlayerActionKind)> {
        self.events.iter().filter_map(|e| match &e.kind {
            HandEventKind::PlayerActed { player, action, .. } => Some((player.as_str(), action)),
            _ => None,
        })
    }
}
