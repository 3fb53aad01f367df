use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::{Card, Rank, Suit};

/// Ошибки работы с шузом.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ShoeError {
    #[error("cannot deal {requested} cards, only {remaining} remaining")]
    Exhausted { requested: usize, remaining: usize },

    #[error("card {0} appears twice in a stacked shoe")]
    DuplicateCard(Card),
}

/// Шуз: упорядоченная последовательность уникальных карт.
/// Верх шуза – начало вектора, раздача идёт сверху без возврата.
///
/// Перемешивание делает engine (через `RandomSource`), НЕ здесь.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Shoe {
    cards: Vec<Card>,
}

impl Shoe {
    /// Пустой шуз. Наполняется в начале каждой раздачи.
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Стандартные 52 карты в порядке:
    /// Hearts 2..A, Diamonds 2..A, Clubs 2..A, Spades 2..A.
    pub fn standard_52() -> Self {
        Self {
            cards: standard_cards(),
        }
    }

    /// Шуз с заданным верхом: сначала `top` (в этом порядке),
    /// затем оставшиеся карты колоды в стандартном порядке.
    pub fn stacked(top: &[Card]) -> Result<Self, ShoeError> {
        let mut seen: Vec<Card> = Vec::with_capacity(top.len());
        for card in top {
            if seen.contains(card) {
                return Err(ShoeError::DuplicateCard(*card));
            }
            seen.push(*card);
        }

        let mut cards = seen;
        for card in standard_cards() {
            if !cards.contains(&card) {
                cards.push(card);
            }
        }
        Ok(Self { cards })
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Карты, которые ещё лежат в шузе (верх первым).
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Доступ для перемешивания.
    pub fn cards_mut(&mut self) -> &mut [Card] {
        &mut self.cards
    }

    /// Снять `n` карт сверху. Ошибка, если карт не хватает –
    /// в этом случае шуз не меняется.
    pub fn deal(&mut self, n: usize) -> Result<Vec<Card>, ShoeError> {
        if n > self.cards.len() {
            return Err(ShoeError::Exhausted {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        Ok(self.cards.drain(..n).collect())
    }

    pub fn deal_one(&mut self) -> Result<Card, ShoeError> {
        if self.cards.is_empty() {
            return Err(ShoeError::Exhausted {
                requested: 1,
                remaining: 0,
            });
        }
        Ok(self.cards.remove(0))
    }

    /// Сжечь верхнюю карту.
    pub fn burn(&mut self) -> Result<(), ShoeError> {
        self.deal_one().map(|_| ())
    }

    /// Убрать из шуза уже известные карты.
    pub fn remove_cards(&mut self, to_remove: &[Card]) {
        self.cards.retain(|c| !to_remove.contains(c));
    }
}

fn standard_cards() -> Vec<Card> {
    let mut cards = Vec::with_capacity(52);
    for suit in Suit::ALL {
        for rank in Rank::ALL {
            cards.push(Card::new(rank, suit));
        }
    }
    cards
}

/// Все карты колоды, кроме перечисленных. Пул для симуляций.
pub fn remaining_cards(known: &[Card]) -> Vec<Card> {
    standard_cards()
        .into_iter()
        .filter(|c| !known.contains(c))
        .collect()
}
