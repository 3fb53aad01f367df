use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

/// Категория покерной руки по силе (High Card = 1 … Royal Flush = 10).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum HandCategory {
    HighCard = 1,
    OnePair = 2,
    TwoPair = 3,
    ThreeOfAKind = 4,
    Straight = 5,
    Flush = 6,
    FullHouse = 7,
    FourOfAKind = 8,
    StraightFlush = 9,
    RoyalFlush = 10,
}

impl HandCategory {
    pub const ALL: [HandCategory; 10] = [
        HandCategory::RoyalFlush,
        HandCategory::StraightFlush,
        HandCategory::FourOfAKind,
        HandCategory::FullHouse,
        HandCategory::Flush,
        HandCategory::Straight,
        HandCategory::ThreeOfAKind,
        HandCategory::TwoPair,
        HandCategory::OnePair,
        HandCategory::HighCard,
    ];

    /// Числовой ранг категории 1..10.
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// Человеческое название категории.
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
            HandCategory::RoyalFlush => "Royal Flush",
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Сила 5-карточной руки: категория + упорядоченные тай-брейкеры.
///
/// Порядок: сначала категория, потом тай-брейкеры лексикографически
/// (от старшего к младшему). Две руки равны, только если совпадает всё.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct HandValue {
    pub category: HandCategory,
    pub tiebreakers: Vec<u8>,
}

impl HandValue {
    pub fn new(category: HandCategory, tiebreakers: Vec<u8>) -> Self {
        Self {
            category,
            tiebreakers,
        }
    }

    pub fn name(&self) -> &'static str {
        self.category.name()
    }

    /// Упаковка в u32 с тем же порядком, что и `Ord`.
    ///
    /// Схема кодирования:
    ///   [категория:4 бита][t0:4][t1:4][t2:4][t3:4][t4:4]
    /// Значения 1..14 влазят в 4 бита, недостающие позиции = 0.
    pub fn packed(&self) -> u32 {
        let mut value = (self.category.rank() as u32 & 0x0F) << 20;
        for (i, t) in self.tiebreakers.iter().take(5).enumerate() {
            value |= (*t as u32 & 0x0F) << (16 - 4 * i);
        }
        value
    }
}

impl Ord for HandValue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.category
            .cmp(&other.category)
            .then_with(|| self.tiebreakers.cmp(&other.tiebreakers))
    }
}

impl PartialOrd for HandValue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HandValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.category, self.tiebreakers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packed_order_matches_ord() {
        let a = HandValue::new(HandCategory::TwoPair, vec![13, 9, 14]);
        let b = HandValue::new(HandCategory::TwoPair, vec![13, 9, 12]);
        let c = HandValue::new(HandCategory::ThreeOfAKind, vec![2, 4, 3]);

        assert!(a > b);
        assert!(a.packed() > b.packed());
        assert!(c > a);
        assert!(c.packed() > a.packed());
    }
}
