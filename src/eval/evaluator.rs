use thiserror::Error;

use crate::domain::card::Card;

use super::hand_rank::{HandCategory, HandValue};
use super::lookup_tables::{detect_straight, rank_to_bit, straight_values, RankMask};

/// Ошибки оценщика.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("invalid card count: expected {expected}, got {got}")]
    InvalidCardCount { expected: &'static str, got: usize },
}

/// Лучшая 5-карточная рука из набора карт.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BestHand {
    pub cards: [Card; 5],
    pub value: HandValue,
}

impl BestHand {
    pub fn category(&self) -> HandCategory {
        self.value.category
    }

    pub fn name(&self) -> &'static str {
        self.value.name()
    }
}

/// Оценить ровно 5 карт.
pub fn evaluate(cards: &[Card]) -> Result<HandValue, EvalError> {
    let five: &[Card; 5] = cards.try_into().map_err(|_| EvalError::InvalidCardCount {
        expected: "exactly 5",
        got: cards.len(),
    })?;
    Ok(evaluate_five(five))
}

/// Найти лучшую 5-карточную руку среди 5–7 карт.
pub fn best_hand(cards: &[Card]) -> Result<BestHand, EvalError> {
    let n = cards.len();
    if !(5..=7).contains(&n) {
        return Err(EvalError::InvalidCardCount {
            expected: "5 to 7",
            got: n,
        });
    }

    let mut best: Option<BestHand> = None;

    // Все C(n,5) комбинаций; для 7 карт это 21.
    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let five = [cards[a], cards[b], cards[c], cards[d], cards[e]];
                        let value = evaluate_five(&five);
                        if best.as_ref().map_or(true, |bh| value > bh.value) {
                            best = Some(BestHand { cards: five, value });
                        }
                    }
                }
            }
        }
    }

    best.ok_or(EvalError::InvalidCardCount {
        expected: "5 to 7",
        got: n,
    })
}

/// Только сила лучшей руки, без самих карт. Горячий путь симуляций:
/// вызывающий гарантирует 5–7 карт.
pub(crate) fn best_value(cards: &[Card]) -> HandValue {
    let n = cards.len();
    let mut best: Option<HandValue> = None;

    for a in 0..n.saturating_sub(4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let value =
                            evaluate_five(&[cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if best.as_ref().map_or(true, |v| value > *v) {
                            best = Some(value);
                        }
                    }
                }
            }
        }
    }

    best.unwrap_or_else(|| HandValue::new(HandCategory::HighCard, Vec::new()))
}

/// Оценка строго 5-карточной комбинации.
pub(crate) fn evaluate_five(cards: &[Card; 5]) -> HandValue {
    let mut suit_counts = [0u8; 4];
    let mut rank_counts = [0u8; 15]; // используем 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        suit_counts[card.suit.index()] += 1;
        rank_counts[card.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = suit_counts.iter().any(|&c| c == 5);
    let straight_high = detect_straight(rank_mask);

    // (значение, количество), сортировка: сначала количество, потом значение.
    let mut groups: Vec<(u8, u8)> = (2u8..=14)
        .rev()
        .filter(|v| rank_counts[*v as usize] > 0)
        .map(|v| (v, rank_counts[v as usize]))
        .collect();
    groups.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| b.0.cmp(&a.0)));

    let pattern: Vec<u8> = groups.iter().map(|g| g.1).collect();
    let values: Vec<u8> = groups.iter().map(|g| g.0).collect();

    if is_flush {
        if let Some(high) = straight_high {
            let category = if high == 14 {
                HandCategory::RoyalFlush
            } else {
                HandCategory::StraightFlush
            };
            return HandValue::new(category, straight_values(high));
        }
    }

    // При pattern [4,1], [3,2], [3,1,1], [2,2,1], [2,1,1,1] список `values`
    // уже в порядке тай-брейкеров: сначала группы, потом кикеры.
    match pattern.as_slice() {
        [4, 1] => return HandValue::new(HandCategory::FourOfAKind, values),
        [3, 2] => return HandValue::new(HandCategory::FullHouse, values),
        _ => {}
    }

    if is_flush {
        return HandValue::new(HandCategory::Flush, values);
    }

    if let Some(high) = straight_high {
        return HandValue::new(HandCategory::Straight, straight_values(high));
    }

    let category = match pattern.as_slice() {
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };
    HandValue::new(category, values)
}
