use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::shoe::remaining_cards;
use crate::eval::evaluator::best_value;

use super::monte_carlo::round1;

/// Ауты: карты, повышающие категорию текущей лучшей руки.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct OutsReport {
    pub out_count: usize,
    pub out_cards: Vec<Card>,
    /// Шанс собрать улучшение к риверу, %.
    pub implied_odds: f64,
    /// Названия рук, которые дают ауты (без повторов, в порядке колоды).
    pub improving_hands: Vec<String>,
    pub current_hand: Option<String>,
}

/// Посчитать ауты. Определено только на флопе и терне (3 или 4 карты борда);
/// в остальных случаях пустой отчёт.
pub fn compute_outs(hole: &[Card], community: &[Card]) -> OutsReport {
    if hole.len() != 2 || !(3..=4).contains(&community.len()) {
        return OutsReport::default();
    }

    let mut known = hole.to_vec();
    known.extend_from_slice(community);
    let current = best_value(&known);

    let mut report = OutsReport {
        current_hand: Some(current.name().to_string()),
        ..OutsReport::default()
    };

    let mut probe = known.clone();
    for card in remaining_cards(&known) {
        probe.push(card);
        let improved = best_value(&probe);
        probe.pop();

        if improved.category > current.category {
            report.out_cards.push(card);
            let name = improved.name().to_string();
            if !report.improving_hands.contains(&name) {
                report.improving_hands.push(name);
            }
        }
    }

    report.out_count = report.out_cards.len();
    report.implied_odds = hit_probability(report.out_count, community.len(), known.len());
    report
}

/// Шанс прийти хотя бы одному ауту, %.
///
/// После флопа (две карты впереди): 1 - (47-o)/47 * (46-o)/46.
/// После терна: o / (52 - известные карты).
pub fn hit_probability(outs: usize, board_len: usize, known_len: usize) -> f64 {
    let o = outs as f64;
    let p = if board_len == 3 {
        1.0 - ((47.0 - o) / 47.0) * ((46.0 - o) / 46.0)
    } else {
        o / (52 - known_len) as f64
    };
    round1(p * 100.0)
}
