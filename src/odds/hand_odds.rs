use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::shoe::remaining_cards;
use crate::eval::evaluator::best_value;
use crate::eval::HandCategory;

use super::monte_carlo::percent;

/// Верхняя граница перебора: больше – переходим на случайные достройки.
pub const HAND_ODDS_SAMPLES: usize = 1000;

/// Доля достроек борда, в которых выходит данная категория.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandOddsEntry {
    pub category: HandCategory,
    pub name: String,
    pub percent: f64,
}

/// Распределение итоговых категорий к риверу.
/// От сильных к слабым, нулевые записи опущены.
pub fn hand_odds(hole: &[Card], community: &[Card]) -> Vec<HandOddsEntry> {
    hand_odds_with_rng(hole, community, &mut rand::thread_rng())
}

pub fn hand_odds_with_rng<R: Rng + ?Sized>(
    hole: &[Card],
    community: &[Card],
    rng: &mut R,
) -> Vec<HandOddsEntry> {
    if hole.len() != 2 || community.len() >= 5 {
        return Vec::new();
    }

    let mut known = hole.to_vec();
    known.extend_from_slice(community);
    let mut pool = remaining_cards(&known);
    let to_come = 5 - community.len();

    let mut counts = [0u32; 11];
    let mut total = 0u32;
    let mut cards = known.clone();

    let mut tally = |extra: &[Card]| {
        cards.truncate(known.len());
        cards.extend_from_slice(extra);
        counts[best_value(&cards).category.rank() as usize] += 1;
        total += 1;
    };

    if binomial(pool.len(), to_come) <= HAND_ODDS_SAMPLES as u64 {
        for_each_combination(&pool, to_come, &mut Vec::with_capacity(to_come), 0, &mut tally);
    } else {
        for _ in 0..HAND_ODDS_SAMPLES {
            let (drawn, _) = pool.partial_shuffle(rng, to_come);
            tally(drawn);
        }
    }

    if total == 0 {
        return Vec::new();
    }

    HandCategory::ALL
        .iter()
        .filter(|c| counts[c.rank() as usize] > 0)
        .map(|c| HandOddsEntry {
            category: *c,
            name: c.name().to_string(),
            percent: percent(counts[c.rank() as usize], total),
        })
        .collect()
}

fn binomial(n: usize, k: usize) -> u64 {
    if k > n {
        return 0;
    }
    let k = k.min(n - k);
    let mut acc: u64 = 1;
    for i in 0..k {
        acc = acc * (n - i) as u64 / (i + 1) as u64;
    }
    acc
}

fn for_each_combination<F: FnMut(&[Card])>(
    pool: &[Card],
    k: usize,
    current: &mut Vec<Card>,
    start: usize,
    f: &mut F,
) {
    if current.len() == k {
        f(current);
        return;
    }
    for i in start..pool.len() {
        current.push(pool[i]);
        for_each_combination(pool, k, current, i + 1, f);
        current.pop();
    }
}
