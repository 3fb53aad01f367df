use std::time::{Duration, Instant};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::shoe::remaining_cards;
use crate::eval::evaluator::best_value;

/// Сколько прогонов делает одна задача rayon.
const CHUNK_SIZE: u32 = 64;

/// Параметры одной оценки.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EstimateConfig {
    pub simulations: u32,
    /// Фиксированный сид – воспроизводимая оценка.
    pub seed: Option<u64>,
    /// Потолок по времени; по истечении считаем по завершённым прогонам
    /// (минимум один прогон выполняется всегда).
    pub deadline: Option<Duration>,
}

impl Default for EstimateConfig {
    fn default() -> Self {
        Self {
            simulations: 500,
            seed: None,
            deadline: None,
        }
    }
}

impl EstimateConfig {
    pub fn with_simulations(simulations: u32) -> Self {
        Self {
            simulations,
            ..Self::default()
        }
    }
}

/// Результат: проценты выигрыша/ничьей/проигрыша (до 0.1) и число прогонов.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct WinEstimate {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub trials: u32,
}

impl WinEstimate {
    fn certain_win() -> Self {
        Self {
            win: 100.0,
            tie: 0.0,
            lose: 0.0,
            trials: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct Tally {
    wins: u32,
    ties: u32,
    losses: u32,
}

impl Tally {
    fn total(&self) -> u32 {
        self.wins + self.ties + self.losses
    }

    fn merge(self, other: Tally) -> Tally {
        Tally {
            wins: self.wins + other.wins,
            ties: self.ties + other.ties,
            losses: self.losses + other.losses,
        }
    }
}

/// Монте-Карло оценка шансов руки против `num_opponents` случайных рук.
///
/// Без двух карманных карт возвращается нулевой результат. Против нуля
/// соперников выигрыш 100%.
pub fn estimate(
    hole: &[Card],
    community: &[Card],
    num_opponents: usize,
    config: &EstimateConfig,
) -> WinEstimate {
    if hole.len() != 2 || community.len() > 5 {
        return WinEstimate::default();
    }
    if num_opponents == 0 {
        return WinEstimate::certain_win();
    }

    let mut known = hole.to_vec();
    known.extend_from_slice(community);
    let pool = remaining_cards(&known);

    let board_needed = 5 - community.len();
    let needed = board_needed + 2 * num_opponents;
    if needed > pool.len() || config.simulations == 0 {
        return WinEstimate::default();
    }

    let deadline = config.deadline.map(|d| Instant::now() + d);
    let chunks = config.simulations.div_ceil(CHUNK_SIZE);

    let tally = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let trials = CHUNK_SIZE.min(config.simulations - chunk * CHUNK_SIZE);
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(
                    seed ^ (chunk as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15),
                ),
                None => StdRng::from_entropy(),
            };
            // Нулевой чанк всегда доигрывает хотя бы один прогон.
            let deadline = deadline.map(|d| (d, chunk == 0));
            run_chunk(hole, community, num_opponents, &pool, trials, deadline, &mut rng)
        })
        .reduce(Tally::default, Tally::merge);

    let total = tally.total();
    if total == 0 {
        return WinEstimate::default();
    }

    WinEstimate {
        win: percent(tally.wins, total),
        tie: percent(tally.ties, total),
        lose: percent(tally.losses, total),
        trials: total,
    }
}

fn run_chunk(
    hole: &[Card],
    community: &[Card],
    num_opponents: usize,
    pool: &[Card],
    trials: u32,
    deadline: Option<(Instant, bool)>,
    rng: &mut StdRng,
) -> Tally {
    let board_needed = 5 - community.len();
    let needed = board_needed + 2 * num_opponents;

    let mut deck = pool.to_vec();
    let mut tally = Tally::default();
    let mut ours: Vec<Card> = Vec::with_capacity(7);
    let mut theirs: Vec<Card> = Vec::with_capacity(7);

    for _ in 0..trials {
        if let Some((at, needs_one)) = deadline {
            if !(needs_one && tally.total() == 0) && Instant::now() >= at {
                break;
            }
        }

        // Частичное перемешивание: нужен только префикс.
        let (drawn, _) = deck.partial_shuffle(rng, needed);
        let (board_tail, opp_cards) = drawn.split_at(board_needed);

        ours.clear();
        ours.extend_from_slice(hole);
        ours.extend_from_slice(community);
        ours.extend_from_slice(board_tail);
        let our_value = best_value(&ours);

        let mut best_opp = None;
        for opp in opp_cards.chunks_exact(2) {
            theirs.clear();
            theirs.extend_from_slice(opp);
            theirs.extend_from_slice(community);
            theirs.extend_from_slice(board_tail);
            let v = best_value(&theirs);
            if best_opp.as_ref().map_or(true, |b| v > *b) {
                best_opp = Some(v);
            }
        }

        match best_opp {
            Some(opp) if our_value > opp => tally.wins += 1,
            Some(opp) if our_value < opp => tally.losses += 1,
            Some(_) => tally.ties += 1,
            None => tally.wins += 1,
        }
    }
    tally
}

/// Доля в процентах, округлённая до одного знака.
pub(crate) fn percent(part: u32, total: u32) -> f64 {
    round1(part as f64 * 100.0 / total as f64)
}

pub(crate) fn round1(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}
