use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, Game, RandomSource, ValidAction};
use crate::odds::{self, EstimateConfig, PotOdds, StrengthLabel};

use super::dto::{BlindsView, GameSnapshot, PlayerView, TournamentView, WinProbabilityView};
use super::errors::ApiError;

/// Запросы "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "query", rename_all = "snake_case")]
pub enum Query {
    /// Состояние стола глазами `viewer` (None – наблюдатель).
    GameState { viewer: Option<String> },
    ValidActions { player: String },
    WinProbability { player: String },
    PotOdds { player: String },
}

/// Результат запроса "только чтение".
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum QueryResponse {
    GameState(GameSnapshot),
    ValidActions { actions: Vec<ValidAction> },
    WinProbability(WinProbabilityView),
    PotOdds(PotOdds),
}

pub fn run_query<R: RandomSource>(game: &Game<R>, query: &Query) -> Result<QueryResponse, ApiError> {
    let res = match query {
        Query::GameState { viewer } => QueryResponse::GameState(build_snapshot(game, viewer.as_deref())),
        Query::ValidActions { player } => QueryResponse::ValidActions {
            actions: game.valid_actions(player)?,
        },
        Query::WinProbability { player } => {
            QueryResponse::WinProbability(win_probability(game, player, None)?)
        }
        Query::PotOdds { player } => QueryResponse::PotOdds(pot_odds(game, player)?),
    };
    Ok(res)
}

/// Снапшот стола. Чужие карманные карты скрыты, пока их не вскрыли на шоудауне.
pub fn build_snapshot<R: RandomSource>(game: &Game<R>, viewer: Option<&str>) -> GameSnapshot {
    let players = game
        .players()
        .iter()
        .map(|p| {
            let own = viewer == Some(p.name.as_str());
            let visible = p.has_cards() && (own || game.is_revealed(p.seat));
            PlayerView {
                name: p.name.clone(),
                seat: p.seat,
                kind: p.kind,
                chips: p.chips,
                current_bet: p.current_bet,
                total_bet: p.total_bet,
                folded: p.folded,
                all_in: p.all_in,
                is_dealer: game.dealer() == Some(p.seat),
                is_current: game.current_actor() == Some(p.seat),
                has_cards: p.has_cards(),
                hole_cards: visible.then(|| p.hole_cards.clone()),
            }
        })
        .collect();

    let (small_blind, big_blind) = game.blinds();
    let tournament = game.tournament().map(|t| TournamentView {
        status: t.status,
        level: t.current_level().map_or(0, |l| l.level),
        hands_started: t.hands_started,
        hands_per_level: t.hands_per_level,
        winner: t.winner.clone(),
        rankings: t.rankings(),
    });

    let valid_actions = viewer
        .and_then(|v| game.valid_actions(v).ok())
        .unwrap_or_default();

    GameSnapshot {
        mode: game.config().mode,
        hand_number: game.hand_number(),
        phase: game.phase(),
        pot: game.pot(),
        current_bet: game.current_bet(),
        min_raise: game.betting().min_raise,
        community_cards: game.community_cards().to_vec(),
        dealer: game.dealer(),
        current_actor: game.current_actor_name().map(str::to_string),
        players,
        blinds: BlindsView {
            small_blind,
            big_blind,
            level: tournament.as_ref().map(|t| t.level),
        },
        history: game.history().tail(game.config().history_tail).to_vec(),
        last_winners: game.last_winners().to_vec(),
        tournament,
        valid_actions,
    }
}

/// Шансы игрока против всех, кто ещё в раздаче.
///
/// `seed` фиксирует Монте-Карло (для тестов и реплея).
pub fn win_probability<R: RandomSource>(
    game: &Game<R>,
    player: &str,
    seed: Option<u64>,
) -> Result<WinProbabilityView, EngineError> {
    let me = game.player(player)?;
    let opponents = game
        .players()
        .iter()
        .filter(|p| p.seat != me.seat && p.is_in_hand())
        .count();

    let config = EstimateConfig {
        simulations: game.config().simulations,
        seed,
        deadline: game.config().simulation_deadline_ms.map(Duration::from_millis),
    };
    let board = game.community_cards();
    let estimate = odds::estimate(&me.hole_cards, board, opponents, &config);
    let strength = StrengthLabel::from_win_percent(estimate.win);

    Ok(WinProbabilityView {
        win: estimate.win,
        tie: estimate.tie,
        lose: estimate.lose,
        trials: estimate.trials,
        opponents,
        outs: odds::compute_outs(&me.hole_cards, board),
        strength,
        strength_color: strength.color().to_string(),
        hand_odds: odds::hand_odds(&me.hole_cards, board),
    })
}

/// Пот-оддсы для колла игрока.
pub fn pot_odds<R: RandomSource>(game: &Game<R>, player: &str) -> Result<PotOdds, EngineError> {
    Ok(odds::pot_odds(game.pot(), game.call_amount(player)?))
}
