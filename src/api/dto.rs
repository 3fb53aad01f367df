use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{Phase, WinnerRecord};
use crate::domain::player::PlayerKind;
use crate::domain::table::GameMode;
use crate::domain::tournament::{TournamentRanking, TournamentStatus};
use crate::domain::SeatIndex;
use crate::engine::{HandEvent, ValidAction};
use crate::odds::{HandOddsEntry, OutsReport, StrengthLabel};

/// DTO игрока за столом.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerView {
    pub name: String,
    pub seat: SeatIndex,
    pub kind: PlayerKind,
    pub chips: Chips,
    pub current_bet: Chips,
    pub total_bet: Chips,
    pub folded: bool,
    pub all_in: bool,
    pub is_dealer: bool,
    pub is_current: bool,
    pub has_cards: bool,
    /// Карманные карты – только для самого игрока или после вскрытия.
    pub hole_cards: Option<Vec<Card>>,
}

/// Блайнды стола (в турнире – текущего уровня).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindsView {
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Номер турнирного уровня.
    pub level: Option<u32>,
}

/// Турнирная часть снапшота.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentView {
    pub status: TournamentStatus,
    pub level: u32,
    pub hands_started: u32,
    pub hands_per_level: u32,
    pub winner: Option<String>,
    /// Победитель (если есть), затем вылетевшие по местам.
    pub rankings: Vec<TournamentRanking>,
}

/// Снапшот стола для клиента.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameSnapshot {
    pub mode: GameMode,
    pub hand_number: u32,
    pub phase: Phase,
    pub pot: Chips,
    pub current_bet: Chips,
    pub min_raise: Chips,
    pub community_cards: Vec<Card>,
    pub dealer: Option<SeatIndex>,
    pub current_actor: Option<String>,
    pub players: Vec<PlayerView>,
    pub blinds: BlindsView,
    /// Последние события раздачи.
    pub history: Vec<HandEvent>,
    pub last_winners: Vec<WinnerRecord>,
    pub tournament: Option<TournamentView>,
    /// Что может сделать зритель, если сейчас его ход.
    pub valid_actions: Vec<ValidAction>,
}

/// Шансы игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct WinProbabilityView {
    pub win: f64,
    pub tie: f64,
    pub lose: f64,
    pub trials: u32,
    pub opponents: usize,
    pub outs: OutsReport,
    pub strength: StrengthLabel,
    pub strength_color: String,
    pub hand_odds: Vec<HandOddsEntry>,
}
