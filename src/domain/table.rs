use serde::{Deserialize, Serialize};

use crate::domain::blinds::BlindStructure;
use crate::domain::chips::Chips;

/// Режим игры за столом.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    #[default]
    Cash,
    Tournament,
}

/// Как делить банк на шоудауне.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PotSettlement {
    /// Банк раскладывается по уровням вкладов, каждый уровень
    /// разыгрывается только среди тех, кто в него внёс.
    #[default]
    SidePots,
    /// Весь банк целиком – лучшим рукам (короткий all-in может
    /// выиграть фишки сверх своего вклада).
    SinglePot,
}

/// Конфиг стола: лимиты, блайнды, режим, параметры оценки шансов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TableConfig {
    pub mode: GameMode,
    /// Максимальное количество мест (2–8).
    pub max_players: usize,
    /// Стек по умолчанию для новых игроков.
    pub starting_chips: Chips,
    /// Блайнды кеш-стола.
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Турнирные уровни и как часто они растут.
    pub blind_structure: BlindStructure,
    pub hands_per_level: u32,
    /// Сколько прогонов Монте-Карло на один запрос вероятности.
    pub simulations: u32,
    /// Потолок по времени на один запрос вероятности.
    pub simulation_deadline_ms: Option<u64>,
    pub settlement: PotSettlement,
    /// Сколько последних событий истории отдаём в снапшоте.
    pub history_tail: usize,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            mode: GameMode::Cash,
            max_players: 8,
            starting_chips: Chips(1000),
            small_blind: Chips(10),
            big_blind: Chips(20),
            blind_structure: BlindStructure::default_tournament(),
            hands_per_level: 10,
            simulations: 500,
            simulation_deadline_ms: None,
            settlement: PotSettlement::SidePots,
            history_tail: 10,
        }
    }
}

impl TableConfig {
    pub fn tournament() -> Self {
        Self {
            mode: GameMode::Tournament,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if !(2..=8).contains(&self.max_players) {
            return Err(format!(
                "TableConfig: max_players must be in [2, 8], got {}",
                self.max_players
            ));
        }
        if self.small_blind.is_zero() {
            return Err("TableConfig: small_blind = 0".into());
        }
        if self.big_blind < self.small_blind {
            return Err("TableConfig: big_blind < small_blind".into());
        }
        if self.simulations == 0 {
            return Err("TableConfig: simulations = 0".into());
        }
        if self.hands_per_level == 0 {
            return Err("TableConfig: hands_per_level = 0".into());
        }
        if self.mode == GameMode::Tournament {
            self.blind_structure.validate()?;
        }
        Ok(())
    }
}
