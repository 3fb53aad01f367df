// src/domain/blinds.rs

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Один уровень блайндов.
/// Пример: level = 3, SB = 25, BB = 50.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    /// Порядковый номер уровня (1, 2, 3, ...).
    pub level: u32,
    /// Малый блайнд.
    pub small_blind: Chips,
    /// Большой блайнд.
    pub big_blind: Chips,
}

impl BlindLevel {
    pub fn new(level: u32, small_blind: Chips, big_blind: Chips) -> Self {
        Self {
            level,
            small_blind,
            big_blind,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.small_blind.0 == 0 {
            return Err(format!("BlindLevel {}: small_blind = 0", self.level));
        }
        if self.big_blind.0 < self.small_blind.0 {
            return Err(format!(
                "BlindLevel {}: big_blind ({}) < small_blind ({})",
                self.level, self.big_blind.0, self.small_blind.0
            ));
        }
        Ok(())
    }
}

/// Структура уровней блайндов для турнира.
/// Уровень повышается каждые `hands_per_level` раздач.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindStructure {
    pub levels: Vec<BlindLevel>,
}

impl BlindStructure {
    pub fn new(levels: Vec<BlindLevel>) -> Self {
        Self { levels }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.levels.is_empty() {
            return Err("BlindStructure: empty levels".into());
        }

        let mut expected_level = 1u32;
        let mut prev_bb = Chips::ZERO;
        for lvl in &self.levels {
            lvl.validate()?;
            if lvl.level != expected_level {
                return Err(format!(
                    "BlindStructure: expected level {}, got {}",
                    expected_level, lvl.level
                ));
            }
            if lvl.big_blind < prev_bb {
                return Err(format!("BlindStructure: level {} lowers the big blind", lvl.level));
            }
            prev_bb = lvl.big_blind;
            expected_level += 1;
        }

        Ok(())
    }

    pub fn level_by_number(&self, number: u32) -> Option<&BlindLevel> {
        self.levels.iter().find(|lvl| lvl.level == number)
    }

    /// Индекс уровня после `hands_started` начатых раздач.
    /// Последний уровень держится до конца турнира.
    pub fn index_for_hands(&self, hands_started: u32, hands_per_level: u32) -> usize {
        if self.levels.is_empty() {
            return 0;
        }
        let idx = (hands_started / hands_per_level.max(1)) as usize;
        idx.min(self.levels.len() - 1)
    }

    /// Удвоение каждые N раздач, старт с 10/20.
    pub fn default_tournament() -> Self {
        let blinds: [(u64, u64); 10] = [
            (10, 20),
            (15, 30),
            (25, 50),
            (50, 100),
            (75, 150),
            (100, 200),
            (150, 300),
            (200, 400),
            (300, 600),
            (500, 1000),
        ];

        let levels = blinds
            .iter()
            .enumerate()
            .map(|(i, &(sb, bb))| BlindLevel::new(i as u32 + 1, Chips(sb), Chips(bb)))
            .collect();

        BlindStructure { levels }
    }
}

impl Default for BlindStructure {
    fn default() -> Self {
        Self::default_tournament()
    }
}
