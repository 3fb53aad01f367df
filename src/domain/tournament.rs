// src/domain/tournament.rs

use serde::{Deserialize, Serialize};

use crate::domain::blinds::{BlindLevel, BlindStructure};
use crate::domain::chips::Chips;

/// Статус турнира.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TournamentStatus {
    Running,
    Finished,
}

/// Место игрока в итоговой таблице.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentRanking {
    /// 1 = победитель, N = первый вылет.
    pub position: u32,
    pub name: String,
    /// Номер раздачи, в которой игрок вылетел (None у победителя).
    pub eliminated_in_hand: Option<u32>,
}

/// Кандидат на вылет после раздачи: имя + стек на старте этой раздачи.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BustCandidate {
    pub name: String,
    pub stack_at_hand_start: Chips,
}

/// Турнирный учёт одного стола: уровни блайндов по числу раздач,
/// вылеты и победитель.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TournamentState {
    pub structure: BlindStructure,
    pub hands_per_level: u32,
    /// Сколько раздач уже начато.
    pub hands_started: u32,
    /// Индекс текущего уровня в `structure.levels`.
    pub level_index: usize,
    pub status: TournamentStatus,
    /// Вылетевшие, в порядке вылета.
    pub eliminations: Vec<TournamentRanking>,
    pub winner: Option<String>,
}

impl TournamentState {
    pub fn new(structure: BlindStructure, hands_per_level: u32) -> Self {
        Self {
            structure,
            hands_per_level: hands_per_level.max(1),
            hands_started: 0,
            level_index: 0,
            status: TournamentStatus::Running,
            eliminations: Vec::new(),
            winner: None,
        }
    }

    pub fn current_level(&self) -> Option<&BlindLevel> {
        self.structure.levels.get(self.level_index)
    }

    /// Зафиксировать старт новой раздачи. Возвращает новый уровень,
    /// если он сменился.
    pub fn on_hand_started(&mut self) -> Option<BlindLevel> {
        let idx = self
            .structure
            .index_for_hands(self.hands_started, self.hands_per_level);
        self.hands_started += 1;

        if idx != self.level_index {
            self.level_index = idx;
            return self.current_level().cloned();
        }
        None
    }

    pub fn is_finished(&self) -> bool {
        self.status == TournamentStatus::Finished
    }

    pub fn is_eliminated(&self, name: &str) -> bool {
        self.eliminations.iter().any(|r| r.name == name)
    }

    /// Проставить места вылетевшим в этой раздаче.
    ///
    /// `still_funded` – сколько игроков осталось с фишками.
    /// Вылетевшие в одной раздаче упорядочены по стеку на её старте:
    /// больший стек = лучшее место.
    pub fn record_eliminations(
        &mut self,
        mut busted: Vec<BustCandidate>,
        still_funded: usize,
        hand_number: u32,
    ) -> Vec<TournamentRanking> {
        busted.retain(|b| !self.is_eliminated(&b.name));
        busted.sort_by(|a, b| b.stack_at_hand_start.cmp(&a.stack_at_hand_start));

        let mut recorded = Vec::with_capacity(busted.len());
        for (i, b) in busted.into_iter().enumerate() {
            let ranking = TournamentRanking {
                position: (still_funded + 1 + i) as u32,
                name: b.name,
                eliminated_in_hand: Some(hand_number),
            };
            self.eliminations.push(ranking.clone());
            recorded.push(ranking);
        }
        recorded
    }

    /// Остался один игрок с фишками – он победитель.
    pub fn finish(&mut self, winner: String) {
        self.status = TournamentStatus::Finished;
        self.winner = Some(winner);
    }

    /// Итоговая таблица: победитель (если есть), затем по местам.
    pub fn rankings(&self) -> Vec<TournamentRanking> {
        let mut res = Vec::with_capacity(self.eliminations.len() + 1);
        if let Some(w) = &self.winner {
            res.push(TournamentRanking {
                position: 1,
                name: w.clone(),
                eliminated_in_hand: None,
            });
        }
        let mut rest = self.eliminations.clone();
        rest.sort_by_key(|r| r.position);
        res.extend(rest);
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cand(name: &str, stack: u64) -> BustCandidate {
        BustCandidate {
            name: name.to_string(),
            stack_at_hand_start: Chips(stack),
        }
    }

    #[test]
    fn same_hand_busts_are_ordered_by_starting_stack() {
        let mut t = TournamentState::new(BlindStructure::default_tournament(), 10);
        let rec = t.record_eliminations(vec![cand("small", 100), cand("big", 900)], 2, 7);

        assert_eq!(rec[0].name, "big");
        assert_eq!(rec[0].position, 3);
        assert_eq!(rec[1].name, "small");
        assert_eq!(rec[1].position, 4);
    }

    #[test]
    fn level_changes_every_n_hands() {
        let mut t = TournamentState::new(BlindStructure::default_tournament(), 2);
        assert!(t.on_hand_started().is_none());
        assert!(t.on_hand_started().is_none());
        let lvl = t.on_hand_started().expect("third hand starts level 2");
        assert_eq!(lvl.level, 2);
    }
}
