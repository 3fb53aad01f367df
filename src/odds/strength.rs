use core::fmt;

use serde::{Deserialize, Serialize};

/// Грубая оценка силы руки по проценту выигрыша.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StrengthLabel {
    Monster,
    Strong,
    Good,
    Marginal,
    Weak,
    Fold,
}

impl StrengthLabel {
    pub fn from_win_percent(win: f64) -> Self {
        if win >= 80.0 {
            StrengthLabel::Monster
        } else if win >= 65.0 {
            StrengthLabel::Strong
        } else if win >= 50.0 {
            StrengthLabel::Good
        } else if win >= 35.0 {
            StrengthLabel::Marginal
        } else if win >= 20.0 {
            StrengthLabel::Weak
        } else {
            StrengthLabel::Fold
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StrengthLabel::Monster => "Monster",
            StrengthLabel::Strong => "Strong",
            StrengthLabel::Good => "Good",
            StrengthLabel::Marginal => "Marginal",
            StrengthLabel::Weak => "Weak",
            StrengthLabel::Fold => "Fold",
        }
    }

    /// Цвет индикатора для клиентов.
    pub fn color(self) -> &'static str {
        match self {
            StrengthLabel::Monster => "#00ff00",
            StrengthLabel::Strong => "#7fff00",
            StrengthLabel::Good => "#ffff00",
            StrengthLabel::Marginal => "#ffa500",
            StrengthLabel::Weak => "#ff6600",
            StrengthLabel::Fold => "#ff0000",
        }
    }
}

impl fmt::Display for StrengthLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_inclusive() {
        assert_eq!(StrengthLabel::from_win_percent(80.0), StrengthLabel::Monster);
        assert_eq!(StrengthLabel::from_win_percent(79.9), StrengthLabel::Strong);
        assert_eq!(StrengthLabel::from_win_percent(35.0), StrengthLabel::Marginal);
        assert_eq!(StrengthLabel::from_win_percent(19.9), StrengthLabel::Fold);
    }
}
