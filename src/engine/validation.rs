use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::Player;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;

/// Проверенное действие: сколько фишек списать и чем оно стало.
///
/// Считается ДО любых изменений стола, поэтому ошибка валидации
/// гарантированно ничего не меняет.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedAction {
    pub kind: PlayerActionKind,
    /// Сколько фишек игрок добавит в банк.
    pub commit: Chips,
    /// Ставка игрока на улице после действия.
    pub new_bet: Chips,
    /// Действие уходит в all-in.
    pub all_in: bool,
}

/// Что игрок может сделать прямо сейчас.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum ValidAction {
    Fold,
    Check,
    Call { amount: Chips },
    Raise { min: Chips, max: Chips },
    AllIn { amount: Chips },
}

/// Проверка, может ли игрок выполнить это действие при текущем состоянии ставок.
pub fn resolve_action(
    player: &Player,
    action: &PlayerActionKind,
    betting: &BettingState,
) -> Result<ResolvedAction, EngineError> {
    let stack = player.chips;
    let to_call = player.to_call(betting.current_bet);

    let (commit, kind) = match *action {
        PlayerActionKind::Fold => (Chips::ZERO, *action),

        PlayerActionKind::Check => {
            if !to_call.is_zero() {
                return Err(EngineError::IllegalCheck { to_call });
            }
            (Chips::ZERO, *action)
        }

        PlayerActionKind::Call => {
            if to_call.is_zero() {
                return Err(EngineError::NothingToCall);
            }
            // Не хватает на полный колл – частичный колл в all-in.
            (to_call.min(stack), *action)
        }

        PlayerActionKind::Raise(target) => {
            // Цель выше стека – ставим всё, что есть.
            let max_target = player.current_bet + stack;
            let target = target.min(max_target);
            let goes_all_in = target == max_target;

            let minimum = betting.min_raise_to();
            if target < minimum && !goes_all_in {
                return Err(EngineError::RaiseBelowMinimum {
                    attempted: target,
                    minimum,
                });
            }
            if target <= player.current_bet {
                return Err(EngineError::RaiseBelowMinimum {
                    attempted: target,
                    minimum,
                });
            }
            (target - player.current_bet, PlayerActionKind::Raise(target))
        }

        PlayerActionKind::AllIn => (stack, *action),
    };

    Ok(ResolvedAction {
        kind,
        commit,
        new_bet: player.current_bet + commit,
        all_in: !stack.is_zero() && commit == stack,
    })
}

/// Список допустимых действий для игрока, чей сейчас ход.
///
/// `raise` предлагается, только если стека хватает больше чем на колл
/// и на полный минимальный рейз; иначе остаётся только all-in.
pub fn valid_actions(player: &Player, betting: &BettingState) -> Vec<ValidAction> {
    let stack = player.chips;
    let to_call = player.to_call(betting.current_bet);
    let max_target = player.current_bet + stack;

    let mut res = vec![ValidAction::Fold];

    if to_call.is_zero() {
        res.push(ValidAction::Check);
    } else {
        res.push(ValidAction::Call {
            amount: to_call.min(stack),
        });
    }

    let min_target = betting.min_raise_to();
    if stack > to_call && max_target >= min_target {
        res.push(ValidAction::Raise {
            min: min_target,
            max: max_target,
        });
    }

    if !stack.is_zero() {
        res.push(ValidAction::AllIn { amount: stack });
    }

    res
}
