use log::debug;
use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::player::PlayerKind;
use crate::domain::tournament::TournamentRanking;
use crate::domain::SeatIndex;
use crate::engine::{Game, HandStart, PlayerActionKind, RandomSource};

use super::dto::GameSnapshot;
use super::errors::ApiError;
use super::queries::build_snapshot;

/// Команда от транспортного слоя.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// Запустить новую раздачу.
    StartHand,

    /// Действие игрока: `fold|check|call|raise|all_in` (+ сумма для raise).
    Act {
        player: String,
        action: String,
        #[serde(default)]
        amount: Option<Chips>,
    },

    /// Посадить игрока. Без `chips` – стартовый стек из конфига.
    AddPlayer {
        name: String,
        #[serde(default)]
        chips: Option<Chips>,
        #[serde(default)]
        kind: PlayerKind,
    },

    /// Убрать игрока между раздачами.
    RemovePlayer { name: String },
}

/// Ответ API на команду.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "response", rename_all = "snake_case")]
pub enum CommandResponse {
    /// Обновлённое состояние стола.
    State(GameSnapshot),

    /// Игрок сел за стол.
    PlayerSeated { seat: SeatIndex, state: GameSnapshot },

    /// Игрок ушёл со своим стеком.
    PlayerRemoved { name: String, chips: Chips },

    /// Турнир окончен.
    TournamentFinished {
        winner: String,
        rankings: Vec<TournamentRanking>,
    },
}

/// Выполнить команду над столом.
///
/// Снапшот в ответе строится глазами того, кто прислал команду.
pub fn execute<R: RandomSource>(game: &mut Game<R>, command: Command) -> Result<CommandResponse, ApiError> {
    debug!("command: {:?}", command);
    match command {
        Command::StartHand => match game.start_new_hand()? {
            HandStart::Started => Ok(CommandResponse::State(build_snapshot(game, None))),
            HandStart::TournamentWinner { winner, rankings } => {
                Ok(CommandResponse::TournamentFinished { winner, rankings })
            }
        },

        Command::Act {
            player,
            action,
            amount,
        } => {
            let kind = PlayerActionKind::parse(&action, amount)?;
            game.player_action(&player, kind)?;
            Ok(CommandResponse::State(build_snapshot(game, Some(&player))))
        }

        Command::AddPlayer { name, chips, kind } => {
            let chips = chips.unwrap_or(game.config().starting_chips);
            let seat = game.add_player(name.clone(), chips, kind)?;
            Ok(CommandResponse::PlayerSeated {
                seat,
                state: build_snapshot(game, Some(&name)),
            })
        }

        Command::RemovePlayer { name } => {
            let removed = game.remove_player(&name)?;
            Ok(CommandResponse::PlayerRemoved {
                name: removed.name,
                chips: removed.chips,
            })
        }
    }
}

/// Разобрать команду из JSON и выполнить.
pub fn execute_json<R: RandomSource>(game: &mut Game<R>, json: &str) -> Result<CommandResponse, ApiError> {
    let command: Command = serde_json::from_str(json)?;
    execute(game, command)
}
