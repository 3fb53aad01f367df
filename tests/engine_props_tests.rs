// tests/engine_props_tests.rs
//
// Property-тесты движка: случайные столы и случайные (но допустимые) действия.
//
// 1) chips_are_conserved_across_random_play
//    - сумма стеков + банк не меняется ни после одного действия;
//    - каждая раздача доходит до HandComplete за конечное число шагов;
//    - карманные и общие карты не повторяются;
//    - ход никогда не достаётся сфолдившему или all-in игроку.
// 2) rejected_random_actions_change_nothing
//    - произвольное действие: либо принято, либо состояние стола не тронуто.
//

use holdem_core::domain::chips::Chips;
use holdem_core::domain::hand::Phase;
use holdem_core::domain::player::PlayerKind;
use holdem_core::domain::table::{PotSettlement, TableConfig};
use holdem_core::engine::{EngineError, Game, PlayerActionKind, ValidAction};
use holdem_core::infra::DeterministicRng;
use proptest::prelude::*;
use std::collections::HashSet;

const MAX_STEPS: usize = 400;

/// Все видимые движку карты (руки + борд) без повторов.
fn cards_are_unique(game: &Game<DeterministicRng>) -> bool {
    let mut seen = HashSet::new();
    game.players()
        .iter()
        .flat_map(|p| p.hole_cards.iter())
        .chain(game.community_cards().iter())
        .all(|c| seen.insert(*c))
}

fn table(seed: u64, stacks: &[u64], settlement: PotSettlement) -> Game<DeterministicRng> {
    let config = TableConfig {
        settlement,
        ..TableConfig::default()
    };
    let mut game = Game::with_rng(config, DeterministicRng::from_u64(seed)).unwrap();
    for (i, chips) in stacks.iter().enumerate() {
        game.add_player(format!("p{i}"), Chips(*chips), PlayerKind::Bot)
            .unwrap();
    }
    game
}

/// Выбрать допустимое действие по "броску" `roll`.
fn choose(valid: &[ValidAction], roll: u16) -> PlayerActionKind {
    let pick = &valid[roll as usize % valid.len()];
    match pick {
        ValidAction::Fold => PlayerActionKind::Fold,
        ValidAction::Check => PlayerActionKind::Check,
        ValidAction::Call { .. } => PlayerActionKind::Call,
        ValidAction::Raise { min, max } => {
            let span = max.0 - min.0;
            let extra = if span == 0 { 0 } else { roll as u64 % (span + 1) };
            PlayerActionKind::Raise(Chips(min.0 + extra))
        }
        ValidAction::AllIn { .. } => PlayerActionKind::AllIn,
    }
}

fn arbitrary_action() -> impl Strategy<Value = PlayerActionKind> {
    prop_oneof![
        Just(PlayerActionKind::Fold),
        Just(PlayerActionKind::Check),
        Just(PlayerActionKind::Call),
        Just(PlayerActionKind::AllIn),
        (0u64..3000).prop_map(|c| PlayerActionKind::Raise(Chips(c))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn chips_are_conserved_across_random_play(
        seed in any::<u64>(),
        stacks in proptest::collection::vec(1u64..3000, 2..=6),
        rolls in proptest::collection::vec(any::<u16>(), 64),
        single_pot in any::<bool>(),
        hands in 1usize..6,
    ) {
        let settlement = if single_pot { PotSettlement::SinglePot } else { PotSettlement::SidePots };
        let mut game = table(seed, &stacks, settlement);
        let total = game.total_chips();
        let mut step = 0usize;

        for _ in 0..hands {
            match game.start_new_hand() {
                Ok(_) => {}
                Err(EngineError::InsufficientPlayers { .. }) => break,
                Err(e) => return Err(TestCaseError::fail(format!("start_new_hand: {e}"))),
            }
            prop_assert_eq!(game.total_chips(), total);
            prop_assert!(cards_are_unique(&game));

            let mut steps_in_hand = 0;
            while let Some(name) = game.current_actor_name().map(str::to_string) {
                let actor = game.player(&name).unwrap();
                prop_assert!(!actor.folded, "ход у сфолдившего {}", name);
                prop_assert!(!actor.all_in, "ход у all-in {}", name);
                prop_assert!(!actor.chips.is_zero(), "ход у игрока без фишек {}", name);

                let valid = game.valid_actions(&name).unwrap();
                prop_assert!(!valid.is_empty());
                let action = choose(&valid, rolls[step % rolls.len()]);
                step += 1;

                game.player_action(&name, action).unwrap();
                prop_assert_eq!(game.total_chips(), total, "после {} от {}", action, name);
                prop_assert!(cards_are_unique(&game), "дубль карты после {} от {}", action, name);

                steps_in_hand += 1;
                prop_assert!(steps_in_hand < MAX_STEPS, "раздача не заканчивается");
            }

            prop_assert_eq!(game.phase(), Phase::HandComplete);
            prop_assert!(cards_are_unique(&game));
            prop_assert_eq!(game.pot(), Chips::ZERO);
            let won: u64 = game.last_winners().iter().map(|w| w.amount.0).sum();
            prop_assert!(won > 0);
        }
    }

    #[test]
    fn rejected_random_actions_change_nothing(
        seed in any::<u64>(),
        actions in proptest::collection::vec(arbitrary_action(), 1..40),
    ) {
        let mut game = table(seed, &[1000, 1000, 1000], PotSettlement::SidePots);
        game.start_new_hand().unwrap();

        for action in actions {
            let Some(name) = game.current_actor_name().map(str::to_string) else {
                break;
            };
            let before_players = game.players().to_vec();
            let before_betting = game.betting().clone();
            let before_pot = game.pot();

            if game.player_action(&name, action).is_err() {
                prop_assert_eq!(game.players(), before_players.as_slice());
                prop_assert_eq!(game.betting(), &before_betting);
                prop_assert_eq!(game.pot(), before_pot);
                prop_assert_eq!(game.current_actor_name(), Some(name.as_str()));
            }
            prop_assert_eq!(game.total_chips(), Chips(3000));
        }
    }
}
