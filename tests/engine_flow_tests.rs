//! Сквозные тесты движка на настоящем `Game`:
//! - блайнды, кнопка, хедз-ап, опция большого блайнда;
//! - переход улиц ровно по одной за раунд;
//! - фолд до одного игрока, ошибки без изменения состояния;
//! - all-in, сайд-поты и сплит с остатком (через заранее сложенный шуз).

use holdem_core::domain::card::{parse_cards, Card};
use holdem_core::domain::chips::Chips;
use holdem_core::domain::hand::Phase;
use holdem_core::domain::player::PlayerKind;
use holdem_core::domain::table::{PotSettlement, TableConfig};
use holdem_core::engine::{
    EngineError, Game, HandEventKind, HandStart, PlayerActionKind, ValidAction,
};
use holdem_core::eval::HandCategory;
use holdem_core::infra::DeterministicRng;

use PlayerActionKind::{AllIn, Call, Check, Fold, Raise};

/// Утилита: стол с игроками p0, p1, ... и заданными стеками.
fn game_with_config(config: TableConfig, stacks: &[u64]) -> Game<DeterministicRng> {
    let mut game = Game::with_rng(config, DeterministicRng::from_u64(11)).expect("валидный конфиг");
    for (i, chips) in stacks.iter().enumerate() {
        game.add_player(format!("p{i}"), Chips(*chips), PlayerKind::Human)
            .expect("место есть");
    }
    game
}

fn game_with(stacks: &[u64]) -> Game<DeterministicRng> {
    game_with_config(TableConfig::default(), stacks)
}

fn cards(s: &str) -> Vec<Card> {
    parse_cards(s).expect("валидная строка карт")
}

fn act(game: &mut Game<DeterministicRng>, name: &str, action: PlayerActionKind) {
    game.player_action(name, action)
        .unwrap_or_else(|e| panic!("{name} {action}: {e}"));
}

fn chips(game: &Game<DeterministicRng>, name: &str) -> u64 {
    game.player(name).unwrap().chips.0
}

//
// ====================== СТАРТ РАЗДАЧИ ======================
//

#[test]
fn blinds_and_first_actor_three_handed() {
    let mut game = game_with(&[1000, 1000, 1000]);
    assert_eq!(game.start_new_hand().unwrap(), HandStart::Started);

    assert_eq!(game.phase(), Phase::PreFlop);
    assert_eq!(game.dealer(), Some(0));
    assert_eq!(chips(&game, "p1"), 990, "SB слева от кнопки");
    assert_eq!(chips(&game, "p2"), 980, "BB следом за SB");
    assert_eq!(game.pot(), Chips(30));
    assert_eq!(game.current_bet(), Chips(20));
    assert_eq!(game.current_actor_name(), Some("p0"), "Первым ходит UTG");

    for p in game.players() {
        assert_eq!(p.hole_cards.len(), 2);
    }
    assert_eq!(game.total_chips(), Chips(3000));
}

#[test]
fn heads_up_dealer_posts_small_blind_and_acts_first() {
    let mut game = game_with(&[1000, 1000]);
    game.start_new_hand().unwrap();

    assert_eq!(game.dealer(), Some(0));
    assert_eq!(chips(&game, "p0"), 990);
    assert_eq!(chips(&game, "p1"), 980);
    assert_eq!(game.current_actor_name(), Some("p0"));
}

#[test]
fn button_moves_to_next_funded_seat() {
    let mut game = game_with(&[1000, 1000, 1000]);
    game.start_new_hand().unwrap();
    act(&mut game, "p0", Fold);
    act(&mut game, "p1", Fold);
    assert_eq!(game.phase(), Phase::HandComplete);

    game.start_new_hand().unwrap();
    assert_eq!(game.dealer(), Some(1));
    assert_eq!(game.current_actor_name(), Some("p1"));
    assert_eq!(game.hand_number(), 2);
    assert!(game.previous_history().is_some());
}

#[test]
fn big_blind_keeps_the_option() {
    let mut game = game_with(&[1000, 1000, 1000]);
    game.start_new_hand().unwrap();

    act(&mut game, "p0", Call);
    act(&mut game, "p1", Call);

    // Все уравняли, но BB ещё не ходил.
    assert_eq!(game.phase(), Phase::PreFlop);
    assert_eq!(game.current_actor_name(), Some("p2"));
    let valid = game.valid_actions("p2").unwrap();
    assert!(valid.contains(&ValidAction::Check));
    assert!(valid.contains(&ValidAction::Raise {
        min: Chips(40),
        max: Chips(1000)
    }));

    act(&mut game, "p2", Check);
    assert_eq!(game.phase(), Phase::Flop);
    assert_eq!(game.pot(), Chips(60));
}

//
// ====================== УЛИЦЫ ======================
//

#[test]
fn exactly_one_street_per_completed_round() {
    let mut game = game_with(&[1000, 1000, 1000]);
    game.start_new_hand().unwrap();
    act(&mut game, "p0", Call);
    act(&mut game, "p1", Call);
    act(&mut game, "p2", Check);

    let expected = [(Phase::Flop, 3usize), (Phase::Turn, 4), (Phase::River, 5)];
    for (phase, board) in expected {
        assert_eq!(game.phase(), phase);
        assert_eq!(game.community_cards().len(), board);
        assert_eq!(game.current_bet(), Chips::ZERO, "Ставки улицы сброшены");
        assert_eq!(
            game.current_actor_name(),
            Some("p1"),
            "После флопа первым ходит первый слева от кнопки"
        );

        act(&mut game, "p1", Check);
        act(&mut game, "p2", Check);
        assert_eq!(game.phase(), phase, "Улица не закончилась, пока не сходил последний");
        act(&mut game, "p0", Check);
    }

    assert_eq!(game.phase(), Phase::HandComplete);
    assert_eq!(game.pot(), Chips::ZERO);
    assert_eq!(game.total_chips(), Chips(3000));
    assert!(!game.last_winners().is_empty());
    assert!(game.last_winners().iter().all(|w| w.hand_name.is_some()));

    let events = &game.history().events;
    assert!(matches!(events.first().map(|e| &e.kind), Some(HandEventKind::HandStarted { .. })));
    let boards = events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::BoardDealt { .. }))
        .count();
    assert_eq!(boards, 3);
}

#[test]
fn bet_and_raise_reopen_action() {
    let mut game = game_with(&[1000, 1000, 1000]);
    game.start_new_hand().unwrap();
    act(&mut game, "p0", Raise(Chips(60)));

    assert_eq!(game.current_bet(), Chips(60));
    assert_eq!(game.betting().min_raise, Chips(40));
    assert_eq!(game.betting().min_raise_to(), Chips(100));

    act(&mut game, "p1", Call);
    act(&mut game, "p2", Raise(Chips(200)));
    assert_eq!(game.phase(), Phase::PreFlop);
    assert_eq!(game.current_actor_name(), Some("p0"), "Рейз снова открыл торговлю");

    act(&mut game, "p0", Call);
    act(&mut game, "p1", Call);
    assert_eq!(game.phase(), Phase::Flop);
    assert_eq!(game.pot(), Chips(600));
}

#[test]
fn history_records_pot_after_each_action() {
    let mut game = game_with(&[1000, 1000, 1000]);
    game.start_new_hand().unwrap();

    let blinds = game
        .history()
        .events
        .iter()
        .find(|e| matches!(e.kind, HandEventKind::BlindsPosted { .. }))
        .expect("блайнды в истории");
    assert_eq!(blinds.pot, Chips(30));

    act(&mut game, "p0", Raise(Chips(60)));
    let last = game.history().events.last().unwrap();
    assert!(matches!(
        last.kind,
        HandEventKind::PlayerActed { amount: Chips(60), .. }
    ));
    assert_eq!(last.pot, Chips(90), "Банк уже включает рейз");
    assert_eq!(last.phase, Phase::PreFlop);

    act(&mut game, "p1", Fold);
    act(&mut game, "p2", Fold);
    let awarded = game
        .history()
        .events
        .iter()
        .find(|e| matches!(e.kind, HandEventKind::PotAwarded { .. }))
        .expect("выплата в истории");
    assert_eq!(awarded.pot, Chips(90), "Выплата записана до обнуления банка");
    assert_eq!(game.pot(), Chips::ZERO);
}

//
// ====================== ФОЛД И ОШИБКИ ======================
//

#[test]
fn folding_to_one_player_ends_the_hand() {
    let mut game = game_with(&[1000, 1000, 1000]);
    game.start_new_hand().unwrap();
    act(&mut game, "p0", Fold);
    act(&mut game, "p1", Fold);

    assert_eq!(game.phase(), Phase::HandComplete);
    assert_eq!(chips(&game, "p2"), 1010);
    assert_eq!(chips(&game, "p1"), 990);
    assert_eq!(game.community_cards().len(), 0, "Борд не открывается");

    let winners = game.last_winners();
    assert_eq!(winners.len(), 1);
    assert_eq!(winners[0].name, "p2");
    assert_eq!(winners[0].amount, Chips(30));
    assert_eq!(winners[0].hand_name, None);
}

#[test]
fn rejected_actions_leave_state_untouched() {
    let mut game = game_with(&[1000, 1000, 1000]);
    assert_eq!(game.player_action("p0", Check), Err(EngineError::NoActiveHand));

    game.start_new_hand().unwrap();
    let players_before = game.players().to_vec();
    let betting_before = game.betting().clone();
    let pot_before = game.pot();

    assert!(matches!(
        game.player_action("p1", Call),
        Err(EngineError::NotPlayersTurn { .. })
    ));
    assert_eq!(
        game.player_action("p0", Check),
        Err(EngineError::IllegalCheck { to_call: Chips(20) })
    );
    assert_eq!(
        game.player_action("p0", Raise(Chips(30))),
        Err(EngineError::RaiseBelowMinimum {
            attempted: Chips(30),
            minimum: Chips(40)
        })
    );
    assert_eq!(
        game.player_action("ghost", Fold),
        Err(EngineError::UnknownPlayer("ghost".into()))
    );
    assert_eq!(game.start_new_hand(), Err(EngineError::HandInProgress));
    assert_eq!(
        game.add_player("late", Chips(1000), PlayerKind::Bot),
        Err(EngineError::HandInProgress)
    );

    assert_eq!(game.players(), players_before.as_slice());
    assert_eq!(game.betting(), &betting_before);
    assert_eq!(game.pot(), pot_before);
    assert_eq!(game.current_actor_name(), Some("p0"));
}

#[test]
fn start_needs_two_funded_players() {
    let mut game = game_with(&[1000, 0]);
    assert_eq!(
        game.start_new_hand(),
        Err(EngineError::InsufficientPlayers { funded: 1 })
    );
    assert_eq!(game.phase(), Phase::Waiting);
    assert_eq!(game.hand_number(), 0);
}

#[test]
fn seating_rules() {
    let config = TableConfig {
        max_players: 2,
        ..TableConfig::default()
    };
    let mut game = game_with_config(config, &[500, 500]);
    assert_eq!(
        game.add_player("p0", Chips(1), PlayerKind::Human),
        Err(EngineError::DuplicatePlayer("p0".into()))
    );
    assert_eq!(
        game.add_player("p2", Chips(1), PlayerKind::Human),
        Err(EngineError::TableFull { max_players: 2 })
    );

    let removed = game.remove_player("p0").unwrap();
    assert_eq!(removed.chips, Chips(500));
    assert_eq!(game.player("p1").unwrap().seat, 0, "Места уплотняются");
}

//
// ====================== ALL-IN И САЙД-ПОТЫ ======================
//

#[test]
fn no_raise_offered_when_stack_only_covers_the_call() {
    let mut game = game_with(&[1000, 1000, 50]);
    game.start_new_hand().unwrap();
    act(&mut game, "p0", Raise(Chips(200)));
    act(&mut game, "p1", Fold);

    let valid = game.valid_actions("p2").unwrap();
    assert!(!valid.iter().any(|a| matches!(a, ValidAction::Raise { .. })));
    assert!(valid.contains(&ValidAction::Call { amount: Chips(30) }));
    assert!(valid.contains(&ValidAction::AllIn { amount: Chips(30) }));

    act(&mut game, "p2", Call);

    // p0 больше не с кем торговаться: борд открывается до конца.
    assert_eq!(game.phase(), Phase::HandComplete);
    assert_eq!(game.community_cards().len(), 5);
    assert_eq!(chips(&game, "p1"), 990);
    assert!(chips(&game, "p0") >= 950, "Непокрытые 150 возвращаются p0");
    assert_eq!(game.total_chips(), Chips(2050));
}

#[test]
fn all_in_blind_runs_out_the_board() {
    let mut game = game_with(&[1000, 15]);
    game.start_new_hand().unwrap();
    assert!(game.player("p1").unwrap().all_in);
    assert_eq!(game.current_actor_name(), Some("p0"));

    act(&mut game, "p0", Call);
    assert_eq!(game.phase(), Phase::HandComplete);
    assert_eq!(game.community_cards().len(), 5);
    assert_eq!(game.total_chips(), Chips(1015));
}

#[test]
fn side_pots_pay_each_layer_to_its_best_hand() {
    let mut game = game_with(&[1000, 300, 100]);
    // Раздача слева от кнопки: p1, p2, p0, p1, p2, p0; затем burn/флоп/burn/тёрн/burn/ривер.
    game.stack_next_shoe(&cards(
        "Kh Ah 7c Kd Ad 2d 5c 3s 8h 9c 6c Jd Tc 4s",
    ))
    .unwrap();
    game.start_new_hand().unwrap();

    act(&mut game, "p0", AllIn);
    act(&mut game, "p1", Call);
    act(&mut game, "p2", Call);

    assert_eq!(game.phase(), Phase::HandComplete);
    assert_eq!(game.community_cards(), cards("3s 8h 9c Jd 4s").as_slice());
    assert_eq!(chips(&game, "p2"), 300, "AA забирает главный банк 3 x 100");
    assert_eq!(chips(&game, "p1"), 400, "KK забирает сайд-пот 2 x 200");
    assert_eq!(chips(&game, "p0"), 700, "Непокрытая часть возвращается p0");

    let paid: Vec<(&str, u64)> = game
        .last_winners()
        .iter()
        .map(|w| (w.name.as_str(), w.amount.0))
        .collect();
    assert_eq!(paid, vec![("p2", 300), ("p1", 400), ("p0", 700)]);
    assert_eq!(game.last_winners()[0].category, Some(HandCategory::OnePair));
}

#[test]
fn single_pot_mode_ignores_commitment_levels() {
    let config = TableConfig {
        settlement: PotSettlement::SinglePot,
        ..TableConfig::default()
    };
    let mut game = game_with_config(config, &[1000, 300, 100]);
    game.stack_next_shoe(&cards(
        "Kh Ah 7c Kd Ad 2d 5c 3s 8h 9c 6c Jd Tc 4s",
    ))
    .unwrap();
    game.start_new_hand().unwrap();
    act(&mut game, "p0", AllIn);
    act(&mut game, "p1", Call);
    act(&mut game, "p2", Call);

    assert_eq!(chips(&game, "p2"), 1400, "Весь банк лучшей руке");
    assert_eq!(game.total_chips(), Chips(1400));
}

#[test]
fn split_pot_remainder_goes_to_first_winner_in_seat_order() {
    let config = TableConfig {
        small_blind: Chips(5),
        big_blind: Chips(10),
        ..TableConfig::default()
    };
    let mut game = game_with_config(config, &[1000, 1000, 1000]);
    // Борд AAKKQ играет за обоих.
    game.stack_next_shoe(&cards(
        "7h 4d 2c 7s 5d 3c 9s Ah Ad Kc 9h Kd 9d Qs",
    ))
    .unwrap();
    game.start_new_hand().unwrap();

    act(&mut game, "p0", Call);
    act(&mut game, "p1", Fold);
    act(&mut game, "p2", Check);
    for _ in 0..3 {
        act(&mut game, "p2", Check);
        act(&mut game, "p0", Check);
    }

    assert_eq!(game.phase(), Phase::HandComplete);
    assert_eq!(chips(&game, "p0"), 1003, "Нечётная фишка – первому по месту");
    assert_eq!(chips(&game, "p2"), 1002);
    assert_eq!(chips(&game, "p1"), 995);
    assert_eq!(game.total_chips(), Chips(3000));
}

#[test]
fn showdown_reveals_live_hands_only() {
    let mut game = game_with(&[1000, 1000, 1000]);
    game.start_new_hand().unwrap();
    act(&mut game, "p0", Fold);
    act(&mut game, "p1", Call);
    act(&mut game, "p2", Check);
    for _ in 0..3 {
        act(&mut game, "p1", Check);
        act(&mut game, "p2", Check);
    }

    assert_eq!(game.phase(), Phase::HandComplete);
    assert!(!game.is_revealed(0), "Сфолдивший не вскрывается");
    assert!(game.is_revealed(1));
    assert!(game.is_revealed(2));

    let reveals = game
        .history()
        .events
        .iter()
        .filter(|e| matches!(e.kind, HandEventKind::ShowdownReveal { .. }))
        .count();
    assert_eq!(reveals, 2);
}
