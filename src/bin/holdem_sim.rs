// src/bin/holdem_sim.rs

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use holdem_core::domain::chips::Chips;
use holdem_core::domain::player::PlayerKind;
use holdem_core::domain::table::TableConfig;
use holdem_core::engine::{
    EngineError, Game, HandStart, PlayerActionKind, RegistryError, TableRegistry, ValidAction,
};
use holdem_core::infra::DeterministicRng;

// Параметры нагрузки.
const NUM_CASH_TABLES: usize = 8;
const PLAYERS_PER_TABLE: usize = 6;
const HANDS_PER_TABLE: u32 = 200;
const TOURNAMENT_PLAYERS: usize = 6;
const MAX_STEPS_PER_HAND: u32 = 500;
const MAX_TOURNAMENT_HANDS: u32 = 5_000;

fn main() {
    env_logger::init();
    println!("holdem_sim: стартуем симуляцию (cash-столы + турнир)…");

    let registry: TableRegistry<DeterministicRng> = TableRegistry::new();

    let cash_config = TableConfig::default();
    let mut rooms = Vec::with_capacity(NUM_CASH_TABLES);
    for t in 0..NUM_CASH_TABLES {
        let room = format!("cash-{}", t + 1);
        if let Err(e) = open_room(&registry, &room, cash_config.clone(), PLAYERS_PER_TABLE, t as u64) {
            eprintln!("[SIM][{}] не удалось открыть стол: {}", room, e);
            return;
        }
        rooms.push(room);
    }

    // Каждый стол под своим мьютексом – гоняем их параллельно.
    let results: Vec<(String, Result<TableStats, RegistryError>)> = rooms
        .par_iter()
        .enumerate()
        .map(|(i, room)| {
            let mut policy = StdRng::seed_from_u64(1_000 + i as u64);
            let res = registry.with_table(room, |game| play_cash(game, &mut policy));
            (room.clone(), res)
        })
        .collect();

    let mut total_hands = 0u64;
    let mut total_showdowns = 0u64;
    let mut max_pot = 0u64;
    for (room, res) in &results {
        match res {
            Ok(stats) => {
                total_hands += stats.hands;
                total_showdowns += stats.showdowns;
                max_pot = max_pot.max(stats.max_pot);
            }
            Err(e) => eprintln!("[SIM][{}] ОШИБКА: {}", room, e),
        }
    }

    println!();
    println!("=========== CASH SUMMARY ===========");
    println!("Столов: {}", results.len());
    println!("Всего сыграно рук: {}", total_hands);
    println!("Рук дошло до шоудауна: {}", total_showdowns);
    println!("Максимальный пот: {}", max_pot);
    println!("====================================");

    // Турнир: играем, пока не останется один.
    let room = "tournament-1";
    if let Err(e) = open_room(
        &registry,
        room,
        TableConfig::tournament(),
        TOURNAMENT_PLAYERS,
        99,
    ) {
        eprintln!("[SIM][{}] не удалось открыть стол: {}", room, e);
        return;
    }
    let mut policy = StdRng::seed_from_u64(7);
    match registry.with_table(room, |game| play_tournament(game, &mut policy)) {
        Ok(Some((winner, hands))) => {
            println!();
            println!("=========== TOURNAMENT ===========");
            println!("Победитель: {} (рук сыграно: {})", winner, hands);
            if let Ok(shared) = registry.get(room) {
                if let Ok(game) = shared.lock() {
                    if let Some(t) = game.tournament() {
                        for r in t.rankings() {
                            println!("  #{} {}", r.position, r.name);
                        }
                    }
                }
            }
            println!("==================================");
        }
        Ok(None) => eprintln!("[SIM][{}] турнир не закончился за {} рук", room, MAX_TOURNAMENT_HANDS),
        Err(e) => eprintln!("[SIM][{}] ОШИБКА: {}", room, e),
    }

    println!("holdem_sim: завершено.");
}

fn open_room(
    registry: &TableRegistry<DeterministicRng>,
    room: &str,
    config: TableConfig,
    players: usize,
    seed: u64,
) -> Result<(), RegistryError> {
    let chips = config.starting_chips;
    registry.create_table_with_rng(room, config, DeterministicRng::from_u64(seed))?;
    registry.with_table(room, |game| {
        for i in 0..players {
            game.add_player(format!("bot{}", i + 1), chips, PlayerKind::Bot)?;
        }
        Ok(())
    })
}

/// Итог прогона одного cash-стола.
#[derive(Debug, Default)]
struct TableStats {
    hands: u64,
    showdowns: u64,
    max_pot: u64,
}

fn play_cash(game: &mut Game<DeterministicRng>, policy: &mut StdRng) -> Result<TableStats, EngineError> {
    let total = game.total_chips();
    let mut stats = TableStats::default();

    for _ in 0..HANDS_PER_TABLE {
        match game.start_new_hand() {
            Ok(_) => {}
            // Все фишки у одного – стол доигран.
            Err(EngineError::InsufficientPlayers { .. }) => break,
            Err(e) => return Err(e),
        }
        let pot = play_hand(game, policy)?;
        stats.hands += 1;
        stats.max_pot = stats.max_pot.max(pot.0);
        if game.last_winners().iter().any(|w| w.hand_name.is_some()) {
            stats.showdowns += 1;
        }

        if game.total_chips() != total {
            eprintln!(
                "[SIM] BUG: фишки не сходятся после руки #{}: {} != {}",
                game.hand_number(),
                game.total_chips(),
                total
            );
        }
    }
    Ok(stats)
}

fn play_tournament(
    game: &mut Game<DeterministicRng>,
    policy: &mut StdRng,
) -> Result<Option<(String, u32)>, EngineError> {
    for _ in 0..MAX_TOURNAMENT_HANDS {
        match game.start_new_hand()? {
            HandStart::TournamentWinner { winner, .. } => {
                return Ok(Some((winner, game.hand_number())));
            }
            HandStart::Started => {
                play_hand(game, policy)?;
            }
        }
    }
    Ok(None)
}

/// Довести раздачу до конца ботами. Возвращает максимальный банк за раздачу.
fn play_hand(game: &mut Game<DeterministicRng>, policy: &mut StdRng) -> Result<Chips, EngineError> {
    let mut max_pot = game.pot();
    for _ in 0..MAX_STEPS_PER_HAND {
        let Some(actor) = game.current_actor_name().map(str::to_string) else {
            return Ok(max_pot);
        };
        let valid = game.valid_actions(&actor)?;
        let action = pick_action(&valid, policy);
        game.player_action(&actor, action)?;
        max_pot = max_pot.max(game.pot());
    }
    eprintln!(
        "[SIM] превышен лимит шагов ({}) в руке #{}",
        MAX_STEPS_PER_HAND,
        game.hand_number()
    );
    Ok(max_pot)
}

/// Простая бот-логика: чаще check/call, иногда рейз на минимум, редко fold/all-in.
fn pick_action(valid: &[ValidAction], rng: &mut StdRng) -> PlayerActionKind {
    let roll: u32 = rng.gen_range(0..100);

    let can_check = valid.iter().any(|a| matches!(a, ValidAction::Check));
    let raise = valid.iter().find_map(|a| match a {
        ValidAction::Raise { min, .. } => Some(*min),
        _ => None,
    });
    let can_all_in = valid.iter().any(|a| matches!(a, ValidAction::AllIn { .. }));

    match roll {
        0..=2 if can_all_in => PlayerActionKind::AllIn,
        3..=17 => match raise {
            Some(min) => PlayerActionKind::Raise(min),
            None if can_check => PlayerActionKind::Check,
            None => PlayerActionKind::Call,
        },
        18..=29 if !can_check => PlayerActionKind::Fold,
        _ if can_check => PlayerActionKind::Check,
        _ => PlayerActionKind::Call,
    }
}
