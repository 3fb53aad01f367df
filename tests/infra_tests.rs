//! Инфраструктура:
//! - загрузка конфига стола из JSON / файла;
//! - детерминированный RNG;
//! - реестр столов: независимые комнаты, параллельный доступ.

use std::sync::Arc;

use holdem_core::domain::chips::Chips;
use holdem_core::domain::hand::Phase;
use holdem_core::domain::player::PlayerKind;
use holdem_core::domain::table::{GameMode, PotSettlement, TableConfig};
use holdem_core::engine::{Game, PlayerActionKind, RandomSource, RegistryError, TableRegistry};
use holdem_core::infra::{config_from_json, config_to_json, load_config, ConfigError, DeterministicRng};

//
// ====================== CONFIG ======================
//

#[test]
fn partial_json_falls_back_to_defaults() {
    let cfg = config_from_json(r#"{"mode":"tournament","hands_per_level":5}"#).unwrap();
    assert_eq!(cfg.mode, GameMode::Tournament);
    assert_eq!(cfg.hands_per_level, 5);
    assert_eq!(cfg.starting_chips, Chips(1000));
    assert_eq!(cfg.settlement, PotSettlement::SidePots);
    assert_eq!(cfg.blind_structure.levels.len(), 10);
}

#[test]
fn invalid_config_is_rejected() {
    let err = config_from_json(r#"{"small_blind":50,"big_blind":20}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)), "BB меньше SB: {err}");

    let err = config_from_json(r#"{"max_players":12}"#).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid(_)));

    let err = config_from_json("[1, 2").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn config_file_round_trip() {
    let cfg = TableConfig {
        max_players: 6,
        settlement: PotSettlement::SinglePot,
        simulation_deadline_ms: Some(250),
        ..TableConfig::default()
    };
    let path = std::env::temp_dir().join(format!("holdem-config-{}.json", std::process::id()));
    std::fs::write(&path, config_to_json(&cfg).unwrap()).unwrap();

    let loaded = load_config(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, cfg);

    let missing = load_config(std::env::temp_dir().join("holdem-no-such-config.json"));
    assert!(matches!(missing, Err(ConfigError::Io { .. })));
}

//
// ====================== RNG ======================
//

#[test]
fn same_seed_deals_same_hands() {
    let deal = |seed: u64| {
        let mut game = Game::with_rng(TableConfig::default(), DeterministicRng::from_u64(seed)).unwrap();
        game.add_player("a", Chips(1000), PlayerKind::Bot).unwrap();
        game.add_player("b", Chips(1000), PlayerKind::Bot).unwrap();
        game.start_new_hand().unwrap();
        game.players()
            .iter()
            .map(|p| p.hole_cards.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(deal(77), deal(77));
    assert_ne!(deal(77), deal(78));
}

#[test]
fn seed_bytes_constructor_is_deterministic() {
    let mut a: Vec<u8> = (0..20).collect();
    let mut b = a.clone();
    DeterministicRng::from_seed([9; 32]).shuffle(&mut a);
    DeterministicRng::from_seed([9; 32]).shuffle(&mut b);
    assert_eq!(a, b);
}

//
// ====================== РЕЕСТР СТОЛОВ ======================
//

#[test]
fn rooms_are_independent() {
    let registry: TableRegistry<DeterministicRng> = TableRegistry::new();
    registry
        .create_table_with_rng("a", TableConfig::default(), DeterministicRng::from_u64(1))
        .unwrap();
    registry
        .create_table_with_rng("b", TableConfig::default(), DeterministicRng::from_u64(2))
        .unwrap();
    assert!(matches!(
        registry.create_table_with_rng("a", TableConfig::default(), DeterministicRng::from_u64(3)),
        Err(RegistryError::RoomExists(_))
    ));
    assert_eq!(registry.room_ids(), vec!["a".to_string(), "b".to_string()]);

    registry
        .with_table("a", |g| {
            g.add_player("x", Chips(500), PlayerKind::Human)?;
            g.add_player("y", Chips(500), PlayerKind::Human)?;
            g.start_new_hand()
        })
        .unwrap();

    let a = registry.get("a").unwrap();
    let b = registry.get("b").unwrap();
    assert_eq!(a.lock().unwrap().phase(), Phase::PreFlop);
    assert_eq!(b.lock().unwrap().players().len(), 0);

    registry.remove("a").unwrap();
    assert!(!registry.has_table("a"));
    assert!(matches!(registry.get("a"), Err(RegistryError::RoomNotFound(_))));
    assert!(matches!(
        registry.with_table("a", |g| Ok(g.hand_number())),
        Err(RegistryError::RoomNotFound(_))
    ));
    // Выданная ранее ссылка продолжает жить.
    assert_eq!(a.lock().unwrap().hand_number(), 1);
}

#[test]
fn engine_errors_pass_through_registry() {
    let registry: TableRegistry = TableRegistry::new();
    registry.create_table("solo", TableConfig::default()).unwrap();
    let err = registry
        .with_table("solo", |g| g.start_new_hand())
        .unwrap_err();
    assert!(matches!(err, RegistryError::Engine(_)));
}

#[test]
fn parallel_tables_play_without_interference() {
    let rt = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("tokio runtime");

    let registry: Arc<TableRegistry<DeterministicRng>> = Arc::new(TableRegistry::new());
    let rooms: Vec<String> = (0..8).map(|i| format!("room-{i}")).collect();
    for (i, room) in rooms.iter().enumerate() {
        registry
            .create_table_with_rng(room.as_str(), TableConfig::default(), DeterministicRng::from_u64(i as u64))
            .unwrap();
        registry
            .with_table(room, |g| {
                for n in 0..4 {
                    g.add_player(format!("p{n}"), Chips(1000), PlayerKind::Bot)?;
                }
                Ok(())
            })
            .unwrap();
    }

    rt.block_on(async {
        let mut handles = Vec::new();
        for room in rooms.clone() {
            let registry = Arc::clone(&registry);
            handles.push(tokio::task::spawn_blocking(move || {
                registry.with_table(&room, |g| {
                    for _ in 0..20 {
                        g.start_new_hand()?;
                        // Все коллируют / чекают до шоудауна.
                        while let Some(name) = g.current_actor_name().map(str::to_string) {
                            let to_call = g.call_amount(&name)?;
                            let action = if to_call.is_zero() {
                                PlayerActionKind::Check
                            } else {
                                PlayerActionKind::Call
                            };
                            g.player_action(&name, action)?;
                        }
                    }
                    Ok(g.hand_number())
                })
            }));
        }
        for h in handles {
            let played = h.await.expect("задача не паниковала").expect("стол без ошибок");
            assert!(played > 0);
        }
    });

    for room in &rooms {
        let shared = registry.get(room).unwrap();
        let game = shared.lock().unwrap();
        assert_eq!(game.total_chips(), Chips(4000), "Фишки сохраняются за столом {room}");
        assert!(game.phase().is_idle());
    }
}
