// src/bin/holdem_odds.rs
//
// Калькулятор шансов из командной строки:
//   holdem_odds "Ah Kh" "Qh Jh 2c" --opponents 2 --simulations 10000

use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use holdem_core::domain::card::{parse_cards, Card};
use holdem_core::eval::best_hand;
use holdem_core::odds::{compute_outs, estimate, hand_odds, EstimateConfig, StrengthLabel};

#[derive(Parser, Debug)]
#[command(author, version, about = "Шансы руки в холдеме: Monte Carlo, ауты, итоговые комбинации", long_about = None)]
struct Args {
    /// Карманные карты, например "Ah Kh".
    #[arg(required = true)]
    hole: String,

    /// Общие карты (0, 3, 4 или 5), например "Qh Jh 2c".
    board: Option<String>,

    /// Число соперников.
    #[arg(short, long, default_value_t = 1)]
    opponents: usize,

    /// Число прогонов Monte Carlo.
    #[arg(short = 'n', long, default_value_t = 5_000)]
    simulations: u32,

    /// Сид для воспроизводимого результата.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let hole = match parse_cards(&args.hole) {
        Ok(c) if c.len() == 2 => c,
        Ok(c) => {
            eprintln!("нужно ровно 2 карманные карты, получено {}", c.len());
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("не удалось разобрать карманные карты: {}", e);
            return ExitCode::FAILURE;
        }
    };
    let board = match args.board.as_deref().map(parse_cards).transpose() {
        Ok(b) => b.unwrap_or_default(),
        Err(e) => {
            eprintln!("не удалось разобрать борд: {}", e);
            return ExitCode::FAILURE;
        }
    };
    if board.len() > 5 {
        eprintln!("на борде не больше 5 карт, получено {}", board.len());
        return ExitCode::FAILURE;
    }
    let opponents = args.opponents;

    println!("Рука: {}   Борд: {}", show(&hole), show(&board));

    let mut known = hole.clone();
    known.extend_from_slice(&board);
    if known.len() >= 5 {
        if let Ok(best) = best_hand(&known) {
            println!("Текущая комбинация: {} [{}]", best.name(), show(&best.cards));
        }
    }

    let started = Instant::now();
    let config = EstimateConfig {
        seed: args.seed,
        ..EstimateConfig::with_simulations(args.simulations)
    };
    let est = estimate(&hole, &board, opponents, &config);
    let strength = StrengthLabel::from_win_percent(est.win);
    println!();
    println!(
        "Против {} соперник(ов), {} прогонов за {:?}:",
        opponents,
        est.trials,
        started.elapsed()
    );
    println!(
        "  win {:.1}%  tie {:.1}%  lose {:.1}%  ({})",
        est.win,
        est.tie,
        est.lose,
        strength.label()
    );

    let outs = compute_outs(&hole, &board);
    if outs.out_count > 0 {
        println!();
        println!(
            "Ауты: {} ({:.1}% к риверу) – {}",
            outs.out_count,
            outs.implied_odds,
            outs.improving_hands.join(", ")
        );
        println!("  {}", show(&outs.out_cards));
    }

    let dist = hand_odds(&hole, &board);
    if !dist.is_empty() {
        println!();
        println!("Итоговые комбинации к риверу:");
        for entry in dist {
            println!("  {:<16} {:>5.1}%", entry.name, entry.percent);
        }
    }

    ExitCode::SUCCESS
}

fn show(cards: &[Card]) -> String {
    if cards.is_empty() {
        return "-".to_string();
    }
    cards.iter().map(Card::pretty).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_and_flags() {
        let args = Args::try_parse_from(["holdem_odds", "Ah Kh"]).unwrap();
        assert_eq!(args.board, None);
        assert_eq!(args.opponents, 1);
        assert_eq!(args.simulations, 5_000);

        let args = Args::try_parse_from([
            "holdem_odds", "Ah Kh", "Qh Jh 2c", "-o", "3", "--simulations", "200", "--seed", "7",
        ])
        .unwrap();
        assert_eq!(args.board.as_deref(), Some("Qh Jh 2c"));
        assert_eq!(args.opponents, 3);
        assert_eq!(args.simulations, 200);
        assert_eq!(args.seed, Some(7));
    }

    #[test]
    fn non_numeric_counts_are_rejected() {
        assert!(Args::try_parse_from(["holdem_odds", "Ah Kh", "Qh Jh 2c", "--opponents", "three"]).is_err());
        assert!(Args::try_parse_from(["holdem_odds", "Ah Kh", "-n", "lots"]).is_err());
        // Лишние позиционные аргументы больше не глотаются молча.
        assert!(Args::try_parse_from(["holdem_odds", "Ah Kh", "Qh Jh 2c", "three", "lots"]).is_err());
        assert!(Args::try_parse_from(["holdem_odds"]).is_err());
    }
}
