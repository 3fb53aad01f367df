use log::{debug, info, warn};

use crate::domain::blinds::BlindLevel;
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{Phase, WinnerRecord};
use crate::domain::player::{Player, PlayerKind};
use crate::domain::shoe::Shoe;
use crate::domain::table::{GameMode, PotSettlement, TableConfig};
use crate::domain::tournament::{BustCandidate, TournamentRanking, TournamentState};
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;
use crate::engine::betting::BettingState;
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::engine::positions::{
    betting_order_after, betting_order_from, next_dealer, next_seat_where, seats_after,
};
use crate::engine::pot::Pot;
use crate::engine::side_pots::{compute_side_pots, distribute, SidePot};
use crate::engine::validation::{self, resolve_action, ResolvedAction, ValidAction};
use crate::engine::RandomSource;
use crate::eval::best_hand;
use crate::infra::rng::SystemRng;

/// Результат `start_new_hand`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HandStart {
    /// Раздача началась (или сразу доиграна, если ходить некому).
    Started,
    /// Турнир окончен: фишки остались у одного игрока.
    TournamentWinner {
        winner: String,
        rankings: Vec<TournamentRanking>,
    },
}

/// Один стол Texas Hold'em: игроки, шуз, банк, фазы раздачи.
///
/// Все изменения идут через `start_new_hand` / `player_action`;
/// каждый вызов синхронно доводит раздачу до следующего решения игрока
/// (включая авто-переход улиц и шоудаун).
#[derive(Clone, Debug)]
pub struct Game<R: RandomSource = SystemRng> {
    config: TableConfig,
    players: Vec<Player>,
    phase: Phase,
    community: Vec<Card>,
    shoe: Shoe,
    pot: Pot,
    betting: BettingState,
    dealer: Option<SeatIndex>,
    current_actor: Option<SeatIndex>,
    small_blind: Chips,
    big_blind: Chips,
    hand_number: u32,
    history: HandHistory,
    previous_history: Option<HandHistory>,
    last_winners: Vec<WinnerRecord>,
    showdown_revealed: bool,
    stacks_at_start: Vec<Chips>,
    tournament: Option<TournamentState>,
    stacked_next_shoe: Option<Vec<Card>>,
    rng: R,
}

impl Game<SystemRng> {
    pub fn new(config: TableConfig) -> Result<Self, EngineError> {
        Self::with_rng(config, SystemRng)
    }
}

impl<R: RandomSource> Game<R> {
    pub fn with_rng(config: TableConfig, rng: R) -> Result<Self, EngineError> {
        config.validate().map_err(EngineError::InvalidConfig)?;

        let (small_blind, big_blind, tournament) = match config.mode {
            GameMode::Cash => (config.small_blind, config.big_blind, None),
            GameMode::Tournament => {
                let t = TournamentState::new(config.blind_structure.clone(), config.hands_per_level);
                let first: BlindLevel = t.current_level().cloned().ok_or_else(|| {
                    EngineError::InvalidConfig("tournament needs at least one blind level".into())
                })?;
                (first.small_blind, first.big_blind, Some(t))
            }
        };

        Ok(Self {
            config,
            players: Vec::new(),
            phase: Phase::Waiting,
            community: Vec::new(),
            shoe: Shoe::new(),
            pot: Pot::new(),
            betting: BettingState::default(),
            dealer: None,
            current_actor: None,
            small_blind,
            big_blind,
            hand_number: 0,
            history: HandHistory::new(0),
            previous_history: None,
            last_winners: Vec::new(),
            showdown_revealed: false,
            stacks_at_start: Vec::new(),
            tournament,
            stacked_next_shoe: None,
            rng,
        })
    }

    //
    // ГЕТТЕРЫ
    //

    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn community_cards(&self) -> &[Card] {
        &self.community
    }

    pub fn pot(&self) -> Chips {
        self.pot.total
    }

    pub fn betting(&self) -> &BettingState {
        &self.betting
    }

    pub fn current_bet(&self) -> Chips {
        self.betting.current_bet
    }

    pub fn dealer(&self) -> Option<SeatIndex> {
        self.dealer
    }

    pub fn current_actor(&self) -> Option<SeatIndex> {
        self.current_actor
    }

    pub fn current_actor_name(&self) -> Option<&str> {
        self.current_actor.map(|s| self.players[s].name.as_str())
    }

    pub fn blinds(&self) -> (Chips, Chips) {
        (self.small_blind, self.big_blind)
    }

    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }

    pub fn history(&self) -> &HandHistory {
        &self.history
    }

    pub fn previous_history(&self) -> Option<&HandHistory> {
        self.previous_history.as_ref()
    }

    pub fn last_winners(&self) -> &[WinnerRecord] {
        &self.last_winners
    }

    pub fn tournament(&self) -> Option<&TournamentState> {
        self.tournament.as_ref()
    }

    /// Открыты ли карты игрока на шоудауне.
    pub fn is_revealed(&self, seat: SeatIndex) -> bool {
        self.showdown_revealed && self.players.get(seat).is_some_and(|p| p.is_in_hand())
    }

    /// Фишки на столе + банк. Не меняется внутри раздачи.
    pub fn total_chips(&self) -> Chips {
        self.players.iter().map(|p| p.chips).sum::<Chips>() + self.pot.total
    }

    pub fn seat_of(&self, name: &str) -> Result<SeatIndex, EngineError> {
        self.players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))
    }

    pub fn player(&self, name: &str) -> Result<&Player, EngineError> {
        self.seat_of(name).map(|s| &self.players[s])
    }

    //
    // РАССАДКА
    //

    /// Посадить игрока на следующее свободное место.
    pub fn add_player(
        &mut self,
        name: impl Into<String>,
        chips: Chips,
        kind: PlayerKind,
    ) -> Result<SeatIndex, EngineError> {
        let name = name.into();
        if !self.phase.is_idle() {
            return Err(EngineError::HandInProgress);
        }
        if self.players.iter().any(|p| p.name == name) {
            return Err(EngineError::DuplicatePlayer(name));
        }
        if self.players.len() >= self.config.max_players {
            return Err(EngineError::TableFull {
                max_players: self.config.max_players,
            });
        }

        let seat = self.players.len();
        info!("seat {}: {} joins with {} chips", seat, name, chips);
        self.players.push(Player::new(name, seat, chips, kind));
        Ok(seat)
    }

    /// Убрать игрока между раздачами. Места уплотняются.
    pub fn remove_player(&mut self, name: &str) -> Result<Player, EngineError> {
        if !self.phase.is_idle() {
            return Err(EngineError::HandInProgress);
        }
        let idx = self.seat_of(name)?;
        let removed = self.players.remove(idx);
        for (i, p) in self.players.iter_mut().enumerate() {
            p.seat = i;
        }
        if idx < self.stacks_at_start.len() {
            self.stacks_at_start.remove(idx);
        }

        // Кнопка остаётся "перед" тем, кто сидел следом.
        self.dealer = match self.dealer {
            Some(d) if idx < d => Some(d - 1),
            Some(d) if idx == d => d.checked_sub(1),
            other => other,
        }
        .filter(|d| *d < self.players.len());

        info!("{} leaves the table", name);
        Ok(removed)
    }

    /// Зафиксировать порядок шуза следующей раздачи: `top` сверху,
    /// остальные карты колоды за ними.
    pub fn stack_next_shoe(&mut self, top: &[Card]) -> Result<(), EngineError> {
        Shoe::stacked(top)?;
        self.stacked_next_shoe = Some(top.to_vec());
        Ok(())
    }

    //
    // СТАРТ РАЗДАЧИ
    //

    /// Старт новой раздачи:
    /// - двигает кнопку;
    /// - раздаёт карманные карты;
    /// - постит блайнды и настраивает очередь ходов.
    pub fn start_new_hand(&mut self) -> Result<HandStart, EngineError> {
        if !self.phase.is_idle() {
            return Err(EngineError::HandInProgress);
        }

        let funded: Vec<SeatIndex> = self
            .players
            .iter()
            .filter(|p| !p.chips.is_zero())
            .map(|p| p.seat)
            .collect();

        if let Some(t) = self.tournament.as_mut() {
            if !t.is_finished() && funded.len() == 1 {
                let winner = self.players[funded[0]].name.clone();
                info!("tournament finished, winner {}", winner);
                t.finish(winner);
            }
            if t.is_finished() {
                if let Some(winner) = t.winner.clone() {
                    return Ok(HandStart::TournamentWinner {
                        winner,
                        rankings: t.rankings(),
                    });
                }
            }
        }

        if funded.len() < 2 {
            return Err(EngineError::InsufficientPlayers {
                funded: funded.len(),
            });
        }

        // Всё, что может упасть, считаем до изменений стола.
        let mut shoe = match self.stacked_next_shoe.as_deref() {
            Some(top) => Shoe::stacked(top)?,
            None => Shoe::standard_52(),
        };
        let dealer = next_dealer(&self.players, self.dealer).ok_or(
            EngineError::InsufficientPlayers {
                funded: funded.len(),
            },
        )?;

        if self.stacked_next_shoe.take().is_none() {
            self.rng.shuffle(shoe.cards_mut());
        }

        self.hand_number += 1;
        let finished = std::mem::replace(&mut self.history, HandHistory::new(self.hand_number));
        if !finished.is_empty() {
            self.previous_history = Some(finished);
        }

        self.shoe = shoe;
        self.community.clear();
        self.pot.reset();
        self.last_winners.clear();
        self.showdown_revealed = false;
        self.stacks_at_start = self.players.iter().map(|p| p.chips).collect();
        for p in self.players.iter_mut() {
            p.clear_hand();
            // Без фишек в раздаче не участвует.
            if p.chips.is_zero() {
                p.folded = true;
            }
        }
        self.dealer = Some(dealer);
        self.phase = Phase::PreFlop;

        self.log_event(HandEventKind::HandStarted {
            hand_number: self.hand_number,
            dealer,
        });

        if let Some(level) = self.tournament.as_mut().and_then(|t| t.on_hand_started()) {
            info!(
                "blinds up: level {} ({}/{})",
                level.level, level.small_blind, level.big_blind
            );
            self.small_blind = level.small_blind;
            self.big_blind = level.big_blind;
            self.log_event(HandEventKind::BlindLevelChanged {
                level: level.level,
                small_blind: level.small_blind,
                big_blind: level.big_blind,
            });
        }

        self.deal_hole_cards(dealer)?;
        let bb_seat = self.post_blinds(dealer, funded.len());

        // Префлоп: первым ходит следующий после BB, BB – последним (опция).
        let to_act = betting_order_from(&self.players, bb_seat + 1);
        self.betting = BettingState::new(self.big_blind, self.big_blind, Some(bb_seat), to_act);
        self.current_actor = self.betting.to_act.first().copied();

        info!(
            "hand #{} started: dealer seat {}, blinds {}/{}, {} players",
            self.hand_number,
            dealer,
            self.small_blind,
            self.big_blind,
            funded.len()
        );

        // Ходить некому (все в all-in на блайндах) – сразу доигрываем борд.
        let level = self.betting.current_bet;
        let needs_decision = self.betting.to_act.len() >= 2
            || self
                .betting
                .to_act
                .iter()
                .any(|&s| !self.players[s].to_call(level).is_zero());
        if !needs_decision {
            self.run_out_board()?;
        }

        Ok(HandStart::Started)
    }

    /// Раздача карманных карт – по 2 карты, по кругу слева от кнопки.
    fn deal_hole_cards(&mut self, dealer: SeatIndex) -> Result<(), EngineError> {
        let order: Vec<SeatIndex> = seats_after(self.players.len(), dealer)
            .filter(|&s| !self.players[s].chips.is_zero())
            .collect();

        for _round in 0..2 {
            for &seat in &order {
                let card = self.shoe.deal_one()?;
                self.players[seat].hole_cards.push(card);
            }
        }

        for &seat in &order {
            let player = self.players[seat].name.clone();
            self.log_event(HandEventKind::HoleCardsDealt { player });
        }
        Ok(())
    }

    /// Постинг блайндов. Хедз-ап: дилер ставит малый блайнд.
    /// Возвращает seat большого блайнда.
    fn post_blinds(&mut self, dealer: SeatIndex, funded: usize) -> SeatIndex {
        let has_chips = |p: &Player| !p.chips.is_zero();

        let sb_seat = if funded == 2 {
            dealer
        } else {
            next_seat_where(&self.players, Some(dealer), has_chips).unwrap_or(dealer)
        };
        let bb_seat = next_seat_where(&self.players, Some(sb_seat), has_chips).unwrap_or(sb_seat);

        let sb_paid = self.post(sb_seat, self.small_blind);
        let bb_paid = self.post(bb_seat, self.big_blind);

        self.log_event(HandEventKind::BlindsPosted {
            small_blind: (self.players[sb_seat].name.clone(), sb_paid),
            big_blind: (self.players[bb_seat].name.clone(), bb_paid),
        });
        bb_seat
    }

    fn post(&mut self, seat: SeatIndex, amount: Chips) -> Chips {
        let paid = self.players[seat].commit(amount);
        self.pot.add(paid);
        paid
    }

    //
    // ДЕЙСТВИЯ
    //

    /// Применить действие игрока. Ошибка – состояние не изменилось.
    pub fn player_action(&mut self, name: &str, action: PlayerActionKind) -> Result<(), EngineError> {
        let result = self.try_player_action(name, action);
        if let Err(e) = &result {
            warn!("hand #{}: rejected {} from {}: {}", self.hand_number, action, name, e);
        }
        result
    }

    fn try_player_action(&mut self, name: &str, action: PlayerActionKind) -> Result<(), EngineError> {
        if !self.phase.is_betting() {
            return Err(EngineError::NoActiveHand);
        }
        let seat = self.seat_of(name)?;
        if self.current_actor != Some(seat) {
            return Err(EngineError::NotPlayersTurn {
                player: name.to_string(),
                expected: self.current_actor_name().map(str::to_string),
            });
        }

        let resolved = resolve_action(&self.players[seat], &action, &self.betting)?;
        self.apply(seat, resolved)
    }

    fn apply(&mut self, seat: SeatIndex, action: ResolvedAction) -> Result<(), EngineError> {
        let level_before = self.betting.current_bet;

        let player = &mut self.players[seat];
        if action.kind == PlayerActionKind::Fold {
            player.folded = true;
        }
        let paid = player.commit(action.commit);
        let new_bet = player.current_bet;
        let new_stack = player.chips;
        let name = player.name.clone();
        self.pot.add(paid);

        if new_bet > level_before {
            // Ставка выросла: полный рейз или неполный all-in.
            let increment = new_bet - level_before;
            let full = (increment >= self.betting.min_raise).then_some(increment);
            let order = betting_order_after(&self.players, seat);
            self.betting.on_raise(seat, new_bet, full, order);
        } else {
            self.betting.mark_acted(seat);
        }

        debug!(
            "hand #{} {}: {} {} (paid {}, stack {}, pot {})",
            self.hand_number, self.phase, name, action.kind, paid, new_stack, self.pot.total
        );
        self.log_event(HandEventKind::PlayerActed {
            player: name,
            action: action.kind,
            amount: paid,
            new_stack,
        });

        let unfolded: Vec<SeatIndex> = self
            .players
            .iter()
            .filter(|p| p.is_in_hand())
            .map(|p| p.seat)
            .collect();
        if let [winner] = unfolded.as_slice() {
            return self.award_uncontested(*winner);
        }

        if self.betting.is_round_complete() {
            self.complete_round()
        } else {
            self.current_actor = self.betting.to_act.first().copied();
            Ok(())
        }
    }

    //
    // УЛИЦЫ
    //

    /// Раунд ставок завершён: следующая улица, доигровка борда или шоудаун.
    fn complete_round(&mut self) -> Result<(), EngineError> {
        if self.phase == Phase::River {
            return self.showdown();
        }

        let can_act = self.players.iter().filter(|p| p.can_act()).count();
        if can_act <= 1 {
            return self.run_out_board();
        }

        self.deal_next_street()?;
        self.open_street();
        Ok(())
    }

    /// Сжечь карту и открыть следующую улицу.
    fn deal_next_street(&mut self) -> Result<(), EngineError> {
        let Some((next, count)) = self.phase.next_street() else {
            return Ok(());
        };

        self.shoe.burn()?;
        let cards = self.shoe.deal(count)?;
        self.community.extend_from_slice(&cards);
        self.phase = next;

        debug!(
            "hand #{}: {} [{}]",
            self.hand_number,
            next,
            cards.iter().map(|c| c.to_string()).collect::<Vec<_>>().join(" ")
        );
        self.log_event(HandEventKind::BoardDealt { phase: next, cards });
        Ok(())
    }

    /// Сбросить ставки улицы, первым ходит первый активный слева от кнопки.
    fn open_street(&mut self) {
        for p in self.players.iter_mut() {
            p.current_bet = Chips::ZERO;
        }

        let start = self.dealer.map_or(0, |d| d + 1);
        let to_act = betting_order_from(&self.players, start);
        let first = to_act.first().copied();

        self.betting = BettingState::new(Chips::ZERO, self.big_blind, first, to_act);
        self.current_actor = first;
    }

    /// Дальше торговаться некому: открыть оставшийся борд и вскрыться.
    fn run_out_board(&mut self) -> Result<(), EngineError> {
        self.betting.to_act.clear();
        self.current_actor = None;
        while self.phase.next_street().is_some() {
            self.deal_next_street()?;
        }
        self.showdown()
    }

    //
    // ЗАВЕРШЕНИЕ
    //

    /// Все, кроме одного, сфолдили: банк ему без вскрытия.
    fn award_uncontested(&mut self, seat: SeatIndex) -> Result<(), EngineError> {
        let amount = self.pot.total;
        let player = &mut self.players[seat];
        player.chips += amount;
        let name = player.name.clone();

        info!("hand #{}: {} wins {} uncontested", self.hand_number, name, amount);
        self.log_event(HandEventKind::PotAwarded {
            player: name.clone(),
            amount,
        });
        self.last_winners = vec![WinnerRecord {
            name,
            amount,
            hand_name: None,
            category: None,
        }];
        self.finish_hand();
        Ok(())
    }

    /// Шоудаун: лучшие руки в порядке мест, делёж банка (с сайд-потами).
    fn showdown(&mut self) -> Result<(), EngineError> {
        self.phase = Phase::Showdown;
        self.betting.to_act.clear();
        self.current_actor = None;

        let mut hands = Vec::new();
        let mut reveals = Vec::new();
        for p in self.players.iter().filter(|p| p.is_in_hand()) {
            let mut cards = p.hole_cards.clone();
            cards.extend_from_slice(&self.community);
            let best = best_hand(&cards)?;
            reveals.push((p.seat, p.hole_cards.clone(), best.value.clone()));
            hands.push((p.seat, best.value));
        }

        for (seat, hole_cards, value) in &reveals {
            let player = self.players[*seat].name.clone();
            self.log_event(HandEventKind::ShowdownReveal {
                player,
                hole_cards: hole_cards.clone(),
                hand_name: value.name().to_string(),
            });
        }

        let pots = match self.config.settlement {
            PotSettlement::SidePots => {
                let contributions: Vec<(SeatIndex, Chips)> =
                    self.players.iter().map(|p| (p.seat, p.total_bet)).collect();
                compute_side_pots(&contributions)
            }
            PotSettlement::SinglePot => vec![SidePot {
                amount: self.pot.total,
                eligible_seats: hands.iter().map(|(s, _)| *s).collect(),
            }],
        };

        let payouts = distribute(&pots, &hands);
        let mut winners = Vec::with_capacity(payouts.len());
        for (seat, amount) in payouts {
            self.players[seat].chips += amount;
            let name = self.players[seat].name.clone();
            let value = hands.iter().find(|(s, _)| *s == seat).map(|(_, v)| v);

            info!(
                "hand #{}: {} wins {} with {}",
                self.hand_number,
                name,
                amount,
                value.map_or("-", |v| v.name())
            );
            self.log_event(HandEventKind::PotAwarded {
                player: name.clone(),
                amount,
            });
            winners.push(WinnerRecord {
                name,
                amount,
                hand_name: value.map(|v| v.name().to_string()),
                category: value.map(|v| v.category),
            });
        }

        self.last_winners = winners;
        self.showdown_revealed = true;
        self.finish_hand();
        Ok(())
    }

    fn finish_hand(&mut self) {
        self.phase = Phase::HandComplete;
        self.current_actor = None;
        self.betting.to_act.clear();
        self.pot.reset();

        self.log_event(HandEventKind::HandFinished {
            hand_number: self.hand_number,
        });
        debug!("hand #{} complete", self.hand_number);

        self.record_tournament_results();
    }

    /// Турнир: проставить места вылетевшим, определить победителя.
    fn record_tournament_results(&mut self) {
        let Some(t) = self.tournament.as_mut() else {
            return;
        };

        let still_funded: Vec<&Player> = self.players.iter().filter(|p| !p.chips.is_zero()).collect();
        let busted: Vec<BustCandidate> = self
            .players
            .iter()
            .zip(self.stacks_at_start.iter())
            .filter(|(p, start)| p.chips.is_zero() && !start.is_zero())
            .map(|(p, start)| BustCandidate {
                name: p.name.clone(),
                stack_at_hand_start: *start,
            })
            .collect();

        let recorded = t.record_eliminations(busted, still_funded.len(), self.hand_number);
        if let [last] = still_funded.as_slice() {
            info!("tournament finished, winner {}", last.name);
            t.finish(last.name.clone());
        }

        for r in recorded {
            info!("{} eliminated in position {}", r.name, r.position);
            self.log_event(HandEventKind::PlayerEliminated {
                player: r.name,
                position: r.position,
            });
        }
    }

    //
    // ЗАПРОСЫ
    //

    /// Допустимые действия. Пусто, если сейчас не ход этого игрока.
    pub fn valid_actions(&self, name: &str) -> Result<Vec<ValidAction>, EngineError> {
        let seat = self.seat_of(name)?;
        if !self.phase.is_betting() || self.current_actor != Some(seat) {
            return Ok(Vec::new());
        }
        Ok(validation::valid_actions(&self.players[seat], &self.betting))
    }

    /// Сколько игроку нужно доплатить до текущей ставки (не больше стека).
    pub fn call_amount(&self, name: &str) -> Result<Chips, EngineError> {
        let p = self.player(name)?;
        if !self.phase.is_betting() {
            return Ok(Chips::ZERO);
        }
        Ok(p.to_call(self.betting.current_bet).min(p.chips))
    }

    fn log_event(&mut self, kind: HandEventKind) {
        self.history.push(self.phase, self.pot.total, kind);
    }
}
