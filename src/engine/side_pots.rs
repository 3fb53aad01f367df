use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};
use crate::eval::HandValue;

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Все, кто внёс в этот уровень (включая сфолдивших), по возрастанию seat.
    pub eligible_seats: Vec<SeatIndex>,
}

/// Посчитать сайд-поты из сумм, которые внесли игроки.
///
/// Вход: (seat, сколько суммарно фишек поставил игрок за раздачу).
/// Выход: список side pots в порядке "от младших" к "старшим".
/// Сумма всех потов равна сумме вкладов.
pub fn compute_side_pots(contributions: &[(SeatIndex, Chips)]) -> Vec<SidePot> {
    let mut entries: Vec<(SeatIndex, Chips)> = contributions
        .iter()
        .filter(|(_, chips)| !chips.is_zero())
        .copied()
        .collect();

    if entries.is_empty() {
        return Vec::new();
    }

    // Сортируем по размеру вклада (возрастание).
    entries.sort_by_key(|(seat, c)| (c.0, *seat));

    let mut pots = Vec::new();
    let mut prev_level = Chips::ZERO;

    for &(_, level) in entries.iter() {
        if level == prev_level {
            continue;
        }

        // Все игроки, у кого вклад >= level, участвуют в этом уровне.
        let mut eligible: Vec<SeatIndex> = entries
            .iter()
            .filter(|(_, contrib)| *contrib >= level)
            .map(|(seat, _)| *seat)
            .collect();
        eligible.sort_unstable();

        let layer = Chips((level - prev_level).0 * eligible.len() as u64);
        pots.push(SidePot {
            amount: layer,
            eligible_seats: eligible,
        });

        prev_level = level;
    }

    pots
}

/// Разделить поты между живыми руками.
///
/// `hands` – живые (не сфолдившие) игроки в порядке оценки.
/// Каждый пот достаётся лучшим рукам среди его участников; пот, в котором
/// не осталось ни одного живого участника, уходит лучшим рукам стола.
/// Делится поровну, остаток – первому победителю в порядке оценки.
///
/// Возвращает выплаты (seat, сумма) в порядке первого выигрыша.
pub fn distribute(pots: &[SidePot], hands: &[(SeatIndex, HandValue)]) -> Vec<(SeatIndex, Chips)> {
    let mut payouts: Vec<(SeatIndex, Chips)> = Vec::new();
    if hands.is_empty() {
        return payouts;
    }

    let overall = best_of(hands.iter());

    for pot in pots {
        if pot.amount.is_zero() {
            continue;
        }

        let contenders = hands
            .iter()
            .filter(|(seat, _)| pot.eligible_seats.contains(seat));
        let mut winners = best_of(contenders);
        if winners.is_empty() {
            winners = overall.clone();
        }

        let n = winners.len() as u64;
        let share = Chips(pot.amount.0 / n);
        let remainder = Chips(pot.amount.0 % n);

        for (i, seat) in winners.iter().enumerate() {
            let prize = if i == 0 { share + remainder } else { share };
            match payouts.iter_mut().find(|(s, _)| s == seat) {
                Some((_, total)) => *total += prize,
                None => payouts.push((*seat, prize)),
            }
        }
    }

    payouts
}

/// Seat'ы с лучшей рукой (в порядке оценки).
fn best_of<'a, I>(hands: I) -> Vec<SeatIndex>
where
    I: Iterator<Item = &'a (SeatIndex, HandValue)>,
{
    let mut best: Option<&HandValue> = None;
    let mut winners = Vec::new();
    for (seat, value) in hands {
        match best {
            Some(b) if value < b => {}
            Some(b) if value == b => winners.push(*seat),
            _ => {
                best = Some(value);
                winners.clear();
                winners.push(*seat);
            }
        }
    }
    winners
}
