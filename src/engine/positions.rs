use crate::domain::player::Player;
use crate::domain::SeatIndex;

/// Места по кругу, начиная с `start` (включительно).
pub fn seats_from(seat_count: usize, start: SeatIndex) -> impl Iterator<Item = SeatIndex> {
    (0..seat_count).map(move |i| (start + i) % seat_count.max(1))
}

/// Места по кругу сразу после `seat` (не включая его самого, он – последний).
pub fn seats_after(seat_count: usize, seat: SeatIndex) -> impl Iterator<Item = SeatIndex> {
    seats_from(seat_count, seat + 1)
}

/// Следующее место после `after` (или с нулевого, если `None`), для которого
/// выполняется условие.
pub fn next_seat_where<F>(players: &[Player], after: Option<SeatIndex>, pred: F) -> Option<SeatIndex>
where
    F: Fn(&Player) -> bool,
{
    if players.is_empty() {
        return None;
    }
    let start = after.map_or(0, |s| s + 1);
    seats_from(players.len(), start).find(|&s| pred(&players[s]))
}

/// Кнопка дилера:
/// - если есть текущая кнопка – следующее место с фишками;
/// - если нет – первое место с фишками.
pub fn next_dealer(players: &[Player], current: Option<SeatIndex>) -> Option<SeatIndex> {
    next_seat_where(players, current, |p| !p.chips.is_zero())
}

/// Кто ещё может ходить, по кругу после `seat` (сам `seat` не включается).
pub fn betting_order_after(players: &[Player], seat: SeatIndex) -> Vec<SeatIndex> {
    seats_after(players.len(), seat)
        .filter(|&s| s != seat && players[s].can_act())
        .collect()
}

/// Кто может ходить, по кругу начиная с `start` (включительно).
pub fn betting_order_from(players: &[Player], start: SeatIndex) -> Vec<SeatIndex> {
    seats_from(players.len(), start)
        .filter(|&s| players[s].can_act())
        .collect()
}
