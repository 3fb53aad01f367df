use super::hand_rank::HandValue;

/// Рука участника после ранжирования.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankedHand<K> {
    pub key: K,
    pub value: HandValue,
    /// 1 = лучшая; равные руки делят место.
    pub rank: usize,
}

/// Отранжировать руки сразу нескольких игроков.
///
/// Competition ranking: равные руки получают одно место, следующее место
/// сдвигается на размер группы (1, 1, 3, ...). Сортировка стабильная, так что
/// внутри группы равных сохраняется входной порядок (порядок оценки).
pub fn compare_players<K: Clone>(hands: &[(K, HandValue)]) -> Vec<RankedHand<K>> {
    let mut order: Vec<usize> = (0..hands.len()).collect();
    order.sort_by(|&a, &b| hands[b].1.cmp(&hands[a].1));

    let mut ranked: Vec<RankedHand<K>> = Vec::with_capacity(hands.len());
    for (pos, idx) in order.into_iter().enumerate() {
        let (key, value) = &hands[idx];
        let rank = match ranked.last() {
            Some(prev) if prev.value == *value => prev.rank,
            _ => pos + 1,
        };
        ranked.push(RankedHand {
            key: key.clone(),
            value: value.clone(),
            rank,
        });
    }
    ranked
}

/// Ключи победителей (место 1) в порядке оценки.
pub fn winners<K: Clone>(hands: &[(K, HandValue)]) -> Vec<K> {
    compare_players(hands)
        .into_iter()
        .take_while(|r| r.rank == 1)
        .map(|r| r.key)
        .collect()
}
