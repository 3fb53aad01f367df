use core::cmp::Ordering;
use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Suit {
    Hearts,   // ♥
    Diamonds, // ♦
    Clubs,    // ♣
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Hearts, Suit::Diamonds, Suit::Clubs, Suit::Spades];

    /// Юникод-символ масти для логов и клиентов.
    pub fn symbol(self) -> char {
        match self {
            Suit::Hearts => '\u{2665}',
            Suit::Diamonds => '\u{2666}',
            Suit::Clubs => '\u{2663}',
            Suit::Spades => '\u{2660}',
        }
    }

    /// Индекс 0..4, удобен для массивов-счётчиков.
    pub fn index(self) -> usize {
        match self {
            Suit::Hearts => 0,
            Suit::Diamonds => 1,
            Suit::Clubs => 2,
            Suit::Spades => 3,
        }
    }
}

/// Ранг карты. Числовое значение = 2..14 (туз старший).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub fn value(self) -> u8 {
        self as u8
    }

    /// Обратное преобразование из 2..14.
    pub fn from_value(v: u8) -> Option<Rank> {
        match v {
            2..=14 => Some(Rank::ALL[(v - 2) as usize]),
            _ => None,
        }
    }
}

/// Ошибка разбора строки карты.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum CardParseError {
    #[error("card string must look like `Ah`, `Td` or `10d`, got `{0}`")]
    BadLength(String),

    #[error("invalid rank `{0}`")]
    InvalidRank(String),

    #[error("invalid suit `{0}`")]
    InvalidSuit(char),
}

/// Обычная карта 52-карточной колоды. Неизменяемое значение,
/// идентичность = равенство ранга и масти.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Числовое значение 2..14.
    pub fn value(&self) -> u8 {
        self.rank.value()
    }

    pub fn symbol(&self) -> char {
        self.suit.symbol()
    }

    /// Вид для людей: `A♠`, `10♥`.
    pub fn pretty(&self) -> String {
        let rank = match self.rank {
            Rank::Ten => "10".to_string(),
            r => r.to_string(),
        };
        format!("{}{}", rank, self.symbol())
    }
}

/// Сначала по значению, потом по масти – полный порядок для сортировок.
impl Ord for Card {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank
            .cmp(&other.rank)
            .then_with(|| self.suit.cmp(&other.suit))
    }
}

impl PartialOrd for Card {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Two => '2',
            Rank::Three => '3',
            Rank::Four => '4',
            Rank::Five => '5',
            Rank::Six => '6',
            Rank::Seven => '7',
            Rank::Eight => '8',
            Rank::Nine => '9',
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "10d", "7c".
impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let n = s.chars().count();
        if !(2..=3).contains(&n) {
            return Err(CardParseError::BadLength(s.to_string()));
        }

        let s_ch = s
            .chars()
            .last()
            .ok_or_else(|| CardParseError::BadLength(s.to_string()))?;
        let rank_part: String = s.chars().take(n - 1).collect();

        let rank = match rank_part.to_ascii_uppercase().as_str() {
            "2" => Rank::Two,
            "3" => Rank::Three,
            "4" => Rank::Four,
            "5" => Rank::Five,
            "6" => Rank::Six,
            "7" => Rank::Seven,
            "8" => Rank::Eight,
            "9" => Rank::Nine,
            "T" | "10" => Rank::Ten,
            "J" => Rank::Jack,
            "Q" => Rank::Queen,
            "K" => Rank::King,
            "A" => Rank::Ace,
            _ => return Err(CardParseError::InvalidRank(rank_part)),
        };

        let suit = match s_ch {
            'c' | 'C' | '\u{2663}' => Suit::Clubs,
            'd' | 'D' | '\u{2666}' => Suit::Diamonds,
            'h' | 'H' | '\u{2665}' => Suit::Hearts,
            's' | 'S' | '\u{2660}' => Suit::Spades,
            other => return Err(CardParseError::InvalidSuit(other)),
        };

        Ok(Card { rank, suit })
    }
}

/// Разобрать список карт через пробел/запятую: "Ah Kd, 7c".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, CardParseError> {
    s.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|t| !t.is_empty())
        .map(str::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_short_and_long_forms() {
        assert_eq!("Ah".parse::<Card>().unwrap(), Card::new(Rank::Ace, Suit::Hearts));
        assert_eq!("10d".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert_eq!("td".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
        assert!("1x".parse::<Card>().is_err());
        assert!("Ahh7".parse::<Card>().is_err());
    }

    #[test]
    fn value_is_two_to_fourteen() {
        assert_eq!(Card::new(Rank::Two, Suit::Clubs).value(), 2);
        assert_eq!(Card::new(Rank::Ace, Suit::Clubs).value(), 14);
        assert_eq!(Rank::from_value(11), Some(Rank::Jack));
        assert_eq!(Rank::from_value(15), None);
    }

    #[test]
    fn display_round_trips() {
        let c = Card::new(Rank::Ten, Suit::Spades);
        assert_eq!(c.to_string(), "Ts");
        assert_eq!(c.pretty(), "10\u{2660}");
    }
}
