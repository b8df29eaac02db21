use core::fmt;
use std::collections::HashSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Масть карты.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Масть из символа кода карты. Только строчные буквы.
    pub fn from_char(ch: char) -> Option<Suit> {
        match ch {
            'c' => Some(Suit::Clubs),
            'd' => Some(Suit::Diamonds),
            'h' => Some(Suit::Hearts),
            's' => Some(Suit::Spades),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        }
    }
}

/// Ранг карты. Туз старший (14); в стрите A-2-3-4-5 туз играет снизу,
/// это решает evaluator, а не сам ранг.
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
    /// Все ранги от двойки до туза.
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

    /// Числовое значение 2..=14.
    pub const fn value(self) -> u8 {
        self as u8
    }

    pub fn from_value(v: u8) -> Option<Rank> {
        if (2..=14).contains(&v) {
            Some(Rank::ALL[(v - 2) as usize])
        } else {
            None
        }
    }

    /// Ранг из символа кода карты (регистр не важен).
    pub fn from_char(ch: char) -> Option<Rank> {
        let rank = match ch.to_ascii_uppercase() {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' => Rank::Ten,
            'J' => Rank::Jack,
            'Q' => Rank::Queen,
            'K' => Rank::King,
            'A' => Rank::Ace,
            _ => return None,
        };
        Some(rank)
    }

    pub fn as_char(self) -> char {
        match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => (b'0' + r.value()) as char,
        }
    }
}

/// Обычная покерная карта (52-карточная колода).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Код карты не распознан.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("Некорректный код карты: {0:?}")]
pub struct InvalidCardCode(pub String);

/// Разобрать двухсимвольный код карты: ранг (`2`..`9`, `T`, `J`, `Q`, `K`, `A`,
/// регистр не важен) + масть (`c`, `d`, `h`, `s`, только строчные).
pub fn parse_card(code: &str) -> Result<Card, InvalidCardCode> {
    let mut chars = code.chars();
    let (Some(r_ch), Some(s_ch), None) = (chars.next(), chars.next(), chars.next()) else {
        return Err(InvalidCardCode(code.to_string()));
    };

    let rank = Rank::from_char(r_ch).ok_or_else(|| InvalidCardCode(code.to_string()))?;
    let suit = Suit::from_char(s_ch).ok_or_else(|| InvalidCardCode(code.to_string()))?;

    Ok(Card::new(rank, suit))
}

/// Разобрать склеенные коды без разделителей: `"9hKs7c"` → три карты.
pub fn parse_card_run(run: &str) -> Result<Vec<Card>, InvalidCardCode> {
    let chars: Vec<char> = run.chars().collect();
    if chars.is_empty() || chars.len() % 2 != 0 {
        return Err(InvalidCardCode(run.to_string()));
    }

    chars
        .chunks(2)
        .map(|pair| parse_card(&pair.iter().collect::<String>()))
        .collect()
}

/// Все карты различны?
pub fn is_unique(cards: &[Card]) -> bool {
    let mut seen = HashSet::with_capacity(cards.len());
    cards.iter().all(|c| seen.insert(*c))
}

/// Первая повторившаяся карта, если есть.
pub fn first_duplicate(cards: &[Card]) -> Option<Card> {
    let mut seen = HashSet::with_capacity(cards.len());
    cards.iter().find(|c| !seen.insert(**c)).copied()
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = InvalidCardCode;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_card(s)
    }
}
