use core::cmp::Ordering;
use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::{Card, Rank};
use crate::domain::hand::HandRank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
}

impl HandCategory {
    const ALL: [HandCategory; 9] = [
        HandCategory::HighCard,
        HandCategory::OnePair,
        HandCategory::TwoPair,
        HandCategory::ThreeOfAKind,
        HandCategory::Straight,
        HandCategory::Flush,
        HandCategory::FullHouse,
        HandCategory::FourOfAKind,
        HandCategory::StraightFlush,
    ];

    /// Сколько первых рангов участвуют в сравнении.
    pub fn significant_ranks(self) -> usize {
        match self {
            HandCategory::Straight | HandCategory::StraightFlush => 1,
            HandCategory::FourOfAKind | HandCategory::FullHouse => 2,
            HandCategory::ThreeOfAKind | HandCategory::TwoPair => 3,
            HandCategory::OnePair => 4,
            HandCategory::HighCard | HandCategory::Flush => 5,
        }
    }
}

impl fmt::Display for HandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
        };
        f.write_str(name)
    }
}

impl HandRank {
    /// Собрать HandRank из категории и рангов тай-брейка (от старшего к младшему).
    ///
    /// Схема кодирования (u32):
    ///   [категория:4 бита][r0:4][r1:4][r2:4][r3:4][r4:4]
    /// Незначимые позиции (кикеры, которых у категории нет) зануляются,
    /// поэтому равенство рангов = ничья.
    pub fn from_category_and_ranks(category: HandCategory, ranks: [Rank; 5]) -> Self {
        let used = category.significant_ranks();
        let mut value = (category as u32) & 0x0F;
        for (i, rank) in ranks.iter().enumerate() {
            let nibble = if i < used { rank.value() as u32 } else { 0 };
            value = (value << 4) | nibble;
        }
        HandRank(value)
    }

    /// Вытащить категорию из HandRank.
    pub fn category(&self) -> HandCategory {
        let cat_id = ((self.0 >> 20) & 0x0F) as usize;
        HandCategory::ALL
            .get(cat_id)
            .copied()
            .unwrap_or(HandCategory::HighCard)
    }

    /// Ранги тай-брейка (только значимые, от старшего к младшему).
    pub fn tie_break_ranks(&self) -> Vec<Rank> {
        (0..5)
            .rev()
            .map(|i| ((self.0 >> (i * 4)) & 0x0F) as u8)
            .filter_map(Rank::from_value)
            .collect()
    }
}

/// Сила лучшей 5-карточной комбинации.
///
/// Сравнение и равенство – только по `rank`: масти и конкретные карты на
/// исход не влияют.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct HandStrength {
    pub rank: HandRank,
    pub category: HandCategory,
    /// Карты комбинации: сначала образующие (пара, сет...), затем кикеры.
    pub cards: [Card; 5],
}

impl HandStrength {
    pub fn new(category: HandCategory, ranks: [Rank; 5], cards: [Card; 5]) -> Self {
        Self {
            rank: HandRank::from_category_and_ranks(category, ranks),
            category,
            cards,
        }
    }
}

impl PartialEq for HandStrength {
    fn eq(&self, other: &Self) -> bool {
        self.rank == other.rank
    }
}

impl Eq for HandStrength {}

impl PartialOrd for HandStrength {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HandStrength {
    fn cmp(&self, other: &Self) -> Ordering {
        self.rank.cmp(&other.rank)
    }
}

/// Человеческое описание руки: категория + карты.
pub fn describe_hand(strength: &HandStrength) -> String {
    let cards: Vec<String> = strength.cards.iter().map(|c| c.to_string()).collect();
    format!("{} ({})", strength.category, cards.join(" "))
}
