use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::table::SeatIndex;

/// Улица раздачи (раунд ставок).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
}

impl Street {
    /// Сколько карт лежит на борде во время этой улицы.
    pub fn board_len(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn => 4,
            Street::River => 5,
        }
    }

    /// Сколько карт открывается при переходе на эту улицу.
    pub fn reveal_count(self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }

    pub fn next(self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }
}

impl fmt::Display for Street {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Street::Preflop => "preflop",
            Street::Flop => "flop",
            Street::Turn => "turn",
            Street::River => "river",
        };
        f.write_str(name)
    }
}

/// Фаза раздачи с точки зрения стейт-машины.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandPhase {
    /// Идёт торговля на улице.
    Betting(Street),
    /// Ривер закрыт, в игре минимум двое – вскрытие.
    Showdown,
    /// Все, кроме одного, сбросили.
    UncontestedEnd { winner: SeatIndex },
}

impl HandPhase {
    pub fn is_terminal(self) -> bool {
        !matches!(self, HandPhase::Betting(_))
    }

    pub fn street(self) -> Option<Street> {
        match self {
            HandPhase::Betting(street) => Some(street),
            HandPhase::Showdown | HandPhase::UncontestedEnd { .. } => None,
        }
    }
}

impl fmt::Display for HandPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandPhase::Betting(street) => write!(f, "{street}"),
            HandPhase::Showdown => f.write_str("showdown"),
            HandPhase::UncontestedEnd { winner } => write!(f, "uncontested (seat {winner})"),
        }
    }
}

/// Ранг руки: упакованное u32, сравнивается как число.
/// Раскладку битов задаёт `eval::hand_rank`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandRank(pub u32);
