//! Нормализация рассадки и позиционные хелперы.
//!
//! После нормализации место 0 – малый блайнд, 1 – большой, дальше по кругу;
//! при 3+ игроках последнее место – баттон, в хедз-апе баттон = малый блайнд.

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex, TableSeating};
use crate::engine::errors::ReplayError;

/// Место после нормализации.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct NormalizedSeat {
    pub seat: SeatIndex,
    pub external_id: String,
    pub display_name: String,
    pub stack: Chips,
}

/// Рассадка в порядке действий: SB первым, места с фишками.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Seating {
    pub seats: Vec<NormalizedSeat>,
    /// Внешние id игроков, выкинутых из-за нулевого/отрицательного стека.
    pub dropped: Vec<String>,
}

impl Seating {
    pub fn len(&self) -> usize {
        self.seats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seats.is_empty()
    }

    pub fn external_id(&self, seat: SeatIndex) -> Option<&str> {
        self.seats.get(seat as usize).map(|s| s.external_id.as_str())
    }
}

/// Повернуть рассадку так, чтобы первым шёл малый блайнд, и выкинуть места
/// со стеком <= 0 (порядок остальных сохраняется).
///
/// Малый блайнд ищется по отображаемому имени; при дубликатах берётся первое.
pub fn normalize_seating(table: &TableSeating) -> Result<Seating, ReplayError> {
    let n = table.seats.len();
    let sb_index = table
        .seats
        .iter()
        .position(|s| s.display_name == table.small_blind)
        .ok_or_else(|| ReplayError::UnknownSmallBlind {
            name: table.small_blind.clone(),
        })?;

    let mut seats = Vec::with_capacity(n);
    let mut dropped = Vec::new();

    for entry in (0..n).map(|i| &table.seats[(sb_index + i) % n]) {
        if entry.starting_stack <= 0 {
            tracing::warn!(
                player = %entry.external_id,
                stack = entry.starting_stack,
                "skipping seat with non-positive stack"
            );
            dropped.push(entry.external_id.clone());
            continue;
        }

        seats.push(NormalizedSeat {
            seat: seats.len() as SeatIndex,
            external_id: entry.external_id.clone(),
            display_name: entry.display_name.clone(),
            stack: Chips(entry.starting_stack as u64),
        });
    }

    if seats.len() < 2 {
        return Err(ReplayError::InsufficientPlayers {
            eligible: seats.len(),
        });
    }

    Ok(Seating { seats, dropped })
}

/// Баттон: последнее место, в хедз-апе – малый блайнд.
pub fn button_seat(n: usize) -> SeatIndex {
    if n <= 2 {
        0
    } else {
        (n - 1) as SeatIndex
    }
}

pub fn small_blind_seat() -> SeatIndex {
    0
}

pub fn big_blind_seat() -> SeatIndex {
    1
}

/// Первый ходящий на префлопе: следующий за BB (в хедз-апе это SB).
pub fn preflop_first_seat(n: usize) -> SeatIndex {
    (2 % n) as SeatIndex
}

/// Первый ходящий на постфлопе: слева от баттона.
pub fn postflop_first_seat(n: usize) -> SeatIndex {
    ((button_seat(n) as usize + 1) % n) as SeatIndex
}

/// Все места по кругу, начиная со `start` (включительно).
pub fn seats_from(start: SeatIndex, n: usize) -> Vec<SeatIndex> {
    (0..n)
        .map(|i| ((start as usize + i) % n) as SeatIndex)
        .collect()
}
