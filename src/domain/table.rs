use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Индекс места в нормализованной рассадке (0 = малый блайнд).
pub type SeatIndex = u8;

/// Конфиг стола: размеры блайндов. Передаётся явно, никогда не угадывается.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    pub small_blind: Chips,
    pub big_blind: Chips,
}

impl TableConfig {
    pub fn new(small_blind: u64, big_blind: u64) -> Self {
        Self {
            small_blind: Chips(small_blind),
            big_blind: Chips(big_blind),
        }
    }

    /// Блайнды положительные, BB не меньше SB.
    pub fn is_valid(&self) -> bool {
        !self.small_blind.is_zero() && self.big_blind >= self.small_blind
    }
}

/// Место во входной рассадке (как пришло от вызывающего кода).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatEntry {
    pub external_id: String,
    pub display_name: String,
    /// Может быть <= 0 во входных данных – такие места выкидываются.
    pub starting_stack: i64,
}

impl SeatEntry {
    pub fn new(external_id: impl Into<String>, display_name: impl Into<String>, starting_stack: i64) -> Self {
        Self {
            external_id: external_id.into(),
            display_name: display_name.into(),
            starting_stack,
        }
    }
}

/// Рассадка стола целиком: места по кругу + имя малого блайнда.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableSeating {
    pub seats: Vec<SeatEntry>,
    pub small_blind: String,
}

impl TableSeating {
    pub fn new(seats: Vec<SeatEntry>, small_blind: impl Into<String>) -> Self {
        Self {
            seats,
            small_blind: small_blind.into(),
        }
    }
}
