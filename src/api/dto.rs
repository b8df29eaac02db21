use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::domain::{SeatEntry, TableConfig, TableSeating};
use crate::engine::{PayoffsById, SettlementStatus};

/// Игрок в пейлоаде раздачи (как его присылает фронт).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerPayload {
    pub id: String,
    pub name: String,
    pub stack: i64,
    /// Карманные карты одной строкой: `"AsKd"` или `"As Kd"`.
    pub cards: String,
    /// То, что насчитал клиент. Движок это поле не читает.
    #[serde(default)]
    pub winnings: i64,
}

/// Раздача целиком, в формате фронта.
///
/// `dealer`, `small_blind`, `big_blind` – отображаемые имена игроков.
/// Суммы блайндов необязательны: без них берутся из конфига сервиса.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HandPayload {
    pub id: String,
    pub dealer: String,
    pub small_blind: String,
    pub big_blind: String,
    pub players: Vec<PlayerPayload>,
    pub actions: Vec<String>,
    #[serde(default)]
    pub community_cards: Vec<String>,
    pub final_pot: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub small_blind_amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub big_blind_amount: Option<u64>,
}

impl HandPayload {
    /// Рассадка в порядке пейлоада; малый блайнд ищется по имени.
    pub fn seating(&self) -> TableSeating {
        let seats = self
            .players
            .iter()
            .map(|p| SeatEntry::new(p.id.clone(), p.name.clone(), p.stack))
            .collect();
        TableSeating::new(seats, self.small_blind.clone())
    }

    /// Карманные карты по id игрока, разбитые на двухсимвольные коды.
    pub fn hole_cards(&self) -> HashMap<String, Vec<String>> {
        self.players
            .iter()
            .map(|p| (p.id.clone(), split_card_codes(&p.cards)))
            .collect()
    }

    /// Блайнды раздачи: явные суммы из пейлоада поверх конфига сервиса.
    pub fn table_config(&self, defaults: &TableConfig) -> TableConfig {
        TableConfig::new(
            self.small_blind_amount.unwrap_or(defaults.small_blind.0),
            self.big_blind_amount.unwrap_or(defaults.big_blind.0),
        )
    }
}

/// `"AsKd"`, `"As Kd"` → `["As", "Kd"]`. Хвост нечётной длины остаётся
/// отдельным кодом, его отвергнет разбор карт.
pub fn split_card_codes(cards: &str) -> Vec<String> {
    let compact: Vec<char> = cards.chars().filter(|c| !c.is_whitespace()).collect();
    compact.chunks(2).map(|pair| pair.iter().collect()).collect()
}

/// Ответ на приём раздачи.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubmitHandResponse {
    pub message: String,
    pub id: String,
    pub payoffs: PayoffsById,
    pub status: SettlementStatus,
}

/// Сохранённая раздача для списка/просмотра.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredHandDto {
    pub id: String,
    pub payload: HandPayload,
    pub payoffs: Option<PayoffsById>,
    pub status: Option<SettlementStatus>,
    /// Порядковый номер сохранения (чем больше, тем новее).
    pub sequence: u64,
}
