//! Проверка пейлоада до запуска реплея: только форма данных, без правил игры.

use std::collections::HashSet;

use thiserror::Error;

use crate::api::dto::HandPayload;

pub const MIN_PLAYERS: usize = 2;
pub const MAX_PLAYERS: usize = 6;

/// Почему пейлоад отклонён.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum PayloadError {
    #[error("Пустой id раздачи")]
    EmptyHandId,

    #[error("Игроков должно быть от 2 до 6, передано {0}")]
    PlayerCount(usize),

    #[error("Повторяющийся id игрока: {0}")]
    DuplicatePlayerId(String),

    #[error("Некорректные карты игрока {player}: {cards:?}")]
    PlayerCards { player: String, cards: String },

    #[error("Некорректная карта борда: {0:?}")]
    CommunityCard(String),

    #[error("finalPot не может быть отрицательным: {0}")]
    NegativeFinalPot(i64),
}

/// Проверить форму пейлоада.
pub fn validate_payload(payload: &HandPayload) -> Result<(), PayloadError> {
    if payload.id.trim().is_empty() {
        return Err(PayloadError::EmptyHandId);
    }

    let count = payload.players.len();
    if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&count) {
        return Err(PayloadError::PlayerCount(count));
    }

    let mut ids = HashSet::with_capacity(count);
    for player in payload.players.iter() {
        if !ids.insert(player.id.as_str()) {
            return Err(PayloadError::DuplicatePlayerId(player.id.clone()));
        }
        if player.cards.trim().len() < 2 {
            return Err(PayloadError::PlayerCards {
                player: player.name.clone(),
                cards: player.cards.clone(),
            });
        }
    }

    if let Some(card) = payload.community_cards.iter().find(|c| c.trim().len() < 2) {
        return Err(PayloadError::CommunityCard(card.clone()));
    }

    if payload.final_pot < 0 {
        return Err(PayloadError::NegativeFinalPot(payload.final_pot));
    }

    Ok(())
}
