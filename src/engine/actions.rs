use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{parse_card_run, Card, Chips, InvalidCardCode, Street};

/// Действие из входной последовательности токенов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum Action {
    /// `c` / `x`: уравнять ставку или чек, если уравнивать нечего.
    CheckOrCall,
    /// `f` / `F` без `[`.
    Fold,
    /// `r<N>` / `b<N>`: довести свою ставку на улице ДО N фишек (не прирост).
    BetOrRaiseTo(Chips),
    /// `F[..]`, `T[..]`, `R[..]`: открыть карты борда.
    Reveal(BoardReveal),
}

/// Открытие карт борда. Количество карт проверяет стейт-машина.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BoardReveal {
    /// Улица, которая начинается после открытия.
    pub street: Street,
    pub cards: Vec<Card>,
}

/// Как движок на самом деле применил действие игрока (для истории).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerActionKind {
    Fold,
    Check,
    /// Уравнивание; `paid` – сколько реально доставлено (меньше при олл-ине).
    Call { paid: Chips, all_in: bool },
    /// Первая ставка на улице.
    Bet { to: Chips, all_in: bool },
    /// Рейз; `reopens == false` для неполного олл-ин рейза.
    RaiseTo { to: Chips, all_in: bool, reopens: bool },
}

/// Ошибки разбора токена.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Неизвестный токен действия: {0:?}")]
    Unknown(String),

    #[error(transparent)]
    InvalidCard(#[from] InvalidCardCode),
}

/// Разобрать один токен действия.
///
/// Грамматика:
///   - `c`, `x` (любой регистр) → CheckOrCall
///   - `f`, `F` без последующей `[` → Fold
///   - `r<цифры>`, `b<цифры>` → BetOrRaiseTo
///   - `F[<3 карты>]`, `T[<карта>]`, `R[<карта>]` → Reveal
pub fn parse_action(token: &str) -> Result<Action, TokenError> {
    match token {
        "c" | "C" | "x" | "X" => return Ok(Action::CheckOrCall),
        "f" | "F" => return Ok(Action::Fold),
        _ => {}
    }

    if let Some(amount) = token.strip_prefix('r').or_else(|| token.strip_prefix('b')) {
        return parse_amount(amount)
            .map(|a| Action::BetOrRaiseTo(Chips(a)))
            .ok_or_else(|| TokenError::Unknown(token.to_string()));
    }

    if let Some(reveal) = parse_reveal(token)? {
        return Ok(Action::Reveal(reveal));
    }

    Err(TokenError::Unknown(token.to_string()))
}

/// Только десятичные цифры, без знака и пробелов.
fn parse_amount(digits: &str) -> Option<u64> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// `None`, если токен вообще не похож на открытие карт.
fn parse_reveal(token: &str) -> Result<Option<BoardReveal>, TokenError> {
    let street = if token.starts_with("F[") {
        Street::Flop
    } else if token.starts_with("T[") {
        Street::Turn
    } else if token.starts_with("R[") {
        Street::River
    } else {
        return Ok(None);
    };

    let Some(inner) = token[2..].strip_suffix(']') else {
        return Err(TokenError::Unknown(token.to_string()));
    };

    let cards = parse_card_run(inner)?;
    Ok(Some(BoardReveal { street, cards }))
}
