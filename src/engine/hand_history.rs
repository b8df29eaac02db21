use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{HandPhase, Street};
use crate::domain::SeatIndex;
use crate::engine::actions::PlayerActionKind;
use crate::eval::HandCategory;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum HandEventKind {
    /// Кнопка/блайнды (суммы – реально поставленные, с учётом короткого стека).
    BlindsPosted {
        button: SeatIndex,
        small_blind: (SeatIndex, Chips),
        big_blind: (SeatIndex, Chips),
    },

    /// Действие игрока, как его применил движок.
    PlayerActed {
        action_index: usize,
        seat: SeatIndex,
        action: PlayerActionKind,
        new_stack: Chips,
        pot_after: Chips,
    },

    /// Открыты общие карты на борде.
    BoardDealt {
        action_index: usize,
        street: Street,
        cards: Vec<Card>,
    },

    /// Переход на новую улицу.
    StreetChanged { street: Street },

    /// Токен пропущен в нестрогом режиме.
    TokenSkipped { action_index: usize, token: String },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        hole_cards: [Card; 2],
        category: HandCategory,
        rank_value: u32,
    },

    /// Выплата из банка `pot_index`.
    PotAwarded {
        pot_index: usize,
        seat: SeatIndex,
        amount: Chips,
    },

    /// Раздача завершена.
    HandFinished { phase: HandPhase },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Только действия игроков, в порядке применения.
    pub fn player_actions(&self) -> impl Iterator<Item = (SeatIndex, &PlayerActionKind)> {
        self.events.iter().filter_map(|e| match &e.kind {
            HandEventKind::PlayerActed { seat, action, .. } => Some((*seat, action)),
            _ => None,
        })
    }
}
