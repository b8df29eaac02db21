use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::table::SeatIndex;

/// Статус игрока в текущей раздаче.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен и может действовать.
    Active,
    /// Игрок сфолдил; его фишки остаются в банке.
    Folded,
    /// Игрок в олл-ине – не может больше делать ставки.
    AllIn,
}

/// Игрок внутри движка: создаётся один раз на раздачу из нормализованной рассадки.
///
/// Инвариант: `stack + committed == starting_stack`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeatedPlayer {
    /// Плотный индекс места (0 = малый блайнд).
    pub seat: SeatIndex,
    /// Внешний идентификатор игрока (для итоговых выплат).
    pub external_id: String,
    pub display_name: String,
    pub starting_stack: Chips,
    /// Остаток стека.
    pub stack: Chips,
    pub hole_cards: [Card; 2],
    /// Ставка на текущей улице.
    pub street_bet: Chips,
    /// Сколько всего внесено за раздачу.
    pub committed: Chips,
    pub status: PlayerStatus,
}

impl SeatedPlayer {
    pub fn new(
        seat: SeatIndex,
        external_id: String,
        display_name: String,
        starting_stack: Chips,
        hole_cards: [Card; 2],
    ) -> Self {
        Self {
            seat,
            external_id,
            display_name,
            starting_stack,
            stack: starting_stack,
            hole_cards,
            street_bet: Chips::ZERO,
            committed: Chips::ZERO,
            status: PlayerStatus::Active,
        }
    }

    /// Ещё претендует на банк (не сфолдил).
    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    /// Может делать ходы (не сфолдил и не в олл-ине).
    pub fn can_act(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Максимум, до которого игрок может довести ставку на этой улице.
    pub fn max_street_total(&self) -> Chips {
        self.street_bet + self.stack
    }

    /// Перенести фишки из стека в банк, не больше остатка стека.
    /// Возвращает реально внесённую сумму.
    pub fn commit(&mut self, amount: Chips) -> Chips {
        let paid = amount.min(self.stack);
        self.stack -= paid;
        self.street_bet += paid;
        self.committed += paid;
        if self.stack.is_zero() && self.status == PlayerStatus::Active {
            self.status = PlayerStatus::AllIn;
        }
        paid
    }
}
