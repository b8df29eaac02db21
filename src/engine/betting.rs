use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;

/// Состояние раунда ставок (на конкретной улице).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingState {
    /// Улица, к которой относится этот раунд.
    pub street: Street,
    /// Текущая целевая ставка, до которой должны дотянуться игроки (BB, bet, raise).
    pub current_bet: Chips,
    /// Минимальный размер повышающей части рейза.
    pub min_raise: Chips,
    /// Seat последнего агрессора (bet/raise/all-in).
    pub last_aggressor: Option<SeatIndex>,
    /// Очередь ходящих (по кругу), кто ещё должен сделать действие на этой улице.
    pub to_act: Vec<SeatIndex>,
    /// Кто после неполного олл-ин рейза может только call/fold.
    pub locked: Vec<SeatIndex>,
    /// Цель ставки на момент последнего хода каждого seat на этой улице.
    pub acted_at: BTreeMap<SeatIndex, Chips>,
}

impl BettingState {
    pub fn new(street: Street, current_bet: Chips, min_raise: Chips, to_act: Vec<SeatIndex>) -> Self {
        Self {
            street,
            current_bet,
            min_raise,
            last_aggressor: None,
            to_act,
            locked: Vec::new(),
            acted_at: BTreeMap::new(),
        }
    }

    /// Чей сейчас ход.
    pub fn actor(&self) -> Option<SeatIndex> {
        self.to_act.first().copied()
    }

    /// Удалить seat из очереди to_act и запомнить, против какой ставки он ходил.
    pub fn mark_acted(&mut self, seat: SeatIndex) {
        self.to_act.retain(|s| *s != seat);
        self.acted_at.insert(seat, self.current_bet);
    }

    pub fn is_locked(&self, seat: SeatIndex) -> bool {
        self.locked.contains(&seat)
    }

    /// Полный bet/raise: новая цель, новый минимальный шаг, все снова ходят.
    pub fn on_full_raise(&mut self, seat: SeatIndex, new_bet: Chips, raise_size: Chips, new_to_act: Vec<SeatIndex>) {
        self.current_bet = new_bet;
        self.min_raise = raise_size;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
        self.locked.clear();
    }

    /// Неполный олл-ин рейз: цель растёт, шаг прежний.
    ///
    /// Игрок, который уже ходил, может перерейзить, только если с его хода
    /// цель выросла хотя бы на полный рейз (несколько неполных олл-инов
    /// складываются). Иначе ему остаются call/fold.
    pub fn on_short_all_in(&mut self, seat: SeatIndex, new_bet: Chips, new_to_act: Vec<SeatIndex>) {
        let min_raise = self.min_raise;
        self.locked = new_to_act
            .iter()
            .copied()
            .filter(|s| {
                self.acted_at
                    .get(s)
                    .is_some_and(|faced| new_bet - *faced < min_raise)
            })
            .collect();
        self.current_bet = new_bet;
        self.last_aggressor = Some(seat);
        self.to_act = new_to_act;
    }

    /// Проверка, завершён ли раунд ставок:
    /// - очередь пуста.
    pub fn is_round_complete(&self) -> bool {
        self.to_act.is_empty()
    }
}
