//! Раздача банков победителям и пересчёт в чистый выигрыш/проигрыш.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{Chips, SeatIndex};
use crate::engine::side_pots::SidePot;
use crate::eval::HandStrength;

/// Кто и сколько получил из одного банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub pot_index: usize,
    pub amount: Chips,
    pub winners: Vec<(SeatIndex, Chips)>,
}

/// Итог раздачи банков.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settlement {
    pub awards: Vec<PotAward>,
    /// Сколько всего получил каждый seat (только получившие).
    pub totals: BTreeMap<SeatIndex, Chips>,
}

impl Settlement {
    fn record(&mut self, award: PotAward) {
        for (seat, amount) in award.winners.iter() {
            *self.totals.entry(*seat).or_insert(Chips::ZERO) += *amount;
        }
        self.awards.push(award);
    }

    pub fn awarded_to(&self, seat: SeatIndex) -> Chips {
        self.totals.get(&seat).copied().unwrap_or(Chips::ZERO)
    }
}

/// Поделить банк поровну; нечётные фишки по одной, начиная с младшего seat.
pub fn split_pot(pot_index: usize, amount: Chips, winners: &[SeatIndex]) -> PotAward {
    let mut sorted = winners.to_vec();
    sorted.sort_unstable();
    sorted.dedup();

    if sorted.is_empty() {
        return PotAward {
            pot_index,
            amount,
            winners: Vec::new(),
        };
    }

    let count = sorted.len() as u64;
    let share = amount.0 / count;
    let mut remainder = amount.0 % count;

    let winners = sorted
        .into_iter()
        .map(|seat| {
            let mut prize = share;
            if remainder > 0 {
                prize += 1;
                remainder -= 1;
            }
            (seat, Chips(prize))
        })
        .collect();

    PotAward {
        pot_index,
        amount,
        winners,
    }
}

/// Лучшие руки среди претендентов банка (несколько – при ничьей).
pub fn best_hands(eligible: &[SeatIndex], strengths: &BTreeMap<SeatIndex, HandStrength>) -> Vec<SeatIndex> {
    let best = eligible.iter().filter_map(|s| strengths.get(s)).max();
    match best {
        Some(best) => eligible
            .iter()
            .filter(|s| strengths.get(s) == Some(best))
            .copied()
            .collect(),
        None => Vec::new(),
    }
}

/// Шоудаун: каждый уровень забирают сильнейшие руки среди его претендентов.
pub fn award_by_strength(pots: &[SidePot], strengths: &BTreeMap<SeatIndex, HandStrength>) -> Settlement {
    let mut settlement = Settlement::default();
    for (idx, pot) in pots.iter().enumerate() {
        let winners = best_hands(&pot.eligible_seats, strengths);
        settlement.record(split_pot(idx, pot.amount, &winners));
    }
    settlement
}

/// Без сравнения рук: уровень делится поровну между всеми претендентами.
/// Для единственного оставшегося игрока это просто «забрал всё».
pub fn award_evenly(pots: &[SidePot]) -> Settlement {
    let mut settlement = Settlement::default();
    for (idx, pot) in pots.iter().enumerate() {
        settlement.record(split_pot(idx, pot.amount, &pot.eligible_seats));
    }
    settlement
}

/// Чистый результат: получено − внесено. Для каждого seat из `contributions`.
pub fn net_payoffs(settlement: &Settlement, contributions: &BTreeMap<SeatIndex, Chips>) -> BTreeMap<SeatIndex, i64> {
    contributions
        .iter()
        .map(|(seat, contributed)| (*seat, settlement.awarded_to(*seat).signed_diff(*contributed)))
        .collect()
}
