use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;

/// Банк раздачи: всего и по улицам. Разбивку по уровням даёт `side_pots`.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pot {
    pub total: Chips,
    /// Внесено на preflop/flop/turn/river.
    pub by_street: [Chips; 4],
}

impl Pot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, street: Street, amount: Chips) {
        self.total += amount;
        self.by_street[street_slot(street)] += amount;
    }

    pub fn street_total(&self, street: Street) -> Chips {
        self.by_street[street_slot(street)]
    }
}

fn street_slot(street: Street) -> usize {
    match street {
        Street::Preflop => 0,
        Street::Flop => 1,
        Street::Turn => 2,
        Street::River => 3,
    }
}
