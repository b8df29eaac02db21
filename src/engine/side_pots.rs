use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex};

/// Сайд-пот: часть банка, в которую участвуют только некоторые игроки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePot {
    pub amount: Chips,
    /// Кто может выиграть этот уровень (по возрастанию seat).
    pub eligible_seats: Vec<SeatIndex>,
}

/// Посчитать сайд-поты из сумм, которые внесли игроки.
///
/// Вход: `contributions[seat]` – сколько суммарно фишек поставил игрок за раздачу
/// (включая сфолдивших), `live` – кто не сфолдил.
/// Выход: список уровней от младших к старшим. Сумма уровней равна сумме вкладов.
///
/// Фишки сфолдивших попадают в уровни, но права на них не дают. Уровень, где не
/// осталось ни одного живого претендента, доливается в ближайший младший.
pub fn compute_side_pots(contributions: &BTreeMap<SeatIndex, Chips>, live: &[SeatIndex]) -> Vec<SidePot> {
    let mut levels: Vec<Chips> = contributions
        .values()
        .copied()
        .filter(|c| !c.is_zero())
        .collect();
    levels.sort_unstable();
    levels.dedup();

    let mut pots: Vec<SidePot> = Vec::new();
    let mut prev_level = Chips::ZERO;
    let mut orphan = Chips::ZERO;

    for level in levels {
        let level_diff = level - prev_level;

        // Все игроки, у кого вклад >= level, участвуют в этом уровне.
        let contributors: Vec<SeatIndex> = contributions
            .iter()
            .filter(|(_, c)| **c >= level)
            .map(|(seat, _)| *seat)
            .collect();

        let amount = Chips(level_diff.0 * contributors.len() as u64) + orphan;
        orphan = Chips::ZERO;

        let eligible: Vec<SeatIndex> = contributors
            .into_iter()
            .filter(|seat| live.contains(seat))
            .collect();

        if eligible.is_empty() {
            match pots.last_mut() {
                Some(lower) => lower.amount += amount,
                None => orphan = amount,
            }
        } else {
            pots.push(SidePot {
                amount,
                eligible_seats: eligible,
            });
        }

        prev_level = level;
    }

    // Живых нет вообще – вернуть банк без претендентов, чтобы сумма сошлась.
    if !orphan.is_zero() {
        pots.push(SidePot {
            amount: orphan,
            eligible_seats: Vec::new(),
        });
    }

    pots
}
