use thiserror::Error;

use crate::domain::card::{first_duplicate, Card, Rank};

use super::hand_rank::{HandCategory, HandStrength};
use super::lookup_tables::{detect_straight, rank_to_bit, straight_ranks, RankMask};

/// Ошибки входа evaluator'а.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum EvalError {
    #[error("Для оценки нужно от 5 до 7 карт, передано {0}")]
    WrongCardCount(usize),

    #[error("Карта {0} встречается дважды")]
    DuplicateCard(Card),
}

/// Вычислить лучшую 5-карточную руку из hole + board.
pub fn evaluate_best_hand(hole: &[Card], board: &[Card]) -> Result<HandStrength, EvalError> {
    let mut all_cards = Vec::with_capacity(hole.len() + board.len());
    all_cards.extend_from_slice(hole);
    all_cards.extend_from_slice(board);
    evaluate_cards(&all_cards)
}

/// Лучшая 5-карточная комбинация из 5–7 различных карт.
///
/// Результат не зависит от порядка карт на входе.
pub fn evaluate_cards(cards: &[Card]) -> Result<HandStrength, EvalError> {
    if !(5..=7).contains(&cards.len()) {
        return Err(EvalError::WrongCardCount(cards.len()));
    }
    if let Some(dup) = first_duplicate(cards) {
        return Err(EvalError::DuplicateCard(dup));
    }

    // Канонический порядок: от старшего ранга к младшему, затем по масти.
    let mut sorted = cards.to_vec();
    sorted.sort_by(|a, b| b.rank.cmp(&a.rank).then(b.suit.cmp(&a.suit)));

    Ok(best_of_all_5card_combinations(&sorted))
}

/// Перебираем все комбинации 5 карт из N (N=5–7) и выбираем лучшую.
fn best_of_all_5card_combinations(cards: &[Card]) -> HandStrength {
    let n = cards.len();
    let mut best = evaluate_5card_hand([cards[0], cards[1], cards[2], cards[3], cards[4]]);

    for a in 0..(n - 4) {
        for b in (a + 1)..(n - 3) {
            for c in (b + 1)..(n - 2) {
                for d in (c + 1)..(n - 1) {
                    for e in (d + 1)..n {
                        let r = evaluate_5card_hand([cards[a], cards[b], cards[c], cards[d], cards[e]]);
                        if r > best {
                            best = r;
                        }
                    }
                }
            }
        }
    }

    best
}

/// Оценка строго 5-карточной комбинации.
fn evaluate_5card_hand(cards: [Card; 5]) -> HandStrength {
    let mut rank_counts = [0u8; 15]; // используем индексы 2..14
    let mut rank_mask: RankMask = 0;

    for card in cards.iter() {
        rank_counts[card.rank.value() as usize] += 1;
        rank_mask |= rank_to_bit(card.rank);
    }

    let is_flush = cards.iter().all(|c| c.suit == cards[0].suit);
    let straight_high = detect_straight(rank_mask);

    if let Some(high) = straight_high {
        let ranks = straight_ranks(high);
        let ordered = order_by_ranks(&cards, &ranks);
        let category = if is_flush {
            HandCategory::StraightFlush
        } else {
            HandCategory::Straight
        };
        return HandStrength::new(category, ranks, ordered);
    }

    // Карты по группам: сначала больше совпадений, затем старше ранг.
    let mut ordered = cards;
    ordered.sort_by(|a, b| {
        let ca = rank_counts[a.rank.value() as usize];
        let cb = rank_counts[b.rank.value() as usize];
        cb.cmp(&ca)
            .then(b.rank.cmp(&a.rank))
            .then(b.suit.cmp(&a.suit))
    });

    // Различные ранги в порядке групп, хвост добиваем двойками (в ранг не попадут).
    let mut ranks = [Rank::Two; 5];
    let mut distinct = 0;
    for card in ordered.iter() {
        if distinct == 0 || ranks[distinct - 1] != card.rank {
            ranks[distinct] = card.rank;
            distinct += 1;
        }
    }

    // Паттерн совпадений, например [4,1], [3,2], [2,2,1].
    let pattern: Vec<u8> = ranks[..distinct]
        .iter()
        .map(|r| rank_counts[r.value() as usize])
        .collect();

    let category = match pattern.as_slice() {
        [4, 1] => HandCategory::FourOfAKind,
        [3, 2] => HandCategory::FullHouse,
        _ if is_flush => HandCategory::Flush,
        [3, 1, 1] => HandCategory::ThreeOfAKind,
        [2, 2, 1] => HandCategory::TwoPair,
        [2, 1, 1, 1] => HandCategory::OnePair,
        _ => HandCategory::HighCard,
    };

    HandStrength::new(category, ranks, ordered)
}

/// Расставить карты стрита в порядке его рангов (у wheel туз в конце).
fn order_by_ranks(cards: &[Card; 5], ranks: &[Rank; 5]) -> [Card; 5] {
    let mut ordered = *cards;
    for (slot, rank) in ordered.iter_mut().zip(ranks.iter()) {
        if let Some(card) = cards.iter().find(|c| c.rank == *rank) {
            *slot = *card;
        }
    }
    ordered
}
