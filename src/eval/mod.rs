//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основные функции:
//!   `evaluate_best_hand(hole, board) -> HandStrength`
//!   `evaluate_cards(cards) -> HandStrength` (5–7 карт)

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{evaluate_best_hand, evaluate_cards, EvalError};
pub use hand_rank::{describe_hand, HandCategory, HandStrength};
