//! Движок реплея: разбор токенов, торговля, переход улиц, сайд-поты, расчёт.
//!
//! Высокоуровневый вход: `replay_hand` / `replay_hand_with_options`.
//! Стейт-машина раздачи – `HandState`, её можно крутить по токену
//! через `HandState::apply`.

pub mod actions;
pub mod betting;
pub mod errors;
pub mod hand_history;
pub mod positions;
pub mod pot;
pub mod replay;
pub mod settlement;
pub mod side_pots;
pub mod state;
pub mod validation;

pub use actions::{parse_action, Action, BoardReveal, PlayerActionKind, TokenError};
pub use betting::BettingState;
pub use errors::{BettingRule, ReplayError};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use positions::{normalize_seating, NormalizedSeat, Seating};
pub use pot::Pot;
pub use replay::{
    replay_hand, replay_hand_with_options, replay_state, HandEnd, IncompleteHandPolicy,
    PayoffsById, ReplayOptions, ReplayReport, SettlementStatus, ShowdownHand, UnknownTokenPolicy,
};
pub use settlement::{PotAward, Settlement};
pub use side_pots::{compute_side_pots, SidePot};
pub use state::HandState;
