//! Детерминированный реплей раздач No-Limit Texas Hold'em.
//!
//! На вход: блайнды, рассадка, карманные карты и последовательность токенов
//! действий. На выход: чистый выигрыш/проигрыш каждого игрока.
//!
//! Слои:
//! - `domain` – карты, фишки, игроки, рассадка;
//! - `eval` – оценка силы рук;
//! - `engine` – стейт-машина раздачи и расчёт банков;
//! - `api` – JSON-пейлоад и сервис приёма раздач;
//! - `infra` – хранилище раздач и идентификаторы.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;

pub use engine::{replay_hand, replay_hand_with_options, PayoffsById, ReplayError, ReplayOptions, ReplayReport};
