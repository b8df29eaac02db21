//! Внешний API реплеера.
//!
//! Здесь описываются:
//! - DTO (dto.rs) – пейлоад раздачи в формате фронта и ответы;
//! - проверка формы пейлоада (validation.rs);
//! - сервис приёма/чтения раздач (service.rs);
//! - ошибки (errors.rs) – то, что видит клиент.

pub mod dto;
pub mod errors;
pub mod service;
pub mod validation;

pub use dto::*;
pub use errors::*;
pub use service::*;
pub use validation::*;
