use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::validation::PayloadError;
use crate::engine::ReplayError;
use crate::infra::StoreError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (битый JSON, не та форма пейлоада).
    #[error("Некорректный запрос: {0}")]
    BadRequest(String),

    /// Реплей раздачи не прошёл (нарушение правил, неполная раздача и т.п.).
    #[error("Ошибка реплея: {0}")]
    Replay(String),

    /// Раздача не найдена.
    #[error("Раздача {0} не найдена")]
    NotFound(String),

    /// Раздача с таким id уже сохранена.
    #[error("Раздача {0} уже сохранена")]
    Conflict(String),

    /// Внутренняя ошибка сервера.
    #[error("Внутренняя ошибка: {0}")]
    Internal(String),
}

impl From<PayloadError> for ApiError {
    fn from(err: PayloadError) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}

impl From<ReplayError> for ApiError {
    fn from(err: ReplayError) -> Self {
        ApiError::Replay(err.to_string())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(id) => ApiError::Conflict(id),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
