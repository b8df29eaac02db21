//! Сервис приёма раздач: проверить → пересчитать → сохранить.

use serde::{Deserialize, Serialize};

use crate::api::dto::{HandPayload, StoredHandDto, SubmitHandResponse};
use crate::api::errors::ApiError;
use crate::api::validation::validate_payload;
use crate::domain::TableConfig;
use crate::engine::{replay_hand_with_options, ReplayOptions, ReplayReport};
use crate::infra::{HandId, HandRecord, HandStore};

/// Конфиг сервиса: блайнды по умолчанию и режим реплея.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    pub table: TableConfig,
    #[serde(default)]
    pub options: ReplayOptions,
}

impl ServiceConfig {
    pub fn new(table: TableConfig) -> Self {
        Self {
            table,
            options: ReplayOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ReplayOptions) -> Self {
        self.options = options;
        self
    }
}

/// Проверить пейлоад и прогнать реплей, ничего не сохраняя.
pub fn replay_payload(config: &ServiceConfig, payload: &HandPayload) -> Result<ReplayReport, ApiError> {
    validate_payload(payload)?;

    let table = payload.table_config(&config.table);
    let report = replay_hand_with_options(
        &table,
        &payload.seating(),
        &payload.hole_cards(),
        payload.actions.as_slice(),
        &config.options,
    )?;
    Ok(report)
}

pub struct HandService<S: HandStore> {
    config: ServiceConfig,
    store: S,
}

impl<S: HandStore> HandService<S> {
    pub fn new(config: ServiceConfig, store: S) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Принять раздачу: реплей, затем сохранение вместе с выплатами.
    pub fn submit_hand(&mut self, payload: HandPayload) -> Result<SubmitHandResponse, ApiError> {
        let report = replay_payload(&self.config, &payload).map_err(|err| {
            tracing::warn!(hand = %payload.id, error = %err, "rejected hand");
            err
        })?;

        let record = HandRecord::new(payload, Some(report.payoffs.clone()), Some(report.status));
        let saved = self.store.save(record)?;

        tracing::info!(hand = %saved.id, sequence = saved.sequence, "hand saved");

        Ok(SubmitHandResponse {
            message: "Hand saved".to_string(),
            id: saved.id.0,
            payoffs: report.payoffs,
            status: report.status,
        })
    }

    /// То же, но из сырого JSON.
    pub fn submit_json(&mut self, body: &str) -> Result<SubmitHandResponse, ApiError> {
        let payload: HandPayload = serde_json::from_str(body)?;
        self.submit_hand(payload)
    }

    /// Все сохранённые раздачи, новые первыми.
    pub fn list_hands(&self) -> Vec<StoredHandDto> {
        self.store.list_all().iter().map(HandRecord::to_dto).collect()
    }

    pub fn get_hand(&self, id: &str) -> Result<StoredHandDto, ApiError> {
        let id = HandId::new(id);
        self.store
            .get(&id)
            .map(|record| record.to_dto())
            .ok_or(ApiError::NotFound(id.0))
    }
}
