use std::collections::HashMap;

use thiserror::Error;

use crate::api::dto::{HandPayload, StoredHandDto};
use crate::engine::{PayoffsById, SettlementStatus};
use crate::infra::ids::{HandId, SequenceGenerator};

/// Ошибки хранилища раздач.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("Раздача {0} уже сохранена")]
    Duplicate(String),
}

/// Раздача в хранилище: исходный пейлоад + посчитанные выплаты.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandRecord {
    pub id: HandId,
    pub payload: HandPayload,
    pub payoffs: Option<PayoffsById>,
    pub status: Option<SettlementStatus>,
    /// Проставляет хранилище при сохранении.
    pub sequence: u64,
}

impl HandRecord {
    pub fn new(payload: HandPayload, payoffs: Option<PayoffsById>, status: Option<SettlementStatus>) -> Self {
        Self {
            id: HandId::new(&payload.id),
            payload,
            payoffs,
            status,
            sequence: 0,
        }
    }

    pub fn to_dto(&self) -> StoredHandDto {
        StoredHandDto {
            id: self.id.0.clone(),
            payload: self.payload.clone(),
            payoffs: self.payoffs.clone(),
            status: self.status,
            sequence: self.sequence,
        }
    }
}

/// Абстракция хранилища раздач.
///
/// Транзакционность и долговечность – забота реализации; движок про
/// хранилище ничего не знает.
pub trait HandStore {
    /// Вставить новую раздачу. Повторный id – `StoreError::Duplicate`.
    fn save(&mut self, record: HandRecord) -> Result<HandRecord, StoreError>;

    /// Все раздачи, новые первыми.
    fn list_all(&self) -> Vec<HandRecord>;

    /// Раздача по id.
    fn get(&self, id: &HandId) -> Option<HandRecord>;
}

/// Простая in-memory реализация для тестов и локального запуска.
#[derive(Debug, Default)]
pub struct InMemoryHandStore {
    hands: HashMap<HandId, HandRecord>,
    sequence: SequenceGenerator,
}

impl InMemoryHandStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.hands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hands.is_empty()
    }
}

impl HandStore for InMemoryHandStore {
    fn save(&mut self, mut record: HandRecord) -> Result<HandRecord, StoreError> {
        if self.hands.contains_key(&record.id) {
            return Err(StoreError::Duplicate(record.id.0.clone()));
        }

        record.sequence = self.sequence.next();
        self.hands.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn list_all(&self) -> Vec<HandRecord> {
        let mut all: Vec<HandRecord> = self.hands.values().cloned().collect();
        all.sort_by(|a, b| b.sequence.cmp(&a.sequence));
        all
    }

    fn get(&self, id: &HandId) -> Option<HandRecord> {
        self.hands.get(id).cloned()
    }
}
