//! Инфраструктурный слой вокруг движка реплея:
//! - идентификаторы и счётчики;
//! - абстракция хранения раздач (in-memory для тестов и CLI).

pub mod ids;
pub mod persistence;

pub use ids::*;
pub use persistence::*;
