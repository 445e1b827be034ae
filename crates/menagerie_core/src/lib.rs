//! Core domain logic for Menagerie.
//! This crate is the single source of truth for the animal collection.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use db::{ConnectOptions, ConnectionStatus, DbError, Gateway};
pub use logging::{default_log_level, init_logging, logging_status, LogTarget};
pub use model::animal::{Animal, AnimalFields, AnimalId, AnimalValidationError};
pub use model::seed::{starter_animals, STARTER_ANIMAL_COUNT};
pub use repo::animal_repo::{AnimalRepository, RepoError, RepoResult, SqliteAnimalRepository};
pub use service::animal_service::AnimalService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
