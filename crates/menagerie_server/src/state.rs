//! Shared request state.

use std::sync::Arc;

use menagerie_core::{AnimalService, Gateway, RepoResult, SqliteAnimalRepository};

use crate::error::Result;

/// Handle passed to every route handler.
#[derive(Clone)]
pub struct AppState {
    gateway: Arc<Gateway>,
}

impl AppState {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// Runs one service operation on the blocking pool.
    ///
    /// The calling handler suspends until the store replies; the operation
    /// holds the connection for its whole duration.
    pub async fn run<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: for<'c> FnOnce(&AnimalService<SqliteAnimalRepository<'c>>) -> RepoResult<T>
            + Send
            + 'static,
    {
        let gateway = Arc::clone(&self.gateway);
        let outcome = tokio::task::spawn_blocking(move || {
            gateway.with_connection(|conn| {
                let service = AnimalService::new(SqliteAnimalRepository::new(conn));
                op(&service)
            })
        })
        .await?;
        Ok(outcome?)
    }
}
