//! Animal use-case service.
//!
//! # Responsibility
//! - Provide stable CRUD entry points for route handlers.
//! - Reset the collection to the starter dataset.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::animal::{Animal, AnimalFields, AnimalId};
use crate::model::seed::starter_animals;
use crate::repo::animal_repo::{AnimalRepository, RepoResult};
use log::{info, warn};

/// Use-case service wrapper for animal CRUD operations.
pub struct AnimalService<R: AnimalRepository> {
    repo: R,
}

impl<R: AnimalRepository> AnimalService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists every animal in creation order.
    pub fn list_animals(&self) -> RepoResult<Vec<Animal>> {
        self.repo.find_all()
    }

    pub fn get_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>> {
        self.repo.find_by_id(id)
    }

    /// Creates one animal from submitted fields.
    pub fn create_animal(&self, fields: &AnimalFields) -> RepoResult<Animal> {
        let animal = self.repo.create(fields)?;
        info!(
            "event=animal_create module=service status=ok animal_id={}",
            animal.id
        );
        Ok(animal)
    }

    /// Overwrites the present fields of an existing animal.
    ///
    /// Returns `Ok(None)` when the animal does not exist.
    pub fn update_animal(
        &self,
        id: AnimalId,
        fields: &AnimalFields,
    ) -> RepoResult<Option<Animal>> {
        let updated = self.repo.update_by_id(id, fields)?;
        match &updated {
            Some(_) => info!("event=animal_update module=service status=ok animal_id={id}"),
            None => warn!("event=animal_update module=service status=not_found animal_id={id}"),
        }
        Ok(updated)
    }

    /// Deletes an animal and returns its prior value.
    pub fn delete_animal(&self, id: AnimalId) -> RepoResult<Option<Animal>> {
        let deleted = self.repo.delete_by_id(id)?;
        match &deleted {
            Some(_) => info!("event=animal_delete module=service status=ok animal_id={id}"),
            None => warn!("event=animal_delete module=service status=not_found animal_id={id}"),
        }
        Ok(deleted)
    }

    /// Wipes the collection and recreates the starter dataset.
    ///
    /// # Contract
    /// - Running this twice leaves exactly the starter records.
    /// - Returns created records in starter order.
    /// - A failed reseed keeps the previous collection.
    pub fn reseed(&self) -> RepoResult<Vec<Animal>> {
        let (removed, created) = self.repo.replace_all(&starter_animals())?;
        info!(
            "event=animal_seed module=service status=ok removed={} created={}",
            removed,
            created.len()
        );
        Ok(created)
    }
}
