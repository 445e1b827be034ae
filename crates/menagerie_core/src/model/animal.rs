//! Animal domain model.
//!
//! # Responsibility
//! - Define the canonical animal record stored in the `animals` collection.
//! - Define the partial field set used by create and update paths.
//!
//! # Invariants
//! - `id` is stable and never reused for another animal.
//! - No descriptive field is required; absence is represented as `None`.
//! - `life_expectancy` is finite whenever it is set.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier assigned by persistence at creation time.
pub type AnimalId = Uuid;

/// Validation errors for animal records.
#[derive(Debug, Clone, PartialEq)]
pub enum AnimalValidationError {
    /// Nil UUID cannot identify a stored record.
    NilId,
    /// `life_expectancy` is NaN or infinite.
    NonFiniteLifeExpectancy(f64),
}

impl Display for AnimalValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "animal id must not be nil"),
            Self::NonFiniteLifeExpectancy(value) => {
                write!(f, "life expectancy must be a finite number, got {value}")
            }
        }
    }
}

impl Error for AnimalValidationError {}

/// Descriptive fields of an animal, every one optional.
///
/// Used as the create payload (absent fields are stored as NULL) and as the
/// update payload (absent fields are left untouched).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimalFields {
    pub species: Option<String>,
    pub extinct: Option<bool>,
    pub location: Option<String>,
    pub life_expectancy: Option<f64>,
}

impl AnimalFields {
    /// Builds a fully populated field set.
    pub fn new(
        species: impl Into<String>,
        extinct: bool,
        location: impl Into<String>,
        life_expectancy: f64,
    ) -> Self {
        Self {
            species: Some(species.into()),
            extinct: Some(extinct),
            location: Some(location.into()),
            life_expectancy: Some(life_expectancy),
        }
    }

    /// Validates typed field constraints.
    pub fn validate(&self) -> Result<(), AnimalValidationError> {
        match self.life_expectancy {
            Some(value) if !value.is_finite() => {
                Err(AnimalValidationError::NonFiniteLifeExpectancy(value))
            }
            _ => Ok(()),
        }
    }
}

/// Canonical animal record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Animal {
    pub id: AnimalId,
    pub species: Option<String>,
    pub extinct: Option<bool>,
    pub location: Option<String>,
    /// Expected lifespan in years.
    pub life_expectancy: Option<f64>,
}

impl Animal {
    /// Creates a new animal with a generated stable ID.
    pub fn new(fields: AnimalFields) -> Self {
        Self::from_parts(Uuid::new_v4(), fields)
    }

    /// Creates an animal with a caller-provided stable ID.
    ///
    /// # Errors
    /// - Returns `NilId` when `id` is nil.
    /// - Returns field validation errors from [`AnimalFields::validate`].
    pub fn with_id(id: AnimalId, fields: AnimalFields) -> Result<Self, AnimalValidationError> {
        let animal = Self::from_parts(id, fields);
        animal.validate()?;
        Ok(animal)
    }

    fn from_parts(id: AnimalId, fields: AnimalFields) -> Self {
        Self {
            id,
            species: fields.species,
            extinct: fields.extinct,
            location: fields.location,
            life_expectancy: fields.life_expectancy,
        }
    }

    /// Overwrites every field present in `fields`; absent fields keep their value.
    pub fn apply(&mut self, fields: &AnimalFields) {
        if let Some(species) = &fields.species {
            self.species = Some(species.clone());
        }
        if let Some(extinct) = fields.extinct {
            self.extinct = Some(extinct);
        }
        if let Some(location) = &fields.location {
            self.location = Some(location.clone());
        }
        if let Some(life_expectancy) = fields.life_expectancy {
            self.life_expectancy = Some(life_expectancy);
        }
    }

    /// Returns the descriptive fields of this record.
    pub fn fields(&self) -> AnimalFields {
        AnimalFields {
            species: self.species.clone(),
            extinct: self.extinct,
            location: self.location.clone(),
            life_expectancy: self.life_expectancy,
        }
    }

    /// Validates identity and field constraints.
    pub fn validate(&self) -> Result<(), AnimalValidationError> {
        if self.id.is_nil() {
            return Err(AnimalValidationError::NilId);
        }
        self.fields().validate()
    }
}
