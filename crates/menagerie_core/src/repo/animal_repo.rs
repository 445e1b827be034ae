//! Animal repository contracts and SQLite implementation.
//!
//! # Responsibility
//! - Provide the queryable `animals` collection handle.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Write paths validate typed fields before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Listing order is creation order (`seq ASC`).
//! - Not-found is reported as `Ok(None)`, never as an error.

use crate::db::DbError;
use crate::model::animal::{Animal, AnimalFields, AnimalId, AnimalValidationError};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const ANIMAL_SELECT_SQL: &str = "SELECT
    id,
    species,
    extinct,
    location,
    life_expectancy
FROM animals";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for animal persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(AnimalValidationError),
    Db(DbError),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted animal data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<AnimalValidationError> for RepoError {
    fn from(value: AnimalValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the animal collection.
pub trait AnimalRepository {
    fn find_all(&self) -> RepoResult<Vec<Animal>>;
    fn find_by_id(&self, id: AnimalId) -> RepoResult<Option<Animal>>;
    fn create(&self, fields: &AnimalFields) -> RepoResult<Animal>;
    /// Inserts all records in one transaction, preserving input order.
    fn create_many(&self, batch: &[AnimalFields]) -> RepoResult<Vec<Animal>>;
    /// Returns the post-update record, or `None` when `id` is unknown.
    fn update_by_id(&self, id: AnimalId, fields: &AnimalFields) -> RepoResult<Option<Animal>>;
    /// Returns the deleted record, or `None` when `id` is unknown.
    fn delete_by_id(&self, id: AnimalId) -> RepoResult<Option<Animal>>;
    /// Returns the number of removed records.
    fn delete_all(&self) -> RepoResult<usize>;
    /// Swaps the whole collection for `batch` in one transaction.
    ///
    /// Returns the number of removed records and the created ones. On error
    /// the previous collection is left as it was.
    fn replace_all(&self, batch: &[AnimalFields]) -> RepoResult<(usize, Vec<Animal>)>;
}

/// SQLite-backed animal repository.
pub struct SqliteAnimalRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAnimalRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl AnimalRepository for SqliteAnimalRepository<'_> {
    fn find_all(&self) -> RepoResult<Vec<Animal>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{ANIMAL_SELECT_SQL} ORDER BY seq ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut animals = Vec::new();

        while let Some(row) = rows.next()? {
            animals.push(parse_animal_row(row)?);
        }

        Ok(animals)
    }

    fn find_by_id(&self, id: AnimalId) -> RepoResult<Option<Animal>> {
        select_by_id(self.conn, id)
    }

    fn create(&self, fields: &AnimalFields) -> RepoResult<Animal> {
        insert_animal(self.conn, fields)
    }

    fn create_many(&self, batch: &[AnimalFields]) -> RepoResult<Vec<Animal>> {
        validate_batch(batch)?;

        let tx = self.conn.unchecked_transaction()?;
        let created = insert_batch(&tx, batch)?;
        tx.commit()?;

        Ok(created)
    }

    fn update_by_id(&self, id: AnimalId, fields: &AnimalFields) -> RepoResult<Option<Animal>> {
        fields.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let Some(mut animal) = select_by_id(&tx, id)? else {
            return Ok(None);
        };
        animal.apply(fields);
        animal.validate()?;

        tx.execute(
            "UPDATE animals
             SET
                species = ?1,
                extinct = ?2,
                location = ?3,
                life_expectancy = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE id = ?5;",
            params![
                animal.species.as_deref(),
                animal.extinct.map(bool_to_int),
                animal.location.as_deref(),
                animal.life_expectancy,
                animal.id.to_string(),
            ],
        )?;
        tx.commit()?;

        Ok(Some(animal))
    }

    fn delete_by_id(&self, id: AnimalId) -> RepoResult<Option<Animal>> {
        let tx = self.conn.unchecked_transaction()?;
        let Some(animal) = select_by_id(&tx, id)? else {
            return Ok(None);
        };

        tx.execute("DELETE FROM animals WHERE id = ?1;", [id.to_string()])?;
        tx.commit()?;

        Ok(Some(animal))
    }

    fn delete_all(&self) -> RepoResult<usize> {
        let removed = self.conn.execute("DELETE FROM animals;", [])?;
        Ok(removed)
    }

    fn replace_all(&self, batch: &[AnimalFields]) -> RepoResult<(usize, Vec<Animal>)> {
        validate_batch(batch)?;

        let tx = self.conn.unchecked_transaction()?;
        let removed = tx.execute("DELETE FROM animals;", [])?;
        let created = insert_batch(&tx, batch)?;
        tx.commit()?;

        Ok((removed, created))
    }
}

// A bad record must not leave a partial batch behind.
fn validate_batch(batch: &[AnimalFields]) -> RepoResult<()> {
    for fields in batch {
        fields.validate()?;
    }
    Ok(())
}

fn insert_batch(conn: &Connection, batch: &[AnimalFields]) -> RepoResult<Vec<Animal>> {
    batch.iter().map(|fields| insert_animal(conn, fields)).collect()
}

fn select_by_id(conn: &Connection, id: AnimalId) -> RepoResult<Option<Animal>> {
    let mut stmt = conn.prepare(&format!("{ANIMAL_SELECT_SQL} WHERE id = ?1;"))?;
    let raw = stmt
        .query_row([id.to_string()], |row| Ok(read_raw_row(row)))
        .optional()?;

    match raw {
        Some(raw) => Ok(Some(raw?.into_animal()?)),
        None => Ok(None),
    }
}

fn insert_animal(conn: &Connection, fields: &AnimalFields) -> RepoResult<Animal> {
    let animal = Animal::new(fields.clone());
    animal.validate()?;

    conn.execute(
        "INSERT INTO animals (
            id,
            species,
            extinct,
            location,
            life_expectancy
        ) VALUES (?1, ?2, ?3, ?4, ?5);",
        params![
            animal.id.to_string(),
            animal.species.as_deref(),
            animal.extinct.map(bool_to_int),
            animal.location.as_deref(),
            animal.life_expectancy,
        ],
    )?;

    Ok(animal)
}

/// Column values as stored, before typed decoding.
struct RawAnimalRow {
    id: String,
    species: Option<String>,
    extinct: Option<i64>,
    location: Option<String>,
    life_expectancy: Option<f64>,
}

impl RawAnimalRow {
    fn into_animal(self) -> RepoResult<Animal> {
        let id = Uuid::parse_str(&self.id).map_err(|_| {
            RepoError::InvalidData(format!("invalid id value `{}` in animals.id", self.id))
        })?;

        let extinct = match self.extinct {
            None => None,
            Some(0) => Some(false),
            Some(1) => Some(true),
            Some(other) => {
                return Err(RepoError::InvalidData(format!(
                    "invalid extinct value `{other}` in animals.extinct"
                )));
            }
        };

        let animal = Animal::with_id(
            id,
            AnimalFields {
                species: self.species,
                extinct,
                location: self.location,
                life_expectancy: self.life_expectancy,
            },
        )?;
        Ok(animal)
    }
}

fn read_raw_row(row: &Row<'_>) -> RepoResult<RawAnimalRow> {
    Ok(RawAnimalRow {
        id: row.get("id")?,
        species: row.get("species")?,
        extinct: row.get("extinct")?,
        location: row.get("location")?,
        life_expectancy: row.get("life_expectancy")?,
    })
}

fn parse_animal_row(row: &Row<'_>) -> RepoResult<Animal> {
    read_raw_row(row)?.into_animal()
}

fn bool_to_int(value: bool) -> i64 {
    if value {
        1
    } else {
        0
    }
}
