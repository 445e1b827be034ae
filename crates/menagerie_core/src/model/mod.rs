//! Domain model for the animal collection.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Own the fixed starter dataset used by the seed flow.
//!
//! # Invariants
//! - Every record is identified by a stable `AnimalId`.
//! - Deletion is a hard delete; identifiers are never recycled.

pub mod animal;
pub mod seed;
