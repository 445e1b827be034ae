//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes validate typed fields before persistence.
//! - Lookups distinguish found (`Some`), not-found (`None`) and failed (`Err`).

pub mod animal_repo;
