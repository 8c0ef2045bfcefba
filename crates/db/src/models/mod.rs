//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) where the entity is patchable

pub mod check_in;
pub mod completed_lesson;
pub mod journal_entry;
pub mod lesson;
pub mod session;
pub mod user;
