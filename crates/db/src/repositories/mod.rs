//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument. Methods that take part in a progress
//! update accept an open transaction instead so the caller can hold the user
//! row lock for the whole read-modify-write.

pub mod check_in_repo;
pub mod completed_lesson_repo;
pub mod journal_entry_repo;
pub mod lesson_repo;
pub mod session_repo;
pub mod user_repo;

pub use check_in_repo::CheckInRepo;
pub use completed_lesson_repo::CompletedLessonRepo;
pub use journal_entry_repo::JournalEntryRepo;
pub use lesson_repo::LessonRepo;
pub use session_repo::SessionRepo;
pub use user_repo::UserRepo;
