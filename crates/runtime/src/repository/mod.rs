//! Repository layer for save games.
//!
//! Repositories hold data that CHANGES during play: snapshots written to
//! named slots. Static content (rules, scenarios) is loaded by
//! `tactics-content`, not stored here.

mod error;
mod file;
mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileSaveRepository;
pub use memory::InMemorySaveRepo;
pub use traits::{SaveRepository, SaveSummary, SavedGame, validate_slot};
