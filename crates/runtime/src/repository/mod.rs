//! Repository layer for data that outlives one process.
//!
//! Potion knowledge is the only inference that cannot be rebuilt from the
//! save file alone, so it is persisted per run and reloaded when following
//! resumes in the middle of that run.

mod error;
pub mod file;
pub mod memory;
mod traits;

pub use error::{RepositoryError, Result};
pub use file::FileKnowledgeRepository;
pub use memory::InMemoryKnowledgeRepository;
pub use traits::KnowledgeRepository;
