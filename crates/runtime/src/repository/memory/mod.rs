//! In-memory repository implementations for testing and development.

mod knowledge;

pub use knowledge::InMemoryKnowledgeRepository;
