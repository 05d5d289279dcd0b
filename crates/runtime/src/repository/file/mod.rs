//! File-based repository implementations.

mod knowledge;

pub use knowledge::FileKnowledgeRepository;
