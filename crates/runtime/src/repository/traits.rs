//! Repository contract for persisted potion knowledge.

use showdown_core::PotionKnowledge;

use super::Result;

/// Potion knowledge keyed by run number (the save's `day` counter).
pub trait KnowledgeRepository: Send + Sync {
    fn save(&self, day: i32, knowledge: &PotionKnowledge) -> Result<()>;

    fn load(&self, day: i32) -> Result<Option<PotionKnowledge>>;

    fn exists(&self, day: i32) -> bool;

    fn delete(&self, day: i32) -> Result<()>;

    /// Runs with stored knowledge, ascending.
    fn list_days(&self) -> Result<Vec<i32>> {
        Ok(vec![])
    }
}
