//! In-memory KnowledgeRepository implementation for tests and local runs.

use std::collections::BTreeMap;
use std::sync::RwLock;

use showdown_core::PotionKnowledge;

use crate::repository::{KnowledgeRepository, RepositoryError, Result};

#[derive(Default)]
pub struct InMemoryKnowledgeRepository {
    runs: RwLock<BTreeMap<i32, PotionKnowledge>>,
}

impl InMemoryKnowledgeRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KnowledgeRepository for InMemoryKnowledgeRepository {
    fn save(&self, day: i32, knowledge: &PotionKnowledge) -> Result<()> {
        let mut runs = self.runs.write().map_err(|_| RepositoryError::LockPoisoned)?;
        runs.insert(day, knowledge.clone());
        Ok(())
    }

    fn load(&self, day: i32) -> Result<Option<PotionKnowledge>> {
        let runs = self.runs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(runs.get(&day).cloned())
    }

    fn exists(&self, day: i32) -> bool {
        self.runs.read().is_ok_and(|runs| runs.contains_key(&day))
    }

    fn delete(&self, day: i32) -> Result<()> {
        let mut runs = self.runs.write().map_err(|_| RepositoryError::LockPoisoned)?;
        runs.remove(&day);
        Ok(())
    }

    fn list_days(&self) -> Result<Vec<i32>> {
        let runs = self.runs.read().map_err(|_| RepositoryError::LockPoisoned)?;
        Ok(runs.keys().copied().collect())
    }
}
