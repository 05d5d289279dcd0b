//! File-based KnowledgeRepository implementation.

use std::fs;
use std::path::{Path, PathBuf};

use showdown_core::PotionKnowledge;

use crate::repository::{KnowledgeRepository, RepositoryError, Result};

/// Stores the knowledge of each run as `knowledge_{day}.json`.
///
/// Writes go to a temporary file first and are renamed into place, so a crash
/// never leaves a half-written file behind.
pub struct FileKnowledgeRepository {
    base_dir: PathBuf,
}

impl FileKnowledgeRepository {
    pub fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        fs::create_dir_all(&base_dir)?;
        Ok(Self { base_dir })
    }

    fn knowledge_path(&self, day: i32) -> PathBuf {
        self.base_dir.join(format!("knowledge_{day}.json"))
    }
}

impl KnowledgeRepository for FileKnowledgeRepository {
    fn save(&self, day: i32, knowledge: &PotionKnowledge) -> Result<()> {
        let path = self.knowledge_path(day);
        let temp_path = path.with_extension("json.tmp");

        let bytes = serde_json::to_vec_pretty(knowledge).map_err(|e| RepositoryError::Json(e.to_string()))?;
        fs::write(&temp_path, bytes)?;
        fs::rename(&temp_path, &path)?;

        tracing::debug!("Saved knowledge[{}] to {}", day, path.display());
        Ok(())
    }

    fn load(&self, day: i32) -> Result<Option<PotionKnowledge>> {
        let path = self.knowledge_path(day);
        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path)?;
        let knowledge = serde_json::from_slice(&bytes).map_err(|e| RepositoryError::Json(e.to_string()))?;

        tracing::debug!("Loaded knowledge[{}] from {}", day, path.display());
        Ok(Some(knowledge))
    }

    fn exists(&self, day: i32) -> bool {
        self.knowledge_path(day).exists()
    }

    fn delete(&self, day: i32) -> Result<()> {
        let path = self.knowledge_path(day);
        if path.exists() {
            fs::remove_file(&path)?;
            tracing::debug!("Deleted knowledge[{}]", day);
        }
        Ok(())
    }

    fn list_days(&self) -> Result<Vec<i32>> {
        let mut days = Vec::new();
        for entry in fs::read_dir(&self.base_dir)? {
            let path = entry?.path();
            if let Some(filename) = path.file_name().and_then(|s| s.to_str())
                && let Some(day) = filename
                    .strip_prefix("knowledge_")
                    .and_then(|s| s.strip_suffix(".json"))
                && let Ok(day) = day.parse::<i32>()
            {
                days.push(day);
            }
        }
        days.sort_unstable();
        Ok(days)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showdown_core::Pickup;

    #[test]
    fn knowledge_survives_a_reload() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileKnowledgeRepository::new(dir.path()).unwrap();
        let mut knowledge = PotionKnowledge::new(&[4, 9]);
        knowledge.assured_guess(4, Pickup::MassIce).unwrap();

        repo.save(12, &knowledge).unwrap();
        assert!(repo.exists(12));
        assert_eq!(repo.load(12).unwrap(), Some(knowledge));
        assert_eq!(repo.load(13).unwrap(), None);
    }

    #[test]
    fn days_are_listed_in_order_and_deletable() {
        let dir = tempfile::tempdir().unwrap();
        let repo = FileKnowledgeRepository::new(dir.path()).unwrap();
        for day in [7, 2, 30] {
            repo.save(day, &PotionKnowledge::default()).unwrap();
        }
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        assert_eq!(repo.list_days().unwrap(), vec![2, 7, 30]);

        repo.delete(7).unwrap();
        assert_eq!(repo.list_days().unwrap(), vec![2, 30]);
    }
}
