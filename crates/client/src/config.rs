//! Client configuration structures and loaders.
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use directories::ProjectDirs;
use showdown_core::{EngineConfig, EnemyOrder};
use showdown_runtime::RuntimeConfig;

/// Configuration required to follow a run and render it.
#[derive(Clone, Debug, Default)]
pub struct AppConfig {
    /// Save file to follow; the game's default location when unset.
    pub save_file: Option<PathBuf>,
    pub poll_interval: Option<Duration>,
    pub enemy_order: EnemyOrder,
    pub session_id: Option<String>,
    /// Root for session logs and stored potion knowledge.
    pub log_dir: Option<PathBuf>,
    /// Print every rejected hypothesis of unexplained turns.
    pub verbose: bool,
    /// Print battle splits only.
    pub splits: bool,
}

impl AppConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SHOWDOWN_SAVE_FILE` - Save file path (default: the game's save folder)
    /// - `SHOWDOWN_POLL_MS` - Save file polling interval in milliseconds (default: 100)
    /// - `SHOWDOWN_ENEMY_ORDER` - `left-to-right`, `right-to-left`, `file-order` or `exhaustive`
    /// - `SHOWDOWN_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `SHOWDOWN_LOG_DIR` - Directory for logs and potion knowledge (default: platform cache)
    /// - `SHOWDOWN_VERBOSE` - Print rejected hypotheses (default: false)
    /// - `SHOWDOWN_SPLITS` - Print splits only (default: false)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        config.save_file = env::var("SHOWDOWN_SAVE_FILE").ok().map(PathBuf::from);
        config.poll_interval = read_env::<u64>("SHOWDOWN_POLL_MS").map(|ms| Duration::from_millis(ms.max(1)));

        if let Some(order) = read_env::<EnemyOrder>("SHOWDOWN_ENEMY_ORDER") {
            config.enemy_order = order;
        }

        config.session_id = env::var("SHOWDOWN_SESSION_ID").ok();
        config.log_dir = env::var("SHOWDOWN_LOG_DIR").ok().map(PathBuf::from);

        if let Some(verbose) = read_env::<bool>("SHOWDOWN_VERBOSE") {
            config.verbose = verbose;
        } else if env::var("SHOWDOWN_VERBOSE").is_ok() {
            // Also accept just setting the variable without value as "true"
            config.verbose = true;
        }
        if let Some(splits) = read_env::<bool>("SHOWDOWN_SPLITS") {
            config.splits = splits;
        } else if env::var("SHOWDOWN_SPLITS").is_ok() {
            config.splits = true;
        }

        config
    }

    /// Directory holding session logs and potion knowledge.
    pub fn data_dir(&self) -> PathBuf {
        self.log_dir.clone().unwrap_or_else(|| {
            ProjectDirs::from("", "", "showdown")
                .map_or_else(|| env::temp_dir().join("showdown"), |dirs| dirs.cache_dir().to_path_buf())
        })
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        let mut runtime = RuntimeConfig {
            engine: EngineConfig::new().with_enemy_order(self.enemy_order),
            knowledge_dir: Some(self.data_dir().join("knowledge")),
            ..RuntimeConfig::default()
        };
        if let Some(path) = &self.save_file {
            runtime.save_path = path.clone();
        }
        if let Some(interval) = self.poll_interval {
            runtime.poll_interval = interval;
        }
        runtime
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runtime_config_follows_the_overrides() {
        let config = AppConfig {
            save_file: Some(PathBuf::from("/tmp/RunSaveData.dat")),
            poll_interval: Some(Duration::from_millis(250)),
            enemy_order: EnemyOrder::Exhaustive,
            log_dir: Some(PathBuf::from("/tmp/showdown")),
            ..AppConfig::default()
        };
        let runtime = config.runtime_config();
        assert_eq!(runtime.save_path, PathBuf::from("/tmp/RunSaveData.dat"));
        assert_eq!(runtime.poll_interval, Duration::from_millis(250));
        assert_eq!(runtime.engine.enemy_order, EnemyOrder::Exhaustive);
        assert_eq!(runtime.knowledge_dir, Some(PathBuf::from("/tmp/showdown/knowledge")));
    }

    #[test]
    fn enemy_orders_parse_from_kebab_case() {
        assert_eq!("right-to-left".parse::<EnemyOrder>(), Ok(EnemyOrder::RightToLeft));
    }
}
