// ⚙️ Configuration - Where the catalog comes from and how binaries log
//
// Both binaries collect their settings (CLI flags with CATALOG_* environment
// fallbacks) into a CatalogConfig.

use crate::error::SeedError;
use crate::store::CatalogStore;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON seed file; the built-in dataset is used when absent
    pub seed_path: Option<PathBuf>,

    /// Listen address for the API server
    pub bind_addr: String,

    /// Directory of static front-end assets served under /static
    pub static_dir: Option<PathBuf>,

    /// Default log level when RUST_LOG is not set
    pub log_level: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            seed_path: None,
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            static_dir: None,
            log_level: "info".to_string(),
        }
    }
}

impl CatalogConfig {
    /// Build a fresh store from the configured seed
    pub fn load_store(&self) -> Result<CatalogStore, SeedError> {
        match &self.seed_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Loading seed file");
                CatalogStore::from_file(path)
            }
            None => {
                tracing::debug!("Loading built-in seed");
                CatalogStore::builtin()
            }
        }
    }

    /// Human-readable seed source
    pub fn seed_source(&self) -> String {
        match &self.seed_path {
            Some(path) => path.display().to_string(),
            None => "built-in".to_string(),
        }
    }
}

/// Install the global tracing subscriber (stderr, RUST_LOG wins over `level`)
pub fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("tech_catalog={level},{level}")));

    // Logs go to stderr so stdout stays clean for --json output
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::SeedData;
    use std::io::Write;

    #[test]
    fn test_default_config_uses_builtin_seed() {
        let config = CatalogConfig::default();

        assert_eq!(config.seed_source(), "built-in");
        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR);
        assert_eq!(config.load_store().unwrap().item_count(), 3);
    }

    #[test]
    fn test_seed_path_is_loaded() {
        let mut seed = SeedData::builtin();
        seed.items.truncate(2);

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", seed.to_canonical_json().unwrap()).unwrap();

        let config = CatalogConfig {
            seed_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert_eq!(config.load_store().unwrap().item_count(), 2);
    }

    #[test]
    fn test_invalid_seed_file_fails() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = CatalogConfig {
            seed_path: Some(file.path().to_path_buf()),
            ..Default::default()
        };
        assert!(matches!(config.load_store(), Err(SeedError::Parse(_))));
    }
}
