//! Project configuration loaded from `taskboard.toml`.

use std::{
    collections::HashSet,
    fs,
    net::SocketAddr,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use taskboard_core::ValidationError;

/// Default configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "taskboard.toml";

/// Storage path that selects an ephemeral in-memory database.
pub const IN_MEMORY: &str = ":memory:";

/// Top-level configuration loaded from `taskboard.toml`.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,
    /// Database settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Category restrictions.
    #[serde(default)]
    pub categories: CategoryConfig,
}

impl ProjectConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    ///
    /// # Errors
    /// Returns an error when the file cannot be read, parsed or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents =
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))?;
        Self::from_toml(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error on malformed TOML or invalid values.
    pub fn from_toml(contents: &str) -> Result<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.storage.ensure_path()?;
        self.categories.ensure_unique()
    }
}

/// HTTP server block.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Listen address.
    #[serde(default = "ServerConfig::default_bind")]
    pub bind: SocketAddr,
    /// Answer cross-origin requests permissively.
    #[serde(default = "ServerConfig::default_cors")]
    pub cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: Self::default_bind(),
            cors: Self::default_cors(),
        }
    }
}

impl ServerConfig {
    fn default_bind() -> SocketAddr {
        SocketAddr::from(([127, 0, 0, 1], 3000))
    }

    const fn default_cors() -> bool {
        true
    }
}

/// Database location block.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Database file, or `:memory:`.
    #[serde(default = "StorageConfig::default_path")]
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
        }
    }
}

impl StorageConfig {
    fn default_path() -> PathBuf {
        PathBuf::from("taskboard.db")
    }

    /// Storage block pointing at an ephemeral database.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(IN_MEMORY),
        }
    }

    /// Returns true when the store lives only for the lifetime of the process.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY
    }

    fn ensure_path(&self) -> Result<()> {
        if self.path.as_os_str().is_empty() {
            bail!("storage path must not be empty");
        }
        Ok(())
    }
}

/// Allowed category set. An empty list leaves categories unrestricted.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CategoryConfig {
    #[serde(default)]
    allowed: Vec<String>,
}

impl CategoryConfig {
    /// Configuration without category restrictions.
    #[must_use]
    pub const fn unrestricted() -> Self {
        Self {
            allowed: Vec::new(),
        }
    }

    /// Restrict categories to an explicit set.
    #[must_use]
    pub fn from_allowed<I, T>(allowed: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns true when categories are restricted to a configured set.
    #[must_use]
    pub const fn is_restricted(&self) -> bool {
        !self.allowed.is_empty()
    }

    /// Allowed categories (if any).
    #[must_use]
    pub fn allowed(&self) -> &[String] {
        &self.allowed
    }

    /// Validate that the provided category (if any) is part of the configured set.
    ///
    /// # Errors
    /// Returns [`ValidationError::UnknownCategory`] for values outside a restricted set.
    pub fn validate_category(&self, candidate: Option<&str>) -> Result<(), ValidationError> {
        let Some(value) = candidate else {
            return Ok(());
        };
        if !self.is_restricted() || self.allowed.iter().any(|allowed| allowed == value) {
            return Ok(());
        }
        Err(ValidationError::UnknownCategory {
            category: value.to_owned(),
            allowed: self.allowed.join(", "),
        })
    }

    fn ensure_unique(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for category in &self.allowed {
            if category.trim().is_empty() {
                bail!("allowed categories must not be blank");
            }
            if !seen.insert(category.as_str()) {
                bail!("duplicate category detected: {category}");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn missing_config_returns_defaults() -> Result<()> {
        let dir = tempdir()?;
        let cfg = ProjectConfig::load(dir.path().join(CONFIG_FILE))?;
        assert_eq!(cfg.server.bind.to_string(), "127.0.0.1:3000");
        assert!(cfg.server.cors);
        assert_eq!(cfg.storage.path, PathBuf::from("taskboard.db"));
        assert!(!cfg.categories.is_restricted());
        Ok(())
    }

    #[test]
    fn load_config_with_all_sections() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        let mut file = fs::File::create(&path)?;
        writeln!(
            file,
            "[server]\nbind = \"0.0.0.0:8080\"\ncors = false\n\n[storage]\npath = \":memory:\"\n\n[categories]\nallowed = [\"work\", \"personal\"]"
        )?;

        let cfg = ProjectConfig::load(&path)?;
        assert_eq!(cfg.server.bind.port(), 8080);
        assert!(!cfg.server.cors);
        assert!(cfg.storage.is_in_memory());
        assert_eq!(cfg.categories.allowed(), ["work", "personal"]);
        cfg.categories.validate_category(Some("work"))?;
        cfg.categories.validate_category(None)?;
        assert!(cfg.categories.validate_category(Some("hobby")).is_err());
        Ok(())
    }

    #[test]
    fn duplicate_categories_are_rejected() {
        let Err(err) = ProjectConfig::from_toml("[categories]\nallowed = [\"work\", \"work\"]") else {
            panic!("duplicate category should error");
        };
        assert!(err.to_string().contains("duplicate category"));
    }

    #[test]
    fn invalid_bind_address_is_rejected() {
        assert!(ProjectConfig::from_toml("[server]\nbind = \"localhost\"").is_err());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(ProjectConfig::from_toml("[server]\nport = 3000").is_err());
    }

    #[test]
    fn unknown_category_error_lists_allowed_values() {
        let categories = CategoryConfig::from_allowed(["work", "health"]);
        let Err(err) = categories.validate_category(Some("gym")) else {
            panic!("gym is not allowed");
        };
        assert_eq!(
            err.to_string(),
            "category 'gym' is not allowed. Allowed values: work, health"
        );
        assert!(CategoryConfig::unrestricted().validate_category(Some("gym")).is_ok());
    }
}
