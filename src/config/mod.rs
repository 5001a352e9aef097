use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Database path value that selects a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    pub site: SiteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: PathBuf,
    pub max_connections: u32,
    pub busy_timeout_ms: u64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub title: String,
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/bookmarks.db"),
            max_connections: 5,
            busy_timeout_ms: 5000,
        }
    }
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "LinkShelf".to_string(),
            static_dir: PathBuf::from("static"),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, then apply `LINKSHELF_*` overrides
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(config.with_env_overrides())
    }

    pub fn from_yaml(raw: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to a mapping
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(raw)
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("LINKSHELF_HOST") {
            self.server.host = v;
        }
        if let Ok(v) = env::var("LINKSHELF_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("LINKSHELF_DATABASE_PATH") {
            self.database.path = PathBuf::from(v);
        }
        if let Ok(v) = env::var("LINKSHELF_PASSWORD") {
            self.auth.password = v;
        }
        if let Ok(v) = env::var("LINKSHELF_SITE_TITLE") {
            self.site.title = v;
        }
        self
    }

    /// Anchor relative file paths at `base` (normally the executable's directory)
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        if !self.database.is_in_memory() {
            self.database.path = resolve_against(base, &self.database.path);
        }
        self.site.static_dir = resolve_against(base, &self.site.static_dir);
        self
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    pub fn in_memory() -> Self {
        Self {
            path: PathBuf::from(IN_MEMORY_PATH),
            max_connections: 1,
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.path.as_os_str() == IN_MEMORY_PATH
    }
}

fn resolve_against(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}

/// Directory containing the running executable
pub fn exe_dir() -> std::io::Result<PathBuf> {
    let exe = env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_fill_missing_sections() {
        let config = AppConfig::from_yaml("auth:\n  password: secret\n").unwrap();
        assert_eq!(config.auth.password, "secret");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.site.title, "LinkShelf");
        assert_eq!(config.database.path, PathBuf::from("data/bookmarks.db"));
    }

    #[test]
    fn test_empty_document_is_default() {
        let config = AppConfig::from_yaml("").unwrap();
        assert_eq!(config.server.port, 8080);
        assert!(config.auth.password.is_empty());
    }

    #[test]
    fn test_full_document() {
        let raw = r#"
server:
  host: 127.0.0.1
  port: 9000
database:
  path: /var/lib/linkshelf/marks.db
auth:
  password: hunter2
site:
  title: My Links
"#;
        let config = AppConfig::from_yaml(raw).unwrap();
        assert_eq!(config.bind_addr(), "127.0.0.1:9000");
        assert_eq!(config.database.path, PathBuf::from("/var/lib/linkshelf/marks.db"));
        assert_eq!(config.site.title, "My Links");
    }

    #[test]
    fn test_relative_paths_resolve_against_base() {
        let config = AppConfig::default().resolve_paths(Path::new("/opt/linkshelf"));
        assert_eq!(config.database.path, PathBuf::from("/opt/linkshelf/data/bookmarks.db"));
        assert_eq!(config.site.static_dir, PathBuf::from("/opt/linkshelf/static"));
    }

    #[test]
    fn test_absolute_and_memory_paths_untouched() {
        let mut config = AppConfig::default();
        config.database = DatabaseConfig::in_memory();
        let config = config.resolve_paths(Path::new("/opt/linkshelf"));
        assert!(config.database.is_in_memory());

        let mut config = AppConfig::default();
        config.database.path = PathBuf::from("/srv/marks.db");
        let config = config.resolve_paths(Path::new("/opt/linkshelf"));
        assert_eq!(config.database.path, PathBuf::from("/srv/marks.db"));
    }

    #[test]
    fn test_malformed_yaml_is_error() {
        assert!(AppConfig::from_yaml("server: [unterminated").is_err());
    }
}
