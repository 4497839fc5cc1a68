use serde::Deserialize;
use shoplist_core::paths;
use std::env;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// `None` resolves to the default data directory at startup.
    pub database_path: Option<String>,
    pub cors_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Default)]
struct FileConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    database: DatabaseSection,
    #[serde(default)]
    cors: CorsSection,
}

#[derive(Debug, Deserialize)]
struct ServerSection {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
struct DatabaseSection {
    #[serde(default)]
    path: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct CorsSection {
    #[serde(default)]
    origins: Vec<String>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ServerConfig {
    pub fn load() -> anyhow::Result<Self> {
        if let Some(file_config) = load_from_file()? {
            return Ok(Self::from_file(file_config));
        }

        Ok(Self::from_env())
    }

    fn from_file(file_config: FileConfig) -> Self {
        Self {
            host: file_config.server.host,
            port: file_config.server.port,
            database_path: file_config.database.path,
            cors_origins: file_config.cors.origins,
        }
    }

    fn from_env() -> Self {
        let host = env::var("SHOPLIST_SERVER_HOST").unwrap_or_else(|_| default_host());
        let port = env::var("SHOPLIST_SERVER_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or_else(default_port);
        let database_path = env::var("SHOPLIST_DB_PATH")
            .ok()
            .filter(|value| !value.trim().is_empty());
        let cors_origins = env::var("SHOPLIST_CORS_ORIGINS")
            .map(|raw| split_origins(&raw))
            .unwrap_or_default();

        Self {
            host,
            port,
            database_path,
            cors_origins,
        }
    }

    /// Configured database path, or `~/.shoplist/shoplist.db`.
    pub fn resolve_database_path(&self) -> anyhow::Result<String> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => paths::ensure_database_path_string(),
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(str::to_string)
        .collect()
}

fn load_from_file() -> anyhow::Result<Option<FileConfig>> {
    let config_path = env::var("SHOPLIST_SERVER_CONFIG").ok();
    let path = if let Some(path) = config_path {
        Some(path)
    } else if Path::new("server.toml").exists() {
        Some("server.toml".to_string())
    } else {
        None
    };

    let Some(path) = path else {
        return Ok(None);
    };

    let contents = fs::read_to_string(&path)
        .map_err(|err| anyhow::anyhow!("Failed to read config {}: {}", path, err))?;
    let parsed = parse_file_config(&contents)
        .map_err(|err| anyhow::anyhow!("Failed to parse config {}: {}", path, err))?;
    Ok(Some(parsed))
}

fn parse_file_config(contents: &str) -> Result<FileConfig, toml::de::Error> {
    toml::from_str(contents)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_config_sections() {
        let parsed = parse_file_config(
            r#"
            [server]
            port = 8080

            [database]
            path = "/tmp/shop.db"

            [cors]
            origins = ["http://localhost:5173"]
            "#,
        )
        .unwrap();
        let config = ServerConfig::from_file(parsed);

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.database_path.as_deref(), Some("/tmp/shop.db"));
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config = ServerConfig::from_file(parse_file_config("").unwrap());
        assert_eq!(config.port, 3000);
        assert!(config.database_path.is_none());
        assert!(config.cors_origins.is_empty());
    }

    #[test]
    fn test_split_origins() {
        assert_eq!(
            split_origins(" http://a.test, ,http://b.test "),
            vec!["http://a.test", "http://b.test"]
        );
    }

    #[test]
    fn test_explicit_database_path_wins() {
        let config = ServerConfig {
            host: default_host(),
            port: default_port(),
            database_path: Some("/tmp/explicit.db".to_string()),
            cors_origins: Vec::new(),
        };
        assert_eq!(config.resolve_database_path().unwrap(), "/tmp/explicit.db");
    }
}
