use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub github: GitHubConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct GitHubConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub per_page: Option<u32>,
    /// Environment variable holding an API token. Unauthenticated requests
    /// work but are rate limited harder.
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            per_page: None,
            token_env: default_token_env(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.github.com".to_string()
}
fn default_timeout_secs() -> u64 {
    15
}
fn default_token_env() -> String {
    "GITHUB_TOKEN".to_string()
}

impl GitHubConfig {
    /// The token from `token_env`, if set and non-empty.
    pub fn token(&self) -> Option<String> {
        std::env::var(&self.token_env)
            .ok()
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:8080".to_string()
}

impl Config {
    /// Built-in defaults, used when no config file exists.
    pub fn minimal() -> Self {
        Self::default()
    }
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;
    validate(&config)?;

    Ok(config)
}

fn validate(config: &Config) -> Result<()> {
    if config.github.timeout_secs == 0 {
        anyhow::bail!("github.timeout_secs must be > 0");
    }

    if let Some(per_page) = config.github.per_page {
        if !(1..=100).contains(&per_page) {
            anyhow::bail!("github.per_page must be in [1, 100]");
        }
    }

    let base_url = config.github.base_url.trim();
    if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
        anyhow::bail!(
            "github.base_url must start with http:// or https://, got '{}'",
            config.github.base_url
        );
    }

    if config.server.bind.trim().is_empty() {
        anyhow::bail!("server.bind must not be empty");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let file = write_config("");
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.github.base_url, "https://api.github.com");
        assert_eq!(config.github.timeout_secs, 15);
        assert_eq!(config.github.per_page, None);
        assert_eq!(config.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_full_file() {
        let file = write_config(
            r#"
[github]
base_url = "http://127.0.0.1:9999"
timeout_secs = 5
per_page = 50
token_env = "MY_TOKEN"

[server]
bind = "0.0.0.0:3000"
"#,
        );
        let config = load_config(file.path()).unwrap();
        assert_eq!(config.github.base_url, "http://127.0.0.1:9999");
        assert_eq!(config.github.timeout_secs, 5);
        assert_eq!(config.github.per_page, Some(50));
        assert_eq!(config.github.token_env, "MY_TOKEN");
        assert_eq!(config.server.bind, "0.0.0.0:3000");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let file = write_config("[github]\ntimeout_secs = 0\n");
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("timeout_secs"));
    }

    #[test]
    fn test_rejects_per_page_out_of_range() {
        let file = write_config("[github]\nper_page = 101\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let file = write_config("[github]\nbase_url = \"api.github.com\"\n");
        assert!(load_config(file.path()).is_err());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = load_config(Path::new("/nonexistent/ghrepos.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_unset_token_env() {
        let config = GitHubConfig {
            token_env: "GHREPOS_TEST_TOKEN_THAT_IS_NEVER_SET".to_string(),
            ..GitHubConfig::default()
        };
        assert!(config.token().is_none());
    }
}
