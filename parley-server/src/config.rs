//! Server configuration.

use std::path::PathBuf;
use std::time::Duration;

/// Default OpenAI-compatible provider root
const DEFAULT_UPSTREAM_ROOT: &str = "http://127.0.0.1:8000";

/// Server configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Data directory (database lives here)
    pub data_dir: PathBuf,
    /// Database path
    pub database_path: PathBuf,
    /// TCP bind address
    pub bind_addr: String,
    /// Upstream provider root, probed by the health check
    pub upstream_root: String,
    /// Chat-completions endpoint
    pub completions_url: String,
    /// Model identifier sent with every completion request
    pub model: String,
    /// Per-request timeout for the completion call
    pub upstream_timeout: Duration,
    /// Allowed CORS origin; None means permissive
    pub cors_origin: Option<String>,
    /// Context window: send only the last n ledger messages upstream.
    /// None sends the full history every turn.
    pub history_limit: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        let data_dir = home.join(".parley");

        Self {
            database_path: data_dir.join("chat.db"),
            data_dir,
            bind_addr: "127.0.0.1:5000".to_string(),
            upstream_root: DEFAULT_UPSTREAM_ROOT.to_string(),
            completions_url: format!("{DEFAULT_UPSTREAM_ROOT}/v1/chat/completions"),
            model: "gpt-3.5-turbo".to_string(),
            upstream_timeout: Duration::from_secs(60),
            cors_origin: None,
            history_limit: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables with defaults.
    ///
    /// - `PARLEY_DIR` — data directory (default `~/.parley`)
    /// - `PARLEY_DATABASE_PATH` — database file (default `<dir>/chat.db`)
    /// - `PARLEY_BIND_ADDR` — listen address (default `127.0.0.1:5000`)
    /// - `PARLEY_UPSTREAM_URL` — provider root (default `http://127.0.0.1:8000`)
    /// - `PARLEY_COMPLETIONS_URL` — completions endpoint
    ///   (default `<root>/v1/chat/completions`)
    /// - `PARLEY_MODEL` — model id (default `gpt-3.5-turbo`)
    /// - `PARLEY_UPSTREAM_TIMEOUT_SECS` — completion timeout (default 60)
    /// - `PARLEY_CORS_ORIGIN` — allowed origin (default permissive)
    /// - `PARLEY_HISTORY_LIMIT` — context window (default full history)
    pub fn load() -> anyhow::Result<Self> {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));

        let data_dir = std::env::var("PARLEY_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| home.join(".parley"));

        std::fs::create_dir_all(&data_dir)?;

        let database_path = std::env::var("PARLEY_DATABASE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| data_dir.join("chat.db"));

        let bind_addr =
            std::env::var("PARLEY_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:5000".to_string());

        let upstream_root = std::env::var("PARLEY_UPSTREAM_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_ROOT.to_string());
        let upstream_root = upstream_root.trim_end_matches('/').to_string();

        let completions_url = std::env::var("PARLEY_COMPLETIONS_URL")
            .unwrap_or_else(|_| format!("{upstream_root}/v1/chat/completions"));

        let model =
            std::env::var("PARLEY_MODEL").unwrap_or_else(|_| "gpt-3.5-turbo".to_string());

        let upstream_timeout = match std::env::var("PARLEY_UPSTREAM_TIMEOUT_SECS") {
            Ok(raw) => Duration::from_secs(
                raw.parse()
                    .map_err(|_| anyhow::anyhow!("invalid PARLEY_UPSTREAM_TIMEOUT_SECS: {raw}"))?,
            ),
            Err(_) => Duration::from_secs(60),
        };

        let cors_origin = std::env::var("PARLEY_CORS_ORIGIN").ok();

        let history_limit = match std::env::var("PARLEY_HISTORY_LIMIT") {
            Ok(raw) => Some(
                raw.parse()
                    .map_err(|_| anyhow::anyhow!("invalid PARLEY_HISTORY_LIMIT: {raw}"))?,
            ),
            Err(_) => None,
        };

        Ok(Self {
            data_dir,
            database_path,
            bind_addr,
            upstream_root,
            completions_url,
            model,
            upstream_timeout,
            cors_origin,
            history_limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert!(config.database_path.ends_with("chat.db"));
        assert_eq!(config.bind_addr, "127.0.0.1:5000");
        assert_eq!(
            config.completions_url,
            "http://127.0.0.1:8000/v1/chat/completions"
        );
        assert_eq!(config.model, "gpt-3.5-turbo");
        assert_eq!(config.upstream_timeout, Duration::from_secs(60));
        assert!(config.cors_origin.is_none());
        assert!(config.history_limit.is_none());
    }

    #[test]
    fn test_config_load_with_custom_dir() {
        let temp_dir = tempfile::tempdir().unwrap();
        let custom_path = temp_dir.path().to_path_buf();

        // Save current value to restore later
        let old_val = env::var("PARLEY_DIR").ok();
        // SAFETY: This test runs in isolation and we restore the env var afterward
        unsafe { env::set_var("PARLEY_DIR", &custom_path) };

        let config = Config::load().unwrap();

        assert!(config.data_dir.starts_with(&custom_path));
        assert!(config.database_path.starts_with(&custom_path));
        assert!(config.data_dir.exists());

        // Cleanup
        // SAFETY: Restoring environment to previous state
        unsafe {
            if let Some(val) = old_val {
                env::set_var("PARLEY_DIR", val);
            } else {
                env::remove_var("PARLEY_DIR");
            }
        }
    }

    #[test]
    fn test_config_completions_url_follows_upstream_root() {
        let old_val = env::var("PARLEY_UPSTREAM_URL").ok();
        // SAFETY: This test runs in isolation and we restore the env var afterward
        unsafe { env::set_var("PARLEY_UPSTREAM_URL", "http://llm.internal:9999/") };

        let config = Config::load().unwrap();
        assert_eq!(config.upstream_root, "http://llm.internal:9999");
        assert_eq!(
            config.completions_url,
            "http://llm.internal:9999/v1/chat/completions"
        );

        // SAFETY: Restoring environment to previous state
        unsafe {
            if let Some(val) = old_val {
                env::set_var("PARLEY_UPSTREAM_URL", val);
            } else {
                env::remove_var("PARLEY_UPSTREAM_URL");
            }
        }
    }

    #[test]
    fn test_config_history_limit_parse() {
        let old_val = env::var("PARLEY_HISTORY_LIMIT").ok();
        // SAFETY: This test runs in isolation and we restore the env var afterward
        unsafe { env::set_var("PARLEY_HISTORY_LIMIT", "40") };

        let config = Config::load().unwrap();
        assert_eq!(config.history_limit, Some(40));

        // SAFETY: Restoring environment to previous state
        unsafe {
            if let Some(val) = old_val {
                env::set_var("PARLEY_HISTORY_LIMIT", val);
            } else {
                env::remove_var("PARLEY_HISTORY_LIMIT");
            }
        }
    }
}
