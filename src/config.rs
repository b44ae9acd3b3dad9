// ⚙️ Configuration - environment variables (with optional .env file)

use std::path::PathBuf;
use std::str::FromStr;

use crate::error::{PokedexError, Result};
use crate::fetch::DEFAULT_BASE_URL;

pub const DB_PATH_VAR: &str = "POKEDEX_DB_PATH";
pub const API_BASE_URL_VAR: &str = "POKEAPI_BASE_URL";
pub const BIND_ADDR_VAR: &str = "POKEDEX_BIND_ADDR";
pub const LIST_LIMIT_VAR: &str = "POKEDEX_LIST_LIMIT";
pub const RANK_LIMIT_VAR: &str = "POKEDEX_RANK_LIMIT";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub database_path: PathBuf,
    pub api_base_url: String,
    pub bind_addr: String,
    pub list_limit: u32,
    pub rank_limit: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("pokedex.db"),
            api_base_url: DEFAULT_BASE_URL.to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            list_limit: 50,
            rank_limit: 10,
        }
    }
}

impl Config {
    /// Load from the process environment, reading `.env` first if present.
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from any key lookup; unset or blank keys keep their default.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let mut api_base_url = get(API_BASE_URL_VAR).unwrap_or(defaults.api_base_url);
        if !api_base_url.ends_with('/') {
            api_base_url.push('/');
        }

        Ok(Config {
            database_path: get(DB_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            api_base_url,
            bind_addr: get(BIND_ADDR_VAR).unwrap_or(defaults.bind_addr),
            list_limit: parse_or(get(LIST_LIMIT_VAR), LIST_LIMIT_VAR, defaults.list_limit)?,
            rank_limit: parse_or(get(RANK_LIMIT_VAR), RANK_LIMIT_VAR, defaults.rank_limit)?,
        })
    }
}

fn parse_or<T: FromStr>(value: Option<String>, key: &str, default: T) -> Result<T> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .parse()
            .map_err(|_| PokedexError::Config(format!("{} must be a number, got '{}'", key, raw))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.api_base_url, "https://pokeapi.co/api/v2/");
    }

    #[test]
    fn test_overrides() {
        let config = load(&[
            (DB_PATH_VAR, "/tmp/dex.db"),
            (API_BASE_URL_VAR, "http://localhost:8080/api/v2"),
            (BIND_ADDR_VAR, "127.0.0.1:8000"),
            (LIST_LIMIT_VAR, "20"),
            (RANK_LIMIT_VAR, " 5 "),
        ])
        .unwrap();

        assert_eq!(config.database_path, PathBuf::from("/tmp/dex.db"));
        assert_eq!(config.api_base_url, "http://localhost:8080/api/v2/");
        assert_eq!(config.bind_addr, "127.0.0.1:8000");
        assert_eq!(config.list_limit, 20);
        assert_eq!(config.rank_limit, 5);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = load(&[(DB_PATH_VAR, "  "), (LIST_LIMIT_VAR, "")]).unwrap();
        assert_eq!(config.database_path, PathBuf::from("pokedex.db"));
        assert_eq!(config.list_limit, 50);
    }

    #[test]
    fn test_bad_number_is_config_error() {
        let result = load(&[(LIST_LIMIT_VAR, "lots")]);
        assert!(matches!(result, Err(PokedexError::Config(_))));
    }
}
