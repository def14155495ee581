// src/config/provider.rs
//! Configuration resolved once at startup and passed down explicitly.
//!
//! Sources, lowest precedence first: `.env`, the secrets file (dotenv format,
//! `GTUBE_SECRETS_FILE` or `.secrets`), the process environment.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    str::FromStr,
};

use super::consts::*;
use super::options::RankOptions;
use crate::error::ConfigError;

#[derive(Clone, Debug, Default)]
pub struct Config {
    values: HashMap<String, String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let mut cfg = Config::default();
        cfg.merge_dotenv_file(Path::new(".env"))?;

        let secrets = std::env::var(KEY_SECRETS_FILE).unwrap_or_else(|_| s!(DEFAULT_SECRETS_FILE));
        if cfg.merge_dotenv_file(Path::new(&secrets))? {
            tracing::debug!(path = %secrets, "secrets file loaded");
        }

        cfg.values.extend(
            std::env::vars_os()
                .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?))),
        );
        Ok(cfg)
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            values: pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Returns false when the file does not exist.
    pub fn merge_dotenv_file(&mut self, path: &Path) -> Result<bool, ConfigError> {
        if !path.is_file() {
            return Ok(false);
        }
        let source_err = |e: dotenvy::Error| ConfigError::Source {
            path: path.display().to_string(),
            reason: e.to_string(),
        };
        for item in dotenvy::from_path_iter(path).map_err(source_err)? {
            let (k, v) = item.map_err(source_err)?;
            self.values.insert(k, v);
        }
        Ok(true)
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    /// Blank values count as missing.
    pub fn get(&self, key: &str) -> Result<&str, ConfigError> {
        self.values
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ConfigError::Missing(s!(key)))
    }

    pub fn get_or<'a>(&'a self, key: &str, default: &'a str) -> &'a str {
        self.get(key).unwrap_or(default)
    }

    /// `Ok(None)` when absent, `Invalid` when present but unparseable.
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> Result<Option<T>, ConfigError> {
        match self.get(key) {
            Ok(raw) => raw.parse::<T>().map(Some).map_err(|_| ConfigError::Invalid {
                key: s!(key),
                value: s!(raw),
            }),
            Err(ConfigError::Missing(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn api_key(&self) -> Result<&str, ConfigError> {
        self.get(KEY_API_KEY)
    }

    pub fn api_base(&self) -> &str {
        self.get_or(KEY_API_BASE, API_BASE)
    }

    pub fn data_dir(&self) -> PathBuf {
        PathBuf::from(self.get_or(KEY_DATA_DIR, STORE_DIR))
    }

    pub fn rank_options(&self) -> Result<RankOptions, ConfigError> {
        let mut opts = RankOptions::default();
        if let Some(rate) = self.get_parsed::<f64>(KEY_REVENUE_RATE)? {
            if !rate.is_finite() || rate < 0.0 {
                return Err(ConfigError::Invalid {
                    key: s!(KEY_REVENUE_RATE),
                    value: rate.to_string(),
                });
            }
            opts.revenue_rate = rate;
        }
        Ok(opts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_and_blank_are_missing() {
        let cfg = Config::from_pairs([("YOUTUBE_API_KEY", "  ")]);
        assert_eq!(cfg.api_key(), Err(ConfigError::Missing(s!("YOUTUBE_API_KEY"))));
        assert_eq!(cfg.get("NOPE"), Err(ConfigError::Missing(s!("NOPE"))));
    }

    #[test]
    fn typed_lookup() {
        let cfg = Config::from_pairs([("GTUBE_REVENUE_RATE", "0.35"), ("BAD", "x")]);
        assert_eq!(cfg.rank_options().unwrap().revenue_rate, 0.35);
        assert_eq!(cfg.get_parsed::<u32>("ABSENT"), Ok(None));
        assert!(matches!(cfg.get_parsed::<u32>("BAD"), Err(ConfigError::Invalid { .. })));
    }

    #[test]
    fn negative_rate_rejected() {
        let cfg = Config::from_pairs([("GTUBE_REVENUE_RATE", "-1")]);
        assert!(cfg.rank_options().is_err());
    }

    #[test]
    fn defaults() {
        let cfg = Config::default();
        assert_eq!(cfg.api_base(), API_BASE);
        assert_eq!(cfg.data_dir(), PathBuf::from(STORE_DIR));
        assert_eq!(cfg.rank_options().unwrap(), RankOptions::default());
    }

    #[test]
    fn dotenv_file_overrides_earlier_values() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "YOUTUBE_API_KEY=from-file").unwrap();
        writeln!(f, "GTUBE_DATA_DIR=\"data\"").unwrap();

        let mut cfg = Config::from_pairs([("YOUTUBE_API_KEY", "old")]);
        assert!(cfg.merge_dotenv_file(f.path()).unwrap());
        assert_eq!(cfg.api_key().unwrap(), "from-file");
        assert_eq!(cfg.data_dir(), PathBuf::from("data"));

        assert!(!cfg.merge_dotenv_file(Path::new("/definitely/not/here.env")).unwrap());
    }
}
