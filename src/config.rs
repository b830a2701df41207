//! Process configuration read from the environment.

use std::env;
use std::str::FromStr;

use thiserror::Error;

use crate::blockchain::{DEFAULT_DIFFICULTY, DIFF_MAX, MiningConfig, WORKERS_MAX};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid value {value:?} for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings for the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub difficulty: u32,
    pub miners: usize,
    pub host: String,
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            difficulty: DEFAULT_DIFFICULTY,
            miners: 1,
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Read `DIFFICULTY`, `MINERS`, `HOST` and `PORT` from the process environment.
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from an arbitrary key lookup; unset keys fall back to defaults.
    ///
    /// `DIFFICULTY` above `DIFF_MAX` and `MINERS` above `WORKERS_MAX` are rejected.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let difficulty = parse_or(&lookup, "DIFFICULTY", defaults.difficulty)?;
        if difficulty > DIFF_MAX {
            return Err(ConfigError::Invalid {
                key: "DIFFICULTY",
                value: difficulty.to_string(),
            });
        }
        let miners = parse_or(&lookup, "MINERS", defaults.miners)?;
        if miners > WORKERS_MAX {
            return Err(ConfigError::Invalid {
                key: "MINERS",
                value: miners.to_string(),
            });
        }

        Ok(Self {
            difficulty,
            miners: miners.max(1),
            host: lookup("HOST").unwrap_or(defaults.host),
            port: parse_or(&lookup, "PORT", defaults.port)?,
        })
    }

    pub fn mining(&self) -> MiningConfig {
        MiningConfig::new(self.difficulty, self.miners)
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { key, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.mining(), MiningConfig::new(DEFAULT_DIFFICULTY, 1));
    }

    #[test]
    fn reads_all_keys() {
        let cfg = Config::from_lookup(lookup(&[
            ("DIFFICULTY", "3"),
            ("MINERS", "4"),
            ("HOST", "0.0.0.0"),
            ("PORT", "9000"),
        ]))
        .unwrap();
        assert_eq!(cfg.mining(), MiningConfig::new(3, 4));
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 9000);
    }

    #[test]
    fn zero_miners_means_sequential() {
        let cfg = Config::from_lookup(lookup(&[("MINERS", "0")])).unwrap();
        assert_eq!(cfg.miners, 1);
    }

    #[test]
    fn rejects_garbage() {
        let err = Config::from_lookup(lookup(&[("DIFFICULTY", "hard")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "DIFFICULTY",
                value: "hard".into()
            }
        );
    }

    #[test]
    fn rejects_unsatisfiable_difficulty() {
        for value in ["7", "65"] {
            let err = Config::from_lookup(lookup(&[("DIFFICULTY", value)])).unwrap_err();
            assert_eq!(
                err,
                ConfigError::Invalid {
                    key: "DIFFICULTY",
                    value: value.into()
                }
            );
        }
        let cfg = Config::from_lookup(lookup(&[("DIFFICULTY", "6")])).unwrap();
        assert_eq!(cfg.difficulty, DIFF_MAX);
    }

    #[test]
    fn rejects_too_many_miners() {
        let huge = usize::MAX.to_string();
        let err = Config::from_lookup(lookup(&[("MINERS", huge.as_str())])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: "MINERS",
                value: huge
            }
        );

        let cfg = Config::from_lookup(lookup(&[("MINERS", "64")])).unwrap();
        assert_eq!(cfg.miners, WORKERS_MAX);
    }
}
