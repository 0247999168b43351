//! Stream configuration
//!
//! Describes which stream(s) to build: a single `(seed, subsequence,
//! offset)` triple, or one stream per parallel worker sharing a seed.
//!
//! # Example
//!
//! ```rust
//! use xorwow_core_rs::config::StreamSetConfig;
//!
//! let config = StreamSetConfig::from_json(r#"{"seed": 42, "workers": 4}"#).unwrap();
//! let streams = config.build().unwrap();
//! assert_eq!(streams.len(), 4);
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rng::{JumpStrategy, XorwowEngine, XORWOW_DEFAULT_SEED};

/// Errors raised while parsing or validating a stream configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Largest worker count a stream set may request
pub const MAX_WORKERS: u64 = 1 << 20;

fn default_seed() -> u64 {
    XORWOW_DEFAULT_SEED
}

/// A single stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Shared seed
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Subsequence index (each subsequence is 2^67 outputs)
    #[serde(default)]
    pub subsequence: u64,

    /// Outputs to skip within the subsequence
    #[serde(default)]
    pub offset: u64,

    /// Strategy for jumps past the precomputed tables
    #[serde(default)]
    pub strategy: JumpStrategy,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            seed: XORWOW_DEFAULT_SEED,
            subsequence: 0,
            offset: 0,
            strategy: JumpStrategy::default(),
        }
    }
}

impl StreamConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn build(&self) -> XorwowEngine {
        XorwowEngine::with_strategy(self.seed, self.subsequence, self.offset, self.strategy)
    }
}

/// One stream per worker, worker `i` on subsequence `base_subsequence + i`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamSetConfig {
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Subsequence of worker 0
    #[serde(default)]
    pub base_subsequence: u64,

    /// Number of workers, `1..=MAX_WORKERS`
    pub workers: u64,

    /// Offset applied to every worker's stream
    #[serde(default)]
    pub offset: u64,

    #[serde(default)]
    pub strategy: JumpStrategy,
}

impl StreamSetConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the worker count and that every subsequence index fits in a u64
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 {
            return Err(ConfigError::Invalid(
                "workers must be positive".to_string(),
            ));
        }

        if self.workers > MAX_WORKERS {
            return Err(ConfigError::Invalid(format!(
                "workers must be at most {}, got {}",
                MAX_WORKERS, self.workers
            )));
        }

        if self.base_subsequence.checked_add(self.workers - 1).is_none() {
            return Err(ConfigError::Invalid(format!(
                "subsequence range {} + {} workers overflows u64",
                self.base_subsequence, self.workers
            )));
        }

        Ok(())
    }

    /// Configuration of a single worker's stream
    ///
    /// Returns `None` when `worker` is outside `0..workers`.
    pub fn stream(&self, worker: u64) -> Option<StreamConfig> {
        if worker >= self.workers {
            return None;
        }
        Some(StreamConfig {
            seed: self.seed,
            subsequence: self.base_subsequence.checked_add(worker)?,
            offset: self.offset,
            strategy: self.strategy,
        })
    }

    /// Build every worker's engine, in worker order
    pub fn build(&self) -> Result<Vec<XorwowEngine>, ConfigError> {
        self.validate()?;

        debug!(
            "building {} xorwow streams from seed {} at subsequence {}",
            self.workers, self.seed, self.base_subsequence
        );

        Ok((0..self.workers)
            .filter_map(|worker| self.stream(worker))
            .map(|stream| stream.build())
            .collect())
    }
}
