//! # Client configuration: `market.toml`
//!
//! ```toml
//! [api]
//! base_url = "http://localhost:5000"   # empty = same origin as the page
//!
//! [upload]
//! max_image_bytes = 10485760   # per file, 10 MiB
//! max_images = 5
//! max_total_bytes = 41943040   # per post, 40 MiB
//! ```
//!
//! Every section defaults, so a missing or empty file equals
//! [`MarketConfig::default`]. The upload limits mirror what the backend
//! enforces; checking them client-side saves a doomed upload.

use std::path::Path;

use serde::{Deserialize, Serialize};

const MIB: u64 = 1024 * 1024;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Origin the REST endpoints hang off. Empty means "same origin".
    #[serde(default)]
    pub base_url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UploadConfig {
    #[serde(default = "default_max_image_bytes")]
    pub max_image_bytes: u64,
    #[serde(default = "default_max_images")]
    pub max_images: usize,
    #[serde(default = "default_max_total_bytes")]
    pub max_total_bytes: u64,
}

fn default_max_image_bytes() -> u64 {
    10 * MIB
}

fn default_max_images() -> usize {
    5
}

fn default_max_total_bytes() -> u64 {
    40 * MIB
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: default_max_image_bytes(),
            max_images: default_max_images(),
            max_total_bytes: default_max_total_bytes(),
        }
    }
}

impl MarketConfig {
    /// Config pointing at the given API origin with default limits.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: ApiConfig {
                base_url: base_url.into(),
            },
            upload: UploadConfig::default(),
        }
    }

    /// Builder method to override the per-image ceiling.
    pub fn with_max_image_bytes(mut self, bytes: u64) -> Self {
        self.upload.max_image_bytes = bytes;
        self
    }

    pub fn filename() -> &'static str {
        "market.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Read the config at `path`. A missing or unparsable file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let Ok(text) = std::fs::read_to_string(path) else {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        };
        Self::from_toml(&text).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            Self::default()
        })
    }
}
