//! Locator configuration.
//!
//! Defaults match the stock light gun setup (vendor `0xd209`, any product,
//! `/dev/input/event0..19`). A TOML file can override any field:
//!
//! ```toml
//! vendor_id = 0xd209
//! product_id = 0x1601
//! max_candidates = 32
//! node_prefix = "/dev/input/event"
//! ```

use crate::codes;
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which product ids a scan accepts from the target vendor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProductFilter {
    #[default]
    Any,
    Exact(u16),
}

impl ProductFilter {
    pub fn matches(self, product: u16) -> bool {
        match self {
            ProductFilter::Any => true,
            ProductFilter::Exact(p) => p == product,
        }
    }
}

impl From<Option<u16>> for ProductFilter {
    fn from(p: Option<u16>) -> Self {
        p.map_or(ProductFilter::Any, ProductFilter::Exact)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LocatorConfig {
    /// Vendor id a candidate must report.
    pub vendor_id: u16,
    /// Product id to accept; absent means any.
    pub product_id: Option<u16>,
    /// Candidates `0..max_candidates` are visited, in order.
    pub max_candidates: u32,
    /// Node path minus the index, e.g. `/dev/input/event`.
    pub node_prefix: String,
}

impl Default for LocatorConfig {
    fn default() -> Self {
        Self {
            vendor_id: codes::LIGHTGUN_VENDOR_ID,
            product_id: None,
            max_candidates: codes::DEFAULT_MAX_CANDIDATES,
            node_prefix: "/dev/input/event".to_string(),
        }
    }
}

impl LocatorConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_candidates == 0 {
            return Err(ConfigError::Invalid("max_candidates must be at least 1".into()));
        }
        if self.node_prefix.is_empty() {
            return Err(ConfigError::Invalid("node_prefix must not be empty".into()));
        }
        Ok(())
    }

    /// Product filter configured for this locator.
    pub fn product(&self) -> ProductFilter {
        self.product_id.into()
    }
}
