//! Module configuration.
//!
//! The host page may override any value through a JSON document; every field
//! has a default so an empty document (or none at all) is valid.

use log::warn;
use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModuleConfig {
    /// Rows requested per log page.
    pub configuration_page_size: usize,
    pub logs_endpoint: String,
    pub templates_endpoint: String,
    pub configs_endpoint: String,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            configuration_page_size: DEFAULT_PAGE_SIZE,
            logs_endpoint: "/ws/sms/log".to_string(),
            templates_endpoint: "/ws/messages/templates".to_string(),
            configs_endpoint: "/ws/sms/configs".to_string(),
        }
    }
}

impl ModuleConfig {
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: ModuleConfig = serde_json::from_str(raw)?;
        Ok(config.sanitized())
    }

    /// A zero page size would make every page look complete; it falls back
    /// to the default.
    fn sanitized(mut self) -> Self {
        if self.configuration_page_size == 0 {
            warn!(
                "configurationPageSize must be positive, using {}",
                DEFAULT_PAGE_SIZE
            );
            self.configuration_page_size = DEFAULT_PAGE_SIZE;
        }
        self
    }

    pub fn page_size(&self) -> usize {
        self.configuration_page_size.max(1)
    }
}
