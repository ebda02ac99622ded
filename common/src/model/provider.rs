use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Settings for one outbound messaging provider (an SMS gateway account).
///
/// `name` identifies the configuration; the rest of the payload belongs to
/// the provider and is carried untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderConfiguration {
    pub name: String,
    #[serde(flatten)]
    pub payload: Map<String, Value>,
}

impl ProviderConfiguration {
    /// A configuration is the default one when its name matches exactly.
    pub fn is_default(&self, default_config_name: Option<&str>) -> bool {
        default_config_name == Some(self.name.as_str())
    }
}

/// Configuration collection as served by the configs endpoint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderConfigurations {
    #[serde(default)]
    pub default_config_name: Option<String>,
    #[serde(default)]
    pub configs: Vec<ProviderConfiguration>,
}

impl ProviderConfigurations {
    pub fn default_config(&self) -> Option<&ProviderConfiguration> {
        let name = self.default_config_name.as_deref();
        self.configs.iter().find(|config| config.is_default(name))
    }
}
