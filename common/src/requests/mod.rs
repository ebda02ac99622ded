use serde::{Deserialize, Serialize};

use crate::model::provider::ProviderConfiguration;
use crate::model::template::Template;

/// Payload of the templates save endpoint. Always carries the full set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveTemplatesRequest {
    pub templates: Vec<Template>,
}

/// Payload sent to make `default_config_name` the default provider
/// configuration. The whole collection travels with it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDefaultConfigRequest {
    pub configs: Vec<ProviderConfiguration>,
    pub default_config_name: String,
}
