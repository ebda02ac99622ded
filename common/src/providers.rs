//! Per-configuration actions of the SMS providers overview.

use async_trait::async_trait;
use log::{error, info};
use serde_json::{Map, Value};

use crate::error::FetchError;
use crate::model::provider::{ProviderConfiguration, ProviderConfigurations};
use crate::notify::{ModalLauncher, NotificationKind, Notifier};
use crate::requests::SetDefaultConfigRequest;

pub const DEFAULT_CONFIG_UPDATED: &str = "Default config updated";
pub const DEFAULT_CONFIG_NOT_UPDATED: &str = "Failed to update default config";
pub const CONFIG_REMOVED: &str = "Configuration removed";
pub const CONFIG_NOT_REMOVED: &str = "Failed to remove configuration";

/// Extension slot rendered inside the edit overlay.
pub const EDIT_CONFIG_SLOT: &str = "add-provider-config-form-slot";
/// Extension slot rendered inside the test overlay.
pub const TEST_CONFIG_SLOT: &str = "test-provider-config-form-slot";

#[async_trait(?Send)]
pub trait ProvidersApi {
    async fn fetch_configs(&self) -> Result<ProviderConfigurations, FetchError>;
    async fn set_default_config(&self, request: &SetDefaultConfigRequest) -> Result<(), FetchError>;
    /// Replaces the whole collection on the server.
    async fn save_configs(&self, configs: &ProviderConfigurations) -> Result<(), FetchError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigAction {
    Test,
    Edit,
    SetAsDefault,
    Remove,
}

impl ConfigAction {
    pub fn label(self) -> &'static str {
        match self {
            ConfigAction::Test => "Test",
            ConfigAction::Edit => "Edit",
            ConfigAction::SetAsDefault => "Set as default",
            ConfigAction::Remove => "Remove",
        }
    }

    pub fn id(self) -> &'static str {
        match self {
            ConfigAction::Test => "testConfiguration",
            ConfigAction::Edit => "editConfiguration",
            ConfigAction::SetAsDefault => "setAsDefault",
            ConfigAction::Remove => "removeConfiguration",
        }
    }

    pub fn is_delete(self) -> bool {
        self == ConfigAction::Remove
    }
}

/// Menu entries for `config`, in display order. The current default cannot
/// be made default again, so that entry is left out for it.
pub fn actions_for(config: &ProviderConfiguration, default_config_name: Option<&str>) -> Vec<ConfigAction> {
    let mut actions = vec![ConfigAction::Test, ConfigAction::Edit];
    if !config.is_default(default_config_name) {
        actions.push(ConfigAction::SetAsDefault);
    }
    actions.push(ConfigAction::Remove);
    actions
}

/// What an edit or test overlay is opened with.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayRequest {
    pub title: String,
    pub slot: &'static str,
    /// `providerName` followed by the configuration itself.
    pub state: Map<String, Value>,
}

pub fn overlay_for(action: ConfigAction, config: &ProviderConfiguration) -> Option<OverlayRequest> {
    let (title, slot) = match action {
        ConfigAction::Edit => (format!("Edit {}", config.name), EDIT_CONFIG_SLOT),
        ConfigAction::Test => (format!("Test {}", config.name), TEST_CONFIG_SLOT),
        ConfigAction::SetAsDefault | ConfigAction::Remove => return None,
    };
    let mut state = Map::new();
    state.insert("providerName".to_string(), Value::String(config.name.clone()));
    state.insert("name".to_string(), Value::String(config.name.clone()));
    for (key, value) in &config.payload {
        state.insert(key.clone(), value.clone());
    }
    Some(OverlayRequest { title, slot, state })
}

/// Opens the confirmation modal that removes `config`.
pub fn prompt_remove<M: ModalLauncher + ?Sized>(modals: &M, config: &ProviderConfiguration) {
    modals.show_remove_config_prompt(&config.name);
}

/// Configuration collection held by the providers overview.
#[derive(Debug, Clone, Default)]
pub struct LoadedConfigs {
    pub configs: ProviderConfigurations,
    pub is_loading: bool,
    pub error: Option<FetchError>,
}

impl LoadedConfigs {
    pub fn default_config_name(&self) -> Option<&str> {
        self.configs.default_config_name.as_deref()
    }

    pub fn finish(&mut self, result: Result<ProviderConfigurations, FetchError>) {
        self.is_loading = false;
        match result {
            Ok(configs) => {
                self.configs = configs;
                self.error = None;
            }
            Err(e) => self.error = Some(e),
        }
    }

    /// Re-fetches the collection from the server.
    pub async fn refresh<A: ProvidersApi + ?Sized>(&mut self, api: &A) {
        self.is_loading = true;
        let result = api.fetch_configs().await;
        self.finish(result);
    }
}

/// Makes `config_name` the default configuration.
///
/// On success the collection is refreshed and the user notified; on failure
/// only the notification happens and `configs` stays as it was.
pub async fn set_as_default<A, N>(
    api: &A,
    notifier: &N,
    configs: &mut LoadedConfigs,
    config_name: &str,
) -> Result<(), FetchError>
where
    A: ProvidersApi + ?Sized,
    N: Notifier + ?Sized,
{
    let request = SetDefaultConfigRequest {
        configs: configs.configs.configs.clone(),
        default_config_name: config_name.to_string(),
    };
    match api.set_default_config(&request).await {
        Ok(()) => {
            info!("{} is now the default provider configuration", config_name);
            configs.refresh(api).await;
            notifier.notify(NotificationKind::Success, DEFAULT_CONFIG_UPDATED);
            Ok(())
        }
        Err(e) => {
            error!("failed to make {} the default configuration: {}", config_name, e);
            notifier.notify(NotificationKind::Error, DEFAULT_CONFIG_NOT_UPDATED);
            Err(e)
        }
    }
}

/// The collection with `config_name` left out. Removing the default leaves
/// no default behind.
pub fn without_config(configs: &ProviderConfigurations, config_name: &str) -> ProviderConfigurations {
    ProviderConfigurations {
        default_config_name: configs
            .default_config_name
            .clone()
            .filter(|name| name != config_name),
        configs: configs
            .configs
            .iter()
            .filter(|config| config.name != config_name)
            .cloned()
            .collect(),
    }
}

/// Confirmed removal from the remove prompt. Mirrors [`set_as_default`]:
/// refresh and notify on success, notify only on failure.
pub async fn remove_config<A, N>(
    api: &A,
    notifier: &N,
    configs: &mut LoadedConfigs,
    config_name: &str,
) -> Result<(), FetchError>
where
    A: ProvidersApi + ?Sized,
    N: Notifier + ?Sized,
{
    let remaining = without_config(&configs.configs, config_name);
    match api.save_configs(&remaining).await {
        Ok(()) => {
            info!("removed provider configuration {}", config_name);
            configs.refresh(api).await;
            notifier.notify(NotificationKind::Success, CONFIG_REMOVED);
            Ok(())
        }
        Err(e) => {
            error!("failed to remove configuration {}: {}", config_name, e);
            notifier.notify(NotificationKind::Error, CONFIG_NOT_REMOVED);
            Err(e)
        }
    }
}
