#![allow(dead_code)]

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use common::error::FetchError;
use common::model::provider::ProviderConfigurations;
use common::model::template::Template;
use common::notify::{ModalLauncher, NotificationKind, Notifier};
use common::providers::ProvidersApi;
use common::requests::{SaveTemplatesRequest, SetDefaultConfigRequest};
use common::templates::TemplatesApi;

#[derive(Default)]
pub struct RecordingNotifier {
    pub notifications: RefCell<Vec<(NotificationKind, String)>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&self, kind: NotificationKind, title: &str) {
        self.notifications.borrow_mut().push((kind, title.to_string()));
    }
}

#[derive(Default)]
pub struct RecordingModals {
    pub prompts: RefCell<Vec<String>>,
}

impl ModalLauncher for RecordingModals {
    fn show_remove_config_prompt(&self, config_name: &str) {
        self.prompts.borrow_mut().push(config_name.to_string());
    }
}

/// In-memory stand-in for the messages and SMS endpoints.
#[derive(Default)]
pub struct FakeServer {
    pub templates: RefCell<Vec<Template>>,
    pub saved: RefCell<Vec<SaveTemplatesRequest>>,
    pub configs: RefCell<ProviderConfigurations>,
    pub default_requests: RefCell<Vec<SetDefaultConfigRequest>>,
    pub fail_writes: Cell<bool>,
}

impl FakeServer {
    fn write_error(&self) -> Result<(), FetchError> {
        if self.fail_writes.get() {
            Err(FetchError::Status {
                status: 500,
                url: "/ws".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

#[async_trait(?Send)]
impl TemplatesApi for FakeServer {
    async fn fetch_templates(&self) -> Result<Vec<Template>, FetchError> {
        Ok(self.templates.borrow().clone())
    }

    async fn save_templates(&self, request: &SaveTemplatesRequest) -> Result<(), FetchError> {
        self.saved.borrow_mut().push(request.clone());
        self.write_error()?;
        *self.templates.borrow_mut() = request.templates.clone();
        Ok(())
    }
}

#[async_trait(?Send)]
impl ProvidersApi for FakeServer {
    async fn fetch_configs(&self) -> Result<ProviderConfigurations, FetchError> {
        Ok(self.configs.borrow().clone())
    }

    async fn set_default_config(&self, request: &SetDefaultConfigRequest) -> Result<(), FetchError> {
        self.default_requests.borrow_mut().push(request.clone());
        self.write_error()?;
        self.configs.borrow_mut().default_config_name = Some(request.default_config_name.clone());
        Ok(())
    }

    async fn save_configs(&self, configs: &ProviderConfigurations) -> Result<(), FetchError> {
        self.write_error()?;
        *self.configs.borrow_mut() = configs.clone();
        Ok(())
    }
}
