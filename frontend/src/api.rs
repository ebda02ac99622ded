//! REST transport for the messages and SMS endpoints.

use std::rc::Rc;

use async_trait::async_trait;
use common::config::ModuleConfig;
use common::error::FetchError;
use common::logs::LogSource;
use common::model::log::LogsResponse;
use common::model::provider::ProviderConfigurations;
use common::model::template::Template;
use common::providers::ProvidersApi;
use common::requests::{SaveTemplatesRequest, SetDefaultConfigRequest};
use common::templates::TemplatesApi;
use gloo_net::http::{Request, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

#[derive(Clone, PartialEq)]
pub struct RestClient {
    config: Rc<ModuleConfig>,
}

impl RestClient {
    pub fn new(config: ModuleConfig) -> Self {
        Self {
            config: Rc::new(config),
        }
    }

    pub fn config(&self) -> &ModuleConfig {
        &self.config
    }
}

fn check_status(response: Response, url: &str) -> Result<Response, FetchError> {
    if response.ok() {
        Ok(response)
    } else {
        Err(FetchError::Status {
            status: response.status(),
            url: url.to_string(),
        })
    }
}

async fn get_json<T: DeserializeOwned>(url: &str) -> Result<T, FetchError> {
    let response = Request::get(url)
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    check_status(response, url)?
        .json::<T>()
        .await
        .map_err(|e| FetchError::Decode(e.to_string()))
}

async fn post_json<B: Serialize>(url: &str, body: &B) -> Result<(), FetchError> {
    let response = Request::post(url)
        .json(body)
        .map_err(|e| FetchError::Decode(e.to_string()))?
        .send()
        .await
        .map_err(|e| FetchError::Network(e.to_string()))?;
    check_status(response, url).map(|_| ())
}

#[async_trait(?Send)]
impl LogSource for RestClient {
    async fn fetch_page(&self, key: &str) -> Result<LogsResponse, FetchError> {
        get_json(key).await
    }
}

#[async_trait(?Send)]
impl TemplatesApi for RestClient {
    async fn fetch_templates(&self) -> Result<Vec<Template>, FetchError> {
        get_json(&self.config.templates_endpoint).await
    }

    async fn save_templates(&self, request: &SaveTemplatesRequest) -> Result<(), FetchError> {
        post_json(&self.config.templates_endpoint, request).await
    }
}

#[async_trait(?Send)]
impl ProvidersApi for RestClient {
    async fn fetch_configs(&self) -> Result<ProviderConfigurations, FetchError> {
        get_json(&self.config.configs_endpoint).await
    }

    async fn set_default_config(&self, request: &SetDefaultConfigRequest) -> Result<(), FetchError> {
        post_json(&self.config.configs_endpoint, request).await
    }

    async fn save_configs(&self, configs: &ProviderConfigurations) -> Result<(), FetchError> {
        post_json(&self.config.configs_endpoint, configs).await
    }
}
