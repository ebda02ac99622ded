//! Providers overview: the configured SMS gateways, which one is the
//! default, and the per-row actions (test, edit, set as default, remove).

mod action_menu;
mod remove_prompt;

use common::error::FetchError;
use common::model::provider::ProviderConfigurations;
use common::notify::ModalLauncher;
use common::providers::{
    overlay_for, prompt_remove, remove_config, set_as_default, ConfigAction, LoadedConfigs,
    OverlayRequest, ProvidersApi,
};
use yew::html::Scope;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::RestClient;
use crate::helpers::ToastNotifier;
use crate::overlay::{close_overlay, open_overlay, OverlaySheet};

use action_menu::ConfigurationsActionMenu;
use remove_prompt::RemoveConfigPrompt;

pub enum Msg {
    ConfigsLoaded(Result<ProviderConfigurations, FetchError>),
    ConfigsUpdated(LoadedConfigs),
    Action(String, ConfigAction),
    PromptRemove(String),
    ConfirmRemove,
    CloseRemovePrompt,
    CloseOverlay,
}

#[derive(Properties, PartialEq)]
pub struct ProvidersOverviewProps {
    pub client: RestClient,
}

pub struct ProvidersOverview {
    loaded: LoadedConfigs,
    overlay: Option<OverlayRequest>,
    overlay_ref: NodeRef,
    /// The overlay content changed and the sheet must be shown once rendered.
    overlay_pending: bool,
    removing: Option<String>,
    mounted: bool,
}

/// Routes modal requests back into the overview, which renders the prompt.
struct ScopeModals(Scope<ProvidersOverview>);

impl ModalLauncher for ScopeModals {
    fn show_remove_config_prompt(&self, config_name: &str) {
        self.0.send_message(Msg::PromptRemove(config_name.to_string()));
    }
}

impl Component for ProvidersOverview {
    type Message = Msg;
    type Properties = ProvidersOverviewProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            loaded: LoadedConfigs::default(),
            overlay: None,
            overlay_ref: NodeRef::default(),
            overlay_pending: false,
            removing: None,
            mounted: false,
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::ConfigsLoaded(result) => {
                self.loaded.finish(result);
                true
            }
            Msg::ConfigsUpdated(loaded) => {
                self.loaded = loaded;
                true
            }
            Msg::Action(name, action) => {
                let Some(config) = self.loaded.configs.configs.iter().find(|c| c.name == name) else {
                    return false;
                };
                match action {
                    ConfigAction::Test | ConfigAction::Edit => {
                        self.overlay = overlay_for(action, config);
                        self.overlay_pending = true;
                        true
                    }
                    ConfigAction::SetAsDefault => {
                        let mut loaded = self.loaded.clone();
                        let client = ctx.props().client.clone();
                        let link = ctx.link().clone();
                        spawn_local(async move {
                            if set_as_default(&client, &ToastNotifier, &mut loaded, &name)
                                .await
                                .is_ok()
                            {
                                link.send_message(Msg::ConfigsUpdated(loaded));
                            }
                        });
                        false
                    }
                    ConfigAction::Remove => {
                        prompt_remove(&ScopeModals(ctx.link().clone()), config);
                        false
                    }
                }
            }
            Msg::PromptRemove(name) => {
                self.removing = Some(name);
                true
            }
            Msg::ConfirmRemove => {
                let Some(name) = self.removing.take() else {
                    return false;
                };
                let mut loaded = self.loaded.clone();
                let client = ctx.props().client.clone();
                let link = ctx.link().clone();
                spawn_local(async move {
                    if remove_config(&client, &ToastNotifier, &mut loaded, &name)
                        .await
                        .is_ok()
                    {
                        link.send_message(Msg::ConfigsUpdated(loaded));
                    }
                });
                true
            }
            Msg::CloseRemovePrompt => {
                self.removing = None;
                true
            }
            Msg::CloseOverlay => {
                close_overlay(self.overlay_ref.clone());
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="providers-overview">
                <p class="title">{ "SMS Providers" }</p>
                { self.build_table(link) }
                {
                    match &self.loaded.error {
                        Some(error) => html! { <p class="error-state">{ error.to_string() }</p> },
                        None => html! {},
                    }
                }
                { self.build_overlay(link) }
                {
                    match &self.removing {
                        Some(name) => html! {
                            <RemoveConfigPrompt
                                config_name={name.clone()}
                                on_confirm={link.callback(|_| Msg::ConfirmRemove)}
                                on_close={link.callback(|_| Msg::CloseRemovePrompt)}
                            />
                        },
                        None => html! {},
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.mounted {
            self.mounted = true;
            self.loaded.is_loading = true;
            let client = ctx.props().client.clone();
            let link = ctx.link().clone();
            spawn_local(async move {
                let result = client.fetch_configs().await;
                link.send_message(Msg::ConfigsLoaded(result));
            });
        }
        if self.overlay_pending {
            self.overlay_pending = false;
            open_overlay(self.overlay_ref.clone());
        }
    }
}

impl ProvidersOverview {
    fn build_table(&self, link: &Scope<Self>) -> Html {
        if self.loaded.is_loading && self.loaded.configs.configs.is_empty() {
            return html! { <div class="loading">{ "Loading configurations..." }</div> };
        }
        if self.loaded.configs.configs.is_empty() {
            return html! { <p class="empty-state">{ "No provider configurations" }</p> };
        }

        let default_name = self.loaded.default_config_name();
        html! {
            <table class="providers-table">
                <thead>
                    <tr>
                        <th>{ "Name" }</th>
                        <th>{ "Default" }</th>
                        <th />
                    </tr>
                </thead>
                <tbody>
                    { for self.loaded.configs.configs.iter().map(|config| {
                        let name = config.name.clone();
                        let on_action = link.callback(move |action| Msg::Action(name.clone(), action));
                        html! {
                            <tr key={config.name.clone()}>
                                <td>{ config.name.clone() }</td>
                                <td>{ if config.is_default(default_name) { "Yes" } else { "" } }</td>
                                <td>
                                    <ConfigurationsActionMenu
                                        config={config.clone()}
                                        default_config_name={default_name.map(str::to_string)}
                                        {on_action}
                                    />
                                </td>
                            </tr>
                        }
                    }) }
                </tbody>
            </table>
        }
    }

    fn build_overlay(&self, link: &Scope<Self>) -> Html {
        let Some(overlay) = &self.overlay else {
            return html! {};
        };
        let state = serde_json::to_string_pretty(&overlay.state).unwrap_or_default();
        html! {
            <OverlaySheet
                title={overlay.title.clone()}
                node_ref={self.overlay_ref.clone()}
                on_close={link.callback(|_| Msg::CloseOverlay)}
            >
                <div class="extension-slot" data-extension-slot={overlay.slot} data-state={state} />
            </OverlaySheet>
        }
    }
}
