//! Overflow menu rendered on each provider configuration row.

use common::model::provider::ProviderConfiguration;
use common::providers::{actions_for, ConfigAction};
use yew::prelude::*;

pub enum Msg {
    Toggle,
    Select(ConfigAction),
}

#[derive(Properties, PartialEq)]
pub struct ActionMenuProps {
    pub config: ProviderConfiguration,
    #[prop_or_default]
    pub default_config_name: Option<String>,
    pub on_action: Callback<ConfigAction>,
}

pub struct ConfigurationsActionMenu {
    open: bool,
}

impl Component for ConfigurationsActionMenu {
    type Message = Msg;
    type Properties = ActionMenuProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self { open: false }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Toggle => {
                self.open = !self.open;
                true
            }
            Msg::Select(action) => {
                self.open = false;
                ctx.props().on_action.emit(action);
                true
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let link = ctx.link();
        let actions = actions_for(&props.config, props.default_config_name.as_deref());

        html! {
            <div class="overflow-menu">
                <button
                    class="icon-btn"
                    aria-label="Test/edit/remove configuration"
                    onclick={link.callback(|_| Msg::Toggle)}
                >
                    <i class="material-icons">{ "more_vert" }</i>
                </button>
                {
                    if self.open {
                        html! {
                            <ul class="overflow-menu-options" role="menu">
                                { for actions.into_iter().enumerate().map(|(index, action)| html! {
                                    <li
                                        role="menuitem"
                                        id={action.id()}
                                        class={classes!(
                                            "menu-item",
                                            (index > 0).then_some("has-divider"),
                                            action.is_delete().then_some("danger")
                                        )}
                                        onclick={link.callback(move |_| Msg::Select(action))}
                                    >
                                        { action.label() }
                                    </li>
                                }) }
                            </ul>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }
}
