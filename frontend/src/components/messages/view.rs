//! Rendering of the messages dashboard: title, the template tabs (or a
//! skeleton while loading), an error state and the Cancel/Save buttons.

use common::model::template::Template;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::MessagesDashboard;

pub fn view(component: &MessagesDashboard, ctx: &Context<MessagesDashboard>) -> Html {
    let link = ctx.link();
    let on_submit = link.callback(|e: SubmitEvent| {
        e.prevent_default();
        Msg::Save
    });

    html! {
        <form class="messages-dashboard" onsubmit={on_submit}>
            <p class="title">{ "Messages Settings" }</p>
            <div class="tab-container">
                <p class="heading">{ "Default Patient messages settings" }</p>
                <div class="tab">
                    {
                        if component.loaded.is_loading && component.loaded.templates.is_empty() {
                            build_skeleton()
                        } else {
                            build_tabs(component, link)
                        }
                    }
                    { build_error(component) }
                </div>
            </div>
            <div class="button-set">
                <button type="button" class="secondary" onclick={link.callback(|_| Msg::Cancel)}>
                    { "Cancel" }
                </button>
                <button type="submit" class="primary" disabled={component.saving}>
                    { "Save" }
                </button>
            </div>
        </form>
    }
}

fn build_skeleton() -> Html {
    html! {
        <div class="tabs-skeleton" style="max-width: 100%;">
            { for (0..3).map(|_| html! { <div class="skeleton-tab" /> }) }
        </div>
    }
}

fn build_tabs(component: &MessagesDashboard, link: &Scope<MessagesDashboard>) -> Html {
    html! {
        <div class="vertical-tabs">
            <div class="tab-list" role="tablist">
                { for component.loaded.templates.iter().enumerate().map(|(index, template)| {
                    let selected = index == component.active_tab;
                    html! {
                        <button
                            type="button"
                            role="tab"
                            id={template.uuid.clone()}
                            key={template.uuid.clone()}
                            class={classes!("tab-btn", selected.then_some("active"))}
                            onclick={link.callback(move |_| Msg::SelectTab(index))}
                        >
                            { template.name.clone() }
                        </button>
                    }
                }) }
            </div>
            <div class="tab-panel" role="tabpanel">
                {
                    match component.active_template() {
                        Some(template) => build_template_panel(component, template, link),
                        None => html! {},
                    }
                }
            </div>
        </div>
    }
}

fn build_template_panel(
    component: &MessagesDashboard,
    template: &Template,
    link: &Scope<MessagesDashboard>,
) -> Html {
    html! {
        <div class="messages-template">
            { for template.template_fields.iter().map(|field| {
                let value = component
                    .field_value(template, &field.field_type)
                    .map(|value| value.display())
                    .unwrap_or_default();
                let input_id = format!("{}-{}", template.uuid, field.field_type);
                let uuid = template.uuid.clone();
                let field_type = field.field_type.clone();
                let on_input = link.callback(move |e: InputEvent| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::EditField {
                        uuid: uuid.clone(),
                        field_type: field_type.clone(),
                        input: input.value(),
                    }
                });
                html! {
                    <div class="template-field" key={input_id.clone()}>
                        <label for={input_id.clone()}>{ field.field_type.clone() }</label>
                        <input id={input_id} type="text" value={value} oninput={on_input} />
                    </div>
                }
            }) }
        </div>
    }
}

fn build_error(component: &MessagesDashboard) -> Html {
    match &component.loaded.error {
        Some(error) => html! {
            <div class="error-state">
                <h4>{ "Error" }</h4>
                <p>{ error.to_string() }</p>
            </div>
        },
        None => html! {},
    }
}
