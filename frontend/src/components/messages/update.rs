use common::templates::{submit_templates, SubmitOutcome};
use log::error;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::helpers::ToastNotifier;

use super::load_templates;
use super::messages::Msg;
use super::state::MessagesDashboard;

pub fn update(component: &mut MessagesDashboard, ctx: &Context<MessagesDashboard>, msg: Msg) -> bool {
    match msg {
        Msg::TemplatesLoaded(result) => {
            component.loaded.finish(result);
            component
                .form
                .seed(&component.loaded.templates, component.loaded.revision);
            if component.active_tab >= component.loaded.templates.len() {
                component.active_tab = 0;
            }
            true
        }
        Msg::SelectTab(index) => {
            component.active_tab = index;
            true
        }
        Msg::EditField {
            uuid,
            field_type,
            input,
        } => {
            let Some(template) = component.loaded.templates.iter().find(|t| t.uuid == uuid) else {
                return false;
            };
            let Some(current) = component.field_value(template, &field_type) else {
                return false;
            };
            component
                .form
                .set_field(&uuid, &field_type, current.with_input(&input));
            true
        }
        Msg::Cancel => {
            component
                .form
                .reset(&component.loaded.templates, component.loaded.revision);
            true
        }
        Msg::Save => {
            if component.saving {
                return false;
            }
            component.saving = true;

            let client = ctx.props().client.clone();
            let link = ctx.link().clone();
            let templates = component.loaded.templates.clone();
            let data = component.form.data().clone();
            spawn_local(async move {
                let outcome = submit_templates(&client, &ToastNotifier, &templates, &data, |e| {
                    error!("invalid templates form at {}", e.path())
                })
                .await;
                link.send_message(Msg::SaveFinished(outcome));
            });
            true
        }
        Msg::SaveFinished(outcome) => {
            component.saving = false;
            if outcome == SubmitOutcome::Saved {
                load_templates(component, ctx);
            }
            true
        }
    }
}
