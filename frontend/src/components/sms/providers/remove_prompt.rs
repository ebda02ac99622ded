use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RemovePromptProps {
    pub config_name: String,
    pub on_confirm: Callback<()>,
    pub on_close: Callback<()>,
}

/// Confirmation modal shown before a configuration is removed.
#[function_component(RemoveConfigPrompt)]
pub fn remove_config_prompt(props: &RemovePromptProps) -> Html {
    let on_confirm = props.on_confirm.reform(|_: MouseEvent| ());
    let on_close = props.on_close.reform(|_: MouseEvent| ());

    html! {
        <div class="modal-backdrop">
            <div class="modal" role="dialog" aria-modal="true">
                <h3>{ "Remove configuration" }</h3>
                <p>{ format!("Are you sure you want to remove {}?", props.config_name) }</p>
                <div class="button-set">
                    <button class="secondary" onclick={on_close}>{ "Cancel" }</button>
                    <button class="danger" onclick={on_confirm}>{ "Remove" }</button>
                </div>
            </div>
        </div>
    }
}
