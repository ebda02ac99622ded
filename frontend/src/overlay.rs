//! Side sheet used to host the edit and test forms of a provider
//! configuration.
//!
//! The sheet is rendered hidden and slides in when the `show` class is
//! added. The class is toggled after a short delay so the browser gets a
//! frame with the hidden state and plays the transition.

use uuid::Uuid;
use yew::prelude::*;

const SHOW_CLASS: &str = "show";
const TRANSITION_DELAY_MS: u32 = 50;

pub struct OverlaySheet {
    id: String,
}

#[derive(Properties, PartialEq)]
pub struct OverlayProps {
    pub title: String,
    pub node_ref: NodeRef,
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub children: Html,
}

impl Component for OverlaySheet {
    type Message = ();
    type Properties = OverlayProps;

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            id: format!("overlay-{}", Uuid::new_v4()),
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let props = ctx.props();
        let on_close = props.on_close.reform(|_: MouseEvent| ());
        html! {
            <aside class="overlay-sheet" id={self.id.clone()} ref={props.node_ref.clone()}>
                <header class="overlay-header">
                    <h2>{ props.title.clone() }</h2>
                    <button class="overlay-close" title="Close" onclick={on_close}>{ "✕" }</button>
                </header>
                <div class="overlay-body">
                    { props.children.clone() }
                </div>
            </aside>
        }
    }
}

pub fn open_overlay(overlay_ref: NodeRef) {
    toggle_later(overlay_ref, true);
}

pub fn close_overlay(overlay_ref: NodeRef) {
    toggle_later(overlay_ref, false);
}

fn toggle_later(overlay_ref: NodeRef, show: bool) {
    wasm_bindgen_futures::spawn_local(async move {
        gloo_timers::future::TimeoutFuture::new(TRANSITION_DELAY_MS).await;
        if let Some(sheet) = overlay_ref.cast::<web_sys::Element>() {
            let classes = sheet.class_list();
            let result = if show {
                classes.add_1(SHOW_CLASS)
            } else {
                classes.remove_1(SHOW_CLASS)
            };
            result.ok();
        }
    });
}
