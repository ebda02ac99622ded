//! Browser-side helpers: toast notifications and the module configuration
//! embedded in the host page.

use common::config::ModuleConfig;
use common::notify::{NotificationKind, Notifier};
use log::warn;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Id of the optional `<script type="application/json">` block holding
/// configuration overrides.
const CONFIG_ELEMENT_ID: &str = "module-config";

/// Reads the module configuration from the host page, falling back to the
/// defaults when the block is absent or malformed.
pub fn module_config() -> ModuleConfig {
    let raw = web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(CONFIG_ELEMENT_ID))
        .and_then(|element| element.text_content());

    match raw {
        Some(raw) => ModuleConfig::from_json(&raw).unwrap_or_else(|e| {
            warn!("{}; using defaults", e);
            ModuleConfig::default()
        }),
        None => ModuleConfig::default(),
    }
}

/// Inline style of a toast of the given kind.
fn toast_style(kind: NotificationKind) -> [(&'static str, &'static str); 10] {
    let background = match kind {
        NotificationKind::Success => "rgba(0, 0, 0, 0.8)",
        NotificationKind::Error => "#da1e28",
    };
    [
        ("position", "fixed"),
        ("bottom", "20px"),
        ("left", "50%"),
        ("transform", "translateX(-50%)"),
        ("background", background),
        ("color", "#fff"),
        ("padding", "10px 20px"),
        ("border-radius", "4px"),
        ("z-index", "10000"),
        ("font-family", "Arial, sans-serif"),
    ]
}

/// Shows a toast at the bottom of the page that disappears after a few
/// seconds. Errors are red, everything else dark.
pub fn show_toast(kind: NotificationKind, message: &str) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) else {
        return;
    };
    toast.set_text_content(Some(message));
    toast.set_class_name(match kind {
        NotificationKind::Success => "toast toast-success",
        NotificationKind::Error => "toast toast-error",
    });

    let html_toast: HtmlElement = toast.unchecked_into();
    let style = html_toast.style();
    for (property, value) in toast_style(kind) {
        style.set_property(property, value).ok();
    }

    if body.append_child(&html_toast).is_ok() {
        wasm_bindgen_futures::spawn_local(async move {
            gloo_timers::future::TimeoutFuture::new(3000).await;
            if let Some(parent) = html_toast.parent_node() {
                parent.remove_child(&html_toast).ok();
            }
        });
    }
}

/// `Notifier` backed by toasts.
#[derive(Clone, Copy, Default)]
pub struct ToastNotifier;

impl Notifier for ToastNotifier {
    fn notify(&self, kind: NotificationKind, title: &str) {
        show_toast(kind, title);
    }
}
