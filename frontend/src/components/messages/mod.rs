//! Messages settings dashboard: one tab per default patient message template,
//! with an input per template field and a single Save for the whole set.
//!
//! Templates are fetched on first render. Every successful load bumps the
//! template revision, and the form is seeded once per revision so edits in
//! progress are not lost to re-renders.

use common::templates::TemplatesApi;
use yew::platform::spawn_local;
use yew::prelude::*;

mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::MessagesDashboardProps;
pub use state::MessagesDashboard;

impl Component for MessagesDashboard {
    type Message = Msg;
    type Properties = MessagesDashboardProps;

    fn create(_ctx: &Context<Self>) -> Self {
        MessagesDashboard::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.mounted {
            self.mounted = true;
            load_templates(self, ctx);
        }
    }
}

/// Fetches the templates and posts the result back as `Msg::TemplatesLoaded`.
pub(crate) fn load_templates(component: &mut MessagesDashboard, ctx: &Context<MessagesDashboard>) {
    component.loaded.start_loading();
    let client = ctx.props().client.clone();
    let link = ctx.link().clone();
    spawn_local(async move {
        let result = client.fetch_templates().await;
        link.send_message(Msg::TemplatesLoaded(result));
    });
}
