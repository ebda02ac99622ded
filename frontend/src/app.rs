use crate::api::RestClient;
use crate::components::messages::MessagesDashboard;
use crate::components::sms::logs::SmsLogs;
use crate::components::sms::providers::ProvidersOverview;
use crate::helpers::module_config;
use yew::{classes, html, Component, Context, Html};

#[derive(Clone, Copy, PartialEq)]
pub enum Page {
    Messages,
    SmsLogs,
    SmsProviders,
}

impl Page {
    const ALL: [Page; 3] = [Page::Messages, Page::SmsLogs, Page::SmsProviders];

    fn label(self) -> &'static str {
        match self {
            Page::Messages => "Messages",
            Page::SmsLogs => "SMS logs",
            Page::SmsProviders => "SMS providers",
        }
    }
}

pub struct App {
    client: RestClient,
    page: Page,
}

impl Component for App {
    type Message = Page;
    type Properties = ();

    fn create(_ctx: &Context<Self>) -> Self {
        Self {
            client: RestClient::new(module_config()),
            page: Page::Messages,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, page: Self::Message) -> bool {
        if self.page == page {
            return false;
        }
        self.page = page;
        true
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        html! {
            <div class="omrs-main-content">
                <nav class="tab-bar">
                    { for Page::ALL.into_iter().map(|page| html! {
                        <button
                            class={classes!("tab-btn", (page == self.page).then_some("active"))}
                            onclick={link.callback(move |_| page)}
                        >
                            { page.label() }
                        </button>
                    }) }
                </nav>
                {
                    match self.page {
                        Page::Messages => html! { <MessagesDashboard client={self.client.clone()} /> },
                        Page::SmsLogs => html! { <SmsLogs client={self.client.clone()} /> },
                        Page::SmsProviders => html! { <ProvidersOverview client={self.client.clone()} /> },
                    }
                }
            </div>
        }
    }
}
