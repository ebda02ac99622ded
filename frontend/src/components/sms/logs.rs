//! SMS log listing with manual "Load more" pagination.
//!
//! Rows are opaque to the client; the table columns are taken from the keys
//! of the first row.

use common::logs::PaginatedLogs;
use common::model::log::LogEntry;
use serde_json::Value;
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::api::RestClient;

pub enum Msg {
    /// The pages changed; re-render.
    Changed,
    LoadMore,
    Refresh,
}

#[derive(Properties, PartialEq)]
pub struct SmsLogsProps {
    pub client: RestClient,
}

pub struct SmsLogs {
    logs: PaginatedLogs<RestClient>,
    mounted: bool,
}

impl Component for SmsLogs {
    type Message = Msg;
    type Properties = SmsLogsProps;

    fn create(ctx: &Context<Self>) -> Self {
        let client = ctx.props().client.clone();
        let config = client.config().clone();
        let logs = PaginatedLogs::new(client, &config);
        let link = ctx.link().clone();
        logs.subscribe(move || link.send_message(Msg::Changed));
        Self {
            logs,
            mounted: false,
        }
    }

    fn update(&mut self, _ctx: &Context<Self>, msg: Self::Message) -> bool {
        match msg {
            Msg::Changed => true,
            Msg::LoadMore => {
                let logs = self.logs.clone();
                spawn_local(async move { logs.next_page().await });
                false
            }
            Msg::Refresh => {
                let logs = self.logs.clone();
                spawn_local(async move { logs.mutate().await });
                false
            }
        }
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        let link = ctx.link();
        let entries = self.logs.entries();

        html! {
            <div class="sms-logs">
                <div class="sms-logs-header">
                    <p class="title">{ "SMS Logs" }</p>
                    <button
                        class="ghost"
                        disabled={self.logs.is_validating()}
                        onclick={link.callback(|_| Msg::Refresh)}
                    >
                        { "Refresh" }
                    </button>
                </div>
                {
                    if self.logs.is_loading() {
                        html! { <div class="loading">{ "Loading logs..." }</div> }
                    } else if entries.is_empty() {
                        html! { <p class="empty-state">{ "There are no logs to display" }</p> }
                    } else {
                        build_table(&entries)
                    }
                }
                {
                    match self.logs.error() {
                        Some(error) => html! { <p class="error-state">{ error.to_string() }</p> },
                        None => html! {},
                    }
                }
                {
                    if !self.logs.is_reaching_end() && !entries.is_empty() {
                        html! {
                            <button
                                class="load-more"
                                disabled={self.logs.is_validating()}
                                onclick={link.callback(|_| Msg::LoadMore)}
                            >
                                { if self.logs.is_validating() { "Loading..." } else { "Load more" } }
                            </button>
                        }
                    } else {
                        html! {}
                    }
                }
            </div>
        }
    }

    fn rendered(&mut self, _ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.mounted {
            self.mounted = true;
            let logs = self.logs.clone();
            spawn_local(async move { logs.load().await });
        }
    }
}

fn columns(entries: &[LogEntry]) -> Vec<String> {
    match entries.first() {
        Some(Value::Object(first)) => first.keys().cloned().collect(),
        _ => vec!["value".to_string()],
    }
}

fn cell(entry: &LogEntry, column: &str) -> String {
    let value = match entry {
        Value::Object(row) => row.get(column).cloned().unwrap_or(Value::Null),
        other => other.clone(),
    };
    match value {
        Value::Null => String::new(),
        Value::String(text) => text,
        other => other.to_string(),
    }
}

fn build_table(entries: &[LogEntry]) -> Html {
    let columns = columns(entries);
    html! {
        <table class="sms-logs-table">
            <thead>
                <tr>{ for columns.iter().map(|column| html! { <th>{ column.clone() }</th> }) }</tr>
            </thead>
            <tbody>
                { for entries.iter().map(|entry| html! {
                    <tr>
                        { for columns.iter().map(|column| html! { <td>{ cell(entry, column) }</td> }) }
                    </tr>
                }) }
            </tbody>
        </table>
    }
}
