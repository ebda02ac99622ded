use crate::app::App;

mod api;
mod app;
mod components;
mod helpers;
mod overlay;

fn main() {
    console_log::init_with_level(log::Level::Info).ok();
    yew::Renderer::<App>::new().render();
}
