use yew::prelude::*;
use log::{error, info};

mod config;
mod error;
mod orbit;
mod timeline;
mod components {
    pub mod orbital_timeline;
}
mod pages {
    pub mod home;
}

use pages::home::Home;
use timeline::TimelineItem;

#[derive(Properties, PartialEq)]
pub struct AppProps {
    pub timeline_data: Vec<TimelineItem>,
}

#[function_component]
fn App(props: &AppProps) -> Html {
    html! {
        <Home timeline_data={props.timeline_data.clone()} />
    }
}


fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let timeline_data = match timeline::sample_timeline() {
        Ok(items) => items,
        Err(e) => {
            // An empty orbit still renders and rotates
            error!("Failed to load timeline data: {}", e);
            Vec::new()
        }
    };

    info!("Starting application with {} timeline items", timeline_data.len());
    yew::Renderer::<App>::with_props(AppProps { timeline_data }).render();
}
