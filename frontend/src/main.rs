use log::info;
use yew::prelude::*;

mod config;
mod engine;
mod hooks;
mod web;
mod components {
    pub mod header;
    pub mod scroll_reveal;
    pub mod strike_list;
    pub mod text_reveal;
    pub mod theme_region;
}
mod pages {
    pub mod landing;
}

use components::header::Header;
use engine::Theme;
use hooks::use_engine_root;
use pages::landing::Landing;
use web::ScrollEngine;

#[function_component]
fn App() -> Html {
    let (engine, theme) = use_engine_root();

    html! {
        <ContextProvider<ScrollEngine> context={engine}>
            <ContextProvider<Theme> context={theme}>
                <div class={classes!("page", theme.as_str())}>
                    <style>
                        {r#"
                            body {
                                margin: 0;
                                font-family: system-ui, -apple-system, sans-serif;
                            }
                            .page {
                                min-height: 100vh;
                                background-color: #ffffff;
                                --text-strong: #18181b;
                                --text-muted: #52525b;
                                --text-faint: rgba(0, 0, 0, 0.2);
                                --border: #e4e4e7;
                                transition: background-color 1s ease-in-out;
                            }
                            .page.dark {
                                background-color: #050505;
                                --text-strong: #ffffff;
                                --text-muted: #a1a1aa;
                                --text-faint: rgba(255, 255, 255, 0.2);
                                --border: rgba(255, 255, 255, 0.1);
                            }
                        "#}
                    </style>
                    <Header />
                    <Landing />
                </div>
            </ContextProvider<Theme>>
        </ContextProvider<ScrollEngine>>
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    if let Err(err) = console_log::init_with_level(config::log_level()) {
        web_sys::console::error_1(&format!("error initializing log: {}", err).into());
    }

    info!("Starting application");
    yew::Renderer::<App>::new().render();
}
