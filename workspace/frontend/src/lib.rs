use yew::prelude::*;

mod components;
pub mod api_client;
pub mod settings;

use components::layout::dashboard::Dashboard;

#[function_component(App)]
pub fn app() -> Html {
    // Settings are read once and passed down as a prop
    let backend_url = use_memo((), |_| settings::get_settings().backend_url);

    html! {
        <Dashboard backend_url={AttrValue::from((*backend_url).clone())} />
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Road Safety Dashboard Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("Backend URL: {}", settings.backend_url);
    log::debug!("Debug mode: {}", settings.debug_mode);

    log::trace!("Initializing Yew renderer");
    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
