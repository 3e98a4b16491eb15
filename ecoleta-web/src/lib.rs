//! Browser entry point of Ecoleta. Build with `wasm-pack build --target web` and serve the result
//! from a page containing a canvas with the id `the_canvas_id`.

use ecoleta::config::Config;
use ecoleta::navigation::Route;
use ecoleta_egui::InitBuilder;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn main() {
    console_error_panic_hook::set_once();

    let route = web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Home);

    let config = Config::load().unwrap_or_default();
    if let Err(err) = InitBuilder::new(config).with_route(route).init() {
        log::error!("Failed to start the application: {err}");
    }
}
