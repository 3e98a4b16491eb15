use ecoleta::config::Config;
use ecoleta::navigation::Route;
use ecoleta_egui::InitBuilder;

fn main() -> eframe::Result {
    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("Invalid configuration, using defaults: {err}");
            Config::default()
        }
    };

    let route = std::env::args()
        .nth(1)
        .map(|path| Route::from_path(&path))
        .unwrap_or(Route::Home);

    InitBuilder::new(config)
        .with_native_options(eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_title("Ecoleta")
                .with_inner_size([960.0, 900.0]),
            ..Default::default()
        })
        .with_route(route)
        .init()
}
