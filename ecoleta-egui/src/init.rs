use ecoleta::config::Config;
use ecoleta::navigation::Route;
use eframe::AppCreator;

use crate::app::{EcoletaApp, Services};

const APP_NAME: &str = "Ecoleta";

/// Starts the application natively or in the browser.
pub struct InitBuilder {
    config: Config,
    route: Route,
    #[cfg(not(target_arch = "wasm32"))]
    native_options: Option<eframe::NativeOptions>,
    #[cfg(target_arch = "wasm32")]
    web_options: Option<eframe::WebOptions>,
}

impl InitBuilder {
    /// Creates a builder for the configuration.
    pub fn new(config: Config) -> Self {
        Self {
            config,
            route: Route::Home,
            #[cfg(not(target_arch = "wasm32"))]
            native_options: None,
            #[cfg(target_arch = "wasm32")]
            web_options: None,
        }
    }

    /// Page shown at start.
    pub fn with_route(mut self, route: Route) -> Self {
        self.route = route;
        self
    }

    /// Options of the native window.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn with_native_options(mut self, options: eframe::NativeOptions) -> Self {
        self.native_options = Some(options);
        self
    }

    /// Options of the web runner.
    #[cfg(target_arch = "wasm32")]
    pub fn with_web_options(mut self, options: eframe::WebOptions) -> Self {
        self.web_options = Some(options);
        self
    }

    /// Runs the application. On native targets blocks until the window is closed.
    pub fn init(self) -> eframe::Result {
        #[cfg(not(target_arch = "wasm32"))]
        {
            self.init_not_wasm()
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.init_wasm()
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn init_not_wasm(self) -> eframe::Result {
        use std::time::Duration;

        use tokio::runtime::Runtime;

        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let rt = Runtime::new().map_err(|err| eframe::Error::AppCreation(Box::new(err)))?;
        let _enter = rt.enter();

        std::thread::spawn(move || {
            rt.block_on(async {
                loop {
                    tokio::time::sleep(Duration::from_secs(3600)).await;
                }
            })
        });

        let native_options = self.native_options.unwrap_or_default();
        let app_creator: AppCreator<'static> = app_creator(self.config, self.route);

        eframe::run_native(APP_NAME, native_options, app_creator)
    }

    #[cfg(target_arch = "wasm32")]
    fn init_wasm(self) -> eframe::Result {
        use eframe::wasm_bindgen::JsCast as _;

        eframe::WebLogger::init(log::LevelFilter::Info).ok();

        let web_options = self.web_options.unwrap_or_default();

        wasm_bindgen_futures::spawn_local(async move {
            let Some(document) = web_sys::window().and_then(|window| window.document()) else {
                log::error!("No document to start the application in");
                return;
            };

            let Some(canvas) = document
                .get_element_by_id("the_canvas_id")
                .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok())
            else {
                log::error!("the_canvas_id is not found or is not a canvas");
                return;
            };

            let app_creator: AppCreator<'static> = app_creator(self.config, self.route);
            let start_result = eframe::WebRunner::new()
                .start(canvas, web_options, app_creator)
                .await;

            if let Some(loading_text) = document.get_element_by_id("loading_text") {
                match start_result {
                    Ok(_) => {
                        loading_text.remove();
                    }
                    Err(e) => {
                        loading_text.set_inner_html(
                            "<p> The app has crashed. See the developer console for details. </p>",
                        );
                        log::error!("Failed to start eframe: {e:?}");
                    }
                }
            }
        });

        Ok(())
    }
}

type DynError = Box<dyn std::error::Error + Send + Sync>;

fn app_creator(config: Config, route: Route) -> AppCreator<'static> {
    Box::new(
        move |cc: &eframe::CreationContext<'_>| -> Result<Box<dyn eframe::App>, DynError> {
            let services = Services::new(config, cc.egui_ctx.clone())?;
            let app = EcoletaApp::new(cc, services).with_route(route);
            Ok(Box::new(app))
        },
    )
}
