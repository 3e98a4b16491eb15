use std::sync::Arc;

use ecoleta::api::{HttpPointsApi, PointsApi};
use ecoleta::config::Config;
use ecoleta::form::Effect;
use ecoleta::http::HttpClient;
use ecoleta::navigation::{History, Route};
use ecoleta::platform::{LocationService, PlatformLocationService};
use ecoleta::{EcoletaError, Messenger};

use crate::egui_map::StoredView;
use crate::home;
use crate::messenger::ContextMessenger;
use crate::page::CreatePointPage;

const MAP_VIEW_KEY: &str = "ecoleta_map_view";

/// Something the user interface must do in response to user input or a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Open the page, keeping the current one in history.
    Push(Route),
    /// Open the page instead of the current one.
    Replace(Route),
    /// Show a message.
    Notice(String),
}

impl From<Effect> for Action {
    fn from(effect: Effect) -> Self {
        match effect {
            Effect::Notice(text) => Action::Notice(text),
            Effect::Navigate(route) => Action::Replace(route),
        }
    }
}

/// Shared clients and services used by the pages.
#[derive(Clone)]
pub struct Services {
    /// Application configuration.
    pub config: Config,
    /// HTTP client for tiles and images.
    pub client: HttpClient,
    /// Backend and geography API.
    pub api: Arc<dyn PointsApi>,
    /// Device location.
    pub location: Arc<dyn LocationService>,
    /// Repaint requests from background tasks.
    pub messenger: Arc<dyn Messenger>,
}

impl Services {
    /// Creates the HTTP based services for the configuration.
    pub fn new(config: Config, ctx: egui::Context) -> Result<Self, EcoletaError> {
        let client = HttpClient::new()?;
        #[cfg(not(target_arch = "wasm32"))]
        let client = match &config.tile_cache {
            Some(folder) => client.with_file_cache(ecoleta::cache::FileCache::new(folder)?),
            None => client,
        };

        Ok(Self {
            api: Arc::new(HttpPointsApi::new(client.clone(), config.clone())),
            location: Arc::new(PlatformLocationService::from_config(&config)),
            messenger: Arc::new(ContextMessenger::new(ctx)),
            client,
            config,
        })
    }
}

/// The Ecoleta application: the home page and the registration page.
pub struct EcoletaApp {
    services: Services,
    history: History,
    page: Option<CreatePointPage>,
    page_error: Option<String>,
    stored_view: Option<StoredView>,
    notice: Option<String>,
}

impl EcoletaApp {
    /// Creates the application, restoring the map view saved by a previous run.
    pub fn new(cc: &eframe::CreationContext<'_>, services: Services) -> Self {
        let stored_view = cc
            .storage
            .and_then(|storage| eframe::get_value::<StoredView>(storage, MAP_VIEW_KEY));
        log::debug!("Restored map view: {stored_view:?}");

        Self {
            services,
            history: History::default(),
            page: None,
            page_error: None,
            stored_view,
            notice: None,
        }
    }

    /// Opens the application at the given route.
    pub fn with_route(mut self, route: Route) -> Self {
        self.history = History::new(route);
        self
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Push(route) => self.history.push(route),
            Action::Replace(route) => self.history.replace(route),
            Action::Notice(text) => self.notice = Some(text),
        }

        if self.history.current() != Route::CreatePoint {
            self.close_page();
        }
    }

    fn close_page(&mut self) {
        if let Some(page) = self.page.take() {
            self.stored_view = page.stored_view().or(self.stored_view);
        }
        self.page_error = None;
    }

    fn show_create_point(&mut self, ui: &mut egui::Ui) -> Vec<Action> {
        if self.page.is_none() && self.page_error.is_none() {
            match CreatePointPage::new(&self.services, self.stored_view) {
                Ok(page) => self.page = Some(page),
                Err(err) => {
                    log::error!("Failed to open the registration page: {err}");
                    self.page_error = Some(err.to_string());
                }
            }
        }

        match (&mut self.page, &self.page_error) {
            (Some(page), _) => page.show(ui),
            (None, Some(error)) => {
                ui.label(format!("Não foi possível abrir a página: {error}"));
                if ui.link("Voltar para home").clicked() {
                    vec![Action::Push(Route::Home)]
                } else {
                    vec![]
                }
            }
            (None, None) => vec![],
        }
    }

    fn show_notice(&mut self, ctx: &egui::Context) {
        let Some(text) = &self.notice else {
            return;
        };

        let mut closed = false;
        egui::Window::new("Ecoleta")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(text);
                if ui.button("OK").clicked() {
                    closed = true;
                }
            });

        if closed {
            self.notice = None;
        }
    }
}

impl eframe::App for EcoletaApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let actions = egui::CentralPanel::default()
            .show(ctx, |ui| match self.history.current() {
                Route::Home => home::show(ui).into_iter().collect(),
                Route::CreatePoint => self.show_create_point(ui),
            })
            .inner;

        for action in actions {
            self.apply(action);
        }

        self.show_notice(ctx);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let view = self
            .page
            .as_ref()
            .and_then(CreatePointPage::stored_view)
            .or(self.stored_view);

        if let Some(view) = view {
            eframe::set_value(storage, MAP_VIEW_KEY, &view);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn effects_become_actions() {
        assert_eq!(
            Action::from(Effect::Navigate(Route::Home)),
            Action::Replace(Route::Home)
        );
        assert_eq!(
            Action::from(Effect::Notice("Ponto de coleta criado".to_string())),
            Action::Notice("Ponto de coleta criado".to_string())
        );
    }
}
