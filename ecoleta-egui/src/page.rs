use std::sync::Arc;

use ecoleta::async_runtime;
use ecoleta::ecoleta_types::geo::GeoPoint2d;
use ecoleta::form::{Dispatcher, Field, PointForm, Response};
use ecoleta::location::LocationPicker;
use ecoleta::map::ImageProvider;
use ecoleta::model::Region;
use ecoleta::navigation::Route;
use ecoleta::platform::LocationService;
use ecoleta::{EcoletaError, Messenger};
use egui::{Color32, RichText, ScrollArea, Sense, Stroke, Ui, Vec2};
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::app::{Action, Services};
use crate::egui_map::{EguiMap, EguiMapState, StoredView};
use crate::textures::TextureStore;

const REGION_PLACEHOLDER: &str = "Selecione uma UF";
const LOCALITY_PLACEHOLDER: &str = "Selecione uma cidade";

const MAP_HEIGHT: f32 = 350.0;
const ICON_CACHE_CAPACITY: usize = 64;
const ICON_SIZE: Vec2 = egui::vec2(48.0, 48.0);
const ITEM_SIZE: Vec2 = egui::vec2(140.0, 100.0);
const ITEMS_PER_ROW: usize = 3;
const SELECTED_FILL: Color32 = Color32::from_rgb(225, 250, 236);
const SELECTED_STROKE: Color32 = Color32::from_rgb(52, 203, 121);

/// Result of background work started by the page.
#[derive(Debug)]
pub enum PageEvent {
    /// A form request completed.
    Form(Response),
    /// The platform location service answered.
    Located(Result<GeoPoint2d, EcoletaError>),
}

impl From<Response> for PageEvent {
    fn from(response: Response) -> Self {
        Self::Form(response)
    }
}

/// Registration page of a new drop-off point.
///
/// The page owns the picked position and lends it to the map widget, which updates it on clicks.
/// The form receives the position when the point is submitted.
pub struct CreatePointPage {
    form: PointForm,
    picker: LocationPicker,
    map: EguiMapState,
    icons: ImageProvider<String>,
    icon_textures: TextureStore<String>,
    dispatcher: Dispatcher<PageEvent>,
    location: Arc<dyn LocationService>,
    sender: UnboundedSender<PageEvent>,
    receiver: UnboundedReceiver<PageEvent>,
    messenger: Arc<dyn Messenger>,
    map_hovered: bool,
}

impl CreatePointPage {
    /// Creates the page and starts loading the reference data.
    pub fn new(services: &Services, stored_view: Option<StoredView>) -> Result<Self, EcoletaError> {
        let (sender, receiver) = mpsc::unbounded_channel();

        let map = EguiMapState::new(
            &services.config,
            services.client.clone(),
            services.messenger.clone(),
            stored_view,
        )?;
        let icons = ImageProvider::new(
            |url: &String| Some(url.clone()),
            services.client.clone(),
            ICON_CACHE_CAPACITY,
        )
        .with_messenger(services.messenger.clone());

        let dispatcher = Dispatcher::new(services.api.clone(), sender.clone())
            .with_messenger(services.messenger.clone());

        let mut form = PointForm::new();
        dispatcher.dispatch_all(form.mount());

        Ok(Self {
            form,
            picker: LocationPicker::new(),
            map,
            icons,
            icon_textures: TextureStore::new(ICON_CACHE_CAPACITY),
            dispatcher,
            location: services.location.clone(),
            sender,
            receiver,
            messenger: services.messenger.clone(),
            map_hovered: false,
        })
    }

    /// Current map view, to be saved between runs.
    pub fn stored_view(&self) -> Option<StoredView> {
        self.map.stored_view()
    }

    /// Shows the page and returns the actions requested by the user or by completed requests.
    pub fn show(&mut self, ui: &mut Ui) -> Vec<Action> {
        let mut actions = self.process_events();

        if self.picker.begin_locate() {
            self.locate();
        }

        ScrollArea::vertical()
            .enable_scrolling(!self.map_hovered)
            .auto_shrink([false, false])
            .show(ui, |ui| {
                self.show_header(ui, &mut actions);

                ui.add_space(16.0);
                ui.label(RichText::new("Cadastro do ponto de coleta").size(28.0).strong());

                self.show_data_section(ui);
                self.show_address_section(ui);
                self.show_items_section(ui);
                self.show_submit(ui);
            });

        actions
    }

    fn process_events(&mut self) -> Vec<Action> {
        let mut actions = vec![];
        while let Ok(event) = self.receiver.try_recv() {
            match event {
                PageEvent::Form(response) => {
                    actions.extend(self.form.apply(response).into_iter().map(Action::from));
                }
                PageEvent::Located(Ok(position)) => {
                    self.picker.location_found(position, self.map.map_mut());
                }
                PageEvent::Located(Err(err)) => self.picker.location_failed(&err),
            }
        }

        actions
    }

    fn locate(&self) {
        let location = self.location.clone();
        let sender = self.sender.clone();
        let messenger = self.messenger.clone();

        async_runtime::spawn(async move {
            let result = location.locate().await;
            if sender.send(PageEvent::Located(result)).is_ok() {
                messenger.request_redraw();
            }
        });
    }

    fn show_header(&mut self, ui: &mut Ui, actions: &mut Vec<Action>) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("Ecoleta").size(24.0).strong());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.link("← Voltar para home").clicked() {
                    actions.push(Action::Push(Route::Home));
                }
            });
        });
    }

    fn show_data_section(&mut self, ui: &mut Ui) {
        section_title(ui, "Dados", None);

        ui.label("Nome da entidade");
        ui.add(
            egui::TextEdit::singleline(self.form.field_mut(Field::Name))
                .desired_width(f32::INFINITY),
        );

        ui.columns(2, |columns| {
            columns[0].label("E-mail");
            columns[0].add(
                egui::TextEdit::singleline(self.form.field_mut(Field::Email))
                    .desired_width(f32::INFINITY),
            );
            columns[1].label("Whatsapp");
            columns[1].add(
                egui::TextEdit::singleline(self.form.field_mut(Field::Whatsapp))
                    .desired_width(f32::INFINITY),
            );
        });
    }

    fn show_address_section(&mut self, ui: &mut Ui) {
        section_title(ui, "Endereço", Some("Selecione o endereço no mapa"));

        let map_response = ui
            .allocate_ui(egui::vec2(ui.available_width(), MAP_HEIGHT), |ui| {
                EguiMap::new(&mut self.map)
                    .with_picker(&mut self.picker)
                    .show_ui(ui)
            })
            .inner;
        self.map_hovered = map_response.contains_pointer();

        ui.add_space(8.0);
        ui.columns(2, |columns| {
            columns[0].label("Estado (UF)");
            self.show_region_selector(&mut columns[0]);
            columns[1].label("Cidade");
            self.show_locality_selector(&mut columns[1]);
        });
    }

    fn show_region_selector(&mut self, ui: &mut Ui) {
        let mut selected = self.form.selected_region().to_string();
        let selected_text = self
            .form
            .regions()
            .iter()
            .find(|region| region.code == selected)
            .map(Region::label)
            .unwrap_or_else(|| REGION_PLACEHOLDER.to_string());

        egui::ComboBox::from_id_salt("uf")
            .selected_text(selected_text)
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                ui.selectable_value(&mut selected, String::new(), REGION_PLACEHOLDER);
                for region in self.form.regions() {
                    ui.selectable_value(&mut selected, region.code.clone(), region.label());
                }
            });

        if let Some(request) = self.form.select_region(selected) {
            self.dispatcher.dispatch(request);
        }
    }

    fn show_locality_selector(&mut self, ui: &mut Ui) {
        let mut selected = self.form.selected_locality().to_string();
        let selected_text = if selected.is_empty() {
            LOCALITY_PLACEHOLDER.to_string()
        } else {
            selected.clone()
        };

        ui.add_enabled_ui(self.form.locality_selector_enabled(), |ui| {
            egui::ComboBox::from_id_salt("city")
                .selected_text(selected_text)
                .width(ui.available_width())
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut selected, String::new(), LOCALITY_PLACEHOLDER);
                    for locality in self.form.localities() {
                        ui.selectable_value(&mut selected, locality.name.clone(), &locality.name);
                    }
                });
        });

        if selected != self.form.selected_locality() {
            self.form.select_locality(selected);
        }
    }

    fn show_items_section(&mut self, ui: &mut Ui) {
        section_title(ui, "Ítens de coleta", Some("Selecione um ou mais ítens abaixo"));
        self.icon_textures.begin_frame();

        let mut toggled = None;
        egui::Grid::new("items")
            .spacing([12.0, 12.0])
            .show(ui, |ui| {
                for (i, item) in self.form.categories().iter().enumerate() {
                    let selected = self.form.selected_categories().contains(item.id);
                    let icon = self.icons.get_or_load(&item.image_url).map(|image| {
                        self.icon_textures
                            .get_or_upload(ui.ctx(), &item.image_url, &image)
                            .id()
                    });

                    let (fill, stroke) = if selected {
                        (SELECTED_FILL, Stroke::new(2.0, SELECTED_STROKE))
                    } else {
                        (ui.visuals().faint_bg_color, Stroke::NONE)
                    };

                    let response = egui::Frame::default()
                        .fill(fill)
                        .stroke(stroke)
                        .inner_margin(8.0)
                        .show(ui, |ui| {
                            ui.set_min_size(ITEM_SIZE);
                            ui.vertical_centered(|ui| {
                                if let Some(texture_id) = icon {
                                    ui.add(egui::Image::new(egui::load::SizedTexture::new(
                                        texture_id, ICON_SIZE,
                                    )));
                                }
                                ui.label(&item.title);
                            });
                        })
                        .response
                        .interact(Sense::click());

                    if response.clicked() {
                        toggled = Some(item.id);
                    }

                    if (i + 1) % ITEMS_PER_ROW == 0 {
                        ui.end_row();
                    }
                }
            });

        if let Some(id) = toggled {
            self.form.toggle_category(id);
        }
    }

    fn show_submit(&mut self, ui: &mut Ui) {
        ui.add_space(24.0);
        ui.horizontal(|ui| {
            let button = egui::Button::new(RichText::new("Cadastrar ponto de coleta").strong())
                .min_size(egui::vec2(260.0, 48.0));
            if ui.add_enabled(self.form.can_submit(), button).clicked() {
                if let Some(request) = self.form.submit(self.picker.position()) {
                    self.dispatcher.dispatch(request);
                }
            }

            if self.form.is_submitting() {
                ui.spinner();
            }
        });
        ui.add_space(24.0);
    }
}

fn section_title(ui: &mut Ui, title: &str, hint: Option<&str>) {
    ui.add_space(24.0);
    ui.horizontal(|ui| {
        ui.label(RichText::new(title).size(20.0).strong());
        if let Some(hint) = hint {
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(hint);
            });
        }
    });
    ui.separator();
}
