//! Registration form of a new drop-off point.
//!
//! [`PointForm`] is a state machine without any I/O. Operations that need remote data return
//! [`Request`]s. The caller executes them, usually with a [`Dispatcher`], and feeds the
//! [`Response`]s back with [`PointForm::apply`].

use ecoleta_types::geo::{GeoPoint, GeoPoint2d};

use crate::model::{CategoryItem, Locality, NewPoint, Region};
use crate::navigation::Route;

mod dispatcher;
mod request;
mod selection;

pub use dispatcher::{execute, Dispatcher};
pub use request::{Effect, Request, RequestToken, Response};
pub use selection::CategorySelection;

/// Message shown after the point is registered.
pub const POINT_CREATED_NOTICE: &str = "Ponto de coleta criado";

/// Free-text field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Name of the entity running the point.
    Name,
    /// Contact e-mail.
    Email,
    /// Contact phone.
    Whatsapp,
}

/// State of the registration form.
#[derive(Debug, Default)]
pub struct PointForm {
    name: String,
    email: String,
    whatsapp: String,

    categories: Vec<CategoryItem>,
    regions: Vec<Region>,
    localities: Vec<Locality>,

    selected_region: String,
    selected_locality: String,
    selected_categories: CategorySelection,

    localities_token: RequestToken,
    submitting: bool,
}

impl PointForm {
    /// Creates an empty form.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests for the reference data shown by the form. Called once when the page opens.
    pub fn mount(&mut self) -> Vec<Request> {
        vec![Request::Categories, Request::Regions]
    }

    /// Value of a text field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Whatsapp => &self.whatsapp,
        }
    }

    /// Mutable access to a text field, for editing widgets.
    pub fn field_mut(&mut self, field: Field) -> &mut String {
        match field {
            Field::Name => &mut self.name,
            Field::Email => &mut self.email,
            Field::Whatsapp => &mut self.whatsapp,
        }
    }

    /// Replaces the value of a text field.
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    /// Loaded categories.
    pub fn categories(&self) -> &[CategoryItem] {
        &self.categories
    }

    /// Loaded regions.
    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    /// Localities of the selected region. Empty until they are loaded.
    pub fn localities(&self) -> &[Locality] {
        &self.localities
    }

    /// Code of the selected region, empty if none.
    pub fn selected_region(&self) -> &str {
        &self.selected_region
    }

    /// Name of the selected locality, empty if none.
    pub fn selected_locality(&self) -> &str {
        &self.selected_locality
    }

    /// Selected categories.
    pub fn selected_categories(&self) -> &CategorySelection {
        &self.selected_categories
    }

    /// Selects a region. Returns the request for its localities if the selection changed to a
    /// non-empty code.
    ///
    /// The localities of the previous region and the selected locality are cleared right away,
    /// so the form never shows localities of another region.
    pub fn select_region(&mut self, code: impl Into<String>) -> Option<Request> {
        let code = code.into();
        if code == self.selected_region {
            return None;
        }

        self.selected_region = code;
        self.localities.clear();
        self.selected_locality.clear();
        self.localities_token = self.localities_token.next();

        if self.selected_region.is_empty() {
            return None;
        }

        Some(Request::Localities {
            region: self.selected_region.clone(),
            token: self.localities_token,
        })
    }

    /// Selects a locality by its name.
    pub fn select_locality(&mut self, name: impl Into<String>) {
        self.selected_locality = name.into();
    }

    /// Selects or deselects the category. Returns true if it is selected after the call.
    pub fn toggle_category(&mut self, id: u32) -> bool {
        self.selected_categories.toggle(id)
    }

    /// The point can be submitted only when a locality is selected.
    pub fn can_submit(&self) -> bool {
        !self.selected_locality.is_empty()
    }

    /// Localities can be selected once a region is selected.
    pub fn locality_selector_enabled(&self) -> bool {
        !self.selected_region.is_empty()
    }

    /// True while a submission is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Builds the record of the new point and returns the request to register it.
    ///
    /// Returns `None` if the form cannot be submitted or a submission is already in flight.
    pub fn submit(&mut self, position: Option<GeoPoint2d>) -> Option<Request> {
        if !self.can_submit() || self.submitting {
            return None;
        }

        self.submitting = true;
        Some(Request::Submit(NewPoint {
            name: self.name.clone(),
            email: self.email.clone(),
            whatsapp: self.whatsapp.clone(),
            latitude: position.map(|p| p.lat()),
            longitude: position.map(|p| p.lon()),
            city: self.selected_locality.clone(),
            uf: self.selected_region.clone(),
            items: self.selected_categories.ids().clone(),
        }))
    }

    /// Applies the outcome of a request and returns what the page must do next.
    pub fn apply(&mut self, response: Response) -> Vec<Effect> {
        match response {
            Response::Categories(result) => {
                self.categories = result.unwrap_or_else(|e| {
                    log::warn!("Failed to load categories: {e}");
                    vec![]
                });
            }
            Response::Regions(result) => {
                self.regions = result.unwrap_or_else(|e| {
                    log::warn!("Failed to load regions: {e}");
                    vec![]
                });
            }
            Response::Localities { token, result } => {
                if token != self.localities_token {
                    log::debug!("Discarding outdated localities response {token:?}");
                    return vec![];
                }

                self.localities = result.unwrap_or_else(|e| {
                    log::warn!(
                        "Failed to load localities of region {}: {e}",
                        self.selected_region
                    );
                    vec![]
                });
            }
            Response::Submitted(result) => {
                self.submitting = false;
                match result {
                    Ok(()) => {
                        log::info!("Drop-off point registered in {}", self.selected_locality);
                        return vec![
                            Effect::Notice(POINT_CREATED_NOTICE.to_string()),
                            Effect::Navigate(Route::Home),
                        ];
                    }
                    Err(e) => log::error!("Failed to register the drop-off point: {e}"),
                }
            }
        }

        vec![]
    }
}
