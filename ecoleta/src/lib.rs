//! Ecoleta is a small application for registering recycling drop-off points. This crate contains
//! everything except the user interface toolkit: the form state machine, the location picker, the
//! map model, and the clients for the backend and geography APIs.
//!
//! # Main components
//!
//! * [`PointForm`](form::PointForm) owns the registration form: contact fields, the reference data
//!   caches (categories, regions, localities), the dependent region → locality selection and the
//!   selected categories. It never performs I/O itself. Instead, its operations return
//!   [`Request`](form::Request)s which are executed by a [`Dispatcher`](form::Dispatcher), and the
//!   results come back as [`Response`](form::Response)s that the form applies.
//! * [`LocationPicker`](location::LocationPicker) keeps the position the user picked on the map and
//!   asks the [platform location service](platform::LocationService) once for the user's position.
//! * [`Map`](map::Map) is the state of the interactive map: the current [`MapView`](map::MapView)
//!   and a fly-to animation. Tiles are loaded by an [`ImageProvider`](map::ImageProvider) according
//!   to a [`TileSchema`](map::TileSchema), and user input is converted into map actions by the
//!   [`control`](map::control) module.
//!
//! ```
//! use ecoleta::form::{PointForm, Request};
//!
//! let mut form = PointForm::default();
//! let requests = form.mount();
//! assert!(matches!(requests[0], Request::Categories));
//! assert!(matches!(requests[1], Request::Regions));
//!
//! assert!(!form.can_submit());
//! assert!(!form.locality_selector_enabled());
//! ```

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod api;
pub mod async_runtime;
#[cfg(not(target_arch = "wasm32"))]
pub mod cache;
pub mod config;
pub mod error;
pub mod form;
pub mod http;
pub mod location;
pub mod map;
mod messenger;
pub mod model;
pub mod navigation;
pub mod platform;

pub use config::Config;
pub use error::EcoletaError;
pub use messenger::{DummyMessenger, Messenger};

// Reexport ecoleta_types
pub use ecoleta_types;
