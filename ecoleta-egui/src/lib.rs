//! Egui user interface of Ecoleta: the map widget, the registration and home pages and the
//! application shell.

mod app;
mod egui_map;
mod home;
mod messenger;
mod page;
mod textures;

pub use app::{Action, EcoletaApp, Services};
pub use egui_map::{EguiMap, EguiMapState, StoredView};
pub use messenger::ContextMessenger;
pub use page::{CreatePointPage, PageEvent};

#[cfg(feature = "init")]
mod init;
#[cfg(feature = "init")]
pub use init::InitBuilder;
