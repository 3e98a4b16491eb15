//! Location service backed by the browser Geolocation API.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use ecoleta_types::geo::{GeoPoint2d, NewGeoPoint};
use futures::channel::oneshot;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{GeolocationPosition, GeolocationPositionError};

use crate::config::Config;
use crate::error::EcoletaError;
use crate::platform::LocationService;

type LocateSender = Rc<RefCell<Option<oneshot::Sender<Result<GeoPoint2d, EcoletaError>>>>>;

/// Asks the browser for the device position with `navigator.geolocation.getCurrentPosition`.
#[derive(Debug, Clone, Default)]
pub struct BrowserLocationService;

impl BrowserLocationService {
    /// Creates a new service.
    pub fn new() -> Self {
        Self
    }

    /// The browser knows the device position, so nothing is taken from the configuration.
    pub fn from_config(_config: &Config) -> Self {
        Self
    }
}

fn send(sender: &LocateSender, result: Result<GeoPoint2d, EcoletaError>) {
    if let Some(sender) = sender.borrow_mut().take() {
        // The receiver is gone if the page was closed, nothing to do then.
        let _ = sender.send(result);
    }
}

#[async_trait(?Send)]
impl LocationService for BrowserLocationService {
    async fn locate(&self) -> Result<GeoPoint2d, EcoletaError> {
        let geolocation = web_sys::window()
            .ok_or_else(|| EcoletaError::Wasm(Some("no window".to_string())))?
            .navigator()
            .geolocation()?;

        let (sender, receiver) = oneshot::channel();
        let sender: LocateSender = Rc::new(RefCell::new(Some(sender)));

        let on_success = {
            let sender = sender.clone();
            Closure::<dyn FnMut(GeolocationPosition)>::new(move |position: GeolocationPosition| {
                let coords = position.coords();
                send(
                    &sender,
                    Ok(GeoPoint2d::latlon(coords.latitude(), coords.longitude())),
                );
            })
        };

        let on_error = {
            let sender = sender.clone();
            Closure::<dyn FnMut(GeolocationPositionError)>::new(
                move |error: GeolocationPositionError| {
                    send(
                        &sender,
                        Err(EcoletaError::LocationUnavailable(error.message())),
                    );
                },
            )
        };

        geolocation.get_current_position_with_error_callback(
            on_success.as_ref().unchecked_ref(),
            Some(on_error.as_ref().unchecked_ref()),
        )?;

        // Callbacks must outlive the request, so they are dropped only after the answer arrives.
        let result = receiver.await.map_err(|_| {
            EcoletaError::LocationUnavailable("location request was dropped".to_string())
        })?;

        drop(on_success);
        drop(on_error);

        result
    }
}
