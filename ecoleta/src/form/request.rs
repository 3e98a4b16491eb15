use crate::error::EcoletaError;
use crate::model::{CategoryItem, Locality, NewPoint, Region};
use crate::navigation::Route;

/// Identifies a locality list request. Only the response to the latest request is applied.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestToken(u64);

impl RequestToken {
    pub(crate) fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

/// Remote operation requested by the [`PointForm`](super::PointForm).
#[derive(Debug, Clone, PartialEq)]
pub enum Request {
    /// Load the list of categories.
    Categories,
    /// Load the list of regions.
    Regions,
    /// Load the localities of a region.
    Localities {
        /// Code of the region.
        region: String,
        /// Token the response must carry.
        token: RequestToken,
    },
    /// Register the point.
    Submit(NewPoint),
}

/// Outcome of a [`Request`].
#[derive(Debug)]
pub enum Response {
    /// Result of [`Request::Categories`].
    Categories(Result<Vec<CategoryItem>, EcoletaError>),
    /// Result of [`Request::Regions`].
    Regions(Result<Vec<Region>, EcoletaError>),
    /// Result of [`Request::Localities`].
    Localities {
        /// Token of the request.
        token: RequestToken,
        /// Loaded localities.
        result: Result<Vec<Locality>, EcoletaError>,
    },
    /// Result of [`Request::Submit`].
    Submitted(Result<(), EcoletaError>),
}

/// Action the page must take after a response is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Show a short message to the user.
    Notice(String),
    /// Replace the current history entry with the route.
    Navigate(Route),
}
