use std::sync::Arc;

use maybe_sync::MaybeSend;
use tokio::sync::mpsc::UnboundedSender;

use crate::api::PointsApi;
use crate::async_runtime;
use crate::form::{Request, Response};
use crate::messenger::Messenger;

/// Executes the request and returns its outcome.
pub async fn execute(api: &dyn PointsApi, request: Request) -> Response {
    match request {
        Request::Categories => Response::Categories(api.categories().await),
        Request::Regions => Response::Regions(api.regions().await),
        Request::Localities { region, token } => Response::Localities {
            token,
            result: api.localities(&region).await,
        },
        Request::Submit(point) => Response::Submitted(api.create_point(&point).await),
    }
}

/// Runs requests on the async runtime and sends the responses to the UI thread.
///
/// `E` is the type of the events the UI thread receives, so that the responses can share a
/// channel with other background events.
pub struct Dispatcher<E> {
    api: Arc<dyn PointsApi>,
    sender: UnboundedSender<E>,
    messenger: Option<Arc<dyn Messenger>>,
}

impl<E> Dispatcher<E>
where
    E: From<Response> + MaybeSend + 'static,
{
    /// Creates a new dispatcher.
    pub fn new(api: Arc<dyn PointsApi>, sender: UnboundedSender<E>) -> Self {
        Self {
            api,
            sender,
            messenger: None,
        }
    }

    /// Sets the messenger notified after a response is sent.
    pub fn with_messenger(mut self, messenger: Arc<dyn Messenger>) -> Self {
        self.messenger = Some(messenger);
        self
    }

    /// Starts executing all the requests.
    pub fn dispatch_all(&self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    /// Starts executing the request.
    pub fn dispatch(&self, request: Request) {
        log::trace!("Dispatching request {request:?}");

        let api = self.api.clone();
        let sender = self.sender.clone();
        let messenger = self.messenger.clone();

        async_runtime::spawn(async move {
            let response = execute(api.as_ref(), request).await;
            if sender.send(response.into()).is_err() {
                log::debug!("Response receiver is dropped, response is ignored");
                return;
            }

            if let Some(messenger) = messenger {
                messenger.request_redraw();
            }
        });
    }
}
