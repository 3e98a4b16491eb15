use maybe_sync::{MaybeSend, MaybeSync};

/// Notifies the user interface that the state changed outside of a user interaction, e.g. when a
/// network request completes, and the screen must be redrawn.
pub trait Messenger: MaybeSend + MaybeSync {
    /// Requests the UI to redraw on the next opportunity.
    fn request_redraw(&self);
}

/// Messenger that ignores all requests. Useful for tests and headless usage.
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
