use ecoleta::Messenger;

/// Requests a repaint of the egui context when background work completes.
#[derive(Debug, Clone)]
pub struct ContextMessenger {
    context: egui::Context,
}

impl ContextMessenger {
    /// Creates a messenger for the context.
    pub fn new(context: egui::Context) -> Self {
        Self { context }
    }
}

impl Messenger for ContextMessenger {
    fn request_redraw(&self) {
        log::trace!("Redraw requested");
        self.context.request_repaint();
    }
}
