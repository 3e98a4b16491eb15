use ecoleta::navigation::Route;
use egui::{RichText, Ui};

use crate::app::Action;

pub(crate) fn show(ui: &mut Ui) -> Option<Action> {
    ui.vertical_centered(|ui| {
        ui.add_space(64.0);
        ui.label(RichText::new("Ecoleta").size(40.0).strong());
        ui.add_space(16.0);
        ui.label("Ajudamos pessoas a encontrarem pontos de coleta de forma eficiente.");
        ui.add_space(32.0);

        let button = egui::Button::new(RichText::new("Cadastre um ponto de coleta").strong())
            .min_size(egui::vec2(300.0, 56.0));
        ui.add(button)
            .clicked()
            .then_some(Action::Push(Route::CreatePoint))
    })
    .inner
}
