use super::style;
use crate::dataset::Roster;
use crate::view::{Selection, SelectionEvent};
use eframe::egui::{self, RichText};

/// Draw the x-axis and target dropdowns plus one toggle button per model.
///
/// Returns the events triggered this frame; the caller applies them.
pub(crate) fn render_controls(
    ui: &mut egui::Ui,
    roster: &Roster,
    selection: &Selection,
) -> Vec<SelectionEvent> {
    let palette = style::palette();
    let mut events = Vec::new();
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("X axis").color(palette.text_muted));
        egui::ComboBox::from_id_salt("x_axis_dropdown")
            .selected_text(selection.x_axis.as_str())
            .show_ui(ui, |ui| {
                for axis in &roster.x_axes {
                    let current = *axis == selection.x_axis;
                    if ui.selectable_label(current, axis.as_str()).clicked() && !current {
                        events.push(SelectionEvent::SetXAxis(axis.clone()));
                    }
                }
            });
        ui.add_space(12.0);
        ui.label(RichText::new("Target").color(palette.text_muted));
        egui::ComboBox::from_id_salt("target_dropdown")
            .selected_text(selection.target.as_str())
            .show_ui(ui, |ui| {
                for target in &roster.targets {
                    let current = *target == selection.target;
                    if ui.selectable_label(current, target.as_str()).clicked() && !current {
                        events.push(SelectionEvent::SetTarget(target.clone()));
                    }
                }
            });
    });
    ui.add_space(4.0);
    ui.horizontal_wrapped(|ui| {
        ui.label(RichText::new("Models").color(palette.text_muted));
        for (index, model) in roster.models.iter().enumerate() {
            let on = selection.toggles.is_selected(index);
            let text = if on {
                RichText::new(model.as_str()).color(palette.accent_mint)
            } else {
                RichText::new(model.as_str())
            };
            let response = ui
                .add(egui::Button::new(text).selected(on))
                .on_hover_text(format!("Clicked {} times", selection.toggles.clicks(index)));
            if response.clicked() {
                events.push(SelectionEvent::ClickModel(index));
            }
        }
    });
    events
}
