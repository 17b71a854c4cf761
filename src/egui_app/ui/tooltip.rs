use super::style;
use crate::egui_app::image_cache::{ImageCache, ImageSlot};
use crate::view::{BoundingBox, TooltipSpec};
use eframe::egui::{self, Area, Frame, Order, RichText};

const TOOLTIP_GAP: f32 = 8.0;

/// Top-left corner for a tooltip of `size` next to `bbox`.
///
/// Prefers the right of the box; flips left or up when it would leave `screen`,
/// the context's content rect.
pub(crate) fn tooltip_origin(bbox: BoundingBox, size: egui::Vec2, screen: egui::Rect) -> egui::Pos2 {
    let mut x = bbox.x1 + TOOLTIP_GAP;
    if x + size.x > screen.max.x {
        x = (bbox.x0 - TOOLTIP_GAP - size.x).max(screen.min.x);
    }
    let mut y = bbox.y0;
    if y + size.y > screen.max.y {
        y = (screen.max.y - size.y).max(screen.min.y);
    }
    egui::pos2(x, y)
}

/// Show the image tooltip for `spec`, if visible.
pub(crate) fn render_tooltip(
    ctx: &egui::Context,
    spec: &TooltipSpec,
    images: &mut ImageCache,
    width: f32,
) {
    let (Some(bbox), Some(content)) = (spec.bbox(), spec.content()) else {
        return;
    };
    let palette = style::palette();
    let slot = content
        .image_ref
        .as_deref()
        .map(|reference| images.get_or_load(ctx, reference));
    let image_size = match slot {
        Some(ImageSlot::Ready(texture)) => {
            let [w, h] = texture.size();
            let aspect = if w == 0 { 1.0 } else { h as f32 / w as f32 };
            egui::vec2(width, width * aspect)
        }
        _ => egui::vec2(width, 0.0),
    };
    let estimate = image_size + egui::vec2(16.0, 40.0);
    let origin = tooltip_origin(bbox, estimate, ctx.content_rect());
    Area::new(egui::Id::new("fragment_tooltip"))
        .order(Order::Tooltip)
        .fixed_pos(origin)
        .interactable(false)
        .show(ctx, |ui| {
            Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_max_width(width);
                match slot {
                    Some(ImageSlot::Ready(texture)) => {
                        ui.add(
                            egui::Image::from_texture(egui::load::SizedTexture::from_handle(
                                texture,
                            ))
                            .fit_to_exact_size(image_size),
                        );
                    }
                    Some(ImageSlot::Failed(reason)) => {
                        ui.label(RichText::new("Image unavailable").color(palette.warning));
                        ui.label(RichText::new(reason).small().color(palette.text_muted));
                    }
                    None => {
                        ui.label(RichText::new("No image for this fragment").color(palette.text_muted));
                    }
                }
                ui.label(
                    RichText::new(format!("Row {}", content.row))
                        .small()
                        .color(palette.text_muted),
                );
            });
        });
}
