use egui::{Rect, Sense};

use crate::render::layout::fit_page;
use crate::render::painter::CoverPainter;
use crate::render::texture::BackgroundTextures;
use crate::render::CoverProjection;

const PREVIEW_MARGIN: f32 = 16.0;

/// Central panel showing the cover. Returns the page rectangle in points,
/// which is the region captured for export.
pub fn preview_panel(ctx: &egui::Context, projection: &CoverProjection, textures: &mut BackgroundTextures) -> Rect {
    egui::CentralPanel::default()
        .show(ctx, |ui| {
            let available = ui.available_rect_before_wrap();
            let (response, painter) = ui.allocate_painter(available.size(), Sense::hover());
            let page = fit_page(response.rect.shrink(PREVIEW_MARGIN), projection.paper_size);

            let background = &projection.background;
            let texture = textures.get(ctx, &background.theme_id, &background.source);
            CoverPainter::new(page).paint(&painter, projection, texture);
            page
        })
        .inner
}
