//! Paints a [`CoverProjection`] with egui.
//!
//! egui has no text gradients, glyph outlines, blurred shadows or blend
//! modes. Gradients paint in their midpoint color, outlines are drawn as
//! offset copies of the text, shadows as one unblurred offset copy, and every
//! blend mode composites as normal alpha.
//!
//! Text uses the fonts registered by [`crate::fonts::install_fonts`], which
//! must run before the first paint.

use egui::{Align2, Color32, FontId, Painter, Pos2, Rect, TextureId, pos2, vec2};

use crate::fonts;

use super::layout::{self, LINE_HEIGHT, PlacedBlock};
use super::{Block, CoverProjection, ResolvedText};

const STUDENT_CAPTION: &str = "التلميذ/ة";
const CLASS_CAPTION: &str = "القسم";
const YEAR_CAPTION: &str = "السنة الدراسية";

const CAPTION_COLOR: Color32 = Color32::from_rgb(0xe5, 0xe7, 0xeb);

/// Draws covers at a given page rectangle
#[derive(Debug, Clone, Copy)]
pub struct CoverPainter {
    page: Rect,
    scale: f32,
}

impl CoverPainter {
    pub fn new(page: Rect) -> Self {
        Self {
            page,
            scale: layout::page_scale(page),
        }
    }

    pub fn page(&self) -> Rect {
        self.page
    }

    /// Paint background, block panels and text
    /// `background` is `None` while the illustration is still loading.
    pub fn paint(&self, painter: &Painter, projection: &CoverProjection, background: Option<TextureId>) {
        self.paint_background(painter, projection, background);
        let placed = layout::arrange(projection, self.page);
        for (block, placed) in projection.blocks.iter().zip(&placed) {
            self.paint_block(painter, block, placed);
        }
    }

    fn paint_background(&self, painter: &Painter, projection: &CoverProjection, texture: Option<TextureId>) {
        painter.rect_filled(self.page, 0.0, Color32::WHITE);
        let tint = Color32::WHITE.gamma_multiply(projection.background.opacity);
        match texture {
            Some(texture) => {
                let uv = Rect::from_min_max(Pos2::ZERO, pos2(1.0, 1.0));
                painter.image(texture, self.page, uv, tint);
            }
            None => {
                let placeholder = placeholder_color(&projection.background.theme_id)
                    .gamma_multiply(projection.background.opacity);
                painter.rect_filled(self.page, 0.0, placeholder);
            }
        }
    }

    fn paint_block(&self, painter: &Painter, block: &Block, placed: &PlacedBlock) {
        let s = self.scale;
        let rect = placed.rect;
        match block {
            Block::Heading { title, subject } => {
                painter.rect_filled(rect, 12.0 * s, Color32::from_black_alpha(77));
                let mut y = rect.top() + 16.0 * s;
                y += self.paint_text(painter, title, layout::centered_line(rect, y));
                if let Some(subject) = subject {
                    y += 8.0 * s;
                    self.paint_text(painter, subject, layout::centered_line(rect, y));
                }
            }
            Block::StudentInfo {
                name,
                class_name,
                school_year,
            } => {
                painter.rect_filled(rect, 16.0 * s, Color32::from_black_alpha(102));
                let mut y = rect.top() + 24.0 * s;
                y += self.paint_caption(painter, STUDENT_CAPTION, 20.0, layout::centered_line(rect, y));
                y += self.paint_text(painter, name, layout::centered_line(rect, y));
                y += 16.0 * s;

                let left = Rect::from_min_max(rect.min, pos2(rect.center().x, rect.max.y));
                let right = Rect::from_min_max(pos2(rect.center().x, rect.min.y), rect.max);
                for (column, caption, value) in [(right, CLASS_CAPTION, class_name), (left, YEAR_CAPTION, school_year)] {
                    let caption_h = self.paint_caption(painter, caption, 18.0, layout::centered_line(column, y));
                    self.paint_text(painter, value, layout::centered_line(column, y + caption_h));
                }
            }
            Block::SchoolName { school_name } => {
                painter.rect_filled(rect, 12.0 * s, Color32::from_black_alpha(77));
                self.paint_text(painter, school_name, layout::centered_line(rect, rect.top() + 8.0 * s));
            }
        }
    }

    fn paint_caption(&self, painter: &Painter, text: &str, size_px: f32, anchor: Pos2) -> f32 {
        let size = size_px * self.scale;
        painter.text(anchor, Align2::CENTER_TOP, text, FontId::proportional(size), CAPTION_COLOR);
        size * LINE_HEIGHT
    }

    /// Paint one resolved text with its effects, returning the line height used
    fn paint_text(&self, painter: &Painter, text: &ResolvedText, anchor: Pos2) -> f32 {
        let size = text.font_size_px as f32 * self.scale;
        let font = fonts::font_id(text.font_family, size);

        if let Some(shadow) = text.shadow {
            let offset = vec2(shadow.offset_x_px, shadow.offset_y_px) * self.scale;
            painter.text(anchor + offset, Align2::CENTER_TOP, &text.text, font.clone(), shadow.color.to_color32());
        }

        if let Some(outline) = text.outline {
            let w = outline.width_px * self.scale;
            let color = outline.color.to_color32();
            for (dx, dy) in OUTLINE_OFFSETS {
                painter.text(anchor + vec2(dx * w, dy * w), Align2::CENTER_TOP, &text.text, font.clone(), color);
            }
        }

        let fill = text.fill.representative_color().to_color32();
        painter.text(anchor, Align2::CENTER_TOP, &text.text, font, fill);
        size * LINE_HEIGHT
    }
}

const OUTLINE_OFFSETS: [(f32, f32); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Stable muted color for an illustration whose texture is not ready
pub fn placeholder_color(theme_id: &str) -> Color32 {
    let hash = theme_id
        .bytes()
        .fold(0x811c_9dc5u32, |h, b| (h ^ b as u32).wrapping_mul(0x0100_0193));
    let [r, g, b, _] = hash.to_le_bytes();
    Color32::from_rgb(64 + r / 3, 64 + g / 3, 64 + b / 3)
}
