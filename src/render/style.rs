use crate::document::{CssColor, FontFamily, GradientDirection, Outline, Shadow, StyleRecord, TextRole};

use super::shrink::AutoShrinkConfig;

/// How glyph interiors are painted
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Fill {
    Solid(CssColor),
    Gradient {
        from: CssColor,
        to: CssColor,
        direction: GradientDirection,
    },
}

impl Fill {
    /// Single color standing in for the fill on backends without gradient text
    pub fn representative_color(&self) -> CssColor {
        match *self {
            Fill::Solid(color) => color,
            Fill::Gradient { from, to, .. } => from.lerp(to, 0.5),
        }
    }
}

/// A piece of text with every style decision already made
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedText {
    pub role: TextRole,
    pub text: String,
    pub font_family: FontFamily,
    /// Size to render at, after auto-shrink
    pub font_size_px: u32,
    /// Size stored in the style record
    pub stored_font_size_px: u32,
    pub fill: Fill,
    pub outline: Option<Outline>,
    pub shadow: Option<Shadow>,
}

/// Resolve a role's style record into its effective paint.
pub fn resolve_text(
    role: TextRole,
    text: &str,
    style: &StyleRecord,
    font_family: FontFamily,
    shrink: &AutoShrinkConfig,
) -> ResolvedText {
    let fill = match style.gradient {
        Some(gradient) if gradient.enabled => Fill::Gradient {
            from: gradient.color1,
            to: gradient.color2,
            direction: gradient.direction,
        },
        _ => Fill::Solid(style.color),
    };

    let outline = style.outline.filter(|outline| outline.width_px > 0.0);

    let shadow = style.shadow.filter(|shadow| {
        shadow.blur_px != 0.0 || shadow.offset_x_px != 0.0 || shadow.offset_y_px != 0.0
    });

    ResolvedText {
        role,
        text: text.to_owned(),
        font_family,
        font_size_px: shrink.effective_size(role, style.font_size_px, text),
        stored_font_size_px: style.font_size_px,
        fill,
        outline,
        shadow,
    }
}
