use serde::{Deserialize, Serialize};

use super::color::CssColor;

/// Font sizes the style editor offers
pub const MIN_FONT_SIZE_PX: u32 = 12;
pub const MAX_FONT_SIZE_PX: u32 = 120;

/// The renderable text roles of a cover
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TextRole {
    Title,
    Name,
    Subject,
    SchoolName,
    OtherInfo,
}

impl TextRole {
    pub const ALL: [TextRole; 5] = [
        TextRole::Title,
        TextRole::Name,
        TextRole::Subject,
        TextRole::SchoolName,
        TextRole::OtherInfo,
    ];

    /// Label shown next to the role's style editor
    pub fn label(&self) -> &'static str {
        match self {
            TextRole::Title => "العنوان (كراس القسم)",
            TextRole::Name => "اسم التلميذ/ة",
            TextRole::Subject => "المادة",
            TextRole::SchoolName => "اسم المدرسة",
            TextRole::OtherInfo => "معلومات أخرى",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    pub color: CssColor,
    #[serde(alias = "width")]
    pub width_px: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shadow {
    pub color: CssColor,
    #[serde(alias = "blur")]
    pub blur_px: f32,
    #[serde(default, alias = "offsetX")]
    pub offset_x_px: f32,
    #[serde(default, alias = "offsetY")]
    pub offset_y_px: f32,
}

/// Direction of a linear text gradient, named like CSS `to <side>` keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientDirection {
    #[serde(rename = "to top")]
    ToTop,
    #[serde(rename = "to top right")]
    ToTopRight,
    #[serde(rename = "to right")]
    ToRight,
    #[serde(rename = "to bottom right")]
    ToBottomRight,
    #[default]
    #[serde(rename = "to bottom")]
    ToBottom,
    #[serde(rename = "to bottom left")]
    ToBottomLeft,
    #[serde(rename = "to left")]
    ToLeft,
    #[serde(rename = "to top left")]
    ToTopLeft,
}

impl GradientDirection {
    pub const ALL: [GradientDirection; 8] = [
        GradientDirection::ToTop,
        GradientDirection::ToTopRight,
        GradientDirection::ToRight,
        GradientDirection::ToBottomRight,
        GradientDirection::ToBottom,
        GradientDirection::ToBottomLeft,
        GradientDirection::ToLeft,
        GradientDirection::ToTopLeft,
    ];

    /// Unit vector pointing from `color1` towards `color2`, y growing downwards
    pub fn unit_vector(&self) -> egui::Vec2 {
        let d = std::f32::consts::FRAC_1_SQRT_2;
        match self {
            GradientDirection::ToTop => egui::vec2(0.0, -1.0),
            GradientDirection::ToTopRight => egui::vec2(d, -d),
            GradientDirection::ToRight => egui::vec2(1.0, 0.0),
            GradientDirection::ToBottomRight => egui::vec2(d, d),
            GradientDirection::ToBottom => egui::vec2(0.0, 1.0),
            GradientDirection::ToBottomLeft => egui::vec2(-d, d),
            GradientDirection::ToLeft => egui::vec2(-1.0, 0.0),
            GradientDirection::ToTopLeft => egui::vec2(-d, -d),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub enabled: bool,
    pub color1: CssColor,
    pub color2: CssColor,
    #[serde(default)]
    pub direction: GradientDirection,
}

/// Typography of one text role. Optional parts are absent in designs saved
/// before they existed and default to "off".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleRecord {
    #[serde(rename = "fontSize")]
    pub font_size_px: u32,
    pub color: CssColor,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "stroke")]
    pub outline: Option<Outline>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shadow: Option<Shadow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gradient: Option<Gradient>,
}

impl StyleRecord {
    pub fn new(font_size_px: u32, color: CssColor) -> Self {
        Self {
            font_size_px,
            color,
            outline: None,
            shadow: None,
            gradient: None,
        }
    }

    pub fn with_outline(mut self, color: CssColor, width_px: f32) -> Self {
        self.outline = Some(Outline { color, width_px });
        self
    }

    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }

    pub fn with_gradient(mut self, gradient: Gradient) -> Self {
        self.gradient = Some(gradient);
        self
    }

    /// Clamp values into the ranges the editor allows
    pub fn sanitized(mut self) -> Self {
        self.font_size_px = self.font_size_px.clamp(MIN_FONT_SIZE_PX, MAX_FONT_SIZE_PX);
        if let Some(outline) = &mut self.outline {
            outline.width_px = non_negative(outline.width_px);
        }
        if let Some(shadow) = &mut self.shadow {
            shadow.blur_px = non_negative(shadow.blur_px);
            if !shadow.offset_x_px.is_finite() {
                shadow.offset_x_px = 0.0;
            }
            if !shadow.offset_y_px.is_finite() {
                shadow.offset_y_px = 0.0;
            }
        }
        self
    }
}

fn non_negative(v: f32) -> f32 {
    if v.is_finite() { v.max(0.0) } else { 0.0 }
}

/// One [`StyleRecord`] per text role. Roles missing from an older snapshot
/// get their default record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TextStyles {
    pub title: StyleRecord,
    pub name: StyleRecord,
    pub subject: StyleRecord,
    pub school_name: StyleRecord,
    pub other_info: StyleRecord,
}

impl Default for TextStyles {
    fn default() -> Self {
        Self {
            title: StyleRecord::new(60, CssColor::rgb(0x1d, 0x4e, 0xd8))
                .with_outline(CssColor::WHITE, 1.0)
                .with_shadow(Shadow {
                    color: CssColor::rgba(0, 0, 0, 0x80),
                    blur_px: 8.0,
                    offset_x_px: 0.0,
                    offset_y_px: 4.0,
                }),
            name: StyleRecord::new(36, CssColor::rgb(0x67, 0xe8, 0xf9)),
            subject: StyleRecord::new(24, CssColor::rgb(0xf3, 0xf4, 0xf6)),
            school_name: StyleRecord::new(20, CssColor::WHITE),
            other_info: StyleRecord::new(24, CssColor::WHITE),
        }
    }
}

impl TextStyles {
    pub fn get(&self, role: TextRole) -> &StyleRecord {
        match role {
            TextRole::Title => &self.title,
            TextRole::Name => &self.name,
            TextRole::Subject => &self.subject,
            TextRole::SchoolName => &self.school_name,
            TextRole::OtherInfo => &self.other_info,
        }
    }

    pub fn get_mut(&mut self, role: TextRole) -> &mut StyleRecord {
        match role {
            TextRole::Title => &mut self.title,
            TextRole::Name => &mut self.name,
            TextRole::Subject => &mut self.subject,
            TextRole::SchoolName => &mut self.school_name,
            TextRole::OtherInfo => &mut self.other_info,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitized_clamps_ranges() {
        let style = StyleRecord::new(400, CssColor::BLACK)
            .with_outline(CssColor::WHITE, -3.0)
            .with_shadow(Shadow {
                color: CssColor::BLACK,
                blur_px: f32::NAN,
                offset_x_px: f32::INFINITY,
                offset_y_px: 2.0,
            })
            .sanitized();

        assert_eq!(style.font_size_px, MAX_FONT_SIZE_PX);
        assert_eq!(style.outline.map(|o| o.width_px), Some(0.0));
        let shadow = style.shadow.unwrap();
        assert_eq!(shadow.blur_px, 0.0);
        assert_eq!(shadow.offset_x_px, 0.0);
        assert_eq!(shadow.offset_y_px, 2.0);
    }

    #[test]
    fn legacy_style_without_optional_parts_loads() {
        let style: StyleRecord = serde_json::from_str(r##"{"fontSize":30,"color":"#ffffff"}"##).unwrap();
        assert_eq!(style, StyleRecord::new(30, CssColor::WHITE));
    }

    #[test]
    fn older_stroke_and_shadow_shapes_load() {
        let style: StyleRecord = serde_json::from_str(
            r##"{"fontSize":48,"color":"#ffffff","stroke":{"color":"#ffffff","width":1},"shadow":{"color":"#000000","blur":8,"offsetX":0,"offsetY":4}}"##,
        )
        .unwrap();
        assert_eq!(style.outline, Some(Outline { color: CssColor::WHITE, width_px: 1.0 }));
        assert_eq!(
            style.shadow,
            Some(Shadow {
                color: CssColor::BLACK,
                blur_px: 8.0,
                offset_x_px: 0.0,
                offset_y_px: 4.0,
            })
        );

        let written = serde_json::to_value(&style).unwrap();
        assert_eq!(written["outline"]["widthPx"], 1.0);
        assert_eq!(written["shadow"]["offsetYPx"], 4.0);
    }

    #[test]
    fn missing_roles_take_defaults() {
        let styles: TextStyles =
            serde_json::from_str(r##"{"name":{"fontSize":50,"color":"#000000"}}"##).unwrap();
        assert_eq!(styles.name.font_size_px, 50);
        assert_eq!(styles.title, TextStyles::default().title);
        assert_eq!(styles.other_info, TextStyles::default().other_info);
    }
}
