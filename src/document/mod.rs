//! The cover being designed: text fields, typography and page choices.

pub mod color;
pub mod style;

use serde::{Deserialize, Serialize};

use crate::catalog::Illustration;

pub use color::CssColor;
pub use style::{Gradient, GradientDirection, Outline, Shadow, StyleRecord, TextRole, TextStyles};

/// The text fields a user fills in. All of them are required for saving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldRole {
    Name,
    Subject,
    ClassName,
    SchoolName,
    SchoolYear,
}

impl FieldRole {
    pub const ALL: [FieldRole; 5] = [
        FieldRole::Name,
        FieldRole::Subject,
        FieldRole::ClassName,
        FieldRole::SchoolName,
        FieldRole::SchoolYear,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FieldRole::Name => "اسم التلميذ/ة",
            FieldRole::Subject => "المادة",
            FieldRole::ClassName => "القسم",
            FieldRole::SchoolName => "المدرسة",
            FieldRole::SchoolYear => "السنة الدراسية",
        }
    }

    /// Message shown under the field when it is left empty
    pub fn required_message(&self) -> &'static str {
        match self {
            FieldRole::Name => "اسم التلميذ/ة مطلوب.",
            FieldRole::Subject => "المادة مطلوبة.",
            FieldRole::ClassName => "القسم مطلوب.",
            FieldRole::SchoolName => "اسم المدرسة مطلوب.",
            FieldRole::SchoolYear => "السنة الدراسية مطلوبة.",
        }
    }
}

/// Field values. A field missing from a saved design loads as empty text and
/// is then caught by validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub class_name: String,
    #[serde(default)]
    pub school_name: String,
    #[serde(default)]
    pub school_year: String,
}

impl Default for CoverFields {
    fn default() -> Self {
        Self {
            name: "اسم التلميذ/ة".to_owned(),
            subject: "المادة".to_owned(),
            class_name: "السنة الثانية ابتدائي".to_owned(),
            school_name: "اسم المدرسة".to_owned(),
            school_year: "2024-2025".to_owned(),
        }
    }
}

impl CoverFields {
    pub fn get(&self, role: FieldRole) -> &str {
        match role {
            FieldRole::Name => &self.name,
            FieldRole::Subject => &self.subject,
            FieldRole::ClassName => &self.class_name,
            FieldRole::SchoolName => &self.school_name,
            FieldRole::SchoolYear => &self.school_year,
        }
    }

    pub fn set(&mut self, role: FieldRole, text: impl Into<String>) {
        let slot = match role {
            FieldRole::Name => &mut self.name,
            FieldRole::Subject => &mut self.subject,
            FieldRole::ClassName => &mut self.class_name,
            FieldRole::SchoolName => &mut self.school_name,
            FieldRole::SchoolYear => &mut self.school_year,
        };
        *slot = text.into();
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FontFamily {
    #[default]
    Cairo,
    Amiri,
    Lateef,
}

impl FontFamily {
    pub const ALL: [FontFamily; 3] = [FontFamily::Cairo, FontFamily::Amiri, FontFamily::Lateef];

    /// Font family name as registered with the text renderer
    pub fn family_name(&self) -> &'static str {
        match self {
            FontFamily::Cairo => "Cairo",
            FontFamily::Amiri => "Amiri",
            FontFamily::Lateef => "Lateef",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            FontFamily::Cairo => "كايرو",
            FontFamily::Amiri => "أميري",
            FontFamily::Lateef => "لطيف",
        }
    }
}

/// Vertical order of the student-info and school-name blocks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LayoutOrder {
    #[default]
    Default,
    SchoolNameFirst,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaperSize {
    #[default]
    A4,
    #[serde(rename = "notebookCustom")]
    NotebookCustom,
}

impl PaperSize {
    pub const ALL: [PaperSize; 2] = [PaperSize::A4, PaperSize::NotebookCustom];

    /// Physical page size in millimetres, width first
    pub fn size_mm(&self) -> (f32, f32) {
        match self {
            PaperSize::A4 => (210.0, 297.0),
            PaperSize::NotebookCustom => (170.0, 220.0),
        }
    }

    /// Width over height of the cover canvas
    pub fn aspect_ratio(&self) -> f32 {
        match self {
            PaperSize::A4 => 210.0 / 297.0,
            PaperSize::NotebookCustom => 17.0 / 22.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PaperSize::A4 => "A4",
            PaperSize::NotebookCustom => "كراس (17×22)",
        }
    }
}

/// The complete design state of one cover
#[derive(Debug, Clone, PartialEq)]
pub struct CoverDocument {
    pub fields: CoverFields,
    pub illustration: Illustration,
    pub font_family: FontFamily,
    pub show_subject_line: bool,
    pub layout_order: LayoutOrder,
    pub paper_size: PaperSize,
    pub text_styles: TextStyles,
}

impl CoverDocument {
    /// The fixed template every session starts from
    pub fn initial(illustration: Illustration) -> Self {
        Self {
            fields: CoverFields::default(),
            illustration,
            font_family: FontFamily::default(),
            show_subject_line: true,
            layout_order: LayoutOrder::default(),
            paper_size: PaperSize::default(),
            text_styles: TextStyles::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_accessors_cover_every_role() {
        let mut fields = CoverFields::default();
        for (i, role) in FieldRole::ALL.into_iter().enumerate() {
            fields.set(role, format!("value {i}"));
        }
        for (i, role) in FieldRole::ALL.into_iter().enumerate() {
            assert_eq!(fields.get(role), format!("value {i}"));
        }
    }

    #[test]
    fn enums_use_snapshot_names() {
        assert_eq!(serde_json::to_string(&LayoutOrder::SchoolNameFirst).unwrap(), "\"schoolNameFirst\"");
        assert_eq!(serde_json::to_string(&PaperSize::NotebookCustom).unwrap(), "\"notebookCustom\"");
        assert_eq!(serde_json::to_string(&FontFamily::Amiri).unwrap(), "\"Amiri\"");
    }

    #[test]
    fn aspect_ratios_match_page_sizes() {
        for paper in PaperSize::ALL {
            let (w, h) = paper.size_mm();
            assert!((paper.aspect_ratio() - w / h).abs() < 1e-3);
        }
    }
}
