use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::catalog::{self, BlendMode, DEFAULT_OPACITY, Illustration, IllustrationTheme, ImageSource};
use crate::document::{CoverDocument, CoverFields, FontFamily, LayoutOrder, PaperSize, TextStyles};

/// Key saved designs are stored under
pub const DEFAULT_STORAGE_KEY: &str = "notebookCoverDesign";

/// Snapshot format written by this version. Version 1 snapshots carry no
/// `version` key and lack opacity, blend mode, text styles and paper size.
pub const FORMAT_VERSION: u32 = 2;

/// Errors that can occur while encoding or decoding a snapshot
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Failed to (de)serialize design: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Saved design is missing {0}")]
    MissingField(&'static str),
}

/// Result type for persistence operations
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Conditions found while loading that did not stop the load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadWarning {
    /// The saved illustration id is not in the catalog; the default
    /// illustration was selected instead
    MissingCatalogEntry { id: String },
}

/// A decoded snapshot
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedDesign {
    pub document: CoverDocument,
    pub warnings: Vec<LoadWarning>,
    /// Format version the snapshot was written with
    pub version: u32,
}

/// Wire shape of a saved design. Every key is optional on the way in so
/// older snapshots load; required keys are checked after parsing.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SavedDesign {
    version: Option<u32>,
    cover_data: Option<CoverFields>,
    selected_theme: Option<SavedTheme>,
    selected_font: Option<FontFamily>,
    show_subject: Option<bool>,
    layout_order: Option<LayoutOrder>,
    paper_size: Option<PaperSize>,
    text_styles: Option<TextStyles>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
struct SavedTheme {
    id: Option<String>,
    name: Option<String>,
    image_url: Option<ImageSource>,
    opacity: Option<f32>,
    blend_mode: Option<BlendMode>,
}

/// Encode the full document as a self-describing JSON snapshot.
pub fn serialize(document: &CoverDocument) -> PersistenceResult<Vec<u8>> {
    let illustration = &document.illustration;
    let saved = SavedDesign {
        version: Some(FORMAT_VERSION),
        cover_data: Some(document.fields.clone()),
        selected_theme: Some(SavedTheme {
            id: Some(illustration.theme.id.clone()),
            name: Some(illustration.theme.display_name.clone()),
            image_url: Some(illustration.theme.image_source.clone()),
            opacity: Some(illustration.opacity),
            blend_mode: Some(illustration.blend_mode),
        }),
        selected_font: Some(document.font_family),
        show_subject: Some(document.show_subject_line),
        layout_order: Some(document.layout_order),
        paper_size: Some(document.paper_size),
        text_styles: Some(document.text_styles.clone()),
    };
    Ok(serde_json::to_vec(&saved)?)
}

/// Decode a snapshot, filling in defaults for anything an older format
/// did not record.
pub fn deserialize(blob: &[u8]) -> PersistenceResult<LoadedDesign> {
    let saved: SavedDesign = serde_json::from_slice(blob)?;
    let fields = saved.cover_data.ok_or(PersistenceError::MissingField("coverData"))?;
    let theme = saved.selected_theme.ok_or(PersistenceError::MissingField("selectedTheme"))?;
    let id = theme
        .id
        .filter(|id| !id.is_empty())
        .ok_or(PersistenceError::MissingField("selectedTheme.id"))?;

    let mut warnings = Vec::new();
    let resolved = if id == catalog::CUSTOM_ID {
        let source = theme
            .image_url
            .ok_or(PersistenceError::MissingField("selectedTheme.imageUrl"))?;
        let mut custom = IllustrationTheme::custom(source);
        if let Some(name) = theme.name {
            custom.display_name = name;
        }
        custom
    } else {
        match catalog::find_canonical(&id) {
            Some(found) => found,
            None => {
                log::warn!("Saved illustration {id:?} not found, falling back to the default");
                warnings.push(LoadWarning::MissingCatalogEntry { id });
                catalog::default_theme()
            }
        }
    };

    let mut illustration = Illustration::new(resolved);
    illustration.set_opacity(theme.opacity.unwrap_or(DEFAULT_OPACITY));
    illustration.blend_mode = theme.blend_mode.unwrap_or_default();

    let mut text_styles = saved.text_styles.unwrap_or_default();
    for role in crate::document::TextRole::ALL {
        let style = text_styles.get_mut(role);
        *style = style.clone().sanitized();
    }

    let document = CoverDocument {
        fields,
        illustration,
        font_family: saved.selected_font.unwrap_or_default(),
        show_subject_line: saved.show_subject.unwrap_or(true),
        layout_order: saved.layout_order.unwrap_or_default(),
        paper_size: saved.paper_size.unwrap_or_default(),
        text_styles,
    };

    Ok(LoadedDesign {
        document,
        warnings,
        version: saved.version.unwrap_or(1),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initial() -> CoverDocument {
        CoverDocument::initial(Illustration::new(catalog::default_theme()))
    }

    #[test]
    fn snapshot_uses_camel_case_keys() {
        let blob = serialize(&initial()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&blob).unwrap();
        assert_eq!(value["version"], FORMAT_VERSION);
        assert_eq!(value["coverData"]["schoolYear"], "2024-2025");
        assert_eq!(value["selectedTheme"]["id"], "space");
        assert_eq!(value["selectedTheme"]["blendMode"], "normal");
        assert_eq!(value["selectedFont"], "Cairo");
        assert_eq!(value["layoutOrder"], "default");
        assert_eq!(value["paperSize"], "A4");
        assert_eq!(value["textStyles"]["title"]["fontSize"], 60);
    }

    #[test]
    fn not_json_is_a_serialization_error() {
        assert!(matches!(deserialize(b"{not json"), Err(PersistenceError::Serialization(_))));
    }

    #[test]
    fn missing_theme_id_is_reported() {
        let blob = br#"{"coverData":{},"selectedTheme":{"name":"x"}}"#;
        assert!(matches!(
            deserialize(blob),
            Err(PersistenceError::MissingField("selectedTheme.id"))
        ));
    }

    #[test]
    fn custom_without_image_is_rejected() {
        let blob = br#"{"coverData":{},"selectedTheme":{"id":"custom"}}"#;
        assert!(matches!(
            deserialize(blob),
            Err(PersistenceError::MissingField("selectedTheme.imageUrl"))
        ));
    }

    #[test]
    fn out_of_range_values_are_clamped_on_load() {
        let blob = br##"{
            "coverData": {},
            "selectedTheme": {"id": "art", "opacity": 3.5},
            "textStyles": {"name": {"fontSize": 4, "color": "#000"}}
        }"##;
        let loaded = deserialize(blob).unwrap();
        assert_eq!(loaded.document.illustration.opacity, 1.0);
        assert_eq!(loaded.document.text_styles.name.font_size_px, 12);
        assert_eq!(loaded.version, 1);
    }
}
