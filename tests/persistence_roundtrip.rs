use notebook_cover::catalog::{self, BlendMode, ImageSource};
use notebook_cover::document::{
    CssColor, FieldRole, FontFamily, Gradient, GradientDirection, LayoutOrder, PaperSize, StyleRecord,
    TextRole, TextStyles,
};
use notebook_cover::state::{self, BlobStore, LoadWarning, MemoryStore};
use notebook_cover::{Command, CoverEditor};
use proptest::prelude::*;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\nrest-of-file";

fn edited_editor() -> CoverEditor {
    let mut editor = CoverEditor::default();
    for command in [
        Command::SetField { role: FieldRole::Name, text: "ياسمين".into() },
        Command::SelectIllustration("nature".into()),
        Command::SetIllustrationOpacity(0.45),
        Command::SetIllustrationBlendMode(BlendMode::Multiply),
        Command::SetFontFamily(FontFamily::Amiri),
        Command::SetShowSubjectLine(false),
        Command::SetLayoutOrder(LayoutOrder::SchoolNameFirst),
        Command::SetPaperSize(PaperSize::NotebookCustom),
        Command::SetTextStyle {
            role: TextRole::Name,
            style: StyleRecord::new(40, CssColor::rgba(1, 2, 3, 200)).with_gradient(Gradient {
                enabled: true,
                color1: CssColor::WHITE,
                color2: CssColor::BLACK,
                direction: GradientDirection::ToTopLeft,
            }),
        },
    ] {
        editor.execute(command).unwrap();
    }
    editor
}

#[test]
fn serialize_is_stable_across_a_round_trip() {
    let editor = edited_editor();
    let first = state::serialize(editor.document()).unwrap();
    let loaded = state::deserialize(&first).unwrap();
    assert_eq!(&loaded.document, editor.document());
    assert!(loaded.warnings.is_empty());
    assert_eq!(state::serialize(&loaded.document).unwrap(), first);
}

#[test]
fn custom_illustration_survives_save_and_load() {
    let mut editor = CoverEditor::default();
    editor.apply_custom_image(PNG_MAGIC.to_vec()).unwrap();
    editor.set_illustration_opacity(0.5);

    let mut store = MemoryStore::new();
    let mut dialogs = state::AnsweredDialogs::yes();
    editor.save(&mut store, &mut dialogs).unwrap();

    let mut fresh = CoverEditor::default();
    fresh.load(&store, &mut dialogs).unwrap();
    assert_eq!(fresh.document(), editor.document());
    assert!(fresh.catalog().has_custom());
    assert_eq!(
        fresh.catalog().custom().unwrap().image_source.embedded_bytes(),
        Some(PNG_MAGIC)
    );
}

#[test]
fn stored_blob_carries_a_data_url_for_custom_images() {
    let mut editor = CoverEditor::default();
    editor.apply_custom_image(PNG_MAGIC.to_vec()).unwrap();
    let blob = state::serialize(editor.document()).unwrap();
    let value: serde_json::Value = serde_json::from_slice(&blob).unwrap();
    let url = value["selectedTheme"]["imageUrl"].as_str().unwrap();
    assert!(url.starts_with("data:image/png;base64,"));
    assert_eq!(ImageSource::from_uri(url).unwrap(), editor.document().illustration.theme.image_source);
}

#[test]
fn missing_optional_keys_take_their_defaults() {
    // A design saved before illustration overrides and text styles existed
    let blob = r#"{
        "coverData": {
            "name": "Omar",
            "subject": "Math",
            "className": "3A",
            "schoolName": "Al Amal",
            "schoolYear": "2023-2024"
        },
        "selectedTheme": {"id": "art", "name": "فن"},
        "selectedFont": "Lateef",
        "showSubject": false,
        "layoutOrder": "schoolNameFirst"
    }"#;
    let loaded = state::deserialize(blob.as_bytes()).unwrap();
    let doc = &loaded.document;

    assert_eq!(loaded.version, 1);
    assert_eq!(doc.fields.name, "Omar");
    assert_eq!(doc.fields.school_year, "2023-2024");
    assert_eq!(doc.illustration.id(), "art");
    assert_eq!(doc.illustration.opacity, 1.0);
    assert_eq!(doc.illustration.blend_mode, BlendMode::Normal);
    assert_eq!(doc.font_family, FontFamily::Lateef);
    assert!(!doc.show_subject_line);
    assert_eq!(doc.layout_order, LayoutOrder::SchoolNameFirst);
    assert_eq!(doc.paper_size, PaperSize::A4);
    assert_eq!(doc.text_styles, TextStyles::default());
}

#[test]
fn styles_written_with_stroke_and_offset_names_load() {
    let blob = r##"{
        "coverData": {"name": "Omar", "subject": "", "className": "3A", "schoolName": "", "schoolYear": ""},
        "selectedTheme": {"id": "space", "name": "فضاء"},
        "selectedFont": "Cairo",
        "showSubject": true,
        "layoutOrder": "default",
        "textStyles": {
            "title": {
                "fontSize": 48,
                "color": "#ffffff",
                "stroke": {"color": "#ffffff", "width": 1},
                "shadow": {"color": "#000000", "blur": 8, "offsetX": 0, "offsetY": 4}
            }
        }
    }"##;
    let loaded = state::deserialize(blob.as_bytes()).unwrap();
    let title = &loaded.document.text_styles.title;

    assert_eq!(title.outline.map(|o| o.width_px), Some(1.0));
    let shadow = title.shadow.unwrap();
    assert_eq!((shadow.blur_px, shadow.offset_x_px, shadow.offset_y_px), (8.0, 0.0, 4.0));
    assert_eq!(loaded.document.fields.name, "Omar");
}

#[test]
fn style_without_gradient_stays_without_one() {
    let blob = br##"{
        "coverData": {},
        "selectedTheme": {"id": "space"},
        "textStyles": {"title": {"fontSize": 50, "color": "#ff0000"}}
    }"##;
    let loaded = state::deserialize(blob).unwrap();
    let title = &loaded.document.text_styles.title;
    assert_eq!(title.font_size_px, 50);
    assert_eq!(title.color, CssColor::rgb(0xff, 0, 0));
    assert!(title.gradient.is_none());
    assert!(title.outline.is_none());
    // roles absent from the snapshot keep their defaults
    assert_eq!(loaded.document.text_styles.name, TextStyles::default().name);
}

#[test]
fn unknown_illustration_falls_back_with_a_warning() {
    let blob = br#"{"coverData": {}, "selectedTheme": {"id": "dinosaurs", "opacity": 0.3}}"#;
    let loaded = state::deserialize(blob).unwrap();
    assert_eq!(loaded.document.illustration.theme, catalog::canonical_themes()[0]);
    assert_eq!(
        loaded.warnings,
        vec![LoadWarning::MissingCatalogEntry { id: "dinosaurs".into() }]
    );
}

#[test]
fn unknown_blend_mode_degrades_to_normal() {
    let blob = br#"{"coverData": {}, "selectedTheme": {"id": "space", "blendMode": "plus-lighter"}}"#;
    let loaded = state::deserialize(blob).unwrap();
    assert_eq!(loaded.document.illustration.blend_mode, BlendMode::Normal);
}

#[test]
fn saves_under_the_configured_key() {
    let mut editor = edited_editor();
    let mut store = MemoryStore::new();
    editor.save(&mut store, &mut state::AnsweredDialogs::yes()).unwrap();
    assert!(store.get(state::DEFAULT_STORAGE_KEY).is_some());
    assert_eq!(store.len(), 1);
}

fn arb_paper() -> impl Strategy<Value = PaperSize> {
    prop::sample::select(PaperSize::ALL.to_vec())
}

fn arb_blend() -> impl Strategy<Value = BlendMode> {
    prop::sample::select(BlendMode::ALL.to_vec())
}

fn arb_font() -> impl Strategy<Value = FontFamily> {
    prop::sample::select(FontFamily::ALL.to_vec())
}

proptest! {
    #[test]
    fn any_edited_document_round_trips(
        name in ".{0,30}",
        subject in ".{0,30}",
        theme_index in 0usize..11,
        opacity in 0.0f32..=1.0,
        blend in arb_blend(),
        font in arb_font(),
        paper in arb_paper(),
        show_subject in any::<bool>(),
        size in 12u32..=120,
        rgba in any::<[u8; 4]>(),
    ) {
        let mut editor = CoverEditor::default();
        let theme_id = catalog::canonical_themes()[theme_index].id.clone();
        let [r, g, b, a] = rgba;
        for command in [
            Command::SetField { role: FieldRole::Name, text: name },
            Command::SetField { role: FieldRole::Subject, text: subject },
            Command::SelectIllustration(theme_id),
            Command::SetIllustrationOpacity(opacity),
            Command::SetIllustrationBlendMode(blend),
            Command::SetFontFamily(font),
            Command::SetPaperSize(paper),
            Command::SetShowSubjectLine(show_subject),
            Command::SetTextStyle { role: TextRole::SchoolName, style: StyleRecord::new(size, CssColor::rgba(r, g, b, a)) },
        ] {
            editor.execute(command).unwrap();
        }

        let first = state::serialize(editor.document()).unwrap();
        let loaded = state::deserialize(&first).unwrap();
        prop_assert_eq!(&loaded.document, editor.document());
        prop_assert_eq!(state::serialize(&loaded.document).unwrap(), first);
    }
}
