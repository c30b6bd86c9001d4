//! Derived render projection.
//!
//! [`project`] turns a [`CoverDocument`] into a [`CoverProjection`]: every
//! text role resolved to its effective paint (auto-shrink included), the
//! blocks in display order, and the background layer with its overrides.
//! The projection owns no state of its own and is recomputed after every
//! mutation.

pub mod layout;
pub mod painter;
pub mod shrink;
pub mod style;
pub mod texture;

use crate::catalog::{BlendMode, ImageSource};
use crate::document::{CoverDocument, PaperSize, TextRole};

pub use layout::{BlockKind, PlacedBlock};
pub use shrink::{AutoShrinkConfig, auto_shrink};
pub use style::{Fill, ResolvedText, resolve_text};

/// Fixed heading printed at the top of every cover
pub const TITLE_TEXT: &str = "كراس القسم";

/// Full-bleed illustration layer beneath the text
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub theme_id: String,
    pub source: ImageSource,
    pub opacity: f32,
    pub blend_mode: BlendMode,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    /// Title, plus the subject line when it is switched on
    Heading {
        title: ResolvedText,
        subject: Option<ResolvedText>,
    },
    StudentInfo {
        name: ResolvedText,
        class_name: ResolvedText,
        school_year: ResolvedText,
    },
    SchoolName {
        school_name: ResolvedText,
    },
}

impl Block {
    pub fn kind(&self) -> BlockKind {
        match self {
            Block::Heading { .. } => BlockKind::Heading,
            Block::StudentInfo { .. } => BlockKind::StudentInfo,
            Block::SchoolName { .. } => BlockKind::SchoolName,
        }
    }

    pub fn texts(&self) -> Vec<&ResolvedText> {
        match self {
            Block::Heading { title, subject } => std::iter::once(title).chain(subject.as_ref()).collect(),
            Block::StudentInfo {
                name,
                class_name,
                school_year,
            } => vec![name, class_name, school_year],
            Block::SchoolName { school_name } => vec![school_name],
        }
    }
}

/// Render-ready description of a cover
#[derive(Debug, Clone, PartialEq)]
pub struct CoverProjection {
    pub paper_size: PaperSize,
    pub aspect_ratio: f32,
    pub background: Background,
    /// Blocks in top-to-bottom order
    pub blocks: Vec<Block>,
}

impl CoverProjection {
    pub fn block(&self, kind: BlockKind) -> Option<&Block> {
        self.blocks.iter().find(|block| block.kind() == kind)
    }

    pub fn text(&self, role: TextRole) -> Option<&ResolvedText> {
        self.blocks
            .iter()
            .flat_map(Block::texts)
            .find(|text| text.role == role)
    }
}

/// Project a document into its visual description.
pub fn project(document: &CoverDocument, shrink: &AutoShrinkConfig) -> CoverProjection {
    let styles = &document.text_styles;
    let font = document.font_family;
    let fields = &document.fields;
    let resolve = |role: TextRole, text: &str| resolve_text(role, text, styles.get(role), font, shrink);

    let blocks = layout::block_order(document.layout_order)
        .into_iter()
        .map(|kind| match kind {
            BlockKind::Heading => Block::Heading {
                title: resolve(TextRole::Title, TITLE_TEXT),
                subject: document
                    .show_subject_line
                    .then(|| resolve(TextRole::Subject, &fields.subject)),
            },
            BlockKind::StudentInfo => Block::StudentInfo {
                name: resolve(TextRole::Name, &fields.name),
                class_name: resolve(TextRole::OtherInfo, &fields.class_name),
                school_year: resolve(TextRole::OtherInfo, &fields.school_year),
            },
            BlockKind::SchoolName => Block::SchoolName {
                school_name: resolve(TextRole::SchoolName, &fields.school_name),
            },
        })
        .collect();

    let illustration = &document.illustration;
    CoverProjection {
        paper_size: document.paper_size,
        aspect_ratio: document.paper_size.aspect_ratio(),
        background: Background {
            theme_id: illustration.theme.id.clone(),
            source: illustration.theme.image_source.clone(),
            opacity: illustration.opacity,
            blend_mode: illustration.blend_mode,
        },
        blocks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Illustration, default_theme};
    use crate::document::LayoutOrder;

    fn document() -> CoverDocument {
        CoverDocument::initial(Illustration::new(default_theme()))
    }

    #[test]
    fn subject_line_follows_toggle_not_text() {
        let mut doc = document();
        doc.fields.subject.clear();
        let projection = project(&doc, &AutoShrinkConfig::default());
        assert!(projection.text(TextRole::Subject).is_some());

        doc.fields.subject = "علوم".into();
        doc.show_subject_line = false;
        let projection = project(&doc, &AutoShrinkConfig::default());
        assert!(projection.text(TextRole::Subject).is_none());
    }

    #[test]
    fn blocks_follow_layout_order() {
        let mut doc = document();
        let kinds = |doc: &CoverDocument| -> Vec<BlockKind> {
            project(doc, &AutoShrinkConfig::default())
                .blocks
                .iter()
                .map(Block::kind)
                .collect()
        };
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Heading, BlockKind::StudentInfo, BlockKind::SchoolName]
        );
        doc.layout_order = LayoutOrder::SchoolNameFirst;
        assert_eq!(
            kinds(&doc),
            vec![BlockKind::Heading, BlockKind::SchoolName, BlockKind::StudentInfo]
        );
    }

    #[test]
    fn projection_does_not_touch_stored_sizes() {
        let mut doc = document();
        doc.fields.name = "a".repeat(40);
        let before = doc.text_styles.clone();
        let projection = project(&doc, &AutoShrinkConfig::default());
        assert!(projection.text(TextRole::Name).unwrap().font_size_px < before.name.font_size_px);
        assert_eq!(doc.text_styles, before);
    }

    #[test]
    fn background_carries_overrides() {
        let mut doc = document();
        doc.illustration.opacity = 0.4;
        doc.illustration.blend_mode = BlendMode::Multiply;
        let projection = project(&doc, &AutoShrinkConfig::default());
        assert_eq!(projection.background.opacity, 0.4);
        assert_eq!(projection.background.blend_mode, BlendMode::Multiply);
        assert_eq!(projection.background.theme_id, "space");
    }
}
