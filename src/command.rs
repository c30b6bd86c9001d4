use crate::catalog::BlendMode;
use crate::document::{FieldRole, FontFamily, LayoutOrder, PaperSize, StyleRecord, TextRole};
use crate::error::CoverResult;
use crate::state::CoverEditor;

/// Edits the UI can request against the document. Panels only produce
/// commands; the app executes them against its [`CoverEditor`].
#[derive(Clone, PartialEq)]
pub enum Command {
    SetField {
        role: FieldRole,
        text: String,
    },
    SelectIllustration(String),
    /// Raw bytes of an uploaded or dropped image file
    ApplyCustomImage(Vec<u8>),
    SetIllustrationOpacity(f32),
    SetIllustrationBlendMode(BlendMode),
    SetFontFamily(FontFamily),
    SetShowSubjectLine(bool),
    SetLayoutOrder(LayoutOrder),
    SetPaperSize(PaperSize),
    SetTextStyle {
        role: TextRole,
        style: StyleRecord,
    },
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Command::SetField { role, text } => f
                .debug_struct("SetField")
                .field("role", role)
                .field("text", text)
                .finish(),
            Command::SelectIllustration(id) => f.debug_tuple("SelectIllustration").field(id).finish(),
            // Skip the image payload
            Command::ApplyCustomImage(bytes) => f
                .debug_struct("ApplyCustomImage")
                .field("len", &bytes.len())
                .finish(),
            Command::SetIllustrationOpacity(v) => f.debug_tuple("SetIllustrationOpacity").field(v).finish(),
            Command::SetIllustrationBlendMode(m) => f.debug_tuple("SetIllustrationBlendMode").field(m).finish(),
            Command::SetFontFamily(font) => f.debug_tuple("SetFontFamily").field(font).finish(),
            Command::SetShowSubjectLine(show) => f.debug_tuple("SetShowSubjectLine").field(show).finish(),
            Command::SetLayoutOrder(order) => f.debug_tuple("SetLayoutOrder").field(order).finish(),
            Command::SetPaperSize(paper) => f.debug_tuple("SetPaperSize").field(paper).finish(),
            Command::SetTextStyle { role, style } => f
                .debug_struct("SetTextStyle")
                .field("role", role)
                .field("style", style)
                .finish(),
        }
    }
}

impl Command {
    pub fn execute(self, editor: &mut CoverEditor) -> CoverResult<()> {
        log::debug!("Executing {self:?}");
        match self {
            Command::SetField { role, text } => editor.set_field(role, text),
            Command::SelectIllustration(id) => editor.select_illustration(&id),
            Command::ApplyCustomImage(bytes) => editor.apply_custom_image(bytes)?,
            Command::SetIllustrationOpacity(opacity) => editor.set_illustration_opacity(opacity),
            Command::SetIllustrationBlendMode(mode) => editor.set_illustration_blend_mode(mode),
            Command::SetFontFamily(font) => editor.set_font_family(font),
            Command::SetShowSubjectLine(show) => editor.set_show_subject_line(show),
            Command::SetLayoutOrder(order) => editor.set_layout_order(order),
            Command::SetPaperSize(paper) => editor.set_paper_size(paper),
            Command::SetTextStyle { role, style } => editor.set_text_style(role, style),
        }
        Ok(())
    }
}

impl CoverEditor {
    /// Apply one UI edit to the document
    pub fn execute(&mut self, command: Command) -> CoverResult<()> {
        command.execute(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoverError;

    #[test]
    fn debug_hides_image_payload() {
        let cmd = Command::ApplyCustomImage(vec![0; 4096]);
        assert_eq!(format!("{cmd:?}"), "ApplyCustomImage { len: 4096 }");
    }

    #[test]
    fn commands_reach_the_document() {
        let mut editor = CoverEditor::default();
        editor
            .execute(Command::SetField { role: FieldRole::ClassName, text: "5B".into() })
            .unwrap();
        editor.execute(Command::SetShowSubjectLine(false)).unwrap();
        editor.execute(Command::SetPaperSize(PaperSize::NotebookCustom)).unwrap();
        editor.execute(Command::SetLayoutOrder(LayoutOrder::SchoolNameFirst)).unwrap();

        let doc = editor.document();
        assert_eq!(doc.fields.class_name, "5B");
        assert!(!doc.show_subject_line);
        assert_eq!(doc.paper_size, PaperSize::NotebookCustom);
        assert_eq!(doc.layout_order, LayoutOrder::SchoolNameFirst);
    }

    #[test]
    fn failed_upload_surfaces_error() {
        let mut editor = CoverEditor::default();
        let result = editor.execute(Command::ApplyCustomImage(b"plain text".to_vec()));
        assert!(matches!(result, Err(CoverError::UnsupportedImage)));
    }
}
