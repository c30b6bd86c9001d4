use egui::{Color32, RichText, Ui};

use crate::catalog::BlendMode;
use crate::command::Command;
use crate::document::{
    CssColor, FieldRole, FontFamily, Gradient, GradientDirection, LayoutOrder, Outline, PaperSize,
    Shadow, StyleRecord, TextRole,
};
use crate::document::style::{MAX_FONT_SIZE_PX, MIN_FONT_SIZE_PX};
use crate::export::ExportFormat;
use crate::state::CoverEditor;

const ERROR_COLOR: Color32 = Color32::from_rgb(0xdc, 0x26, 0x26);

/// Session-level requests that need more than a document edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionAction {
    Save,
    Load,
    Reset,
    RemoveCustomIllustration,
    Export(ExportFormat),
}

/// Everything the user asked for during one frame
#[derive(Debug, Default)]
pub struct PanelOutput {
    pub commands: Vec<Command>,
    pub actions: Vec<SessionAction>,
}

/// Side panel with every editing control. Reads the editor, never mutates it.
/// Only `export_formats` get an export button.
pub fn control_panel(
    ctx: &egui::Context,
    editor: &CoverEditor,
    export_formats: &[ExportFormat],
    export_busy: impl Fn(ExportFormat) -> bool,
) -> PanelOutput {
    let mut out = PanelOutput::default();
    egui::SidePanel::right("control_panel")
        .resizable(true)
        .default_width(340.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                fields_section(ui, editor, &mut out);
                ui.separator();
                illustration_section(ui, editor, &mut out);
                ui.separator();
                typography_section(ui, editor, &mut out);
                ui.separator();
                for role in TextRole::ALL {
                    style_section(ui, role, editor.text_style(role), &mut out);
                }
                ui.separator();
                session_section(ui, export_formats, &export_busy, &mut out);
            });
        });
    out
}

fn fields_section(ui: &mut Ui, editor: &CoverEditor, out: &mut PanelOutput) {
    ui.heading("معلومات الغلاف");
    for role in FieldRole::ALL {
        ui.label(role.label());
        let mut text = editor.field(role).to_owned();
        if ui.text_edit_singleline(&mut text).changed() {
            out.commands.push(Command::SetField { role, text });
        }
        if let Some(message) = editor.errors().get(role) {
            ui.label(RichText::new(message).color(ERROR_COLOR).small());
        }
    }

    let mut show = editor.document().show_subject_line;
    if ui.checkbox(&mut show, "إظهار سطر المادة").changed() {
        out.commands.push(Command::SetShowSubjectLine(show));
    }
}

fn illustration_section(ui: &mut Ui, editor: &CoverEditor, out: &mut PanelOutput) {
    ui.heading("الرسومات");
    let illustration = &editor.document().illustration;

    ui.horizontal_wrapped(|ui| {
        for theme in editor.catalog().entries() {
            let selected = theme.id == illustration.id();
            if ui.selectable_label(selected, &theme.display_name).clicked() && !selected {
                out.commands.push(Command::SelectIllustration(theme.id.clone()));
            }
        }
    });
    ui.label(RichText::new("اسحب صورة وأفلتها هنا لاستخدامها كخلفية مخصصة").weak());
    if editor.catalog().has_custom() && ui.button("حذف الصورة المخصصة").clicked() {
        out.actions.push(SessionAction::RemoveCustomIllustration);
    }

    let mut opacity = illustration.opacity;
    if ui.add(egui::Slider::new(&mut opacity, 0.0..=1.0).text("الشفافية")).changed() {
        out.commands.push(Command::SetIllustrationOpacity(opacity));
    }

    let mut blend = illustration.blend_mode;
    egui::ComboBox::from_label("نمط الدمج")
        .selected_text(blend.as_str())
        .show_ui(ui, |ui| {
            for mode in BlendMode::ALL {
                ui.selectable_value(&mut blend, mode, mode.as_str());
            }
        });
    if blend != illustration.blend_mode {
        out.commands.push(Command::SetIllustrationBlendMode(blend));
    }
}

fn typography_section(ui: &mut Ui, editor: &CoverEditor, out: &mut PanelOutput) {
    let doc = editor.document();

    let mut font = doc.font_family;
    egui::ComboBox::from_label("الخط")
        .selected_text(font.display_name())
        .show_ui(ui, |ui| {
            for option in FontFamily::ALL {
                ui.selectable_value(&mut font, option, option.display_name());
            }
        });
    if font != doc.font_family {
        out.commands.push(Command::SetFontFamily(font));
    }

    let mut order = doc.layout_order;
    ui.horizontal(|ui| {
        ui.radio_value(&mut order, LayoutOrder::Default, "معلومات التلميذ أولا");
        ui.radio_value(&mut order, LayoutOrder::SchoolNameFirst, "اسم المدرسة أولا");
    });
    if order != doc.layout_order {
        out.commands.push(Command::SetLayoutOrder(order));
    }

    let mut paper = doc.paper_size;
    ui.horizontal(|ui| {
        for option in PaperSize::ALL {
            ui.radio_value(&mut paper, option, option.display_name());
        }
    });
    if paper != doc.paper_size {
        out.commands.push(Command::SetPaperSize(paper));
    }
}

fn style_section(ui: &mut Ui, role: TextRole, current: &StyleRecord, out: &mut PanelOutput) {
    let mut style = current.clone();
    egui::CollapsingHeader::new(role.label())
        .id_salt(("style", role))
        .show(ui, |ui| style_editor(ui, &mut style));
    if &style != current {
        out.commands.push(Command::SetTextStyle { role, style });
    }
}

fn style_editor(ui: &mut Ui, style: &mut StyleRecord) {
    ui.add(egui::Slider::new(&mut style.font_size_px, MIN_FONT_SIZE_PX..=MAX_FONT_SIZE_PX).text("الحجم"));
    ui.horizontal(|ui| {
        ui.label("اللون");
        color_edit(ui, &mut style.color);
    });

    let mut has_outline = style.outline.is_some();
    ui.checkbox(&mut has_outline, "حدود");
    toggle(&mut style.outline, has_outline, || Outline {
        color: CssColor::BLACK,
        width_px: 1.0,
    });
    if let Some(outline) = &mut style.outline {
        ui.horizontal(|ui| {
            color_edit(ui, &mut outline.color);
            ui.add(egui::Slider::new(&mut outline.width_px, 0.0..=10.0).text("السمك"));
        });
    }

    let mut has_shadow = style.shadow.is_some();
    ui.checkbox(&mut has_shadow, "ظل");
    toggle(&mut style.shadow, has_shadow, || Shadow {
        color: CssColor::rgba(0, 0, 0, 0x80),
        blur_px: 4.0,
        offset_x_px: 2.0,
        offset_y_px: 2.0,
    });
    if let Some(shadow) = &mut style.shadow {
        color_edit(ui, &mut shadow.color);
        ui.add(egui::Slider::new(&mut shadow.blur_px, 0.0..=30.0).text("التمويه"));
        ui.add(egui::Slider::new(&mut shadow.offset_x_px, -20.0..=20.0).text("الإزاحة الأفقية"));
        ui.add(egui::Slider::new(&mut shadow.offset_y_px, -20.0..=20.0).text("الإزاحة العمودية"));
    }

    let had_gradient = style.gradient.is_some();
    let mut gradient = style.gradient.unwrap_or(Gradient {
        enabled: false,
        color1: style.color,
        color2: CssColor::WHITE,
        direction: GradientDirection::default(),
    });
    ui.checkbox(&mut gradient.enabled, "تدرج لوني");
    if gradient.enabled {
        ui.horizontal(|ui| {
            color_edit(ui, &mut gradient.color1);
            color_edit(ui, &mut gradient.color2);
        });
        egui::ComboBox::from_id_salt(ui.next_auto_id())
            .selected_text(direction_label(gradient.direction))
            .show_ui(ui, |ui| {
                for direction in GradientDirection::ALL {
                    ui.selectable_value(&mut gradient.direction, direction, direction_label(direction));
                }
            });
    }
    // Records without a gradient stay without one until it is switched on
    if had_gradient || gradient.enabled {
        style.gradient = Some(gradient);
    }
}

fn toggle<T>(slot: &mut Option<T>, on: bool, make: impl FnOnce() -> T) {
    match (slot.is_some(), on) {
        (false, true) => *slot = Some(make()),
        (true, false) => *slot = None,
        _ => {}
    }
}

fn color_edit(ui: &mut Ui, color: &mut CssColor) {
    let mut rgba = [color.r, color.g, color.b, color.a];
    if ui.color_edit_button_srgba_unmultiplied(&mut rgba).changed() {
        let [r, g, b, a] = rgba;
        *color = CssColor::rgba(r, g, b, a);
    }
}

fn direction_label(direction: GradientDirection) -> &'static str {
    match direction {
        GradientDirection::ToTop => "↑",
        GradientDirection::ToTopRight => "↗",
        GradientDirection::ToRight => "→",
        GradientDirection::ToBottomRight => "↘",
        GradientDirection::ToBottom => "↓",
        GradientDirection::ToBottomLeft => "↙",
        GradientDirection::ToLeft => "←",
        GradientDirection::ToTopLeft => "↖",
    }
}

fn session_section(
    ui: &mut Ui,
    export_formats: &[ExportFormat],
    export_busy: &impl Fn(ExportFormat) -> bool,
    out: &mut PanelOutput,
) {
    ui.horizontal_wrapped(|ui| {
        if ui.button("حفظ التصميم").clicked() {
            out.actions.push(SessionAction::Save);
        }
        if ui.button("استرجاع التصميم").clicked() {
            out.actions.push(SessionAction::Load);
        }
        if ui.button("إعادة تعيين").clicked() {
            out.actions.push(SessionAction::Reset);
        }
    });
    ui.horizontal_wrapped(|ui| {
        for &format in export_formats {
            let busy = export_busy(format);
            let label = if busy { "جاري التحميل..." } else { format.label() };
            if ui.add_enabled(!busy, egui::Button::new(label)).clicked() {
                out.actions.push(SessionAction::Export(format));
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn painted_texts(export_formats: &[ExportFormat], busy: Option<ExportFormat>) -> Vec<String> {
        let ctx = egui::Context::default();
        let editor = CoverEditor::default();
        let output = ctx.run(Default::default(), |ctx| {
            control_panel(ctx, &editor, export_formats, |format| busy == Some(format));
        });
        output
            .shapes
            .iter()
            .filter_map(|clipped| match &clipped.shape {
                egui::Shape::Text(text) => Some(text.galley.job.text.clone()),
                _ => None,
            })
            .collect()
    }

    fn shows(texts: &[String], label: &str) -> bool {
        texts.iter().any(|text| text.contains(label))
    }

    #[test]
    fn only_offered_formats_get_a_button() {
        let texts = painted_texts(&[ExportFormat::Png, ExportFormat::Document], None);
        assert!(shows(&texts, ExportFormat::Png.label()));
        assert!(shows(&texts, ExportFormat::Document.label()));
        assert!(!shows(&texts, ExportFormat::Pdf.label()));
    }

    #[test]
    fn busy_format_shows_progress() {
        let texts = painted_texts(&[ExportFormat::Png], Some(ExportFormat::Png));
        assert!(shows(&texts, "جاري التحميل..."));
        assert!(!shows(&texts, ExportFormat::Png.label()));
    }
}
