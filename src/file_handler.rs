use eframe::egui;

use crate::command::Command;

/// Turns files dropped onto the window into custom-illustration commands
#[derive(Debug, Default)]
pub struct FileHandler {
    dropped_files: Vec<egui::DroppedFile>,
}

impl FileHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect newly dropped files from the UI context.
    /// Returns true if any files arrived this frame.
    pub fn check_for_dropped_files(&mut self, ctx: &egui::Context) -> bool {
        ctx.input(|i| {
            if i.raw.dropped_files.is_empty() {
                false
            } else {
                self.dropped_files = i.raw.dropped_files.clone();
                true
            }
        })
    }

    /// Drain the dropped files into commands. Only one illustration can be
    /// custom at a time, so the last readable image wins.
    pub fn process_dropped_files(&mut self) -> Vec<Command> {
        let mut commands = Vec::new();
        for file in std::mem::take(&mut self.dropped_files) {
            let file_name = display_name(&file);
            if !is_image_file(&file) {
                log::warn!("Dropped file is not a supported type: {file_name}");
                continue;
            }
            if let Some(bytes) = read_bytes(&file, &file_name) {
                commands.push(Command::ApplyCustomImage(bytes));
            }
        }
        if commands.len() > 1 {
            commands.drain(..commands.len() - 1);
        }
        commands
    }

    /// Dim the window while files hover over it
    pub fn preview_files_being_dropped(&self, ctx: &egui::Context) {
        use egui::{Align2, Color32, FontId, Id, LayerId, Order};

        if ctx.input(|i| i.raw.hovered_files.is_empty()) {
            return;
        }

        let painter = ctx.layer_painter(LayerId::new(Order::Foreground, Id::new("file_drop_target")));
        let screen_rect = ctx.screen_rect();
        painter.rect_filled(screen_rect, 0.0, Color32::from_black_alpha(192));
        painter.text(
            screen_rect.center(),
            Align2::CENTER_CENTER,
            "أفلت الصورة لاستخدامها كخلفية",
            FontId::proportional(24.0),
            Color32::WHITE,
        );
    }
}

fn display_name(file: &egui::DroppedFile) -> String {
    if let Some(path) = &file.path {
        path.display().to_string()
    } else if !file.name.is_empty() {
        file.name.clone()
    } else {
        "unknown".to_owned()
    }
}

/// Check if a file is an image based on MIME type or extension
fn is_image_file(file: &egui::DroppedFile) -> bool {
    if !file.mime.is_empty() {
        return file.mime.starts_with("image/");
    }
    let name = file
        .path
        .as_ref()
        .and_then(|path| path.extension())
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .or_else(|| file.name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()));
    matches!(
        name.as_deref(),
        Some("png" | "jpg" | "jpeg" | "gif" | "webp" | "bmp")
    )
}

fn read_bytes(file: &egui::DroppedFile, file_name: &str) -> Option<Vec<u8>> {
    if let Some(bytes) = &file.bytes {
        log::info!("Processing image from memory: {} ({} bytes)", file_name, bytes.len());
        return Some(bytes.to_vec());
    }

    // Only native builds can read from the filesystem
    #[cfg(not(target_arch = "wasm32"))]
    {
        if let Some(path) = &file.path {
            log::info!("Processing image from path: {}", path.display());
            return match std::fs::read(path) {
                Ok(bytes) => Some(bytes),
                Err(err) => {
                    log::error!("Failed to read image file: {}: {}", path.display(), err);
                    None
                }
            };
        }
    }

    log::warn!("Dropped file has no accessible data: {file_name}");
    None
}
