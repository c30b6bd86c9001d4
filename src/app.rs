use std::collections::VecDeque;
use std::sync::Arc;

use egui::Rect;
use parking_lot::Mutex;

use crate::command::Command;
use crate::error::CoverError;
use crate::export::{Capture, ExportController, ExportError, ExportFormat};
use crate::file_handler::FileHandler;
use crate::panels::{self, SessionAction};
use crate::render::texture::BackgroundTextures;
use crate::settings::CoverSettings;
use crate::state::{AnsweredDialogs, CoverEditor, Dialogs, EframeStore, LoadedDesign, messages};

/// A question waiting for the user's answer
#[derive(Debug)]
enum PendingConfirm {
    RemoveCustom,
    Reset,
    Load(Box<LoadedDesign>),
}

/// Result of a finished export, handed back from the worker
#[derive(Debug)]
struct ExportOutcome {
    format: ExportFormat,
    /// Where the file went
    result: Result<String, ExportError>,
}

/// We derive Deserialize/Serialize so we can persist app settings on shutdown.
/// The design itself is only stored when the user saves it.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct CoverApp {
    settings: CoverSettings,
    #[serde(skip)]
    editor: CoverEditor,
    #[serde(skip)]
    textures: BackgroundTextures,
    #[serde(skip)]
    file_handler: FileHandler,
    #[serde(skip)]
    exports: ExportController,
    #[serde(skip)]
    export_inbox: Arc<Mutex<Vec<ExportOutcome>>>,
    /// Export waiting for its screenshot
    #[serde(skip)]
    pending_capture: Option<ExportFormat>,
    /// Page rectangle of the last painted preview
    #[serde(skip)]
    page_rect: Option<Rect>,
    #[serde(skip)]
    pending_confirm: Option<PendingConfirm>,
    #[serde(skip)]
    notices: VecDeque<String>,
}

impl Default for CoverApp {
    fn default() -> Self {
        let settings = CoverSettings::default();
        Self {
            editor: CoverEditor::new(settings.clone()),
            settings,
            textures: BackgroundTextures::default(),
            file_handler: FileHandler::new(),
            exports: ExportController::with_builtin(),
            export_inbox: Arc::default(),
            pending_capture: None,
            page_rect: None,
            pending_confirm: None,
            notices: VecDeque::new(),
        }
    }
}

impl CoverApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();
        app.editor.set_settings(app.settings.clone());
        log::debug!("Starting with settings {:?}", app.settings);

        egui_extras::install_image_loaders(&cc.egui_ctx);
        crate::fonts::install_fonts(&cc.egui_ctx, app.settings.font_dir.as_deref());
        app
    }

    /// Register an encoder for a format the app does not ship with
    pub fn with_exporter(mut self, adapter: impl crate::export::ExportAdapter + 'static) -> Self {
        self.exports.register(adapter);
        self
    }

    fn execute(&mut self, command: Command) {
        match self.editor.execute(command) {
            Ok(()) => {}
            Err(CoverError::UnsupportedImage) => {
                self.notices.push_back(messages::UNSUPPORTED_IMAGE.to_owned());
            }
            Err(err) => log::warn!("Command failed: {err}"),
        }
    }

    fn handle_action(&mut self, action: SessionAction, ctx: &egui::Context, frame: &mut eframe::Frame) {
        match action {
            SessionAction::Save => {
                let Some(storage) = frame.storage_mut() else {
                    log::error!("No persistent storage available");
                    self.notices.push_back(messages::SAVE_FAILED.to_owned());
                    return;
                };
                let mut dialogs = AnsweredDialogs::yes();
                if let Err(CoverError::Validation(roles)) =
                    self.editor.save(&mut EframeStore::new(storage), &mut dialogs)
                {
                    log::debug!("Save blocked by empty fields: {roles:?}");
                }
                self.notices.extend(dialogs.notices);
            }
            SessionAction::Load => {
                let Some(storage) = frame.storage_mut() else {
                    self.notices.push_back(messages::NOTHING_SAVED.to_owned());
                    return;
                };
                match self.editor.preview_saved(&EframeStore::new(storage)) {
                    Ok(loaded) => self.pending_confirm = Some(PendingConfirm::Load(Box::new(loaded))),
                    Err(CoverError::NothingSaved) => self.notices.push_back(messages::NOTHING_SAVED.to_owned()),
                    Err(err) => {
                        log::error!("Failed to read saved design: {err}");
                        self.notices.push_back(messages::LOAD_FAILED.to_owned());
                    }
                }
            }
            SessionAction::Reset => self.pending_confirm = Some(PendingConfirm::Reset),
            SessionAction::RemoveCustomIllustration => self.pending_confirm = Some(PendingConfirm::RemoveCustom),
            SessionAction::Export(format) => {
                if self.pending_capture.is_some() || self.exports.is_busy(format) {
                    return;
                }
                self.pending_capture = Some(format);
                ctx.send_viewport_cmd(egui::ViewportCommand::Screenshot(egui::UserData::default()));
            }
        }
    }

    /// Pick up the screenshot requested for an export and start encoding
    fn collect_screenshot(&mut self, ctx: &egui::Context) {
        let Some(format) = self.pending_capture else {
            return;
        };
        let screenshot = ctx.input(|i| {
            i.raw.events.iter().find_map(|event| match event {
                egui::Event::Screenshot { image, .. } => Some(Arc::clone(image)),
                _ => None,
            })
        });
        let Some(screenshot) = screenshot else {
            return;
        };
        self.pending_capture = None;

        let Some(page) = self.page_rect else {
            log::warn!("Screenshot arrived before the page was painted");
            return;
        };
        let region = screenshot.region(&page, Some(ctx.pixels_per_point()));
        self.start_export(ctx, format, Capture::from_color_image(&region));
    }

    fn start_export(&mut self, ctx: &egui::Context, format: ExportFormat, capture: Capture) {
        let export = self.exports.export(format, capture, self.editor.document().paper_size);
        let inbox = Arc::clone(&self.export_inbox);
        let ctx = ctx.clone();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let dir = self.settings.export_dir();
            std::thread::spawn(move || {
                let result = futures::executor::block_on(export)
                    .and_then(|file| crate::export::write_export(&dir, &file))
                    .map(|path| path.display().to_string());
                inbox.lock().push(ExportOutcome { format, result });
                ctx.request_repaint();
            });
        }

        #[cfg(target_arch = "wasm32")]
        {
            wasm_bindgen_futures::spawn_local(async move {
                let result = export.await.map(|file| {
                    offer_download(&ctx, &file);
                    file.file_name
                });
                inbox.lock().push(ExportOutcome { format, result });
                ctx.request_repaint();
            });
        }
    }

    fn drain_exports(&mut self) {
        let outcomes = std::mem::take(&mut *self.export_inbox.lock());
        for ExportOutcome { format, result } in outcomes {
            match result {
                Ok(location) => {
                    log::info!("Export to {format} finished: {location}");
                    self.notices.push_back(format!("{} {location}", messages::EXPORTED));
                }
                Err(err) => {
                    log::error!("Export to {format} failed: {err}");
                    self.notices.push_back(messages::EXPORT_FAILED.to_owned());
                }
            }
        }
    }

    fn show_confirm(&mut self, ctx: &egui::Context) {
        let Some(pending) = &self.pending_confirm else {
            return;
        };
        let message = match pending {
            PendingConfirm::RemoveCustom => messages::CONFIRM_REMOVE_CUSTOM,
            PendingConfirm::Reset => messages::CONFIRM_RESET,
            PendingConfirm::Load(_) => messages::CONFIRM_LOAD,
        };

        let mut answer = None;
        egui::Window::new("تأكيد")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(message);
                if let PendingConfirm::Load(loaded) = pending {
                    let doc = &loaded.document;
                    ui.separator();
                    ui.label(format!("{} - {}", doc.fields.name, doc.fields.class_name));
                    ui.label(&doc.illustration.theme.display_name);
                    ui.label(doc.paper_size.display_name());
                }
                ui.horizontal(|ui| {
                    if ui.button("نعم").clicked() {
                        answer = Some(true);
                    }
                    if ui.button("إلغاء").clicked() {
                        answer = Some(false);
                    }
                });
            });

        let Some(answer) = answer else {
            return;
        };
        let Some(pending) = self.pending_confirm.take() else {
            return;
        };
        if !answer {
            log::debug!("User declined {pending:?}");
            return;
        }

        let mut dialogs = AnsweredDialogs::yes();
        match pending {
            PendingConfirm::RemoveCustom => {
                if self.editor.remove_custom_illustration(&mut dialogs) {
                    self.textures.clear();
                }
            }
            PendingConfirm::Reset => {
                if self.editor.reset(&mut dialogs) {
                    self.textures.clear();
                }
            }
            PendingConfirm::Load(loaded) => {
                for warning in &loaded.warnings {
                    log::warn!("Loaded with warning: {warning:?}");
                }
                self.editor.apply_loaded(*loaded);
                dialogs.notify(messages::LOADED);
            }
        }
        self.notices.extend(dialogs.notices);
    }

    fn show_notices(&mut self, ctx: &egui::Context) {
        let Some(notice) = self.notices.front() else {
            return;
        };
        let mut dismissed = false;
        egui::Window::new("تنبيه")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -24.0])
            .show(ctx, |ui| {
                ui.label(notice);
                dismissed = ui.button("حسنا").clicked();
            });
        if dismissed {
            self.notices.pop_front();
        }
    }
}

#[cfg(target_arch = "wasm32")]
fn offer_download(ctx: &egui::Context, file: &crate::export::ExportedFile) {
    use base64::Engine as _;

    let data = base64::engine::general_purpose::STANDARD.encode(&file.bytes);
    ctx.open_url(egui::OpenUrl::new_tab(format!("data:{};base64,{data}", file.mime)));
}

impl eframe::App for CoverApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        self.textures.begin_frame();
        self.collect_screenshot(ctx);
        self.drain_exports();

        self.file_handler.preview_files_being_dropped(ctx);
        let mut commands = Vec::new();
        if self.file_handler.check_for_dropped_files(ctx) {
            commands.extend(self.file_handler.process_dropped_files());
        }

        let exports = &self.exports;
        let pending_capture = self.pending_capture;
        let output = panels::control_panel(ctx, &self.editor, &exports.formats(), |format| {
            pending_capture == Some(format) || exports.is_busy(format)
        });
        commands.extend(output.commands);
        for command in commands {
            self.execute(command);
        }
        for action in output.actions {
            self.handle_action(action, ctx, frame);
        }

        let projection = self.editor.projection();
        self.page_rect = Some(panels::preview_panel(ctx, &projection, &mut self.textures));

        self.show_confirm(ctx);
        self.show_notices(ctx);
    }
}
