//! The document state store.
//!
//! [`CoverEditor`] owns the single [`CoverDocument`] of a session together
//! with the illustration catalog and the visible validation errors. All
//! mutation goes through its methods, which keep these invariants:
//!
//! - the selected illustration is always an entry of the catalog;
//! - at most one custom illustration exists, replaced in place on re-upload;
//! - stored style records are only changed by explicit style edits.

use crate::catalog::{self, BlendMode, Illustration, IllustrationCatalog, IllustrationTheme, ImageSource};
use crate::document::{
    CoverDocument, FieldRole, FontFamily, LayoutOrder, PaperSize, StyleRecord, TextRole,
};
use crate::error::{CoverError, CoverResult};
use crate::render::{self, CoverProjection};
use crate::settings::CoverSettings;
use crate::validation::FieldErrors;

use super::dialogs::{Dialogs, messages};
use super::persistence::{self, LoadWarning, LoadedDesign};
use super::store::BlobStore;

#[derive(Debug, Clone)]
pub struct CoverEditor {
    document: CoverDocument,
    catalog: IllustrationCatalog,
    errors: FieldErrors,
    settings: CoverSettings,
}

impl Default for CoverEditor {
    fn default() -> Self {
        Self::new(CoverSettings::default())
    }
}

impl CoverEditor {
    /// Start a session from the initial template
    pub fn new(settings: CoverSettings) -> Self {
        Self {
            document: CoverDocument::initial(Illustration::new(catalog::default_theme())),
            catalog: IllustrationCatalog::canonical(),
            errors: FieldErrors::default(),
            settings,
        }
    }

    pub fn document(&self) -> &CoverDocument {
        &self.document
    }

    pub fn catalog(&self) -> &IllustrationCatalog {
        &self.catalog
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn settings(&self) -> &CoverSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: CoverSettings) {
        self.settings = settings;
    }

    // ---- fields & validation ----

    pub fn field(&self, role: FieldRole) -> &str {
        self.document.fields.get(role)
    }

    /// Store raw text. Never validates, but drops a shown error once the
    /// field has content.
    pub fn set_field(&mut self, role: FieldRole, text: impl Into<String>) {
        let text = text.into();
        self.errors.clear_if_filled(role, &text);
        self.document.fields.set(role, text);
    }

    /// Recompute the error set for all required fields. `true` when every
    /// field is filled.
    pub fn validate_all(&mut self) -> bool {
        self.errors = FieldErrors::check(&self.document.fields);
        self.errors.is_empty()
    }

    // ---- illustrations ----

    /// Select a catalog entry. Unknown ids are ignored. Choosing a different
    /// illustration starts it with default overrides.
    ///
    /// Re-selecting the current illustration is a no-op, so its opacity and
    /// blend mode are kept.
    pub fn select_illustration(&mut self, id: &str) {
        // keeps the current overrides
        if self.document.illustration.id() == id {
            return;
        }
        match self.catalog.get(id) {
            Some(theme) => {
                log::debug!("Selected illustration {id}");
                self.document.illustration = Illustration::new(theme.clone());
            }
            None => log::debug!("Ignoring selection of unknown illustration {id}"),
        }
    }

    /// Install uploaded image bytes as the custom illustration and select it.
    pub fn apply_custom_image(&mut self, bytes: Vec<u8>) -> CoverResult<()> {
        let format = image::guess_format(&bytes).map_err(|_| CoverError::UnsupportedImage)?;
        log::info!("Applying custom illustration ({:?}, {} bytes)", format, bytes.len());
        self.apply_custom_source(ImageSource::embedded(format.to_mime_type(), bytes));
        Ok(())
    }

    fn apply_custom_source(&mut self, source: ImageSource) {
        self.apply_custom_theme(IllustrationTheme::custom(source));
    }

    fn apply_custom_theme(&mut self, theme: IllustrationTheme) {
        self.catalog.upsert_custom(theme.clone());
        self.document.illustration = Illustration::new(theme);
    }

    /// Remove the custom illustration after the user confirms. Returns
    /// whether anything was removed.
    pub fn remove_custom_illustration(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if !self.catalog.has_custom() {
            return false;
        }
        if !dialogs.confirm(messages::CONFIRM_REMOVE_CUSTOM) {
            return false;
        }
        self.catalog.remove_custom();
        if self.document.illustration.theme.is_custom() {
            self.document.illustration = Illustration::new(catalog::default_theme());
        }
        log::info!("Removed custom illustration");
        dialogs.notify(messages::CUSTOM_REMOVED);
        true
    }

    pub fn set_illustration_opacity(&mut self, opacity: f32) {
        self.document.illustration.set_opacity(opacity);
    }

    pub fn set_illustration_blend_mode(&mut self, mode: BlendMode) {
        self.document.illustration.blend_mode = mode;
    }

    // ---- typography & page ----

    pub fn set_font_family(&mut self, font: FontFamily) {
        self.document.font_family = font;
    }

    pub fn set_show_subject_line(&mut self, show: bool) {
        self.document.show_subject_line = show;
    }

    pub fn set_layout_order(&mut self, order: LayoutOrder) {
        self.document.layout_order = order;
    }

    pub fn set_paper_size(&mut self, paper: PaperSize) {
        self.document.paper_size = paper;
    }

    pub fn text_style(&self, role: TextRole) -> &StyleRecord {
        self.document.text_styles.get(role)
    }

    /// Replace a role's style, clamped into the editor's ranges
    pub fn set_text_style(&mut self, role: TextRole, style: StyleRecord) {
        *self.document.text_styles.get_mut(role) = style.sanitized();
    }

    /// Current render projection of the document
    pub fn projection(&self) -> CoverProjection {
        render::project(&self.document, &self.settings.auto_shrink)
    }

    // ---- session ----

    /// Validate, then write the document to `store`.
    pub fn save(&mut self, store: &mut dyn BlobStore, dialogs: &mut dyn Dialogs) -> CoverResult<()> {
        if !self.validate_all() {
            return Err(CoverError::Validation(self.errors.roles()));
        }

        let blob = persistence::serialize(&self.document).map_err(|e| {
            log::error!("Failed to serialize design: {e}");
            dialogs.notify(messages::SAVE_FAILED);
            CoverError::Storage(e.to_string())
        })?;
        store.put(&self.settings.storage_key, &blob).map_err(|e| {
            log::error!("Failed to save design: {e}");
            dialogs.notify(messages::SAVE_FAILED);
            CoverError::Storage(e.to_string())
        })?;

        log::info!("Saved design ({} bytes)", blob.len());
        dialogs.notify(messages::SAVED);
        Ok(())
    }

    /// Decode the saved design without applying it
    pub fn preview_saved(&self, store: &dyn BlobStore) -> CoverResult<LoadedDesign> {
        let blob = store.get(&self.settings.storage_key).ok_or(CoverError::NothingSaved)?;
        Ok(persistence::deserialize(&blob)?)
    }

    /// Replace the document with the saved design. On any failure the
    /// current document is left untouched.
    pub fn load(&mut self, store: &dyn BlobStore, dialogs: &mut dyn Dialogs) -> CoverResult<Vec<LoadWarning>> {
        let loaded = match self.preview_saved(store) {
            Ok(loaded) => loaded,
            Err(CoverError::NothingSaved) => {
                dialogs.notify(messages::NOTHING_SAVED);
                return Err(CoverError::NothingSaved);
            }
            Err(err) => {
                log::error!("Failed to load design: {err}");
                dialogs.notify(messages::LOAD_FAILED);
                return Err(err);
            }
        };

        let warnings = loaded.warnings.clone();
        self.apply_loaded(loaded);
        dialogs.notify(messages::LOADED);
        Ok(warnings)
    }

    /// Install a decoded design as the current document
    pub fn apply_loaded(&mut self, loaded: LoadedDesign) {
        let LoadedDesign { document, version, .. } = loaded;
        log::info!("Loaded design (format v{version})");
        if document.illustration.theme.is_custom() {
            self.catalog.upsert_custom(document.illustration.theme.clone());
        }
        self.document = document;
        self.errors.clear();
    }

    /// Back to the initial template and the canonical catalog, after the
    /// user confirms.
    pub fn reset(&mut self, dialogs: &mut dyn Dialogs) -> bool {
        if !dialogs.confirm(messages::CONFIRM_RESET) {
            return false;
        }
        let settings = std::mem::take(&mut self.settings);
        *self = Self::new(settings);
        log::info!("Design reset to defaults");
        true
    }
}
