//! Font setup for the cover and the UI.
//!
//! egui's default faces have no Arabic glyphs. DejaVu Sans is embedded and
//! sits behind every family, so Arabic always renders. The Cairo, Amiri and
//! Lateef faces are picked up from disk when they are installed, and then
//! take precedence in their own family.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use egui::{FontData, FontDefinitions, FontId};

use crate::document::FontFamily;

const FALLBACK_FACE: &str = "DejaVuSans";
static FALLBACK_FACE_DATA: &[u8] = include_bytes!("../assets/fonts/DejaVuSans.ttf");

/// The egui family a cover font is registered under
pub fn egui_family(font: FontFamily) -> egui::FontFamily {
    egui::FontFamily::Name(font.family_name().into())
}

pub fn font_id(font: FontFamily, size: f32) -> FontId {
    FontId::new(size, egui_family(font))
}

/// File names a face is commonly shipped under
fn face_file_names(font: FontFamily) -> &'static [&'static str] {
    match font {
        FontFamily::Cairo => &["Cairo-Regular.ttf", "Cairo[slnt,wght].ttf", "Cairo.ttf"],
        FontFamily::Amiri => &["Amiri-Regular.ttf", "Amiri.ttf"],
        FontFamily::Lateef => &["Lateef-Regular.ttf", "LateefGR-Regular.ttf", "Lateef.ttf"],
    }
}

/// Font definitions with the fallback face behind the proportional family
/// and one named family per cover font. `faces` holds the font files that
/// were found, at most one per family.
pub fn cover_font_definitions(faces: Vec<(FontFamily, Vec<u8>)>) -> FontDefinitions {
    let mut fonts = FontDefinitions::default();
    fonts
        .font_data
        .insert(FALLBACK_FACE.to_owned(), Arc::new(FontData::from_static(FALLBACK_FACE_DATA)));

    let proportional = fonts
        .families
        .entry(egui::FontFamily::Proportional)
        .or_default();
    proportional.push(FALLBACK_FACE.to_owned());
    let proportional = proportional.clone();

    for font in FontFamily::ALL {
        let mut chain = Vec::with_capacity(proportional.len() + 1);
        if let Some((_, bytes)) = faces.iter().find(|(family, _)| *family == font) {
            let name = font.family_name().to_owned();
            fonts
                .font_data
                .insert(name.clone(), Arc::new(FontData::from_owned(bytes.clone())));
            chain.push(name);
        }
        chain.push(FALLBACK_FACE.to_owned());
        chain.extend(proportional.iter().filter(|name| *name != FALLBACK_FACE).cloned());
        fonts.families.insert(egui_family(font), chain);
    }
    fonts
}

/// Directories searched for installed faces, most specific first
pub fn font_search_dirs(configured: Option<&Path>) -> Vec<PathBuf> {
    let mut search = Vec::new();
    search.extend(configured.map(Path::to_path_buf));
    #[cfg(not(target_arch = "wasm32"))]
    {
        search.extend(dirs::font_dir());
        search.push(PathBuf::from("/usr/share/fonts/truetype"));
        search.push(PathBuf::from("/usr/share/fonts/opentype"));
    }
    search
}

/// Read the first file found for each cover font. A directory is searched
/// directly and one level down, so per-family folders are found too.
pub fn find_installed_faces(search_dirs: &[PathBuf]) -> Vec<(FontFamily, Vec<u8>)> {
    let mut faces = Vec::new();
    for font in FontFamily::ALL {
        let subdir = font.family_name().to_lowercase();
        let found = search_dirs.iter().find_map(|dir| {
            face_file_names(font).iter().find_map(|file| {
                [dir.join(file), dir.join(&subdir).join(file)]
                    .into_iter()
                    .find_map(|path| std::fs::read(&path).ok().map(|bytes| (path, bytes)))
                    .filter(|(path, bytes)| {
                        let ok = is_font_file(bytes);
                        if !ok {
                            log::warn!("Skipping {}: not a TrueType or OpenType file", path.display());
                        }
                        ok
                    })
            })
        });
        match found {
            Some((path, bytes)) => {
                log::info!("Using {} from {}", font.family_name(), path.display());
                faces.push((font, bytes));
            }
            None => log::debug!("{} is not installed, using {FALLBACK_FACE}", font.family_name()),
        }
    }
    faces
}

/// sfnt signatures egui can parse
fn is_font_file(bytes: &[u8]) -> bool {
    matches!(bytes.get(..4), Some(b"\x00\x01\x00\x00" | b"OTTO" | b"true" | b"ttcf"))
}

/// Register the cover fonts with `ctx`. Takes effect from the next frame.
pub fn install_fonts(ctx: &egui::Context, configured_dir: Option<&Path>) {
    let faces = if cfg!(target_arch = "wasm32") {
        Vec::new()
    } else {
        find_installed_faces(&font_search_dirs(configured_dir))
    };
    ctx.set_fonts(cover_font_definitions(faces));
}
