//! Export of the rendered cover page.
//!
//! Encoders live behind [`ExportAdapter`]; the [`ExportController`] runs at
//! most one export per format at a time. PNG and Word ship built in, a PDF
//! adapter is registered by the embedding application.

mod controller;
mod docx;
mod png;

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use futures::future::BoxFuture;
use thiserror::Error;

use crate::document::PaperSize;

pub use controller::{ExportController, ExportedFile};
pub use docx::DocxExporter;
pub use png::PngExporter;

const MM_PER_INCH: f32 = 25.4;
const POINTS_PER_INCH: f32 = 72.0;
const TWIPS_PER_INCH: f32 = 1440.0;

/// Base name of every exported file
pub const EXPORT_FILE_STEM: &str = "غلاف-كراس";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Pdf,
    /// Word-processing document (.docx)
    Document,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 3] = [ExportFormat::Png, ExportFormat::Pdf, ExportFormat::Document];

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Document => "docx",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Pdf => "application/pdf",
            ExportFormat::Document => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        }
    }

    pub fn file_name(&self) -> String {
        format!("{EXPORT_FILE_STEM}.{}", self.extension())
    }

    pub fn label(&self) -> &'static str {
        match self {
            ExportFormat::Png => "تحميل كصورة",
            ExportFormat::Pdf => "تحميل PDF",
            ExportFormat::Document => "تحميل Word",
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.extension())
    }
}

/// Physical page an export is laid out on
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageGeometry {
    pub width_mm: f32,
    pub height_mm: f32,
}

impl PageGeometry {
    pub fn for_paper(paper: PaperSize) -> Self {
        let (width_mm, height_mm) = paper.size_mm();
        Self { width_mm, height_mm }
    }

    /// Size in PostScript points (1/72 inch)
    pub fn points(&self) -> (f32, f32) {
        (
            self.width_mm / MM_PER_INCH * POINTS_PER_INCH,
            self.height_mm / MM_PER_INCH * POINTS_PER_INCH,
        )
    }

    /// Size in twips (1/1440 inch), rounded to whole units
    pub fn twips(&self) -> (u32, u32) {
        let to_twips = |mm: f32| (mm / MM_PER_INCH * TWIPS_PER_INCH).round() as u32;
        (to_twips(self.width_mm), to_twips(self.height_mm))
    }
}

/// Unmultiplied RGBA pixels of the rendered page
#[derive(Clone, PartialEq, Eq)]
pub struct Capture {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl std::fmt::Debug for Capture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Capture")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rgba_len", &self.rgba.len())
            .finish()
    }
}

impl Capture {
    pub fn from_color_image(image: &egui::ColorImage) -> Self {
        let [width, height] = image.size;
        let rgba = image
            .pixels
            .iter()
            .flat_map(|pixel| pixel.to_srgba_unmultiplied())
            .collect();
        Self {
            width: width as u32,
            height: height as u32,
            rgba,
        }
    }

    /// A capture with no pixels, or whose buffer does not match its size
    pub fn is_empty(&self) -> bool {
        self.width == 0
            || self.height == 0
            || self.rgba.len() != self.width as usize * self.height as usize * 4
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("an export to {0} is already running")]
    Busy(ExportFormat),

    #[error("no exporter registered for {0}")]
    NoAdapter(ExportFormat),

    #[error("nothing was captured")]
    EmptyCapture,

    #[error("encoding failed: {0}")]
    Encode(String),

    #[error("failed to {operation} {path}: {source}")]
    Io {
        operation: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Turns a captured page into the bytes of one file format
pub trait ExportAdapter: Send + Sync {
    fn format(&self) -> ExportFormat;

    fn export(&self, capture: Capture, page: PageGeometry) -> BoxFuture<'static, Result<Vec<u8>, ExportError>>;
}

/// Write an exported file into `dir`. The bytes go to a temporary sibling
/// first, so a failed write never leaves a partial file under the final name.
pub fn write_export(dir: &Path, file: &ExportedFile) -> Result<PathBuf, ExportError> {
    let path = dir.join(&file.file_name);
    let temp_path = dir.join(format!(".{}.tmp", file.file_name));
    let io_err = |operation: &'static str, path: &Path| {
        let path = path.to_path_buf();
        move |source: std::io::Error| ExportError::Io { operation, path, source }
    };

    fs::create_dir_all(dir).map_err(io_err("create", dir))?;

    let written = File::create(&temp_path)
        .and_then(|mut out| {
            out.write_all(&file.bytes)?;
            out.sync_all()
        })
        .map_err(io_err("write", &temp_path))
        .and_then(|()| fs::rename(&temp_path, &path).map_err(io_err("rename", &temp_path)));

    if written.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    written?;

    log::info!("Exported {} ({} bytes)", path.display(), file.bytes.len());
    Ok(path)
}
