use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use futures::FutureExt as _;
use futures::future::{self, BoxFuture};
use parking_lot::Mutex;

use crate::document::PaperSize;

use super::{Capture, DocxExporter, ExportAdapter, ExportError, ExportFormat, PageGeometry, PngExporter};

/// A finished export, ready to be written or offered for download
#[derive(Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ExportedFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportedFile")
            .field("file_name", &self.file_name)
            .field("mime", &self.mime)
            .field("len", &self.bytes.len())
            .finish()
    }
}

/// Registry of export adapters. Clones share the busy set, so a clone handed
/// to a worker still blocks a second export of the same format.
#[derive(Clone, Default)]
pub struct ExportController {
    adapters: HashMap<ExportFormat, Arc<dyn ExportAdapter>>,
    busy: Arc<Mutex<HashSet<ExportFormat>>>,
}

impl std::fmt::Debug for ExportController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExportController")
            .field("formats", &self.adapters.keys().collect::<Vec<_>>())
            .field("busy", &*self.busy.lock())
            .finish()
    }
}

/// Holds a format's busy flag until dropped
struct BusyGuard {
    busy: Arc<Mutex<HashSet<ExportFormat>>>,
    format: ExportFormat,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.lock().remove(&self.format);
    }
}

impl ExportController {
    pub fn new() -> Self {
        Self::default()
    }

    /// A controller with the built-in PNG and Word exporters registered
    pub fn with_builtin() -> Self {
        let mut controller = Self::new();
        controller.register(PngExporter);
        controller.register(DocxExporter);
        controller
    }

    /// Register an adapter, replacing any previous one for its format
    pub fn register(&mut self, adapter: impl ExportAdapter + 'static) {
        let format = adapter.format();
        log::debug!("Registered {format} exporter");
        self.adapters.insert(format, Arc::new(adapter));
    }

    pub fn supports(&self, format: ExportFormat) -> bool {
        self.adapters.contains_key(&format)
    }

    /// Formats with a registered adapter, in display order
    pub fn formats(&self) -> Vec<ExportFormat> {
        ExportFormat::ALL.into_iter().filter(|f| self.supports(*f)).collect()
    }

    pub fn is_busy(&self, format: ExportFormat) -> bool {
        self.busy.lock().contains(&format)
    }

    /// Start an export. The format is marked busy immediately and stays busy
    /// until the returned future completes or is dropped.
    pub fn export(
        &self,
        format: ExportFormat,
        capture: Capture,
        paper: PaperSize,
    ) -> BoxFuture<'static, Result<ExportedFile, ExportError>> {
        let Some(adapter) = self.adapters.get(&format).cloned() else {
            log::warn!("No exporter registered for {format}");
            return future::ready(Err(ExportError::NoAdapter(format))).boxed();
        };
        if !self.busy.lock().insert(format) {
            log::warn!("Export to {format} requested while one is running");
            return future::ready(Err(ExportError::Busy(format))).boxed();
        }
        let guard = BusyGuard {
            busy: Arc::clone(&self.busy),
            format,
        };

        log::info!("Exporting {format} ({}x{})", capture.width, capture.height);
        let encoding = adapter.export(capture, PageGeometry::for_paper(paper));
        async move {
            let _guard = guard;
            let bytes = encoding.await?;
            if bytes.is_empty() {
                return Err(ExportError::Encode(format!("{format} exporter produced no data")));
            }
            Ok(ExportedFile {
                format,
                file_name: format.file_name(),
                mime: format.mime(),
                bytes,
            })
        }
        .boxed()
    }
}
