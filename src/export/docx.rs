use std::io::Cursor;

use docx_rs::{Docx, PageMargin, Paragraph, Pic, Run};
use futures::future::BoxFuture;

use super::png::encode_png;
use super::{Capture, ExportAdapter, ExportError, ExportFormat, PageGeometry};

/// English Metric Units per twip
const EMU_PER_TWIP: u32 = 635;

/// Writes a one-page Word document with the capture filling the page
#[derive(Debug, Clone, Copy, Default)]
pub struct DocxExporter;

impl ExportAdapter for DocxExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Document
    }

    fn export(&self, capture: Capture, page: PageGeometry) -> BoxFuture<'static, Result<Vec<u8>, ExportError>> {
        Box::pin(async move { encode_docx(capture, page) })
    }
}

/// Picture extent in EMU for a full-bleed image on `page`
fn picture_extent(page: PageGeometry) -> (u32, u32) {
    let (width, height) = page.twips();
    (width * EMU_PER_TWIP, height * EMU_PER_TWIP)
}

fn encode_docx(capture: Capture, page: PageGeometry) -> Result<Vec<u8>, ExportError> {
    let (px_width, px_height) = (capture.width, capture.height);
    let png = encode_png(capture)?;

    let (page_width, page_height) = page.twips();
    let (emu_width, emu_height) = picture_extent(page);
    let picture = Pic::new_with_dimensions(png, px_width, px_height).size(emu_width, emu_height);

    let margins = PageMargin::new().top(0).bottom(0).left(0).right(0).header(0).footer(0);
    let docx = Docx::new()
        .page_size(page_width, page_height)
        .page_margin(margins)
        .add_paragraph(Paragraph::new().add_run(Run::new().add_image(picture)));

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    let bytes = buf.into_inner();
    log::debug!("Encoded {page_width}x{page_height} twip document ({} bytes)", bytes.len());
    Ok(bytes)
}
