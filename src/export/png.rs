use std::io::Cursor;

use futures::future::BoxFuture;
use image::{ImageFormat, RgbaImage};

use super::{Capture, ExportAdapter, ExportError, ExportFormat, PageGeometry};

/// Encodes the capture as a PNG at its captured resolution
#[derive(Debug, Clone, Copy, Default)]
pub struct PngExporter;

impl ExportAdapter for PngExporter {
    fn format(&self) -> ExportFormat {
        ExportFormat::Png
    }

    fn export(&self, capture: Capture, _page: PageGeometry) -> BoxFuture<'static, Result<Vec<u8>, ExportError>> {
        Box::pin(async move { encode_png(capture) })
    }
}

pub(super) fn encode_png(capture: Capture) -> Result<Vec<u8>, ExportError> {
    if capture.is_empty() {
        return Err(ExportError::EmptyCapture);
    }
    let Capture { width, height, rgba } = capture;
    let image = RgbaImage::from_raw(width, height, rgba).ok_or(ExportError::EmptyCapture)?;

    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;
    log::debug!("Encoded {width}x{height} PNG ({} bytes)", bytes.len());
    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encoded_png_decodes_to_same_pixels() {
        let capture = Capture {
            width: 2,
            height: 1,
            rgba: vec![255, 0, 0, 255, 0, 0, 255, 128],
        };
        let bytes = encode_png(capture).unwrap();
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (2, 1));
        assert_eq!(decoded.get_pixel(1, 0).0, [0, 0, 255, 128]);
    }

    #[test]
    fn empty_capture_is_rejected() {
        let capture = Capture { width: 0, height: 0, rgba: Vec::new() };
        assert!(matches!(encode_png(capture), Err(ExportError::EmptyCapture)));
    }
}
