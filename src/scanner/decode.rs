// QR payload decoding
// Turns an encoded camera still into the text of the first QR code in view

use super::frame::CameraFrame;
use super::ScanError;

pub struct QrDecoder;

impl QrDecoder {
    /// Decode the first QR payload in a frame.
    /// Returns Ok(None) when the frame holds no decodable code.
    pub fn decode_frame(frame: &CameraFrame) -> Result<Option<String>, ScanError> {
        let gray = image::load_from_memory(frame.data())?.to_luma8();
        let (width, height) = gray.dimensions();

        let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
            width as usize,
            height as usize,
            |x, y| gray.get_pixel(x as u32, y as u32)[0],
        );

        let grids = prepared.detect_grids();
        let grid = match grids.first() {
            Some(g) => g,
            None => return Ok(None),
        };

        let (_meta, text) = grid.decode()?;

        let payload = normalize_payload(&text);
        if payload.is_empty() {
            Ok(None)
        } else {
            Ok(Some(payload))
        }
    }
}

/// Strip a UTF-8 BOM and surrounding whitespace. QR generators routinely
/// emit both, and payloads are compared by exact equality downstream.
pub fn normalize_payload(raw: &str) -> String {
    raw.strip_prefix('\u{feff}').unwrap_or(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Luma};
    use std::io::Cursor;

    /// Encode a flat gray image as PNG bytes
    fn blank_png(width: u32, height: u32) -> Vec<u8> {
        let img = image::ImageBuffer::from_pixel(width, height, Luma([255u8]));
        let mut bytes = Vec::new();
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .unwrap();
        bytes
    }

    #[test]
    fn test_decode_frame_without_code_is_none() {
        let frame = CameraFrame::new(blank_png(320, 240)).unwrap();
        let decoded = QrDecoder::decode_frame(&frame).unwrap();
        assert_eq!(decoded, None);
    }

    #[test]
    fn test_decode_frame_rejects_garbage_bytes() {
        let frame = CameraFrame::new(vec![0xde, 0xad, 0xbe, 0xef]).unwrap();
        assert!(matches!(
            QrDecoder::decode_frame(&frame),
            Err(ScanError::Image(_))
        ));
    }

    #[test]
    fn test_normalize_payload_strips_bom() {
        assert_eq!(normalize_payload("\u{feff}gate_3"), "gate_3");
    }

    #[test]
    fn test_normalize_payload_trims_whitespace() {
        assert_eq!(normalize_payload("  gate_3 \r\n"), "gate_3");
    }

    #[test]
    fn test_normalize_payload_keeps_inner_whitespace() {
        assert_eq!(normalize_payload(" main gate "), "main gate");
    }
}
