//! Media type detection and base64 encoding for inline image parts

use base64::Engine;

pub const FALLBACK_MIME: &str = "image/jpeg";

/// Media type of an image judged by its magic bytes, `image/jpeg` if unknown
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    match image::guess_format(bytes) {
        Ok(format) => format.to_mime_type(),
        Err(_) => FALLBACK_MIME,
    }
}

pub fn encode_base64(bytes: &[u8]) -> String {
    base64::engine::general_purpose::STANDARD.encode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn encoded(format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        RgbImage::new(2, 2).write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_sniff_png_and_jpeg() {
        assert_eq!(sniff_mime(&encoded(ImageFormat::Png)), "image/png");
        assert_eq!(sniff_mime(&encoded(ImageFormat::Jpeg)), "image/jpeg");
    }

    #[test]
    fn test_unknown_bytes_fall_back_to_jpeg() {
        assert_eq!(sniff_mime(b"definitely not an image"), FALLBACK_MIME);
        assert_eq!(sniff_mime(&[]), FALLBACK_MIME);
    }

    #[test]
    fn test_encode_base64() {
        assert_eq!(encode_base64(b"paradero"), "cGFyYWRlcm8=");
    }
}
