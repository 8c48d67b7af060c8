//! PNG and data-URL encoding of snapshots.
//!
//! The persistence layer stores board images the way the browser original
//! did: a PNG encoded as an `image/png` base64 data URL.

use crate::history::Snapshot;
use crate::surface::Rgba;
use base64::{Engine, engine::general_purpose::STANDARD};
use thiserror::Error;

const DATA_URL_PREFIX: &str = "data:image/png;base64,";

/// Errors from snapshot encoding/decoding.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("PNG encode error: {0}")]
    Encode(#[from] png::EncodingError),
    #[error("PNG decode error: {0}")]
    Decode(#[from] png::DecodingError),
    #[error("unsupported PNG color type: {0:?}")]
    UnsupportedColor(png::ColorType),
    #[error("not an image/png data URL")]
    BadDataUrl,
    #[error("base64 error: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("pixel data does not match image dimensions")]
    SizeMismatch,
}

/// Encode a snapshot as RGBA8 PNG bytes.
pub fn encode_png(snapshot: &Snapshot) -> Result<Vec<u8>, CodecError> {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, snapshot.width(), snapshot.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;

        let bytes: Vec<u8> = snapshot
            .pixels()
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect();
        writer.write_image_data(&bytes)?;
    }
    Ok(out)
}

/// Decode PNG bytes into a snapshot. RGB input is expanded to opaque RGBA;
/// other color types are rejected.
pub fn decode_png(bytes: &[u8]) -> Result<Snapshot, CodecError> {
    let mut decoder = png::Decoder::new(std::io::Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::normalize_to_color8());
    let mut reader = decoder.read_info()?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    let data = &buf[..info.buffer_size()];

    let pixels: Vec<Rgba> = match info.color_type {
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .map(|c| Rgba::new(c[0], c[1], c[2], c[3]))
            .collect(),
        png::ColorType::Rgb => data
            .chunks_exact(3)
            .map(|c| Rgba::new(c[0], c[1], c[2], 255))
            .collect(),
        other => return Err(CodecError::UnsupportedColor(other)),
    };

    Snapshot::from_pixels(info.width, info.height, pixels).ok_or(CodecError::SizeMismatch)
}

/// Encode a snapshot as an `image/png` base64 data URL.
pub fn to_data_url(snapshot: &Snapshot) -> Result<String, CodecError> {
    let bytes = encode_png(snapshot)?;
    Ok(format!("{}{}", DATA_URL_PREFIX, STANDARD.encode(bytes)))
}

/// Decode an `image/png` base64 data URL back into a snapshot.
pub fn from_data_url(url: &str) -> Result<Snapshot, CodecError> {
    let encoded = url.strip_prefix(DATA_URL_PREFIX).ok_or(CodecError::BadDataUrl)?;
    let bytes = STANDARD.decode(encoded)?;
    decode_png(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RasterSurface;

    fn sample_snapshot() -> Snapshot {
        let mut surface = RasterSurface::new(8, 6, Rgba::white());
        surface.set_pixel(0, 0, Rgba::black());
        surface.set_pixel(7, 5, Rgba::new(255, 0, 0, 255));
        surface.set_pixel(3, 2, Rgba::new(0, 128, 64, 200));
        Snapshot::of_surface(&surface)
    }

    #[test]
    fn test_png_roundtrip() {
        let snapshot = sample_snapshot();
        let bytes = encode_png(&snapshot).unwrap();
        let decoded = decode_png(&bytes).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_data_url_roundtrip() {
        let snapshot = sample_snapshot();
        let url = to_data_url(&snapshot).unwrap();
        assert!(url.starts_with("data:image/png;base64,"));
        let decoded = from_data_url(&url).unwrap();
        assert_eq!(decoded, snapshot);
    }

    #[test]
    fn test_bad_data_url() {
        assert!(matches!(
            from_data_url("data:text/plain;base64,aGVsbG8="),
            Err(CodecError::BadDataUrl)
        ));
    }

    #[test]
    fn test_garbage_png_bytes() {
        assert!(decode_png(b"definitely not a png").is_err());
    }
}
