/// Thumbnail fetching
///
/// Downloads the fixed-size rendition of a single image and decodes it to
/// RGBA pixels for the renderer. Thumbnails live in memory only; nothing is
/// written to disk.

use super::client::{self, FetchError};

/// Size of grid thumbnails (square)
pub const THUMB_SIZE: u32 = 100;

/// A decoded thumbnail ready to hand to the renderer
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// Tightly packed RGBA8 pixels, row-major
    pub rgba: Vec<u8>,
}

/// URL of an image's grid thumbnail
pub fn thumbnail_url(id: &str) -> String {
    client::image_url(id, THUMB_SIZE, THUMB_SIZE)
}

/// Fetch and decode one thumbnail
pub async fn fetch_thumbnail(id: &str) -> Result<Thumbnail, FetchError> {
    let response = reqwest::get(thumbnail_url(id)).await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let bytes = response.bytes().await?;
    decode_thumbnail(&bytes)
}

/// Decode fetched bytes into RGBA pixels
///
/// The service decides the actual encoding (JPEG in practice); the decoder
/// sniffs the format from the bytes.
fn decode_thumbnail(bytes: &[u8]) -> Result<Thumbnail, FetchError> {
    let decoded = image::load_from_memory(bytes)?;
    let rgba = decoded.to_rgba8();

    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        rgba: rgba.into_raw(),
    })
}
