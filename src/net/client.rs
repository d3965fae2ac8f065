/// Image service client
///
/// The service exposes two things: a list endpoint enumerating every image,
/// and a deterministic URL rule for fetching one image at a requested size.
/// Neither takes parameters beyond what is encoded in the URL; there is no
/// auth and no pagination.

use thiserror::Error;

use crate::state::data::ImageItem;

/// Base URL of the image service
pub const SERVICE_URL: &str = "https://unsplash.it";

/// Everything that can go wrong while talking to the image service
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a usable response
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    /// The service answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(reqwest::StatusCode),
    /// The response body was not a valid image list
    #[error("malformed image list: {0}")]
    Parse(#[from] serde_json::Error),
    /// The response body was not a decodable image
    #[error("undecodable image: {0}")]
    Decode(#[from] image::ImageError),
}

/// URL of the list endpoint
pub fn list_url() -> String {
    format!("{SERVICE_URL}/list")
}

/// URL of one image rendered at the given size
///
/// Pure string template: `https://<host>/<width>/<height>?image=<id>`.
pub fn image_url(id: &str, width: u32, height: u32) -> String {
    format!("{SERVICE_URL}/{width}/{height}?image={id}")
}

/// Fetch the image list from the service
pub async fn fetch_image_list() -> Result<Vec<ImageItem>, FetchError> {
    fetch_image_list_from(&list_url()).await
}

/// Fetch an image list from an explicit URL
async fn fetch_image_list_from(url: &str) -> Result<Vec<ImageItem>, FetchError> {
    let response = reqwest::get(url).await?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let body = response.text().await?;
    Ok(parse_image_list(&body)?)
}

/// Parse a list endpoint response body
///
/// The body is a JSON array of image records; fields beyond the id are
/// carried by the service but not interpreted here.
fn parse_image_list(body: &str) -> Result<Vec<ImageItem>, serde_json::Error> {
    serde_json::from_str(body)
}
