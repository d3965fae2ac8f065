/// Remote image service module
///
/// This module handles all network access:
/// - List endpoint, URL construction and error taxonomy (client.rs)
/// - Thumbnail download and decoding (thumbs.rs)

pub mod client;
pub mod thumbs;
