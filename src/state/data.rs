/// Shared data structures for the application state
///
/// These structs represent the data model that flows between
/// the network layer and the UI layer.

use serde::Deserialize;

/// Represents a single image in the remote service's listing
///
/// The list endpoint returns more fields than this, but the id is the only
/// one the application reads. Unknown fields are ignored during parsing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ImageItem {
    /// Opaque identifier assigned by the image service
    pub id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ignores_extra_fields() {
        let json = r#"{"id": "42", "author": "someone", "width": 5616}"#;
        let item: ImageItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.id, "42");
    }

    #[test]
    fn test_parse_requires_id() {
        let json = r#"{"author": "someone"}"#;
        let result: Result<ImageItem, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
