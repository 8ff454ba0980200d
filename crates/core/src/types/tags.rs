//! Wardrobe tag list (de)serialization.
//!
//! Tags are stored as a single JSON-serialized string column. Decoding is
//! deliberately lenient: anything that is not a valid JSON string array reads
//! back as an empty list, so one bad row never fails a wardrobe listing.

/// Decode a serialized tag column into a tag list.
///
/// `None`, empty, or malformed payloads all yield an empty list.
#[must_use]
pub fn decode_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };
    if raw.trim().is_empty() {
        return Vec::new();
    }
    serde_json::from_str(raw).unwrap_or_default()
}

/// Encode a tag list for storage.
///
/// Returns `None` for an empty list so the column stays NULL.
#[must_use]
pub fn encode_tags(tags: &[String]) -> Option<String> {
    if tags.is_empty() {
        return None;
    }
    serde_json::to_string(tags).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_tags() {
        let tags = vec!["vintage".to_owned(), "summer".to_owned()];
        let encoded = encode_tags(&tags).unwrap();
        assert_eq!(decode_tags(Some(&encoded)), tags);
    }

    #[test]
    fn empty_list_encodes_to_none() {
        assert_eq!(encode_tags(&[]), None);
    }

    #[test]
    fn malformed_payload_decodes_to_empty() {
        assert!(decode_tags(Some("not json")).is_empty());
        assert!(decode_tags(Some("{\"a\":1}")).is_empty());
        assert!(decode_tags(Some("   ")).is_empty());
        assert!(decode_tags(None).is_empty());
    }
}
