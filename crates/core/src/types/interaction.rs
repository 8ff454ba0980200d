//! User interaction kinds.

use serde::{Deserialize, Serialize};

/// The fixed set of engagement events a user can record against a product.
///
/// Stored as lowercase text; the recorder binds [`InteractionKind::to_string`]
/// and never reads the column back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionKind {
    Like,
    Save,
    /// The user already owns this product; recording it also adds the
    /// product to their wardrobe.
    Have,
    Buy,
    View,
}

impl std::fmt::Display for InteractionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Like => "like",
            Self::Save => "save",
            Self::Have => "have",
            Self::Buy => "buy",
            Self::View => "view",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for InteractionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(Self::Like),
            "save" => Ok(Self::Save),
            "have" => Ok(Self::Have),
            "buy" => Ok(Self::Buy),
            "view" => Ok(Self::View),
            _ => Err(format!("invalid interaction kind: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&InteractionKind::Have).unwrap(),
            "\"have\""
        );
        let kind: InteractionKind = serde_json::from_str("\"view\"").unwrap();
        assert_eq!(kind, InteractionKind::View);
    }

    #[test]
    fn rejects_unknown_kind() {
        assert!(serde_json::from_str::<InteractionKind>("\"wear\"").is_err());
        assert!("wear".parse::<InteractionKind>().is_err());
    }
}
