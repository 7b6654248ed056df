//! Opaque identifiers assigned by the remote system.
//!
//! The backend is free to hand out numeric or string ids. Both decode into
//! the same non-empty string newtype and always encode back as a string.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ValidationError;

#[derive(Deserialize)]
#[serde(untagged)]
enum WireId {
    Text(String),
    Unsigned(u64),
    Signed(i64),
}

impl WireId {
    fn into_string(self) -> String {
        match self {
            WireId::Text(s) => s,
            WireId::Unsigned(n) => n.to_string(),
            WireId::Signed(n) => n.to_string(),
        }
    }
}

macro_rules! opaque_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub struct $name(String);

        impl $name {
            /// Build an id from user or wire input. Surrounding whitespace is
            /// dropped; an empty result is rejected.
            pub fn parse(raw: impl AsRef<str>) -> Result<Self, ValidationError> {
                let trimmed = raw.as_ref().trim();
                if trimmed.is_empty() {
                    return Err(ValidationError::EmptyId);
                }
                Ok(Self(trimmed.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Self::parse(s)
            }
        }

        impl From<u64> for $name {
            fn from(n: u64) -> Self {
                Self(n.to_string())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&self.0)
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let raw = WireId::deserialize(deserializer)?.into_string();
                Self::parse(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

opaque_id!(
    /// Identity of a snippet. Two snippets with the same id are the same
    /// resource, possibly at different revisions.
    SnippetId
);

opaque_id!(
    /// Identity of a tag.
    TagId
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_numeric_and_string_ids_alike() {
        let from_number: SnippetId = serde_json::from_str("42").unwrap();
        let from_text: SnippetId = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(from_number, from_text);
        assert_eq!(serde_json::to_string(&from_number).unwrap(), "\"42\"");
    }

    #[test]
    fn rejects_blank_ids() {
        assert_eq!(SnippetId::parse("   "), Err(ValidationError::EmptyId));
        assert!(serde_json::from_str::<TagId>("\"\"").is_err());
    }

    #[test]
    fn parse_trims_whitespace() {
        let id: SnippetId = " abc ".parse().unwrap();
        assert_eq!(id.as_str(), "abc");
    }
}
