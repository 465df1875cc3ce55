//! Recipe identifiers: 24-character lowercase hex strings.
//!
//! User-authored recipes name themselves with a friendly id. The catalog only
//! understands canonical identifiers, so every friendly id is mapped onto one.
//! The mapping is pure: the same friendly id yields the same identifier on
//! every run, which is what lets a re-run recognize recipes injected before.

use std::fmt;

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Length of a canonical identifier in hex characters.
pub const RECIPE_ID_LEN: usize = 24;

/// A canonical catalog identifier.
///
/// Always exactly 24 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RecipeId(String);

/// A string that is not a 24-character hex identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("not a 24-character hex identifier: {0:?}")]
pub struct InvalidRecipeId(pub String);

impl RecipeId {
    /// Map a friendly id onto its canonical identifier.
    ///
    /// A friendly id that already is a valid identifier passes through,
    /// lower-cased. Anything else is hashed with SHA-1 and the first 12 bytes
    /// of the digest are rendered as hex.
    pub fn derive(friendly_id: &str) -> Self {
        if let Ok(id) = Self::parse(friendly_id) {
            return id;
        }

        let digest = Sha1::digest(friendly_id.as_bytes());
        Self(hex::encode(&digest[..RECIPE_ID_LEN / 2]))
    }

    /// Parse an existing identifier, accepting either letter case.
    pub fn parse(s: &str) -> Result<Self, InvalidRecipeId> {
        if is_recipe_id(s) {
            Ok(Self(s.to_ascii_lowercase()))
        } else {
            Err(InvalidRecipeId(s.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether `s` is exactly 24 hex digits, in any case.
pub fn is_recipe_id(s: &str) -> bool {
    s.len() == RECIPE_ID_LEN && s.bytes().all(|b| b.is_ascii_hexdigit())
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RecipeId {
    type Error = InvalidRecipeId;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::parse(&s)
    }
}

impl From<RecipeId> for String {
    fn from(id: RecipeId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_friendly_id_with_sha1_prefix() {
        // Only the first 12 bytes of the 20-byte digest are kept.
        let digest = Sha1::digest(b"myCraft");
        let expected = hex::encode(&digest[..12]);

        let id = RecipeId::derive("myCraft");
        assert_eq!(id.as_str(), expected);
        assert_eq!(id.as_str().len(), 24);
    }

    #[test]
    fn known_digest() {
        // sha1("abc") = a9993e364706816aba3e25717850c26c9cd0d89d
        assert_eq!(RecipeId::derive("abc").as_str(), "a9993e364706816aba3e2571");
    }

    #[test]
    fn derivation_is_deterministic() {
        for s in ["myCraft", "", " ", "日本語のレシピ", "moonshine-v2"] {
            let a = RecipeId::derive(s);
            let b = RecipeId::derive(s);
            assert_eq!(a, b);
            assert!(is_recipe_id(a.as_str()));
            assert_eq!(a.as_str(), a.as_str().to_ascii_lowercase());
        }
    }

    #[test]
    fn valid_identifier_passes_through_lowercased() {
        let upper = "5C0E530286F774697F1BA1C2";
        assert_eq!(RecipeId::derive(upper).as_str(), "5c0e530286f774697f1ba1c2");

        let lower = "5c0e530286f774697f1ba1c2";
        assert_eq!(RecipeId::derive(lower).as_str(), lower);
    }

    #[test]
    fn near_identifiers_are_hashed() {
        // 23 chars, 25 chars, and a non-hex character all fall through to hashing.
        for s in [
            "5c0e530286f774697f1ba1c",
            "5c0e530286f774697f1ba1c2a",
            "5c0e530286f774697f1ba1cz",
        ] {
            let id = RecipeId::derive(s);
            assert_ne!(id.as_str(), s.to_ascii_lowercase());
        }
    }

    #[test]
    fn parse_rejects_invalid() {
        let err = RecipeId::parse("not-an-id").unwrap_err();
        assert_eq!(err, InvalidRecipeId("not-an-id".into()));
    }

    #[test]
    fn deserializes_through_parse() {
        let id: RecipeId = serde_json::from_str("\"ABCDEF0123456789ABCDEF01\"").unwrap();
        assert_eq!(id.as_str(), "abcdef0123456789abcdef01");

        assert!(serde_json::from_str::<RecipeId>("\"short\"").is_err());
    }
}
