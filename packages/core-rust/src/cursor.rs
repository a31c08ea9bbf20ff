//! Opaque store-issued position markers.
//!
//! A [`Cursor`] identifies a document's position in one specific sort order.
//! Only the store that issued it can interpret the bytes; everything above
//! the store treats it as an opaque token and hands it back verbatim.
//!
//! # Wire format
//!
//! Cursors serialize to unpadded base64url strings so they can travel in
//! JSON bodies and query strings unchanged.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Opaque position marker issued by a document store.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Cursor(Vec<u8>);

impl Cursor {
    /// Wraps raw store bytes.
    #[must_use]
    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    /// Borrow the raw store bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Encodes the cursor into its wire token.
    #[must_use]
    pub fn to_token(&self) -> String {
        URL_SAFE_NO_PAD.encode(&self.0)
    }

    /// Decodes a wire token. Returns `None` for anything that is not
    /// non-empty base64url.
    #[must_use]
    pub fn from_token(token: &str) -> Option<Self> {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            return None;
        }
        URL_SAFE_NO_PAD.decode(trimmed).ok().map(Self)
    }
}

impl fmt::Debug for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cursor({})", self.to_token())
    }
}

impl Serialize for Cursor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_token())
    }
}

impl<'de> Deserialize<'de> for Cursor {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Cursor::from_token(&token)
            .ok_or_else(|| serde::de::Error::custom("cursor is not a base64url token"))
    }
}
