use crate::{ContextSet, Error, Result};

/// A verification-method record as delivered by a document loader, before classification.  Key
/// material is kept as raw text here; it is only decoded once the record has classified as one of
/// the Ed25519 kinds, so records for other key types are never rejected for their key encoding.
/// Fields this suite doesn't use (e.g. a private key accidentally left in place) are ignored.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct VerificationMethod {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context_o: Option<serde_json::Value>,
    pub id: String,
    pub r#type: String,
    pub controller: String,
    #[serde(rename = "publicKeyBase58", default, skip_serializing_if = "Option::is_none")]
    pub public_key_base58_o: Option<String>,
    #[serde(rename = "publicKeyMultibase", default, skip_serializing_if = "Option::is_none")]
    pub public_key_multibase_o: Option<String>,
    /// Normally the timestamp of revocation.  Any non-null value marks the key as revoked.
    #[serde(rename = "revoked", default, skip_serializing_if = "Option::is_none")]
    pub revoked_o: Option<serde_json::Value>,
}

impl VerificationMethod {
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        serde_json::from_value(value.clone()).map_err(|e| {
            Error::Malformed(format!("malformed verification method: {}", e).into())
        })
    }
    /// The record's own context set.  Empty if it carries no "@context".
    pub fn context_set(&self) -> ContextSet {
        self.context_o
            .as_ref()
            .map(ContextSet::from_context_value)
            .unwrap_or_default()
    }
}
