use crate::{Error, KeyRepresentationT, PublicKeyBase58, Result};

/// A verification method in the form this suite verifies with: an Ed25519VerificationKey2018 whose
/// public key is carried as publicKeyBase58.
#[derive(Clone, Debug, serde::Deserialize, Eq, PartialEq, serde::Serialize)]
pub struct CanonicalKey {
    #[serde(rename = "@context", default, skip_serializing_if = "Option::is_none")]
    pub context_o: Option<serde_json::Value>,
    pub id: String,
    /// Always "Ed25519VerificationKey2018".
    pub r#type: String,
    pub controller: String,
    #[serde(rename = "publicKeyBase58")]
    pub public_key_base58: PublicKeyBase58,
    #[serde(rename = "revoked", default, skip_serializing_if = "Option::is_none")]
    pub revoked_o: Option<serde_json::Value>,
}

impl CanonicalKey {
    /// Revocation is checked on the normalized key, so a revoked key never reaches a verifier.
    pub fn ensure_not_revoked(&self) -> Result<()> {
        match self.revoked_o.as_ref() {
            Some(serde_json::Value::String(revoked)) => Err(Error::RevokedKey(
                format!("{:?} was revoked at {}", self.id, revoked).into(),
            )),
            Some(revoked) => Err(Error::RevokedKey(
                format!("{:?} is marked revoked ({})", self.id, revoked).into(),
            )),
            None => Ok(()),
        }
    }
    pub fn verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.public_key_base58.decode()?).map_err(|e| {
            Error::Malformed(
                format!("publicKeyBase58 of {:?} is not an Ed25519 point: {}", self.id, e).into(),
            )
        })
    }
}
