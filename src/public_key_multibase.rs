use crate::{Error, KeyRepresentationT, Result};

/// Multicodec header for an Ed25519 public key (varint of 0xed).
const ED25519_PUB_MULTICODEC_HEADER: [u8; 2] = [0xed, 0x01];

/// Multibase text of a multicodec-prefixed Ed25519 public key, as it appears in the
/// "publicKeyMultibase" field of an Ed25519VerificationKey2020, e.g. "z6Mk...".  Only the
/// base58btc ('z') base is accepted.
#[derive(Clone, Debug, derive_more::Display, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKeyMultibase(String);

impl PublicKeyMultibase {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl KeyRepresentationT for PublicKeyMultibase {
    fn decode(&self) -> Result<[u8; 32]> {
        let (base, byte_v) = multibase::decode(self.0.as_str()).map_err(|e| {
            Error::Malformed(format!("publicKeyMultibase is not multibase: {}", e).into())
        })?;
        if base != multibase::Base::Base58Btc {
            return Err(Error::Malformed(
                "publicKeyMultibase must use the base58btc ('z') base".into(),
            ));
        }
        let raw_public_key = byte_v
            .strip_prefix(ED25519_PUB_MULTICODEC_HEADER.as_slice())
            .ok_or_else(|| {
                Error::Malformed("publicKeyMultibase does not carry the Ed25519 multicodec header".into())
            })?;
        <[u8; 32]>::try_from(raw_public_key).map_err(|_| {
            Error::Malformed(
                format!(
                    "publicKeyMultibase must carry a 32 byte key, but carried {} bytes",
                    raw_public_key.len()
                )
                .into(),
            )
        })
    }
    fn encode(raw_public_key: &[u8; 32]) -> Self {
        let mut byte_v = Vec::with_capacity(ED25519_PUB_MULTICODEC_HEADER.len() + raw_public_key.len());
        byte_v.extend_from_slice(&ED25519_PUB_MULTICODEC_HEADER);
        byte_v.extend_from_slice(raw_public_key);
        Self(multibase::encode(multibase::Base::Base58Btc, byte_v))
    }
}

impl TryFrom<String> for PublicKeyMultibase {
    type Error = Error;
    fn try_from(value: String) -> Result<Self> {
        let public_key_multibase = Self(value);
        public_key_multibase.decode()?;
        Ok(public_key_multibase)
    }
}

impl TryFrom<&str> for PublicKeyMultibase {
    type Error = Error;
    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(value.to_string())
    }
}

impl From<PublicKeyMultibase> for String {
    fn from(public_key_multibase: PublicKeyMultibase) -> Self {
        public_key_multibase.0
    }
}
