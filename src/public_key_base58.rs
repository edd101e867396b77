use crate::{Error, KeyRepresentationT, Result};

/// Base58btc text of a raw Ed25519 public key, with no multibase prefix, as it appears in the
/// "publicKeyBase58" field of an Ed25519VerificationKey2018.
#[derive(Clone, Debug, derive_more::Display, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct PublicKeyBase58(String);

impl PublicKeyBase58 {
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl KeyRepresentationT for PublicKeyBase58 {
    fn decode(&self) -> Result<[u8; 32]> {
        let byte_v = multibase::Base::Base58Btc
            .decode(self.0.as_str())
            .map_err(|e| Error::Malformed(format!("publicKeyBase58 is not base58btc: {}", e).into()))?;
        <[u8; 32]>::try_from(byte_v.as_slice()).map_err(|_| {
            Error::Malformed(
                format!(
                    "publicKeyBase58 must decode to 32 bytes, but decoded to {} bytes",
                    byte_v.len()
                )
                .into(),
            )
        })
    }
    fn encode(raw_public_key: &[u8; 32]) -> Self {
        Self(multibase::Base::Base58Btc.encode(raw_public_key))
    }
}

impl TryFrom<String> for PublicKeyBase58 {
    type Error = Error;
    fn try_from(value: String) -> Result<Self> {
        let public_key_base58 = Self(value);
        public_key_base58.decode()?;
        Ok(public_key_base58)
    }
}

impl TryFrom<&str> for PublicKeyBase58 {
    type Error = Error;
    fn try_from(value: &str) -> Result<Self> {
        Self::try_from(value.to_string())
    }
}

impl From<PublicKeyBase58> for String {
    fn from(public_key_base58: PublicKeyBase58) -> Self {
        public_key_base58.0
    }
}
