use crate::{
    verifier::verify_ed25519, CanonicalKey, Ed25519Signer, Error, KeyRepresentationT,
    PublicKeyBase58, PublicKeyMultibase, Result, VerifierT, ED25519_SIGNATURE_2018_CONTEXT_URL,
};

/// An Ed25519VerificationKey2018 key pair (or public key alone), for configuring a suite to sign
/// or verify with a specific key.  The private key is either the 32-byte seed or the 64-byte
/// seed-and-public-key concatenation, base58btc encoded.
#[derive(Clone, serde::Deserialize, serde::Serialize)]
pub struct Ed25519VerificationKey2018 {
    pub id: String,
    pub controller: String,
    #[serde(rename = "publicKeyBase58")]
    pub public_key_base58: PublicKeyBase58,
    #[serde(rename = "privateKeyBase58", default, skip_serializing_if = "Option::is_none")]
    private_key_base58_o: Option<String>,
}

impl Ed25519VerificationKey2018 {
    /// Uses the multibase fingerprint of the public key as the fragment of the key id, e.g.
    /// "<controller>#z6Mk...".
    pub fn from_signing_key(controller: String, signing_key: &ed25519_dalek::SigningKey) -> Self {
        let raw_public_key = signing_key.verifying_key().to_bytes();
        let fingerprint = PublicKeyMultibase::encode(&raw_public_key);
        Self {
            id: format!("{}#{}", controller, fingerprint),
            controller,
            public_key_base58: PublicKeyBase58::encode(&raw_public_key),
            private_key_base58_o: Some(
                multibase::Base::Base58Btc.encode(signing_key.to_keypair_bytes()),
            ),
        }
    }
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        let key: Self = serde_json::from_value(value.clone()).map_err(|e| {
            Error::Malformed(format!("malformed Ed25519VerificationKey2018: {}", e).into())
        })?;
        if let Some(signing_key) = key.signing_key_o()? {
            if signing_key.verifying_key().to_bytes() != key.public_key_base58.decode()? {
                return Err(Error::Malformed(
                    format!(
                        "privateKeyBase58 of {:?} does not correspond to its publicKeyBase58",
                        key.id
                    )
                    .into(),
                ));
            }
        }
        Ok(key)
    }
    pub fn has_private_key(&self) -> bool {
        self.private_key_base58_o.is_some()
    }
    /// The multibase form of the public key, as used in key ids.
    pub fn fingerprint(&self) -> Result<PublicKeyMultibase> {
        self.public_key_base58.transcode()
    }
    pub fn signing_key_o(&self) -> Result<Option<ed25519_dalek::SigningKey>> {
        let private_key_base58 = match self.private_key_base58_o.as_deref() {
            Some(private_key_base58) => private_key_base58,
            None => return Ok(None),
        };
        let byte_v = multibase::Base::Base58Btc
            .decode(private_key_base58)
            .map_err(|e| {
                Error::Malformed(format!("privateKeyBase58 is not base58btc: {}", e).into())
            })?;
        let signing_key = if let Ok(keypair_bytes) = <&[u8; 64]>::try_from(byte_v.as_slice()) {
            ed25519_dalek::SigningKey::from_keypair_bytes(keypair_bytes).map_err(|e| {
                Error::Malformed(format!("privateKeyBase58 is not an Ed25519 key pair: {}", e).into())
            })?
        } else if let Ok(seed) = <&[u8; 32]>::try_from(byte_v.as_slice()) {
            ed25519_dalek::SigningKey::from_bytes(seed)
        } else {
            return Err(Error::Malformed(
                format!(
                    "privateKeyBase58 must decode to 32 or 64 bytes, but decoded to {} bytes",
                    byte_v.len()
                )
                .into(),
            ));
        };
        Ok(Some(signing_key))
    }
    /// A signer for this key, or None if it's a public key only.
    pub fn signer_o(&self) -> Result<Option<Ed25519Signer>> {
        Ok(self
            .signing_key_o()?
            .map(|signing_key| Ed25519Signer::new(Some(self.id.clone()), signing_key)))
    }
    pub fn verifying_key(&self) -> Result<ed25519_dalek::VerifyingKey> {
        ed25519_dalek::VerifyingKey::from_bytes(&self.public_key_base58.decode()?).map_err(|e| {
            Error::Malformed(
                format!("publicKeyBase58 of {:?} is not an Ed25519 point: {}", self.id, e).into(),
            )
        })
    }
    /// The public half as a verification-method record, suitable for serving from a document
    /// loader.
    pub fn export_public(&self) -> CanonicalKey {
        CanonicalKey {
            context_o: Some(serde_json::Value::String(
                ED25519_SIGNATURE_2018_CONTEXT_URL.to_string(),
            )),
            id: self.id.clone(),
            r#type: crate::classified_key::ED25519_VERIFICATION_KEY_2018.to_string(),
            controller: self.controller.clone(),
            public_key_base58: self.public_key_base58.clone(),
            revoked_o: None,
        }
    }
}

impl std::fmt::Debug for Ed25519VerificationKey2018 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519VerificationKey2018")
            .field("id", &self.id)
            .field("controller", &self.controller)
            .field("public_key_base58", &self.public_key_base58)
            .field("has_private_key", &self.has_private_key())
            .finish()
    }
}

/// Verifies only against this key; a proof whose verification method resolved to a different
/// public key does not verify.
#[async_trait::async_trait]
impl VerifierT for Ed25519VerificationKey2018 {
    async fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        canonical_key: &CanonicalKey,
    ) -> Result<bool> {
        if canonical_key.public_key_base58 != self.public_key_base58 {
            tracing::debug!(
                "verification method {:?} resolved to a different public key than the configured key {:?}",
                canonical_key.id,
                self.id
            );
            return Ok(false);
        }
        verify_ed25519(&self.verifying_key()?, data, signature)
    }
}
