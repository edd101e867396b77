use crate::Result;
use ld_jws::JOSEAlgorithmT;

/// Produces raw signature bytes over a signing input.  Implementations may hold a key in memory or
/// delegate to a KMS or HSM, hence async.
#[async_trait::async_trait]
pub trait SignerT: JOSEAlgorithmT + Send + Sync {
    /// Id of the verification method that checks this signer's signatures, if the signer knows it.
    fn key_id_o(&self) -> Option<&str>;
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;
}

/// In-memory Ed25519 signer.
#[derive(Clone)]
pub struct Ed25519Signer {
    key_id_o: Option<String>,
    signing_key: ed25519_dalek::SigningKey,
}

impl Ed25519Signer {
    pub fn new(key_id_o: Option<String>, signing_key: ed25519_dalek::SigningKey) -> Self {
        Self {
            key_id_o,
            signing_key,
        }
    }
    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }
}

impl std::fmt::Debug for Ed25519Signer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signer")
            .field("key_id_o", &self.key_id_o)
            .field("verifying_key", &self.signing_key.verifying_key())
            .finish_non_exhaustive()
    }
}

impl JOSEAlgorithmT for Ed25519Signer {
    fn alg(&self) -> String {
        self.signing_key.alg()
    }
    fn crv_o(&self) -> Option<String> {
        self.signing_key.crv_o()
    }
}

#[async_trait::async_trait]
impl SignerT for Ed25519Signer {
    fn key_id_o(&self) -> Option<&str> {
        self.key_id_o.as_deref()
    }
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        use ed25519_dalek::Signer;
        Ok(self.signing_key.sign(data).to_bytes().to_vec())
    }
}
