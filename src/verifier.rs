use crate::{CanonicalKey, Result};

/// Checks raw signature bytes over a signing input.  Returns Ok(false) for a signature that simply
/// doesn't verify; errors are reserved for being unable to attempt verification.
#[async_trait::async_trait]
pub trait VerifierT: Send + Sync {
    async fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        canonical_key: &CanonicalKey,
    ) -> Result<bool>;
}

/// Verifies against whatever public key the proof's verification method resolved to.
#[derive(Clone, Copy, Debug, Default)]
pub struct Ed25519Verifier;

#[async_trait::async_trait]
impl VerifierT for Ed25519Verifier {
    async fn verify(
        &self,
        data: &[u8],
        signature: &[u8],
        canonical_key: &CanonicalKey,
    ) -> Result<bool> {
        let verifying_key = canonical_key.verifying_key()?;
        verify_ed25519(&verifying_key, data, signature)
    }
}

pub(crate) fn verify_ed25519(
    verifying_key: &ed25519_dalek::VerifyingKey,
    data: &[u8],
    signature: &[u8],
) -> Result<bool> {
    let signature = match ed25519_dalek::Signature::from_slice(signature) {
        Ok(signature) => signature,
        Err(e) => {
            tracing::debug!("signature is not a well-formed Ed25519 signature: {}", e);
            return Ok(false);
        }
    };
    Ok(verifying_key.verify_strict(data, &signature).is_ok())
}
