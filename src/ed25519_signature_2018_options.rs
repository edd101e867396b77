use crate::{CanonicalizerT, Ed25519VerificationKey2018, Proof, SignerT, VerifierT};
use std::sync::Arc;

/// Construction options for Ed25519Signature2018.  The data-only fields can be deserialized from a
/// config file; key material and the signer/verifier/canonicalizer capabilities are attached with
/// the `with_*` methods.
#[derive(Clone, Default, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ed25519Signature2018Options {
    /// Id of the verification method to name in new proofs.  Defaults to the key's id, then the
    /// signer's key id.
    #[serde(rename = "verificationMethod", default, skip_serializing_if = "Option::is_none")]
    pub verification_method_o: Option<String>,
    /// Members every new proof starts out with.  Its "type" is always overwritten.
    #[serde(rename = "proof", default, skip_serializing_if = "Option::is_none")]
    pub proof_template_o: Option<Proof>,
    /// Fixed "created" time for new proofs, otherwise the current time (unless the template has one).
    #[serde(
        rename = "date",
        default,
        with = "time::serde::rfc3339::option",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_o: Option<time::OffsetDateTime>,
    #[serde(default)]
    pub use_native_canonize: bool,
    #[serde(skip)]
    pub key_o: Option<Ed25519VerificationKey2018>,
    #[serde(skip)]
    pub signer_o: Option<Arc<dyn SignerT>>,
    #[serde(skip)]
    pub verifier_o: Option<Arc<dyn VerifierT>>,
    /// Defaults to JCSCanonicalizer.
    #[serde(skip)]
    pub canonicalizer_o: Option<Arc<dyn CanonicalizerT>>,
}

impl Ed25519Signature2018Options {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn with_key(mut self, key: Ed25519VerificationKey2018) -> Self {
        self.key_o = Some(key);
        self
    }
    pub fn with_signer(mut self, signer: Arc<dyn SignerT>) -> Self {
        self.signer_o = Some(signer);
        self
    }
    pub fn with_verifier(mut self, verifier: Arc<dyn VerifierT>) -> Self {
        self.verifier_o = Some(verifier);
        self
    }
    pub fn with_canonicalizer(mut self, canonicalizer: Arc<dyn CanonicalizerT>) -> Self {
        self.canonicalizer_o = Some(canonicalizer);
        self
    }
    pub fn with_verification_method(mut self, verification_method: impl Into<String>) -> Self {
        self.verification_method_o = Some(verification_method.into());
        self
    }
    pub fn with_proof_template(mut self, proof_template: Proof) -> Self {
        self.proof_template_o = Some(proof_template);
        self
    }
    pub fn with_date(mut self, date: time::OffsetDateTime) -> Self {
        self.date_o = Some(date);
        self
    }
    pub fn with_native_canonize(mut self, use_native_canonize: bool) -> Self {
        self.use_native_canonize = use_native_canonize;
        self
    }
}

impl std::fmt::Debug for Ed25519Signature2018Options {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ed25519Signature2018Options")
            .field("verification_method_o", &self.verification_method_o)
            .field("proof_template_o", &self.proof_template_o)
            .field("date_o", &self.date_o)
            .field("use_native_canonize", &self.use_native_canonize)
            .field("key_o", &self.key_o)
            .field("signer_o", &self.signer_o.as_ref().map(|_| "<SignerT>"))
            .field("verifier_o", &self.verifier_o.as_ref().map(|_| "<VerifierT>"))
            .field(
                "canonicalizer_o",
                &self.canonicalizer_o.as_ref().map(|_| "<CanonicalizerT>"),
            )
            .finish()
    }
}
