use std::borrow::Cow;

/// Message carried by Error::InvalidProofFormat when the proof's "jws" is absent or not a string.
pub(crate) const INVALID_SIGNATURE_PROPERTY: &str =
    "the proof does not include a valid signature property.";

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Missing context: {0}")]
    MissingContext(Cow<'static, str>),
    #[error("Incompatible contexts: {0}")]
    IncompatibleContext(Cow<'static, str>),
    #[error("Invalid key type: {0}")]
    InvalidKeyType(Cow<'static, str>),
    #[error("The verification method has been revoked: {0}")]
    RevokedKey(Cow<'static, str>),
    #[error("Verification method not found: {0}")]
    VerificationMethodNotFound(Cow<'static, str>),
    #[error("{0}")]
    InvalidProofFormat(Cow<'static, str>),
    #[error("Signature mismatch: {0}")]
    SignatureMismatch(Cow<'static, str>),
    #[error("A signer API has not been specified.")]
    NoSignerConfigured,
    #[error("A verifier API has not been specified.")]
    NoVerifierConfigured,
    #[error("Proof does not match this suite: {0}")]
    ProofMismatch(Cow<'static, str>),
    #[error("Invalid proof purpose: {0}")]
    InvalidProofPurpose(Cow<'static, str>),
    #[error("Did not verify any proofs; insufficient proofs matched the acceptable suite(s) and required purpose(s).")]
    NoMatchingProof,
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(Cow<'static, str>),
    #[error("Document not found: {0}")]
    DocumentNotFound(Cow<'static, str>),
    #[error("Canonicalization error: {0}")]
    Canonicalization(Cow<'static, str>),
    #[error("Malformed: {0}")]
    Malformed(Cow<'static, str>),
    #[error(transparent)]
    JWSError(#[from] ld_jws::Error),
}

impl Error {
    /// The error for a proof whose "jws" value is missing, empty, or not a string.
    pub fn invalid_signature_property() -> Self {
        Self::InvalidProofFormat(INVALID_SIGNATURE_PROPERTY.into())
    }
}
