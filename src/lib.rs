mod canonical_key;
mod canonicalizer;
mod classified_key;
mod context_resolver;
mod context_set;
mod context_verdict;
mod document_loader;
mod ed25519_signature_2018;
mod ed25519_signature_2018_options;
mod ed25519_verification_key_2018;
mod error;
mod key_representation_t;
mod linked_data_signature_t;
mod proof;
mod proof_options;
mod proof_purpose;
mod proof_set;
mod public_key_base58;
mod public_key_multibase;
mod signer;
mod static_document_loader;
mod verification_method;
mod verifier;
mod verify_data;
mod verify_outcome;

pub use crate::{
    canonical_key::CanonicalKey,
    canonicalizer::{CanonicalizerT, JCSCanonicalizer},
    classified_key::ClassifiedKey,
    context_resolver::{CollisionRule, ContextResolver},
    context_set::ContextSet,
    context_verdict::ContextVerdict,
    document_loader::{DocumentLoaderT, RemoteDocument},
    ed25519_signature_2018::Ed25519Signature2018,
    ed25519_signature_2018_options::Ed25519Signature2018Options,
    ed25519_verification_key_2018::Ed25519VerificationKey2018,
    error::Error,
    key_representation_t::KeyRepresentationT,
    linked_data_signature_t::{
        ensure_suite_context_default, get_verification_method_default, match_proof_default,
        LinkedDataSignatureT,
    },
    proof::Proof,
    proof_options::ProofOptions,
    proof_purpose::ProofPurpose,
    proof_set::{ProofResult, ProofSet, ProofSetResult},
    public_key_base58::PublicKeyBase58,
    public_key_multibase::PublicKeyMultibase,
    signer::{Ed25519Signer, SignerT},
    static_document_loader::StaticDocumentLoader,
    verification_method::VerificationMethod,
    verifier::{Ed25519Verifier, VerifierT},
    verify_data::create_verify_data,
    verify_outcome::VerifyOutcome,
};

pub type Result<T> = std::result::Result<T, Error>;

/// The suite-specific context.
pub const ED25519_SIGNATURE_2018_CONTEXT_URL: &str =
    "https://w3id.org/security/suites/ed25519-2018/v1";
/// The newer-variant suite context, which describes Ed25519VerificationKey2020 keys.
pub const ED25519_SIGNATURE_2020_CONTEXT_URL: &str =
    "https://w3id.org/security/suites/ed25519-2020/v1";
/// The generic verifiable-credentials context, which also defines Ed25519Signature2018.
pub const CREDENTIALS_CONTEXT_V1_URL: &str = "https://www.w3.org/2018/credentials/v1";
/// The generic security vocabulary context, which also defines Ed25519Signature2018.
pub const SECURITY_CONTEXT_V2_URL: &str = "https://w3id.org/security/v2";

lazy_static::lazy_static! {
    /// The parsed JSON-LD context document served at ED25519_SIGNATURE_2018_CONTEXT_URL, for
    /// callers that assemble their own document loaders.
    pub static ref SUITE_CONTEXT: serde_json::Value = serde_json::from_str(include_str!(
        "../contexts/ed25519-signature-2018-v1.jsonld"
    ))
    .expect("programmer error: the bundled context document must be valid JSON");
}

const W3C_DATE_FORMAT: &[time::format_description::FormatItem<'static>] =
    time::macros::format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]Z");

/// Formats a timestamp the way linked-data proofs carry it in "created", i.e. UTC with whole-second
/// precision, e.g. "2010-01-01T19:23:24Z".
pub fn w3c_date(t: time::OffsetDateTime) -> Result<String> {
    t.to_offset(time::UtcOffset::UTC)
        .format(W3C_DATE_FORMAT)
        .map_err(|e| Error::Malformed(format!("could not format timestamp: {}", e).into()))
}
