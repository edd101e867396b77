use crate::{CanonicalizerT, DocumentLoaderT, Error, Proof, Result};
use sha2::Digest;

/// The bytes a proof's JWS signs (after the JWS header): SHA-256 of the canonicalized proof
/// options followed by SHA-256 of the canonicalized document.  The proof options are the proof
/// minus its signature, evaluated under the document's "@context"; the document is taken without
/// its "proof" member.
pub async fn create_verify_data(
    canonicalizer: &dyn CanonicalizerT,
    use_native_canonize: bool,
    document: &serde_json::Value,
    proof: &Proof,
    document_loader: &dyn DocumentLoaderT,
) -> Result<Vec<u8>> {
    let document_m = document
        .as_object()
        .ok_or_else(|| Error::Malformed("document must be a JSON object".into()))?;

    let mut proof_options = proof.without_signature();
    match document_m.get("@context") {
        Some(context) => proof_options.set("@context", context.clone()),
        None => {
            proof_options.remove("@context");
        }
    }
    let c14n_proof_options = canonicalizer
        .canonicalize(
            &proof_options.into_value(),
            use_native_canonize,
            document_loader,
        )
        .await?;

    let mut document_without_proof_m = document_m.clone();
    document_without_proof_m.remove("proof");
    let c14n_document = canonicalizer
        .canonicalize(
            &serde_json::Value::Object(document_without_proof_m),
            use_native_canonize,
            document_loader,
        )
        .await?;

    let mut verify_data = Vec::with_capacity(64);
    verify_data.extend_from_slice(sha2::Sha256::digest(&c14n_proof_options).as_slice());
    verify_data.extend_from_slice(sha2::Sha256::digest(&c14n_document).as_slice());
    Ok(verify_data)
}
