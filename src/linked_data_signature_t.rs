use crate::{
    ContextSet, DocumentLoaderT, Error, Proof, ProofOptions, ProofPurpose, Result, VerifyOutcome,
};

/// Relations of a controller document under which a verification method may be embedded.
const VERIFICATION_RELATIONSHIP_V: [&str; 6] = [
    "verificationMethod",
    "publicKey",
    "assertionMethod",
    "authentication",
    "capabilityInvocation",
    "capabilityDelegation",
];

/// A linked-data signature suite.  The provided methods implement the generic behavior; a suite
/// overrides the ones its rules differ on, and may call the free `*_default` functions to defer to
/// the generic behavior.
#[async_trait::async_trait]
pub trait LinkedDataSignatureT: Send + Sync {
    /// The "type" of the proofs this suite produces, e.g. "Ed25519Signature2018".
    fn proof_type(&self) -> &str;
    /// The suite-specific context URL.
    fn context_url(&self) -> &str;
    fn ensure_suite_context(
        &self,
        document: &mut serde_json::Value,
        add_suite_context: bool,
    ) -> Result<()> {
        ensure_suite_context_default(self.context_url(), document, add_suite_context)
    }
    /// Ok(()) if this suite claims the proof for the given purpose, otherwise the reason it doesn't.
    fn match_proof(
        &self,
        proof: &Proof,
        _document: &serde_json::Value,
        proof_purpose: ProofPurpose,
    ) -> Result<()> {
        match_proof_default(self.proof_type(), proof, proof_purpose)
    }
    fn matches(
        &self,
        proof: &Proof,
        document: &serde_json::Value,
        proof_purpose: ProofPurpose,
    ) -> bool {
        self.match_proof(proof, document, proof_purpose).is_ok()
    }
    /// Retrieves the raw verification-method record the proof names.
    async fn get_verification_method(
        &self,
        proof: &Proof,
        document_loader: &dyn DocumentLoaderT,
    ) -> Result<serde_json::Value> {
        get_verification_method_default(proof, document_loader).await
    }
    /// Returns a copy of the document with a new proof attached.
    async fn sign(
        &self,
        document: &serde_json::Value,
        proof_options: &ProofOptions,
        document_loader: &dyn DocumentLoaderT,
    ) -> Result<serde_json::Value>;
    async fn verify(
        &self,
        document: &serde_json::Value,
        proof: &Proof,
        proof_purpose: ProofPurpose,
        document_loader: &dyn DocumentLoaderT,
    ) -> Result<VerifyOutcome>;
}

/// No-op if the document already declares the context.  Otherwise appends it (when adding is
/// allowed), turning a single-identifier "@context" into a sequence, or fails with MissingContext.
pub fn ensure_suite_context_default(
    context_url: &str,
    document: &mut serde_json::Value,
    add_suite_context: bool,
) -> Result<()> {
    if ContextSet::of_document(document).contains(context_url) {
        return Ok(());
    }
    if !add_suite_context {
        return Err(Error::MissingContext(
            format!("the document does not declare the {:?} context", context_url).into(),
        ));
    }
    let document_m = document
        .as_object_mut()
        .ok_or_else(|| Error::Malformed("document must be a JSON object".into()))?;
    let suite_context = serde_json::Value::String(context_url.to_string());
    let context = match document_m.remove("@context") {
        None | Some(serde_json::Value::Null) => serde_json::Value::Array(vec![suite_context]),
        Some(serde_json::Value::Array(mut entry_v)) => {
            entry_v.push(suite_context);
            serde_json::Value::Array(entry_v)
        }
        Some(context) => serde_json::Value::Array(vec![context, suite_context]),
    };
    document_m.insert("@context".to_string(), context);
    Ok(())
}

pub fn match_proof_default(
    proof_type: &str,
    proof: &Proof,
    proof_purpose: ProofPurpose,
) -> Result<()> {
    if proof.proof_type_o() != Some(proof_type) {
        return Err(Error::ProofMismatch(
            format!(
                "proof type {:?} is not {:?}",
                proof.proof_type_o().unwrap_or_default(),
                proof_type
            )
            .into(),
        ));
    }
    if !proof_purpose.matches(proof) {
        return Err(Error::ProofMismatch(
            format!(
                "proof purpose {:?} is not {:?}",
                proof.proof_purpose_o().unwrap_or_default(),
                proof_purpose.as_str()
            )
            .into(),
        ));
    }
    Ok(())
}

/// Loads the document at the proof's "verificationMethod" URL and picks out the verification
/// method with that id, which may be the document itself or a node embedded in one of its
/// verification relationships.  An embedded node inherits the enclosing document's "@context".
pub async fn get_verification_method_default(
    proof: &Proof,
    document_loader: &dyn DocumentLoaderT,
) -> Result<serde_json::Value> {
    let verification_method_id = proof.verification_method_o().ok_or_else(|| {
        Error::VerificationMethodNotFound("proof has no \"verificationMethod\"".into())
    })?;
    let document = document_loader
        .load(verification_method_id)
        .await
        .map_err(|e| match e {
            Error::DocumentNotFound(url) => Error::VerificationMethodNotFound(url),
            e => e,
        })?
        .into_json()?;
    locate_verification_method(document, verification_method_id).ok_or_else(|| {
        Error::VerificationMethodNotFound(
            format!(
                "the document at {:?} does not contain that verification method",
                verification_method_id
            )
            .into(),
        )
    })
}

fn locate_verification_method(
    document: serde_json::Value,
    verification_method_id: &str,
) -> Option<serde_json::Value> {
    if document.get("id").and_then(serde_json::Value::as_str) == Some(verification_method_id) {
        return Some(document);
    }
    let context_o = document.get("@context").cloned();
    let mut node = VERIFICATION_RELATIONSHIP_V
        .iter()
        .filter_map(|relationship| document.get(*relationship)?.as_array())
        .flatten()
        .find(|entry| {
            entry.get("id").and_then(serde_json::Value::as_str) == Some(verification_method_id)
        })?
        .clone();
    if let (Some(context), Some(node_m)) = (context_o, node.as_object_mut()) {
        node_m.entry("@context").or_insert(context);
    }
    Some(node)
}
