use crate::{
    CanonicalKey, DocumentLoaderT, Error, LinkedDataSignatureT, Proof, ProofPurpose, VerifyOutcome,
};

/// Verification result for one proof that some suite claimed.
#[derive(Debug)]
pub struct ProofResult {
    pub proof: Proof,
    pub verified: bool,
    /// The key the proof verified against, if it verified.
    pub verification_method_o: Option<CanonicalKey>,
    pub error_o: Option<Error>,
}

/// Verification result for all the proofs on a document.
#[derive(Debug)]
pub struct ProofSetResult {
    /// True iff at least one proof verified.
    pub verified: bool,
    pub result_v: Vec<ProofResult>,
    /// Set when no proof was claimed by any suite.
    pub error_o: Option<Error>,
}

/// Dispatches each proof on a document to the first suite that claims it.
pub struct ProofSet;

impl ProofSet {
    /// Unclaimed proofs are skipped.  A claimed proof that verifies must also pass the purpose's
    /// controller check.  If no proof is claimed at all, the result carries Error::NoMatchingProof.
    pub async fn verify(
        document: &serde_json::Value,
        suite_v: &[&dyn LinkedDataSignatureT],
        proof_purpose: ProofPurpose,
        document_loader: &dyn DocumentLoaderT,
    ) -> ProofSetResult {
        let proof_v: Vec<Proof> = match document.get("proof") {
            Some(serde_json::Value::Array(proof_value_v)) => proof_value_v
                .iter()
                .filter_map(|proof_value| Proof::from_value(proof_value.clone()).ok())
                .collect(),
            Some(proof_value) => Proof::from_value(proof_value.clone()).into_iter().collect(),
            None => Vec::new(),
        };
        let mut document_without_proof = document.clone();
        if let Some(document_m) = document_without_proof.as_object_mut() {
            document_m.remove("proof");
        }

        let mut result_v = Vec::new();
        for proof in proof_v {
            let suite = match suite_v
                .iter()
                .find(|suite| suite.matches(&proof, &document_without_proof, proof_purpose))
            {
                Some(suite) => suite,
                None => {
                    tracing::debug!(
                        "no suite claims proof of type {:?} with purpose {:?}",
                        proof.proof_type_o(),
                        proof.proof_purpose_o()
                    );
                    continue;
                }
            };
            let (verified, verification_method_o, error_o) = match suite
                .verify(&document_without_proof, &proof, proof_purpose, document_loader)
                .await
            {
                Ok(VerifyOutcome::NotApplicable(_)) => continue,
                Ok(VerifyOutcome::Verified(canonical_key)) => {
                    match proof_purpose
                        .validate(&canonical_key, document_loader)
                        .await
                    {
                        Ok(()) => (true, Some(canonical_key), None),
                        Err(e) => (false, Some(canonical_key), Some(e)),
                    }
                }
                Ok(VerifyOutcome::NotVerified(e)) | Err(e) => (false, None, Some(e)),
            };
            if let Some(error) = error_o.as_ref() {
                tracing::debug!("proof did not verify: {}", error);
            }
            result_v.push(ProofResult {
                proof,
                verified,
                verification_method_o,
                error_o,
            });
        }

        if result_v.is_empty() {
            return ProofSetResult {
                verified: false,
                result_v,
                error_o: Some(Error::NoMatchingProof),
            };
        }
        ProofSetResult {
            verified: result_v.iter().any(|result| result.verified),
            result_v,
            error_o: None,
        }
    }
}
