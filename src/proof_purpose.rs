use crate::{CanonicalKey, DocumentLoaderT, Error, Proof, Result};

/// The reason a proof was made, i.e. the verification relationship its key must hold with the
/// key's controller.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Ord, PartialOrd, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ProofPurpose {
    Authentication,
    AssertionMethod,
    CapabilityInvocation,
    CapabilityDelegation,
}

impl ProofPurpose {
    /// An ordered array of all the variants in ProofPurpose.
    pub const VARIANTS: [ProofPurpose; 4] = [
        ProofPurpose::Authentication,
        ProofPurpose::AssertionMethod,
        ProofPurpose::CapabilityInvocation,
        ProofPurpose::CapabilityDelegation,
    ];
    /// The camelCase string for this variant, as used in "proofPurpose" and as the name of the
    /// verification relationship in controller documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProofPurpose::Authentication => "authentication",
            ProofPurpose::AssertionMethod => "assertionMethod",
            ProofPurpose::CapabilityInvocation => "capabilityInvocation",
            ProofPurpose::CapabilityDelegation => "capabilityDelegation",
        }
    }
    /// Stamps this purpose onto a proof being created.
    pub fn update(&self, proof: &mut Proof) {
        proof.set("proofPurpose", self.as_str());
    }
    pub fn matches(&self, proof: &Proof) -> bool {
        proof.proof_purpose_o() == Some(self.as_str())
    }
    /// Checks that the controller of the verification method lists it under this purpose's
    /// verification relationship, either by id or as an embedded node.
    pub async fn validate(
        &self,
        canonical_key: &CanonicalKey,
        document_loader: &dyn DocumentLoaderT,
    ) -> Result<()> {
        let controller_document = document_loader
            .load(&canonical_key.controller)
            .await?
            .into_json()?;
        let authorized = controller_document
            .get(self.as_str())
            .and_then(serde_json::Value::as_array)
            .map(|entry_v| {
                entry_v.iter().any(|entry| {
                    let entry_id_o = match entry {
                        serde_json::Value::String(id) => Some(id.as_str()),
                        serde_json::Value::Object(node_m) => {
                            node_m.get("id").and_then(serde_json::Value::as_str)
                        }
                        _ => None,
                    };
                    entry_id_o == Some(canonical_key.id.as_str())
                })
            })
            .unwrap_or(false);
        if !authorized {
            return Err(Error::InvalidProofPurpose(
                format!(
                    "verification method {:?} is not authorized by controller {:?} for proof purpose {:?}",
                    canonical_key.id, canonical_key.controller, self.as_str()
                )
                .into(),
            ));
        }
        Ok(())
    }
}

impl std::fmt::Display for ProofPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ProofPurpose {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "authentication" => Ok(ProofPurpose::Authentication),
            "assertionMethod" => Ok(ProofPurpose::AssertionMethod),
            "capabilityInvocation" => Ok(ProofPurpose::CapabilityInvocation),
            "capabilityDelegation" => Ok(ProofPurpose::CapabilityDelegation),
            _ => Err(Error::InvalidProofPurpose(
                format!("unrecognized proof purpose {:?}", s).into(),
            )),
        }
    }
}
