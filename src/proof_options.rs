use crate::ProofPurpose;

/// Per-call inputs for producing a proof: its purpose plus any extra members to place on the proof.
#[derive(Clone, Debug)]
pub struct ProofOptions {
    pub proof_purpose: ProofPurpose,
    pub extra_member_m: serde_json::Map<String, serde_json::Value>,
}

impl ProofOptions {
    pub fn new(proof_purpose: ProofPurpose) -> Self {
        Self {
            proof_purpose,
            extra_member_m: serde_json::Map::new(),
        }
    }
    pub fn with_member(
        mut self,
        name: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.extra_member_m.insert(name.into(), value.into());
        self
    }
    /// Challenge for authentication proofs, to prevent replay.
    pub fn with_challenge(self, challenge: impl Into<String>) -> Self {
        self.with_member("challenge", challenge.into())
    }
    pub fn with_domain(self, domain: impl Into<String>) -> Self {
        self.with_member("domain", domain.into())
    }
}
