use crate::{Error, Result};

/// Members holding the signature itself, which are never part of what a proof signs.
const SIGNATURE_MEMBER_V: [&str; 3] = ["jws", "signatureValue", "proofValue"];

/// A linked-data proof node, e.g.
///
/// ```json
/// {
///   "type": "Ed25519Signature2018",
///   "created": "2010-01-01T19:23:24Z",
///   "verificationMethod": "https://example.edu/issuers/565049#key-1",
///   "proofPurpose": "assertionMethod",
///   "jws": "eyJhbGciOiJFZERTQSIsImI2NCI6ZmFsc2UsImNyaXQiOlsiYjY0Il19..<signature>"
/// }
/// ```
///
/// Kept as an open JSON object since proofs may carry arbitrary extra members (e.g. "challenge").
#[derive(
    Clone,
    Debug,
    Default,
    derive_more::Deref,
    Eq,
    derive_more::From,
    derive_more::Into,
    PartialEq,
    serde::Deserialize,
    serde::Serialize,
)]
#[serde(transparent)]
pub struct Proof(serde_json::Map<String, serde_json::Value>);

impl Proof {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        match value {
            serde_json::Value::Object(proof_m) => Ok(Self(proof_m)),
            _ => Err(Error::Malformed("proof must be a JSON object".into())),
        }
    }
    pub fn into_value(self) -> serde_json::Value {
        serde_json::Value::Object(self.0)
    }
    fn str_member_o(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(serde_json::Value::as_str)
    }
    pub fn proof_type_o(&self) -> Option<&str> {
        self.str_member_o("type")
    }
    pub fn created_o(&self) -> Option<&str> {
        self.str_member_o("created")
    }
    pub fn verification_method_o(&self) -> Option<&str> {
        self.str_member_o("verificationMethod")
    }
    pub fn proof_purpose_o(&self) -> Option<&str> {
        self.str_member_o("proofPurpose")
    }
    /// The compact detached JWS.  None if absent or not a string.
    pub fn jws_o(&self) -> Option<&str> {
        self.str_member_o("jws")
    }
    pub fn set(&mut self, name: impl Into<String>, value: impl Into<serde_json::Value>) {
        self.0.insert(name.into(), value.into());
    }
    pub fn remove(&mut self, name: &str) -> Option<serde_json::Value> {
        self.0.remove(name)
    }
    /// A copy of this proof with its signature members removed.
    pub fn without_signature(&self) -> Self {
        let mut proof = self.clone();
        for member in SIGNATURE_MEMBER_V {
            proof.0.remove(member);
        }
        proof
    }
}
