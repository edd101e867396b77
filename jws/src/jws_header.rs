use crate::JWSPayloadEncoding;

/// See RFC 7515, https://datatracker.ietf.org/doc/html/rfc7515 and RFC 7797 for the "b64" parameter.
/// Field order matters: it determines the serialized header, and therefore the signing input.
#[derive(Clone, Debug, Eq, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct JWSHeader {
    /// Signature algorithm used to sign the JWS.
    pub alg: String,
    /// Optionally specifies the public key, e.g. as a DID URL.  Linked-data proofs carry the key id
    /// in the proof's "verificationMethod" field instead, so they leave this out.
    #[serde(rename = "kid", skip_serializing_if = "Option::is_none")]
    pub kid_o: Option<String>,
    /// If present, then specifies if the payload is base64url-encoded or not.  This is used in combination
    /// with the "b64" element of the "crit" field.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b64: Option<bool>,
    /// Specifies critical headers that must be understood and processed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crit: Option<Vec<String>>,
}

impl JWSHeader {
    pub fn new(alg: String, kid_o: Option<String>, payload_encoding: JWSPayloadEncoding) -> Self {
        let (b64, crit) = match payload_encoding {
            JWSPayloadEncoding::Base64 => (None, None),
            JWSPayloadEncoding::None => (Some(false), Some(vec![String::from("b64")])),
        };
        Self {
            alg,
            kid_o,
            b64,
            crit,
        }
    }
    /// The header used by JWS-based linked-data signatures: `{"alg":<alg>,"b64":false,"crit":["b64"]}`.
    pub fn unencoded(alg: String) -> Self {
        Self::new(alg, None, JWSPayloadEncoding::None)
    }
    /// Indicates if the payload should be base64url-encoded in producing the signing input.
    pub fn payload_encoding(&self) -> JWSPayloadEncoding {
        // None, which is the default, is interpreted as true.
        if self.b64 == Some(false) {
            JWSPayloadEncoding::None
        } else {
            JWSPayloadEncoding::Base64
        }
    }
    /// True iff this header uses exactly the unencoded-payload convention, i.e. "b64" is false and
    /// "crit" lists "b64" and nothing else.
    pub fn is_unencoded_payload(&self) -> bool {
        self.b64 == Some(false)
            && self
                .crit
                .as_deref()
                .map_or(false, |crit| crit.len() == 1 && crit[0] == "b64")
    }
}
