/// Specifies the JWS header "alg" field for a signature algorithm.
/// See <https://www.rfc-editor.org/rfc/rfc7518#page-6> and <https://www.rfc-editor.org/rfc/rfc8037#page-4>
/// for more information.
pub trait JOSEAlgorithmT {
    /// The JWS "alg" field.  Only "EdDSA" (Ed25519) is produced by the keys in this crate.
    fn alg(&self) -> String;
    /// "EdDSA" algorithms are fully specified by a curve name.  The linked-data JWS convention
    /// does not put it in the header, but signers still report it.
    fn crv_o(&self) -> Option<String>;
}

impl JOSEAlgorithmT for ed25519_dalek::SigningKey {
    fn alg(&self) -> String {
        "EdDSA".to_string()
    }
    fn crv_o(&self) -> Option<String> {
        Some("Ed25519".to_string())
    }
}

impl JOSEAlgorithmT for ed25519_dalek::VerifyingKey {
    fn alg(&self) -> String {
        "EdDSA".to_string()
    }
    fn crv_o(&self) -> Option<String> {
        Some("Ed25519".to_string())
    }
}
