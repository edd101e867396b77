#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum JWSPayloadEncoding {
    /// No encoding.  This is the RFC 7797 "b64": false convention.
    None,
    /// This really means base64url-no-pad encoding.
    Base64,
}
