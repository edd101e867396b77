use crate::{require, JWSHeader, JWSPayloadEncoding, JWSPayloadPresence, Result, JWS};
use std::io::Write;

/// A JWS whose signing input has been computed but which has not been signed yet.  Splitting
/// signing into two phases lets the caller produce the signature however it likes (e.g. with a
/// remote or async signer) and then finish the JWS Compact Serialization with `into_signed`.
#[derive(Clone, Debug)]
pub struct UnsignedJWS {
    header: JWSHeader,
    /// The compact serialization up to (but not including) the final '.' separator, i.e.
    /// `base64url(json(header)) '.' [payload]`, where the payload part is empty if detached.
    partial_string: String,
    /// `base64url(json(header)) '.' base64url(payload)` if the payload is encoded, or
    /// `base64url(json(header)) '.' payload` if it is not.
    signing_input: Vec<u8>,
}

impl UnsignedJWS {
    pub fn new(
        header: JWSHeader,
        payload_bytes: &mut dyn std::io::Read,
        payload_presence: JWSPayloadPresence,
    ) -> Result<Self> {
        let payload_encoding = header.payload_encoding();
        if payload_encoding == JWSPayloadEncoding::None {
            require!(
                header.is_unencoded_payload(),
                "a JWS header with \"b64\": false must list exactly \"b64\" in \"crit\""
            );
        }

        // Write base64url(json(header)) into the signing input.
        let mut signing_input = Vec::<u8>::new();
        {
            let mut base64url_encoder = base64::write::EncoderWriter::new(
                &mut signing_input,
                &base64::engine::general_purpose::URL_SAFE_NO_PAD,
            );
            serde_json::to_writer(&mut base64url_encoder, &header).map_err(|e| {
                crate::Error::Malformed(format!("error while writing JWS header: {}", e).into())
            })?;
            base64url_encoder.finish()?;
        }
        signing_input.write_all(b".")?;
        // The header and separator are ASCII by construction.
        let mut partial_string = String::from_utf8_lossy(&signing_input).into_owned();

        let payload_start = signing_input.len();
        match payload_encoding {
            JWSPayloadEncoding::Base64 => {
                let mut base64url_encoder = base64::write::EncoderWriter::new(
                    &mut signing_input,
                    &base64::engine::general_purpose::URL_SAFE_NO_PAD,
                );
                std::io::copy(payload_bytes, &mut base64url_encoder)?;
                base64url_encoder.finish()?;
            }
            JWSPayloadEncoding::None => {
                std::io::copy(payload_bytes, &mut signing_input)?;
            }
        }

        if payload_presence == JWSPayloadPresence::Attached {
            let payload_part = std::str::from_utf8(&signing_input[payload_start..]).map_err(|_| {
                crate::Error::Unsupported(
                    "an unencoded, attached JWS payload must be valid UTF-8".into(),
                )
            })?;
            require!(
                !payload_part.contains('.'),
                "an unencoded, attached JWS payload must not contain '.'"
            );
            partial_string.push_str(payload_part);
        }

        Ok(Self {
            header,
            partial_string,
            signing_input,
        })
    }
    pub fn header(&self) -> &JWSHeader {
        &self.header
    }
    /// The bytes the signature must be computed over.
    pub fn signing_input(&self) -> &[u8] {
        self.signing_input.as_slice()
    }
    /// Append the separator character and base64url-encoded signature, producing the JWS.
    pub fn into_signed(self, signature_bytes: &[u8]) -> JWS<'static> {
        use base64::Engine;
        let mut jws_string = self.partial_string;
        jws_string.push('.');
        jws_string
            .push_str(&base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(signature_bytes));
        JWS::from_parts(jws_string, self.header, signature_bytes.to_vec())
    }
}
