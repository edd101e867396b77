use crate::{
    require, Error, JOSEAlgorithmT, JWSHeader, JWSPayloadEncoding, JWSPayloadPresence, Result,
    UnsignedJWS,
};
use base64::Engine;
use std::{borrow::Cow, io::Write};

/// This is the compact, encoded form of a JWS (JWS Compact Serialization).  Has the form:
/// <base64url(JSON(header))>.<base64url(payload)>.<base64url(signature)> if encoded, attached payload,
/// or <base64url(JSON(header))>.<payload>.<base64url(signature)> if unencoded, attached payload,
/// or <base64url(JSON(header))>..<base64url(signature)> if detached payload,
/// See RFC 7515 Section 7.1 https://datatracker.ietf.org/doc/html/rfc7515#section-7.1
/// Here, base64url(x) is the base64url-no-pad encoding of x.
#[derive(Clone, Debug)]
pub struct JWS<'j> {
    /// String representation of the JWS Compact Serialization.
    string: Cow<'j, str>,
    /// Parsed header.
    header: JWSHeader,
    /// Decoded signature.
    signature_byte_v: Vec<u8>,
}

impl<'j> JWS<'j> {
    pub(crate) fn from_parts(string: String, header: JWSHeader, signature_byte_v: Vec<u8>) -> Self {
        Self {
            string: Cow::Owned(string),
            header,
            signature_byte_v,
        }
    }
    pub fn into_string(self) -> String {
        self.string.into_owned()
    }
    /// Return a reference to the str representation of the JWS Compact Serialization.
    pub fn as_str(&self) -> &str {
        self.string.as_ref()
    }
    /// This is the input to the signature algorithm: the concatenation of the base64url-encoded header,
    /// a period ('.') and the payload (which comes from detached_payload_bytes_o if Some(_), otherwise
    /// from the JWS itself).  If detached_payload_bytes_o is Some(_), then the attached payload must be
    /// the empty string.
    pub fn write_signing_input(
        &self,
        writer: &mut dyn std::io::Write,
        detached_payload_bytes_o: Option<&mut dyn std::io::Read>,
    ) -> Result<()> {
        writer.write_all(self.raw_header_base64().as_bytes())?;
        writer.write_all(b".".as_slice())?;

        if let Some(detached_payload_bytes) = detached_payload_bytes_o {
            require!(
                self.raw_attached_payload_str().is_empty(),
                "if the JWS payload is not empty, then no detached payload may be specified"
            );
            match self.header.payload_encoding() {
                JWSPayloadEncoding::Base64 => {
                    let mut base64url_encoder = base64::write::EncoderWriter::new(
                        writer,
                        &base64::engine::general_purpose::URL_SAFE_NO_PAD,
                    );
                    std::io::copy(detached_payload_bytes, &mut base64url_encoder)?;
                    base64url_encoder.finish()?;
                }
                JWSPayloadEncoding::None => {
                    std::io::copy(detached_payload_bytes, writer)?;
                }
            }
        } else {
            // Here, because the payload is attached, it's already in its signing input form,
            // so just write it.  Note that it's possible to have an attached payload that is empty.
            writer.write_all(self.raw_attached_payload_str().as_bytes())?;
        }
        Ok(())
    }
    /// Convenience wrapper around write_signing_input which collects the signing input into a Vec.
    pub fn signing_input(
        &self,
        detached_payload_bytes_o: Option<&mut dyn std::io::Read>,
    ) -> Result<Vec<u8>> {
        let mut signing_input = Vec::new();
        self.write_signing_input(&mut signing_input, detached_payload_bytes_o)?;
        Ok(signing_input)
    }
    /// This is the base64url-encoded header, which is the substring of the JWS Compact Serialization up to the
    /// first '.' separator.
    pub fn raw_header_base64(&self) -> &str {
        self.string.split('.').next().unwrap_or_default()
    }
    /// Returns the parsed header.
    pub fn header(&self) -> &JWSHeader {
        &self.header
    }
    /// This is the attached payload, which is the value between the two '.' separators in the JWS.
    /// In the case of a detached payload, this will be an empty string.  However, an attached payload can
    /// also be an empty string.
    pub fn raw_attached_payload_str(&self) -> &str {
        self.string.split('.').nth(1).unwrap_or_default()
    }
    /// This is the base64url-encoded signature, which is the substring of the JWS Compact Serialization after
    /// the second '.' separator.
    pub fn raw_signature_base64(&self) -> &str {
        self.string.split('.').nth(2).unwrap_or_default()
    }
    /// This is the decoded signature.
    pub fn signature_bytes(&self) -> &[u8] {
        self.signature_byte_v.as_slice()
    }
    /// Generate a JWS Compact Serialization from the given payload, optionally encoding the given
    /// payload bytes, and then signing the signing input using the given signer.
    pub fn signed<
        Signature: std::fmt::Debug + signature::SignatureEncoding,
        Signer: signature::Signer<Signature> + JOSEAlgorithmT,
    >(
        kid_o: Option<String>,
        payload_bytes: &mut dyn std::io::Read,
        payload_presence: JWSPayloadPresence,
        payload_encoding: JWSPayloadEncoding,
        signer: &Signer,
    ) -> Result<JWS<'static>> {
        let header = JWSHeader::new(signer.alg(), kid_o, payload_encoding);
        let unsigned_jws = UnsignedJWS::new(header, payload_bytes, payload_presence)?;
        let signature = signer
            .try_sign(unsigned_jws.signing_input())
            .map_err(|e| Error::SigningFailed(e.to_string().into()))?;
        Ok(unsigned_jws.into_signed(signature.to_bytes().as_ref()))
    }
    /// Verifies the JWS using the given verifier.  detached_payload_bytes_o should be Some(_) if it's a
    /// detached payload, and None if it's an attached payload.
    pub fn verify<
        Signature: std::fmt::Debug + signature::SignatureEncoding,
        Verifier: signature::Verifier<Signature> + JOSEAlgorithmT,
    >(
        &self,
        verifier: &Verifier,
        detached_payload_bytes_o: Option<&mut dyn std::io::Read>,
    ) -> Result<()> {
        if self.header.alg != verifier.alg() {
            return Err(Error::Unsupported(
                format!(
                    "JWS alg {:?} does not match that of the verifier {:?}",
                    self.header.alg,
                    verifier.alg()
                )
                .into(),
            ));
        }

        let signing_input = self.signing_input(detached_payload_bytes_o)?;
        let signature = Signature::try_from(self.signature_byte_v.as_slice())
            .map_err(|_| Error::Malformed("JWS signature has the wrong length".into()))?;

        verifier
            .verify(signing_input.as_slice(), &signature)
            .map_err(|e| Error::VerificationFailed(e.to_string().into()))?;

        Ok(())
    }
}

impl<'j> std::ops::Deref for JWS<'j> {
    type Target = str;
    fn deref(&self) -> &Self::Target {
        self.string.as_ref()
    }
}

impl<'j> std::fmt::Display for JWS<'j> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.string.as_ref())
    }
}

impl<'j> TryFrom<String> for JWS<'j> {
    type Error = Error;
    fn try_from(jws_string: String) -> std::result::Result<Self, Self::Error> {
        Self::try_from(Cow::Owned(jws_string))
    }
}

impl<'j> TryFrom<&'j str> for JWS<'j> {
    type Error = Error;
    fn try_from(jws_str: &'j str) -> std::result::Result<Self, Self::Error> {
        Self::try_from(Cow::Borrowed(jws_str))
    }
}

impl<'j> TryFrom<Cow<'j, str>> for JWS<'j> {
    type Error = Error;
    fn try_from(jws_str: Cow<'j, str>) -> std::result::Result<Self, Self::Error> {
        let mut split = jws_str.split('.');

        let header_base64 = split
            .next()
            .ok_or(Error::Malformed("JWS missing header".into()))?;
        let payload = split
            .next()
            .ok_or(Error::Malformed("JWS missing payload".into()))?;
        let signature_base64 = split
            .next()
            .ok_or(Error::Malformed("JWS missing signature".into()))?;
        require!(split.next().is_none(), "JWS has too many parts");

        require!(
            !header_base64.contains(char::is_whitespace),
            "Encoded JWS header contains whitespace"
        );
        require!(
            !payload.contains(char::is_whitespace),
            "JWS payload contains whitespace"
        );
        require!(
            !signature_base64.contains(char::is_whitespace),
            "Encoded JWS signature contains whitespace"
        );
        require!(
            is_base64url_encoded(header_base64),
            "JWS header is not base64url-encoded"
        );
        require!(
            is_base64url_encoded(signature_base64),
            "JWS signature is not base64url-encoded"
        );

        let header = serde_json::from_reader::<_, JWSHeader>(base64::read::DecoderReader::new(
            header_base64.as_bytes(),
            &base64::engine::general_purpose::URL_SAFE_NO_PAD,
        ))
        .map_err(|e| {
            Error::Malformed(
                format!(
                    "JWS header failed to parse as expected JSON structure: {}",
                    e
                )
                .into(),
            )
        })?;
        // An unencoded payload may use any characters except '.', which the split already excludes.
        if header.payload_encoding() == JWSPayloadEncoding::Base64 {
            require!(
                is_base64url_encoded(payload),
                "JWS payload is not base64url-encoded"
            );
        }

        let signature_byte_v = base64::engine::general_purpose::URL_SAFE_NO_PAD
            .decode(signature_base64.as_bytes())
            .map_err(|_| Error::Malformed("JWS signature failed to parse".into()))?;

        Ok(JWS {
            string: jws_str,
            header,
            signature_byte_v,
        })
    }
}

/// This is base64url without padding.
fn is_base64url_encoded(s: &str) -> bool {
    // Base64urlnopad encoding is a subset of base64url encoding, so we can just check for the presence of
    // characters that are not in the base64url-nopad alphabet.
    s.chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}
