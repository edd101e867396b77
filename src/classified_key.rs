use crate::{
    CanonicalKey, ContextResolver, Error, KeyRepresentationT, PublicKeyBase58, PublicKeyMultibase,
    Result, VerificationMethod, ED25519_SIGNATURE_2018_CONTEXT_URL,
    ED25519_SIGNATURE_2020_CONTEXT_URL, SECURITY_CONTEXT_V2_URL,
};

pub(crate) const ED25519_VERIFICATION_KEY_2018: &str = "Ed25519VerificationKey2018";
pub(crate) const ED25519_VERIFICATION_KEY_2020: &str = "Ed25519VerificationKey2020";

lazy_static::lazy_static! {
    /// Contexts that define the Ed25519VerificationKey2018 type tag.
    static ref ED25519_VERIFICATION_KEY_2018_CONTEXT_RESOLVER: ContextResolver = ContextResolver::new(
        vec![
            ED25519_SIGNATURE_2018_CONTEXT_URL.into(),
            SECURITY_CONTEXT_V2_URL.into(),
        ],
        Vec::new(),
    );
    /// Contexts that define the Ed25519VerificationKey2020 type tag.
    static ref ED25519_VERIFICATION_KEY_2020_CONTEXT_RESOLVER: ContextResolver =
        ContextResolver::new(vec![ED25519_SIGNATURE_2020_CONTEXT_URL.into()], Vec::new());
}

/// The kinds of verification method this suite can verify with.  A record only classifies as one
/// of the Ed25519 kinds if its type tag is declared alongside that kind's paired context, so a
/// record claiming a type under the wrong vocabulary is Unrecognized.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ClassifiedKey {
    Ed25519VerificationKey2018(VerificationMethod),
    Ed25519VerificationKey2020(VerificationMethod),
    Unrecognized(VerificationMethod),
}

impl ClassifiedKey {
    /// Looks only at the type tag and the record's contexts, checked with the context resolver for
    /// that type tag; key material is not decoded here.  Fails with MissingContext if the record
    /// declares no "@context" at all.
    pub fn classify(verification_method: VerificationMethod) -> Result<Self> {
        if verification_method.context_o.is_none() {
            return Err(Error::MissingContext(
                format!(
                    "verification method {:?} does not declare an \"@context\"",
                    verification_method.id
                )
                .into(),
            ));
        }
        let context_set = verification_method.context_set();
        let classified_key = match verification_method.r#type.as_str() {
            ED25519_VERIFICATION_KEY_2018
                if ED25519_VERIFICATION_KEY_2018_CONTEXT_RESOLVER
                    .resolve(&context_set)
                    .is_compatible() =>
            {
                Self::Ed25519VerificationKey2018(verification_method)
            }
            ED25519_VERIFICATION_KEY_2020
                if ED25519_VERIFICATION_KEY_2020_CONTEXT_RESOLVER
                    .resolve(&context_set)
                    .is_compatible() =>
            {
                Self::Ed25519VerificationKey2020(verification_method)
            }
            _ => Self::Unrecognized(verification_method),
        };
        Ok(classified_key)
    }
    pub fn verification_method(&self) -> &VerificationMethod {
        match self {
            Self::Ed25519VerificationKey2018(verification_method)
            | Self::Ed25519VerificationKey2020(verification_method)
            | Self::Unrecognized(verification_method) => verification_method,
        }
    }
    /// Produces the suite's required key type.  A 2018 key passes through unchanged, and a 2020
    /// key has its multibase public key re-encoded as publicKeyBase58.  Key material is decoded
    /// here, so a recognized key with bad key material fails with Malformed.
    pub fn normalize(self) -> Result<CanonicalKey> {
        match self {
            Self::Ed25519VerificationKey2018(verification_method) => {
                let public_key_base58 =
                    verification_method.public_key_base58_o.ok_or_else(|| {
                        Error::Malformed(
                            format!(
                                "verification method {:?} has no \"publicKeyBase58\"",
                                verification_method.id
                            )
                            .into(),
                        )
                    })?;
                let public_key_base58 = PublicKeyBase58::try_from(public_key_base58)?;
                Ok(CanonicalKey {
                    context_o: verification_method.context_o,
                    id: verification_method.id,
                    r#type: ED25519_VERIFICATION_KEY_2018.to_string(),
                    controller: verification_method.controller,
                    public_key_base58,
                    revoked_o: verification_method.revoked_o,
                })
            }
            Self::Ed25519VerificationKey2020(verification_method) => {
                let public_key_multibase =
                    verification_method.public_key_multibase_o.ok_or_else(|| {
                        Error::Malformed(
                            format!(
                                "verification method {:?} has no \"publicKeyMultibase\"",
                                verification_method.id
                            )
                            .into(),
                        )
                    })?;
                let public_key_multibase = PublicKeyMultibase::try_from(public_key_multibase)?;
                let public_key_base58 = public_key_multibase.transcode::<PublicKeyBase58>()?;
                tracing::debug!(
                    "bridged {} {:?} to {}; publicKeyMultibase {} -> publicKeyBase58 {}",
                    ED25519_VERIFICATION_KEY_2020,
                    verification_method.id,
                    ED25519_VERIFICATION_KEY_2018,
                    public_key_multibase,
                    public_key_base58
                );
                Ok(CanonicalKey {
                    context_o: Some(serde_json::Value::String(
                        ED25519_SIGNATURE_2018_CONTEXT_URL.to_string(),
                    )),
                    id: verification_method.id,
                    r#type: ED25519_VERIFICATION_KEY_2018.to_string(),
                    controller: verification_method.controller,
                    public_key_base58,
                    revoked_o: verification_method.revoked_o,
                })
            }
            Self::Unrecognized(verification_method) => Err(Error::InvalidKeyType(
                format!(
                    "verification method {:?} has type {:?}; expected {:?} (with the {:?} or {:?} context) or {:?} (with the {:?} context)",
                    verification_method.id,
                    verification_method.r#type,
                    ED25519_VERIFICATION_KEY_2018,
                    ED25519_SIGNATURE_2018_CONTEXT_URL,
                    SECURITY_CONTEXT_V2_URL,
                    ED25519_VERIFICATION_KEY_2020,
                    ED25519_SIGNATURE_2020_CONTEXT_URL,
                )
                .into(),
            )),
        }
    }
}
