use crate::{
    create_verify_data, ensure_suite_context_default, match_proof_default, w3c_date,
    CanonicalKey, CanonicalizerT, ClassifiedKey, ContextResolver, DocumentLoaderT,
    Ed25519Signature2018Options, Error, JCSCanonicalizer, LinkedDataSignatureT, Proof,
    ProofOptions, ProofPurpose, Result, SignerT, VerificationMethod, VerifierT, VerifyOutcome,
    ED25519_SIGNATURE_2018_CONTEXT_URL, SUITE_CONTEXT,
};
use ld_jws::{JWSHeader, JWSPayloadPresence, UnsignedJWS, JWS};
use std::sync::Arc;

/// The Ed25519Signature2018 linked-data signature suite.  Proofs carry a detached JWS with an
/// unencoded payload (`{"alg":"EdDSA","b64":false,"crit":["b64"]}`) over the verify data.
#[derive(Debug)]
pub struct Ed25519Signature2018 {
    options: Ed25519Signature2018Options,
    context_resolver: ContextResolver,
}

impl Ed25519Signature2018 {
    pub const PROOF_TYPE: &'static str = "Ed25519Signature2018";
    pub const ALG: &'static str = "EdDSA";
    pub const REQUIRED_KEY_TYPE: &'static str = "Ed25519VerificationKey2018";
    pub const CONTEXT_URL: &'static str = ED25519_SIGNATURE_2018_CONTEXT_URL;

    pub fn new(options: Ed25519Signature2018Options) -> Self {
        Self {
            options,
            context_resolver: ContextResolver::ed25519_signature_2018(),
        }
    }
    /// The suite context document.
    pub fn context() -> &'static serde_json::Value {
        &SUITE_CONTEXT
    }
    pub fn options(&self) -> &Ed25519Signature2018Options {
        &self.options
    }
    pub fn context_resolver(&self) -> &ContextResolver {
        &self.context_resolver
    }
    fn canonicalizer(&self) -> Arc<dyn CanonicalizerT> {
        self.options
            .canonicalizer_o
            .clone()
            .unwrap_or_else(|| Arc::new(JCSCanonicalizer))
    }
    fn signer(&self) -> Result<Arc<dyn SignerT>> {
        if let Some(signer) = self.options.signer_o.as_ref() {
            return Ok(signer.clone());
        }
        if let Some(key) = self.options.key_o.as_ref() {
            if let Some(signer) = key.signer_o()? {
                return Ok(Arc::new(signer));
            }
        }
        Err(Error::NoSignerConfigured)
    }
    fn verifier(&self) -> Result<Arc<dyn VerifierT>> {
        if let Some(verifier) = self.options.verifier_o.as_ref() {
            return Ok(verifier.clone());
        }
        if let Some(key) = self.options.key_o.as_ref() {
            return Ok(Arc::new(key.clone()));
        }
        Err(Error::NoVerifierConfigured)
    }
    fn verification_method_id(&self, signer: &dyn SignerT) -> Result<String> {
        self.options
            .verification_method_o
            .as_deref()
            .or_else(|| self.options.key_o.as_ref().map(|key| key.id.as_str()))
            .or_else(|| signer.key_id_o())
            .map(str::to_string)
            .ok_or_else(|| {
                Error::InvalidConfiguration(
                    "no verification method id is configured; set \"verificationMethod\", a key, or a signer with a key id"
                        .into(),
                )
            })
    }
    /// Classifies and normalizes a raw verification-method record, then rejects it if revoked.
    pub fn canonical_key(&self, verification_method_record: &serde_json::Value) -> Result<CanonicalKey> {
        let verification_method = VerificationMethod::from_value(verification_method_record)?;
        let canonical_key = ClassifiedKey::classify(verification_method)?.normalize()?;
        canonical_key.ensure_not_revoked()?;
        Ok(canonical_key)
    }
    /// Parses the proof's "jws" and checks it has the header this suite signs with.
    fn parse_jws<'p>(&self, proof: &'p Proof) -> Result<JWS<'p>> {
        let jws_str = match proof.jws_o() {
            Some(jws_str) if !jws_str.is_empty() && jws_str.contains('.') => jws_str,
            _ => return Err(Error::invalid_signature_property()),
        };
        let jws = JWS::try_from(jws_str).map_err(|e| {
            Error::InvalidProofFormat(format!("the proof's \"jws\" is malformed: {}", e).into())
        })?;
        if !jws.header().is_unencoded_payload() || jws.header().alg != Self::ALG {
            return Err(Error::InvalidProofFormat(
                "Invalid JWS header parameters for Ed25519Signature2018.".into(),
            ));
        }
        if !jws.raw_attached_payload_str().is_empty() {
            return Err(Error::InvalidProofFormat(
                "the proof's \"jws\" must have a detached (empty) payload segment".into(),
            ));
        }
        Ok(jws)
    }
}

#[async_trait::async_trait]
impl LinkedDataSignatureT for Ed25519Signature2018 {
    fn proof_type(&self) -> &str {
        Self::PROOF_TYPE
    }
    fn context_url(&self) -> &str {
        Self::CONTEXT_URL
    }
    /// A document declaring any compatible context (including a generic one that defines this
    /// suite's terms) is left alone, so the suite context is never injected on top of a generic one.
    fn ensure_suite_context(
        &self,
        document: &mut serde_json::Value,
        add_suite_context: bool,
    ) -> Result<()> {
        if self.context_resolver.resolve_document(document).is_compatible() {
            return Ok(());
        }
        ensure_suite_context_default(Self::CONTEXT_URL, document, add_suite_context)
    }
    fn match_proof(
        &self,
        proof: &Proof,
        document: &serde_json::Value,
        proof_purpose: ProofPurpose,
    ) -> Result<()> {
        self.context_resolver
            .resolve_document(document)
            .into_result()?;
        match_proof_default(Self::PROOF_TYPE, proof, proof_purpose)
    }
    async fn sign(
        &self,
        document: &serde_json::Value,
        proof_options: &ProofOptions,
        document_loader: &dyn DocumentLoaderT,
    ) -> Result<serde_json::Value> {
        let signer = self.signer()?;
        if signer.alg() != Self::ALG {
            return Err(Error::InvalidConfiguration(
                format!(
                    "signer algorithm {:?} is not {:?}",
                    signer.alg(),
                    Self::ALG
                )
                .into(),
            ));
        }

        let mut document = document.clone();
        self.ensure_suite_context(&mut document, true)?;
        let document_m = document
            .as_object_mut()
            .ok_or_else(|| Error::Malformed("document must be a JSON object".into()))?;
        // Proofs already on the document aren't covered by the new one.
        let existing_proof_o = document_m.remove("proof");

        let mut proof = self.options.proof_template_o.clone().unwrap_or_default();
        for (name, value) in proof_options.extra_member_m.iter() {
            proof.set(name.as_str(), value.clone());
        }
        proof.set("type", Self::PROOF_TYPE);
        if let Some(date) = self.options.date_o {
            proof.set("created", w3c_date(date)?);
        } else if proof.created_o().is_none() {
            proof.set("created", w3c_date(time::OffsetDateTime::now_utc())?);
        }
        proof.set(
            "verificationMethod",
            self.verification_method_id(signer.as_ref())?,
        );
        proof_options.proof_purpose.update(&mut proof);

        let verify_data = create_verify_data(
            self.canonicalizer().as_ref(),
            self.options.use_native_canonize,
            &document,
            &proof,
            document_loader,
        )
        .await?;
        let unsigned_jws = UnsignedJWS::new(
            JWSHeader::unencoded(signer.alg()),
            &mut verify_data.as_slice(),
            JWSPayloadPresence::Detached,
        )?;
        let signature_byte_v = signer.sign(unsigned_jws.signing_input()).await?;
        let jws = unsigned_jws.into_signed(&signature_byte_v);
        tracing::debug!(
            "created {} proof; verificationMethod: {:?}, proofPurpose: {}",
            Self::PROOF_TYPE,
            proof.verification_method_o(),
            proof_options.proof_purpose
        );
        proof.set("jws", jws.into_string());

        let proof_value = match existing_proof_o {
            None => proof.into_value(),
            Some(serde_json::Value::Array(mut proof_v)) => {
                proof_v.push(proof.into_value());
                serde_json::Value::Array(proof_v)
            }
            Some(existing_proof) => serde_json::Value::Array(vec![existing_proof, proof.into_value()]),
        };
        if let Some(document_m) = document.as_object_mut() {
            document_m.insert("proof".to_string(), proof_value);
        }
        Ok(document)
    }
    async fn verify(
        &self,
        document: &serde_json::Value,
        proof: &Proof,
        proof_purpose: ProofPurpose,
        document_loader: &dyn DocumentLoaderT,
    ) -> Result<VerifyOutcome> {
        if let Err(reason) = self.match_proof(proof, document, proof_purpose) {
            tracing::debug!("{} does not claim proof: {}", Self::PROOF_TYPE, reason);
            return Ok(VerifyOutcome::NotApplicable(reason));
        }
        let jws = self.parse_jws(proof)?;
        let verifier = self.verifier()?;

        let verification_method_record = self
            .get_verification_method(proof, document_loader)
            .await?;
        let canonical_key = self.canonical_key(&verification_method_record)?;

        let verify_data = create_verify_data(
            self.canonicalizer().as_ref(),
            self.options.use_native_canonize,
            document,
            proof,
            document_loader,
        )
        .await?;
        let signing_input = jws.signing_input(Some(&mut verify_data.as_slice()))?;
        match verifier
            .verify(&signing_input, jws.signature_bytes(), &canonical_key)
            .await
        {
            Ok(true) => {
                tracing::debug!(
                    "verified {} proof with {:?}",
                    Self::PROOF_TYPE,
                    canonical_key.id
                );
                Ok(VerifyOutcome::Verified(canonical_key))
            }
            Ok(false) => Ok(VerifyOutcome::NotVerified(Error::SignatureMismatch(
                format!("Invalid signature for {:?}.", canonical_key.id).into(),
            ))),
            Err(e @ Error::SignatureMismatch(_)) => Ok(VerifyOutcome::NotVerified(e)),
            Err(e) => Err(e),
        }
    }
}
