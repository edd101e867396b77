use ed25519_signature_2018::{
    ClassifiedKey, ContextResolver, ContextSet, ContextVerdict, Ed25519Signature2018, Ed25519Signature2018Options,
    Ed25519VerificationKey2018, Ed25519Verifier, Error, LinkedDataSignatureT, Proof, ProofOptions,
    KeyRepresentationT, ProofPurpose, ProofSet, PublicKeyBase58, PublicKeyMultibase,
    StaticDocumentLoader, VerificationMethod, VerifyOutcome, CREDENTIALS_CONTEXT_V1_URL,
    ED25519_SIGNATURE_2018_CONTEXT_URL, ED25519_SIGNATURE_2020_CONTEXT_URL, SECURITY_CONTEXT_V2_URL,
};
use serde_json::json;
use std::sync::Arc;

/// This will run once at load time (i.e. presumably before main function is called).
#[ctor::ctor]
fn overall_init() {
    tracing_subscriber::fmt()
        .with_target(true)
        .with_line_number(true)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .compact()
        .init();
}

const CONTROLLER: &str = "https://example.edu/issuers/565049";
const KEY_ID: &str =
    "https://example.edu/issuers/565049#z6MkjLrk3gKS2nnkeWcmcxiZPGskmesDpuwRBorgHxUXfxnG";
const PUBLIC_KEY_BASE58: &str = "GycSSui454dpYRKiFdsQ5uaE8Gy3ac6dSMPcAoQsk8yq";
const PRIVATE_KEY_BASE58: &str =
    "3Mmk4UzTRJTEtxaKk61LxtgUxAa2Dg36jF6VogPtRiKvfpsQWKPCLesKSV182RMmvMJKk6QErH3wgdHp8itkSSiF";
/// The same public key as PUBLIC_KEY_BASE58, in its multicodec-prefixed multibase form.
const PUBLIC_KEY_MULTIBASE: &str = "z6MkvRsV39xVQc8HevAQwCqEw18DwrEtzVLz8NJY15NtfMmD";
/// Signature over the credential below by the key above, made at 2010-01-01T19:23:24Z for the
/// assertionMethod purpose.
const EXPECTED_JWS: &str = "eyJhbGciOiJFZERTQSIsImI2NCI6ZmFsc2UsImNyaXQiOlsiYjY0Il19..puiriNl3DbXMdINlBmE24DQ9ITbY5NrxXenL2HFTmKq2Qbmo-Ou-Zibm7e1lYmKDFtLtI9gyKEFuRv9JghffAw";

fn credential() -> serde_json::Value {
    json!({
        "@context": [
            CREDENTIALS_CONTEXT_V1_URL,
            "https://www.w3.org/2018/credentials/examples/v1"
        ],
        "id": "http://example.edu/credentials/1872",
        "type": ["VerifiableCredential", "AlumniCredential"],
        "issuer": CONTROLLER,
        "issuanceDate": "2010-01-01T19:23:24Z",
        "credentialSubject": {
            "id": "https://example.edu/students/alice",
            "alumniOf": "Example University"
        }
    })
}

fn key_record() -> serde_json::Value {
    json!({
        "@context": ED25519_SIGNATURE_2018_CONTEXT_URL,
        "id": KEY_ID,
        "type": "Ed25519VerificationKey2018",
        "controller": CONTROLLER,
        "publicKeyBase58": PUBLIC_KEY_BASE58
    })
}

fn controller_document(assertion_method_v: &[&str]) -> serde_json::Value {
    json!({
        "@context": [SECURITY_CONTEXT_V2_URL],
        "id": CONTROLLER,
        "assertionMethod": assertion_method_v,
        "publicKey": []
    })
}

fn mock_key() -> Ed25519VerificationKey2018 {
    Ed25519VerificationKey2018::from_value(&json!({
        "id": KEY_ID,
        "controller": CONTROLLER,
        "publicKeyBase58": PUBLIC_KEY_BASE58,
        "privateKeyBase58": PRIVATE_KEY_BASE58
    }))
    .expect("pass")
}

fn mock_loader() -> StaticDocumentLoader {
    StaticDocumentLoader::new()
        .with_suite_context()
        .with(KEY_ID, key_record())
        .with(CONTROLLER, controller_document(&[KEY_ID]))
}

fn signing_suite() -> Ed25519Signature2018 {
    Ed25519Signature2018::new(
        Ed25519Signature2018Options::new()
            .with_key(mock_key())
            .with_date(time::macros::datetime!(2010-01-01 19:23:24 UTC)),
    )
}

fn verifying_suite() -> Ed25519Signature2018 {
    Ed25519Signature2018::new(
        Ed25519Signature2018Options::new().with_verifier(Arc::new(Ed25519Verifier)),
    )
}

fn single_proof(signed_document: &serde_json::Value) -> Proof {
    Proof::from_value(signed_document["proof"].clone()).expect("pass")
}

#[test]
fn test_suite_context_document() {
    let context = Ed25519Signature2018::context();
    assert_eq!(context["@context"]["id"], "@id");
    assert_eq!(context["@context"]["type"], "@type");
    assert!(context["@context"]["Ed25519Signature2018"].is_object());
    assert!(context["@context"]["Ed25519VerificationKey2018"].is_object());
    assert_eq!(Ed25519Signature2018::CONTEXT_URL, ED25519_SIGNATURE_2018_CONTEXT_URL);
}

#[test]
fn test_context_resolver_verdicts() {
    let context_resolver = ContextResolver::default();
    let resolve = |context: serde_json::Value| {
        context_resolver.resolve(&ContextSet::from_context_value(&context))
    };

    for url in [
        ED25519_SIGNATURE_2018_CONTEXT_URL,
        ED25519_SIGNATURE_2020_CONTEXT_URL,
        CREDENTIALS_CONTEXT_V1_URL,
        SECURITY_CONTEXT_V2_URL,
    ] {
        assert_eq!(resolve(json!(url)), ContextVerdict::Compatible);
        assert_eq!(resolve(json!(["https://example.com/other", url])), ContextVerdict::Compatible);
    }
    assert_eq!(
        resolve(json!([ED25519_SIGNATURE_2020_CONTEXT_URL, CREDENTIALS_CONTEXT_V1_URL])),
        ContextVerdict::Compatible
    );
    assert_eq!(resolve(json!("https://example.com/other")), ContextVerdict::Absent);
    assert_eq!(resolve(json!([{"ex": "https://example.com/#"}])), ContextVerdict::Absent);

    assert_eq!(
        resolve(json!([CREDENTIALS_CONTEXT_V1_URL, ED25519_SIGNATURE_2018_CONTEXT_URL])),
        ContextVerdict::Incompatible {
            specific_context_url: ED25519_SIGNATURE_2018_CONTEXT_URL.to_string(),
            generic_context_url: CREDENTIALS_CONTEXT_V1_URL.to_string(),
        }
    );
    // The first rule wins when more than one is violated.
    assert_eq!(
        resolve(json!([
            SECURITY_CONTEXT_V2_URL,
            CREDENTIALS_CONTEXT_V1_URL,
            ED25519_SIGNATURE_2018_CONTEXT_URL
        ])),
        ContextVerdict::Incompatible {
            specific_context_url: ED25519_SIGNATURE_2018_CONTEXT_URL.to_string(),
            generic_context_url: CREDENTIALS_CONTEXT_V1_URL.to_string(),
        }
    );
    let error = resolve(json!([SECURITY_CONTEXT_V2_URL, ED25519_SIGNATURE_2018_CONTEXT_URL]))
        .into_result()
        .expect_err("pass");
    assert!(matches!(error, Error::IncompatibleContext(_)));
    assert!(error.to_string().contains(SECURITY_CONTEXT_V2_URL));
    assert!(matches!(
        ContextVerdict::Absent.into_result(),
        Err(Error::MissingContext(_))
    ));
}

#[test]
fn test_ensure_suite_context() {
    let suite = verifying_suite();

    // Generic contexts already define the suite's terms, so nothing is injected.
    let mut document = credential();
    suite.ensure_suite_context(&mut document, true).expect("pass");
    assert_eq!(document, credential());

    // Colliding contexts are reported, and the suite context is not injected a second time.
    let colliding_context = json!([CREDENTIALS_CONTEXT_V1_URL, ED25519_SIGNATURE_2018_CONTEXT_URL]);
    let mut document = json!({"@context": colliding_context.clone(), "name": "x"});
    suite.ensure_suite_context(&mut document, true).expect("pass");
    assert_eq!(document["@context"], colliding_context);

    let mut document = json!({"@context": "https://example.com/other", "name": "x"});
    suite.ensure_suite_context(&mut document, true).expect("pass");
    assert_eq!(
        document["@context"],
        json!(["https://example.com/other", ED25519_SIGNATURE_2018_CONTEXT_URL])
    );
    // Idempotent.
    suite.ensure_suite_context(&mut document, true).expect("pass");
    assert_eq!(document["@context"].as_array().expect("pass").len(), 2);

    let mut document = json!({"name": "x"});
    suite.ensure_suite_context(&mut document, true).expect("pass");
    assert_eq!(document["@context"], json!([ED25519_SIGNATURE_2018_CONTEXT_URL]));

    let mut document = json!({"@context": "https://example.com/other"});
    assert!(matches!(
        suite.ensure_suite_context(&mut document, false),
        Err(Error::MissingContext(_))
    ));
}

#[tokio::test]
async fn test_sign_known_answer() {
    let suite = signing_suite();
    let document_loader = mock_loader();
    let proof_options = ProofOptions::new(ProofPurpose::AssertionMethod);

    let signed_document = suite
        .sign(&credential(), &proof_options, &document_loader)
        .await
        .expect("pass");
    tracing::debug!(
        "signed document: {}",
        serde_json::to_string_pretty(&signed_document).expect("pass")
    );
    // The credentials context covers the suite terms, so no context was added.
    assert_eq!(signed_document["@context"], credential()["@context"]);

    let proof = single_proof(&signed_document);
    assert_eq!(proof.proof_type_o(), Some("Ed25519Signature2018"));
    assert_eq!(proof.created_o(), Some("2010-01-01T19:23:24Z"));
    assert_eq!(proof.verification_method_o(), Some(KEY_ID));
    assert_eq!(proof.proof_purpose_o(), Some("assertionMethod"));
    assert_eq!(proof.jws_o(), Some(EXPECTED_JWS));

    // Ed25519 is deterministic, so signing again with the same date gives the same proof.
    let signed_again = suite
        .sign(&credential(), &proof_options, &document_loader)
        .await
        .expect("pass");
    assert_eq!(signed_again, signed_document);

    let proof_set_result = ProofSet::verify(
        &signed_document,
        &[&verifying_suite() as &dyn LinkedDataSignatureT],
        ProofPurpose::AssertionMethod,
        &document_loader,
    )
    .await;
    assert!(proof_set_result.verified);
    assert!(proof_set_result.error_o.is_none());
    assert_eq!(proof_set_result.result_v.len(), 1);
    let canonical_key = proof_set_result.result_v[0]
        .verification_method_o
        .as_ref()
        .expect("pass");
    assert_eq!(canonical_key.id, KEY_ID);
    assert_eq!(canonical_key.public_key_base58.as_str(), PUBLIC_KEY_BASE58);
}

#[tokio::test]
async fn test_sign_leaves_colliding_contexts_alone() {
    let suite = signing_suite();
    let document_loader = mock_loader();
    for generic_context_url in [CREDENTIALS_CONTEXT_V1_URL, SECURITY_CONTEXT_V2_URL] {
        let colliding_context = json!([generic_context_url, ED25519_SIGNATURE_2018_CONTEXT_URL]);
        let mut document = credential();
        document["@context"] = colliding_context.clone();
        assert!(!suite.context_resolver().resolve_document(&document).is_compatible());

        let signed_document = suite
            .sign(
                &document,
                &ProofOptions::new(ProofPurpose::AssertionMethod),
                &document_loader,
            )
            .await
            .expect("pass");
        assert_eq!(signed_document["@context"], colliding_context);
        assert_eq!(
            single_proof(&signed_document).proof_type_o(),
            Some("Ed25519Signature2018")
        );
    }
}

#[tokio::test]
async fn test_sign_and_verify_with_generated_key() {
    let signing_key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
    let controller = "did:example:generated";
    let key = Ed25519VerificationKey2018::from_signing_key(controller.to_string(), &signing_key);
    assert!(key.id.starts_with("did:example:generated#z6Mk"));
    assert_eq!(
        key.id.split('#').nth(1),
        Some(key.fingerprint().expect("pass").as_str())
    );

    let document_loader = StaticDocumentLoader::new()
        .with(
            key.id.clone(),
            serde_json::to_value(key.export_public()).expect("pass"),
        )
        .with(
            controller,
            json!({
                "@context": SECURITY_CONTEXT_V2_URL,
                "id": controller,
                "authentication": [key.id.clone()]
            }),
        );
    let suite = Ed25519Signature2018::new(Ed25519Signature2018Options::new().with_key(key));
    let document = json!({"@context": "https://example.com/other", "message": "hello"});
    let proof_options = ProofOptions::new(ProofPurpose::Authentication).with_challenge("abc123");
    let signed_document = suite
        .sign(&document, &proof_options, &document_loader)
        .await
        .expect("pass");
    assert_eq!(
        signed_document["@context"],
        json!(["https://example.com/other", ED25519_SIGNATURE_2018_CONTEXT_URL])
    );
    let proof = single_proof(&signed_document);
    assert_eq!(proof.get("challenge"), Some(&json!("abc123")));

    // The suite configured with the key pair verifies with its own public key.
    let proof_set_result = ProofSet::verify(
        &signed_document,
        &[&suite as &dyn LinkedDataSignatureT],
        ProofPurpose::Authentication,
        &document_loader,
    )
    .await;
    assert!(proof_set_result.verified);

    // The same proof is not an assertionMethod proof.
    let proof_set_result = ProofSet::verify(
        &signed_document,
        &[&suite as &dyn LinkedDataSignatureT],
        ProofPurpose::AssertionMethod,
        &document_loader,
    )
    .await;
    assert!(!proof_set_result.verified);
    assert!(matches!(proof_set_result.error_o, Some(Error::NoMatchingProof)));
}

#[tokio::test]
async fn test_sign_requires_signer() {
    let document_loader = mock_loader();
    let proof_options = ProofOptions::new(ProofPurpose::AssertionMethod);

    let suite = Ed25519Signature2018::new(Ed25519Signature2018Options::new());
    let error = suite
        .sign(&credential(), &proof_options, &document_loader)
        .await
        .expect_err("pass");
    assert!(matches!(error, Error::NoSignerConfigured));
    assert_eq!(error.to_string(), "A signer API has not been specified.");

    // A public-only key can verify but not sign.
    let public_only_key = Ed25519VerificationKey2018::from_value(&json!({
        "id": KEY_ID,
        "controller": CONTROLLER,
        "publicKeyBase58": PUBLIC_KEY_BASE58
    }))
    .expect("pass");
    assert!(!public_only_key.has_private_key());
    let suite =
        Ed25519Signature2018::new(Ed25519Signature2018Options::new().with_key(public_only_key));
    assert!(matches!(
        suite
            .sign(&credential(), &proof_options, &document_loader)
            .await,
        Err(Error::NoSignerConfigured)
    ));
}

#[tokio::test]
async fn test_verify_requires_verifier() {
    let document_loader = mock_loader();
    let signed_document = signing_suite()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &document_loader,
        )
        .await
        .expect("pass");
    let suite = Ed25519Signature2018::new(Ed25519Signature2018Options::new());
    let error = suite
        .verify(
            &signed_document,
            &single_proof(&signed_document),
            ProofPurpose::AssertionMethod,
            &document_loader,
        )
        .await
        .expect_err("pass");
    assert!(matches!(error, Error::NoVerifierConfigured));
}

#[tokio::test]
async fn test_verification_method_id_precedence() {
    let document_loader = mock_loader();
    let proof_options = ProofOptions::new(ProofPurpose::AssertionMethod);

    let suite = Ed25519Signature2018::new(
        Ed25519Signature2018Options::new()
            .with_key(mock_key())
            .with_verification_method("https://example.edu/issuers/565049#other-key"),
    );
    let signed_document = suite
        .sign(&credential(), &proof_options, &document_loader)
        .await
        .expect("pass");
    assert_eq!(
        single_proof(&signed_document).verification_method_o(),
        Some("https://example.edu/issuers/565049#other-key")
    );

    // A bare signer with no key id has nothing to name.
    let signing_key = mock_key().signing_key_o().expect("pass").expect("pass");
    let suite = Ed25519Signature2018::new(Ed25519Signature2018Options::new().with_signer(
        Arc::new(ed25519_signature_2018::Ed25519Signer::new(None, signing_key)),
    ));
    assert!(matches!(
        suite
            .sign(&credential(), &proof_options, &document_loader)
            .await,
        Err(Error::InvalidConfiguration(_))
    ));
}

#[tokio::test]
async fn test_proof_template_and_date() {
    let mut proof_template = Proof::new();
    proof_template.set("type", "SomethingElse");
    proof_template.set("created", "2001-02-03T04:05:06Z");
    proof_template.set("domain", "example.edu");

    // The template's "created" is kept when there is no date option.
    let suite = Ed25519Signature2018::new(
        Ed25519Signature2018Options::new()
            .with_key(mock_key())
            .with_proof_template(proof_template.clone()),
    );
    let signed_document = suite
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &mock_loader(),
        )
        .await
        .expect("pass");
    let proof = single_proof(&signed_document);
    assert_eq!(proof.proof_type_o(), Some("Ed25519Signature2018"));
    assert_eq!(proof.created_o(), Some("2001-02-03T04:05:06Z"));
    assert_eq!(proof.get("domain"), Some(&json!("example.edu")));

    // The date option wins over the template.
    let suite = Ed25519Signature2018::new(
        Ed25519Signature2018Options::new()
            .with_key(mock_key())
            .with_proof_template(proof_template)
            .with_date(time::macros::datetime!(2020-06-07 08:09:10.123 +02:00)),
    );
    let signed_document = suite
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &mock_loader(),
        )
        .await
        .expect("pass");
    assert_eq!(
        single_proof(&signed_document).created_o(),
        Some("2020-06-07T06:09:10Z")
    );

    // Without either, "created" is the current time.
    let signed_document = signing_suite_without_date()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &mock_loader(),
        )
        .await
        .expect("pass");
    let created = single_proof(&signed_document)
        .created_o()
        .expect("pass")
        .to_string();
    let created = time::OffsetDateTime::parse(
        &created,
        &time::format_description::well_known::Rfc3339,
    )
    .expect("pass");
    assert!((time::OffsetDateTime::now_utc() - created).whole_seconds().abs() < 60);
}

fn signing_suite_without_date() -> Ed25519Signature2018 {
    Ed25519Signature2018::new(Ed25519Signature2018Options::new().with_key(mock_key()))
}

#[tokio::test]
async fn test_existing_proofs_are_kept() {
    let document_loader = mock_loader();
    let proof_options = ProofOptions::new(ProofPurpose::AssertionMethod);
    let once_signed = signing_suite()
        .sign(&credential(), &proof_options, &document_loader)
        .await
        .expect("pass");
    let twice_signed = signing_suite_without_date()
        .sign(&once_signed, &proof_options, &document_loader)
        .await
        .expect("pass");
    let proof_v = twice_signed["proof"].as_array().expect("pass");
    assert_eq!(proof_v.len(), 2);
    assert_eq!(proof_v[0], once_signed["proof"]);

    let proof_set_result = ProofSet::verify(
        &twice_signed,
        &[&verifying_suite() as &dyn LinkedDataSignatureT],
        ProofPurpose::AssertionMethod,
        &document_loader,
    )
    .await;
    assert!(proof_set_result.verified);
    assert_eq!(proof_set_result.result_v.len(), 2);
    assert!(proof_set_result.result_v.iter().all(|result| result.verified));
}

#[tokio::test]
async fn test_tampered_document_does_not_verify() {
    let document_loader = mock_loader();
    let mut signed_document = signing_suite()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &document_loader,
        )
        .await
        .expect("pass");
    signed_document["credentialSubject"]["alumniOf"] = json!("Another University");

    let outcome = verifying_suite()
        .verify(
            &signed_document,
            &single_proof(&signed_document),
            ProofPurpose::AssertionMethod,
            &document_loader,
        )
        .await
        .expect("pass");
    assert!(!outcome.is_verified());
    assert!(matches!(outcome, VerifyOutcome::NotVerified(Error::SignatureMismatch(_))));

    let proof_set_result = ProofSet::verify(
        &signed_document,
        &[&verifying_suite() as &dyn LinkedDataSignatureT],
        ProofPurpose::AssertionMethod,
        &document_loader,
    )
    .await;
    assert!(!proof_set_result.verified);
    assert_eq!(proof_set_result.result_v.len(), 1);
    assert!(matches!(
        proof_set_result.result_v[0].error_o,
        Some(Error::SignatureMismatch(_))
    ));
}

#[tokio::test]
async fn test_configured_key_rejects_other_keys() {
    // The verification method resolves to a different public key than the suite's own key.
    let other_signing_key = ed25519_dalek::SigningKey::generate(&mut rand::rngs::OsRng);
    let other_key =
        Ed25519VerificationKey2018::from_signing_key(CONTROLLER.to_string(), &other_signing_key);
    let document_loader = mock_loader().with(
        other_key.id.clone(),
        serde_json::to_value(other_key.export_public()).expect("pass"),
    );
    let signed_document = Ed25519Signature2018::new(
        Ed25519Signature2018Options::new().with_key(other_key),
    )
    .sign(
        &credential(),
        &ProofOptions::new(ProofPurpose::AssertionMethod),
        &document_loader,
    )
    .await
    .expect("pass");
    let outcome = signing_suite()
        .verify(
            &signed_document,
            &single_proof(&signed_document),
            ProofPurpose::AssertionMethod,
            &document_loader,
        )
        .await
        .expect("pass");
    assert!(matches!(outcome, VerifyOutcome::NotVerified(Error::SignatureMismatch(_))));
}

#[tokio::test]
async fn test_proof_matching() {
    let document_loader = mock_loader();
    let signed_document = signing_suite()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &document_loader,
        )
        .await
        .expect("pass");
    let proof = single_proof(&signed_document);
    let suite = verifying_suite();
    assert!(suite.matches(&proof, &signed_document, ProofPurpose::AssertionMethod));
    assert!(!suite.matches(&proof, &signed_document, ProofPurpose::Authentication));

    // A proof of another type is not this suite's to verify.
    let mut foreign_proof = proof.clone();
    foreign_proof.set("type", "Ed25519Signature2020");
    assert!(!suite.matches(&foreign_proof, &signed_document, ProofPurpose::AssertionMethod));
    let outcome = suite
        .verify(
            &signed_document,
            &foreign_proof,
            ProofPurpose::AssertionMethod,
            &document_loader,
        )
        .await
        .expect("pass");
    assert!(matches!(outcome, VerifyOutcome::NotApplicable(Error::ProofMismatch(_))));

    let mut foreign_document = signed_document.clone();
    foreign_document["proof"] = foreign_proof.into_value();
    let proof_set_result = ProofSet::verify(
        &foreign_document,
        &[&suite as &dyn LinkedDataSignatureT],
        ProofPurpose::AssertionMethod,
        &document_loader,
    )
    .await;
    assert!(!proof_set_result.verified);
    assert!(proof_set_result.result_v.is_empty());
    assert_eq!(
        proof_set_result.error_o.expect("pass").to_string(),
        "Did not verify any proofs; insufficient proofs matched the acceptable suite(s) and required purpose(s)."
    );

    // Colliding contexts mean the suite doesn't claim the proof either.
    let mut colliding_document = signed_document.clone();
    colliding_document["@context"] = json!([
        CREDENTIALS_CONTEXT_V1_URL,
        ED25519_SIGNATURE_2018_CONTEXT_URL
    ]);
    assert!(!suite.matches(&proof, &colliding_document, ProofPurpose::AssertionMethod));
    let outcome = suite
        .verify(
            &colliding_document,
            &proof,
            ProofPurpose::AssertionMethod,
            &document_loader,
        )
        .await
        .expect("pass");
    assert!(matches!(outcome, VerifyOutcome::NotApplicable(Error::IncompatibleContext(_))));

    // A document with no compatible context at all.
    let mut bare_document = signed_document.clone();
    bare_document["@context"] = json!("https://example.com/other");
    let outcome = suite
        .verify(&bare_document, &proof, ProofPurpose::AssertionMethod, &document_loader)
        .await
        .expect("pass");
    assert!(matches!(outcome, VerifyOutcome::NotApplicable(Error::MissingContext(_))));
}

#[tokio::test]
async fn test_malformed_jws() {
    let document_loader = mock_loader();
    let signed_document = signing_suite()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &document_loader,
        )
        .await
        .expect("pass");
    let proof = single_proof(&signed_document);
    let suite = verifying_suite();

    for jws_value in [json!({"not": "a string"}), json!(""), json!("no-separators"), json!(42)] {
        let mut bad_proof = proof.clone();
        bad_proof.set("jws", jws_value);
        let error = suite
            .verify(&signed_document, &bad_proof, ProofPurpose::AssertionMethod, &document_loader)
            .await
            .expect_err("pass");
        assert!(matches!(error, Error::InvalidProofFormat(_)));
        assert_eq!(
            error.to_string(),
            "the proof does not include a valid signature property."
        );
    }

    let mut bad_proof = proof.clone();
    bad_proof.remove("jws");
    assert!(matches!(
        suite
            .verify(&signed_document, &bad_proof, ProofPurpose::AssertionMethod, &document_loader)
            .await,
        Err(Error::InvalidProofFormat(_))
    ));

    // A well-formed JWS with an encoded payload header: {"alg":"EdDSA"}.
    let mut bad_proof = proof.clone();
    let signature_base64 = proof.jws_o().expect("pass").split('.').nth(2).expect("pass");
    bad_proof.set("jws", format!("eyJhbGciOiJFZERTQSJ9..{}", signature_base64));
    let error = suite
        .verify(&signed_document, &bad_proof, ProofPurpose::AssertionMethod, &document_loader)
        .await
        .expect_err("pass");
    assert_eq!(
        error.to_string(),
        "Invalid JWS header parameters for Ed25519Signature2018."
    );

    // The right header, but with a payload attached instead of detached.
    let mut bad_proof = proof.clone();
    let header_base64 = proof.jws_o().expect("pass").split('.').next().expect("pass");
    bad_proof.set(
        "jws",
        format!("{}.eyJmb28iOiJiYXIifQ.{}", header_base64, signature_base64),
    );
    let error = suite
        .verify(&signed_document, &bad_proof, ProofPurpose::AssertionMethod, &document_loader)
        .await
        .expect_err("pass");
    assert!(matches!(error, Error::InvalidProofFormat(_)), "{:?}", error);
}

#[tokio::test]
async fn test_bridged_2020_key_verifies() {
    let bridged_key_id = format!("{}#{}", CONTROLLER, PUBLIC_KEY_MULTIBASE);
    let document_loader = mock_loader().with(
        bridged_key_id.clone(),
        json!({
            "@context": ED25519_SIGNATURE_2020_CONTEXT_URL,
            "id": bridged_key_id,
            "type": "Ed25519VerificationKey2020",
            "controller": CONTROLLER,
            "publicKeyMultibase": PUBLIC_KEY_MULTIBASE
        }),
    );
    let signed_document = Ed25519Signature2018::new(
        Ed25519Signature2018Options::new()
            .with_key(mock_key())
            .with_verification_method(bridged_key_id.clone()),
    )
    .sign(
        &credential(),
        &ProofOptions::new(ProofPurpose::AssertionMethod),
        &document_loader,
    )
    .await
    .expect("pass");

    let outcome = verifying_suite()
        .verify(
            &signed_document,
            &single_proof(&signed_document),
            ProofPurpose::AssertionMethod,
            &document_loader,
        )
        .await
        .expect("pass");
    match outcome {
        VerifyOutcome::Verified(canonical_key) => {
            assert_eq!(canonical_key.id, bridged_key_id);
            assert_eq!(canonical_key.r#type, "Ed25519VerificationKey2018");
            assert_eq!(canonical_key.public_key_base58.as_str(), PUBLIC_KEY_BASE58);
        }
        outcome => panic!("expected Verified, got {:?}", outcome),
    }
}

#[test]
fn test_public_key_multibase_rejections() {
    let public_key_multibase = PublicKeyMultibase::try_from(PUBLIC_KEY_MULTIBASE).expect("pass");
    let public_key_base58 = PublicKeyBase58::try_from(PUBLIC_KEY_BASE58).expect("pass");
    assert_eq!(
        public_key_multibase.decode().expect("pass"),
        public_key_base58.decode().expect("pass")
    );
    let raw_public_key = public_key_base58.decode().expect("pass");

    let with_header = |header: &[u8], body: &[u8]| {
        let mut byte_v = header.to_vec();
        byte_v.extend_from_slice(body);
        byte_v
    };
    let ed25519_header = [0xedu8, 0x01];

    // Right bytes, wrong base.
    for base in [multibase::Base::Base64, multibase::Base::Base16Lower, multibase::Base::Base58Flickr] {
        let text = multibase::encode(base, with_header(&ed25519_header, &raw_public_key));
        let error = PublicKeyMultibase::try_from(text.as_str()).expect_err("pass");
        assert!(matches!(error, Error::Malformed(_)), "{:?}", error);
    }

    // Not multibase at all.
    assert!(matches!(
        PublicKeyMultibase::try_from(""),
        Err(Error::Malformed(_))
    ));

    // Wrong multicodec header (x25519-pub, then secp256k1-pub).
    for header in [[0xecu8, 0x01], [0xe7, 0x01]] {
        let text = multibase::encode(
            multibase::Base::Base58Btc,
            with_header(&header, &raw_public_key),
        );
        let error = PublicKeyMultibase::try_from(text).expect_err("pass");
        assert!(matches!(error, Error::Malformed(_)), "{:?}", error);
    }

    // Ed25519 header, but a 31 or 33 byte body.
    for body in [&raw_public_key[..31], &with_header(&raw_public_key, &[0x00])[..]] {
        let text = multibase::encode(multibase::Base::Base58Btc, with_header(&ed25519_header, body));
        let error = PublicKeyMultibase::try_from(text).expect_err("pass");
        assert!(matches!(error, Error::Malformed(_)), "{:?}", error);
    }

    // Deserialization applies the same checks.
    let text = multibase::encode(
        multibase::Base::Base58Btc,
        with_header(&[0xe7u8, 0x01], &raw_public_key),
    );
    assert!(serde_json::from_value::<PublicKeyMultibase>(json!(text)).is_err());
    assert_eq!(
        serde_json::from_value::<PublicKeyMultibase>(json!(PUBLIC_KEY_MULTIBASE)).expect("pass"),
        public_key_multibase
    );
}

#[test]
fn test_key_classification() {
    let classify = |record: serde_json::Value| {
        ClassifiedKey::classify(VerificationMethod::from_value(&record).expect("pass")).expect("pass")
    };

    for context in [
        json!(ED25519_SIGNATURE_2018_CONTEXT_URL),
        json!([SECURITY_CONTEXT_V2_URL]),
        json!(["https://example.com/other", ED25519_SIGNATURE_2018_CONTEXT_URL]),
    ] {
        let mut record = key_record();
        record["@context"] = context;
        assert!(matches!(
            classify(record),
            ClassifiedKey::Ed25519VerificationKey2018(_)
        ));
    }

    // The 2020 type tag is only defined by its own context.
    let mut record = key_record();
    record["type"] = json!("Ed25519VerificationKey2020");
    record["@context"] = json!([SECURITY_CONTEXT_V2_URL]);
    assert!(matches!(classify(record), ClassifiedKey::Unrecognized(_)));

    let mut record = key_record();
    record["type"] = json!("Ed25519VerificationKey2020");
    record["@context"] = json!(ED25519_SIGNATURE_2020_CONTEXT_URL);
    record["publicKeyMultibase"] = json!(PUBLIC_KEY_MULTIBASE);
    assert!(matches!(
        classify(record),
        ClassifiedKey::Ed25519VerificationKey2020(_)
    ));

    // Key material is not looked at until normalization.
    let mut record = key_record();
    record["publicKeyBase58"] = json!("not base58 0OIl");
    let classified_key = classify(record);
    assert!(matches!(
        classified_key,
        ClassifiedKey::Ed25519VerificationKey2018(_)
    ));
    assert!(matches!(classified_key.normalize(), Err(Error::Malformed(_))));

    let mut record = key_record();
    record["type"] = json!("Ed25519VerificationKey2020");
    record["@context"] = json!(ED25519_SIGNATURE_2020_CONTEXT_URL);
    record["publicKeyMultibase"] = json!("zQ3shokFTS3brHcDQrn82RUDfCZESWL1ZdCEJwekUDPQiYBme");
    assert!(matches!(classify(record).normalize(), Err(Error::Malformed(_))));
}

#[tokio::test]
async fn test_unusable_verification_methods() {
    let base_loader = mock_loader();
    let signed_document = signing_suite()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &base_loader,
        )
        .await
        .expect("pass");
    let proof = &single_proof(&signed_document);
    let suite = &verifying_suite();
    let signed_document = &signed_document;
    let verify_with_record = move |record: serde_json::Value| {
        let document_loader = mock_loader().with(KEY_ID, record);
        async move {
            suite
                .verify(signed_document, proof, ProofPurpose::AssertionMethod, &document_loader)
                .await
        }
    };

    // A 2020 type tag under the 2018 context is a spoof.
    let mut record = key_record();
    record["type"] = json!("Ed25519VerificationKey2020");
    assert!(matches!(
        verify_with_record(record).await,
        Err(Error::InvalidKeyType(_))
    ));

    // A 2018 type tag under only the 2020 context is also a spoof.
    let mut record = key_record();
    record["@context"] = json!(ED25519_SIGNATURE_2020_CONTEXT_URL);
    assert!(matches!(
        verify_with_record(record).await,
        Err(Error::InvalidKeyType(_))
    ));

    // The security context also describes 2018 keys.
    let mut record = key_record();
    record["@context"] = json!([SECURITY_CONTEXT_V2_URL]);
    assert!(verify_with_record(record).await.expect("pass").is_verified());

    let mut record = key_record();
    record["type"] = json!("JsonWebKey2020");
    assert!(matches!(
        verify_with_record(record).await,
        Err(Error::InvalidKeyType(_))
    ));

    let mut record = key_record();
    record.as_object_mut().expect("pass").remove("@context");
    assert!(matches!(
        verify_with_record(record).await,
        Err(Error::MissingContext(_))
    ));

    let mut record = key_record();
    record["revoked"] = json!("2011-01-01T00:00:00Z");
    let error = verify_with_record(record).await.expect_err("pass");
    assert!(matches!(error, Error::RevokedKey(_)));

    // Any non-null "revoked" value counts, not just a timestamp.
    let mut record = key_record();
    record["revoked"] = json!(true);
    let error = verify_with_record(record).await.expect_err("pass");
    assert!(matches!(error, Error::RevokedKey(_)), "{:?}", error);

    // Keys of other types are rejected by type, whatever their key encoding.
    let mut secp256k1_public_key = [0x11u8; 33];
    secp256k1_public_key[0] = 0x02;
    let secp256k1_record = json!({
        "@context": SECURITY_CONTEXT_V2_URL,
        "id": KEY_ID,
        "type": "EcdsaSecp256k1VerificationKey2019",
        "controller": CONTROLLER,
        "publicKeyBase58": multibase::Base::Base58Btc.encode(secp256k1_public_key)
    });
    let error = verify_with_record(secp256k1_record).await.expect_err("pass");
    assert!(matches!(error, Error::InvalidKeyType(_)), "{:?}", error);

    // A P-256 Multikey (multicodec header 0x1200, compressed point).
    let mut p256_multikey_byte_v = vec![0x80, 0x24, 0x03];
    p256_multikey_byte_v.extend_from_slice(&[0x22u8; 32]);
    let p256_record = json!({
        "@context": "https://w3id.org/security/multikey/v1",
        "id": KEY_ID,
        "type": "Multikey",
        "controller": CONTROLLER,
        "publicKeyMultibase": multibase::encode(multibase::Base::Base58Btc, p256_multikey_byte_v)
    });
    let error = verify_with_record(p256_record).await.expect_err("pass");
    assert!(matches!(error, Error::InvalidKeyType(_)), "{:?}", error);

    // Once a record does classify as Ed25519, its key material must decode.
    let mut record = key_record();
    record["publicKeyBase58"] = json!(multibase::Base::Base58Btc.encode(secp256k1_public_key));
    let error = verify_with_record(record).await.expect_err("pass");
    assert!(matches!(error, Error::Malformed(_)), "{:?}", error);

    // Nothing at the verification method URL.
    let document_loader = StaticDocumentLoader::new().with_suite_context();
    assert!(matches!(
        suite
            .verify(signed_document, proof, ProofPurpose::AssertionMethod, &document_loader)
            .await,
        Err(Error::VerificationMethodNotFound(_))
    ));
}

#[tokio::test]
async fn test_verification_method_embedded_in_controller_document() {
    // The key is served only as part of the controller document, reached through the fragment-less
    // URL, and takes its context from the controller document.
    let embedded_key_id = format!("{}#key-1", CONTROLLER);
    let controller_document = json!({
        "@context": [SECURITY_CONTEXT_V2_URL],
        "id": CONTROLLER,
        "verificationMethod": [{
            "id": embedded_key_id,
            "type": "Ed25519VerificationKey2018",
            "controller": CONTROLLER,
            "publicKeyBase58": PUBLIC_KEY_BASE58
        }],
        "assertionMethod": [embedded_key_id]
    });
    let document_loader = StaticDocumentLoader::new()
        .with(CONTROLLER, controller_document.clone())
        .with(embedded_key_id.clone(), controller_document);
    let signed_document = Ed25519Signature2018::new(
        Ed25519Signature2018Options::new()
            .with_key(mock_key())
            .with_verification_method(embedded_key_id.clone()),
    )
    .sign(
        &credential(),
        &ProofOptions::new(ProofPurpose::AssertionMethod),
        &document_loader,
    )
    .await
    .expect("pass");

    let proof_set_result = ProofSet::verify(
        &signed_document,
        &[&verifying_suite() as &dyn LinkedDataSignatureT],
        ProofPurpose::AssertionMethod,
        &document_loader,
    )
    .await;
    assert!(proof_set_result.verified);
    let canonical_key = proof_set_result.result_v[0]
        .verification_method_o
        .as_ref()
        .expect("pass");
    assert_eq!(canonical_key.id, embedded_key_id);
    assert_eq!(canonical_key.context_o, Some(json!([SECURITY_CONTEXT_V2_URL])));
}

#[tokio::test]
async fn test_controller_must_authorize_proof_purpose() {
    // The signature is valid, but the controller doesn't list the key under assertionMethod.
    let document_loader = mock_loader().with(CONTROLLER, controller_document(&[]));
    let signed_document = signing_suite()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &document_loader,
        )
        .await
        .expect("pass");
    let proof_set_result = ProofSet::verify(
        &signed_document,
        &[&verifying_suite() as &dyn LinkedDataSignatureT],
        ProofPurpose::AssertionMethod,
        &document_loader,
    )
    .await;
    assert!(!proof_set_result.verified);
    assert_eq!(proof_set_result.result_v.len(), 1);
    assert!(proof_set_result.result_v[0].verification_method_o.is_some());
    assert!(matches!(
        proof_set_result.result_v[0].error_o,
        Some(Error::InvalidProofPurpose(_))
    ));
}

#[tokio::test]
async fn test_string_documents_are_parsed() {
    let document_loader = mock_loader().with(
        KEY_ID,
        serde_json::Value::String(serde_json::to_string(&key_record()).expect("pass")),
    );
    let signed_document = signing_suite()
        .sign(
            &credential(),
            &ProofOptions::new(ProofPurpose::AssertionMethod),
            &document_loader,
        )
        .await
        .expect("pass");
    let outcome = verifying_suite()
        .verify(
            &signed_document,
            &single_proof(&signed_document),
            ProofPurpose::AssertionMethod,
            &document_loader,
        )
        .await
        .expect("pass");
    assert!(outcome.is_verified());
}

#[test]
fn test_options_from_json() {
    let options: Ed25519Signature2018Options = serde_json::from_value(json!({
        "verificationMethod": KEY_ID,
        "date": "2010-01-01T19:23:24Z",
        "useNativeCanonize": true,
        "proof": {"domain": "example.edu"}
    }))
    .expect("pass");
    assert_eq!(options.verification_method_o.as_deref(), Some(KEY_ID));
    assert_eq!(
        options.date_o,
        Some(time::macros::datetime!(2010-01-01 19:23:24 UTC))
    );
    assert!(options.use_native_canonize);
    assert_eq!(
        options.proof_template_o.as_ref().and_then(|proof| proof.get("domain")),
        Some(&json!("example.edu"))
    );
    assert!(options.key_o.is_none());
    assert!(options.signer_o.is_none());

    let options: Ed25519Signature2018Options = serde_json::from_value(json!({})).expect("pass");
    assert!(options.date_o.is_none());
    assert!(!options.use_native_canonize);
}

#[test]
fn test_proof_purpose_strings() {
    for proof_purpose in ProofPurpose::VARIANTS {
        let s = proof_purpose.to_string();
        assert_eq!(s.parse::<ProofPurpose>().expect("pass"), proof_purpose);
        assert_eq!(
            serde_json::to_value(proof_purpose).expect("pass"),
            json!(proof_purpose.as_str())
        );
    }
    assert!(matches!(
        "keyAgreement".parse::<ProofPurpose>(),
        Err(Error::InvalidProofPurpose(_))
    ));
}
