use crate::{DocumentLoaderT, Error, Result};

/// Turns a JSON-LD document into the exact bytes that get hashed for signing.
#[async_trait::async_trait]
pub trait CanonicalizerT: Send + Sync {
    async fn canonicalize(
        &self,
        input: &serde_json::Value,
        use_native_canonize: bool,
        document_loader: &dyn DocumentLoaderT,
    ) -> Result<Vec<u8>>;
}

/// JSON Canonicalization Scheme (RFC 8785).  It operates on the JSON structure alone, so it never
/// consults the document loader and has no native variant.
#[derive(Clone, Copy, Debug, Default)]
pub struct JCSCanonicalizer;

#[async_trait::async_trait]
impl CanonicalizerT for JCSCanonicalizer {
    async fn canonicalize(
        &self,
        input: &serde_json::Value,
        _use_native_canonize: bool,
        _document_loader: &dyn DocumentLoaderT,
    ) -> Result<Vec<u8>> {
        serde_json_canonicalizer::to_vec(input)
            .map_err(|e| Error::Canonicalization(e.to_string().into()))
    }
}
