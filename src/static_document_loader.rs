use crate::{
    DocumentLoaderT, Error, RemoteDocument, Result, ED25519_SIGNATURE_2018_CONTEXT_URL,
    SUITE_CONTEXT,
};
use std::collections::HashMap;

/// DocumentLoaderT over a fixed, in-memory set of documents.  Never touches the network.
#[derive(Clone, Debug, Default)]
pub struct StaticDocumentLoader {
    document_m: HashMap<String, serde_json::Value>,
}

impl StaticDocumentLoader {
    pub fn new() -> Self {
        Self::default()
    }
    /// Builder-pattern method for adding a document.
    pub fn with(mut self, url: impl Into<String>, document: serde_json::Value) -> Self {
        self.insert(url, document);
        self
    }
    /// Adds the bundled Ed25519Signature2018 context.
    pub fn with_suite_context(self) -> Self {
        self.with(ED25519_SIGNATURE_2018_CONTEXT_URL, SUITE_CONTEXT.clone())
    }
    pub fn insert(&mut self, url: impl Into<String>, document: serde_json::Value) {
        self.document_m.insert(url.into(), document);
    }
}

#[async_trait::async_trait]
impl DocumentLoaderT for StaticDocumentLoader {
    async fn load(&self, url: &str) -> Result<RemoteDocument> {
        tracing::trace!("StaticDocumentLoader::load; url: {:?}", url);
        let document = self
            .document_m
            .get(url)
            .ok_or_else(|| Error::DocumentNotFound(url.to_string().into()))?;
        Ok(RemoteDocument::new(url, document.clone()))
    }
}
