use crate::{Error, Result};

/// A document as retrieved by a DocumentLoaderT.
#[derive(Clone, Debug)]
pub struct RemoteDocument {
    pub document_url: String,
    /// Either a JSON value, or the JSON text of the document as a string.
    pub document: serde_json::Value,
}

impl RemoteDocument {
    pub fn new(document_url: impl Into<String>, document: serde_json::Value) -> Self {
        Self {
            document_url: document_url.into(),
            document,
        }
    }
    /// The document as JSON, parsing it first if it was delivered as JSON text.
    pub fn into_json(self) -> Result<serde_json::Value> {
        match self.document {
            serde_json::Value::String(text) => serde_json::from_str(&text).map_err(|e| {
                Error::Malformed(
                    format!("document at {:?} is not valid JSON: {}", self.document_url, e).into(),
                )
            }),
            document => Ok(document),
        }
    }
}

/// Retrieves JSON-LD documents (contexts, controller documents, verification methods) by URL.
#[async_trait::async_trait]
pub trait DocumentLoaderT: Send + Sync {
    /// Fails with Error::DocumentNotFound if nothing is known at the URL.
    async fn load(&self, url: &str) -> Result<RemoteDocument>;
}
