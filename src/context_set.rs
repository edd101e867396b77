/// The context identifiers a JSON-LD document declares in its "@context" member, in declaration
/// order.  Inline context objects carry no identifier and are not included.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct ContextSet(Vec<String>);

impl ContextSet {
    /// Collects the identifiers from an "@context" value, which may be a single identifier or a
    /// sequence mixing identifiers and inline objects.
    pub fn from_context_value(context: &serde_json::Value) -> Self {
        match context {
            serde_json::Value::String(url) => Self(vec![url.clone()]),
            serde_json::Value::Array(entry_v) => Self(
                entry_v
                    .iter()
                    .filter_map(|entry| entry.as_str().map(str::to_string))
                    .collect(),
            ),
            _ => Self::default(),
        }
    }
    /// The context set of a document.  A document without "@context" has an empty set.
    pub fn of_document(document: &serde_json::Value) -> Self {
        document
            .get("@context")
            .map(Self::from_context_value)
            .unwrap_or_default()
    }
    pub fn contains(&self, url: &str) -> bool {
        self.0.iter().any(|declared| declared == url)
    }
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}
