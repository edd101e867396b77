use crate::{Error, Result};

/// Outcome of checking a document's context set against a suite's compatibility rules.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContextVerdict {
    Compatible,
    /// Both contexts of a collision rule are declared.  Each defines the same terms differently, so
    /// the document can't be interpreted unambiguously.
    Incompatible {
        specific_context_url: String,
        generic_context_url: String,
    },
    /// None of the suite's compatible contexts are declared.
    Absent,
}

impl ContextVerdict {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Self::Compatible)
    }
    pub fn into_result(self) -> Result<()> {
        match self {
            Self::Compatible => Ok(()),
            Self::Incompatible {
                specific_context_url,
                generic_context_url,
            } => Err(Error::IncompatibleContext(
                format!(
                    "the {:?} and {:?} contexts are incompatible; the {:?} context alone is sufficient",
                    specific_context_url, generic_context_url, generic_context_url
                )
                .into(),
            )),
            Self::Absent => Err(Error::MissingContext(
                "the document does not declare any context compatible with this signature suite"
                    .into(),
            )),
        }
    }
}
