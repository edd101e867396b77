use crate::{CanonicalKey, Error};

/// Result of a suite verifying one proof.
#[derive(Debug)]
pub enum VerifyOutcome {
    /// The suite does not claim the proof (wrong type, wrong purpose, or unusable contexts), so the
    /// caller may try another suite.  The error says why.
    NotApplicable(Error),
    /// The signature verified against the given key.
    Verified(CanonicalKey),
    /// The suite claimed the proof but its signature did not verify.
    NotVerified(Error),
}

impl VerifyOutcome {
    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified(_))
    }
    pub fn error_o(&self) -> Option<&Error> {
        match self {
            Self::NotApplicable(error) | Self::NotVerified(error) => Some(error),
            Self::Verified(_) => None,
        }
    }
}
