use std::borrow::Cow;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Malformed JWS: {0}")]
    Malformed(Cow<'static, str>),
    #[error("Unsupported JWS: {0}")]
    Unsupported(Cow<'static, str>),
    #[error("JWS signing failed: {0}")]
    SigningFailed(Cow<'static, str>),
    #[error("JWS failed to verify: {0}")]
    VerificationFailed(Cow<'static, str>),
    #[error("I/O error while processing JWS: {0}")]
    IO(#[from] std::io::Error),
}

impl Error {
    /// True if this error means the signature itself did not check out, as opposed to the JWS
    /// being malformed or unsupported.
    pub fn is_verification_failure(&self) -> bool {
        matches!(self, Self::VerificationFailed(_))
    }
}

/// Returns early with an Error::Malformed built from the format args if the condition is not met.
#[macro_export]
macro_rules! require {
    ($condition: expr, $msg: literal) => {
        if !$condition {
            return Err($crate::Error::Malformed($msg.into()));
        }
    };
    ($condition: expr, $format_str: literal, $($arg:tt)*) => {
        if !$condition {
            return Err($crate::Error::Malformed(format!($format_str, $($arg)*).into()));
        }
    };
}
