mod error;
mod jose_algorithm_t;
mod jws;
mod jws_header;
mod jws_payload_encoding;
mod jws_payload_presence;
mod unsigned_jws;

pub use crate::{
    error::Error, jose_algorithm_t::JOSEAlgorithmT, jws::JWS, jws_header::JWSHeader,
    jws_payload_encoding::JWSPayloadEncoding, jws_payload_presence::JWSPayloadPresence,
    unsigned_jws::UnsignedJWS,
};
pub type Result<T> = std::result::Result<T, Error>;
