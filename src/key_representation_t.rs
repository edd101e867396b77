use crate::Result;

/// A wire encoding of a raw 32-byte Ed25519 public key.  Converting between encodings is a decode
/// followed by an encode; the key itself is never re-derived.
pub trait KeyRepresentationT: Sized {
    fn decode(&self) -> Result<[u8; 32]>;
    fn encode(raw_public_key: &[u8; 32]) -> Self;
    fn transcode<Target: KeyRepresentationT>(&self) -> Result<Target> {
        Ok(Target::encode(&self.decode()?))
    }
}
