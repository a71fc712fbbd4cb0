//! UUID identifiers drawn from a caller-supplied random source.
//!
//! The stage never consults OS entropy or the clock; seeding the source
//! reproduces the identifier sequence exactly.
use rand::RngCore;
use uuid::Builder;

/// Value of `objectIdentifierType` for every generated identifier.
pub const IDENTIFIER_TYPE: &str = "UUID";

#[derive(Debug)]
pub struct IdentifierSource<R> {
    rng: R,
}

impl<R: RngCore> IdentifierSource<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Next version-4 UUID in lowercase hyphenated form.
    pub fn next_identifier(&mut self) -> String {
        let mut bytes = [0u8; 16];
        self.rng.fill_bytes(&mut bytes);
        Builder::from_random_bytes(bytes)
            .into_uuid()
            .hyphenated()
            .to_string()
    }
}
