use rand::{Rng, distributions::Alphanumeric, thread_rng};
use sha2::{Digest, Sha256};

const TOKEN_PREFIX: &str = "tr_";
const TOKEN_LENGTH: usize = 32;

/// Generate a new bearer token. The raw value is shown to the caller
/// once and never stored.
#[must_use]
pub fn generate_token() -> String {
    let secret: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect();

    format!("{TOKEN_PREFIX}{secret}")
}

/// Hash a bearer token for storage and lookup.
#[must_use]
pub fn hash_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}
