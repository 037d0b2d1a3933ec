// web-server/src/utils/token.rs
use std::time::{SystemTime, UNIX_EPOCH};

use rand::distributions::{Alphanumeric, DistString};
use sha2::{Digest, Sha256};

const TOKEN_ENTROPY_CHARS: usize = 32;

/// Opaque session identifier for the session cookie: hex SHA-256 over the
/// current time and a random alphanumeric nonce.
pub fn create_session_token() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let nonce = Alphanumeric.sample_string(&mut rand::thread_rng(), TOKEN_ENTROPY_CHARS);

    let digest = Sha256::new()
        .chain_update(nanos.to_be_bytes())
        .chain_update(nonce.as_bytes())
        .finalize();
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_session_token_is_hex_digest() {
        let token = create_session_token();
        assert_eq!(token.len(), 64);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_session_tokens_do_not_repeat() {
        let tokens: HashSet<String> = (0..64).map(|_| create_session_token()).collect();
        assert_eq!(tokens.len(), 64);
    }
}
