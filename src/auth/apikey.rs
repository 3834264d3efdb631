use bcrypt::{hash, verify, DEFAULT_COST};
use rand::Rng;

use crate::error::Result;

const API_KEY_BYTES: usize = 20;

/// Generate a fresh device API key as lowercase hex. Only the bcrypt hash is
/// stored, so the caller must hand the plaintext to the device immediately.
pub fn generate_api_key() -> String {
    let mut bytes = [0u8; API_KEY_BYTES];
    rand::thread_rng().fill(&mut bytes[..]);

    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn hash_api_key(api_key: &str) -> Result<String> {
    Ok(hash(api_key, DEFAULT_COST)?)
}

pub fn verify_api_key(api_key: &str, api_key_hash: &str) -> Result<bool> {
    Ok(verify(api_key, api_key_hash)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_keys_are_hex_and_unique() {
        let key1 = generate_api_key();
        let key2 = generate_api_key();

        assert_eq!(key1.len(), API_KEY_BYTES * 2);
        assert!(key1.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(key1, key2);
    }

    #[test]
    fn test_hash_and_verify_api_key() {
        let api_key = generate_api_key();
        let hashed = hash_api_key(&api_key).unwrap();

        assert!(verify_api_key(&api_key, &hashed).unwrap());
        assert!(!verify_api_key("not-the-key", &hashed).unwrap());
    }
}
