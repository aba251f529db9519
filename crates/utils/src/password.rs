//! Salted password hashing for user accounts.

use sha2::{Digest, Sha256};

const SALT: &[u8] = b"agri-admin-credential-salt:";

/// Hash a password with the fixed application salt, hex-encoded.
pub fn hash_password(password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(SALT);
    hasher.update(password.as_bytes());
    let digest = hasher.finalize();
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

pub fn verify_password(password: &str, password_hash: &str) -> bool {
    hash_password(password) == password_hash
}
