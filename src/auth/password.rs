use bcrypt::{BcryptError, hash, verify};
use sha2::{Digest, Sha256};

// bcrypt only reads the first 72 bytes, so the whole secret is digested first
fn prehash(password: &str) -> String {
    format!("{:x}", Sha256::digest(password.as_bytes()))
}

pub fn hash_password(password: &str, cost: u32) -> Result<String, BcryptError> {
    hash(prehash(password), cost)
}

pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, BcryptError> {
    verify(prehash(password), password_hash)
}
