use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

pub const MIN_PASSWORD_LEN: usize = 8;
/// Longest accepted password, in chars.
pub const MAX_PASSWORD_LEN: usize = 128;

/// Signup password policy. Returns the message shown to the client.
pub fn validate_password(plain: &str) -> Result<(), &'static str> {
    let chars = plain.chars().count();
    if chars < MIN_PASSWORD_LEN {
        return Err("Password too short");
    }
    if chars > MAX_PASSWORD_LEN {
        return Err("Password too long");
    }
    if plain.trim().is_empty() {
        return Err("Password must not be blank");
    }
    Ok(())
}

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

pub fn verify_password(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}
