use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};
use thiserror::Error;
use tracing::instrument;
use crate::config::PasswordConfig;

#[derive(Debug, Clone, Error)]
pub enum PasswordError {
    #[error("invalid argon2 parameters: {0}")]
    Params(String),
    #[error("password hashing failed: {0}")]
    Hash(String),
    #[error("hashing task failed: {0}")]
    Task(String),
}

/// Argon2id hasher. Hashing runs on the blocking pool since it is deliberately slow.
#[derive(Clone)]
pub struct Passwords {
    argon2: Argon2<'static>,
    // Verified against when an email is unknown, so that case costs the same
    // as a wrong password.
    dummy_hash: String,
}

impl Passwords {
    pub fn new(config: &PasswordConfig) -> Result<Self, PasswordError> {
        let params = Params::new(config.memory_kib, config.iterations, config.parallelism, None)
            .map_err(|e| PasswordError::Params(e.to_string()))?;
        let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);
        let dummy_hash = hash_with(&argon2, "placeholder password")?;
        Ok(Self { argon2, dummy_hash })
    }

    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }

    #[instrument(skip_all)]
    pub async fn hash(&self, password: String) -> Result<String, PasswordError> {
        let argon2 = self.argon2.clone();
        tokio::task::spawn_blocking(move || hash_with(&argon2, &password))
            .await
            .map_err(|e| PasswordError::Task(e.to_string()))?
    }

    /// `false` for a wrong password and for a malformed stored hash alike.
    #[instrument(skip_all)]
    pub async fn verify(&self, password: String, stored_hash: String) -> Result<bool, PasswordError> {
        let argon2 = self.argon2.clone();
        tokio::task::spawn_blocking(move || match PasswordHash::new(&stored_hash) {
            Ok(parsed) => argon2.verify_password(password.as_bytes(), &parsed).is_ok(),
            Err(_) => false,
        })
        .await
        .map_err(|e| PasswordError::Task(e.to_string()))
    }
}

fn hash_with(argon2: &Argon2<'_>, password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

#[cfg(test)]
pub(crate) fn test_passwords() -> Passwords {
    let cheap = PasswordConfig { memory_kib: 64, iterations: 1, parallelism: 1 };
    Passwords::new(&cheap).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let passwords = test_passwords();
        let hash = passwords.hash("correct horse".to_string()).await.unwrap();

        assert!(hash.starts_with("$argon2id$"));
        assert!(passwords.verify("correct horse".to_string(), hash.clone()).await.unwrap());
        assert!(!passwords.verify("wrong horse".to_string(), hash).await.unwrap());
        assert!(!passwords.verify("correct horse".to_string(), "not-a-hash".to_string()).await.unwrap());
    }

    #[test]
    fn test_rejects_impossible_params() {
        let config = PasswordConfig { memory_kib: 1, iterations: 0, parallelism: 1 };
        assert!(matches!(Passwords::new(&config), Err(PasswordError::Params(_))));
    }
}
