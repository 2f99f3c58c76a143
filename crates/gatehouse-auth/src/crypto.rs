//! Authenticated encryption of credential bundles at rest in the cache.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use chacha20poly1305::aead::{Aead, AeadCore, OsRng};
use chacha20poly1305::{ChaCha20Poly1305, Key, KeyInit, Nonce};

use gatehouse_core::error::AppError;
use gatehouse_core::result::AppResult;

/// Nonce length for ChaCha20-Poly1305.
const NONCE_LEN: usize = 12;

/// Symmetric cipher for credential bundles.
///
/// Blob layout is `[ciphertext || nonce]` with the 12-byte nonce at the
/// end, base64-encoded. Decryption authenticates the ciphertext, so a
/// wrong key or tampered blob fails cleanly instead of yielding garbage.
#[derive(Clone)]
pub struct SessionCipher {
    cipher: ChaCha20Poly1305,
}

impl std::fmt::Debug for SessionCipher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionCipher").finish_non_exhaustive()
    }
}

impl SessionCipher {
    /// Build a cipher from a base64-encoded 32-byte key.
    pub fn from_base64_key(encoded: &str) -> AppResult<Self> {
        let bytes = STANDARD.decode(encoded).map_err(|e| {
            AppError::configuration(format!("Session encryption key is not valid base64: {e}"))
        })?;

        if bytes.len() != 32 {
            return Err(AppError::configuration(format!(
                "Session encryption key must be 32 bytes, got {}",
                bytes.len()
            )));
        }

        Ok(Self {
            cipher: ChaCha20Poly1305::new(Key::from_slice(&bytes)),
        })
    }

    /// Generate a fresh base64-encoded 32-byte key.
    pub fn generate_key() -> String {
        let key = ChaCha20Poly1305::generate_key(&mut OsRng);
        STANDARD.encode(key)
    }

    /// Encrypt a plaintext into a base64 `[ciphertext || nonce]` blob.
    pub fn encrypt(&self, plaintext: &[u8]) -> AppResult<String> {
        let nonce = ChaCha20Poly1305::generate_nonce(&mut OsRng);
        let mut blob = self
            .cipher
            .encrypt(&nonce, plaintext)
            .map_err(|_| AppError::crypto("Failed to encrypt credential bundle"))?;
        blob.extend_from_slice(&nonce);
        Ok(STANDARD.encode(blob))
    }

    /// Decrypt a base64 `[ciphertext || nonce]` blob.
    pub fn decrypt(&self, blob: &str) -> AppResult<Vec<u8>> {
        let bytes = STANDARD
            .decode(blob)
            .map_err(|e| AppError::crypto(format!("Encrypted blob is not valid base64: {e}")))?;

        if bytes.len() < NONCE_LEN {
            return Err(AppError::crypto("Encrypted blob too short"));
        }

        let (ciphertext, nonce) = bytes.split_at(bytes.len() - NONCE_LEN);
        self.cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| AppError::crypto("Credential bundle failed authentication"))
    }
}
