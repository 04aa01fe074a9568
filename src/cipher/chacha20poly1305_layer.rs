use chacha20poly1305::aead::{Aead, Payload};
use chacha20poly1305::{ChaCha20Poly1305, KeyInit, Nonce};

use super::{AeadLayer, CipherError, check_len};

/// Layer 6: ChaCha20-Poly1305 (96-bit nonce, not an extended-nonce variant).
pub struct ChaCha20Poly1305Layer;

impl AeadLayer for ChaCha20Poly1305Layer {
    const KEY_LEN: usize = 32;
    const NONCE_LEN: usize = 12;
    const TAG_LEN: usize = 16;
    const NAME: &'static str = "ChaCha20-Poly1305";

    fn encrypt(
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        check_len(key, Self::KEY_LEN, CipherError::InvalidKeyLength)?;
        check_len(nonce, Self::NONCE_LEN, CipherError::InvalidNonceLength)?;

        let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| CipherError::Internal)?;
        let nonce = Nonce::from_slice(nonce);
        let mut combined = cipher
            .encrypt(nonce, Payload { msg: plaintext, aad })
            .map_err(|_| CipherError::Internal)?;
        let tag = combined.split_off(combined.len() - Self::TAG_LEN);
        Ok((combined, tag))
    }

    fn decrypt(
        key: &[u8],
        nonce: &[u8],
        ciphertext: &[u8],
        tag: &[u8],
        aad: &[u8],
    ) -> Result<Vec<u8>, CipherError> {
        check_len(key, Self::KEY_LEN, CipherError::InvalidKeyLength)?;
        check_len(nonce, Self::NONCE_LEN, CipherError::InvalidNonceLength)?;
        check_len(tag, Self::TAG_LEN, CipherError::InvalidTagLength)?;

        let cipher = ChaCha20Poly1305::new_from_slice(key).map_err(|_| CipherError::Internal)?;
        let nonce = Nonce::from_slice(nonce);
        let mut combined = Vec::with_capacity(ciphertext.len() + tag.len());
        combined.extend_from_slice(ciphertext);
        combined.extend_from_slice(tag);

        cipher
            .decrypt(nonce, Payload { msg: &combined, aad })
            .map_err(|_| CipherError::AuthenticationFailed)
    }
}
