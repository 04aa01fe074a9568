use aes_gcm::aead::{Aead, Payload};
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};

use super::{AeadLayer, CipherError, check_len};

/// Layer 1: AES-256-GCM.
pub struct AesGcmLayer;

impl AeadLayer for AesGcmLayer {
    const KEY_LEN: usize = 32;
    const NONCE_LEN: usize = 12;
    const TAG_LEN: usize = 16;
    const NAME: &'static str = "AES-256-GCM";

    fn encrypt(
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        check_len(key, Self::KEY_LEN, CipherError::InvalidKeyLength)?;
        check_len(nonce, Self::NONCE_LEN, CipherError::InvalidNonceLength)?;

        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::Internal)?;
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

        let cipher = Aes256Gcm::new_from_slice(key).map_err(|_| CipherError::Internal)?;
        let nonce = Nonce::from_slice(nonce);
        let mut combined = Vec::with_capacity(ciphertext.len() + tag.len());
        combined.extend_from_slice(ciphertext);
        combined.extend_from_slice(tag);

        cipher
            .decrypt(nonce, Payload { msg: &combined, aad })
            .map_err(|_| CipherError::AuthenticationFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let key = [7u8; AesGcmLayer::KEY_LEN];
        let nonce = [3u8; AesGcmLayer::NONCE_LEN];
        let aad = b"path/to/file";
        let plaintext = b"hello, cascade";

        let (ct, tag) = AesGcmLayer::encrypt(&key, &nonce, plaintext, aad).unwrap();
        let pt = AesGcmLayer::decrypt(&key, &nonce, &ct, &tag, aad).unwrap();
        assert_eq!(pt, plaintext);
    }

    #[test]
    fn tamper_detected() {
        let key = [7u8; AesGcmLayer::KEY_LEN];
        let nonce = [3u8; AesGcmLayer::NONCE_LEN];
        let aad = b"path";
        let plaintext = b"hello";

        let (mut ct, tag) = AesGcmLayer::encrypt(&key, &nonce, plaintext, aad).unwrap();
        ct[0] ^= 1;
        let err = AesGcmLayer::decrypt(&key, &nonce, &ct, &tag, aad).unwrap_err();
        assert!(matches!(err, CipherError::AuthenticationFailed));
    }
}
