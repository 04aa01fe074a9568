use aegis::aegis256::Aegis256;

use super::{AeadLayer, CipherError, check_len};

/// Layer 2: AEGIS-256, the 256-bit-key AES-round-based AEAD.
///
/// Uses the 32-byte tag variant for the extra authentication margin the
/// cascade's layer-independence argument relies on.
pub struct Aegis256Layer;

impl AeadLayer for Aegis256Layer {
    const KEY_LEN: usize = 32;
    const NONCE_LEN: usize = 32;
    const TAG_LEN: usize = 32;
    const NAME: &'static str = "AEGIS-256";

    fn encrypt(
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        check_len(key, Self::KEY_LEN, CipherError::InvalidKeyLength)?;
        check_len(nonce, Self::NONCE_LEN, CipherError::InvalidNonceLength)?;

        let key: [u8; 32] = key.try_into().map_err(|_| CipherError::InvalidKeyLength)?;
        let nonce: [u8; 32] = nonce
            .try_into()
            .map_err(|_| CipherError::InvalidNonceLength)?;

        let mut ciphertext = vec![0u8; plaintext.len()];
        let tag: [u8; 32] =
            Aegis256::<32>::new(&key, &nonce).encrypt(&mut ciphertext, plaintext, aad);
        Ok((ciphertext, tag.to_vec()))
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

        let key: [u8; 32] = key.try_into().map_err(|_| CipherError::InvalidKeyLength)?;
        let nonce: [u8; 32] = nonce
            .try_into()
            .map_err(|_| CipherError::InvalidNonceLength)?;
        let tag: [u8; 32] = tag.try_into().map_err(|_| CipherError::InvalidTagLength)?;

        let mut plaintext = vec![0u8; ciphertext.len()];
        Aegis256::<32>::new(&key, &nonce)
            .decrypt(&mut plaintext, ciphertext, &tag, aad)
            .map_err(|_| CipherError::AuthenticationFailed)?;
        Ok(plaintext)
    }
}
