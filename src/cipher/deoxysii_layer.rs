use deoxysii::{DeoxysII, KEY_SIZE, NONCE_SIZE, TAG_SIZE};

use super::{AeadLayer, CipherError, check_len};

/// Layer 4: Deoxys-II-256-128, the TWEAKEY-framework AEAD built on the AES
/// round function.
pub struct DeoxysIiLayer;

impl AeadLayer for DeoxysIiLayer {
    const KEY_LEN: usize = KEY_SIZE;
    const NONCE_LEN: usize = NONCE_SIZE;
    const TAG_LEN: usize = TAG_SIZE;
    const NAME: &'static str = "Deoxys-II-256";

    fn encrypt(
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        check_len(key, Self::KEY_LEN, CipherError::InvalidKeyLength)?;
        check_len(nonce, Self::NONCE_LEN, CipherError::InvalidNonceLength)?;

        let key: [u8; KEY_SIZE] = key.try_into().map_err(|_| CipherError::InvalidKeyLength)?;
        let nonce: [u8; NONCE_SIZE] = nonce
            .try_into()
            .map_err(|_| CipherError::InvalidNonceLength)?;

        let sealed = DeoxysII::new(&key).seal(&nonce, plaintext, aad);
        let mut sealed = sealed;
        let tag = sealed.split_off(sealed.len() - Self::TAG_LEN);
        Ok((sealed, tag))
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

        let key: [u8; KEY_SIZE] = key.try_into().map_err(|_| CipherError::InvalidKeyLength)?;
        let nonce: [u8; NONCE_SIZE] = nonce
            .try_into()
            .map_err(|_| CipherError::InvalidNonceLength)?;

        let mut sealed = Vec::with_capacity(ciphertext.len() + tag.len());
        sealed.extend_from_slice(ciphertext);
        sealed.extend_from_slice(tag);

        DeoxysII::new(&key)
            .open(&nonce, &sealed, aad)
            .map_err(|_| CipherError::AuthenticationFailed)
    }
}
