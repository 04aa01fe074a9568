//! Deterministic per-layer nonce derivation.
//!
//! `nonce_i = SHA3-256(k_i || layer_index)[..n_i]`. Nonces must never be a
//! function of already-encrypted content: doing so would make decryption
//! depend on bytes not yet recovered.

use secrecy::ExposeSecret;

use super::key_schedule::nonce_hash;

pub fn derive_nonce(layer_key: &secrecy::SecretSlice<u8>, layer_index: u8, nonce_len: usize) -> Vec<u8> {
    let digest = nonce_hash(layer_key.expose_secret(), layer_index);
    digest[..nonce_len].to_vec()
}
