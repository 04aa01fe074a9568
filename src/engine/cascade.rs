//! The six-layer cascade: encrypt strictly 1→6, decrypt strictly 6→1,
//! short-circuiting decrypt on the first authentication failure.
//!
//! Layer types are compile-time parameters (generics), not a runtime
//! plugin registry: the cascade's shape is fixed, so there is nothing to
//! swap at run time and no reason to pay for dynamic dispatch on this
//! path.

use secrecy::ExposeSecret;

use crate::cipher::{
    Aegis256Layer, AeadLayer, AesGcmLayer, Ascon128aLayer, ChaCha20Poly1305Layer, DeoxysIiLayer,
    Schwaemm256Layer,
};

use super::key_schedule::DerivedKeys;
use super::nonce::derive_nonce;
use super::EngineError;

pub struct CascadeOutput {
    pub ciphertext: Vec<u8>,
    pub tags: [Vec<u8>; 6],
}

pub fn encrypt(plaintext: &[u8], keys: &DerivedKeys, path: &[u8]) -> Result<CascadeOutput, EngineError> {
    let n1 = derive_nonce(&keys.k1, 1, AesGcmLayer::NONCE_LEN);
    let (c1, t1) = AesGcmLayer::encrypt(keys.k1.expose_secret(), &n1, plaintext, path)
        .map_err(EngineError::from_cipher)?;

    let n2 = derive_nonce(&keys.k2, 2, Aegis256Layer::NONCE_LEN);
    let (c2, t2) = Aegis256Layer::encrypt(keys.k2.expose_secret(), &n2, &c1, path)
        .map_err(EngineError::from_cipher)?;

    let n3 = derive_nonce(&keys.k3, 3, Schwaemm256Layer::NONCE_LEN);
    let (c3, t3) = Schwaemm256Layer::encrypt(keys.k3.expose_secret(), &n3, &c2, path)
        .map_err(EngineError::from_cipher)?;

    let n4 = derive_nonce(&keys.k4, 4, DeoxysIiLayer::NONCE_LEN);
    let (c4, t4) = DeoxysIiLayer::encrypt(keys.k4.expose_secret(), &n4, &c3, path)
        .map_err(EngineError::from_cipher)?;

    let n5 = derive_nonce(&keys.k5, 5, Ascon128aLayer::NONCE_LEN);
    let (c5, t5) = Ascon128aLayer::encrypt(keys.k5.expose_secret(), &n5, &c4, path)
        .map_err(EngineError::from_cipher)?;

    let n6 = derive_nonce(&keys.k6, 6, ChaCha20Poly1305Layer::NONCE_LEN);
    let (c6, t6) = ChaCha20Poly1305Layer::encrypt(keys.k6.expose_secret(), &n6, &c5, path)
        .map_err(EngineError::from_cipher)?;

    Ok(CascadeOutput {
        ciphertext: c6,
        tags: [t1, t2, t3, t4, t5, t6],
    })
}

pub fn decrypt(
    ciphertext: &[u8],
    tags: &[Vec<u8>; 6],
    keys: &DerivedKeys,
    path: &[u8],
) -> Result<Vec<u8>, EngineError> {
    let n6 = derive_nonce(&keys.k6, 6, ChaCha20Poly1305Layer::NONCE_LEN);
    let c5 = ChaCha20Poly1305Layer::decrypt(keys.k6.expose_secret(), &n6, ciphertext, &tags[5], path)
        .map_err(EngineError::from_cipher)?;

    let n5 = derive_nonce(&keys.k5, 5, Ascon128aLayer::NONCE_LEN);
    let c4 = Ascon128aLayer::decrypt(keys.k5.expose_secret(), &n5, &c5, &tags[4], path)
        .map_err(EngineError::from_cipher)?;

    let n4 = derive_nonce(&keys.k4, 4, DeoxysIiLayer::NONCE_LEN);
    let c3 = DeoxysIiLayer::decrypt(keys.k4.expose_secret(), &n4, &c4, &tags[3], path)
        .map_err(EngineError::from_cipher)?;

    let n3 = derive_nonce(&keys.k3, 3, Schwaemm256Layer::NONCE_LEN);
    let c2 = Schwaemm256Layer::decrypt(keys.k3.expose_secret(), &n3, &c3, &tags[2], path)
        .map_err(EngineError::from_cipher)?;

    let n2 = derive_nonce(&keys.k2, 2, Aegis256Layer::NONCE_LEN);
    let c1 = Aegis256Layer::decrypt(keys.k2.expose_secret(), &n2, &c2, &tags[1], path)
        .map_err(EngineError::from_cipher)?;

    let n1 = derive_nonce(&keys.k1, 1, AesGcmLayer::NONCE_LEN);
    let plaintext = AesGcmLayer::decrypt(keys.k1.expose_secret(), &n1, &c1, &tags[0], path)
        .map_err(EngineError::from_cipher)?;

    Ok(plaintext)
}
