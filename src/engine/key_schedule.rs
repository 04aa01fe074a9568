//! HKDF-SHA3-512 key schedule: derives the six per-layer cascade keys from
//! a master secret and a file path.

use hkdf::Hkdf;
use secrecy::{ExposeSecret, SecretSlice};
use sha3::{Digest, Sha3_256, Sha3_512};
use thiserror::Error;

use crate::keystore::MasterSecret;

const INFO_LAYER1: &[u8] = b"Layer1.AES256";
const INFO_LAYER2: &[u8] = b"Layer2.AEGIS256";
const INFO_LAYER3: &[u8] = b"Layer3.Schwaemm256";
const INFO_LAYER4: &[u8] = b"Layer4.DeoxysII256";
const INFO_LAYER5: &[u8] = b"Layer5.Ascon128a";
const INFO_LAYER6: &[u8] = b"Layer6.ChaCha20";

pub type SecretBytes = SecretSlice<u8>;

#[derive(Debug, Error)]
pub enum KeyScheduleError {
    #[error("hkdf expand produced an invalid output length")]
    InvalidLength,
}

/// The six layer keys derived from `(master, path)`, sized per layer:
/// 32, 32, 32, 32, 16, 32 octets.
pub struct DerivedKeys {
    pub k1: SecretBytes,
    pub k2: SecretBytes,
    pub k3: SecretBytes,
    pub k4: SecretBytes,
    pub k5: SecretBytes,
    pub k6: SecretBytes,
}

pub fn derive_keys(master: &MasterSecret, path: &[u8]) -> Result<DerivedKeys, KeyScheduleError> {
    let mut salt = [0u8; 64];
    salt.copy_from_slice(Sha3_512::digest(path).as_slice());
    let salt = &salt[..32];

    let (_prk, hk) = Hkdf::<Sha3_512>::extract(Some(salt), master.expose_secret());

    Ok(DerivedKeys {
        k1: expand(&hk, INFO_LAYER1, 32)?,
        k2: expand(&hk, INFO_LAYER2, 32)?,
        k3: expand(&hk, INFO_LAYER3, 32)?,
        k4: expand(&hk, INFO_LAYER4, 32)?,
        k5: expand(&hk, INFO_LAYER5, 16)?,
        k6: expand(&hk, INFO_LAYER6, 32)?,
    })
}

fn expand(
    hk: &Hkdf<Sha3_512>,
    info: &[u8],
    len: usize,
) -> Result<SecretBytes, KeyScheduleError> {
    let mut out = vec![0u8; len];
    hk.expand(info, &mut out)
        .map_err(|_| KeyScheduleError::InvalidLength)?;
    Ok(SecretBytes::from(out))
}

/// `SHA3-256(k_i || layer_index)` truncated to `nonce_len`, per the nonce
/// schedule in `engine::nonce`.
pub(crate) fn nonce_hash(layer_key: &[u8], layer_index: u8) -> [u8; 32] {
    let mut hasher = Sha3_256::new();
    hasher.update(layer_key);
    hasher.update([layer_index]);
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}
