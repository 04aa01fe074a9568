//! Wire format v3: `version(1) || t1(16) || t2(32) || t3(32) || t4(16) ||
//! t5(16) || t6(16) || ciphertext(*)`, 129 octets of fixed overhead.

use thiserror::Error;

pub const VERSION: u8 = 3;

const TAG_LENS: [usize; 6] = [16, 32, 32, 16, 16, 16];
pub const FIXED_OVERHEAD: usize = 1 + TAG_LENS[0] + TAG_LENS[1] + TAG_LENS[2] + TAG_LENS[3] + TAG_LENS[4] + TAG_LENS[5];

#[derive(Debug, Error)]
pub enum WireError {
    #[error("blob shorter than the minimum {FIXED_OVERHEAD}-octet wire overhead")]
    TooShort,

    #[error("unsupported wire format version")]
    UnsupportedVersion,
}

pub struct EncryptedBlob {
    pub tags: [Vec<u8>; 6],
    pub ciphertext: Vec<u8>,
}

pub fn encode(blob: &EncryptedBlob) -> Vec<u8> {
    let mut out = Vec::with_capacity(FIXED_OVERHEAD + blob.ciphertext.len());
    out.push(VERSION);
    for tag in &blob.tags {
        out.extend_from_slice(tag);
    }
    out.extend_from_slice(&blob.ciphertext);
    out
}

/// Validates the version byte and minimum length without touching any key
/// material.
pub fn decode(bytes: &[u8]) -> Result<EncryptedBlob, WireError> {
    if bytes.len() < FIXED_OVERHEAD {
        return Err(WireError::TooShort);
    }
    if bytes[0] != VERSION {
        return Err(WireError::UnsupportedVersion);
    }

    let mut offset = 1usize;
    let mut tags: [Vec<u8>; 6] = Default::default();
    for (i, len) in TAG_LENS.iter().enumerate() {
        tags[i] = bytes[offset..offset + len].to_vec();
        offset += len;
    }
    let ciphertext = bytes[offset..].to_vec();

    Ok(EncryptedBlob { tags, ciphertext })
}
