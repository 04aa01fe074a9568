use super::sparkle::{self, BIG_STEPS, SMALL_STEPS, STATE_LEN};
use super::{AeadLayer, CipherError, check_len, ct_eq};

const RATE_WORDS: usize = 8;
const RATE_BYTES: usize = RATE_WORDS * 4;

const DOM_AAD: u32 = 0x0000_0001;
const DOM_NO_AAD: u32 = 0x0000_0002;
const DOM_MSG_FULL: u32 = 0x0000_0004;
const DOM_MSG_PARTIAL: u32 = 0x0000_0008;

/// Layer 3: Schwaemm256-256, a duplex-sponge AEAD over the SPARKLE384
/// permutation (see `cipher::sparkle`).
pub struct Schwaemm256Layer;

fn init(key: &[u8], nonce: &[u8]) -> [u32; STATE_LEN] {
    let mut state = [0u32; STATE_LEN];
    sparkle::bytes_to_words(nonce, &mut state[0..8]);
    sparkle::bytes_to_words(&key[0..16], &mut state[8..12]);
    sparkle::permute(&mut state, BIG_STEPS);

    let mut key_high = [0u32; 4];
    sparkle::bytes_to_words(&key[16..32], &mut key_high);
    for i in 0..4 {
        state[8 + i] ^= key_high[i];
    }
    state
}

fn absorb_aad(state: &mut [u32; STATE_LEN], aad: &[u8]) {
    if aad.is_empty() {
        state[11] ^= DOM_NO_AAD;
        return;
    }

    let mut chunks = aad.chunks(RATE_BYTES).peekable();
    while let Some(chunk) = chunks.next() {
        let is_last = chunks.peek().is_none();
        let mut block = [0u8; RATE_BYTES];
        block[..chunk.len()].copy_from_slice(chunk);
        if chunk.len() < RATE_BYTES {
            block[chunk.len()] = 0x80;
        }

        let mut words = [0u32; RATE_WORDS];
        sparkle::bytes_to_words(&block, &mut words);
        for i in 0..RATE_WORDS {
            state[i] ^= words[i];
        }

        if is_last {
            state[11] ^= DOM_AAD;
            sparkle::permute(state, BIG_STEPS);
        } else {
            sparkle::permute(state, SMALL_STEPS);
        }
    }
}

/// Runs the message phase in either direction. The duplex state must
/// absorb the *ciphertext* bytes on both sides so encrypt and decrypt stay
/// in lockstep: when `encrypting` is true, `input` is the plaintext and the
/// freshly produced output block is fed back; when false, `input` is
/// already the ciphertext and the input block itself is fed back.
fn process_message(
    state: &mut [u32; STATE_LEN],
    input: &[u8],
    encrypting: bool,
) -> Vec<u8> {
    let mut output = Vec::with_capacity(input.len());
    let mut offset = 0usize;

    loop {
        let remaining = &input[offset..];
        let take = remaining.len().min(RATE_BYTES);
        let is_last = take == remaining.len();
        let block = &remaining[..take];

        let keystream = sparkle::words_to_bytes(&state[0..RATE_WORDS]);
        let out_block: Vec<u8> = block
            .iter()
            .zip(keystream.iter())
            .map(|(b, k)| b ^ k)
            .collect();
        output.extend_from_slice(&out_block);

        let feedback: &[u8] = if encrypting { &out_block } else { block };

        let mut padded = [0u8; RATE_BYTES];
        padded[..feedback.len()].copy_from_slice(feedback);
        let padded_fully = feedback.len() == RATE_BYTES;
        if !padded_fully {
            padded[feedback.len()] = 0x80;
        }

        let mut words = [0u32; RATE_WORDS];
        sparkle::bytes_to_words(&padded, &mut words);
        for i in 0..RATE_WORDS {
            state[i] = words[i];
        }

        if is_last {
            state[11] ^= if padded_fully {
                DOM_MSG_FULL
            } else {
                DOM_MSG_PARTIAL
            };
            sparkle::permute(state, BIG_STEPS);
            break;
        } else {
            sparkle::permute(state, SMALL_STEPS);
            offset += RATE_BYTES;
        }
    }

    output
}

fn finalize(state: &mut [u32; STATE_LEN], key: &[u8]) -> [u8; 32] {
    let mut key_words = [0u32; 8];
    sparkle::bytes_to_words(key, &mut key_words);
    for i in 0..8 {
        state[4 + i] ^= key_words[i];
    }
    sparkle::permute(state, BIG_STEPS);

    let tag_bytes = sparkle::words_to_bytes(&state[4..12]);
    let mut tag = [0u8; 32];
    tag.copy_from_slice(&tag_bytes);
    tag
}

impl AeadLayer for Schwaemm256Layer {
    const KEY_LEN: usize = 32;
    const NONCE_LEN: usize = 32;
    const TAG_LEN: usize = 32;
    const NAME: &'static str = "Schwaemm256-256";

    fn encrypt(
        key: &[u8],
        nonce: &[u8],
        plaintext: &[u8],
        aad: &[u8],
    ) -> Result<(Vec<u8>, Vec<u8>), CipherError> {
        check_len(key, Self::KEY_LEN, CipherError::InvalidKeyLength)?;
        check_len(nonce, Self::NONCE_LEN, CipherError::InvalidNonceLength)?;

        let mut state = init(key, nonce);
        absorb_aad(&mut state, aad);

        let ciphertext = process_message(&mut state, plaintext, true);

        let tag = finalize(&mut state, key);
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

        let mut state = init(key, nonce);
        absorb_aad(&mut state, aad);

        let plaintext = process_message(&mut state, ciphertext, false);

        let expected_tag = finalize(&mut state, key);
        if !ct_eq(&expected_tag, tag) {
            return Err(CipherError::AuthenticationFailed);
        }
        Ok(plaintext)
    }
}
