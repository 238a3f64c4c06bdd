/*++

Licensed under the Apache-2.0 license.

File Name:

    sha.rs

Abstract:

    File contains the hash core of the emulated SHA engine: the SHA-1 and
    SHA-2 compression functions operating on the engine's result register
    image.

--*/

use sha2::digest::generic_array::GenericArray;

/// SHA Mode
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaMode {
    Sha1,
    Sha224,
    Sha256,
    Sha384,
    Sha512,
    Sha512_224,
    Sha512_256,
}

impl ShaMode {
    /// Block size in bytes
    pub const fn block_size(&self) -> usize {
        if self.is_wide() {
            128
        } else {
            64
        }
    }

    /// Digest size in bytes
    pub const fn digest_size(&self) -> usize {
        match self {
            ShaMode::Sha1 => 20,
            ShaMode::Sha224 | ShaMode::Sha512_224 => 28,
            ShaMode::Sha256 | ShaMode::Sha512_256 => 32,
            ShaMode::Sha384 => 48,
            ShaMode::Sha512 => 64,
        }
    }

    /// Returns true for the SHA-512 family, which uses 64-bit state words.
    pub const fn is_wide(&self) -> bool {
        matches!(
            self,
            ShaMode::Sha384 | ShaMode::Sha512 | ShaMode::Sha512_224 | ShaMode::Sha512_256
        )
    }

    fn length_field_size(&self) -> usize {
        if self.is_wide() {
            16
        } else {
            8
        }
    }
}

const SHA1_IV: [u32; 5] = [0x67452301, 0xefcdab89, 0x98badcfe, 0x10325476, 0xc3d2e1f0];

const SHA224_IV: [u32; 8] = [
    0xc1059ed8, 0x367cd507, 0x3070dd17, 0xf70e5939, 0xffc00b31, 0x68581511, 0x64f98fa7,
    0xbefa4fa4,
];

const SHA256_IV: [u32; 8] = [
    0x6a09e667, 0xbb67ae85, 0x3c6ef372, 0xa54ff53a, 0x510e527f, 0x9b05688c, 0x1f83d9ab,
    0x5be0cd19,
];

const SHA384_IV: [u64; 8] = [
    0xcbbb9d5dc1059ed8,
    0x629a292a367cd507,
    0x9159015a3070dd17,
    0x152fecd8f70e5939,
    0x67332667ffc00b31,
    0x8eb44a8768581511,
    0xdb0c2e0d64f98fa7,
    0x47b5481dbefa4fa4,
];

const SHA512_IV: [u64; 8] = [
    0x6a09e667f3bcc908,
    0xbb67ae8584caa73b,
    0x3c6ef372fe94f82b,
    0xa54ff53a5f1d36f1,
    0x510e527fade682d1,
    0x9b05688c2b3e6c1f,
    0x1f83d9abfb41bd6b,
    0x5be0cd19137e2179,
];

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum ShaState {
    Narrow([u32; 8]),
    Wide([u64; 8]),
}

/// Hash state of one engine task sequence
#[derive(Debug, Clone)]
pub struct ShaCore {
    mode: ShaMode,
    state: ShaState,
}

impl ShaCore {
    /// Result register count
    pub const RESULT_WORDS: usize = 16;

    /// Create a core loaded with the engine's built-in initial hash value.
    ///
    /// The built-in value for SHA-512/224 and SHA-512/256 is the SHA-512 IV,
    /// so digests of those modes are wrong unless software loads the
    /// correct IV into the result registers.
    pub fn with_builtin_iv(mode: ShaMode) -> Self {
        let state = match mode {
            ShaMode::Sha1 => {
                let mut words = [0u32; 8];
                words[..5].copy_from_slice(&SHA1_IV);
                ShaState::Narrow(words)
            }
            ShaMode::Sha224 => ShaState::Narrow(SHA224_IV),
            ShaMode::Sha256 => ShaState::Narrow(SHA256_IV),
            ShaMode::Sha384 => ShaState::Wide(SHA384_IV),
            ShaMode::Sha512 | ShaMode::Sha512_224 | ShaMode::Sha512_256 => {
                ShaState::Wide(SHA512_IV)
            }
        };
        Self { mode, state }
    }

    /// Create a core from the result register image.
    ///
    /// # Arguments
    ///
    /// * `mode` - Mode of the SHA Operation
    /// * `words` - Result registers; 64-bit state words are split low half first
    pub fn from_result_words(mode: ShaMode, words: &[u32; Self::RESULT_WORDS]) -> Self {
        let state = if mode.is_wide() {
            let mut state = [0u64; 8];
            for (i, word) in state.iter_mut().enumerate() {
                *word = (words[2 * i] as u64) | ((words[2 * i + 1] as u64) << 32);
            }
            ShaState::Wide(state)
        } else {
            let mut state = [0u32; 8];
            state.copy_from_slice(&words[..8]);
            ShaState::Narrow(state)
        };
        Self { mode, state }
    }

    /// Export the state as a result register image.
    pub fn result_words(&self) -> [u32; Self::RESULT_WORDS] {
        let mut words = [0u32; Self::RESULT_WORDS];
        match &self.state {
            ShaState::Narrow(state) => {
                let len = if self.mode == ShaMode::Sha1 { 5 } else { 8 };
                words[..len].copy_from_slice(&state[..len]);
            }
            ShaState::Wide(state) => {
                for (i, word) in state.iter().enumerate() {
                    words[2 * i] = *word as u32;
                    words[2 * i + 1] = (*word >> 32) as u32;
                }
            }
        }
        words
    }

    /// Compress whole blocks of message data.
    ///
    /// # Arguments
    ///
    /// * `data` - Message bytes; the length must be a multiple of the block size
    pub fn compress(&mut self, data: &[u8]) {
        let mode = self.mode;
        debug_assert_eq!(data.len() % mode.block_size(), 0);
        for block in data.chunks_exact(mode.block_size()) {
            match &mut self.state {
                ShaState::Narrow(state) if mode == ShaMode::Sha1 => {
                    let mut sha1_state = [0u32; 5];
                    sha1_state.copy_from_slice(&state[..5]);
                    sha1::compress(&mut sha1_state, &[GenericArray::clone_from_slice(block)]);
                    state[..5].copy_from_slice(&sha1_state);
                }
                ShaState::Narrow(state) => {
                    sha2::compress256(state, &[GenericArray::clone_from_slice(block)]);
                }
                ShaState::Wide(state) => {
                    sha2::compress512(state, &[GenericArray::clone_from_slice(block)]);
                }
            }
        }
    }

    /// Pad and compress the tail of the message.
    ///
    /// # Arguments
    ///
    /// * `tail` - Trailing message bytes, shorter than one block
    /// * `total_bits` - Length of the whole message in bits
    pub fn finalize(&mut self, tail: &[u8], total_bits: u128) {
        let block_size = self.mode.block_size();
        let length_size = self.mode.length_field_size();
        debug_assert!(tail.len() < block_size);

        let mut last = [0u8; 256];
        last[..tail.len()].copy_from_slice(tail);
        last[tail.len()] = 0x80;
        let padded = if tail.len() + 1 + length_size > block_size {
            2 * block_size
        } else {
            block_size
        };
        let length = total_bits.to_be_bytes();
        last[padded - length_size..padded].copy_from_slice(&length[16 - length_size..]);
        self.compress(&last[..padded]);
    }

    /// Digest bytes derived from the current state.
    pub fn digest(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(64);
        match &self.state {
            ShaState::Narrow(state) => {
                for word in state {
                    out.extend_from_slice(&word.to_be_bytes());
                }
            }
            ShaState::Wide(state) => {
                for word in state {
                    out.extend_from_slice(&word.to_be_bytes());
                }
            }
        }
        out.truncate(self.mode.digest_size());
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    fn hash(mode: ShaMode, data: &[u8]) -> Vec<u8> {
        let mut core = ShaCore::with_builtin_iv(mode);
        let full = data.len() - data.len() % mode.block_size();
        core.compress(&data[..full]);
        core.finalize(&data[full..], (data.len() as u128) * 8);
        core.digest()
    }

    #[test]
    fn test_sha1_abc() {
        assert_eq!(
            hash(ShaMode::Sha1, b"abc"),
            hex!("a9993e364706816aba3e25717850c26c9cd0d89d")
        );
    }

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            hash(ShaMode::Sha256, b""),
            hex!("e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855")
        );
    }

    #[test]
    fn test_sha256_two_block_padding() {
        assert_eq!(
            hash(
                ShaMode::Sha256,
                b"abcdbcdecdefdefgefghfghighijhijkijkljklmklmnlmnomnopnopq"
            ),
            hex!("248d6a61d20638b8e5c026930c3e6039a33ce45964ff2167f6ecedd419db06c1")
        );
    }

    #[test]
    fn test_sha224_abc() {
        assert_eq!(
            hash(ShaMode::Sha224, b"abc"),
            hex!("23097d223405d8228642a477bda255b32aadbce4bda0b3f7e36c9da7")
        );
    }

    #[test]
    fn test_sha384_abc() {
        assert_eq!(
            hash(ShaMode::Sha384, b"abc"),
            hex!("cb00753f45a35e8bb5a03d699ac65007272c32ab0eded1631a8b605a43ff5bed8086072ba1e7cc2358baeca134c825a7")
        );
    }

    #[test]
    fn test_builtin_iv_for_truncated_sha512_is_sha512() {
        let sha512 = hash(ShaMode::Sha512, b"abc");
        let sha512_256 = hash(ShaMode::Sha512_256, b"abc");
        assert_eq!(&sha512[..32], &sha512_256[..]);
        assert_ne!(
            sha512_256,
            hex!("53048e2681941ef99b2e29b76b4c7dabe4c2d0c634fc6d46e0e2f13107e7af23")
        );
    }

    #[test]
    fn test_result_words_layout() {
        let core = ShaCore::with_builtin_iv(ShaMode::Sha512);
        let words = core.result_words();
        assert_eq!(words[0], 0xf3bcc908);
        assert_eq!(words[1], 0x6a09e667);

        let restored = ShaCore::from_result_words(ShaMode::Sha512, &words);
        assert_eq!(restored.digest(), core.digest());

        let sha1 = ShaCore::with_builtin_iv(ShaMode::Sha1).result_words();
        assert_eq!(sha1[4], 0xc3d2e1f0);
        assert_eq!(sha1[5], 0);
    }
}
