//! Hash and extendable-output function (XOF) adapters.
//!
//! Wraps the SHA-3 family as used by round-3 CRYSTALS-Kyber:
//!
//! | name | primitive | use |
//! |------|-----------|-----|
//! | `H`  | SHA3-256  | public-key and ciphertext digests, message hashing |
//! | `G`  | SHA3-512  | seed splitting |
//! | `PRF`| SHAKE-256 | CBD noise |
//! | `XOF`| SHAKE-128 | matrix expansion |
//! | `KDF`| SHAKE-256 | shared-secret derivation |

use lattice_math::SYMBYTES;
pub use sha3::digest::XofReader;
use sha3::{
    Digest, Sha3_256, Sha3_512, Shake128, Shake256,
    digest::{ExtendableOutput, Update},
};

use crate::params::SSBYTES;

/// H(input) = SHA3-256(input) -> 32 bytes.
#[inline]
#[must_use]
pub fn hash_h(input: impl AsRef<[u8]>) -> [u8; 32] {
    Sha3_256::digest(input).into()
}

/// G(input) = SHA3-512(input) -> 64 bytes.
#[inline]
#[must_use]
pub fn hash_g(input: impl AsRef<[u8]>) -> [u8; 64] {
    Sha3_512::digest(input).into()
}

/// `PRF(seed, nonce) = SHAKE-256(seed || nonce)`, squeezed into `output`.
pub fn prf(seed: &[u8; SYMBYTES], nonce: u8, output: &mut [u8]) {
    Shake256::default()
        .chain(seed)
        .chain([nonce])
        .finalize_xof()
        .read(output);
}

/// SHAKE-128 XOF: absorbs `seed || x || y`, returns reader.
#[must_use]
pub fn xof_absorb(seed: &[u8; SYMBYTES], x: u8, y: u8) -> impl XofReader {
    Shake128::default().chain(seed).chain([x, y]).finalize_xof()
}

/// `KDF(input) = SHAKE-256(input)` squeezed to a 32-byte shared secret.
#[must_use]
pub fn kdf(input: impl AsRef<[u8]>) -> [u8; SSBYTES] {
    let mut out = [0u8; SSBYTES];
    Shake256::default()
        .chain(input)
        .finalize_xof()
        .read(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha3_256_empty() {
        assert_eq!(
            hex::encode(hash_h(b"")),
            "a7ffc6f8bf1ed76651c14756a061d662f580ff4de43b49fa82d80a4b80f8434a"
        );
    }

    #[test]
    fn sha3_512_empty_prefix() {
        assert_eq!(hex::encode(&hash_g(b"")[..8]), "a69f73cca23a9ac5");
    }

    #[test]
    fn shake256_empty_prefix() {
        assert_eq!(
            hex::encode(kdf(b"")),
            "46b9dd2b0ba88d13233b3feb743eeb243fcd52ea62b81b82b50c27646ed5762f"
        );
    }

    #[test]
    fn prf_is_shake256_of_seed_and_nonce() {
        let seed = [7u8; SYMBYTES];
        let mut joined = [7u8; SYMBYTES + 1];
        joined[SYMBYTES] = 3;

        let mut out = [0u8; 32];
        prf(&seed, 3, &mut out);
        assert_eq!(out, kdf(joined));

        let mut longer = [0u8; 64];
        prf(&seed, 3, &mut longer);
        assert_eq!(&longer[..32], &out);
    }

    #[test]
    fn xof_streams_are_domain_separated() {
        let seed = [1u8; SYMBYTES];
        let (mut a, mut b) = ([0u8; 32], [0u8; 32]);
        xof_absorb(&seed, 0, 1).read(&mut a);
        xof_absorb(&seed, 1, 0).read(&mut b);
        assert_ne!(a, b);
    }
}
