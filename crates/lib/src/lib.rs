//! `kyber-rs` -- CRYSTALS-Kyber public-key encryption and key encapsulation.
//!
//! Implements the round-3 CRYSTALS-Kyber CPA-secure encryption scheme
//! ([`pke`]) and the CCA-secure KEM built on it ([`kem`]) for all three
//! parameter sets: Kyber512, Kyber768, and Kyber1024. Every randomised
//! operation has a `_derand` twin taking explicit seed bytes; with the default
//! `getrandom` feature an `_os` variant draws from the operating system.

#![deny(unsafe_code)]

mod ct;
pub mod hash;
pub mod kem;
pub mod params;
pub mod pke;
pub mod types;

pub use kem::{decapsulate, encapsulate, encapsulate_derand, keypair, keypair_derand};
#[cfg(feature = "getrandom")]
pub use kem::{encapsulate_os, keypair_os};
pub use lattice_math as math;
pub use params::{Kyber512, Kyber768, Kyber1024, ParameterSet};
pub use types::{Ciphertext, PkeSecretKey, PublicKey, SecretKey, SharedSecret};

use rand_core::TryCryptoRng;

/// Errors returned by key/ciphertext parsing and randomised operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Input byte slice has wrong length for this parameter set.
    InvalidLength {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// Plaintext shorter than the 32-byte message block.
    MessageTooShort {
        /// Required byte count.
        minimum: usize,
        /// Actual byte count received.
        actual: usize,
    },
    /// The random number generator failed to produce bytes.
    RandomnessUnavailable,
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected}, got {actual}")
            }
            Self::MessageTooShort { minimum, actual } => {
                write!(f, "message too short: need at least {minimum} bytes, got {actual}")
            }
            Self::RandomnessUnavailable => f.write_str("random number generator failed"),
        }
    }
}

impl core::error::Error for Error {}

impl From<lattice_math::Error> for Error {
    fn from(err: lattice_math::Error) -> Self {
        match err {
            lattice_math::Error::InvalidLength { expected, actual } => {
                Self::InvalidLength { expected, actual }
            }
        }
    }
}

/// Draw `L` bytes of seed material from `rng`.
pub(crate) fn random_seed<const L: usize>(rng: &mut impl TryCryptoRng) -> Result<[u8; L], Error> {
    let mut seed = [0u8; L];
    rng.try_fill_bytes(&mut seed)
        .map_err(|_| Error::RandomnessUnavailable)?;
    Ok(seed)
}
