//! `lattice-math` -- arithmetic core shared by the CRYSTALS lattice schemes.
//!
//! `no_std`, zero-allocation polynomial arithmetic over `Z_q[X]/(X^{256}+1)`
//! for two moduli: q = 3329 (Kyber) and q = 8380417 (Dilithium). Both rings
//! run through one generic NTT engine parameterised by a [`NttRing`] marker.
//! Sub-modules cover modular reduction, the Number-Theoretic Transform,
//! domain-typed polynomials and vectors, byte-level packing and compression,
//! and deterministic sampling.

#![no_std]
#![deny(unsafe_code)]
#![allow(
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::many_single_char_names
)]

pub mod compress;
pub mod encode;
pub mod ntt;
pub mod poly;
pub mod reduce;
pub mod sample;

pub use ntt::NttRing;
pub use poly::{NttMatrix, NttPolynomial, NttVector, Polynomial, Vector};
pub use reduce::{Coefficient, Modulus};

/// Polynomial ring degree.
pub const N: usize = 256;

/// Kyber field modulus.
pub const KYBER_Q: i16 = 3329;

/// Dilithium field modulus, `2^{23} - 2^{13} + 1`.
pub const DILITHIUM_Q: i32 = 8_380_417;

/// Size in bytes of hashes, seeds, and messages.
pub const SYMBYTES: usize = 32;

/// Size in bytes of a serialised Kyber polynomial (12 bits * 256 / 8).
pub const POLYBYTES: usize = 384;

/// Marker for `Z_3329[X]/(X^{256}+1)`, the Kyber ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KyberRing;

/// Marker for `Z_8380417[X]/(X^{256}+1)`, the Dilithium ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DilithiumRing;

/// Errors from constructing polynomials out of raw coefficient slices.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// Slice length differs from the ring degree.
    InvalidLength {
        /// Expected element count.
        expected: usize,
        /// Actual element count received.
        actual: usize,
    },
}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidLength { expected, actual } => {
                write!(f, "invalid length: expected {expected}, got {actual}")
            }
        }
    }
}

impl core::error::Error for Error {}
