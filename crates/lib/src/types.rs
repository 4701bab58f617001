//! Key, ciphertext and shared-secret types.
//!
//! All types wrap typed byte arrays parameterised by [`ParameterSet`] and are
//! built from raw bytes with `TryFrom<&[u8]>`, which checks the length.
//! Secret types zeroize on drop and keep their contents out of `Debug`.

use core::marker::PhantomData;

use subtle::{Choice, ConstantTimeEq};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::{
    Error,
    params::{ByteArray, ParameterSet, SSBYTES, SYMBYTES},
};

/// A 64-byte seed or hash output viewed as two 32-byte halves.
#[derive(FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C)]
pub(crate) struct Sym2(pub [u8; SYMBYTES], pub [u8; SYMBYTES]);

macro_rules! byte_wrapper_impls {
    ($name:ident, $array:ident) => {
        impl<P: ParameterSet> $name<P> {
            pub(crate) const fn from_array(bytes: P::$array) -> Self {
                Self {
                    bytes,
                    _params: PhantomData,
                }
            }

            /// Raw encoding.
            #[must_use]
            pub fn as_bytes(&self) -> &[u8] {
                self.bytes.as_ref()
            }
        }

        impl<P: ParameterSet> TryFrom<&[u8]> for $name<P> {
            type Error = Error;

            fn try_from(bytes: &[u8]) -> Result<Self, Error> {
                P::$array::try_copy_from(bytes).map(Self::from_array)
            }
        }

        impl<P: ParameterSet> AsRef<[u8]> for $name<P> {
            #[inline]
            fn as_ref(&self) -> &[u8] {
                self.bytes.as_ref()
            }
        }

        impl<P: ParameterSet> Clone for $name<P> {
            fn clone(&self) -> Self {
                Self::from_array(self.bytes.clone())
            }
        }
    };
}

/// Kyber public key: `Encode_12(t) || rho`.
pub struct PublicKey<P: ParameterSet> {
    pub(crate) bytes: P::PkArray,
    _params: PhantomData<P>,
}

byte_wrapper_impls!(PublicKey, PkArray);

impl<P: ParameterSet> PublicKey<P> {
    /// Encoded NTT-domain vector `t`.
    #[must_use]
    pub fn t(&self) -> &[u8] {
        &self.bytes.as_ref()[..P::POLYVEC_BYTES]
    }

    /// Matrix seed `rho`.
    #[must_use]
    pub fn rho(&self) -> [u8; SYMBYTES] {
        let mut rho = [0u8; SYMBYTES];
        rho.copy_from_slice(&self.bytes.as_ref()[P::POLYVEC_BYTES..]);
        rho
    }
}

impl<P: ParameterSet> PartialEq for PublicKey<P> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<P: ParameterSet> Eq for PublicKey<P> {}

impl<P: ParameterSet> core::fmt::Debug for PublicKey<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PublicKey")
            .field("params", &P::NAME)
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Kyber PKE secret key: `Encode_12(s)` in the NTT domain.
pub struct PkeSecretKey<P: ParameterSet> {
    pub(crate) bytes: P::PkeSkArray,
    _params: PhantomData<P>,
}

byte_wrapper_impls!(PkeSecretKey, PkeSkArray);

/// Kyber KEM secret key: `pke_sk || pk || H(pk) || z`.
pub struct SecretKey<P: ParameterSet> {
    pub(crate) bytes: P::SkArray,
    _params: PhantomData<P>,
}

byte_wrapper_impls!(SecretKey, SkArray);

impl<P: ParameterSet> SecretKey<P> {
    const PK_OFFSET: usize = P::PKE_SK_BYTES;
    const HASH_OFFSET: usize = Self::PK_OFFSET + P::PK_BYTES;
    const Z_OFFSET: usize = Self::HASH_OFFSET + SYMBYTES;

    pub(crate) fn assemble(
        pke_sk: &PkeSecretKey<P>,
        pk: &PublicKey<P>,
        pk_hash: &[u8; SYMBYTES],
        z: &[u8; SYMBYTES],
    ) -> Self {
        let mut bytes = P::SkArray::zeroed();
        let buf = bytes.as_mut();
        buf[..Self::PK_OFFSET].copy_from_slice(pke_sk.as_bytes());
        buf[Self::PK_OFFSET..Self::HASH_OFFSET].copy_from_slice(pk.as_bytes());
        buf[Self::HASH_OFFSET..Self::Z_OFFSET].copy_from_slice(pk_hash);
        buf[Self::Z_OFFSET..].copy_from_slice(z);
        Self::from_array(bytes)
    }

    /// Encoded PKE secret vector `s`.
    #[must_use]
    pub fn pke_secret_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[..Self::PK_OFFSET]
    }

    #[must_use]
    pub fn public_key_bytes(&self) -> &[u8] {
        &self.bytes.as_ref()[Self::PK_OFFSET..Self::HASH_OFFSET]
    }

    /// `H(pk)`, cached at key generation.
    #[must_use]
    pub fn public_key_hash(&self) -> &[u8] {
        &self.bytes.as_ref()[Self::HASH_OFFSET..Self::Z_OFFSET]
    }

    /// Implicit-rejection secret `z`.
    #[must_use]
    pub fn rejection_secret(&self) -> [u8; SYMBYTES] {
        let mut z = [0u8; SYMBYTES];
        z.copy_from_slice(&self.bytes.as_ref()[Self::Z_OFFSET..]);
        z
    }

    /// The public key embedded in this secret key.
    #[must_use]
    pub fn public_key(&self) -> PublicKey<P> {
        let mut bytes = P::PkArray::zeroed();
        bytes.as_mut().copy_from_slice(self.public_key_bytes());
        PublicKey::from_array(bytes)
    }
}

macro_rules! secret_impls {
    ($name:ident) => {
        impl<P: ParameterSet> Zeroize for $name<P> {
            fn zeroize(&mut self) {
                self.bytes.zeroize();
            }
        }

        impl<P: ParameterSet> Drop for $name<P> {
            fn drop(&mut self) {
                self.zeroize();
            }
        }

        impl<P: ParameterSet> ZeroizeOnDrop for $name<P> {}

        impl<P: ParameterSet> ConstantTimeEq for $name<P> {
            fn ct_eq(&self, other: &Self) -> Choice {
                self.as_bytes().ct_eq(other.as_bytes())
            }
        }

        impl<P: ParameterSet> PartialEq for $name<P> {
            fn eq(&self, other: &Self) -> bool {
                self.ct_eq(other).into()
            }
        }

        impl<P: ParameterSet> Eq for $name<P> {}

        impl<P: ParameterSet> core::fmt::Debug for $name<P> {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("params", &P::NAME)
                    .finish_non_exhaustive()
            }
        }
    };
}

secret_impls!(PkeSecretKey);
secret_impls!(SecretKey);

/// Kyber ciphertext: `Compress_du(u) || Compress_dv(v)`.
pub struct Ciphertext<P: ParameterSet> {
    pub(crate) bytes: P::CtArray,
    _params: PhantomData<P>,
}

byte_wrapper_impls!(Ciphertext, CtArray);

impl<P: ParameterSet> PartialEq for Ciphertext<P> {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<P: ParameterSet> Eq for Ciphertext<P> {}

impl<P: ParameterSet> core::fmt::Debug for Ciphertext<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Ciphertext")
            .field("params", &P::NAME)
            .field("len", &self.bytes.as_ref().len())
            .finish_non_exhaustive()
    }
}

/// Shared secret (32 bytes).
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret {
    pub(crate) bytes: [u8; SSBYTES],
}

impl SharedSecret {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; SSBYTES] {
        &self.bytes
    }
}

impl From<&[u8; SSBYTES]> for SharedSecret {
    #[inline]
    fn from(arr: &[u8; SSBYTES]) -> Self {
        Self { bytes: *arr }
    }
}

impl TryFrom<&[u8]> for SharedSecret {
    type Error = Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Error> {
        <[u8; SSBYTES]>::try_copy_from(bytes).map(|bytes| Self { bytes })
    }
}

impl AsRef<[u8]> for SharedSecret {
    #[inline]
    fn as_ref(&self) -> &[u8] {
        &self.bytes
    }
}

impl ConstantTimeEq for SharedSecret {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.bytes.ct_eq(&other.bytes)
    }
}

impl PartialEq for SharedSecret {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for SharedSecret {}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}
