//! Kyber parameter definitions: the [`ParameterSet`] trait and the marker
//! types [`Kyber512`], [`Kyber768`], [`Kyber1024`].

use lattice_math::{
    compress::{CompressWidth, D4, D5, D10, D11},
    sample::{CbdWidth, Eta2, Eta3},
};
pub use lattice_math::{N, POLYBYTES, SYMBYTES};
use zeroize::Zeroize;

use crate::Error;

/// Size in bytes of the shared-secret output.
pub const SSBYTES: usize = 32;

/// Fixed-size byte buffer usable as a key/ciphertext backing store.
pub trait ByteArray:
    AsRef<[u8]> + AsMut<[u8]> + Clone + core::fmt::Debug + Zeroize + Send + Sync + 'static
{
    /// Array length in bytes.
    const LEN: usize;

    /// Return a zero-filled instance.
    fn zeroed() -> Self;

    /// Copy an exactly `LEN`-byte slice.
    fn try_copy_from(bytes: &[u8]) -> Result<Self, Error>;
}

impl<const SIZE: usize> ByteArray for [u8; SIZE] {
    const LEN: usize = SIZE;

    #[inline]
    fn zeroed() -> Self {
        [0u8; SIZE]
    }

    fn try_copy_from(bytes: &[u8]) -> Result<Self, Error> {
        Self::try_from(bytes).map_err(|_| Error::InvalidLength {
            expected: SIZE,
            actual: bytes.len(),
        })
    }
}

/// Kyber parameter set implemented by [`Kyber512`], [`Kyber768`],
/// [`Kyber1024`].
pub trait ParameterSet: 'static + Send + Sync {
    /// Human-readable name.
    const NAME: &'static str;

    /// Module rank (k = 2, 3, or 4).
    const K: usize;

    /// CBD noise width for keygen secrets and encryption randomness.
    type Eta1: CbdWidth;
    /// CBD noise width for encryption errors.
    type Eta2: CbdWidth;
    /// Compression width for the polynomial-vector ciphertext component.
    type Du: CompressWidth;
    /// Compression width for the scalar ciphertext component.
    type Dv: CompressWidth;

    /// K * POLYBYTES - serialised polynomial vector.
    const POLYVEC_BYTES: usize = Self::K * POLYBYTES;
    /// Compressed bytes for the polynomial vector (K * N * D_U / 8).
    const POLYVEC_COMPRESSED_BYTES: usize = Self::K * <Self::Du as CompressWidth>::POLY_BYTES;
    /// Compressed bytes for one polynomial (N * D_V / 8).
    const POLY_COMPRESSED_BYTES: usize = <Self::Dv as CompressWidth>::POLY_BYTES;

    /// Public key bytes (POLYVEC_BYTES + SYMBYTES).
    const PK_BYTES: usize;
    /// PKE secret key bytes (POLYVEC_BYTES).
    const PKE_SK_BYTES: usize;
    /// KEM secret key bytes (PKE_SK_BYTES + PK_BYTES + 2 * SYMBYTES).
    const SK_BYTES: usize;
    /// Ciphertext bytes.
    const CT_BYTES: usize;

    /// Backing array for public keys.
    type PkArray: ByteArray;
    /// Backing array for PKE secret keys.
    type PkeSkArray: ByteArray;
    /// Backing array for KEM secret keys.
    type SkArray: ByteArray;
    /// Backing array for ciphertexts.
    type CtArray: ByteArray;
}

/// Kyber512 parameter set (k = 2, NIST security level 1).
#[derive(Debug, Clone, Copy)]
pub struct Kyber512;

impl ParameterSet for Kyber512 {
    const NAME: &'static str = "Kyber512";
    const K: usize = 2;

    type Eta1 = Eta3;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;

    const PK_BYTES: usize = 800; // 768 + 32
    const PKE_SK_BYTES: usize = 768;
    const SK_BYTES: usize = 1632; // 768 + 800 + 64
    const CT_BYTES: usize = 768; // 640 + 128

    type PkArray = [u8; 800];
    type PkeSkArray = [u8; 768];
    type SkArray = [u8; 1632];
    type CtArray = [u8; 768];
}

/// Kyber768 parameter set (k = 3, NIST security level 3).
#[derive(Debug, Clone, Copy)]
pub struct Kyber768;

impl ParameterSet for Kyber768 {
    const NAME: &'static str = "Kyber768";
    const K: usize = 3;

    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D10;
    type Dv = D4;

    const PK_BYTES: usize = 1184; // 1152 + 32
    const PKE_SK_BYTES: usize = 1152;
    const SK_BYTES: usize = 2400; // 1152 + 1184 + 64
    const CT_BYTES: usize = 1088; // 960 + 128

    type PkArray = [u8; 1184];
    type PkeSkArray = [u8; 1152];
    type SkArray = [u8; 2400];
    type CtArray = [u8; 1088];
}

/// Kyber1024 parameter set (k = 4, NIST security level 5).
#[derive(Debug, Clone, Copy)]
pub struct Kyber1024;

impl ParameterSet for Kyber1024 {
    const NAME: &'static str = "Kyber1024";
    const K: usize = 4;

    type Eta1 = Eta2;
    type Eta2 = Eta2;
    type Du = D11;
    type Dv = D5;

    const PK_BYTES: usize = 1568; // 1536 + 32
    const PKE_SK_BYTES: usize = 1536;
    const SK_BYTES: usize = 3168; // 1536 + 1568 + 64
    const CT_BYTES: usize = 1568; // 1408 + 160

    type PkArray = [u8; 1568];
    type PkeSkArray = [u8; 1536];
    type SkArray = [u8; 3168];
    type CtArray = [u8; 1568];
}

const _: () = {
    macro_rules! check_params {
        ($t:ty) => {
            assert!(<$t>::PK_BYTES == <$t>::POLYVEC_BYTES + SYMBYTES);
            assert!(<$t>::PKE_SK_BYTES == <$t>::POLYVEC_BYTES);
            assert!(<$t>::SK_BYTES == <$t>::PKE_SK_BYTES + <$t>::PK_BYTES + 2 * SYMBYTES);
            assert!(<$t>::CT_BYTES == <$t>::POLYVEC_COMPRESSED_BYTES + <$t>::POLY_COMPRESSED_BYTES);
            assert!(<<$t as ParameterSet>::PkArray as ByteArray>::LEN == <$t>::PK_BYTES);
            assert!(<<$t as ParameterSet>::PkeSkArray as ByteArray>::LEN == <$t>::PKE_SK_BYTES);
            assert!(<<$t as ParameterSet>::SkArray as ByteArray>::LEN == <$t>::SK_BYTES);
            assert!(<<$t as ParameterSet>::CtArray as ByteArray>::LEN == <$t>::CT_BYTES);
            assert!(<$t>::K >= 2 && <$t>::K <= 4);
        };
    }
    check_params!(Kyber512);
    check_params!(Kyber768);
    check_params!(Kyber1024);
};
