//! Montgomery and Barrett modular reduction for the two CRYSTALS fields.
//!
//! Each field keeps its `const fn` kernels in its own sub-module; the
//! [`Modulus`] trait exposes them to the generic NTT and polynomial code.

use core::{fmt::Debug, ops};

use crate::{DilithiumRing, KyberRing};

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Signed machine word holding one coefficient.
pub trait Coefficient:
    Copy
    + Eq
    + Debug
    + Default
    + Send
    + Sync
    + 'static
    + ops::Add<Output = Self>
    + ops::Sub<Output = Self>
    + ops::Neg<Output = Self>
    + ops::AddAssign
    + ops::SubAssign
    + sealed::Sealed
{
    const ZERO: Self;
    const ONE: Self;
}

impl sealed::Sealed for i16 {}
impl Coefficient for i16 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
}

impl sealed::Sealed for i32 {}
impl Coefficient for i32 {
    const ZERO: Self = 0;
    const ONE: Self = 1;
}

/// Prime field `Z_q` with Montgomery radix `R = 2^{bits(Coeff)}`.
///
/// Outputs of every reduction are centred representatives; callers that need
/// `[0, q)` add `q` to negative values.
pub trait Modulus: Copy + Debug + Send + Sync + 'static + sealed::Sealed {
    /// Coefficient word.
    type Coeff: Coefficient;
    /// Double-width word for products.
    type Wide: Copy;

    /// Field modulus.
    const Q: Self::Coeff;
    /// `R mod q`, centred.
    const MONT: Self::Coeff;

    /// `a * R^{-1} mod q` for `|a| < q * R / 2`.
    fn montgomery_reduce(a: Self::Wide) -> Self::Coeff;

    /// Centred representative of `a mod q`.
    fn barrett_reduce(a: Self::Coeff) -> Self::Coeff;

    /// `a * b * R^{-1} mod q`.
    fn fqmul(a: Self::Coeff, b: Self::Coeff) -> Self::Coeff;

    /// `a * R mod q`.
    fn to_mont(a: Self::Coeff) -> Self::Coeff;
}

/// Kyber field, q = 3329, R = 2^{16}.
pub mod kyber {
    use crate::KYBER_Q as Q;

    /// q^{-1} mod 2^{16} (Montgomery inverse).
    pub const QINV: i16 = -3327;

    /// 2^{16} mod q, centred.
    pub const MONT: i16 = -1044;

    const R2: i32 = ((1u64 << 32) % (Q as u64)) as i32;

    /// Montgomery reduction: computes `a * R^{-1} mod q` where R = 2^{16}.
    ///
    /// Input: `a in {-q*2^{15}, ..., q*2^{15} - 1}`. Output: `r in {-q+1, ...,
    /// q-1}` with `r \equiv a*R^{-1} (mod q)`.
    #[inline]
    #[must_use]
    pub const fn montgomery_reduce(a: i32) -> i16 {
        let t = (a as i16).wrapping_mul(QINV);
        ((a - (t as i32) * (Q as i32)) >> 16) as i16
    }

    /// Barrett reduction: centred reduction modulo q for any `i16`.
    ///
    /// Output: `r in {-floor(q/2), ..., floor(q/2)}` with `r \equiv a (mod q)`.
    #[inline]
    #[must_use]
    pub const fn barrett_reduce(a: i16) -> i16 {
        const V: i32 = ((1i32 << 26) + (Q as i32) / 2) / (Q as i32); // 20159
        let t = ((V * (a as i32) + (1 << 25)) >> 26) as i16;
        a.wrapping_sub(t.wrapping_mul(Q))
    }

    /// Field multiplication followed by Montgomery reduction: `a*b*R^{-1} mod q`.
    #[inline]
    #[must_use]
    pub const fn fqmul(a: i16, b: i16) -> i16 {
        montgomery_reduce((a as i32) * (b as i32))
    }

    /// Convert into the Montgomery domain: `a * R mod q`.
    #[inline]
    #[must_use]
    pub const fn to_mont(a: i16) -> i16 {
        montgomery_reduce((a as i32) * R2)
    }
}

/// Dilithium field, q = 8380417, R = 2^{32}.
pub mod dilithium {
    use crate::DILITHIUM_Q as Q;

    /// q^{-1} mod 2^{32}.
    pub const QINV: i32 = 58_728_449;

    /// 2^{32} mod q, centred.
    pub const MONT: i32 = -4_186_625;

    const R2: i64 = ((1u128 << 64) % (Q as u128)) as i64;

    /// Montgomery reduction: `a * 2^{-32} mod q` for `|a| < q * 2^{31}`.
    /// Output lies in `(-q, q)`.
    #[inline]
    #[must_use]
    pub const fn montgomery_reduce(a: i64) -> i32 {
        let t = (a as i32).wrapping_mul(QINV);
        ((a - (t as i64) * (Q as i64)) >> 32) as i32
    }

    /// Centred reduction modulo q for any `i32`.
    #[inline]
    #[must_use]
    pub const fn barrett_reduce(a: i32) -> i32 {
        const SHIFT: u32 = 54;
        const V: i64 = ((1i64 << SHIFT) + (Q as i64) / 2) / (Q as i64);
        let t = ((V * (a as i64) + (1 << (SHIFT - 1))) >> SHIFT) as i32;
        a.wrapping_sub(t.wrapping_mul(Q))
    }

    #[inline]
    #[must_use]
    pub const fn fqmul(a: i32, b: i32) -> i32 {
        montgomery_reduce((a as i64) * (b as i64))
    }

    #[inline]
    #[must_use]
    pub const fn to_mont(a: i32) -> i32 {
        montgomery_reduce((a as i64) * R2)
    }
}

impl sealed::Sealed for KyberRing {}
impl Modulus for KyberRing {
    type Coeff = i16;
    type Wide = i32;

    const Q: i16 = crate::KYBER_Q;
    const MONT: i16 = kyber::MONT;

    #[inline]
    fn montgomery_reduce(a: i32) -> i16 {
        kyber::montgomery_reduce(a)
    }

    #[inline]
    fn barrett_reduce(a: i16) -> i16 {
        kyber::barrett_reduce(a)
    }

    #[inline]
    fn fqmul(a: i16, b: i16) -> i16 {
        kyber::fqmul(a, b)
    }

    #[inline]
    fn to_mont(a: i16) -> i16 {
        kyber::to_mont(a)
    }
}

impl sealed::Sealed for DilithiumRing {}
impl Modulus for DilithiumRing {
    type Coeff = i32;
    type Wide = i64;

    const Q: i32 = crate::DILITHIUM_Q;
    const MONT: i32 = dilithium::MONT;

    #[inline]
    fn montgomery_reduce(a: i64) -> i32 {
        dilithium::montgomery_reduce(a)
    }

    #[inline]
    fn barrett_reduce(a: i32) -> i32 {
        dilithium::barrett_reduce(a)
    }

    #[inline]
    fn fqmul(a: i32, b: i32) -> i32 {
        dilithium::fqmul(a, b)
    }

    #[inline]
    fn to_mont(a: i32) -> i32 {
        dilithium::to_mont(a)
    }
}

const _: () = {
    assert!((kyber::QINV as i32).wrapping_mul(crate::KYBER_Q as i32) & 0xFFFF == 1);
    assert!(kyber::MONT as i32 + crate::KYBER_Q as i32 == (1 << 16) % crate::KYBER_Q as i32);
    assert!(dilithium::QINV.wrapping_mul(crate::DILITHIUM_Q) == 1);
    assert!(
        dilithium::MONT as i64 + crate::DILITHIUM_Q as i64
            == (1i64 << 32) % crate::DILITHIUM_Q as i64
    );
};
