use core::ops;

use super::NttPolynomial;
use crate::{
    Error, KyberRing, N, SYMBYTES, compress::CompressWidth, encode, ntt, ntt::NttRing,
    reduce::Coefficient, sample::CbdWidth,
};

/// Polynomial in standard (coefficient) form over `R_q = Z_q[X]/(X^{256}+1)`.
pub struct Polynomial<R: NttRing>(pub(crate) [R::Coeff; N]);

impl<R: NttRing> Polynomial<R> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([R::Coeff::ZERO; N])
    }

    /// Consuming forward NTT transform.
    #[must_use]
    pub fn ntt(mut self) -> NttPolynomial<R> {
        ntt::forward_ntt::<R>(&mut self.0);
        NttPolynomial(self.0)
    }

    /// Barrett-reduce every coefficient to its centred representative.
    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = R::barrett_reduce(*c);
        }
    }

    #[must_use]
    pub const fn coeffs(&self) -> &[R::Coeff; N] {
        &self.0
    }

    #[must_use]
    pub const fn coeffs_mut(&mut self) -> &mut [R::Coeff; N] {
        &mut self.0
    }
}

impl Polynomial<KyberRing> {
    /// Compress to `D` bits and write to buffer.
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        D::compress_poly(r, &self.0);
    }

    /// Decompress from buffer with `D` bits.
    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut p = Self::zero();
        D::decompress_poly(&mut p.0, a);
        p
    }

    /// Decode a 32-byte message into a polynomial.
    #[must_use]
    pub fn from_message(msg: &[u8; SYMBYTES]) -> Self {
        let mut p = Self::zero();
        encode::message_to_coeffs(&mut p.0, msg);
        p
    }

    /// Encode polynomial to 32-byte message.
    #[must_use]
    pub fn to_message(&self) -> [u8; SYMBYTES] {
        let mut msg = [0u8; SYMBYTES];
        encode::coeffs_to_message(&mut msg, &self.0);
        msg
    }

    /// Sample noise polynomial via the sealed [`CbdWidth`] trait.
    #[must_use]
    pub fn sample_cbd<Eta: CbdWidth>(buf: &[u8]) -> Self {
        let mut p = Self::zero();
        Eta::sample(&mut p.0, buf);
        p
    }
}

impl<R: NttRing> Clone for Polynomial<R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: NttRing> Copy for Polynomial<R> {}

impl<R: NttRing> PartialEq for Polynomial<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: NttRing> Eq for Polynomial<R> {}

impl<R: NttRing> From<[R::Coeff; N]> for Polynomial<R> {
    #[inline]
    fn from(coeffs: [R::Coeff; N]) -> Self {
        Self(coeffs)
    }
}

impl<R: NttRing> TryFrom<&[R::Coeff]> for Polynomial<R> {
    type Error = Error;

    fn try_from(coeffs: &[R::Coeff]) -> Result<Self, Error> {
        let coeffs = <[R::Coeff; N]>::try_from(coeffs).map_err(|_| Error::InvalidLength {
            expected: N,
            actual: coeffs.len(),
        })?;
        Ok(Self(coeffs))
    }
}

impl<R: NttRing> Default for Polynomial<R> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<R: NttRing> core::fmt::Debug for Polynomial<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Polynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b, R: NttRing> ops::Add<&'b Polynomial<R>> for &Polynomial<R> {
    type Output = Polynomial<R>;
    #[inline]
    fn add(self, rhs: &'b Polynomial<R>) -> Polynomial<R> {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl<'b, R: NttRing> ops::Sub<&'b Polynomial<R>> for &Polynomial<R> {
    type Output = Polynomial<R>;
    #[inline]
    fn sub(self, rhs: &'b Polynomial<R>) -> Polynomial<R> {
        let mut r = *self;
        r -= rhs;
        r
    }
}

impl<R: NttRing> ops::AddAssign<&Self> for Polynomial<R> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}

impl<R: NttRing> ops::SubAssign<&Self> for Polynomial<R> {
    #[inline]
    fn sub_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a -= b;
        }
    }
}
