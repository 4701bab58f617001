use core::ops;

use super::Polynomial;
use crate::{KyberRing, N, encode, ntt, ntt::NttRing, reduce::Coefficient};

/// Polynomial in NTT (bit-reversed) domain.
pub struct NttPolynomial<R: NttRing>(pub(crate) [R::Coeff; N]);

impl<R: NttRing> NttPolynomial<R> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self([R::Coeff::ZERO; N])
    }

    /// Inverse NTT; result is in Montgomery domain.
    #[must_use]
    pub fn ntt_inverse(mut self) -> Polynomial<R> {
        ntt::inverse_ntt::<R>(&mut self.0);
        Polynomial(self.0)
    }

    pub fn reduce(&mut self) {
        for c in &mut self.0 {
            *c = R::barrett_reduce(*c);
        }
    }

    pub fn to_mont(&mut self) {
        for c in &mut self.0 {
            *c = R::to_mont(*c);
        }
    }

    /// Pointwise product in the NTT domain; carries a factor `R^{-1}`.
    #[must_use]
    pub fn pointwise_mul(&self, other: &Self) -> Self {
        Self(ntt::pointwise_multiply::<R>(&self.0, &other.0))
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

impl NttPolynomial<KyberRing> {
    /// Serialize to bytes (12-bit packing, 384 bytes).
    pub fn to_bytes(&self, r: &mut [u8]) {
        encode::coeffs_to_bytes(r, &self.0);
    }

    /// Deserialize from bytes (12-bit unpacking).
    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut p = Self::zero();
        encode::bytes_to_coeffs(&mut p.0, a);
        p
    }

    /// Rejection-sample a uniform polynomial from an XOF stream.
    #[must_use]
    pub fn sample_uniform(fill: impl FnMut(&mut [u8])) -> Self {
        let mut p = Self::zero();
        crate::sample::reject_uniform(&mut p.0, fill);
        p
    }
}

impl<R: NttRing> Clone for NttPolynomial<R> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<R: NttRing> Copy for NttPolynomial<R> {}

impl<R: NttRing> PartialEq for NttPolynomial<R> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<R: NttRing> Eq for NttPolynomial<R> {}

impl<R: NttRing> Default for NttPolynomial<R> {
    #[inline]
    fn default() -> Self {
        Self::zero()
    }
}

impl<R: NttRing> core::fmt::Debug for NttPolynomial<R> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttPolynomial")
            .field("coeffs[..4]", &&self.0[..4])
            .finish_non_exhaustive()
    }
}

impl<'b, R: NttRing> ops::Add<&'b NttPolynomial<R>> for &NttPolynomial<R> {
    type Output = NttPolynomial<R>;
    #[inline]
    fn add(self, rhs: &'b NttPolynomial<R>) -> NttPolynomial<R> {
        let mut r = *self;
        r += rhs;
        r
    }
}

impl<R: NttRing> ops::AddAssign<&Self> for NttPolynomial<R> {
    #[inline]
    fn add_assign(&mut self, rhs: &Self) {
        for (a, &b) in self.0.iter_mut().zip(rhs.0.iter()) {
            *a += b;
        }
    }
}
