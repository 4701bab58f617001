use core::ops;

use super::{NttPolynomial, Polynomial};
use crate::{KyberRing, POLYBYTES, compress::CompressWidth, ntt::NttRing};

/// A vector of `K` polynomials in standard (coefficient) form.
pub struct Vector<R: NttRing, const K: usize> {
    pub(crate) polys: [Polynomial<R>; K],
}

/// A vector of `K` polynomials in NTT domain.
pub struct NttVector<R: NttRing, const K: usize> {
    pub(crate) polys: [NttPolynomial<R>; K],
}

impl<R: NttRing, const K: usize> Vector<R, K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [Polynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn ntt(self) -> NttVector<R, K> {
        let polys = self.polys.map(Polynomial::ntt);
        NttVector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    #[must_use]
    pub const fn polys(&self) -> &[Polynomial<R>; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [Polynomial<R>; K] {
        &mut self.polys
    }
}

impl<const K: usize> Vector<KyberRing, K> {
    pub fn compress<D: CompressWidth>(&self, r: &mut [u8]) {
        for (p, chunk) in self.polys.iter().zip(r.chunks_exact_mut(D::POLY_BYTES)) {
            p.compress::<D>(chunk);
        }
    }

    #[must_use]
    pub fn decompress<D: CompressWidth>(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(D::POLY_BYTES)) {
            *p = Polynomial::<KyberRing>::decompress::<D>(chunk);
        }
        v
    }
}

impl<R: NttRing, const K: usize> NttVector<R, K> {
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            polys: [NttPolynomial::zero(); K],
        }
    }

    #[must_use]
    pub fn ntt_inverse(self) -> Vector<R, K> {
        let polys = self.polys.map(NttPolynomial::ntt_inverse);
        Vector { polys }
    }

    pub fn reduce(&mut self) {
        for p in &mut self.polys {
            p.reduce();
        }
    }

    /// `sum_i(self[i] * other[i])` in NTT domain, reduced once at the end.
    #[must_use]
    pub fn inner_product(&self, other: &Self) -> NttPolynomial<R> {
        let mut acc = NttPolynomial::zero();
        for (a, b) in self.polys.iter().zip(other.polys.iter()) {
            acc += &a.pointwise_mul(b);
        }
        acc.reduce();
        acc
    }

    #[must_use]
    pub const fn polys(&self) -> &[NttPolynomial<R>; K] {
        &self.polys
    }

    #[must_use]
    pub const fn polys_mut(&mut self) -> &mut [NttPolynomial<R>; K] {
        &mut self.polys
    }
}

impl<const K: usize> NttVector<KyberRing, K> {
    /// Serialize to `K * 384` bytes (12-bit packing).
    pub fn to_bytes(&self, r: &mut [u8]) {
        for (p, chunk) in self.polys.iter().zip(r.chunks_exact_mut(POLYBYTES)) {
            p.to_bytes(chunk);
        }
    }

    #[must_use]
    pub fn from_bytes(a: &[u8]) -> Self {
        let mut v = Self::zero();
        for (p, chunk) in v.polys.iter_mut().zip(a.chunks_exact(POLYBYTES)) {
            *p = NttPolynomial::<KyberRing>::from_bytes(chunk);
        }
        v
    }
}

/// K x K matrix of NTT-domain polynomials (public matrix A).
pub struct NttMatrix<R: NttRing, const K: usize> {
    pub(crate) rows: [NttVector<R, K>; K],
}

impl<R: NttRing, const K: usize> NttMatrix<R, K> {
    #[inline]
    #[must_use]
    pub fn zero() -> Self {
        Self {
            rows: core::array::from_fn(|_| NttVector::zero()),
        }
    }

    /// Build the matrix entry by entry from `f(row, col)`.
    #[must_use]
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> NttPolynomial<R>) -> Self {
        Self {
            rows: core::array::from_fn(|i| NttVector {
                polys: core::array::from_fn(|j| f(i, j)),
            }),
        }
    }

    /// `A * v` with Montgomery conversion on each result row.
    #[must_use]
    pub fn mul_vec_tomont(&self, v: &NttVector<R, K>) -> NttVector<R, K> {
        let mut result = self.mul_vec(v);
        for p in &mut result.polys {
            p.to_mont();
        }
        result
    }

    /// `A * v` without Montgomery conversion.
    #[must_use]
    pub fn mul_vec(&self, v: &NttVector<R, K>) -> NttVector<R, K> {
        let mut result = NttVector::zero();
        for (r_poly, a_row) in result.polys.iter_mut().zip(self.rows.iter()) {
            *r_poly = a_row.inner_product(v);
        }
        result
    }

    #[must_use]
    pub const fn rows(&self) -> &[NttVector<R, K>; K] {
        &self.rows
    }

    #[must_use]
    pub const fn rows_mut(&mut self) -> &mut [NttVector<R, K>; K] {
        &mut self.rows
    }
}

impl<R: NttRing, const K: usize> Clone for Vector<R, K> {
    fn clone(&self) -> Self {
        Self { polys: self.polys }
    }
}

impl<R: NttRing, const K: usize> Clone for NttVector<R, K> {
    fn clone(&self) -> Self {
        Self { polys: self.polys }
    }
}

impl<R: NttRing, const K: usize> core::fmt::Debug for Vector<R, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Vector").field("k", &K).finish_non_exhaustive()
    }
}

impl<R: NttRing, const K: usize> core::fmt::Debug for NttVector<R, K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("NttVector").field("k", &K).finish_non_exhaustive()
    }
}

impl<'b, R: NttRing, const K: usize> ops::Add<&'b Vector<R, K>> for &Vector<R, K> {
    type Output = Vector<R, K>;
    fn add(self, rhs: &'b Vector<R, K>) -> Vector<R, K> {
        let mut r = self.clone();
        r += rhs;
        r
    }
}

impl<R: NttRing, const K: usize> ops::AddAssign<&Self> for Vector<R, K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<R: NttRing, const K: usize> ops::AddAssign<&Self> for NttVector<R, K> {
    fn add_assign(&mut self, rhs: &Self) {
        for (a, b) in self.polys.iter_mut().zip(rhs.polys.iter()) {
            *a += b;
        }
    }
}

impl<R: NttRing, const K: usize> Default for Vector<R, K> {
    fn default() -> Self {
        Self::zero()
    }
}

impl<R: NttRing, const K: usize> Default for NttVector<R, K> {
    fn default() -> Self {
        Self::zero()
    }
}
