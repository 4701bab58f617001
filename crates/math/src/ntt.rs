//! Number-Theoretic Transform over `Z_q[X]/(X^{256}+1)`, generic over the ring.
//!
//! One Cooley-Tukey forward / Gentleman-Sande inverse schedule serves both
//! fields. A ring is described by its root table, the length `MIN_LEN` of the
//! blocks the transform stops at, and the finishing constant of the inverse:
//!
//! | ring      | q       | root ζ | MIN_LEN | blocks in NTT domain      |
//! |-----------|---------|--------|---------|---------------------------|
//! | Kyber     | 3329    | 17     | 2       | 128 × `Z_q[X]/(X^2 - ζ_i)` |
//! | Dilithium | 8380417 | 1753   | 1       | 256 × `Z_q`               |
//!
//! - [`forward_ntt`]: standard order -> bit-reversed order.
//! - [`inverse_ntt`]: bit-reversed order -> standard order, scaled by `R`.
//! - [`pointwise_multiply`]: per-block products in the NTT domain.

use crate::{
    DILITHIUM_Q, DilithiumRing, KYBER_Q, KyberRing, N,
    reduce::{Coefficient, Modulus},
};

/// Ring with a negacyclic NTT of degree [`N`].
pub trait NttRing: Modulus {
    /// Smallest butterfly half-length; blocks in the NTT domain have this many
    /// coefficients.
    const MIN_LEN: usize;

    /// Twiddle factors in Montgomery form, bit-reversed order. Index 0 is never
    /// read.
    const ZETAS: &'static [Self::Coeff];

    /// `R^2 / (N / MIN_LEN) mod q`, applied at the end of the inverse
    /// transform.
    const F: Self::Coeff;
}

const fn pow_mod(mut base: i64, mut exp: i64, modulus: i64) -> i64 {
    let mut result: i64 = 1;
    base %= modulus;
    while exp > 0 {
        if exp & 1 == 1 {
            result = result * base % modulus;
        }
        exp >>= 1;
        base = base * base % modulus;
    }
    result
}

const fn bitrev(x: usize, bits: u32) -> usize {
    let mut r = 0;
    let mut i = 0;
    while i < bits {
        r |= ((x >> i) & 1) << (bits - 1 - i);
        i += 1;
    }
    r
}

/// Centred representative of `val mod q` in `[-(q-1)/2, (q-1)/2]`.
const fn centred(val: i64, q: i64) -> i64 {
    let val = val % q;
    if val > q / 2 { val - q } else { val }
}

/// `ζ^{BitRev(i)} · R mod q`, centred.
const fn twiddle(zeta: i64, i: usize, bits: u32, r_mod_q: i64, q: i64) -> i64 {
    centred(pow_mod(zeta, bitrev(i, bits) as i64, q) * r_mod_q, q)
}

/// `R^2 · n^{-1} mod q`, centred.
const fn finishing_constant(r_mod_q: i64, n: i64, q: i64) -> i64 {
    centred(r_mod_q * r_mod_q % q * pow_mod(n, q - 2, q), q)
}

/// Kyber twiddles from the primitive 256th root of unity ζ = 17.
///
/// `KYBER_ZETAS[i] = ζ^{BitRev₇(i)} · 2¹⁶ (mod q)`, centred to signed.
pub const KYBER_ZETAS: [i16; 128] = {
    const Q64: i64 = KYBER_Q as i64;
    const MONT: i64 = (1 << 16) % Q64;

    let mut zetas = [0i16; 128];
    let mut i = 0;
    while i < 128 {
        zetas[i] = twiddle(17, i, 7, MONT, Q64) as i16;
        i += 1;
    }
    zetas
};

/// Dilithium twiddles from the primitive 512th root of unity ζ = 1753.
///
/// `DILITHIUM_ZETAS[i] = ζ^{BitRev₈(i)} · 2³² (mod q)`, centred to signed.
pub const DILITHIUM_ZETAS: [i32; 256] = {
    const Q64: i64 = DILITHIUM_Q as i64;
    const MONT: i64 = (1 << 32) % Q64;

    let mut zetas = [0i32; 256];
    let mut i = 1;
    while i < 256 {
        zetas[i] = twiddle(1753, i, 8, MONT, Q64) as i32;
        i += 1;
    }
    zetas
};

impl NttRing for KyberRing {
    const MIN_LEN: usize = 2;
    const ZETAS: &'static [i16] = &KYBER_ZETAS;
    const F: i16 = finishing_constant((1 << 16) % KYBER_Q as i64, 128, KYBER_Q as i64) as i16;
}

impl NttRing for DilithiumRing {
    const MIN_LEN: usize = 1;
    const ZETAS: &'static [i32] = &DILITHIUM_ZETAS;
    const F: i32 =
        finishing_constant((1 << 32) % DILITHIUM_Q as i64, 256, DILITHIUM_Q as i64) as i32;
}

// The schedule needs a primitive (2N / MIN_LEN)-th root of unity and nothing
// finer: q = 1 mod 2N/MIN_LEN, and for Kyber q != 1 mod 2N so X^2 - ζ_i stays
// irreducible.
const _: () = {
    assert!(KYBER_Q as usize % (2 * N / KyberRing::MIN_LEN) == 1);
    assert!(KYBER_Q as usize % (2 * N) != 1);
    assert!(DILITHIUM_Q as usize % (2 * N / DilithiumRing::MIN_LEN) == 1);
    assert!(KYBER_ZETAS.len() == N / KyberRing::MIN_LEN);
    assert!(DILITHIUM_ZETAS.len() == N / DilithiumRing::MIN_LEN);
    assert!(KyberRing::F == 1441);
    assert!(DilithiumRing::F == 41978);
};

#[inline]
fn butterfly_forward<R: Modulus>(lo: &mut [R::Coeff], hi: &mut [R::Coeff], zeta: R::Coeff) {
    for (l, h) in lo.iter_mut().zip(hi.iter_mut()) {
        let t = R::fqmul(zeta, *h);
        *h = *l - t;
        *l += t;
    }
}

#[inline]
fn butterfly_inverse<R: Modulus>(lo: &mut [R::Coeff], hi: &mut [R::Coeff], zeta: R::Coeff) {
    for (l, h) in lo.iter_mut().zip(hi.iter_mut()) {
        let t = *l;
        *l = R::barrett_reduce(t + *h);
        *h = R::fqmul(zeta, *h - t);
    }
}

/// Forward NTT (in-place). Standard order in, bit-reversed order out.
///
/// Coefficients grow by at most `q` per layer; inputs bounded by `q` in
/// absolute value are safe for both rings.
pub fn forward_ntt<R: NttRing>(r: &mut [R::Coeff; N]) {
    let mut k: usize = 1;
    let mut len = N / 2;
    while len >= R::MIN_LEN {
        for block in r.chunks_exact_mut(2 * len) {
            let zeta = R::ZETAS[k];
            k += 1;
            let (lo, hi) = block.split_at_mut(len);
            butterfly_forward::<R>(lo, hi, zeta);
        }
        len >>= 1;
    }
}

/// Inverse NTT (in-place). Bit-reversed in, standard order out,
/// each coefficient scaled by the Montgomery factor `R`.
pub fn inverse_ntt<R: NttRing>(r: &mut [R::Coeff; N]) {
    let mut k = R::ZETAS.len() - 1;
    let mut len = R::MIN_LEN;
    while len <= N / 2 {
        for block in r.chunks_exact_mut(2 * len) {
            let zeta = R::ZETAS[k];
            k = k.wrapping_sub(1);
            let (lo, hi) = block.split_at_mut(len);
            butterfly_inverse::<R>(lo, hi, zeta);
        }
        len <<= 1;
    }
    for c in r.iter_mut() {
        *c = R::fqmul(*c, R::F);
    }
}

/// Product of two length-`m` blocks in `Z_q[X]/(X^m - ζ)`, Montgomery-reduced.
///
/// Terms whose degree wraps past `m - 1` pick up a factor of `ζ`. With
/// `m = 2` this is the Kyber base multiplication, with `m = 1` a plain
/// Montgomery product.
#[inline]
pub fn basemul_block<R: Modulus>(
    r: &mut [R::Coeff],
    a: &[R::Coeff],
    b: &[R::Coeff],
    zeta: R::Coeff,
) {
    let m = r.len();
    for (k, rk) in r.iter_mut().enumerate() {
        let mut acc = R::Coeff::ZERO;
        for i in (k + 1)..m {
            acc += R::fqmul(R::fqmul(a[i], b[k + m - i]), zeta);
        }
        for i in 0..=k {
            acc += R::fqmul(a[i], b[k - i]);
        }
        *rk = acc;
    }
}

/// Pointwise product of two NTT-domain polynomials.
///
/// Block `j` of length `MIN_LEN` is reduced modulo `X^{MIN_LEN} - γ_j`, where
/// consecutive blocks share a root and alternate its sign. The result carries
/// an extra `R^{-1}`, cancelled by [`inverse_ntt`].
#[must_use]
pub fn pointwise_multiply<R: NttRing>(a: &[R::Coeff; N], b: &[R::Coeff; N]) -> [R::Coeff; N] {
    let m = R::MIN_LEN;
    let first = N / (2 * m);
    let mut r = [R::Coeff::ZERO; N];
    let blocks = r
        .chunks_exact_mut(m)
        .zip(a.chunks_exact(m).zip(b.chunks_exact(m)));
    for (j, (rb, (ab, bb))) in blocks.enumerate() {
        let zeta = R::ZETAS[first + j / 2];
        let zeta = if j % 2 == 0 { zeta } else { -zeta };
        basemul_block::<R>(rb, ab, bb, zeta);
    }
    r
}
