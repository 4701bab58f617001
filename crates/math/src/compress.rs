//! Sealed compression-width traits and compress/decompress operations.
//!
//! Each compression width (D=1,4,5,10,11) is a zero-sized marker type
//! implementing [`CompressWidth`], eliminating runtime dispatch. All widths
//! share one branch-free rounding kernel and the little-endian bit packer in
//! [`crate::encode`].

use crate::{KYBER_Q as Q, N, encode};

mod sealed {
    pub trait Sealed {}
}

/// `ceil(2^36 / q)`: exact reciprocal for `round(x * 2^d / q)` over `x < q`,
/// `d <= 11`.
const RECIP: u64 = (1u64 << 36).div_ceil(Q as u64);

pub trait CompressWidth: sealed::Sealed {
    /// Bits per compressed coefficient.
    const D: u32;
    /// Bytes per compressed polynomial.
    const POLY_BYTES: usize = N * Self::D as usize / 8;

    /// Compress centred or canonical coefficients (`|c| < q`) and pack them.
    fn compress_poly(r: &mut [u8], coeffs: &[i16; N]) {
        let t = coeffs.map(|c| compress_coeff(csubq(c), Self::D));
        encode::pack_bits(&mut r[..Self::POLY_BYTES], &t, Self::D);
    }

    /// Unpack and decompress into `[0, q)`.
    fn decompress_poly(coeffs: &mut [i16; N], a: &[u8]) {
        let mut t = [0u16; N];
        encode::unpack_bits(&mut t, &a[..Self::POLY_BYTES], Self::D);
        for (c, &y) in coeffs.iter_mut().zip(t.iter()) {
            *c = decompress_coeff(y, Self::D) as i16;
        }
    }
}

macro_rules! compress_width {
    ($($name:ident: $d:expr),*) => {
        $(
            #[derive(Debug, Clone, Copy)]
            pub struct $name;
            impl sealed::Sealed for $name {}
            impl CompressWidth for $name {
                const D: u32 = $d;
            }
        )*
    };
}

compress_width!(D1: 1, D4: 4, D5: 5, D10: 10, D11: 11);

/// Map `a in (-q, q)` to its canonical representative in `[0, q)`.
#[inline]
#[must_use]
pub const fn csubq(a: i16) -> u16 {
    let mut t = a as u16;
    t = t.wrapping_add(((a >> 15) as u16) & (Q as u16));
    t
}

/// `round(x * 2^d / q) mod 2^d` for `x in [0, q)`, without division.
#[inline]
#[must_use]
pub const fn compress_coeff(x: u16, d: u32) -> u16 {
    let n = ((x as u64) << d) + (Q as u64) / 2;
    (((n * RECIP) >> 36) & ((1u64 << d) - 1)) as u16
}

/// `round(y * q / 2^d)`.
#[inline]
#[must_use]
pub const fn decompress_coeff(y: u16, d: u32) -> u16 {
    (((y as u32) * (Q as u32) + (1u32 << (d - 1))) >> d) as u16
}
