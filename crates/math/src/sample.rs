//! Deterministic sampling: sealed CBD noise widths and rejection-uniform.

use crate::{KYBER_Q as Q, N};

mod sealed {
    pub trait Sealed {}
}

/// Sealed trait for CBD noise sampling width.
pub trait CbdWidth: sealed::Sealed {
    /// Each coefficient lies in `[-ETA, ETA]`.
    const ETA: usize;
    /// Pseudorandom bytes consumed per polynomial (`2 * ETA * N / 8`).
    const BUF_BYTES: usize = 2 * Self::ETA * N / 8;

    /// Centred binomial sample: coefficient `i` is the popcount of the next
    /// `ETA` bits minus the popcount of the `ETA` bits after them, reading the
    /// buffer as one little-endian bit stream.
    ///
    /// # Panics
    ///
    /// If `buf` is shorter than [`Self::BUF_BYTES`].
    #[inline]
    fn sample(r: &mut [i16; N], buf: &[u8]) {
        let buf = &buf[..Self::BUF_BYTES];
        let eta = Self::ETA as u32;
        let mask = (1u32 << eta) - 1;
        let mut acc: u32 = 0;
        let mut bits = 0;
        let mut pos = 0;
        for c in r.iter_mut() {
            while bits < 2 * eta {
                acc |= (buf[pos] as u32) << bits;
                pos += 1;
                bits += 8;
            }
            let a = (acc & mask).count_ones() as i16;
            let b = ((acc >> eta) & mask).count_ones() as i16;
            *c = a - b;
            acc >>= 2 * eta;
            bits -= 2 * eta;
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Eta2;
#[derive(Debug, Clone, Copy)]
pub struct Eta3;

impl sealed::Sealed for Eta2 {}
impl CbdWidth for Eta2 {
    const ETA: usize = 2;
}

impl sealed::Sealed for Eta3 {}
impl CbdWidth for Eta3 {
    const ETA: usize = 3;
}

/// Bytes per SHAKE128 block.
pub const SHAKE128_RATE: usize = 168;

/// Fill `r` with coefficients uniform in `[0, q)`.
///
/// `fill` is called for one XOF block at a time; every 3 bytes yield two
/// 12-bit candidates, kept when below `q`. Returns the number of coefficients
/// written, which is always `N`.
pub fn reject_uniform(r: &mut [i16; N], mut fill: impl FnMut(&mut [u8])) -> usize {
    let mut ctr = 0;
    let mut buf = [0u8; SHAKE128_RATE];

    while ctr < N {
        fill(&mut buf);
        for triple in buf.chunks_exact(3) {
            let (b0, b1, b2) = (triple[0] as u16, triple[1] as u16, triple[2] as u16);
            for val in [(b0 | (b1 << 8)) & 0x0FFF, (b1 >> 4) | (b2 << 4)] {
                if ctr < N && val < Q as u16 {
                    r[ctr] = val as i16;
                    ctr += 1;
                }
            }
            if ctr == N {
                break;
            }
        }
    }
    ctr
}
