//! Little-endian bit packing, 12-bit polynomial encoding and message
//! encode/decode.

use crate::{
    N, POLYBYTES, SYMBYTES,
    compress::{CompressWidth, D1, csubq},
};

/// Pack `N` values of `d` bits each into `N * d / 8` bytes, least significant
/// bit first.
///
/// # Panics
///
/// If `r` is shorter than `N * d / 8` bytes.
pub fn pack_bits(r: &mut [u8], vals: &[u16; N], d: u32) {
    let r = &mut r[..N * d as usize / 8];
    let mut acc: u32 = 0;
    let mut bits = 0;
    let mut pos = 0;
    for &v in vals {
        acc |= (v as u32) << bits;
        bits += d;
        while bits >= 8 {
            r[pos] = acc as u8;
            pos += 1;
            acc >>= 8;
            bits -= 8;
        }
    }
}

/// Inverse of [`pack_bits`]; every output is masked to `d` bits.
///
/// # Panics
///
/// If `a` is shorter than `N * d / 8` bytes.
pub fn unpack_bits(r: &mut [u16; N], a: &[u8], d: u32) {
    let a = &a[..N * d as usize / 8];
    let mask = (1u32 << d) - 1;
    let mut acc: u32 = 0;
    let mut bits = 0;
    let mut pos = 0;
    for v in r.iter_mut() {
        while bits < d {
            acc |= (a[pos] as u32) << bits;
            pos += 1;
            bits += 8;
        }
        *v = (acc & mask) as u16;
        acc >>= d;
        bits -= d;
    }
}

/// Serialise canonical 12-bit coefficients (384 bytes).
pub fn coeffs_to_bytes(r: &mut [u8], a: &[i16; N]) {
    pack_bits(&mut r[..POLYBYTES], &a.map(csubq), 12);
}

/// Deserialise 12-bit coefficients. Values are not reduced; bytes from an
/// untrusted source can yield coefficients up to 4095.
pub fn bytes_to_coeffs(r: &mut [i16; N], a: &[u8]) {
    let mut t = [0u16; N];
    unpack_bits(&mut t, &a[..POLYBYTES], 12);
    *r = t.map(|c| c as i16);
}

/// Bit `i` of the message becomes `round(q/2)` or 0 at coefficient `i`.
pub fn message_to_coeffs(r: &mut [i16; N], msg: &[u8; SYMBYTES]) {
    D1::decompress_poly(r, msg);
}

/// Coefficient `i` decodes to 1 when it is closer to `q/2` than to 0.
pub fn coeffs_to_message(msg: &mut [u8; SYMBYTES], a: &[i16; N]) {
    D1::compress_poly(msg, a);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::KYBER_Q as Q;

    #[test]
    fn tobytes_frombytes_roundtrip() {
        let mut a = [0i16; N];
        for (i, c) in a.iter_mut().enumerate() {
            *c = (i as i16 * 13) % (Q - 1);
        }
        let mut buf = [0u8; POLYBYTES];
        coeffs_to_bytes(&mut buf, &a);

        let mut b = [0i16; N];
        bytes_to_coeffs(&mut b, &buf);
        assert_eq!(a, b);
    }

    #[test]
    fn twelve_bit_layout() {
        let mut a = [0i16; N];
        a[0] = 0x123;
        a[1] = 0xABC;
        let mut buf = [0u8; POLYBYTES];
        coeffs_to_bytes(&mut buf, &a);
        assert_eq!(&buf[..3], &[0x23, 0xC1, 0xAB]);
    }

    #[test]
    fn negative_coefficients_serialise_canonically() {
        let a = [-1i16; N];
        let mut buf = [0u8; POLYBYTES];
        coeffs_to_bytes(&mut buf, &a);
        let mut b = [0i16; N];
        bytes_to_coeffs(&mut b, &buf);
        assert!(b.iter().all(|&c| c == Q - 1));
    }

    #[test]
    fn pack_unpack_four_bits() {
        let vals: [u16; N] = core::array::from_fn(|i| (i % 16) as u16);
        let mut buf = [0u8; N / 2];
        pack_bits(&mut buf, &vals, 4);
        assert_eq!(buf[0], 0x10);
        assert_eq!(buf[1], 0x32);
        let mut back = [0u16; N];
        unpack_bits(&mut back, &buf, 4);
        assert_eq!(back, vals);
    }

    #[test]
    fn pack_leaves_trailing_bytes_alone() {
        let vals = [0x3FFu16; N];
        let mut buf = [0xA5u8; N * 10 / 8 + 2];
        pack_bits(&mut buf, &vals, 10);
        assert!(buf[..N * 10 / 8].iter().all(|&b| b == 0xFF));
        assert_eq!(buf[N * 10 / 8..], [0xA5, 0xA5]);
    }

    #[test]
    #[should_panic]
    fn pack_into_short_buffer_panics() {
        let vals = [1u16; N];
        let mut buf = [0u8; N * 11 / 8 - 1];
        pack_bits(&mut buf, &vals, 11);
    }

    #[test]
    #[should_panic]
    fn unpack_from_short_buffer_panics() {
        let buf = [0u8; N / 2 - 1];
        let mut out = [0u16; N];
        unpack_bits(&mut out, &buf, 4);
    }

    #[test]
    #[should_panic]
    fn bytes_to_coeffs_rejects_short_input() {
        let buf = [0u8; POLYBYTES - 3];
        let mut out = [0i16; N];
        bytes_to_coeffs(&mut out, &buf);
    }

    #[test]
    fn frommsg_tomsg_roundtrip() {
        let msg: [u8; SYMBYTES] = core::array::from_fn(|i| (i * 37) as u8);
        let mut poly = [0i16; N];
        message_to_coeffs(&mut poly, &msg);
        assert!(poly.iter().all(|&c| c == 0 || c == (Q + 1) / 2));

        let mut recovered = [0u8; SYMBYTES];
        coeffs_to_message(&mut recovered, &poly);
        assert_eq!(msg, recovered);
    }

    #[test]
    fn message_decoding_thresholds() {
        let mut poly = [0i16; N];
        poly[0] = 832; // just below q/4: decodes to 0
        poly[1] = 833; // decodes to 1
        poly[2] = 2496; // just below 3q/4: decodes to 1
        poly[3] = 2497; // decodes to 0
        poly[4] = -833; // same as q - 833
        let mut msg = [0u8; SYMBYTES];
        coeffs_to_message(&mut msg, &poly);
        assert_eq!(msg[0], 0b0001_0110);
    }
}
