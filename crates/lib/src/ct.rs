//! Constant-time comparison and conditional move. No secret-dependent
//! branching or early exit.

use subtle::{Choice, ConditionallySelectable, ConstantTimeEq};

/// Constant-time byte-slice equality. Slices of different lengths compare
/// unequal; lengths are public.
#[inline]
pub fn verify(a: &[u8], b: &[u8]) -> Choice {
    a.ct_eq(b)
}

/// Overwrite `dst` with `src` when `choice` is set, leave it otherwise.
#[inline]
pub fn cmov<const L: usize>(dst: &mut [u8; L], src: &[u8; L], choice: Choice) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        d.conditional_assign(s, choice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_equal() {
        let a = [0u8; 64];
        let b = [0u8; 64];
        assert!(bool::from(verify(&a, &b)));
    }

    #[test]
    fn verify_differ_first_byte() {
        let a = [0u8; 64];
        let mut b = [0u8; 64];
        b[0] = 1;
        assert!(!bool::from(verify(&a, &b)));
    }

    #[test]
    fn verify_differ_last_byte() {
        let a = [0u8; 64];
        let mut b = [0u8; 64];
        b[63] = 0x80;
        assert!(!bool::from(verify(&a, &b)));
    }

    #[test]
    fn verify_length_mismatch() {
        assert!(!bool::from(verify(&[0u8; 3], &[0u8; 4])));
    }

    #[test]
    fn verify_empty_slices() {
        assert!(bool::from(verify(&[], &[])));
    }

    #[test]
    fn cmov_unset_is_noop() {
        let mut dst = [0xAA_u8; 32];
        let src = [0xBB_u8; 32];
        cmov(&mut dst, &src, Choice::from(0));
        assert!(dst.iter().all(|&b| b == 0xAA));
    }

    #[test]
    fn cmov_set_copies() {
        let mut dst = [0xAA_u8; 32];
        let src = [0xBB_u8; 32];
        cmov(&mut dst, &src, Choice::from(1));
        assert!(dst.iter().all(|&b| b == 0xBB));
    }
}
