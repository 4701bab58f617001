//! Domain-typed polynomials and vectors.
//!
//! [`Polynomial`] lives in coefficient form and [`NttPolynomial`] in the NTT
//! domain; the only way between them is the consuming `ntt` / `ntt_inverse`
//! pair, so operands from different domains cannot be mixed.

mod ntt_poly;
mod polynomial;
mod polyvec;

pub use ntt_poly::NttPolynomial;
pub use polynomial::Polynomial;
pub use polyvec::{NttMatrix, NttVector, Vector};
