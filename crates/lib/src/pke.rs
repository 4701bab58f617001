//! IND-CPA public-key encryption -- the inner PKE scheme of Kyber.
//!
//! Keys and ciphertexts are fixed-size byte encodings; the rank `K` is
//! dispatched once per call from [`ParameterSet::K`] into const-generic
//! polynomial vectors.

use lattice_math::{
    KyberRing, N, NttMatrix, NttPolynomial, NttVector, Polynomial, Vector, sample::CbdWidth,
};
use rand_core::TryCryptoRng;
use sha3::digest::XofReader;
use zerocopy::transmute_ref;
use zeroize::Zeroize;

use crate::{
    Error, hash,
    params::{ByteArray, ParameterSet, SYMBYTES},
    random_seed,
    types::{Ciphertext, PkeSecretKey, PublicKey, Sym2},
};

/// Largest CBD buffer (eta = 3).
const MAX_NOISE_BYTES: usize = 3 * N / 4;

/// Sample the KxK public matrix `A` from seed `rho` using SHAKE-128.
///
/// Entry `(i, j)` reads the XOF stream `rho || j || i`; with `transposed` the
/// stream is `rho || i || j`, yielding `A^T`.
fn expand_matrix<const K: usize>(
    rho: &[u8; SYMBYTES],
    transposed: bool,
) -> NttMatrix<KyberRing, K> {
    NttMatrix::from_fn(|i, j| {
        let (x, y) = if transposed {
            (i as u8, j as u8)
        } else {
            (j as u8, i as u8)
        };
        let mut xof = hash::xof_absorb(rho, x, y);
        NttPolynomial::<KyberRing>::sample_uniform(|buf| xof.read(buf))
    })
}

/// CBD noise polynomial from `PRF(seed, nonce)`.
fn sample_noise<Eta: CbdWidth>(seed: &[u8; SYMBYTES], nonce: u8) -> Polynomial<KyberRing> {
    let mut buf = [0u8; MAX_NOISE_BYTES];
    let buf = &mut buf[..Eta::BUF_BYTES];
    hash::prf(seed, nonce, buf);
    let p = Polynomial::<KyberRing>::sample_cbd::<Eta>(buf);
    buf.zeroize();
    p
}

/// `K` noise polynomials with consecutive nonces starting at `first_nonce`.
fn sample_noise_vector<Eta: CbdWidth, const K: usize>(
    seed: &[u8; SYMBYTES],
    first_nonce: u8,
) -> Vector<KyberRing, K> {
    let mut v = Vector::zero();
    for (nonce, p) in (first_nonce..).zip(v.polys_mut().iter_mut()) {
        *p = sample_noise::<Eta>(seed, nonce);
    }
    v
}

/// The 32-byte block a plaintext of at least [`SYMBYTES`] bytes encrypts.
fn message_block(msg: &[u8]) -> Result<&[u8; SYMBYTES], Error> {
    msg.first_chunk::<SYMBYTES>()
        .ok_or(Error::MessageTooShort {
            minimum: SYMBYTES,
            actual: msg.len(),
        })
}

// -- key generation ----------------------------------------------------------

/// Deterministic key generation: `(rho, sigma) = G(seed)`,
/// `t = A s + e`, public key `Encode_12(t) || rho`, secret key `Encode_12(s)`.
#[must_use]
pub fn keypair_derand<P: ParameterSet>(
    seed: &[u8; SYMBYTES],
) -> (PublicKey<P>, PkeSecretKey<P>) {
    let mut pk = P::PkArray::zeroed();
    let mut sk = P::PkeSkArray::zeroed();
    match P::K {
        2 => keypair_inner::<P, 2>(pk.as_mut(), sk.as_mut(), seed),
        3 => keypair_inner::<P, 3>(pk.as_mut(), sk.as_mut(), seed),
        4 => keypair_inner::<P, 4>(pk.as_mut(), sk.as_mut(), seed),
        _ => unreachable!(),
    }
    (PublicKey::from_array(pk), PkeSecretKey::from_array(sk))
}

fn keypair_inner<P: ParameterSet, const K: usize>(
    pk_bytes: &mut [u8],
    sk_bytes: &mut [u8],
    seed: &[u8; SYMBYTES],
) {
    let mut expanded = hash::hash_g(seed);
    let split: &Sym2 = transmute_ref!(&expanded);
    let Sym2(rho, sigma) = split;

    let a = expand_matrix::<K>(rho, false);

    let mut s = sample_noise_vector::<P::Eta1, K>(sigma, 0).ntt();
    s.reduce();
    let e = sample_noise_vector::<P::Eta1, K>(sigma, K as u8).ntt();

    // t = A * s + e (NTT domain)
    let mut t = a.mul_vec_tomont(&s);
    t += &e;
    t.reduce();

    t.to_bytes(&mut pk_bytes[..P::POLYVEC_BYTES]);
    pk_bytes[P::POLYVEC_BYTES..].copy_from_slice(rho);
    s.to_bytes(sk_bytes);
    expanded.zeroize();
}

/// Randomised key generation with a 32-byte seed drawn from `rng`.
///
/// # Errors
///
/// [`Error::RandomnessUnavailable`] when `rng` fails.
pub fn keypair<P: ParameterSet>(
    rng: &mut impl TryCryptoRng,
) -> Result<(PublicKey<P>, PkeSecretKey<P>), Error> {
    let mut seed = random_seed::<SYMBYTES>(rng)?;
    let keys = keypair_derand::<P>(&seed);
    seed.zeroize();
    Ok(keys)
}

/// Key generation seeded from the operating system.
///
/// # Errors
///
/// [`Error::RandomnessUnavailable`] when the system source fails.
#[cfg(feature = "getrandom")]
pub fn keypair_os<P: ParameterSet>() -> Result<(PublicKey<P>, PkeSecretKey<P>), Error> {
    keypair::<P>(&mut getrandom::SysRng)
}

// -- encryption --------------------------------------------------------------

/// Deterministic encryption of the first 32 bytes of `msg` under `pk`.
///
/// # Errors
///
/// [`Error::MessageTooShort`] when `msg` holds fewer than 32 bytes.
pub fn encrypt_derand<P: ParameterSet>(
    pk: &PublicKey<P>,
    msg: &[u8],
    coins: &[u8; SYMBYTES],
) -> Result<Ciphertext<P>, Error> {
    let m = message_block(msg)?;
    Ok(encrypt_block::<P>(pk.as_bytes(), m, coins))
}

/// Randomised encryption with 32 bytes of coins drawn from `rng`.
///
/// # Errors
///
/// [`Error::MessageTooShort`] when `msg` holds fewer than 32 bytes, and
/// [`Error::RandomnessUnavailable`] when `rng` fails.
pub fn encrypt<P: ParameterSet>(
    pk: &PublicKey<P>,
    msg: &[u8],
    rng: &mut impl TryCryptoRng,
) -> Result<Ciphertext<P>, Error> {
    let m = message_block(msg)?;
    let mut coins = random_seed::<SYMBYTES>(rng)?;
    let ct = encrypt_block::<P>(pk.as_bytes(), m, &coins);
    coins.zeroize();
    Ok(ct)
}

/// Encryption with coins from the operating system.
///
/// # Errors
///
/// Same as [`encrypt`].
#[cfg(feature = "getrandom")]
pub fn encrypt_os<P: ParameterSet>(pk: &PublicKey<P>, msg: &[u8]) -> Result<Ciphertext<P>, Error> {
    encrypt::<P>(pk, msg, &mut getrandom::SysRng)
}

pub(crate) fn encrypt_block<P: ParameterSet>(
    pk_bytes: &[u8],
    m: &[u8; SYMBYTES],
    coins: &[u8; SYMBYTES],
) -> Ciphertext<P> {
    let mut ct = P::CtArray::zeroed();
    match P::K {
        2 => encrypt_inner::<P, 2>(ct.as_mut(), m, pk_bytes, coins),
        3 => encrypt_inner::<P, 3>(ct.as_mut(), m, pk_bytes, coins),
        4 => encrypt_inner::<P, 4>(ct.as_mut(), m, pk_bytes, coins),
        _ => unreachable!(),
    }
    Ciphertext::from_array(ct)
}

fn encrypt_inner<P: ParameterSet, const K: usize>(
    ct_bytes: &mut [u8],
    m: &[u8; SYMBYTES],
    pk_bytes: &[u8],
    coins: &[u8; SYMBYTES],
) {
    let (t_bytes, rho_bytes) = pk_bytes.split_at(P::POLYVEC_BYTES);
    let t = NttVector::<KyberRing, K>::from_bytes(t_bytes);
    let mut rho = [0u8; SYMBYTES];
    rho.copy_from_slice(rho_bytes);

    let at = expand_matrix::<K>(&rho, true);

    let mut r = sample_noise_vector::<P::Eta1, K>(coins, 0).ntt();
    r.reduce();
    let e1 = sample_noise_vector::<P::Eta2, K>(coins, K as u8);
    let e2 = sample_noise::<P::Eta2>(coins, 2 * K as u8);

    // u = A^T * r + e1
    let mut u = at.mul_vec(&r).ntt_inverse();
    u += &e1;
    u.reduce();

    // v = t^T * r + e2 + Decompress_1(m)
    let mut v = t.inner_product(&r).ntt_inverse();
    v += &e2;
    v += &Polynomial::<KyberRing>::from_message(m);
    v.reduce();

    let (u_bytes, v_bytes) = ct_bytes.split_at_mut(P::POLYVEC_COMPRESSED_BYTES);
    u.compress::<P::Du>(u_bytes);
    v.compress::<P::Dv>(v_bytes);
}

// -- decryption --------------------------------------------------------------

/// Recover the 32-byte message block: `m = Compress_1(v - s^T u)`.
///
/// Never fails; a ciphertext not produced under the matching public key
/// decrypts to unrelated bytes.
#[must_use]
pub fn decrypt<P: ParameterSet>(sk: &PkeSecretKey<P>, ct: &Ciphertext<P>) -> [u8; SYMBYTES] {
    decrypt_bytes::<P>(sk.as_bytes(), ct.as_bytes())
}

pub(crate) fn decrypt_bytes<P: ParameterSet>(sk_bytes: &[u8], ct_bytes: &[u8]) -> [u8; SYMBYTES] {
    match P::K {
        2 => decrypt_inner::<P, 2>(sk_bytes, ct_bytes),
        3 => decrypt_inner::<P, 3>(sk_bytes, ct_bytes),
        4 => decrypt_inner::<P, 4>(sk_bytes, ct_bytes),
        _ => unreachable!(),
    }
}

fn decrypt_inner<P: ParameterSet, const K: usize>(
    sk_bytes: &[u8],
    ct_bytes: &[u8],
) -> [u8; SYMBYTES] {
    let (u_bytes, v_bytes) = ct_bytes.split_at(P::POLYVEC_COMPRESSED_BYTES);
    let u = Vector::<KyberRing, K>::decompress::<P::Du>(u_bytes).ntt();
    let v = Polynomial::<KyberRing>::decompress::<P::Dv>(v_bytes);
    let s = NttVector::<KyberRing, K>::from_bytes(sk_bytes);

    let mut mp = &v - &s.inner_product(&u).ntt_inverse();
    mp.reduce();
    mp.to_message()
}
