//! Kyber IND-CCA2 key encapsulation (round-3 Fujisaki-Okamoto transform).
//!
//! - keygen: `(pk, pke_sk) = PKE.KeyGen(d)`, `sk = pke_sk || pk || H(pk) || z`
//! - encaps: `m = H(coins)`, `(K', r) = G(m || H(pk))`, `c = PKE.Enc(pk, m, r)`,
//!   `ss = KDF(K' || H(c))`
//! - decaps: re-encrypt the decrypted message and compare in constant time;
//!   on mismatch the shared secret is `KDF(z || H(c))`.
//!
//! Output sizes are derived from [`ParameterSet`] associated types.

use rand_core::TryCryptoRng;
use zerocopy::transmute_ref;
use zeroize::Zeroize;

use crate::{
    Error, ct, hash, pke,
    params::{ParameterSet, SYMBYTES},
    random_seed,
    types::{Ciphertext, PublicKey, SecretKey, SharedSecret, Sym2},
};

/// `ss = KDF(prefix || H(c))`.
fn derive_shared_secret(prefix: &[u8; SYMBYTES], ct: &[u8]) -> SharedSecret {
    let mut kc = [0u8; 2 * SYMBYTES];
    kc[..SYMBYTES].copy_from_slice(prefix);
    kc[SYMBYTES..].copy_from_slice(&hash::hash_h(ct));
    let mut ss = hash::kdf(kc);
    kc.zeroize();
    let out = SharedSecret::from(&ss);
    ss.zeroize();
    out
}

/// `(K', r) = G(m || h)`.
fn expand_message(m: &[u8; SYMBYTES], h: &[u8]) -> [u8; 2 * SYMBYTES] {
    let mut buf = [0u8; 2 * SYMBYTES];
    buf[..SYMBYTES].copy_from_slice(m);
    buf[SYMBYTES..].copy_from_slice(h);
    let kr = hash::hash_g(buf);
    buf.zeroize();
    kr
}

/// Deterministic key generation from a 64-byte seed `(d || z)`.
#[must_use]
pub fn keypair_derand<P: ParameterSet>(
    coins: &[u8; 2 * SYMBYTES],
) -> (PublicKey<P>, SecretKey<P>) {
    let split: &Sym2 = transmute_ref!(coins);
    let Sym2(d, z) = split;

    let (pk, pke_sk) = pke::keypair_derand::<P>(d);
    let sk = SecretKey::assemble(&pke_sk, &pk, &hash::hash_h(pk.as_bytes()), z);

    (pk, sk)
}

/// Randomised key generation with a 64-byte seed drawn from `rng`.
///
/// # Errors
///
/// [`Error::RandomnessUnavailable`] when `rng` fails.
pub fn keypair<P: ParameterSet>(
    rng: &mut impl TryCryptoRng,
) -> Result<(PublicKey<P>, SecretKey<P>), Error> {
    let mut coins = random_seed::<{ 2 * SYMBYTES }>(rng)?;
    let keys = keypair_derand::<P>(&coins);
    coins.zeroize();
    Ok(keys)
}

/// Key generation seeded from the operating system.
///
/// # Errors
///
/// [`Error::RandomnessUnavailable`] when the system source fails.
#[cfg(feature = "getrandom")]
pub fn keypair_os<P: ParameterSet>() -> Result<(PublicKey<P>, SecretKey<P>), Error> {
    keypair::<P>(&mut getrandom::SysRng)
}

/// Deterministic encapsulation with explicit 32-byte randomness.
#[must_use]
pub fn encapsulate_derand<P: ParameterSet>(
    pk: &PublicKey<P>,
    coins: &[u8; SYMBYTES],
) -> (Ciphertext<P>, SharedSecret) {
    let mut m = hash::hash_h(coins);
    let mut kr = expand_message(&m, &hash::hash_h(pk.as_bytes()));
    let split: &Sym2 = transmute_ref!(&kr);
    let Sym2(k, r) = split;

    let ct = pke::encrypt_block::<P>(pk.as_bytes(), &m, r);
    let ss = derive_shared_secret(k, ct.as_bytes());

    m.zeroize();
    kr.zeroize();
    (ct, ss)
}

/// Randomised encapsulation.
///
/// # Errors
///
/// [`Error::RandomnessUnavailable`] when `rng` fails.
pub fn encapsulate<P: ParameterSet>(
    pk: &PublicKey<P>,
    rng: &mut impl TryCryptoRng,
) -> Result<(Ciphertext<P>, SharedSecret), Error> {
    let mut coins = random_seed::<SYMBYTES>(rng)?;
    let out = encapsulate_derand::<P>(pk, &coins);
    coins.zeroize();
    Ok(out)
}

/// Encapsulation with randomness from the operating system.
///
/// # Errors
///
/// [`Error::RandomnessUnavailable`] when the system source fails.
#[cfg(feature = "getrandom")]
pub fn encapsulate_os<P: ParameterSet>(
    pk: &PublicKey<P>,
) -> Result<(Ciphertext<P>, SharedSecret), Error> {
    encapsulate::<P>(pk, &mut getrandom::SysRng)
}

/// Decapsulation with implicit rejection.
///
/// A ciphertext that does not re-encrypt to itself yields a pseudorandom
/// secret derived from `z`, never an error.
#[must_use]
pub fn decapsulate<P: ParameterSet>(sk: &SecretKey<P>, ct: &Ciphertext<P>) -> SharedSecret {
    let mut m = pke::decrypt_bytes::<P>(sk.pke_secret_bytes(), ct.as_bytes());
    let mut kr = expand_message(&m, sk.public_key_hash());
    let split: &Sym2 = transmute_ref!(&kr);
    let Sym2(k, r) = split;

    let ct_prime = pke::encrypt_block::<P>(sk.public_key_bytes(), &m, r);
    let ok = ct::verify(ct.as_bytes(), ct_prime.as_bytes());

    let mut prefix = *k;
    let mut z = sk.rejection_secret();
    ct::cmov(&mut prefix, &z, !ok);
    let ss = derive_shared_secret(&prefix, ct.as_bytes());

    m.zeroize();
    kr.zeroize();
    prefix.zeroize();
    z.zeroize();
    ss
}
