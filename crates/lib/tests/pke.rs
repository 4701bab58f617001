//! Kyber CPA encryption checks and error propagation from the RNG.

use core::fmt;

use kyber_rs::{
    Ciphertext, Error, Kyber512, Kyber768, Kyber1024, ParameterSet, PkeSecretKey, PublicKey,
    pke,
};

fn fixed_seed(variant: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_add(variant.wrapping_mul(41)))
}

fn fixed_message(variant: u8) -> [u8; 32] {
    core::array::from_fn(|i| (i as u8).wrapping_mul(29).wrapping_add(variant))
}

/// RNG that refuses every request.
struct FailingRng;

#[derive(Debug)]
struct EntropyExhausted;

impl fmt::Display for EntropyExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("entropy exhausted")
    }
}

impl core::error::Error for EntropyExhausted {}

impl rand_core::TryRng for FailingRng {
    type Error = EntropyExhausted;

    fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
        Err(EntropyExhausted)
    }

    fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
        Err(EntropyExhausted)
    }

    fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
        Err(EntropyExhausted)
    }
}

impl rand_core::TryCryptoRng for FailingRng {}

fn check_pke_roundtrip<P: ParameterSet>() {
    let (pk, sk) = pke::keypair_derand::<P>(&fixed_seed(0));
    for variant in 0..4 {
        let msg = fixed_message(variant);
        let ct = pke::encrypt_derand::<P>(&pk, &msg, &fixed_seed(variant + 1))
            .expect("32-byte message");
        assert_eq!(pke::decrypt::<P>(&sk, &ct), msg, "variant {variant}");
    }
}

fn check_pke_determinism<P: ParameterSet>() {
    let (pk1, sk1) = pke::keypair_derand::<P>(&fixed_seed(2));
    let (pk2, sk2) = pke::keypair_derand::<P>(&fixed_seed(2));
    assert_eq!(pk1, pk2);
    assert_eq!(sk1, sk2);

    let msg = fixed_message(2);
    let ct1 = pke::encrypt_derand::<P>(&pk1, &msg, &fixed_seed(3)).expect("32-byte message");
    let ct2 = pke::encrypt_derand::<P>(&pk1, &msg, &fixed_seed(3)).expect("32-byte message");
    let ct3 = pke::encrypt_derand::<P>(&pk1, &msg, &fixed_seed(4)).expect("32-byte message");
    assert_eq!(ct1, ct2);
    assert_ne!(ct1, ct3);
    assert_eq!(pke::decrypt::<P>(&sk1, &ct3), msg);
}

fn check_pke_sizes<P: ParameterSet>() {
    let (pk, sk) = pke::keypair_derand::<P>(&fixed_seed(5));
    let ct = pke::encrypt_derand::<P>(&pk, &fixed_message(5), &fixed_seed(6))
        .expect("32-byte message");
    assert_eq!(pk.as_bytes().len(), P::PK_BYTES);
    assert_eq!(sk.as_bytes().len(), P::PKE_SK_BYTES);
    assert_eq!(ct.as_bytes().len(), P::CT_BYTES);
}

fn check_pke_key_bytes_roundtrip<P: ParameterSet>() {
    let (pk, sk) = pke::keypair_derand::<P>(&fixed_seed(7));
    let pk2 = PublicKey::<P>::try_from(pk.as_bytes()).expect("public key length");
    let sk2 = PkeSecretKey::<P>::try_from(sk.as_bytes()).expect("secret key length");

    let msg = fixed_message(7);
    let ct = pke::encrypt_derand::<P>(&pk2, &msg, &fixed_seed(8)).expect("32-byte message");
    let ct2 = Ciphertext::<P>::try_from(ct.as_bytes()).expect("ciphertext length");
    assert_eq!(pke::decrypt::<P>(&sk2, &ct2), msg);
    assert!(PkeSecretKey::<P>::try_from(&sk.as_bytes()[1..]).is_err());
}

fn check_randomized_pke<P: ParameterSet>() {
    let mut rng = getrandom::SysRng;
    let (pk, sk) = pke::keypair::<P>(&mut rng).expect("system randomness");
    let msg = fixed_message(9);
    let ct = pke::encrypt::<P>(&pk, &msg, &mut rng).expect("system randomness");
    assert_eq!(pke::decrypt::<P>(&sk, &ct), msg);

    let (pk, sk) = pke::keypair_os::<P>().expect("system randomness");
    let ct = pke::encrypt_os::<P>(&pk, &msg).expect("system randomness");
    assert_eq!(pke::decrypt::<P>(&sk, &ct), msg);
}

fn check_failing_rng<P: ParameterSet>() {
    let (pk, _) = pke::keypair_derand::<P>(&fixed_seed(10));
    assert_eq!(
        pke::keypair::<P>(&mut FailingRng).unwrap_err(),
        Error::RandomnessUnavailable
    );
    assert_eq!(
        pke::encrypt::<P>(&pk, &fixed_message(10), &mut FailingRng).unwrap_err(),
        Error::RandomnessUnavailable
    );
    assert_eq!(
        kyber_rs::keypair::<P>(&mut FailingRng).unwrap_err(),
        Error::RandomnessUnavailable
    );
    assert_eq!(
        kyber_rs::encapsulate::<P>(&pk, &mut FailingRng).unwrap_err(),
        Error::RandomnessUnavailable
    );
}

fn check_short_message<P: ParameterSet>() {
    let (pk, _) = pke::keypair_derand::<P>(&fixed_seed(11));
    assert_eq!(
        pke::encrypt_derand::<P>(&pk, &[], &fixed_seed(12)).unwrap_err(),
        Error::MessageTooShort {
            minimum: 32,
            actual: 0
        }
    );
    assert!(pke::encrypt::<P>(&pk, &[7u8; 31], &mut getrandom::SysRng).is_err());
}

/// Random seeds and messages; decryption failures are expected with
/// probability below 2^-139, so any mismatch is reported.
fn check_failure_sweep<P: ParameterSet>() {
    let mut failures = 0;
    for trial in 0..64 {
        let mut material = [0u8; 96];
        getrandom::fill(&mut material).expect("system randomness");
        let (seed, rest) = material.split_at(32);
        let (msg, coins) = rest.split_at(32);
        let seed: [u8; 32] = seed.try_into().expect("32 bytes");
        let coins: [u8; 32] = coins.try_into().expect("32 bytes");

        let (pk, sk) = pke::keypair_derand::<P>(&seed);
        let ct = pke::encrypt_derand::<P>(&pk, msg, &coins).expect("32-byte message");
        let got = pke::decrypt::<P>(&sk, &ct);
        if got[..] != msg[..] {
            failures += 1;
            eprintln!(
                "{} trial {trial}: seed={} msg={} coins={} got={}",
                P::NAME,
                hex::encode(seed),
                hex::encode(msg),
                hex::encode(coins),
                hex::encode(got)
            );
        }
    }
    assert!(failures <= 1, "{failures} decryption failures");
}

macro_rules! check_for_param_set {
    ($($module:ident => $ty:ident),* $(,)?) => {
        $(
            mod $module {
                use super::*;

                #[test]
                fn pke_roundtrip() {
                    check_pke_roundtrip::<$ty>();
                }

                #[test]
                fn pke_determinism() {
                    check_pke_determinism::<$ty>();
                }

                #[test]
                fn pke_sizes() {
                    check_pke_sizes::<$ty>();
                }

                #[test]
                fn pke_key_bytes_roundtrip() {
                    check_pke_key_bytes_roundtrip::<$ty>();
                }

                #[test]
                fn randomized_pke() {
                    check_randomized_pke::<$ty>();
                }

                #[test]
                fn failing_rng() {
                    check_failing_rng::<$ty>();
                }

                #[test]
                fn short_message() {
                    check_short_message::<$ty>();
                }

                #[test]
                fn failure_sweep() {
                    check_failure_sweep::<$ty>();
                }
            }
        )*
    };
}

check_for_param_set!(
    kyber512 => Kyber512,
    kyber768 => Kyber768,
    kyber1024 => Kyber1024,
);

#[test]
fn zero_seed_kyber512() {
    let (pk, sk) = pke::keypair_derand::<Kyber512>(&[0u8; 32]);
    assert_eq!(pk.as_bytes().len(), 800);
    assert_eq!(sk.as_bytes().len(), 768);

    let zero = [0u8; 32];
    let ct1 = pke::encrypt_derand::<Kyber512>(&pk, &zero, &zero).expect("32-byte message");
    let ct2 = pke::encrypt_derand::<Kyber512>(&pk, &zero, &zero).expect("32-byte message");
    assert_eq!(ct1.as_bytes(), ct2.as_bytes());
    assert_eq!(pke::decrypt::<Kyber512>(&sk, &ct1), zero);
}

#[test]
fn public_key_of_length_one_is_rejected() {
    assert_eq!(
        PublicKey::<Kyber768>::try_from(&[0u8][..]).unwrap_err(),
        Error::InvalidLength {
            expected: 1184,
            actual: 1
        }
    );
}

#[test]
fn error_messages_name_the_lengths() {
    let err = PublicKey::<Kyber1024>::try_from(&[0u8; 3][..]).unwrap_err();
    assert_eq!(err.to_string(), "invalid length: expected 1568, got 3");
    assert_eq!(
        Error::RandomnessUnavailable.to_string(),
        "random number generator failed"
    );
}
