//! Unit tests for the VDF engine
//!
//! Known-answer vectors use the 255-bit reference modulus, a fixed swap
//! context and block hash. They cover every stage of the pipeline, the
//! proof blob, verification failures and input normalization.

#![allow(clippy::missing_panics_doc)]

use super::*;
use crate::progress::NoProgress;
use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use alloc::format;
use hex_literal::hex;
use num_traits::One;

const ORIGIN: [u8; 20] = hex!("5aeda56215b167893e80b4fe645ba6d5bab767de");
const PATH: [[u8; 20]; 3] = [
    hex!("c02aaa39b223fe8d0a0e5c4f27ead9083c756cc2"),
    hex!("a0b86991c6218b36c1d19d4a2e9eb0ce3606eb48"),
    hex!("6b175474e89094c44da98b954eedeac495271d0f"),
];
const BLOCK_HASH: Hash256 = hex!("88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6");
const BLOCK_NUMBER: u64 = 3_141_592;

const SEED: Hash256 = hex!("e733ca7bb3600593968cb2aa6bb92672055310ec0a7a99868443819fd6e9830d");
const X: &str = "24495777523951811460925943788801984050732156644566894038697775080914099829309";
const Y_1000: &str = "5242569729160557928874164700269779193791032534701345916765691324477960038131";
const C_1000: &str = "104595056227331258080116773525287520513271699417464824659463144581401695704483";
const PI_1000: &str = "39576379605029489400881542936457040544669793319995459229609084021734739329668";
const BLOB_1000: &str = "0x577f6fe28776c4f7a000ca0c3063fc17d30caf26aece8e8623e2a52d1190c2840b973076d91d19fb7c10fc589ae182a149ed140d1210c947b1c66aa5b8ab26f300000000000000000000000000000000000000000000000000000000002fefd8";

fn big(s: &str) -> BigUint {
    s.parse().unwrap()
}

fn modulus() -> BigUint {
    big(constants::DEFAULT_MODULUS_DEC)
}

fn test_context() -> SwapContext {
    SwapContext::new(
        Address(ORIGIN),
        PATH.iter().copied().map(Address).collect(),
        BigUint::from(123_456_789_012_345_678u64),
        BigUint::from(987_654_321_098_765_432u64),
    )
}

fn test_request(delay: u64) -> GenerateRequest {
    GenerateRequest {
        params: VdfParams::default().with_delay(delay).unwrap(),
        context: test_context(),
        block_hash: BLOCK_HASH,
        block_number: BigUint::from(BLOCK_NUMBER),
    }
}

fn verify_request(delay: u64, proof: Vec<u8>) -> VerifyRequest {
    VerifyRequest {
        params: VdfParams::default().with_delay(delay).unwrap(),
        context: test_context(),
        block_hash: BLOCK_HASH,
        proof,
    }
}

// ——— seed / x ————————————————————————————————————————————————————————————————

#[test]
fn test_seed_known_vector() {
    assert_eq!(test_context().seed(), SEED);
    assert_eq!(
        seed_hex(&SEED),
        "0xe733ca7bb3600593968cb2aa6bb92672055310ec0a7a99868443819fd6e9830d"
    );

    let empty = generate_seed(&Address(ORIGIN), &[], &BigUint::default(), &BigUint::default());
    assert_eq!(
        empty,
        hex!("4c329a7521cea34031c8741d55d3bd069b0b7e5e8d05d0a7cd746ebed498c406")
    );
}

#[test]
fn test_seed_binds_every_field() {
    let base = test_context();

    let mut reordered = base.clone();
    reordered.path.swap(0, 2);
    assert_ne!(reordered.seed(), base.seed());

    let mut shorter = base.clone();
    shorter.path.pop();
    assert_ne!(shorter.seed(), base.seed());

    let mut other_origin = base.clone();
    other_origin.origin = Address(PATH[0]);
    assert_ne!(other_origin.seed(), base.seed());

    let mut qty_in = base.clone();
    qty_in.known_qty_in += 1u32;
    assert_ne!(qty_in.seed(), base.seed());

    // Swapping the quantities is not the same context
    let mut swapped = base.clone();
    core::mem::swap(&mut swapped.known_qty_in, &mut swapped.known_qty_out);
    assert_ne!(swapped.seed(), base.seed());
}

#[test]
fn test_seed_truncates_oversized_quantities() {
    let base = test_context();
    let mut wide = base.clone();
    wide.known_qty_in = &base.known_qty_in + (BigUint::one() << 256u32);
    assert_eq!(wide.seed(), base.seed());
}

#[test]
fn test_generate_x_known_vector() {
    let n = modulus();
    let x = generate_x(&n, &SEED, &BLOCK_HASH);
    assert_eq!(x, big(X));
    assert!(x < n);

    let mut other_hash = BLOCK_HASH;
    other_hash[0] ^= 1;
    assert_ne!(generate_x(&n, &SEED, &other_hash), x);
}

#[test]
fn test_generate_x_reduces_modulo_small_n() {
    let n = BigUint::from(1_000_003u32);
    for i in 0u8..16 {
        let mut seed = SEED;
        seed[31] = i;
        assert!(generate_x(&n, &seed, &BLOCK_HASH) < n);
    }
}

// ——— evaluator ———————————————————————————————————————————————————————————————

#[test]
fn test_evaluate_known_vectors() {
    let n = modulus();
    let x = big(X);
    assert_eq!(
        evaluate_vdf(&x, &n, 5, &mut NoProgress),
        big("38912973654245823560009993742637736785241595931000169629510241143727854528508")
    );
    assert_eq!(evaluate_vdf(&x, &n, 1_000, &mut NoProgress), big(Y_1000));
}

#[test]
fn test_evaluate_matches_direct_exponentiation() {
    let n = modulus();
    let x = big(X);
    for t in [0u64, 1, 2, 17, 64, 200] {
        let exponent = BigUint::one() << t;
        assert_eq!(evaluate_vdf(&x, &n, t, &mut NoProgress), x.modpow(&exponent, &n));
    }
}

#[test]
fn test_evaluate_zero_delay_is_identity() {
    let n = modulus();
    let x = big(X);
    assert_eq!(evaluate_vdf(&x, &n, 0, &mut NoProgress), x);
}

// ——— Fiat–Shamir —————————————————————————————————————————————————————————————

#[test]
fn test_challenge_known_vectors() {
    let n = modulus();
    let x = big(X);
    assert_eq!(generate_challenge(&x, &big(Y_1000), &n, 1_000), big(C_1000));
    assert_eq!(
        generate_challenge(
            &x,
            &big("38912973654245823560009993742637736785241595931000169629510241143727854528508"),
            &n,
            5
        ),
        big("46704054831875920825105821882743773301524552186472680320700612408061267646987")
    );
}

#[test]
fn test_challenge_is_odd_and_binds_delay() {
    let n = modulus();
    let x = big(X);
    let y = big(Y_1000);
    for t in 0..64u64 {
        let c = generate_challenge(&x, &y, &n, t);
        assert!(c.bit(0), "challenge for t={t} is even");
    }
    assert_ne!(
        generate_challenge(&x, &y, &n, 1_000),
        generate_challenge(&x, &y, &n, 1_001)
    );
}

// ——— prover ——————————————————————————————————————————————————————————————————

#[test]
fn test_proof_known_vectors() {
    let n = modulus();
    let x = big(X);
    assert_eq!(
        generate_proof(&x, &big(C_1000), &n, 1_000, &mut NoProgress),
        big(PI_1000)
    );

    // 2^5 < c, so the quotient and therefore the proof are trivial
    let c5 = big("46704054831875920825105821882743773301524552186472680320700612408061267646987");
    assert_eq!(generate_proof(&x, &c5, &n, 5, &mut NoProgress), BigUint::one());
}

#[test]
fn test_proof_matches_direct_quotient() {
    let n = modulus();
    let x = big(X);
    for (t, c) in [(40u64, 1_000_003u64), (300, 65_537), (300, 12_345_679), (512, 3)] {
        let c = BigUint::from(c);
        let quotient = (BigUint::one() << t) / &c;
        assert_eq!(
            generate_proof(&x, &c, &n, t, &mut NoProgress),
            x.modpow(&quotient, &n),
            "t={t} c={c}"
        );
    }
}

#[test]
fn test_proof_with_unit_challenge() {
    // c = 1 makes every quotient bit 2; the result must still be x^(2^T)
    let n = modulus();
    let x = big(X);
    let expected = evaluate_vdf(&x, &n, 10, &mut NoProgress);
    assert_eq!(generate_proof(&x, &BigUint::one(), &n, 10, &mut NoProgress), expected);
}

// ——— progress ————————————————————————————————————————————————————————————————

#[test]
fn test_progress_reports_are_throttled() {
    let n = modulus();
    let x = big(X);
    let mut steps: Vec<u64> = Vec::new();
    let y = evaluate_vdf(&x, &n, 1_000, &mut |step: u64, total: u64| {
        assert_eq!(total, 1_000);
        steps.push(step);
    });
    assert_eq!(y, big(Y_1000));

    assert_eq!(steps.first(), Some(&0));
    assert_eq!(steps.last(), Some(&999));
    for pair in steps.windows(2) {
        assert!(pair[0] < pair[1]);
        assert!(pair[1] - pair[0] <= constants::PROGRESS_INTERVAL + 1);
    }
    assert!(steps.len() < 20);
}

#[test]
fn test_progress_does_not_change_results() {
    let n = modulus();
    let x = big(X);
    let c = big(C_1000);
    let mut calls = 0u32;
    let pi = generate_proof(&x, &c, &n, 1_000, &mut |_step: u64, _total: u64| calls += 1);
    assert_eq!(pi, big(PI_1000));
    assert!(calls > 0);
}

#[test]
fn test_monotonic_delay() {
    let n = modulus();
    let x = big(X);
    let mut last_steps = Vec::new();
    for t in [1u64, 10, 250, 1_000] {
        let mut last = None;
        let _ = evaluate_vdf(&x, &n, t, &mut |step: u64, _total: u64| last = Some(step));
        last_steps.push(last.unwrap() + 1);
    }
    assert_eq!(last_steps, vec![1, 10, 250, 1_000]);
}

#[test]
fn test_throttle_small_and_empty_runs() {
    let mut seen: Vec<u64> = Vec::new();
    {
        let mut observer = |step: u64, _total: u64| seen.push(step);
        let mut throttle = ProgressThrottle::with_interval(&mut observer, 5, 2);
        for i in 0..5 {
            throttle.tick(i);
        }
        assert_eq!(throttle.last_reported(), Some(4));
    }
    assert_eq!(seen, vec![0, 3, 4]);

    let mut calls = 0u32;
    let _ = evaluate_vdf(&big(X), &modulus(), 0, &mut |_s: u64, _t: u64| calls += 1);
    assert_eq!(calls, 0);
}

// ——— proof blob ——————————————————————————————————————————————————————————————

#[test]
fn test_generate_vdf_known_blob() {
    let proof = generate_vdf(&test_request(1_000), &mut NoProgress);
    assert_eq!(proof.pi, big(PI_1000));
    assert_eq!(proof.y, big(Y_1000));
    assert_eq!(proof.block_number, BigUint::from(BLOCK_NUMBER));
    assert_eq!(proof.to_hex(), BLOB_1000);
    assert_eq!(proof.to_hex().len(), constants::PROOF_HEX_LEN + 2);
    assert_eq!(VdfProof::from_hex(BLOB_1000).unwrap(), proof);
}

#[test]
fn test_trace_exposes_intermediates() {
    let trace = trace_vdf(&test_request(1_000), &mut NoProgress);
    assert_eq!(trace.seed, SEED);
    assert_eq!(trace.x, big(X));
    assert_eq!(trace.y, big(Y_1000));
    assert_eq!(trace.c, big(C_1000));
    assert_eq!(trace.pi, big(PI_1000));
}

#[test]
fn test_proof_length_is_enforced() {
    for len in [0usize, 32, 95, 97, 192] {
        let bytes = vec![0u8; len];
        assert_eq!(
            VdfProof::from_bytes(&bytes),
            Err(DeserializeErr::BadLength(len))
        );
    }
    assert!(VdfProof::from_bytes(&[0u8; constants::PROOF_LEN]).is_ok());
    assert_eq!(VdfProof::from_hex("0xzz"), Err(DeserializeErr::InvalidHex));
    assert_eq!(
        VdfProof::from_hex("0x00"),
        Err(DeserializeErr::BadLength(1))
    );

    // 191 digits would pad out to exactly 96 bytes
    let short_digit = format!("0x{}", &BLOB_1000[3..]);
    assert_eq!(short_digit.len(), constants::PROOF_HEX_LEN + 1);
    assert_eq!(VdfProof::from_hex(&short_digit), Err(DeserializeErr::InvalidHex));
    assert_eq!(VdfProof::from_hex(&BLOB_1000[2..]), VdfProof::from_hex(BLOB_1000));
}

#[test]
fn test_generate_is_deterministic() {
    let a = generate_vdf_hex(&test_request(300), &mut NoProgress);
    let b = generate_vdf_hex(&test_request(300), &mut NoProgress);
    assert_eq!(a, b);
    assert_eq!(a.len(), 194);
}

// ——— verifier ————————————————————————————————————————————————————————————————

#[test]
fn test_valid_proof_verifies() {
    for delay in [1u64, 5, 64, 1_000] {
        let proof = generate_vdf(&test_request(delay), &mut NoProgress);
        let request = verify_request(delay, proof.to_bytes().to_vec());
        assert_eq!(is_valid_vdf(&request), Ok(true), "delay={delay}");
    }
}

#[test]
fn test_known_blob_verifies() {
    let blob = VdfProof::from_hex(BLOB_1000).unwrap();
    assert!(verify_proof(&modulus(), 1_000, &big(X), &blob));
}

#[test]
fn test_flipping_pi_or_y_hex_rejects() {
    let digits = &BLOB_1000[2..];
    // π and y occupy the first 128 hex characters
    for i in 0..2 * 2 * constants::FIELD_LEN {
        let mut mutated: Vec<u8> = digits.bytes().collect();
        mutated[i] = if mutated[i] == b'0' { b'1' } else { b'0' };
        let mutated = String::from_utf8(mutated).unwrap();

        let proof = swapvdf_crypto::decode_hex(&mutated).unwrap();
        assert_eq!(
            is_valid_vdf(&verify_request(1_000, proof)),
            Ok(false),
            "flip at hex index {i} still verified"
        );
    }
}

#[test]
fn test_block_number_is_not_bound() {
    // Known limitation: the trailing field is carried, not authenticated
    let mut proof = VdfProof::from_hex(BLOB_1000).unwrap();
    proof.block_number = BigUint::from(7u32);
    let request = verify_request(1_000, proof.to_bytes().to_vec());
    assert_eq!(is_valid_vdf(&request), Ok(true));
}

#[test]
fn test_wrong_public_inputs_reject() {
    let proof = VdfProof::from_hex(BLOB_1000).unwrap().to_bytes().to_vec();

    let mut request = verify_request(1_000, proof.clone());
    request.block_hash[31] ^= 0x80;
    assert_eq!(is_valid_vdf(&request), Ok(false));

    let mut request = verify_request(1_000, proof.clone());
    request.context.known_qty_out += 1u32;
    assert_eq!(is_valid_vdf(&request), Ok(false));

    let mut request = verify_request(1_000, proof.clone());
    request.context.path.reverse();
    assert_eq!(is_valid_vdf(&request), Ok(false));

    // Same proof claimed for a different delay
    let request = verify_request(999, proof);
    assert_eq!(is_valid_vdf(&request), Ok(false));
}

#[test]
fn test_out_of_range_values_reject() {
    let n = modulus();
    let x = big(X);
    let valid = VdfProof::from_hex(BLOB_1000).unwrap();

    // π + N satisfies the equation arithmetically but breaks π < N
    let mut aliased = valid.clone();
    aliased.pi = &valid.pi + &n;
    assert!(aliased.pi.bits() <= 256);
    assert!(!verify_proof(&n, 1_000, &x, &aliased));

    let mut big_y = valid;
    big_y.y = &big_y.y + &n;
    assert!(!verify_proof(&n, 1_000, &x, &big_y));
}

#[test]
fn test_malformed_blob_is_an_error() {
    let request = verify_request(1_000, vec![0u8; 95]);
    assert_eq!(
        is_valid_vdf(&request),
        Err(VdfError::Deserialize(DeserializeErr::BadLength(95)))
    );
}

// ——— boundary normalization ——————————————————————————————————————————————————

#[test]
fn test_parse_biguint_representations() {
    assert_eq!(parse_biguint("1000"), Ok(BigUint::from(1_000u32)));
    assert_eq!(parse_biguint(" +1_000 "), Ok(BigUint::from(1_000u32)));
    assert_eq!(parse_biguint("0x3e8"), Ok(BigUint::from(1_000u32)));
    assert_eq!(parse_biguint("0X3E8"), Ok(BigUint::from(1_000u32)));
    assert_eq!(parse_biguint("1000.000"), Ok(BigUint::from(1_000u32)));
    assert_eq!(parse_biguint("1e3"), Ok(BigUint::from(1_000u32)));
    assert_eq!(parse_biguint("1.5E3"), Ok(BigUint::from(1_500u32)));
    assert_eq!(parse_biguint("25000e-3"), Ok(BigUint::from(25u32)));
    assert_eq!(parse_biguint("-0"), Ok(BigUint::default()));
    assert_eq!(parse_biguint(".0"), Ok(BigUint::default()));
    assert_eq!(parse_biguint("0e2000"), Ok(BigUint::default()));
    assert_eq!(parse_biguint("0.000e5000"), Ok(BigUint::default()));
    assert_eq!(parse_biguint("-0e99999"), Ok(BigUint::default()));
    assert_eq!(
        parse_biguint("1e18"),
        Ok(BigUint::from(1_000_000_000_000_000_000u64))
    );
    assert_eq!(parse_biguint(constants::DEFAULT_MODULUS_DEC), Ok(modulus()));
}

#[test]
fn test_parse_biguint_rejections() {
    assert_eq!(parse_biguint("   "), Err(InputErr::Empty));
    assert_eq!(parse_biguint("-5"), Err(InputErr::Negative("-5".to_string())));
    assert_eq!(parse_biguint("-0x1"), Err(InputErr::Negative("-0x1".to_string())));
    assert_eq!(parse_biguint("1.5"), Err(InputErr::Fractional("1.5".to_string())));
    assert_eq!(parse_biguint("15e-1"), Err(InputErr::Fractional("15e-1".to_string())));
    for bad in ["abc", "0x", "0xg1", "1e", "1.2.3", ".", "1e99999", "12a"] {
        assert_eq!(
            parse_biguint(bad),
            Err(InputErr::NotANumber(bad.to_string())),
            "{bad}"
        );
    }
}

#[test]
fn test_numberish_normalization() {
    assert_eq!(Numberish::from(42u64).normalize(), Ok(BigUint::from(42u32)));
    assert_eq!(Numberish::from(42i32).normalize(), Ok(BigUint::from(42u32)));
    assert_eq!(
        Numberish::from(-42i64).normalize(),
        Err(InputErr::Negative("-42".to_string()))
    );
    assert_eq!(Numberish::from("0x2a").normalize(), Ok(BigUint::from(42u32)));
    assert_eq!(
        Numberish::from(BigUint::from(42u32)).normalize(),
        Ok(BigUint::from(42u32))
    );
    assert_eq!(Numberish::from("1e3").to_u64(), Ok(1_000));
    assert_eq!(
        Numberish::from("18446744073709551616").to_u64(),
        Err(InputErr::OutOfRange("18446744073709551616".to_string()))
    );
}

#[test]
fn test_params_validation() {
    assert_eq!(VdfParams::new(BigUint::one(), 10), Err(ParamErr::ModulusTooSmall));
    assert_eq!(VdfParams::new(BigUint::default(), 10), Err(ParamErr::ModulusTooSmall));
    assert_eq!(
        VdfParams::new(BigUint::one() << 256u32, 10),
        Err(ParamErr::ModulusTooLarge(257))
    );
    assert_eq!(VdfParams::new(modulus(), 0), Err(ParamErr::ZeroDelay));

    let params = VdfParams::default();
    assert_eq!(params.modulus(), &modulus());
    assert_eq!(params.delay(), constants::DEFAULT_DELAY);
    assert_eq!(
        VdfParams::from_numberish(constants::DEFAULT_MODULUS_DEC, 1_000u64),
        Ok(params)
    );
    assert_eq!(
        VdfParams::from_numberish("-7", 1u32),
        Err(VdfError::Input(InputErr::Negative("-7".to_string())))
    );
}

#[test]
fn test_raw_requests_round_trip() {
    let raw = RawGenerateRequest {
        n: constants::DEFAULT_MODULUS_DEC.into(),
        t: 1_000u32.into(),
        origin: "0x5aeda56215b167893e80b4fe645ba6d5bab767de".to_string(),
        path: PATH.iter().map(|p| swapvdf_crypto::to_hex_prefixed(p)).collect(),
        known_qty_in: "123456789012345678".into(),
        known_qty_out: Numberish::from(987_654_321_098_765_432u64),
        block_hash: swapvdf_crypto::to_hex_prefixed(&BLOCK_HASH),
        block_number: BLOCK_NUMBER.into(),
    };
    let request = GenerateRequest::try_from(raw.clone()).unwrap();
    assert_eq!(request, test_request(1_000));

    let blob = generate_vdf_hex(&request, &mut NoProgress);
    assert_eq!(blob, BLOB_1000);

    let verify = VerifyRequest::try_from(RawVerifyRequest {
        n: raw.n.clone(),
        t: raw.t.clone(),
        origin: raw.origin.clone(),
        path: raw.path.clone(),
        known_qty_in: raw.known_qty_in.clone(),
        known_qty_out: raw.known_qty_out.clone(),
        block_hash: raw.block_hash.clone(),
        proof: blob,
    })
    .unwrap();
    assert_eq!(is_valid_vdf(&verify), Ok(true));

    let odd = RawVerifyRequest {
        n: raw.n,
        t: raw.t,
        origin: raw.origin,
        path: raw.path,
        known_qty_in: raw.known_qty_in,
        known_qty_out: raw.known_qty_out,
        block_hash: raw.block_hash,
        proof: format!("0x{}", &BLOB_1000[3..]),
    };
    assert_eq!(
        VerifyRequest::try_from(odd),
        Err(VdfError::Deserialize(DeserializeErr::InvalidHex))
    );
}

#[test]
fn test_raw_request_fails_fast() {
    let raw = RawGenerateRequest {
        n: constants::DEFAULT_MODULUS_DEC.into(),
        t: 1_000u32.into(),
        origin: "0xnot-an-address".to_string(),
        path: vec![],
        known_qty_in: 0u8.into(),
        known_qty_out: 0u8.into(),
        block_hash: "0x00".to_string(),
        block_number: 0u8.into(),
    };
    assert_eq!(
        GenerateRequest::try_from(raw.clone()),
        Err(VdfError::Crypto(CryptoError::InvalidHex))
    );

    let fractional = RawGenerateRequest {
        origin: "0x01".to_string(),
        known_qty_in: "0.5".into(),
        ..raw.clone()
    };
    assert_eq!(
        GenerateRequest::try_from(fractional),
        Err(VdfError::Input(InputErr::Fractional("0.5".to_string())))
    );

    let zero_delay = RawGenerateRequest {
        origin: "0x01".to_string(),
        t: 0u8.into(),
        ..raw
    };
    assert_eq!(
        GenerateRequest::try_from(zero_delay),
        Err(VdfError::Param(ParamErr::ZeroDelay))
    );
}

#[test]
fn test_error_display() {
    assert_eq!(
        DeserializeErr::BadLength(95).to_string(),
        "malformed proof: expected 96 bytes, got 95"
    );
    let wrapped: VdfError = ParamErr::ModulusTooLarge(300).into();
    assert_eq!(
        format!("{wrapped}"),
        "modulus is 300 bits wide; at most 256 bits fit the proof encoding"
    );
    assert!(!format!("{:?}", InputErr::Empty).is_empty());
}
