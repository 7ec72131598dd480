//! Hash-derived integers: the challenge input `x` and the Fiat–Shamir
//! challenge `c`.

use num_bigint::BigUint;
use num_traits::{One, Zero};
use swapvdf_crypto::{biguint_be, biguint_from_be, keccak256_concat, u64_be, Hash256};

use crate::constants::FIELD_LEN;

/// `x = keccak(seed ‖ block_hash) mod N`
///
/// Binding the starting point to the block hash keeps anyone from computing
/// `y` before the block exists.
#[must_use]
pub fn generate_x(n: &BigUint, seed: &Hash256, block_hash: &Hash256) -> BigUint {
    let digest = keccak256_concat(&[seed, block_hash]);
    biguint_from_be(&digest) % n
}

/// Fiat–Shamir challenge `c` for the statement `y = x^(2^T) mod N`.
///
/// `c = keccak(x ‖ y ‖ N ‖ T)` read big-endian, plus one when even, so `c` is
/// always odd and positive.
#[must_use]
pub fn generate_challenge(x: &BigUint, y: &BigUint, n: &BigUint, t: u64) -> BigUint {
    let digest = keccak256_concat(&[
        &biguint_be::<FIELD_LEN>(x),
        &biguint_be::<FIELD_LEN>(y),
        &biguint_be::<FIELD_LEN>(n),
        &u64_be::<FIELD_LEN>(t),
    ]);
    let c = biguint_from_be(&digest);
    if (&c % 2u32).is_zero() {
        c + BigUint::one()
    } else {
        c
    }
}
