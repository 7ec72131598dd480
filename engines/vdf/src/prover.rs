//! Wesolowski proof generation.

use num_bigint::BigUint;
use num_traits::{One, Zero};

use crate::progress::{ProgressObserver, ProgressThrottle};

/// Compute the proof `π = x^⌊2^T / c⌋ mod N` in `T` steps.
///
/// Walks the binary long division of `2^T` by `c` one bit at a time: `r`
/// holds the running remainder and each quotient bit folds into `π` by one
/// squaring and at most one multiplication by `x`. Neither `2^T` nor `φ(N)`
/// is ever needed.
///
/// `progress` follows the same contract as in [`crate::evaluate_vdf`].
pub fn generate_proof<P: ProgressObserver + ?Sized>(
    x: &BigUint,
    c: &BigUint,
    n: &BigUint,
    t: u64,
    progress: &mut P,
) -> BigUint {
    tracing::debug!(delay = t, challenge_bits = c.bits(), "generating wesolowski proof");
    let mut throttle = ProgressThrottle::new(progress, t);

    let base = x % n;
    let mut pi = BigUint::one() % n;
    let mut r = BigUint::one();
    for i in 0..t {
        let r2 = &r << 1u32;
        let bit = &r2 / c;
        r = r2 % c;

        pi = (&pi * &pi) % n;
        // bit is 0 or 1 whenever c > 1
        if bit.is_one() {
            pi = (&pi * &base) % n;
        } else if !bit.is_zero() {
            pi = (&pi * base.modpow(&bit, n)) % n;
        }
        throttle.tick(i);
    }

    tracing::debug!(delay = t, "proof generation finished");
    pi
}
