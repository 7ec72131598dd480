//! Sequential evaluator: the delay itself.

use num_bigint::BigUint;

use crate::progress::{ProgressObserver, ProgressThrottle};

/// Compute `y = x^(2^T) mod N` by `T` sequential squarings.
///
/// Each squaring consumes the previous result, so the loop cannot be split
/// across cores without the factorization of `N`. `progress` is invoked
/// between iterations and has no effect on the result.
pub fn evaluate_vdf<P: ProgressObserver + ?Sized>(
    x: &BigUint,
    n: &BigUint,
    t: u64,
    progress: &mut P,
) -> BigUint {
    tracing::debug!(delay = t, modulus_bits = n.bits(), "evaluating vdf");
    let mut throttle = ProgressThrottle::new(progress, t);

    let mut y = x % n;
    for i in 0..t {
        y = (&y * &y) % n;
        throttle.tick(i);
    }

    tracing::debug!(delay = t, "vdf evaluation finished");
    y
}
