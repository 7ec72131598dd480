//! Verifier path (succinct; one exponentiation of size ≈ |c| plus one of
//! size < |c|, no sequential squaring)

use num_bigint::BigUint;
use swapvdf_crypto::Hash256;

use crate::challenge::{generate_challenge, generate_x};
use crate::params::VdfParams;
use crate::proof::VdfProof;
use crate::seed::SwapContext;
use crate::VdfResult;

/// Check `y == π^c · x^(2^T mod c) mod N` for a decoded proof.
///
/// `2^T mod c` is computed by modular exponentiation so `2^T` is never
/// materialized. Values of `π` or `y` outside `[0, N)` are rejected.
#[must_use]
pub fn verify_proof(n: &BigUint, t: u64, x: &BigUint, proof: &VdfProof) -> bool {
    if proof.pi >= *n || proof.y >= *n {
        return false;
    }

    let c = generate_challenge(x, &proof.y, n, t);
    let r = BigUint::from(2u32).modpow(&BigUint::from(t), &c);

    let pi_to_c = proof.pi.modpow(&c, n);
    let x_to_r = x.modpow(&r, n);
    let expected = (&pi_to_c * &x_to_r) % n;

    expected == proof.y
}

/// Full verification from public inputs and an encoded proof blob.
///
/// Rederives the seed and `x` from `context` and `block_hash`, then checks the
/// Wesolowski equation. A proof that does not check out is `Ok(false)`; only
/// a blob that cannot be decoded is an error.
///
/// # Errors
/// - `MalformedProof` (`DeserializeErr::BadLength`): blob is not 96 bytes
pub fn verify_vdf(
    params: &VdfParams,
    context: &SwapContext,
    block_hash: &Hash256,
    proof_bytes: &[u8],
) -> VdfResult<bool> {
    let proof = VdfProof::from_bytes(proof_bytes)?;

    let seed = context.seed();
    let x = generate_x(params.modulus(), &seed, block_hash);
    let valid = verify_proof(params.modulus(), params.delay(), &x, &proof);

    tracing::debug!(
        delay = params.delay(),
        block_number = %proof.block_number,
        valid,
        "vdf proof verified"
    );
    Ok(valid)
}
