//! Seed derivation from the swap context.

use alloc::string::String;
use alloc::vec::Vec;
use num_bigint::BigUint;
use swapvdf_crypto::{biguint_be, keccak256, to_hex_prefixed, u64_be, Address, Hash256};

use crate::constants::FIELD_LEN;

/// Public swap context the delay is bound to
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SwapContext {
    pub origin: Address,
    /// Hops in order; reordering yields a different seed
    pub path: Vec<Address>,
    pub known_qty_in: BigUint,
    pub known_qty_out: BigUint,
}

impl SwapContext {
    #[must_use]
    pub fn new(
        origin: Address,
        path: Vec<Address>,
        known_qty_in: BigUint,
        known_qty_out: BigUint,
    ) -> Self {
        Self {
            origin,
            path,
            known_qty_in,
            known_qty_out,
        }
    }

    #[must_use]
    pub fn seed(&self) -> Hash256 {
        generate_seed(
            &self.origin,
            &self.path,
            &self.known_qty_in,
            &self.known_qty_out,
        )
    }
}

/// Hash the swap context into a 32-byte seed.
///
/// Preimage:
/// ```text
/// [origin: 20][len(path): 32][path[0]: 20]…[path[n-1]: 20][qty_in: 32][qty_out: 32]
/// ```
/// Quantities wider than 256 bits are reduced to their low 256 bits.
#[must_use]
pub fn generate_seed(
    origin: &Address,
    path: &[Address],
    known_qty_in: &BigUint,
    known_qty_out: &BigUint,
) -> Hash256 {
    let mut buf = Vec::with_capacity(20 + FIELD_LEN + path.len() * 20 + 2 * FIELD_LEN);
    buf.extend_from_slice(origin.as_bytes());
    buf.extend_from_slice(&u64_be::<FIELD_LEN>(path.len() as u64));
    for hop in path {
        buf.extend_from_slice(hop.as_bytes());
    }
    buf.extend_from_slice(&biguint_be::<FIELD_LEN>(known_qty_in));
    buf.extend_from_slice(&biguint_be::<FIELD_LEN>(known_qty_out));
    keccak256(&buf)
}

/// Seed as `0x`-prefixed hex
#[must_use]
pub fn seed_hex(seed: &Hash256) -> String {
    to_hex_prefixed(seed)
}
