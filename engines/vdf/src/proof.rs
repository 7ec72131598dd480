//! Proof blob codec.

use alloc::string::String;
use num_bigint::BigUint;
use swapvdf_crypto::{biguint_be, biguint_from_be, decode_hex_exact, to_hex_prefixed};

use crate::constants::{FIELD_LEN, PROOF_LEN};
use crate::DeserializeErr;

/// Wesolowski proof together with the VDF output and the block number it was
/// produced for.
///
/// Wire format:
/// ```text
/// [pi: 32][y: 32][block_number: 32]     (big-endian, zero-padded)
/// ```
///
/// `block_number` rides along for bookkeeping only. Neither the challenge nor
/// the verification equation covers it, so a verifier cannot tell whether it
/// was altered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VdfProof {
    pub pi: BigUint,
    pub y: BigUint,
    pub block_number: BigUint,
}

impl VdfProof {
    /// Canonical 96-byte encoding
    #[must_use]
    pub fn to_bytes(&self) -> [u8; PROOF_LEN] {
        let mut out = [0u8; PROOF_LEN];
        out[..FIELD_LEN].copy_from_slice(&biguint_be::<FIELD_LEN>(&self.pi));
        out[FIELD_LEN..2 * FIELD_LEN].copy_from_slice(&biguint_be::<FIELD_LEN>(&self.y));
        out[2 * FIELD_LEN..].copy_from_slice(&biguint_be::<FIELD_LEN>(&self.block_number));
        out
    }

    /// Decode the canonical encoding.
    ///
    /// # Errors
    /// - `BadLength`: input is not exactly `PROOF_LEN` bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self, DeserializeErr> {
        if data.len() != PROOF_LEN {
            return Err(DeserializeErr::BadLength(data.len()));
        }
        Ok(Self {
            pi: biguint_from_be(&data[..FIELD_LEN]),
            y: biguint_from_be(&data[FIELD_LEN..2 * FIELD_LEN]),
            block_number: biguint_from_be(&data[2 * FIELD_LEN..]),
        })
    }

    /// `0x`-prefixed lowercase hex, 194 characters
    #[must_use]
    pub fn to_hex(&self) -> String {
        to_hex_prefixed(&self.to_bytes())
    }

    /// Decode from hex, `0x` prefix optional.
    ///
    /// # Errors
    /// - `InvalidHex`: not a hex string, or an odd number of digits
    /// - `BadLength`: does not decode to exactly `PROOF_LEN` bytes
    pub fn from_hex(s: &str) -> Result<Self, DeserializeErr> {
        let bytes = decode_hex_exact(s).map_err(|_| DeserializeErr::InvalidHex)?;
        Self::from_bytes(&bytes)
    }
}
