//! Cryptographic foundations for swapvdf
//!
//! Keccak-256 hashing and the fixed-width big-endian encoding used by every
//! byte string the VDF engine hashes or serializes.
//!
//! All encodings are byte-precise: addresses occupy 20 bytes, numeric and
//! hash fields occupy 32 bytes, both zero-padded on the left.

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;
use num_bigint::BigUint;
use sha3::{Digest, Keccak256};

/// Hash256 type used throughout swapvdf
pub type Hash256 = [u8; 32];

/// Width of an address-like identifier
pub const ADDRESS_LEN: usize = 20;

/// Width of every numeric and hash field
pub const WORD_LEN: usize = 32;

/// Cryptographic and encoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CryptoError {
    /// Input is not valid hexadecimal
    #[error("invalid hex string")]
    InvalidHex,
    /// Hex digits do not form whole bytes
    #[error("odd number of hex digits: {0}")]
    OddLength(usize),
    /// Decoded input does not fit the expected width
    #[error("invalid input length: expected at most {expected} bytes, got {actual}")]
    InvalidLength {
        /// Maximum accepted length in bytes
        expected: usize,
        /// Length that was supplied
        actual: usize,
    },
}

// ——— Fixed-width big-endian encoding ————————————————————————————————————————

/// Fit `bytes` into exactly `W` bytes, big-endian.
///
/// Shorter inputs are left-padded with zeros. Longer inputs keep their last
/// `W` bytes, so an integer wider than the field is reduced modulo `2^(8W)`.
#[inline]
#[must_use]
pub fn be_bytes<const W: usize>(bytes: &[u8]) -> [u8; W] {
    let mut out = [0u8; W];
    if bytes.len() >= W {
        out.copy_from_slice(&bytes[bytes.len() - W..]);
    } else {
        out[W - bytes.len()..].copy_from_slice(bytes);
    }
    out
}

/// Encode an arbitrary-precision integer into a `W`-byte big-endian field
#[inline]
#[must_use]
pub fn biguint_be<const W: usize>(n: &BigUint) -> [u8; W] {
    be_bytes::<W>(&n.to_bytes_be())
}

/// Encode a `u64` into a `W`-byte big-endian field
#[inline]
#[must_use]
pub fn u64_be<const W: usize>(n: u64) -> [u8; W] {
    be_bytes::<W>(&n.to_be_bytes())
}

/// Read a big-endian field as an arbitrary-precision integer
#[inline]
#[must_use]
pub fn biguint_from_be(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

// ——— Keccak-256 ——————————————————————————————————————————————————————————————

/// Keccak-256 (original Keccak padding, as used by Ethereum)
#[inline]
#[must_use]
pub fn keccak256(input: &[u8]) -> Hash256 {
    let mut hasher = Keccak256::new();
    hasher.update(input);
    hasher.finalize().into()
}

/// Keccak-256 over the plain concatenation of `parts`
///
/// No length framing is applied; callers are expected to pass fixed-width
/// fields so the concatenation is unambiguous.
#[inline]
#[must_use]
pub fn keccak256_concat(parts: &[&[u8]]) -> Hash256 {
    let mut hasher = Keccak256::new();
    for p in parts {
        hasher.update(p);
    }
    hasher.finalize().into()
}

// ——— Hex boundary ——————————————————————————————————————————————————————————

fn hex_digits(s: &str) -> &str {
    let s = s.trim();
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}

/// Decode a hex string with an optional `0x` prefix.
///
/// Odd-length input is treated as if it carried a leading zero nibble.
///
/// # Errors
///
/// Returns `CryptoError::InvalidHex` if the string contains non-hex characters
pub fn decode_hex(s: &str) -> Result<Vec<u8>, CryptoError> {
    let digits = hex_digits(s);
    if digits.len() % 2 == 1 {
        let mut padded = String::with_capacity(digits.len() + 1);
        padded.push('0');
        padded.push_str(digits);
        hex::decode(padded).map_err(|_| CryptoError::InvalidHex)
    } else {
        hex::decode(digits).map_err(|_| CryptoError::InvalidHex)
    }
}

/// Decode hex that must spell out whole bytes; `0x` prefix optional.
///
/// # Errors
///
/// - `OddLength` if the digit count is odd
/// - `InvalidHex` if the string contains non-hex characters
pub fn decode_hex_exact(s: &str) -> Result<Vec<u8>, CryptoError> {
    let digits = hex_digits(s);
    if digits.len() % 2 == 1 {
        return Err(CryptoError::OddLength(digits.len()));
    }
    hex::decode(digits).map_err(|_| CryptoError::InvalidHex)
}

/// Lowercase hex with a `0x` prefix
#[must_use]
pub fn to_hex_prefixed(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(2 + bytes.len() * 2);
    out.push_str("0x");
    out.push_str(&hex::encode(bytes));
    out
}

/// Parse a 32-byte hash from hex, left-padding shorter values.
///
/// # Errors
///
/// - `InvalidHex` if the string is not hex
/// - `InvalidLength` if it decodes to more than 32 bytes
pub fn parse_hash256(s: &str) -> Result<Hash256, CryptoError> {
    let bytes = decode_hex(s)?;
    if bytes.len() > WORD_LEN {
        return Err(CryptoError::InvalidLength {
            expected: WORD_LEN,
            actual: bytes.len(),
        });
    }
    Ok(be_bytes::<WORD_LEN>(&bytes))
}

// ——— Address ———————————————————————————————————————————————————————————————

/// 20-byte address-like identifier (swap origin and path hops)
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Address(pub [u8; ADDRESS_LEN]);

impl Address {
    /// Build an address from arbitrary bytes, left-padding short input and
    /// keeping the last 20 bytes of long input
    #[must_use]
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self(be_bytes::<ADDRESS_LEN>(bytes))
    }

    /// Raw bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LEN] {
        &self.0
    }
}

impl From<[u8; ADDRESS_LEN]> for Address {
    fn from(bytes: [u8; ADDRESS_LEN]) -> Self {
        Self(bytes)
    }
}

impl FromStr for Address {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        decode_hex(s).map(|bytes| Self::from_slice(&bytes))
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("0x")?;
        for b in &self.0 {
            write!(f, "{b:02x}")?;
        }
        Ok(())
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({self})")
    }
}
