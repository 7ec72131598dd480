//! Engine: VDF (Verifiable Delay Function)
//!
//! Wesolowski VDF over the RSA group ℤ_N^* for swap settlement randomness.
//! A swap context (origin, path, known quantities) is hashed into a seed, the
//! seed is bound to an unpredictable block hash to obtain the challenge input
//! `x`, and the prover spends `T` sequential squarings computing
//! `y = x^(2^T) mod N` together with a short proof `π`.
//!
//! Pipeline:
//! ```text
//! seed = keccak(origin ‖ len(path) ‖ path… ‖ qtyIn ‖ qtyOut)
//! x    = keccak(seed ‖ blockHash) mod N
//! y    = x^(2^T) mod N                       (T sequential squarings)
//! c    = keccak(x ‖ y ‖ N ‖ T), forced odd    (Fiat–Shamir)
//! π    = x^⌊2^T / c⌋ mod N                    (T steps, no φ(N) needed)
//! ok   ⇔ y == π^c · x^(2^T mod c) mod N
//! ```
//!
//! Security assumes nobody knows the factorization of `N`; nothing here can
//! detect a modulus whose factors have leaked.

#![no_std]
#![deny(unsafe_code)]

#[cfg(any(feature = "std", test))]
extern crate std;

extern crate alloc;

use alloc::string::String;

pub use num_bigint::BigUint;
pub use swapvdf_crypto::{Address, CryptoError, Hash256};

pub mod api;
pub mod challenge;
pub mod eval;
pub mod numberish;
pub mod params;
pub mod progress;
pub mod proof;
pub mod prover;
pub mod seed;
pub mod verify;

pub use api::{
    generate_vdf, generate_vdf_hex, is_valid_vdf, trace_vdf, GenerateRequest, RawGenerateRequest,
    RawVerifyRequest, VdfTrace, VerifyRequest,
};
pub use challenge::{generate_challenge, generate_x};
pub use eval::evaluate_vdf;
pub use numberish::{parse_biguint, Numberish};
pub use params::VdfParams;
pub use progress::{NoProgress, ProgressObserver, ProgressThrottle};
pub use proof::VdfProof;
pub use prover::generate_proof;
pub use seed::{generate_seed, seed_hex, SwapContext};
pub use verify::{verify_proof, verify_vdf};

/// Consensus constants (VDF-only)
pub mod constants {
    /// Encoded proof length: π ‖ y ‖ blockNumber, 32 bytes each
    pub const PROOF_LEN: usize = 96;
    /// Hex length of an encoded proof without the `0x` prefix
    pub const PROOF_HEX_LEN: usize = PROOF_LEN * 2;
    /// Width of every numeric field in hashed or serialized data
    pub const FIELD_LEN: usize = 32;
    /// Largest modulus that still fits a 32-byte field
    pub const MAX_MODULUS_BITS: u64 = 256;
    /// Iterations allowed between two progress reports
    pub const PROGRESS_INTERVAL: u64 = 100;
    /// Delay used when none is configured
    pub const DEFAULT_DELAY: u64 = 1_000;
    /// 255-bit reference modulus (test deployments only; its factorization
    /// is not vouched for)
    pub const DEFAULT_MODULUS_DEC: &str =
        "44771746775035800231893057667067514385523709770528832291415080542575843241867";
    /// `DEFAULT_MODULUS_DEC` as big-endian bytes
    pub const DEFAULT_MODULUS_BE: [u8; 32] = [
        0x62, 0xfb, 0xe9, 0x21, 0x26, 0x5a, 0xf0, 0x8d,
        0x2c, 0xeb, 0x76, 0x6c, 0x08, 0x6d, 0x78, 0xec,
        0xfe, 0xf7, 0xdb, 0x21, 0x19, 0xfd, 0x5b, 0x51,
        0x44, 0xb1, 0xcd, 0x94, 0x71, 0x6a, 0x6f, 0x8b,
    ];
    /// Largest decimal exponent accepted in scientific-notation input
    pub const MAX_DECIMAL_EXPONENT: u32 = 1_000;
}

/// Proof blob decoding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeserializeErr {
    /// Blob is not exactly `PROOF_LEN` bytes
    #[error("malformed proof: expected {expected} bytes, got {0}", expected = constants::PROOF_LEN)]
    BadLength(usize),
    /// Hex form of the blob could not be decoded
    #[error("malformed proof: invalid hex")]
    InvalidHex,
}

/// Numeric input normalization errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputErr {
    /// Nothing to parse
    #[error("empty numeric input")]
    Empty,
    /// A non-negative integer was required
    #[error("negative value `{0}` where a non-negative integer is required")]
    Negative(String),
    /// Value has a non-zero fractional part
    #[error("non-integer value `{0}`")]
    Fractional(String),
    /// Value is not a number in any accepted representation
    #[error("`{0}` is not an integer")]
    NotANumber(String),
    /// Value does not fit the target integer type
    #[error("`{0}` is out of range")]
    OutOfRange(String),
}

/// Deployment parameter errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParamErr {
    /// Modulus must be greater than one
    #[error("modulus must be greater than 1")]
    ModulusTooSmall,
    /// Modulus must fit a 32-byte field
    #[error("modulus is {0} bits wide; at most {max} bits fit the proof encoding", max = constants::MAX_MODULUS_BITS)]
    ModulusTooLarge(u64),
    /// Delay must be at least one squaring
    #[error("delay must be a positive number of squarings")]
    ZeroDelay,
}

/// Umbrella error for the public API
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VdfError {
    /// Proof blob could not be decoded
    #[error(transparent)]
    Deserialize(#[from] DeserializeErr),
    /// Numeric input could not be normalized
    #[error(transparent)]
    Input(#[from] InputErr),
    /// Deployment parameters are invalid
    #[error(transparent)]
    Param(#[from] ParamErr),
    /// Hex or fixed-width input could not be decoded
    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Result alias for the public API
pub type VdfResult<T> = core::result::Result<T, VdfError>;

// Tests module
#[cfg(test)]
mod tests;
