//! Producer and verifier entry points composing the full pipeline.
//!
//! Typed requests ([`GenerateRequest`], [`VerifyRequest`]) carry validated
//! values. Raw requests accept hex strings and [`Numberish`] values and are
//! normalized with `TryFrom`, so malformed input fails before any squaring
//! loop is entered.

use alloc::string::String;
use alloc::vec::Vec;
use core::str::FromStr;
use num_bigint::BigUint;
use swapvdf_crypto::{decode_hex_exact, parse_hash256, Address, Hash256};

use crate::challenge::{generate_challenge, generate_x};
use crate::eval::evaluate_vdf;
use crate::numberish::Numberish;
use crate::params::VdfParams;
use crate::progress::ProgressObserver;
use crate::proof::VdfProof;
use crate::prover::generate_proof;
use crate::seed::SwapContext;
use crate::verify::verify_vdf;
use crate::{DeserializeErr, VdfError, VdfResult};

/// Everything the producer needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerateRequest {
    pub params: VdfParams,
    pub context: SwapContext,
    pub block_hash: Hash256,
    /// Copied into the proof blob; not bound by the proof
    pub block_number: BigUint,
}

/// Everything the verifier needs
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerifyRequest {
    pub params: VdfParams,
    pub context: SwapContext,
    /// Must be the block hash the proof was generated against
    pub block_hash: Hash256,
    /// Encoded proof blob, expected to be `PROOF_LEN` bytes
    pub proof: Vec<u8>,
}

/// Producer request as it arrives from an untyped boundary
#[derive(Clone, Debug)]
pub struct RawGenerateRequest {
    pub n: Numberish,
    pub t: Numberish,
    pub origin: String,
    pub path: Vec<String>,
    pub known_qty_in: Numberish,
    pub known_qty_out: Numberish,
    pub block_hash: String,
    pub block_number: Numberish,
}

/// Verifier request as it arrives from an untyped boundary
#[derive(Clone, Debug)]
pub struct RawVerifyRequest {
    pub n: Numberish,
    pub t: Numberish,
    pub origin: String,
    pub path: Vec<String>,
    pub known_qty_in: Numberish,
    pub known_qty_out: Numberish,
    pub block_hash: String,
    /// Hex proof blob, `0x` prefix optional; odd digit counts are malformed
    pub proof: String,
}

fn context_from_raw(
    origin: &str,
    path: &[String],
    known_qty_in: &Numberish,
    known_qty_out: &Numberish,
) -> VdfResult<SwapContext> {
    let origin = Address::from_str(origin)?;
    let path = path
        .iter()
        .map(|hop| Address::from_str(hop))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(SwapContext::new(
        origin,
        path,
        known_qty_in.normalize()?,
        known_qty_out.normalize()?,
    ))
}

impl TryFrom<RawGenerateRequest> for GenerateRequest {
    type Error = VdfError;

    fn try_from(raw: RawGenerateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            params: VdfParams::from_numberish(raw.n, raw.t)?,
            context: context_from_raw(
                &raw.origin,
                &raw.path,
                &raw.known_qty_in,
                &raw.known_qty_out,
            )?,
            block_hash: parse_hash256(&raw.block_hash)?,
            block_number: raw.block_number.normalize()?,
        })
    }
}

impl TryFrom<RawVerifyRequest> for VerifyRequest {
    type Error = VdfError;

    fn try_from(raw: RawVerifyRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            params: VdfParams::from_numberish(raw.n, raw.t)?,
            context: context_from_raw(
                &raw.origin,
                &raw.path,
                &raw.known_qty_in,
                &raw.known_qty_out,
            )?,
            block_hash: parse_hash256(&raw.block_hash)?,
            proof: decode_hex_exact(&raw.proof).map_err(|_| DeserializeErr::InvalidHex)?,
        })
    }
}

/// Every intermediate value of one producer run
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VdfTrace {
    pub seed: Hash256,
    pub x: BigUint,
    pub y: BigUint,
    pub c: BigUint,
    pub pi: BigUint,
}

/// Run the producer pipeline and keep the intermediates.
///
/// The observer sees two passes of `T` steps each: the evaluation, then the
/// proof generation.
pub fn trace_vdf<P: ProgressObserver + ?Sized>(
    request: &GenerateRequest,
    progress: &mut P,
) -> VdfTrace {
    let n = request.params.modulus();
    let t = request.params.delay();

    let seed = request.context.seed();
    let x = generate_x(n, &seed, &request.block_hash);
    let y = evaluate_vdf(&x, n, t, &mut *progress);
    let c = generate_challenge(&x, &y, n, t);
    let pi = generate_proof(&x, &c, n, t, &mut *progress);

    VdfTrace { seed, x, y, c, pi }
}

/// Producer path: compute `y` and `π` for the request.
#[must_use = "the proof is the only output of the delay computation"]
pub fn generate_vdf<P: ProgressObserver + ?Sized>(
    request: &GenerateRequest,
    progress: &mut P,
) -> VdfProof {
    let trace = trace_vdf(request, progress);
    tracing::debug!(
        delay = request.params.delay(),
        block_number = %request.block_number,
        "vdf proof generated"
    );
    VdfProof {
        pi: trace.pi,
        y: trace.y,
        block_number: request.block_number.clone(),
    }
}

/// [`generate_vdf`] encoded as `0x`-prefixed hex (194 characters)
#[must_use]
pub fn generate_vdf_hex<P: ProgressObserver + ?Sized>(
    request: &GenerateRequest,
    progress: &mut P,
) -> String {
    generate_vdf(request, progress).to_hex()
}

/// Verifier path.
///
/// `Ok(false)` means the proof was rejected; callers must treat it as an
/// ordinary outcome.
///
/// # Errors
/// - `MalformedProof`: the blob is not exactly 96 bytes
pub fn is_valid_vdf(request: &VerifyRequest) -> VdfResult<bool> {
    verify_vdf(
        &request.params,
        &request.context,
        &request.block_hash,
        &request.proof,
    )
}
