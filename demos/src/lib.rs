//! Command-line driver for the swap VDF.
//!
//! The binary in `main.rs` only parses flags and prints; everything it runs
//! lives here so it can be exercised from tests without a terminal.

use std::str::FromStr;
use std::time::{Duration, Instant};

use anyhow::Context;
use indicatif::{ProgressBar, ProgressStyle};
use swapvdf_crypto::{decode_hex_exact, parse_hash256};
use swapvdf_vdf::{
    generate_vdf, is_valid_vdf, parse_biguint, seed_hex, Address, DeserializeErr,
    GenerateRequest, ProgressObserver, SwapContext, VerifyRequest,
};

pub mod config;

pub use config::{CliConfig, ConfigError};

/// Swap context as given on the command line
#[derive(Clone, Debug, Default, clap::Args)]
pub struct SwapInput {
    /// Originating address (20 bytes hex)
    #[arg(long)]
    pub origin: String,

    /// Swap path, comma separated or repeated, in hop order
    #[arg(long = "hop", value_delimiter = ',')]
    pub path: Vec<String>,

    /// Known input quantity (decimal, hex or scientific)
    #[arg(long, default_value = "0")]
    pub qty_in: String,

    /// Known output quantity (decimal, hex or scientific)
    #[arg(long, default_value = "0")]
    pub qty_out: String,
}

impl SwapInput {
    pub fn context(&self) -> anyhow::Result<SwapContext> {
        let origin = Address::from_str(&self.origin)
            .with_context(|| format!("invalid origin address {}", self.origin))?;
        let path = self
            .path
            .iter()
            .map(|hop| Address::from_str(hop).with_context(|| format!("invalid hop {hop}")))
            .collect::<anyhow::Result<Vec<_>>>()?;
        Ok(SwapContext::new(
            origin,
            path,
            parse_biguint(&self.qty_in).context("invalid --qty-in")?,
            parse_biguint(&self.qty_out).context("invalid --qty-out")?,
        ))
    }
}

/// Seed for a swap context, `0x` hex
pub fn seed_command(swap: &SwapInput) -> anyhow::Result<String> {
    Ok(seed_hex(&swap.context()?.seed()))
}

/// Producer request assembled from config and flags
pub fn generate_request(
    config: &CliConfig,
    swap: &SwapInput,
    block_hash: &str,
    block_number: &str,
) -> anyhow::Result<GenerateRequest> {
    Ok(GenerateRequest {
        params: config.params().context("invalid modulus or delay in config")?,
        context: swap.context()?,
        block_hash: parse_hash256(block_hash).context("invalid --block-hash")?,
        block_number: parse_biguint(block_number).context("invalid --block-number")?,
    })
}

/// Verifier request assembled from config and flags
pub fn verify_request(
    config: &CliConfig,
    swap: &SwapInput,
    block_hash: &str,
    proof: &str,
) -> anyhow::Result<VerifyRequest> {
    Ok(VerifyRequest {
        params: config.params().context("invalid modulus or delay in config")?,
        context: swap.context()?,
        block_hash: parse_hash256(block_hash).context("invalid --block-hash")?,
        proof: decode_hex_exact(proof)
            .map_err(|_| DeserializeErr::InvalidHex)
            .context("invalid --proof")?,
    })
}

/// Fixed swap used by `selftest`
pub fn selftest_swap() -> SwapInput {
    SwapInput {
        origin: "0x5aeda56215b167893e80b4fe645ba6d5bab767de".to_string(),
        path: vec![
            "0xc02aaa39b223fe8d0a0e5c4f27ead9083c756cc2".to_string(),
            "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48".to_string(),
        ],
        qty_in: "1e18".to_string(),
        qty_out: "2500000000".to_string(),
    }
}

pub const SELFTEST_BLOCK_HASH: &str =
    "0x88e96d4537bea4d9c05d12549907b32561d3bf31f45aae734cdc119f13406cb6";

#[derive(Debug, Clone)]
pub struct SelftestReport {
    pub proof_hex: String,
    pub accepted: bool,
    /// The same proof checked against a different block hash
    pub wrong_block_rejected: bool,
    /// The proof with one byte of `y` flipped
    pub tampered_rejected: bool,
    pub generate_time: Duration,
    pub verify_time: Duration,
}

impl SelftestReport {
    pub fn passed(&self) -> bool {
        self.accepted && self.wrong_block_rejected && self.tampered_rejected
    }
}

/// Generate one proof with the configured parameters and check that it is
/// accepted while tampered variants are not.
pub fn selftest<P: ProgressObserver + ?Sized>(
    config: &CliConfig,
    progress: &mut P,
) -> anyhow::Result<SelftestReport> {
    let swap = selftest_swap();
    let request = generate_request(config, &swap, SELFTEST_BLOCK_HASH, "1")?;

    let start = Instant::now();
    let proof = generate_vdf(&request, progress);
    let generate_time = start.elapsed();

    let mut verify = VerifyRequest {
        params: request.params.clone(),
        context: request.context.clone(),
        block_hash: request.block_hash,
        proof: proof.to_bytes().to_vec(),
    };
    let start = Instant::now();
    let accepted = is_valid_vdf(&verify)?;
    let verify_time = start.elapsed();

    verify.block_hash[31] ^= 0x01;
    let wrong_block_rejected = !is_valid_vdf(&verify)?;
    verify.block_hash = request.block_hash;

    verify.proof[63] ^= 0x01;
    let tampered_rejected = !is_valid_vdf(&verify)?;

    let report = SelftestReport {
        proof_hex: proof.to_hex(),
        accepted,
        wrong_block_rejected,
        tampered_rejected,
        generate_time,
        verify_time,
    };
    tracing::info!(
        delay = config.delay,
        passed = report.passed(),
        generate_ms = report.generate_time.as_millis() as u64,
        "selftest finished"
    );
    Ok(report)
}

/// Terminal progress bar fed by the engine's progress reports.
///
/// The producer runs two passes of `T` steps (evaluation, then proof); a step
/// index that does not advance marks the start of the next pass.
pub struct PhaseBar {
    bar: ProgressBar,
    phases: &'static [&'static str],
    phase: usize,
    last: Option<u64>,
}

impl PhaseBar {
    pub const PRODUCER_PHASES: &'static [&'static str] = &["evaluating", "proving"];

    pub fn new(total: u64, phases: &'static [&'static str]) -> Self {
        let bar = ProgressBar::new(total);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos:>7}/{len:7} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-");
        bar.set_style(style);
        Self::with_bar(bar, phases)
    }

    /// Bar that draws nothing; used when output is not a terminal
    pub fn hidden(phases: &'static [&'static str]) -> Self {
        Self::with_bar(ProgressBar::hidden(), phases)
    }

    fn with_bar(bar: ProgressBar, phases: &'static [&'static str]) -> Self {
        if let Some(first) = phases.first() {
            bar.set_message(*first);
        }
        Self {
            bar,
            phases,
            phase: 0,
            last: None,
        }
    }

    pub fn phase(&self) -> usize {
        self.phase
    }

    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl ProgressObserver for PhaseBar {
    fn on_progress(&mut self, step: u64, total: u64) {
        if matches!(self.last, Some(prev) if step <= prev) {
            self.phase += 1;
            self.bar.reset();
            if let Some(name) = self.phases.get(self.phase) {
                self.bar.set_message(*name);
            }
        }
        self.bar.set_length(total);
        self.bar.set_position(step + 1);
        self.last = Some(step);
    }
}
