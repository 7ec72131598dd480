use std::io::IsTerminal;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use swapvdf_demos::{
    generate_request, seed_command, selftest, verify_request, CliConfig, PhaseBar,
    SwapInput,
};
use swapvdf_vdf::{generate_vdf, is_valid_vdf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// TOML config with `modulus`, `delay` and `log_level`
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log filter; overrides RUST_LOG and the config file
    #[arg(short, long)]
    log_level: Option<String>,

    /// Number of squarings; overrides the config file
    #[arg(short = 't', long)]
    delay: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seed derived from a swap context
    Seed {
        #[command(flatten)]
        swap: SwapInput,
    },
    /// Compute the delay output and its proof
    Generate {
        #[command(flatten)]
        swap: SwapInput,
        /// Anchor block hash (32 bytes hex)
        #[arg(long)]
        block_hash: String,
        /// Block number carried in the proof blob
        #[arg(long, default_value = "0")]
        block_number: String,
        /// Do not draw a progress bar
        #[arg(short, long)]
        quiet: bool,
    },
    /// Check a proof blob against a swap context and block hash
    Verify {
        #[command(flatten)]
        swap: SwapInput,
        /// Anchor block hash (32 bytes hex)
        #[arg(long)]
        block_hash: String,
        /// Proof blob, 96 bytes hex
        #[arg(long)]
        proof: String,
    },
    /// Generate and verify a proof for a fixed swap
    Selftest {
        /// Do not draw a progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

fn init_tracing(flag: Option<&str>, config: &CliConfig) {
    let filter = match flag {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(config.log_level.as_deref().unwrap_or("info"))
        }),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn producer_bar(quiet: bool, delay: u64) -> PhaseBar {
    if quiet || !std::io::stderr().is_terminal() {
        PhaseBar::hidden(PhaseBar::PRODUCER_PHASES)
    } else {
        PhaseBar::new(delay, PhaseBar::PRODUCER_PHASES)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => CliConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CliConfig::default(),
    };
    if let Some(delay) = cli.delay {
        config.delay = delay;
    }
    init_tracing(cli.log_level.as_deref(), &config);

    match cli.command {
        Commands::Seed { swap } => {
            println!("{}", seed_command(&swap)?);
        }
        Commands::Generate {
            swap,
            block_hash,
            block_number,
            quiet,
        } => {
            let request = generate_request(&config, &swap, &block_hash, &block_number)?;
            let mut bar = producer_bar(quiet, request.params.delay());
            let proof = generate_vdf(&request, &mut bar);
            bar.finish();
            println!("{}", proof.to_hex());
        }
        Commands::Verify {
            swap,
            block_hash,
            proof,
        } => {
            let request = verify_request(&config, &swap, &block_hash, &proof)?;
            let valid = is_valid_vdf(&request)?;
            println!("{}", if valid { "valid" } else { "invalid" });
            if !valid {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Selftest { quiet } => {
            let mut bar = producer_bar(quiet, config.delay);
            let report = selftest(&config, &mut bar)?;
            bar.finish();
            println!("proof:                {}", report.proof_hex);
            println!("accepted:             {}", report.accepted);
            println!("wrong block rejected: {}", report.wrong_block_rejected);
            println!("tampered rejected:    {}", report.tampered_rejected);
            println!("generate:             {:?}", report.generate_time);
            println!("verify:               {:?}", report.verify_time);
            if !report.passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}
