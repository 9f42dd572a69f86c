//! licseal - issue and verify offline software licenses.
//!
//! ## Usage
//!
//! ```bash
//! # Generate a signing key pair
//! licseal keygen --out-dir keys/
//!
//! # Issue a license (base64 + decoy prefix, readable by legacy verifiers)
//! licseal issue \
//!     --customer ACME \
//!     --module gps --module ticket \
//!     --start 2025-01-01 --end 2025-12-31 \
//!     --key keys/private_key.pem \
//!     --out license.lic
//!
//! # Verify it and check today's date and a required module
//! licseal verify --key keys/public_key.pem --license license.lic \
//!     --check-dates --require gps
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use licseal::policy::access::{check_entitlements, check_window, days_remaining};
use licseal::store::file::{read_artifact, read_key_pem, write_artifact, write_keypair};
use licseal::{
    Clock, Issuer, IssuerConfig, LicenseRequest, SystemClock, Verifier, VerifierConfig,
    LEGACY_DECOY_PREFIX_LEN,
};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Issue and verify offline software licenses.
#[derive(Parser)]
#[command(name = "licseal")]
#[command(version = VERSION)]
#[command(about = "Issue and verify offline software licenses")]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign a license and write the artifact
    Issue {
        /// Customer identifier
        #[arg(short, long)]
        customer: String,

        /// Licensed module (repeatable, or comma-separated)
        #[arg(short, long = "module", value_delimiter = ',')]
        modules: Vec<String>,

        /// Activation start date (YYYY-MM-DD)
        #[arg(long)]
        start: String,

        /// Activation end date (YYYY-MM-DD)
        #[arg(long)]
        end: String,

        /// Private key (PKCS#8 PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// Output artifact path
        #[arg(short, long, default_value = "license.lic")]
        out: PathBuf,

        /// Do not prepend a decoy prefix to the signature
        #[arg(long)]
        no_decoy: bool,

        /// Decoy prefix length in hex characters
        #[arg(long, default_value_t = LEGACY_DECOY_PREFIX_LEN)]
        decoy_len: usize,

        /// Write raw JSON instead of base64
        #[arg(long)]
        raw_json: bool,

        /// Emit the LICSEAL/1 header and a self-describing decoy length
        #[arg(long)]
        tagged: bool,
    },

    /// Verify a license artifact
    Verify {
        /// Public key (SPKI PEM)
        #[arg(short, long)]
        key: PathBuf,

        /// License artifact path
        #[arg(short, long)]
        license: PathBuf,

        /// Decoy prefix length of legacy artifacts (tries 0 then 129 if omitted)
        #[arg(long)]
        decoy_len: Option<usize>,

        /// Module that must be licensed (repeatable)
        #[arg(short, long = "require", value_delimiter = ',')]
        required: Vec<String>,

        /// Fail unless today is inside the activation window
        #[arg(long)]
        check_dates: bool,
    },

    /// Generate an Ed25519 key pair
    Keygen {
        /// Directory for private_key.pem and public_key.pem
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match cli.command {
        Commands::Issue {
            customer,
            modules,
            start,
            end,
            key,
            out,
            no_decoy,
            decoy_len,
            raw_json,
            tagged,
        } => {
            let config = IssuerConfig {
                decoy_prefix: !no_decoy,
                decoy_len,
                base64_wrap: !raw_json,
                tagged,
            };
            let private_pem = read_key_pem(&key)?;
            let issuer = Issuer::new(&private_pem, config)?;

            let artifact = issuer.issue(&LicenseRequest {
                customer_id: customer,
                modules,
                start_date: start,
                end_date: end,
            })?;

            write_artifact(&out, &artifact)
                .with_context(|| format!("writing {}", out.display()))?;
            info!("License written to {}", out.display());
        }

        Commands::Verify {
            key,
            license,
            decoy_len,
            required,
            check_dates,
        } => {
            let public_pem = read_key_pem(&key)?;
            let verifier = Verifier::new(
                &public_pem,
                VerifierConfig {
                    decoy_prefix_len: decoy_len,
                },
            )?;

            let artifact = read_artifact(&license)?;
            let record = verifier.verify(&artifact)?;

            println!("customer: {}", record.customer_id());
            println!(
                "window:   {} .. {}",
                record.start_date_str(),
                record.end_date_str()
            );
            println!("modules:  {}", record.modules().join(", "));

            let today = SystemClock.today();
            if check_dates {
                check_window(&record, today)?;
                if let Some(days) = days_remaining(&record, today) {
                    println!("expires in {} day(s)", days);
                }
            }

            let required: Vec<&str> = required.iter().map(String::as_str).collect();
            check_entitlements(&record, &required)?;

            info!("License valid");
        }

        Commands::Keygen { out_dir } => {
            let pair = licseal::generate_keypair()?;
            let fingerprint = licseal::public_key_fingerprint(&pair.public_pem)?;
            let (private_path, public_path) = write_keypair(&out_dir, &pair)?;

            info!("Private key: {} (keep secret)", private_path.display());
            info!("Public key:  {}", public_path.display());
            println!("fingerprint: {}", fingerprint);
        }
    }

    Ok(())
}
