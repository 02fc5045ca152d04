//! # landledger CLI entry point
//!
//! Parses command-line arguments and dispatches to the Ledger. Every command
//! prints JSON on stdout. Exit codes: 0 on success, 1 on error, 2 when a
//! verification fails or the chain audit finds a break.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use landledger::{
    DigestAlgorithm, LandRecord, LandType, Ledger, LedgerConfig, RegistrationRequest,
    VerificationResult, VerificationToken,
};

/// Exit code for a failed verification or a broken chain.
const EXIT_INVALID: u8 = 2;

/// Land Ledger CLI
///
/// Registers land records into a hash-chained ledger, verifies owner
/// identities and certificate tokens, and audits the chain.
#[derive(Parser, Debug)]
#[command(name = "landledger", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to the ledger database.
    #[arg(long, global = true, default_value = "landledger.db")]
    db: PathBuf,

    /// Key the chain is stored under.
    #[arg(long, global = true, default_value = landledger::store::DEFAULT_STORAGE_KEY)]
    key: String,

    /// Digest used for transaction and block hashes: rolling32 or blake3.
    #[arg(long, global = true, default_value_t = DigestAlgorithm::Rolling32)]
    digest: DigestAlgorithm,

    /// Also check that a verified record is linked to its predecessor.
    #[arg(long, global = true)]
    verify_linkage: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a registration and append it to the chain.
    Register(RegisterArgs),

    /// Verify a registration number against an owner id.
    Verify {
        registration_number: String,
        owner_nic: String,
    },

    /// Verify a certificate token.
    VerifyToken { token: String },

    /// List records, optionally filtered.
    List(ListArgs),

    /// Summary figures over the whole chain.
    Stats,

    /// Replay the whole chain from genesis.
    Audit,
}

#[derive(Args, Debug)]
struct RegisterArgs {
    #[arg(long)]
    owner_name: String,
    #[arg(long)]
    owner_nic: String,
    #[arg(long)]
    address: String,
    #[arg(long)]
    district: String,
    #[arg(long)]
    province: String,
    #[arg(long)]
    land_size: String,
    #[arg(long)]
    land_type: String,
    #[arg(long, requires = "longitude", allow_hyphen_values = true)]
    latitude: Option<String>,
    #[arg(long, requires = "latitude", allow_hyphen_values = true)]
    longitude: Option<String>,
}

#[derive(Args, Debug)]
struct ListArgs {
    /// Only records in this province (exact match).
    #[arg(long)]
    province: Option<String>,
    /// Only records of this land type.
    #[arg(long)]
    land_type: Option<String>,
    /// Case-insensitive text in owner name, registration number, address or district.
    #[arg(long)]
    search: Option<String>,
}

/// Record filter for `list`.
#[derive(Debug, Default)]
struct ListFilter {
    province: Option<String>,
    land_type: Option<LandType>,
    search: Option<String>,
}

impl TryFrom<ListArgs> for ListFilter {
    type Error = anyhow::Error;

    fn try_from(args: ListArgs) -> anyhow::Result<Self> {
        let land_type = args
            .land_type
            .map(|t| t.parse::<LandType>())
            .transpose()
            .context("parsing --land-type")?;
        Ok(Self {
            province: args.province,
            land_type,
            search: args.search.map(|s| s.to_lowercase()),
        })
    }
}

impl ListFilter {
    fn matches(&self, record: &LandRecord) -> bool {
        let entry = &record.entry;
        self.province.as_ref().map_or(true, |p| entry.province == *p)
            && self.land_type.map_or(true, |t| entry.land_type == t)
            && self.search.as_ref().map_or(true, |term| {
                [
                    &entry.owner_name,
                    &entry.registration_number,
                    &entry.property_address,
                    &entry.district,
                ]
                .iter()
                .any(|field| field.to_lowercase().contains(term.as_str()))
            })
    }

    fn apply(&self, records: Vec<LandRecord>) -> Vec<LandRecord> {
        records.into_iter().filter(|r| self.matches(r)).collect()
    }
}

impl From<RegisterArgs> for RegistrationRequest {
    fn from(args: RegisterArgs) -> Self {
        RegistrationRequest {
            owner_name: args.owner_name,
            owner_nic: args.owner_nic,
            property_address: args.address,
            district: args.district,
            province: args.province,
            land_size: args.land_size,
            land_type: args.land_type,
            latitude: args.latitude,
            longitude: args.longitude,
        }
    }
}

/// A registered record together with its certificate token.
#[derive(Serialize)]
struct Registered<'a> {
    record: &'a LandRecord,
    token: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(1)
        }
    }
}

fn config(cli: &Cli) -> LedgerConfig {
    LedgerConfig {
        digest: cli.digest,
        storage_key: cli.key.clone(),
        verify_linkage: cli.verify_linkage,
    }
}

fn run(cli: Cli) -> anyhow::Result<u8> {
    let config = config(&cli);
    tracing::debug!(db = %cli.db.display(), key = %config.storage_key, "opening ledger");
    let ledger = Ledger::open(&cli.db, config)
        .with_context(|| format!("opening ledger at {}", cli.db.display()))?;

    match cli.command {
        Commands::Register(args) => {
            let record = ledger.register_request(&args.into())?;
            print_json(&Registered {
                token: VerificationToken::for_record(&record).to_string(),
                record: &record,
            })?;
            Ok(0)
        }
        Commands::Verify {
            registration_number,
            owner_nic,
        } => {
            let result = ledger.verify(&registration_number, &owner_nic)?;
            report_verification(&result)
        }
        Commands::VerifyToken { token } => {
            let token: VerificationToken = token.parse().context("parsing verification token")?;
            let result = ledger.verify_token(&token)?;
            report_verification(&result)
        }
        Commands::List(args) => {
            let filter = ListFilter::try_from(args)?;
            print_json(&filter.apply(ledger.records()?))?;
            Ok(0)
        }
        Commands::Stats => {
            print_json(&ledger.stats()?)?;
            Ok(0)
        }
        Commands::Audit => {
            let report = ledger.audit()?;
            print_json(&report)?;
            Ok(if report.is_intact() { 0 } else { EXIT_INVALID })
        }
    }
}

fn report_verification(result: &VerificationResult) -> anyhow::Result<u8> {
    print_json(result)?;
    Ok(if result.is_valid { 0 } else { EXIT_INVALID })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
