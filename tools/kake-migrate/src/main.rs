//! kake-migrate: runs the Kake contract migrations.
//!
//! `plan` prints the requests the migration issues. `migrate` validates them
//! against the compiled artifacts and deploys to the in-memory development
//! chain, or stops after validation with `--dry-run`.

mod demo;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use kake_migrations::prelude::*;

/// kake-migrate: deploy the Kake2 and Kake3 contracts
#[derive(Parser, Debug)]
#[command(name = "kake-migrate")]
#[command(about = "Runs the Kake contract deployment migration", version)]
struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the deployment requests without resolving or sending anything
    Plan {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate and execute the migration
    Migrate(MigrateArgs),
}

#[derive(Args, Debug, Default)]
struct MigrateArgs {
    /// Directory of compiled artifacts (Truffle build JSON)
    #[arg(long)]
    artifacts_dir: Option<PathBuf>,

    /// Deployer address
    #[arg(long)]
    from: Option<String>,

    /// Validate only; submit nothing
    #[arg(long)]
    dry_run: bool,

    /// Fail on EIP-55 checksum mismatches instead of warning
    #[arg(long)]
    strict: bool,

    /// Run even if the ledger marks the migration completed
    #[arg(long)]
    reset: bool,

    /// Ledger file recording the last completed migration
    #[arg(long)]
    ledger: Option<PathBuf>,

    /// Use built-in demo artifacts instead of an artifacts directory
    #[arg(long)]
    demo: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl MigrateArgs {
    /// Layers command-line flags over `config`.
    fn apply(&self, config: &mut RunnerConfig) -> Result<()> {
        if let Some(dir) = &self.artifacts_dir {
            config.artifacts_dir.clone_from(dir);
        }
        if let Some(from) = &self.from {
            config.deployer =
                Address::parse(from).with_context(|| format!("invalid --from address {from:?}"))?;
        }
        if let Some(path) = &self.ledger {
            config.ledger_path = Some(path.clone());
        }
        config.dry_run |= self.dry_run;
        config.strict_addresses |= self.strict;
        config.reset |= self.reset;
        Ok(())
    }
}

fn init_logging(verbose: bool) -> Result<()> {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn plan() -> Result<Vec<DeploymentRequest>> {
    let mut ctx = RecordingContext::new();
    DeployContracts.configure(&mut ctx)?;
    Ok(ctx.into_calls())
}

fn print_plan(requests: &[DeploymentRequest], json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(requests)?);
        return Ok(());
    }
    for (i, request) in requests.iter().enumerate() {
        let args: Vec<&str> = request.args.iter().map(AddressLiteral::as_str).collect();
        println!("{}. {}({})", i + 1, request.artifact, args.join(", "));
    }
    Ok(())
}

async fn migrate(args: &MigrateArgs, mut config: RunnerConfig) -> Result<MigrationReport> {
    args.apply(&mut config)?;
    config.validate()?;

    let resolver: Arc<dyn ArtifactResolver> = if args.demo {
        info!("Using built-in demo artifacts");
        Arc::new(demo::demo_registry())
    } else {
        let artifacts = ArtifactDirectory::open(&config.artifacts_dir).with_context(|| {
            format!(
                "opening artifacts directory {} (use --demo to run without them)",
                config.artifacts_dir.display()
            )
        })?;
        Arc::new(artifacts)
    };

    let ledger: Arc<dyn MigrationLedger> = match &config.ledger_path {
        Some(path) => Arc::new(FileLedger::new(path)),
        None => Arc::new(InMemoryLedger::new()),
    };

    info!(deployer = %config.deployer, "Deploying to in-memory development chain");
    let chain = Arc::new(InMemoryChain::new());
    let runner = MigrationRunner::new(config, resolver, chain, ledger);

    let report = runner
        .run(&DeployContracts)
        .await
        .with_context(|| format!("migration {} failed", DeployContracts::NAME))?;
    Ok(report)
}

fn print_report(report: &MigrationReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!(
        "Migration {} ({}): {:?}",
        report.number, report.name, report.outcome
    );
    for receipt in &report.receipts {
        println!(
            "  {} deployed at {} (nonce {}, tx {})",
            receipt.artifact, receipt.contract_address, receipt.nonce, receipt.transaction_hash
        );
    }
    if report.outcome == MigrationOutcome::DryRun {
        for request in &report.requests {
            println!("  {} validated ({} args)", request.artifact, request.arity());
        }
    }
    for warning in &report.warnings {
        println!(
            "  warning: {} argument {} should be {}",
            warning.artifact, warning.literal, warning.expected
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    match cli.command {
        Command::Plan { json } => {
            let requests = plan()?;
            print_plan(&requests, json)?;
        }
        Command::Migrate(args) => {
            let report = migrate(&args, RunnerConfig::from_env()).await?;
            print_report(&report, args.json)?;
        }
    }

    Ok(())
}
