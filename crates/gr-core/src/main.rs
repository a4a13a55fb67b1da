//! gr-core: reconcile a guild's class/weapon taxonomy against a role snapshot.
//!
//! Reads config from flags or env vars:
//!   GUILD_ROSTER_CONFIG    taxonomy document (default: XDG, then ./config.json)
//!   GUILD_ROSTER_SNAPSHOT  captured guild role snapshot (JSON)

use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand};
use gr_common::OutputFormat;
use gr_config::{lint, resolve_config, taxonomy_schema, ConfigPaths, ConfigSnapshot, Taxonomy};
use gr_core::logging::{init_logging, LogFormat};
use gr_core::{
    output, reconcile, ExitCode, FileSnapshotSource, ReconciliationReport, SnapshotSource,
};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "gr-core", version, about = "Guild class/weapon role reconciliation")]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Log line format on stderr
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Reconcile the taxonomy against a role snapshot and report drift
    Check(CheckArgs),
    /// Load, validate, and lint the taxonomy only
    Validate(ConfigArgs),
    /// Print the JSON Schema of the taxonomy document
    Schema,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Taxonomy document (.json, .toml, .yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct CheckArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Captured guild role snapshot
    #[arg(short, long, env = "GUILD_ROSTER_SNAPSHOT")]
    snapshot: PathBuf,

    /// Report format on stdout
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn load_taxonomy(args: &ConfigArgs) -> gr_common::Result<(Taxonomy, ConfigPaths)> {
    let paths = resolve_config(args.config.as_deref());
    let taxonomy = Taxonomy::from_file(&paths.config)?;
    for warning in lint(&taxonomy) {
        warn!(%warning, "config lint");
    }
    info!(
        path = %paths.config.display(),
        source = %paths.source,
        classes = taxonomy.classes.len(),
        "config loaded"
    );
    Ok((taxonomy, paths))
}

fn write_stdout(text: &str) -> gr_common::Result<()> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", text)?;
    Ok(())
}

fn run_check(args: &CheckArgs) -> gr_common::Result<ExitCode> {
    let (taxonomy, _) = load_taxonomy(&args.config)?;
    let snapshot = FileSnapshotSource::new(&args.snapshot).fetch()?;
    let reconciliation = reconcile(&taxonomy, &snapshot)?;
    let config = ConfigSnapshot::capture(&taxonomy)?;
    let report = ReconciliationReport::new(reconciliation, config, snapshot.guild_id.clone());

    write_stdout(&output::render(&report, args.format)?)?;
    Ok(if report.has_drift() {
        ExitCode::DriftFound
    } else {
        ExitCode::Clean
    })
}

fn run_validate(args: &ConfigArgs) -> gr_common::Result<ExitCode> {
    let (taxonomy, paths) = load_taxonomy(args)?;
    let mut lines = vec![format!(
        "Loaded {} classes ({} weapons) from {}",
        taxonomy.classes.len(),
        taxonomy.weapon_count(),
        paths.config.display()
    )];
    lines.extend(lint(&taxonomy).iter().map(|w| format!("warning: {}", w)));
    write_stdout(&lines.join("\n"))?;
    Ok(ExitCode::Clean)
}

fn run(cli: &Cli) -> gr_common::Result<ExitCode> {
    match &cli.command {
        Command::Check(args) => run_check(args),
        Command::Validate(args) => run_validate(args),
        Command::Schema => {
            write_stdout(&serde_json::to_string_pretty(&taxonomy_schema())?)?;
            Ok(ExitCode::Clean)
        }
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.log_format);

    let code = match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::for_error(&err)
        }
    };
    process::exit(code.as_i32());
}
