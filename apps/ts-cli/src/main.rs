use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;
use ts_batch::{BatchError, PointOutcome, run_batch};
use ts_fluids::state_point::PropertyValue;
use ts_fluids::{
    CoolPropEngine, FlashInput, FluidKind, PropertyEngine, Session, StateError, StatePoint,
    filter_catalog, resolve_fluid, validate_text,
};

#[derive(Parser)]
#[command(name = "ts-cli")]
#[command(about = "thermostate CLI - thermodynamic state points from two properties", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List catalog fluids, optionally filtered by a search string
    Fluids {
        /// Substring of an id, name or alias
        query: Option<String>,
    },
    /// Compute one state point
    State {
        /// Fluid identifier (e.g. nitrogen, isobutan, R134A)
        fluid: String,
        /// Two inputs as PROP=VALUE, e.g. T=273.15 "P=1 atm"
        #[arg(num_args = 2, required = true)]
        inputs: Vec<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Run every point of a batch query file
    Batch {
        /// Path to the query file (YAML, or JSON by extension)
        path: PathBuf,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Validate query file syntax, inputs and fluid
    Validate {
        /// Path to the query file
        path: PathBuf,
    },
}

#[derive(thiserror::Error, Debug)]
enum CliError {
    #[error(transparent)]
    State(#[from] StateError),

    #[error(transparent)]
    Batch(#[from] BatchError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Expected PROP=VALUE, got '{0}'")]
    MalformedInput(String),

    #[error("{failed} of {total} points failed")]
    PointsFailed { failed: usize, total: usize },
}

type CliResult<T> = Result<T, CliError>;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Fluids { query } => cmd_fluids(query.as_deref().unwrap_or("")),
        Commands::State {
            fluid,
            inputs,
            json,
        } => cmd_state(&fluid, &inputs, json),
        Commands::Batch { path, json } => cmd_batch(&path, json),
        Commands::Validate { path } => cmd_validate(&path),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_fluids(query: &str) -> CliResult<()> {
    let entries = filter_catalog(query);
    if entries.is_empty() {
        println!("No fluids match '{}'", query);
        return Ok(());
    }

    for entry in entries {
        let kind = match entry.kind() {
            FluidKind::Pure => "pure",
            FluidKind::PredefinedMixture => "mixture",
        };
        let aliases = if entry.aliases.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.aliases.join(", "))
        };
        println!(
            "  {:<10} {:<20} {:<8}{}",
            entry.canonical_id, entry.display_name, kind, aliases
        );
    }
    Ok(())
}

fn cmd_state(fluid: &str, inputs: &[String], json: bool) -> CliResult<()> {
    let mut session = Session::new(CoolPropEngine::new());
    let (input, state) = query_state(&mut session, fluid, inputs)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("{} at {} ({})", fluid, input, phase_label(&state));
        print_state(&state);
    }
    Ok(())
}

/// Select `fluid`, then parse and evaluate `PROP=VALUE` arguments.
fn query_state<E: PropertyEngine>(
    session: &mut Session<E>,
    fluid: &str,
    inputs: &[String],
) -> CliResult<(FlashInput, StatePoint)> {
    session.select_fluid(fluid)?;

    let pairs = inputs
        .iter()
        .map(|arg| {
            arg.split_once('=')
                .map(|(name, value)| (name.trim(), value.trim()))
                .ok_or_else(|| CliError::MalformedInput(arg.clone()))
        })
        .collect::<CliResult<Vec<_>>>()?;
    let input = validate_text(pairs)?;
    let state = session.evaluate(&input)?;
    Ok((input, state))
}

fn cmd_batch(path: &Path, json: bool) -> CliResult<()> {
    let file = ts_batch::load(path)?;
    let mut session = Session::new(CoolPropEngine::new());
    let outcomes = run_batch(&mut session, &file)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    } else {
        println!("Fluid: {}", file.fluid);
        for outcome in &outcomes {
            print_outcome(outcome);
        }
    }

    let failed = outcomes.iter().filter(|o| !o.is_ok()).count();
    if failed > 0 {
        return Err(CliError::PointsFailed {
            failed,
            total: outcomes.len(),
        });
    }
    Ok(())
}

fn cmd_validate(path: &Path) -> CliResult<()> {
    println!("Validating query file: {}", path.display());
    let file = ts_batch::load(path)?;
    if resolve_fluid(&file.fluid).is_none() {
        return Err(StateError::UnknownFluid { name: file.fluid }.into());
    }
    println!("✓ Query file is valid ({} points)", file.points.len());
    Ok(())
}

fn print_outcome(outcome: &PointOutcome) {
    match &outcome.result {
        Ok(state) => {
            println!("✓ {} ({})", outcome.label, phase_label(state));
            print_state(state);
        }
        Err(err) => println!("✗ {}: {}", outcome.label, err),
    }
}

fn print_state(state: &StatePoint) {
    for (key, value) in state.entries() {
        let text = match value {
            PropertyValue::Scalar(v) => format!("{v:.6e}"),
            PropertyValue::Undefined => "undefined".to_string(),
            PropertyValue::Vector(xs) => format!("{xs:?}"),
        };
        println!("  {key:>6} = {text}");
    }
}

fn phase_label(state: &StatePoint) -> &'static str {
    if state.is_two_phase() {
        "two-phase"
    } else {
        "single-phase"
    }
}
