use clap::{Parser, ValueEnum};
use erdmerge::document::{read_schema, render_schema, write_schema};
use erdmerge::id::{IdGenerator, SequentialIds, UuidIds};
use erdmerge::{Reconciler, Reconciliation};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum IdStyle {
    /// col-<uuid v4>
    Uuid,
    /// <prefix><n>, deterministic
    Seq,
}

/// Merge a proposed schema revision into the current schema without losing column ids.
#[derive(Debug, Parser)]
#[command(name = "erdmerge", version)]
struct Args {
    /// Current schema document (JSON). `null` or an empty file means no schema; `-` reads stdin.
    current: String,
    /// Proposed schema document (JSON).
    proposed: String,
    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<String>,
    /// How to mint ids for new columns
    #[arg(long, value_enum, default_value = "uuid")]
    ids: IdStyle,
    /// Prefix for sequential ids
    #[arg(long, default_value = "col-")]
    id_prefix: String,
    /// Print a summary of the merge to stderr
    #[arg(short, long)]
    report: bool,
    /// Emit compact JSON
    #[arg(long)]
    compact: bool,
}

fn reconcile(
    args: &Args,
    ids: impl IdGenerator,
) -> Result<Reconciliation, erdmerge::document::DocumentError> {
    let current = read_schema(&args.current)?;
    let proposed = read_schema(&args.proposed)?;
    Ok(Reconciler::new(ids).reconcile(current.as_ref(), proposed.as_ref()))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.current == "-" && args.proposed == "-" {
        eprintln!("Only one of the inputs can be read from stdin");
        process::exit(1);
    }

    let result = match args.ids {
        IdStyle::Uuid => reconcile(&args, UuidIds),
        IdStyle::Seq => reconcile(&args, SequentialIds::new(args.id_prefix.clone())),
    };
    let Reconciliation { schema, report } = match result {
        Ok(r) => r,
        Err(e) => {
            eprintln!("{}", e);
            process::exit(1);
        }
    };

    if args.report {
        eprintln!("{}", report);
    }

    let pretty = !args.compact;
    let written = match &args.output {
        Some(path) => write_schema(path, schema.as_ref(), pretty),
        None => render_schema(schema.as_ref(), pretty).map(|json| println!("{}", json)),
    };
    if let Err(e) = written {
        eprintln!("{}", e);
        process::exit(1);
    }
}
