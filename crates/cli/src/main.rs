use fsvisit_cli::cli::commands::CliArgs;
use fsvisit_cli::cli::filters::resolve_filter;
use fsvisit_cli::cli::output::OutputFormatter;
use fsvisit_cli::{init_logging, NAME, VERSION};
use fsvisit_core::{FileSystemVisitor, RealFileSystem, VisitError, VisitorConfig, WriterSink};

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use std::process;
use tracing::debug;

fn main() {
    let args = CliArgs::parse();
    init_logging(&args);

    debug!("{} v{} starting", NAME, VERSION);
    debug!("Arguments: {:?}", args);

    let exit_code = match run(&args) {
        Ok(()) => 0,
        Err(e) => {
            debug!(error = ?e, "Run failed");
            eprintln!("Error: {:#}", e);
            1
        }
    };

    process::exit(exit_code);
}

fn run(args: &CliArgs) -> Result<()> {
    let root = args.target_path.to_string_lossy().into_owned();

    let mut config = VisitorConfig::from_env(root)?;
    if args.log_events {
        config = config.with_log_events(true);
    }
    if !args.all {
        let mode = args
            .filter
            .context("--filter is required unless --all is given")?;
        config = config.with_filter(resolve_filter(mode, &args.glob_pattern)?);
    }
    config.validate()?;

    debug!(
        root = %config.root_path,
        filter = ?args.filter,
        glob = %args.glob_pattern,
        log_events = config.log_events,
        "Visitor configured"
    );

    let visitor =
        FileSystemVisitor::new(config, RealFileSystem::new()).with_sink(WriterSink::stdout());
    let formatter = OutputFormatter::new(args.format.into());
    let mut stdout = io::stdout();

    let written = if args.all {
        let entries = visitor.list_all()?;
        formatter.write_entries(&mut stdout, entries.into_iter().map(Ok::<_, VisitError>))?
    } else {
        formatter.write_entries(&mut stdout, visitor.search()?)?
    };
    stdout.flush()?;

    debug!(entries = written, "Visit complete");
    Ok(())
}
