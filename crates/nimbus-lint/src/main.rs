#![allow(unused_assignments)] // thiserror/miette derive macros trigger false positives

use std::path::PathBuf;
use std::process::ExitCode;

use bpaf::Bpaf;
use nimbus_analysis::TableLabel;
use nimbus_lint_config::ReporterKind;
use tracing_subscriber::prelude::*;

mod commands;
mod reporters;

#[derive(Debug, Clone, Bpaf)]
pub struct CheckArgs {
    /// JSON Schema the feature value must satisfy
    #[bpaf(long("schema"), argument("FILE"))]
    pub schema: Option<PathBuf>,

    /// Output format for diagnostics
    #[bpaf(long("reporter"), argument("text|json|pretty"))]
    pub reporter: Option<ReporterKind>,

    /// Report diagnostics in source order
    #[bpaf(long("sort"), switch)]
    pub sort: bool,

    /// Feature value to lint
    #[bpaf(positional("FILE"))]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Bpaf)]
pub struct CompleteArgs {
    /// JSON Schema the feature value must satisfy
    #[bpaf(long("schema"), argument("FILE"))]
    pub schema: Option<PathBuf>,

    /// Byte offset of the cursor
    #[bpaf(long("offset"), argument("N"))]
    pub offset: usize,

    /// Feature value being edited
    #[bpaf(positional("FILE"))]
    pub file: PathBuf,
}

#[derive(Debug, Clone, Bpaf)]
#[bpaf(options, version, fallback_to_usage)]
/// Lint experiment feature values against their JSON Schema
struct Cli {
    #[bpaf(external(commands))]
    command: Commands,
}

#[derive(Debug, Clone, Bpaf)]
enum Commands {
    #[bpaf(command("check"))]
    /// Lint a feature value file
    Check(#[bpaf(external(check_args))] CheckArgs),

    #[bpaf(command("complete"))]
    /// Print the property names offered at a cursor offset
    Complete(#[bpaf(external(complete_args))] CompleteArgs),

    #[bpaf(command("metrics"))]
    /// Print the metrics shown in an analysis table, in display order
    Metrics(
        /// Table to describe: results or highlights
        #[bpaf(positional("TABLE"))]
        TableLabel,
    ),

    #[bpaf(command("version"))]
    /// Print version information
    Version,
}

fn init_tracing() {
    if let Ok(filter) = tracing_subscriber::EnvFilter::try_from_env("NIMBUS_LINT_LOG") {
        tracing_subscriber::registry()
            .with(
                tracing_tree::HierarchicalLayer::new(2)
                    .with_targets(true)
                    .with_bracketed_fields(true)
                    .with_indent_lines(true)
                    .with_verbose_exit(true)
                    .with_verbose_entry(true)
                    .with_timer(tracing_tree::time::Uptime::default())
                    .with_writer(std::io::stderr),
            )
            .with(filter)
            .init();
    }
}

fn main() -> ExitCode {
    init_tracing();

    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    let cli = cli().run();

    let result = match cli.command {
        Commands::Check(args) => commands::check::run(&args),
        Commands::Complete(args) => match commands::complete::run(&args) {
            Ok(()) => return ExitCode::SUCCESS,
            Err(e) => Err(e),
        },
        Commands::Metrics(table) => match commands::metrics::run(table) {
            Ok(()) => return ExitCode::SUCCESS,
            Err(e) => Err(e),
        },
        Commands::Version => {
            println!("nimbus-lint {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
    };

    match result {
        Ok(had_errors) => {
            if had_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(2)
        }
    }
}
