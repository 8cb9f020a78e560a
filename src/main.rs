use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sprintline::commands;
use sprintline::error_fmt::AppError;
use sprintline::render::DEFAULT_CELL_WIDTH;
use sprintline::TimelineContext;

#[derive(Parser)]
#[command(name = "sprintline")]
#[command(about = "Epic and sprint timeline charts for agile projects")]
struct Cli {
    /// Timeline file (defaults to ./timeline.yml, then the built-in timeline)
    #[arg(long, short, global = true, env = "SPRINTLINE_CONFIG")]
    config: Option<PathBuf>,
    /// Log debug events to stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Draw the epic timeline chart
    Show {
        /// Width of one sprint column in characters (clamped to 3..=40)
        #[arg(long, default_value_t = DEFAULT_CELL_WIDTH)]
        cell_width: usize,
    },
    /// List every sprint with its date range
    Sprints,
    /// Show the detail page for a sprint
    Sprint {
        /// Sprint number
        id: String,
    },
    /// Validate the timeline configuration
    Check,
    /// Write the timeline as a static HTML site
    Build {
        /// Output directory
        #[arg(long, short, default_value = "site")]
        out: PathBuf,
    },
    /// Write the built-in timeline to ./timeline.yml as a starting point
    Init {
        /// Overwrite an existing timeline.yml
        #[arg(long, short)]
        force: bool,
    },
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_env("SPRINTLINE_LOG").unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = cli.config.as_deref();
    let result = match cli.command {
        Commands::Show { cell_width } => with_context(config, |ctx| commands::show(ctx, cell_width)),
        Commands::Sprints => with_context(config, commands::sprints),
        Commands::Sprint { id } => with_context(config, |ctx| commands::sprint(ctx, &id)),
        Commands::Check => with_context(config, commands::check),
        Commands::Build { out } => with_context(config, |ctx| commands::build(ctx, &out)),
        Commands::Init { force } => commands::init(Path::new("."), force),
    };

    if let Err(e) = result {
        eprint!("{}", e);
        std::process::exit(1);
    }
}

/// Load the timeline and run a command against it.
fn with_context<F>(config: Option<&Path>, run: F) -> Result<(), AppError>
where
    F: FnOnce(&TimelineContext) -> Result<(), AppError>,
{
    let ctx = TimelineContext::load(config, Path::new("."))?;
    run(&ctx)
}
