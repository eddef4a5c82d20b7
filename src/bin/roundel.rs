use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};

use roundel::{ImageSet, RunConfig, ShapeKind};

/// Composites the input images into a nested collage by painting each one
/// through a shrinking concentric clip shape.
#[derive(Parser, Debug)]
#[command(name = "roundel", version)]
struct Cli {
    /// Output file; the extension picks the format (.svg or .pdf).
    #[arg(short, long, default_value = "output.svg")]
    out: PathBuf,

    /// Extent decrement between steps, in pixels.
    #[arg(short, long, default_value_t = roundel::DEFAULT_GAP,
          value_parser = clap::value_parser!(u32).range(1..))]
    gap: u32,

    /// Clip shape painted at every step.
    #[arg(short, long, value_enum, default_value_t = ShapeChoice::Circle)]
    shape: ShapeChoice,

    /// Print status messages while processing.
    #[arg(short, long)]
    verbose: bool,

    /// Print status and debug messages, and echo every resolved option.
    #[arg(short, long)]
    debug: bool,

    /// Input images (PNG), painted in order, cycling.
    #[arg(required = true, value_name = "IMAGE")]
    images: Vec<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeChoice {
    Circle,
    Square,
    Triangle,
}

impl From<ShapeChoice> for ShapeKind {
    fn from(choice: ShapeChoice) -> Self {
        match choice {
            ShapeChoice::Circle => ShapeKind::Circle,
            ShapeChoice::Square => ShapeKind::Square,
            ShapeChoice::Triangle => ShapeKind::Triangle,
        }
    }
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Usage problems exit 1; --help and --version exit 0.
            let failed = err.use_stderr();
            let _ = err.print();
            return if failed {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    if let Err(err) = run(cli) {
        eprintln!("roundel: {err:#}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn run(cli: Cli) -> anyhow::Result<()> {
    init_tracing(cli.verbose, cli.debug);

    if cli.debug {
        tracing::debug!(
            out = %cli.out.display(),
            gap = cli.gap,
            shape = ?cli.shape,
            verbose = cli.verbose,
            "resolved options"
        );
        tracing::debug!("processing {} image(s):", cli.images.len());
        for path in &cli.images {
            tracing::debug!("\t{}", path.display());
        }
    }

    let config = RunConfig::new(cli.out, cli.gap, cli.shape.into(), cli.images)?;
    let images = ImageSet::load(&config.inputs)?;
    let summary = roundel::compose(&config, &images)?;

    tracing::info!(
        steps = summary.steps,
        canvas = summary.canvas_size,
        "composite finished"
    );
    eprintln!("wrote {}", config.out.display());
    Ok(())
}

fn init_tracing(verbose: bool, debug: bool) {
    let level = if debug {
        tracing::Level::DEBUG
    } else if verbose {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .without_time()
        .init();
}
