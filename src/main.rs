use clap::{Parser, Subcommand};
use hdr_summarizer::render::{self, Format};
use hdr_summarizer::{
    ConcurrencyGate, HdrLogProcessor, ProcessRunner, Result, TimeWindow, ToolConfig,
    parse_summary_file,
};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "hdr-summarizer")]
#[command(about = "Trim, merge and summarize HDR latency logs of a load-generation run", long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,

    /// Log level (trace, debug, info, warn, error); RUST_LOG takes precedence.
    #[arg(short = 'l', long, default_value = "info", global = true)]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every `{name}.hdr` under a run directory.
    Process {
        /// Run directory holding one subdirectory per client.
        #[arg(long)]
        dir: PathBuf,

        /// Base name of the logs (`log` for `log.hdr`).
        #[arg(long, default_value = "log")]
        name: String,

        /// Drop samples before this many seconds.
        #[arg(long, conflicts_with_all = ["warmup", "duration", "cooldown"])]
        start: Option<f64>,

        /// Drop samples after this many seconds.
        #[arg(long, conflicts_with_all = ["warmup", "duration", "cooldown"])]
        end: Option<f64>,

        /// Seconds of warmup to drop (use with --duration).
        #[arg(long, requires = "duration")]
        warmup: Option<f64>,

        /// Total run length in seconds.
        #[arg(long)]
        duration: Option<f64>,

        /// Seconds of cooldown to drop (use with --duration).
        #[arg(long, requires = "duration")]
        cooldown: Option<f64>,

        /// Max concurrent tool processes (default: 2 x usable cores).
        #[arg(long)]
        concurrency: Option<usize>,

        /// JSON file with java / jar locations.
        #[arg(long)]
        tools: Option<PathBuf>,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },

    /// Parse an existing `-summary.txt` report.
    Summary {
        #[arg(long)]
        file: PathBuf,

        #[arg(long, value_enum, default_value_t = Format::Table)]
        format: Format,

        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.cmd {
        Commands::Process {
            dir,
            name,
            start,
            end,
            warmup,
            duration,
            cooldown,
            concurrency,
            tools,
            format,
            out,
        } => {
            // 1) Tools + window.
            let tools = match tools {
                Some(path) => ToolConfig::from_file(path)?,
                None => ToolConfig::default(),
            };
            let window = match duration {
                Some(duration) => TimeWindow::from_run(
                    warmup.unwrap_or(0.0),
                    duration,
                    cooldown.unwrap_or(0.0),
                )?,
                None => TimeWindow::new(start, end)?,
            };
            let gate = match concurrency {
                Some(n) => ConcurrencyGate::new(n),
                None => ConcurrencyGate::from_host(),
            };

            // 2) Run the pipeline.
            let processor = HdrLogProcessor::with_runner(ProcessRunner, gate, tools, window);
            let summary = processor.process_hdr_file_set(&dir, &name).await?;

            // 3) Render.
            emit(render::render(&summary, format)?, out)?;
        }
        Commands::Summary { file, format, out } => {
            let summary = parse_summary_file(&file)?;
            emit(render::render(&summary, format)?, out)?;
        }
    }

    Ok(())
}

fn emit(text: String, out: Option<PathBuf>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(&path, text)?;
            eprintln!("Wrote {}", path.display());
        }
        None => print!("{}", text),
    }
    Ok(())
}
