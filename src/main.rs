use artwork_metrics::imaging::RustBackend;
use artwork_metrics::process::{ProcessReport, process};
use artwork_metrics::{config, output, scan};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

/// Shared flags for commands that print results.
#[derive(clap::Args, Clone)]
struct OutputArgs {
    /// Print results as JSON instead of text
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
#[command(name = "artwork-metrics")]
#[command(about = "Aggregate color metrics for artwork images")]
#[command(long_about = "\
Aggregate color metrics for artwork images

For every image, prints the mean red, green and blue channel values (0-255),
a brightness score and a saturation score (both 0-100):

  brightness = max(mean R, mean G, mean B) / 255 * 100
  saturation = (max - min) / max * 100, or 0 for a black image

Supported formats: JPEG, PNG, TIFF, WebP, GIF, BMP.

Run 'artwork-metrics gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute metrics for the given image files
    Compute {
        /// Image files to measure
        #[arg(required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Find every image under a directory and compute its metrics
    Scan {
        /// Directory to scan
        dir: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let report = match cli.command {
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
            return Ok(());
        }
        Command::Compute { files, output: out } => {
            let cfg = config::load_config(&cli.config)?;
            init_thread_pool(&cfg.processing);
            let report = process(&RustBackend::new(), &files, &cfg.decode.options(), None);
            if out.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                output::print_report(&report, None);
            }
            report
        }
        Command::Scan { dir, output: out } => {
            let cfg = config::load_config(&cli.config)?;
            init_thread_pool(&cfg.processing);
            let paths = scan::scan(&dir, &cfg.scan)?;
            if out.json {
                let report = process(&RustBackend::new(), &paths, &cfg.decode.options(), None);
                println!("{}", serde_json::to_string_pretty(&report)?);
                report
            } else {
                scan_streaming(&dir, &paths, &cfg)?
            }
        }
    };

    if report.failed() > 0 {
        std::process::exit(1);
    }
    Ok(())
}

/// Process with a printer thread so lines appear as images complete.
fn scan_streaming(
    root: &Path,
    paths: &[PathBuf],
    cfg: &config::MetricsConfig,
) -> Result<ProcessReport, Box<dyn std::error::Error>> {
    let (tx, rx) = std::sync::mpsc::channel();
    let root_for_printer = root.to_path_buf();
    let printer = std::thread::spawn(move || {
        for event in rx {
            for line in output::format_process_event(&event, Some(&root_for_printer)) {
                println!("{}", line);
            }
        }
    });
    let report = process(&RustBackend::new(), paths, &cfg.decode.options(), Some(tx));
    printer
        .join()
        .map_err(|_| "output thread panicked".to_string())?;
    println!();
    println!("{}", output::format_summary(&report));
    Ok(report)
}

/// Route `log` output to stderr. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Initialize the rayon thread pool based on processing config.
///
/// Caps at the number of available CPU cores; user can constrain down, not up.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
