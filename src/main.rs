use bitplanes::config::{self, AnalysisConfig};
use bitplanes::imaging::RustSource;
use bitplanes::output;
use bitplanes::pipeline::{self, ImageReport};
use bitplanes::present::TerminalPresenter;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "bitplanes")]
#[command(about = "Bit-plane analysis for 8-bit grayscale images")]
#[command(long_about = "\
Bit-plane analysis for 8-bit grayscale images

Each image is sliced into its eight bit-planes (plane 0 = least significant
bit), rebuilt from them, and compared with global thresholding and edge
detection. Colour images are reduced to luma on load.

Shown for every image, in order:
  Original Grayscale Image
  Bit Plane 0 .. Bit Plane 7
  Reconstructed Grayscale Image
  Memory report (original bytes, one packed plane, reduction)
  Thresholding | Edge Detection

Set RUST_LOG=debug for per-stage details.
Run 'bitplanes gen-config' to generate a documented bitplanes.toml.")]
#[command(version)]
struct Cli {
    /// Config file (TOML); defaults apply when omitted
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full analysis and draw previews for each image
    Run {
        /// Images to analyze
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Print only the memory report for each image
    Report {
        /// Emit a JSON array instead of text
        #[arg(long)]
        json: bool,
        /// Images to measure
        #[arg(required = true)]
        images: Vec<PathBuf>,
    },
    /// Print a stock bitplanes.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Command::Run { images } => {
            let config = config::load_config(cli.config.as_deref())?;
            init_thread_pool(&config.processing);
            run(&images, &config)?;
        }
        Command::Report { json, images } => {
            let config = config::load_config(cli.config.as_deref())?;
            init_thread_pool(&config.processing);
            report(&images, json)?;
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

fn run(images: &[PathBuf], config: &AnalysisConfig) -> Result<(), Box<dyn std::error::Error>> {
    let source = RustSource::new();
    let mut presenter = TerminalPresenter::stdout(&config.preview);

    let failures = pipeline::run_each(images, &source, config, &mut presenter);
    for (path, e) in &failures {
        eprintln!("{}: {e}", path.display());
    }
    check_failures(failures.len(), images.len())
}

fn report(images: &[PathBuf], json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let source = RustSource::new();
    let mut reports: Vec<(usize, ImageReport)> = Vec::new();
    let mut failed = 0;

    for (pos, (path, result)) in images
        .iter()
        .zip(pipeline::memory_report_batch(images, &source))
        .enumerate()
    {
        match result {
            Ok(report) => reports.push((pos + 1, report)),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                failed += 1;
            }
        }
    }

    if json {
        let entries: Vec<&ImageReport> = reports.iter().map(|(_, r)| r).collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
    } else {
        for (index, entry) in &reports {
            println!(
                "{}",
                output::format_image_header(*index, &entry.path, entry.dimensions)
            );
            for line in output::format_memory_report(&entry.report) {
                println!("    {line}");
            }
        }
    }
    check_failures(failed, images.len())
}

fn check_failures(failed: usize, total: usize) -> Result<(), Box<dyn std::error::Error>> {
    if failed > 0 {
        return Err(format!("{failed} of {total} image(s) failed").into());
    }
    Ok(())
}

/// Initialize the rayon thread pool based on processing config.
///
/// Capped at the number of available CPU cores.
fn init_thread_pool(processing: &config::ProcessingConfig) {
    let threads = config::effective_threads(processing);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .ok();
}
