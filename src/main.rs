use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Mutex;
use subcombi::{
    cli::Cli, config::Config, matrix::MatrixPlot, pipeline, report::FrequencyReport,
};
use tracing::info;
use tracing_subscriber::{fmt::writer::MakeWriterExt, EnvFilter};

/// Initialize logging to stdout and the run log file
fn init_tracing(debug: bool, log_path: &Path) -> Result<()> {
    let log_file = File::create(log_path)
        .with_context(|| format!("Failed to create log file {}", log_path.display()))?;
    let level = if debug {
        tracing::Level::TRACE
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stdout.and(Mutex::new(log_file)))
        .with_ansi(false)
        .without_time()
        .with_level(debug)
        .with_target(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let paths = args.output_paths();

    if let Some(output) = paths.clobbering(&args.file) {
        anyhow::bail!(
            "Output {} would overwrite the input file; pass --output",
            output.display()
        );
    }

    init_tracing(args.debug, &paths.log)?;
    info!("Input file: {}", args.file.display());

    let config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => Config::default(),
    };
    let settings = args.settings(&config)?;

    let input = File::open(&args.file)
        .with_context(|| format!("Failed to open {}", args.file.display()))?;
    let frequencies = pipeline::calculate_from_reader(BufReader::new(input), &settings.thresholds)
        .with_context(|| format!("Failed to process {}", args.file.display()))?;

    MatrixPlot::new(settings.size, settings.font_size)
        .write_to_path(&frequencies, &paths.picture)
        .with_context(|| format!("Failed to write {}", paths.picture.display()))?;
    FrequencyReport::from_frequencies(&frequencies)
        .write_to_path(&paths.data)
        .with_context(|| format!("Failed to write {}", paths.data.display()))?;

    info!("Picture: {}", paths.picture.display());
    info!("Data: {}", paths.data.display());
    info!("Log: {}", paths.log.display());
    Ok(())
}
