//! Remove broadband noise from an audio file

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use voice_workbench::{logging, DenoisePipeline, Settings};

/// Audio denoiser (Wiener filter)
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input audio file
    #[arg(long)]
    input: PathBuf,

    /// Output audio file (.wav, or any extension ffmpeg can write)
    #[arg(long)]
    output: PathBuf,

    /// Settings file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> ExitCode {
    logging::init("voice_workbench=info,info");
    let args = Args::parse();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let settings = Settings::load_or_default(args.config.as_deref())
        .context("failed to load settings")?;

    let report = DenoisePipeline::new(settings).run(&args.input, &args.output)?;

    tracing::info!(
        "done: {} ({} Hz, {:.2} s)",
        report.output.display(),
        report.sample_rate,
        report.duration_secs
    );
    Ok(())
}
