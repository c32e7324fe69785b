//! Change the pitch of the voice in a video

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use voice_workbench::{logging, Settings, VoiceChangePipeline};

/// Video voice changer: denoise and pitch-shift the audio track
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input video file
    #[arg(long)]
    input: PathBuf,

    /// Output video file
    #[arg(long)]
    output: PathBuf,

    /// Pitch factor (>1 raises the pitch, <1 lowers it)
    #[arg(long, default_value_t = 1.5, allow_negative_numbers = true)]
    pitch: f64,

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

    let report = VoiceChangePipeline::new(settings).run(&args.input, &args.output, args.pitch)?;

    tracing::info!(
        "done: {} ({:+.2} semitones at {} fps)",
        report.output.display(),
        report.semitones,
        report.frame_rate
    );
    Ok(())
}
