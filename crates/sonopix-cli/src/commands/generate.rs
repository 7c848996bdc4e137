//! Generate command implementation.
//!
//! Loads the input image, runs a synthesis job on the background worker,
//! and writes the resulting WAV file.

use anyhow::{bail, Context, Result};
use colored::Colorize;
use serde_json::json;
use sonopix_spec::{BrightnessCurve, ConversionParams, FrequencyScale};
use sonopix_synth::{JobOutcome, SynthWorker};
use std::io::Write as _;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use crate::input::load_grayscale;

/// Parsed generate-command arguments.
pub struct Args {
    /// Input image path.
    pub input: String,
    /// Output WAV path.
    pub output: String,
    /// Duration in seconds.
    pub duration: f32,
    /// Bottom-row frequency in Hz.
    pub min_freq: f32,
    /// Top-row frequency in Hz.
    pub max_freq: f32,
    /// Frequency scale name.
    pub scale: String,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Brightness curve name.
    pub curve: String,
    /// Invert brightness.
    pub invert: bool,
    /// Smoothing fraction.
    pub smoothing: f32,
    /// Machine-readable output.
    pub json: bool,
}

impl Args {
    fn params(&self) -> ConversionParams {
        ConversionParams {
            duration_seconds: self.duration,
            min_frequency_hz: self.min_freq,
            max_frequency_hz: self.max_freq,
            frequency_scale: match self.scale.as_str() {
                "linear" => FrequencyScale::Linear,
                _ => FrequencyScale::Logarithmic,
            },
            sample_rate_hz: self.sample_rate,
            brightness_curve: BrightnessCurve::from_name(&self.curve),
            invert_image: self.invert,
            smoothing: self.smoothing,
        }
        .sanitize()
    }
}

/// Runs the generate command.
///
/// # Returns
/// Exit code: 0 on success, 2 on generation error; input errors propagate
pub fn run(args: &Args) -> Result<ExitCode> {
    if args.json {
        run_json(args)
    } else {
        run_human(args)
    }
}

/// Runs generate with human-readable (colored) output.
fn run_human(args: &Args) -> Result<ExitCode> {
    let start = Instant::now();
    let params = args.params();

    println!("{} {}", "Converting:".cyan().bold(), args.input);
    println!("{} {}", "Output:".cyan().bold(), args.output);
    println!(
        "{} {:.0}-{:.0} Hz ({:?}), {:.1}s @ {} Hz",
        "Range:".dimmed(),
        params.min_frequency_hz,
        params.max_frequency_hz,
        params.frequency_scale,
        params.duration_seconds,
        params.sample_rate_hz,
    );

    let image = load_grayscale(Path::new(&args.input))?;
    println!("{} {}x{}", "Image:".dimmed(), image.width, image.height);

    let mut worker = SynthWorker::spawn();
    let job = worker.submit(image, &params);
    let outcome = worker.wait_with_progress(job, |percent| {
        print!("\r{} {:>5.1}%", "Synthesizing".cyan(), percent);
        let _ = std::io::stdout().flush();
    });
    println!();

    let wav = match outcome {
        JobOutcome::Completed(wav) => wav,
        JobOutcome::Cancelled => bail!("job was cancelled"),
        JobOutcome::Failed { code, message } => {
            eprintln!("{} [{}] {}", "Generation failed:".red().bold(), code, message);
            return Ok(ExitCode::from(2));
        }
    };

    std::fs::write(&args.output, &wav.wav_data)
        .with_context(|| format!("failed to write {}", args.output))?;

    println!(
        "{} {} ({:.1}s of audio, {} bytes) in {:.2}s",
        "Done:".green().bold(),
        args.output,
        wav.duration_seconds(),
        wav.wav_data.len(),
        start.elapsed().as_secs_f64(),
    );
    println!("{} {}", "PCM hash:".dimmed(), wav.pcm_hash);

    Ok(ExitCode::SUCCESS)
}

/// Runs generate with machine-readable JSON output.
fn run_json(args: &Args) -> Result<ExitCode> {
    let params = args.params();
    let image = load_grayscale(Path::new(&args.input))?;
    let (width, height) = (image.width, image.height);

    let mut worker = SynthWorker::spawn();
    let job = worker.submit(image, &params);

    match worker.wait(job) {
        JobOutcome::Completed(wav) => {
            std::fs::write(&args.output, &wav.wav_data)
                .with_context(|| format!("failed to write {}", args.output))?;
            let output = json!({
                "status": "completed",
                "output": args.output,
                "input_dimensions": { "width": width, "height": height },
                "sample_rate": wav.sample_rate,
                "num_samples": wav.num_samples,
                "duration_seconds": wav.duration_seconds(),
                "pcm_hash": wav.pcm_hash,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        JobOutcome::Cancelled => {
            println!("{}", json!({ "status": "cancelled" }));
            Ok(ExitCode::from(2))
        }
        JobOutcome::Failed { code, message } => {
            println!(
                "{}",
                json!({ "status": "failed", "code": code, "message": message })
            );
            Ok(ExitCode::from(2))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_args() -> Args {
        Args {
            input: "in.png".to_string(),
            output: "out.wav".to_string(),
            duration: 5.0,
            min_freq: 100.0,
            max_freq: 8000.0,
            scale: "logarithmic".to_string(),
            sample_rate: 44100,
            curve: "linear".to_string(),
            invert: false,
            smoothing: 0.0,
            json: false,
        }
    }

    #[test]
    fn test_flag_mapping() {
        let mut args = base_args();
        args.scale = "linear".to_string();
        args.curve = "exponential".to_string();
        args.invert = true;
        let params = args.params();
        assert_eq!(params.frequency_scale, FrequencyScale::Linear);
        assert_eq!(params.brightness_curve, BrightnessCurve::Exponential);
        assert!(params.invert_image);
    }

    #[test]
    fn test_out_of_range_flags_are_sanitized() {
        let mut args = base_args();
        args.duration = 900.0;
        args.sample_rate = 11025;
        let params = args.params();
        assert_eq!(params.duration_seconds, 60.0);
        assert_eq!(params.sample_rate_hz, 22050);
    }
}
