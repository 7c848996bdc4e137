//! Sonopix CLI - Convert raster images into spectrogram audio
//!
//! This binary loads an image, converts it to grayscale, and synthesizes a
//! WAV file whose spectrogram reproduces the image.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

mod commands;
mod input;

/// Sonopix - Image to Spectrogram Audio
#[derive(Parser)]
#[command(name = "sonopix")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize a WAV file from an image
    Generate {
        /// Path to the input image (PNG or JPEG)
        #[arg(short, long)]
        input: String,

        /// Path for the output WAV file
        #[arg(short, long)]
        output: String,

        /// Output duration in seconds (1-60)
        #[arg(long, default_value_t = 5.0)]
        duration: f32,

        /// Frequency of the bottom image row in Hz (20-2000)
        #[arg(long, default_value_t = 100.0)]
        min_freq: f32,

        /// Frequency of the top image row in Hz (500-22000)
        #[arg(long, default_value_t = 8000.0)]
        max_freq: f32,

        /// Row-to-frequency spacing
        #[arg(long, default_value = "logarithmic", value_parser = ["linear", "logarithmic"])]
        scale: String,

        /// Output sample rate in Hz (22050, 44100, or 48000)
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,

        /// Brightness response curve
        #[arg(long, default_value = "linear", value_parser = ["linear", "exponential", "logarithmic"])]
        curve: String,

        /// Treat dark pixels as loud and bright pixels as quiet
        #[arg(long)]
        invert: bool,

        /// Inter-column smoothing fraction (0-1)
        #[arg(long, default_value_t = 0.0)]
        smoothing: f32,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// Inspect an image and report what synthesis would do with it
    Info {
        /// Path to the input image (PNG or JPEG)
        #[arg(short, long)]
        input: String,

        /// Output duration in seconds, for the sample-count estimate
        #[arg(long, default_value_t = 5.0)]
        duration: f32,

        /// Output sample rate in Hz, for the sample-count estimate
        #[arg(long, default_value_t = 44100)]
        sample_rate: u32,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Generate {
            input,
            output,
            duration,
            min_freq,
            max_freq,
            scale,
            sample_rate,
            curve,
            invert,
            smoothing,
            json,
        } => {
            let args = commands::generate::Args {
                input,
                output,
                duration,
                min_freq,
                max_freq,
                scale,
                sample_rate,
                curve,
                invert,
                smoothing,
                json,
            };
            commands::generate::run(&args)
        }
        Commands::Info {
            input,
            duration,
            sample_rate,
        } => commands::info::run(&input, duration, sample_rate),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
