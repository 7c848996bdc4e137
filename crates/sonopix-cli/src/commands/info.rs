//! Info command implementation.
//!
//! Reports what synthesis would do with an image without running it: the
//! subsampling decision, effective resolution, and estimated sample count.

use anyhow::Result;
use colored::Colorize;
use sonopix_synth::subsample::{compute_steps, DEFAULT_MAX_PIXELS};
use std::path::Path;
use std::process::ExitCode;

use crate::input::load_grayscale;

/// Runs the info command.
pub fn run(input: &str, duration: f32, sample_rate: u32) -> Result<ExitCode> {
    let image = load_grayscale(Path::new(input))?;

    println!("{} {}", "Image:".cyan().bold(), input);
    println!(
        "{} {}x{} ({} pixels)",
        "Dimensions:".dimmed(),
        image.width,
        image.height,
        image.width as u64 * image.height as u64,
    );

    let steps = compute_steps(image.width, image.height, DEFAULT_MAX_PIXELS);
    if steps.is_identity() {
        println!("{} none", "Subsampling:".dimmed());
    } else {
        println!(
            "{} every {} pixels on both axes",
            "Subsampling:".yellow().bold(),
            steps.step_x,
        );
    }

    let effective_width = steps.effective_width(image.width);
    let effective_height = steps.effective_height(image.height);
    println!(
        "{} {}x{}",
        "Effective:".dimmed(),
        effective_width,
        effective_height,
    );

    let total_samples = (sample_rate as f64 * duration as f64).floor() as u64;
    println!(
        "{} {} samples ({:.1}s @ {} Hz), ~{} samples per column",
        "Synthesis:".dimmed(),
        total_samples,
        duration,
        sample_rate,
        total_samples / effective_width.max(1) as u64,
    );

    Ok(ExitCode::SUCCESS)
}
