use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, OnFailure};

/// Target the no_std crates must build for.
const EMBEDDED_TARGET: &str = "thumbv7em-none-eabihf";

pub fn run() -> Result<()> {
    println!();
    println!("{}", "🔍 Checking workspace...".cyan().bold());
    println!();

    let total_start = Instant::now();

    // The HAL seams and the driver must stay no_std, with and without defmt.
    for package in ["platform", "mcp4728"] {
        cargo(
            &format!("Checking {package} ({EMBEDDED_TARGET})"),
            &["check", "-p", package, "--target", EMBEDDED_TARGET],
            OnFailure::Abort,
        )?;
        cargo(
            &format!("Checking {package} with defmt"),
            &["check", "-p", package, "--target", EMBEDDED_TARGET, "--features", "defmt"],
            OnFailure::Abort,
        )?;
    }

    cargo("Checking host crates", &["check", "--workspace", "--all-targets"], OnFailure::Abort)?;

    cargo(
        "Running clippy lints",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
        OnFailure::Warn,
    )?;

    if cargo("Checking code formatting", &["fmt", "--all", "--check"], OnFailure::Warn)?.is_none() {
        eprintln!("     Run 'cargo fmt --all' to fix");
    }

    println!(
        "{}",
        format!("✓ All checks completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}
