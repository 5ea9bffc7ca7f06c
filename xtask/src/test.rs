use anyhow::Result;
use colored::Colorize;
use std::time::Instant;

use crate::step::{cargo, test_summary, OnFailure};

pub fn run(unit_only: bool, integration_only: bool) -> Result<()> {
    println!();
    println!("{}", "🧪 Running tests...".cyan().bold());
    println!();

    let total_start = Instant::now();

    if !integration_only {
        if let Some(out) = cargo("Unit tests", &["test", "--lib", "--bins", "--workspace"], OnFailure::Abort)? {
            println!("    {}", test_summary(&out).dimmed());
        }
    }

    if !unit_only {
        // Every crate's tests/ directory.
        if let Some(out) = cargo("Integration tests", &["test", "--tests", "--workspace"], OnFailure::Abort)? {
            println!("    {}", test_summary(&out).dimmed());
        }
    }

    if let Some(out) = cargo("Doc tests", &["test", "--doc", "--workspace"], OnFailure::Warn)? {
        println!("    {}", test_summary(&out).dimmed());
    }

    println!(
        "{}",
        format!("✓ All tests completed in {:.2}s", total_start.elapsed().as_secs_f64())
            .green()
            .bold()
    );
    println!();

    Ok(())
}
