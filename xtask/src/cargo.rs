use anyhow::{Context, Result};
use colored::Colorize;
use std::process::{Command, Output};
use std::time::Instant;

/// Outcome of one `cargo` step.
pub struct Step {
    pub output: Output,
    pub secs: f64,
}

impl Step {
    pub fn ok(&self) -> bool {
        self.output.status.success()
    }

    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }
}

/// Run `cargo <args>` and time it, printing the step label first.
pub fn run(label: &str, args: &[&str]) -> Result<Step> {
    println!("{}", format!("  {label}...").cyan());
    let start = Instant::now();
    let output = Command::new("cargo")
        .args(args)
        .output()
        .with_context(|| format!("Failed to run cargo {}", args.join(" ")))?;
    Ok(Step {
        output,
        secs: start.elapsed().as_secs_f64(),
    })
}

/// Print a success line for a finished step.
pub fn passed(what: &str, detail: &str, secs: f64) {
    let detail = if detail.is_empty() {
        String::new()
    } else {
        format!("{detail} ")
    };
    println!(
        "{}",
        format!("  ✓ {what} passed {detail}in {secs:.2}s").green()
    );
    println!();
}
