use anyhow::Result;
use colored::Colorize;

use crate::cargo;

const DOC_INDEX: &str = "target/doc/trackinfo/index.html";

pub fn run(open: bool) -> Result<()> {
    println!();
    println!("{}", "📚 Building trackinfo docs...".cyan().bold());
    println!();

    let step = cargo::run("Building documentation", &doc_args(open))?;
    if !step.ok() {
        eprintln!("{}", "  ✗ Documentation build failed".red().bold());
        eprintln!();
        eprintln!("{}", step.stderr());
        anyhow::bail!("Documentation build failed");
    }
    cargo::passed("Documentation build", "", step.secs);

    if !open {
        println!("   {}", format!("Docs written to {DOC_INDEX}").dimmed());
        println!("   {}", "Pass --open to launch a browser".dimmed());
        println!();
    }

    Ok(())
}

/// `cargo doc` arguments; private items stay hidden, dependencies are skipped.
fn doc_args(open: bool) -> Vec<&'static str> {
    let mut args = vec!["doc", "-p", "trackinfo", "--all-features", "--no-deps"];
    if open {
        args.push("--open");
    }
    args
}

#[cfg(test)]
mod tests {
    use super::doc_args;

    #[test]
    fn open_flag_is_appended_only_when_requested() {
        assert_eq!(doc_args(false).last(), Some(&"--no-deps"));
        assert_eq!(doc_args(true).last(), Some(&"--open"));
    }
}
