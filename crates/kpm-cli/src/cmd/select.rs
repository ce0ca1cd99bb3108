use anyhow::{Context, Result};
use kpm_console::{ConsoleReporter, Reporter};

/// Prompt for one of `options` and log the choice on stdout.
pub fn select(
    reporter: &ConsoleReporter,
    header: &str,
    question: &str,
    options: &[String],
) -> Result<()> {
    let choice = reporter
        .select(header, question, options)
        .context("Selection failed")?;
    reporter.log(&choice);
    Ok(())
}
