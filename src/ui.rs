use std::io::{self, Write};
use std::time::Instant;

use anyhow::Result;
use colored::*;
use crossterm::{
    cursor::MoveTo,
    execute,
    terminal::{Clear, ClearType},
};
use indicatif::{ProgressBar, ProgressStyle};

use crate::event_bus::Metrics;
use crate::schema::ResponseRecord;
use crate::validation::SchemaValidationError;

/// Terminal presentation adapter: renders validated records as sections,
/// owns the input prompt, and reports the session summary.
pub struct Presenter {
    headless: bool,
    show_raw: bool,
    start_time: Instant,
}

impl Presenter {
    pub fn new(headless: bool, colorful: bool, show_raw: bool) -> Self {
        if !colorful {
            colored::control::set_override(false);
        }
        Self {
            headless,
            show_raw,
            start_time: Instant::now(),
        }
    }

    /// Clear the screen and print the session banner.
    pub fn start(&self) -> Result<()> {
        if self.headless {
            return Ok(());
        }

        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        println!("{}", "=".repeat(80).bright_blue());
        println!(
            "{}",
            "CodeXR - Coding Assistant for AR/VR Developers"
                .bright_white()
                .bold()
        );
        println!("{}", "=".repeat(80).bright_blue());
        println!(
            "{}",
            "Try: How do I add teleport locomotion in Unity VR?  (exit to quit)".dimmed()
        );
        println!();

        Ok(())
    }

    /// Spinner shown while the simulated backend "thinks". None in headless
    /// mode; the delay itself is owned by the caller.
    pub fn thinking_spinner(&self) -> Option<ProgressBar> {
        if self.headless {
            return None;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} {msg}")
                .unwrap(),
        );
        spinner.set_message("Thinking... simulating LLM and web search");
        spinner.enable_steady_tick(std::time::Duration::from_millis(100));
        Some(spinner)
    }

    pub fn prompt(&self) -> Result<()> {
        if self.headless {
            return Ok(());
        }
        print!("{} ", "codexr>".bright_cyan().bold());
        io::stdout().flush()?;
        Ok(())
    }

    pub fn warn_empty_input(&self) {
        println!("{} {}", "⚠".yellow().bold(), "Please enter a query.".yellow());
    }

    /// Render a validated record as titled sections.
    pub fn render_record(&self, record: &ResponseRecord) -> Result<()> {
        println!();
        println!("{}", "✅ Subtasks".bright_green().bold());
        for subtask in &record.subtasks {
            match &subtask.details {
                Some(details) => {
                    println!("  - {}: {}", subtask.task_name.bright_white().bold(), details)
                }
                None => println!("  - {}", subtask.task_name.bright_white().bold()),
            }
        }

        println!();
        println!(
            "{} {}",
            "💻 Code Snippet".bright_cyan().bold(),
            format!("({})", record.code_snippet.language).dimmed()
        );
        for line in record.code_snippet.code.lines() {
            println!("  {}", line.dimmed());
        }

        println!();
        println!("{}", "⚠️  Gotchas & Best Practices".bright_yellow().bold());
        for practice in &record.best_practices {
            println!("  {} {}", "!".yellow().bold(), practice);
        }

        println!();
        println!("{}", "📊 Metadata".bright_magenta().bold());
        println!("  Difficulty: {}", record.difficulty.bright_white());
        println!("  Category:   {}", record.category.bright_white());
        if !record.documentation_link.is_empty() {
            println!(
                "  Docs:       {}",
                record.documentation_link.bright_blue().underline()
            );
        }

        if self.show_raw {
            println!();
            println!("{}", "Raw JSON".dimmed().bold());
            println!("{}", serde_json::to_string_pretty(record)?.dimmed());
        }
        println!();

        Ok(())
    }

    /// Print only the raw record, for the "json" output format.
    pub fn render_json(&self, record: &ResponseRecord) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(record)?);
        Ok(())
    }

    /// Error panel for a record that failed the schema check. The raw
    /// record is shown for inspection; nothing of it is rendered as a
    /// normal answer.
    pub fn render_validation_error(
        &self,
        error: &SchemaValidationError,
        record: &ResponseRecord,
    ) -> Result<()> {
        println!();
        println!(
            "{} {}",
            "✗ Error:".red().bold(),
            "The response did not match the required schema.".white()
        );
        for violation in &error.violations {
            println!("  {} {}", "-".red(), violation);
        }
        println!("{}", "Raw record:".dimmed());
        println!("{}", serde_json::to_string_pretty(record)?.dimmed());
        println!();
        Ok(())
    }

    /// Session summary printed when an interactive session ends.
    pub fn finish(&self, metrics: &Metrics) {
        if self.headless {
            return;
        }

        let elapsed = self.start_time.elapsed();
        println!();
        println!("{}", "=".repeat(80).bright_blue());
        println!("{}", "Session Summary".bright_white().bold());
        println!("{}", "=".repeat(80).bright_blue());
        println!(
            "⏱️  Duration: {}:{:02}",
            elapsed.as_secs() / 60,
            elapsed.as_secs() % 60
        );
        println!(
            "✅ Queries Answered: {}",
            metrics.queries_resolved.to_string().bright_green()
        );
        println!(
            "🎯 Rule Matches: {}",
            metrics.rule_matches.to_string().bright_cyan()
        );
        println!(
            "❓ Fallbacks: {}",
            metrics.fallbacks.to_string().bright_yellow()
        );
        if metrics.validation_failures > 0 {
            println!(
                "❌ Validation Failures: {}",
                metrics.validation_failures.to_string().bright_red()
            );
        }
        println!();
    }
}
