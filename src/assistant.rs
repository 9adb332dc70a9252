use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use log::debug;
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::event_bus::{Event, EventBus, EventEmitter};
use crate::impl_event_emitter;
use crate::rules::Resolver;
use crate::ui::Presenter;
use crate::validation;

/// Drives the query-resolve-validate-render cycle.
pub struct Assistant<'a> {
    resolver: &'a Resolver,
    ui: Presenter,
    event_bus: Option<Arc<EventBus>>,
    thinking_delay: Duration,
    output_format: String,
}

impl<'a> Assistant<'a> {
    pub fn new(resolver: &'a Resolver, ui: Presenter, config: &Config) -> Self {
        Self {
            resolver,
            ui,
            event_bus: None,
            thinking_delay: Duration::from_millis(config.simulation.thinking_delay_ms),
            output_format: config.ui.output_format.clone(),
        }
    }

    /// Answer a single query.
    ///
    /// Empty or whitespace-only input is rejected here with a warning and no
    /// resolution attempt. Everything else resolves to exactly one record;
    /// a record that fails the schema check is rendered as an error panel,
    /// never as a partial answer.
    pub async fn answer(&self, input: &str) -> Result<()> {
        if input.trim().is_empty() {
            self.emit_event(Event::EmptyInput).await?;
            self.ui.warn_empty_input();
            return Ok(());
        }

        self.emit_event(Event::QueryReceived {
            query: input.to_string(),
        })
        .await?;

        // The delay is cosmetic; resolution itself is a pure in-memory lookup.
        let spinner = match self.output_format.as_str() {
            "json" => None,
            _ => self.ui.thinking_spinner(),
        };
        if spinner.is_some() && !self.thinking_delay.is_zero() {
            tokio::time::sleep(self.thinking_delay).await;
        }
        let (record, matched) = self.resolver.resolve_matched(input);
        if let Some(spinner) = spinner {
            spinner.finish_and_clear();
        }

        debug!(
            "resolved query into category {} (matched: {})",
            record.category, matched
        );
        self.emit_event(Event::ResolutionCompleted {
            category: record.category.clone(),
            difficulty: record.difficulty.clone(),
            fallback: !matched,
        })
        .await?;

        match validation::validate(&record) {
            Ok(()) => match self.output_format.as_str() {
                "json" => self.ui.render_json(&record)?,
                _ => self.ui.render_record(&record)?,
            },
            Err(err) => {
                self.emit_event(Event::ValidationFailed {
                    violations: err.violations.len(),
                })
                .await?;
                self.ui.render_validation_error(&err, &record)?;
            }
        }

        Ok(())
    }

    /// Prompt loop on stdin; `exit`, `quit`, or EOF ends the session.
    pub async fn run_interactive(&self) -> Result<()> {
        self.ui.start()?;
        self.emit_event(Event::SystemReady).await?;

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            self.ui.prompt()?;
            let Some(line) = lines.next_line().await? else {
                break;
            };
            let trimmed = line.trim();
            if trimmed == "exit" || trimmed == "quit" {
                break;
            }
            self.answer(&line).await?;
        }

        self.emit_event(Event::ShutdownRequested).await?;
        if let Some(bus) = &self.event_bus {
            self.ui.finish(&bus.get_metrics().await);
        }
        Ok(())
    }
}

impl_event_emitter!(Assistant<'_>);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;

    fn assistant(resolver: &Resolver, bus: Arc<EventBus>) -> Assistant<'_> {
        let mut config = Config::default();
        config.simulation.thinking_delay_ms = 0;
        config.ui.colorful = false;
        let ui = Presenter::new(true, config.ui.colorful, false);
        let mut assistant = Assistant::new(resolver, ui, &config);
        assistant.set_event_bus(bus);
        assistant
    }

    #[tokio::test]
    async fn test_empty_input_skips_resolution() {
        let resolver = catalog::builtin();
        let bus = Arc::new(EventBus::new(16));
        let assistant = assistant(&resolver, bus.clone());

        assistant.answer("   ").await.unwrap();

        let metrics = bus.get_metrics().await;
        assert_eq!(metrics.empty_inputs, 1);
        assert_eq!(metrics.queries_resolved, 0);
    }

    #[tokio::test]
    async fn test_answer_accumulates_match_and_fallback_metrics() {
        let resolver = catalog::builtin();
        let bus = Arc::new(EventBus::new(16));
        let assistant = assistant(&resolver, bus.clone());

        assistant
            .answer("teleport locomotion in Unity")
            .await
            .unwrap();
        assistant.answer("how do I bake lighting").await.unwrap();

        let metrics = bus.get_metrics().await;
        assert_eq!(metrics.queries_resolved, 2);
        assert_eq!(metrics.rule_matches, 1);
        assert_eq!(metrics.fallbacks, 1);
        assert_eq!(metrics.validation_failures, 0);
    }
}
