use std::sync::Arc;

use clap::Parser;

mod assistant;
mod catalog;
mod config;
mod event_bus;
mod logger;
mod rules;
mod schema;
mod ui;
mod validation;

use assistant::Assistant;
use config::Config;
use event_bus::{Event, EventBus, EventEmitter};
use ui::Presenter;

#[derive(Parser)]
#[command(name = "codexr", about = "Coding assistant for AR/VR developers")]
struct Args {
    /// Path to a TOML config file
    #[arg(short, long)]
    config: Option<String>,
    /// Run without banner, spinner, or color
    #[arg(long)]
    headless: bool,
    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
    /// Always show the raw JSON record under the answer
    #[arg(long)]
    raw: bool,
    /// Developer query; starts an interactive session when omitted
    #[arg(trailing_var_arg = true)]
    query: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    logger::init(args.verbose);

    let mut config = Config::load(&args.config)?;
    config.merge_with_args(args.headless, args.raw);

    let event_bus = Arc::new(EventBus::new(100));
    event_bus
        .emit(Event::ConfigLoaded {
            path: args.config.clone(),
        })
        .await?;

    // The rule table lives for the whole process and is never mutated.
    let resolver = catalog::builtin();
    log::debug!("rule table loaded with {} rules", resolver.rule_count());

    let plain = args.headless || config.ui.output_format == "plain";
    let ui = Presenter::new(
        args.headless,
        config.ui.colorful && !plain,
        config.ui.show_raw,
    );
    let mut assistant = Assistant::new(&resolver, ui, &config);
    assistant.set_event_bus(event_bus.clone());

    if args.query.is_empty() {
        assistant.run_interactive().await
    } else {
        assistant.answer(&args.query.join(" ")).await
    }
}
