use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

/// Install the global logger. Logs go to stderr so they never interleave
/// with rendered answers on stdout.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Stderr, ColorChoice::Auto);
}
