use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger.
///
/// Verbose runs show debug messages, otherwise info and above. `RUST_LOG`
/// takes precedence over both.
pub(crate) fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    let _ = builder.format_timestamp(None);

    // Only fails when a logger is already installed.
    let _ = builder.try_init();
}
