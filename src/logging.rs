use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes the global logger for the command-line tools.
///
/// `RUST_LOG` takes precedence. Otherwise `verbose` selects debug output and
/// the default is info.
pub fn init(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    // Module paths only help when chasing evaluator passes.
    builder.format_target(verbose).format_timestamp(None);

    // A logger may already be installed (tests, embedding hosts).
    let _ = builder.try_init();
}
