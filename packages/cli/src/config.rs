use anyhow::{Context, Result};
use di_transformer::options::TransformerOptions;
use std::path::Path;

/// Options from `config` (or `di.config.json` when present). A relative `rootDir`
/// is taken relative to the directory holding the config file.
pub fn load_options(config: Option<&Path>) -> Result<TransformerOptions> {
    let mut options = TransformerOptions::load_or_default(config)
        .with_context(|| "could not load transformer options")?;

    if let Some(dir) = config.and_then(Path::parent) {
        if !dir.as_os_str().is_empty() && Path::new(&options.root_dir).is_relative() {
            options.root_dir = dir.join(&options.root_dir).to_string_lossy().to_string();
        }
    }
    Ok(options)
}

/// `debug` under `-v`, otherwise `RUST_LOG` or `warn`.
pub fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
