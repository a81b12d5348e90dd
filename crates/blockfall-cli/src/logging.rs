use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Env, Target};

/// Installs the global logger writing to `log_file`.
///
/// The terminal belongs to the game screen, so without a file nothing is logged.
pub(crate) fn init(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("failed to install logger")?;
    log::info!("logging to {}", path.display());
    Ok(())
}
