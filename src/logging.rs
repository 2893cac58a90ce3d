use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "tasktally.log";

fn default_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn env_filter(verbose: u8) -> Result<EnvFilter> {
    EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level(verbose)))
        .map_err(|e| anyhow!("invalid RUST_LOG / log filter: {e}"))
}

pub fn init_stderr(verbose: u8) -> Result<()> {
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose)?)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(())
}

pub fn init_file(verbose: u8, store_path: &Path) -> Result<WorkerGuard> {
    let dir = match store_path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => std::env::current_dir()?,
    };
    fs::create_dir_all(&dir).with_context(|| format!("creating {:?}", dir))?;
    let appender = tracing_appender::rolling::never(&dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let init_result = tracing_subscriber::fmt()
        .with_env_filter(env_filter(verbose)?)
        .with_ansi(false)
        .with_writer(writer)
        .try_init();
    if let Err(err) = init_result {
        debug!(error = %err, "tracing subscriber already set, continuing");
    }
    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_maps_to_levels() {
        assert_eq!(default_level(0), "warn");
        assert_eq!(default_level(1), "info");
        assert_eq!(default_level(2), "debug");
        assert_eq!(default_level(7), "trace");
    }
}
