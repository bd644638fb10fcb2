use std::path::PathBuf;

use flexi_logger::{Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming};

use crate::config::{ConfigPaths, LoggingConfig};

/// Logs to a size-rotated file; `verbose` also copies debug output to stderr.
/// The returned handle must stay alive until the program exits.
pub fn init_logging(
    config: &LoggingConfig,
    paths: &ConfigPaths,
    verbose: bool,
) -> anyhow::Result<LoggerHandle> {
    let log_path = config
        .path
        .as_ref()
        .map(PathBuf::from)
        .unwrap_or_else(|| paths.logs_dir.join("rag-eval.log"));
    let directory = log_path
        .parent()
        .map(PathBuf::from)
        .unwrap_or(paths.logs_dir.clone());
    let basename = log_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("rag-eval")
        .to_string();
    let level = if verbose { "debug" } else { config.level.as_str() };
    let handle = Logger::try_with_env_or_str(level)?
        .log_to_file(FileSpec::default().directory(directory).basename(basename))
        .duplicate_to_stderr(if verbose { Duplicate::Debug } else { Duplicate::None })
        .rotate(
            Criterion::Size(config.rotate_size),
            Naming::Numbers,
            Cleanup::KeepLogFiles(config.rotate_keep),
        )
        .start()?;
    Ok(handle)
}
