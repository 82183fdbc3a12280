//! log4rs setup.
//!
//! An explicit `--log-config` file always wins. An explicit log level comes
//! next, then `log4rs.yml` in the working directory. Otherwise logs go to
//! stderr at info, so stdout only carries the allocation document.

use crate::error::{AppError, Result};
use log::LevelFilter;
use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory.
pub const DEFAULT_LOG_CONFIG: &str = "log4rs.yml";

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {h({l:5})} {m}{n}";

fn logging_err(message: impl ToString) -> AppError {
    AppError::Logging {
        message: message.to_string(),
    }
}

/// Which config file to use, if any.
pub fn resolve_config_file(explicit: Option<&Path>, level_given: bool) -> Option<PathBuf> {
    match explicit {
        Some(path) => Some(path.to_path_buf()),
        None if level_given => None,
        None => Some(PathBuf::from(DEFAULT_LOG_CONFIG)).filter(|p| p.exists()),
    }
}

/// Console config writing to stderr at `level`.
pub fn console_config(level: LevelFilter) -> Result<Config> {
    let stderr = ConsoleAppender::builder()
        .target(Target::Stderr)
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build();
    Config::builder()
        .appender(Appender::builder().build("stderr", Box::new(stderr)))
        .build(Root::builder().appender("stderr").build(level))
        .map_err(logging_err)
}

/// Install the global logger.
pub fn init(level: Option<LevelFilter>, config_file: Option<&Path>) -> Result<()> {
    match resolve_config_file(config_file, level.is_some()) {
        Some(file) => {
            log4rs::init_file(&file, Default::default()).map_err(logging_err)?;
            log::debug!("Logging configured from {}", file.display());
        }
        None => {
            let level = level.unwrap_or(LevelFilter::Info);
            log4rs::init_config(console_config(level)?).map_err(logging_err)?;
            log::debug!("Logging to stderr at {level}");
        }
    }
    Ok(())
}
