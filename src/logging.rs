use log4rs::append::console::{ConsoleAppender, Target};
use log4rs::append::file::FileAppender;
use log4rs::config::{Appender, Config, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use crate::config::General;
use crate::errors::LoggerError;

const LOG_PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l:<5} {t} - {m}{n}";
const LOG_FILE: &str = "zipforecast.log";

/// Sets up log4rs given the general configuration.
///
/// Log lines go to stderr when 'log_to_stdout' is set (stdout is reserved for the forecast itself),
/// and to a file in 'log_path' if one is given. With neither, logging is a no-op.
///
/// # Arguments
///
/// * 'general' - general configuration holding log path, level and stdout flag
pub fn setup_logger(general: &General) -> Result<Handle, LoggerError> {
    let config = build_log_config(general)?;
    let handle = log4rs::init_config(config)?;

    Ok(handle)
}

fn build_log_config(general: &General) -> Result<Config, LoggerError> {
    let mut builder = Config::builder();
    let mut root = Root::builder();

    if general.log_to_stdout {
        let console = ConsoleAppender::builder()
            .target(Target::Stderr)
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build();
        builder = builder.appender(Appender::builder().build("console", Box::new(console)));
        root = root.appender("console");
    }

    if let Some(log_path) = &general.log_path {
        let file = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(LOG_PATTERN)))
            .build(format!("{}{}", log_path, LOG_FILE))?;
        builder = builder.appender(Appender::builder().build("file", Box::new(file)));
        root = root.appender("file");
    }

    builder
        .build(root.build(general.log_level))
        .map_err(|e| LoggerError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::LevelFilter;

    #[test]
    fn test_config_with_console_only() {
        let general = General { log_path: None, log_level: LevelFilter::Debug, log_to_stdout: true };
        let config = build_log_config(&general).unwrap();

        assert_eq!(config.appenders().len(), 1);
        assert_eq!(config.root().level(), LevelFilter::Debug);
    }

    #[test]
    fn test_config_with_file() {
        let dir = std::env::temp_dir().join(format!("zipforecast-log-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let general = General {
            log_path: Some(format!("{}/", dir.display())),
            log_level: LevelFilter::Warn,
            log_to_stdout: false,
        };
        let config = build_log_config(&general).unwrap();

        assert_eq!(config.appenders().len(), 1);
        assert_eq!(config.appenders()[0].name(), "file");
        assert!(dir.join(LOG_FILE).exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_config_without_appenders() {
        let config = build_log_config(&General::default()).unwrap();
        assert!(config.appenders().is_empty());
    }
}
