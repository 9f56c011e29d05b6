use thiserror::Error;

/// Errors surfaced by the ZIP code forecast pipeline
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("location not found for ZIP code {0}")]
    LocationNotFound(String),
    #[error("weather service unavailable: {0}")]
    UpstreamUnavailable(String),
    #[error("weather service response exceeds {0} bytes")]
    UpstreamResponseTooLarge(u64),
    #[error("malformed weather service response: {0}")]
    UpstreamResponseMalformed(String),
    #[error("no usable forecast data: {0}")]
    NoUsableData(String),
}

impl ForecastError {
    /// Returns a message suitable for showing to the end user
    pub fn user_message(&self) -> String {
        match self {
            ForecastError::InvalidInput(msg) => msg.to_string(),
            ForecastError::LocationNotFound(zip_code) =>
                format!("ZIP code '{}' not found. Please check the ZIP code and try again.", zip_code),
            ForecastError::UpstreamUnavailable(reason) => format!("Weather service error: {}", reason),
            ForecastError::UpstreamResponseTooLarge(_) =>
                "Weather service error: Response too large from weather service.".to_string(),
            ForecastError::UpstreamResponseMalformed(_) =>
                "Weather service error: Unexpected response format from weather service.".to_string(),
            ForecastError::NoUsableData(msg) => msg.to_string(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("error reading configuration file: {0}")]
    File(#[from] std::io::Error),
    #[error("error parsing configuration: {0}")]
    Document(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError::Invalid(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("error setting up logging: {0}")]
pub struct LoggerError(pub String);
impl From<std::io::Error> for LoggerError {
    fn from(e: std::io::Error) -> LoggerError {
        LoggerError(format!("log file error: {}", e.to_string()))
    }
}
impl From<log::SetLoggerError> for LoggerError {
    fn from(e: log::SetLoggerError) -> LoggerError {
        LoggerError(e.to_string())
    }
}
