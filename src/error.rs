use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("I/O error on '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid battery configuration: {0}")]
    InvalidConfig(#[from] ConfigError),
}

/// Rejections raised by the battery configuration validator and the typed
/// code accessors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Unknown {field} code: {code}")]
    UnknownCode { field: &'static str, code: u8 },

    #[error("Zendure minimum SoC ({min}%) must not exceed maximum SoC ({max}%)")]
    InvertedSocBounds { min: u8, max: u8 },

    #[error("Zendure maximum SoC ({0}%) is above 100%")]
    SocAboveHundred(u8),

    #[error("{field} is {len} bytes long, the limit is {max}")]
    TooLong { field: &'static str, len: usize, max: usize },

    #[error("Discharge current limit must be a non-negative number of amps, got {0}")]
    InvalidDischargeCurrentLimit(f32),

    #[error("{0} must be at least one second")]
    ZeroPollingInterval(&'static str),

    #[error("Zendure device id must be exactly {expected} ASCII letters or digits, got '{id}'")]
    InvalidDeviceId { id: String, expected: usize },
}
