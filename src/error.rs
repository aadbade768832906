/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Update period must be greater than zero")]
    ZeroPeriod,
}

/// Device registry errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Duplicate device id: {0}")]
    DuplicateId(String),

    #[error("Device {id} battery level {level}% is above 100%")]
    BatteryOutOfRange { id: String, level: u8 },
}
