use thiserror::Error;

#[derive(Error, Debug)]
pub enum MapError {
    #[error("Dataset request failed: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Dataset request to {url} returned status {status}")]
    FetchStatus { url: String, status: u16 },

    #[error("Invalid dataset URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("CSV processing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidation { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("No marker with id {0}")]
    UnknownMarker(usize),

    #[error("No table row with id {0}")]
    UnknownRow(usize),
}

impl MapError {
    pub fn user_friendly_message(&self) -> String {
        match self {
            MapError::Fetch(_) | MapError::FetchStatus { .. } => {
                "Could not download the location dataset; the map has no markers.".to_string()
            }
            MapError::Url(_) => "The dataset address is not a valid URL.".to_string(),
            MapError::Io(e) => format!("A file could not be read or written: {}", e),
            MapError::ConfigValidation { .. }
            | MapError::InvalidConfigValue { .. }
            | MapError::MissingConfig { .. } => format!("Configuration problem: {}", self),
            _ => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            MapError::Fetch(_) | MapError::FetchStatus { .. } => {
                "Check --base-url/--dataset or use --file with a local copy"
            }
            MapError::Url(_) => "Use an absolute http(s) base URL",
            MapError::Csv(_) => "Check that the first line of the dataset is a header row",
            MapError::Io(_) => "Check file permissions and that the paths exist",
            MapError::Serialization(_) => "Check the JSON event script syntax",
            MapError::ConfigValidation { .. }
            | MapError::InvalidConfigValue { .. }
            | MapError::MissingConfig { .. } => "Fix the configuration value and run again",
            MapError::UnknownMarker(_) | MapError::UnknownRow(_) => {
                "Event scripts may only reference markers and rows that were rendered"
            }
        }
    }

    /// Process exit code used by the CLI.
    pub fn exit_code(&self) -> i32 {
        match self {
            MapError::Fetch(_) | MapError::FetchStatus { .. } => 2,
            MapError::ConfigValidation { .. }
            | MapError::InvalidConfigValue { .. }
            | MapError::MissingConfig { .. }
            | MapError::Url(_) => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, MapError>;
