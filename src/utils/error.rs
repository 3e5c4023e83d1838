use thiserror::Error;

#[derive(Error, Debug)]
pub enum BlogError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("Unexpected status {status} from {url}")]
    UnexpectedStatus { url: String, status: u16 },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("No {document_type} document with uid '{uid}'")]
    NotFound { document_type: String, uid: String },

    #[error("Malformed record '{id}': {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Cannot format date '{input}'")]
    DateFormat { input: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Content,
    Configuration,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl BlogError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ApiError(_) | Self::UnexpectedStatus { .. } => ErrorCategory::Network,
            Self::NotFound { .. }
            | Self::MalformedRecord { .. }
            | Self::DateFormat { .. }
            | Self::SerializationError(_) => ErrorCategory::Content,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
            Self::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::NotFound { .. } | Self::DateFormat { .. } => ErrorSeverity::Low,
            Self::ApiError(_) | Self::UnexpectedStatus { .. } => ErrorSeverity::Medium,
            Self::MalformedRecord { .. }
            | Self::SerializationError(_)
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) => ErrorSeverity::Critical,
        }
    }

    /// Network failures are the only ones worth trying again by hand.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::ApiError(_) => true,
            Self::UnexpectedStatus { status, .. } => *status >= 500 || *status == 429,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::ApiError(_) => "Check the network connection and the content API endpoint",
            Self::UnexpectedStatus { .. } => {
                "Check the endpoint and access token, then run the command again"
            }
            Self::IoError(_) => "Check that the output directory exists and is writable",
            Self::SerializationError(_) | Self::MalformedRecord { .. } => {
                "Check the document fields in the content repository"
            }
            Self::NotFound { .. } => "Check the uid, it may be unpublished or misspelled",
            Self::DateFormat { .. } => "Publication dates are expected in ISO-8601 format",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Fix the configuration file and try again",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::ApiError(_) | Self::UnexpectedStatus { .. } => {
                format!("Could not reach the content API ({})", self)
            }
            Self::NotFound { uid, .. } => format!("Post '{}' was not found", uid),
            Self::MalformedRecord { id, .. } => {
                format!("Post '{}' is missing required fields", id)
            }
            _ => self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, BlogError>;
