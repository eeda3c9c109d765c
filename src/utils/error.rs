use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolverError {
    #[error("Binding store request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Binding store unavailable (status {status}): {message}")]
    StoreUnavailable { status: u16, message: String },

    #[error("Malformed candidate for gesture '{gesture_code}': field '{field}' {reason}")]
    MalformedCandidate {
        gesture_code: String,
        field: String,
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Store,
    Data,
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

impl ResolverError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ResolverError::HttpError(_) | ResolverError::StoreUnavailable { .. } => {
                ErrorCategory::Store
            }
            ResolverError::MalformedCandidate { .. }
            | ResolverError::SerializationError(_)
            | ResolverError::ValidationError { .. } => ErrorCategory::Data,
            ResolverError::ConfigError { .. }
            | ResolverError::ConfigValidationError { .. }
            | ResolverError::InvalidConfigValueError { .. }
            | ResolverError::MissingConfigError { .. } => ErrorCategory::Configuration,
            ResolverError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 存儲層失敗通常是暫時性的，由呼叫端決定是否重試
            ErrorCategory::Store => ErrorSeverity::Medium,
            ErrorCategory::Data | ErrorCategory::Configuration => ErrorSeverity::High,
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            ResolverError::HttpError(_) => {
                "Check that the binding store endpoint is reachable and try again".to_string()
            }
            ResolverError::StoreUnavailable { status, .. } => format!(
                "The binding store answered with status {}; check its logs and retry later",
                status
            ),
            ResolverError::MalformedCandidate { gesture_code, .. } => format!(
                "Fix the action bound to gesture '{}' in the binding store",
                gesture_code
            ),
            ResolverError::SerializationError(_) => {
                "Make sure the store returns well-formed JSON rows".to_string()
            }
            ResolverError::IoError(_) => {
                "Check that the file exists and is readable".to_string()
            }
            ResolverError::ConfigError { .. }
            | ResolverError::ConfigValidationError { .. }
            | ResolverError::InvalidConfigValueError { .. } => {
                "Review the configuration file and command line arguments".to_string()
            }
            ResolverError::MissingConfigError { field } => {
                format!("Provide a value for '{}'", field)
            }
            ResolverError::ValidationError { .. } => {
                "Fix the binding snapshot so every binding references an existing gesture and action"
                    .to_string()
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Store => format!("Could not load gesture bindings: {}", self),
            ErrorCategory::Data => format!("Gesture bindings are inconsistent: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    pub(crate) fn malformed(gesture_code: &str, field: &str, reason: impl Into<String>) -> Self {
        ResolverError::MalformedCandidate {
            gesture_code: gesture_code.to_string(),
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ResolverError>;
