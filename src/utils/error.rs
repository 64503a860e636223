use thiserror::Error;

#[derive(Error, Debug)]
pub enum AssistError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Invalid input '{value}' for {field}: {reason}")]
    InvalidInputError {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Io,
    Configuration,
    Input,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl AssistError {
    pub fn invalid_input(field: &str, value: &str, reason: impl Into<String>) -> Self {
        AssistError::InvalidInputError {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            AssistError::IoError(_) => ErrorCategory::Io,
            AssistError::ConfigValidationError { .. }
            | AssistError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            AssistError::InvalidInputError { .. } => ErrorCategory::Input,
        }
    }

    /// 輸入錯誤只需重新提示，配置錯誤會阻止啟動
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            AssistError::InvalidInputError { .. } => ErrorSeverity::Low,
            AssistError::ConfigValidationError { .. } => ErrorSeverity::Medium,
            AssistError::InvalidConfigValueError { .. } => ErrorSeverity::High,
            AssistError::IoError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            AssistError::IoError(e) => format!("Could not read or write a file: {}", e),
            AssistError::ConfigValidationError { field, message } => {
                format!("The configuration could not be parsed ({}): {}", field, message)
            }
            AssistError::InvalidConfigValueError {
                field,
                value,
                reason,
            } => format!("Configuration value {} = '{}' is invalid: {}", field, value, reason),
            AssistError::InvalidInputError { field, reason, .. } => {
                format!("Please re-enter {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Io => "Check that the file exists and is readable",
            ErrorCategory::Configuration => {
                "Fix the TOML configuration file or run without --config to use the default helpers"
            }
            ErrorCategory::Input => "Enter a value in the expected format and try again",
        }
    }
}

pub type Result<T> = std::result::Result<T, AssistError>;
