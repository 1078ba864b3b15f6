use thiserror::Error;

#[derive(Error, Debug)]
pub enum HdError {
    #[error("Missing BirthDate, BirthTime, or UtcOffset")]
    MissingFieldError,

    #[error("Invalid date or time format")]
    InvalidDateTimeError,

    #[error("Invalid UTC offset format")]
    InvalidOffsetError,

    #[error("Chart computation failed: {message}")]
    ChartError { message: String },

    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

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
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 請求內容錯誤，回 400
    Validation,
    Configuration,
    /// 外部星盤計算服務失敗
    Collaborator,
    System,
}

impl HdError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            HdError::MissingFieldError
            | HdError::InvalidDateTimeError
            | HdError::InvalidOffsetError => ErrorCategory::Validation,
            HdError::ConfigError { .. }
            | HdError::ConfigValidationError { .. }
            | HdError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            HdError::ChartError { .. } | HdError::ApiError(_) => ErrorCategory::Collaborator,
            HdError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.category() == ErrorCategory::Validation
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Validation => {
                "Send birthDate as YYYY-MM-DD, birthTime as HH:mm and utcOffset as ±HH:mm"
            }
            ErrorCategory::Configuration => {
                "Check the TOML config file, CLI flags and HD_* environment variables"
            }
            ErrorCategory::Collaborator => {
                "Make sure the chart engine endpoint is reachable and returns {\"type\": ...}"
            }
            ErrorCategory::System => "Check file permissions and available system resources",
        }
    }
}

pub type Result<T> = std::result::Result<T, HdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_messages_are_exact() {
        assert_eq!(
            HdError::MissingFieldError.to_string(),
            "Missing BirthDate, BirthTime, or UtcOffset"
        );
        assert_eq!(
            HdError::InvalidDateTimeError.to_string(),
            "Invalid date or time format"
        );
        assert_eq!(
            HdError::InvalidOffsetError.to_string(),
            "Invalid UTC offset format"
        );
    }

    #[test]
    fn test_error_categories() {
        assert!(HdError::InvalidOffsetError.is_client_error());
        assert_eq!(
            HdError::ChartError {
                message: "boom".to_string()
            }
            .category(),
            ErrorCategory::Collaborator
        );
        assert_eq!(
            HdError::ConfigValidationError {
                field: "chart.endpoint".to_string(),
                message: "must not be empty".to_string()
            }
            .category(),
            ErrorCategory::Configuration
        );
        assert!(!HdError::ConfigError {
            message: "bad".to_string()
        }
        .is_client_error());
    }
}
