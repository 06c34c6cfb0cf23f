use thiserror::Error;

#[derive(Error, Debug)]
pub enum CmsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Content file parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("CSV output error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    #[error("Invalid value for '{field}': {reason} (got '{value}')")]
    ValidationError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Duplicate key '{key}' in {collection}")]
    DuplicateKey { collection: String, key: String },

    #[error("Service '{service}' references unknown unit '{unit}'")]
    UnknownUnitReference { service: String, unit: String },

    #[error("Unknown service category: {label}")]
    UnknownCategory { label: String },

    #[error("Unit not found: {slug}")]
    UnitNotFound { slug: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl CmsError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            CmsError::UnitNotFound { .. } | CmsError::UnknownCategory { .. } => {
                ErrorSeverity::Medium
            }
            CmsError::ValidationError { .. }
            | CmsError::DuplicateKey { .. }
            | CmsError::UnknownUnitReference { .. }
            | CmsError::UrlError(_)
            | CmsError::TomlError(_) => ErrorSeverity::High,
            CmsError::IoError(_) | CmsError::SerializationError(_) | CmsError::CsvError(_) => {
                ErrorSeverity::Critical
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            CmsError::IoError(e) => format!("Could not read or write a file: {}", e),
            CmsError::TomlError(_) => "The content file is not valid TOML".to_string(),
            CmsError::UrlError(e) => format!("A link could not be built: {}", e),
            CmsError::SerializationError(_) | CmsError::CsvError(_) => {
                "Failed to render the requested output".to_string()
            }
            CmsError::ValidationError { field, .. } => {
                format!("The content file has an invalid '{}' entry", field)
            }
            CmsError::DuplicateKey { collection, key } => {
                format!("'{}' appears more than once in {}", key, collection)
            }
            CmsError::UnknownUnitReference { service, unit } => format!(
                "Service '{}' is offered in '{}', but no such unit exists",
                service, unit
            ),
            CmsError::UnknownCategory { label } => {
                format!("'{}' is not a service category", label)
            }
            CmsError::UnitNotFound { slug } => format!("No unit with slug '{}'", slug),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            CmsError::IoError(_) => "Check that the path exists and is readable",
            CmsError::TomlError(_) => "Fix the TOML syntax reported above and retry",
            CmsError::UrlError(_) => "Check the phone numbers and handles in the content file",
            CmsError::SerializationError(_) | CmsError::CsvError(_) => {
                "Try another --format or report the issue"
            }
            CmsError::ValidationError { .. } | CmsError::DuplicateKey { .. } => {
                "Correct the content entry and run `loft-cms validate`"
            }
            CmsError::UnknownUnitReference { .. } => {
                "Add the unit to [[units]] or remove it from available_in"
            }
            CmsError::UnknownCategory { .. } => {
                "Use one of the labels listed by `loft-cms services --help`"
            }
            CmsError::UnitNotFound { .. } => "Run `loft-cms units` to list known slugs",
        }
    }
}

pub type Result<T> = std::result::Result<T, CmsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_mapping() {
        let missing = CmsError::UnitNotFound {
            slug: "recife".to_string(),
        };
        assert_eq!(missing.severity(), ErrorSeverity::Medium);

        let dup = CmsError::DuplicateKey {
            collection: "services".to_string(),
            key: "nanoblading".to_string(),
        };
        assert_eq!(dup.severity(), ErrorSeverity::High);
        assert!(dup.user_friendly_message().contains("nanoblading"));
    }
}
