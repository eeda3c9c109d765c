use crate::utils::error::{ResolverError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Store endpoints must be absolute http(s) URLs; an empty string fails to parse.
pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    let invalid = |reason: String| ResolverError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: url_str.to_string(),
        reason,
    };

    let url = Url::parse(url_str).map_err(|e| invalid(format!("Invalid URL format: {}", e)))?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        scheme => Err(invalid(format!("Unsupported URL scheme: {}", scheme))),
    }
}

pub fn validate_file_extension(field_name: &str, file: &str, allowed_extensions: &[&str]) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension) if allowed_extensions.contains(&extension) => Ok(()),
        Some(extension) => Err(ResolverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(ResolverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(field_name: &str, value: &'a Option<T>) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| ResolverError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ResolverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ResolverError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("store.endpoint", "https://example.com/api/config").is_ok());
        assert!(validate_url("store.endpoint", "http://localhost:8080").is_ok());
        assert!(validate_url("store.endpoint", "").is_err());
        assert!(validate_url("store.endpoint", "invalid-url").is_err());
        assert!(validate_url("store.endpoint", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("store.path", "bindings.toml", &["toml", "json"]).is_ok());
        assert!(validate_file_extension("store.path", "bindings.json", &["toml", "json"]).is_ok());
        assert!(validate_file_extension("store.path", "bindings.yaml", &["toml", "json"]).is_err());
        assert!(validate_file_extension("store.path", "bindings", &["toml", "json"]).is_err());
    }

    #[test]
    fn test_validate_range_and_required() {
        assert!(validate_range("store.timeout_seconds", 10u64, 1, 300).is_ok());
        assert!(validate_range("store.timeout_seconds", 0u64, 1, 300).is_err());

        let missing: Option<String> = None;
        assert!(matches!(
            validate_required_field("store.endpoint", &missing),
            Err(ResolverError::MissingConfigError { .. })
        ));
        assert!(validate_non_empty_string("code", "   ").is_err());
    }

    #[test]
    fn test_validate_url_reports_reason() {
        match validate_url("store.endpoint", "file:///tmp/bindings.toml") {
            Err(ResolverError::InvalidConfigValueError { field, reason, .. }) => {
                assert_eq!(field, "store.endpoint");
                assert!(reason.contains("file"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            validate_url("store.endpoint", ""),
            Err(ResolverError::InvalidConfigValueError { .. })
        ));
    }
}
