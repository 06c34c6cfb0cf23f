use crate::utils::error::{CmsError, Result};
use std::collections::HashSet;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CmsError::ValidationError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

/// Raw phone numbers feed `wa.me` links, which only accept digits.
pub fn validate_phone_digits(field_name: &str, value: &str) -> Result<()> {
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Phone number must contain digits only".to_string(),
        });
    }
    Ok(())
}

/// A slug is used verbatim as a URL segment.
pub fn validate_slug(field_name: &str, value: &str) -> Result<()> {
    let valid = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
    if !valid {
        return Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Slug must be lowercase ASCII letters, digits or '-'".to_string(),
        });
    }
    Ok(())
}

/// An Instagram handle: optional leading `@`, then letters, digits, `.` or `_`.
pub fn validate_instagram_handle(field_name: &str, value: &str) -> Result<()> {
    let user = value.strip_prefix('@').unwrap_or(value);
    let valid = !user.is_empty()
        && user
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '_');
    if !valid {
        return Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Instagram handle must be letters, digits, '.' or '_'".to_string(),
        });
    }
    Ok(())
}

pub fn validate_positive_number(field_name: &str, value: usize, min_value: usize) -> Result<()> {
    if value < min_value {
        return Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be at least {}", min_value),
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
        return Err(CmsError::ValidationError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

pub fn validate_unique_keys<'a, I>(collection: &str, keys: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen = HashSet::new();
    for key in keys {
        if !seen.insert(key) {
            return Err(CmsError::DuplicateKey {
                collection: collection.to_string(),
                key: key.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("image_url", "https://example.com/a.jpg").is_ok());
        assert!(validate_url("image_url", "http://example.com").is_ok());
        assert!(validate_url("image_url", "").is_err());
        assert!(validate_url("image_url", "not-a-url").is_err());
        assert!(validate_url("image_url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_phone_digits() {
        assert!(validate_phone_digits("whatsapp", "5566999999999").is_ok());
        assert!(validate_phone_digits("whatsapp", "(66) 99999-9999").is_err());
        assert!(validate_phone_digits("whatsapp", "").is_err());
    }

    #[test]
    fn test_validate_slug() {
        assert!(validate_slug("slug", "chapadao").is_ok());
        assert!(validate_slug("slug", "loft-2").is_ok());
        assert!(validate_slug("slug", "Chapadão").is_err());
        assert!(validate_slug("slug", "sorriso ").is_err());
        assert!(validate_slug("slug", "").is_err());
    }

    #[test]
    fn test_validate_instagram_handle() {
        assert!(validate_instagram_handle("instagram_handle", "@patriciarios.sorriso").is_ok());
        assert!(validate_instagram_handle("instagram_handle", "loft_beauty").is_ok());
        assert!(validate_instagram_handle("instagram_handle", "").is_err());
        assert!(validate_instagram_handle("instagram_handle", "@").is_err());
        assert!(validate_instagram_handle("instagram_handle", "@//evil.example/x").is_err());
        assert!(validate_instagram_handle("instagram_handle", "loft beauty").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("delay_ms", 600u64, 0, 10_000).is_ok());
        assert!(validate_range("delay_ms", 60_000u64, 0, 10_000).is_err());
        assert!(validate_positive_number("limit", 0, 1).is_err());
    }

    #[test]
    fn test_validate_unique_keys() {
        assert!(validate_unique_keys("units", ["sorriso", "chapadao"]).is_ok());

        let err = validate_unique_keys("units", ["sorriso", "sorriso"]).unwrap_err();
        assert!(matches!(err, CmsError::DuplicateKey { ref key, .. } if key == "sorriso"));
    }
}
