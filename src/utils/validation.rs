use crate::utils::error::{CardcastError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// Checks that `scheme://host:port` forms a usable base URL for outbound requests.
pub fn validate_base_url(field_name: &str, scheme: &str, host: &str, port: u16) -> Result<()> {
    let url_str = format!("{}://{}:{}", scheme, host, port);

    match Url::parse(&url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(CardcastError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.clone(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(CardcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str,
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CardcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CardcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CardcastError::InvalidConfigValueError {
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
        return Err(CardcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Rejects a path template that never mentions the deck placeholder.
pub fn validate_deck_template(field_name: &str, template: &str) -> Result<()> {
    validate_non_empty_string(field_name, template)?;

    if !crate::core::template::has_deck_placeholder(template) {
        return Err(CardcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: "Template must contain a {deck} placeholder".to_string(),
        });
    }

    if !template.starts_with('/') {
        return Err(CardcastError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: template.to_string(),
            reason: "Template must be an absolute path starting with '/'".to_string(),
        });
    }

    Ok(())
}
