use dosdata::core::info::Info;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid filter '{0}'. Expected KEY=VALUE (e.g., 'symbol=O').")]
    InvalidFilter(String),

    #[error("Component '{component}' cannot be empty in filter '{filter}'.")]
    EmptyComponent {
        component: &'static str,
        filter: String,
    },
}

/// Splits a `KEY=VALUE` argument at the first `=`.
pub fn parse_key_value(s: &str) -> Result<(String, String), ParseError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ParseError::InvalidFilter(s.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "key",
            filter: s.to_string(),
        });
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Collects repeated `KEY=VALUE` arguments into selection criteria.
pub fn parse_criteria(filters: &[String]) -> Result<Info, ParseError> {
    filters.iter().map(|f| parse_key_value(f)).collect()
}
