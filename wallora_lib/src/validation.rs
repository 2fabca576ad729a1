use url::Url;

use crate::error::WalloraError;

pub const MAX_CATEGORY_LENGTH: usize = 40;
pub const MAX_PAGE_SIZE: i64 = 100;
pub const MAX_PAGES: i64 = 50;

/// Strip ASCII control characters (0x00-0x1F except space 0x20), trim whitespace,
/// and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize) -> Result<String, WalloraError> {
    if input.len() > max_len {
        return Err(WalloraError::InvalidInput(format!(
            "input exceeds maximum length of {} bytes",
            max_len
        )));
    }
    let sanitized: String = input
        .chars()
        .filter(|c| !c.is_ascii_control() || *c == ' ')
        .collect::<String>()
        .trim()
        .to_string();
    if sanitized.is_empty() {
        return Err(WalloraError::InvalidInput(
            "input is empty after sanitization".to_string(),
        ));
    }
    Ok(sanitized)
}

/// Validate a category slug: sanitize, lowercase, allow `[a-z0-9_-]` only.
pub fn validate_category(input: &str) -> Result<String, WalloraError> {
    let slug = sanitize_text(input, MAX_CATEGORY_LENGTH)?.to_lowercase();
    if slug
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        Ok(slug)
    } else {
        Err(WalloraError::InvalidInput(format!(
            "invalid category '{}'. Use letters, digits, '-' or '_'",
            input
        )))
    }
}

/// Validate page size (must be 1..=100).
pub fn validate_page_size(page_size: i64) -> Result<u32, WalloraError> {
    if !(1..=MAX_PAGE_SIZE).contains(&page_size) {
        return Err(WalloraError::InvalidInput(format!(
            "page_size must be between 1 and {}",
            MAX_PAGE_SIZE
        )));
    }
    Ok(page_size as u32)
}

/// Validate how many pages a session may load (must be 1..=50).
pub fn validate_pages(pages: i64) -> Result<u32, WalloraError> {
    if !(1..=MAX_PAGES).contains(&pages) {
        return Err(WalloraError::InvalidInput(format!(
            "pages must be between 1 and {}",
            MAX_PAGES
        )));
    }
    Ok(pages as u32)
}

/// Validate an API base URL: must parse and use http or https.
pub fn validate_base_url(input: &str) -> Result<String, WalloraError> {
    let trimmed = input.trim();
    let url = Url::parse(trimmed)
        .map_err(|e| WalloraError::InvalidInput(format!("invalid base URL '{}': {}", input, e)))?;
    match url.scheme() {
        "http" | "https" => Ok(trimmed.to_string()),
        other => Err(WalloraError::InvalidInput(format!(
            "unsupported URL scheme '{}'. Use http or https",
            other
        ))),
    }
}
