use crate::domain::ids::UserId;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub created_at: i64,
}

/// Lowercases and trims an address used as a lookup key.
pub fn normalize_email(raw: &str) -> Result<String, CoreError> {
    let trimmed = raw.trim();
    let Some((local, domain)) = trimmed.split_once('@') else {
        return Err(CoreError::InvalidEmail(trimmed.to_string()));
    };
    if local.is_empty() || domain.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(CoreError::InvalidEmail(trimmed.to_string()));
    }
    Ok(trimmed.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::normalize_email;

    #[test]
    fn normalize_email_lowercases() {
        assert_eq!(
            normalize_email("  Ops@Example.COM ").unwrap(),
            "ops@example.com"
        );
    }

    #[test]
    fn normalize_email_rejects_garbage() {
        assert!(normalize_email("").is_err());
        assert!(normalize_email("no-at-sign").is_err());
        assert!(normalize_email("@example.com").is_err());
        assert!(normalize_email("ops@").is_err());
        assert!(normalize_email("o ps@example.com").is_err());
    }
}
