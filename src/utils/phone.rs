use crate::error::{AppError, AppResult};
use regex::Regex;

/// Validate a phone number in canonical international form (`+` followed by
/// 8 to 15 digits).
pub fn validate_phone(phone: &str) -> AppResult<()> {
    let phone_regex = Regex::new(r"^\+\d{8,15}$").unwrap();

    if !phone_regex.is_match(phone) {
        return Err(AppError::ValidationError(
            "Invalid phone number, expected international format (+xxxxxxxxxx)".to_string(),
        ));
    }

    Ok(())
}

/// Normalize a phone number to canonical international form. Numbers without a
/// country prefix get `default_country_code` prepended; numbers already carrying
/// a `+` keep their own prefix.
pub fn normalize_phone(phone: &str, default_country_code: &str) -> AppResult<String> {
    let had_plus = phone.trim_start().starts_with('+');
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.is_empty() {
        return Err(AppError::ValidationError(
            "Phone number contains no digits".to_string(),
        ));
    }

    let normalized = if had_plus {
        format!("+{digits}")
    } else if digits.starts_with(default_country_code) && digits.len() > 10 {
        format!("+{digits}")
    } else {
        format!("+{default_country_code}{digits}")
    };

    validate_phone(&normalized)?;
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("+12345678901").is_ok());
        assert!(validate_phone("+255712345678").is_ok());
        assert!(validate_phone("12345678901").is_err());
        assert!(validate_phone("+123").is_err());
        assert!(validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn test_normalize_phone() {
        assert_eq!(normalize_phone("2345678901", "1").unwrap(), "+12345678901");
        assert_eq!(normalize_phone("12345678901", "1").unwrap(), "+12345678901");
        assert_eq!(normalize_phone("+12345678901", "1").unwrap(), "+12345678901");
        assert_eq!(
            normalize_phone("(234) 567-8901", "1").unwrap(),
            "+12345678901"
        );
        assert_eq!(
            normalize_phone("0712 345 678", "255").unwrap(),
            "+2550712345678"
        );
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(normalize_phone("call me", "1").is_err());
    }
}
