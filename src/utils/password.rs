use crate::error::{AppError, AppResult};
use bcrypt::{DEFAULT_COST, hash, verify};
use rand::Rng;

/// Validate password strength.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.len() < 8 || password.len() > 128 {
        return Err(AppError::ValidationError(
            "Password must be between 8 and 128 characters".to_string(),
        ));
    }

    let has_lowercase = password.chars().any(|c| c.is_lowercase());
    let has_uppercase = password.chars().any(|c| c.is_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if !has_lowercase || !has_uppercase || !has_digit {
        return Err(AppError::ValidationError(
            "Password must contain upper and lower case letters and a digit".to_string(),
        ));
    }

    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Failed to hash password: {e}")))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Failed to verify password: {e}")))
}

/// Random placeholder password for accounts created through approval. Such
/// accounts have `can_login = false` until credentials are reset out-of-band.
pub fn generate_temp_password() -> String {
    let mut rng = rand::thread_rng();
    (0..16)
        .map(|_| {
            let chars = b"ABCDEFGHJKLMNPQRSTUVWXYZabcdefghjkmnpqrstuvwxyz23456789";
            chars[rng.gen_range(0..chars.len())] as char
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_password() {
        assert!(validate_password("Password123").is_ok());
        assert!(validate_password("password123").is_err()); // no uppercase
        assert!(validate_password("PASSWORD123").is_err()); // no lowercase
        assert!(validate_password("Password").is_err()); // no digit
        assert!(validate_password("Pass123").is_err()); // too short
    }

    #[test]
    fn test_hash_and_verify_password() {
        let password = "Password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("WrongPassword", &hashed).unwrap());
    }

    #[test]
    fn test_generate_temp_password_length() {
        assert_eq!(generate_temp_password().len(), 16);
    }
}
