//! Shape and format rules for user-supplied credentials.
//!
//! Every check is pure and reports a specific reason. `validate_signup` and
//! `validate_login` run the individual checks in a fixed order and stop at
//! the first failure.

use lazy_static::lazy_static;
use regex::Regex;

use super::errors::Field;
use super::errors::ValidationError;
use super::errors::ValidationErrorKind;
use super::models::DisplayName;
use super::models::EmailAddress;
use super::models::LoginCommand;
use super::models::LoginRequest;
use super::models::Password;
use super::models::SignupCommand;
use super::models::SignupRequest;
use super::models::Username;

const NAME_MIN_LENGTH: usize = 3;
const NAME_MAX_LENGTH: usize = 32;
const NAME_SYMBOLS: &str = "!@#$%^&*()_+={}[]:;,.<>?/-";

const PASSWORD_MIN_LENGTH: usize = 8;
const PASSWORD_MAX_LENGTH: usize = 32;
const PASSWORD_SYMBOLS: &str = "!@#$%^&*()_+";

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
        .expect("email pattern is a valid regex");
}

fn is_valid_name(s: &str) -> bool {
    let length = s.chars().count();
    (NAME_MIN_LENGTH..=NAME_MAX_LENGTH).contains(&length)
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || NAME_SYMBOLS.contains(c))
}

/// # Errors
/// * `InvalidUsername` - Not 3-32 characters of the allowed alphabet
pub fn validate_username(s: &str) -> Result<(), ValidationError> {
    if is_valid_name(s) {
        Ok(())
    } else {
        Err(ValidationError::new(
            Field::Username,
            ValidationErrorKind::InvalidUsername,
        ))
    }
}

/// # Errors
/// * `InvalidName` - Not 3-32 characters of the allowed alphabet
pub fn validate_display_name(s: &str) -> Result<(), ValidationError> {
    if is_valid_name(s) {
        Ok(())
    } else {
        Err(ValidationError::new(Field::Name, ValidationErrorKind::InvalidName))
    }
}

/// # Errors
/// * `InvalidEmail` - Not shaped like `local@domain.tld`
pub fn validate_email(s: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::new(Field::Email, ValidationErrorKind::InvalidEmail))
    }
}

/// # Errors
/// * `EmptyPassword` - Password is empty
/// * `InvalidPassword` - Not 8-32 characters, no uppercase letter, no digit,
///   or a character outside `[A-Za-z0-9!@#$%^&*()_+]`
pub fn validate_password(s: &str) -> Result<(), ValidationError> {
    check_password(s, Field::Password)
}

fn check_password(s: &str, field: Field) -> Result<(), ValidationError> {
    if s.is_empty() {
        return Err(ValidationError::new(field, ValidationErrorKind::EmptyPassword));
    }

    let length = s.chars().count();
    let valid = (PASSWORD_MIN_LENGTH..=PASSWORD_MAX_LENGTH).contains(&length)
        && s.chars().any(|c| c.is_ascii_uppercase())
        && s.chars().any(|c| c.is_ascii_digit())
        && s
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c));

    if valid {
        Ok(())
    } else {
        Err(ValidationError::new(field, ValidationErrorKind::InvalidPassword))
    }
}

/// Check a signup request.
///
/// Order: username, display name, email, password, confirmation, then
/// password equality.
///
/// # Errors
/// The first failing rule's `ValidationError`
pub fn validate_signup(request: SignupRequest) -> Result<SignupCommand, ValidationError> {
    let username = Username::new(request.username)?;
    let display_name = DisplayName::new(request.display_name)?;
    let email = EmailAddress::new(request.email)?;
    let password = Password::new(request.password)?;
    check_password(&request.password_confirmation, Field::ConfirmPassword)?;

    if password.expose() != request.password_confirmation {
        return Err(ValidationError::new(
            Field::ConfirmPassword,
            ValidationErrorKind::PasswordMismatch,
        ));
    }

    Ok(SignupCommand {
        username,
        display_name,
        email,
        password,
    })
}

/// Check a login request: email first, then password.
///
/// # Errors
/// The first failing rule's `ValidationError`
pub fn validate_login(request: LoginRequest) -> Result<LoginCommand, ValidationError> {
    let email = EmailAddress::new(request.email)?;
    let password = Password::new(request.password)?;

    Ok(LoginCommand { email, password })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind<T>(result: Result<T, ValidationError>) -> Option<ValidationErrorKind> {
        result.err().map(|e| e.kind)
    }

    fn signup_request() -> SignupRequest {
        SignupRequest {
            username: "testuser".to_string(),
            display_name: "TestUser".to_string(),
            email: "test@example.com".to_string(),
            password: "Password123".to_string(),
            password_confirmation: "Password123".to_string(),
        }
    }

    #[test]
    fn test_username_length_bounds() {
        assert_eq!(kind(validate_username("")), Some(ValidationErrorKind::InvalidUsername));
        assert_eq!(kind(validate_username("ab")), Some(ValidationErrorKind::InvalidUsername));
        assert!(validate_username("abc").is_ok());
        assert!(validate_username(&"a".repeat(32)).is_ok());
        assert_eq!(
            kind(validate_username(&"a".repeat(33))),
            Some(ValidationErrorKind::InvalidUsername)
        );
    }

    #[test]
    fn test_username_allowed_characters() {
        assert!(validate_username("user_01").is_ok());
        assert!(validate_username("!@#$%^&*()_+={}[]:;,.<>?/-").is_ok());
        assert!(validate_username("a.b-c").is_ok());
    }

    #[test]
    fn test_username_rejected_characters() {
        for candidate in ["test user", "user~name", "user|name", "tést", "user\"1", "usér"] {
            assert_eq!(
                kind(validate_username(candidate)),
                Some(ValidationErrorKind::InvalidUsername),
                "{candidate} should be rejected"
            );
        }
    }

    #[test]
    fn test_display_name_uses_own_error_kind() {
        assert!(validate_display_name("TestUser").is_ok());

        let err = validate_display_name("Test User").unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidName);
        assert_eq!(err.field, Field::Name);

        assert_eq!(kind(validate_display_name("ab")), Some(ValidationErrorKind::InvalidName));
        assert_eq!(
            kind(validate_display_name(&"n".repeat(33))),
            Some(ValidationErrorKind::InvalidName)
        );
    }

    #[test]
    fn test_email_accepted() {
        for candidate in [
            "user@example.com",
            "first.last+tag@sub.example.org",
            "a_b%c-d@host-name.io",
        ] {
            assert!(validate_email(candidate).is_ok(), "{candidate} should be accepted");
        }
    }

    #[test]
    fn test_email_rejected() {
        for candidate in [
            "",
            "userexample.com",
            "user@",
            "@example.com",
            "user@example",
            "user@example.c",
            "user@example.c0m",
            "user name@example.com",
            "user@example.com ",
        ] {
            assert_eq!(
                kind(validate_email(candidate)),
                Some(ValidationErrorKind::InvalidEmail),
                "{candidate:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_password_empty() {
        assert_eq!(kind(validate_password("")), Some(ValidationErrorKind::EmptyPassword));
    }

    #[test]
    fn test_password_accepted() {
        assert!(validate_password("Password123").is_ok());
        assert!(validate_password("PASSWORD1").is_ok());
        assert!(validate_password("Abcdefg1").is_ok());
        assert!(validate_password("P@ssw0rd!_(+)").is_ok());
        assert!(validate_password(&format!("A1{}", "x".repeat(30))).is_ok());
    }

    #[test]
    fn test_password_rejected() {
        for candidate in [
            "password",
            "12345678",
            "short1A",
            "password123",
            "PASSWORDabc",
            "Password 123",
            "Password123-",
            "Pässword123",
        ] {
            assert_eq!(
                kind(validate_password(candidate)),
                Some(ValidationErrorKind::InvalidPassword),
                "{candidate:?} should be rejected"
            );
        }

        assert_eq!(
            kind(validate_password(&format!("A1{}", "x".repeat(31)))),
            Some(ValidationErrorKind::InvalidPassword)
        );
    }

    #[test]
    fn test_validate_signup_success() {
        let command = validate_signup(signup_request()).expect("signup should validate");

        assert_eq!(command.username.as_str(), "testuser");
        assert_eq!(command.display_name.as_str(), "TestUser");
        assert_eq!(command.email.as_str(), "test@example.com");
        assert_eq!(command.password.expose(), "Password123");
    }

    #[test]
    fn test_validate_signup_short_circuits_in_order() {
        // Every field is bad; the username is reported first
        let request = SignupRequest {
            username: "x".to_string(),
            display_name: "y".to_string(),
            email: "bad".to_string(),
            password: String::new(),
            password_confirmation: String::new(),
        };
        assert_eq!(
            validate_signup(request.clone()).unwrap_err().kind,
            ValidationErrorKind::InvalidUsername
        );

        let request = SignupRequest {
            username: "testuser".to_string(),
            ..request
        };
        assert_eq!(
            validate_signup(request.clone()).unwrap_err().kind,
            ValidationErrorKind::InvalidName
        );

        let request = SignupRequest {
            display_name: "TestUser".to_string(),
            ..request
        };
        assert_eq!(
            validate_signup(request.clone()).unwrap_err().kind,
            ValidationErrorKind::InvalidEmail
        );

        let request = SignupRequest {
            email: "test@example.com".to_string(),
            ..request
        };
        let err = validate_signup(request.clone()).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyPassword);
        assert_eq!(err.field, Field::Password);

        let request = SignupRequest {
            password: "Password123".to_string(),
            ..request
        };
        let err = validate_signup(request).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyPassword);
        assert_eq!(err.field, Field::ConfirmPassword);
    }

    #[test]
    fn test_validate_signup_invalid_confirmation() {
        let request = SignupRequest {
            password_confirmation: "password".to_string(),
            ..signup_request()
        };

        let err = validate_signup(request).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidPassword);
        assert_eq!(err.field, Field::ConfirmPassword);
    }

    #[test]
    fn test_validate_signup_password_mismatch() {
        let request = SignupRequest {
            password_confirmation: "Password124".to_string(),
            ..signup_request()
        };

        let err = validate_signup(request).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::PasswordMismatch);
        assert_eq!(err.to_string(), "passwords do not match");
    }

    #[test]
    fn test_validate_login() {
        let command = validate_login(LoginRequest {
            email: "test@example.com".to_string(),
            password: "Password123".to_string(),
        })
        .expect("login should validate");
        assert_eq!(command.email.as_str(), "test@example.com");

        let err = validate_login(LoginRequest {
            email: "test@".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::InvalidEmail);

        let err = validate_login(LoginRequest {
            email: "test@example.com".to_string(),
            password: String::new(),
        })
        .unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::EmptyPassword);
    }

    #[test]
    fn test_validation_is_deterministic() {
        for _ in 0..3 {
            assert!(validate_username("testuser").is_ok());
            assert!(validate_email("userexample.com").is_err());
        }
    }
}
