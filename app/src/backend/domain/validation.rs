//! Form validation for login and registration.
//!
//! Every validator is a pure predicate. The message-returning variants apply
//! their rules in a fixed order and stop at the first failure, so the user only
//! ever sees one message at a time.

use once_cell::sync::Lazy;
use regex::Regex;
use shared::FormCheck;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9+_.-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern is valid")
});

static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+569\d{8}$").expect("phone pattern is valid"));

/// Minimum-length and character-class requirements for passwords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordPolicy {
    pub min_length: usize,
    /// Require upper case, lower case, a digit and a symbol
    pub require_character_classes: bool,
}

impl PasswordPolicy {
    /// At least 6 characters, nothing else
    pub const fn simple() -> Self {
        Self {
            min_length: 6,
            require_character_classes: false,
        }
    }

    /// At least 8 characters mixing upper case, lower case, digits and symbols
    pub const fn strict() -> Self {
        Self {
            min_length: 8,
            require_character_classes: true,
        }
    }
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self::simple()
    }
}

/// Email check used by the login and registration forms.
///
/// Requires a single `@` followed by a dotted domain whose last label has at
/// least two letters. Surrounding whitespace is ignored.
pub fn is_valid_email(email: &str) -> bool {
    if email.trim().is_empty() {
        return false;
    }
    EMAIL_REGEX.is_match(email.trim())
}

/// Password check for the login form. Length is measured after trimming.
pub fn is_valid_password(password: &str, policy: PasswordPolicy) -> bool {
    password_error(password, policy).is_none()
}

pub fn is_valid_login_form(email: &str, password: &str) -> bool {
    is_valid_email(email) && is_valid_password(password, PasswordPolicy::simple())
}

/// Mobile number in the `+569XXXXXXXX` form
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

pub fn passwords_match(password: &str, confirmation: &str) -> bool {
    password == confirmation
}

/// Message for the email field, or `None` when it is valid
pub fn email_error(email: &str) -> Option<String> {
    if email.trim().is_empty() {
        Some("El correo electrónico es requerido".to_string())
    } else if !is_valid_email(email) {
        Some("El correo electrónico no es válido".to_string())
    } else {
        None
    }
}

/// Message for the password field, or `None` when it satisfies the policy
pub fn password_error(password: &str, policy: PasswordPolicy) -> Option<String> {
    let trimmed = password.trim();

    if trimmed.is_empty() {
        return Some("La contraseña es requerida".to_string());
    }
    if trimmed.chars().count() < policy.min_length {
        return Some(format!(
            "La contraseña debe tener al menos {} caracteres",
            policy.min_length
        ));
    }

    if policy.require_character_classes {
        if !trimmed.chars().any(|c| c.is_uppercase()) {
            return Some("La contraseña debe incluir una letra mayúscula".to_string());
        }
        if !trimmed.chars().any(|c| c.is_lowercase()) {
            return Some("La contraseña debe incluir una letra minúscula".to_string());
        }
        if !trimmed.chars().any(|c| c.is_ascii_digit()) {
            return Some("La contraseña debe incluir un número".to_string());
        }
        if !trimmed.chars().any(|c| !c.is_alphanumeric() && !c.is_whitespace()) {
            return Some("La contraseña debe incluir un símbolo".to_string());
        }
    }

    None
}

/// Raw input of the registration form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub confirmation: String,
}

/// Validate the registration form in display order
pub fn validate_registration(form: &RegistrationForm) -> FormCheck {
    if form.name.trim().is_empty() {
        return FormCheck::fail("Ingresa tu nombre.");
    }
    if form.last_name.trim().is_empty() {
        return FormCheck::fail("Ingresa tu apellido.");
    }
    if !is_valid_email(&form.email) {
        return FormCheck::fail("Correo inválido.");
    }
    if !is_valid_phone(&form.phone) {
        return FormCheck::fail("Teléfono debe ser +569XXXXXXXX.");
    }
    // The registration form counts every character, including surrounding spaces
    if form.password.chars().count() < PasswordPolicy::simple().min_length {
        return FormCheck::fail("La contraseña debe tener al menos 6 caracteres.");
    }
    if !passwords_match(&form.password, &form.confirmation) {
        return FormCheck::fail("Las contraseñas no coinciden.");
    }

    FormCheck::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> RegistrationForm {
        RegistrationForm {
            name: "Juan".to_string(),
            last_name: "Pérez".to_string(),
            email: "juan.perez@example.com".to_string(),
            phone: "+56912345678".to_string(),
            password: "password123".to_string(),
            confirmation: "password123".to_string(),
        }
    }

    #[test]
    fn test_valid_emails() {
        for email in ["user@example.com", "test.user@domain.com", "user+test@test.co", " a@b.cl "] {
            assert!(is_valid_email(email), "rejected {}", email);
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in ["", "   ", "testtest.com", "user@localhost", "user@@example.com", "user@example.c", "us er@example.com"] {
            assert!(!is_valid_email(email), "accepted {}", email);
        }
    }

    #[test]
    fn test_simple_password_length() {
        let policy = PasswordPolicy::simple();
        assert!(!is_valid_password("", policy));
        assert!(!is_valid_password("12345", policy));
        assert!(is_valid_password("123456", policy));
        assert!(is_valid_password("password123", policy));
        assert!(!is_valid_password("  123  ", policy));
    }

    #[test]
    fn test_login_form() {
        assert!(is_valid_login_form("test@test.com", "password123"));
        assert!(!is_valid_login_form("invalidemail", "password123"));
        assert!(!is_valid_login_form("test@test.com", "123"));
    }

    #[test]
    fn test_email_error_messages() {
        assert_eq!(email_error("").as_deref(), Some("El correo electrónico es requerido"));
        assert_eq!(email_error("invalid").as_deref(), Some("El correo electrónico no es válido"));
        assert_eq!(email_error("juan@example.com"), None);
    }

    #[test]
    fn test_password_error_messages() {
        let policy = PasswordPolicy::simple();
        assert_eq!(password_error("", policy).as_deref(), Some("La contraseña es requerida"));
        assert_eq!(
            password_error("123", policy).as_deref(),
            Some("La contraseña debe tener al menos 6 caracteres")
        );
        assert_eq!(password_error("123456", policy), None);
    }

    #[test]
    fn test_strict_policy_checks_classes_in_order() {
        let policy = PasswordPolicy::strict();
        assert_eq!(
            password_error("Ab1!", policy).as_deref(),
            Some("La contraseña debe tener al menos 8 caracteres")
        );
        assert_eq!(
            password_error("abcdefg1!", policy).as_deref(),
            Some("La contraseña debe incluir una letra mayúscula")
        );
        assert_eq!(
            password_error("ABCDEFG1!", policy).as_deref(),
            Some("La contraseña debe incluir una letra minúscula")
        );
        assert_eq!(
            password_error("Abcdefgh!", policy).as_deref(),
            Some("La contraseña debe incluir un número")
        );
        assert_eq!(
            password_error("Abcdefgh1", policy).as_deref(),
            Some("La contraseña debe incluir un símbolo")
        );
        assert!(is_valid_password("Abcdefg1!", policy));
    }

    #[test]
    fn test_phone_format() {
        assert!(is_valid_phone("+56912345678"));
        assert!(!is_valid_phone("912345678"));
        assert!(!is_valid_phone("+5691234567"));
        assert!(!is_valid_phone("+569123456789"));
        assert!(!is_valid_phone("+56212345678"));
    }

    #[test]
    fn test_registration_accepts_valid_form() {
        assert_eq!(validate_registration(&valid_form()), FormCheck::ok());
    }

    #[test]
    fn test_registration_reports_first_failure() {
        let cases = [
            (RegistrationForm { name: String::new(), ..valid_form() }, "Ingresa tu nombre."),
            (RegistrationForm { last_name: " ".to_string(), ..valid_form() }, "Ingresa tu apellido."),
            (RegistrationForm { email: "correo-invalido".to_string(), ..valid_form() }, "Correo inválido."),
            (RegistrationForm { phone: "912345678".to_string(), ..valid_form() }, "Teléfono debe ser +569XXXXXXXX."),
            (
                RegistrationForm { password: "12345".to_string(), confirmation: "12345".to_string(), ..valid_form() },
                "La contraseña debe tener al menos 6 caracteres.",
            ),
            (RegistrationForm { confirmation: "otraClave".to_string(), ..valid_form() }, "Las contraseñas no coinciden."),
        ];

        for (form, expected) in cases {
            let check = validate_registration(&form);
            assert!(!check.is_valid);
            assert_eq!(check.message, expected);
        }
    }

    #[test]
    fn test_registration_order_short_circuits() {
        // Both the name and the phone are wrong: only the name is reported
        let form = RegistrationForm {
            name: String::new(),
            phone: "123".to_string(),
            ..valid_form()
        };
        assert_eq!(validate_registration(&form).message, "Ingresa tu nombre.");
    }
}
