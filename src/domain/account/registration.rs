//! Registration and login input.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use crate::domain::foundation::{Role, ValidationError};

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 8;

/// Raw registration form.
#[derive(Debug, Deserialize)]
pub struct RegistrationDraft {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    pub password: Option<Secret<String>>,
}

/// A validated registration. The password is still plaintext and must be
/// hashed before storage.
#[derive(Debug)]
pub struct NewAccount {
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: Secret<String>,
    pub role: Role,
}

impl RegistrationDraft {
    pub fn validate(self) -> Result<NewAccount, ValidationError> {
        let full_name = self.full_name.trim().to_string();
        let username = self.username.trim().to_string();
        let email = self.email.trim().to_lowercase();
        let password = self
            .password
            .filter(|p| !p.expose_secret().is_empty());

        let password = match password {
            Some(p) if !full_name.is_empty() && !username.is_empty() && !email.is_empty() => p,
            _ => return Err(ValidationError::rule("all fields are required")),
        };
        if !email.contains('@') {
            return Err(ValidationError::rule("invalid email"));
        }
        if username.chars().count() < MIN_USERNAME_LEN {
            return Err(ValidationError::rule(format!(
                "username must be at least {} characters",
                MIN_USERNAME_LEN
            )));
        }
        if password.expose_secret().chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::rule(format!(
                "password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        Ok(NewAccount {
            full_name,
            username,
            email,
            password,
            role: Role::User,
        })
    }
}

/// Raw login form. `identifier` is an email or a username.
#[derive(Debug, Deserialize)]
pub struct LoginDraft {
    #[serde(default)]
    pub identifier: String,
    pub password: Option<Secret<String>>,
}

impl LoginDraft {
    /// Returns the trimmed identifier and the password.
    pub fn validate(self) -> Result<(String, Secret<String>), ValidationError> {
        let identifier = self.identifier.trim().to_string();
        match self.password {
            Some(p) if !identifier.is_empty() && !p.expose_secret().is_empty() => {
                Ok((identifier, p))
            }
            _ => Err(ValidationError::rule("identifier and password are required")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(username: &str, email: &str, password: &str) -> RegistrationDraft {
        RegistrationDraft {
            full_name: "Grace Hopper".into(),
            username: username.into(),
            email: email.into(),
            password: Some(Secret::new(password.into())),
        }
    }

    #[test]
    fn valid_registration_normalizes_email() {
        let account = draft("grace", " Grace@Navy.MIL ", "cobol-forever").validate().unwrap();
        assert_eq!(account.email, "grace@navy.mil");
        assert_eq!(account.role, Role::User);
    }

    #[test]
    fn registration_requires_all_fields() {
        let mut d = draft("grace", "g@n.mil", "cobol-forever");
        d.full_name = " ".into();
        assert_eq!(d.validate().unwrap_err().to_string(), "all fields are required");

        let mut d = draft("grace", "g@n.mil", "cobol-forever");
        d.password = None;
        assert!(d.validate().is_err());
    }

    #[test]
    fn registration_checks_email_username_password() {
        assert_eq!(
            draft("grace", "no-at-sign", "cobol-forever")
                .validate()
                .unwrap_err()
                .to_string(),
            "invalid email"
        );
        assert!(draft("gh", "g@n.mil", "cobol-forever").validate().is_err());
        assert!(draft("grace", "g@n.mil", "short").validate().is_err());
    }

    #[test]
    fn login_requires_identifier_and_password() {
        let ok = LoginDraft {
            identifier: " grace ".into(),
            password: Some(Secret::new("pw".into())),
        };
        assert_eq!(ok.validate().unwrap().0, "grace");

        let missing = LoginDraft {
            identifier: "grace".into(),
            password: None,
        };
        assert!(missing.validate().is_err());
    }

    #[test]
    fn drafts_deserialize_from_json() {
        let d: LoginDraft =
            serde_json::from_str(r#"{"identifier":"a@b.c","password":"pw"}"#).unwrap();
        assert_eq!(d.identifier, "a@b.c");
        assert!(d.password.is_some());
    }
}
