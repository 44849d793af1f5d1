//! Client-side form checks. Problems are reported per field and rendered
//! inline next to the input; nothing here fails hard.

use std::collections::BTreeMap;

use thiserror::Error;

pub const NICKNAME_MIN: usize = 2;
pub const NICKNAME_MAX: usize = 20;
pub const PASSWORD_MIN: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Nickname,
    Account,
    Password,
    Confirm,
    CurrentPassword,
    NewPassword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("required")]
    Required,
    #[error("nickname must be 2-20 characters")]
    NicknameLength,
    #[error("not a mobile number or e-mail address")]
    InvalidAccount,
    #[error("password shorter than 8 characters")]
    PasswordTooShort,
    #[error("password needs a letter and a digit")]
    PasswordTooWeak,
    #[error("passwords do not match")]
    Mismatch,
    #[error("new password equals the current one")]
    Unchanged,
}

impl FieldError {
    /// Localized inline message.
    pub fn message(&self) -> String {
        match self {
            FieldError::Required => crate::t!("form-required"),
            FieldError::NicknameLength => crate::t!("form-nickname-length"),
            FieldError::InvalidAccount => crate::t!("form-account-invalid"),
            FieldError::PasswordTooShort => crate::t!("form-password-short"),
            FieldError::PasswordTooWeak => crate::t!("form-password-weak"),
            FieldError::Mismatch => crate::t!("form-password-mismatch"),
            FieldError::Unchanged => crate::t!("form-password-unchanged"),
        }
    }
}

/// First problem found per field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldErrors(BTreeMap<Field, FieldError>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<FieldError> {
        self.0.get(&field).copied()
    }

    pub fn message(&self, field: Field) -> Option<String> {
        self.get(field).map(|err| err.message())
    }

    fn check(&mut self, field: Field, outcome: Result<(), FieldError>) {
        if let Err(err) = outcome {
            self.0.entry(field).or_insert(err);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoginForm {
    pub account: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistrationForm {
    pub nickname: String,
    pub account: String,
    pub password: String,
    pub confirm: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PasswordChangeForm {
    pub current: String,
    pub new_password: String,
    pub confirm: String,
}

fn required(value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        Err(FieldError::Required)
    } else {
        Ok(())
    }
}

pub fn check_nickname(nickname: &str) -> Result<(), FieldError> {
    required(nickname)?;
    let len = nickname.trim().chars().count();
    if (NICKNAME_MIN..=NICKNAME_MAX).contains(&len) {
        Ok(())
    } else {
        Err(FieldError::NicknameLength)
    }
}

/// 11 digits, leading `1`, second digit 3-9.
pub fn is_mobile(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 11
        && bytes.iter().all(u8::is_ascii_digit)
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
}

pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, _)| !host.is_empty())
        && !domain.ends_with('.')
}

pub fn check_account(account: &str) -> Result<(), FieldError> {
    required(account)?;
    let account = account.trim();
    if is_mobile(account) || is_email(account) {
        Ok(())
    } else {
        Err(FieldError::InvalidAccount)
    }
}

pub fn check_password(password: &str) -> Result<(), FieldError> {
    required(password)?;
    if password.chars().count() < PASSWORD_MIN {
        return Err(FieldError::PasswordTooShort);
    }
    let letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let digit = password.chars().any(|c| c.is_ascii_digit());
    if letter && digit {
        Ok(())
    } else {
        Err(FieldError::PasswordTooWeak)
    }
}

fn check_confirm(password: &str, confirm: &str) -> Result<(), FieldError> {
    required(confirm)?;
    if password == confirm {
        Ok(())
    } else {
        Err(FieldError::Mismatch)
    }
}

pub fn validate_login(form: &LoginForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check(Field::Account, required(&form.account));
    errors.check(Field::Password, required(&form.password));
    errors
}

pub fn validate_registration(form: &RegistrationForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check(Field::Nickname, check_nickname(&form.nickname));
    errors.check(Field::Account, check_account(&form.account));
    errors.check(Field::Password, check_password(&form.password));
    errors.check(Field::Confirm, check_confirm(&form.password, &form.confirm));
    errors
}

pub fn validate_password_change(form: &PasswordChangeForm) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.check(Field::CurrentPassword, required(&form.current));
    errors.check(Field::NewPassword, check_password(&form.new_password));
    if !form.current.is_empty() && form.current == form.new_password {
        errors.check(Field::NewPassword, Err(FieldError::Unchanged));
    }
    errors.check(Field::Confirm, check_confirm(&form.new_password, &form.confirm));
    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_needs_both_fields() {
        let errors = validate_login(&LoginForm::default());
        assert_eq!(errors.get(Field::Account), Some(FieldError::Required));
        assert_eq!(errors.get(Field::Password), Some(FieldError::Required));

        let ok = validate_login(&LoginForm {
            account: "13800138000".into(),
            password: "x".into(),
        });
        assert!(ok.is_empty());
    }

    #[test]
    fn nickname_bounds_count_characters() {
        assert_eq!(check_nickname("林"), Err(FieldError::NicknameLength));
        assert_eq!(check_nickname("小林"), Ok(()));
        assert_eq!(check_nickname(&"字".repeat(20)), Ok(()));
        assert_eq!(check_nickname(&"字".repeat(21)), Err(FieldError::NicknameLength));
        assert_eq!(check_nickname("   "), Err(FieldError::Required));
    }

    #[test]
    fn accounts() {
        assert!(is_mobile("13800138000"));
        assert!(!is_mobile("12800138000"));
        assert!(!is_mobile("1380013800"));
        assert!(is_email("a@b.co"));
        assert!(!is_email("a@b"));
        assert!(!is_email("@b.co"));
        assert!(!is_email("a b@c.co"));
        assert!(!is_email("a@.co"));
        assert_eq!(check_account("hello"), Err(FieldError::InvalidAccount));
    }

    #[test]
    fn password_rules() {
        assert_eq!(check_password("abc123"), Err(FieldError::PasswordTooShort));
        assert_eq!(check_password("abcdefgh"), Err(FieldError::PasswordTooWeak));
        assert_eq!(check_password("12345678"), Err(FieldError::PasswordTooWeak));
        assert_eq!(check_password("abcd1234"), Ok(()));
    }

    #[test]
    fn registration_reports_each_field_once() {
        let errors = validate_registration(&RegistrationForm {
            nickname: "A".into(),
            account: "nope".into(),
            password: "short".into(),
            confirm: "other".into(),
        });
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Confirm), Some(FieldError::Mismatch));

        let valid = validate_registration(&RegistrationForm {
            nickname: "小林".into(),
            account: "lin@example.com".into(),
            password: "pitch2024".into(),
            confirm: "pitch2024".into(),
        });
        assert!(valid.is_empty());
    }

    #[test]
    fn password_change_rejects_reuse() {
        let errors = validate_password_change(&PasswordChangeForm {
            current: "abcd1234".into(),
            new_password: "abcd1234".into(),
            confirm: "abcd1234".into(),
        });
        assert_eq!(errors.get(Field::NewPassword), Some(FieldError::Unchanged));
        assert_eq!(errors.get(Field::CurrentPassword), None);

        let ok = validate_password_change(&PasswordChangeForm {
            current: "abcd1234".into(),
            new_password: "wxyz9876".into(),
            confirm: "wxyz9876".into(),
        });
        assert!(ok.is_empty());
    }
}
