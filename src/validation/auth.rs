use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use super::{min_len, safe_redirect, text, FieldErrors, FormData};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

const PASSWORD_MIN: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub remember: bool,
    pub redirect_to: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub phone_no: String,
    pub address: String,
    pub dob: NaiveDate,
    pub city: String,
    pub state: String,
    pub zipcode: String,
    pub redirect_to: String,
}

fn email(errors: &mut FieldErrors, form: &FormData) -> String {
    let value = text(form, "email");
    if !EMAIL_RE.is_match(value) {
        errors.add("email", "Invalid email");
    }
    value.to_string()
}

fn password(errors: &mut FieldErrors, form: &FormData, field: &str) -> String {
    // Passwords are taken verbatim, surrounding whitespace included.
    let value = form.get(field).cloned().unwrap_or_default();
    if value.chars().count() < PASSWORD_MIN {
        errors.add(field, "Password must be at least 8 characters");
    }
    value
}

impl LoginForm {
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let email = email(&mut errors, form);
        let password = password(&mut errors, form, "password");
        let remember = match form.get("remember").map(String::as_str) {
            None | Some("") => false,
            Some("on") => true,
            Some(_) => {
                errors.add("remember", "Invalid value");
                false
            }
        };
        let redirect_to = safe_redirect(form.get("redirectTo").map(String::as_str));
        errors.into_result(|| Self { email, password, remember, redirect_to })
    }
}

impl RegisterForm {
    pub fn parse(form: &FormData) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        let first_name = min_len(&mut errors, form, "firstName", 1, "FirstName is required");
        let last_name = min_len(&mut errors, form, "lastName", 1, "LastName is required");
        let email = email(&mut errors, form);
        let new_password = password(&mut errors, form, "password");
        let confirm_password = password(&mut errors, form, "confirmPassword");
        let phone_no = min_len(&mut errors, form, "phoneNo", 10, "Phone number is required");
        let address = min_len(&mut errors, form, "address", 1, "Address is required");
        let dob = match NaiveDate::parse_from_str(text(form, "dob"), "%Y-%m-%d") {
            Ok(date) => Some(date),
            Err(_) => {
                errors.add("dob", "Date of birth is required");
                None
            }
        };
        let city = min_len(&mut errors, form, "city", 3, "City is required");
        let state = min_len(&mut errors, form, "state", 2, "State is required");
        let zipcode = min_len(&mut errors, form, "zipcode", 5, "Zipcode is required");
        let redirect_to = safe_redirect(form.get("redirectTo").map(String::as_str));

        if new_password != confirm_password {
            errors.add("password", "Passwords do not match");
            errors.add("confirmPassword", "Passwords do not match");
        }

        match dob {
            Some(dob) if errors.is_empty() => Ok(Self {
                first_name,
                last_name,
                email,
                password: new_password,
                phone_no,
                address,
                dob,
                city,
                state,
                zipcode,
                redirect_to,
            }),
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::form;

    fn registration(password: &str, confirm: &str) -> FormData {
        form(&[
            ("firstName", "John"),
            ("lastName", "Doe"),
            ("email", "user@app.com"),
            ("password", password),
            ("confirmPassword", confirm),
            ("phoneNo", "1234567890"),
            ("address", "123 Main St"),
            ("dob", "1990-01-01"),
            ("city", "New York"),
            ("state", "NY"),
            ("zipcode", "10001"),
        ])
    }

    #[test]
    fn test_valid_registration() {
        let parsed = RegisterForm::parse(&registration("password", "password")).unwrap();
        assert_eq!(parsed.email, "user@app.com");
        assert_eq!(parsed.password, "password");
        assert_eq!(parsed.dob, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert_eq!(parsed.redirect_to, "/");
    }

    #[test]
    fn test_mismatched_passwords_flag_both_fields() {
        let errors = RegisterForm::parse(&registration("password1", "password2")).unwrap_err();
        assert_eq!(errors.get("password"), Some("Passwords do not match"));
        assert_eq!(errors.get("confirmPassword"), Some("Passwords do not match"));
    }

    #[test]
    fn test_registration_field_rules() {
        let errors = RegisterForm::parse(&form(&[("email", "nope"), ("city", "NY"), ("dob", "01/01/1990")])).unwrap_err();
        assert_eq!(errors.get("firstName"), Some("FirstName is required"));
        assert_eq!(errors.get("lastName"), Some("LastName is required"));
        assert_eq!(errors.get("email"), Some("Invalid email"));
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
        assert_eq!(errors.get("phoneNo"), Some("Phone number is required"));
        assert_eq!(errors.get("address"), Some("Address is required"));
        assert_eq!(errors.get("dob"), Some("Date of birth is required"));
        assert_eq!(errors.get("city"), Some("City is required"));
        assert_eq!(errors.get("state"), Some("State is required"));
        assert_eq!(errors.get("zipcode"), Some("Zipcode is required"));
    }

    #[test]
    fn test_login_form() {
        let parsed = LoginForm::parse(&form(&[
            ("email", "user@app.com"),
            ("password", "password"),
            ("remember", "on"),
            ("redirectTo", "/orders"),
        ]))
        .unwrap();
        assert!(parsed.remember);
        assert_eq!(parsed.redirect_to, "/orders");

        let errors = LoginForm::parse(&form(&[("email", "user@app"), ("password", "short")])).unwrap_err();
        assert_eq!(errors.get("email"), Some("Invalid email"));
        assert_eq!(errors.get("password"), Some("Password must be at least 8 characters"));
    }
}
