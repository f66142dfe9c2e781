use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};
use crate::errors::AppError;

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// `local@domain.tld`: one `@`, no whitespace, a dot inside the domain with
/// something on both sides of it.
pub fn validate_email_shape(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(invalid("required", "Email is required"));
    }

    let well_formed = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
                && domain
                    .char_indices()
                    .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
        }
        None => false,
    };

    if well_formed {
        Ok(())
    } else {
        Err(invalid("email", "Invalid email format"))
    }
}

pub fn validate_mobile_no(mobile_no: &str) -> Result<(), ValidationError> {
    if mobile_no.is_empty() {
        return Err(invalid("required", "Mobile No is required"));
    }
    if !mobile_no.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid("numeric", "Mobile No must be numeric"));
    }
    Ok(())
}

pub fn validate_gender(gender: &str) -> Result<(), ValidationError> {
    if gender.is_empty() {
        return Err(invalid("required", "Gender is required"));
    }
    if !gender.eq_ignore_ascii_case("male") && !gender.eq_ignore_ascii_case("female") {
        return Err(invalid("gender", "Gender must be either 'Male' or 'Female'"));
    }
    Ok(())
}

/// Flattens validator output into one reason per field.
pub fn field_errors(errors: &ValidationErrors) -> BTreeMap<String, String> {
    errors
        .field_errors()
        .into_iter()
        .filter_map(|(field, errs)| {
            errs.first().map(|e| {
                let reason = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string());
                (to_camel_case(field), reason)
            })
        })
        .collect()
}

// Struct fields are snake_case, the wire format is camelCase.
fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

pub fn validate_payload<T: Validate>(payload: &T) -> Result<(), AppError> {
    payload
        .validate()
        .map_err(|err| AppError::Validation(field_errors(&err)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(validate_email_shape("jane@example.com").is_ok());
        assert!(validate_email_shape("j.doe+hr@mail.example.org").is_ok());

        for bad in ["", "jane", "jane@", "@example.com", "jane@example", "jane@.com", "jane@example.", "ja ne@example.com", "a@b@c.com"] {
            assert!(validate_email_shape(bad).is_err(), "{bad} should be rejected");
        }
    }

    #[test]
    fn mobile_no_must_be_digits() {
        assert!(validate_mobile_no("9876543210").is_ok());
        let err = validate_mobile_no("12a34").unwrap_err();
        assert_eq!(err.code, "numeric");
        assert_eq!(validate_mobile_no("").unwrap_err().code, "required");
        assert!(validate_mobile_no("+4412").is_err());
    }

    #[test]
    fn gender_is_case_insensitive() {
        assert!(validate_gender("Male").is_ok());
        assert!(validate_gender("female").is_ok());
        assert!(validate_gender("robot").is_err());
        assert_eq!(validate_gender("").unwrap_err().code, "required");
    }

    #[test]
    fn field_names_are_reported_in_camel_case() {
        assert_eq!(to_camel_case("mobile_no"), "mobileNo");
        assert_eq!(to_camel_case("course"), "course");
    }
}
