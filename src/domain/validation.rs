use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateLength, ValidationError};

use crate::{
    constants::{
        MAX_DATE_CHARS, MAX_EMAIL_CHARS, MAX_MESSAGE_CHARS, MAX_NAME_CHARS, MAX_PHONE_CHARS,
        MAX_SERVICE_CHARS,
    },
    entities::booking::{BookingForm, BookingRequest, FormField},
};

static EMAIL_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

fn rule_error(code: &'static str, message: String) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(message.into());
    error
}

fn required(field: &FormField, label: &str, max: u64) -> Result<String, ValidationError> {
    let value = field
        .trimmed()
        .ok_or_else(|| rule_error("required", format!("{} is required", label)))?;

    if !value.validate_length(None, Some(max), None) {
        return Err(rule_error(
            "length",
            format!("{} must be at most {} characters", label, max),
        ));
    }

    Ok(value.to_string())
}

// Optional fields are checked as sent. Only an empty string counts as absent.
fn optional(field: &FormField, label: &str, max: u64) -> Result<Option<String>, ValidationError> {
    if field.is_mistyped() {
        return Err(rule_error("type", format!("{} must be text", label)));
    }

    match field.raw() {
        Some(value) if !value.validate_length(None, Some(max), None) => Err(rule_error(
            "length",
            format!("{} must be at most {} characters", label, max),
        )),
        value => Ok(value.map(str::to_string)),
    }
}

fn optional_email(field: &FormField) -> Result<Option<String>, ValidationError> {
    let invalid = || rule_error("email", "Invalid email address".to_string());

    if field.is_mistyped() {
        return Err(invalid());
    }

    match field.raw() {
        Some(value)
            if !EMAIL_SHAPE.is_match(value)
                || !value.validate_length(None, Some(MAX_EMAIL_CHARS), None) =>
        {
            Err(invalid())
        }
        value => Ok(value.map(str::to_string)),
    }
}

/// Checks the form rule by rule and stops at the first failure.
pub fn validate_booking(form: &BookingForm) -> Result<BookingRequest, ValidationError> {
    let name = required(&form.name, "Name", MAX_NAME_CHARS)?;
    let phone = required(&form.phone, "Phone", MAX_PHONE_CHARS)?;
    let service = required(&form.service, "Service", MAX_SERVICE_CHARS)?;
    let email = optional_email(&form.email)?;
    let message = optional(&form.message, "Message", MAX_MESSAGE_CHARS)?;
    let date = optional(&form.date, "Date", MAX_DATE_CHARS)?;

    Ok(BookingRequest {
        name,
        phone,
        service,
        email,
        date,
        message,
        urgent: form.urgent,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(result: Result<BookingRequest, ValidationError>) -> String {
        result
            .unwrap_err()
            .message
            .map(|m| m.to_string())
            .unwrap_or_default()
    }

    fn valid_form() -> BookingForm {
        BookingForm {
            name: "Jean".into(),
            phone: "+41791234567".into(),
            service: "Plumbing".into(),
            ..BookingForm::default()
        }
    }

    #[test]
    fn accepts_minimal_form() {
        let booking = validate_booking(&valid_form()).unwrap();
        assert_eq!(booking.name, "Jean");
        assert_eq!(booking.email, None);
        assert!(!booking.urgent);
    }

    #[test]
    fn required_fields_report_in_order() {
        let empty = BookingForm::default();
        assert_eq!(message_of(validate_booking(&empty)), "Name is required");

        let no_phone = BookingForm { phone: FormField::Absent, ..valid_form() };
        assert_eq!(message_of(validate_booking(&no_phone)), "Phone is required");

        let blank_service = BookingForm { service: "   ".into(), ..valid_form() };
        assert_eq!(message_of(validate_booking(&blank_service)), "Service is required");
    }

    #[test]
    fn mistyped_required_field_counts_as_missing() {
        let form = BookingForm { name: FormField::Mistyped, ..valid_form() };
        assert_eq!(message_of(validate_booking(&form)), "Name is required");
    }

    #[test]
    fn first_failure_wins() {
        let form = BookingForm {
            name: FormField::Absent,
            phone: FormField::Absent,
            email: "broken".into(),
            ..valid_form()
        };
        assert_eq!(message_of(validate_booking(&form)), "Name is required");
    }

    #[test]
    fn length_limits_count_characters() {
        let at_limit = BookingForm { phone: "ж".repeat(30).as_str().into(), ..valid_form() };
        assert!(validate_booking(&at_limit).is_ok());

        let over = BookingForm { phone: "1".repeat(31).as_str().into(), ..valid_form() };
        assert_eq!(
            message_of(validate_booking(&over)),
            "Phone must be at most 30 characters"
        );

        let long_name = BookingForm { name: "a".repeat(101).as_str().into(), ..valid_form() };
        assert_eq!(
            message_of(validate_booking(&long_name)),
            "Name must be at most 100 characters"
        );
    }

    #[test]
    fn email_shape_is_checked_only_when_present() {
        for bad in ["plain", "a@b", "a b@c.d", "@c.d"] {
            let form = BookingForm { email: bad.into(), ..valid_form() };
            assert_eq!(message_of(validate_booking(&form)), "Invalid email address", "{bad}");
        }

        let good = BookingForm { email: "jean@example.ch".into(), ..valid_form() };
        assert_eq!(
            validate_booking(&good).unwrap().email.as_deref(),
            Some("jean@example.ch")
        );

        let empty = BookingForm { email: "".into(), ..valid_form() };
        assert_eq!(validate_booking(&empty).unwrap().email, None);
    }

    #[test]
    fn optional_fields_are_checked_untrimmed() {
        for padded in ["   ", " jean@example.ch", "jean@example.ch\n"] {
            let form = BookingForm { email: padded.into(), ..valid_form() };
            assert_eq!(message_of(validate_booking(&form)), "Invalid email address", "{padded:?}");
        }

        let trailing = format!("{}\n\n", "m".repeat(2000));
        let form = BookingForm { message: trailing.as_str().into(), ..valid_form() };
        assert_eq!(
            message_of(validate_booking(&form)),
            "Message must be at most 2000 characters"
        );

        let form = BookingForm { date: format!("{} ", "d".repeat(50)).as_str().into(), ..valid_form() };
        assert_eq!(message_of(validate_booking(&form)), "Date must be at most 50 characters");
    }

    #[test]
    fn overlong_email_is_rejected() {
        let local = "a".repeat(250);
        let form = BookingForm { email: format!("{local}@example.com").as_str().into(), ..valid_form() };
        assert_eq!(message_of(validate_booking(&form)), "Invalid email address");
    }

    #[test]
    fn mistyped_optional_fields_are_rejected() {
        let form = BookingForm { message: FormField::Mistyped, ..valid_form() };
        assert_eq!(message_of(validate_booking(&form)), "Message must be text");

        let form = BookingForm { email: FormField::Mistyped, ..valid_form() };
        assert_eq!(message_of(validate_booking(&form)), "Invalid email address");
    }

    #[test]
    fn message_checked_before_date() {
        let form = BookingForm {
            message: "m".repeat(2001).as_str().into(),
            date: "d".repeat(51).as_str().into(),
            ..valid_form()
        };
        assert_eq!(
            message_of(validate_booking(&form)),
            "Message must be at most 2000 characters"
        );

        let form = BookingForm { date: "d".repeat(51).as_str().into(), ..valid_form() };
        assert_eq!(message_of(validate_booking(&form)), "Date must be at most 50 characters");
    }
}
