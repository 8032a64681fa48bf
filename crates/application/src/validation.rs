use once_cell::sync::Lazy;
use regex::Regex;
use validator::ValidationError;

/// Phone number: digits with optional leading +, spaces, dashes and parentheses
pub static PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9()\-\s]{8,20}$").unwrap());

/// Meeting time in 24h HH:MM
pub static TIME_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap());

pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_phone").with_message("Invalid phone number".into()))
    }
}

pub fn validate_meeting_time(time: &str) -> Result<(), ValidationError> {
    if TIME_REGEX.is_match(time) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_time").with_message("Time must be HH:MM".into()))
    }
}

/// Rejects strings that are empty once trimmed.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new("blank").with_message("Must not be blank".into()))
    } else {
        Ok(())
    }
}

/// Names are stored trimmed, so the two-character minimum applies after trimming.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < 2 {
        Err(ValidationError::new("name_too_short")
            .with_message("Name must have at least 2 characters".into()))
    } else {
        Ok(())
    }
}

/// Trims and drops empty optional strings.
pub fn clean_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_formats() {
        assert!(validate_phone("+55 11 98765-4321").is_ok());
        assert!(validate_phone("(11) 98765-4321").is_ok());
        assert!(validate_phone("1234").is_err());
        assert!(validate_phone("call me").is_err());
    }

    #[test]
    fn test_meeting_time() {
        assert!(validate_meeting_time("19:30").is_ok());
        assert!(validate_meeting_time("24:00").is_err());
        assert!(validate_meeting_time("7:30").is_err());
    }

    #[test]
    fn test_names_are_measured_trimmed() {
        assert!(validate_name("Ana").is_ok());
        assert!(validate_name("  a  ").is_err());
        assert!(validate_name("   ").is_err());
        assert!(validate_not_blank(" x ").is_ok());
        assert!(validate_not_blank(" \t ").is_err());
    }

    #[test]
    fn test_clean_optional() {
        assert_eq!(clean_optional(Some("  ".into())), None);
        assert_eq!(clean_optional(Some(" x ".into())), Some("x".to_string()));
        assert_eq!(clean_optional(None), None);
    }
}
