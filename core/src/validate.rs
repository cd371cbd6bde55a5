//! Profile validation rules.
//!
//! The parser is deliberately permissive: it returns whatever fields it
//! could extract and leaves "is this enough to act on" to the caller. These
//! functions are that caller-side check, applied to the parser's output
//! before a registration or update is accepted.
//!
//! Only fields actually present are validated; absent fields are reported
//! separately by [`missing_profile_fields`].
//!
//! # Examples
//!
//! ```
//! use penzi_sms_core::{CommandKind, ParsedCommand, validate_profile};
//!
//! let cmd = ParsedCommand::new(CommandKind::Register, "REG ...", "0712345678")
//!     .with_parameter("name", "JOHN")
//!     .with_parameter("age", 25)
//!     .with_parameter("gender", "M")
//!     .with_parameter("county", "NAIROBI");
//! assert!(validate_profile(&cmd).is_empty());
//!
//! // Underage and unknown county are both reported
//! let bad = ParsedCommand::new(CommandKind::Register, "REG ...", "0712345678")
//!     .with_parameter("age", 15)
//!     .with_parameter("county", "ATLANTIS");
//! assert_eq!(validate_profile(&bad).len(), 2);
//! ```

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::{ParamValue, ParsedCommand};

/// Counties the service operates in. Matched case-insensitively, with
/// spaces folded to underscores (`"HOMA BAY"` matches `homa_bay`).
pub const VALID_COUNTIES: [&str; 20] = [
    "nairobi",
    "mombasa",
    "kisumu",
    "nakuru",
    "eldoret",
    "thika",
    "malindi",
    "kitale",
    "garissa",
    "kakamega",
    "meru",
    "nyeri",
    "machakos",
    "kericho",
    "embu",
    "migori",
    "homa_bay",
    "turkana",
    "west_pokot",
    "samburu",
];

/// Accepted education levels.
pub const VALID_EDUCATION_LEVELS: [&str; 7] = [
    "primary",
    "secondary",
    "certificate",
    "diploma",
    "bachelor",
    "master",
    "phd",
];

/// Accepted marital statuses.
pub const VALID_MARITAL_STATUSES: [&str; 4] = ["single", "divorced", "widowed", "separated"];

/// Accepted religions.
pub const VALID_RELIGIONS: [&str; 7] = [
    "christian",
    "muslim",
    "hindu",
    "buddhist",
    "traditional",
    "other",
    "none",
];

/// Fields a registration must supply before an account can be created.
pub const REQUIRED_PROFILE_FIELDS: [&str; 5] = ["name", "age", "gender", "county", "town"];

static NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_ ]+$").expect("static regex must compile"));

static PHONE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [r"^\+254[17]\d{8}$", r"^254[17]\d{8}$", r"^0[17]\d{8}$"]
        .iter()
        .map(|pattern| Regex::new(pattern).expect("static regex must compile"))
        .collect()
});

/// Profile validation errors.
///
/// Each variant describes one rule violation. The `Display` impl provides a
/// message suitable for sending back over SMS.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Age outside the service's accepted range.
    #[error("age {0} is out of range (must be 18-100)")]
    AgeOutOfRange(i64),
    /// Gender is not the normalized `M`/`F` the parser produces.
    #[error("gender must be M or F, got: {0}")]
    InvalidGender(String),
    /// Name is empty, too long, or contains unsupported characters.
    #[error("invalid name: {0}")]
    InvalidName(String),
    /// County not in [`VALID_COUNTIES`].
    #[error("unknown county: {0}")]
    UnknownCounty(String),
    /// Town name length outside 2-50 characters.
    #[error("town name must be 2-50 characters: {0}")]
    InvalidTown(String),
    /// Education level not in [`VALID_EDUCATION_LEVELS`].
    #[error("unknown education level: {0}")]
    UnknownEducationLevel(String),
    /// Profession length outside 2-100 characters.
    #[error("profession must be 2-100 characters: {0}")]
    InvalidProfession(String),
    /// Religion not in [`VALID_RELIGIONS`].
    #[error("unknown religion: {0}")]
    UnknownReligion(String),
    /// Marital status not in [`VALID_MARITAL_STATUSES`].
    #[error("unknown marital status: {0}")]
    UnknownMaritalStatus(String),
    /// Not a Kenyan phone number in any accepted format.
    #[error("invalid Kenyan phone number: {0}")]
    InvalidPhoneNumber(String),
    /// A parameter carries the wrong value type for its field.
    #[error("field {field} must be {expected}")]
    WrongFieldType {
        /// The parameter name.
        field: &'static str,
        /// What the rule expects, e.g. `"an integer"`.
        expected: &'static str,
    },
}

/// Validates the profile fields present on a parsed command.
///
/// Checks every field independently and returns all violations, so a user
/// can be told everything wrong with their registration in one reply.
/// Absent fields produce no errors here; use [`missing_profile_fields`] for
/// completeness checks.
///
/// # Examples
///
/// ```
/// use penzi_sms_core::{CommandKind, ParsedCommand, ValidationError, validate_profile};
///
/// let cmd = ParsedCommand::new(CommandKind::Update, "UPDATE ...", "0712345678")
///     .with_parameter("education", "DIPLOMA")
///     .with_parameter("religion", "JEDI");
///
/// let errors = validate_profile(&cmd);
/// assert_eq!(errors, vec![ValidationError::UnknownReligion("JEDI".to_string())]);
/// ```
pub fn validate_profile(command: &ParsedCommand) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if let Some(name) = text_field(command, "name", &mut errors) {
        let length = name.chars().count();
        if !(2..=50).contains(&length) || !NAME_PATTERN.is_match(name) {
            errors.push(ValidationError::InvalidName(name.to_string()));
        }
    }

    match command.parameters.get("age") {
        Some(ParamValue::Int(age)) if !(18..=100).contains(age) => {
            errors.push(ValidationError::AgeOutOfRange(*age));
        }
        Some(ParamValue::Text(_)) => {
            errors.push(ValidationError::WrongFieldType {
                field: "age",
                expected: "an integer",
            });
        }
        _ => {}
    }

    if let Some(gender) = text_field(command, "gender", &mut errors) {
        if gender != "M" && gender != "F" {
            errors.push(ValidationError::InvalidGender(gender.to_string()));
        }
    }

    if let Some(county) = text_field(command, "county", &mut errors) {
        let canonical = county.to_lowercase().replace(' ', "_");
        if !VALID_COUNTIES.contains(&canonical.as_str()) {
            errors.push(ValidationError::UnknownCounty(county.to_string()));
        }
    }

    if let Some(town) = text_field(command, "town", &mut errors) {
        let length = town.chars().count();
        if !(2..=50).contains(&length) {
            errors.push(ValidationError::InvalidTown(town.to_string()));
        }
    }

    if let Some(level) = text_field(command, "education", &mut errors) {
        if !VALID_EDUCATION_LEVELS.contains(&level.to_lowercase().as_str()) {
            errors.push(ValidationError::UnknownEducationLevel(level.to_string()));
        }
    }

    if let Some(profession) = text_field(command, "profession", &mut errors) {
        let length = profession.chars().count();
        if !(2..=100).contains(&length) {
            errors.push(ValidationError::InvalidProfession(profession.to_string()));
        }
    }

    if let Some(religion) = text_field(command, "religion", &mut errors) {
        if !VALID_RELIGIONS.contains(&religion.to_lowercase().as_str()) {
            errors.push(ValidationError::UnknownReligion(religion.to_string()));
        }
    }

    if let Some(status) = text_field(command, "marital", &mut errors) {
        if !VALID_MARITAL_STATUSES.contains(&status.to_lowercase().as_str()) {
            errors.push(ValidationError::UnknownMaritalStatus(status.to_string()));
        }
    }

    errors
}

/// Returns the required registration fields absent from a parsed command.
///
/// # Examples
///
/// ```
/// use penzi_sms_core::{CommandKind, ParsedCommand, missing_profile_fields};
///
/// let cmd = ParsedCommand::new(CommandKind::Register, "REG NAME:JOHN", "0712345678")
///     .with_parameter("name", "JOHN");
///
/// assert_eq!(missing_profile_fields(&cmd), vec!["age", "gender", "county", "town"]);
/// ```
pub fn missing_profile_fields(command: &ParsedCommand) -> Vec<&'static str> {
    REQUIRED_PROFILE_FIELDS
        .iter()
        .copied()
        .filter(|field| !command.has(field))
        .collect()
}

/// Validates and normalizes a Kenyan phone number.
///
/// Strips everything except digits and `+`, then accepts the
/// `+254 7XX / 1XX`, `254...`, and `07XX / 01XX` formats. Returns the
/// cleaned number.
///
/// # Examples
///
/// ```
/// use penzi_sms_core::validate_phone_number;
///
/// assert_eq!(validate_phone_number("0712 345 678").unwrap(), "0712345678");
/// assert_eq!(validate_phone_number("+254712345678").unwrap(), "+254712345678");
/// assert!(validate_phone_number("12345").is_err());
/// ```
pub fn validate_phone_number(phone: &str) -> Result<String, ValidationError> {
    let clean: String = phone
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '+')
        .collect();

    if PHONE_PATTERNS.iter().any(|pattern| pattern.is_match(&clean)) {
        Ok(clean)
    } else {
        Err(ValidationError::InvalidPhoneNumber(phone.to_string()))
    }
}

fn text_field<'a>(
    command: &'a ParsedCommand,
    field: &'static str,
    errors: &mut Vec<ValidationError>,
) -> Option<&'a str> {
    match command.parameters.get(field) {
        Some(ParamValue::Text(value)) => Some(value),
        Some(ParamValue::Int(_)) => {
            errors.push(ValidationError::WrongFieldType {
                field,
                expected: "text",
            });
            None
        }
        None => None,
    }
}
