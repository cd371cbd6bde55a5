//! Core types and profile validation for the Penzi SMS command channel.
//!
//! This crate defines the data model shared by the SMS parser and its
//! consumers:
//!
//! - [`ParsedCommand`] — one inbound message classified and reduced to a
//!   command kind plus typed parameters.
//! - [`CommandKind`] — the closed set of command families, with `Unknown`
//!   as the never-fail fallback.
//! - [`ParamValue`] — an extracted parameter, integer or text.
//! - [`InboundMessage`] — the gateway's wire envelope (both field
//!   spellings accepted).
//!
//! Validation ([`validate_profile`], [`missing_profile_fields`],
//! [`validate_phone_number`]) applies the service's registration rules to a
//! parsed command. The parser itself never rejects anything; these checks
//! are the caller-side gate.
//!
//! # Example
//!
//! ```
//! use penzi_sms_core::*;
//!
//! let cmd = ParsedCommand::new(CommandKind::Register, "REG NAME:JO AGE:25", "0712345678")
//!     .with_parameter("name", "JO")
//!     .with_parameter("age", 25);
//!
//! assert!(cmd.is_recognized());
//! assert!(validate_profile(&cmd).is_empty());
//! assert_eq!(missing_profile_fields(&cmd), vec!["gender", "county", "town"]);
//! ```

mod types;
mod validate;

pub use types::*;
pub use validate::{
    REQUIRED_PROFILE_FIELDS, VALID_COUNTIES, VALID_EDUCATION_LEVELS, VALID_MARITAL_STATUSES,
    VALID_RELIGIONS, ValidationError, missing_profile_fields, validate_phone_number,
    validate_profile,
};
