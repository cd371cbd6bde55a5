//! Inbound SMS command parsing for the Penzi dating service.
//!
//! This crate turns raw SMS text (`"REG NAME:MARY, AGE:23..."`) into a
//! structured [`ParsedCommand`]. It recognizes the full Penzi command set
//! (registration, profile updates, search, matching, messaging, and the
//! keyword commands) and never fails: a message no grammar claims comes
//! back as an `UNKNOWN` command carrying a diagnostic parameter.
//!
//! # Main entry points
//!
//! - [`parse_sms`] — parse one message into a [`ParsedCommand`].
//! - [`parse_sms_with_trace`] — same, but also returns a [`ParseTrace`]
//!   recording which grammars were tried and which fields were dropped.
//! - [`parse_batch`] — parse many messages in parallel, order preserved.
//!
//! # Example
//!
//! ```
//! use penzi_sms_parser::parse_sms;
//! use penzi_sms_core::CommandKind;
//!
//! let command = parse_sms("reg name:Mary, age:23, gender:F, county:Nairobi", "0712345678");
//! assert_eq!(command.kind, CommandKind::Register);
//! assert_eq!(command.text("name"), Some("MARY"));
//! assert_eq!(command.int("age"), Some(23));
//! assert_eq!(command.raw_text, "reg name:Mary, age:23, gender:F, county:Nairobi");
//! ```
//!
//! # Crate type
//!
//! This is a **library-only crate** with no binary targets. For CLI usage, use
//! the `penzi-sms-cli` crate which provides the `penzi-sms` binary.
//!
//! [`ParsedCommand`]: penzi_sms_core::ParsedCommand

pub mod batch;
pub mod help;
pub mod output;
pub mod parser;
pub mod report;
pub mod trace;

use penzi_sms_core::ParsedCommand;

pub use batch::parse_batch;
pub use help::HELP_TEXT;
pub use trace::{ParseRun, ParseTrace};

use parser::SmsParser;

/// Parses one inbound SMS message into a structured command.
///
/// This is the primary entry point. Pass the message body and the sender's
/// phone number; the returned [`ParsedCommand`] always carries the original
/// text verbatim in `raw_text` and the sender in `sender_id`. Parsing never
/// fails: unrecognized input yields an `UNKNOWN` command with a single
/// `error` parameter.
///
/// # Examples
///
/// ```
/// use penzi_sms_parser::parse_sms;
/// use penzi_sms_core::CommandKind;
///
/// let command = parse_sms("ACCEPT 456", "0712345678");
/// assert_eq!(command.kind, CommandKind::Accept);
/// assert_eq!(command.int("match_id"), Some(456));
///
/// let unknown = parse_sms("xyzzy", "0712345678");
/// assert_eq!(unknown.kind, CommandKind::Unknown);
/// assert_eq!(unknown.text("error"), Some("Unknown command format"));
/// ```
pub fn parse_sms(message: &str, sender: &str) -> ParsedCommand {
    let mut parser = SmsParser::new(message, sender);
    parser.parse()
}

/// Parses one inbound SMS message and returns the command with its trace.
///
/// Like [`parse_sms`], but additionally produces a [`ParseTrace`] recording
/// the normalized text, every grammar attempted in priority order, and the
/// fields dropped during extraction. Intended for debugging gateway traffic
/// and for surfacing why a message came back `UNKNOWN`.
///
/// # Examples
///
/// ```
/// use penzi_sms_parser::parse_sms_with_trace;
///
/// let run = parse_sms_with_trace("REG NAME:JOHN, AGE:THIRTY", "0712345678");
/// assert_eq!(run.trace.normalized_text, "REG NAME:JOHN, AGE:THIRTY");
/// assert_eq!(run.trace.dropped_fields.len(), 1);
/// assert_eq!(run.trace.dropped_fields[0].field, "age");
/// ```
pub fn parse_sms_with_trace(message: &str, sender: &str) -> ParseRun {
    let mut parser = SmsParser::new(message, sender);
    let command = parser.parse();
    ParseRun {
        command,
        trace: parser.into_trace(),
    }
}
