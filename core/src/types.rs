//! Core data model for parsed SMS commands.
//!
//! This module defines the types produced by the SMS parser. The types are
//! designed for serialization with [`serde`] so a parsed command can travel
//! through JSON APIs and logs unchanged.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Diagnostic text stored under the `error` parameter when no command
/// grammar matches an inbound message.
pub const UNRECOGNIZED_DIAGNOSTIC: &str = "Unknown command format";

/// The command family an SMS message was classified into.
///
/// Serializes as the uppercase command tag (`"REGISTER"`, `"ACCEPT"`, ...),
/// matching the wire form used by the service's logs and APIs. The
/// [`Display`](fmt::Display) impl produces the same tag.
///
/// # Examples
///
/// ```
/// use penzi_sms_core::CommandKind;
///
/// assert_eq!(CommandKind::Register.to_string(), "REGISTER");
/// assert_eq!(CommandKind::default(), CommandKind::Unknown);
/// assert!(CommandKind::Accept.is_recognized());
/// assert!(!CommandKind::Unknown.is_recognized());
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandKind {
    /// Create a profile (`REG` / `REGISTER`).
    Register,
    /// Change profile fields (`UPDATE` / `EDIT`).
    Update,
    /// View a profile (`PROFILE` / `PROF`), own or by user id.
    Profile,
    /// Search profiles by criteria (`SEARCH` / `FIND`).
    Search,
    /// Request matches (`MATCH` / `M`), optionally targeting a user id.
    Match,
    /// Accept a proposed match (`ACCEPT` / `YES` / `Y`).
    Accept,
    /// Reject a proposed match (`REJECT` / `NO` / `N`).
    Reject,
    /// Send a message to a user (`MSG` / `MESSAGE`).
    Message,
    /// Reply to a received message (`REPLY` / `R`).
    Reply,
    /// Request the command reference (`HELP` / `H` / `?`).
    Help,
    /// Unsubscribe (`STOP` / `QUIT` / `EXIT`).
    Stop,
    /// Check account status (`STATUS` / `STAT`).
    Status,
    /// Return to the main menu (`MENU` / `MAIN`).
    Menu,
    /// Go back one menu level (`BACK` / `B`).
    Back,
    /// No grammar matched (the default).
    #[default]
    Unknown,
}

impl CommandKind {
    /// All kinds in classification priority order, `Unknown` last.
    pub const ALL: [CommandKind; 15] = [
        CommandKind::Register,
        CommandKind::Update,
        CommandKind::Profile,
        CommandKind::Search,
        CommandKind::Match,
        CommandKind::Accept,
        CommandKind::Reject,
        CommandKind::Message,
        CommandKind::Reply,
        CommandKind::Help,
        CommandKind::Stop,
        CommandKind::Status,
        CommandKind::Menu,
        CommandKind::Back,
        CommandKind::Unknown,
    ];

    /// Returns the uppercase command tag (the serde form).
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandKind::Register => "REGISTER",
            CommandKind::Update => "UPDATE",
            CommandKind::Profile => "PROFILE",
            CommandKind::Search => "SEARCH",
            CommandKind::Match => "MATCH",
            CommandKind::Accept => "ACCEPT",
            CommandKind::Reject => "REJECT",
            CommandKind::Message => "MESSAGE",
            CommandKind::Reply => "REPLY",
            CommandKind::Help => "HELP",
            CommandKind::Stop => "STOP",
            CommandKind::Status => "STATUS",
            CommandKind::Menu => "MENU",
            CommandKind::Back => "BACK",
            CommandKind::Unknown => "UNKNOWN",
        }
    }

    /// Whether a grammar matched (everything except [`Unknown`](Self::Unknown)).
    pub fn is_recognized(&self) -> bool {
        *self != CommandKind::Unknown
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single extracted parameter value.
///
/// Parameters are either integers (ids, ages) or free text. Serializes
/// untagged, so JSON output shows bare numbers and strings:
/// `{"age": 25, "county": "NAIROBI"}`.
///
/// # Examples
///
/// ```
/// use penzi_sms_core::ParamValue;
///
/// let age = ParamValue::from(25);
/// assert_eq!(age.as_int(), Some(25));
/// assert_eq!(age.as_text(), None);
///
/// let county = ParamValue::from("NAIROBI");
/// assert_eq!(county.as_text(), Some("NAIROBI"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Integer value (recipient ids, match ids, ages, age bounds).
    Int(i64),
    /// Text value, uppercased by message normalization.
    Text(String),
}

impl ParamValue {
    /// Returns the integer value, or `None` for text.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Text(_) => None,
        }
    }

    /// Returns the text value, or `None` for integers.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            ParamValue::Int(_) => None,
            ParamValue::Text(s) => Some(s),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Int(n) => write!(f, "{n}"),
            ParamValue::Text(s) => f.write_str(s),
        }
    }
}

impl From<i64> for ParamValue {
    fn from(n: i64) -> Self {
        ParamValue::Int(n)
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

/// A structured command parsed from one inbound SMS message.
///
/// This is the primary type in the crate. Construction never fails: a
/// message no grammar matched becomes an [`unrecognized`](Self::unrecognized)
/// command rather than an error, and fields whose values failed type
/// coercion are simply absent from `parameters`.
///
/// # Examples
///
/// ```
/// use penzi_sms_core::{CommandKind, ParsedCommand};
///
/// let cmd = ParsedCommand::new(CommandKind::Accept, "accept 456", "+254712345678")
///     .with_parameter("match_id", 456);
///
/// assert_eq!(cmd.kind, CommandKind::Accept);
/// assert_eq!(cmd.int("match_id"), Some(456));
/// assert_eq!(cmd.raw_text, "accept 456");
/// assert!(cmd.is_recognized());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// The command family a grammar matched.
    pub kind: CommandKind,
    /// Extracted fields; keys unique, absent fields omitted entirely.
    pub parameters: BTreeMap<String, ParamValue>,
    /// The message content as received, verbatim.
    pub raw_text: String,
    /// Originating party, passed through unmodified.
    pub sender_id: String,
}

impl ParsedCommand {
    /// Creates a command with no parameters.
    pub fn new(kind: CommandKind, raw_text: &str, sender_id: &str) -> Self {
        Self {
            kind,
            parameters: BTreeMap::new(),
            raw_text: raw_text.to_string(),
            sender_id: sender_id.to_string(),
        }
    }

    /// Creates the fallback command for a message no grammar matched.
    ///
    /// Its parameters hold exactly one diagnostic entry.
    ///
    /// # Examples
    ///
    /// ```
    /// use penzi_sms_core::{CommandKind, ParsedCommand, UNRECOGNIZED_DIAGNOSTIC};
    ///
    /// let cmd = ParsedCommand::unrecognized("xyzzy", "+254712345678");
    /// assert_eq!(cmd.kind, CommandKind::Unknown);
    /// assert_eq!(cmd.parameters.len(), 1);
    /// assert_eq!(cmd.text("error"), Some(UNRECOGNIZED_DIAGNOSTIC));
    /// ```
    pub fn unrecognized(raw_text: &str, sender_id: &str) -> Self {
        Self::new(CommandKind::Unknown, raw_text, sender_id)
            .with_parameter("error", UNRECOGNIZED_DIAGNOSTIC)
    }

    /// Adds a parameter.
    pub fn with_parameter(mut self, name: &str, value: impl Into<ParamValue>) -> Self {
        self.parameters.insert(name.to_string(), value.into());
        self
    }

    /// Returns an integer parameter, or `None` if absent or text.
    pub fn int(&self, name: &str) -> Option<i64> {
        self.parameters.get(name).and_then(ParamValue::as_int)
    }

    /// Returns a text parameter, or `None` if absent or integer.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.parameters.get(name).and_then(ParamValue::as_text)
    }

    /// Whether a parameter is present.
    pub fn has(&self, name: &str) -> bool {
        self.parameters.contains_key(name)
    }

    /// Whether a grammar matched this message.
    pub fn is_recognized(&self) -> bool {
        self.kind.is_recognized()
    }
}

/// One inbound SMS as delivered by the gateway.
///
/// Accepts both field spellings seen on the wire: `sender`/`from_number`
/// and `message`/`message_content`.
///
/// # Examples
///
/// ```
/// use penzi_sms_core::InboundMessage;
///
/// let a: InboundMessage =
///     serde_json::from_str(r#"{"sender": "0712345678", "message": "HELP"}"#).unwrap();
/// let b: InboundMessage =
///     serde_json::from_str(r#"{"from_number": "0712345678", "message_content": "HELP"}"#)
///         .unwrap();
/// assert_eq!(a, b);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Sender identifier, usually a phone number.
    #[serde(alias = "from_number")]
    pub sender: String,
    /// The message body.
    #[serde(alias = "message_content")]
    pub message: String,
}

impl InboundMessage {
    /// Creates an inbound message.
    pub fn new(sender: &str, message: &str) -> Self {
        Self {
            sender: sender.to_string(),
            message: message.to_string(),
        }
    }
}
