//! Inbound SMS command parser.
//!
//! This module turns free-text SMS bodies into structured commands. The
//! pipeline has three stages:
//!
//! 1. **Normalize** — fold line endings, trim, uppercase.
//! 2. **Classify** — try each command grammar in a fixed priority order and
//!    stop at the first match.
//! 3. **Extract** — pull typed parameters out of the winning grammar's
//!    payload captures.
//!
//! Parsing never fails: a message no grammar recognizes becomes an
//! [`Unknown`](penzi_sms_core::CommandKind::Unknown) command carrying a
//! single diagnostic parameter, and a field whose value refuses type
//! coercion is dropped while the rest of the command goes through. SMS is a
//! typo-prone channel; a best-effort partial parse beats rejecting the
//! whole message.
//!
//! The primary entry point is [`SmsParser::new`] followed by
//! [`SmsParser::parse`], but most consumers should use the higher-level
//! [`parse_sms`](crate::parse_sms) function instead.

mod classify;
mod extract;
mod normalize;

use penzi_sms_core::ParsedCommand;
use tracing::debug;

use crate::trace::{GrammarAttempt, ParseTrace};

/// Parser for a single inbound SMS message.
pub struct SmsParser {
    sender: String,
    raw_text: String,
    trace: ParseTrace,
}

impl SmsParser {
    /// Creates a parser for the given message body and sender identifier.
    pub fn new(message: &str, sender: &str) -> Self {
        Self {
            sender: sender.to_string(),
            raw_text: message.to_string(),
            trace: ParseTrace::default(),
        }
    }

    /// Parses the message into a command.
    ///
    /// Always produces a command; an unrecognized message comes back as
    /// [`Unknown`](penzi_sms_core::CommandKind::Unknown) with a diagnostic
    /// parameter. The trace of this run is available through
    /// [`SmsParser::into_trace`] afterwards.
    pub fn parse(&mut self) -> ParsedCommand {
        let normalized = normalize::normalize_message(&self.raw_text);
        debug!(sender = %self.sender, normalized = %normalized, "Parsing inbound message");
        self.trace.normalized_text = normalized.clone();

        let Some(matched) = classify::classify(&normalized) else {
            self.trace.attempts = classify::GRAMMAR_TABLE
                .iter()
                .map(|grammar| GrammarAttempt {
                    kind: grammar.kind,
                    matched: false,
                })
                .collect();
            debug!(sender = %self.sender, "No grammar matched");
            return ParsedCommand::unrecognized(&self.raw_text, &self.sender);
        };

        self.trace.attempts = classify::GRAMMAR_TABLE
            .iter()
            .take(matched.grammars_tried)
            .enumerate()
            .map(|(index, grammar)| GrammarAttempt {
                kind: grammar.kind,
                matched: index + 1 == matched.grammars_tried,
            })
            .collect();
        debug!(kind = %matched.kind, grammars_tried = matched.grammars_tried, "Classified message");

        let extraction =
            extract::extract(matched.kind, &matched.captures, &self.raw_text, &self.sender);
        self.trace.extracted_fields = extraction.command.parameters.keys().cloned().collect();
        self.trace.dropped_fields = extraction.dropped;

        extraction.command
    }

    /// Consumes the parser and returns the trace of the last [`parse`] call.
    ///
    /// [`parse`]: SmsParser::parse
    pub fn into_trace(self) -> ParseTrace {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use penzi_sms_core::CommandKind;

    use super::*;

    fn parse(message: &str) -> (ParsedCommand, ParseTrace) {
        let mut parser = SmsParser::new(message, "0712345678");
        let command = parser.parse();
        (command, parser.into_trace())
    }

    #[test]
    fn test_parse_keeps_raw_text_verbatim() {
        let (command, trace) = parse("  reg name:John  ");
        assert_eq!(command.kind, CommandKind::Register);
        assert_eq!(command.raw_text, "  reg name:John  ");
        assert_eq!(trace.normalized_text, "REG NAME:JOHN");
    }

    #[test]
    fn test_trace_records_attempts_up_to_the_winner() {
        let (_, trace) = parse("ACCEPT 456");
        assert_eq!(trace.matched_kind(), Some(CommandKind::Accept));
        // REGISTER..ACCEPT is six grammars; only the last one matched.
        assert_eq!(trace.attempts.len(), 6);
        assert_eq!(trace.attempts.iter().filter(|a| a.matched).count(), 1);
    }

    #[test]
    fn test_unrecognized_message_tries_every_grammar() {
        let (command, trace) = parse("XYZZY");
        assert_eq!(command.kind, CommandKind::Unknown);
        assert_eq!(trace.attempts.len(), 14);
        assert!(trace.attempts.iter().all(|a| !a.matched));
        assert_eq!(trace.matched_kind(), None);
    }

    #[test]
    fn test_trace_lists_extracted_and_dropped_fields() {
        let (command, trace) = parse("REG NAME:JOHN, AGE:THIRTY");
        assert_eq!(command.kind, CommandKind::Register);
        assert_eq!(trace.extracted_fields, vec!["name"]);
        assert_eq!(trace.dropped_fields.len(), 1);
        assert_eq!(trace.dropped_fields[0].field, "age");
    }

    #[test]
    fn test_empty_message_is_unrecognized() {
        let (command, _) = parse("");
        assert_eq!(command.kind, CommandKind::Unknown);
        assert_eq!(command.parameters.len(), 1);
    }
}
