//! Per-command parameter extraction.
//!
//! Once a grammar has matched, the payload captures still have to become
//! typed parameters. Keyword commands carry their ids directly in the
//! grammar captures; label commands (`REG`, `UPDATE`, `SEARCH`) get a second
//! regex pass over the payload body, one unanchored search per known label.
//!
//! Extraction never fails. A label whose value refuses coercion is dropped
//! from the parameters and noted for the parse trace; everything that did
//! parse is kept.

use std::sync::LazyLock;

use penzi_sms_core::{CommandKind, ParamValue, ParsedCommand};
use regex::{Captures, Regex};
use tracing::debug;

use crate::trace::DroppedField;

/// How a captured label value becomes a parameter value.
#[derive(Clone, Copy)]
enum Coercion {
    /// Keep the trimmed capture as text.
    Text,
    /// Parse the capture as an integer.
    Integer,
    /// Fold `M`/`MALE` to `"M"`, anything else the pattern admits to `"F"`.
    Gender,
}

struct FieldPattern {
    name: &'static str,
    coerce: Coercion,
    pattern: Regex,
    /// Looser pattern used only to notice values the strict pattern refused,
    /// so the parse trace can say why a typed label went missing.
    probe: Option<Regex>,
}

impl FieldPattern {
    fn new(
        name: &'static str,
        coerce: Coercion,
        pattern: &str,
        probe: Option<&str>,
    ) -> Self {
        Self {
            name,
            coerce,
            pattern: Regex::new(pattern).expect("static regex must compile"),
            probe: probe.map(|p| Regex::new(p).expect("static regex must compile")),
        }
    }
}

const LOOSE_AGE: &str = r"AGE[:\s]+([^,\n]+)";
const LOOSE_GENDER: &str = r"GENDER[:\s]+([^,\n]+)";

/// Label patterns shared by registration and profile-update payloads.
// SAFETY: These regexes are compile-time constants and are validated by tests.
static PROFILE_FIELD_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new("name", Coercion::Text, r"NAME[:\s]+([^,\n]+)", None),
        FieldPattern::new("age", Coercion::Integer, r"AGE[:\s]+(\d+)", Some(LOOSE_AGE)),
        FieldPattern::new(
            "gender",
            Coercion::Gender,
            r"GENDER[:\s]+(M|F|MALE|FEMALE)",
            Some(LOOSE_GENDER),
        ),
        FieldPattern::new("county", Coercion::Text, r"COUNTY[:\s]+([^,\n]+)", None),
        FieldPattern::new("town", Coercion::Text, r"TOWN[:\s]+([^,\n]+)", None),
        FieldPattern::new("education", Coercion::Text, r"EDUCATION[:\s]+([^,\n]+)", None),
        FieldPattern::new(
            "profession",
            Coercion::Text,
            r"PROFESSION[:\s]+([^,\n]+)",
            None,
        ),
        FieldPattern::new("religion", Coercion::Text, r"RELIGION[:\s]+([^,\n]+)", None),
        FieldPattern::new("marital", Coercion::Text, r"MARITAL[:\s]+([^,\n]+)", None),
    ]
});

/// Label patterns for search criteria. The age range is handled separately
/// because it expands into two parameters.
static SEARCH_FIELD_PATTERNS: LazyLock<Vec<FieldPattern>> = LazyLock::new(|| {
    vec![
        FieldPattern::new(
            "gender",
            Coercion::Gender,
            r"GENDER[:\s]+(M|F|MALE|FEMALE)",
            Some(LOOSE_GENDER),
        ),
        FieldPattern::new("county", Coercion::Text, r"COUNTY[:\s]+([^,\n]+)", None),
        FieldPattern::new("town", Coercion::Text, r"TOWN[:\s]+([^,\n]+)", None),
        FieldPattern::new("education", Coercion::Text, r"EDUCATION[:\s]+([^,\n]+)", None),
        FieldPattern::new(
            "profession",
            Coercion::Text,
            r"PROFESSION[:\s]+([^,\n]+)",
            None,
        ),
        FieldPattern::new("religion", Coercion::Text, r"RELIGION[:\s]+([^,\n]+)", None),
    ]
});

static AGE_RANGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"AGE[:\s]+(\d+)-(\d+)").expect("static regex must compile"));

static LOOSE_AGE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(LOOSE_AGE).expect("static regex must compile"));

/// Parameters extracted for one command, plus any fields dropped on the way.
pub(crate) struct Extraction {
    pub command: ParsedCommand,
    pub dropped: Vec<DroppedField>,
}

/// Builds the parsed command for a successful grammar match.
///
/// `captures` are the winning grammar's captures against the normalized
/// message, so every extracted value is uppercased. `raw_text` is the
/// message as received and is stored verbatim.
pub(crate) fn extract(
    kind: CommandKind,
    captures: &Captures<'_>,
    raw_text: &str,
    sender: &str,
) -> Extraction {
    let mut extraction = Extraction {
        command: ParsedCommand::new(kind, raw_text, sender),
        dropped: Vec::new(),
    };

    match kind {
        CommandKind::Register | CommandKind::Update => {
            extraction.labeled_fields(&captures[1], &PROFILE_FIELD_PATTERNS);
        }
        CommandKind::Search => {
            let body = &captures[1];
            extraction.age_range(body);
            extraction.labeled_fields(body, &SEARCH_FIELD_PATTERNS);
        }
        CommandKind::Message => {
            extraction.integer("recipient_id", &captures[1]);
            extraction.text("message_text", &captures[2]);
        }
        CommandKind::Reply => {
            extraction.integer("message_id", &captures[1]);
            extraction.text("reply_text", &captures[2]);
        }
        CommandKind::Accept | CommandKind::Reject => {
            extraction.integer("match_id", &captures[1]);
        }
        CommandKind::Profile => {
            if let Some(id) = captures.get(1) {
                extraction.integer("user_id", id.as_str());
            }
        }
        CommandKind::Match => {
            if let Some(id) = captures.get(1) {
                extraction.integer("target_user_id", id.as_str());
            }
        }
        CommandKind::Help
        | CommandKind::Stop
        | CommandKind::Status
        | CommandKind::Menu
        | CommandKind::Back
        | CommandKind::Unknown => {}
    }

    extraction
}

impl Extraction {
    /// Runs each label pattern over the payload body. Patterns are unanchored
    /// searches, so labels may appear in any order; the first occurrence of a
    /// label wins.
    fn labeled_fields(&mut self, body: &str, patterns: &[FieldPattern]) {
        for field in patterns {
            let Some(captures) = field.pattern.captures(body) else {
                self.probe_refused(field, body);
                continue;
            };
            let value = captures[1].trim();
            match field.coerce {
                Coercion::Text => self.text(field.name, value),
                Coercion::Integer => self.integer(field.name, value),
                Coercion::Gender => {
                    let folded = if value == "M" || value == "MALE" { "M" } else { "F" };
                    self.text(field.name, folded);
                }
            }
        }
    }

    /// Expands `AGE:20-30` into `min_age` and `max_age`.
    fn age_range(&mut self, body: &str) {
        if let Some(captures) = AGE_RANGE_PATTERN.captures(body) {
            self.integer("min_age", &captures[1]);
            self.integer("max_age", &captures[2]);
        } else if let Some(refused) = LOOSE_AGE_PATTERN.captures(body) {
            self.drop_field("age", refused[1].trim(), "not an age range like 20-30");
        }
    }

    fn probe_refused(&mut self, field: &FieldPattern, body: &str) {
        let Some(probe) = &field.probe else {
            return;
        };
        if let Some(refused) = probe.captures(body) {
            let reason = match field.coerce {
                Coercion::Integer => "not a whole number",
                Coercion::Gender => "not one of M, F, MALE, FEMALE",
                Coercion::Text => return,
            };
            self.drop_field(field.name, refused[1].trim(), reason);
        }
    }

    fn text(&mut self, name: &str, value: &str) {
        self.command
            .parameters
            .insert(name.to_string(), ParamValue::from(value));
    }

    fn integer(&mut self, name: &str, digits: &str) {
        match digits.parse::<i64>() {
            Ok(value) => {
                self.command
                    .parameters
                    .insert(name.to_string(), ParamValue::Int(value));
            }
            Err(_) => self.drop_field(name, digits, "number too large"),
        }
    }

    fn drop_field(&mut self, field: &str, value: &str, reason: &'static str) {
        debug!(field, value, reason, "Dropping field");
        self.dropped.push(DroppedField {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::classify::classify;

    fn extract_message(message: &str) -> Extraction {
        let m = classify(message).expect("message should classify");
        extract(m.kind, &m.captures, message, "0712345678")
    }

    #[test]
    fn test_registration_fields_in_any_order() {
        let e = extract_message("REG AGE:25, NAME:JOHN, GENDER:M, COUNTY:NAIROBI");
        assert_eq!(e.command.int("age"), Some(25));
        assert_eq!(e.command.text("name"), Some("JOHN"));
        assert_eq!(e.command.text("gender"), Some("M"));
        assert_eq!(e.command.text("county"), Some("NAIROBI"));
        assert!(e.dropped.is_empty());
    }

    #[test]
    fn test_newlines_separate_fields_like_commas() {
        let e = extract_message("REG NAME:JOHN\nAGE:25\nTOWN:WESTLANDS");
        assert_eq!(e.command.text("name"), Some("JOHN"));
        assert_eq!(e.command.int("age"), Some(25));
        assert_eq!(e.command.text("town"), Some("WESTLANDS"));
    }

    #[test]
    fn test_values_are_trimmed() {
        let e = extract_message("REG NAME: JOHN DOE , COUNTY: NAIROBI");
        assert_eq!(e.command.text("name"), Some("JOHN DOE"));
        assert_eq!(e.command.text("county"), Some("NAIROBI"));
    }

    #[test]
    fn test_text_values_run_to_the_next_comma() {
        // Space-separated labels are not delimiters; the name swallows them.
        let e = extract_message("REG NAME:JOHN AGE:25");
        assert_eq!(e.command.text("name"), Some("JOHN AGE:25"));
        assert_eq!(e.command.int("age"), Some(25));
    }

    #[test]
    fn test_first_occurrence_of_a_label_wins() {
        let e = extract_message("REG NAME:JOHN, NAME:JANE");
        assert_eq!(e.command.text("name"), Some("JOHN"));
    }

    #[test]
    fn test_gender_aliases_fold_to_single_letter() {
        for (spelling, folded) in [("M", "M"), ("MALE", "M"), ("F", "F"), ("FEMALE", "F")] {
            let e = extract_message(&format!("REG GENDER:{spelling}"));
            assert_eq!(e.command.text("gender"), Some(folded), "spelling {spelling}");
        }
    }

    #[test]
    fn test_non_numeric_age_is_dropped_with_a_note() {
        let e = extract_message("REG NAME:JOHN, AGE:THIRTY");
        assert_eq!(e.command.text("name"), Some("JOHN"));
        assert!(!e.command.has("age"));
        assert_eq!(e.dropped.len(), 1);
        assert_eq!(e.dropped[0].field, "age");
        assert_eq!(e.dropped[0].value, "THIRTY");
    }

    #[test]
    fn test_unrecognized_gender_is_dropped_with_a_note() {
        let e = extract_message("REG GENDER:UNKNOWN");
        assert!(!e.command.has("gender"));
        assert_eq!(e.dropped.len(), 1);
        assert_eq!(e.dropped[0].field, "gender");
    }

    #[test]
    fn test_search_age_range_expands_to_min_and_max() {
        let e = extract_message("SEARCH AGE:20-30 GENDER:F COUNTY:NAIROBI");
        assert_eq!(e.command.int("min_age"), Some(20));
        assert_eq!(e.command.int("max_age"), Some(30));
        assert_eq!(e.command.text("gender"), Some("F"));
    }

    #[test]
    fn test_search_without_a_dashed_range_drops_age() {
        let e = extract_message("SEARCH AGE:25, COUNTY:NAIROBI");
        assert!(!e.command.has("min_age"));
        assert!(!e.command.has("max_age"));
        assert_eq!(e.command.text("county"), Some("NAIROBI"));
        assert_eq!(e.dropped.len(), 1);
        assert_eq!(e.dropped[0].reason, "not an age range like 20-30");
    }

    #[test]
    fn test_message_splits_recipient_and_text() {
        let e = extract_message("MSG 123 HELLO THERE!");
        assert_eq!(e.command.int("recipient_id"), Some(123));
        assert_eq!(e.command.text("message_text"), Some("HELLO THERE!"));
    }

    #[test]
    fn test_reply_splits_message_id_and_text() {
        let e = extract_message("REPLY 789 THANKS FOR THE MESSAGE");
        assert_eq!(e.command.int("message_id"), Some(789));
        assert_eq!(e.command.text("reply_text"), Some("THANKS FOR THE MESSAGE"));
    }

    #[test]
    fn test_accept_and_reject_extract_match_id() {
        let accept = extract_message("ACCEPT 456");
        assert_eq!(accept.command.int("match_id"), Some(456));

        let reject = extract_message("NO 456");
        assert_eq!(reject.command.int("match_id"), Some(456));
    }

    #[test]
    fn test_profile_and_match_ids_are_optional() {
        assert!(extract_message("PROFILE").command.parameters.is_empty());
        assert_eq!(
            extract_message("PROFILE 123").command.int("user_id"),
            Some(123)
        );
        assert!(extract_message("MATCH").command.parameters.is_empty());
        assert_eq!(
            extract_message("MATCH 123").command.int("target_user_id"),
            Some(123)
        );
    }

    #[test]
    fn test_keyword_commands_have_no_parameters() {
        for message in ["HELP", "STOP", "STATUS", "MENU", "BACK"] {
            assert!(
                extract_message(message).command.parameters.is_empty(),
                "message {message:?}"
            );
        }
    }

    #[test]
    fn test_id_too_large_for_i64_is_dropped() {
        let e = extract_message("ACCEPT 99999999999999999999");
        assert!(!e.command.has("match_id"));
        assert_eq!(e.dropped.len(), 1);
        assert_eq!(e.dropped[0].reason, "number too large");
    }
}
