//! Step-by-step parse records for diagnostics.
//!
//! The parser itself never fails, which makes "why did this message come out
//! as UNKNOWN" and "where did my AGE go" questions hard to answer from the
//! command alone. A [`ParseTrace`] answers them: it records the normalized
//! text that was actually matched, every grammar tried and whether it fired,
//! and any fields that were seen but dropped during coercion.

use penzi_sms_core::{CommandKind, ParsedCommand};
use serde::{Deserialize, Serialize};

/// One grammar tried during classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarAttempt {
    /// Kind the grammar would have produced.
    pub kind: CommandKind,
    /// Whether its pattern matched the normalized message.
    pub matched: bool,
}

/// A field that appeared in the message but produced no parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedField {
    /// Parameter name the field would have filled.
    pub field: String,
    /// The refused value, as captured from the normalized message.
    pub value: String,
    /// Why the value was refused.
    pub reason: String,
}

/// Record of one parse, from normalization through extraction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParseTrace {
    /// The trimmed, uppercased text the grammars were matched against.
    pub normalized_text: String,
    /// Grammars tried, in priority order, up to and including the winner.
    /// All fourteen appear (none matched) when the message is unrecognized.
    pub attempts: Vec<GrammarAttempt>,
    /// Names of the parameters that were extracted, sorted.
    pub extracted_fields: Vec<String>,
    /// Fields seen in the message but dropped during extraction.
    pub dropped_fields: Vec<DroppedField>,
}

impl ParseTrace {
    /// Kind of the grammar that matched, if any attempt fired.
    pub fn matched_kind(&self) -> Option<CommandKind> {
        self.attempts
            .iter()
            .find(|attempt| attempt.matched)
            .map(|attempt| attempt.kind)
    }
}

/// A parsed command together with the trace that produced it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParseRun {
    /// The parse result.
    pub command: ParsedCommand,
    /// How the result came about.
    pub trace: ParseTrace,
}
