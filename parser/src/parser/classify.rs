//! Command grammar table and first-match classification.

use std::sync::LazyLock;

use penzi_sms_core::CommandKind;
use regex::{Captures, Regex};

/// One entry in the grammar table.
pub struct CommandGrammar {
    /// Kind assigned when this grammar matches.
    pub kind: CommandKind,
    /// Anchored pattern, written against the normalized (uppercased) message.
    pub pattern: Regex,
}

/// Grammar table in match-priority order.
///
/// Order is part of the contract: `M 123` must classify as a match request,
/// never as a message send, because the MATCH grammar is tried first. Each
/// pattern is anchored at both ends and must consume the entire normalized
/// message. Payload groups that may span lines use an inline dot-all group,
/// so a registration typed across several lines still captures whole.
pub static GRAMMAR_TABLE: LazyLock<Vec<CommandGrammar>> = LazyLock::new(|| {
    // SAFETY: These regexes are compile-time constants and are validated by tests.
    [
        (CommandKind::Register, r"^(?:REG|REGISTER)\s+(?s:(.+))$"),
        (CommandKind::Update, r"^(?:UPDATE|EDIT)\s+(?s:(.+))$"),
        (CommandKind::Profile, r"^(?:PROFILE|PROF)\s*(\d+)?$"),
        (CommandKind::Search, r"^(?:SEARCH|FIND)\s+(?s:(.+))$"),
        (CommandKind::Match, r"^(?:MATCH|M)\s*(\d+)?$"),
        (CommandKind::Accept, r"^(?:ACCEPT|YES|Y)\s+(\d+)$"),
        (CommandKind::Reject, r"^(?:REJECT|NO|N)\s+(\d+)$"),
        (CommandKind::Message, r"^(?:MSG|MESSAGE)\s+(\d+)\s+(?s:(.+))$"),
        (CommandKind::Reply, r"^(?:REPLY|R)\s+(\d+)\s+(?s:(.+))$"),
        (CommandKind::Help, r"^(?:HELP|H|\?)$"),
        (CommandKind::Stop, r"^(?:STOP|QUIT|EXIT)$"),
        (CommandKind::Status, r"^(?:STATUS|STAT)$"),
        (CommandKind::Menu, r"^(?:MENU|MAIN)$"),
        (CommandKind::Back, r"^(?:BACK|B)$"),
    ]
    .into_iter()
    .map(|(kind, pattern)| CommandGrammar {
        kind,
        pattern: Regex::new(pattern).expect("static regex must compile"),
    })
    .collect()
});

/// Outcome of a successful classification.
pub struct GrammarMatch<'t> {
    /// Kind of the grammar that fired.
    pub kind: CommandKind,
    /// Number of grammars tried, including the one that matched.
    pub grammars_tried: usize,
    /// Captures of the winning pattern against the normalized text.
    pub captures: Captures<'t>,
}

/// Runs a normalized message through [`GRAMMAR_TABLE`] in priority order and
/// returns the first grammar that matches, or `None` when the message fits
/// no known command shape.
pub fn classify(normalized: &str) -> Option<GrammarMatch<'_>> {
    for (index, grammar) in GRAMMAR_TABLE.iter().enumerate() {
        if let Some(captures) = grammar.pattern.captures(normalized) {
            return Some(GrammarMatch {
                kind: grammar.kind,
                grammars_tried: index + 1,
                captures,
            });
        }
    }
    None
}
