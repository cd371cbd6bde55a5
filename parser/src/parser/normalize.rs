//! Inbound message normalization utilities.

/// Normalizes a raw inbound SMS body for grammar matching.
///
/// Gateways disagree on framing: some deliver CRLF line endings, some bare
/// carriage returns, and most pass through whatever whitespace the sender
/// typed around the text. Grammar matching happens on one canonical form:
/// line endings folded to `\n`, surrounding whitespace trimmed, and the
/// whole body uppercased so `reg`, `Reg`, and `REG` read identically.
///
/// Interior line breaks survive normalization. Keyword grammars only accept
/// single-line messages, but label payloads (`REG`, `UPDATE`, `SEARCH`)
/// treat newlines as field separators alongside commas.
pub fn normalize_message(raw: &str) -> String {
    raw.replace("\r\n", "\n")
        .replace('\r', "\n")
        .trim()
        .to_uppercase()
}
