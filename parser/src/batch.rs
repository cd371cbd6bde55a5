//! Batch parsing over many inbound messages.

use penzi_sms_core::{InboundMessage, ParsedCommand};
use rayon::prelude::*;
use tracing::debug;

use crate::parse_sms;

/// Parses a batch of inbound messages in parallel.
///
/// Order-preserving: the command at index `i` is the parse of the message at
/// index `i`. The parser is a pure function, so messages are independent and
/// run on rayon's current pool; callers that want a bounded pool can wrap
/// this call in `ThreadPool::install`.
pub fn parse_batch(messages: &[InboundMessage]) -> Vec<ParsedCommand> {
    debug!(count = messages.len(), "Parsing message batch");
    messages
        .par_iter()
        .map(|message| parse_sms(&message.message, &message.sender))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use penzi_sms_core::CommandKind;

    #[test]
    fn test_batch_preserves_input_order() {
        let messages = vec![
            InboundMessage::new("0700000001", "HELP"),
            InboundMessage::new("0700000002", "ACCEPT 456"),
            InboundMessage::new("0700000003", "xyzzy"),
        ];

        let commands = parse_batch(&messages);

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].kind, CommandKind::Help);
        assert_eq!(commands[1].kind, CommandKind::Accept);
        assert_eq!(commands[2].kind, CommandKind::Unknown);
        assert_eq!(commands[1].sender_id, "0700000002");
    }

    #[test]
    fn test_empty_batch_parses_to_nothing() {
        assert!(parse_batch(&[]).is_empty());
    }

    #[test]
    fn test_batch_matches_single_message_parsing() {
        let messages = vec![InboundMessage::new("0712345678", "REG NAME:JOHN, AGE:25")];
        let batch = parse_batch(&messages);
        let single = parse_sms("REG NAME:JOHN, AGE:25", "0712345678");
        assert_eq!(batch[0], single);
    }
}
