//! Reference text sent back for the HELP command.

/// One example line per supported command family, preformatted for direct
/// transmission to the sender.
pub const HELP_TEXT: &str = "\
PENZI SMS COMMANDS:

REGISTRATION:
REG NAME:John AGE:25 GENDER:M COUNTY:Nairobi TOWN:Westlands

PROFILE:
PROFILE - View your profile
PROFILE 123 - View user 123's profile

SEARCH:
SEARCH AGE:20-30 GENDER:F COUNTY:Nairobi

MATCHING:
MATCH - Get new matches
MATCH 123 - Request match with user 123
ACCEPT 456 - Accept match 456
REJECT 456 - Reject match 456

MESSAGING:
MSG 123 Hello there!
REPLY 789 Thanks for the message

GENERAL:
HELP - Show this help
STATUS - Check your status
STOP - Unsubscribe";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse_sms;
    use penzi_sms_core::CommandKind;

    #[test]
    fn test_help_text_has_no_surrounding_whitespace() {
        assert_eq!(HELP_TEXT, HELP_TEXT.trim());
    }

    #[test]
    fn test_every_example_line_parses_as_its_command() {
        // Each "SYNTAX - description" line's syntax half must itself be a
        // recognized command, so the help we send out never lies.
        let cases = [
            ("REG NAME:John AGE:25 GENDER:M COUNTY:Nairobi TOWN:Westlands", CommandKind::Register),
            ("PROFILE", CommandKind::Profile),
            ("PROFILE 123", CommandKind::Profile),
            ("SEARCH AGE:20-30 GENDER:F COUNTY:Nairobi", CommandKind::Search),
            ("MATCH", CommandKind::Match),
            ("MATCH 123", CommandKind::Match),
            ("ACCEPT 456", CommandKind::Accept),
            ("REJECT 456", CommandKind::Reject),
            ("MSG 123 Hello there!", CommandKind::Message),
            ("REPLY 789 Thanks for the message", CommandKind::Reply),
            ("HELP", CommandKind::Help),
            ("STATUS", CommandKind::Status),
            ("STOP", CommandKind::Stop),
        ];
        for (example, expected) in cases {
            assert!(HELP_TEXT.contains(example), "help text lost {example:?}");
            assert_eq!(
                parse_sms(example, "0712345678").kind,
                expected,
                "example {example:?}"
            );
        }
    }
}
